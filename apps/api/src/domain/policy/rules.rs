//! Configurable rules for follows, deletes and toggles.

use crate::domain::social::toggle::ToggleStrategy;
use std::str::FromStr;

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelfFollowPolicy {
    #[default]
    Allow,
    Reject,
}

impl FromStr for SelfFollowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "allow" => Ok(Self::Allow),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown self-follow policy '{}'", other)),
        }
    }
}

/// What `followUser` does when the edge already exists, and `unfollowUser`
/// when it does not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateFollowPolicy {
    #[default]
    Ignore,
    Reject,
}

impl FromStr for DuplicateFollowPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "ignore" => Ok(Self::Ignore),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown duplicate-follow policy '{}'", other)),
        }
    }
}

/// Deleting a user or blog that still has dependents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CascadePolicy {
    /// Dependents are removed with the record.
    #[default]
    Cascade,
    /// The delete is refused while dependents exist.
    Restrict,
}

impl FromStr for CascadePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "cascade" => Ok(Self::Cascade),
            "restrict" => Ok(Self::Restrict),
            other => Err(format!("unknown cascade policy '{}'", other)),
        }
    }
}

/// Deleting a comment that has replies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommentDeletePolicy {
    #[default]
    Cascade,
    Restrict,
    /// Replies move up to the deleted comment's parent.
    Promote,
}

impl FromStr for CommentDeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "cascade" => Ok(Self::Cascade),
            "restrict" => Ok(Self::Restrict),
            "promote" => Ok(Self::Promote),
            other => Err(format!("unknown comment delete policy '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FollowRules {
    pub self_follow: SelfFollowPolicy,
    pub duplicate: DuplicateFollowPolicy,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainRules {
    pub follow: FollowRules,
    pub user_delete: CascadePolicy,
    pub blog_delete: CascadePolicy,
    pub comment_delete: CommentDeletePolicy,
    pub toggle: ToggleStrategy,
}
