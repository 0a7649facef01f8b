//! Existence flipping for like and follow edges.

use super::edge::Edge;
use crate::domain::{
    policy::rules::{DuplicateFollowPolicy, FollowRules, SelfFollowPolicy},
    shared::{errors::DomainError, store::Store},
};
use std::{fmt, str::FromStr};
use tracing::debug;

/// How a toggle reads and writes the edge.
///
/// `CheckThenAct` looks the edge up and then creates or deletes it, which
/// leaves a window in which a concurrent toggle of the same edge can
/// interleave. `ConditionalDelete` only reports an outcome that one of its own
/// writes produced: it deletes, and when nothing was removed it creates; when
/// the create also finds the edge already there, another toggle got in between
/// and it goes back to deleting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToggleStrategy {
    #[default]
    CheckThenAct,
    ConditionalDelete,
}

impl FromStr for ToggleStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "check_then_act" => Ok(Self::CheckThenAct),
            "conditional_delete" => Ok(Self::ConditionalDelete),
            other => Err(format!("unknown toggle strategy '{}'", other)),
        }
    }
}

/// Rounds of delete-then-create before a contended toggle gives up.
const MAX_TOGGLE_ATTEMPTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Created,
    Deleted,
}

impl ToggleOutcome {
    /// Whether the edge exists after the toggle.
    pub fn exists(self) -> bool {
        matches!(self, Self::Created)
    }
}

impl fmt::Display for ToggleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

pub struct ToggleEngine<'a> {
    store: &'a Store,
    strategy: ToggleStrategy,
    follow_rules: FollowRules,
}

impl<'a> ToggleEngine<'a> {
    pub fn new(store: &'a Store, strategy: ToggleStrategy) -> Self {
        Self {
            store,
            strategy,
            follow_rules: FollowRules::default(),
        }
    }

    pub fn with_follow_rules(mut self, rules: FollowRules) -> Self {
        self.follow_rules = rules;
        self
    }

    /// Creates the edge if absent, deletes it if present.
    ///
    /// Both endpoints must exist; otherwise nothing is written and the
    /// missing endpoint is reported as NotFound.
    pub async fn toggle(&self, edge: Edge) -> Result<ToggleOutcome, DomainError> {
        self.ensure_endpoints(&edge).await?;
        self.ensure_creatable(&edge)?;

        let edges = &self.store.edges;
        let outcome = match self.strategy {
            ToggleStrategy::CheckThenAct => {
                if edges.exists(&edge).await? {
                    edges.disconnect(&edge).await?;
                    ToggleOutcome::Deleted
                } else {
                    edges.connect(&edge).await?;
                    ToggleOutcome::Created
                }
            }
            ToggleStrategy::ConditionalDelete => self.toggle_by_writes(&edge).await?,
        };

        debug!(kind = edge.kind(), %outcome, "edge toggled");
        Ok(outcome)
    }

    async fn toggle_by_writes(&self, edge: &Edge) -> Result<ToggleOutcome, DomainError> {
        let edges = &self.store.edges;
        for attempt in 1..=MAX_TOGGLE_ATTEMPTS {
            if edges.disconnect(edge).await? {
                return Ok(ToggleOutcome::Deleted);
            }
            if edges.connect(edge).await? {
                return Ok(ToggleOutcome::Created);
            }
            debug!(kind = edge.kind(), attempt, "edge changed concurrently, retrying");
        }
        Err(DomainError::Unknown {
            field: "id".to_string(),
            message: "Edge kept changing during toggle".to_string(),
        })
    }

    /// Ensures the edge exists. Returns `true` when it was newly created.
    pub async fn connect(&self, edge: Edge) -> Result<bool, DomainError> {
        self.ensure_endpoints(&edge).await?;
        self.ensure_creatable(&edge)?;
        let created = self.store.edges.connect(&edge).await?;
        if !created && self.rejects_redundant(&edge) {
            return Err(DomainError::constraint("userId", "Already following this user"));
        }
        Ok(created)
    }

    /// Ensures the edge is absent. Returns `true` when one was removed.
    pub async fn disconnect(&self, edge: Edge) -> Result<bool, DomainError> {
        self.ensure_endpoints(&edge).await?;
        let removed = self.store.edges.disconnect(&edge).await?;
        if !removed && self.rejects_redundant(&edge) {
            return Err(DomainError::constraint("userId", "Not following this user"));
        }
        Ok(removed)
    }

    fn ensure_creatable(&self, edge: &Edge) -> Result<(), DomainError> {
        if let Edge::Follow {
            follower_id,
            followee_id,
        } = *edge
        {
            if follower_id == followee_id
                && self.follow_rules.self_follow == SelfFollowPolicy::Reject
            {
                return Err(DomainError::validation(
                    "followerId",
                    "Users cannot follow themselves",
                ));
            }
        }
        Ok(())
    }

    fn rejects_redundant(&self, edge: &Edge) -> bool {
        matches!(edge, Edge::Follow { .. })
            && self.follow_rules.duplicate == DuplicateFollowPolicy::Reject
    }

    async fn ensure_endpoints(&self, edge: &Edge) -> Result<(), DomainError> {
        match *edge {
            Edge::Like { user_id, blog_id } => {
                if self.store.blogs.find_by_id(blog_id).await?.is_none() {
                    return Err(DomainError::not_found("blogId", "Blog not found"));
                }
                if self.store.users.find_by_id(user_id).await?.is_none() {
                    return Err(DomainError::not_found("userId", "User not found"));
                }
            }
            Edge::Follow {
                follower_id,
                followee_id,
            } => {
                if self.store.users.find_by_id(followee_id).await?.is_none() {
                    return Err(DomainError::not_found("userId", "User not found"));
                }
                if self.store.users.find_by_id(follower_id).await?.is_none() {
                    return Err(DomainError::not_found("followerId", "Follower not found"));
                }
            }
        }
        Ok(())
    }
}
