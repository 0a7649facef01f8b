use uuid::Uuid;

/// A binary relationship with no identity beyond its composite key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    Like { user_id: Uuid, blog_id: Uuid },
    /// Directed: `follower_id` follows `followee_id`.
    Follow { follower_id: Uuid, followee_id: Uuid },
}

impl Edge {
    pub fn like(user_id: Uuid, blog_id: Uuid) -> Self {
        Self::Like { user_id, blog_id }
    }

    pub fn follow(follower_id: Uuid, followee_id: Uuid) -> Self {
        Self::Follow {
            follower_id,
            followee_id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Like { .. } => "like",
            Self::Follow { .. } => "follow",
        }
    }
}
