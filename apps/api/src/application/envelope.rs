//! Uniform response shapes returned by every façade operation.
//!
//! Each envelope carries `error: { field, message } | null` next to its
//! payload key. The error kind travels with the envelope for the transport's
//! benefit but is not part of the serialised shape.

use crate::domain::{
    blog::entity::{Blog, BlogDetail},
    shared::errors::{DomainError, ErrorKind},
    social::{comment::Comment, comment_tree::CommentNode},
    user::entity::{UserDetail, UserProfile},
};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(skip)]
    pub kind: ErrorKind,
}

impl From<DomainError> for FieldError {
    fn from(err: DomainError) -> Self {
        Self {
            kind: err.kind(),
            field: err.field().to_string(),
            message: err.message().to_string(),
        }
    }
}

pub trait Envelope: Sized {
    type Payload;

    fn success(payload: Self::Payload) -> Self;
    fn failure(error: FieldError) -> Self;
    fn error(&self) -> Option<&FieldError>;
}

/// Converts an operation outcome into its envelope, logging the failure.
pub fn respond<E: Envelope>(operation: &'static str, result: Result<E::Payload, DomainError>) -> E {
    match result {
        Ok(payload) => E::success(payload),
        Err(err) => {
            match err.kind() {
                ErrorKind::Unknown => {
                    tracing::error!(operation, field = err.field(), error = %err.message(), "operation failed")
                }
                _ => {
                    tracing::warn!(operation, field = err.field(), error = %err.message(), "operation rejected")
                }
            }
            E::failure(err.into())
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserResponse {
    pub error: Option<FieldError>,
    pub user: Option<UserProfile>,
    /// Bearer token, present on login/register when sessions are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Envelope for UserResponse {
    type Payload = UserProfile;

    fn success(user: UserProfile) -> Self {
        Self {
            error: None,
            user: Some(user),
            token: None,
        }
    }

    fn failure(error: FieldError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    fn error(&self) -> Option<&FieldError> {
        self.error.as_ref()
    }
}

/// Declares an envelope whose payload sits under a single key.
///
/// `key: Option<T>` is `null` on failure; `key: T = empty` falls back to
/// `empty`.
macro_rules! envelope {
    ($(#[$meta:meta])* $name:ident { $key:ident: Option<$payload:ty> }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
        #[ts(export)]
        pub struct $name {
            pub error: Option<FieldError>,
            pub $key: Option<$payload>,
        }

        impl Envelope for $name {
            type Payload = $payload;

            fn success(payload: $payload) -> Self {
                Self {
                    error: None,
                    $key: Some(payload),
                }
            }

            fn failure(error: FieldError) -> Self {
                Self {
                    error: Some(error),
                    $key: None,
                }
            }

            fn error(&self) -> Option<&FieldError> {
                self.error.as_ref()
            }
        }
    };
    ($(#[$meta:meta])* $name:ident { $key:ident: $payload:ty = $empty:expr }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
        #[ts(export)]
        pub struct $name {
            pub error: Option<FieldError>,
            pub $key: $payload,
        }

        impl Envelope for $name {
            type Payload = $payload;

            fn success(payload: $payload) -> Self {
                Self {
                    error: None,
                    $key: payload,
                }
            }

            fn failure(error: FieldError) -> Self {
                Self {
                    error: Some(error),
                    $key: $empty,
                }
            }

            fn error(&self) -> Option<&FieldError> {
                self.error.as_ref()
            }
        }
    };
}

envelope!(UserDetailResponse { user: Option<UserDetail> });
envelope!(UsersResponse { users: Vec<UserDetail> = Vec::new() });
envelope!(BlogResponse { blog: Option<Blog> });
envelope!(BlogDetailResponse { blog: Option<BlogDetail> });
envelope!(BlogsResponse { blogs: Vec<BlogDetail> = Vec::new() });
envelope!(LikeResponse { liked: Option<bool> });
envelope!(CommentResponse { comment: Option<Comment> });
envelope!(CommentsResponse { comments: Vec<CommentNode> = Vec::new() });
envelope!(
    /// `deleted` is `true` on success; the operation either removes the
    /// record or reports why it did not.
    DeleteResponse { deleted: bool = false }
);
