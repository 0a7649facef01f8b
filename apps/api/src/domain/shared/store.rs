use crate::domain::{
    blog::repository::BlogRepository,
    social::repository::{CommentRepository, EdgeRepository},
    user::repository::UserRepository,
};
use std::sync::Arc;

/// Handle to the Entity Store, passed explicitly to every domain operation.
#[derive(Clone)]
pub struct Store {
    pub users: Arc<dyn UserRepository>,
    pub blogs: Arc<dyn BlogRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub edges: Arc<dyn EdgeRepository>,
}
