pub mod blogs;
pub mod comments;
pub mod envelope;
pub mod users;

use crate::{
    domain::{policy::rules::DomainRules, shared::store::Store},
    infrastructure::security::password::PasswordHasher,
};
use blogs::use_case::BlogUseCase;
use comments::use_case::CommentUseCase;
use std::sync::Arc;
use users::use_case::UserUseCase;

/// Entry point for every operation exposed at the API boundary.
pub struct DomainFacade {
    pub users: UserUseCase,
    pub blogs: BlogUseCase,
    pub comments: CommentUseCase,
}

impl DomainFacade {
    pub fn new(store: Store, hasher: Arc<dyn PasswordHasher>, rules: DomainRules) -> Self {
        Self {
            users: UserUseCase::new(store.clone(), hasher, rules),
            blogs: BlogUseCase::new(store.clone(), rules),
            comments: CommentUseCase::new(store, rules),
        }
    }
}
