use crate::{application::DomainFacade, config::Config};
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub facade: Arc<DomainFacade>,
    /// Present when the Postgres backend is in use; probed by `/health`.
    pub db: Option<PgPool>,
}
