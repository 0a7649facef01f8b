use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// "This user likes this blog." Identified only by the pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Like {
    pub user_id: Uuid,
    pub blog_id: Uuid,
}
