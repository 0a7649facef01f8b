//! Fixed-depth materialisation of threaded comments.
//!
//! Every comment matching the query is returned at the top level together with
//! its replies and their replies. Anything deeper is not loaded.

use super::{comment::Comment, repository::CommentRepository};
use crate::domain::shared::errors::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use ts_rs::TS;
use uuid::Uuid;

/// Levels materialised per top-level comment: the comment, its children and
/// its grandchildren.
pub const COMMENT_TREE_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    pub children: Vec<CommentNode>,
}

impl CommentNode {
    /// Number of levels below and including this node.
    pub fn depth(&self) -> usize {
        1 + self.children.iter().map(CommentNode::depth).max().unwrap_or(0)
    }
}

/// Loads replies for `top` level by level, one store call per level.
pub async fn load_comment_tree(
    comments: &dyn CommentRepository,
    top: Vec<Comment>,
) -> Result<Vec<CommentNode>, StoreError> {
    let mut levels = vec![top];
    while levels.len() < COMMENT_TREE_DEPTH {
        let parent_ids: Vec<Uuid> = levels
            .last()
            .map(|level| level.iter().map(|c| c.id).collect())
            .unwrap_or_default();
        if parent_ids.is_empty() {
            break;
        }
        levels.push(comments.find_children(&parent_ids).await?);
    }
    Ok(assemble_levels(levels))
}

/// Joins already-fetched levels into trees, deepest level first.
///
/// `levels[n + 1]` must hold the children of `levels[n]`; rows whose parent is
/// not in the level above are dropped. Sibling order follows input order.
pub fn assemble_levels(mut levels: Vec<Vec<Comment>>) -> Vec<CommentNode> {
    levels.truncate(COMMENT_TREE_DEPTH);

    let mut below: Vec<CommentNode> = Vec::new();
    while let Some(level) = levels.pop() {
        let mut by_parent: HashMap<Uuid, Vec<CommentNode>> = HashMap::new();
        for node in below.drain(..) {
            if let Some(parent_id) = node.comment.parent_id {
                by_parent.entry(parent_id).or_default().push(node);
            }
        }
        below = level
            .into_iter()
            .map(|comment| {
                let children = by_parent.remove(&comment.id).unwrap_or_default();
                CommentNode { comment, children }
            })
            .collect();
    }
    below
}
