pub mod comment;
pub mod comment_tree;
pub mod edge;
pub mod like;
pub mod repository;
pub mod toggle;
