//! Process-local Entity Store backed by a single `RwLock`.
//!
//! Every table is a `Vec`, so reads come back in insertion order. Referential
//! rules (uniqueness, foreign keys, cascades) mirror the Postgres schema so the
//! domain layer cannot tell the two backends apart.

use crate::domain::{
    blog::{
        entity::{Blog, BlogContent, NewBlog},
        repository::BlogRepository,
    },
    shared::{errors::StoreError, store::Store},
    social::{
        comment::{Comment, NewComment},
        edge::Edge,
        like::Like,
        repository::{CommentRepository, EdgeRepository},
    },
    user::{
        entity::{NewUser, User},
        repository::UserRepository,
    },
};
use async_trait::async_trait;
use chrono::Utc;
use std::{collections::HashSet, sync::Arc};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    blogs: Vec<Blog>,
    comments: Vec<Comment>,
    likes: Vec<Like>,
    /// (follower, followee)
    follows: Vec<(Uuid, Uuid)>,
}

impl Tables {
    fn user_exists(&self, id: Uuid) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn blog_exists(&self, id: Uuid) -> bool {
        self.blogs.iter().any(|b| b.id == id)
    }

    /// Drops the given comments and every reply below them.
    fn remove_comment_subtrees(&mut self, roots: HashSet<Uuid>) {
        let mut doomed = roots;
        loop {
            let before = doomed.len();
            for comment in &self.comments {
                if comment.parent_id.is_some_and(|p| doomed.contains(&p)) {
                    doomed.insert(comment.id);
                }
            }
            if doomed.len() == before {
                break;
            }
        }
        self.comments.retain(|c| !doomed.contains(&c.id));
    }

    fn remove_blogs(&mut self, ids: &HashSet<Uuid>) {
        let comments: HashSet<Uuid> = self
            .comments
            .iter()
            .filter(|c| ids.contains(&c.blog_id))
            .map(|c| c.id)
            .collect();
        self.remove_comment_subtrees(comments);
        self.likes.retain(|l| !ids.contains(&l.blog_id));
        self.blogs.retain(|b| !ids.contains(&b.id));
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps this store in the handle the domain layer consumes.
    pub fn into_store(self) -> Store {
        Store {
            users: Arc::new(self.clone()),
            blogs: Arc::new(self.clone()),
            comments: Arc::new(self.clone()),
            edges: Arc::new(self),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create(&self, user: &NewUser) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(StoreError::UniqueViolation {
                field: "username".into(),
            });
        }
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation {
                field: "email".into(),
            });
        }
        let now = Utc::now();
        let created = User {
            id: Uuid::now_v7(),
            username: user.username.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            image: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.tables.read().await.users.clone())
    }

    async fn find_many(&self, ids: &[Uuid]) -> Result<Vec<User>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound)?;
        user.password_hash = password_hash.to_string();
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn update_image(&self, id: Uuid, image: &str) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        let user = tables
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound)?;
        user.image = Some(image.to_string());
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.user_exists(id) {
            return Err(StoreError::NotFound);
        }
        let blogs: HashSet<Uuid> = tables
            .blogs
            .iter()
            .filter(|b| b.user_id == id)
            .map(|b| b.id)
            .collect();
        tables.remove_blogs(&blogs);
        let comments: HashSet<Uuid> = tables
            .comments
            .iter()
            .filter(|c| c.user_id == id)
            .map(|c| c.id)
            .collect();
        tables.remove_comment_subtrees(comments);
        tables.likes.retain(|l| l.user_id != id);
        tables.follows.retain(|&(a, b)| a != id && b != id);
        tables.users.retain(|u| u.id != id);
        Ok(())
    }
}

#[async_trait]
impl BlogRepository for InMemoryStore {
    async fn create(&self, blog: &NewBlog) -> Result<Blog, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.user_exists(blog.user_id) {
            return Err(StoreError::MissingReference {
                field: "userId".into(),
            });
        }
        let now = Utc::now();
        let created = Blog {
            id: Uuid::now_v7(),
            title: blog.content.title.clone(),
            description: blog.content.description.clone(),
            body: blog.content.body.clone(),
            tags: blog.content.tags.clone(),
            user_id: blog.user_id,
            created_at: now,
            updated_at: now,
        };
        tables.blogs.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.blogs.iter().find(|b| b.id == id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Blog>, StoreError> {
        Ok(self.tables.read().await.blogs.clone())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Blog>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .blogs
            .iter()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn update(&self, id: Uuid, content: &BlogContent) -> Result<Blog, StoreError> {
        let mut tables = self.tables.write().await;
        let blog = tables
            .blogs
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(StoreError::NotFound)?;
        blog.title = content.title.clone();
        blog.description = content.description.clone();
        blog.body = content.body.clone();
        blog.tags = content.tags.clone();
        blog.updated_at = Utc::now();
        Ok(blog.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.blog_exists(id) {
            return Err(StoreError::NotFound);
        }
        tables.remove_blogs(&HashSet::from([id]));
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn create(&self, comment: &NewComment) -> Result<Comment, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.user_exists(comment.user_id) {
            return Err(StoreError::MissingReference {
                field: "userId".into(),
            });
        }
        if !tables.blog_exists(comment.blog_id) {
            return Err(StoreError::MissingReference {
                field: "blogId".into(),
            });
        }
        if let Some(parent_id) = comment.parent_id {
            if !tables.comments.iter().any(|c| c.id == parent_id) {
                return Err(StoreError::MissingReference {
                    field: "parent_id".into(),
                });
            }
        }
        let now = Utc::now();
        let created = Comment {
            id: Uuid::now_v7(),
            comment_body: comment.body.value.clone(),
            user_id: comment.user_id,
            blog_id: comment.blog_id,
            parent_id: comment.parent_id,
            created_at: now,
            updated_at: now,
        };
        tables.comments.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Comment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.comments.iter().find(|c| c.id == id).cloned())
    }

    async fn find_by_blog(&self, blog_id: Uuid) -> Result<Vec<Comment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.blog_id == blog_id)
            .cloned()
            .collect())
    }

    async fn find_by_user(&self, user_id: Uuid) -> Result<Vec<Comment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_children(&self, parent_ids: &[Uuid]) -> Result<Vec<Comment>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .comments
            .iter()
            .filter(|c| c.parent_id.is_some_and(|p| parent_ids.contains(&p)))
            .cloned()
            .collect())
    }

    async fn update_body(&self, id: Uuid, body: &str) -> Result<Comment, StoreError> {
        let mut tables = self.tables.write().await;
        let comment = tables
            .comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound)?;
        comment.comment_body = body.to_string();
        comment.updated_at = Utc::now();
        Ok(comment.clone())
    }

    async fn delete_promoting(
        &self,
        id: Uuid,
        new_parent: Option<Uuid>,
    ) -> Result<u64, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.comments.iter().any(|c| c.id == id) {
            return Err(StoreError::NotFound);
        }
        let now = Utc::now();
        let mut moved = 0;
        for comment in tables
            .comments
            .iter_mut()
            .filter(|c| c.parent_id == Some(id))
        {
            comment.parent_id = new_parent;
            comment.updated_at = now;
            moved += 1;
        }
        tables.comments.retain(|c| c.id != id);
        Ok(moved)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.comments.iter().any(|c| c.id == id) {
            return Err(StoreError::NotFound);
        }
        tables.remove_comment_subtrees(HashSet::from([id]));
        Ok(())
    }
}

#[async_trait]
impl EdgeRepository for InMemoryStore {
    async fn exists(&self, edge: &Edge) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(match *edge {
            Edge::Like { user_id, blog_id } => tables
                .likes
                .iter()
                .any(|l| l.user_id == user_id && l.blog_id == blog_id),
            Edge::Follow {
                follower_id,
                followee_id,
            } => tables.follows.contains(&(follower_id, followee_id)),
        })
    }

    async fn connect(&self, edge: &Edge) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match *edge {
            Edge::Like { user_id, blog_id } => {
                if !tables.user_exists(user_id) {
                    return Err(StoreError::MissingReference {
                        field: "userId".into(),
                    });
                }
                if !tables.blog_exists(blog_id) {
                    return Err(StoreError::MissingReference {
                        field: "blogId".into(),
                    });
                }
                if tables
                    .likes
                    .iter()
                    .any(|l| l.user_id == user_id && l.blog_id == blog_id)
                {
                    return Ok(false);
                }
                tables.likes.push(Like { user_id, blog_id });
            }
            Edge::Follow {
                follower_id,
                followee_id,
            } => {
                if !tables.user_exists(follower_id) {
                    return Err(StoreError::MissingReference {
                        field: "followerId".into(),
                    });
                }
                if !tables.user_exists(followee_id) {
                    return Err(StoreError::MissingReference {
                        field: "userId".into(),
                    });
                }
                if tables.follows.contains(&(follower_id, followee_id)) {
                    return Ok(false);
                }
                tables.follows.push((follower_id, followee_id));
            }
        }
        Ok(true)
    }

    async fn disconnect(&self, edge: &Edge) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        let removed = match *edge {
            Edge::Like { user_id, blog_id } => {
                let before = tables.likes.len();
                tables
                    .likes
                    .retain(|l| !(l.user_id == user_id && l.blog_id == blog_id));
                before != tables.likes.len()
            }
            Edge::Follow {
                follower_id,
                followee_id,
            } => {
                let before = tables.follows.len();
                tables
                    .follows
                    .retain(|&pair| pair != (follower_id, followee_id));
                before != tables.follows.len()
            }
        };
        Ok(removed)
    }

    async fn likes_of_blog(&self, blog_id: Uuid) -> Result<Vec<Like>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .likes
            .iter()
            .filter(|l| l.blog_id == blog_id)
            .cloned()
            .collect())
    }

    async fn followers_of(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .follows
            .iter()
            .filter(|&&(_, followee)| followee == user_id)
            .map(|&(follower, _)| follower)
            .collect())
    }

    async fn following_of(&self, user_id: Uuid) -> Result<Vec<Uuid>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .follows
            .iter()
            .filter(|&&(follower, _)| follower == user_id)
            .map(|&(_, followee)| followee)
            .collect())
    }
}
