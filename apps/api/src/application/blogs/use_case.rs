use super::dto::{BlogInput, DeleteBlogRequest, ToggleLikeRequest};
use crate::{
    application::envelope::{
        BlogDetailResponse, BlogResponse, BlogsResponse, DeleteResponse, LikeResponse, respond,
    },
    domain::{
        blog::entity::{Blog, BlogContent, BlogDetail, NewBlog},
        policy::{
            ownership::ensure_owner,
            rules::{CascadePolicy, DomainRules},
        },
        shared::{errors::DomainError, store::Store},
        social::{edge::Edge, toggle::ToggleEngine},
        user::entity::UserProfile,
    },
};
use futures_util::{future::try_join_all, try_join};
use tracing::{info, instrument};
use uuid::Uuid;

pub struct BlogUseCase {
    store: Store,
    rules: DomainRules,
}

impl BlogUseCase {
    pub fn new(store: Store, rules: DomainRules) -> Self {
        Self { store, rules }
    }

    #[instrument(skip(self))]
    pub async fn get_all_blogs(&self) -> BlogsResponse {
        respond("get_all_blogs", self.all_blogs().await)
    }

    #[instrument(skip(self))]
    pub async fn get_blog(&self, id: Uuid) -> BlogDetailResponse {
        respond("get_blog", self.blog_detail(id).await)
    }

    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    pub async fn create_blog(&self, input: BlogInput) -> BlogResponse {
        respond("create_blog", self.try_create(input).await)
    }

    #[instrument(skip(self, input), fields(user_id = %input.user_id))]
    pub async fn update_blog(&self, id: Uuid, input: BlogInput) -> BlogResponse {
        respond("update_blog", self.try_update(id, input).await)
    }

    #[instrument(skip(self))]
    pub async fn delete_blog(&self, id: Uuid, request: DeleteBlogRequest) -> DeleteResponse {
        respond("delete_blog", self.try_delete(id, request.user_id).await)
    }

    #[instrument(skip(self))]
    pub async fn toggle_like(&self, request: ToggleLikeRequest) -> LikeResponse {
        let engine = ToggleEngine::new(&self.store, self.rules.toggle);
        let result = engine
            .toggle(Edge::like(request.user_id, request.blog_id))
            .await
            .map(|outcome| outcome.exists());
        respond("toggle_like", result)
    }

    async fn all_blogs(&self) -> Result<Vec<BlogDetail>, DomainError> {
        let blogs = self.store.blogs.find_all().await?;
        try_join_all(blogs.into_iter().map(|b| self.load_detail(b))).await
    }

    async fn blog_detail(&self, id: Uuid) -> Result<BlogDetail, DomainError> {
        let blog = self.find(id).await?;
        self.load_detail(blog).await
    }

    async fn try_create(&self, input: BlogInput) -> Result<Blog, DomainError> {
        let content = BlogContent::new(input.title, input.description, input.body, input.tags)?;
        let blog = self
            .store
            .blogs
            .create(&NewBlog {
                content,
                user_id: input.user_id,
            })
            .await?;
        info!(blog_id = %blog.id, "blog created");
        Ok(blog)
    }

    async fn try_update(&self, id: Uuid, input: BlogInput) -> Result<Blog, DomainError> {
        let blog = self.find(id).await?;
        ensure_owner(input.user_id, blog.user_id)?;

        let content = BlogContent::new(input.title, input.description, input.body, input.tags)?;
        Ok(self.store.blogs.update(blog.id, &content).await?)
    }

    async fn try_delete(&self, id: Uuid, actor_id: Uuid) -> Result<bool, DomainError> {
        let blog = self.find(id).await?;
        ensure_owner(actor_id, blog.user_id)?;

        if self.rules.blog_delete == CascadePolicy::Restrict {
            let (comments, likes) = try_join!(
                self.store.comments.find_by_blog(blog.id),
                self.store.edges.likes_of_blog(blog.id),
            )?;
            if !comments.is_empty() || !likes.is_empty() {
                return Err(DomainError::constraint(
                    "id",
                    "Blog still has comments or likes",
                ));
            }
        }

        self.store.blogs.delete(blog.id).await?;
        info!(blog_id = %blog.id, "blog deleted");
        Ok(true)
    }

    async fn find(&self, id: Uuid) -> Result<Blog, DomainError> {
        self.store
            .blogs
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("id", "Blog not found"))
    }

    async fn load_detail(&self, blog: Blog) -> Result<BlogDetail, DomainError> {
        let (user, comments, likes) = try_join!(
            self.store.users.find_by_id(blog.user_id),
            self.store.comments.find_by_blog(blog.id),
            self.store.edges.likes_of_blog(blog.id),
        )?;
        Ok(BlogDetail {
            blog,
            user: user.map(UserProfile::from),
            comments,
            likes,
        })
    }
}
