use super::dto::{
    ChangePasswordRequest, FollowRequest, ImageUploadRequest, LoginRequest, RegisterRequest,
};
use crate::{
    application::envelope::{
        DeleteResponse, UserDetailResponse, UserResponse, UsersResponse, respond,
    },
    domain::{
        policy::rules::{CascadePolicy, DomainRules},
        shared::{errors::DomainError, store::Store, validation::into_domain_error},
        social::{edge::Edge, toggle::ToggleEngine},
        user::{
            entity::{NewUser, User, UserDetail, UserProfile},
            value_objects::{LoginIdentifier, Password, Registration},
        },
    },
    infrastructure::security::password::PasswordHasher,
};
use futures_util::{future::try_join_all, try_join};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Account operations: registration, credentials, follows, profile.
pub struct UserUseCase {
    store: Store,
    hasher: Arc<dyn PasswordHasher>,
    rules: DomainRules,
}

impl UserUseCase {
    pub fn new(store: Store, hasher: Arc<dyn PasswordHasher>, rules: DomainRules) -> Self {
        Self {
            store,
            hasher,
            rules,
        }
    }

    #[instrument(skip(self))]
    pub async fn get_all_users(&self) -> UsersResponse {
        respond("get_all_users", self.all_users().await)
    }

    #[instrument(skip(self))]
    pub async fn get_user(&self, id: Uuid) -> UserDetailResponse {
        respond("get_user", self.user_detail(id).await)
    }

    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn register(&self, request: RegisterRequest) -> UserResponse {
        respond("register", self.try_register(request).await)
    }

    #[instrument(skip(self, request))]
    pub async fn login(&self, request: LoginRequest) -> UserResponse {
        respond("login", self.try_login(request).await)
    }

    #[instrument(skip(self, request))]
    pub async fn change_password(&self, request: ChangePasswordRequest) -> UserResponse {
        respond("change_password", self.try_change_password(request).await)
    }

    #[instrument(skip(self), fields(user_id = %request.user_id, follower_id = %request.follower_id))]
    pub async fn follow_user(&self, request: FollowRequest) -> UserDetailResponse {
        respond("follow_user", self.set_following(request, true).await)
    }

    #[instrument(skip(self), fields(user_id = %request.user_id, follower_id = %request.follower_id))]
    pub async fn unfollow_user(&self, request: FollowRequest) -> UserDetailResponse {
        respond("unfollow_user", self.set_following(request, false).await)
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> DeleteResponse {
        respond("delete_user", self.try_delete(id).await)
    }

    #[instrument(skip(self, request), fields(user_id = %request.user_id))]
    pub async fn upload_image(&self, request: ImageUploadRequest) -> UserResponse {
        respond("image_upload", self.try_upload_image(request).await)
    }

    async fn all_users(&self) -> Result<Vec<UserDetail>, DomainError> {
        let users = self.store.users.find_all().await?;
        try_join_all(users.into_iter().map(|u| load_user_detail(&self.store, u))).await
    }

    async fn user_detail(&self, id: Uuid) -> Result<UserDetail, DomainError> {
        let user = self
            .store
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("id", "User not found"))?;
        load_user_detail(&self.store, user).await
    }

    async fn try_register(&self, request: RegisterRequest) -> Result<UserProfile, DomainError> {
        let registration =
            Registration::parse(request.username, request.email, request.password)?;
        let password_hash = self.hash(&registration.password.value)?;

        let user = self
            .store
            .users
            .create(&NewUser {
                username: registration.username.value,
                email: registration.email.value,
                password_hash,
            })
            .await?;

        info!(user_id = %user.id, "user registered");
        Ok(user.into())
    }

    async fn try_login(&self, request: LoginRequest) -> Result<UserProfile, DomainError> {
        let identifier = LoginIdentifier::parse(&request.text);
        let user = self.find_by_identifier(&identifier).await?;

        let valid = self
            .hasher
            .verify(&user.password_hash, &request.password)
            .map_err(|e| DomainError::Unknown {
                field: "password".to_string(),
                message: e.to_string(),
            })?;
        if !valid {
            return Err(DomainError::unauthorized("password", "Incorrect password"));
        }

        Ok(user.into())
    }

    async fn try_change_password(
        &self,
        request: ChangePasswordRequest,
    ) -> Result<UserProfile, DomainError> {
        let identifier = LoginIdentifier::parse(&request.text);
        let user = self.find_by_identifier(&identifier).await?;

        let password =
            Password::new(request.new_password).map_err(|e| into_domain_error(e, "newPassword"))?;
        let password_hash = self.hash(&password.value)?;
        let updated = self
            .store
            .users
            .update_password(user.id, &password_hash)
            .await?;

        info!(user_id = %updated.id, "password changed");
        Ok(updated.into())
    }

    async fn set_following(
        &self,
        request: FollowRequest,
        follow: bool,
    ) -> Result<UserDetail, DomainError> {
        let edge = Edge::follow(request.follower_id, request.user_id);
        let engine =
            ToggleEngine::new(&self.store, self.rules.toggle).with_follow_rules(self.rules.follow);
        let changed = if follow {
            engine.connect(edge).await?
        } else {
            engine.disconnect(edge).await?
        };
        debug!(follow, changed, "follow edge updated");

        let follower = self
            .store
            .users
            .find_by_id(request.follower_id)
            .await?
            .ok_or_else(|| DomainError::not_found("followerId", "Follower not found"))?;
        load_user_detail(&self.store, follower).await
    }

    async fn try_delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let user = self
            .store
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("userId", "User not found"))?;

        if self.rules.user_delete == CascadePolicy::Restrict {
            let (blogs, comments) = try_join!(
                self.store.blogs.find_by_user(user.id),
                self.store.comments.find_by_user(user.id),
            )?;
            if !blogs.is_empty() || !comments.is_empty() {
                return Err(DomainError::constraint(
                    "userId",
                    "User still owns blogs or comments",
                ));
            }
        }

        self.store.users.delete(user.id).await?;
        info!(user_id = %user.id, "user deleted");
        Ok(true)
    }

    async fn try_upload_image(
        &self,
        request: ImageUploadRequest,
    ) -> Result<UserProfile, DomainError> {
        let user = self
            .store
            .users
            .find_by_id(request.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("userId", "User not found"))?;

        let image = request.image.trim();
        if image.is_empty() {
            return Err(DomainError::validation("image", "Image reference is required"));
        }

        Ok(self.store.users.update_image(user.id, image).await?.into())
    }

    async fn find_by_identifier(&self, identifier: &LoginIdentifier) -> Result<User, DomainError> {
        let found = match identifier {
            LoginIdentifier::Email(email) => self.store.users.find_by_email(email).await?,
            LoginIdentifier::Username(username) => {
                self.store.users.find_by_username(username).await?
            }
        };
        found.ok_or_else(|| DomainError::not_found(identifier.field(), "User not found"))
    }

    fn hash(&self, plaintext: &str) -> Result<String, DomainError> {
        self.hasher
            .hash(plaintext)
            .map_err(|e| DomainError::Unknown {
                field: "password".to_string(),
                message: e.to_string(),
            })
    }
}

/// A user with their blogs, followers and followees.
pub async fn load_user_detail(store: &Store, user: User) -> Result<UserDetail, DomainError> {
    let (blogs, follower_ids, following_ids) = try_join!(
        store.blogs.find_by_user(user.id),
        store.edges.followers_of(user.id),
        store.edges.following_of(user.id),
    )?;
    let (followers, following) = try_join!(
        store.users.find_many(&follower_ids),
        store.users.find_many(&following_ids),
    )?;

    Ok(UserDetail {
        profile: user.into(),
        blogs,
        followers: followers.into_iter().map(UserProfile::from).collect(),
        following: following.into_iter().map(UserProfile::from).collect(),
    })
}
