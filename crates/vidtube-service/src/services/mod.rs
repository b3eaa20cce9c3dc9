//! Business logic services
//!
//! Each service borrows the shared [`ServiceContext`] for the duration of a
//! request.

pub mod auth;
pub mod context;
pub mod error;
pub mod profile;
pub mod token;
pub mod user;

pub use auth::AuthService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{validation_messages, ServiceError, ServiceResult};
pub use profile::ProfileService;
pub use token::TokenService;
pub use user::UserService;

/// In-memory repositories and storage shared by the service tests
#[cfg(test)]
pub(crate) mod testing {
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;
    use tempfile::TempDir;
    use vidtube_common::JwtService;
    use vidtube_core::{
        ChannelProfile, DomainError, MediaStorage, ProfileRepository, RepoResult, Subscription,
        UploadedMedia, User, UserId, UserRepository, Video, VideoId, VideoOwner,
        WatchHistoryEntry,
    };
    use vidtube_db::PgPool;

    use crate::dto::{LoginRequest, LoginResponse, ProfileImages, RegisterRequest, UserResponse};

    use super::{AuthService, ServiceContext, ServiceContextBuilder, ServiceResult};

    pub(crate) struct StoredUser {
        user: User,
        password_hash: String,
        refresh_token: Option<String>,
    }

    #[derive(Default)]
    pub(crate) struct InMemoryStore {
        users: Mutex<Vec<StoredUser>>,
        videos: Mutex<Vec<Video>>,
        subscriptions: Mutex<Vec<Subscription>>,
        /// Makes `create` fail as if a unique constraint fired
        pub(crate) reject_creates: AtomicBool,
    }

    impl InMemoryStore {
        pub(crate) fn user_count(&self) -> usize {
            self.users.lock().unwrap().len()
        }

        pub(crate) fn stored_refresh_token(&self, id: UserId) -> Option<String> {
            self.users
                .lock()
                .unwrap()
                .iter()
                .find(|s| s.user.id == id)
                .and_then(|s| s.refresh_token.clone())
        }

        pub(crate) fn add_video(&self, owner_id: UserId, title: &str) -> VideoId {
            let now = Utc::now();
            let video = Video {
                id: VideoId::generate(),
                video_file: format!("http://media.test/{title}.mp4"),
                thumbnail: format!("http://media.test/{title}.png"),
                owner_id,
                title: title.to_string(),
                description: format!("{title} description"),
                duration: 42.5,
                views: 3,
                is_published: true,
                created_at: now,
                updated_at: now,
            };
            let id = video.id;
            self.videos.lock().unwrap().push(video);
            id
        }

        pub(crate) fn subscribe(&self, subscriber: UserId, channel: UserId) {
            self.subscriptions
                .lock()
                .unwrap()
                .push(Subscription::new(subscriber, channel));
        }

        pub(crate) fn set_watch_history(&self, id: UserId, history: Vec<VideoId>) {
            let mut users = self.users.lock().unwrap();
            if let Some(stored) = users.iter_mut().find(|s| s.user.id == id) {
                stored.user.watch_history = history;
            }
        }

        fn update<F>(&self, id: UserId, f: F) -> Option<User>
        where
            F: FnOnce(&mut StoredUser),
        {
            let mut users = self.users.lock().unwrap();
            users.iter_mut().find(|s| s.user.id == id).map(|stored| {
                f(stored);
                stored.user.clone()
            })
        }
    }

    #[async_trait]
    impl UserRepository for InMemoryStore {
        async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users.iter().find(|s| s.user.id == id).map(|s| s.user.clone()))
        }

        async fn find_by_username_or_email(
            &self,
            username: Option<&str>,
            email: Option<&str>,
        ) -> RepoResult<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users
                .iter()
                .find(|s| {
                    username.is_some_and(|u| s.user.username == u)
                        || email.is_some_and(|e| s.user.email == e)
                })
                .map(|s| s.user.clone()))
        }

        async fn create(&self, user: &User, password_hash: &str) -> RepoResult<()> {
            let mut users = self.users.lock().unwrap();
            if self.reject_creates.load(Ordering::SeqCst)
                || users
                    .iter()
                    .any(|s| s.user.username == user.username || s.user.email == user.email)
            {
                return Err(DomainError::UserAlreadyExists);
            }
            users.push(StoredUser {
                user: user.clone(),
                password_hash: password_hash.to_string(),
                refresh_token: None,
            });
            Ok(())
        }

        async fn update_account_details(
            &self,
            id: UserId,
            full_name: &str,
            email: &str,
        ) -> RepoResult<Option<User>> {
            Ok(self.update(id, |s| s.user.set_account_details(full_name, email)))
        }

        async fn update_avatar(&self, id: UserId, avatar: &str) -> RepoResult<Option<User>> {
            Ok(self.update(id, |s| s.user.set_avatar(avatar.to_string())))
        }

        async fn update_cover_image(
            &self,
            id: UserId,
            cover_image: &str,
        ) -> RepoResult<Option<User>> {
            Ok(self.update(id, |s| s.user.set_cover_image(cover_image.to_string())))
        }

        async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>> {
            let users = self.users.lock().unwrap();
            Ok(users
                .iter()
                .find(|s| s.user.id == id)
                .map(|s| s.password_hash.clone()))
        }

        async fn update_password(&self, id: UserId, password_hash: &str) -> RepoResult<()> {
            self.update(id, |s| s.password_hash = password_hash.to_string())
                .map(|_| ())
                .ok_or(DomainError::UserNotFound(id))
        }

        async fn set_refresh_token(&self, id: UserId, token: Option<&str>) -> RepoResult<()> {
            self.update(id, |s| s.refresh_token = token.map(str::to_string))
                .map(|_| ())
                .ok_or(DomainError::UserNotFound(id))
        }

        async fn rotate_refresh_token(
            &self,
            id: UserId,
            presented: &str,
            next: &str,
        ) -> RepoResult<bool> {
            let mut users = self.users.lock().unwrap();
            match users.iter_mut().find(|s| s.user.id == id) {
                Some(stored) if stored.refresh_token.as_deref() == Some(presented) => {
                    stored.refresh_token = Some(next.to_string());
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }

    #[async_trait]
    impl ProfileRepository for InMemoryStore {
        async fn channel_profile(
            &self,
            viewer: UserId,
            username: &str,
        ) -> RepoResult<Option<ChannelProfile>> {
            let user = {
                let users = self.users.lock().unwrap();
                users
                    .iter()
                    .find(|s| s.user.username == username)
                    .map(|s| s.user.clone())
            };
            let Some(user) = user else {
                return Ok(None);
            };
            let subscriptions = self.subscriptions.lock().unwrap();
            let subscribers_count = subscriptions
                .iter()
                .filter(|s| s.channel_id == user.id)
                .count() as i64;
            let channels_subscribed_to_count = subscriptions
                .iter()
                .filter(|s| s.subscriber_id == user.id)
                .count() as i64;
            let is_subscribed = subscriptions
                .iter()
                .any(|s| s.channel_id == user.id && s.subscriber_id == viewer);

            Ok(Some(ChannelProfile {
                id: user.id,
                full_name: user.full_name,
                username: user.username,
                email: user.email,
                avatar: user.avatar,
                cover_image: user.cover_image,
                subscribers_count,
                channels_subscribed_to_count,
                is_subscribed,
            }))
        }

        async fn watch_history(&self, user: UserId) -> RepoResult<Vec<WatchHistoryEntry>> {
            let Some(user) = self.find_by_id(user).await? else {
                return Ok(Vec::new());
            };
            let users = self.users.lock().unwrap();
            let videos = self.videos.lock().unwrap();

            Ok(user
                .watch_history
                .iter()
                .filter_map(|id| videos.iter().find(|v| v.id == *id))
                .filter_map(|video| {
                    let owner = users.iter().find(|s| s.user.id == video.owner_id)?;
                    Some(WatchHistoryEntry {
                        id: video.id,
                        video_file: video.video_file.clone(),
                        thumbnail: video.thumbnail.clone(),
                        title: video.title.clone(),
                        description: video.description.clone(),
                        duration: video.duration,
                        views: video.views,
                        is_published: video.is_published,
                        owner: VideoOwner {
                            full_name: owner.user.full_name.clone(),
                            username: owner.user.username.clone(),
                            avatar: owner.user.avatar.clone(),
                        },
                        created_at: video.created_at,
                        updated_at: video.updated_at,
                    })
                })
                .collect())
        }
    }

    /// Media storage that keeps the URLs of hosted files and removes the local file
    #[derive(Default)]
    pub(crate) struct FakeMediaStorage {
        /// Uploads from this attempt on (zero-based) are rejected
        fail_from: Option<usize>,
        attempts: AtomicUsize,
        pub(crate) hosted: Mutex<Vec<String>>,
    }

    impl FakeMediaStorage {
        pub(crate) fn failing_from(attempt: usize) -> Self {
            Self {
                fail_from: Some(attempt),
                ..Default::default()
            }
        }

        pub(crate) fn hosted_count(&self) -> usize {
            self.hosted.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl MediaStorage for FakeMediaStorage {
        async fn upload(&self, local_path: &Path) -> RepoResult<UploadedMedia> {
            let _ = std::fs::remove_file(local_path);
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if self.fail_from.is_some_and(|n| attempt >= n) {
                return Err(DomainError::StorageError("upload rejected".to_string()));
            }
            let name = local_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let url = format!("http://media.test/{name}");
            self.hosted.lock().unwrap().push(url.clone());
            Ok(UploadedMedia { url })
        }

        async fn delete(&self, url: &str) -> RepoResult<()> {
            self.hosted.lock().unwrap().retain(|hosted| hosted != url);
            Ok(())
        }
    }

    pub(crate) struct Harness {
        pub(crate) ctx: ServiceContext,
        pub(crate) store: Arc<InMemoryStore>,
        pub(crate) storage: Arc<FakeMediaStorage>,
        dir: TempDir,
    }

    impl Harness {
        pub(crate) fn new() -> Self {
            Self::with_storage(FakeMediaStorage::default())
        }

        pub(crate) fn with_storage(storage: FakeMediaStorage) -> Self {
            let store = Arc::new(InMemoryStore::default());
            let storage = Arc::new(storage);
            let pool = PgPool::connect_lazy("postgres://localhost/vidtube_test").unwrap();
            let jwt = Arc::new(JwtService::new("access-secret", 3600, "refresh-secret", 36000));

            let ctx = ServiceContextBuilder::new()
                .pool(pool)
                .user_repo(store.clone())
                .profile_repo(store.clone())
                .media_storage(storage.clone())
                .jwt_service(jwt)
                .build()
                .unwrap();

            Self {
                ctx,
                store,
                storage,
                dir: tempfile::tempdir().unwrap(),
            }
        }

        pub(crate) fn temp_file(&self, name: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            std::fs::write(&path, b"image-bytes").unwrap();
            path
        }

        pub(crate) fn avatar_only(&self) -> ProfileImages {
            ProfileImages::AvatarOnly(self.temp_file(&format!("{}.png", UserId::generate())))
        }

        pub(crate) async fn register(
            &self,
            username: &str,
            email: &str,
        ) -> ServiceResult<UserResponse> {
            AuthService::new(&self.ctx)
                .register(register_request(username, email), self.avatar_only())
                .await
        }

        pub(crate) async fn login(
            &self,
            username: &str,
            password: &str,
        ) -> ServiceResult<LoginResponse> {
            AuthService::new(&self.ctx)
                .login(LoginRequest {
                    username: Some(username.to_string()),
                    email: None,
                    password: password.to_string(),
                })
                .await
        }
    }

    pub(crate) fn register_request(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            full_name: "Test User".to_string(),
            email: email.to_string(),
            username: username.to_string(),
            password: "secret123".to_string(),
        }
    }

    pub(crate) fn user_id(response: &UserResponse) -> UserId {
        UserId::parse(&response.id).unwrap()
    }
}
