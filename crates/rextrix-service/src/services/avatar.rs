//! Avatar / company logo uploads
//!
//! Files land at `{upload_dir}/avatars/{user_id}/{uuid}.{ext}` and are served
//! back under `/uploads/avatars/...`.

use std::path::PathBuf;

use rextrix_common::AppError;
use rextrix_core::Snowflake;
use tokio::fs;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::dto::AvatarResponse;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::user::UserService;

/// Public URL prefix the upload directory is mounted at
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

const AVATARS_DIR: &str = "avatars";

/// File extension for an accepted image content type
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    match essence.to_ascii_lowercase().as_str() {
        "image/png" => Some("png"),
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/webp" => Some("webp"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

pub struct AvatarService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AvatarService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        user_id: Snowflake,
        content_type: &str,
        bytes: &[u8],
    ) -> ServiceResult<AvatarResponse> {
        let ext = extension_for(content_type)
            .ok_or_else(|| AppError::UnsupportedMediaType(content_type.to_string()))?;

        let uploads = self.ctx.uploads();
        if bytes.is_empty() {
            return Err(ServiceError::validation("file is empty"));
        }
        if bytes.len() > uploads.max_file_size_bytes {
            return Err(AppError::PayloadTooLarge {
                max_mb: uploads.max_file_size_mb(),
            }
            .into());
        }

        let users = UserService::new(self.ctx);
        let mut user = users.find(user_id).await?;

        let relative = format!("{AVATARS_DIR}/{user_id}/{}.{ext}", Uuid::new_v4());
        let path = uploads.upload_dir.join(&relative);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).await.map_err(storage_error)?;
        }
        fs::write(&path, bytes).await.map_err(storage_error)?;

        let previous = user.avatar_url.take();
        let avatar_url = format!("{UPLOADS_URL_PREFIX}/{relative}");
        user.set_avatar_url(Some(avatar_url.clone()));
        if let Err(e) = self.ctx.user_repo().update(&user).await {
            if let Err(io) = fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %io, "Failed to remove unreferenced avatar");
            }
            return Err(e.into());
        }

        if let Some(old) = previous.and_then(|url| self.local_path(user_id, &url)) {
            if let Err(e) = fs::remove_file(&old).await {
                warn!(path = %old.display(), error = %e, "Failed to remove previous avatar");
            }
        }

        info!(user_id = %user_id, avatar_url = %avatar_url, "Avatar uploaded");
        Ok(AvatarResponse { avatar_url })
    }

    /// On-disk path of a URL this service handed out for `user_id`
    fn local_path(&self, user_id: Snowflake, url: &str) -> Option<PathBuf> {
        let relative = url.strip_prefix(UPLOADS_URL_PREFIX)?.trim_start_matches('/');
        let file_name = relative.strip_prefix(&format!("{AVATARS_DIR}/{user_id}/"))?;
        if file_name.is_empty() || file_name.contains(['/', '\\']) || file_name.contains("..") {
            return None;
        }
        Some(self.ctx.upload_dir().join(relative))
    }
}

fn storage_error(err: std::io::Error) -> ServiceError {
    AppError::Storage(err.to_string()).into()
}
