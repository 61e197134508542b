use async_trait::async_trait;
use contracts::system::users::{Profile, ProfileUpdate, TopCategory};

use crate::shared::error::AppError;
use crate::shared::http::ApiRequest;
use crate::system::auth::session::ProfileSource;

/// Current user's profile
pub async fn get_me(token: &str) -> Result<Profile, AppError> {
    ApiRequest::get("/api/users/me")
        .bearer(token)
        .send_json::<Profile>()
        .await
}

/// Update current user's profile; returns the stored profile
pub async fn update_me(token: &str, update: &ProfileUpdate) -> Result<Profile, AppError> {
    update.validate().map_err(AppError::validation)?;
    ApiRequest::put("/api/users/me")
        .bearer(token)
        .json(update)?
        .send_json::<Profile>()
        .await
        .map_err(|e| e.localize(|_| "Error al actualizar el perfil"))
}

/// Delete current user's account
pub async fn delete_me(token: &str) -> Result<(), AppError> {
    ApiRequest::delete("/api/users/me")
        .bearer(token)
        .send_empty()
        .await
        .map_err(|e| e.localize(|_| "Error al eliminar la cuenta"))
}

/// Categories the current user buys most
pub async fn top_categories(token: &str) -> Result<Vec<TopCategory>, AppError> {
    ApiRequest::get("/api/users/me/top-categories")
        .bearer(token)
        .send_json::<Vec<TopCategory>>()
        .await
}

/// Backend-backed [`ProfileSource`]
pub struct UsersApi;

#[async_trait(?Send)]
impl ProfileSource for UsersApi {
    async fn me(&self, token: &str) -> Result<Profile, AppError> {
        get_me(token).await
    }
}
