use contracts::system::auth::{LoginRequest, LoginResponse, SignupRequest};

use crate::shared::api_utils::api_url;
use crate::shared::error::AppError;
use crate::shared::http::ApiRequest;

/// Login with e-mail and password
pub async fn login(email: String, password: String) -> Result<LoginResponse, AppError> {
    let request = LoginRequest { email, password };
    ApiRequest::post("/api/auth/login")
        .json(&request)?
        .send_json::<LoginResponse>()
        .await
        .map_err(|e| e.localize(|_| "Credenciales incorrectas o error de servidor"))
}

/// Register a new account; the backend answers with a session right away
pub async fn signup(request: &SignupRequest) -> Result<LoginResponse, AppError> {
    request.validate().map_err(AppError::validation)?;
    ApiRequest::post("/api/auth/signup")
        .json(request)?
        .send_json::<LoginResponse>()
        .await
        .map_err(|e| e.localize(|_| "Error al registrar usuario"))
}

/// Exchange an e-mail verification token for a session
pub async fn verify(token: &str) -> Result<LoginResponse, AppError> {
    ApiRequest::get("/api/users/verify")
        .query("token", token)
        .send_json::<LoginResponse>()
        .await
}

/// Backend entry point of the Google OAuth flow
pub fn google_login_url() -> String {
    api_url("/api/auth/google")
}

/// Leaves the app for the Google consent screen
pub fn login_with_google() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(&google_login_url()) {
            log::error!("auth: google redirect failed: {:?}", e);
        }
    }
}
