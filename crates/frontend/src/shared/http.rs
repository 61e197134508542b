//! Thin request layer over `gloo-net`: auth headers, timeout, multipart and
//! error classification. Every service module builds its calls with
//! [`ApiRequest`].

use std::cell::Cell;
use std::rc::Rc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use gloo_net::http::{Method, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::{AbortController, Blob, BlobPropertyBag, File, FormData};

use super::api_utils::api_url;
use super::config::REQUEST_TIMEOUT_MS;
use super::error::AppError;
use super::storage::{BrowserStorage, KeyValueStorage, BASIC_AUTH_KEY};

enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(FormData),
}

pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    bearer: Option<String>,
    body: Body,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            bearer: None,
            body: Body::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach `Authorization: Bearer <token>`; overrides stored basic auth
    pub fn bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, AppError> {
        let value = serde_json::to_value(body)
            .map_err(|e| AppError::Decode(format!("Failed to serialize request: {}", e)))?;
        self.body = Body::Json(value);
        Ok(self)
    }

    /// Multipart body: `data` = JSON blob, `image` = optional file
    pub fn multipart<T: Serialize>(mut self, data: &T, image: Option<&File>) -> Result<Self, AppError> {
        let json = serde_json::to_string(data)
            .map_err(|e| AppError::Decode(format!("Failed to serialize request: {}", e)))?;
        let form = build_form_data(&json, image)
            .map_err(|e| AppError::Network(format!("Failed to build form: {:?}", e)))?;
        self.body = Body::Multipart(form);
        Ok(self)
    }

    fn url(&self) -> String {
        let mut url = api_url(&self.path);
        if !self.query.is_empty() {
            let pairs: Vec<String> = self
                .query
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                .collect();
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&pairs.join("&"));
        }
        url
    }

    /// Sends the request and returns the response if its status is 2xx.
    pub async fn send(self) -> Result<Response, AppError> {
        let url = self.url();
        let mut builder = RequestBuilder::new(&url).method(self.method.clone());

        let stored_basic = || BrowserStorage::Local.get(BASIC_AUTH_KEY);
        if let Some(value) = authorization(self.bearer.as_deref(), stored_basic) {
            builder = builder.header("Authorization", &value);
        }

        let controller = AbortController::new().ok();
        builder = builder.abort_signal(controller.as_ref().map(|c| c.signal()).as_ref());

        let request = match self.body {
            Body::Empty => builder.build(),
            Body::Json(value) => builder.json(&value),
            Body::Multipart(form) => builder.body(form),
        }
        .map_err(|e| AppError::Network(format!("Failed to build request: {}", e)))?;

        let timed_out = Rc::new(Cell::new(false));
        let _guard = controller.map(|c| {
            let flag = timed_out.clone();
            Timeout::new(REQUEST_TIMEOUT_MS, move || {
                flag.set(true);
                c.abort();
            })
        });

        let response = request.send().await.map_err(|e| {
            if timed_out.get() {
                AppError::Timeout
            } else {
                AppError::Network(format!("Failed to send request: {}", e))
            }
        })?;

        if !response.ok() {
            let status = response.status();
            log::warn!("{:?} {} -> {}", self.method, self.path, status);
            return Err(status_error(status));
        }
        Ok(response)
    }

    pub async fn send_json<T: DeserializeOwned>(self) -> Result<T, AppError> {
        let response = self.send().await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Decode(format!("Failed to parse response: {}", e)))
    }

    /// For endpoints whose body is irrelevant
    pub async fn send_empty(self) -> Result<(), AppError> {
        self.send().await.map(|_| ())
    }
}

/// `Authorization` value: an explicit bearer token wins, otherwise the
/// stored basic credentials, if any.
fn authorization(bearer: Option<&str>, stored_basic: impl FnOnce() -> Option<String>) -> Option<String> {
    match bearer {
        Some(token) => Some(format!("Bearer {}", token)),
        None => stored_basic(),
    }
}

/// Error for a non-2xx status. Only 401 means the session is gone; a 403
/// stays an HTTP error so each operation can word it.
fn status_error(status: u16) -> AppError {
    if status == 401 {
        AppError::Auth
    } else {
        AppError::Http {
            status,
            message: String::new(),
        }
    }
}

fn build_form_data(json: &str, image: Option<&File>) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    let parts = js_sys::Array::of1(&JsValue::from_str(json));
    let properties = BlobPropertyBag::new();
    properties.set_type("application/json");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &properties)?;
    form.append_with_blob("data", &blob)?;
    if let Some(file) = image {
        form.append_with_blob_and_filename("image", file, &file.name())?;
    }
    Ok(form)
}

/// `Basic base64(user:pass)` header value
pub fn basic_auth_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{}:{}", username, password)))
}

/// Stores basic credentials; attached to every request without a bearer token
pub fn set_basic_auth(username: &str, password: &str) {
    BrowserStorage::Local.set(BASIC_AUTH_KEY, &basic_auth_header(username, password));
}

pub fn clear_basic_auth() {
    BrowserStorage::Local.remove(BASIC_AUTH_KEY);
}
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_auth_is_base64_of_user_colon_pass() {
        assert_eq!(basic_auth_header("admin", "secret"), "Basic YWRtaW46c2VjcmV0");
    }

    #[test]
    fn bearer_token_wins_over_stored_basic() {
        let basic = || Some(basic_auth_header("admin", "secret"));
        assert_eq!(authorization(Some("tok"), basic).as_deref(), Some("Bearer tok"));
    }

    #[test]
    fn stored_basic_is_used_without_bearer() {
        let basic = || Some(basic_auth_header("admin", "secret"));
        assert_eq!(
            authorization(None, basic).as_deref(),
            Some("Basic YWRtaW46c2VjcmV0")
        );
        assert_eq!(authorization(None, || None), None);
    }

    #[test]
    fn forbidden_keeps_the_operation_message() {
        assert_eq!(status_error(401), AppError::Auth);
        let err = status_error(403).localize(|_| "Error al eliminar la oferta");
        assert_eq!(err.user_message(), "Error al eliminar la oferta");
        assert_eq!(err.status(), Some(403));
    }
}
