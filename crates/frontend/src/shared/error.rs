use thiserror::Error;

/// Failure of a client operation, classified the way the UI reports it
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    /// Rejected on the client before any request was sent
    #[error("{0}")]
    Validation(String),

    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    /// No session token, or the backend rejected it
    #[error("not authenticated")]
    Auth,

    #[error("unexpected response: {0}")]
    Decode(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    pub fn is_server_error(&self) -> bool {
        self.status().map(|s| s >= 500).unwrap_or(false)
    }

    /// Localized text for inline notifications
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Http { message, .. } if !message.is_empty() => message.clone(),
            AppError::Http { status, .. } if *status >= 500 => {
                "Error del servidor. Intenta nuevamente más tarde.".to_string()
            }
            AppError::Http { .. } => "No se pudo completar la operación.".to_string(),
            AppError::Network(_) => "No se pudo conectar con el servidor.".to_string(),
            AppError::Timeout => "El servidor tardó demasiado en responder.".to_string(),
            AppError::Auth => "Tu sesión expiró. Inicia sesión nuevamente.".to_string(),
            AppError::Decode(_) => "Respuesta inesperada del servidor.".to_string(),
        }
    }

    /// Replaces the message of HTTP errors according to their status.
    ///
    /// `map` receives the status code and returns the localized message for it.
    pub fn localize(self, map: impl Fn(u16) -> &'static str) -> Self {
        match self {
            AppError::Http { status, .. } => AppError::Http {
                status,
                message: map(status).to_string(),
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localize_only_touches_http_errors() {
        let err = AppError::Http {
            status: 404,
            message: String::new(),
        }
        .localize(|s| if s == 404 { "Producto no encontrado" } else { "Error" });
        assert_eq!(err.user_message(), "Producto no encontrado");
        assert!(err.is_not_found());

        let timeout = AppError::Timeout.localize(|_| "x");
        assert_eq!(timeout, AppError::Timeout);
    }

    #[test]
    fn server_errors_get_generic_message() {
        let err = AppError::Http {
            status: 503,
            message: String::new(),
        };
        assert!(err.is_server_error());
        assert!(err.user_message().contains("servidor"));
    }
}
