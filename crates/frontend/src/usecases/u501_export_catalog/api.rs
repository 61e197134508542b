use crate::shared::error::AppError;
use crate::shared::http::ApiRequest;

/// Pushes the current catalog to the storefront database
pub async fn export_catalog(token: &str) -> Result<(), AppError> {
    ApiRequest::post("/api/excel/products/export")
        .bearer(token)
        .send_empty()
        .await
        .map_err(|e| e.localize(|_| "Error al subir catálogo a Supabase."))
}
