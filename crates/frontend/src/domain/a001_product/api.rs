use async_trait::async_trait;
use contracts::domain::a001_product::aggregate::{Product, ProductDto, ProductFilter, ProductId};
use contracts::shared::{PageResponse, PageResult};
use web_sys::File;

use super::listing::ProductSource;
use crate::shared::error::AppError;
use crate::shared::http::ApiRequest;

pub async fn get(id: ProductId) -> Result<Product, AppError> {
    ApiRequest::get(format!("/api/products/{}", id))
        .send_json::<Product>()
        .await
        .map_err(|e| {
            e.localize(|status| match status {
                404 => "Producto no encontrado",
                s if s >= 500 => "Error del servidor al obtener el producto",
                _ => "Error al cargar el producto",
            })
        })
}

pub async fn list_all() -> Result<Vec<Product>, AppError> {
    ApiRequest::get("/api/products")
        .send_json::<Vec<Product>>()
        .await
        .map_err(|e| e.localize(|_| "Error al cargar productos"))
}

fn check_paging(page: i64, size: i64) -> Result<(), AppError> {
    if page < 0 || size <= 0 {
        return Err(AppError::validation("Parámetros de paginación inválidos"));
    }
    Ok(())
}

fn paged_error(status: u16) -> &'static str {
    match status {
        400 => "Parámetros de paginación inválidos",
        s if s >= 500 => "Error del servidor al cargar productos",
        _ => "Error al cargar productos paginados",
    }
}

/// Plain listing without filters. `page` is 0-based, as on the wire.
pub async fn paged(page: i64, size: i64) -> Result<PageResult<Product>, AppError> {
    check_paging(page, size)?;
    let response = ApiRequest::get("/api/products/paged")
        .query("page", page)
        .query("size", size)
        .send_json::<PageResponse<Product>>()
        .await
        .map_err(|e| e.localize(paged_error))?;
    Ok(response.into_page(page as usize + 1, size as usize))
}

/// 404 means "gone"; any other failure is passed through.
fn found<T>(result: Result<T, AppError>) -> Result<bool, AppError> {
    match result {
        Ok(_) => Ok(true),
        Err(e) if e.is_not_found() => Ok(false),
        Err(e) => Err(e),
    }
}

pub async fn exists(id: ProductId) -> Result<bool, AppError> {
    found(ApiRequest::get(format!("/api/products/{}", id)).send().await)
}

pub async fn search_by_name(name: &str) -> Result<Vec<Product>, AppError> {
    ApiRequest::get("/api/products/search")
        .query("name", name)
        .send_json::<Vec<Product>>()
        .await
}

/// `GET /api/products/filter`. Blank criteria are dropped before sending.
pub async fn filter(criteria: &ProductFilter) -> Result<PageResponse<Product>, AppError> {
    let clean = criteria.sanitized().map_err(AppError::validation)?;
    let qs = serde_qs::to_string(&clean)
        .map_err(|e| AppError::Decode(format!("Failed to encode filter: {}", e)))?;
    log::debug!("products filter: {}", qs);
    ApiRequest::get(format!("/api/products/filter?{}", qs))
        .send_json::<PageResponse<Product>>()
        .await
        .map_err(|e| {
            e.localize(|status| match status {
                400 => "Parámetros de filtrado inválidos",
                s if s >= 500 => "Error del servidor al filtrar productos",
                _ => "Error al filtrar productos",
            })
        })
}

pub async fn create(token: &str, dto: &ProductDto, image: Option<&File>) -> Result<Product, AppError> {
    dto.validate().map_err(AppError::validation)?;
    ApiRequest::post("/api/products")
        .bearer(token)
        .multipart(dto, image)?
        .send_json::<Product>()
        .await
        .map_err(|e| e.localize(|_| "Error al crear el producto"))
}

pub async fn update(
    token: &str,
    id: ProductId,
    dto: &ProductDto,
    image: Option<&File>,
) -> Result<Product, AppError> {
    dto.validate().map_err(AppError::validation)?;
    ApiRequest::put(format!("/api/products/{}", id))
        .bearer(token)
        .multipart(dto, image)?
        .send_json::<Product>()
        .await
        .map_err(|e| e.localize(|_| "Error al actualizar el producto"))
}

pub async fn delete(token: &str, id: ProductId) -> Result<(), AppError> {
    ApiRequest::delete(format!("/api/products/{}", id))
        .bearer(token)
        .send_empty()
        .await
        .map_err(|e| e.localize(|_| "Error al eliminar el producto"))
}

/// Backend-backed [`ProductSource`]
pub struct ProductsApi;

#[async_trait(?Send)]
impl ProductSource for ProductsApi {
    async fn search_by_name(&self, name: &str) -> Result<Vec<Product>, AppError> {
        search_by_name(name).await
    }

    async fn filter(&self, criteria: &ProductFilter) -> Result<PageResponse<Product>, AppError> {
        filter(criteria).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paging_is_checked_before_sending() {
        assert!(check_paging(0, 10).is_ok());
        assert_eq!(
            check_paging(-1, 10),
            Err(AppError::validation("Parámetros de paginación inválidos"))
        );
        assert!(check_paging(0, 0).unwrap_err().is_validation());
    }

    #[test]
    fn paged_failures_are_localized_by_status() {
        let err = |status| {
            AppError::Http {
                status,
                message: String::new(),
            }
            .localize(paged_error)
            .user_message()
        };
        assert_eq!(err(400), "Parámetros de paginación inválidos");
        assert_eq!(err(503), "Error del servidor al cargar productos");
        assert_eq!(err(404), "Error al cargar productos paginados");
    }

    #[test]
    fn only_not_found_means_missing() {
        assert_eq!(found(Ok(())), Ok(true));
        let missing = AppError::Http {
            status: 404,
            message: String::new(),
        };
        assert_eq!(found::<()>(Err(missing)), Ok(false));
        assert_eq!(found::<()>(Err(AppError::Timeout)), Err(AppError::Timeout));
    }
}
