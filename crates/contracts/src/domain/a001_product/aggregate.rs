use serde::{Deserialize, Serialize};

use crate::domain::common::aggregate_id::numeric_id;
use crate::enums::ProductCategory;

// ============================================================================
// ID Type
// ============================================================================

numeric_id!(
    /// Backend id of a catalog product
    ProductId
);

// ============================================================================
// Aggregate
// ============================================================================

/// Catalog product as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub category: ProductCategory,
}

impl Product {
    /// Image URL only when it is non-blank
    pub fn image(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn formatted_price(&self) -> String {
        format!("S/ {:.2}", self.price)
    }
}

/// Payload for product create/update (the `data` part of the multipart form)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDto {
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub category: ProductCategory,
}

impl Default for ProductDto {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: 0.0,
            image_url: String::new(),
            category: ProductCategory::Otros,
        }
    }
}

impl From<&Product> for ProductDto {
    fn from(p: &Product) -> Self {
        Self {
            name: p.name.clone(),
            description: p.description.clone(),
            price: p.price,
            image_url: p.image_url.clone().unwrap_or_default(),
            category: p.category,
        }
    }
}

impl ProductDto {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("El nombre del producto es obligatorio");
        }
        if self.description.trim().is_empty() {
            return Err("La descripción es obligatoria");
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err("El precio debe ser un número mayor o igual a 0");
        }
        Ok(())
    }
}

// ============================================================================
// Filter query
// ============================================================================

/// Query string of `GET /api/products/filter`. Page is 0-based on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<ProductCategory>,
    #[serde(rename = "minPrice", skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(rename = "maxPrice", skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    /// Comma separated ids
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<String>,
    pub page: i64,
    pub size: i64,
}

impl ProductFilter {
    /// Drops blank text and negative prices, rejects invalid paging.
    pub fn sanitized(&self) -> Result<Self, &'static str> {
        if self.page < 0 || self.size <= 0 {
            return Err("Parámetros de paginación inválidos");
        }
        let query = self
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);
        let ids = self
            .ids
            .as_deref()
            .map(str::trim)
            .filter(|ids| !ids.is_empty())
            .map(str::to_string);
        Ok(Self {
            query,
            category: self.category,
            min_price: self.min_price.filter(|p| p.is_finite() && *p >= 0.0),
            max_price: self.max_price.filter(|p| p.is_finite() && *p >= 0.0),
            ids,
            page: self.page,
            size: self.size,
        })
    }

    pub fn with_ids(mut self, ids: &[ProductId]) -> Self {
        if !ids.is_empty() {
            let joined = ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            self.ids = Some(joined);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_product() {
        let json = r#"{"id":3,"name":"Aspirina","description":"500mg","price":4.5,
            "imageUrl":"","category":"ANALGESICOS_ANTINFLAMATORIOS"}"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, ProductId(3));
        assert_eq!(p.image(), None);
        assert_eq!(p.formatted_price(), "S/ 4.50");
    }

    #[test]
    fn sanitized_filter_drops_blank_and_negative_values() {
        let filter = ProductFilter {
            query: Some("  ".into()),
            category: Some(ProductCategory::Otros),
            min_price: Some(-1.0),
            max_price: Some(20.0),
            ids: None,
            page: 0,
            size: 10,
        };
        let clean = filter.sanitized().unwrap();
        assert_eq!(clean.query, None);
        assert_eq!(clean.min_price, None);
        assert_eq!(clean.max_price, Some(20.0));
    }

    #[test]
    fn sanitized_filter_rejects_bad_paging() {
        let filter = ProductFilter {
            page: -1,
            size: 10,
            ..Default::default()
        };
        assert!(filter.sanitized().is_err());
        let filter = ProductFilter {
            page: 0,
            size: 0,
            ..Default::default()
        };
        assert!(filter.sanitized().is_err());
    }

    #[test]
    fn product_dto_validation() {
        let mut dto = ProductDto {
            name: "Paracetamol".into(),
            description: "Tabletas".into(),
            price: 3.0,
            ..Default::default()
        };
        assert!(dto.validate().is_ok());
        dto.price = -0.5;
        assert!(dto.validate().is_err());
        dto.price = 1.0;
        dto.name = " ".into();
        assert!(dto.validate().is_err());
    }
}
