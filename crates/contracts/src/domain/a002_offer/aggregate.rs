use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::common::aggregate_id::numeric_id;

numeric_id!(
    /// Backend id of an offer
    OfferId
);

/// Discount on one product of an offer, percent in 1..=99
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDiscount {
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "discountPercentage")]
    pub discount_percentage: u8,
}

/// Promotional offer as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    #[serde(flatten)]
    pub data: OfferDto,
}

/// Offer without id. Used both as the create/update payload and as the
/// flattened body of [`Offer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "imageUrl", default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDateTime,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDateTime,
    #[serde(rename = "productNames", default)]
    pub product_names: Vec<String>,
    #[serde(default)]
    pub discounts: Vec<ProductDiscount>,
    #[serde(rename = "mensajeWhatsApp", default)]
    pub whatsapp_message: String,
}

impl std::ops::Deref for Offer {
    type Target = OfferDto;

    fn deref(&self) -> &OfferDto {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_offer_with_flattened_body() {
        let json = r#"{
            "id": 5,
            "title": "Verano",
            "description": "Descuentos de temporada",
            "startDate": "2025-01-01T00:00:00",
            "endDate": "2025-01-31T23:59:59",
            "productNames": ["Aspirina"],
            "discounts": [{"productName": "Aspirina", "discountPercentage": 20}],
            "mensajeWhatsApp": "hola"
        }"#;
        let offer: Offer = serde_json::from_str(json).unwrap();
        assert_eq!(offer.id, OfferId(5));
        assert_eq!(offer.title.as_deref(), Some("Verano"));
        assert_eq!(offer.image_url, None);
        assert_eq!(offer.discounts[0].discount_percentage, 20);
    }

    #[test]
    fn payload_uses_backend_field_names() {
        let dto = OfferDto {
            title: None,
            description: "x".into(),
            image_url: Some("https://img".into()),
            start_date: NaiveDateTime::parse_from_str("2025-02-01T00:00:00", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            end_date: NaiveDateTime::parse_from_str("2025-02-02T23:59:59", "%Y-%m-%dT%H:%M:%S")
                .unwrap(),
            product_names: vec![],
            discounts: vec![],
            whatsapp_message: String::new(),
        };
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["startDate"], "2025-02-01T00:00:00");
        assert_eq!(value["imageUrl"], "https://img");
        assert!(value.get("title").is_none());
        assert!(value.get("mensajeWhatsApp").is_some());
    }
}
