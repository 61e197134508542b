//! Offer editor contents and their conversion into an [`OfferDto`].

use contracts::domain::a002_offer::aggregate::{Offer, OfferDto, ProductDiscount};
use contracts::domain::a002_offer::rules::{valid_product_names, MAX_DISCOUNT, MIN_DISCOUNT};

use crate::shared::date_utils::{end_of_day, start_of_day, to_date_input};

/// Raw inputs of the offer modal. Dates are `YYYY-MM-DD` strings from date inputs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferDraft {
    pub title: String,
    pub description: String,
    pub image_url: String,
    /// Banner mode; otherwise the offer renders as text
    pub use_image: bool,
    pub start_date: String,
    pub end_date: String,
    names_text: String,
    /// One slot per valid product name, same order
    discounts: Vec<Option<u8>>,
}

impl From<&Offer> for OfferDraft {
    fn from(offer: &Offer) -> Self {
        let image_url = offer.image_url.clone().unwrap_or_default();
        Self {
            title: offer.title.clone().unwrap_or_default(),
            description: offer.description.clone(),
            use_image: !image_url.trim().is_empty(),
            image_url,
            start_date: to_date_input(offer.start_date),
            end_date: to_date_input(offer.end_date),
            names_text: offer.product_names.join(", "),
            discounts: offer
                .discounts
                .iter()
                .map(|d| Some(d.discount_percentage).filter(|p| *p > 0))
                .collect(),
        }
    }
}

impl OfferDraft {
    pub fn names_text(&self) -> &str {
        &self.names_text
    }

    pub fn names(&self) -> Vec<String> {
        let parts: Vec<String> = self.names_text.split(',').map(str::to_string).collect();
        valid_product_names(&parts)
    }

    /// Updates the names field, growing or shrinking the discount slots to match.
    pub fn set_names_text(&mut self, text: String) {
        self.names_text = text;
        self.discounts.resize(self.names().len(), None);
    }

    pub fn discount(&self, idx: usize) -> Option<u8> {
        self.discounts.get(idx).copied().flatten()
    }

    /// Keeps digits only; empty clears the slot, out-of-range input is ignored.
    pub fn set_discount(&mut self, idx: usize, raw: &str) {
        let Some(slot) = self.discounts.get_mut(idx) else {
            return;
        };
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            *slot = None;
            return;
        }
        if let Ok(value) = digits.parse::<u8>() {
            if (MIN_DISCOUNT..=MAX_DISCOUNT).contains(&value) {
                *slot = Some(value);
            }
        }
    }

    /// Builds the payload. `has_file` tells whether a banner file was picked.
    pub fn to_dto(&self, has_file: bool) -> Result<OfferDto, String> {
        let names = self.names();
        if names.is_empty() {
            return Err("Debes agregar al menos un producto".to_string());
        }

        let (Some(start), Some(end)) = (start_of_day(&self.start_date), end_of_day(&self.end_date))
        else {
            return Err("Las fechas de inicio y fin son obligatorias".to_string());
        };
        // compared by calendar day: a one-day offer is not allowed
        if start.date() >= end.date() {
            return Err("La fecha de fin debe ser posterior a la fecha de inicio".to_string());
        }

        let mut discounts = Vec::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            match self.discount(idx) {
                Some(p) => discounts.push(ProductDiscount {
                    product_name: name.clone(),
                    discount_percentage: p,
                }),
                None => {
                    return Err(format!(
                        "Debes asignar un descuento válido para el producto {}",
                        name
                    ))
                }
            }
        }

        let image_url = self.image_url.trim();
        if self.use_image && !has_file && image_url.is_empty() {
            return Err("Debes seleccionar una imagen para banner o ingresar una URL".to_string());
        }
        if !self.use_image && self.title.trim().is_empty() && self.description.trim().is_empty() {
            return Err("Debes agregar título o descripción para esta opción".to_string());
        }

        let mut dto = OfferDto {
            title: None,
            description: String::new(),
            image_url: None,
            start_date: start,
            end_date: end,
            product_names: names,
            discounts,
            whatsapp_message: String::new(),
        };
        if self.use_image {
            dto.image_url = Some(image_url.to_string()).filter(|u| !u.is_empty());
        } else {
            dto.title = Some(self.title.trim().to_string()).filter(|t| !t.is_empty());
            dto.description = self.description.trim().to_string();
        }
        dto.whatsapp_message = dto.whatsapp_message();
        Ok(dto)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_draft() -> OfferDraft {
        let mut d = OfferDraft {
            title: "Verano".into(),
            start_date: "2025-01-01".into(),
            end_date: "2025-01-08".into(),
            ..Default::default()
        };
        d.set_names_text("Aspirina, Ibuprofeno".into());
        d.set_discount(0, "20");
        d.set_discount(1, "15");
        d
    }

    #[test]
    fn discount_slots_follow_names() {
        let mut d = OfferDraft::default();
        d.set_names_text("A, B,  , C".into());
        assert_eq!(d.names(), vec!["A", "B", "C"]);
        d.set_discount(2, "30");
        d.set_names_text("A, B".into());
        assert_eq!(d.discount(2), None);
        d.set_names_text("A, B, C".into());
        assert_eq!(d.discount(2), None);
    }

    #[test]
    fn discount_input_is_filtered() {
        let mut d = OfferDraft::default();
        d.set_names_text("A".into());
        d.set_discount(0, "2a5");
        assert_eq!(d.discount(0), Some(25));
        d.set_discount(0, "150");
        assert_eq!(d.discount(0), Some(25));
        d.set_discount(0, "0");
        assert_eq!(d.discount(0), Some(25));
        d.set_discount(0, "");
        assert_eq!(d.discount(0), None);
    }

    #[test]
    fn validation_runs_in_order() {
        let mut d = OfferDraft::default();
        assert_eq!(d.to_dto(false).unwrap_err(), "Debes agregar al menos un producto");

        d.set_names_text("Aspirina".into());
        assert_eq!(
            d.to_dto(false).unwrap_err(),
            "Las fechas de inicio y fin son obligatorias"
        );

        d.start_date = "2025-01-05".into();
        d.end_date = "2025-01-05".into();
        assert_eq!(
            d.to_dto(false).unwrap_err(),
            "La fecha de fin debe ser posterior a la fecha de inicio"
        );

        d.end_date = "2025-01-06".into();
        assert_eq!(
            d.to_dto(false).unwrap_err(),
            "Debes asignar un descuento válido para el producto Aspirina"
        );

        d.set_discount(0, "10");
        d.use_image = true;
        assert_eq!(
            d.to_dto(false).unwrap_err(),
            "Debes seleccionar una imagen para banner o ingresar una URL"
        );
        assert!(d.to_dto(true).is_ok());

        d.use_image = false;
        assert_eq!(
            d.to_dto(false).unwrap_err(),
            "Debes agregar título o descripción para esta opción"
        );
    }

    #[test]
    fn text_offer_payload() {
        let dto = text_draft().to_dto(false).unwrap();
        assert_eq!(dto.title.as_deref(), Some("Verano"));
        assert_eq!(dto.image_url, None);
        assert_eq!(
            dto.start_date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "2025-01-01T00:00:00"
        );
        assert_eq!(
            dto.end_date.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "2025-01-08T23:59:59"
        );
        assert_eq!(dto.discounts[1].product_name, "Ibuprofeno");
        assert!(dto.whatsapp_message.contains("Aspirina: 20%"));
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn banner_mode_drops_text_fields() {
        let mut d = text_draft();
        d.use_image = true;
        d.image_url = " https://cdn/banner.jpg ".into();
        let dto = d.to_dto(false).unwrap();
        assert_eq!(dto.title, None);
        assert_eq!(dto.description, "");
        assert_eq!(dto.image_url.as_deref(), Some("https://cdn/banner.jpg"));
        assert!(dto.is_image_offer());
    }

    #[test]
    fn editing_prefills_from_offer() {
        let dto = text_draft().to_dto(false).unwrap();
        let offer = Offer {
            id: contracts::domain::a002_offer::aggregate::OfferId(9),
            data: dto,
        };
        let d = OfferDraft::from(&offer);
        assert_eq!(d.start_date, "2025-01-01");
        assert_eq!(d.end_date, "2025-01-08");
        assert_eq!(d.names_text(), "Aspirina, Ibuprofeno");
        assert_eq!(d.discount(1), Some(15));
        assert!(!d.use_image);
    }
}
