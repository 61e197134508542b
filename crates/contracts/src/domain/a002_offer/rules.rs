//! Derived properties of offers: activity window, banner kind, shareable text.

use chrono::NaiveDateTime;

use super::aggregate::{Offer, OfferDto};

pub const MIN_DISCOUNT: u8 = 1;
pub const MAX_DISCOUNT: u8 = 99;

impl OfferDto {
    /// Active iff `now` lies in `[start_date, end_date]`, both ends inclusive.
    pub fn is_active_at(&self, now: NaiveDateTime) -> bool {
        now >= self.start_date && now <= self.end_date
    }

    /// Banner offers carry a non-blank image URL, the rest render as text.
    pub fn is_image_offer(&self) -> bool {
        self.image_url
            .as_deref()
            .map(|url| !url.trim().is_empty())
            .unwrap_or(false)
    }

    /// Trimmed, non-empty product names
    pub fn valid_product_names(&self) -> Vec<String> {
        valid_product_names(&self.product_names)
    }

    pub fn max_discount(&self) -> u8 {
        self.discounts
            .iter()
            .map(|d| d.discount_percentage)
            .max()
            .unwrap_or(0)
    }

    /// Text stored with the offer and used when sharing it.
    pub fn whatsapp_message(&self) -> String {
        let mut msg = String::from("¡Nueva oferta en Astrafarma!");
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            msg.push('\n');
            msg.push_str(title);
        }
        if !self.description.is_empty() {
            msg.push('\n');
            msg.push_str(&self.description);
        }
        msg.push_str(&format!("\nVálida hasta: {}", format_day(self.end_date)));
        if !self.product_names.is_empty() {
            msg.push_str(&format!(
                "\nProductos relacionados: {}",
                self.product_names.join(", ")
            ));
        }
        if !self.discounts.is_empty() {
            msg.push_str("\nDescuentos:");
            for d in &self.discounts {
                msg.push_str(&format!("\n- {}: {}%", d.product_name, d.discount_percentage));
            }
        }
        msg.push_str("\nConsulta más detalles en astrafarma.com");
        msg
    }

    /// Text of the customer inquiry opened from the carousel.
    pub fn inquiry_message(&self) -> String {
        let mut msg =
            String::from("Hola, me gustaria consultar sobre esta oferta de Astrafarma:\n\n");
        if let Some(title) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            msg.push_str(&format!("OFERTA: {}\n", title));
        }
        msg.push_str(&format!("Valida hasta: {}\n", format_day(self.end_date)));
        let names = self.valid_product_names();
        if !names.is_empty() {
            msg.push_str(&format!("Productos relacionados: {}\n", names.join(", ")));
        }
        if !self.discounts.is_empty() {
            msg.push_str("Descuentos:\n");
            for d in &self.discounts {
                msg.push_str(&format!("- {}: {}%\n", d.product_name, d.discount_percentage));
            }
        }
        msg.push_str("\nPodrian darme mas informacion sobre esta oferta?");
        msg
    }

    /// Checks the invariants the backend relies on. Runs before any request.
    pub fn validate(&self) -> Result<(), String> {
        self.validate_with_upload(false)
    }

    /// Like [`validate`](Self::validate); an uploaded file counts as the banner image.
    pub fn validate_with_upload(&self, has_upload: bool) -> Result<(), String> {
        if self.start_date >= self.end_date {
            return Err("La fecha de fin debe ser posterior a la fecha de inicio".to_string());
        }
        let names = self.valid_product_names();
        if names.is_empty() {
            return Err("Debes agregar al menos un producto".to_string());
        }
        for name in &names {
            let discount = self
                .discounts
                .iter()
                .find(|d| d.product_name.trim() == name.as_str());
            match discount {
                Some(d) if (MIN_DISCOUNT..=MAX_DISCOUNT).contains(&d.discount_percentage) => {}
                _ => {
                    return Err(format!(
                        "Debes asignar un descuento válido para el producto {}",
                        name
                    ))
                }
            }
        }
        let has_text = self
            .title
            .as_deref()
            .map(|t| !t.trim().is_empty())
            .unwrap_or(false)
            || !self.description.trim().is_empty();
        if !has_text && !self.is_image_offer() && !has_upload {
            return Err("Debes agregar título o descripción para esta opción".to_string());
        }
        Ok(())
    }
}

/// Trimmed, non-empty names in input order
pub fn valid_product_names(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}

/// Offers active at `now`, newest start first.
pub fn active_offers(offers: &[Offer], now: NaiveDateTime) -> Vec<Offer> {
    let mut active: Vec<Offer> = offers
        .iter()
        .filter(|o| o.is_active_at(now))
        .cloned()
        .collect();
    active.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    active
}

fn format_day(dt: NaiveDateTime) -> String {
    dt.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_offer::aggregate::{OfferId, ProductDiscount};
    use chrono::{Duration, NaiveDate};

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn dto(start: NaiveDateTime, end: NaiveDateTime) -> OfferDto {
        OfferDto {
            title: Some("Verano".into()),
            description: "Descuentos".into(),
            image_url: None,
            start_date: start,
            end_date: end,
            product_names: vec!["Aspirina".into()],
            discounts: vec![ProductDiscount {
                product_name: "Aspirina".into(),
                discount_percentage: 20,
            }],
            whatsapp_message: String::new(),
        }
    }

    fn offer(id: i64, start: NaiveDateTime, end: NaiveDateTime) -> Offer {
        Offer {
            id: OfferId(id),
            data: dto(start, end),
        }
    }

    #[test]
    fn activity_window_is_inclusive() {
        let start = at(2025, 3, 1, 0);
        let end = at(2025, 3, 10, 0);
        let o = dto(start, end);
        assert!(o.is_active_at(start));
        assert!(o.is_active_at(end));
        assert!(o.is_active_at(at(2025, 3, 5, 12)));
        assert!(!o.is_active_at(start - Duration::seconds(1)));
        assert!(!o.is_active_at(end + Duration::seconds(1)));
    }

    #[test]
    fn active_offers_filters_and_sorts_by_start_desc() {
        let now = at(2025, 6, 15, 12);
        let offers = vec![
            offer(1, at(2025, 6, 1, 0), at(2025, 6, 30, 0)),
            offer(2, at(2025, 5, 1, 0), at(2025, 5, 31, 0)),
            offer(3, at(2025, 6, 10, 0), at(2025, 6, 20, 0)),
            offer(4, at(2025, 7, 1, 0), at(2025, 7, 31, 0)),
            offer(5, at(2025, 6, 15, 12), at(2025, 6, 16, 0)),
        ];
        let ids: Vec<i64> = active_offers(&offers, now)
            .iter()
            .map(|o| o.id.value())
            .collect();
        assert_eq!(ids, vec![5, 3, 1]);
    }

    #[test]
    fn start_not_before_end_is_rejected() {
        let start = at(2025, 1, 10, 0);
        assert!(dto(start, start).validate().is_err());
        assert!(dto(start, start - Duration::days(1)).validate().is_err());
        assert!(dto(start, start + Duration::days(1)).validate().is_ok());
    }

    #[test]
    fn discounts_must_cover_every_product_within_range() {
        let mut o = dto(at(2025, 1, 1, 0), at(2025, 1, 2, 0));
        o.product_names.push("Ibuprofeno".into());
        assert!(o.validate().unwrap_err().contains("Ibuprofeno"));

        o.discounts.push(ProductDiscount {
            product_name: "Ibuprofeno".into(),
            discount_percentage: 100,
        });
        assert!(o.validate().is_err());

        o.discounts[1].discount_percentage = 0;
        assert!(o.validate().is_err());

        o.discounts[1].discount_percentage = 99;
        assert!(o.validate().is_ok());
    }

    #[test]
    fn text_offer_needs_title_or_description() {
        let mut o = dto(at(2025, 1, 1, 0), at(2025, 1, 2, 0));
        o.title = None;
        o.description = "  ".into();
        assert!(o.validate().is_err());
        o.image_url = Some("https://cdn/banner.png".into());
        assert!(o.validate().is_ok());
    }

    #[test]
    fn uploaded_banner_replaces_text() {
        let mut o = dto(at(2025, 1, 1, 0), at(2025, 1, 2, 0));
        o.title = None;
        o.description = String::new();
        assert!(o.validate().is_err());
        assert!(o.validate_with_upload(true).is_ok());
    }

    #[test]
    fn image_offer_requires_non_blank_url() {
        let mut o = dto(at(2025, 1, 1, 0), at(2025, 1, 2, 0));
        assert!(!o.is_image_offer());
        o.image_url = Some("   ".into());
        assert!(!o.is_image_offer());
        o.image_url = Some("https://cdn/x.jpg".into());
        assert!(o.is_image_offer());
    }

    #[test]
    fn whatsapp_message_lists_title_and_discounts() {
        let o = dto(at(2025, 1, 1, 0), at(2025, 1, 8, 23));
        let msg = o.whatsapp_message();
        assert!(msg.starts_with("¡Nueva oferta en Astrafarma!"));
        assert!(msg.contains("Verano"));
        assert!(msg.contains("Aspirina: 20%"));
        assert!(msg.contains("Válida hasta: 08/01/2025"));
    }

    #[test]
    fn inquiry_message_skips_blank_names() {
        let mut o = dto(at(2025, 1, 1, 0), at(2025, 1, 8, 0));
        o.product_names = vec!["  ".into(), "Aspirina".into()];
        let msg = o.inquiry_message();
        assert!(msg.contains("OFERTA: Verano"));
        assert!(msg.contains("Productos relacionados: Aspirina\n"));
        assert!(msg.ends_with("Podrian darme mas informacion sobre esta oferta?"));
    }

    #[test]
    fn max_discount_defaults_to_zero() {
        let mut o = dto(at(2025, 1, 1, 0), at(2025, 1, 2, 0));
        assert_eq!(o.max_discount(), 20);
        o.discounts.clear();
        assert_eq!(o.max_discount(), 0);
    }
}
