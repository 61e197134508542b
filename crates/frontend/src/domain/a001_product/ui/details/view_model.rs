use contracts::domain::a001_product::aggregate::{Product, ProductId};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_product::api;
use crate::shared::whatsapp::{open_whatsapp, product_inquiry};

/// Product id from the `/producto/{id}` segment
pub fn parse_product_id(raw: &str) -> Result<ProductId, &'static str> {
    if raw.trim().is_empty() {
        return Err("ID de producto no válido");
    }
    ProductId::from_string(raw).map_err(|_| "ID de producto inválido")
}

/// ViewModel for the product detail page
#[derive(Clone, Copy)]
pub struct ProductDetailsViewModel {
    pub product: RwSignal<Option<Product>>,
    pub error: RwSignal<Option<String>>,
    pub loading: RwSignal<bool>,
    pub quantity: RwSignal<u32>,
}

impl ProductDetailsViewModel {
    pub fn new() -> Self {
        Self {
            product: RwSignal::new(None),
            error: RwSignal::new(None),
            loading: RwSignal::new(true),
            quantity: RwSignal::new(1),
        }
    }

    pub fn load(&self, raw_id: &str) {
        let id = match parse_product_id(raw_id) {
            Ok(id) => id,
            Err(msg) => {
                self.error.set(Some(msg.to_string()));
                self.loading.set(false);
                return;
            }
        };
        let vm = *self;
        vm.loading.set(true);
        vm.error.set(None);
        spawn_local(async move {
            match api::get(id).await {
                Ok(product) => vm.product.set(Some(product)),
                Err(e) => {
                    log::error!("product {} load failed: {}", id, e);
                    vm.error.set(Some(e.user_message()));
                }
            }
            vm.loading.set(false);
        });
    }

    /// Quantities below one are ignored
    pub fn set_quantity(&self, quantity: i64) {
        if quantity >= 1 {
            self.quantity.set(quantity.min(u32::MAX as i64) as u32);
        }
    }

    pub fn total(&self) -> Option<String> {
        let qty = self.quantity.get();
        self.product
            .with(|p| p.as_ref().map(|p| format!("S/ {:.2}", p.price * qty as f64)))
    }

    pub fn ask_on_whatsapp(&self) {
        let qty = self.quantity.get_untracked();
        self.product.with_untracked(|p| {
            if let Some(p) = p {
                open_whatsapp(&product_inquiry(&p.name, qty));
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_must_be_positive_integer() {
        assert_eq!(parse_product_id("12"), Ok(ProductId(12)));
        assert_eq!(parse_product_id(""), Err("ID de producto no válido"));
        assert_eq!(parse_product_id("0"), Err("ID de producto inválido"));
        assert_eq!(parse_product_id("-4"), Err("ID de producto inválido"));
        assert_eq!(parse_product_id("abc"), Err("ID de producto inválido"));
    }
}
