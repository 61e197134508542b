//! wa.me deep links.

use super::config::config;

/// `https://wa.me/{phone}?text={message}`; without a phone the user picks the chat
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    let text = urlencoding::encode(message);
    if phone.is_empty() {
        format!("https://wa.me/?text={}", text)
    } else {
        format!("https://wa.me/{}?text={}", phone, text)
    }
}

/// Opens the store's WhatsApp chat in a new tab with `message` prefilled.
pub fn open_whatsapp(message: &str) {
    let url = whatsapp_link(&config().whatsapp_phone, message);
    if let Some(window) = web_sys::window() {
        if window.open_with_url_and_target(&url, "_blank").is_err() {
            log::error!("whatsapp: failed to open {}", url);
        }
    }
}

/// Inquiry text for a product detail page
pub fn product_inquiry(product_name: &str, quantity: u32) -> String {
    let units = if quantity > 1 {
        format!(" ({} unidades)", quantity)
    } else {
        String::new()
    };
    format!(
        "Hola, me interesa el producto: {}{}. ¿Podrías darme más información sobre disponibilidad y precio?",
        product_name, units
    )
}

/// Inquiry text for the chat button of a catalog card
pub fn product_card_inquiry(product_name: &str) -> String {
    format!(
        "Hola, me gustaría saber más sobre el producto: {}. ¿Podrías darme más información?",
        product_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_encodes_message() {
        assert_eq!(
            whatsapp_link("51999888777", "Hola, ¿precio?"),
            "https://wa.me/51999888777?text=Hola%2C%20%C2%BFprecio%3F"
        );
        assert_eq!(whatsapp_link("", "a b"), "https://wa.me/?text=a%20b");
    }

    #[test]
    fn inquiry_mentions_units_only_above_one() {
        assert_eq!(
            product_inquiry("Aspirina", 1),
            "Hola, me interesa el producto: Aspirina. ¿Podrías darme más información sobre disponibilidad y precio?"
        );
        assert!(product_inquiry("Aspirina", 3).contains("Aspirina (3 unidades)."));
    }
}
