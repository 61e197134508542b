pub mod catalog;
pub mod details;
pub mod stock;

pub use catalog::CatalogPage;
pub use details::ProductDetailsPage;
pub use stock::StockPage;
