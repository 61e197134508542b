pub mod product_category;
pub mod role;

pub use product_category::ProductCategory;
pub use role::{Gender, Role};
