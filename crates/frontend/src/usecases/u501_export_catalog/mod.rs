pub mod api;
pub mod state;
pub mod view;

pub use state::{use_edit_state, ProductEditState};
pub use view::ExportCatalogButton;
