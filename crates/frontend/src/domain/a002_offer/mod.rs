pub mod api;
pub mod carousel;
pub mod context;
pub mod form;
pub mod store;
pub mod ui;
