pub mod notification;
pub mod pagination_controls;
