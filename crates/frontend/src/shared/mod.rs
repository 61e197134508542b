pub mod api_utils;
pub mod components;
pub mod config;
pub mod date_utils;
pub mod error;
pub mod http;
pub mod icons;
pub mod modal_frame;
pub mod scheduler;
pub mod scroll_restore;
pub mod storage;
pub mod whatsapp;
