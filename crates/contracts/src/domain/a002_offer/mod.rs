pub mod aggregate;
pub mod rules;
