pub mod pagination;

pub use pagination::{PageResponse, PageResult};
