//! Wire types and pure domain rules shared by the Astrafarma frontend.

pub mod domain;
pub mod enums;
pub mod shared;
pub mod system;
