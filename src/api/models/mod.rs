pub mod common;
pub mod services;

pub use common::*;
pub use services::*;
