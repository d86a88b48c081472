// HTTP routes
pub mod ai;
pub mod health;

pub use health::*;
