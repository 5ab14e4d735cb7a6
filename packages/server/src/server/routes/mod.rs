// HTTP routes
pub mod drinks;
pub mod health;

pub use drinks::*;
pub use health::*;
