// Re-export all model types
pub use self::client::*;
pub use self::commands::*;
pub use self::product::*;

mod client;
mod commands;
mod product;
