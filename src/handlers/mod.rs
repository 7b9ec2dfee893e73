pub mod health;
pub mod metrics;
pub mod middleware;
pub mod parse;
pub mod shop;

pub use health::*;
pub use metrics::*;
pub use middleware::*;
pub use parse::*;
pub use shop::*;
