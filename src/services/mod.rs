// Services module - business logic layer

pub mod extractor;
pub mod price_table;
pub mod shop_service;

pub use extractor::{DocumentTextExtractor, ExtractorError, TextExtractor};
pub use price_table::PriceTable;
pub use shop_service::ShopService;
