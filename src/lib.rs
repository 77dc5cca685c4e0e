pub mod bulletin;
pub mod bulletin_extractor;
pub mod bulletin_link_scraper;
pub mod category;
pub mod config;
pub mod history;
pub mod local_store;
pub mod output_writer;
pub mod period;
mod ratelimit;
pub mod requests;
pub mod scraping_context;
mod text_manipulators;

mod extraction_error;

pub use bulletin::Bulletin;
pub use bulletin_link_scraper::BulletinLinkScraper;
pub use extraction_error::ExtractionError;
pub use history::{CategoryHistory, DocumentOutcome, PriceHistories, RunReport};
pub use local_store::LocalStore;
pub use period::{Period, PeriodResolver};
pub use scraping_context::ScrapingContext;
