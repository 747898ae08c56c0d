pub mod completion;
pub mod resolve;
pub mod scrape;
