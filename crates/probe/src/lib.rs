//! HTTP probing of mirror candidates.

pub mod fetcher;
pub mod prober;
pub mod runner;

pub use self::fetcher::HttpFetcher;
pub use self::prober::HttpProber;
pub use self::runner::validate_all;
