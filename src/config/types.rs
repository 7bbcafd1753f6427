//! Configuration types and re-exports

pub use super::{AppConfig, FeedConfig};
