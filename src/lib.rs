//! swapdesk Library
//!
//! Currency swap quoting over a spot price feed

pub mod config;
pub mod error;
pub mod feed;
pub mod history;
pub mod rates;
pub mod service;
pub mod swap;
pub mod types;
pub mod wallet;
