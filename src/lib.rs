//! Client for a deployed Fund Me contract: connect a wallet, read the
//! contract balance, fund it, withdraw from it, and wait for each transaction
//! to be mined.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod services;
pub mod utils;

pub use errors::{FundMeError, Result};
