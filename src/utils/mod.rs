pub mod format;
pub mod logger;
pub mod spinner;

// Re-export commonly used items
pub use format::{display_address, format_eth, parse_eth_amount, shorten_address};
pub use logger::Logger;
pub use spinner::Spinner;
