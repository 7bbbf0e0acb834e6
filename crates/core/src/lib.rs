//! FundCtl Core - Domain types
//!
//! This crate contains the fundamental types used across FundCtl:
//! - `Amount`: Non-negative decimal wrapper for appropriated dollar amounts
//! - `FundLevel`: Legal fund-control echelons (Apportionment ... Suballocation)
//! - `FundCode`: Unique, validated fund identifier
//! - `Clock`: Injected "now" source for timestamps and currency checks

pub mod amount;
pub mod clock;
pub mod fund_code;
pub mod level;

pub use amount::Amount;
pub use clock::{Clock, FixedClock, SystemClock};
pub use fund_code::FundCode;
pub use level::FundLevel;
