#![warn(clippy::uninlined_format_args)]

pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod ports;

pub use config::{CURRENCY_SYMBOL_VAR, DEFAULT_CURRENCY_SYMBOL, EngineConfig, SPLIT_DEFAULT_VAR};
pub use engine::{SettlementEngine, compute_balances, compute_settlements};
pub use error::ConfigError;
pub use model::{GroupOverview, GroupSettlement};
pub use ports::{LedgerSource, LedgerView};
