pub mod balance_calculator;
pub mod rounding;
pub mod settlement_calculator;
pub mod spending_summary;
pub mod split_set_resolver;

pub use balance_calculator::{BalanceCalculator, BalanceReport};
pub use rounding::{CENT_SCALE, max_rounding_drift, round_balances, round_half_away_from_zero};
pub use settlement_calculator::SettlementCalculator;
pub use spending_summary::{CategoryTotal, SpendingSummary};
pub use split_set_resolver::SplitSetResolver;
