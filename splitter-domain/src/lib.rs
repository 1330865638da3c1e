#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Anomaly, BalanceAccumulator, BalanceMap, Expense, ExpenseCategory, Group, GroupKind,
    MemberPosition, MemberSet, Money, Settlement, SplitDefault,
};
pub use services::{
    BalanceCalculator, BalanceReport, CategoryTotal, SettlementCalculator, SpendingSummary,
    SplitSetResolver, max_rounding_drift,
};
