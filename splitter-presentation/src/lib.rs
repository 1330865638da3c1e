#![warn(clippy::uninlined_format_args)]

pub mod balance_presenter;
pub mod group_presenter;
pub mod messages;
pub mod money_format;
pub mod settlement_presenter;
pub mod summary_presenter;
pub mod text_table;

pub use balance_presenter::BalancePresenter;
pub use group_presenter::{GroupPresenter, GroupView};
pub use money_format::MoneyFormatter;
pub use settlement_presenter::SettlementPresenter;
pub use summary_presenter::SummaryPresenter;
