#![warn(clippy::uninlined_format_args)]

pub mod snapshot;
pub mod store;

pub use snapshot::{LedgerSnapshot, SnapshotError};
pub use store::{ExpenseUpdate, GroupUpdate, InMemoryLedgerStore, NewExpense};
