use std::fmt::Display;

pub const MEMBER: &str = "Member";
pub const BALANCE: &str = "Balance";
pub const STATUS: &str = "Status";
pub const FROM: &str = "From";
pub const TO: &str = "To";
pub const AMOUNT: &str = "Amount";
pub const CATEGORY: &str = "Category";
pub const EXPENSES: &str = "Expenses";
pub const TOTAL: &str = "Total";
pub const SETTLED: &str = "Settled";
pub const ALL_SETTLED_UP: &str = "All settled up!";
pub const NOBODY_OWES: &str = "No one owes anything in this group.";
pub const YOU_ARE_SETTLED_UP: &str = "You are settled up";
pub const NO_EXPENSES: &str = "No expenses yet.";

pub fn gets(amount: impl Display) -> String {
    format!("gets {amount}")
}

pub fn owes(amount: impl Display) -> String {
    format!("owes {amount}")
}

pub fn you_are_owed(amount: impl Display) -> String {
    format!("You are owed {amount}")
}

pub fn you_owe(amount: impl Display) -> String {
    format!("You owe {amount}")
}

pub fn total_group_spend(amount: impl Display) -> String {
    format!("Total group spend: {amount}")
}

pub fn total_expenses(amount: impl Display) -> String {
    format!("Total Expenses: {amount}")
}

pub fn group_heading(name: impl Display, kind: impl Display, member_count: usize) -> String {
    let noun = if member_count == 1 { "member" } else { "members" };
    format!("{name} ({kind}, {member_count} {noun})")
}

pub fn group_not_found(group_id: impl Display) -> String {
    format!("Group '{group_id}' not found")
}
