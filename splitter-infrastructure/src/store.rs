use chrono::{DateTime, Utc};
use fxhash::FxHashSet;
use splitter_application::LedgerSource;
use splitter_domain::{Expense, ExpenseCategory, Group, GroupKind, Money, SplitDefault};
use uuid::Uuid;

const DEFAULT_GROUP_NAME: &str = "Group";
const DEFAULT_EXPENSE_DESCRIPTION: &str = "Expense";

/// Input for [`InMemoryLedgerStore::add_expense`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    pub group_id: String,
    pub description: String,
    pub amount: Money,
    pub payer: String,
    pub category: ExpenseCategory,
    /// Empty means "split between the group", see [`SplitDefault`].
    pub split_by: Vec<String>,
    /// Defaults to now.
    pub date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupUpdate {
    pub name: Option<String>,
    pub members: Option<Vec<String>>,
    pub kind: Option<GroupKind>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount: Option<Money>,
    pub payer: Option<String>,
    pub category: Option<ExpenseCategory>,
    pub split_by: Option<Vec<String>>,
    pub date: Option<DateTime<Utc>>,
}

/// Owns groups and expenses, newest first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLedgerStore {
    groups: Vec<Group>,
    expenses: Vec<Expense>,
    split_default: SplitDefault,
}

impl InMemoryLedgerStore {
    pub fn new(split_default: SplitDefault) -> Self {
        Self {
            groups: Vec::new(),
            expenses: Vec::new(),
            split_default,
        }
    }

    /// Takes records as they are; no normalisation is applied.
    pub fn from_parts(
        groups: Vec<Group>,
        expenses: Vec<Expense>,
        split_default: SplitDefault,
    ) -> Self {
        Self {
            groups,
            expenses,
            split_default,
        }
    }

    /// Creates a group and returns its id.
    ///
    /// Member names are trimmed, blanks dropped and duplicates removed keeping
    /// the first occurrence.
    pub fn add_group<I, S>(&mut self, name: &str, members: I, kind: GroupKind) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let group = Group {
            id: Uuid::new_v4().to_string(),
            name: non_blank_or(name, DEFAULT_GROUP_NAME),
            members: normalize_members(members),
            kind,
            created_at: Utc::now(),
        };
        let id = group.id.clone();

        tracing::debug!(
            group_id = %id,
            member_count = group.members.len(),
            kind = group.kind.as_tag(),
            "Added group"
        );
        self.groups.insert(0, group);
        id
    }

    pub fn update_group(&mut self, group_id: &str, update: GroupUpdate) -> bool {
        let Some(group) = self.group_mut(group_id) else {
            return false;
        };
        if let Some(name) = update.name {
            group.name = non_blank_or(&name, DEFAULT_GROUP_NAME);
        }
        if let Some(members) = update.members {
            group.members = normalize_members(members);
        }
        if let Some(kind) = update.kind {
            group.kind = kind;
        }
        true
    }

    /// Removes the group together with its expenses.
    pub fn remove_group(&mut self, group_id: &str) -> bool {
        let before = self.groups.len();
        self.groups.retain(|group| group.id != group_id);
        if self.groups.len() == before {
            return false;
        }

        let expense_count = self.expenses.len();
        self.expenses.retain(|expense| expense.group_id != group_id);
        tracing::debug!(
            group_id,
            removed_expenses = expense_count - self.expenses.len(),
            "Removed group"
        );
        true
    }

    /// Returns false when the group is unknown, the name blank or already a member.
    pub fn add_member(&mut self, group_id: &str, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let Some(group) = self.group_mut(group_id) else {
            return false;
        };
        if group.has_member(name) {
            return false;
        }
        group.members.push(name.to_string());
        true
    }

    /// Only membership changes; the member's expenses stay, and splits that
    /// default to the group no longer include them.
    pub fn remove_member(&mut self, group_id: &str, name: &str) -> bool {
        let Some(group) = self.group_mut(group_id) else {
            return false;
        };
        let before = group.members.len();
        group.members.retain(|member| member != name);
        group.members.len() != before
    }

    /// Records an expense and returns its id, or `None` when the group id or
    /// payer is blank or the amount is zero. Negative amounts are stored as zero.
    pub fn add_expense(&mut self, new_expense: NewExpense) -> Option<String> {
        let group_id = new_expense.group_id.trim();
        let payer = new_expense.payer.trim();
        if group_id.is_empty() || payer.is_empty() || new_expense.amount.is_zero() {
            tracing::debug!(
                group_id,
                payer,
                amount = %new_expense.amount,
                "Rejected incomplete expense"
            );
            return None;
        }

        let split_by = match (self.split_default, new_expense.split_by.is_empty()) {
            (SplitDefault::FreezeAtCreation, true) => self
                .group(group_id)
                .map(|group| group.members.clone())
                .unwrap_or_default(),
            _ => new_expense.split_by,
        };

        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            description: non_blank_or(&new_expense.description, DEFAULT_EXPENSE_DESCRIPTION),
            amount: new_expense.amount.max(Money::ZERO),
            payer: payer.to_string(),
            split_by,
            category: new_expense.category,
            date: new_expense.date.unwrap_or(now),
            created_at: now,
        };
        let id = expense.id.clone();

        tracing::debug!(
            expense_id = %id,
            group_id = %expense.group_id,
            amount = %expense.amount,
            split_count = expense.split_by.len(),
            "Added expense"
        );
        self.expenses.insert(0, expense);
        Some(id)
    }

    pub fn update_expense(&mut self, expense_id: &str, update: ExpenseUpdate) -> bool {
        let Some(expense) = self
            .expenses
            .iter_mut()
            .find(|expense| expense.id == expense_id)
        else {
            return false;
        };
        if let Some(description) = update.description {
            expense.description = non_blank_or(&description, DEFAULT_EXPENSE_DESCRIPTION);
        }
        if let Some(amount) = update.amount {
            expense.amount = amount.max(Money::ZERO);
        }
        if let Some(payer) = update.payer {
            expense.payer = payer;
        }
        if let Some(category) = update.category {
            expense.category = category;
        }
        if let Some(split_by) = update.split_by {
            expense.split_by = split_by;
        }
        if let Some(date) = update.date {
            expense.date = date;
        }
        true
    }

    pub fn delete_expense(&mut self, expense_id: &str) -> bool {
        let before = self.expenses.len();
        self.expenses.retain(|expense| expense.id != expense_id);
        self.expenses.len() != before
    }

    pub fn reset(&mut self) {
        tracing::debug!(
            group_count = self.groups.len(),
            expense_count = self.expenses.len(),
            "Reset ledger"
        );
        self.groups.clear();
        self.expenses.clear();
    }

    pub fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups.iter().find(|group| group.id == group_id)
    }

    /// The group's expenses, latest date first. Equal dates keep store order.
    pub fn expenses_by_group(&self, group_id: &str) -> Vec<&Expense> {
        let mut expenses: Vec<&Expense> = self
            .expenses
            .iter()
            .filter(|expense| expense.group_id == group_id)
            .collect();
        expenses.sort_by(|a, b| b.date.cmp(&a.date));
        expenses
    }

    fn group_mut(&mut self, group_id: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|group| group.id == group_id)
    }
}

impl LedgerSource for InMemoryLedgerStore {
    fn groups(&self) -> &[Group] {
        &self.groups
    }

    fn expenses(&self) -> &[Expense] {
        &self.expenses
    }
}

fn non_blank_or(value: &str, fallback: &str) -> String {
    match value.trim() {
        "" => fallback.to_string(),
        trimmed => trimmed.to_string(),
    }
}

fn normalize_members<I, S>(members: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = FxHashSet::default();
    members
        .into_iter()
        .filter_map(|member| {
            let member = member.as_ref().trim();
            (!member.is_empty() && seen.insert(member.to_string())).then(|| member.to_string())
        })
        .collect()
}
