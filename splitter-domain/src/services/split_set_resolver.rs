use crate::model::{Expense, Group, MemberSet};
use fxhash::FxHashSet;

/// Resolves who shares each expense of one group.
pub struct SplitSetResolver<'a> {
    group: &'a Group,
}

impl<'a> SplitSetResolver<'a> {
    pub fn new(group: &'a Group) -> Self {
        Self { group }
    }

    /// The expense's participants, de-duplicated in first-seen order.
    ///
    /// A name listed twice still pays a single share: `["B", "A", "B"]` splits
    /// the amount in halves, not thirds. Ledgers written by the mobile app
    /// counted every occurrence, so a repeated name there paid one share per
    /// listing; such records settle differently here.
    ///
    /// An expense naming nobody is split between the group's members as they are
    /// *now*, not as they were when the expense was recorded.
    pub fn resolve(&self, expense: &'a Expense) -> MemberSet<'a> {
        let source: &'a [String] = if expense.split_by.is_empty() {
            &self.group.members
        } else {
            &expense.split_by
        };

        let mut seen: FxHashSet<&'a str> = FxHashSet::default();
        let members = source
            .iter()
            .map(String::as_str)
            .filter(|member| seen.insert(*member))
            .collect();
        MemberSet::new(members)
    }
}
