use splitter_domain::{Expense, Group};

/// Read access to the groups and expenses the engine works on.
pub trait LedgerSource {
    fn groups(&self) -> &[Group];

    fn expenses(&self) -> &[Expense];

    fn group(&self, group_id: &str) -> Option<&Group> {
        self.groups().iter().find(|group| group.id == group_id)
    }
}

impl<S: LedgerSource + ?Sized> LedgerSource for &S {
    fn groups(&self) -> &[Group] {
        (**self).groups()
    }

    fn expenses(&self) -> &[Expense] {
        (**self).expenses()
    }
}

/// Borrowed collections, for callers that keep groups and expenses apart.
#[derive(Clone, Copy, Debug)]
pub struct LedgerView<'a> {
    pub groups: &'a [Group],
    pub expenses: &'a [Expense],
}

impl<'a> LedgerView<'a> {
    pub fn new(groups: &'a [Group], expenses: &'a [Expense]) -> Self {
        Self { groups, expenses }
    }
}

impl LedgerSource for LedgerView<'_> {
    fn groups(&self) -> &[Group] {
        self.groups
    }

    fn expenses(&self) -> &[Expense] {
        self.expenses
    }
}
