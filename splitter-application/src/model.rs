use splitter_domain::{Anomaly, BalanceMap, CategoryTotal, Group, Money, Settlement};

/// Balances of one group and the payments that settle them.
#[derive(Debug, Default, PartialEq)]
pub struct GroupSettlement<'a> {
    pub balances: BalanceMap<'a>,
    pub settlements: Vec<Settlement<'a>>,
    pub anomalies: Vec<Anomaly<'a>>,
}

impl GroupSettlement<'_> {
    pub fn is_settled(&self) -> bool {
        self.settlements.is_empty()
    }
}

/// Everything shown for a group: settlement plus what was spent.
#[derive(Debug, PartialEq)]
pub struct GroupOverview<'a> {
    pub group: &'a Group,
    pub settlement: GroupSettlement<'a>,
    pub total_spend: Money,
    pub categories: Vec<CategoryTotal>,
}
