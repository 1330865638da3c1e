use crate::{
    model::{GroupOverview, GroupSettlement},
    ports::LedgerSource,
};
use splitter_domain::{
    BalanceCalculator, BalanceMap, Expense, Group, Settlement, SettlementCalculator,
    SpendingSummary,
};

/// Entry point for balance and settlement queries.
///
/// Holds no state: every call reads only its arguments, so an engine can be
/// shared freely and repeated calls with the same input agree.
#[derive(Clone, Copy, Debug, Default)]
pub struct SettlementEngine {
    balances: BalanceCalculator,
    settlements: SettlementCalculator,
}

impl SettlementEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Net balance per member of `group_id`; empty when the group is unknown.
    pub fn compute_balances<'a>(
        &self,
        group_id: &str,
        groups: &'a [Group],
        expenses: &'a [Expense],
    ) -> BalanceMap<'a> {
        self.balances.calculate(group_id, groups, expenses)
    }

    /// Payments that settle `group_id`, computed from fresh balances.
    pub fn compute_settlements<'a>(
        &self,
        group_id: &str,
        groups: &'a [Group],
        expenses: &'a [Expense],
    ) -> Vec<Settlement<'a>> {
        let balances = self.compute_balances(group_id, groups, expenses);
        self.settlements.calculate(&balances)
    }

    pub fn settle_group<'a>(
        &self,
        group_id: &str,
        groups: &'a [Group],
        expenses: &'a [Expense],
    ) -> GroupSettlement<'a> {
        let report = self
            .balances
            .calculate_with_report(group_id, groups, expenses);
        let settlements = self.settlements.calculate(&report.balances);

        for anomaly in &report.anomalies {
            tracing::debug!(group_id, %anomaly, "Absorbed ledger anomaly");
        }
        tracing::debug!(
            group_id,
            member_count = report.balances.len(),
            settlement_count = settlements.len(),
            anomaly_count = report.anomalies.len(),
            "Settled group"
        );

        GroupSettlement {
            balances: report.balances,
            settlements,
            anomalies: report.anomalies,
        }
    }

    pub fn compute_balances_from<'a, S>(&self, source: &'a S, group_id: &str) -> BalanceMap<'a>
    where
        S: LedgerSource + ?Sized,
    {
        self.compute_balances(group_id, source.groups(), source.expenses())
    }

    pub fn compute_settlements_from<'a, S>(
        &self,
        source: &'a S,
        group_id: &str,
    ) -> Vec<Settlement<'a>>
    where
        S: LedgerSource + ?Sized,
    {
        self.compute_settlements(group_id, source.groups(), source.expenses())
    }

    /// Settlement plus spending totals for a known group.
    pub fn overview<'a, S>(&self, source: &'a S, group_id: &str) -> Option<GroupOverview<'a>>
    where
        S: LedgerSource + ?Sized,
    {
        let group = source.group(group_id)?;
        let expenses = source.expenses();

        Some(GroupOverview {
            group,
            settlement: self.settle_group(group_id, source.groups(), expenses),
            total_spend: SpendingSummary::group_total(group_id, expenses),
            categories: SpendingSummary::by_category(Some(group_id), expenses),
        })
    }
}

/// [`SettlementEngine::compute_balances`] on a default engine.
pub fn compute_balances<'a>(
    group_id: &str,
    groups: &'a [Group],
    expenses: &'a [Expense],
) -> BalanceMap<'a> {
    SettlementEngine::new().compute_balances(group_id, groups, expenses)
}

/// [`SettlementEngine::compute_settlements`] on a default engine.
pub fn compute_settlements<'a>(
    group_id: &str,
    groups: &'a [Group],
    expenses: &'a [Expense],
) -> Vec<Settlement<'a>> {
    SettlementEngine::new().compute_settlements(group_id, groups, expenses)
}
