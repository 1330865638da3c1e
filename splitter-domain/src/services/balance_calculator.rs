use crate::{
    model::{Anomaly, BalanceAccumulator, BalanceMap, Expense, Group},
    services::{SplitSetResolver, round_balances},
};

/// Reduces a group's expenses to a net balance per member.
#[derive(Clone, Copy, Debug, Default)]
pub struct BalanceCalculator;

/// Balances together with the malformed input the calculation absorbed.
#[derive(Debug, Default, PartialEq)]
pub struct BalanceReport<'a> {
    pub balances: BalanceMap<'a>,
    pub anomalies: Vec<Anomaly<'a>>,
}

impl BalanceCalculator {
    /// Balance map for `group_id`, or an empty map when the group is unknown.
    pub fn calculate<'a>(
        &self,
        group_id: &str,
        groups: &'a [Group],
        expenses: &'a [Expense],
    ) -> BalanceMap<'a> {
        self.calculate_with_report(group_id, groups, expenses)
            .balances
    }

    pub fn calculate_with_report<'a>(
        &self,
        group_id: &str,
        groups: &'a [Group],
        expenses: &'a [Expense],
    ) -> BalanceReport<'a> {
        let Some(group) = groups.iter().find(|group| group.id == group_id) else {
            tracing::debug!(group_id, "Balances requested for unknown group");
            return BalanceReport {
                balances: BalanceMap::new(),
                anomalies: vec![Anomaly::GroupNotFound {
                    group_id: group_id.to_string(),
                }],
            };
        };
        self.calculate_for_group(group, expenses)
    }

    /// Members are seeded in group order; payers and participants outside the
    /// group are appended as they are first seen. Balances are rounded to cents
    /// once, after every expense has been applied.
    pub fn calculate_for_group<'a>(
        &self,
        group: &'a Group,
        expenses: &'a [Expense],
    ) -> BalanceReport<'a> {
        let resolver = SplitSetResolver::new(group);
        let mut accumulator = BalanceAccumulator::new(group.members.iter().map(String::as_str));
        let mut anomalies = Vec::new();
        let mut applied = 0usize;

        for expense in expenses.iter().filter(|expense| expense.group_id == group.id) {
            if expense.amount.is_negative() {
                tracing::warn!(
                    group_id = %group.id,
                    expense_id = %expense.id,
                    amount = %expense.amount,
                    "Negative expense amount counted as zero"
                );
                anomalies.push(Anomaly::InvalidAmount {
                    expense_id: &expense.id,
                    amount: expense.amount,
                });
            }

            let split = resolver.resolve(expense);
            if split.is_empty() {
                tracing::debug!(
                    group_id = %group.id,
                    expense_id = %expense.id,
                    "Skipping expense without participants"
                );
                anomalies.push(Anomaly::EmptySplitSet {
                    expense_id: &expense.id,
                });
                continue;
            }

            if accumulator
                .apply(&expense.payer, expense.effective_amount(), &split)
                .is_err()
            {
                tracing::warn!(
                    group_id = %group.id,
                    expense_id = %expense.id,
                    amount = %expense.amount,
                    "Expense amount overflows balances, counted as zero"
                );
                anomalies.push(Anomaly::InvalidAmount {
                    expense_id: &expense.id,
                    amount: expense.amount,
                });
                continue;
            }
            applied += 1;
        }

        let balances = round_balances(accumulator.balances());

        tracing::debug!(
            group_id = %group.id,
            member_count = balances.len(),
            applied,
            anomaly_count = anomalies.len(),
            "Calculated group balances"
        );

        BalanceReport {
            balances,
            anomalies,
        }
    }
}
