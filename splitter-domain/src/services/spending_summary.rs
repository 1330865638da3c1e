use crate::model::{BalanceMap, Expense, ExpenseCategory, MemberPosition, Money};

/// Spend of one category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: ExpenseCategory,
    pub total: Money,
    pub expense_count: usize,
}

/// Totals shown next to balances: what a group spent and on what.
pub struct SpendingSummary;

impl SpendingSummary {
    pub fn group_total(group_id: &str, expenses: &[Expense]) -> Money {
        expenses
            .iter()
            .filter(|expense| expense.group_id == group_id)
            .fold(Money::ZERO, add_spend)
    }

    pub fn total(expenses: &[Expense]) -> Money {
        expenses.iter().fold(Money::ZERO, add_spend)
    }

    /// Per-category spend in [`ExpenseCategory::ALL`] order, limited to one group
    /// when `group_id` is given. Categories without expenses are left out.
    pub fn by_category(group_id: Option<&str>, expenses: &[Expense]) -> Vec<CategoryTotal> {
        let mut totals = ExpenseCategory::ALL.map(|category| CategoryTotal {
            category,
            total: Money::ZERO,
            expense_count: 0,
        });

        for expense in expenses
            .iter()
            .filter(|expense| group_id.is_none_or(|id| expense.group_id == id))
        {
            let Some(slot) = totals
                .iter_mut()
                .find(|slot| slot.category == expense.category)
            else {
                continue;
            };
            slot.total = add_spend(slot.total, expense);
            slot.expense_count += 1;
        }

        totals
            .into_iter()
            .filter(|slot| slot.expense_count > 0)
            .collect()
    }

    /// A member missing from the map has nothing outstanding.
    pub fn member_position(balances: &BalanceMap<'_>, member: &str) -> MemberPosition {
        match balances.get(member) {
            Some(balance) if balance.is_positive() => MemberPosition::Owed(balance),
            Some(balance) if balance.is_negative() => MemberPosition::Owes(balance.abs()),
            _ => MemberPosition::Settled,
        }
    }
}

/// An amount that would overflow the running total counts as zero.
fn add_spend(total: Money, expense: &Expense) -> Money {
    total
        .checked_add(expense.effective_amount())
        .unwrap_or_else(|| {
            tracing::warn!(
                expense_id = %expense.id,
                amount = %expense.amount,
                "Expense amount overflows spend total, counted as zero"
            );
            total
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use rstest::{fixture, rstest};

    fn expense(group_id: &str, amount: i64, category: ExpenseCategory) -> Expense {
        Expense {
            id: format!("{group_id}-{amount}"),
            group_id: group_id.to_string(),
            description: "Expense".to_string(),
            amount: Money::from_i64(amount),
            payer: "A".to_string(),
            split_by: Vec::new(),
            category,
            date: DateTime::<Utc>::default(),
            created_at: DateTime::<Utc>::default(),
        }
    }

    #[fixture]
    fn expenses() -> Vec<Expense> {
        vec![
            expense("g1", 120, ExpenseCategory::Travel),
            expense("g1", 30, ExpenseCategory::Food),
            expense("g1", 20, ExpenseCategory::Food),
            expense("g1", -10, ExpenseCategory::Bills),
            expense("g2", 50, ExpenseCategory::Food),
        ]
    }

    #[rstest]
    fn totals_ignore_negative_amounts(expenses: Vec<Expense>) {
        assert_eq!(SpendingSummary::group_total("g1", &expenses), Money::from_i64(170));
        assert_eq!(SpendingSummary::group_total("none", &expenses), Money::ZERO);
        assert_eq!(SpendingSummary::total(&expenses), Money::from_i64(220));
    }

    #[test]
    fn overflowing_amount_is_left_out_of_totals() {
        let huge = Money::from_decimal(rust_decimal::Decimal::MAX);
        let mut expenses = vec![
            expense("g1", 0, ExpenseCategory::Food),
            expense("g1", 0, ExpenseCategory::Food),
            expense("g1", 5, ExpenseCategory::Food),
        ];
        expenses[0].amount = huge;
        expenses[1].amount = huge;

        assert_eq!(SpendingSummary::total(&expenses), huge);
        assert_eq!(SpendingSummary::group_total("g1", &expenses), huge);
        assert_eq!(
            SpendingSummary::by_category(None, &expenses),
            vec![CategoryTotal {
                category: ExpenseCategory::Food,
                total: huge,
                expense_count: 3,
            }]
        );
    }

    #[rstest]
    #[case::one_group(
        Some("g1"),
        vec![
            (ExpenseCategory::Food, 50, 2),
            (ExpenseCategory::Travel, 120, 1),
            (ExpenseCategory::Bills, 0, 1),
        ]
    )]
    #[case::all_groups(
        None,
        vec![
            (ExpenseCategory::Food, 100, 3),
            (ExpenseCategory::Travel, 120, 1),
            (ExpenseCategory::Bills, 0, 1),
        ]
    )]
    #[case::unknown_group(Some("none"), vec![])]
    fn breaks_spend_down_by_category(
        expenses: Vec<Expense>,
        #[case] group_id: Option<&str>,
        #[case] expected: Vec<(ExpenseCategory, i64, usize)>,
    ) {
        let expected: Vec<CategoryTotal> = expected
            .into_iter()
            .map(|(category, total, expense_count)| CategoryTotal {
                category,
                total: Money::from_i64(total),
                expense_count,
            })
            .collect();

        assert_eq!(SpendingSummary::by_category(group_id, &expenses), expected);
    }

    #[rstest]
    #[case::owed("A", MemberPosition::Owed(Money::from_i64(200)))]
    #[case::owes("B", MemberPosition::Owes(Money::from_i64(100)))]
    #[case::settled("C", MemberPosition::Settled)]
    #[case::absent("Nobody", MemberPosition::Settled)]
    fn reports_member_position(#[case] member: &str, #[case] expected: MemberPosition) {
        let balances = BalanceMap::from_iter([
            ("A", Money::from_i64(200)),
            ("B", Money::from_i64(-100)),
            ("C", Money::ZERO),
        ]);

        assert_eq!(SpendingSummary::member_position(&balances, member), expected);
    }
}
