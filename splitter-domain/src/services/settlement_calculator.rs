use crate::model::{BalanceMap, Money, Settlement};

/// Greedy min-cash-flow settlement.
///
/// The largest remaining debtor always pays the largest remaining creditor. This
/// yields at most `creditors + debtors - 1` payments and usually far fewer, but it
/// is not guaranteed to reach the minimum number of payments, which is NP-hard in
/// general.
#[derive(Clone, Copy, Debug, Default)]
pub struct SettlementCalculator;

struct Position<'a> {
    member: &'a str,
    remaining: Money,
}

impl SettlementCalculator {
    /// Payments that bring every balance to within one cent of zero.
    ///
    /// Balances within one cent of zero are already settled and never take part.
    /// Equal amounts keep their balance-map order, so the output is deterministic.
    pub fn calculate<'a>(&self, balances: &BalanceMap<'a>) -> Vec<Settlement<'a>> {
        let tolerance = Money::cent();
        let mut creditors: Vec<Position<'a>> = Vec::new();
        let mut debtors: Vec<Position<'a>> = Vec::new();

        for (member, balance) in balances.iter() {
            if balance > tolerance {
                creditors.push(Position {
                    member,
                    remaining: balance,
                });
            } else if balance < -tolerance {
                debtors.push(Position {
                    member,
                    remaining: balance.abs(),
                });
            }
        }

        // `sort_by` is stable: ties keep map order.
        creditors.sort_by(|a, b| b.remaining.cmp(&a.remaining));
        debtors.sort_by(|a, b| b.remaining.cmp(&a.remaining));

        let mut settlements = Vec::with_capacity(creditors.len() + debtors.len());
        let (mut debtor_idx, mut creditor_idx) = (0usize, 0usize);

        while debtor_idx < debtors.len() && creditor_idx < creditors.len() {
            let debtor = &mut debtors[debtor_idx];
            let creditor = &mut creditors[creditor_idx];

            let amount = debtor.remaining.min(creditor.remaining);
            let rounded = amount.round_to_cents();
            if rounded.is_positive() {
                settlements.push(Settlement {
                    from: debtor.member,
                    to: creditor.member,
                    amount: rounded,
                });
            }

            debtor.remaining -= amount;
            creditor.remaining -= amount;

            if debtor.remaining < tolerance {
                debtor_idx += 1;
            }
            if creditor.remaining < tolerance {
                creditor_idx += 1;
            }
        }

        tracing::debug!(
            creditor_count = creditors.len(),
            debtor_count = debtors.len(),
            settlement_count = settlements.len(),
            "Reduced balances to settlements"
        );

        settlements
    }

    /// Balances after every settlement is paid: `from` goes up, `to` goes down.
    ///
    /// Members named only by a settlement are appended to the map.
    pub fn apply<'a>(balances: &BalanceMap<'a>, settlements: &[Settlement<'a>]) -> BalanceMap<'a> {
        let mut new_balances = balances.clone();
        for settlement in settlements {
            new_balances.credit(settlement.from, settlement.amount);
            new_balances.debit(settlement.to, settlement.amount);
        }
        new_balances
    }
}
