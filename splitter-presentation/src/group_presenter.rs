use crate::{
    balance_presenter::BalancePresenter, messages, money_format::MoneyFormatter,
    settlement_presenter::SettlementPresenter, summary_presenter::SummaryPresenter,
};
use splitter_application::GroupOverview;
use std::fmt;

pub struct GroupPresenter;

/// Rendered sections of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupView {
    pub heading: String,
    pub balance_table: String,
    pub settlement_text: String,
    pub summary_text: String,
    pub notes: Vec<String>,
}

impl GroupPresenter {
    pub fn render(overview: &GroupOverview<'_>, formatter: MoneyFormatter<'_>) -> GroupView {
        let group = overview.group;
        GroupView {
            heading: messages::group_heading(&group.name, group.kind.as_tag(), group.members.len()),
            balance_table: BalancePresenter::render_table(
                &overview.settlement.balances,
                formatter,
            ),
            settlement_text: SettlementPresenter::render(
                &overview.settlement.settlements,
                formatter,
            ),
            summary_text: SummaryPresenter::render(
                overview.total_spend,
                &overview.categories,
                formatter,
            ),
            notes: overview
                .settlement
                .anomalies
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl fmt::Display for GroupView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        writeln!(f)?;
        writeln!(f, "{}", self.balance_table)?;
        writeln!(f)?;
        writeln!(f, "{}", self.settlement_text)?;
        writeln!(f)?;
        write!(f, "{}", self.summary_text)?;
        for note in &self.notes {
            write!(f, "\nnote: {note}")?;
        }
        Ok(())
    }
}
