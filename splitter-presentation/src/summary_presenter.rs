use crate::{
    messages,
    money_format::MoneyFormatter,
    text_table::{Alignment, TextTableBuilder},
};
use splitter_domain::{CategoryTotal, Money};
use std::borrow::Cow;

pub struct SummaryPresenter;

impl SummaryPresenter {
    /// Total spend line followed by the per-category breakdown.
    pub fn render(
        total_spend: Money,
        categories: &[CategoryTotal],
        formatter: MoneyFormatter<'_>,
    ) -> String {
        let heading = messages::total_group_spend(formatter.amount(total_spend));
        if categories.is_empty() {
            return format!("{heading}\n{}", messages::NO_EXPENSES);
        }

        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right, Alignment::Right])
            .headers(&[
                Cow::Borrowed(messages::CATEGORY),
                Cow::Borrowed(messages::EXPENSES),
                Cow::Borrowed(messages::TOTAL),
            ]);
        for category in categories {
            builder = builder.row([
                Cow::Borrowed(category.category.label()),
                Cow::Owned(category.expense_count.to_string()),
                Cow::Owned(formatter.amount(category.total)),
            ]);
        }

        format!("{heading}\n{}", builder.build())
    }
}
