use crate::{
    messages,
    money_format::MoneyFormatter,
    text_table::{Alignment, TextTableBuilder},
};
use splitter_domain::Settlement;
use std::borrow::Cow;

pub struct SettlementPresenter;

impl SettlementPresenter {
    /// Payments in the order they were computed, or the settled notice.
    pub fn render(settlements: &[Settlement<'_>], formatter: MoneyFormatter<'_>) -> String {
        if settlements.is_empty() {
            return format!("{}\n{}", messages::ALL_SETTLED_UP, messages::NOBODY_OWES);
        }
        Self::build_transfer_table(settlements, formatter)
    }

    pub fn build_transfer_table(
        settlements: &[Settlement<'_>],
        formatter: MoneyFormatter<'_>,
    ) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Left, Alignment::Right])
            .headers(&[
                Cow::Borrowed(messages::FROM),
                Cow::Borrowed(messages::TO),
                Cow::Borrowed(messages::AMOUNT),
            ]);

        for settlement in settlements {
            builder = builder.row([
                Cow::Borrowed(settlement.from),
                Cow::Borrowed(settlement.to),
                Cow::Owned(formatter.amount(settlement.amount)),
            ]);
        }

        builder.build()
    }
}
