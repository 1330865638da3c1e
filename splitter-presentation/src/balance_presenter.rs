use crate::{
    messages,
    money_format::MoneyFormatter,
    text_table::{Alignment, TextTableBuilder},
};
use splitter_domain::{BalanceMap, MemberPosition, Money, SpendingSummary};
use std::borrow::Cow;

pub struct BalancePresenter;

impl BalancePresenter {
    /// Member, signed balance and a short status per row, in balance-map order.
    pub fn render_table(balances: &BalanceMap<'_>, formatter: MoneyFormatter<'_>) -> String {
        let mut builder = TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right, Alignment::Left])
            .headers(&[
                Cow::Borrowed(messages::MEMBER),
                Cow::Borrowed(messages::BALANCE),
                Cow::Borrowed(messages::STATUS),
            ]);

        for (member, balance) in balances.iter() {
            builder = builder.row([
                Cow::Borrowed(member),
                Cow::Owned(formatter.signed(balance)),
                Cow::Owned(Self::status(balance, formatter)),
            ]);
        }

        builder.build()
    }

    /// One member's standing, phrased for that member.
    pub fn position_message(
        balances: &BalanceMap<'_>,
        member: &str,
        formatter: MoneyFormatter<'_>,
    ) -> String {
        match SpendingSummary::member_position(balances, member) {
            MemberPosition::Owed(amount) => messages::you_are_owed(formatter.amount(amount)),
            MemberPosition::Owes(amount) => messages::you_owe(formatter.amount(amount)),
            MemberPosition::Settled => messages::YOU_ARE_SETTLED_UP.to_string(),
        }
    }

    fn status(balance: Money, formatter: MoneyFormatter<'_>) -> String {
        let rounded = balance.round_to_cents();
        if rounded.is_positive() {
            messages::gets(formatter.amount(rounded))
        } else if rounded.is_negative() {
            messages::owes(formatter.amount(rounded))
        } else {
            messages::SETTLED.to_string()
        }
    }
}
