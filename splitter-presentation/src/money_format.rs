use splitter_domain::Money;

/// Renders amounts with a currency symbol, e.g. `₹66.67`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoneyFormatter<'a> {
    symbol: &'a str,
}

impl<'a> MoneyFormatter<'a> {
    pub fn new(symbol: &'a str) -> Self {
        Self { symbol }
    }

    /// Absolute value: `₹33.33` for both 33.33 and -33.33.
    pub fn amount(&self, amount: Money) -> String {
        format!("{}{}", self.symbol, amount.abs())
    }

    /// `+₹66.67`, `-₹33.33`; zero carries a plus.
    pub fn signed(&self, amount: Money) -> String {
        let sign = if amount.round_to_cents().is_negative() {
            "-"
        } else {
            "+"
        };
        format!("{sign}{}", self.amount(amount))
    }
}
