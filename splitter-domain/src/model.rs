use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use crate::services::rounding::{CENT_SCALE, round_half_away_from_zero};

/// Signed currency amount with exact decimal arithmetic.
///
/// The operators saturate at the bounds of [`Decimal`]; code that has to notice
/// an overflow uses [`Money::checked_add`] and [`Money::checked_sub`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// `num * 10^-scale`, e.g. `Money::new(3333, 2)` is 33.33.
    pub fn new(num: i64, scale: u32) -> Self {
        Self(Decimal::new(num, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    /// Smallest currency step, also the tolerance under which a balance counts as settled.
    pub fn cent() -> Self {
        Self(Decimal::new(1, CENT_SCALE))
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// True when `|self| <= 0.01`.
    pub fn is_settled(self) -> bool {
        self.abs() <= Self::cent()
    }

    pub fn round_to_cents(self) -> Self {
        Self(round_half_away_from_zero(self.0, CENT_SCALE))
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    /// Equal share of `self` among `parts` participants, unrounded.
    pub fn share(self, parts: usize) -> Option<Self> {
        if parts == 0 {
            return None;
        }
        self.0.checked_div(Decimal::from(parts)).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_to_cents().0;
        // `-0.00` must never reach users.
        let value = if rounded.is_zero() {
            Decimal::ZERO
        } else {
            rounded
        };
        write!(f, "{value:.2}")
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim()).map(Self)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, money| acc + money)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GroupKind {
    Trip,
    Home,
    Food,
    Couple,
    #[default]
    Other,
}

impl GroupKind {
    /// Unknown tags fall back to [`GroupKind::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "trip" => Self::Trip,
            "home" => Self::Home,
            "food" => Self::Food,
            "couple" => Self::Couple,
            _ => Self::Other,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Trip => "trip",
            Self::Home => "home",
            Self::Food => "food",
            Self::Couple => "couple",
            Self::Other => "other",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Food,
    Travel,
    Shopping,
    Entertainment,
    Bills,
    #[default]
    Other,
}

impl ExpenseCategory {
    /// Display order used by category breakdowns.
    pub const ALL: [Self; 6] = [
        Self::Food,
        Self::Travel,
        Self::Shopping,
        Self::Entertainment,
        Self::Bills,
        Self::Other,
    ];

    /// Unknown tags fall back to [`ExpenseCategory::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "food" => Self::Food,
            "travel" => Self::Travel,
            "shopping" => Self::Shopping,
            "entertainment" => Self::Entertainment,
            "bills" => Self::Bills,
            _ => Self::Other,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Travel => "travel",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
            Self::Bills => "bills",
            Self::Other => "other",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Bills => "Bills",
            Self::Other => "Other",
        }
    }
}

/// How an expense recorded without participants is split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitDefault {
    /// Keep the split empty; it resolves to the group's members at calculation time,
    /// so later membership edits re-split older expenses.
    #[default]
    CurrentMembership,
    /// Copy the group's members into the expense when it is recorded.
    FreezeAtCreation,
}

impl FromStr for SplitDefault {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" | "current_membership" => Ok(Self::CurrentMembership),
            "freeze" | "freeze_at_creation" => Ok(Self::FreezeAtCreation),
            other => Err(format!("unknown split default '{other}'")),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub members: Vec<String>,
    pub kind: GroupKind,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|member| member == name)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: String,
    pub group_id: String,
    pub description: String,
    pub amount: Money,
    pub payer: String,
    /// Empty means "everyone currently in the group".
    pub split_by: Vec<String>,
    pub category: ExpenseCategory,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    /// The amount the engine works with: negative amounts count as zero.
    pub fn effective_amount(&self) -> Money {
        if self.amount.is_negative() {
            Money::ZERO
        } else {
            self.amount
        }
    }
}

/// Ordered split participants of one expense.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberSet<'a> {
    members: Vec<&'a str>,
}

impl<'a> MemberSet<'a> {
    pub fn new(members: Vec<&'a str>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[&'a str] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.members.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Net position per member, in first-seen order.
///
/// Positive: the group owes the member. Negative: the member owes the group.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceMap<'a> {
    balances: IndexMap<&'a str, Money>,
}

impl<'a> BalanceMap<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every member starts at zero, in the given order.
    pub fn seeded<I>(members: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut balances = IndexMap::new();
        for member in members {
            balances.entry(member).or_insert(Money::ZERO);
        }
        Self { balances }
    }

    pub fn credit(&mut self, member: &'a str, amount: Money) {
        *self.balances.entry(member).or_insert(Money::ZERO) += amount;
    }

    pub fn debit(&mut self, member: &'a str, amount: Money) {
        *self.balances.entry(member).or_insert(Money::ZERO) -= amount;
    }

    /// Like [`BalanceMap::credit`], but leaves the map untouched on overflow.
    pub fn try_credit(&mut self, member: &'a str, amount: Money) -> Result<(), AmountOverflow> {
        let balance = self.balances.entry(member).or_insert(Money::ZERO);
        *balance = balance.checked_add(amount).ok_or(AmountOverflow)?;
        Ok(())
    }

    /// Like [`BalanceMap::debit`], but leaves the map untouched on overflow.
    pub fn try_debit(&mut self, member: &'a str, amount: Money) -> Result<(), AmountOverflow> {
        let balance = self.balances.entry(member).or_insert(Money::ZERO);
        *balance = balance.checked_sub(amount).ok_or(AmountOverflow)?;
        Ok(())
    }

    pub fn get(&self, member: &str) -> Option<Money> {
        self.balances.get(member).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, Money)> + '_ {
        self.balances.iter().map(|(member, money)| (*member, *money))
    }

    pub fn members(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.balances.keys().copied()
    }

    pub fn values(&self) -> impl Iterator<Item = Money> + '_ {
        self.balances.values().copied()
    }

    pub fn len(&self) -> usize {
        self.balances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.balances.is_empty()
    }

    pub fn total(&self) -> Money {
        self.values().sum()
    }
}

impl<'a> FromIterator<(&'a str, Money)> for BalanceMap<'a> {
    fn from_iter<T: IntoIterator<Item = (&'a str, Money)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (member, amount) in iter {
            map.credit(member, amount);
        }
        map
    }
}

/// Accumulates exact (unrounded) balances expense by expense.
pub struct BalanceAccumulator<'a> {
    balances: BalanceMap<'a>,
}

impl<'a> BalanceAccumulator<'a> {
    pub fn new<I>(members: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        Self {
            balances: BalanceMap::seeded(members),
        }
    }

    /// Credits `payer` with the full amount and debits every participant an equal share.
    /// An empty split contributes nothing.
    ///
    /// The expense is applied entirely or not at all: if any balance would leave
    /// the decimal range, nothing changes and [`AmountOverflow`] is returned.
    pub fn apply(
        &mut self,
        payer: &'a str,
        amount: Money,
        split: &MemberSet<'a>,
    ) -> Result<(), AmountOverflow> {
        let Some(share) = amount.share(split.len()) else {
            return Ok(());
        };
        let mut staged = self.balances.clone();
        staged.try_credit(payer, amount)?;
        for member in split.iter() {
            staged.try_debit(member, share)?;
        }
        self.balances = staged;
        Ok(())
    }

    pub fn balances(&self) -> &BalanceMap<'a> {
        &self.balances
    }
}

/// A balance would leave the range [`Money`] can represent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("amount outside the representable range")]
pub struct AmountOverflow;

/// A suggested payment from a debtor to a creditor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Settlement<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: Money,
}

/// Where one member stands in a group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemberPosition {
    Owed(Money),
    Owes(Money),
    Settled,
}

/// Conditions the engine absorbs instead of failing.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Anomaly<'a> {
    #[error("group '{group_id}' not found")]
    GroupNotFound { group_id: String },
    #[error("expense '{expense_id}' has invalid amount {amount}, counted as 0")]
    InvalidAmount { expense_id: &'a str, amount: Money },
    #[error("expense '{expense_id}' has nobody to split between, skipped")]
    EmptySplitSet { expense_id: &'a str },
}
