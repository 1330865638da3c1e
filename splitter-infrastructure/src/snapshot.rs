//! JSON snapshots of a ledger.
//!
//! Records use the mobile app's camelCase shape: `groupId`, `splitBy`, `type`,
//! `createdAt` as epoch milliseconds and `date` as an RFC 3339 string. The
//! app's storage keys are accepted as aliases for the two top-level arrays.

use crate::store::InMemoryLedgerStore;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use splitter_application::LedgerSource;
use splitter_domain::{Expense, ExpenseCategory, Group, GroupKind, Money, SplitDefault};
use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to decode snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Groups and expenses decoded from a snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSnapshot {
    pub groups: Vec<Group>,
    pub expenses: Vec<Expense>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct SnapshotRecord {
    #[serde(default, alias = "smart-splitter.groups.v2")]
    groups: Vec<GroupRecord>,
    #[serde(default, alias = "smart-splitter.expenses.v2")]
    expenses: Vec<ExpenseRecord>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupRecord {
    id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    members: Option<Vec<String>>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    created_at: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpenseRecord {
    id: String,
    group_id: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_amount",
        serialize_with = "serialize_amount"
    )]
    amount: Money,
    #[serde(default)]
    payer: Option<String>,
    #[serde(default)]
    split_by: Option<Vec<String>>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    created_at: Option<i64>,
}

/// Numbers and numeric strings decode as written; anything else is zero.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(lenient_amount(&value))
}

fn lenient_amount(value: &Value) -> Money {
    let parsed = match value {
        Value::Number(number) => parse_decimal(&number.to_string())
            .or_else(|| number.as_f64().and_then(Decimal::from_f64)),
        Value::String(raw) => parse_decimal(raw.trim()),
        _ => None,
    };
    match parsed {
        Some(amount) => Money::from_decimal(amount),
        None => {
            tracing::debug!(raw = %value, "Non-numeric amount decoded as zero");
            Money::ZERO
        }
    }
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

fn serialize_amount<S>(amount: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let value = amount.as_decimal();
    match value.to_i64().filter(|_| value.fract().is_zero()) {
        Some(whole) => serializer.serialize_i64(whole),
        None => match value.to_f64() {
            Some(float) => serializer.serialize_f64(float),
            None => serializer.serialize_str(&value.to_string()),
        },
    }
}

fn timestamp(millis: Option<i64>) -> Option<DateTime<Utc>> {
    millis.and_then(DateTime::from_timestamp_millis)
}

fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|date| date.with_timezone(&Utc))
}

impl From<GroupRecord> for Group {
    fn from(record: GroupRecord) -> Self {
        Group {
            created_at: timestamp(record.created_at).unwrap_or_default(),
            id: record.id,
            name: record.name.unwrap_or_default(),
            members: record.members.unwrap_or_default(),
            kind: record
                .kind
                .as_deref()
                .map(GroupKind::from_tag)
                .unwrap_or_default(),
        }
    }
}

impl From<ExpenseRecord> for Expense {
    fn from(record: ExpenseRecord) -> Self {
        let created_at = timestamp(record.created_at).unwrap_or_default();
        let date = match record.date.as_deref().map(parse_date) {
            Some(Some(date)) => date,
            Some(None) => {
                tracing::debug!(
                    expense_id = %record.id,
                    raw = record.date.as_deref().unwrap_or_default(),
                    "Unparseable expense date, using creation time"
                );
                created_at
            }
            None => created_at,
        };

        Expense {
            id: record.id,
            group_id: record.group_id,
            description: record.description.unwrap_or_default(),
            amount: record.amount,
            payer: record.payer.unwrap_or_default(),
            split_by: record.split_by.unwrap_or_default(),
            category: record
                .category
                .as_deref()
                .map(ExpenseCategory::from_tag)
                .unwrap_or_default(),
            date,
            created_at,
        }
    }
}

impl From<&Group> for GroupRecord {
    fn from(group: &Group) -> Self {
        GroupRecord {
            id: group.id.clone(),
            name: Some(group.name.clone()),
            members: Some(group.members.clone()),
            kind: Some(group.kind.as_tag().to_string()),
            created_at: Some(group.created_at.timestamp_millis()),
        }
    }
}

impl From<&Expense> for ExpenseRecord {
    fn from(expense: &Expense) -> Self {
        ExpenseRecord {
            id: expense.id.clone(),
            group_id: expense.group_id.clone(),
            description: Some(expense.description.clone()),
            amount: expense.amount,
            payer: Some(expense.payer.clone()),
            split_by: Some(expense.split_by.clone()),
            category: Some(expense.category.as_tag().to_string()),
            date: Some(expense.date.to_rfc3339_opts(SecondsFormat::Millis, true)),
            created_at: Some(expense.created_at.timestamp_millis()),
        }
    }
}

impl LedgerSnapshot {
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let record: SnapshotRecord = serde_json::from_str(json)?;
        let snapshot = Self {
            groups: record.groups.into_iter().map(Group::from).collect(),
            expenses: record.expenses.into_iter().map(Expense::from).collect(),
        };

        tracing::debug!(
            group_count = snapshot.groups.len(),
            expense_count = snapshot.expenses.len(),
            "Decoded ledger snapshot"
        );
        Ok(snapshot)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        let record = SnapshotRecord {
            groups: self.groups.iter().map(GroupRecord::from).collect(),
            expenses: self.expenses.iter().map(ExpenseRecord::from).collect(),
        };
        Ok(serde_json::to_string_pretty(&record)?)
    }

    pub fn into_store(self, split_default: SplitDefault) -> InMemoryLedgerStore {
        InMemoryLedgerStore::from_parts(self.groups, self.expenses, split_default)
    }
}

impl LedgerSource for LedgerSnapshot {
    fn groups(&self) -> &[Group] {
        &self.groups
    }

    fn expenses(&self) -> &[Expense] {
        &self.expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;
    use splitter_application::SettlementEngine;
    use splitter_domain::Anomaly;

    const SNAPSHOT: &str = r#"{
        "groups": [
            {
                "id": "g1",
                "name": "Goa",
                "members": ["A", "B", "C"],
                "type": "trip",
                "image": null,
                "createdAt": 1704067200000
            }
        ],
        "expenses": [
            {
                "id": "e1",
                "groupId": "g1",
                "description": "Hotel",
                "amount": 300,
                "payer": "A",
                "category": "travel",
                "splitBy": ["A", "B", "C"],
                "date": "2024-01-02T10:30:00.000Z",
                "receiptImage": null,
                "createdAt": 1704191400000
            },
            {
                "id": "e2",
                "groupId": "g1",
                "description": "Snacks",
                "amount": "45.5",
                "payer": "B"
            }
        ]
    }"#;

    #[test]
    fn decodes_app_records() {
        let snapshot = LedgerSnapshot::from_json(SNAPSHOT).expect("valid snapshot");

        let group = &snapshot.groups[0];
        assert_eq!(group.name, "Goa");
        assert_eq!(group.kind, GroupKind::Trip);
        assert_eq!(
            group.created_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );

        let hotel = &snapshot.expenses[0];
        assert_eq!(hotel.amount, Money::from_i64(300));
        assert_eq!(hotel.category, ExpenseCategory::Travel);
        assert_eq!(hotel.split_by, vec!["A", "B", "C"]);
        assert_eq!(
            hotel.date,
            Utc.with_ymd_and_hms(2024, 1, 2, 10, 30, 0).unwrap()
        );

        let snacks = &snapshot.expenses[1];
        assert_eq!(snacks.amount, Money::new(455, 1));
        assert_eq!(snacks.category, ExpenseCategory::Other);
        assert!(snacks.split_by.is_empty());
        assert_eq!(snacks.date, DateTime::<Utc>::default());
    }

    #[rstest]
    #[case::integer("12", Money::from_i64(12))]
    #[case::fraction("12.75", Money::new(1275, 2))]
    #[case::exponent("1.5e2", Money::from_i64(150))]
    #[case::numeric_string("\" 12.5 \"", Money::new(125, 1))]
    #[case::negative("-8", Money::from_i64(-8))]
    #[case::word("\"twelve\"", Money::ZERO)]
    #[case::empty_string("\"\"", Money::ZERO)]
    #[case::null("null", Money::ZERO)]
    #[case::boolean("true", Money::ZERO)]
    #[case::object("{}", Money::ZERO)]
    fn amounts_decode_leniently(#[case] raw: &str, #[case] expected: Money) {
        let json = format!(
            r#"{{"expenses": [{{"id": "e", "groupId": "g", "amount": {raw}, "payer": "A"}}]}}"#
        );

        let snapshot = LedgerSnapshot::from_json(&json).expect("valid snapshot");

        assert_eq!(snapshot.expenses[0].amount, expected);
    }

    #[test]
    fn missing_amount_is_zero() {
        let json = r#"{"expenses": [{"id": "e", "groupId": "g", "payer": "A"}]}"#;

        let snapshot = LedgerSnapshot::from_json(json).expect("valid snapshot");

        assert_eq!(snapshot.expenses[0].amount, Money::ZERO);
    }

    #[test]
    fn accepts_storage_keys() {
        let json = r#"{
            "smart-splitter.groups.v2": [{"id": "g", "name": "Flat", "members": ["A"]}],
            "smart-splitter.expenses.v2": []
        }"#;

        let snapshot = LedgerSnapshot::from_json(json).expect("valid snapshot");

        assert_eq!(snapshot.groups.len(), 1);
        assert_eq!(snapshot.groups[0].kind, GroupKind::Other);
    }

    #[rstest]
    #[case::not_json("groups: []")]
    #[case::wrong_shape(r#"{"groups": {"id": "g"}}"#)]
    #[case::missing_id(r#"{"groups": [{"name": "Flat"}]}"#)]
    fn rejects_malformed_snapshots(#[case] json: &str) {
        let err = LedgerSnapshot::from_json(json).expect_err("malformed snapshot");

        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = LedgerSnapshot::from_path("/nonexistent/ledger.json").expect_err("no file");

        assert!(matches!(err, SnapshotError::Io { .. }));
        assert!(err.to_string().starts_with("Failed to read /nonexistent/ledger.json"));
    }

    #[test]
    fn round_trips_through_json() {
        let snapshot = LedgerSnapshot::from_json(SNAPSHOT).expect("valid snapshot");

        let reloaded =
            LedgerSnapshot::from_json(&snapshot.to_json().expect("encodes")).expect("decodes");

        assert_eq!(reloaded, snapshot);
    }

    #[test]
    fn snapshot_feeds_the_engine() {
        let snapshot = LedgerSnapshot::from_json(SNAPSHOT).expect("valid snapshot");
        let engine = SettlementEngine::new();

        let from_snapshot = engine.compute_balances_from(&snapshot, "g1");
        let store = snapshot.clone().into_store(SplitDefault::CurrentMembership);
        let from_store = engine.compute_balances_from(&store, "g1");

        assert_eq!(
            from_snapshot.iter().collect::<Vec<_>>(),
            vec![
                ("A", Money::new(18483, 2)),
                ("B", Money::new(-6967, 2)),
                ("C", Money::new(-11517, 2)),
            ]
        );
        assert_eq!(from_snapshot, from_store);
    }

    #[test]
    fn oversized_amounts_settle_without_overflow() {
        let json = r#"{
            "groups": [{"id": "g1", "name": "Goa", "members": ["A", "B"]}],
            "expenses": [
                {"id": "e1", "groupId": "g1", "amount": "79228162514264337593543950335", "payer": "A", "splitBy": ["B"]},
                {"id": "e2", "groupId": "g1", "amount": "79228162514264337593543950335", "payer": "A", "splitBy": ["B"]}
            ]
        }"#;
        let snapshot = LedgerSnapshot::from_json(json).expect("valid snapshot");
        let huge = Money::from_decimal(Decimal::MAX);

        let settled =
            SettlementEngine::new().settle_group("g1", snapshot.groups(), snapshot.expenses());

        assert_eq!(
            settled.balances.iter().collect::<Vec<_>>(),
            vec![("A", huge), ("B", -huge)]
        );
        assert_eq!(settled.settlements.len(), 1);
        assert_eq!(settled.settlements[0].amount, huge);
        assert_eq!(
            settled.anomalies,
            vec![Anomaly::InvalidAmount {
                expense_id: "e2",
                amount: huge,
            }]
        );
    }
}
