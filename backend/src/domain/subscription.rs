//! Subscription records held in the external table store.
//!
//! Rows are owned by exactly one user. The service never stores them locally;
//! these types describe what it reads back from the store and what it sends
//! when inserting or patching.

use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::UserId;

/// Validation errors returned by [`SubscriptionId::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubscriptionIdValidationError {
    /// The identifier was blank.
    #[error("subscription id must not be empty")]
    Empty,
}

/// Store-assigned subscription identifier.
///
/// Stores hand out either integer or textual keys. The identifier keeps the
/// textual form for filtering and remembers whether the store sent a number so
/// rows are echoed back to clients unchanged. Equality ignores that flag: the
/// path segment `42` names the same row as the integer `42`.
#[derive(Debug, Clone, Eq)]
pub struct SubscriptionId {
    raw: String,
    numeric: bool,
}

impl SubscriptionId {
    /// Construct an identifier from its textual form.
    pub fn new(raw: impl Into<String>) -> Result<Self, SubscriptionIdValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(SubscriptionIdValidationError::Empty);
        }
        Ok(Self {
            raw,
            numeric: false,
        })
    }

    /// Construct an identifier from an integer key.
    pub fn from_integer(value: i64) -> Self {
        Self {
            raw: value.to_string(),
            numeric: true,
        }
    }
}

impl PartialEq for SubscriptionId {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Hash for SubscriptionId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl AsRef<str> for SubscriptionId {
    fn as_ref(&self) -> &str {
        self.raw.as_str()
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for SubscriptionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.raw.parse::<i64>() {
            Ok(value) if self.numeric => serializer.serialize_i64(value),
            _ => serializer.serialize_str(&self.raw),
        }
    }
}

impl<'de> Deserialize<'de> for SubscriptionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum WireId {
            Integer(i64),
            Text(String),
        }

        match WireId::deserialize(deserializer)? {
            WireId::Integer(value) => Ok(Self::from_integer(value)),
            WireId::Text(raw) => Self::new(raw).map_err(serde::de::Error::custom),
        }
    }
}

/// How often a subscription charges.
///
/// Rows may be read back with values this service never writes; those are
/// kept as [`BillingCycle::Unrecognised`] and contribute nothing to spend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BillingCycle {
    /// Charged every week.
    Weekly,
    /// Charged every month.
    Monthly,
    /// Charged every year.
    Yearly,
    /// Any other stored value.
    Unrecognised(String),
}

impl BillingCycle {
    /// Parse one of the accepted cycle names.
    ///
    /// # Examples
    /// ```
    /// use subtrack::domain::BillingCycle;
    ///
    /// assert_eq!(BillingCycle::parse_known("weekly"), Some(BillingCycle::Weekly));
    /// assert_eq!(BillingCycle::parse_known("Weekly"), None);
    /// ```
    pub fn parse_known(raw: &str) -> Option<Self> {
        match raw {
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            "yearly" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// Wire representation of the cycle.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Unrecognised(raw) => raw.as_str(),
        }
    }

    /// Normalise `price` to its monthly equivalent.
    ///
    /// A week counts as a quarter month. Unrecognised cycles yield zero.
    /// Returns `None` when the result does not fit in a [`Decimal`].
    pub fn monthly_equivalent(&self, price: Decimal) -> Option<Decimal> {
        match self {
            Self::Weekly => price.checked_mul(Decimal::from(4)),
            Self::Monthly => Some(price),
            Self::Yearly => price.checked_div(Decimal::from(12)),
            Self::Unrecognised(_) => Some(Decimal::ZERO),
        }
    }
}

impl From<String> for BillingCycle {
    fn from(value: String) -> Self {
        Self::parse_known(&value).unwrap_or(Self::Unrecognised(value))
    }
}

impl From<BillingCycle> for String {
    fn from(value: BillingCycle) -> Self {
        match value {
            BillingCycle::Unrecognised(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

impl fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn active_by_default() -> bool {
    true
}

/// Subscription row as stored.
///
/// Columns the service does not model (for example `created_at`) are kept in
/// `extra` and returned to clients untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    pub billing_cycle: BillingCycle,
    #[serde(default)]
    pub next_billing_date: Option<NaiveDate>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Subscription {
    /// Monthly spend contributed by this row, or `None` on overflow.
    pub fn monthly_cost(&self) -> Option<Decimal> {
        self.billing_cycle.monthly_equivalent(self.price)
    }
}

/// Validated fields for a new subscription. The owner is stamped separately.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubscription {
    pub name: Option<String>,
    pub price: Decimal,
    pub billing_cycle: BillingCycle,
    pub next_billing_date: NaiveDate,
    pub is_active: bool,
}

/// Validated partial update. `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubscriptionPatch {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub billing_cycle: Option<BillingCycle>,
    pub next_billing_date: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

impl SubscriptionPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.billing_cycle.is_none()
            && self.next_billing_date.is_none()
            && self.is_active.is_none()
    }

    /// Apply the patch to a stored row.
    pub fn apply_to(&self, row: &mut Subscription) {
        if let Some(name) = &self.name {
            row.name = Some(name.clone());
        }
        if let Some(price) = self.price {
            row.price = price;
        }
        if let Some(cycle) = &self.billing_cycle {
            row.billing_cycle = cycle.clone();
        }
        if let Some(date) = self.next_billing_date {
            row.next_billing_date = Some(date);
        }
        if let Some(active) = self.is_active {
            row.is_active = active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;
    use std::str::FromStr;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).expect("decimal literal")
    }

    #[rstest]
    #[case(BillingCycle::Monthly, "9.99", "9.99")]
    #[case(BillingCycle::Weekly, "10", "40")]
    #[case(BillingCycle::Yearly, "120", "10")]
    #[case(BillingCycle::Unrecognised("daily".into()), "3", "0")]
    fn monthly_equivalent_normalises(
        #[case] cycle: BillingCycle,
        #[case] price: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(cycle.monthly_equivalent(dec(price)), Some(dec(expected)));
    }

    #[rstest]
    fn weekly_equivalent_of_maximum_price_overflows() {
        assert_eq!(BillingCycle::Weekly.monthly_equivalent(Decimal::MAX), None);
        assert_eq!(
            BillingCycle::Monthly.monthly_equivalent(Decimal::MAX),
            Some(Decimal::MAX)
        );
    }

    #[rstest]
    #[case("weekly", BillingCycle::Weekly)]
    #[case("quarterly", BillingCycle::Unrecognised("quarterly".into()))]
    #[case("MONTHLY", BillingCycle::Unrecognised("MONTHLY".into()))]
    fn billing_cycle_reads_any_string(#[case] raw: &str, #[case] expected: BillingCycle) {
        let cycle: BillingCycle = serde_json::from_value(json!(raw)).expect("cycle");
        assert_eq!(cycle, expected);
        assert_eq!(serde_json::to_value(&cycle).expect("serialise"), json!(raw));
    }

    #[rstest]
    fn row_round_trips_unknown_columns_and_numeric_ids() {
        let raw = json!({
            "id": 42,
            "user_id": "u1",
            "price": "9.99",
            "billing_cycle": "monthly",
            "next_billing_date": "2024-02-01",
            "is_active": true,
            "created_at": "2024-01-01T00:00:00Z"
        });
        let row: Subscription = serde_json::from_value(raw).expect("row");
        assert_eq!(row.id, SubscriptionId::new("42").expect("id"));
        assert_eq!(row.price, dec("9.99"));
        assert_eq!(row.extra.get("created_at"), Some(&json!("2024-01-01T00:00:00Z")));

        let echoed = serde_json::to_value(&row).expect("serialise");
        assert_eq!(echoed["id"], json!(42));
        assert_eq!(echoed["price"], json!(9.99));
        assert_eq!(echoed["created_at"], json!("2024-01-01T00:00:00Z"));
    }

    #[rstest]
    fn row_defaults_missing_optional_columns() {
        let row: Subscription = serde_json::from_value(json!({
            "id": "abc",
            "user_id": "u1",
            "price": 5,
            "billing_cycle": "weekly"
        }))
        .expect("row");
        assert!(row.is_active);
        assert!(row.next_billing_date.is_none());
        assert_eq!(serde_json::to_value(&row.id).expect("id"), json!("abc"));
    }

    #[rstest]
    fn empty_subscription_id_is_rejected() {
        assert_eq!(
            SubscriptionId::new(" ").expect_err("blank id"),
            SubscriptionIdValidationError::Empty
        );
    }

    #[rstest]
    fn patch_applies_only_present_fields() {
        let mut row: Subscription = serde_json::from_value(json!({
            "id": 1,
            "user_id": "u1",
            "name": "Music",
            "price": 9.99,
            "billing_cycle": "monthly",
            "next_billing_date": "2024-02-01",
            "is_active": true
        }))
        .expect("row");
        let patch = SubscriptionPatch {
            price: Some(dec("12.50")),
            is_active: Some(false),
            ..SubscriptionPatch::default()
        };
        assert!(!patch.is_empty());
        patch.apply_to(&mut row);
        assert_eq!(row.price, dec("12.50"));
        assert!(!row.is_active);
        assert_eq!(row.name.as_deref(), Some("Music"));
        assert_eq!(row.billing_cycle, BillingCycle::Monthly);
    }
}
