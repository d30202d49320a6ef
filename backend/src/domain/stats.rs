//! Spend aggregation over a user's subscriptions.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::{Error, Subscription};

const MONTHS_PER_YEAR: i64 = 12;
const CURRENCY_DP: u32 = 2;

/// Aggregate spend for a set of subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpendSummary {
    /// Every row considered, including unrecognised cycles.
    pub total_subscriptions: usize,
    /// Monthly spend rounded to cents.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub monthly_total: Decimal,
    /// Unrounded monthly spend times twelve, rounded to cents.
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub yearly_total: Decimal,
}

impl SpendSummary {
    /// Summary for a user with no subscriptions.
    pub fn empty() -> Self {
        Self {
            total_subscriptions: 0,
            monthly_total: Decimal::ZERO,
            yearly_total: Decimal::ZERO,
        }
    }
}

fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Normalise every row to a monthly cost and total it.
///
/// Rounding happens once per output so the yearly figure does not inherit
/// the monthly rounding error. Totals that do not fit in a [`Decimal`] are
/// reported as an upstream error, since only stored rows can carry them.
///
/// # Examples
/// ```
/// use subtrack::domain::stats::summarise;
///
/// let summary = summarise(&[]).expect("empty input totals");
/// assert_eq!(summary.total_subscriptions, 0);
/// ```
pub fn summarise(subscriptions: &[Subscription]) -> Result<SpendSummary, Error> {
    let monthly = subscriptions
        .iter()
        .try_fold(Decimal::ZERO, |total, row| {
            row.monthly_cost().and_then(|cost| total.checked_add(cost))
        })
        .ok_or_else(overflow_error)?;
    let yearly = monthly
        .checked_mul(Decimal::from(MONTHS_PER_YEAR))
        .ok_or_else(overflow_error)?;
    Ok(SpendSummary {
        total_subscriptions: subscriptions.len(),
        monthly_total: round_currency(monthly),
        yearly_total: round_currency(yearly),
    })
}

fn overflow_error() -> Error {
    Error::upstream("subscription prices are too large to total")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BillingCycle, ErrorCode, SubscriptionId, UserId};
    use rstest::rstest;
    use serde_json::Map;
    use std::str::FromStr;

    fn dec(raw: &str) -> Decimal {
        Decimal::from_str(raw).expect("decimal literal")
    }

    fn row(price: &str, cycle: &str) -> Subscription {
        Subscription {
            id: SubscriptionId::new("1").expect("id"),
            user_id: UserId::new("u1").expect("user id"),
            name: None,
            price: dec(price),
            billing_cycle: BillingCycle::from(cycle.to_owned()),
            next_billing_date: None,
            is_active: true,
            extra: Map::new(),
        }
    }

    #[rstest]
    fn mixed_cycles_match_reference_totals() {
        let summary = summarise(&[
            row("9.99", "monthly"),
            row("120", "yearly"),
            row("5", "weekly"),
        ])
        .expect("totals");
        assert_eq!(summary.total_subscriptions, 3);
        assert_eq!(summary.monthly_total, dec("39.99"));
        assert_eq!(summary.yearly_total, dec("479.88"));
    }

    #[rstest]
    #[case("monthly", "9.99", "9.99")]
    #[case("yearly", "120", "10.00")]
    #[case("weekly", "10", "40.00")]
    fn single_row_contribution(#[case] cycle: &str, #[case] price: &str, #[case] monthly: &str) {
        let summary = summarise(&[row(price, cycle)]).expect("totals");
        assert_eq!(summary.monthly_total, dec(monthly));
    }

    #[rstest]
    fn unrecognised_cycle_counts_but_costs_nothing() {
        let summary = summarise(&[row("50", "daily"), row("10", "monthly")]).expect("totals");
        assert_eq!(summary.total_subscriptions, 2);
        assert_eq!(summary.monthly_total, dec("10"));
        assert_eq!(summary.yearly_total, dec("120"));
    }

    #[rstest]
    fn yearly_uses_unrounded_monthly_sum() {
        // 10/12 per month rounds to 0.83, but the yearly figure stays exact.
        let summary = summarise(&[row("10", "yearly")]).expect("totals");
        assert_eq!(summary.monthly_total, dec("0.83"));
        assert_eq!(summary.yearly_total, dec("10.00"));
    }

    #[rstest]
    #[case("0.005", "0.01")]
    #[case("0.015", "0.02")]
    #[case("2.675", "2.68")]
    fn rounds_half_away_from_zero(#[case] price: &str, #[case] expected: &str) {
        let summary = summarise(&[row(price, "monthly")]).expect("totals");
        assert_eq!(summary.monthly_total, dec(expected));
    }

    #[rstest]
    fn empty_input_is_zero() {
        assert_eq!(summarise(&[]).expect("totals"), SpendSummary::empty());
    }

    #[rstest]
    fn serialises_totals_as_numbers() {
        let summary = summarise(&[row("9.99", "monthly")]).expect("totals");
        let value = serde_json::to_value(summary).expect("json");
        assert_eq!(value["total_subscriptions"], serde_json::json!(1));
        assert!(value["monthly_total"].is_number());
        assert!(value["yearly_total"].is_number());
    }

    #[rstest]
    #[case::weekly_row(vec![row("79228162514264337593543950335", "weekly")])]
    #[case::sum_of_rows(vec![
        row("79228162514264337593543950335", "monthly"),
        row("1", "monthly"),
    ])]
    #[case::yearly_projection(vec![row("79228162514264337593543950335", "monthly")])]
    fn oversized_totals_are_errors(#[case] rows: Vec<Subscription>) {
        let err = summarise(&rows).expect_err("overflow");
        assert_eq!(err.code(), ErrorCode::UpstreamError);
    }
}
