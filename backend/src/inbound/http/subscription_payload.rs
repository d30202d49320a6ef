//! Allow-list parsing for subscription create and update bodies.
//!
//! Bodies arrive as free-form JSON objects. Only the columns below may be
//! written by clients; anything else is rejected rather than forwarded to the
//! store.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};

use super::validation::{
    FieldName, empty_patch_error, immutable_field_error, invalid_date_error, invalid_type_error,
    invalid_value_error, missing_field_error, unknown_field_error,
};
use crate::domain::{BillingCycle, Error, NewSubscription, SubscriptionPatch};

const NAME: FieldName = FieldName::new("name");
const PRICE: FieldName = FieldName::new("price");
const BILLING_CYCLE: FieldName = FieldName::new("billing_cycle");
const NEXT_BILLING_DATE: FieldName = FieldName::new("next_billing_date");
const IS_ACTIVE: FieldName = FieldName::new("is_active");
const USER_ID: FieldName = FieldName::new("user_id");

const NAME_MAX_CHARS: usize = 200;
const PRICE_MAX: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);
const PRICE_MAX_SCALE: u32 = 4;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Fields accepted in either body, parsed but not yet checked for presence.
#[derive(Debug, Default)]
struct Fields {
    name: Option<String>,
    price: Option<Decimal>,
    billing_cycle: Option<BillingCycle>,
    next_billing_date: Option<NaiveDate>,
    is_active: Option<bool>,
    user_id_supplied: bool,
}

fn parse_fields(body: &Map<String, Value>) -> Result<Fields, Error> {
    let mut fields = Fields::default();
    for (key, value) in body {
        // Explicit nulls are treated as absent.
        if value.is_null() {
            continue;
        }
        match key.as_str() {
            "name" => fields.name = Some(parse_name(value)?),
            "price" => fields.price = Some(parse_price(value)?),
            "billing_cycle" => fields.billing_cycle = Some(parse_billing_cycle(value)?),
            "next_billing_date" => fields.next_billing_date = Some(parse_date(value)?),
            "is_active" => fields.is_active = Some(parse_bool(value)?),
            "user_id" => fields.user_id_supplied = true,
            other => return Err(unknown_field_error(other)),
        }
    }
    Ok(fields)
}

fn parse_name(value: &Value) -> Result<String, Error> {
    let raw = value
        .as_str()
        .ok_or_else(|| invalid_type_error(NAME, "a string", value))?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_value_error(NAME, "must not be blank", value));
    }
    if trimmed.chars().count() > NAME_MAX_CHARS {
        return Err(invalid_value_error(
            NAME,
            &format!("must be at most {NAME_MAX_CHARS} characters"),
            value,
        ));
    }
    Ok(trimmed.to_owned())
}

fn parse_price(value: &Value) -> Result<Decimal, Error> {
    let raw = match value {
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.trim().to_owned(),
        _ => return Err(invalid_type_error(PRICE, "a number", value)),
    };
    let price = Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|_| invalid_value_error(PRICE, "must be a decimal number", value))?;
    if price.is_sign_negative() && !price.is_zero() {
        return Err(invalid_value_error(PRICE, "must not be negative", value));
    }
    if price > PRICE_MAX {
        return Err(invalid_value_error(
            PRICE,
            &format!("must be at most {PRICE_MAX}"),
            value,
        ));
    }
    if price.normalize().scale() > PRICE_MAX_SCALE {
        return Err(invalid_value_error(
            PRICE,
            &format!("must have at most {PRICE_MAX_SCALE} decimal places"),
            value,
        ));
    }
    Ok(price)
}

fn parse_billing_cycle(value: &Value) -> Result<BillingCycle, Error> {
    let raw = value
        .as_str()
        .ok_or_else(|| invalid_type_error(BILLING_CYCLE, "a string", value))?;
    BillingCycle::parse_known(raw).ok_or_else(|| {
        invalid_value_error(BILLING_CYCLE, "must be one of weekly, monthly, yearly", value)
    })
}

fn parse_date(value: &Value) -> Result<NaiveDate, Error> {
    value
        .as_str()
        .and_then(|raw| NaiveDate::parse_from_str(raw, DATE_FORMAT).ok())
        .ok_or_else(|| invalid_date_error(NEXT_BILLING_DATE, value))
}

fn parse_bool(value: &Value) -> Result<bool, Error> {
    value
        .as_bool()
        .ok_or_else(|| invalid_type_error(IS_ACTIVE, "a boolean", value))
}

/// Decode a raw request body into a JSON object.
///
/// Handlers call this only after the session owner is known, so an anonymous
/// request with a broken body still answers 401.
pub(crate) fn decode_body(raw: &[u8]) -> Result<Map<String, Value>, Error> {
    serde_json::from_slice(raw)
        .map_err(|err| Error::invalid_request(format!("invalid JSON body: {err}")))
}

/// Validate a create body. Any client-supplied `user_id` is discarded; the
/// handler stamps the session owner instead.
pub(crate) fn parse_new_subscription(body: &Map<String, Value>) -> Result<NewSubscription, Error> {
    let fields = parse_fields(body)?;
    Ok(NewSubscription {
        name: fields.name,
        price: fields.price.ok_or_else(|| missing_field_error(PRICE))?,
        billing_cycle: fields
            .billing_cycle
            .ok_or_else(|| missing_field_error(BILLING_CYCLE))?,
        next_billing_date: fields
            .next_billing_date
            .ok_or_else(|| missing_field_error(NEXT_BILLING_DATE))?,
        is_active: fields.is_active.unwrap_or(true),
    })
}

/// Validate an update body. Ownership cannot be transferred.
pub(crate) fn parse_subscription_patch(
    body: &Map<String, Value>,
) -> Result<SubscriptionPatch, Error> {
    let fields = parse_fields(body)?;
    if fields.user_id_supplied {
        return Err(immutable_field_error(USER_ID));
    }
    let patch = SubscriptionPatch {
        name: fields.name,
        price: fields.price,
        billing_cycle: fields.billing_cycle,
        next_billing_date: fields.next_billing_date,
        is_active: fields.is_active,
    };
    if patch.is_empty() {
        return Err(empty_patch_error());
    }
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn detail_code(err: &Error) -> Option<&str> {
        err.details()?.get("code")?.as_str()
    }

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"not json".as_slice())]
    #[case(b"[1, 2]".as_slice())]
    fn decode_rejects_non_object_bodies(#[case] raw: &[u8]) {
        let err = decode_body(raw).expect_err("not an object");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
        assert!(err.message().starts_with("invalid JSON body"));
    }

    #[rstest]
    fn create_accepts_full_body_and_ignores_user_id() {
        let parsed = parse_new_subscription(&body(json!({
            "name": "  Streaming ",
            "price": 9.99,
            "billing_cycle": "monthly",
            "next_billing_date": "2024-02-01",
            "user_id": "someone-else"
        })))
        .expect("valid body");
        assert_eq!(parsed.name.as_deref(), Some("Streaming"));
        assert_eq!(parsed.price, Decimal::from_str("9.99").expect("dec"));
        assert_eq!(parsed.billing_cycle, BillingCycle::Monthly);
        assert!(parsed.is_active);
    }

    #[rstest]
    #[case(json!("12.50"), "12.50")]
    #[case(json!(0), "0")]
    #[case(json!(120), "120")]
    fn price_accepts_numbers_and_numeric_strings(#[case] price: Value, #[case] expected: &str) {
        let parsed = parse_new_subscription(&body(json!({
            "price": price,
            "billing_cycle": "yearly",
            "next_billing_date": "2024-12-31"
        })))
        .expect("valid body");
        assert_eq!(parsed.price, Decimal::from_str(expected).expect("dec"));
    }

    #[rstest]
    #[case(json!({"billing_cycle": "monthly", "next_billing_date": "2024-02-01"}), "missing_field")]
    #[case(json!({"price": 1, "next_billing_date": "2024-02-01"}), "missing_field")]
    #[case(json!({"price": 1, "billing_cycle": "monthly"}), "missing_field")]
    #[case(json!({"price": -1, "billing_cycle": "monthly", "next_billing_date": "2024-02-01"}), "invalid_value")]
    #[case(json!({"price": "abc", "billing_cycle": "monthly", "next_billing_date": "2024-02-01"}), "invalid_value")]
    #[case(json!({"price": "79228162514264337593543950335", "billing_cycle": "weekly", "next_billing_date": "2024-02-01"}), "invalid_value")]
    #[case(json!({"price": 1000000000.01, "billing_cycle": "monthly", "next_billing_date": "2024-02-01"}), "invalid_value")]
    #[case(json!({"price": "0.00001", "billing_cycle": "monthly", "next_billing_date": "2024-02-01"}), "invalid_value")]
    #[case(json!({"price": true, "billing_cycle": "monthly", "next_billing_date": "2024-02-01"}), "invalid_type")]
    #[case(json!({"price": 1, "billing_cycle": "daily", "next_billing_date": "2024-02-01"}), "invalid_value")]
    #[case(json!({"price": 1, "billing_cycle": "monthly", "next_billing_date": "01/02/2024"}), "invalid_date")]
    #[case(json!({"price": 1, "billing_cycle": "monthly", "next_billing_date": "2024-02-01", "is_active": "yes"}), "invalid_type")]
    #[case(json!({"price": 1, "billing_cycle": "monthly", "next_billing_date": "2024-02-01", "id": 4}), "unknown_field")]
    #[case(json!({"price": 1, "billing_cycle": "monthly", "next_billing_date": "2024-02-01", "name": "  "}), "invalid_value")]
    fn create_rejects_invalid_bodies(#[case] raw: Value, #[case] expected_code: &str) {
        let err = parse_new_subscription(&body(raw)).expect_err("invalid body");
        assert_eq!(detail_code(&err), Some(expected_code));
    }

    #[rstest]
    fn patch_keeps_only_supplied_fields() {
        let patch = parse_subscription_patch(&body(json!({"is_active": false}))).expect("patch");
        assert_eq!(
            patch,
            SubscriptionPatch {
                is_active: Some(false),
                ..SubscriptionPatch::default()
            }
        );
    }

    #[rstest]
    #[case(json!({}), "empty_patch")]
    #[case(json!({"name": null}), "empty_patch")]
    #[case(json!({"user_id": "other", "price": 1}), "immutable_field")]
    #[case(json!({"created_at": "2024-01-01"}), "unknown_field")]
    fn patch_rejects_invalid_bodies(#[case] raw: Value, #[case] expected_code: &str) {
        let err = parse_subscription_patch(&body(raw)).expect_err("invalid patch");
        assert_eq!(detail_code(&err), Some(expected_code));
    }
}
