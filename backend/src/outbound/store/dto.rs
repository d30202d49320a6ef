//! Wire DTOs for the hosted store's identity and table endpoints.
//!
//! Requests are serialised from these types and responses decoded into them
//! before mapping onto domain records, keeping wire naming out of the domain.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    AuthenticatedUser, Credentials, NewSubscription, SubscriptionPatch, UserId,
};

#[derive(Debug, Serialize)]
pub(super) struct PasswordGrantDto<'a> {
    pub(super) email: &'a str,
    pub(super) password: &'a str,
}

impl<'a> From<&'a Credentials> for PasswordGrantDto<'a> {
    fn from(value: &'a Credentials) -> Self {
        Self {
            email: value.email(),
            password: value.password(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthUserDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SignInResponseDto {
    pub(super) user: AuthUserDto,
}

impl SignInResponseDto {
    /// Map onto the domain user, falling back to the submitted email.
    pub(super) fn into_domain(self, submitted_email: &str) -> Result<AuthenticatedUser, String> {
        let id = UserId::new(self.user.id).map_err(|err| err.to_string())?;
        let email = self
            .user
            .email
            .filter(|email| !email.is_empty())
            .unwrap_or_else(|| submitted_email.to_owned());
        Ok(AuthenticatedUser::new(id, email))
    }
}

/// Error body shapes used by the identity and table services.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ProviderErrorDto {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ProviderErrorDto {
    /// Most specific human-readable message present in the body.
    pub(super) fn into_message(self) -> Option<String> {
        [self.error_description, self.msg, self.message, self.error]
            .into_iter()
            .flatten()
            .map(|message| message.trim().to_owned())
            .find(|message| !message.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub(super) struct InsertRowDto<'a> {
    pub(super) user_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) name: Option<&'a str>,
    pub(super) price: Decimal,
    pub(super) billing_cycle: &'a str,
    pub(super) next_billing_date: NaiveDate,
    pub(super) is_active: bool,
}

impl<'a> InsertRowDto<'a> {
    pub(super) fn new(owner: &'a UserId, subscription: &'a NewSubscription) -> Self {
        Self {
            user_id: owner.as_ref(),
            name: subscription.name.as_deref(),
            price: subscription.price,
            billing_cycle: subscription.billing_cycle.as_str(),
            next_billing_date: subscription.next_billing_date,
            is_active: subscription.is_active,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct PatchRowDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) billing_cycle: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) next_billing_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) is_active: Option<bool>,
}

impl<'a> From<&'a SubscriptionPatch> for PatchRowDto<'a> {
    fn from(value: &'a SubscriptionPatch) -> Self {
        Self {
            name: value.name.as_deref(),
            price: value.price,
            billing_cycle: value.billing_cycle.as_ref().map(|cycle| cycle.as_str()),
            next_billing_date: value.next_billing_date,
            is_active: value.is_active,
        }
    }
}
