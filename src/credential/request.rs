//! Add-card request builder.
//!
//! Produces the cardholder PATCH body that adds one card:
//! `{"cards": {"add": [{"type": {"href": ...}, "number"?, "invitation"?}]}}`.
//! The invitation object is only sent when at least one of its fields is set.

use serde_json::{Map, Value, json};

use crate::id::generate_correlation_token;
use crate::trigger::TriggerRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddCardRequest {
    pub card_type_href: String,
    pub number: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub single_factor_only: bool,
}

impl AddCardRequest {
    pub fn new(card_type_href: impl Into<String>) -> Self {
        Self {
            card_type_href: card_type_href.into(),
            ..Default::default()
        }
    }

    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile = Some(mobile.into());
        self
    }

    /// Fill in a generated card number when none was given, so the issued
    /// card can be told apart from others of the same type
    pub fn correlated(mut self) -> Self {
        if self.number.is_none() {
            self.number = Some(generate_correlation_token());
        }
        self
    }

    pub fn single_factor_only(mut self, on: bool) -> Self {
        self.single_factor_only = on;
        self
    }

    fn invitation(&self) -> Option<Value> {
        let mut invitation = Map::new();
        if let Some(email) = &self.email {
            invitation.insert("email".into(), json!(email));
        }
        if let Some(mobile) = &self.mobile {
            invitation.insert("mobile".into(), json!(mobile));
        }
        if self.single_factor_only {
            invitation.insert("singleFactorOnly".into(), json!(true));
        }
        (!invitation.is_empty()).then_some(Value::Object(invitation))
    }

    /// PATCH body for the cardholder
    pub fn to_body(&self) -> Value {
        let mut card = Map::new();
        card.insert("type".into(), json!({ "href": self.card_type_href }));
        if let Some(number) = &self.number {
            card.insert("number".into(), json!(number));
        }
        if let Some(invitation) = self.invitation() {
            card.insert("invitation".into(), invitation);
        }
        json!({ "cards": { "add": [Value::Object(card)] } })
    }

    /// Trigger request that PATCHes `cardholder_href`
    pub fn to_trigger(&self, cardholder_href: impl Into<String>) -> TriggerRequest {
        let request = TriggerRequest::patch(cardholder_href, self.to_body());
        match &self.number {
            Some(number) => request.with_correlation(number.clone()),
            None => request,
        }
    }
}
