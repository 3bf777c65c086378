//! Predicate recognising a newly issued mobile credential.

use super::card::{Card, INVITATION_SENT};
use crate::poll::Predicate;

/// Matches a card of the given type whose invitation has been sent and has
/// received its cloud href. With a `number`, only that card matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedMobileCredential {
    card_type_href: String,
    number: Option<String>,
}

impl Predicate<Card> for IssuedMobileCredential {
    fn matches(&self, card: &Card) -> bool {
        card.type_href() == Some(self.card_type_href.as_str())
            && card.invitation_status() == Some(INVITATION_SENT)
            && card.invitation_href().is_some()
            && self
                .number
                .as_deref()
                .is_none_or(|number| card.number.as_deref() == Some(number))
    }
}

pub fn issued_mobile_credential(card_type_href: impl Into<String>, number: Option<String>) -> IssuedMobileCredential {
    IssuedMobileCredential {
        card_type_href: card_type_href.into(),
        number,
    }
}
