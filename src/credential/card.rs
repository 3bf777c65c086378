//! Card model as returned inside a cardholder document.
//!
//! Every field is optional: visibility depends on operator privileges, and an
//! invitation's href disappears once it has been accepted or has expired.

use serde::{Deserialize, Serialize};

/// A link to another resource
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardStatus {
    pub value: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Invitation attached to a mobile credential
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    /// e.g. "sent", "accepted", "expired"
    pub status: Option<String>,
    /// Identifier assigned by the cloud once the invitation is live
    pub href: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub single_factor_only: Option<bool>,
}

/// Invitation status of a freshly issued credential
pub const INVITATION_SENT: &str = "sent";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub href: Option<String>,
    /// Free text; usable as a correlation token
    pub number: Option<String>,
    pub issue_level: Option<u32>,
    pub status: Option<CardStatus>,
    #[serde(rename = "type")]
    pub card_type: Option<Link>,
    pub invitation: Option<Invitation>,
    pub from: Option<String>,
    pub until: Option<String>,
    pub credential_class: Option<String>,
}

impl Card {
    pub fn type_href(&self) -> Option<&str> {
        self.card_type.as_ref().and_then(|t| t.href.as_deref())
    }

    pub fn invitation_status(&self) -> Option<&str> {
        self.invitation.as_ref().and_then(|i| i.status.as_deref())
    }

    /// Invitation href, treating an empty string as absent
    pub fn invitation_href(&self) -> Option<&str> {
        self.invitation
            .as_ref()
            .and_then(|i| i.href.as_deref())
            .filter(|href| !href.is_empty())
    }

    /// Only mobile credentials carry an invitation
    pub fn is_mobile_credential(&self) -> bool {
        self.invitation.is_some()
    }
}

/// Mobile credentials among `cards`
pub fn mobile_credentials(cards: &[Card]) -> Vec<&Card> {
    cards.iter().filter(|c| c.is_mobile_credential()).collect()
}
