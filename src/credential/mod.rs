//! Mobile credential issuance on top of the polling core.
//!
//! Adding a mobile credential is a PATCH on the cardholder that returns 204
//! immediately. The invitation href only appears once the access-control
//! server has heard back from the cloud, so issuance is awaited by polling
//! the cardholder for a matching card.

pub mod card;
pub mod predicate;
pub mod request;

use std::sync::Arc;

use log::info;

use crate::client::{HttpFetcher, RestClient};
use crate::error::Result;
use crate::poll::{CancelSignal, Fetcher, IssuedOperation, PollPolicy, Poller, await_completion, report};
use crate::trigger::{Trigger, TriggerRequest};

pub use card::{Card, CardStatus, INVITATION_SENT, Invitation, Link, mobile_credentials};
pub use predicate::{IssuedMobileCredential, issued_mobile_credential};
pub use request::AddCardRequest;

/// Issue, watch, list and revoke mobile credentials for cardholders
pub struct CredentialService {
    client: Arc<RestClient>,
    poller: Poller<HttpFetcher<Card>>,
}

impl CredentialService {
    pub fn new(client: Arc<RestClient>, items_pointer: &str, policy: PollPolicy) -> Self {
        let fetcher = Arc::new(HttpFetcher::with_pointer(Arc::clone(&client), items_pointer));
        Self {
            client,
            poller: Poller::with_policy(fetcher, policy),
        }
    }

    pub fn policy(&self) -> PollPolicy {
        self.poller.policy()
    }

    /// Add a mobile credential and wait for its invitation href
    pub async fn issue(
        &self,
        cardholder_href: &str,
        request: &AddCardRequest,
        cancel: &CancelSignal,
    ) -> Result<IssuedOperation<Card>> {
        let predicate = issued_mobile_credential(request.card_type_href.clone(), request.number.clone());
        let trigger = request.to_trigger(cardholder_href);
        await_completion(self.client.as_ref(), &self.poller, &trigger, &predicate, cancel).await
    }

    /// Wait for an already-requested credential to be issued
    pub async fn watch(&self, cardholder_href: &str, predicate: &IssuedMobileCredential, cancel: &CancelSignal) -> Result<Card> {
        let session = self.poller.run(cardholder_href, predicate, cancel).await;
        report(session).map(|done| done.item)
    }

    /// All mobile credentials currently on the cardholder
    pub async fn list(&self, cardholder_href: &str) -> Result<Vec<Card>> {
        let snapshot = self.poller.fetcher().fetch(cardholder_href).await?;
        Ok(snapshot.items.into_iter().filter(Card::is_mobile_credential).collect())
    }

    /// Delete a credential by its card href
    pub async fn revoke(&self, card_href: &str) -> Result<()> {
        let operation = self.client.submit(&TriggerRequest::delete(card_href)).await?;
        info!("Revoked credential {} ({})", card_href, operation.id);
        Ok(())
    }
}
