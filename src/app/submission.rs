//! The submit → loading → fetch → dispatch pipeline shared by every form.
//!
//! [`SubmissionController::submit`] performs one form submission end to end and hands
//! the envelope back to the calling flow, tagged with a [`Ticket`] from that flow's
//! [`RequestSequencer`]. The flow decides whether the response is still current with
//! [`RequestSequencer::admit`] before touching the page.
//!
//! # Sequence
//!
//! 1. A [`LoadingGuard`] shows the loading indicator, if one was given
//! 2. The form's native navigation is suppressed
//! 3. The form's named fields are serialized
//! 4. The payload is posted through [`HttpJsonClient::post`]
//! 5. The guard is dropped on every exit path, hiding the indicator again

use crate::dom::{Dom, NodeId, SubmitEvent};
use crate::domain::ResponseEnvelope;
use crate::http::HttpJsonClient;
use serde::de::DeserializeOwned;
use std::cell::Cell;
use tracing::Instrument;

/// Sequence number of one submission within a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    pub const fn sequence(self) -> u64 {
        self.0
    }
}

/// Orders the submissions of one flow so late responses cannot overwrite newer ones.
///
/// Tickets are issued in increasing order when a request starts. A response is
/// admitted only if its ticket is newer than every ticket admitted before it.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: Cell<u64>,
    applied: Cell<u64>,
}

impl RequestSequencer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next ticket.
    pub fn issue(&self) -> Ticket {
        let next = self.issued.get() + 1;
        self.issued.set(next);
        Ticket(next)
    }

    /// Returns whether a response carrying `ticket` may be applied, and records it as
    /// the newest applied response if so.
    pub fn admit(&self, ticket: Ticket) -> bool {
        if ticket.0 <= self.applied.get() {
            tracing::debug!(
                ticket = ticket.0,
                applied = self.applied.get(),
                "discarding stale response"
            );
            return false;
        }
        self.applied.set(ticket.0);
        true
    }
}

/// Shows a loading indicator for as long as it is alive.
///
/// Dropping the guard hides the indicator, whether the submission returned normally,
/// bailed out early or unwound.
#[derive(Debug)]
#[must_use = "the indicator is hidden as soon as the guard is dropped"]
pub struct LoadingGuard {
    dom: Dom,
    indicator: Option<NodeId>,
}

impl LoadingGuard {
    pub fn acquire(dom: &Dom, indicator: Option<NodeId>) -> Self {
        if let Some(id) = indicator {
            dom.write(|doc| doc.show(id));
        }
        Self {
            dom: dom.clone(),
            indicator,
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let Some(id) = self.indicator else {
            return;
        };
        if self.dom.try_write(|doc| doc.hide(id)).is_none() {
            tracing::warn!("document busy, loading indicator left visible");
        }
    }
}

/// Result of one submission: the envelope and the ticket it was issued under.
#[derive(Debug, Clone)]
pub struct Submission<T> {
    pub ticket: Ticket,
    pub envelope: ResponseEnvelope<T>,
}

/// Runs form submissions against the page's document.
#[derive(Debug, Clone)]
pub struct SubmissionController {
    dom: Dom,
    client: HttpJsonClient,
}

impl SubmissionController {
    #[must_use]
    pub fn new(dom: Dom, client: HttpJsonClient) -> Self {
        Self { dom, client }
    }

    #[must_use]
    pub const fn dom(&self) -> &Dom {
        &self.dom
    }

    #[must_use]
    pub const fn client(&self) -> &HttpJsonClient {
        &self.client
    }

    /// Submits the event's form to `url` and returns the decoded envelope.
    ///
    /// Never fails: every error is already folded into the envelope by the client.
    /// Concurrent submissions of the same form are not de-duplicated; the ticket lets
    /// the caller drop whichever response arrives out of order.
    pub async fn submit<T: DeserializeOwned>(
        &self,
        event: &mut SubmitEvent,
        url: &str,
        loader: Option<NodeId>,
        sequencer: &RequestSequencer,
    ) -> Submission<T> {
        let ticket = sequencer.issue();
        let span = tracing::debug_span!("submit", url = %url, ticket = ticket.0);

        async {
            let _loading = LoadingGuard::acquire(&self.dom, loader);
            event.prevent_default();
            let payload = self.dom.read(|doc| doc.form_payload(event.form()));
            tracing::debug!(fields = payload.len(), "form serialized");

            let envelope = self.client.post::<T>(url, &payload).await;
            tracing::debug!(success = envelope.is_success(), "submission finished");

            Submission { ticket, envelope }
        }
        .instrument(span)
        .await
    }
}
