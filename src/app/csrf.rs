//! CSRF token population.

use crate::dom::Dom;
use crate::domain::CsrfToken;
use crate::http::HttpJsonClient;
use tracing::Instrument;

/// Class of the hidden inputs that carry the CSRF token.
pub const CSRF_FIELD: &str = "csrf-token";

/// Fetches a CSRF token once and writes it into every `.csrf-token` field.
///
/// Returns the number of fields written. Best-effort: when the page has no such
/// field nothing is fetched, and a failed fetch leaves the fields untouched.
pub async fn populate_csrf_tokens(dom: &Dom, client: &HttpJsonClient, url: &str) -> usize {
    let span = tracing::debug_span!("populate_csrf_tokens", url = %url);
    async {
        let fields = dom.read(|doc| doc.query_all_class(doc.body(), CSRF_FIELD));
        if fields.is_empty() {
            tracing::debug!("no csrf fields on page");
            return 0;
        }

        let envelope = client.get::<CsrfToken>(url).await;
        let Some(token) = envelope.into_data().map(|t| t.csrf_token) else {
            tracing::warn!("csrf token unavailable, fields left empty");
            return 0;
        };

        dom.write(|doc| {
            for &field in &fields {
                doc.set_value(field, &token);
            }
        });
        tracing::debug!(count = fields.len(), "csrf fields populated");
        fields.len()
    }
    .instrument(span)
    .await
}
