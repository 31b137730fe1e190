//! Application layer coordinating the page's flows.
//!
//! This module sits between the host page and the domain/http/storage layers. The
//! host forwards DOM events; the handler routes them to the flow that owns them and
//! returns the side effects it cannot perform itself.
//!
//! # Architecture
//!
//! ```text
//! DOM event → Event → App::handle_event → flow ─→ SubmissionController → HttpJsonClient
//!                                           │                 ↓
//!                                           └──── render ← ResponseEnvelope
//!                                                    ↓
//!                                                Vec<Action> → host
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effects returned to the host
//! - [`confirmation`]: Receipt list on the confirmation page
//! - [`csrf`]: CSRF token population
//! - [`handler`]: Event type and dispatcher
//! - [`pagination`]: Cursor-based review feed
//! - [`review`]: Review submission and word counter
//! - [`search`]: Book search and provider switching
//! - [`state`]: The [`App`] container
//! - [`submission`]: Shared submit pipeline, loading guard and request sequencing
//! - [`view`]: Search ↔ review view state machine

pub mod actions;
pub mod confirmation;
pub mod csrf;
pub mod handler;
pub mod pagination;
pub mod review;
pub mod search;
pub mod state;
pub mod submission;
pub mod view;

pub use actions::Action;
pub use confirmation::{clear_submissions, render_submissions};
pub use csrf::populate_csrf_tokens;
pub use handler::Event;
pub use pagination::{toggle_review_expansion, FeedRegions, PaginationController};
pub use review::{review_counter_text, ReviewFlow};
pub use search::{change_provider, SearchFlow, SearchSource};
pub use state::App;
pub use submission::{LoadingGuard, RequestSequencer, Submission, SubmissionController, Ticket};
pub use view::{ViewLayout, ViewState, ViewStateMachine, ViewTransitionRecord};
