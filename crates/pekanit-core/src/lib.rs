//! Client-side workflows for the Pekan IT queue and questionnaire system.
//!
//! This crate owns everything between the raw HTTP client (`pekanit-api`)
//! and a user-facing front end (the `pekanit` CLI):
//!
//! - **[`SessionStore`]**: injectable key/value persistence for the six
//!   session keys (`userToken`, `userId`, `userName`, `userClass`,
//!   `is_ngisi`, `nomorAntrian`). [`MemoryStore`] for tests and embedding,
//!   [`FileStore`] for a JSON file shared across processes.
//!
//! - **[`Portal`]**: facade over the workflows. Every workflow is gated
//!   behind its own loading flag so a second trigger while one is in flight
//!   fails fast instead of racing.
//!
//! - **Workflows**: [`auth`] (NIS login, landing [`Route`]), [`queue`]
//!   (idempotent queue-number acquisition with local caching),
//!   [`questionnaire`] (student/guest validation and submission), and
//!   [`report`] (response lists, client-side [`Paginator`], exports).

pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod portal;
pub mod questionnaire;
pub mod queue;
pub mod report;
pub mod session;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use auth::Route;
pub use config::{ClientConfig, TlsVerification};
pub use error::{CoreError, StoreError};
pub use gate::{LoadingGate, LoadingGuard};
pub use portal::Portal;
pub use questionnaire::{
    GuestDraft, QueueOutcome, RatingItem, RatingsDraft, StudentDraft, StudentReceipt,
};
pub use queue::{KNOWN_CLASSES, QueueState, extract_queue_number};
pub use report::{DEFAULT_PAGE_SIZE, Paginator};
pub use session::Session;
pub use store::{FileStore, MemoryStore, SessionKey, SessionStore};

// Wire types consumers need without depending on the API crate directly.
pub use pekanit_api::{
    Audience, ClassQueueEntry, Error as ApiError, GuestResponse, QueueNumber, Rating, Ratings,
    StudentResponse,
};
