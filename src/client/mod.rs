//! Client-side decoding, scheduling, and application of fragments.
//!
//! The client half mirrors the composer: it decodes the multipart body
//! back into parts, schedules each fragment by its declared delay, and
//! applies it to the document through the [`Document`] seam. Hosts supply
//! the document, the HTTP client, and any observability callbacks; the
//! library owns the ordering and placement rules.

pub mod config;
pub mod dom;
pub mod engine;
pub mod hooks;
pub mod scheduler;
pub mod transport;

pub use config::ClientConfig;
pub use dom::{Document, NodeId};
pub use engine::{DecodedFragment, MutationEngine};
pub use hooks::FragmentHooks;
pub use scheduler::FragmentScheduler;
pub use transport::{FragmentTransport, HttpClient, HttpResponse};
