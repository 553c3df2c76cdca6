#![doc(html_root_url = "https://docs.rs/domwire/latest")]
//! Public API for the `domwire` library.
//!
//! This crate implements a fragment wire protocol: one HTTP exchange carries
//! several independently addressed pieces of markup or script, each tagged
//! with where in the page it belongs, how it is spliced in, and when. The
//! server half validates, orders, and packs fragment descriptors into a
//! multipart response; the client half decodes that response, schedules each
//! fragment by its declared delay, and applies it to the live document.
//!
//! Content rendering, request routing, and real DOM bindings stay outside
//! this crate: the composer consumes opaque bytes per fragment, and the
//! mutation engine drives a host-implemented [`client::Document`] seam.

pub mod client;
pub mod composer;
pub mod content;
pub mod envelope;
pub mod error;
pub mod fragment;
#[cfg(feature = "metrics")]
pub mod metrics;

pub use client::{
    ClientConfig,
    DecodedFragment,
    Document,
    FragmentHooks,
    FragmentScheduler,
    FragmentTransport,
    HttpClient,
    HttpResponse,
    MutationEngine,
    NodeId,
};
pub use composer::{
    ComposedResponse,
    ContentProducer,
    FragmentComposer,
    NoExternalContent,
    is_fragment_capable,
};
pub use content::{ContentSource, trim_byte_order_mark};
pub use envelope::{BoundaryToken, Envelope, Headers, Part};
pub use error::{ClientError, ComposeError};
pub use fragment::{ContentPosition, FragmentDescriptor, MediaKind};
