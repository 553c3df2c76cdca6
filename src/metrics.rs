//! Metric helpers for `domwire`.
//!
//! This module defines metric names and simple helper functions
//! wrapping the [`metrics`](https://docs.rs/metrics) crate.

use metrics::counter;

/// Name of the counter tracking composed envelopes.
pub const ENVELOPES_COMPOSED: &str = "domwire_envelopes_composed_total";
/// Name of the counter tracking decoded envelopes.
pub const ENVELOPES_DECODED: &str = "domwire_envelopes_decoded_total";
/// Name of the counter tracking applied fragments.
pub const FRAGMENTS_APPLIED: &str = "domwire_fragments_applied_total";
/// Name of the counter tracking error occurrences.
pub const ERRORS_TOTAL: &str = "domwire_errors_total";

/// Record a composed envelope.
pub fn inc_envelopes_composed() { counter!(ENVELOPES_COMPOSED).increment(1); }

/// Record a decoded envelope.
pub fn inc_envelopes_decoded() { counter!(ENVELOPES_DECODED).increment(1); }

/// Record a fragment applied to the document.
pub fn inc_fragments_applied() { counter!(FRAGMENTS_APPLIED).increment(1); }

/// Record an error occurrence.
pub fn inc_errors() { counter!(ERRORS_TOTAL).increment(1); }
