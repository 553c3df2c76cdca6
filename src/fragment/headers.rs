//! Header names shared by both halves of the protocol.
//!
//! Lookup is case-insensitive on the decode path, so these constants keep
//! the canonical casing used on the wire.

/// Per-part header carrying the DOM query selector.
pub const X_FRAGMENT_SELECTOR: &str = "X-Fragment-Selector";
/// Per-part header carrying the insertion policy name.
pub const X_FRAGMENT_CONTENT_POSITION: &str = "X-Fragment-ContentPosition";
/// Per-part header carrying the scheduling delay in milliseconds.
pub const X_FRAGMENT_DELAY: &str = "X-Fragment-Delay";
/// Response header carrying the canonical page URL for history tracking.
pub const X_FRAGMENT_URL: &str = "X-Fragment-Url";
/// Request header asserting fragmented capability; any value other than
/// `false` is treated as true.
pub const X_FRAGMENTED: &str = "X-Fragmented";
/// Conventional XHR indicator accepted as a legacy eligibility signal.
pub const X_REQUESTED_WITH: &str = "X-Requested-With";
/// Standard content-type header, also used per part.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Sentinel selector addressing the whole document.
pub const DOCUMENT_SELECTOR: &str = "document";
