//! Media tag driving client-side dispatch.

use std::fmt;

/// MIME type emitted for markup fragments.
pub const MARKUP_CONTENT_TYPE: &str = "text/html";
/// MIME type emitted for script fragments.
pub const SCRIPT_CONTENT_TYPE: &str = "text/javascript";

/// Content category of a fragment.
///
/// The mutation engine switches on this tag: markup is spliced into the
/// document, script is executed and detached, and anything else is
/// transported inert for the host to handle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MediaKind {
    /// `text/html`, applied through the insertion policy.
    Markup,
    /// `text/javascript`, executed fire-and-forget.
    Script,
    /// Any other MIME type, carried opaquely.
    Other(String),
}

impl MediaKind {
    /// Classify a `Content-Type` header value.
    #[must_use]
    pub fn from_content_type(value: &str) -> Self {
        match value {
            MARKUP_CONTENT_TYPE => MediaKind::Markup,
            SCRIPT_CONTENT_TYPE => MediaKind::Script,
            other => MediaKind::Other(other.to_owned()),
        }
    }

    /// MIME type emitted in the part's `Content-Type` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            MediaKind::Markup => MARKUP_CONTENT_TYPE,
            MediaKind::Script => SCRIPT_CONTENT_TYPE,
            MediaKind::Other(value) => value,
        }
    }

    /// Whether this is the markup type, which carries placement metadata.
    #[must_use]
    pub const fn is_markup(&self) -> bool { matches!(self, MediaKind::Markup) }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}
