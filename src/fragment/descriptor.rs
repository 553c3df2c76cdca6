//! The descriptor callers hand to the composer, one per fragment.

use std::{path::PathBuf, time::Duration};

use bytes::Bytes;

use super::{ContentPosition, MediaKind};
use crate::content::ContentSource;

/// One unit of content plus its placement metadata.
///
/// Descriptors are created by the caller, consumed once by the composer in
/// list order, and never mutated after creation. Placement fields are all
/// optional; a missing header on the wire means the documented default, not
/// absence of metadata.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use domwire::fragment::{ContentPosition, FragmentDescriptor};
///
/// let fragment = FragmentDescriptor::markup()
///     .with_selector(".sidebar")
///     .with_position(ContentPosition::ReplaceContent)
///     .with_delay(Duration::from_millis(500))
///     .with_text("<ul>…</ul>");
/// assert_eq!(fragment.content_type(), "text/html");
/// ```
#[derive(Clone, Debug)]
pub struct FragmentDescriptor {
    media: MediaKind,
    selector: Option<String>,
    position: Option<ContentPosition>,
    delay: Option<Duration>,
    source: ContentSource,
}

impl FragmentDescriptor {
    fn new(media: MediaKind) -> Self {
        Self {
            media,
            selector: None,
            position: None,
            delay: None,
            source: ContentSource::empty(),
        }
    }

    /// Markup fragment (`text/html`), spliced per the insertion policy.
    #[must_use]
    pub fn markup() -> Self { Self::new(MediaKind::Markup) }

    /// Script fragment (`text/javascript`), executed fire-and-forget.
    #[must_use]
    pub fn script() -> Self { Self::new(MediaKind::Script) }

    /// Fragment of an arbitrary MIME type, transported inert.
    #[must_use]
    pub fn opaque(content_type: impl Into<String>) -> Self {
        Self::new(MediaKind::Other(content_type.into()))
    }

    /// Target the elements matched by `selector`; absent means the whole
    /// document.
    #[must_use]
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Set the insertion policy; absent defaults to
    /// [`ContentPosition::ReplaceElement`] at apply time.
    #[must_use]
    pub fn with_position(mut self, position: ContentPosition) -> Self {
        self.position = Some(position);
        self
    }

    /// Delay application relative to the moment the response finished
    /// arriving.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Supply the body as inline raw text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.source = self.source.with_text(text);
        self
    }

    /// Supply the body as an explicit byte payload.
    #[must_use]
    pub fn with_bytes(mut self, bytes: impl Into<Bytes>) -> Self {
        self.source = self.source.with_bytes(bytes);
        self
    }

    /// Supply the body from a file, read at composition time.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = self.source.with_file(path);
        self
    }

    /// The media tag of this fragment.
    #[must_use]
    pub const fn media(&self) -> &MediaKind { &self.media }

    /// MIME type emitted in the part's `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> &str { self.media.as_str() }

    /// The target selector, if any.
    #[must_use]
    pub fn selector(&self) -> Option<&str> { self.selector.as_deref() }

    /// The declared insertion policy, if any.
    #[must_use]
    pub const fn position(&self) -> Option<ContentPosition> { self.position }

    /// The declared scheduling delay, if any.
    #[must_use]
    pub const fn delay(&self) -> Option<Duration> { self.delay }

    /// The configured body origin.
    #[must_use]
    pub const fn source(&self) -> &ContentSource { &self.source }
}
