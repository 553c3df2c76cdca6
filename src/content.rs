//! Shared content guards: byte-order-mark trimming and the single-source
//! rule for fragment bodies.
//!
//! These are deliberately small utilities rather than protocol machinery;
//! the composer applies them uniformly to every textual body regardless of
//! where the bytes came from.

use std::{io, path::PathBuf};

use bytes::Bytes;

use crate::error::ComposeError;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Drop a leading UTF-8 byte order mark, if present.
///
/// Bytes without a BOM pass through unchanged, and trimming twice equals
/// trimming once. The slice operation shares the underlying buffer, so no
/// copy is made either way.
#[must_use]
pub fn trim_byte_order_mark(bytes: Bytes) -> Bytes {
    if bytes.len() >= UTF8_BOM.len() && bytes[..UTF8_BOM.len()] == UTF8_BOM {
        bytes.slice(UTF8_BOM.len()..)
    } else {
        bytes
    }
}

/// Body origin for a fragment: at most one of inline bytes, raw text, or a
/// file path.
///
/// Leaving every origin unset defers body production to the composer's
/// [`ContentProducer`](crate::composer::ContentProducer). Configuring more
/// than one origin is a caller error surfaced as
/// [`ComposeError::MultipleContentSources`] when the source is resolved.
#[derive(Clone, Debug, Default)]
pub struct ContentSource {
    bytes: Option<Bytes>,
    text: Option<String>,
    file: Option<PathBuf>,
}

impl ContentSource {
    /// Source with no configured origin; resolution yields `None`.
    #[must_use]
    pub fn empty() -> Self { Self::default() }

    /// Configure an explicit byte payload.
    #[must_use]
    pub fn with_bytes(mut self, bytes: impl Into<Bytes>) -> Self {
        self.bytes = Some(bytes.into());
        self
    }

    /// Configure inline raw text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Configure a file-backed origin, read at composition time.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Whether no origin has been configured.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.configured() == 0 }

    fn configured(&self) -> usize {
        usize::from(self.bytes.is_some())
            + usize::from(self.text.is_some())
            + usize::from(self.file.is_some())
    }

    /// Resolve the configured origin into BOM-trimmed body bytes.
    ///
    /// Returns `Ok(None)` when no origin is configured, leaving the caller
    /// to fall back to its content producer.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::MultipleContentSources`] when more than one
    /// origin is configured, [`ComposeError::ContentNotFound`] when a
    /// file-backed origin does not exist, and [`ComposeError::Io`] for other
    /// read failures.
    pub async fn resolve(&self) -> Result<Option<Bytes>, ComposeError> {
        if self.configured() > 1 {
            return Err(ComposeError::MultipleContentSources);
        }
        if let Some(bytes) = &self.bytes {
            return Ok(Some(trim_byte_order_mark(bytes.clone())));
        }
        if let Some(text) = &self.text {
            let bytes = Bytes::from(text.clone().into_bytes());
            return Ok(Some(trim_byte_order_mark(bytes)));
        }
        if let Some(path) = &self.file {
            let data = tokio::fs::read(path).await.map_err(|err| {
                if err.kind() == io::ErrorKind::NotFound {
                    ComposeError::ContentNotFound {
                        what: path.display().to_string(),
                    }
                } else {
                    ComposeError::Io(err)
                }
            })?;
            return Ok(Some(trim_byte_order_mark(Bytes::from(data))));
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::{ContentSource, trim_byte_order_mark};
    use crate::error::ComposeError;

    #[test]
    fn bom_is_trimmed_once_and_trimming_is_idempotent() {
        let body = Bytes::from_static(b"\xEF\xBB\xBFhello");
        let trimmed = trim_byte_order_mark(body);
        assert_eq!(trimmed.as_ref(), b"hello");
        assert_eq!(trim_byte_order_mark(trimmed).as_ref(), b"hello");
    }

    #[test]
    fn bytes_without_bom_pass_through_unchanged() {
        let body = Bytes::from_static(b"plain");
        assert_eq!(trim_byte_order_mark(body).as_ref(), b"plain");
    }

    #[test]
    fn partial_bom_prefix_is_preserved() {
        let body = Bytes::from_static(b"\xEF\xBBx");
        assert_eq!(trim_byte_order_mark(body).as_ref(), b"\xEF\xBBx");
    }

    #[test]
    fn short_input_is_preserved() {
        let body = Bytes::from_static(b"\xEF");
        assert_eq!(trim_byte_order_mark(body).as_ref(), b"\xEF");
    }

    #[tokio::test]
    async fn empty_source_resolves_to_none() {
        let resolved = ContentSource::empty().resolve().await.expect("resolve");
        assert!(resolved.is_none());
    }

    #[tokio::test]
    async fn text_source_is_bom_trimmed() {
        let source = ContentSource::empty().with_text("\u{FEFF}<p>x</p>");
        let resolved = source.resolve().await.expect("resolve");
        assert_eq!(resolved.expect("body").as_ref(), b"<p>x</p>");
    }

    #[tokio::test]
    async fn two_origins_fail_with_multiple_content_sources() {
        let source = ContentSource::empty()
            .with_text("inline")
            .with_bytes(Bytes::from_static(b"raw"));
        let err = source.resolve().await.expect_err("must reject");
        assert!(matches!(err, ComposeError::MultipleContentSources));
    }

    #[tokio::test]
    async fn missing_file_reports_content_not_found() {
        let source = ContentSource::empty().with_file("definitely/not/here.html");
        let err = source.resolve().await.expect_err("must reject");
        match err {
            ComposeError::ContentNotFound { what } => {
                assert!(what.contains("not/here.html"));
            }
            other => panic!("expected ContentNotFound, got {other:?}"),
        }
    }
}
