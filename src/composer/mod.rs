//! Server-side composition of fragmented responses.
//!
//! [`FragmentComposer`] turns an ordered list of
//! [`FragmentDescriptor`] values into one multipart response. It validates
//! the request's capability signal up front, packs parts strictly in list
//! order, and never begins a later part until the current part's bytes are
//! complete, so envelope order is an invariant independent of producer
//! latency. Composers hold no state shared across requests; boundary
//! tokens are per call.

pub mod request;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::{
    content::trim_byte_order_mark,
    envelope::{Envelope, Headers, Part},
    error::ComposeError,
    fragment::{
        ContentPosition,
        FragmentDescriptor,
        headers::{
            CONTENT_TYPE,
            X_FRAGMENT_CONTENT_POSITION,
            X_FRAGMENT_DELAY,
            X_FRAGMENT_SELECTOR,
            X_FRAGMENT_URL,
        },
    },
};

pub use request::{is_fragment_capable, request_url};

/// External seam producing body bytes for descriptors that carry no inline
/// source — typically a template renderer.
#[async_trait]
pub trait ContentProducer: Send + Sync {
    /// Produce the body bytes for `descriptor`.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::ContentNotFound`] when the producer cannot
    /// resolve a source for the descriptor.
    async fn produce(&self, descriptor: &FragmentDescriptor) -> Result<Bytes, ComposeError>;
}

/// Producer for responses whose descriptors all carry inline sources.
///
/// Reaching it means a descriptor had no configured origin, which is a
/// caller error surfaced as [`ComposeError::ContentNotFound`].
#[derive(Clone, Copy, Debug, Default)]
pub struct NoExternalContent;

#[async_trait]
impl ContentProducer for NoExternalContent {
    async fn produce(&self, descriptor: &FragmentDescriptor) -> Result<Bytes, ComposeError> {
        Err(ComposeError::ContentNotFound {
            what: format!(
                "{} fragment without a configured content source",
                descriptor.content_type()
            ),
        })
    }
}

/// Builds one multipart response from an ordered fragment list.
#[derive(Clone, Debug, Default)]
pub struct FragmentComposer {
    page_url: Option<String>,
}

impl FragmentComposer {
    /// Composer for a plain fragmented response.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Mark the response as a full-page navigation: the canonical absolute
    /// URL is emitted as `X-Fragment-Url` so the client can update browser
    /// history without guessing. Fragments are still delivered through the
    /// normal envelope; the header is purely a history signal.
    #[must_use]
    pub fn with_page_url(mut self, url: impl Into<String>) -> Self {
        self.page_url = Some(url.into());
        self
    }

    /// Validate eligibility, then pack `fragments` into one envelope.
    ///
    /// Bodiless positions emit their headers with a zero-length body and
    /// never touch the source or producer. Every other part resolves its
    /// inline source first and falls back to `producer` when none is
    /// configured. All errors surface before any response bytes exist, so
    /// the caller can still produce a normal error response.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::IneligibleRequest`] when `request_headers`
    /// carries no capability signal, and propagates
    /// [`ComposeError::MultipleContentSources`],
    /// [`ComposeError::ContentNotFound`], or [`ComposeError::Io`] from
    /// source resolution.
    pub async fn compose<P: ContentProducer>(
        &self,
        request_headers: &Headers,
        fragments: &[FragmentDescriptor],
        producer: &P,
    ) -> Result<ComposedResponse, ComposeError> {
        if !is_fragment_capable(request_headers) {
            return Err(ComposeError::IneligibleRequest);
        }

        let mut envelope = Envelope::new();
        for descriptor in fragments {
            let part = build_part(descriptor, producer).await?;
            envelope.push(part);
        }

        #[cfg(feature = "metrics")]
        crate::metrics::inc_envelopes_composed();
        tracing::debug!(
            fragments = fragments.len(),
            boundary = envelope.boundary().as_str(),
            "composed fragment envelope"
        );

        Ok(ComposedResponse {
            content_type: envelope.content_type(),
            page_url: self.page_url.clone(),
            body: envelope.encode(),
        })
    }
}

async fn build_part<P: ContentProducer>(
    descriptor: &FragmentDescriptor,
    producer: &P,
) -> Result<Part, ComposeError> {
    let mut headers = Headers::new();
    headers.insert(CONTENT_TYPE, descriptor.content_type());

    // Placement metadata travels only on markup parts, and only when set;
    // the client treats missing headers as the documented defaults.
    if descriptor.media().is_markup() {
        if let Some(selector) = descriptor.selector() {
            headers.insert(X_FRAGMENT_SELECTOR, selector);
        }
        if let Some(position) = descriptor.position() {
            headers.insert(X_FRAGMENT_CONTENT_POSITION, position.as_str());
        }
        if let Some(delay) = descriptor.delay() {
            headers.insert(X_FRAGMENT_DELAY, delay.as_millis().to_string());
        }
    }

    if descriptor.position().is_some_and(ContentPosition::is_bodiless) {
        return Ok(Part::new(headers, Bytes::new()));
    }

    let body = match descriptor.source().resolve().await? {
        Some(bytes) => bytes,
        None => trim_byte_order_mark(producer.produce(descriptor).await?),
    };
    Ok(Part::new(headers, body))
}

/// Fully composed response, ready for the framework adapter to emit.
#[derive(Clone, Debug)]
pub struct ComposedResponse {
    content_type: String,
    page_url: Option<String>,
    body: Bytes,
}

impl ComposedResponse {
    /// Outer content type, `multipart/byteranges` with the boundary
    /// parameter.
    #[must_use]
    pub fn content_type(&self) -> &str { &self.content_type }

    /// Canonical page URL for history tracking, when this response also
    /// represents a navigation.
    #[must_use]
    pub fn page_url(&self) -> Option<&str> { self.page_url.as_deref() }

    /// The encoded multipart body.
    #[must_use]
    pub const fn body(&self) -> &Bytes { &self.body }

    /// Response headers the adapter must emit alongside the body.
    #[must_use]
    pub fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert(CONTENT_TYPE, &self.content_type);
        if let Some(url) = &self.page_url {
            headers.insert(X_FRAGMENT_URL, url);
        }
        headers
    }

    /// Copy the body into the response sink.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Io`] when the sink rejects the write.
    pub async fn write_to<W: AsyncWrite + Unpin>(&self, sink: &mut W) -> Result<(), ComposeError> {
        sink.write_all(&self.body).await?;
        sink.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;
