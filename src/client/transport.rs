//! Request plumbing between navigation events and the scheduler.
//!
//! [`FragmentTransport`] owns the whole client cycle: tag the request,
//! classify the response, decode the envelope, update history, and hand
//! the batch to the scheduler. Transport faults and unexpected media are
//! non-fatal and surface through the hooks; only a malformed envelope
//! aborts the batch.

use async_trait::async_trait;
use bytes::Bytes;

use crate::{
    client::{
        config::ClientConfig,
        dom::Document,
        engine::DecodedFragment,
        hooks::FragmentHooks,
        scheduler::FragmentScheduler,
    },
    envelope::{Envelope, Headers, MULTIPART_CONTENT_TYPE, parse_outer_content_type},
    error::ClientError,
    fragment::headers::{CONTENT_TYPE, X_FRAGMENT_URL, X_FRAGMENTED, X_REQUESTED_WITH},
};

/// Minimal response shape the transport needs from its HTTP client.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: Headers,
    /// Raw response body.
    pub body: Bytes,
}

/// Seam to the host's HTTP machinery.
#[async_trait]
pub trait HttpClient: Send {
    /// Issue a GET request for `url` with the given headers.
    ///
    /// # Errors
    ///
    /// Returns the host's transport error when the request could not
    /// complete. Non-success statuses are not errors; they come back as
    /// an [`HttpResponse`].
    async fn get(&mut self, url: &str, headers: &Headers) -> std::io::Result<HttpResponse>;
}

/// Drives fragment requests end to end for one host client.
#[derive(Debug)]
pub struct FragmentTransport<C: HttpClient> {
    client: C,
    config: ClientConfig,
    hooks: FragmentHooks,
    scheduler: FragmentScheduler,
}

impl<C: HttpClient> FragmentTransport<C> {
    /// Transport over `client` with default configuration and no hooks.
    pub fn new(client: C) -> Self {
        Self {
            client,
            config: ClientConfig::default(),
            hooks: FragmentHooks::default(),
            scheduler: FragmentScheduler::new(),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Install host callbacks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: FragmentHooks) -> Self {
        self.hooks = hooks;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ClientConfig { &self.config }

    /// Mutable access to the installed hooks.
    pub fn hooks_mut(&mut self) -> &mut FragmentHooks { &mut self.hooks }

    /// Fetch `url` and apply the resulting fragments to `document`.
    ///
    /// `add_history` controls whether a successful fragmented response
    /// that carries an `X-Fragment-Url` header advances browser history.
    /// Transport failures and non-fragment media are reported through the
    /// hooks and do not fault the caller.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MalformedEnvelope`] when the response
    /// declared a multipart body that does not decode; nothing from the
    /// batch is applied in that case.
    pub async fn handle_intercepted_navigation<D: Document>(
        &mut self,
        document: &mut D,
        url: &str,
        add_history: bool,
    ) -> Result<(), ClientError> {
        self.hooks.before_request(url);

        let mut request_headers = Headers::new();
        request_headers.insert(X_FRAGMENTED, "true");
        request_headers.insert(X_REQUESTED_WITH, "XMLHttpRequest");

        let response = match self.client.get(url, &request_headers).await {
            Ok(response) => response,
            Err(error) => {
                self.hooks.error(&format!("transport failure for {url}: {error}"));
                self.hooks.after_request(url, false);
                return Ok(());
            }
        };

        // A non-success status means the server rendered a full page; the
        // document is swapped wholesale and no fragments are involved.
        if response.status != 200 {
            document.replace_document(&String::from_utf8_lossy(&response.body));
            self.hooks.after_request(url, false);
            return Ok(());
        }

        let content_type = response.headers.get(CONTENT_TYPE).unwrap_or_default();
        let (media, boundary) = parse_outer_content_type(content_type);
        let (Some(boundary), true) = (boundary, media == MULTIPART_CONTENT_TYPE) else {
            self.hooks.error(&format!(
                "expected a fragmented response from {url}, got '{media}'"
            ));
            return Ok(());
        };

        let parts = match Envelope::decode(&boundary, &response.body) {
            Ok(parts) => parts,
            Err(error) => {
                self.hooks.error(&error.to_string());
                return Err(error);
            }
        };
        #[cfg(feature = "metrics")]
        crate::metrics::inc_envelopes_decoded();
        tracing::debug!(parts = parts.len(), url, "decoded fragmented response");

        if add_history {
            if let Some(canonical) = response.headers.get(X_FRAGMENT_URL) {
                self.hooks.history(canonical);
            }
        }

        let fragments = parts.iter().map(DecodedFragment::from_part).collect();
        self.scheduler.run(fragments, document, &mut self.hooks).await;
        self.hooks.after_request(url, true);
        Ok(())
    }

    /// Re-apply a page previously reached through fragment navigation.
    ///
    /// History traversal refetches without pushing a new entry, so going
    /// back never creates a forward loop.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MalformedEnvelope`] under the same
    /// conditions as [`Self::handle_intercepted_navigation`].
    pub async fn handle_history_navigation<D: Document>(
        &mut self,
        document: &mut D,
        url: &str,
    ) -> Result<(), ClientError> {
        self.handle_intercepted_navigation(document, url, false).await
    }
}
