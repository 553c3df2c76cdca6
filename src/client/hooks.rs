//! Host callbacks invoked around fragment requests.
//!
//! [`FragmentHooks`] stores optional callbacks the transport and engine run
//! at well-defined points. Every hook is optional; the only built-in
//! behaviour is the diagnostic fallback in [`FragmentHooks::error`], which
//! logs through [`log::warn!`] when no error hook is registered so
//! non-fatal faults never disappear silently.

/// Type alias for the `on_before_request` callback.
type BeforeRequestHook = Box<dyn FnMut(&str) + Send + 'static>;

/// Type alias for the `on_after_request` callback. The second argument is
/// whether the response was applied as fragments.
type AfterRequestHook = Box<dyn FnMut(&str, bool) + Send + 'static>;

/// Type alias for the `on_error` callback.
type ErrorHook = Box<dyn FnMut(&str) + Send + 'static>;

/// Type alias for the `push_history` callback.
type PushHistoryHook = Box<dyn FnMut(&str) + Send + 'static>;

/// Callbacks used by the transport and mutation engine.
#[derive(Default)]
pub struct FragmentHooks {
    /// Invoked with the URL before a fragment request is issued.
    pub on_before_request: Option<BeforeRequestHook>,
    /// Invoked with the URL once a request cycle completes.
    pub on_after_request: Option<AfterRequestHook>,
    /// Invoked with a description of each non-fatal fault.
    pub on_error: Option<ErrorHook>,
    /// Invoked with the canonical URL when browser history should advance.
    pub push_history: Option<PushHistoryHook>,
}

impl FragmentHooks {
    /// Hooks with no callbacks registered.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Run the `on_before_request` hook if registered.
    pub fn before_request(&mut self, url: &str) {
        if let Some(hook) = &mut self.on_before_request {
            hook(url);
        }
    }

    /// Run the `on_after_request` hook if registered.
    pub fn after_request(&mut self, url: &str, applied: bool) {
        if let Some(hook) = &mut self.on_after_request {
            hook(url, applied);
        }
    }

    /// Report a non-fatal fault.
    ///
    /// Runs the `on_error` hook when registered and falls back to
    /// [`log::warn!`] otherwise.
    pub fn error(&mut self, reason: &str) {
        #[cfg(feature = "metrics")]
        crate::metrics::inc_errors();
        if let Some(hook) = &mut self.on_error {
            hook(reason);
        } else {
            log::warn!("fragment client fault: {reason}");
        }
    }

    /// Run the `push_history` hook if registered.
    pub fn history(&mut self, url: &str) {
        if let Some(hook) = &mut self.push_history {
            hook(url);
        }
    }
}

impl std::fmt::Debug for FragmentHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FragmentHooks")
            .field("on_before_request", &self.on_before_request.is_some())
            .field("on_after_request", &self.on_after_request.is_some())
            .field("on_error", &self.on_error.is_some())
            .field("push_history", &self.push_history.is_some())
            .finish()
    }
}
