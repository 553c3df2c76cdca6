//! Request-side eligibility signals.

use crate::{
    envelope::Headers,
    fragment::headers::{X_FRAGMENTED, X_REQUESTED_WITH},
};

/// Whether the request declared that it understands fragmented responses.
///
/// An `X-Fragmented` header decides on its own when present: any value
/// other than (case-insensitive) `false` asserts capability, and an
/// explicit `false` opts out even if other signals are present. Without
/// it, the conventional `X-Requested-With: XMLHttpRequest` indicator is
/// accepted as the legacy eligibility signal.
#[must_use]
pub fn is_fragment_capable(headers: &Headers) -> bool {
    if let Some(value) = headers.get(X_FRAGMENTED) {
        return !value.eq_ignore_ascii_case("false");
    }
    headers
        .get(X_REQUESTED_WITH)
        .is_some_and(|value| value == "XMLHttpRequest")
}

/// Assemble the canonical absolute URL of the current request for the
/// `X-Fragment-Url` history signal.
#[must_use]
pub fn request_url(scheme: &str, host: &str, path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{scheme}://{host}{path}?{query}"),
        _ => format!("{scheme}://{host}{path}"),
    }
}
