//! Per-response boundary token.

use std::fmt;

use uuid::Uuid;

/// Boundary token framing the parts of one envelope.
///
/// Tokens are collision-resistant rather than cryptographic: a fresh random
/// 128-bit value rendered as 32 hex digits, generated once per response and
/// never shared across requests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundaryToken(String);

impl BoundaryToken {
    /// Generate a fresh token.
    #[must_use]
    pub fn generate() -> Self { Self(Uuid::new_v4().simple().to_string()) }

    /// Adopt a token received in a response content type.
    #[must_use]
    pub fn from_value(value: impl Into<String>) -> Self { Self(value.into()) }

    /// The token text as it appears on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for BoundaryToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}
