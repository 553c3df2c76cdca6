//! The eight-state insertion policy.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Where a fragment's body is spliced relative to the elements matched by
/// its selector.
///
/// A descriptor without a position defaults to [`ReplaceElement`] at apply
/// time. The two `Remove*` variants never carry a body on the wire.
///
/// [`ReplaceElement`]: ContentPosition::ReplaceElement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ContentPosition {
    /// Insert the parsed body as the previous sibling of each match.
    BeforeElement,
    /// Insert the parsed body as the next sibling of each match.
    AfterElement,
    /// Prepend the parsed body as the first child of each match.
    BeforeContent,
    /// Append the parsed body as the last child of each match.
    AfterContent,
    /// Replace each match's inner content with the body.
    ReplaceContent,
    /// Replace each matched element with the parsed body.
    ReplaceElement,
    /// Detach each matched element.
    RemoveElement,
    /// Clear each match's inner content.
    RemoveContent,
}

impl ContentPosition {
    /// Whether parts carrying this position never have a body.
    #[must_use]
    pub const fn is_bodiless(self) -> bool {
        matches!(
            self,
            ContentPosition::RemoveElement | ContentPosition::RemoveContent
        )
    }

    /// Wire name emitted in the `X-Fragment-ContentPosition` header.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ContentPosition::BeforeElement => "BeforeElement",
            ContentPosition::AfterElement => "AfterElement",
            ContentPosition::BeforeContent => "BeforeContent",
            ContentPosition::AfterContent => "AfterContent",
            ContentPosition::ReplaceContent => "ReplaceContent",
            ContentPosition::ReplaceElement => "ReplaceElement",
            ContentPosition::RemoveElement => "RemoveElement",
            ContentPosition::RemoveContent => "RemoveContent",
        }
    }
}

impl Default for ContentPosition {
    /// The position assumed when a fragment carries none.
    fn default() -> Self { ContentPosition::ReplaceElement }
}

impl fmt::Display for ContentPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Error returned when a wire name does not match any known position.
///
/// On the client this is a per-fragment condition: the offending fragment
/// is skipped and reported through the diagnostic hook while the rest of
/// the batch proceeds.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("position '{0}' is not a valid content position")]
pub struct UnknownPosition(pub String);

impl FromStr for ContentPosition {
    type Err = UnknownPosition;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BeforeElement" => Ok(ContentPosition::BeforeElement),
            "AfterElement" => Ok(ContentPosition::AfterElement),
            "BeforeContent" => Ok(ContentPosition::BeforeContent),
            "AfterContent" => Ok(ContentPosition::AfterContent),
            "ReplaceContent" => Ok(ContentPosition::ReplaceContent),
            "ReplaceElement" => Ok(ContentPosition::ReplaceElement),
            "RemoveElement" => Ok(ContentPosition::RemoveElement),
            "RemoveContent" => Ok(ContentPosition::RemoveContent),
            other => Err(UnknownPosition(other.to_owned())),
        }
    }
}
