//! Application of decoded fragments to a host document.

use crate::{
    client::{dom::Document, hooks::FragmentHooks},
    envelope::Part,
    fragment::{
        ContentPosition,
        MediaKind,
        headers::{
            CONTENT_TYPE,
            DOCUMENT_SELECTOR,
            X_FRAGMENT_CONTENT_POSITION,
            X_FRAGMENT_DELAY,
            X_FRAGMENT_SELECTOR,
        },
    },
};

/// One fragment as decoded from an envelope part.
///
/// Placement metadata stays in wire form here: the position string is
/// parsed at apply time so an unrecognised name faults only its own
/// fragment, never the batch.
#[derive(Clone, Debug)]
pub struct DecodedFragment {
    /// Target selector, when the part carried one.
    pub selector: Option<String>,
    /// Wire name of the insertion position, when the part carried one.
    pub position: Option<String>,
    /// Application delay in milliseconds.
    pub delay_millis: u64,
    /// Declared media type of the body.
    pub content_type: String,
    /// Fragment payload.
    pub body: String,
}

impl DecodedFragment {
    /// Extract placement metadata and the payload from an envelope part.
    ///
    /// A malformed delay value falls back to zero rather than faulting
    /// the fragment, matching the treatment of any other absent header.
    #[must_use]
    pub fn from_part(part: &Part) -> Self {
        let headers = &part.headers;
        Self {
            selector: headers.get(X_FRAGMENT_SELECTOR).map(str::to_owned),
            position: headers.get(X_FRAGMENT_CONTENT_POSITION).map(str::to_owned),
            delay_millis: headers
                .get(X_FRAGMENT_DELAY)
                .and_then(|value| value.trim().parse().ok())
                .unwrap_or(0),
            content_type: headers.get(CONTENT_TYPE).unwrap_or_default().to_owned(),
            body: String::from_utf8_lossy(&part.body).into_owned(),
        }
    }
}

/// Applies fragments to a document, one at a time.
///
/// The engine borrows the document and hooks for the duration of a batch;
/// it keeps no state of its own between fragments.
pub struct MutationEngine<'a, D: Document> {
    document: &'a mut D,
    hooks: &'a mut FragmentHooks,
}

impl<'a, D: Document> MutationEngine<'a, D> {
    pub fn new(document: &'a mut D, hooks: &'a mut FragmentHooks) -> Self {
        Self { document, hooks }
    }

    /// Apply one fragment according to its media kind.
    ///
    /// Script fragments are executed, markup fragments are placed, and
    /// anything else is reported through the error hook and dropped.
    pub fn apply(&mut self, fragment: &DecodedFragment) {
        match MediaKind::from_content_type(&fragment.content_type) {
            MediaKind::Script => self.document.execute_script(&fragment.body),
            MediaKind::Markup => {
                if !self.apply_markup(fragment) {
                    return;
                }
            }
            MediaKind::Other(media) => {
                self.hooks
                    .error(&format!("fragment with inert media type '{media}' dropped"));
                return;
            }
        }
        #[cfg(feature = "metrics")]
        crate::metrics::inc_fragments_applied();
    }

    /// Place a markup fragment, returning whether it was applied.
    fn apply_markup(&mut self, fragment: &DecodedFragment) -> bool {
        let selector = fragment.selector.as_deref().unwrap_or_default();
        if selector.is_empty() || selector == DOCUMENT_SELECTOR {
            self.document.replace_document(&fragment.body);
            return true;
        }

        let position = match fragment.position.as_deref() {
            None => ContentPosition::default(),
            Some(name) => match name.parse() {
                Ok(position) => position,
                Err(error) => {
                    self.hooks.error(&format!("{error}; fragment dropped"));
                    return false;
                }
            },
        };

        // Selectors resolve at apply time so mutations from earlier
        // fragments are visible to later ones.
        for node in self.document.query(selector) {
            let body = fragment.body.as_str();
            match position {
                ContentPosition::BeforeElement => self.document.insert_before(node, body),
                ContentPosition::AfterElement => self.document.insert_after(node, body),
                ContentPosition::BeforeContent => self.document.prepend_content(node, body),
                ContentPosition::AfterContent => self.document.append_content(node, body),
                ContentPosition::ReplaceContent => self.document.replace_content(node, body),
                ContentPosition::ReplaceElement => self.document.replace_element(node, body),
                ContentPosition::RemoveElement => self.document.remove_element(node),
                ContentPosition::RemoveContent => self.document.remove_content(node),
            }
        }
        true
    }
}
