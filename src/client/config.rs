//! Client configuration.

/// Attribute used to label elements with their source fragment when no
/// explicit override is configured.
pub const DEFAULT_ID_ATTRIBUTE: &str = "fragment";

/// Tunable knobs for the client. Each transport owns its configuration;
/// nothing is process-global.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    id_attribute: String,
}

impl ClientConfig {
    /// Configuration with the default identification attribute.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Override the attribute hosts use to tag fragment-derived elements.
    #[must_use]
    pub fn with_id_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.id_attribute = attribute.into();
        self
    }

    /// The configured identification attribute.
    #[must_use]
    pub fn id_attribute(&self) -> &str { &self.id_attribute }

    /// Whether a clicked element is an anchor the host should intercept
    /// and route through the fragment transport.
    ///
    /// Only anchors opted in with the identification attribute are
    /// intercepted; everything else keeps its native navigation.
    #[must_use]
    pub fn should_intercept<'a>(
        &self,
        tag_name: &str,
        mut attribute_names: impl Iterator<Item = &'a str>,
    ) -> bool {
        tag_name.eq_ignore_ascii_case("a")
            && attribute_names.any(|name| name == self.id_attribute)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            id_attribute: DEFAULT_ID_ATTRIBUTE.to_owned(),
        }
    }
}
