//! Document abstraction the mutation engine drives.
//!
//! Hosts bridge these primitives to their actual document: a browser DOM
//! behind a WebAssembly boundary, a server-side render tree, or a test
//! double. The engine never holds node references across operations;
//! every placement re-queries by selector at apply time, so mutations
//! from earlier fragments are always visible to later ones.

/// Opaque handle to a document node, valid until the next mutation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(u64);

impl NodeId {
    /// Wrap a host-assigned node identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self { Self(raw) }

    /// The host-assigned identifier.
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }
}

/// Mutation primitives the engine requires from a host document.
///
/// `query` runs a selector and returns every match; placement methods
/// then act on one node at a time. Implementations that cannot express a
/// primitive (for example `execute_script` in a sandboxed host) may make
/// it a no-op.
pub trait Document {
    /// All nodes matching `selector`, in document order.
    fn query(&mut self, selector: &str) -> Vec<NodeId>;

    /// Replace the entire document with `markup`.
    fn replace_document(&mut self, markup: &str);

    /// Evaluate `source` in the document's script context.
    fn execute_script(&mut self, source: &str);

    /// Insert `markup` as siblings immediately before `node`.
    fn insert_before(&mut self, node: NodeId, markup: &str);

    /// Insert `markup` as siblings immediately after `node`.
    fn insert_after(&mut self, node: NodeId, markup: &str);

    /// Insert `markup` as the first children of `node`.
    fn prepend_content(&mut self, node: NodeId, markup: &str);

    /// Insert `markup` as the last children of `node`.
    fn append_content(&mut self, node: NodeId, markup: &str);

    /// Replace the children of `node` with `markup`.
    fn replace_content(&mut self, node: NodeId, markup: &str);

    /// Replace `node` itself with `markup`.
    fn replace_element(&mut self, node: NodeId, markup: &str);

    /// Remove `node` from the document.
    fn remove_element(&mut self, node: NodeId);

    /// Remove the children of `node`, keeping the node.
    fn remove_content(&mut self, node: NodeId);
}
