//! Test doubles shared by the client tests.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use crate::client::{
    dom::{Document, NodeId},
    engine::DecodedFragment,
    hooks::FragmentHooks,
};

/// Document double that resolves selectors from a fixed table and records
/// every mutation as a readable line.
#[derive(Debug, Default)]
pub struct TestDocument {
    selectors: BTreeMap<String, Vec<u64>>,
    pub operations: Vec<String>,
}

impl TestDocument {
    pub fn new() -> Self { Self::default() }

    /// Register a node the given selector resolves to.
    pub fn with_node(mut self, selector: &str, id: u64) -> Self {
        self.selectors.entry(selector.to_owned()).or_default().push(id);
        self
    }
}

impl Document for TestDocument {
    fn query(&mut self, selector: &str) -> Vec<NodeId> {
        self.selectors
            .get(selector)
            .map(|ids| ids.iter().copied().map(NodeId::new).collect())
            .unwrap_or_default()
    }

    fn replace_document(&mut self, markup: &str) {
        self.operations.push(format!("replace_document({markup})"));
    }

    fn execute_script(&mut self, source: &str) {
        self.operations.push(format!("execute_script({source})"));
    }

    fn insert_before(&mut self, node: NodeId, markup: &str) {
        self.operations
            .push(format!("insert_before(#{}, {markup})", node.get()));
    }

    fn insert_after(&mut self, node: NodeId, markup: &str) {
        self.operations
            .push(format!("insert_after(#{}, {markup})", node.get()));
    }

    fn prepend_content(&mut self, node: NodeId, markup: &str) {
        self.operations
            .push(format!("prepend_content(#{}, {markup})", node.get()));
    }

    fn append_content(&mut self, node: NodeId, markup: &str) {
        self.operations
            .push(format!("append_content(#{}, {markup})", node.get()));
    }

    fn replace_content(&mut self, node: NodeId, markup: &str) {
        self.operations
            .push(format!("replace_content(#{}, {markup})", node.get()));
    }

    fn replace_element(&mut self, node: NodeId, markup: &str) {
        self.operations
            .push(format!("replace_element(#{}, {markup})", node.get()));
    }

    fn remove_element(&mut self, node: NodeId) {
        self.operations.push(format!("remove_element(#{})", node.get()));
    }

    fn remove_content(&mut self, node: NodeId) {
        self.operations.push(format!("remove_content(#{})", node.get()));
    }
}

/// Hooks wired to a shared transcript of reported errors.
pub fn capturing_hooks() -> (FragmentHooks, Arc<Mutex<Vec<String>>>) {
    let errors = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&errors);
    let mut hooks = FragmentHooks::new();
    hooks.on_error = Some(Box::new(move |reason: &str| {
        sink.lock().expect("error transcript").push(reason.to_owned());
    }));
    (hooks, errors)
}

/// Markup fragment aimed at `selector` with the given wire position.
pub fn markup_fragment(selector: &str, position: &str, body: &str) -> DecodedFragment {
    DecodedFragment {
        selector: Some(selector.to_owned()),
        position: Some(position.to_owned()),
        delay_millis: 0,
        content_type: "text/html".to_owned(),
        body: body.to_owned(),
    }
}
