//! Testing utilities and harness for nativehost

use std::cell::RefCell;
use std::rc::Rc;

use nativehost_core::{
    Diagnostic, DiagnosticSink, Host, HostContext, HostTree, MemoryTree, NodeId, NodeKind,
    PropValue, PropertySetter,
};

/// Collects every reported diagnostic.
#[derive(Debug, Default)]
pub struct RecordingSink {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.borrow().is_empty()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic.clone());
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SetterCall {
    pub node: NodeId,
    pub name: String,
    pub value: Option<PropValue>,
    pub is_initial_apply: bool,
    pub context: HostContext,
}

/// Property setter that records each call, then stores the value on the
/// memory tree.
#[derive(Debug, Default)]
pub struct RecordingSetter {
    calls: Vec<SetterCall>,
}

impl RecordingSetter {
    pub fn calls(&self) -> &[SetterCall] {
        &self.calls
    }

    pub fn names(&self) -> Vec<&str> {
        self.calls.iter().map(|call| call.name.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl PropertySetter<MemoryTree> for RecordingSetter {
    fn set_property(
        &mut self,
        tree: &mut MemoryTree,
        node: NodeId,
        name: &str,
        value: Option<&PropValue>,
        is_initial_apply: bool,
        context: &HostContext,
    ) {
        self.calls.push(SetterCall {
            node,
            name: name.to_owned(),
            value: value.cloned(),
            is_initial_apply,
            context: *context,
        });
        let _ = tree.set_prop(node, name, value.cloned());
    }
}

pub type TestHost = Host<MemoryTree, RecordingSetter>;

/// Memory-backed host with recording setter and diagnostics.
pub fn test_host() -> (TestHost, Rc<RecordingSink>) {
    let sink = RecordingSink::new();
    let host = Host::new(MemoryTree::new(), RecordingSetter::default()).with_diagnostics(sink.clone());
    (host, sink)
}

/// Creates a node of `kind` with a placeholder tag.
pub fn node(host: &mut TestHost, kind: NodeKind) -> NodeId {
    host.tree_mut().create(kind, &format!("{kind:?}"))
}

/// Creates `count` leaf nodes.
pub fn leaves(host: &mut TestHost, count: usize) -> Vec<NodeId> {
    (0..count).map(|_| node(host, NodeKind::Leaf)).collect()
}

/// Live children of `parent`, panicking on a missing node.
pub fn children_of(host: &TestHost, parent: NodeId) -> Vec<NodeId> {
    host.children(parent)
        .unwrap_or_else(|err| panic!("children of {parent}: {err}"))
}

pub mod prelude {
    pub use crate::{
        children_of, leaves, node, test_host, RecordingSetter, RecordingSink, SetterCall, TestHost,
    };
    pub use nativehost_core::{Child, HostTree, NodeId, NodeKind, PropValue, Props};
}
