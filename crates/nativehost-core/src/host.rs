use std::rc::Rc;

use crate::diagnostics::{Diagnostic, DiagnosticSink, LogSink};
use crate::error::NodeError;
use crate::tree::{live_children, HostTree, PropertySetter};
use crate::NodeId;

/// A target tree together with the property setter and diagnostic channel
/// the reconcilers drive it through.
pub struct Host<T, S> {
    tree: T,
    setter: S,
    diagnostics: Rc<dyn DiagnosticSink>,
}

impl<T, S> Host<T, S>
where
    T: HostTree,
    S: PropertySetter<T>,
{
    pub fn new(tree: T, setter: S) -> Self {
        Self {
            tree,
            setter,
            diagnostics: Rc::new(LogSink),
        }
    }

    pub fn with_diagnostics(mut self, sink: Rc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut T {
        &mut self.tree
    }

    pub fn setter(&self) -> &S {
        &self.setter
    }

    pub fn setter_mut(&mut self) -> &mut S {
        &mut self.setter
    }

    pub fn into_parts(self) -> (T, S) {
        (self.tree, self.setter)
    }

    /// Live children of `parent` across all of its attachment points.
    pub fn children(&self, parent: NodeId) -> Result<Vec<NodeId>, NodeError> {
        live_children(&self.tree, parent)
    }

    pub(crate) fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.report(&diagnostic);
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut T, &mut S) {
        (&mut self.tree, &mut self.setter)
    }
}
