use nativehost_core::{live_children, MemoryTree, NodeError, NodeId};

use crate::serializer::MarkupEnvironment;

impl MarkupEnvironment {
    /// Serializes the live subtree under `root`.
    pub fn render(&self, tree: &MemoryTree, root: NodeId) -> Result<String, NodeError> {
        let widget = tree.widget(root)?;
        if let Some(text) = widget.text() {
            return Ok(self.text(text));
        }
        let children = live_children(tree, root)?
            .into_iter()
            .map(|child| self.render(tree, child))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.serialize(widget.tag(), widget.props(), &children))
    }
}

/// [`MarkupEnvironment::render`] without void tags.
pub fn render(tree: &MemoryTree, root: NodeId) -> Result<String, NodeError> {
    MarkupEnvironment::default().render(tree, root)
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
