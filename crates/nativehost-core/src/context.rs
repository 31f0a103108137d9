use crate::kind::{LayoutKind, NodeKind};

/// Placement facts about a node's ancestry, handed to every property
/// setter call. The root context is [`HostContext::default`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HostContext {
    pub is_in_a_parent_text: bool,
    pub is_in_a_parent_span: bool,
    pub is_in_a_parent_formatted_string: bool,
    pub is_in_a_dock_layout: bool,
    pub is_in_a_grid_layout: bool,
    pub is_in_an_absolute_layout: bool,
    pub is_in_a_flexbox_layout: bool,
}

impl HostContext {
    /// Context for the children of a node of `parent` kind.
    ///
    /// Text ancestry is inherited from `self`; layout flags only describe the
    /// immediate parent.
    pub fn child_of(&self, parent: NodeKind) -> Self {
        let layout = match parent {
            NodeKind::Layout(layout) => Some(layout),
            _ => None,
        };
        Self {
            is_in_a_parent_text: self.is_in_a_parent_text || parent == NodeKind::TextBase,
            is_in_a_parent_span: self.is_in_a_parent_span || parent == NodeKind::Span,
            is_in_a_parent_formatted_string: self.is_in_a_parent_formatted_string
                || parent == NodeKind::FormattedString,
            is_in_a_dock_layout: layout == Some(LayoutKind::Dock),
            is_in_a_grid_layout: layout == Some(LayoutKind::Grid),
            is_in_an_absolute_layout: layout == Some(LayoutKind::Absolute),
            is_in_a_flexbox_layout: layout == Some(LayoutKind::Flexbox),
        }
    }
}
