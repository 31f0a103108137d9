use std::rc::Rc;

use crate::context::HostContext;
use crate::error::NodeError;
use crate::kind::{NodeKind, Slot};
use crate::props::PropValue;
use crate::NodeId;

/// One entry of a container's requested child list.
#[derive(Clone, Debug, PartialEq)]
pub enum Child {
    Node(NodeId),
    Text(String),
}

impl From<NodeId> for Child {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Primitives exposed by the target widget toolkit.
///
/// The host never reaches into widgets directly; every attachment goes
/// through these slot and collection operations. Implementations report an
/// unknown id as [`NodeError::Missing`].
pub trait HostTree {
    fn create(&mut self, kind: NodeKind, tag: &str) -> NodeId;
    fn create_text(&mut self, value: &str) -> NodeId;
    /// Frees a node created by the host itself (text nodes).
    fn release(&mut self, id: NodeId) -> Result<(), NodeError>;

    fn kind(&self, id: NodeId) -> Result<NodeKind, NodeError>;
    /// The value of a text node, `None` for any other kind.
    fn text(&self, id: NodeId) -> Result<Option<String>, NodeError>;
    fn set_text(&mut self, id: NodeId, value: &str) -> Result<(), NodeError>;

    fn slot(&self, id: NodeId, slot: Slot) -> Result<Option<NodeId>, NodeError>;
    fn set_slot(&mut self, id: NodeId, slot: Slot, child: Option<NodeId>)
        -> Result<(), NodeError>;

    fn layout_children(&self, parent: NodeId) -> Result<Vec<NodeId>, NodeError>;
    fn child_index(&self, parent: NodeId, child: NodeId) -> Result<Option<usize>, NodeError>;
    fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError>;
    fn insert_child(&mut self, parent: NodeId, child: NodeId, index: usize)
        -> Result<(), NodeError>;
    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError>;

    fn action_items(&self, action_bar: NodeId) -> Result<Vec<NodeId>, NodeError>;
    fn add_action_item(&mut self, action_bar: NodeId, item: NodeId) -> Result<(), NodeError>;
    fn remove_action_item(&mut self, action_bar: NodeId, item: NodeId) -> Result<(), NodeError>;

    /// Tab items are only ever replaced as a whole collection; the toolkit
    /// observes changes on assignment.
    fn tab_items(&self, tab_view: NodeId) -> Result<Option<Rc<[NodeId]>>, NodeError>;
    fn set_tab_items(&mut self, tab_view: NodeId, items: Rc<[NodeId]>) -> Result<(), NodeError>;

    fn views(&self, parent: NodeId) -> Result<Vec<NodeId>, NodeError>;
    fn add_view(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError>;
    fn remove_view(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError>;
}

/// Applies one property to one node. `value` is `None` when the property
/// was removed.
pub trait PropertySetter<T: ?Sized> {
    fn set_property(
        &mut self,
        tree: &mut T,
        node: NodeId,
        name: &str,
        value: Option<&PropValue>,
        is_initial_apply: bool,
        context: &HostContext,
    );
}

impl<T: ?Sized, F> PropertySetter<T> for F
where
    F: FnMut(&mut T, NodeId, &str, Option<&PropValue>, bool, &HostContext),
{
    fn set_property(
        &mut self,
        tree: &mut T,
        node: NodeId,
        name: &str,
        value: Option<&PropValue>,
        is_initial_apply: bool,
        context: &HostContext,
    ) {
        self(tree, node, name, value, is_initial_apply, context)
    }
}

/// Live children of `parent` across all of its attachment points, in the
/// order the child-list reconciler walks them.
pub fn live_children<T: HostTree + ?Sized>(
    tree: &T,
    parent: NodeId,
) -> Result<Vec<NodeId>, NodeError> {
    let single = |slot| -> Result<Vec<NodeId>, NodeError> {
        Ok(tree.slot(parent, slot)?.into_iter().collect())
    };
    let children = match tree.kind(parent)? {
        NodeKind::Page => {
            let mut children = single(Slot::ActionBar)?;
            children.extend(tree.slot(parent, Slot::Content)?);
            children
        }
        NodeKind::ContentView | NodeKind::ScrollView => single(Slot::Content)?,
        NodeKind::Layout(_) => tree.layout_children(parent)?,
        NodeKind::ActionBar => {
            let mut children = single(Slot::NavigationButton)?;
            children.extend(tree.slot(parent, Slot::TitleView)?);
            children.extend(tree.action_items(parent)?);
            children
        }
        NodeKind::ActionItem | NodeKind::NavigationButton => single(Slot::ActionView)?,
        NodeKind::TabView => {
            let mut children: Vec<NodeId> = tree
                .tab_items(parent)?
                .map(|items| items.to_vec())
                .unwrap_or_default();
            children.extend(tree.views(parent)?);
            children
        }
        NodeKind::TabViewItem => single(Slot::ItemView)?,
        _ => tree.views(parent)?,
    };
    Ok(children)
}
