//! In-memory widget tree used headless and in tests.

use std::rc::Rc;

use indexmap::IndexSet;

use crate::context::HostContext;
use crate::error::NodeError;
use crate::kind::{NodeKind, Slot};
use crate::props::{PropValue, Props};
use crate::tree::{live_children, HostTree, PropertySetter};
use crate::NodeId;

#[derive(Clone, Debug)]
pub struct Widget {
    kind: NodeKind,
    tag: String,
    props: Props,
    text: Option<String>,
    parent: Option<NodeId>,
    slots: [Option<NodeId>; Slot::ALL.len()],
    children: IndexSet<NodeId>,
    action_items: Vec<NodeId>,
    tab_items: Option<Rc<[NodeId]>>,
    views: IndexSet<NodeId>,
}

impl Widget {
    fn new(kind: NodeKind, tag: &str) -> Self {
        Self {
            kind,
            tag: tag.to_owned(),
            props: Props::new(),
            text: None,
            parent: None,
            slots: [None; Slot::ALL.len()],
            children: IndexSet::new(),
            action_items: Vec::new(),
            tab_items: None,
            views: IndexSet::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Parent recorded by the last attachment. Slots do not clear it when
    /// they are overwritten by a new occupant.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

#[derive(Default)]
pub struct MemoryTree {
    nodes: Vec<Option<Widget>>,
    mutations: usize,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            mutations: 0,
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count of mutating primitives applied since creation.
    pub fn mutations(&self) -> usize {
        self.mutations
    }

    pub fn widget(&self, id: NodeId) -> Result<&Widget, NodeError> {
        self.nodes
            .get(id)
            .and_then(Option::as_ref)
            .ok_or(NodeError::Missing { id })
    }

    fn widget_mut(&mut self, id: NodeId) -> Result<&mut Widget, NodeError> {
        self.nodes
            .get_mut(id)
            .and_then(Option::as_mut)
            .ok_or(NodeError::Missing { id })
    }

    fn mutate<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut Widget) -> R,
    ) -> Result<R, NodeError> {
        let result = f(self.widget_mut(id)?);
        self.mutations += 1;
        Ok(result)
    }

    fn adopt(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError> {
        self.widget_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn orphan(&mut self, parent: NodeId, child: NodeId) {
        if let Some(Some(widget)) = self.nodes.get_mut(child) {
            if widget.parent == Some(parent) {
                widget.parent = None;
            }
        }
    }

    pub fn set_prop(&mut self, id: NodeId, name: &str, value: Option<PropValue>) -> Result<(), NodeError> {
        self.mutate(id, |widget| match value {
            Some(value) => {
                widget.props.insert(name, value);
            }
            None => {
                widget.props.remove(name);
            }
        })
    }

    pub fn dump_tree(&self, root: Option<NodeId>) -> String {
        let mut output = String::new();
        if let Some(root_id) = root {
            self.dump_node(&mut output, root_id, 0);
        } else {
            output.push_str("(no root)\n");
        }
        output
    }

    fn dump_node(&self, output: &mut String, id: NodeId, depth: usize) {
        let indent = "  ".repeat(depth);
        match self.widget(id) {
            Ok(widget) => {
                match widget.text() {
                    Some(text) => output.push_str(&format!("{indent}[{id}] {text:?}\n")),
                    None => output.push_str(&format!("{indent}[{id}] <{}>\n", widget.tag)),
                }
                for child in live_children(self, id).unwrap_or_default() {
                    self.dump_node(output, child, depth + 1);
                }
            }
            Err(_) => output.push_str(&format!("{indent}[{id}] (missing)\n")),
        }
    }
}

impl HostTree for MemoryTree {
    fn create(&mut self, kind: NodeKind, tag: &str) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Some(Widget::new(kind, tag)));
        id
    }

    fn create_text(&mut self, value: &str) -> NodeId {
        let id = self.create(NodeKind::Text, "#text");
        if let Some(Some(widget)) = self.nodes.get_mut(id) {
            widget.text = Some(value.to_owned());
        }
        id
    }

    fn release(&mut self, id: NodeId) -> Result<(), NodeError> {
        let slot = self.nodes.get_mut(id).ok_or(NodeError::Missing { id })?;
        slot.take().ok_or(NodeError::Missing { id })?;
        Ok(())
    }

    fn kind(&self, id: NodeId) -> Result<NodeKind, NodeError> {
        Ok(self.widget(id)?.kind)
    }

    fn text(&self, id: NodeId) -> Result<Option<String>, NodeError> {
        Ok(self.widget(id)?.text.clone())
    }

    fn set_text(&mut self, id: NodeId, value: &str) -> Result<(), NodeError> {
        let kind = self.kind(id)?;
        if kind != NodeKind::Text {
            return Err(NodeError::UnexpectedKind {
                id,
                actual: kind,
                expected: "text node",
            });
        }
        self.mutate(id, |widget| widget.text = Some(value.to_owned()))
    }

    fn slot(&self, id: NodeId, slot: Slot) -> Result<Option<NodeId>, NodeError> {
        Ok(self.widget(id)?.slots[slot.index()])
    }

    fn set_slot(
        &mut self,
        id: NodeId,
        slot: Slot,
        child: Option<NodeId>,
    ) -> Result<(), NodeError> {
        if let Some(child) = child {
            self.adopt(id, child)?;
        }
        let previous = self.mutate(id, |widget| {
            std::mem::replace(&mut widget.slots[slot.index()], child)
        })?;
        if let Some(previous) = previous.filter(|&p| Some(p) != child) {
            self.orphan(id, previous);
        }
        Ok(())
    }

    fn layout_children(&self, parent: NodeId) -> Result<Vec<NodeId>, NodeError> {
        Ok(self.widget(parent)?.children.iter().copied().collect())
    }

    fn child_index(&self, parent: NodeId, child: NodeId) -> Result<Option<usize>, NodeError> {
        Ok(self.widget(parent)?.children.get_index_of(&child))
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError> {
        self.adopt(parent, child)?;
        self.mutate(parent, |widget| {
            widget.children.shift_remove(&child);
            widget.children.insert(child);
        })
    }

    fn insert_child(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), NodeError> {
        self.adopt(parent, child)?;
        self.mutate(parent, |widget| {
            widget.children.shift_remove(&child);
            let index = index.min(widget.children.len());
            widget.children.shift_insert(index, child);
        })
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError> {
        self.mutate(parent, |widget| {
            widget.children.shift_remove(&child);
        })?;
        self.orphan(parent, child);
        Ok(())
    }

    fn action_items(&self, action_bar: NodeId) -> Result<Vec<NodeId>, NodeError> {
        Ok(self.widget(action_bar)?.action_items.clone())
    }

    fn add_action_item(&mut self, action_bar: NodeId, item: NodeId) -> Result<(), NodeError> {
        self.adopt(action_bar, item)?;
        self.mutate(action_bar, |widget| {
            widget.action_items.retain(|&i| i != item);
            widget.action_items.push(item);
        })
    }

    fn remove_action_item(&mut self, action_bar: NodeId, item: NodeId) -> Result<(), NodeError> {
        self.mutate(action_bar, |widget| widget.action_items.retain(|&i| i != item))?;
        self.orphan(action_bar, item);
        Ok(())
    }

    fn tab_items(&self, tab_view: NodeId) -> Result<Option<Rc<[NodeId]>>, NodeError> {
        Ok(self.widget(tab_view)?.tab_items.clone())
    }

    fn set_tab_items(&mut self, tab_view: NodeId, items: Rc<[NodeId]>) -> Result<(), NodeError> {
        let previous = self.tab_items(tab_view)?.unwrap_or_else(|| Rc::from([]));
        for &item in items.iter() {
            self.adopt(tab_view, item)?;
        }
        for &item in previous.iter().filter(|item| !items.contains(item)) {
            self.orphan(tab_view, item);
        }
        self.mutate(tab_view, |widget| widget.tab_items = Some(items))
    }

    fn views(&self, parent: NodeId) -> Result<Vec<NodeId>, NodeError> {
        Ok(self.widget(parent)?.views.iter().copied().collect())
    }

    fn add_view(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError> {
        self.adopt(parent, child)?;
        self.mutate(parent, |widget| {
            widget.views.shift_remove(&child);
            widget.views.insert(child);
        })
    }

    fn remove_view(&mut self, parent: NodeId, child: NodeId) -> Result<(), NodeError> {
        self.mutate(parent, |widget| {
            widget.views.shift_remove(&child);
        })?;
        self.orphan(parent, child);
        Ok(())
    }
}

/// Stores every property verbatim on the widget.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryProperties;

impl PropertySetter<MemoryTree> for MemoryProperties {
    fn set_property(
        &mut self,
        tree: &mut MemoryTree,
        node: NodeId,
        name: &str,
        value: Option<&PropValue>,
        _is_initial_apply: bool,
        _context: &HostContext,
    ) {
        if let Err(err) = tree.set_prop(node, name, value.cloned()) {
            log::warn!("[set_property] {name} skipped: {err}");
        }
    }
}

#[cfg(test)]
#[path = "tests/memory_tests.rs"]
mod tests;
