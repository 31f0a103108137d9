//! Property and child-list reconciliation against a live tree.

use crate::collections::map::HashSet;
use crate::context::HostContext;
use crate::diagnostics::{Diagnostic, Operation};
use crate::host::Host;
use crate::kind::NodeKind;
use crate::props::Props;
use crate::tree::{Child, HostTree, PropertySetter};
use crate::NodeId;

impl<T, S> Host<T, S>
where
    T: HostTree,
    S: PropertySetter<T>,
{
    /// Applies every property whose value differs between `old` and `new`.
    ///
    /// Keys are visited over the union of both maps, old keys first, so a
    /// property present only in `old` is handed to the setter as `None`.
    pub fn reconcile_properties(
        &mut self,
        node: NodeId,
        old: &Props,
        new: &Props,
        is_initial_apply: bool,
        context: &HostContext,
    ) {
        let (tree, setter) = self.parts_mut();
        let names = old
            .keys()
            .chain(new.keys().filter(|name| !old.contains(name)));
        for name in names {
            let next = new.get(name);
            if old.get(name) != next {
                setter.set_property(tree, node, name, next, is_initial_apply, context);
            }
        }
    }

    /// Brings the live children of `parent` in line with `children` in a
    /// single left-to-right pass and returns the number of operations that
    /// were applied.
    ///
    /// Text entries reuse a text node at the cursor; node entries match by
    /// identity. There is no keyed move detection: a reordered head costs one
    /// insertion per displaced entry. Parents without positional children
    /// accept any live child as already in place. Host-created text nodes
    /// are released once they leave the parent.
    pub fn reconcile_children(&mut self, parent: NodeId, children: &[Child]) -> usize {
        let Some(mut live) = self.snapshot(parent) else {
            return 0;
        };
        let ordered = self.tree().kind(parent).is_ok_and(NodeKind::is_layout);
        let mut placed: HashSet<NodeId> = HashSet::default();
        let mut operations = 0;
        let mut cursor = 0;

        for child in children {
            while live.get(cursor).is_some_and(|id| placed.contains(id)) {
                cursor += 1;
            }
            if !ordered {
                if let Some(id) = self.find_live(child, &live, &placed) {
                    placed.insert(id);
                    continue;
                }
            }
            let Some(&old) = live.get(cursor) else {
                if self.append(parent, child, &mut placed) {
                    operations += 1;
                }
                if !ordered {
                    let Some(refreshed) = self.settle(parent, &live) else {
                        return operations;
                    };
                    live = refreshed;
                    cursor = live.len();
                }
                continue;
            };
            let (inserted, fresh) = match child {
                Child::Text(value) => match self.tree().text(old).ok().flatten() {
                    Some(current) => {
                        if current != *value && self.tree_mut().set_text(old, value).is_ok() {
                            operations += 1;
                        }
                        placed.insert(old);
                        cursor += 1;
                        continue;
                    }
                    None => (self.tree_mut().create_text(value), true),
                },
                Child::Node(id) if *id == old => {
                    placed.insert(old);
                    cursor += 1;
                    continue;
                }
                Child::Node(id) => (*id, false),
            };
            placed.insert(inserted);
            if self.attach_before(parent, inserted, old).is_applied() {
                operations += 1;
            } else if fresh {
                let _ = self.tree_mut().release(inserted);
            }
            let refreshed = if ordered {
                self.snapshot(parent)
            } else {
                self.settle(parent, &live)
            };
            let Some(refreshed) = refreshed else {
                return operations;
            };
            live = refreshed;
            cursor = live
                .iter()
                .position(|&id| id == old)
                .or_else(|| live.iter().position(|&id| id == inserted).map(|i| i + 1))
                .unwrap_or(cursor)
                .min(live.len());
        }

        let stale: Vec<NodeId> = live
            .iter()
            .copied()
            .filter(|id| !placed.contains(id))
            .collect();
        for id in stale {
            if self.detach(parent, id).is_applied() {
                operations += 1;
                self.release_text(id);
            }
        }
        operations
    }

    /// Attaches `child` after the live children. A text node created for it
    /// is released again when the attach is skipped.
    fn append(&mut self, parent: NodeId, child: &Child, placed: &mut HashSet<NodeId>) -> bool {
        let (id, fresh) = match child {
            Child::Node(id) => (*id, false),
            Child::Text(value) => (self.tree_mut().create_text(value), true),
        };
        placed.insert(id);
        let applied = self.attach(parent, id).is_applied();
        if !applied && fresh {
            let _ = self.tree_mut().release(id);
        }
        applied
    }

    /// Unplaced live child matching `child`: the node itself, or a text node
    /// holding the same value.
    fn find_live(
        &self,
        child: &Child,
        live: &[NodeId],
        placed: &HashSet<NodeId>,
    ) -> Option<NodeId> {
        let mut candidates = live.iter().copied().filter(|id| !placed.contains(id));
        match child {
            Child::Node(id) => candidates.find(|candidate| candidate == id),
            Child::Text(value) => candidates.find(|&candidate| {
                self.tree().text(candidate).ok().flatten().as_deref() == Some(value.as_str())
            }),
        }
    }

    /// Re-reads the live children, releasing text nodes that an attach
    /// displaced from a slot.
    fn settle(&mut self, parent: NodeId, previous: &[NodeId]) -> Option<Vec<NodeId>> {
        let current = self.snapshot(parent)?;
        let present: HashSet<NodeId> = current.iter().copied().collect();
        for &id in previous.iter().filter(|id| !present.contains(*id)) {
            self.release_text(id);
        }
        Some(current)
    }

    fn release_text(&mut self, id: NodeId) {
        if self.tree().kind(id).ok() == Some(NodeKind::Text) {
            let _ = self.tree_mut().release(id);
        }
    }

    fn snapshot(&self, parent: NodeId) -> Option<Vec<NodeId>> {
        match self.children(parent) {
            Ok(children) => Some(children),
            Err(error) => {
                self.report(Diagnostic::Node {
                    op: Operation::Reconcile,
                    error,
                });
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
