//! Attachment-point dispatch: routes attach, insert and detach requests to
//! the slot or collection that the parent's kind exposes for the child.

use std::iter;
use std::rc::Rc;

use crate::diagnostics::{Diagnostic, Operation};
use crate::error::NodeError;
use crate::host::Host;
use crate::kind::{LayoutKind, NodeKind, Slot};
use crate::tree::{HostTree, PropertySetter};
use crate::NodeId;

/// Attachment point chosen for a `(parent, child)` kind pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// Child is a page; never attached anywhere.
    RejectPage,
    /// Page receiving its action bar.
    PageActionBar,
    /// Content slot of a single-slot container.
    Content,
    /// Ordered child collection of a layout container.
    Ordered,
    NavigationButton,
    ActionItem,
    /// Anything else placed in an action bar becomes its title view.
    TitleView,
    /// Action view of an action item or navigation button.
    ActionView,
    /// Tab item collection of a tab view.
    TabItem,
    /// View of a tab view item.
    TabItemView,
    /// Generic add/remove view primitives.
    Generic,
}

impl Route {
    /// First matching row wins.
    pub fn resolve(parent: NodeKind, child: NodeKind) -> Self {
        match (parent, child) {
            (_, NodeKind::Page) => Self::RejectPage,
            (NodeKind::Page, NodeKind::ActionBar) => Self::PageActionBar,
            (parent, _) if parent.is_single_slot() => Self::Content,
            (NodeKind::Layout(_), _) => Self::Ordered,
            (NodeKind::ActionBar, NodeKind::NavigationButton) => Self::NavigationButton,
            (NodeKind::ActionBar, NodeKind::ActionItem) => Self::ActionItem,
            (NodeKind::ActionBar, _) => Self::TitleView,
            (parent, _) if parent.is_action_item() => Self::ActionView,
            (NodeKind::TabView, NodeKind::TabViewItem) => Self::TabItem,
            (NodeKind::TabViewItem, _) => Self::TabItemView,
            _ => Self::Generic,
        }
    }

    /// The single-occupant slot this route writes, if any.
    pub fn slot(self) -> Option<Slot> {
        match self {
            Self::PageActionBar => Some(Slot::ActionBar),
            Self::Content => Some(Slot::Content),
            Self::NavigationButton => Some(Slot::NavigationButton),
            Self::TitleView => Some(Slot::TitleView),
            Self::ActionView => Some(Slot::ActionView),
            Self::TabItemView => Some(Slot::ItemView),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied(Route),
    Skipped,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

impl<T, S> Host<T, S>
where
    T: HostTree,
    S: PropertySetter<T>,
{
    pub fn route(&self, parent: NodeId, child: NodeId) -> Result<Route, NodeError> {
        Ok(Route::resolve(
            self.tree().kind(parent)?,
            self.tree().kind(child)?,
        ))
    }

    /// Appends `child` to whichever attachment point `parent` exposes for it.
    pub fn attach(&mut self, parent: impl Into<Option<NodeId>>, child: NodeId) -> Outcome {
        let Some(parent) = parent.into() else {
            self.report(Diagnostic::DetachedParent {
                op: Operation::Attach,
                child,
            });
            return Outcome::Skipped;
        };
        let result = self.try_attach(parent, child);
        self.absorb(Operation::Attach, result)
    }

    /// Inserts `child` before `anchor`. Only layout containers honour the
    /// position; every other parent degrades to [`Host::attach`].
    pub fn attach_before(
        &mut self,
        parent: impl Into<Option<NodeId>>,
        child: NodeId,
        anchor: NodeId,
    ) -> Outcome {
        let Some(parent) = parent.into() else {
            self.report(Diagnostic::DetachedParent {
                op: Operation::AttachBefore,
                child,
            });
            return Outcome::Skipped;
        };
        let result = self.try_attach_before(parent, child, anchor);
        self.absorb(Operation::AttachBefore, result)
    }

    /// Removes `child` from the attachment point `parent` holds it in.
    pub fn detach(&mut self, parent: impl Into<Option<NodeId>>, child: NodeId) -> Outcome {
        let Some(parent) = parent.into() else {
            self.report(Diagnostic::DetachedParent {
                op: Operation::Detach,
                child,
            });
            return Outcome::Skipped;
        };
        let result = self.try_detach(parent, child);
        self.absorb(Operation::Detach, result)
    }

    fn absorb(&self, op: Operation, result: Result<Outcome, NodeError>) -> Outcome {
        result.unwrap_or_else(|error| {
            self.report(Diagnostic::Node { op, error });
            Outcome::Skipped
        })
    }

    fn try_attach(&mut self, parent: NodeId, child: NodeId) -> Result<Outcome, NodeError> {
        let route = self.route(parent, child)?;
        log::debug!("[attach] ({route:?}) {parent} > {child}");
        if route == Route::RejectPage {
            self.report(Diagnostic::PageAsChild {
                op: Operation::Attach,
                parent,
                child,
            });
            return Ok(Outcome::Skipped);
        }
        let tree = self.tree_mut();
        if let Some(slot) = route.slot() {
            tree.set_slot(parent, slot, Some(child))?;
            return Ok(Outcome::Applied(route));
        }
        match route {
            Route::Ordered => tree.add_child(parent, child)?,
            Route::ActionItem => tree.add_action_item(parent, child)?,
            Route::TabItem => {
                let current = tree.tab_items(parent)?.unwrap_or_else(|| Rc::from([]));
                let items: Rc<[NodeId]> = current
                    .iter()
                    .copied()
                    .filter(|&item| item != child)
                    .chain(iter::once(child))
                    .collect();
                tree.set_tab_items(parent, items)?;
            }
            _ => tree.add_view(parent, child)?,
        }
        Ok(Outcome::Applied(route))
    }

    fn try_attach_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        anchor: NodeId,
    ) -> Result<Outcome, NodeError> {
        let route = self.route(parent, child)?;
        log::debug!("[attach_before] ({route:?}) {parent} > {child} before {anchor}");
        if route != Route::Ordered {
            // A slot holds one occupant, so there is no order to lose.
            if route != Route::RejectPage && route.slot().is_none() {
                self.report(Diagnostic::OrderIgnored {
                    parent,
                    parent_kind: self.tree().kind(parent)?,
                    child,
                    anchor,
                });
            }
            return self.try_attach(parent, child);
        }
        if self.tree().kind(parent)? == NodeKind::Layout(LayoutKind::Grid) {
            self.report(Diagnostic::UntestedGridInsert { parent, child });
        }
        if child == anchor {
            return Ok(Outcome::Applied(route));
        }
        let tree = self.tree_mut();
        if tree.child_index(parent, child)?.is_some() {
            tree.remove_child(parent, child)?;
        }
        match tree.child_index(parent, anchor)? {
            Some(index) => tree.insert_child(parent, child, index)?,
            None => tree.add_child(parent, child)?,
        }
        Ok(Outcome::Applied(route))
    }

    fn try_detach(&mut self, parent: NodeId, child: NodeId) -> Result<Outcome, NodeError> {
        let route = self.route(parent, child)?;
        log::debug!("[detach] ({route:?}) {parent} x {child}");
        match route {
            Route::RejectPage => {
                self.report(Diagnostic::PageAsChild {
                    op: Operation::Detach,
                    parent,
                    child,
                });
                return Ok(Outcome::Skipped);
            }
            Route::PageActionBar => {
                self.report(Diagnostic::ForbiddenDetach { parent, child });
                return Ok(Outcome::Skipped);
            }
            Route::TabItemView => {
                self.report(Diagnostic::UnsupportedDetach {
                    parent,
                    parent_kind: NodeKind::TabViewItem,
                    child,
                });
                return Ok(Outcome::Skipped);
            }
            _ => {}
        }
        if let Some(slot) = route.slot() {
            let occupant = self.tree().slot(parent, slot)?;
            if occupant != Some(child) {
                self.report(Diagnostic::SlotMismatch {
                    parent,
                    slot,
                    child,
                    occupant,
                });
                return Ok(Outcome::Skipped);
            }
            self.tree_mut().set_slot(parent, slot, None)?;
            return Ok(Outcome::Applied(route));
        }
        let tree = self.tree_mut();
        match route {
            Route::Ordered => tree.remove_child(parent, child)?,
            Route::ActionItem => tree.remove_action_item(parent, child)?,
            Route::TabItem => {
                let current = tree.tab_items(parent)?.unwrap_or_else(|| Rc::from([]));
                let items: Rc<[NodeId]> = current
                    .iter()
                    .copied()
                    .filter(|&item| item != child)
                    .collect();
                tree.set_tab_items(parent, items)?;
            }
            _ => tree.remove_view(parent, child)?,
        }
        Ok(Outcome::Applied(route))
    }
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
