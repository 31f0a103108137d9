//! Observable, non-fatal signals raised when the dispatcher skips work.
//!
//! A detached or partially-built tree is an expected transient state, so
//! none of these abort reconciliation. They are handed to a
//! [`DiagnosticSink`]; the default [`LogSink`] forwards them to `log`.

use std::fmt;

use crate::error::NodeError;
use crate::kind::{NodeKind, Slot};
use crate::NodeId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Attach,
    AttachBefore,
    Detach,
    Reconcile,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// The parent is absent, typically a render into a detached tree.
    DetachedParent { op: Operation, child: NodeId },
    /// Pages are never children of another node.
    PageAsChild {
        op: Operation,
        parent: NodeId,
        child: NodeId,
    },
    /// The target toolkit forbids this detach (action bar from page).
    ForbiddenDetach { parent: NodeId, child: NodeId },
    /// The target toolkit has no primitive for this detach (tab view item view).
    UnsupportedDetach {
        parent: NodeId,
        parent_kind: NodeKind,
        child: NodeId,
    },
    /// A detach targeted a slot occupied by some other node.
    SlotMismatch {
        parent: NodeId,
        slot: Slot,
        child: NodeId,
        occupant: Option<NodeId>,
    },
    /// Positional insertion requested on a parent without ordered children.
    OrderIgnored {
        parent: NodeId,
        parent_kind: NodeKind,
        child: NodeId,
        anchor: NodeId,
    },
    /// Positional insertion into a grid layout ignores row and column placement.
    UntestedGridInsert { parent: NodeId, child: NodeId },
    /// A tree primitive failed; the operation was skipped.
    Node { op: Operation, error: NodeError },
}

impl Diagnostic {
    pub fn level(&self) -> log::Level {
        match self {
            Self::DetachedParent { .. }
            | Self::PageAsChild { .. }
            | Self::OrderIgnored { .. }
            | Self::UntestedGridInsert { .. }
            | Self::Node { .. } => log::Level::Warn,
            Self::ForbiddenDetach { .. } | Self::UnsupportedDetach { .. } => log::Level::Info,
            Self::SlotMismatch { .. } => log::Level::Debug,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DetachedParent { op, child } => {
                write!(f, "[{op:?}] parent is absent; no-op for child {child}")
            }
            Self::PageAsChild { op, parent, child } => write!(
                f,
                "[{op:?}] page cannot be a true child; no-op for {parent} > {child}"
            ),
            Self::ForbiddenDetach { parent, child } => write!(
                f,
                "[Detach] detaching action bar from page is forbidden; no-op for {parent} x {child}"
            ),
            Self::UnsupportedDetach {
                parent,
                parent_kind,
                child,
            } => write!(
                f,
                "[Detach] detaching from {parent_kind:?} is not supported; no-op for {parent} x {child}"
            ),
            Self::SlotMismatch {
                parent,
                slot,
                child,
                occupant,
            } => write!(
                f,
                "[Detach] {slot:?} slot of {parent} holds {occupant:?}, not {child}; left untouched"
            ),
            Self::OrderIgnored {
                parent,
                parent_kind,
                child,
                anchor,
            } => write!(
                f,
                "[AttachBefore] {parent_kind:?} has no ordered children; appending {parent} > {child} (anchor {anchor})"
            ),
            Self::UntestedGridInsert { parent, child } => write!(
                f,
                "[AttachBefore] positional insert into grid layout ignores cell placement: {parent} > {child}"
            ),
            Self::Node { op, error } => write!(f, "[{op:?}] skipped: {error}"),
        }
    }
}

pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic);
}

/// Forwards diagnostics to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&self, diagnostic: &Diagnostic) {
        log::log!(diagnostic.level(), "{diagnostic}");
    }
}
