#![doc = r"Host backend that reconciles component trees into a native widget tree."]

pub mod collections;
pub mod context;
pub mod diagnostics;
pub mod dispatch;
pub mod environment;
pub mod error;
pub mod host;
pub mod intrinsic;
pub mod kind;
pub mod memory;
pub mod portal;
pub mod props;
pub mod raw;
mod reconcile;
pub mod tree;

pub use context::HostContext;
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, Operation};
pub use dispatch::{Outcome, Route};
pub use environment::{Constructor, Environment};
pub use error::{NodeError, PortalError, RawError};
pub use host::Host;
pub use intrinsic::Intrinsic;
pub use kind::{LayoutKind, NodeKind, Slot};
pub use memory::{MemoryProperties, MemoryTree, Widget};
pub use portal::{Portal, PortalGuard};
pub use props::{Opaque, PropValue, Props, StyleMap};
pub use raw::{parse_markup, Markup, Raw};
pub use tree::{live_children, Child, HostTree, PropertySetter};

pub type NodeId = usize;

/// Host over the in-memory tree with verbatim property storage.
pub type MemoryHost = Host<MemoryTree, MemoryProperties>;

/// Convenience constructor for [`MemoryHost`].
pub fn memory_host() -> MemoryHost {
    Host::new(MemoryTree::new(), MemoryProperties)
}
