use crate::context::HostContext;
use crate::host::Host;
use crate::props::Props;
use crate::tree::{Child, HostTree, PropertySetter};
use crate::NodeId;

/// Update state retained for one intrinsic node between snapshots.
///
/// The driving engine calls [`Intrinsic::update`] once per snapshot, strictly
/// in sequence; the returned id is the node's current renderable instance.
#[derive(Clone, Debug)]
pub struct Intrinsic {
    node: NodeId,
    context: HostContext,
    props: Props,
    children: Vec<Child>,
    updates: usize,
}

impl Intrinsic {
    pub fn new(node: NodeId, context: HostContext) -> Self {
        Self {
            node,
            context,
            props: Props::new(),
            children: Vec::new(),
            updates: 0,
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn context(&self) -> &HostContext {
        &self.context
    }

    pub fn props(&self) -> &Props {
        &self.props
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// Context handed to the children of this node.
    pub fn child_context<T, S>(&self, host: &Host<T, S>) -> HostContext
    where
        T: HostTree,
        S: PropertySetter<T>,
    {
        match host.tree().kind(self.node) {
            Ok(kind) => self.context.child_of(kind),
            Err(_) => self.context,
        }
    }

    pub fn update<T, S>(&mut self, host: &mut Host<T, S>, props: Props, children: Vec<Child>) -> NodeId
    where
        T: HostTree,
        S: PropertySetter<T>,
    {
        let initial = self.updates == 0;
        host.reconcile_properties(self.node, &self.props, &props, initial, &self.context);
        self.props = props;
        if !self.children.is_empty() || !children.is_empty() {
            host.reconcile_children(self.node, &children);
        }
        self.children = children;
        self.updates += 1;
        self.node
    }
}
