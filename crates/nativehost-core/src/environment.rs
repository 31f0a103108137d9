//! Tag environment: maps tag names to node construction, plus the default,
//! raw and portal hooks the driving engine calls into.

use crate::collections::map::HashMap;
use crate::context::HostContext;
use crate::error::{PortalError, RawError};
use crate::host::Host;
use crate::intrinsic::Intrinsic;
use crate::kind::{LayoutKind, NodeKind};
use crate::portal::Portal;
use crate::raw::{parse_markup, Markup, Raw};
use crate::tree::{Child, HostTree, PropertySetter};
use crate::NodeId;

pub type Constructor<T> = Box<dyn Fn(&mut T, &str) -> NodeId>;

pub struct Environment<T> {
    intrinsics: HashMap<String, Constructor<T>>,
    default: Constructor<T>,
}

impl<T: HostTree + 'static> Environment<T> {
    /// Environment resolving the built-in catalogue through
    /// [`NodeKind::from_tag`]; unknown tags construct a stack layout.
    pub fn new() -> Self {
        Self {
            intrinsics: HashMap::default(),
            default: Box::new(|tree: &mut T, tag: &str| {
                let kind =
                    NodeKind::from_tag(tag).unwrap_or(NodeKind::Layout(LayoutKind::Stack));
                tree.create(kind, tag)
            }),
        }
    }
}

impl<T: HostTree + 'static> Default for Environment<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: HostTree> Environment<T> {
    /// Overrides construction for one tag. Tags are matched exactly.
    pub fn register(
        &mut self,
        tag: impl Into<String>,
        constructor: impl Fn(&mut T, &str) -> NodeId + 'static,
    ) -> &mut Self {
        self.intrinsics.insert(tag.into(), Box::new(constructor));
        self
    }

    /// Replaces the constructor used for tags without a registration.
    pub fn with_default(mut self, constructor: impl Fn(&mut T, &str) -> NodeId + 'static) -> Self {
        self.default = Box::new(constructor);
        self
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.intrinsics.contains_key(tag)
    }

    pub fn construct(&self, tree: &mut T, tag: &str) -> NodeId {
        match self.intrinsics.get(tag) {
            Some(constructor) => constructor(tree, tag),
            None => (self.default)(tree, tag),
        }
    }

    /// Constructs the node for `tag` and returns its update state.
    pub fn intrinsic<S>(&self, host: &mut Host<T, S>, tag: &str, context: HostContext) -> Intrinsic
    where
        S: PropertySetter<T>,
    {
        let node = self.construct(host.tree_mut(), tag);
        log::debug!("[intrinsic] <{tag}> constructed as {node}");
        Intrinsic::new(node, context)
    }

    /// Resolves raw content to a node, building parsed markup into the tree.
    /// Several top-level elements are wrapped in a default container.
    pub fn raw<S>(
        &self,
        host: &mut Host<T, S>,
        raw: Raw,
        context: HostContext,
    ) -> Result<NodeId, RawError>
    where
        S: PropertySetter<T>,
    {
        let markup = match raw {
            Raw::Node(node) => return Ok(node),
            Raw::Markup(markup) => parse_markup(&markup)?,
        };
        let roots: Vec<Child> = markup
            .iter()
            .map(|node| self.build(host, node, context))
            .collect();
        match roots.as_slice() {
            [Child::Node(node)] => Ok(*node),
            _ => {
                let wrapper = (self.default)(host.tree_mut(), "fragment");
                host.reconcile_children(wrapper, &roots);
                Ok(wrapper)
            }
        }
    }

    fn build<S>(&self, host: &mut Host<T, S>, markup: &Markup, context: HostContext) -> Child
    where
        S: PropertySetter<T>,
    {
        match markup {
            Markup::Text(text) => Child::Text(text.clone()),
            Markup::Element {
                tag,
                attrs,
                children,
            } => {
                let mut intrinsic = self.intrinsic(host, tag, context);
                let child_context = intrinsic.child_context(host);
                let children = children
                    .iter()
                    .map(|child| self.build(host, child, child_context))
                    .collect();
                Child::Node(intrinsic.update(host, attrs.clone(), children))
            }
        }
    }

    /// Opens a portal onto `root`.
    pub fn portal(&self, root: Option<NodeId>) -> Result<Portal, PortalError> {
        Portal::new(root)
    }
}

impl<T> std::fmt::Debug for Environment<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
            .field("intrinsics", &self.intrinsics.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "tests/environment_tests.rs"]
mod tests;
