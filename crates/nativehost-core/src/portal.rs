use crate::error::PortalError;
use crate::host::Host;
use crate::tree::{Child, HostTree, PropertySetter};
use crate::NodeId;

/// Binds a child list to an externally supplied root outside the normal
/// parent chain.
///
/// The root's children are emptied when the root changes and again in
/// [`Portal::finish`], which the owner must call once the portal stops
/// receiving updates, however it exits.
#[derive(Debug)]
pub struct Portal {
    root: NodeId,
    finished: bool,
}

impl Portal {
    pub fn new(root: Option<NodeId>) -> Result<Self, PortalError> {
        let root = root.ok_or(PortalError::MissingRoot)?;
        Ok(Self {
            root,
            finished: false,
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn update<T, S>(
        &mut self,
        host: &mut Host<T, S>,
        root: Option<NodeId>,
        children: &[Child],
    ) -> Result<NodeId, PortalError>
    where
        T: HostTree,
        S: PropertySetter<T>,
    {
        let root = root.ok_or(PortalError::MissingRoot)?;
        if root != self.root {
            log::debug!("[portal] root moved {} -> {root}", self.root);
            host.reconcile_children(self.root, &[]);
            self.root = root;
        }
        host.reconcile_children(self.root, children);
        Ok(self.root)
    }

    /// Empties the current root. Runs on every exit path of the portal.
    pub fn finish<T, S>(mut self, host: &mut Host<T, S>)
    where
        T: HostTree,
        S: PropertySetter<T>,
    {
        host.reconcile_children(self.root, &[]);
        self.finished = true;
    }
}

/// Drives a [`Portal`] while holding the host, finishing it when dropped,
/// including during unwinding.
pub struct PortalGuard<'h, T, S>
where
    T: HostTree,
    S: PropertySetter<T>,
{
    host: &'h mut Host<T, S>,
    portal: Option<Portal>,
}

impl<'h, T, S> PortalGuard<'h, T, S>
where
    T: HostTree,
    S: PropertySetter<T>,
{
    pub fn new(host: &'h mut Host<T, S>, root: Option<NodeId>) -> Result<Self, PortalError> {
        let portal = Portal::new(root)?;
        Ok(Self {
            host,
            portal: Some(portal),
        })
    }

    pub fn host(&self) -> &Host<T, S> {
        self.host
    }

    pub fn root(&self) -> Option<NodeId> {
        self.portal.as_ref().map(Portal::root)
    }

    pub fn update(
        &mut self,
        root: Option<NodeId>,
        children: &[Child],
    ) -> Result<NodeId, PortalError> {
        let portal = self.portal.as_mut().ok_or(PortalError::MissingRoot)?;
        portal.update(self.host, root, children)
    }
}

impl<T, S> Drop for PortalGuard<'_, T, S>
where
    T: HostTree,
    S: PropertySetter<T>,
{
    fn drop(&mut self) {
        if let Some(portal) = self.portal.take() {
            portal.finish(self.host);
        }
    }
}

impl Drop for Portal {
    fn drop(&mut self) {
        if !self.finished {
            log::warn!(
                "[portal] dropped without finish; children of root {} were left attached",
                self.root
            );
        }
    }
}
