//! Resource nodes: the stateful builder behind every API call.
//!
//! Each node of the resource tree remembers the id selected with `find` and
//! the parameters set with `params` until the next terminal operation
//! (`create`, `read`, `update`, `delete`). A terminal operation composes the
//! path from the node and its ancestors, hands the request to the
//! [`Dispatcher`], and clears the state of the node and all of its ancestors
//! before the returned future is even polled.
//!
//! # Concurrency
//!
//! State lives behind a mutex per node, so nodes are `Send + Sync`, but two
//! chains running on the same nodes at the same time still overwrite each
//! other's ids. Serialize calls per tree, or use one tree per task.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use serde_json::Value;

use crate::rest::capability::NodeKind;
use crate::rest::dispatch::{ApiRequest, Dispatcher, ResponseFuture};
use crate::rest::errors::UsageError;
use crate::rest::path::{PathBuilder, ResourceOperation};
use crate::rest::payload::Payload;

/// Transient per-call state of a node.
#[derive(Debug, Default)]
struct NodeState {
    id: Option<String>,
    params: Payload,
}

/// A named resource in the tree.
///
/// Nodes are owned top-down by the [`ResourceTree`](crate::rest::ResourceTree);
/// the parent link is weak and only used to compose paths and to reset
/// ancestors.
///
/// # Example
///
/// ```rust,ignore
/// let votes = api
///     .spaces()
///     .find("s1")?
///     .child("spaceTools")?
///     .find("t1")?
///     .child("merge_requests")?
///     .find("m1")?
///     .child("versions")?
///     .find("v1")?
///     .child("votes")?
///     .read()?
///     .await?;
/// ```
pub struct ResourceNode {
    name: String,
    kind: NodeKind,
    parent: Option<Weak<ResourceNode>>,
    children: HashMap<String, Arc<ResourceNode>>,
    dispatcher: Arc<dyn Dispatcher>,
    state: Mutex<NodeState>,
}

// Verify ResourceNode is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceNode>();
};

impl fmt::Debug for ResourceNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state();
        let mut children: Vec<&str> = self.unique_children().map(|c| c.name()).collect();
        children.sort_unstable();

        f.debug_struct("ResourceNode")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("id", &state.id)
            .field("params", &state.params)
            .field("children", &children)
            .finish_non_exhaustive()
    }
}

impl ResourceNode {
    pub(crate) fn new(
        name: impl Into<String>,
        kind: NodeKind,
        parent: Option<Weak<Self>>,
        children: HashMap<String, Arc<Self>>,
        dispatcher: Arc<dyn Dispatcher>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            parent,
            children,
            dispatcher,
            state: Mutex::new(NodeState::default()),
        }
    }

    /// Returns the path segment name, e.g. `space_tools`.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the kind of this node.
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the id selected with `find`, if any.
    ///
    /// An empty id counts as no id.
    #[must_use]
    pub fn id(&self) -> Option<String> {
        self.state().id.clone().filter(|id| !id.is_empty())
    }

    /// Returns a copy of the parameters set with `params`.
    #[must_use]
    pub fn pending_params(&self) -> Payload {
        self.state().params.clone()
    }

    /// Returns the parent node, or `None` at the root or once the tree is gone.
    #[must_use]
    pub fn parent(&self) -> Option<Arc<Self>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Returns the child resource called `name`.
    ///
    /// Children are reachable under their snake_case name and under its
    /// camelCase alias; both resolve to the same node.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::UnknownResource`] if there is no such child.
    pub fn child(&self, name: &str) -> Result<&Self, UsageError> {
        self.children
            .get(name)
            .map(AsRef::as_ref)
            .ok_or_else(|| UsageError::UnknownResource {
                parent: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Returns the names of the child resources, aliases excluded.
    #[must_use]
    pub fn child_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.unique_children().map(|c| c.name()).collect();
        names.sort_unstable();
        names
    }

    /// Selects the member `id` for the next call.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::NotAllowed`] if this node has no members.
    pub fn find(&self, id: impl Into<String>) -> Result<&Self, UsageError> {
        self.ensure_allowed(ResourceOperation::Find)?;
        self.state().id = Some(id.into());
        Ok(self)
    }

    /// Selects the whole collection for the next call.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::NotAllowed`] if this node is not a collection.
    pub fn all(&self) -> Result<&Self, UsageError> {
        self.ensure_allowed(ResourceOperation::All)?;
        self.state().id = None;
        Ok(self)
    }

    /// Replaces the parameters sent with the next call.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::InvalidParams`] if `params` is neither a JSON
    /// object nor `null`; the pending parameters are left as they were.
    pub fn params(&self, params: impl Into<Value>) -> Result<&Self, UsageError> {
        let params = self.payload(params.into())?;
        self.state().params = params;
        Ok(self)
    }

    /// Composes the path of this node from its ancestors' names and ids.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::MissingParentId`] naming the nearest ancestor
    /// without an id, or [`UsageError::Detached`] if an ancestor is gone.
    pub fn path(&self) -> Result<String, UsageError> {
        let mut segments = vec![(self.name.clone(), self.id())];

        let mut child_name = self.name.clone();
        let mut next = self.parent.clone();
        while let Some(weak) = next {
            let parent = weak.upgrade().ok_or_else(|| UsageError::Detached {
                node: child_name.clone(),
            })?;
            let Some(parent_id) = parent.id() else {
                return Err(UsageError::MissingParentId {
                    parent: parent.name.clone(),
                    node: child_name,
                    origin: self.name.clone(),
                });
            };

            segments.push((parent.name.clone(), Some(parent_id)));
            child_name = parent.name.clone();
            next = parent.parent.clone();
        }

        Ok(segments
            .into_iter()
            .rev()
            .fold(PathBuilder::new(), |builder, (name, id)| {
                builder.push(Some(name)).push(id)
            })
            .compose())
    }

    /// Clears the id and parameters of this node and of all its ancestors.
    pub fn reset(&self) {
        self.clear();

        let mut next = self.parent();
        while let Some(parent) = next {
            parent.clear();
            next = parent.parent();
        }
    }

    /// Clears the id and parameters of this node and of all its descendants.
    pub fn reset_subtree(&self) {
        self.clear();
        for child in self.unique_children() {
            child.reset_subtree();
        }
    }

    /// Creates a member of this collection (POST), sending `data` over the
    /// pending parameters.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError`] if `data` is not a JSON object, if the node is
    /// read-only, if `find` selected a member, or if the path cannot be
    /// composed.
    pub fn create(&self, data: impl Into<Value>) -> Result<ResponseFuture, UsageError> {
        let data = self.payload(data.into())?;
        self.dispatch(ResourceOperation::Create, Some(data))
    }

    /// Reads the selected member, or the collection when none is selected (GET).
    ///
    /// # Errors
    ///
    /// Returns [`UsageError`] if reading is not allowed, if a singleton has
    /// no id, or if the path cannot be composed.
    pub fn read(&self) -> Result<ResponseFuture, UsageError> {
        self.dispatch(ResourceOperation::Read, None)
    }

    /// Updates the selected member (PUT), sending `data` over the pending
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError`] if `data` is not a JSON object, if the node is
    /// read-only, if no member is selected, or if the path cannot be composed.
    pub fn update(&self, data: impl Into<Value>) -> Result<ResponseFuture, UsageError> {
        let data = self.payload(data.into())?;
        self.dispatch(ResourceOperation::Update, Some(data))
    }

    /// Deletes the selected member (DELETE).
    ///
    /// # Errors
    ///
    /// Returns [`UsageError`] if the node is read-only, if no member is
    /// selected, or if the path cannot be composed.
    pub fn delete(&self) -> Result<ResponseFuture, UsageError> {
        self.dispatch(ResourceOperation::Delete, None)
    }

    /// Runs the `search` child of this node with `params`.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::UnknownResource`] if this node has no `search`
    /// child, or whatever the search read fails with.
    pub fn search(&self, params: impl Into<Value>) -> Result<ResponseFuture, UsageError> {
        self.child("search")?.params(params)?.read()
    }

    fn dispatch(
        &self,
        operation: ResourceOperation,
        data: Option<Payload>,
    ) -> Result<ResponseFuture, UsageError> {
        let Some(method) = operation.http_method() else {
            return Err(UsageError::NotAllowed {
                node: self.name.clone(),
                operation,
            });
        };
        self.ensure_allowed(operation)?;
        self.ensure_id_precondition(operation)?;

        let path = self.path()?;
        let params = self.pending_params();
        let payload = match data {
            Some(data) => params.merged(data),
            None => params,
        };

        self.reset();
        if self.kind.resets_parent_subtree() {
            if let Some(parent) = self.parent() {
                parent.reset_subtree();
            }
        }

        tracing::debug!(node = %self.name, %method, %path, "dispatching resource request");

        let request = ApiRequest {
            path,
            payload,
            method,
        };
        let dispatcher = Arc::clone(&self.dispatcher);
        Ok(Box::pin(async move { dispatcher.dispatch(request).await }))
    }

    fn ensure_allowed(&self, operation: ResourceOperation) -> Result<(), UsageError> {
        if self.kind.allows(operation) {
            Ok(())
        } else {
            Err(UsageError::NotAllowed {
                node: self.name.clone(),
                operation,
            })
        }
    }

    fn ensure_id_precondition(&self, operation: ResourceOperation) -> Result<(), UsageError> {
        let has_id = self.id().is_some();
        match operation {
            ResourceOperation::Create if has_id => Err(UsageError::IdPresent),
            ResourceOperation::Update | ResourceOperation::Delete if !has_id => {
                Err(UsageError::IdRequired {
                    operation: operation.as_str().to_string(),
                })
            }
            ResourceOperation::Read if !has_id && self.kind.read_requires_id() => {
                Err(UsageError::IdRequired {
                    operation: format!("{}.read()", self.name),
                })
            }
            _ => Ok(()),
        }
    }

    fn payload(&self, value: Value) -> Result<Payload, UsageError> {
        Payload::try_from(value).map_err(|_| UsageError::InvalidParams {
            node: self.name.clone(),
        })
    }

    fn clear(&self) {
        let mut state = self.state();
        state.id = None;
        state.params = Payload::new();
    }

    fn state(&self) -> MutexGuard<'_, NodeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Children without their aliases.
    fn unique_children(&self) -> impl Iterator<Item = &Self> {
        self.children
            .iter()
            .filter(|(key, child)| **key == child.name)
            .map(|(_, child)| child.as_ref())
    }
}
