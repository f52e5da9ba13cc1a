//! The Assembla resource tree.
//!
//! The tree is described declaratively with [`Blueprint`]s and built once.
//! Its shape:
//!
//! ```text
//! users
//! spaces
//! ├── space_tools
//! │   └── merge_requests
//! │       └── versions
//! │           ├── votes
//! │           └── comments
//! ├── repos            (find only)
//! │   ├── commit       (find, then read)
//! │   └── commits      (all / read)
//! └── search           (read with params)
//! ```
//!
//! Every node is also reachable under the camelCase spelling of its name
//! (`spaceTools`, `mergeRequests`); both spellings resolve to the same node.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use crate::rest::capability::NodeKind;
use crate::rest::dispatch::Dispatcher;
use crate::rest::errors::UsageError;
use crate::rest::node::ResourceNode;

/// Declarative description of a resource subtree.
///
/// # Example
///
/// ```rust
/// use assembla_api::rest::{Blueprint, NodeKind};
///
/// let tickets = Blueprint::new("tickets")
///     .child(Blueprint::new("comments"))
///     .child(Blueprint::with_kind("activity", NodeKind::ReadOnly));
///
/// assert_eq!(tickets.children().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blueprint {
    name: String,
    kind: NodeKind,
    children: Vec<Blueprint>,
}

impl Blueprint {
    /// Creates a [`NodeKind::Standard`] resource without children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_kind(name, NodeKind::Standard)
    }

    /// Creates a resource of the given kind without children.
    #[must_use]
    pub fn with_kind(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            children: Vec::new(),
        }
    }

    /// Adds a child resource.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Returns the resource name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the child blueprints.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Builds the subtree as a root node whose requests go to `dispatcher`.
    #[must_use]
    pub fn build(&self, dispatcher: &Arc<dyn Dispatcher>) -> Arc<ResourceNode> {
        self.build_under(None, dispatcher)
    }

    fn build_under(
        &self,
        parent: Option<Weak<ResourceNode>>,
        dispatcher: &Arc<dyn Dispatcher>,
    ) -> Arc<ResourceNode> {
        Arc::new_cyclic(|me| {
            let mut children = HashMap::new();
            for blueprint in &self.children {
                let child = blueprint.build_under(Some(me.clone()), dispatcher);
                register(&mut children, &blueprint.name, child);
            }

            ResourceNode::new(
                self.name.clone(),
                self.kind,
                parent,
                children,
                Arc::clone(dispatcher),
            )
        })
    }
}

/// Converts a snake_case name to camelCase, e.g. `space_tools` to `spaceTools`.
#[must_use]
pub fn camelize(name: &str) -> String {
    let mut camel = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            camel.extend(c.to_uppercase());
            upper_next = false;
        } else {
            camel.push(c);
        }
    }
    if upper_next {
        camel.push('_');
    }
    camel
}

/// Inserts `node` under `name` and under its camelCase alias.
fn register(
    index: &mut HashMap<String, Arc<ResourceNode>>,
    name: &str,
    node: Arc<ResourceNode>,
) {
    index.insert(camelize(name), Arc::clone(&node));
    index.insert(name.to_string(), node);
}

/// The generic part of the tree.
fn structure() -> [Blueprint; 2] {
    let versions = Blueprint::new("versions")
        .child(Blueprint::new("votes"))
        .child(Blueprint::new("comments"));
    let space_tools =
        Blueprint::new("space_tools").child(Blueprint::new("merge_requests").child(versions));

    [
        Blueprint::new("users"),
        Blueprint::new("spaces").child(space_tools),
    ]
}

/// Grafts the resources with their own operation sets onto `spaces`.
fn attach_custom_handlers(spaces: Blueprint) -> Blueprint {
    let repos = Blueprint::with_kind("repos", NodeKind::Repos)
        .child(Blueprint::with_kind("commit", NodeKind::Singleton))
        .child(Blueprint::with_kind("commits", NodeKind::Collection));

    spaces
        .child(repos)
        .child(Blueprint::with_kind("search", NodeKind::Search))
}

/// The root of the Assembla API resources.
///
/// Owns every node. Handles returned by [`users`](Self::users),
/// [`spaces`](Self::spaces) and [`resource`](Self::resource) borrow the tree.
///
/// # Example
///
/// ```rust,ignore
/// let tree = ResourceTree::new(dispatcher);
///
/// tree.spaces().find("s1")?.child("spaceTools")?.find("t1")?;
/// assert_eq!(
///     tree.spaces().child("space_tools")?.path()?,
///     "spaces/s1/space_tools/t1"
/// );
/// ```
#[derive(Debug)]
pub struct ResourceTree {
    users: Arc<ResourceNode>,
    spaces: Arc<ResourceNode>,
    index: HashMap<String, Arc<ResourceNode>>,
}

impl ResourceTree {
    /// Builds the tree; every request goes to `dispatcher`.
    #[must_use]
    pub fn new(dispatcher: Arc<dyn Dispatcher>) -> Self {
        let [users, spaces] = structure();
        let [users, spaces] = [users, attach_custom_handlers(spaces)]
            .map(|blueprint| blueprint.build(&dispatcher));

        let mut index = HashMap::new();
        register(&mut index, users.name(), Arc::clone(&users));
        register(&mut index, spaces.name(), Arc::clone(&spaces));

        Self {
            users,
            spaces,
            index,
        }
    }

    /// Returns the `users` resource.
    #[must_use]
    pub fn users(&self) -> &ResourceNode {
        &self.users
    }

    /// Returns the `spaces` resource.
    #[must_use]
    pub fn spaces(&self) -> &ResourceNode {
        &self.spaces
    }

    /// Returns a root resource by name or camelCase alias.
    ///
    /// # Errors
    ///
    /// Returns [`UsageError::UnknownResource`] if there is no such resource.
    pub fn resource(&self, name: &str) -> Result<&ResourceNode, UsageError> {
        self.index
            .get(name)
            .map(AsRef::as_ref)
            .ok_or_else(|| UsageError::UnknownResource {
                parent: "api".to_string(),
                name: name.to_string(),
            })
    }

    /// Clears the state of every node.
    pub fn reset(&self) {
        self.users.reset_subtree();
        self.spaces.reset_subtree();
    }
}
