//! Operation sets of the different kinds of resource nodes.

use crate::rest::path::ResourceOperation;

/// What a resource node is allowed to do.
///
/// Every node shares the same state machine; its kind only decides which
/// operations may enter it.
///
/// | Kind | find | all | create | read | update | delete |
/// |------|------|-----|--------|------|--------|--------|
/// | `Standard` | yes | yes | yes | yes | yes | yes |
/// | `ReadOnly` | yes | yes | | yes | | |
/// | `Collection` | | yes | | yes | | |
/// | `Singleton` | yes | | | yes (needs `find`) | | |
/// | `Repos` | yes | | | | | |
/// | `Search` | | | | yes | | |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// Full CRUD resource.
    #[default]
    Standard,
    /// Readable, never written.
    ReadOnly,
    /// Read-only listing without member access, e.g. `commits`.
    Collection,
    /// Read-only member reached only through `find`, e.g. `commit`.
    Singleton,
    /// Path segment that is only ever narrowed with `find`, e.g. `repos`.
    Repos,
    /// Parameterized read that clears the enclosing subtree once issued.
    Search,
}

impl NodeKind {
    /// Returns `true` if nodes of this kind accept `operation`.
    #[must_use]
    pub const fn allows(self, operation: ResourceOperation) -> bool {
        use ResourceOperation::{All, Find, Read};

        match self {
            Self::Standard => true,
            Self::ReadOnly => matches!(operation, Find | All | Read),
            Self::Collection => matches!(operation, All | Read),
            Self::Singleton => matches!(operation, Find | Read),
            Self::Repos => matches!(operation, Find),
            Self::Search => matches!(operation, Read),
        }
    }

    /// Returns `true` if `read` needs a prior `find`.
    #[must_use]
    pub const fn read_requires_id(self) -> bool {
        matches!(self, Self::Singleton)
    }

    /// Returns `true` if a request from this node also clears its parent's subtree.
    #[must_use]
    pub const fn resets_parent_subtree(self) -> bool {
        matches!(self, Self::Search)
    }
}
