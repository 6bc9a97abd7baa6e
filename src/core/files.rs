//! core::files
//!
//! A small in-memory file tree whose nodes know their full [`Name`].
//!
//! # Architecture
//!
//! The tree is an arena: nodes live in one vector and refer to each other
//! by [`NodeId`]. Every node except the root has a parent directory.
//!
//! - Directories hold an ordered list of children
//! - Files track an open/closed/deleted state
//! - Links forward their base name (and renames) to a target node
//!
//! # Full Names
//!
//! A node's full name is built by walking parent links up to the root and
//! appending each base name to a `/`-delimited [`Name`]. The root's name
//! is the single empty component, so `/usr/bin` has the components
//! `["", "usr", "bin"]`.
//!
//! # Invariants
//!
//! - Every node except the root has a non-empty base name
//! - A node reachable from a directory's children has that directory as
//!   its parent
//!
//! Reading a node that breaks the base-name invariant is an
//! `InvalidState` error. A search that runs into such a node fails with
//! [`FileSystemError::ServiceFailure`].

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use super::contract::{invariant, require, ContractError};
use super::escape;
use super::name::Name;
use super::types::Delimiter;

/// The delimiter used for full names.
pub const PATH_DELIMITER: char = '/';

/// Errors from file tree operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FileSystemError {
    #[error(transparent)]
    Contract(#[from] ContractError),

    #[error("filesystem failed: {message}")]
    ServiceFailure {
        message: String,
        #[source]
        source: ContractError,
    },
}

impl FileSystemError {
    /// The underlying contract error, if this is not a service failure.
    pub fn contract(&self) -> Option<&ContractError> {
        match self {
            FileSystemError::Contract(e) => Some(e),
            FileSystemError::ServiceFailure { .. } => None,
        }
    }
}

/// Handle to a node in a [`FileSystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle state of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileState {
    Open,
    #[default]
    Closed,
    Deleted,
}

/// The kind of a node, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Directory,
    File,
    Link,
}

#[derive(Debug)]
enum Payload {
    Directory { children: Vec<NodeId> },
    File { state: FileState },
    Link { target: Option<NodeId> },
}

#[derive(Debug)]
struct Node {
    base_name: String,
    parent: Option<NodeId>,
    payload: Payload,
    /// Set only by fault injection; reading the base name then fails.
    buggy: bool,
}

/// An in-memory file tree rooted at a single directory.
#[derive(Debug)]
pub struct FileSystem {
    nodes: Vec<Node>,
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem {
    /// Create a tree holding only the root directory.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                base_name: String::new(),
                parent: None,
                payload: Payload::Directory {
                    children: Vec::new(),
                },
                buggy: false,
            }],
        }
    }

    /// The root directory.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a directory under `parent`.
    pub fn create_directory(&mut self, parent: NodeId, base_name: &str) -> Result<NodeId, FileSystemError> {
        self.add_node(
            parent,
            base_name,
            Payload::Directory {
                children: Vec::new(),
            },
        )
    }

    /// Create a closed file under `parent`.
    pub fn create_file(&mut self, parent: NodeId, base_name: &str) -> Result<NodeId, FileSystemError> {
        self.add_node(
            parent,
            base_name,
            Payload::File {
                state: FileState::Closed,
            },
        )
    }

    /// Create a link under `parent`, optionally pointing at `target`.
    pub fn create_link(
        &mut self,
        parent: NodeId,
        base_name: &str,
        target: Option<NodeId>,
    ) -> Result<NodeId, FileSystemError> {
        if let Some(target) = target {
            self.node(target)?;
        }
        self.add_node(parent, base_name, Payload::Link { target })
    }

    /// Create a file whose base name invariant is broken.
    #[cfg(any(test, feature = "fault_injection"))]
    pub fn create_buggy_file(&mut self, parent: NodeId, base_name: &str) -> Result<NodeId, FileSystemError> {
        let id = self.create_file(parent, base_name)?;
        self.nodes[id.0].buggy = true;
        Ok(id)
    }

    /// The kind of `id`.
    pub fn kind(&self, id: NodeId) -> Result<NodeKind, FileSystemError> {
        Ok(match self.node(id)?.payload {
            Payload::Directory { .. } => NodeKind::Directory,
            Payload::File { .. } => NodeKind::File,
            Payload::Link { .. } => NodeKind::Link,
        })
    }

    /// The parent directory of `id`, or `None` for the root.
    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>, FileSystemError> {
        Ok(self.node(id)?.parent)
    }

    /// The children of directory `id`, in creation order.
    pub fn children(&self, id: NodeId) -> Result<&[NodeId], FileSystemError> {
        match &self.node(id)?.payload {
            Payload::Directory { children } => Ok(children),
            _ => Err(not_a_directory(id).into()),
        }
    }

    /// Whether directory `dir` directly contains `child`.
    pub fn has_child(&self, dir: NodeId, child: NodeId) -> Result<bool, FileSystemError> {
        Ok(self.children(dir)?.contains(&child))
    }

    /// Detach `child` from directory `dir`.
    ///
    /// The node stays in the arena and keeps its parent link, but is no
    /// longer reachable from `dir`.
    pub fn remove_child(&mut self, dir: NodeId, child: NodeId) -> Result<(), FileSystemError> {
        require(self.has_child(dir, child)?, || {
            format!("node {child} is not a child of {dir}")
        })?;
        if let Payload::Directory { children } = &mut self.nodes[dir.0].payload {
            children.retain(|c| *c != child);
        }
        Ok(())
    }

    /// The base name of `id`. Links report their target's base name.
    pub fn base_name(&self, id: NodeId) -> Result<String, FileSystemError> {
        let id = self.resolve(id)?;
        self.check_base_name(id)?;
        Ok(self.nodes[id.0].base_name.clone())
    }

    /// Rename `id`. Renaming a link renames its target.
    pub fn rename(&mut self, id: NodeId, base_name: &str) -> Result<(), FileSystemError> {
        check_base_name_argument(base_name)?;
        let id = self.resolve(id)?;
        require(id != self.root(), || "the root cannot be renamed".into())?;
        self.nodes[id.0].base_name = base_name.to_string();
        Ok(())
    }

    /// The target of link `id`.
    pub fn link_target(&self, id: NodeId) -> Result<Option<NodeId>, FileSystemError> {
        match self.node(id)?.payload {
            Payload::Link { target } => Ok(target),
            _ => Err(ContractError::IllegalArgument(format!("node {id} is not a link")).into()),
        }
    }

    /// Point link `id` at `target`.
    pub fn set_link_target(&mut self, id: NodeId, target: NodeId) -> Result<(), FileSystemError> {
        self.node(target)?;
        match &mut self.node_mut(id)?.payload {
            Payload::Link { target: t } => {
                *t = Some(target);
                Ok(())
            }
            _ => Err(ContractError::IllegalArgument(format!("node {id} is not a link")).into()),
        }
    }

    /// The full `/`-delimited name of `id`.
    ///
    /// ```
    /// use namekit::core::files::FileSystem;
    ///
    /// let mut fs = FileSystem::new();
    /// let usr = fs.create_directory(fs.root(), "usr").unwrap();
    /// let bin = fs.create_directory(usr, "bin").unwrap();
    ///
    /// let name = fs.full_name(bin).unwrap();
    /// assert_eq!(name.as_string().unwrap(), "/usr/bin");
    /// assert_eq!(name.no_components(), 3);
    /// ```
    pub fn full_name(&self, id: NodeId) -> Result<Name, FileSystemError> {
        let mut chain = vec![id];
        let mut current = id;
        while let Some(parent) = self.node(current)?.parent {
            invariant(chain.len() <= self.nodes.len(), || {
                format!("parent links of node {id} form a cycle")
            })?;
            chain.push(parent);
            current = parent;
        }

        let delimiter = Delimiter::new(PATH_DELIMITER)?;
        let mut name = Name::parse("", delimiter)?;
        for node in chain.into_iter().rev() {
            if node == self.root() {
                continue;
            }
            let base_name = self.base_name(node)?;
            name = name.append(&escape::mask(&base_name, PATH_DELIMITER))?;
        }
        Ok(name)
    }

    /// All nodes at or below `start` whose base name is `base_name`.
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError::ServiceFailure`] if the search reaches a
    /// node whose state is invalid below a directory.
    pub fn find_nodes(&self, start: NodeId, base_name: &str) -> Result<BTreeSet<NodeId>, FileSystemError> {
        log::trace!("searching for '{base_name}' from {start}");
        let mut result = BTreeSet::new();
        self.collect_matches(start, base_name, &mut result, 0)?;
        Ok(result)
    }

    /// The state of file `id`.
    pub fn file_state(&self, id: NodeId) -> Result<FileState, FileSystemError> {
        match self.node(id)?.payload {
            Payload::File { state } => Ok(state),
            _ => Err(not_a_file(id).into()),
        }
    }

    /// Open a closed file.
    pub fn open(&mut self, id: NodeId) -> Result<(), FileSystemError> {
        let state = self.file_state(id)?;
        require(state != FileState::Open, || format!("file {id} is already open"))?;
        require_not_deleted(id, state)?;
        self.set_file_state(id, FileState::Open)
    }

    /// Read `len` bytes from an open file.
    pub fn read(&self, id: NodeId, len: usize) -> Result<Vec<u8>, FileSystemError> {
        let state = self.file_state(id)?;
        require(state != FileState::Closed, || format!("file {id} is not open"))?;
        require_not_deleted(id, state)?;
        Ok(vec![0; len])
    }

    /// Write to an open file.
    pub fn write(&mut self, id: NodeId, data: &[u8]) -> Result<(), FileSystemError> {
        let state = self.file_state(id)?;
        require(state != FileState::Closed, || format!("file {id} is not open"))?;
        require_not_deleted(id, state)?;
        log::trace!("writing {} bytes to {id}", data.len());
        Ok(())
    }

    /// Close an open file.
    pub fn close(&mut self, id: NodeId) -> Result<(), FileSystemError> {
        let state = self.file_state(id)?;
        require(state != FileState::Closed, || format!("file {id} is already closed"))?;
        require_not_deleted(id, state)?;
        self.set_file_state(id, FileState::Closed)
    }

    /// Mark a file deleted. Deleting twice is allowed.
    pub fn delete(&mut self, id: NodeId) -> Result<(), FileSystemError> {
        self.file_state(id)?;
        self.set_file_state(id, FileState::Deleted)
    }

    fn add_node(&mut self, parent: NodeId, base_name: &str, payload: Payload) -> Result<NodeId, FileSystemError> {
        check_base_name_argument(base_name)?;
        self.children(parent)?;

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            base_name: base_name.to_string(),
            parent: Some(parent),
            payload,
            buggy: false,
        });
        if let Payload::Directory { children } = &mut self.nodes[parent.0].payload {
            children.push(id);
        }
        Ok(id)
    }

    fn collect_matches(
        &self,
        id: NodeId,
        base_name: &str,
        result: &mut BTreeSet<NodeId>,
        depth: usize,
    ) -> Result<(), FileSystemError> {
        if self.name_of_match(id)? == base_name {
            result.insert(id);
        }

        let children = match &self.node(id)?.payload {
            Payload::Directory { children } => children,
            _ => return Ok(()),
        };
        for &child in children {
            invariant(depth < self.nodes.len(), || {
                format!("directory {id} contains itself")
            })?;
            self.collect_matches(child, base_name, result, depth + 1)
                .map_err(|e| match e {
                    FileSystemError::Contract(source) if source.is_invalid_state() => {
                        FileSystemError::ServiceFailure {
                            message: format!("search below {id} hit an invalid node"),
                            source,
                        }
                    }
                    other => other,
                })?;
        }
        Ok(())
    }

    /// A link with no target matches by its own base name during searches.
    fn name_of_match(&self, id: NodeId) -> Result<String, FileSystemError> {
        match self.node(id)?.payload {
            Payload::Link { target: None } => {
                self.check_base_name(id)?;
                Ok(self.nodes[id.0].base_name.clone())
            }
            _ => self.base_name(id),
        }
    }

    fn resolve(&self, id: NodeId) -> Result<NodeId, FileSystemError> {
        match self.node(id)?.payload {
            Payload::Link { target } => target.ok_or_else(|| {
                ContractError::IllegalArgument(format!("link {id} has no target")).into()
            }),
            _ => Ok(id),
        }
    }

    fn check_base_name(&self, id: NodeId) -> Result<(), FileSystemError> {
        let node = &self.nodes[id.0];
        let valid = !node.buggy && (id == self.root() || !node.base_name.is_empty());
        invariant(valid, || format!("base name of node {id} is empty"))?;
        Ok(())
    }

    fn set_file_state(&mut self, id: NodeId, state: FileState) -> Result<(), FileSystemError> {
        if let Payload::File { state: s } = &mut self.node_mut(id)?.payload {
            *s = state;
        }
        Ok(())
    }

    fn node(&self, id: NodeId) -> Result<&Node, FileSystemError> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| ContractError::IllegalArgument(format!("unknown node {id}")).into())
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, FileSystemError> {
        self.nodes
            .get_mut(id.0)
            .ok_or_else(|| ContractError::IllegalArgument(format!("unknown node {id}")).into())
    }
}

fn check_base_name_argument(base_name: &str) -> Result<(), ContractError> {
    require(!base_name.is_empty(), || "base name must be non-empty".into())
}

fn require_not_deleted(id: NodeId, state: FileState) -> Result<(), ContractError> {
    require(state != FileState::Deleted, || format!("file {id} is deleted"))
}

fn not_a_directory(id: NodeId) -> ContractError {
    ContractError::IllegalArgument(format!("node {id} is not a directory"))
}

fn not_a_file(id: NodeId) -> ContractError {
    ContractError::IllegalArgument(format!("node {id} is not a file"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (FileSystem, NodeId, NodeId, NodeId) {
        let mut fs = FileSystem::new();
        let usr = fs.create_directory(fs.root(), "usr").unwrap();
        let bin = fs.create_directory(usr, "bin").unwrap();
        let ls = fs.create_file(bin, "ls").unwrap();
        (fs, usr, bin, ls)
    }

    fn is_illegal(err: FileSystemError) -> bool {
        err.contract().is_some_and(ContractError::is_illegal_argument)
    }

    #[test]
    fn root_full_name_is_single_empty_component() {
        let fs = FileSystem::new();
        let name = fs.full_name(fs.root()).unwrap();
        assert_eq!(name.no_components(), 1);
        assert_eq!(name.as_string().unwrap(), "");
    }

    #[test]
    fn full_name_walks_parents() {
        let (fs, _, _, ls) = sample();
        let name = fs.full_name(ls).unwrap();
        assert_eq!(name.components().unwrap(), vec!["", "usr", "bin", "ls"]);
        assert_eq!(name.as_string().unwrap(), "/usr/bin/ls");
        assert_eq!(name.delimiter().as_char(), '/');
    }

    #[test]
    fn full_name_masks_slashes_in_base_names() {
        let mut fs = FileSystem::new();
        let odd = fs.create_file(fs.root(), "a/b").unwrap();
        let name = fs.full_name(odd).unwrap();
        assert_eq!(name.no_components(), 2);
        assert_eq!(name.component(1).unwrap(), "a\\/b");
    }

    #[test]
    fn empty_base_name_is_rejected() {
        let mut fs = FileSystem::new();
        let root = fs.root();
        assert!(is_illegal(fs.create_file(root, "").unwrap_err()));
        let (mut fs, usr, _, _) = sample();
        assert!(is_illegal(fs.rename(usr, "").unwrap_err()));
    }

    #[test]
    fn children_only_for_directories() {
        let (mut fs, usr, bin, ls) = sample();
        assert_eq!(fs.children(usr).unwrap(), &[bin]);
        assert!(is_illegal(fs.children(ls).unwrap_err()));
        assert!(is_illegal(fs.create_file(ls, "x").unwrap_err()));
    }

    #[test]
    fn remove_child_detaches() {
        let (mut fs, _, bin, ls) = sample();
        fs.remove_child(bin, ls).unwrap();
        assert!(!fs.has_child(bin, ls).unwrap());
        assert!(fs.find_nodes(bin, "ls").unwrap().is_empty());
        assert!(is_illegal(fs.remove_child(bin, ls).unwrap_err()));
    }

    #[test]
    fn link_forwards_base_name_and_rename() {
        let (mut fs, usr, _, ls) = sample();
        let link = fs.create_link(usr, "list", Some(ls)).unwrap();
        assert_eq!(fs.base_name(link).unwrap(), "ls");

        fs.rename(link, "dir").unwrap();
        assert_eq!(fs.base_name(ls).unwrap(), "dir");
        assert_eq!(fs.full_name(ls).unwrap().as_string().unwrap(), "/usr/bin/dir");
    }

    #[test]
    fn dangling_link_has_no_base_name() {
        let (mut fs, usr, _, ls) = sample();
        let link = fs.create_link(usr, "later", None).unwrap();
        assert!(is_illegal(fs.base_name(link).unwrap_err()));
        fs.set_link_target(link, ls).unwrap();
        assert_eq!(fs.link_target(link).unwrap(), Some(ls));
        assert_eq!(fs.base_name(link).unwrap(), "ls");
    }

    #[test]
    fn find_nodes_searches_subtree() {
        let (mut fs, usr, bin, ls) = sample();
        let lib = fs.create_directory(usr, "lib").unwrap();
        let other = fs.create_file(lib, "ls").unwrap();

        let root = fs.root();
        let found = fs.find_nodes(root, "ls").unwrap();
        assert_eq!(found, BTreeSet::from([ls, other]));

        let found = fs.find_nodes(bin, "ls").unwrap();
        assert_eq!(found, BTreeSet::from([ls]));

        assert!(fs.find_nodes(root, "missing").unwrap().is_empty());
    }

    #[test]
    fn file_lifecycle() {
        let (mut fs, _, _, ls) = sample();
        assert_eq!(fs.file_state(ls).unwrap(), FileState::Closed);
        assert!(is_illegal(fs.read(ls, 4).unwrap_err()));
        assert!(is_illegal(fs.close(ls).unwrap_err()));

        fs.open(ls).unwrap();
        assert!(is_illegal(fs.open(ls).unwrap_err()));
        assert_eq!(fs.read(ls, 4).unwrap(), vec![0; 4]);
        fs.write(ls, b"data").unwrap();
        fs.close(ls).unwrap();

        fs.delete(ls).unwrap();
        assert_eq!(fs.file_state(ls).unwrap(), FileState::Deleted);
        assert!(is_illegal(fs.open(ls).unwrap_err()));
        assert!(is_illegal(fs.write(ls, b"x").unwrap_err()));
    }

    #[test]
    fn unknown_node_is_illegal_argument() {
        let fs = FileSystem::new();
        assert!(is_illegal(fs.base_name(NodeId(42)).unwrap_err()));
    }

    #[test]
    fn broken_base_name_fails_search_as_service_failure() {
        let (mut fs, _, bin, ls) = sample();
        fs.nodes[ls.0].buggy = true;

        let err = fs.base_name(ls).unwrap_err();
        assert!(err.contract().is_some_and(ContractError::is_invalid_state));

        let root = fs.root();
        let err = fs.find_nodes(root, "ls").unwrap_err();
        assert!(matches!(err, FileSystemError::ServiceFailure { .. }));

        let err = fs.find_nodes(bin, "ls").unwrap_err();
        assert!(matches!(err, FileSystemError::ServiceFailure { .. }));
    }
}
