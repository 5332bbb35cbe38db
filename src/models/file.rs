//! Chapter files and the navigation tree built from them.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

// =============================================================================
// FileRecord
// =============================================================================

/// One chapter file, from a local upload or the gated bundle.
///
/// `path` is slash-separated without a leading slash and is the identity of
/// the record: two records with the same path are the same selection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileRecord {
    /// Path relative to the upload root (e.g. `biology/cells.txt`)
    pub path: String,
    /// Final path segment
    pub name: String,
    /// Decoded text content
    pub content: String,
}

impl FileRecord {
    /// Create a record, deriving `name` from the last segment of `path`.
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let path = path.trim_start_matches('/').to_string();
        let name = leaf_name(&path).to_string();
        Self {
            path,
            name,
            content: content.into(),
        }
    }

    /// Create a record with an explicit name.
    pub fn with_name(
        path: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let path = path.into();
        Self {
            path: path.trim_start_matches('/').to_string(),
            name: name.into(),
            content: content.into(),
        }
    }
}

impl PartialEq for FileRecord {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for FileRecord {}

impl Hash for FileRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

/// Last non-empty segment of a slash-separated path.
pub fn leaf_name(path: &str) -> &str {
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or(path)
}

/// Sort records by path, the order every loaded file list is presented in.
pub fn sort_by_path(files: &mut [FileRecord]) {
    files.sort_by(|a, b| a.path.cmp(&b.path));
}

// =============================================================================
// TreeNode
// =============================================================================

/// Node of the navigation tree.
#[derive(Clone, Debug, PartialEq)]
pub enum TreeNode {
    File {
        name: String,
        file: FileRecord,
    },
    Directory {
        name: String,
        children: Vec<TreeNode>,
    },
}

impl TreeNode {
    /// Display name of the node.
    pub fn name(&self) -> &str {
        match self {
            TreeNode::File { name, .. } | TreeNode::Directory { name, .. } => name,
        }
    }

    /// Check if this node is a directory.
    pub fn is_directory(&self) -> bool {
        matches!(self, TreeNode::Directory { .. })
    }
}
