//! Navigation tree built from flat file paths.

use crate::models::{FileRecord, TreeNode};

/// Build the navigation tree for a list of files.
///
/// Each path is split on `/` (empty segments dropped). Directory segments
/// reuse an existing sibling directory of the same name or append a new one,
/// so children keep first-seen order. The last segment always appends a new
/// file node, even when another file already has the same path.
///
/// Returns the children of the implicit root.
pub fn build_tree(files: &[FileRecord]) -> Vec<TreeNode> {
    let mut root: Vec<TreeNode> = Vec::new();

    for file in files {
        let segments: Vec<&str> = file.path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((leaf, dirs)) = segments.split_last() else {
            continue;
        };

        let mut current = &mut root;
        for dir in dirs {
            current = child_directory(current, dir);
        }
        current.push(TreeNode::File {
            name: leaf.to_string(),
            file: file.clone(),
        });
    }

    root
}

/// Children of the directory named `name`, created at the end if missing.
fn child_directory<'a>(nodes: &'a mut Vec<TreeNode>, name: &str) -> &'a mut Vec<TreeNode> {
    let index = nodes
        .iter()
        .position(|node| node.is_directory() && node.name() == name)
        .unwrap_or_else(|| {
            nodes.push(TreeNode::Directory {
                name: name.to_string(),
                children: Vec::new(),
            });
            nodes.len() - 1
        });

    match &mut nodes[index] {
        TreeNode::Directory { children, .. } => children,
        TreeNode::File { .. } => unreachable!("position only matches directories"),
    }
}

/// All files of the tree in depth-first order.
pub fn flatten_files(nodes: &[TreeNode]) -> Vec<&FileRecord> {
    let mut files = Vec::new();
    collect_files(nodes, &mut files);
    files
}

fn collect_files<'a>(nodes: &'a [TreeNode], out: &mut Vec<&'a FileRecord>) {
    for node in nodes {
        match node {
            TreeNode::File { file, .. } => out.push(file),
            TreeNode::Directory { children, .. } => collect_files(children, out),
        }
    }
}

/// First file in depth-first order, the default selection after a load.
pub fn first_file(nodes: &[TreeNode]) -> Option<&FileRecord> {
    nodes.iter().find_map(|node| match node {
        TreeNode::File { file, .. } => Some(file),
        TreeNode::Directory { children, .. } => first_file(children),
    })
}
