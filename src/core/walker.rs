//! Recursive ingestion of dropped file-system entries.
//!
//! A drop payload is a list of entries, each either a file or a directory.
//! Directories hand out their children in batches through a reader that must
//! be drained until it returns an empty batch. [`walk_entries`] flattens the
//! whole payload into [`FileRecord`]s in depth-first discovery order. File
//! entries whose MIME type is not accepted are skipped without being read.
//!
//! The browser binding lives in [`crate::utils::files`]; the traits here keep
//! the traversal independent of it.

use tracing::{debug, trace};

use crate::core::error::WalkError;
use crate::core::upload::{UploadFile, is_accepted_mime};
use crate::models::FileRecord;

/// Kind of a dropped entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Neither file nor directory; skipped.
    Other,
}

/// A file-system entry from a drop payload.
#[allow(async_fn_in_trait)]
pub trait DroppedEntry: Sized {
    type Reader: EntryReader<Entry = Self>;
    type File: UploadFile;

    fn kind(&self) -> EntryKind;

    /// Full path relative to the drop root, possibly with a leading `/`.
    fn full_path(&self) -> String;

    fn name(&self) -> String;

    /// Resolve a file entry to the file it points at.
    async fn file(&self) -> Result<Self::File, WalkError>;

    /// Open a batch reader over a directory entry's children.
    fn reader(&self) -> Result<Self::Reader, WalkError>;
}

/// Batch producer of a directory's children. An empty batch means exhausted.
#[allow(async_fn_in_trait)]
pub trait EntryReader {
    type Entry;

    async fn next_batch(&mut self) -> Result<Vec<Self::Entry>, WalkError>;
}

/// Drain a reader into a single list, preserving batch order.
pub async fn read_all<R: EntryReader>(mut reader: R) -> Result<Vec<R::Entry>, WalkError> {
    let mut entries = Vec::new();
    loop {
        let batch = reader.next_batch().await?;
        if batch.is_empty() {
            return Ok(entries);
        }
        trace!(count = batch.len(), "directory batch");
        entries.extend(batch);
    }
}

/// Flatten dropped entries into file records.
///
/// Files appear in depth-first order: a directory's children are fully
/// enumerated, then each child is expanded in the order it was discovered.
/// Files with a rejected MIME type are left out. Any read or enumeration
/// error fails the whole walk.
pub async fn walk_entries<E: DroppedEntry>(roots: Vec<E>) -> Result<Vec<FileRecord>, WalkError> {
    // Stack holds entries still to visit, next one on top.
    let mut pending: Vec<E> = roots.into_iter().rev().collect();
    let mut records = Vec::new();

    while let Some(entry) = pending.pop() {
        match entry.kind() {
            EntryKind::File => {
                let file = entry.file().await?;
                let mime = file.mime_type();
                if !is_accepted_mime(&mime) {
                    debug!(path = %entry.full_path(), mime = %mime, "skipping non-text file");
                    continue;
                }
                let content = file.read_text().await?;
                records.push(FileRecord::with_name(entry.full_path(), entry.name(), content));
            }
            EntryKind::Directory => {
                let children = read_all(entry.reader()?).await?;
                debug!(path = %entry.full_path(), children = children.len(), "expanded directory");
                pending.extend(children.into_iter().rev());
            }
            EntryKind::Other => {
                debug!(path = %entry.full_path(), "skipping entry that is neither file nor directory");
            }
        }
    }

    Ok(records)
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory entries for tests.

    use std::collections::VecDeque;

    use super::*;
    use crate::core::upload::fake::FakeFile;

    #[derive(Clone, Debug)]
    pub enum FakeEntry {
        File {
            path: String,
            mime: String,
            content: Option<String>,
        },
        Dir {
            path: String,
            children: Vec<FakeEntry>,
            batch_size: usize,
            broken: bool,
        },
        Other {
            path: String,
        },
    }

    impl FakeEntry {
        pub fn file(path: &str, content: &str) -> Self {
            Self::typed(path, "text/plain", content)
        }

        pub fn typed(path: &str, mime: &str, content: &str) -> Self {
            FakeEntry::File {
                path: path.to_string(),
                mime: mime.to_string(),
                content: Some(content.to_string()),
            }
        }

        pub fn unreadable(path: &str) -> Self {
            FakeEntry::File {
                path: path.to_string(),
                mime: "text/plain".to_string(),
                content: None,
            }
        }

        pub fn dir(path: &str, children: Vec<FakeEntry>) -> Self {
            FakeEntry::Dir {
                path: path.to_string(),
                children,
                batch_size: 2,
                broken: false,
            }
        }

        pub fn broken_dir(path: &str) -> Self {
            FakeEntry::Dir {
                path: path.to_string(),
                children: Vec::new(),
                batch_size: 1,
                broken: true,
            }
        }

        fn path(&self) -> &str {
            match self {
                FakeEntry::File { path, .. }
                | FakeEntry::Dir { path, .. }
                | FakeEntry::Other { path } => path,
            }
        }
    }

    pub struct FakeReader {
        remaining: VecDeque<FakeEntry>,
        batch_size: usize,
        broken: bool,
        path: String,
    }

    impl EntryReader for FakeReader {
        type Entry = FakeEntry;

        async fn next_batch(&mut self) -> Result<Vec<FakeEntry>, WalkError> {
            if self.broken {
                return Err(WalkError::EnumerationFailed {
                    path: self.path.clone(),
                    reason: "permission denied".to_string(),
                });
            }
            let take = self.batch_size.min(self.remaining.len());
            Ok(self.remaining.drain(..take).collect())
        }
    }

    impl DroppedEntry for FakeEntry {
        type Reader = FakeReader;
        type File = FakeFile;

        fn kind(&self) -> EntryKind {
            match self {
                FakeEntry::File { .. } => EntryKind::File,
                FakeEntry::Dir { .. } => EntryKind::Directory,
                FakeEntry::Other { .. } => EntryKind::Other,
            }
        }

        fn full_path(&self) -> String {
            self.path().to_string()
        }

        fn name(&self) -> String {
            crate::models::leaf_name(self.path()).to_string()
        }

        async fn file(&self) -> Result<FakeFile, WalkError> {
            match self {
                FakeEntry::File { path, mime, content } => Ok(FakeFile {
                    name: path.clone(),
                    relative_path: String::new(),
                    mime: mime.clone(),
                    content: content.clone(),
                }),
                _ => Err(WalkError::ReadFailed {
                    path: self.full_path(),
                    reason: "not a file".to_string(),
                }),
            }
        }

        fn reader(&self) -> Result<FakeReader, WalkError> {
            match self {
                FakeEntry::Dir {
                    path,
                    children,
                    batch_size,
                    broken,
                } => Ok(FakeReader {
                    remaining: children.iter().cloned().collect(),
                    batch_size: *batch_size,
                    broken: *broken,
                    path: path.clone(),
                }),
                _ => Err(WalkError::EnumerationFailed {
                    path: self.full_path(),
                    reason: "not a directory".to_string(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::FakeEntry;
    use super::*;

    fn paths(records: &[FileRecord]) -> Vec<&str> {
        records.iter().map(|r| r.path.as_str()).collect()
    }

    #[tokio::test]
    async fn test_single_file_strips_leading_slash() {
        let records = walk_entries(vec![FakeEntry::file("/notes.txt", "Q: a\nA: b")])
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "notes.txt");
        assert_eq!(records[0].name, "notes.txt");
        assert_eq!(records[0].content, "Q: a\nA: b");
    }

    #[tokio::test]
    async fn test_depth_first_discovery_order() {
        let drop = vec![
            FakeEntry::dir(
                "/bio",
                vec![
                    FakeEntry::file("/bio/cells.txt", ""),
                    FakeEntry::dir(
                        "/bio/plants",
                        vec![
                            FakeEntry::file("/bio/plants/roots.txt", ""),
                            FakeEntry::file("/bio/plants/leaves.txt", ""),
                        ],
                    ),
                    FakeEntry::file("/bio/genes.txt", ""),
                ],
            ),
            FakeEntry::file("/loose.txt", ""),
        ];

        let records = walk_entries(drop).await.unwrap();
        assert_eq!(
            paths(&records),
            [
                "bio/cells.txt",
                "bio/plants/roots.txt",
                "bio/plants/leaves.txt",
                "bio/genes.txt",
                "loose.txt",
            ]
        );
    }

    #[tokio::test]
    async fn test_directory_batches_are_drained() {
        let children: Vec<_> = (0..7)
            .map(|i| FakeEntry::file(&format!("/big/{i}.txt"), ""))
            .collect();
        let records = walk_entries(vec![FakeEntry::dir("/big", children)])
            .await
            .unwrap();
        assert_eq!(records.len(), 7);
        assert_eq!(records[6].path, "big/6.txt");
    }

    #[tokio::test]
    async fn test_unreadable_file_fails_whole_walk() {
        let drop = vec![
            FakeEntry::file("/ok.txt", "fine"),
            FakeEntry::dir("/d", vec![FakeEntry::unreadable("/d/bad.txt")]),
        ];
        let err = walk_entries(drop).await.unwrap_err();
        assert!(matches!(err, WalkError::ReadFailed { ref path, .. } if path == "/d/bad.txt"));
    }

    #[tokio::test]
    async fn test_enumeration_failure_fails_whole_walk() {
        let drop = vec![FakeEntry::file("/ok.txt", ""), FakeEntry::broken_dir("/locked")];
        let err = walk_entries(drop).await.unwrap_err();
        assert!(matches!(err, WalkError::EnumerationFailed { .. }));
    }

    #[tokio::test]
    async fn test_non_text_files_in_directories_are_skipped() {
        let drop = vec![FakeEntry::dir(
            "/deck",
            vec![
                FakeEntry::file("/deck/cells.txt", "Q: a\nA: b"),
                FakeEntry::typed("/deck/diagram.png", "image/png", "\u{89}PNG"),
                FakeEntry::typed("/deck/notes", "", "Q: c\nA: d"),
            ],
        )];
        let records = walk_entries(drop).await.unwrap();
        assert_eq!(paths(&records), ["deck/cells.txt", "deck/notes"]);
    }

    #[tokio::test]
    async fn test_non_text_file_is_not_read() {
        let mut pdf = FakeEntry::unreadable("/scan.pdf");
        if let FakeEntry::File { mime, .. } = &mut pdf {
            *mime = "application/pdf".to_string();
        }
        assert!(walk_entries(vec![pdf]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_other_entries_and_empty_dirs_yield_nothing() {
        let drop = vec![
            FakeEntry::Other {
                path: "/weird".to_string(),
            },
            FakeEntry::dir("/empty", vec![]),
        ];
        assert!(walk_entries(drop).await.unwrap().is_empty());
    }
}
