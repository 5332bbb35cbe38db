//! Upload boundary: turns picked or dropped files into a sorted file list.
//!
//! Picked files (folder input or a plain file drop) arrive as a flat list and
//! are filtered by MIME type, read concurrently and sorted by path. Dropped
//! directory trees go through [`walk_entries`] first and fall back to the flat
//! list when the walk fails or finds nothing.

use futures::future::try_join_all;
use tracing::{debug, error, info};

use crate::config::ACCEPTED_MIME_TYPES;
use crate::core::error::WalkError;
use crate::core::walker::{DroppedEntry, walk_entries};
use crate::models::{FileRecord, sort_by_path};

/// A file from an `<input type="file">` selection or a drop's file list.
#[allow(async_fn_in_trait)]
pub trait UploadFile {
    /// Declared MIME type, empty if the browser does not know it.
    fn mime_type(&self) -> String;

    /// Path relative to the selected folder, empty for loose files.
    fn relative_path(&self) -> String;

    fn name(&self) -> String;

    async fn read_text(&self) -> Result<String, WalkError>;
}

/// Check a declared MIME type against the accepted list.
pub fn is_accepted_mime(mime: &str) -> bool {
    mime.is_empty() || ACCEPTED_MIME_TYPES.contains(&mime)
}

/// Read accepted files into records sorted by path.
///
/// All reads are issued together; a single failure fails the batch.
pub async fn ingest_files<F: UploadFile>(files: Vec<F>) -> Result<Vec<FileRecord>, WalkError> {
    let total = files.len();
    let accepted: Vec<F> = files
        .into_iter()
        .filter(|file| is_accepted_mime(&file.mime_type()))
        .collect();
    debug!(total, accepted = accepted.len(), "filtered upload by type");

    let reads = accepted.iter().map(|file| async move {
        let content = file.read_text().await?;
        let relative = file.relative_path();
        if relative.is_empty() {
            Ok::<_, WalkError>(FileRecord::with_name(file.name(), file.name(), content))
        } else {
            Ok(FileRecord::new(relative, content))
        }
    });

    let mut records = try_join_all(reads).await?;
    sort_by_path(&mut records);
    Ok(records)
}

/// Ingest a drop: walk its entries, or fall back to its flat file list.
///
/// The fallback applies when the payload has no entries (old browsers), when
/// the walk fails, or when the walk found no files.
pub async fn ingest_drop<E, F>(
    entries: Vec<E>,
    fallback: Vec<F>,
) -> Result<Vec<FileRecord>, WalkError>
where
    E: DroppedEntry,
    F: UploadFile,
{
    if !entries.is_empty() {
        match walk_entries(entries).await {
            Ok(mut records) if !records.is_empty() => {
                sort_by_path(&mut records);
                info!(count = records.len(), "ingested dropped tree");
                return Ok(records);
            }
            Ok(_) => debug!("dropped tree held no files"),
            Err(e) => error!(error = %e, "error processing dropped folder"),
        }
    }

    ingest_files(fallback).await
}


#[cfg(test)]
mod tests {
    use super::fake::FakeFile;
    use super::*;
    use crate::core::walker::fake::FakeEntry;

    #[test]
    fn test_mime_filter() {
        assert!(is_accepted_mime("text/plain"));
        assert!(is_accepted_mime(""));
        assert!(!is_accepted_mime("image/png"));
        assert!(!is_accepted_mime("application/pdf"));
    }

    #[tokio::test]
    async fn test_ingest_sorts_and_prefers_relative_path() {
        let files = vec![
            FakeFile::text("b.txt", "deck/b.txt", "B"),
            FakeFile::text("a.txt", "deck/a.txt", "A"),
            FakeFile::text("loose.txt", "", "L"),
        ];
        let records = ingest_files(files).await.unwrap();
        let paths: Vec<_> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["deck/a.txt", "deck/b.txt", "loose.txt"]);
        assert_eq!(records[0].content, "A");
    }

    #[tokio::test]
    async fn test_ingest_skips_non_text() {
        let mut image = FakeFile::text("pic.png", "deck/pic.png", "");
        image.mime = "image/png".to_string();
        let mut untyped = FakeFile::text("notes", "deck/notes", "Q: a\nA: b");
        untyped.mime = String::new();

        let records = ingest_files(vec![image, untyped]).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "notes");
    }

    #[tokio::test]
    async fn test_ingest_read_failure_fails_batch() {
        let mut broken = FakeFile::text("bad.txt", "", "");
        broken.content = None;
        let files = vec![FakeFile::text("ok.txt", "", "ok"), broken];
        assert!(ingest_files(files).await.is_err());
    }

    #[tokio::test]
    async fn test_drop_uses_walked_tree_sorted() {
        let entries = vec![
            FakeEntry::file("/z.txt", "Z"),
            FakeEntry::dir("/a", vec![FakeEntry::file("/a/one.txt", "1")]),
        ];
        let records = ingest_drop(entries, Vec::<FakeFile>::new()).await.unwrap();
        let paths: Vec<_> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["a/one.txt", "z.txt"]);
    }

    #[tokio::test]
    async fn test_drop_skips_non_text_files_in_folders() {
        let entries = vec![FakeEntry::dir(
            "/deck",
            vec![
                FakeEntry::file("/deck/cells.txt", "Q: a\nA: b"),
                FakeEntry::typed("/deck/diagram.png", "image/png", "\u{89}PNG"),
            ],
        )];
        let records = ingest_drop(entries, Vec::<FakeFile>::new()).await.unwrap();
        let paths: Vec<_> = records.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, ["deck/cells.txt"]);
    }

    #[tokio::test]
    async fn test_drop_falls_back_to_flat_list_on_walk_failure() {
        let entries = vec![FakeEntry::broken_dir("/locked")];
        let fallback = vec![FakeFile::text("flat.txt", "", "Q: a\nA: b")];
        let records = ingest_drop(entries, fallback).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].path, "flat.txt");
    }

    #[tokio::test]
    async fn test_drop_without_entries_uses_flat_list() {
        let fallback = vec![FakeFile::text("flat.txt", "", "")];
        let records = ingest_drop(Vec::<FakeEntry>::new(), fallback)
            .await
            .unwrap();
        assert_eq!(records[0].path, "flat.txt");
    }
}
