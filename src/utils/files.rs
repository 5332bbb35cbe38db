//! Browser bindings for dropped and picked files.
//!
//! Wraps the callback-based `FileSystemEntry` API in promises so the walker
//! and upload pipeline in [`crate::core`] can await them.

use js_sys::{Array, Function, Promise};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    DataTransfer, File, FileList, FileSystemDirectoryEntry, FileSystemDirectoryReader,
    FileSystemEntry, FileSystemFileEntry,
};

use crate::core::error::WalkError;
use crate::core::upload::UploadFile;
use crate::core::walker::{DroppedEntry, EntryKind, EntryReader};

// `web-sys` does not generate a binding for `File.webkitRelativePath`.
fn webkit_relative_path(file: &File) -> String {
    js_sys::Reflect::get(file, &JsValue::from_str("webkitRelativePath"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default()
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Turn a callback pair `(on_success, on_error)` API into a future.
async fn callback_promise(call: impl FnOnce(&Function, &Function)) -> Result<JsValue, JsValue> {
    let mut call = Some(call);
    let promise = Promise::new(&mut |resolve, reject| {
        if let Some(call) = call.take() {
            call(&resolve, &reject);
        }
    });
    JsFuture::from(promise).await
}

async fn read_file_text(file: &File) -> Result<String, JsValue> {
    let text = JsFuture::from(file.text()).await?;
    text.as_string()
        .ok_or_else(|| JsValue::from_str("file content is not text"))
}

// =============================================================================
// Dropped entries
// =============================================================================

/// A `FileSystemEntry` from a drop payload.
#[derive(Clone, Debug)]
pub struct BrowserEntry(FileSystemEntry);

/// Batch reader over a dropped directory.
pub struct BrowserEntryReader {
    reader: FileSystemDirectoryReader,
    path: String,
}

/// Entries of a drop, in item order. Items without an entry are skipped.
///
/// Must be called while the drop event is being dispatched; the browser
/// empties the item list afterwards.
pub fn dropped_entries(data: &DataTransfer) -> Vec<BrowserEntry> {
    let items = data.items();
    (0..items.length())
        .filter_map(|i| items.get(i))
        .filter_map(|item| item.webkit_get_as_entry().ok().flatten())
        .map(BrowserEntry)
        .collect()
}

impl DroppedEntry for BrowserEntry {
    type Reader = BrowserEntryReader;
    type File = BrowserFile;

    fn kind(&self) -> EntryKind {
        if self.0.is_file() {
            EntryKind::File
        } else if self.0.is_directory() {
            EntryKind::Directory
        } else {
            EntryKind::Other
        }
    }

    fn full_path(&self) -> String {
        self.0.full_path()
    }

    fn name(&self) -> String {
        self.0.name()
    }

    async fn file(&self) -> Result<BrowserFile, WalkError> {
        let entry: &FileSystemFileEntry = self.0.unchecked_ref();
        let file: File = callback_promise(|ok, err| {
            entry.file_with_callback_and_callback(ok, err);
        })
        .await
        .map_err(|e| WalkError::ReadFailed {
            path: self.full_path(),
            reason: describe(&e),
        })?
        .unchecked_into();

        Ok(BrowserFile(file))
    }

    fn reader(&self) -> Result<BrowserEntryReader, WalkError> {
        let directory: &FileSystemDirectoryEntry = self.0.unchecked_ref();
        Ok(BrowserEntryReader {
            reader: directory.create_reader(),
            path: self.full_path(),
        })
    }
}

impl EntryReader for BrowserEntryReader {
    type Entry = BrowserEntry;

    async fn next_batch(&mut self) -> Result<Vec<BrowserEntry>, WalkError> {
        let reader = &self.reader;
        let mut call_error = None;
        let result = callback_promise(|ok, err| {
            if let Err(e) = reader.read_entries_with_callback_and_callback(ok, err) {
                call_error = Some(e.clone());
                let _ = err.call1(&JsValue::NULL, &e);
            }
        })
        .await;

        let batch = result.map_err(|e| WalkError::EnumerationFailed {
            path: self.path.clone(),
            reason: describe(call_error.as_ref().unwrap_or(&e)),
        })?;

        Ok(Array::from(&batch)
            .iter()
            .map(|value| BrowserEntry(value.unchecked_into()))
            .collect())
    }
}

// =============================================================================
// Picked files
// =============================================================================

/// A `File` from an input selection or a drop's flat file list.
#[derive(Clone, Debug)]
pub struct BrowserFile(File);

/// Collect a `FileList` into owned handles.
pub fn file_list(files: Option<FileList>) -> Vec<BrowserFile> {
    let Some(files) = files else {
        return Vec::new();
    };
    (0..files.length())
        .filter_map(|i| files.get(i))
        .map(BrowserFile)
        .collect()
}

impl UploadFile for BrowserFile {
    fn mime_type(&self) -> String {
        self.0.type_()
    }

    fn relative_path(&self) -> String {
        webkit_relative_path(&self.0)
    }

    fn name(&self) -> String {
        self.0.name()
    }

    async fn read_text(&self) -> Result<String, WalkError> {
        read_file_text(&self.0)
            .await
            .map_err(|e| WalkError::ReadFailed {
                path: self.0.name(),
                reason: describe(&e),
            })
    }
}
