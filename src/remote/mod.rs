pub mod documents;
pub mod storage;

use crate::core::draft::{PickedFile, TodoDraft};
use crate::core::todo::{FileRef, TodoRecord};
use documents::DocumentClient;
use storage::{StorageClient, StorageError};

/// Fixed backend coordinates. Only the API key is deployment-specific and
/// comes from the environment.
pub const DATABASE_URL: &str = "https://db.finito.app/v1";
pub const STORAGE_URL: &str = "https://files.finito.app/v1";
pub const PROJECT_ID: &str = "finito-prod";
pub const API_KEY_ENV: &str = "FINITO_API_KEY";

/// Handle bundling the two hosted-service clients. Cloned into every
/// workflow future.
#[derive(Clone)]
pub struct Backend {
    pub documents: DocumentClient,
    pub storage: StorageClient,
}

impl Backend {
    pub fn new(api_key: &str) -> Result<Self, String> {
        Ok(Self {
            documents: DocumentClient::new(DATABASE_URL, PROJECT_ID, api_key)?,
            storage: StorageClient::new(STORAGE_URL, api_key)?,
        })
    }

    /// Build the backend from `FINITO_API_KEY`. A missing key is logged and
    /// requests go out unauthenticated; the store's rejections surface in
    /// the UI like any other remote error.
    pub fn from_env() -> Result<Self, String> {
        let api_key = match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.is_empty() => key,
            _ => {
                log::warn!("{} is not set, backend requests will be unauthenticated", API_KEY_ENV);
                String::new()
            }
        };
        Self::new(&api_key)
    }
}

/// Files persisted by a round of uploads, plus the per-file failures that
/// were skipped over.
#[derive(Debug, Clone, Default)]
pub struct UploadedFiles {
    pub files: Vec<FileRef>,
    pub errors: Vec<String>,
}

/// Result of a successful create: the record as appended to the list (id
/// assigned by the store) and any per-file upload errors that were
/// tolerated along the way.
#[derive(Debug, Clone)]
pub struct CreateOutcome {
    pub todo: TodoRecord,
    pub upload_errors: Vec<String>,
}

/// Result of a successful edit, mirroring [`CreateOutcome`].
#[derive(Debug, Clone)]
pub struct EditOutcome {
    pub todo: TodoRecord,
    pub upload_errors: Vec<String>,
}

/// Result of a successful delete. `file_errors` holds the concatenated
/// storage-deletion failures; the record itself is gone either way.
#[derive(Debug, Clone)]
pub struct DeleteOutcome {
    pub id: String,
    pub file_errors: String,
}

/// Result of removing one attachment from within the edit form.
#[derive(Debug, Clone)]
pub struct FileRemovalOutcome {
    pub id: String,
    pub files: Vec<FileRef>,
    /// False when the storage object was already gone. The document store
    /// was updated in both cases.
    pub removed_from_storage: bool,
}

/// Upload the picked files one at a time, in selection order. Each file
/// gets a fresh opaque object name; a failure at any step records the
/// error and skips that file.
async fn upload_all(storage: &StorageClient, picked: &[PickedFile]) -> UploadedFiles {
    let mut uploaded = UploadedFiles::default();

    for file in picked {
        let bytes = match tokio::fs::read(&file.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                uploaded.errors.push(format!("Failed to read {}: {}", file.name, e));
                continue;
            }
        };

        let object_name = storage::generate_object_name();
        if let Err(e) = storage.upload(&object_name, &file.content_type, bytes).await {
            uploaded.errors.push(e);
            continue;
        }

        match storage.download_url(&object_name).await {
            Ok(url) => uploaded.files.push(FileRef { name: file.name.clone(), url }),
            Err(e) => uploaded.errors.push(e),
        }
    }

    uploaded
}

/// Create workflow: upload attachments, then insert one unchecked record.
/// Partial upload success is accepted into the record's file list; only an
/// insert failure fails the workflow (the uploaded objects stay behind in
/// storage, unreferenced).
pub async fn create_todo(backend: Backend, draft: TodoDraft) -> Result<CreateOutcome, String> {
    let uploaded = upload_all(&backend.storage, &draft.files).await;

    let mut todo = TodoRecord {
        id: None,
        title: draft.title,
        body: draft.body,
        finish_date: draft.finish_date,
        checked: false,
        files: uploaded.files,
    };

    let id = backend.documents.insert_todo(&todo).await?;
    todo.id = Some(id);

    Ok(CreateOutcome { todo, upload_errors: uploaded.errors })
}

/// Edit workflow: upload the newly selected files, merge them after the
/// record's existing files, and issue one field-level update keyed by id.
/// `checked` is carried through unchanged.
pub async fn update_todo(
    backend: Backend,
    id: String,
    draft: TodoDraft,
    existing_files: Vec<FileRef>,
    checked: bool,
) -> Result<EditOutcome, String> {
    let uploaded = upload_all(&backend.storage, &draft.files).await;

    let todo = TodoRecord {
        id: Some(id.clone()),
        title: draft.title,
        body: draft.body,
        finish_date: draft.finish_date,
        checked,
        files: merged_files(existing_files, uploaded.files),
    };

    backend.documents.update_todo(&id, &todo).await?;

    Ok(EditOutcome { todo, upload_errors: uploaded.errors })
}

/// Delete workflow: attempt to delete every attachment independently,
/// accumulating failures without stopping, then delete the record
/// regardless of how the attachments fared. There is no rollback.
pub async fn delete_todo(backend: Backend, todo: TodoRecord) -> Result<DeleteOutcome, String> {
    let id = todo.id.clone().unwrap_or_default();

    let mut file_errors = String::new();
    for file in &todo.files {
        if let Err(e) = backend.storage.delete_by_url(&file.url).await {
            append_delete_error(&mut file_errors, &e.to_string(), &file.name);
        }
    }
    if !file_errors.is_empty() {
        log::warn!("Attachment deletion for {} left errors: {}", id, file_errors.trim_end());
    }

    backend.documents.delete_todo(&id).await?;

    Ok(DeleteOutcome { id, file_errors })
}

/// Remove one attachment from a record: delete the storage object, then
/// persist the shrunken file list to the document store. An object that is
/// already gone counts as success; any other storage error aborts before
/// the document update.
pub async fn remove_file(
    backend: Backend,
    id: String,
    file: FileRef,
    remaining: Vec<FileRef>,
) -> Result<FileRemovalOutcome, String> {
    let removed_from_storage = match backend.storage.delete_by_url(&file.url).await {
        Ok(()) => true,
        Err(StorageError::NotFound) => false,
        Err(e) => return Err(e.to_string()),
    };

    backend.documents.update_files(&id, &remaining).await?;

    Ok(FileRemovalOutcome { id, files: remaining, removed_from_storage })
}

/// Checkbox toggle: one field update keyed by id.
pub async fn set_checked(backend: Backend, id: String, checked: bool) -> Result<(), String> {
    backend.documents.update_checked(&id, checked).await
}

/// Existing files keep their position; new uploads append after them.
fn merged_files(existing: Vec<FileRef>, uploaded: Vec<FileRef>) -> Vec<FileRef> {
    let mut files = existing;
    files.extend(uploaded);
    files
}

/// Accumulate one attachment-deletion failure into the combined message.
fn append_delete_error(acc: &mut String, error: &str, file_name: &str) {
    acc.push_str(error);
    acc.push_str(file_name);
    acc.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, url: &str) -> FileRef {
        FileRef { name: name.into(), url: url.into() }
    }

    #[test]
    fn merged_files_puts_existing_first() {
        let existing = vec![file("old.txt", "https://f/1")];
        let uploaded = vec![file("new.txt", "https://f/2"), file("new2.txt", "https://f/3")];
        let merged = merged_files(existing, uploaded);
        let names: Vec<&str> = merged.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["old.txt", "new.txt", "new2.txt"]);
    }

    #[test]
    fn merging_nothing_keeps_existing() {
        let existing = vec![file("old.txt", "https://f/1")];
        assert_eq!(merged_files(existing.clone(), Vec::new()), existing);
    }

    #[test]
    fn delete_errors_concatenate_in_order() {
        let mut acc = String::new();
        append_delete_error(&mut acc, "Delete returned 403: denied", "a.txt");
        append_delete_error(&mut acc, "object not found", "b.txt");
        assert_eq!(acc, "Delete returned 403: denieda.txt\nobject not foundb.txt\n");
    }
}
