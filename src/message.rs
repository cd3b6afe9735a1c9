use crate::core::draft::PickedFile;
use crate::core::todo::{FileRef, TodoRecord};
use crate::remote::{CreateOutcome, DeleteOutcome, EditOutcome, FileRemovalOutcome};

#[derive(Debug, Clone)]
pub enum Message {
    // Initial load
    TodosFetched(Result<Vec<TodoRecord>, String>),

    // Dialog lifecycle
    OpenCreate,
    OpenDetails(String),
    OpenEdit(String),
    OpenDelete(String),
    CloseDialog,

    // Create form fields
    CreateTitleChanged(String),
    CreateBodyChanged(String),
    CreateDateChanged(String),

    // Edit form fields
    EditTitleChanged(String),
    EditBodyChanged(String),
    EditDateChanged(String),

    // Delete confirmation input
    DeleteConfirmChanged(String),

    // File selection (applies to whichever form dialog is open)
    PickFiles,
    FilesPicked(Vec<PickedFile>),

    // Error banner
    DismissError,

    // Workflows
    CreateSubmit,
    CreateFinished(Result<CreateOutcome, String>),
    EditSubmit,
    EditFinished(Result<EditOutcome, String>),
    RemoveFile(FileRef),
    FileRemoved(Result<FileRemovalOutcome, String>),
    DeleteSubmit,
    DeleteFinished(Result<DeleteOutcome, String>),

    // Inline checkbox toggle: id, value the record is being set to
    ToggleChecked(String),
    CheckSaved(String, bool, Result<(), String>),

    // Attachments
    OpenFileUrl(String),
}
