use std::path::PathBuf;

/// Per-file size cap for attachments. The limit is inclusive: a file of
/// exactly this size is accepted.
pub const MAX_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// A file chosen in the picker but not yet uploaded. Bytes are read from
/// `path` only at submit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    /// Original filename, kept as the display name on the uploaded ref.
    pub name: String,
    pub path: PathBuf,
    pub size: u64,
    pub content_type: String,
}

/// Structured form state for the create and edit workflows, validated as a
/// unit before any remote call.
#[derive(Debug, Clone, Default)]
pub struct TodoDraft {
    pub title: String,
    pub body: String,
    pub finish_date: String,
    pub files: Vec<PickedFile>,
}

impl TodoDraft {
    /// Synchronous validation. Fails with the message for the first missing
    /// required field; no remote call may be issued on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Field 'Title' is required!".to_string());
        }
        if self.finish_date.is_empty() {
            return Err("Field 'Finish date' is required!".to_string());
        }
        Ok(())
    }
}

/// Validate a fresh file selection. One oversized file rejects the whole
/// selection; the caller clears it so a corrected re-pick starts empty.
pub fn check_selection(files: &[PickedFile]) -> Result<(), String> {
    for file in files {
        if file.size > MAX_FILE_BYTES {
            return Err("Files can't be larger than 5mb".to_string());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn picked(name: &str, size: u64) -> PickedFile {
        PickedFile {
            name: name.into(),
            path: PathBuf::from(format!("/tmp/{name}")),
            size,
            content_type: "application/octet-stream".into(),
        }
    }

    #[test]
    fn blank_title_is_rejected() {
        let draft = TodoDraft {
            title: "  ".into(),
            finish_date: "2030-01-01".into(),
            ..TodoDraft::default()
        };
        assert_eq!(draft.validate(), Err("Field 'Title' is required!".to_string()));
    }

    #[test]
    fn missing_date_is_rejected() {
        let draft = TodoDraft {
            title: "Buy milk".into(),
            ..TodoDraft::default()
        };
        assert_eq!(
            draft.validate(),
            Err("Field 'Finish date' is required!".to_string())
        );
    }

    #[test]
    fn title_check_comes_first() {
        let draft = TodoDraft::default();
        assert_eq!(draft.validate(), Err("Field 'Title' is required!".to_string()));
    }

    #[test]
    fn valid_draft_passes() {
        let draft = TodoDraft {
            title: "Buy milk".into(),
            body: String::new(),
            finish_date: "2030-01-01".into(),
            files: Vec::new(),
        };
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn selection_cap_is_inclusive() {
        assert_eq!(check_selection(&[picked("ok.bin", MAX_FILE_BYTES)]), Ok(()));
        assert_eq!(
            check_selection(&[picked("big.bin", MAX_FILE_BYTES + 1)]),
            Err("Files can't be larger than 5mb".to_string())
        );
    }

    #[test]
    fn one_oversized_file_rejects_the_whole_selection() {
        let files = vec![picked("a.bin", 10), picked("b.bin", MAX_FILE_BYTES + 1)];
        assert!(check_selection(&files).is_err());
    }

    #[test]
    fn empty_selection_is_fine() {
        assert_eq!(check_selection(&[]), Ok(()));
    }
}
