use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Metadata for a file attached to a todo. The `url` is issued by the file
/// store at upload time and doubles as the deletion handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub url: String,
}

/// One todo document as stored in the `todos` collection.
///
/// `finish_date` stays a raw `YYYY-MM-DD` string: it is what the store
/// persists and orders by, and stored values are not guaranteed to parse
/// as dates. Callers that need calendar arithmetic go through
/// [`TodoRecord::finish_date`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoRecord {
    /// Assigned by the document store on insert; absent before first
    /// persistence and never sent back in document bodies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub body: String,
    #[serde(rename = "finishDate")]
    pub finish_date: String,
    pub checked: bool,
    #[serde(default)]
    pub files: Vec<FileRef>,
}

impl TodoRecord {
    pub fn finish_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.finish_date, "%Y-%m-%d").ok()
    }

    /// Finish date formatted for display (`DD.MM.YY`), or the raw stored
    /// string when it does not parse.
    pub fn finish_date_display(&self) -> String {
        match self.finish_date() {
            Some(date) => date.format("%d.%m.%y").to_string(),
            None => self.finish_date.clone(),
        }
    }

    /// A todo is expired once its finish date lies more than one day in the
    /// past. Unparseable dates never count as expired.
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        match self.finish_date() {
            Some(date) => (today - date).num_days() > 1,
            None => false,
        }
    }
}

/// Build a new file list with the entry matching `url` excluded.
///
/// Matching is by url, not name: duplicate display names are permitted and
/// each upload has a distinct storage url.
pub fn files_without(files: &[FileRef], url: &str) -> Vec<FileRef> {
    files.iter().filter(|f| f.url != url).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(finish_date: &str) -> TodoRecord {
        TodoRecord {
            id: Some("abc".into()),
            title: "Buy milk".into(),
            body: String::new(),
            finish_date: finish_date.into(),
            checked: false,
            files: Vec::new(),
        }
    }

    #[test]
    fn wire_format_uses_camel_case_finish_date() {
        let json = serde_json::to_string(&record("2030-01-01")).unwrap();
        assert!(json.contains("\"finishDate\":\"2030-01-01\""));
        assert!(!json.contains("finish_date"));
    }

    #[test]
    fn id_is_omitted_before_first_persistence() {
        let mut todo = record("2030-01-01");
        todo.id = None;
        let json = serde_json::to_string(&todo).unwrap();
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn deserializes_document_without_files_field() {
        let json = r#"{"id":"x1","title":"t","body":"","finishDate":"2030-01-01","checked":true}"#;
        let todo: TodoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(todo.id.as_deref(), Some("x1"));
        assert!(todo.checked);
        assert!(todo.files.is_empty());
    }

    #[test]
    fn expiry_needs_more_than_one_day() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 7).unwrap();
        assert!(record("2026-08-05").is_expired(today));
        assert!(!record("2026-08-06").is_expired(today));
        assert!(!record("2026-08-07").is_expired(today));
        assert!(!record("2026-08-08").is_expired(today));
        assert!(!record("not-a-date").is_expired(today));
    }

    #[test]
    fn display_falls_back_to_raw_string() {
        assert_eq!(record("2030-01-02").finish_date_display(), "02.01.30");
        assert_eq!(record("soonish").finish_date_display(), "soonish");
    }

    #[test]
    fn files_without_removes_only_matching_url() {
        let files = vec![
            FileRef { name: "a.txt".into(), url: "https://f/1".into() },
            FileRef { name: "a.txt".into(), url: "https://f/2".into() },
            FileRef { name: "b.txt".into(), url: "https://f/3".into() },
        ];
        let remaining = files_without(&files, "https://f/2");
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|f| f.url != "https://f/2"));
        // The duplicate display name survives
        assert_eq!(remaining[0].name, "a.txt");
    }
}
