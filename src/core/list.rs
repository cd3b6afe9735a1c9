use super::todo::{FileRef, TodoRecord};

/// The in-memory todo list, the single source of truth for rendering.
///
/// Filled once from the store at startup (ordered ascending by finish date)
/// and spliced locally after each successful workflow. It is never
/// re-fetched, so concurrent clients do not see each other's changes.
#[derive(Debug, Clone, Default)]
pub struct TodoList {
    records: Vec<TodoRecord>,
}

impl TodoList {
    /// Replace the whole list with the result of the initial fetch.
    pub fn replace_all(&mut self, records: Vec<TodoRecord>) {
        self.records = records;
    }

    pub fn records(&self) -> &[TodoRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&TodoRecord> {
        self.records.iter().find(|t| t.id.as_deref() == Some(id))
    }

    /// Append a freshly created record. The store-assigned id must already
    /// be set.
    pub fn push(&mut self, todo: TodoRecord) {
        self.records.push(todo);
    }

    /// Replace the entry with the same id wholesale. A record whose id
    /// matches nothing leaves the list untouched.
    pub fn replace(&mut self, todo: TodoRecord) {
        if let Some(slot) = self
            .records
            .iter_mut()
            .find(|t| t.id.is_some() && t.id == todo.id)
        {
            *slot = todo;
        }
    }

    pub fn remove(&mut self, id: &str) {
        self.records.retain(|t| t.id.as_deref() != Some(id));
    }

    pub fn set_checked(&mut self, id: &str, checked: bool) {
        if let Some(todo) = self
            .records
            .iter_mut()
            .find(|t| t.id.as_deref() == Some(id))
        {
            todo.checked = checked;
        }
    }

    pub fn set_files(&mut self, id: &str, files: Vec<FileRef>) {
        if let Some(todo) = self
            .records
            .iter_mut()
            .find(|t| t.id.as_deref() == Some(id))
        {
            todo.files = files;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, title: &str) -> TodoRecord {
        TodoRecord {
            id: Some(id.into()),
            title: title.into(),
            body: String::new(),
            finish_date: "2030-01-01".into(),
            checked: false,
            files: Vec::new(),
        }
    }

    #[test]
    fn push_keeps_insertion_order() {
        let mut list = TodoList::default();
        list.push(record("a", "first"));
        list.push(record("b", "second"));
        let titles: Vec<&str> = list.records().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }

    #[test]
    fn replace_swaps_the_entry_wholesale() {
        let mut list = TodoList::default();
        list.push(record("a", "old"));
        list.push(record("b", "other"));

        let mut edited = record("a", "new");
        edited.checked = true;
        edited.files = vec![FileRef { name: "f".into(), url: "https://f/1".into() }];
        list.replace(edited.clone());

        assert_eq!(list.get("a"), Some(&edited));
        assert_eq!(list.get("b").unwrap().title, "other");
    }

    #[test]
    fn replace_with_unknown_id_is_a_no_op() {
        let mut list = TodoList::default();
        list.push(record("a", "kept"));
        list.replace(record("zzz", "stray"));
        assert_eq!(list.records().len(), 1);
        assert_eq!(list.get("a").unwrap().title, "kept");
    }

    #[test]
    fn remove_drops_only_the_matching_id() {
        let mut list = TodoList::default();
        list.push(record("a", "first"));
        list.push(record("b", "second"));
        list.remove("a");
        assert!(list.get("a").is_none());
        assert_eq!(list.records().len(), 1);
    }

    #[test]
    fn set_checked_and_files_update_in_place() {
        let mut list = TodoList::default();
        list.push(record("a", "t"));

        list.set_checked("a", true);
        assert!(list.get("a").unwrap().checked);

        let files = vec![FileRef { name: "f".into(), url: "https://f/1".into() }];
        list.set_files("a", files.clone());
        assert_eq!(list.get("a").unwrap().files, files);
    }
}
