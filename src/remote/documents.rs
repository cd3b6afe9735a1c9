use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::core::todo::{FileRef, TodoRecord};

/// Collection holding the todo documents.
const COLLECTION: &str = "todos";

/// Client for the hosted document store. Documents live under
/// `{base}/projects/{project}/collections/todos/documents`; the store
/// assigns ids on insert, supports field-level updates by id, and orders
/// the list query ascending by `finishDate`.
#[derive(Clone)]
pub struct DocumentClient {
    collection_url: String,
    api_key: String,
    http: Client,
}

#[derive(Deserialize)]
struct DocumentListResponse {
    documents: Vec<TodoRecord>,
}

#[derive(Deserialize)]
struct InsertResponse {
    id: String,
}

impl DocumentClient {
    pub fn new(base_url: &str, project_id: &str, api_key: &str) -> Result<Self, String> {
        let http = Client::builder()
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
        Ok(Self {
            collection_url: format!(
                "{}/projects/{}/collections/{}/documents",
                base_url.trim_end_matches('/'),
                project_id,
                COLLECTION,
            ),
            api_key: api_key.to_string(),
            http,
        })
    }

    /// Fetch every todo document, ordered ascending by finish date. The
    /// ordering is the store's; the response order is preserved as-is.
    pub async fn list_todos(&self) -> Result<Vec<TodoRecord>, String> {
        let resp = self
            .http
            .get(&self.collection_url)
            .query(&[("order_by", "finishDate")])
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| format!("List request failed: {}", e))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| format!("Failed to read list response: {}", e))?;

        if !status.is_success() {
            return Err(format!("List returned {}: {}", status, text));
        }

        parse_document_list(&text)
    }

    /// Insert one document and return the id the store assigned to it.
    pub async fn insert_todo(&self, todo: &TodoRecord) -> Result<String, String> {
        let resp = self
            .http
            .post(&self.collection_url)
            .header("X-Api-Key", &self.api_key)
            .json(todo)
            .send()
            .await
            .map_err(|e| format!("Insert request failed: {}", e))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| format!("Failed to read insert response: {}", e))?;

        if !status.is_success() {
            return Err(format!("Insert returned {}: {}", status, text));
        }

        parse_insert_response(&text)
    }

    /// Field-level update of every document field (the edit workflow's
    /// single write).
    pub async fn update_todo(&self, id: &str, todo: &TodoRecord) -> Result<(), String> {
        self.patch(
            id,
            serde_json::json!({
                "title": todo.title,
                "body": todo.body,
                "finishDate": todo.finish_date,
                "checked": todo.checked,
                "files": todo.files,
            }),
        )
        .await
    }

    /// Update only the `files` field.
    pub async fn update_files(&self, id: &str, files: &[FileRef]) -> Result<(), String> {
        self.patch(id, serde_json::json!({ "files": files })).await
    }

    /// Update only the `checked` flag.
    pub async fn update_checked(&self, id: &str, checked: bool) -> Result<(), String> {
        self.patch(id, serde_json::json!({ "checked": checked })).await
    }

    pub async fn delete_todo(&self, id: &str) -> Result<(), String> {
        let url = format!("{}/{}", self.collection_url, id);
        let resp = self
            .http
            .delete(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await
            .map_err(|e| format!("Delete request failed: {}", e))?;

        match resp.status() {
            StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
            s => {
                let text = resp.text().await.unwrap_or_default();
                Err(format!("Delete returned {}: {}", s, text))
            }
        }
    }

    async fn patch(&self, id: &str, fields: serde_json::Value) -> Result<(), String> {
        let url = format!("{}/{}", self.collection_url, id);
        let resp = self
            .http
            .patch(&url)
            .header("X-Api-Key", &self.api_key)
            .json(&fields)
            .send()
            .await
            .map_err(|e| format!("Update request failed: {}", e))?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(format!("Update returned {}: {}", status, text));
        }
        Ok(())
    }
}

/// Parse the list response, preserving the store's document order.
fn parse_document_list(json: &str) -> Result<Vec<TodoRecord>, String> {
    let parsed: DocumentListResponse =
        serde_json::from_str(json).map_err(|e| format!("Failed to parse document list: {}", e))?;
    Ok(parsed.documents)
}

/// Extract the generated id from an insert response.
fn parse_insert_response(json: &str) -> Result<String, String> {
    let parsed: InsertResponse = serde_json::from_str(json)
        .map_err(|e| format!("Failed to parse insert response: {}", e))?;
    Ok(parsed.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_parsing_preserves_store_order() {
        let json = r#"{
            "documents": [
                {"id": "b", "title": "earlier", "body": "", "finishDate": "2026-01-01", "checked": false, "files": []},
                {"id": "a", "title": "later", "body": "x", "finishDate": "2026-02-01", "checked": true,
                 "files": [{"name": "notes.txt", "url": "https://files/1"}]}
            ]
        }"#;
        let todos = parse_document_list(json).unwrap();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].id.as_deref(), Some("b"));
        assert_eq!(todos[1].files[0].name, "notes.txt");
    }

    #[test]
    fn empty_list_parses() {
        let todos = parse_document_list(r#"{"documents": []}"#).unwrap();
        assert!(todos.is_empty());
    }

    #[test]
    fn malformed_list_is_an_error() {
        assert!(parse_document_list("not json").is_err());
        assert!(parse_document_list(r#"{"rows": []}"#).is_err());
    }

    #[test]
    fn insert_response_yields_id() {
        assert_eq!(parse_insert_response(r#"{"id": "doc-42"}"#).unwrap(), "doc-42");
        assert!(parse_insert_response(r#"{}"#).is_err());
    }
}
