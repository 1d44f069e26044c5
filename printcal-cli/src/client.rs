//! HTTP gateway to the member site's calendar endpoints.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::multipart;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use url::Url;

use printcal_core::event::CalendarPayload;
use printcal_core::export::{ExportFormat, wire_payload};
use printcal_core::note::{NoteAction, plan_save};
use printcal_core::populate::PopulatedGrid;

const API_ROOT: &str = "wp-json/activities/v1";
const NONCE_HEADER: &str = "X-WP-Nonce";

/// Gateway to the member site. One instance per run; note saves are
/// serialized per date so overlapping saves cannot race the remote id,
/// while saves for different dates proceed in parallel.
pub struct Client {
    http: reqwest::Client,
    site: String,
    nonce: Option<String>,
    note_locks: Mutex<HashMap<NaiveDate, Arc<Mutex<()>>>>,
}

// Request/response bodies for the note store and media endpoints.

#[derive(Serialize)]
struct NoteFields<'a> {
    member_event_date: &'a str,
}

#[derive(Serialize)]
struct NoteWriteRequest<'a> {
    acf: NoteFields<'a>,
    title: &'a str,
    status: &'a str,
}

#[derive(Serialize)]
struct NoteDeleteRequest<'a> {
    title: &'a str,
}

#[derive(Deserialize)]
struct NoteWriteResponse {
    id: u64,
}

#[derive(Deserialize)]
struct UploadResponse {
    path: String,
}

/// Outcome of a note save, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub action: NoteAction,
    pub remote_id: Option<u64>,
}

impl Client {
    pub fn new(site: Url, nonce: Option<String>) -> Self {
        Client {
            http: reqwest::Client::new(),
            site: site.as_str().trim_end_matches('/').to_string(),
            nonce,
            note_locks: Mutex::new(HashMap::new()),
        }
    }

    fn nonce(&self) -> Result<&str> {
        self.nonce
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("No rest_nonce configured"))
    }

    /// GET the full calendar payload: activities, custom events, the
    /// member's notes, and the stored background.
    pub async fn fetch_calendar(&self) -> Result<CalendarPayload> {
        let resp = self
            .http
            .get(format!("{}/{}/search", self.site, API_ROOT))
            .send()
            .await
            .context("Failed to reach the calendar endpoint")?;

        if !resp.status().is_success() {
            anyhow::bail!("Calendar fetch failed: {}", error_body(resp).await);
        }

        let body = resp.text().await.context("Failed to read calendar response")?;
        Ok(CalendarPayload::from_json(&body)?)
    }

    /// Save `text` as the note for `date`, deriving create/update/delete
    /// intent from the existing remote record.
    pub async fn save_note(
        &self,
        date: NaiveDate,
        text: &str,
        existing_remote_id: Option<u64>,
    ) -> Result<SaveOutcome> {
        let lock = self.note_lock(date).await;
        let _guard = lock.lock().await;

        let action = plan_save(existing_remote_id, text);
        let remote_id = match action {
            NoteAction::Create => Some(self.create_note(date, text).await?),
            NoteAction::Update => {
                let id = existing_remote_id.expect("Update must have a remote id");
                self.update_note(id, date, text).await?;
                Some(id)
            }
            NoteAction::Delete => {
                let id = existing_remote_id.expect("Delete must have a remote id");
                self.delete_note(id).await?;
                None
            }
            NoteAction::Noop => None,
        };

        Ok(SaveOutcome { action, remote_id })
    }

    async fn note_lock(&self, date: NaiveDate) -> Arc<Mutex<()>> {
        self.note_locks
            .lock()
            .await
            .entry(date)
            .or_default()
            .clone()
    }

    async fn create_note(&self, date: NaiveDate, text: &str) -> Result<u64> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let req = NoteWriteRequest {
            acf: NoteFields {
                member_event_date: &date_str,
            },
            title: text,
            status: "publish",
        };

        let resp = self
            .http
            .post(format!("{}/{}/member-events", self.site, API_ROOT))
            .header(NONCE_HEADER, self.nonce()?)
            .json(&req)
            .send()
            .await
            .context("Failed to reach the note endpoint")?;

        if !resp.status().is_success() {
            anyhow::bail!("Note create failed: {}", error_body(resp).await);
        }

        let created: NoteWriteResponse = resp.json().await.context("Unexpected note response")?;
        Ok(created.id)
    }

    async fn update_note(&self, id: u64, date: NaiveDate, text: &str) -> Result<()> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let req = NoteWriteRequest {
            acf: NoteFields {
                member_event_date: &date_str,
            },
            title: text,
            status: "publish",
        };

        let resp = self
            .http
            .post(format!("{}/{}/member-events/{}", self.site, API_ROOT, id))
            .header(NONCE_HEADER, self.nonce()?)
            .json(&req)
            .send()
            .await
            .context("Failed to reach the note endpoint")?;

        if !resp.status().is_success() {
            anyhow::bail!("Note update failed: {}", error_body(resp).await);
        }
        Ok(())
    }

    async fn delete_note(&self, id: u64) -> Result<()> {
        let resp = self
            .http
            .post(format!("{}/{}/member-events/{}", self.site, API_ROOT, id))
            .header(NONCE_HEADER, self.nonce()?)
            .json(&NoteDeleteRequest { title: "" })
            .send()
            .await
            .context("Failed to reach the note endpoint")?;

        if !resp.status().is_success() {
            anyhow::bail!("Note delete failed: {}", error_body(resp).await);
        }
        Ok(())
    }

    /// Render the grid remotely; returns the document bytes. Success
    /// requires a matching binary content type — the renderer reports its
    /// own failures as JSON/text bodies behind a 200.
    pub async fn export(&self, grid: &PopulatedGrid, format: ExportFormat) -> Result<Vec<u8>> {
        let resp = self
            .http
            .post(format!("{}/{}/download-calendar", self.site, API_ROOT))
            .query(&[("format", format.extension())])
            .json(&wire_payload(grid))
            .send()
            .await
            .context("Failed to reach the document endpoint")?;

        if !resp.status().is_success() {
            anyhow::bail!("Document generation failed: {}", error_body(resp).await);
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.starts_with(format.mime()) {
            anyhow::bail!("Document generation failed: {}", error_body(resp).await);
        }

        Ok(resp
            .bytes()
            .await
            .context("Failed to read document body")?
            .to_vec())
    }

    /// Upload a background image; returns the stored media path. The
    /// nonce travels as a form field on this endpoint.
    pub async fn upload_background(&self, file: &Path) -> Result<String> {
        let bytes = tokio::fs::read(file)
            .await
            .with_context(|| format!("Failed to read {}", file.display()))?;
        let filename = file
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("background")
            .to_string();

        let form = multipart::Form::new()
            .part("async-upload", multipart::Part::bytes(bytes).file_name(filename))
            .text("nonce", self.nonce()?.to_string())
            .text("compressState", "calendar_bg");

        let resp = self
            .http
            .post(format!("{}/{}/upload-bg", self.site, API_ROOT))
            .multipart(form)
            .send()
            .await
            .context("Failed to reach the upload endpoint")?;

        if !resp.status().is_success() {
            anyhow::bail!("Upload failed: {}", error_body(resp).await);
        }

        let uploaded: UploadResponse = resp.json().await.context("Unexpected upload response")?;
        Ok(uploaded.path)
    }
}

/// Best-effort error text from a failed response.
async fn error_body(resp: reqwest::Response) -> String {
    let status = resp.status();
    resp.text()
        .await
        .ok()
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| status.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_write_body_matches_the_store_contract() {
        let req = NoteWriteRequest {
            acf: NoteFields {
                member_event_date: "2025-07-10",
            },
            title: "hello",
            status: "publish",
        };

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({
                "acf": {"member_event_date": "2025-07-10"},
                "title": "hello",
                "status": "publish"
            })
        );
    }

    #[test]
    fn note_delete_body_is_just_an_empty_title() {
        let req = NoteDeleteRequest { title: "" };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"title": ""})
        );
    }

    #[test]
    fn site_root_is_normalized_without_trailing_slash() {
        let client = Client::new(Url::parse("https://example.org/").unwrap(), None);
        assert_eq!(client.site, "https://example.org");
    }
}
