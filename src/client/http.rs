//! HTTP backend for the FAQ chatbot server.
//!
//! The chat contract is a single JSON round trip:
//!
//! ```text
//! POST /chat   {"message": "..."}   →   2xx {"response": "..."}
//! ```
//!
//! The server also accepts a FAQ document upload on `/` and serves the
//! computed question embeddings on `/download_model`. Both are exposed here
//! for the headless commands; the chat loop only uses [`ChatBackend::send`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use log::{debug, info};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;

use crate::client::{BackendError, ChatBackend};

pub const CHAT_PATH: &str = "/chat";
pub const DOWNLOAD_MODEL_PATH: &str = "/download_model";

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    response: String,
}

/// Error body the server sends alongside a 404 on `/download_model`.
#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: String,
}

// ============================================================================
// Backend Implementation
// ============================================================================

pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Uploads a FAQ document for the server to index.
    ///
    /// Only `.pdf` files are accepted; anything else is refused before a
    /// request is made. Returns the uploaded file name.
    pub async fn upload_document(&self, path: &Path) -> Result<String, BackendError> {
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            return Err(BackendError::InvalidInput(
                "Only PDF files are supported.".to_string(),
            ));
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| BackendError::InvalidInput("No file uploaded.".to_string()))?;

        let bytes = tokio::fs::read(path).await?;
        info!("Uploading {} ({} bytes) to {}", file_name, bytes.len(), self.base_url);

        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str("application/pdf")
            .map_err(|e| BackendError::InvalidInput(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        Ok(file_name)
    }

    /// Streams the server's embeddings file into `dest`. Returns bytes written.
    ///
    /// The body goes to a `.part` file beside `dest`, which replaces `dest`
    /// only once the whole body has arrived. On failure the partial file is
    /// removed and any earlier `dest` is left untouched.
    pub async fn download_model(&self, dest: &Path) -> Result<u64, BackendError> {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, DOWNLOAD_MODEL_PATH))
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let partial = partial_path(dest);
        let written = match stream_to_file(response, &partial).await {
            Ok(written) => written,
            Err(e) => {
                if let Err(rm) = tokio::fs::remove_file(&partial).await {
                    debug!("Could not remove {}: {}", partial.display(), rm);
                }
                return Err(e);
            }
        };
        tokio::fs::rename(&partial, dest).await?;

        info!("Downloaded {} bytes to {}", written, dest.display());
        Ok(written)
    }
}

/// `<dest>.part`, in the same directory so the final rename stays on one
/// filesystem.
fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("download"));
    name.push(".part");
    dest.with_file_name(name)
}

async fn stream_to_file(response: reqwest::Response, path: &Path) -> Result<u64, BackendError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut stream = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| BackendError::Transport(e.to_string()))?;
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

/// Turns a non-2xx response into `BackendError::Rejected`, preferring the
/// server's `{"error": ...}` message when present.
async fn rejection(response: reqwest::Response) -> BackendError {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string());
    let message = serde_json::from_str::<ErrorBody>(&body)
        .map(|parsed| parsed.error)
        .unwrap_or(body);
    debug!("Server error: {} - {}", status, message);
    BackendError::Rejected { status, message }
}

#[async_trait]
impl ChatBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn send(&self, message: &str) -> Result<String, BackendError> {
        info!("POST {}{} (message len={})", self.base_url, CHAT_PATH, message.len());

        // `.json()` sets `Content-Type: application/json`
        let response = self
            .client
            .post(format!("{}{}", self.base_url, CHAT_PATH))
            .json(&ChatRequest { message })
            .send()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;

        debug!("Chat response status: {}", response.status());

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Transport(e.to_string()))?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| BackendError::Parse(e.to_string()))?;

        debug!("Chat reply received (len={})", parsed.response.len());
        Ok(parsed.response)
    }
}
