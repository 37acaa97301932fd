//! # Headless Commands
//!
//! One-shot subcommands that run without the TUI. `ask` drives the same
//! [`ChatWidget`] as the interactive screen, through a [`LineView`] that
//! prints each appended message as a line.

use std::error::Error;
use std::io::Write;
use std::path::Path;

use log::{info, warn};

use crate::client::HttpBackend;
use crate::core::config::ResolvedConfig;
use crate::core::message::{ChatMessage, Sender};
use crate::core::view::ChatView;
use crate::core::widget::ChatWidget;

/// A [`ChatView`] that writes `"<label>: <text>"` lines to `out`.
///
/// The input is fixed at construction. Output is already at its end, so
/// `scroll_to_end` does nothing.
pub struct LineView<W: Write> {
    out: W,
    input: String,
    user_label: String,
    bot_label: String,
}

impl<W: Write> LineView<W> {
    pub fn new(out: W, input: impl Into<String>, config: &ResolvedConfig) -> Self {
        Self {
            out,
            input: input.into(),
            user_label: config.user_name.clone(),
            bot_label: config.bot_name.clone(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChatView for LineView<W> {
    fn input_value(&self) -> String {
        self.input.clone()
    }

    fn clear_input(&mut self) {
        self.input.clear();
    }

    fn append_message(&mut self, message: ChatMessage) {
        let label = match message.sender {
            Sender::User => &self.user_label,
            Sender::Bot => &self.bot_label,
        };
        if let Err(e) = writeln!(self.out, "{}: {}", label, message.text) {
            warn!("Failed to print {}: {}", message.sender.class_name(), e);
        }
    }

    fn scroll_to_end(&mut self) {}
}

/// Sends one message and prints the exchange.
pub async fn ask<W: Write>(
    widget: &ChatWidget,
    config: &ResolvedConfig,
    message: &str,
    out: W,
) -> Result<W, Box<dyn Error>> {
    if message.trim().is_empty() {
        return Err("Nothing to send: message is empty".into());
    }

    let mut view = LineView::new(out, message, config);
    widget.submit(&mut view).await;
    Ok(view.into_inner())
}

pub async fn upload<W: Write>(
    backend: &HttpBackend,
    path: &Path,
    mut out: W,
) -> Result<(), Box<dyn Error>> {
    let name = backend.upload_document(path).await?;
    info!("Upload of {} accepted", name);
    writeln!(out, "Uploaded {} to {}", name, backend.base_url())?;
    Ok(())
}

pub async fn download_model<W: Write>(
    backend: &HttpBackend,
    dest: &Path,
    mut out: W,
) -> Result<(), Box<dyn Error>> {
    let written = backend.download_model(dest).await?;
    writeln!(out, "Saved {} bytes to {}", written, dest.display())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::client::BackendError;
    use crate::core::config::{ChatboxConfig, EnvOverrides, resolve};
    use crate::core::message::FALLBACK_REJECTED;
    use crate::test_support::ScriptedBackend;

    fn config() -> ResolvedConfig {
        resolve(&ChatboxConfig::default(), &EnvOverrides::default(), None)
    }

    #[tokio::test]
    async fn test_ask_prints_both_sides() {
        let backend = Arc::new(ScriptedBackend::replying(vec![Ok("Hi there".to_string())]));
        let widget = ChatWidget::new(backend);

        let out = ask(&widget, &config(), "  hello ", Vec::new()).await.unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "You: hello\nBot: Hi there\n");
    }

    #[tokio::test]
    async fn test_ask_prints_fallback() {
        let backend = Arc::new(ScriptedBackend::replying(vec![Err(BackendError::Rejected {
            status: 400,
            message: "Please ask a question.".to_string(),
        })]));
        let widget = ChatWidget::new(backend);

        let out = ask(&widget, &config(), "hello", Vec::new()).await.unwrap();

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.ends_with(&format!("Bot: {FALLBACK_REJECTED}\n")));
    }

    #[tokio::test]
    async fn test_ask_refuses_blank_message() {
        let backend = Arc::new(ScriptedBackend::replying(vec![]));
        let widget = ChatWidget::new(backend.clone());

        assert!(ask(&widget, &config(), "   ", Vec::new()).await.is_err());
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn test_line_view_uses_configured_labels() {
        let mut config = config();
        config.bot_name = "Helper".to_string();
        let mut view = LineView::new(Vec::new(), "", &config);

        view.append_message(ChatMessage::bot("yo"));

        assert_eq!(String::from_utf8(view.into_inner()).unwrap(), "Helper: yo\n");
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf_without_network() {
        let backend = HttpBackend::new("http://127.0.0.1:9");
        let err = upload(&backend, Path::new("notes.txt"), Vec::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Only PDF files are supported.");
    }
}
