use std::error::Error;
use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chatbox::client::HttpBackend;
use chatbox::commands;
use chatbox::core::config::{self, ChatboxConfig, EnvOverrides};
use chatbox::core::widget::ChatWidget;
use chatbox::tui;
use clap::{Parser, Subcommand};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "chatbox", version, about = "Terminal client for a FAQ chatbot server")]
struct Args {
    /// Chat server base URL (overrides config file and CHATBOX_BASE_URL)
    #[arg(short, long)]
    url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Send one message and print the reply
    Ask { message: String },
    /// Upload a PDF of questions and answers for the server to index
    Upload { path: PathBuf },
    /// Download the server's computed embeddings
    DownloadModel {
        #[arg(short, long, default_value = "model_embeddings.pt")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Config is loaded before the logger so the log path can come from it
    let (file_config, config_error) = match config::load_config() {
        Ok(config) => (config, None),
        Err(e) => (ChatboxConfig::default(), Some(e)),
    };
    let config = config::resolve(&file_config, &EnvOverrides::from_env(), args.url.as_deref());

    // Initialize file logger - the TUI owns the terminal
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    if let Some(e) = config_error {
        log::warn!("Falling back to default config: {}", e);
    }
    log::info!("Chatbox starting up against {}", config.base_url);

    let backend = Arc::new(HttpBackend::new(config.base_url.clone()));

    let result: Result<(), Box<dyn Error>> = match args.command {
        None => {
            let widget = ChatWidget::new(backend);
            tui::run(&config, widget).map_err(Into::into)
        }
        Some(Command::Ask { message }) => {
            let widget = ChatWidget::new(backend);
            commands::ask(&widget, &config, &message, stdout())
                .await
                .map(|_| ())
        }
        Some(Command::Upload { path }) => commands::upload(&backend, &path, stdout()).await,
        Some(Command::DownloadModel { output }) => {
            commands::download_model(&backend, &output, stdout()).await
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("chatbox: {e}");
            ExitCode::FAILURE
        }
    }
}
