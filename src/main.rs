use anyhow::Result;
use clap::Parser;
use tokio::sync::mpsc;

use nota_cli::api::client::ApiClient;
use nota_cli::app::App;
use nota_cli::ui;
use nota_cli::utils::config::Config;
use nota_cli::utils::logger::{self, LogLevel};

#[derive(Parser)]
#[command(name = "nota")]
#[command(about = "NOTA CLI - terminal chat with session login", long_about = None)]
struct Cli {
    /// Run in verbose mode
    #[arg(short, long)]
    verbose: bool,

    /// Override the configured API endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// Write debug detail to the log file
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default()?;
    let min_level = if cli.debug {
        LogLevel::Debug
    } else {
        config.log_level()
    };
    if let Err(error) = logger::init_global_logger(min_level) {
        // The app keeps running without a log file
        eprintln!("Logging disabled: {}", error);
    }

    let base_url = cli
        .endpoint
        .unwrap_or_else(|| config.server.base_url.clone());

    if cli.verbose {
        println!("🚀 Starting NOTA CLI with endpoint: {}", base_url);
        if let Some(active) = logger::get_global_logger() {
            println!("📁 Logging to {}", active.path().display());
        }
    }
    logger::info(&format!("NOTA CLI starting, endpoint {}", base_url));

    let api_client = ApiClient::new(&base_url)?;

    println!("{}", ui::ColorTheme::header().apply_to("NOTA"));
    println!(
        "{}",
        ui::ColorTheme::dim()
            .apply_to("Not a therapist. Just here to chat.")
    );
    println!();

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut app = App::new(api_client, events_tx.clone());

    app.bootstrap().await;
    ui::spawn_stdin_reader(events_tx);
    app.render_prompt();

    while let Some(event) = events_rx.recv().await {
        app.handle_event(event).await;
        if !app.running {
            break;
        }
        app.render_prompt();
    }

    logger::info("NOTA CLI exiting");
    Ok(())
}
