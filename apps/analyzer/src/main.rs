mod analysis;
mod cli;
mod config;
mod errors;
mod llm_client;
mod report;
mod table;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::batch::BatchProcessor;
use crate::analysis::classifier::{ComplaintClassifier, LlmComplaintClassifier};
use crate::analysis::extractor::ConversationExtractor;
use crate::analysis::pacing::{FixedDelay, NoDelay, Pacer};
use crate::cli::{AnalyzeArgs, Cli, Command, ExploreArgs};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::report::generate_report;
use crate::table::explore::{explore_table, render_exploration};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    config::load_dotenv();

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::fallback_log_directive())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Analyze(args) => analyze(args).await,
        Command::Explore(args) => {
            explore(&args);
            Ok(())
        }
    }
}

async fn analyze(args: AnalyzeArgs) -> Result<()> {
    // Fatal before any file is opened if the credential is missing
    let config = Config::from_env()?;

    info!("Starting complaint analyzer v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_base_url.clone(),
        config.openai_model.clone(),
    )?;
    info!("LLM client initialized (model: {})", llm.model());

    let classifier: Arc<dyn ComplaintClassifier> = Arc::new(LlmComplaintClassifier::new(llm));
    let pacer: Arc<dyn Pacer> = match args.delay_ms.unwrap_or(config.request_delay_ms) {
        0 => Arc::new(NoDelay),
        millis => Arc::new(FixedDelay::from_millis(millis)),
    };
    let processor = BatchProcessor::new(ConversationExtractor::default(), classifier, pacer);

    let mut all_records = Vec::new();
    for path in &args.files {
        if !path.exists() {
            warn!("File not found: {}", path.display());
            println!("Archivo no encontrado: {}", path.display());
            continue;
        }
        info!("Processing file: {}", path.display());
        all_records.extend(processor.process_file(path, args.row_limit()).await);
    }

    if all_records.is_empty() {
        println!("No se encontraron resultados para analizar");
        return Ok(());
    }

    generate_report(&all_records, args.output_path())?;

    Ok(())
}

fn explore(args: &ExploreArgs) {
    for path in &args.files {
        if !path.exists() {
            println!("Archivo no encontrado: {}", path.display());
            continue;
        }
        match explore_table(path) {
            Ok(exploration) => print!("{}", render_exploration(&exploration)),
            Err(e) => println!("Error al leer {}: {e}", path.display()),
        }
    }
}
