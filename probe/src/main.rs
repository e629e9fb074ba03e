//! gemini-probe: one call against the Gemini API, printed to stdout.
//!
//! ```bash
//! GEMINI_API_KEY=... gemini-probe list-models
//! gemini-probe list-models --summary
//! gemini-probe generate --model gemini-2.0-flash --prompt "Say hello world" --text
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use gemini_core::{Credential, GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_PROMPT};
use gemini_probe::{failure_line, generate_content, list_models, GenerateStyle, ListStyle, UreqTransport};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "gemini-probe")]
#[command(about = "Probe the Gemini API and print the raw JSON response")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// API base URL, up to and including the version segment.
    #[arg(long, env = "GEMINI_API_BASE", default_value = DEFAULT_BASE_URL, global = true)]
    base_url: String,

    /// API key. Not validated locally; a missing key is still sent.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Verbose output (debug logs on stderr).
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Quiet mode (no logs).
    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List the models available to the key.
    ListModels {
        /// Print a numbered summary instead of the JSON.
        #[arg(long)]
        summary: bool,
    },

    /// Request a single text completion.
    Generate {
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        #[arg(long, default_value = DEFAULT_PROMPT)]
        prompt: String,

        /// Print only the generated text instead of the JSON.
        #[arg(long)]
        text: bool,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("gemini_probe=debug,gemini_core=debug,info"),
        Err(_) => EnvFilter::new("warn"),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let credential = Credential::new(cli.api_key);
    if credential.is_present() {
        info!(api_key = %credential, base_url = %cli.base_url, "starting probe");
    } else {
        warn!(api_key = %credential, base_url = %cli.base_url, "starting probe");
    }

    let client = GeminiClient::new(&cli.base_url);
    let transport = UreqTransport::new();

    let output = match cli.command {
        Command::ListModels { summary } => {
            let style = if summary { ListStyle::Summary } else { ListStyle::Json };
            list_models(&client, &transport, &credential, style)?
        }
        Command::Generate { model, prompt, text } => {
            let style = if text { GenerateStyle::Text } else { GenerateStyle::Json };
            generate_content(&client, &transport, &credential, &model, &prompt, style)?
        }
    };

    println!("{}", output.rendered);

    if let Some(line) = failure_line(&output.report) {
        eprintln!("{line}");
        std::process::exit(1);
    }

    Ok(())
}
