//! Operator CLI for the Ojisandex catalog.
//!
//! All generation is operator-invoked and offline from the site's point of
//! view: `generate` appends one entry, `seed` populates the catalog from
//! the built-in topic list, `backfill` fills missing illustrations. The
//! API credential is checked before any work starts; batch runs absorb
//! per-item failures internally, so an error escaping to the top here is
//! fatal and exits non-zero.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ojisandex_catalog::{CatalogPaths, CatalogStore};
use ojisandex_gemini::GeminiClient;
use ojisandex_pipeline::{prompts, Pipeline, SingleOutcome};

/// Default text-generation model.
const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// Default image-generation model.
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-exp";

/// Env vars overriding the model choices.
const TEXT_MODEL_ENV: &str = "OJISANDEX_TEXT_MODEL";
const IMAGE_MODEL_ENV: &str = "OJISANDEX_IMAGE_MODEL";

#[derive(Parser)]
#[command(name = "ojisandex", version, about = "Operator tooling for the Ojisandex catalog")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate one new entry and append it to the catalog.
    Generate {
        /// Theme hint biasing the generated entry.
        #[arg(long)]
        seed: Option<String>,
        /// Generate and print the draft without persisting anything.
        #[arg(long)]
        dry_run: bool,
    },
    /// Populate the catalog from the built-in seed topics.
    Seed,
    /// Generate illustrations for entries that have none.
    Backfill {
        /// List the work without calling the image capability.
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Credential first: nothing should start without it.
    let client = GeminiClient::from_env()?;

    let text_model = client.model(model_name(TEXT_MODEL_ENV, DEFAULT_TEXT_MODEL));
    let image_model = client.model(model_name(IMAGE_MODEL_ENV, DEFAULT_IMAGE_MODEL));
    let store = CatalogStore::new(&CatalogPaths::from_env());
    let pipeline = Pipeline::new(&text_model, &image_model, &store);

    match cli.command {
        Command::Generate { seed, dry_run } => {
            match pipeline.run_single(seed.as_deref(), dry_run).await? {
                SingleOutcome::DryRun(draft) => {
                    tracing::info!("Dry run — nothing persisted");
                    println!("{}", serde_json::to_string_pretty(&draft)?);
                }
                SingleOutcome::Saved(entry) => {
                    tracing::info!(
                        id = entry.id,
                        title_ja = %entry.title_ja,
                        title_en = %entry.title_en,
                        "Entry saved"
                    );
                }
            }
        }
        Command::Seed => {
            let summary = pipeline.run_seed_batch(prompts::SEED_TOPICS).await?;
            tracing::info!(
                succeeded = summary.succeeded,
                failed = summary.failed,
                total_entries = summary.total_entries,
                "Seeding finished"
            );
        }
        Command::Backfill { dry_run } => {
            let summary = pipeline.run_backfill(dry_run).await?;
            tracing::info!(
                filled = summary.filled,
                remaining = summary.remaining,
                "Backfill finished"
            );
        }
    }

    Ok(())
}

/// Model name from an env override, or the default.
fn model_name(env_var: &str, default: &str) -> String {
    std::env::var(env_var).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_accepts_seed_and_dry_run() {
        let cli = Cli::try_parse_from(["ojisandex", "generate", "--seed", "ゴルフ", "--dry-run"])
            .unwrap();
        match cli.command {
            Command::Generate { seed, dry_run } => {
                assert_eq!(seed.as_deref(), Some("ゴルフ"));
                assert!(dry_run);
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn backfill_dry_run_flag_parses() {
        let cli = Cli::try_parse_from(["ojisandex", "backfill", "--dry-run"]).unwrap();
        match cli.command {
            Command::Backfill { dry_run } => assert!(dry_run),
            _ => panic!("expected backfill"),
        }
    }
}
