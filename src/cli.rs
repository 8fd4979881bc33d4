// Command Line Interface
// `analyze` scores essays and prints JSON; `config` inspects the config store

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{error, info};

use crate::error::AnalysisError;
use crate::models::{AnalysisInput, AnalysisResult, ContentAnalysis, Locale, QualityReport};
use crate::services::catalog::{BundledCatalog, MessageCatalog};
use crate::services::config_store::ConfigStore;
use crate::services::detection::Analyzer;
use crate::services::extraction::{PlainTextExtractor, TextExtractor};

const STDIN_NAME: &str = "<stdin>";

#[derive(Debug, Parser)]
#[command(name = "shibou-lens", version)]
#[command(about = "Estimate how likely a statement-of-purpose essay was AI-generated")]
pub struct Cli {
    #[arg(long = "config", global = true, help = "Config directory (defaults to the user config dir)")]
    pub config_dir: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score one or more essays; reads stdin when no file is given
    Analyze {
        files: Vec<PathBuf>,
        #[arg(short, long, help = "Locale tag for labels, e.g. ja-JP or zh-CN")]
        locale: Option<String>,
        #[arg(long, help = "Raw LLM critique to merge into the output")]
        quality: Option<PathBuf>,
        #[arg(long, help = "Single-line JSON")]
        compact: bool,
    },
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the effective configuration
    Show,
    /// Write a default config file
    Init {
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    kind: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileOutcome {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    analysis: Option<ContentAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorBody>,
}

fn config_store(dir: Option<PathBuf>) -> anyhow::Result<ConfigStore> {
    let dir = match dir {
        Some(d) => d,
        None => ConfigStore::default_config_dir().context("Could not determine config directory")?,
    };
    Ok(ConfigStore::new(dir))
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<String> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(out)
}

/// Extract, score and localize one document.
pub fn analyze_source(
    analyzer: &Analyzer,
    extractor: &dyn TextExtractor,
    catalog: &dyn MessageCatalog,
    name: &str,
    bytes: &[u8],
    locale: Locale,
) -> Result<AnalysisResult, AnalysisError> {
    let text = extractor.extract(name, bytes)?;
    let input = AnalysisInput { text, locale };
    analyzer.analyze(&input, catalog)
}

fn read_source(path: Option<&Path>) -> Result<(String, Vec<u8>), AnalysisError> {
    match path {
        Some(p) => Ok((p.display().to_string(), std::fs::read(p)?)),
        None => {
            let mut buf = Vec::new();
            std::io::stdin().read_to_end(&mut buf)?;
            Ok((STDIN_NAME.to_string(), buf))
        }
    }
}

async fn run_analyze(
    store: ConfigStore,
    files: Vec<PathBuf>,
    locale: Option<String>,
    quality: Option<PathBuf>,
    compact: bool,
) -> anyhow::Result<()> {
    let config = store.load().map_err(anyhow::Error::msg)?;
    let analyzer = Arc::new(store.build_analyzer(&config).map_err(anyhow::Error::msg)?);
    let locale = locale
        .as_deref()
        .map(Locale::from_tag)
        .unwrap_or(config.default_locale);

    let quality = match quality {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read quality report {}", path.display()))?;
            Some(QualityReport::from_llm_output(&raw)?)
        }
        None => None,
    };

    let sources: Vec<Option<PathBuf>> = if files.is_empty() {
        vec![None]
    } else {
        files.into_iter().map(Some).collect()
    };
    info!(inputs = sources.len(), locale = %locale, "analyze.start");

    // Spawn everything first, then join in input order.
    let handles: Vec<_> = sources
        .into_iter()
        .map(|source| {
            let analyzer = Arc::clone(&analyzer);
            tokio::task::spawn_blocking(move || match read_source(source.as_deref()) {
                Ok((name, bytes)) => {
                    let outcome = analyze_source(
                        &analyzer,
                        &PlainTextExtractor,
                        BundledCatalog::shared(),
                        &name,
                        &bytes,
                        locale,
                    );
                    (name, outcome)
                }
                Err(e) => (
                    source
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| STDIN_NAME.to_string()),
                    Err(e),
                ),
            })
        })
        .collect();

    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        let (name, outcome) = handle.await.context("analysis task panicked")?;
        outcomes.push((name, outcome));
    }

    let merge = |result: AnalysisResult| match &quality {
        Some(q) => ContentAnalysis::merge(q.clone(), result),
        None => ContentAnalysis::heuristic_only(result),
    };

    if outcomes.len() == 1 {
        if let Some((name, outcome)) = outcomes.pop() {
            let result = outcome.with_context(|| format!("Failed to analyze {}", name))?;
            println!("{}", to_json(&merge(result), compact)?);
        }
        return Ok(());
    }

    let mut failed = 0usize;
    let report: Vec<FileOutcome> = outcomes
        .into_iter()
        .map(|(file, outcome)| match outcome {
            Ok(result) => FileOutcome {
                file,
                analysis: Some(merge(result)),
                error: None,
            },
            Err(e) => {
                failed += 1;
                error!(file = %file, kind = e.kind(), error = %e, "analyze.failed");
                FileOutcome {
                    file,
                    analysis: None,
                    error: Some(ErrorBody {
                        kind: e.kind(),
                        message: e.to_string(),
                    }),
                }
            }
        })
        .collect();

    println!("{}", to_json(&report, compact)?);
    if failed > 0 {
        bail!("{} of {} inputs failed", failed, report.len());
    }
    Ok(())
}

fn run_config(store: ConfigStore, action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Path => {
            println!("{}", store.config_file().display());
        }
        ConfigAction::Show => {
            let config = store.load().map_err(anyhow::Error::msg)?;
            println!("{}", to_json(&config, false)?);
        }
        ConfigAction::Init { force } => {
            if store.config_file().exists() && !force {
                bail!(
                    "Config already exists at {} (use --force to overwrite)",
                    store.config_file().display()
                );
            }
            store
                .save(&Default::default())
                .map_err(anyhow::Error::msg)?;
            info!(path = %store.config_file().display(), "config.initialized");
            println!("{}", store.config_file().display());
        }
    }
    Ok(())
}

pub async fn execute(cli: Cli) -> anyhow::Result<()> {
    let store = config_store(cli.config_dir)?;
    match cli.command {
        Commands::Analyze {
            files,
            locale,
            quality,
            compact,
        } => run_analyze(store, files, locale, quality, compact).await,
        Commands::Config { action } => run_config(store, action),
    }
}
