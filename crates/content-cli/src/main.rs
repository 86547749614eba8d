//! CLI de ContentFlow: `contentflow run` ejecuta un workflow sobre un texto,
//! `contentflow list` muestra los registrados y `contentflow schema` sus
//! esquemas.
//!
//! Códigos de salida: 0 ok, 2 uso/configuración, 4 entrada rechazada, 5 error
//! interno.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use content_core::{Clock, FixedClock, SystemClock};
use contentflow::{Config, WorkflowError, WorkflowRegistry};
use serde_json::{json, Value};

const EXIT_USAGE: u8 = 2;
const EXIT_REJECTED: u8 = 4;
const EXIT_INTERNAL: u8 = 5;

#[derive(Parser)]
#[command(name = "contentflow", version, about = "Validate, enhance and summarize text content")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a workflow and print its JSON output.
    Run {
        /// Workflow id (defaults to CONTENTFLOW_DEFAULT_WORKFLOW).
        #[arg(long)]
        workflow: Option<String>,

        /// Declared content type.
        #[arg(long = "type", value_parser = ["article", "blog", "social"])]
        content_type: Option<String>,

        /// Inline text content.
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,

        /// Read the content from a file (stdin when neither is given).
        #[arg(long)]
        file: Option<PathBuf>,

        /// Fixed processing timestamp (RFC 3339) instead of the system clock.
        #[arg(long)]
        at: Option<String>,

        /// Print single-line JSON.
        #[arg(long)]
        compact: bool,
    },
    /// List registered workflows.
    List,
    /// Print the input and output schemas of a workflow.
    Schema {
        /// Workflow id.
        id: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("contentflow: {e}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                                                  .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")))
                             .with_writer(std::io::stderr)
                             .init();

    match dispatch(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = exit_code(&err);
            eprintln!("contentflow: {err:#}");
            ExitCode::from(code)
        }
    }
}

async fn dispatch(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::List => {
            let registry = WorkflowRegistry::with_defaults(config)?;
            for wf in registry.iter() {
                println!("{}\t{}", wf.id(), wf.description());
            }
            Ok(())
        }
        Commands::Schema { id } => {
            let registry = WorkflowRegistry::with_defaults(config)?;
            let wf = registry.get(&id).ok_or_else(|| WorkflowError::UnknownWorkflow(id.clone()))?;
            let described = json!({ "input": wf.input_schema().describe(), "output": wf.output_schema().describe() });
            println!("{}", serde_json::to_string_pretty(&described)?);
            Ok(())
        }
        Commands::Run { workflow,
                        content_type,
                        content,
                        file,
                        at,
                        compact, } => {
            let clock: Arc<dyn Clock> = match at {
                Some(ts) => Arc::new(FixedClock::parse(&ts).with_context(|| format!("invalid --at timestamp '{ts}'"))
                                                            .map_err(Usage)?),
                None => Arc::new(SystemClock),
            };
            let text = read_content(content, file)?;
            let mut input = json!({ "content": text });
            if let Some(t) = content_type {
                input["type"] = Value::String(t);
            }

            let id = workflow.unwrap_or_else(|| config.default_workflow.clone());
            tracing::info!(workflow = %id, "running workflow");
            let registry = WorkflowRegistry::with_clock(config, clock)?;
            let output = registry.execute(&id, input).await?;

            let rendered = if compact { serde_json::to_string(&output)? } else { serde_json::to_string_pretty(&output)? };
            println!("{rendered}");
            Ok(())
        }
    }
}

fn read_content(content: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(c) = content {
        return Ok(c);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()));
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf).context("reading stdin")?;
    Ok(buf)
}

/// Marca un error como fallo de uso (código 2).
#[derive(Debug)]
struct Usage(anyhow::Error);

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#}", self.0)
    }
}

impl std::error::Error for Usage {}

fn exit_code(err: &anyhow::Error) -> u8 {
    if err.downcast_ref::<Usage>().is_some() {
        return EXIT_USAGE;
    }
    match err.downcast_ref::<WorkflowError>() {
        Some(WorkflowError::UnknownWorkflow(_)) => EXIT_USAGE,
        Some(e) if e.is_rejection() => EXIT_REJECTED,
        _ => EXIT_INTERNAL,
    }
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
    fn parses_run_flags() {
        let cli = Cli::try_parse_from(["contentflow", "run", "--type", "blog", "--content", "a b", "--compact"]).unwrap();
        let Commands::Run { content_type, content, compact, workflow, .. } = cli.command else { panic!("expected run") };
        assert_eq!(content_type.as_deref(), Some("blog"));
        assert_eq!(content.as_deref(), Some("a b"));
        assert!(compact);
        assert!(workflow.is_none());

        assert!(Cli::try_parse_from(["contentflow", "run", "--type", "poem"]).is_err());
        assert!(Cli::try_parse_from(["contentflow", "run", "--content", "x", "--file", "f.txt"]).is_err());
    }

    #[test]
    fn exit_codes_follow_error_kind() {
        use content_adapters::ContentError;
        let unknown = anyhow::Error::new(WorkflowError::UnknownWorkflow("x".into()));
        assert_eq!(exit_code(&unknown), EXIT_USAGE);

        let rejected = anyhow::Error::new(WorkflowError::Content(ContentError::ContentTooShort { word_count: 1 }));
        assert_eq!(exit_code(&rejected), EXIT_REJECTED);

        assert_eq!(exit_code(&anyhow::anyhow!("boom")), EXIT_INTERNAL);
        assert_eq!(exit_code(&anyhow::Error::new(Usage(anyhow::anyhow!("bad")))), EXIT_USAGE);
    }
}
