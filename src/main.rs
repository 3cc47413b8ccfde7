//! primspec CLI entrypoint
//! Parses command-line arguments and dispatches to the generator.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use primspec::generation::{
    GenerateOptions, GenerationOrchestrator, Renderer, TemplateLoader, blocks,
};
use primspec::infrastructure::config::DEFAULT_CONFIG_FILE;
use primspec::infrastructure::{
    FileSystemOutputService, FileSystemTemplateLoader, GeneratorConfig, load_config,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "primspec")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Args, Debug, Clone)]
struct ConfigArgs {
    /// Generator config file (defaults to ./primspec.yml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Directory holding the generic templates
    #[arg(long)]
    template_dir: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Regenerate every specialization of every template
    Generate {
        #[command(flatten)]
        config: ConfigArgs,
        /// Render everything but write nothing
        #[arg(long)]
        dry_run: bool,
    },
    /// Scan templates and list their sections
    Check {
        #[command(flatten)]
        config: ConfigArgs,
    },
    /// Print the active type registry
    Types {
        #[command(flatten)]
        config: ConfigArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging with default level INFO
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Commands::Generate { config, dry_run } => run_generate(config, *dry_run).await?,
        Commands::Check { config } => run_check(config).await?,
        Commands::Types { config, json } => run_types(config, *json).await?,
    }
    Ok(())
}

/// Resolve the generator config from flags, `./primspec.yml`, or defaults
async fn resolve_config(args: &ConfigArgs) -> anyhow::Result<GeneratorConfig> {
    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    let config = match &args.config {
        Some(path) => load_config(path)
            .await
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None if default_path.exists() => load_config(default_path)
            .await
            .with_context(|| format!("Failed to load config {}", default_path.display()))?,
        None => {
            info!("No config file found, using built-in defaults");
            GeneratorConfig::default()
        }
    };

    Ok(match &args.template_dir {
        Some(dir) => config.with_template_dir(dir),
        None => config,
    })
}

async fn run_generate(args: &ConfigArgs, dry_run: bool) -> anyhow::Result<()> {
    let config = resolve_config(args).await?;
    info!(
        template_dir = %config.template_dir.display(),
        templates = config.templates.len(),
        types = config.registry.len(),
        "Generating specializations"
    );

    let renderer = Renderer::new(&config.placeholder, config.substitution)
        .context("Failed to build placeholder pattern")?;
    let orchestrator = GenerationOrchestrator::new(
        Arc::new(FileSystemTemplateLoader::new()),
        Arc::new(FileSystemOutputService::new()),
        renderer,
        config.markers.clone(),
    );

    let report = orchestrator
        .generate(
            &config.registry,
            &config.template_dir,
            &config.templates,
            &config.placeholder.canonical_name,
            GenerateOptions { dry_run },
        )
        .await
        .context("Generation failed")?;

    for path in report.paths() {
        if report.written {
            println!("wrote {}", path.display());
        } else {
            println!("would write {}", path.display());
        }
    }
    info!(count = report.artifacts.len(), "Generation complete");
    Ok(())
}

async fn run_check(args: &ConfigArgs) -> anyhow::Result<()> {
    let config = resolve_config(args).await?;
    let loader = FileSystemTemplateLoader::new();

    for spec in &config.templates {
        let suffix = spec
            .resolve_suffix(&config.placeholder.canonical_name)
            .unwrap_or_default();
        let template = loader.load(&config.template_dir, spec, suffix).await?;
        let sections = blocks::scan(&template.content)
            .with_context(|| format!("Template {} is malformed", template.name))?;

        println!("{} ({} sections)", template.name, sections.len());
        for section in &sections {
            let Some(title) = &section.title else {
                continue;
            };
            for term in section.terms() {
                if let Some(capability) = config.markers.near_miss(term) {
                    warn!(
                        template = %template.name,
                        line = section.line,
                        "Header term '{}' contains the {} marker '{}' but does not equal it, so it gates nothing",
                        term,
                        capability,
                        config.markers.label(capability)
                    );
                }
            }
            let gates: Vec<String> = section
                .terms()
                .filter_map(|term| config.markers.capability_of(term))
                .map(|capability| capability.to_string())
                .collect();
            if gates.is_empty() {
                println!("  line {:>5}  {}", section.line, title);
            } else {
                println!("  line {:>5}  {} [{}]", section.line, title, gates.join(", "));
            }
        }
        if spec.resolve_suffix(&config.placeholder.canonical_name).is_none() {
            warn!(template = %template.name, "Template has no output suffix");
        }
    }
    Ok(())
}

async fn run_types(args: &ConfigArgs, json: bool) -> anyhow::Result<()> {
    let config = resolve_config(args).await?;
    let types: Vec<_> = config.registry.iter().collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&types)?);
        return Ok(());
    }

    println!(
        "{:<10} {:<10} {:<12} {:<12} {:<8} {:<8}",
        "type", "lowercase", "zero", "sum zero", "numeric", "ordered"
    );
    for t in types {
        println!(
            "{:<10} {:<10} {:<12} {:<12} {:<8} {:<8}",
            t.canonical_name,
            t.lowercase_name,
            t.zero_literal,
            t.sum_zero_literal,
            t.is_numeric,
            t.is_ordered
        );
    }
    Ok(())
}
