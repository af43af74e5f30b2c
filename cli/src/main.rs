use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use interface_dita_builder::{BuildReport, InterfaceModel, build_interface, load_interface};
use interface_dita_core::validate_table;
use interface_dita_synth::{
    Layout, PublishOptions, PublishSummary, TopicContext, publish, render_command,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::{DitaConfig, validate_language};

/// CLI output format for model dumps and reports.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Json,
    Yaml,
}

#[derive(Debug, Parser)]
#[command(name = "interface-dita")]
#[command(about = "Compile a ConTeXt interface description into DITA topics and maps")]
struct Cli {
    /// Log progress at info level (RUST_LOG overrides).
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate every topic and map of one language tree.
    Build(BuildArgs),
    /// Render a single command: stanza, model and topic.
    Show(ShowArgs),
    /// Build the model only and report diagnostics.
    Check(CheckArgs),
    /// Write the effective configuration as YAML.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Interface description file.
    #[arg(long, default_value = "context-en.xml")]
    input: PathBuf,
    /// Language of the generated tree.
    #[arg(long, default_value = "en")]
    lang: String,
    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct BuildArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Output root; topics land in <output>/<lang>.
    #[arg(long, default_value = "build")]
    output: PathBuf,
    /// Directory of curated topics copied over the generated tree.
    #[arg(long)]
    manual_topics: Option<PathBuf>,
    /// Number of parallel topic writers (default: adaptive to CPU count).
    #[arg(long)]
    jobs: Option<usize>,
    /// Write the publishing summary to this file.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Format of the summary file.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ShowArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Command name, without the leading backslash.
    #[arg(long)]
    name: String,
    /// Format of the model dump.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct CheckArgs {
    #[command(flatten)]
    input: InputArgs,
    /// Write the diagnostics report to this file.
    #[arg(long)]
    report: Option<PathBuf>,
    /// Format of the report file.
    #[arg(long, default_value = "json")]
    format: CliOutputFormat,
    /// Exit with an error when warnings or validation errors are found.
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    /// Configuration to start from.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Destination file (default: stdout).
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Build(args) => run_build(args),
        Command::Show(args) => run_show(args),
        Command::Check(args) => run_check(args),
        Command::Config(args) => run_config(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Loads configuration and builds the model for `input`.
fn load_model(input: &InputArgs) -> Result<(DitaConfig, InterfaceModel), String> {
    validate_language(&input.lang).map_err(|e| e.to_string())?;
    let config = DitaConfig::load_or_default(input.config.as_deref())
        .map_err(|e| format!("Failed to load config: {e}"))?;
    let root = load_interface(&input.input).map_err(|e| e.to_string())?;
    let model = build_interface(root, &config.build);
    info!(
        input = %input.input.display(),
        commands = model.commands.len(),
        "Built interface model"
    );
    Ok((config, model))
}

fn topic_context(config: &DitaConfig, lang: &str) -> TopicContext {
    TopicContext::new(
        config.topics.clone(),
        lang,
        chrono::Local::now().date_naive(),
    )
}

fn run_build(args: BuildArgs) -> Result<(), String> {
    let (config, model) = load_model(&args.input)?;
    print_build_counts(&model.report);

    let layout = Layout::new(&args.output, &args.input.lang);
    let options = PublishOptions {
        jobs: args.jobs,
        manual_topics: args.manual_topics,
    };
    let summary = publish(&model, &layout, &topic_context(&config, &args.input.lang), &options)
        .map_err(|e| format!("Failed to publish '{}': {e}", args.output.display()))?;

    println!(
        "Wrote {} command topic(s), {} class topic(s), {} environment topic(s) and {} map(s) to '{}'.",
        summary.topics,
        summary.classes,
        summary.environments,
        summary.maps.len(),
        layout.language_dir().display()
    );
    if let Some(import) = &summary.import {
        println!(
            "Imported {} manual topic(s), kept {} newer generated file(s).",
            import.copied, import.kept
        );
    }
    print_publish_problems(&summary);

    if let Some(path) = &args.report {
        write_output(path, &summary, args.format)?;
    }
    Ok(())
}

fn print_build_counts(report: &BuildReport) {
    println!(
        "Read {} stanza(s): {} command(s), {} class(es), {} environment(s), {} variant(s), {} donor(s).",
        report.stanzas,
        report.commands,
        report.classes,
        report.environments,
        report.variants,
        report.donors
    );
}

fn print_publish_problems(summary: &PublishSummary) {
    if !summary.failures.is_empty() {
        let names: Vec<&str> = summary.failures.iter().map(|f| f.command.as_str()).collect();
        eprintln!(
            "{} topic failure(s): {}",
            summary.failures.len(),
            names.join(", ")
        );
        for failure in &summary.failures {
            eprintln!("  {}: {}", failure.command, failure.error);
        }
    }
    if !summary.warnings.is_empty() {
        eprintln!("{} warning(s) emitted during rendering.", summary.warnings.len());
        for warning in &summary.warnings {
            eprintln!("  {warning}");
        }
    }
}

fn run_show(args: ShowArgs) -> Result<(), String> {
    let (config, model) = load_model(&args.input)?;
    let command = model.commands.get(&args.name).ok_or_else(|| {
        format!(
            "Command '{}' not found in '{}'",
            args.name,
            args.input.input.display()
        )
    })?;

    println!("## Stanza");
    match &command.stanza {
        Some(stanza) => {
            let xml = stanza
                .to_xml_string()
                .map_err(|e| format!("Failed to serialize stanza: {e}"))?;
            println!("{xml}");
        }
        None => println!("(none)"),
    }

    println!("## Model");
    println!("{}", format_output(command, args.format)?);

    println!("## Topic");
    let rendered = render_command(command, &model.commands, &topic_context(&config, &args.input.lang))
        .map_err(|e| format!("Failed to render '{}': {e}", args.name))?;
    let xml = rendered
        .document
        .to_xml_string()
        .map_err(|e| format!("Failed to serialize topic: {e}"))?;
    println!("{xml}");

    for warning in &rendered.warnings {
        eprintln!("warning: {warning}");
    }
    Ok(())
}

#[derive(Serialize)]
struct CheckReport<'a> {
    input: &'a Path,
    report: &'a BuildReport,
    validation: Vec<String>,
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let (_, model) = load_model(&args.input)?;
    print_build_counts(&model.report);

    let validation: Vec<String> = validate_table(&model.commands)
        .iter()
        .map(ToString::to_string)
        .collect();
    let warnings: Vec<_> = model.report.warnings().collect();

    for diagnostic in &model.report.diagnostics {
        println!("{:?}: {diagnostic}", diagnostic.severity());
    }
    for error in &validation {
        println!("Invalid: {error}");
    }
    println!(
        "{} warning(s), {} clobbered duplicate(s), {} validation error(s).",
        warnings.len(),
        model.report.clobbers(),
        validation.len()
    );

    if let Some(path) = &args.report {
        let report = CheckReport {
            input: &args.input.input,
            report: &model.report,
            validation: validation.clone(),
        };
        write_output(path, &report, args.format)?;
    }

    if args.strict && (!warnings.is_empty() || !validation.is_empty()) {
        return Err(format!(
            "{} warning(s) and {} validation error(s) in '{}'",
            warnings.len(),
            validation.len(),
            args.input.input.display()
        ));
    }
    Ok(())
}

fn run_config(args: ConfigArgs) -> Result<(), String> {
    let config = DitaConfig::load_or_default(args.config.as_deref())
        .map_err(|e| format!("Failed to load config: {e}"))?;
    match &args.output {
        Some(path) => {
            config
                .save(path)
                .map_err(|e| format!("Failed to write '{}': {e}", path.display()))?;
            println!("Wrote configuration to '{}'.", path.display());
        }
        None => print!("{}", format_output(&config, CliOutputFormat::Yaml)?),
    }
    Ok(())
}

fn format_output<T: Serialize>(value: &T, format: CliOutputFormat) -> Result<String, String> {
    match format {
        CliOutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        CliOutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("YAML serialization failed: {e}"))
        }
    }
}

fn write_output<T: Serialize>(path: &Path, value: &T, format: CliOutputFormat) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }
    let raw = format_output(value, format)?;
    fs::write(path, raw).map_err(|err| format!("Failed to write '{}': {err}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_output_json_and_yaml() {
        #[derive(Serialize)]
        struct Sample {
            name: &'static str,
        }
        let sample = Sample { name: "setupfoo" };
        assert!(format_output(&sample, CliOutputFormat::Json).unwrap().contains("\"name\": \"setupfoo\""));
        assert_eq!(format_output(&sample, CliOutputFormat::Yaml).unwrap(), "name: setupfoo\n");
    }

    #[test]
    fn test_cli_parses_build_defaults() {
        let cli = Cli::try_parse_from(["interface-dita", "build"]).unwrap();
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.input.input, PathBuf::from("context-en.xml"));
        assert_eq!(args.input.lang, "en");
        assert_eq!(args.output, PathBuf::from("build"));
        assert!(args.jobs.is_none());
    }
}
