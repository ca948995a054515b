use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use certcanvas::config::EditorConfig;
use certcanvas::editor::EditorCore;
use certcanvas::template::{Template, TemplateError};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod script;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("i/o error on {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("invalid template: {0}")]
    Template(#[from] TemplateError),
    #[error("script line {line}: {source}")]
    Script { line: usize, source: serde_json::Error },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "certcanvas-cli", about = "Inspect, normalize and replay edits on certificate templates")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print canvas size, element counts per type and groups.
    Inspect {
        /// Template JSON file, or - for stdin.
        template: String,
    },
    /// Drop groups with fewer than two members and rewrite the template.
    Normalize(OutputArgs),
    /// Apply a line-delimited JSON edit script through the editor.
    Replay {
        #[command(flatten)]
        files: OutputArgs,
        /// Script file, one command per line.
        script: PathBuf,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Template JSON file, or - for stdin.
    template: String,

    /// Output file. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Inspect { template } => run_inspect(&template),
        Command::Normalize(args) => run_normalize(&args),
        Command::Replay { files, script } => run_replay(&files, &script),
    }
}

fn run_inspect(input: &str) -> Result<(), CliError> {
    let template = load_template(input)?;
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for el in &template.elements {
        *counts.entry(el.element_type().as_str()).or_default() += 1;
    }

    println!("name: {}", template.name);
    println!("size: {}x{}", template.width, template.height);
    println!("background: {}", template.background_color);
    if let Some(image) = &template.background_image {
        println!("background image: {image}");
    }
    println!("elements: {}", template.len());
    for (kind, count) in &counts {
        println!("  {kind}: {count}");
    }
    let groups = template.group_ids();
    println!("groups: {}", groups.len());
    for gid in &groups {
        println!("  {gid}: {}", template.group_members(gid).join(", "));
    }
    Ok(())
}

fn run_normalize(args: &OutputArgs) -> Result<(), CliError> {
    // Decode without the loader's own normalization so the count is reported.
    let mut template: Template = serde_json::from_str(&read_input(&args.template)?)?;
    template.validate()?;
    let stripped = template.normalize_groups();
    tracing::info!(stripped, "normalized groups");
    write_template(&template, args.output.as_deref())
}

fn run_replay(args: &OutputArgs, script_path: &Path) -> Result<(), CliError> {
    let template = load_template(&args.template)?;
    let text = fs::read_to_string(script_path)
        .map_err(|source| CliError::Io { path: script_path.display().to_string(), source })?;
    let commands = script::parse_script(&text)?;

    let mut replay = script::Replay::new(EditorCore::new(template, EditorConfig::from_env()));
    let total = commands.len();
    for (line, cmd) in commands {
        replay.apply(line, cmd);
    }
    tracing::info!(
        commands = total,
        skipped = replay.skipped(),
        history = replay.core().history_len(),
        "replay complete"
    );

    let core = replay.into_core();
    write_template(core.template(), args.output.as_deref())
}

fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Io { path: "stdin".to_owned(), source })?;
        return Ok(buf);
    }
    fs::read_to_string(input).map_err(|source| CliError::Io { path: input.to_owned(), source })
}

fn load_template(input: &str) -> Result<Template, CliError> {
    Ok(Template::from_json(&read_input(input)?)?)
}

fn write_template(template: &Template, output: Option<&Path>) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(template)?;
    match output {
        Some(path) => {
            fs::write(path, rendered).map_err(|source| CliError::Io { path: path.display().to_string(), source })?;
            tracing::info!(path = %path.display(), "template written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}
