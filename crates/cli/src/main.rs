//! taskicon CLI - inspect and edit task icon mappings.

use std::path::{Path, PathBuf};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;
use taskicon_codec::{parse_icon_value, serialize_mappings};
use taskicon_core::{code_point_hex, IconPalette, IconSourceKind, TaskSnapshot};
use taskicon_engine::{resolve, MatchOrigin};
use taskicon_storage::{export_to, import_from, ConfigurationLifecycle, JsonFileStore};

#[derive(Parser)]
#[command(name = "taskicon")]
#[command(about = "Task icon mapping configuration", long_about = None)]
struct Cli {
    /// Settings directory
    #[arg(long, env = "TASKICON_DIR", default_value = ".taskicon", global = true)]
    data_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the built-in icon palette
    Palette,
    /// Show the current configuration
    Show {
        /// Print the stored JSON document instead
        #[arg(long)]
        json: bool,
    },
    /// Resolve the icon for a task
    Resolve(ResolveArgs),
    /// Set the primary icon source
    SetSource {
        /// status, priority, project, context or tag
        kind: IconSourceKind,
    },
    /// Set the default icon (palette name, hex code or \uXXXX)
    SetDefault {
        /// Icon value
        value: String,
    },
    /// Replace one category's mappings from name=value text
    Map {
        /// Category to replace
        kind: IconSourceKind,
        /// Mapping text
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        /// File holding the mapping text
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Print one category's mappings as name=value text
    Mappings {
        /// Category to print
        kind: IconSourceKind,
    },
    /// Export the configuration to a file
    Export {
        /// Target file
        path: PathBuf,
    },
    /// Import a configuration from a file
    Import {
        /// Source file
        path: PathBuf,
    },
    /// Restore the built-in defaults
    Reset,
}

#[derive(Args)]
struct ResolveArgs {
    /// Read the task snapshot from a JSON file
    #[arg(long, conflicts_with_all = ["status", "priority", "project", "context", "tag"])]
    task_file: Option<PathBuf>,
    /// Task status
    #[arg(long, default_value = "")]
    status: String,
    /// Task priority
    #[arg(long)]
    priority: Option<String>,
    /// Project (repeatable)
    #[arg(long)]
    project: Vec<String>,
    /// Context (repeatable)
    #[arg(long)]
    context: Vec<String>,
    /// Tag (repeatable)
    #[arg(long)]
    tag: Vec<String>,
    /// Task is overdue
    #[arg(long)]
    overdue: bool,
    /// Task is archived
    #[arg(long)]
    archived: bool,
    /// Task is completed
    #[arg(long)]
    completed: bool,
    /// Explain which rule matched
    #[arg(long)]
    explain: bool,
}

impl ResolveArgs {
    fn snapshot(&self) -> Result<TaskSnapshot> {
        let mut task = match &self.task_file {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&json)
                    .with_context(|| format!("parsing task snapshot {}", path.display()))?
            }
            None => {
                let mut task = TaskSnapshot::new(self.status.clone());
                task.priority = self.priority.clone();
                task.projects = non_empty(&self.project);
                task.contexts = non_empty(&self.context);
                task.tags = non_empty(&self.tag);
                task
            }
        };
        task.is_overdue |= self.overdue;
        task.is_archived |= self.archived;
        task.is_completed |= self.completed;
        Ok(task)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let data_dir = cli.data_dir;

    match cli.command {
        Commands::Palette => {
            for entry in IconPalette::entries() {
                println!("{:<20} U+{}", entry.name, code_point_hex(entry.code));
            }
        }
        Commands::Show { json } => {
            let config = open_lifecycle(&data_dir).await?.snapshot().await;
            if json {
                println!("{}", serde_json::to_string_pretty(config.as_ref())?);
                return Ok(());
            }
            println!("Primary source: {}", config.primary_source);
            println!("Default icon: {}", describe_icon(&config.default_icon));
            for kind in IconSourceKind::ALL {
                let icons = config.icons_for(kind);
                println!("{} icons ({})", kind, icons.len());
                for (key, icon) in icons.iter() {
                    println!("  {:<16} {}", key, describe_icon(icon));
                }
            }
        }
        Commands::Resolve(args) => {
            let task = args.snapshot()?;
            let config = open_lifecycle(&data_dir).await?.snapshot().await;
            let resolution = resolve(&task, &config);
            if args.explain {
                println!("{} {}", resolution.icon, describe_icon(resolution.icon));
                println!("  {}", describe_origin(&resolution.origin));
            } else {
                println!("{}", resolution.icon);
            }
        }
        Commands::SetSource { kind } => {
            let lifecycle = open_lifecycle(&data_dir).await?;
            lifecycle.edit(|c| c.primary_source = kind).await?;
            println!("Primary source set to {}", kind);
        }
        Commands::SetDefault { value } => {
            let Some(icon) = parse_icon_value(value.trim()) else {
                bail!("'{}' is not a palette name, private-use code point or icon character", value);
            };
            let lifecycle = open_lifecycle(&data_dir).await?;
            lifecycle.edit(|c| c.default_icon = icon.to_string()).await?;
            println!("Default icon set to {}", describe_icon(&icon.to_string()));
        }
        Commands::Map { kind, text, file } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading {}", path.display()))?,
                (None, None) => bail!("pass --text or --file"),
            };
            let lifecycle = open_lifecycle(&data_dir).await?;
            let rejected = lifecycle.apply_mapping_text(kind, &text).await?;
            for line in &rejected {
                eprintln!("line {}: {} ({:?})", line.line_number, line.reason, line.content);
            }
            let count = lifecycle.snapshot().await.icons_for(kind).len();
            println!("{} {} mappings saved, {} lines skipped", count, kind, rejected.len());
        }
        Commands::Mappings { kind } => {
            let config = open_lifecycle(&data_dir).await?.snapshot().await;
            let text = serialize_mappings(config.icons_for(kind));
            if !text.is_empty() {
                println!("{}", text);
            }
        }
        Commands::Export { path } => {
            let config = open_lifecycle(&data_dir).await?.snapshot().await;
            export_to(&path, &config).await?;
            println!("Exported to {}", path.display());
        }
        Commands::Import { path } => {
            let config = import_from(&path).await?;
            open_lifecycle(&data_dir).await?.update(config).await?;
            info!("Imported configuration from {}", path.display());
            println!("Imported {}", path.display());
        }
        Commands::Reset => {
            open_lifecycle(&data_dir).await?.reset().await?;
            println!("Configuration reset to defaults");
        }
    }

    Ok(())
}

async fn open_lifecycle(data_dir: &Path) -> Result<ConfigurationLifecycle<JsonFileStore>> {
    let store = JsonFileStore::new(data_dir)
        .await
        .with_context(|| format!("opening settings in {}", data_dir.display()))?;
    Ok(ConfigurationLifecycle::open(store).await)
}

fn non_empty(values: &[String]) -> Option<Vec<String>> {
    if values.is_empty() {
        None
    } else {
        Some(values.to_vec())
    }
}

fn describe_icon(icon: &str) -> String {
    let Some(c) = icon.chars().next() else {
        return "(none)".to_string();
    };
    match IconPalette::name_for_icon(icon) {
        Some(name) => format!("U+{} {}", code_point_hex(c), name),
        None => format!("U+{}", code_point_hex(c)),
    }
}

fn describe_origin(origin: &MatchOrigin) -> String {
    match origin {
        MatchOrigin::Primary { source, key } => format!("matched {} '{}'", source, key),
        MatchOrigin::Fallback { key } => format!("no primary match, status fallback '{}'", key),
        MatchOrigin::Default => "nothing matched, default icon".to_string(),
    }
}
