//! MIM Generator CLI
//!
//! Command-line interface for inspecting the ACI object model that
//! provider generators are built from.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use mimgen_common::{ClassSource, DnFormat, ModelConfig};
use mimgen_model::ObjectModel;
use mimgen_parser::{DirectorySource, MetaParser};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;
use tracing::info;

#[derive(Parser)]
#[command(name = "mimgen")]
#[command(version, about = "Build and query the ACI MIM object model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML file with model settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Class name marking the top of the containment tree
    #[arg(long, global = true)]
    root_marker: Option<String>,

    /// Maximum number of classes in one containment chain
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Maximum resolution work per class
    #[arg(long, global = true)]
    max_branches: Option<usize>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Where class records come from
#[derive(Args)]
struct SourceArgs {
    /// Metadata snapshot (JSON document with a `classes` map)
    #[arg(short, long)]
    meta: Option<PathBuf>,

    /// Directory of per-class `<class>.json` documents, used for classes
    /// missing from the snapshot
    #[arg(long)]
    fetch_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Display a class and its DN formats
    #[command(after_help = "EXAMPLES:\n  \
        mimgen show --meta aci-meta.json --class fvBD")]
    Show {
        #[command(flatten)]
        source: SourceArgs,

        /// Class name
        #[arg(short, long)]
        class: String,
    },

    /// Print DN formats for one or many classes
    #[command(after_help = "EXAMPLES:\n  \
        # Every DN of one class\n  \
        mimgen dn --meta aci-meta.json --class fvnsVlanInstP --select all\n\n  \
        # First DN of each class listed in a file\n  \
        mimgen dn --meta aci-meta.json --fetch-dir ./classes --list classes.txt")]
    Dn {
        #[command(flatten)]
        source: SourceArgs,

        /// Class name
        #[arg(short, long, conflicts_with = "list", required_unless_present = "list")]
        class: Option<String>,

        /// File with one class name per line
        #[arg(short, long)]
        list: Option<PathBuf>,

        /// Which DN formats to print: first, all, or an index
        #[arg(short, long, default_value = "first")]
        select: DnSelect,
    },

    /// Display the classes contained below a class
    Contained {
        #[command(flatten)]
        source: SourceArgs,

        /// Class name
        #[arg(short, long)]
        class: String,

        /// Number of levels to descend
        #[arg(short, long, default_value_t = 2)]
        depth: usize,
    },

    /// Display the naming hierarchy of a class DN
    Naming {
        #[command(flatten)]
        source: SourceArgs,

        /// Class name
        #[arg(short, long)]
        class: String,

        /// Index of the DN format to split
        #[arg(short, long, default_value_t = 0)]
        index: usize,
    },

    /// Report containment edges declared on one side only
    Audit {
        #[command(flatten)]
        source: SourceArgs,
    },
}

/// DN selection for the `dn` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DnSelect {
    First,
    All,
    Index(usize),
}

impl FromStr for DnSelect {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "first" => Ok(DnSelect::First),
            "all" => Ok(DnSelect::All),
            _ => s
                .parse()
                .map(DnSelect::Index)
                .map_err(|_| format!("expected first, all or an index, got '{}'", s)),
        }
    }
}

impl DnSelect {
    fn pick<'a>(&self, formats: &'a [DnFormat]) -> &'a [DnFormat] {
        match self {
            DnSelect::First => &formats[..formats.len().min(1)],
            DnSelect::All => formats,
            DnSelect::Index(i) => formats.get(*i).map(std::slice::from_ref).unwrap_or(&[]),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "✗".red(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(&cli)?;

    if cli.verbose {
        eprintln!("{} Verbose mode enabled", "→".cyan());
        eprintln!("  Root marker: {}", config.root_marker);
        eprintln!("  Max depth: {}", config.max_depth);
        eprintln!("  Max branches: {}", config.max_branches);
    }

    match cli.command {
        Commands::Show { source, class } => {
            let mut model = build_model(&source, config)?;
            show_command(&mut model, &class)?;
        }
        Commands::Dn {
            source,
            class,
            list,
            select,
        } => {
            let mut model = build_model(&source, config)?;
            let names = match (class, list) {
                (Some(class), _) => vec![class],
                (None, Some(list)) => read_class_list(&list)?,
                (None, None) => anyhow::bail!("Either --class or --list must be provided"),
            };
            return Ok(dn_command(&mut model, &names, select, cli.verbose));
        }
        Commands::Contained {
            source,
            class,
            depth,
        } => {
            let mut model = build_model(&source, config)?;
            contained_command(&mut model, &class, depth)?;
        }
        Commands::Naming {
            source,
            class,
            index,
        } => {
            let mut model = build_model(&source, config)?;
            naming_command(&mut model, &class, index)?;
        }
        Commands::Audit { source } => {
            let mut model = build_model(&source, config)?;
            return Ok(audit_command(&mut model));
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// Settings from `--config`, overridden by individual flags
fn load_config(cli: &Cli) -> Result<ModelConfig> {
    let mut config = match &cli.config {
        Some(path) => ModelConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ModelConfig::default(),
    };

    if let Some(marker) = &cli.root_marker {
        config.root_marker = marker.clone();
    }
    if let Some(depth) = cli.max_depth {
        config.max_depth = depth;
    }
    if let Some(branches) = cli.max_branches {
        config.max_branches = branches;
    }

    config.validate().context("Invalid model settings")?;
    Ok(config)
}

fn build_model(args: &SourceArgs, config: ModelConfig) -> Result<ObjectModel> {
    let fetch: Option<Box<dyn ClassSource>> = args
        .fetch_dir
        .as_ref()
        .map(|dir| Box::new(DirectorySource::new(dir)) as Box<dyn ClassSource>);

    match &args.meta {
        Some(meta) => {
            eprintln!("{} Loading metadata: {}", "→".cyan(), meta.display());
            let snapshot = MetaParser::from_file(meta)
                .with_context(|| format!("Failed to load metadata: {}", meta.display()))?
                .parse();

            let rejected = snapshot.rejected().count();
            if rejected > 0 {
                eprintln!(
                    "{} {} classes in the snapshot could not be parsed",
                    "⚠".yellow(),
                    rejected
                );
            }
            info!(classes = snapshot.len(), rejected, "snapshot ready");

            Ok(ObjectModel::from_snapshot(snapshot, fetch, config))
        }
        None => match fetch {
            Some(source) => Ok(ObjectModel::new(source, config)),
            None => anyhow::bail!("Either --meta or --fetch-dir must be provided"),
        },
    }
}

/// Class names from a list file; blank lines and `#` comments are skipped
fn read_class_list(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read class list: {}", path.display()))?;
    Ok(parse_class_list(&content))
}

fn parse_class_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

fn show_command(model: &mut ObjectModel, class_name: &str) -> Result<()> {
    let class = model
        .get_class(class_name)
        .with_context(|| format!("Failed to resolve {}", class_name))?;

    println!("\n{}", class.name().yellow().bold());
    if !class.label().is_empty() {
        println!("  Label: {}", class.label());
    }
    println!("  RN format: {}", class.rn_format().cyan());
    println!("  RN prefix: {}", class.rn_prefix());
    println!(
        "  Naming properties: {}",
        if class.identified_by().is_empty() {
            "-".to_string()
        } else {
            class.identified_by().join(", ")
        }
    );

    let mut flags = Vec::new();
    if class.is_abstract() {
        flags.push("abstract");
    }
    if class.is_configurable() {
        flags.push("configurable");
    }
    if class.is_deletable() {
        flags.push("deletable");
    }
    if class.is_relation() {
        flags.push("relation");
    }
    if !flags.is_empty() {
        println!("  Flags: {}", flags.join(", "));
    }

    println!(
        "  Properties: {} ({} configurable)",
        class.properties().len(),
        class.configurable_properties().count()
    );
    println!("  Contains: {}", class.contains().len());
    println!("  Containers: {}", class.containers().len());

    for edge in class.relation_to() {
        println!("  Relation to: {} ({:?})", edge.class.cyan(), edge.cardinality);
    }

    println!("\n{}", "DN formats:".bold());
    for dn in class.dn_format() {
        println!("  • {}", dn.path.green());
        println!("    {}", dn.classes.join(" > ").dimmed());
    }

    Ok(())
}

fn dn_command(
    model: &mut ObjectModel,
    names: &[String],
    select: DnSelect,
    verbose: bool,
) -> ExitCode {
    let results = model.get_classes(names);
    let mut failed = 0;

    for (name, result) in &results {
        if let Err(e) = result {
            eprintln!("{} {}: {}", "✗".red(), name, e);
            failed += 1;
            continue;
        }

        let Some(class) = model.class(name) else {
            continue;
        };
        let picked = select.pick(class.dn_format());
        if picked.is_empty() {
            eprintln!(
                "{} {}: no DN format at {:?} ({} available)",
                "⚠".yellow(),
                name,
                select,
                class.dn_format().len()
            );
            failed += 1;
            continue;
        }

        for dn in picked {
            if verbose {
                println!("{}\t{}\t{}", name, dn.path, dn.classes.join(","));
            } else {
                println!("{}\t{}", name, dn.path);
            }
        }
    }

    if failed > 0 {
        eprintln!(
            "\n{} {}/{} classes failed",
            "⚠".yellow(),
            failed,
            results.len()
        );
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn contained_command(model: &mut ObjectModel, class_name: &str, depth: usize) -> Result<()> {
    let paths = model
        .contained_paths(class_name, depth)
        .with_context(|| format!("Failed to expand {}", class_name))?;

    println!(
        "{} {} contained paths below {}",
        "✓".green(),
        paths.len(),
        class_name.yellow()
    );
    for path in &paths {
        println!("  {}", path.join(" > "));
    }

    Ok(())
}

fn naming_command(model: &mut ObjectModel, class_name: &str, index: usize) -> Result<()> {
    let formats = model
        .dn_formats(class_name)
        .with_context(|| format!("Failed to resolve {}", class_name))?;
    let dn = formats.get(index).with_context(|| {
        format!(
            "{} has {} DN formats, no index {}",
            class_name,
            formats.len(),
            index
        )
    })?;

    println!("{} {}", "→".cyan(), dn.path.green());
    for step in model.naming_hierarchy(dn)? {
        let naming = if step.naming_properties.is_empty() {
            "-".to_string()
        } else {
            step.naming_properties.join(", ")
        };
        println!("  {} {} [{}]", step.class.yellow(), step.rn_format, naming);
    }

    Ok(())
}

fn audit_command(model: &mut ObjectModel) -> ExitCode {
    for (name, e) in model.preload_snapshot() {
        eprintln!("{} Skipping {}: {}", "⚠".yellow(), name, e);
    }

    let findings = model.containment_asymmetries();
    if findings.is_empty() {
        println!(
            "{} {} classes, containment is symmetric",
            "✓".green(),
            model.store().len()
        );
        return ExitCode::SUCCESS;
    }

    println!(
        "{} {} asymmetric containment edges",
        "⚠".yellow(),
        findings.len()
    );
    for finding in &findings {
        println!("  • {}", finding);
    }
    ExitCode::FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dn(path: &str) -> DnFormat {
        DnFormat::new(path, vec![path.to_string()])
    }

    #[test]
    fn test_parse_select() {
        assert_eq!("first".parse::<DnSelect>().unwrap(), DnSelect::First);
        assert_eq!("all".parse::<DnSelect>().unwrap(), DnSelect::All);
        assert_eq!("2".parse::<DnSelect>().unwrap(), DnSelect::Index(2));
        assert!("last".parse::<DnSelect>().is_err());
    }

    #[test]
    fn test_pick() {
        let formats = vec![dn("a"), dn("b"), dn("c")];

        assert_eq!(DnSelect::First.pick(&formats), &formats[..1]);
        assert_eq!(DnSelect::All.pick(&formats).len(), 3);
        assert_eq!(DnSelect::Index(1).pick(&formats)[0].path, "b");
        assert!(DnSelect::Index(3).pick(&formats).is_empty());
        assert!(DnSelect::First.pick(&[]).is_empty());
    }

    #[test]
    fn test_parse_class_list() {
        let list = "fvTenant\n\n# bridge domains\n  fvBD  \nfvCtx\n";
        assert_eq!(parse_class_list(list), vec!["fvTenant", "fvBD", "fvCtx"]);
    }

    #[test]
    fn test_cli_arguments() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
