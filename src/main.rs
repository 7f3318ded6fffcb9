//! grove - assemble flat parent-linked records into trees.
//!
//! Usage:
//!   grove build [INPUT]        Build the forest and print it as JSON
//!   grove find <ID> [INPUT]    Print the subtree rooted at ID
//!   grove path <ID> [INPUT]    Print the identifiers from a root down to ID
//!   grove --help               Show help
//!
//! INPUT is a JSON array of objects; `-` (the default) reads stdin.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result, bail, eyre};
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use grove_build::build_forest;
use grove_core::{Forest, NodeKey, NodeView, TreeConfig, check_render_depth, to_json_value};

#[derive(Parser)]
#[command(
    name = "grove",
    version,
    about = "Assemble flat parent-linked records into ordered trees",
    long_about = "grove reads a JSON array of records that each carry an id and a \
                  parent id, and prints the nested forest they describe.\n\n\
                  Field names, the root parent and the depth limit are configurable \
                  with flags or a TOML file."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the forest and print it as JSON
    Build {
        #[command(flatten)]
        args: BuildArgs,

        /// Print build statistics and warnings to stderr
        #[arg(long)]
        report: bool,
    },

    /// Print the subtree rooted at a node
    Find {
        /// Node identifier, parsed as JSON (`3`, `"a"`) or taken as a string
        id: String,

        #[command(flatten)]
        args: BuildArgs,
    },

    /// Print the path from a root down to a node
    Path {
        /// Node identifier, parsed as JSON (`3`, `"a"`) or taken as a string
        id: String,

        /// Print names instead of identifiers
        #[arg(long)]
        names: bool,

        #[command(flatten)]
        args: BuildArgs,
    },
}

#[derive(Args)]
struct BuildArgs {
    /// Records file (JSON array), `-` for stdin
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Parent identifier of top-level records, parsed as JSON (defaults to null)
    #[arg(short, long)]
    root: Option<String>,

    /// TOML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Field holding the record identifier
    #[arg(long)]
    id_key: Option<String>,

    /// Field holding the parent identifier
    #[arg(long)]
    parent_id_key: Option<String>,

    /// Field holding the display name
    #[arg(long)]
    name_key: Option<String>,

    /// Field holding the sibling sort weight
    #[arg(long)]
    weight_key: Option<String>,

    /// Field name for nested children in the output
    #[arg(long)]
    children_key: Option<String>,

    /// Deepest level that keeps its children (root = 0)
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Command::Build { args, report } => run_build(&args, report),
        Command::Find { id, args } => run_find(&id, &args),
        Command::Path { id, names, args } => run_path(&id, names, &args),
    }
}

fn setup_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .with(filter)
        .init();
}

/// Build and print the whole forest.
fn run_build(args: &BuildArgs, report: bool) -> Result<()> {
    let (forest, config) = load_forest(args)?;

    if report {
        print_report(&forest);
    }

    let value = to_json_value(&forest.roots, &config)?;
    print_json(&value, args.pretty)
}

/// Print the subtree rooted at `id`.
fn run_find(id: &str, args: &BuildArgs) -> Result<()> {
    let value = find_value(id, args)?;
    print_json(&value, args.pretty)
}

/// Print the identifiers (or names) from a root down to `id`.
fn run_path(id: &str, names: bool, args: &BuildArgs) -> Result<()> {
    let value = path_value(id, names, args)?;
    print_json(&value, args.pretty)
}

fn find_value(id: &str, args: &BuildArgs) -> Result<Value> {
    let key = parse_node_id(id)?;
    let (forest, config) = load_forest(args)?;

    let node = grove_query::find(&forest.roots, &key)
        .ok_or_else(|| eyre!("No node with id {key} in the built forest"))?;
    check_render_depth(std::slice::from_ref(node))?;
    Ok(serde_json::to_value(NodeView::new(node, &config))?)
}

fn path_value(id: &str, names: bool, args: &BuildArgs) -> Result<Value> {
    let key = parse_node_id(id)?;
    let (forest, _) = load_forest(args)?;

    let value = if names {
        grove_query::path_names(&forest.roots, &key, true).map(serde_json::to_value)
    } else {
        grove_query::path_ids(&forest.roots, &key, true).map(serde_json::to_value)
    };
    match value {
        Some(value) => Ok(value?),
        None => bail!("No node with id {key} in the built forest"),
    }
}

fn load_forest(args: &BuildArgs) -> Result<(Forest, TreeConfig)> {
    let config = load_config(args)?;
    let root = match &args.root {
        Some(text) => parse_key(text)?,
        None => None,
    };
    let records = read_records(&args.input)?;

    let forest = build_forest(&records, root.as_ref(), &config).context("Build failed")?;
    tracing::info!(
        records = records.len(),
        nodes = forest.stats.nodes,
        warnings = forest.warnings.len(),
        "built forest"
    );
    Ok((forest, config))
}

/// Start from the config file (or defaults) and apply flag overrides.
fn load_config(args: &BuildArgs) -> Result<TreeConfig> {
    let mut config = match &args.config {
        Some(path) => TreeConfig::load(path)
            .wrap_err_with(|| format!("Failed to load config {}", path.display()))?,
        None => TreeConfig::default(),
    };

    if let Some(key) = &args.id_key {
        config = config.with_id_key(key);
    }
    if let Some(key) = &args.parent_id_key {
        config = config.with_parent_id_key(key);
    }
    if let Some(key) = &args.name_key {
        config = config.with_name_key(key);
    }
    if let Some(key) = &args.weight_key {
        config = config.with_weight_key(key);
    }
    if let Some(key) = &args.children_key {
        config = config.with_children_key(key);
    }
    if args.max_depth.is_some() {
        config = config.with_max_depth(args.max_depth);
    }

    config.validate()?;
    Ok(config)
}

/// Read a JSON array of records from a file, or stdin for `-`.
fn read_records(input: &Path) -> Result<Vec<Value>> {
    let text = if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read stdin")?;
        text
    } else {
        std::fs::read_to_string(input)
            .wrap_err_with(|| format!("Failed to read {}", input.display()))?
    };

    serde_json::from_str(&text).context("Input must be a JSON array of records")
}

/// Parse an identifier given on the command line.
///
/// JSON text is decoded (`3` is an integer, `"3"` a string); anything that is
/// not valid JSON is taken as a plain string. `null` means "no identifier".
fn parse_key(text: &str) -> Result<Option<NodeKey>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Null) => Ok(None),
        Ok(value) => NodeKey::from_value(&value)
            .map(Some)
            .ok_or_else(|| eyre!("{text} cannot be used as an identifier")),
        Err(_) => Ok(Some(NodeKey::from(text))),
    }
}

fn parse_node_id(text: &str) -> Result<NodeKey> {
    parse_key(text)?.ok_or_else(|| eyre!("A node id cannot be null"))
}

fn print_report(forest: &Forest) {
    let stats = &forest.stats;
    eprintln!(
        "{} records, {} nodes in {} trees, max depth {}",
        stats.input_records, stats.nodes, stats.roots, stats.max_depth
    );
    eprintln!(
        "{} orphans, {} unreachable, {} cycles broken, {} duplicate ids, {} truncated",
        stats.orphans, stats.unreachable, stats.cycles_broken, stats.duplicate_ids, stats.truncated
    );
    for warning in &forest.warnings {
        eprintln!("warning: {}", warning.message);
    }
}

fn print_json(value: &Value, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn args(input: &Path) -> BuildArgs {
        BuildArgs {
            input: input.to_path_buf(),
            root: None,
            config: None,
            id_key: None,
            parent_id_key: None,
            name_key: None,
            weight_key: None,
            children_key: None,
            max_depth: None,
            pretty: false,
        }
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_key() {
        assert_eq!(parse_key("3").unwrap(), Some(NodeKey::from(3)));
        assert_eq!(parse_key("\"3\"").unwrap(), Some(NodeKey::from("3")));
        assert_eq!(parse_key("menu:1").unwrap(), Some(NodeKey::from("menu:1")));
        assert_eq!(parse_key("null").unwrap(), None);
        assert!(parse_key("[1]").is_err());
        assert!(parse_node_id("null").is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "id_key = \"code\"\nname_key = \"title\"\nmax_depth = 1").unwrap();

        let mut args = args(Path::new("-"));
        args.config = Some(file.path().to_path_buf());
        args.name_key = Some("label".to_string());

        let config = load_config(&args).unwrap();
        assert_eq!(config.id_key, "code");
        assert_eq!(config.name_key, "label");
        assert_eq!(config.max_depth(), Some(1));
    }

    #[test]
    fn test_colliding_flags_rejected() {
        let mut args = args(Path::new("-"));
        args.children_key = Some("id".to_string());
        assert!(load_config(&args).is_err());
    }

    #[test]
    fn test_load_forest_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id": 1, "parentId": 0}}, {{"id": 2, "parentId": 1}}, {{"id": 3, "parentId": 9}}]"#
        )
        .unwrap();

        let mut args = args(file.path());
        args.root = Some("0".to_string());

        let (forest, _) = load_forest(&args).unwrap();
        assert_eq!(forest.len(), 1);
        assert_eq!(forest.stats.nodes, 2);
        assert_eq!(forest.stats.orphans, 1);
    }

    fn menu_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"id": "sys", "name": "System"}},
                {{"id": "user", "parentId": "sys", "name": "Users"}},
                {{"id": 7, "parentId": "user", "name": "Add"}}
            ]"#
        )
        .unwrap();
        file
    }

    #[test]
    fn test_find_prints_subtree() {
        let file = menu_file();
        let value = find_value("\"user\"", &args(file.path())).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "id": "user",
                "parentId": "sys",
                "name": "Users",
                "children": [{"id": 7, "parentId": "user", "name": "Add", "children": []}]
            })
        );
    }

    #[test]
    fn test_find_unknown_id() {
        let file = menu_file();
        let err = find_value("\"7\"", &args(file.path())).unwrap_err();
        assert!(err.to_string().contains("No node with id \"7\""));
    }

    #[test]
    fn test_path_ids_and_names() {
        let file = menu_file();

        let ids = path_value("7", false, &args(file.path())).unwrap();
        assert_eq!(ids, serde_json::json!(["sys", "user", 7]));

        let names = path_value("7", true, &args(file.path())).unwrap();
        assert_eq!(names, serde_json::json!(["System", "Users", "Add"]));
    }

    #[test]
    fn test_path_unknown_id() {
        let file = menu_file();
        let err = path_value("missing", false, &args(file.path())).unwrap_err();
        assert!(err.to_string().contains("No node with id \"missing\""));
    }

    #[test]
    fn test_non_array_input_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"id": 1}}"#).unwrap();
        assert!(read_records(file.path()).is_err());
    }
}
