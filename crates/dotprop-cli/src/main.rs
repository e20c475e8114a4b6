use clap::{Args as ClapArgs, Parser, Subcommand};
use dotprop_core::{
    Delimiter, Fallback, FlattenOptions, GetOptions, KeySelector, RecordKind, SequenceMode,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "dotprop",
    about = "Query and reshape JSON documents with dotted paths",
    version
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Print the first found value among candidate paths
    Get(ReadArgs),
    /// Set a value (raw JSON) at an existing path; prints or writes with --out
    Set(SetArgs),
    /// List children at a path
    List(ListArgs),
    /// Flatten a document into one level of joined keys
    Flatten(FlattenArgs),
    /// Rebuild a nested document from joined keys
    Unflatten(UnflattenArgs),
    /// Copy keys from a source document into a target document
    Bind(BindArgs),
}

#[derive(ClapArgs, Debug)]
struct ReadArgs {
    /// JSON file to read
    path: PathBuf,
    /// Candidate paths, tried left to right (e.g. server.port server.fallback_port)
    #[arg(required_unless_present = "args")]
    paths: Vec<String>,
    /// Default printed when no candidate is found, as raw JSON
    #[arg(long, value_name = "JSON")]
    default: Option<String>,
    /// Positional argument list as one JSON array, e.g. '["a.x","a.b",0]' or '[["a.x"],0]'
    #[arg(long, value_name = "JSON", conflicts_with_all = ["paths", "default"])]
    args: Option<String>,
    /// Accept any resolved value, including 0, "", false and null
    #[arg(long, default_value_t = false)]
    exists: bool,
    /// Path segment separator
    #[arg(long, default_value = ".")]
    delimiter: Delimiter,
}

#[derive(ClapArgs, Debug)]
struct SetArgs {
    /// JSON file to read
    path: PathBuf,
    /// Dotted path; every segment but the last must already exist
    key: String,
    /// New value as raw JSON (e.g., 123, true, "str", {"a":1})
    #[arg(long)]
    value: String,
    /// Optional output .json path to write; otherwise prints to stdout
    #[arg(long)]
    out: Option<PathBuf>,
    /// Path segment separator
    #[arg(long, default_value = ".")]
    delimiter: Delimiter,
}

#[derive(ClapArgs, Debug)]
struct ListArgs {
    /// JSON file to read
    path: PathBuf,
    /// Dotted path of the node to list; the document itself by default
    #[arg(default_value = dotprop_core::THIS)]
    key: String,
    /// Path segment separator
    #[arg(long, default_value = ".")]
    delimiter: Delimiter,
}

#[derive(ClapArgs, Debug)]
struct FlattenArgs {
    /// JSON file to read
    path: PathBuf,
    /// Separator placed between joined keys
    #[arg(long, default_value = ".")]
    delimiter: Delimiter,
    /// Keep nested arrays as values instead of indexing them
    #[arg(long, default_value_t = false)]
    keep_sequences: bool,
    /// Optional output .json path to write; otherwise prints to stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct UnflattenArgs {
    /// JSON file holding a single-level object
    path: PathBuf,
    /// Separator used in the joined keys
    #[arg(long, default_value = ".")]
    delimiter: Delimiter,
    /// Optional output .json path to write; otherwise prints to stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(ClapArgs, Debug)]
struct BindArgs {
    /// JSON file whose object receives the keys
    target: PathBuf,
    /// JSON file whose object provides the values
    source: PathBuf,
    /// '*' for every source key, or a comma-separated list; defaults to the target's own keys
    #[arg(long)]
    keys: Option<KeySelector>,
    /// Optional output .json path to write; otherwise prints to stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Get(a) => cmd_get(a),
        Cmd::Set(a) => cmd_set(a),
        Cmd::List(a) => cmd_list(a),
        Cmd::Flatten(a) => cmd_flatten(a),
        Cmd::Unflatten(a) => cmd_unflatten(a),
        Cmd::Bind(a) => cmd_bind(a),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("dotprop=warn,dotprop_core=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(path: &Path) -> Value {
    dotprop_core::read_record(path).unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(2);
    })
}

fn parse_json_arg(flag: &str, raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        eprintln!("invalid {} JSON: {}", flag, e);
        std::process::exit(3);
    })
}

fn print_json(v: &Value) {
    match serde_json::to_string_pretty(v) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(5);
        }
    }
}

fn emit(out: Option<PathBuf>, v: &Value) {
    if let Some(out) = out {
        dotprop_core::write_record(&out, v).unwrap_or_else(|e| {
            eprintln!("error writing: {}", e);
            std::process::exit(5);
        });
        tracing::info!(path = %out.display(), "wrote document");
    } else {
        print_json(v);
    }
}

fn cmd_get(args: ReadArgs) {
    let v = load(&args.path);
    let opts = GetOptions {
        delimiter: args.delimiter,
        fallback: if args.exists { Fallback::Exists } else { Fallback::Truthy },
    };
    if let Some(raw) = args.args {
        let list = match parse_json_arg("--args", &raw) {
            Value::Array(items) => items,
            other => vec![other],
        };
        print_json(&dotprop_core::GetArgs::from_values(list).eval(&v, &opts));
        return;
    }
    match dotprop_core::get_with(&v, &args.paths, &opts) {
        Some(x) => print_json(x),
        None => match args.default {
            Some(raw) => print_json(&parse_json_arg("--default", &raw)),
            None => {
                eprintln!("not found: {}", args.paths.join(", "));
                std::process::exit(3);
            }
        },
    }
}

fn cmd_set(args: SetArgs) {
    let mut v = load(&args.path);
    let new_val = parse_json_arg("--value", &args.value);
    if let Err(e) = dotprop_core::set_with(&mut v, &args.key, new_val, &args.delimiter) {
        eprintln!("error: {}", e);
        std::process::exit(4);
    }
    emit(args.out, &v);
}

fn cmd_list(args: ListArgs) {
    let v = load(&args.path);
    match dotprop_core::list_children(&v, &args.key, &args.delimiter) {
        Ok(children) => {
            for c in children {
                println!(
                    "{}\t{:?}{}",
                    c.key_or_index,
                    c.kind,
                    c.len.map(|n| format!("\t(len={})", n)).unwrap_or_default()
                );
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(3);
        }
    }
}

fn cmd_flatten(args: FlattenArgs) {
    let v = load(&args.path);
    if !RecordKind::of(&v).is_container() {
        tracing::warn!("document root is not an object or array; nothing to flatten");
    }
    let opts = FlattenOptions {
        delimiter: args.delimiter,
        sequences: if args.keep_sequences { SequenceMode::Leaf } else { SequenceMode::Index },
    };
    let flat = dotprop_core::flatten_with(&v, &opts);
    emit(args.out, &Value::Object(flat));
}

fn cmd_unflatten(args: UnflattenArgs) {
    let v = load(&args.path);
    let Some(flat) = v.as_object() else {
        eprintln!("error: {} does not hold a JSON object", args.path.display());
        std::process::exit(4);
    };
    emit(args.out, &dotprop_core::unflatten_with(flat, &args.delimiter));
}

fn cmd_bind(args: BindArgs) {
    let mut target = load(&args.target);
    let source = load(&args.source);
    let keys = args.keys.unwrap_or_default();
    if dotprop_core::bind(&mut target, &source, &keys).is_none() {
        eprintln!("error: target and source must both be JSON objects");
        std::process::exit(4);
    }
    emit(args.out, &target);
}
