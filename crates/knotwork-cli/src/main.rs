use knotwork::layout::{Shape, classify, decompose};
use knotwork::{Document, Settings};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Knotwork(knotwork::HeadlessError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Knotwork(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<knotwork::HeadlessError> for CliError {
    fn from(value: knotwork::HeadlessError) -> Self {
        Self::Knotwork(value)
    }
}

impl From<knotwork::Error> for CliError {
    fn from(value: knotwork::Error) -> Self {
        Self::Knotwork(value.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Classify,
    Components,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    pretty: bool,
}

#[derive(Serialize)]
struct ComponentOut<'a> {
    nodes: Vec<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shape: Option<Shape>,
}

fn usage() -> &'static str {
    "knotwork-cli\n\
\n\
USAGE:\n\
  knotwork-cli [layout] [--pretty] [--config <path>] [<path>|-]\n\
  knotwork-cli classify [--pretty] [--config <path>] [<path>|-]\n\
  knotwork-cli components [--pretty] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the {nodes, edges} document is read from stdin.\n\
  - layout prints the normalized document.\n\
  - classify prints one {nodes, shape} entry per connected component.\n\
  - --config accepts JSON, or YAML when the file ends in .yaml/.yml.\n\
  - Set RUST_LOG (e.g. RUST_LOG=knotwork_layout=debug) for diagnostics on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "classify" => args.command = Command::Classify,
            "components" => args.command = Command::Components,
            "--pretty" => args.pretty = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn load_settings(path: Option<&str>) -> Result<Settings, CliError> {
    let Some(path) = path else {
        return Ok(Settings::default());
    };
    let text = std::fs::read_to_string(path)?;
    let settings = if path.ends_with(".yaml") || path.ends_with(".yml") {
        Settings::from_yaml_str(&text)?
    } else {
        Settings::from_json_str(&text)?
    };
    Ok(settings)
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let settings = load_settings(args.config.as_deref())?;
    let text = read_input(args.input.as_deref())?;
    let doc = knotwork::document_from_json(&text)?;
    tracing::debug!(
        command = ?args.command,
        nodes = doc.nodes().len(),
        edges = doc.edges().len(),
        "input loaded"
    );

    match args.command {
        Command::Layout => {
            let out: Document = knotwork::layout_document(&doc, &settings.layout)?;
            write_json(&out, args.pretty)
        }
        Command::Classify | Command::Components => {
            let with_shape = matches!(args.command, Command::Classify);
            let components = decompose(doc.nodes(), doc.edges());
            let out = components
                .iter()
                .map(|c| ComponentOut {
                    nodes: c.nodes.iter().map(|n| n.id.as_str()).collect(),
                    shape: with_shape.then(|| classify(c, &settings.layout)),
                })
                .collect::<Vec<_>>();
            write_json(&out, args.pretty)
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
