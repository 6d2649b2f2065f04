use serde::Serialize;
use std::io::{Read, Write};
use strongway::graphlib::alg;
use strongway::{
    ArcProvenance, CutNodeMode, EdgeOrder, MixedGraph, Orientation, OrientationOptions,
    OrientationReport, PipelineStatus, RoadNetwork,
};
use tracing_subscriber::filter::LevelFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Strongway(strongway::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Strongway(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<strongway::Error> for CliError {
    fn from(value: strongway::Error) -> Self {
        Self::Strongway(value)
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
    Orient,
    Check,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    report_only: bool,
    config: Option<String>,
    cut_node_mode: Option<CutNodeMode>,
    edge_order: Option<EdgeOrder>,
    out: Option<String>,
    verbose: bool,
}

#[derive(Serialize)]
struct NodeOut<'a> {
    id: &'a str,
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<&'a str>,
}

#[derive(Serialize)]
struct ArcOut<'a> {
    from: &'a str,
    to: &'a str,
    kind: ArcProvenance,
}

#[derive(Serialize)]
struct OrientOut<'a> {
    status: PipelineStatus,
    report: &'a OrientationReport,
    nodes: Vec<NodeOut<'a>>,
    arcs: Vec<ArcOut<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckOut {
    nodes: usize,
    arcs: usize,
    fixed_arcs: usize,
    flexible_arcs: usize,
    strongly_connected: bool,
    bridges: Vec<(String, String)>,
}

fn usage() -> &'static str {
    "strongway-cli\n\
\n\
USAGE:\n\
  strongway-cli [orient] [--pretty] [--report-only] [--config <path>] [--cut-nodes single-pass|fixpoint] [--edge-order input|lexicographic] [--out <path>] [--verbose] [<path>|-]\n\
  strongway-cli check [--pretty] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the road network JSON is read from stdin.\n\
  - orient prints the oriented graph with its report; --report-only prints just the report.\n\
  - --config reads orientation options from a JSON file; --cut-nodes and --edge-order override it.\n\
  - check prints connectivity facts about the input without orienting it.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "orient" => args.command = Command::Orient,
            "check" => args.command = Command::Check,
            "--pretty" => args.pretty = true,
            "--report-only" => args.report_only = true,
            "--verbose" | "-v" => args.verbose = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--cut-nodes" => {
                let Some(mode) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.cut_node_mode = Some(
                    mode.parse::<CutNodeMode>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--edge-order" => {
                let Some(order) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.edge_order = Some(
                    order
                        .parse::<EdgeOrder>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
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
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
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

fn init_tracing(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    // Logs go to stderr so stdout stays valid JSON.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
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

fn write_json(value: &impl Serialize, pretty: bool, out: Option<&str>) -> Result<(), CliError> {
    let mut text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    text.push('\n');
    match out {
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
        Some(path) => std::fs::write(path, text)?,
    }
    Ok(())
}

fn load_options(args: &Args) -> Result<OrientationOptions, CliError> {
    let mut options = match args.config.as_deref() {
        Some(path) => OrientationOptions::from_json(&std::fs::read_to_string(path)?)?,
        None => OrientationOptions::default(),
    };
    if let Some(mode) = args.cut_node_mode {
        options = options.with_cut_node_mode(mode);
    }
    if let Some(order) = args.edge_order {
        options = options.with_edge_order(order);
    }
    Ok(options)
}

fn orient_out(result: &Orientation) -> OrientOut<'_> {
    let nodes = result
        .graph
        .nodes()
        .enumerate()
        .map(|(index, id)| {
            let attrs = result.graph.node(id);
            let position = attrs.and_then(|a| a.position);
            NodeOut {
                id,
                index,
                x: position.map(|p| p.x),
                y: position.map(|p| p.y),
                label: attrs.and_then(|a| a.label.as_deref()),
            }
        })
        .collect();
    let arcs = result
        .graph
        .arc_entries()
        .map(|(key, attrs)| ArcOut {
            from: key.v.as_str(),
            to: key.w.as_str(),
            kind: attrs.provenance(),
        })
        .collect();
    OrientOut {
        status: result.status(),
        report: &result.report,
        nodes,
        arcs,
    }
}

fn check_out(g: &MixedGraph) -> CheckOut {
    let flexible_arcs = g.arc_entries().filter(|(_, attrs)| attrs.flexible).count();
    CheckOut {
        nodes: g.node_count(),
        arcs: g.arc_count(),
        fixed_arcs: g.arc_count() - flexible_arcs,
        flexible_arcs,
        strongly_connected: alg::is_strongly_connected(g),
        bridges: alg::bridges(g),
    }
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let network = RoadNetwork::from_json(&text)?;
    let g = network.to_mixed_graph()?;
    tracing::debug!(
        nodes = g.node_count(),
        arcs = g.arc_count(),
        "road network loaded"
    );

    match args.command {
        Command::Check => write_json(&check_out(&g), args.pretty, args.out.as_deref()),
        Command::Orient => {
            let options = load_options(&args)?;
            let result = strongway::orient(&g, &options);
            if args.report_only {
                write_json(&result.report, args.pretty, args.out.as_deref())
            } else {
                write_json(&orient_out(&result), args.pretty, args.out.as_deref())
            }
        }
    }
}

fn main() {
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
    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
