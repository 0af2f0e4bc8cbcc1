//! # Butterfly-indoor CLI
//!
//! Command-line front end for indoor wayfinding over GeoJSON floor plans.

use anyhow::{Context, Result};
use butterfly_indoor::config::DEFAULT_CONFIG_FILE;
use butterfly_indoor::{Config, Direction, Floor, Itinerary, NodeId, RouteService};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Command-line interface for butterfly-indoor
#[derive(Parser)]
#[command(name = "butterfly-indoor")]
#[command(about = "Indoor wayfinding over floor-plan graphs")]
#[command(long_about = "Finds accessible routes through a building:
  butterfly-indoor route --from NODE_001 --to NODE_042
  butterfly-indoor nearest --x 35.2 --y 31.9 --floor first
  butterfly-indoor nodes stair

Data is read from Nodes.geojson / Edges.geojson, or from the paths in
butterfly-indoor.yaml when that file is present.")]
#[command(version = env!("BUTTERFLY_INDOOR_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Node feature collection (overrides the config file)
    #[arg(long, global = true)]
    nodes: Option<PathBuf>,

    /// Edge feature collection (overrides the config file)
    #[arg(long, global = true)]
    edges: Option<PathBuf>,

    /// YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Route through blocked nodes too
    #[arg(long, global = true)]
    ignore_access: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the shortest accessible route between two nodes
    Route {
        /// Start node id
        #[arg(long)]
        from: String,
        /// Destination node id
        #[arg(long)]
        to: String,
    },
    /// Snap a point to the closest node
    Nearest {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        /// Floor number or name (e.g. "ground", "first", "2")
        #[arg(long)]
        floor: Option<String>,
    },
    /// List node ids matching a search term
    Nodes {
        /// Case-insensitive substring; lists everything when omitted
        term: Option<String>,
        #[arg(long, default_value = "20")]
        limit: usize,
    },
    /// Show graph and node statistics
    Stats,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = resolve_config(&cli)?;
    debug!(?config, "effective configuration");

    let service = RouteService::from_config(config.clone()).with_context(|| {
        format!(
            "failed to load floor plan from {} and {}",
            config.nodes.display(),
            config.edges.display()
        )
    })?;

    match cli.command {
        Commands::Route { from, to } => {
            let itinerary = service.itinerary(&NodeId::from(from), &NodeId::from(to))?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&itinerary)?);
            } else {
                print_itinerary(&itinerary, service.config());
            }
        }
        Commands::Nearest { x, y, floor } => {
            let floor = floor
                .map(|label| {
                    service
                        .config()
                        .parse_floor(&label)
                        .with_context(|| format!("unknown floor '{label}'"))
                })
                .transpose()?;

            let node = service
                .nearest([x, y], floor)
                .with_context(|| match floor {
                    Some(f) => format!("no nodes on floor {}", service.config().floor_name(f)),
                    None => "no nodes loaded".to_string(),
                })?;

            if cli.json {
                println!("{}", serde_json::json!({ "node": node }));
            } else {
                println!("{node}");
            }
        }
        Commands::Nodes { term, limit } => {
            let hits = service.search(term.as_deref().unwrap_or(""), limit);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&hits)?);
            } else {
                for id in hits {
                    println!("{id}");
                }
            }
        }
        Commands::Stats => {
            let stats = service.stats();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                let floors: Vec<String> = stats
                    .floors
                    .iter()
                    .map(|f| service.config().floor_name(*f))
                    .collect();
                println!("Nodes:          {}", stats.nodes);
                println!("Blocked nodes:  {}", stats.blocked_nodes);
                println!("Graph nodes:    {}", stats.graph_nodes);
                println!("Directed edges: {}", stats.directed_edges);
                println!("Floors:         {}", floors.join(", "));
            }
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` wins over `-v`
fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Config file (explicit, or the default name when present), then CLI overrides
fn resolve_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            Config::load(Path::new(DEFAULT_CONFIG_FILE))
                .with_context(|| format!("failed to load config {DEFAULT_CONFIG_FILE}"))?
        }
        None => Config::default(),
    };

    if let Some(nodes) = &cli.nodes {
        config.nodes = nodes.clone();
    }
    if let Some(edges) = &cli.edges {
        config.edges = edges.clone();
    }
    if cli.ignore_access {
        config.respect_accessibility = false;
    }

    Ok(config)
}

fn floor_label(floor: Option<Floor>, config: &Config) -> String {
    match floor {
        Some(f) => config.floor_name(f),
        None => "unknown floor".to_string(),
    }
}

fn print_itinerary(itinerary: &Itinerary, config: &Config) {
    let route = &itinerary.route;
    if let (Some(start), Some(end)) = (route.start(), route.end()) {
        println!(
            "🧭 Route {start} → {end}: {:.2} over {} nodes",
            route.distance,
            route.len()
        );
    }

    for (i, step) in itinerary.steps.iter().enumerate() {
        let path: Vec<&str> = step.nodes.iter().map(NodeId::as_str).collect();
        println!(
            "Step {} [{}]: {}",
            i + 1,
            floor_label(step.floor, config),
            path.join(" → ")
        );

        if let Some(t) = itinerary.transitions.iter().find(|t| t.after_step == i) {
            let icon = match t.direction {
                Direction::Up => "▲",
                Direction::Down => "▼",
                Direction::Unknown => "•",
            };
            println!(
                "  {icon} at {} go to {}",
                t.anchor,
                floor_label(t.to, config)
            );
        }
    }
}
