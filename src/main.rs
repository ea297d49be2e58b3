//! Route resolver command line.
//!
//! ```text
//! route-resolver --routes routes.toml check
//! route-resolver --routes routes.toml match GET /users/42
//! route-resolver --routes routes.toml url users.show id=42
//! route-resolver --routes routes.toml dump --out routes.cache.json
//! route-resolver --cache routes.cache.json serve --bind 0.0.0.0:8080
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use route_resolver::config::{build_router, load_config, RouteTableConfig, RouteTableWatcher};
use route_resolver::constraints::ConstraintSet;
use route_resolver::http::{shutdown_signal, HttpServer, MatchResponse};
use route_resolver::observability::logging::init_logging;
use route_resolver::Router;

#[derive(Parser)]
#[command(name = "route-resolver")]
#[command(about = "Resolve HTTP routes and generate URLs from a route table", long_about = None)]
struct Cli {
    /// Route table file (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    routes: PathBuf,

    /// Route cache file (JSON). When set, routes are served from it.
    #[arg(short, long)]
    cache: Option<PathBuf>,

    /// Log level when RUST_LOG is unset; defaults to the table's setting.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate the route table
    Check,
    /// Resolve a request
    Match { method: String, path: String },
    /// Generate the URL of a named route
    Url {
        name: String,
        /// Parameters as key=value
        params: Vec<String>,
    },
    /// List named routes
    Names,
    /// Write the route cache
    Dump {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Serve resolutions over HTTP
    Serve {
        #[arg(short, long, default_value = "127.0.0.1:8080")]
        bind: String,
        /// Rebuild routes when the route table changes
        #[arg(short, long)]
        watch: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let constraints = ConstraintSet::builtin();

    // A cache replaces the table unless the command needs the table itself.
    let from_cache = match &cli.command {
        Commands::Check | Commands::Dump { .. } => false,
        Commands::Serve { watch, .. } => !watch && cli.cache.is_some(),
        _ => cli.cache.is_some(),
    };
    let table = if from_cache {
        None
    } else {
        Some(load_config(&cli.routes, &constraints)?)
    };

    let level = cli
        .log_level
        .clone()
        .or_else(|| table.as_ref().map(|t| t.router.log_level.clone()))
        .unwrap_or_else(|| "info".to_string());
    init_logging(&level);

    let router = match (&table, &cli.cache) {
        (Some(table), _) => build_router(table, &constraints)?,
        (None, Some(cache)) => Router::load_cache(cache, &constraints)?,
        (None, None) => return Err("no route table or cache given".into()),
    };

    match cli.command {
        Commands::Check => {
            let entries = table.as_ref().map(RouteTableConfig::route_entry_count).unwrap_or_default();
            println!(
                "ok: {} entries, {} patterns, {} named routes",
                entries,
                router.route_count(),
                router.names().len()
            );
        }
        Commands::Match { method, path } => match router.match_route(&method, &path) {
            Ok(found) => println!("{}", serde_json::to_string_pretty(&MatchResponse::from(&found))?),
            Err(e) => return Err(format!("{} ({})", e, e.status_code()).into()),
        },
        Commands::Url { name, params } => {
            let params = parse_params(&params)?;
            println!("{}", router.generate_url(&name, params)?);
        }
        Commands::Names => {
            for (name, route) in router.names().all() {
                println!("{}\t{}", name, route.pattern);
            }
        }
        Commands::Dump { out } => {
            let path = out
                .or_else(|| cli.cache.clone())
                .or_else(|| table.as_ref().and_then(|t| t.router.cache_path.clone()))
                .ok_or("no cache path: pass --out, --cache, or set router.cache_path")?;
            router.save_cache(&path)?;
            println!("wrote {}", path.display());
        }
        Commands::Serve { bind, watch } => {
            serve(router, &bind, watch.then_some(cli.routes.as_path()), constraints).await?;
        }
    }

    Ok(())
}

async fn serve(
    router: Router<String>,
    bind: &str,
    watch: Option<&Path>,
    constraints: ConstraintSet,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!("route-resolver v{} starting", env!("CARGO_PKG_VERSION"));

    // The watcher handle must outlive the server.
    let (_watcher, updates) = match watch {
        Some(path) => {
            let (watcher, updates) = RouteTableWatcher::new(path, constraints);
            (Some(watcher.run()?), Some(updates))
        }
        None => (None, None),
    };

    let listener = TcpListener::bind(bind).await?;
    HttpServer::new(router).run(listener, updates, shutdown_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn parse_params(raw: &[String]) -> Result<Vec<(String, String)>, String> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| format!("parameter {} is not key=value", pair))
        })
        .collect()
}
