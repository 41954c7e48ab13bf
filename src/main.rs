use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::info;

use route_guide::NavigatorConfig;
use route_guide::clock::ManualClock;
use route_guide::loader::RouteLoader;
use route_guide::location::{Location, Waypoint};
use route_guide::mapbox::MapboxClient;
use route_guide::monitor::PositionOutcome;
use route_guide::rerouter::{RouteEvent, RouteListener, Rerouter};
use route_guide::resolver::SearchBoxResolver;
use route_guide::route::Route;
use route_guide::search::SuggestQuery;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for places by name or address
    Search {
        text: String,

        /// Bias results toward this position ("lat,lon")
        #[arg(long, value_parser = parse_location)]
        near: Option<Location>,
    },
    /// Load a walking route between two waypoints ("lat,lon" or free text)
    Route {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        /// Also request alternative routes
        #[arg(long)]
        alternatives: bool,
    },
    /// Replay a position trace ("seconds,lat,lon" per line) against a route
    Track {
        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        #[arg(long)]
        trace: PathBuf,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let config = NavigatorConfig::from_env()?;

    match cli.command {
        Commands::Search { text, near } => search(&config, text, near),
        Commands::Route {
            from,
            to,
            alternatives,
        } => route(&config, &from, &to, alternatives || config.alternatives),
        Commands::Track { from, to, trace } => track(&config, &from, &to, &trace),
    }
}

fn search(config: &NavigatorConfig, text: String, near: Option<Location>) -> anyhow::Result<()> {
    let client = Arc::new(MapboxClient::new(&config.mapbox)?);
    let resolver = SearchBoxResolver::new(client, config.search.clone());

    let mut query = SuggestQuery::new(text);
    if let Some(near) = near {
        query = query.near(near);
    }

    let suggestions = resolver.suggest(&query)?;
    if suggestions.is_empty() {
        println!("no results");
    }
    for (i, suggestion) in suggestions.iter().enumerate() {
        let position = match suggestion.usable_coordinate() {
            Some(location) => location.to_string(),
            None => "(retrieve needed)".to_string(),
        };
        println!(
            "{:>2}. {} [{}] {}",
            i + 1,
            suggestion.display_name(),
            suggestion.feature_type.as_deref().unwrap_or("-"),
            position
        );
    }
    Ok(())
}

fn route(config: &NavigatorConfig, from: &str, to: &str, alternatives: bool) -> anyhow::Result<()> {
    let client = Arc::new(MapboxClient::new(&config.mapbox)?);
    let resolver = SearchBoxResolver::new(Arc::clone(&client), config.search.clone());
    let loader = RouteLoader::new(client, resolver).with_alternatives(alternatives);

    let loaded = loader.load(&parse_waypoint(from), &parse_waypoint(to))?;
    println!("{} -> {}", loaded.from, loaded.to);
    print_route(&loaded.route);
    Ok(())
}

fn track(config: &NavigatorConfig, from: &str, to: &str, trace: &Path) -> anyhow::Result<()> {
    let fixes = read_trace(trace)?;

    let client = Arc::new(MapboxClient::new(&config.mapbox)?);
    let resolver = SearchBoxResolver::new(Arc::clone(&client), config.search.clone());
    let loader = RouteLoader::new(client, resolver).with_alternatives(config.alternatives);

    let clock = Arc::new(ManualClock::new());
    let listener: RouteListener = Arc::new(|event: &RouteEvent| match event {
        RouteEvent::Loaded(route) => {
            println!("route loaded");
            print_route(route);
        }
        RouteEvent::Rerouted(route) => {
            println!("rerouted");
            print_route(route);
        }
        RouteEvent::Failed(err) => println!("no new route: {err}"),
    });
    let rerouter = Rerouter::new(
        Arc::new(loader),
        config.reroute.clone(),
        clock.clone(),
        listener,
    );

    rerouter.load_and_track(&parse_waypoint(from), &parse_waypoint(to))?;

    for (elapsed, position) in fixes {
        clock.set_elapsed(elapsed);
        let outcome = rerouter.update_position(&position);
        match &outcome {
            PositionOutcome::OnRoute { deviation_m } => {
                println!("{:>7.1}s {} on route ({:.1} m)", elapsed.as_secs_f64(), position, deviation_m)
            }
            PositionOutcome::Reroute(request) => {
                println!(
                    "{:>7.1}s {} off route by {:.1} m, rerouting",
                    elapsed.as_secs_f64(),
                    position,
                    request.deviation_m
                );
                // Replays are deterministic: let the reroute land before the next fix.
                rerouter.wait_for_reroutes();
            }
            other => println!("{:>7.1}s {} {:?}", elapsed.as_secs_f64(), position, other),
        }
    }

    info!(elapsed_s = clock.elapsed().as_secs_f64(), "trace replayed");
    Ok(())
}

fn print_route(route: &Route) {
    for (i, alternative) in route.alternatives().iter().enumerate() {
        println!(
            "  alternative {}: {:.0} m, {:.0} s, {} vertices",
            i + 1,
            alternative.distance_m,
            alternative.duration_s,
            alternative.geometry.len()
        );
    }
    if let Some(primary) = route.primary() {
        for step in primary.steps() {
            println!("    {:>6.0} m  {}", step.distance_m, step.instruction);
        }
    }
}

fn parse_location(s: &str) -> Result<Location, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected 'lat,lon', got '{s}'"))?;
    let lat: f64 = lat.trim().parse().map_err(|_| format!("bad latitude '{lat}'"))?;
    let lon: f64 = lon.trim().parse().map_err(|_| format!("bad longitude '{lon}'"))?;
    let location = Location::new(lat, lon);
    if !location.is_valid() {
        return Err(format!("'{s}' is not a valid coordinate"));
    }
    Ok(location)
}

fn parse_waypoint(s: &str) -> Waypoint {
    match parse_location(s) {
        Ok(location) => Waypoint::Coordinate(location),
        Err(_) => Waypoint::query(s),
    }
}

fn read_trace(path: &Path) -> anyhow::Result<Vec<(Duration, Location)>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read trace {}", path.display()))?;

    let mut fixes = Vec::new();
    for (n, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((seconds, position)) = line.split_once(',') else {
            bail!("{}:{}: expected 'seconds,lat,lon'", path.display(), n + 1);
        };
        let seconds: f64 = seconds
            .trim()
            .parse()
            .with_context(|| format!("{}:{}: bad timestamp", path.display(), n + 1))?;
        if !seconds.is_finite() || seconds < 0.0 {
            bail!("{}:{}: timestamp must be non-negative", path.display(), n + 1);
        }
        let location = parse_location(position)
            .map_err(|err| anyhow::anyhow!("{}:{}: {}", path.display(), n + 1, err))?;
        fixes.push((Duration::from_secs_f64(seconds), location));
    }
    Ok(fixes)
}
