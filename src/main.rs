use std::env;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use trafficai::{
    build_recommendation_prompt, build_route_url, CompletionClient, Coordinate, History,
    PipelineConfig, RouteQuery, RouteResult, RoutingClient, TrafficObservation,
};

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn parse_coordinate(raw: &str) -> Result<Coordinate> {
    let (lat, lon) = raw
        .split_once(',')
        .with_context(|| format!("Expected 'latitude,longitude', got '{raw}'"))?;

    let latitude = lat
        .trim()
        .parse()
        .with_context(|| format!("Invalid latitude '{lat}'"))?;
    let longitude = lon
        .trim()
        .parse()
        .with_context(|| format!("Invalid longitude '{lon}'"))?;

    Ok(Coordinate::new(latitude, longitude))
}

async fn run_recommend(config: &PipelineConfig, congestion: i32, accidents: i32) -> Result<()> {
    let observation = TrafficObservation::new(congestion, accidents);
    let prompt = build_recommendation_prompt(&observation)?;

    let client = CompletionClient::new(config)?;
    let recommendation = client.fetch_recommendation(&prompt).await?;

    println!("Recommendation: {recommendation}");

    let mut history = History::new();
    history.record(observation, recommendation);
    println!("Recorded {} request(s) this session", history.len());

    Ok(())
}

async fn run_route(config: &PipelineConfig, start: Coordinate, end: Coordinate) -> Result<()> {
    let query = RouteQuery::new(start, end);
    let url = build_route_url(&config.routing.base_url, &query)?;

    let client = RoutingClient::new(config)?;
    let result = client.fetch_route(&url).await?;

    match &result {
        RouteResult::Route(points) => {
            println!("Route found with {} points", points.len());
            if let Some(length) = result.path_length_km() {
                println!("Path length: {length:.2} km");
            }
        }
        RouteResult::NoRoute => {
            println!(
                "No route found between {} and {}",
                start.format_coordinates(),
                end.format_coordinates()
            );
        }
    }

    Ok(())
}

fn print_usage() {
    println!("TrafficAI - route retrieval and incident recommendation pipeline");
    println!();
    println!("Usage:");
    println!("  trafficai recommend <congestion-percent> <accidents-reported>");
    println!("  trafficai route <start-lat,start-lon> <end-lat,end-lon>");
    println!();
    println!("The completion credential is read from completion.api_key in the");
    println!("config file or the OPENAI_API_KEY environment variable.");
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = PipelineConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.logging.level);

    let args: Vec<String> = env::args().skip(1).collect();

    match args.as_slice() {
        [command, congestion, accidents] if command == "recommend" => {
            let congestion = congestion
                .parse()
                .with_context(|| format!("Invalid congestion value '{congestion}'"))?;
            let accidents = accidents
                .parse()
                .with_context(|| format!("Invalid accidents value '{accidents}'"))?;

            run_recommend(&config, congestion, accidents).await
        }
        [command, start, end] if command == "route" => {
            let start = parse_coordinate(start)?;
            let end = parse_coordinate(end)?;

            run_route(&config, start, end).await
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}
