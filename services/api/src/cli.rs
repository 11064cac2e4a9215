use crate::infra::provider_mode;
use crate::server;
use clap::{Args, Parser, Subcommand};
use jobnews::config::AppConfig;
use jobnews::error::AppError;
use jobnews::provider::HttpProviderClient;
use jobnews::search::{JobSearchRequest, NewsSearchRequest, SearchGateways};
use jobnews::telemetry;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

const MAX_CLI_NEWS_LIMIT: i64 = 500;

#[derive(Parser, Debug)]
#[command(
    name = "jobnews",
    about = "Serve and query the unified job and news search gateway",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run one job search and print the response envelope
    Jobs(JobsArgs),
    /// Run one news search and print the response envelope
    News(NewsArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Directory containing index.html and the static/ assets
    #[arg(long)]
    pub(crate) web_root: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct JobsArgs {
    /// Search keywords, e.g. "rust developer in Berlin"
    query: String,
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = 1)]
    num_pages: u32,
}

#[derive(Args, Debug)]
struct NewsArgs {
    /// Search keywords
    query: String,
    /// Number of articles to request (1-500)
    #[arg(
        long,
        default_value_t = NewsSearchRequest::DEFAULT_LIMIT,
        value_parser = clap::value_parser!(u32).range(1..=MAX_CLI_NEWS_LIMIT)
    )]
    limit: u32,
    /// Provider recency filter such as anytime, 1d, 7d
    #[arg(long, default_value = "anytime")]
    time_published: String,
    #[arg(long, default_value = "US")]
    country: String,
    #[arg(long, default_value = "en")]
    lang: String,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Jobs(args) => run_jobs(args).await,
        Command::News(args) => run_news(args).await,
    }
}

fn one_shot_gateways() -> Result<SearchGateways<HttpProviderClient>, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;

    let client = Arc::new(HttpProviderClient::new()?);
    let gateways = SearchGateways::from_config(&config.providers, client);
    info!(
        jobs = provider_mode(gateways.jobs.is_live()),
        news = provider_mode(gateways.news.is_live()),
        "search providers resolved"
    );
    Ok(gateways)
}

async fn run_jobs(args: JobsArgs) -> Result<(), AppError> {
    let gateways = one_shot_gateways()?;
    let request = JobSearchRequest::new(args.query)
        .with_page(args.page)
        .with_num_pages(args.num_pages);

    print_pretty(&gateways.jobs.search(&request).await)
}

async fn run_news(args: NewsArgs) -> Result<(), AppError> {
    let gateways = one_shot_gateways()?;
    let request = NewsSearchRequest {
        query: args.query,
        limit: args.limit,
        time_published: args.time_published,
        country: args.country,
        lang: args.lang,
    };

    print_pretty(&gateways.news.search(&request).await)
}

fn print_pretty<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::Io(std::io::Error::other(err)))?;
    println!("{rendered}");
    Ok(())
}
