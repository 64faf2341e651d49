use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use void_download::{
    analytics::LogAnalytics,
    config::SiteConfig,
    effects::{DeviceKind, Viewport},
    page::{DOWNLOAD_BUTTON_ID, Document, HEADER_SELECTOR, Page, REVEAL_SELECTOR, VERSION_ID},
    release::{ReleaseDetails, ReleaseFetcher},
    site::{Event, Site},
};

/// void-download - headless runner for the Void download page
///
/// Loads the latest release the way the download page does and prints what
/// the page would show.
///
/// Examples:
///   void-download status                 # Version label and download link
///   void-download --repo owner/app status --json
///   void-download device "Mozilla/5.0 (Linux; Android 14)"
#[derive(Parser, Debug)]
#[command(author, version = env!("VOID_DOWNLOAD_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; flags and environment variables override it
    #[arg(long = "config", short = 'c', value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// GitHub API URL (defaults to https://api.github.com)
    #[arg(long = "api-url", env = "VOID_API_URL", value_name = "URL", global = true)]
    pub api_url: Option<String>,

    /// Repository publishing the releases
    #[arg(long = "repo", env = "VOID_REPO", value_name = "OWNER/REPO", global = true)]
    pub repo: Option<String>,

    /// Delay before the release request, in milliseconds
    #[arg(long = "delay-ms", env = "VOID_LOADING_DELAY_MS", value_name = "MS", global = true)]
    pub delay_ms: Option<u64>,

    /// Client user agent used for device labeling
    #[arg(long = "user-agent", env = "VOID_USER_AGENT", value_name = "UA", global = true)]
    pub user_agent: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Load the latest release and print the version label and download link
    Status(StatusArgs),

    /// Print how the download button is labeled for a user agent
    Device(DeviceArgs),

    /// Load the page, then replay a scroll and optionally a download click
    Simulate(SimulateArgs),
}

#[derive(clap::Args, Debug)]
pub struct StatusArgs {
    /// Print the final state as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct DeviceArgs {
    /// User agent to classify (defaults to --user-agent)
    #[arg(value_name = "USER_AGENT")]
    pub user_agent: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct SimulateArgs {
    /// Scroll offset in px
    #[arg(long, default_value_t = 0.0)]
    pub scroll: f64,

    /// Viewport height in px
    #[arg(long = "viewport-height", default_value_t = 800.0)]
    pub viewport_height: f64,

    /// Click the download button after loading
    #[arg(long)]
    pub click: bool,
}

impl Cli {
    fn site_config(&self) -> Result<SiteConfig> {
        let mut config = match &self.config {
            Some(path) => SiteConfig::load(path)?,
            None => SiteConfig::default(),
        };
        if let Some(api_url) = &self.api_url {
            config.api_url = api_url.clone();
        }
        if let Some(repo) = &self.repo {
            config.repo = repo.parse()?;
        }
        if let Some(delay) = self.delay_ms {
            config.loading_delay_ms = delay;
        }
        if let Some(ua) = &self.user_agent {
            config.user_agent = Some(ua.clone());
        }
        Ok(config)
    }
}

fn build_site(config: &SiteConfig) -> Result<Site> {
    let provider = Arc::new(config.provider()?);
    let fetcher = ReleaseFetcher::from_config(provider, config).with_analytics(Arc::new(LogAnalytics));
    let mut site = Site::new(Page::landing(), Arc::new(fetcher));
    if let Some(ua) = &config.user_agent {
        site = site.with_user_agent(ua.clone());
    }
    Ok(site)
}

fn print_download_state(doc: &Document) -> Result<()> {
    let version = doc.element(VERSION_ID)?;
    let button = doc.element(DOWNLOAD_BUTTON_ID)?;

    println!("{}", version.text());
    println!("Button: {}", button.text());
    match button.href() {
        Some(href) if !button.is_disabled() => println!("Download: {}", href),
        Some(href) => println!("Download: {} (disabled)", href),
        None => println!("Download: unavailable"),
    }
    Ok(())
}

fn print_release_details(details: &ReleaseDetails) {
    match (&details.name, &details.published_at) {
        (Some(name), Some(date)) => println!("Release: {} (published {})", name, date),
        (Some(name), None) => println!("Release: {}", name),
        (None, Some(date)) => println!("Published: {}", date),
        (None, None) => {}
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    let config = cli.site_config()?;

    match cli.command {
        Commands::Status(args) => {
            let mut site = build_site(&config)?;
            let state = site.ready().await;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&state)?);
            } else {
                site.page().read(print_download_state)?;
                if let Some(details) = state.details() {
                    print_release_details(details);
                }
            }
        }
        Commands::Device(args) => {
            let ua = args
                .user_agent
                .or(config.user_agent)
                .context("No user agent given; pass one or set --user-agent")?;
            let kind = DeviceKind::detect(&ua);
            match kind.labeling() {
                Some(labeling) => println!(
                    "{}: \"{}\" ({})",
                    kind,
                    labeling.label,
                    if labeling.enabled { "enabled" } else { "disabled" }
                ),
                None => println!("{}: unchanged", kind),
            }
        }
        Commands::Simulate(args) => {
            let mut site = build_site(&config)?;
            site.ready().await;
            site.dispatch(Event::Scroll { y: args.scroll })?;
            site.dispatch(Event::Viewport(Viewport {
                scroll_y: args.scroll,
                height: args.viewport_height,
            }))?;

            site.page().read(|doc| -> Result<()> {
                print_download_state(doc)?;
                let header = doc.query(HEADER_SELECTOR)?;
                println!(
                    "Header: {}",
                    doc.get(header).style("transform").unwrap_or("none")
                );
                let blocks = doc.query_all(REVEAL_SELECTOR)?;
                let shown = blocks
                    .iter()
                    .filter(|&&id| doc.get(id).style("opacity") == Some("1"))
                    .count();
                println!("Revealed: {}/{}", shown, blocks.len());
                Ok(())
            })?;

            if args.click {
                let button = site.page().read(|doc| doc.find_by_id(DOWNLOAD_BUTTON_ID));
                if let Some(button) = button {
                    site.dispatch(Event::Click(button))?;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_status_parsing() {
        let cli = Cli::try_parse_from(["void-download", "status", "--json"]).unwrap();
        match cli.command {
            Commands::Status(args) => assert!(args.json),
            _ => panic!("Expected Status command"),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::try_parse_from([
            "void-download",
            "--repo",
            "someone/app",
            "--api-url",
            "http://localhost:1",
            "--delay-ms",
            "0",
            "status",
        ])
        .unwrap();

        let config = cli.site_config().unwrap();
        assert_eq!(config.repo.to_string(), "someone/app");
        assert_eq!(config.api_url, "http://localhost:1");
        assert_eq!(config.loading_delay_ms, 0);
    }

    #[test]
    fn test_cli_invalid_repo() {
        let cli = Cli::try_parse_from(["void-download", "--repo", "nope", "status"]).unwrap();
        assert!(cli.site_config().is_err());
    }

    #[test]
    fn test_cli_device_parsing() {
        let cli = Cli::try_parse_from(["void-download", "device", "Android"]).unwrap();
        match cli.command {
            Commands::Device(args) => assert_eq!(args.user_agent.as_deref(), Some("Android")),
            _ => panic!("Expected Device command"),
        }
    }

    #[test]
    fn test_cli_simulate_defaults() {
        let cli = Cli::try_parse_from(["void-download", "simulate"]).unwrap();
        match cli.command {
            Commands::Simulate(args) => {
                assert_eq!(args.scroll, 0.0);
                assert_eq!(args.viewport_height, 800.0);
                assert!(!args.click);
            }
            _ => panic!("Expected Simulate command"),
        }
    }

    #[test]
    fn test_cli_no_subcommand_fails() {
        assert!(Cli::try_parse_from(["void-download"]).is_err());
    }
}
