use anyhow::{Context, Result};
use arxiv_mcp::config::{find_config_file, load_config, Config};
use arxiv_mcp::mcp::{listen_addr, McpServer};
use arxiv_mcp::models::SearchCriteria;
use arxiv_mcp::sources::{ArxivApi, ArxivClient};
use arxiv_mcp::taxonomy::{scrape_taxonomy, taxonomy};
use arxiv_mcp::utils::HttpClient;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// arXiv MCP - Search the arXiv catalog from MCP clients
#[derive(Parser, Debug)]
#[command(name = "arxiv-mcp")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "MCP server for searching papers on arXiv", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the MCP server (streamable HTTP unless --stdio is given)
    Serve {
        /// Serve over stdio (for MCP clients like Claude Desktop)
        #[arg(long)]
        stdio: bool,

        /// Host to bind to for HTTP mode
        #[arg(long)]
        host: Option<String>,

        /// Port for HTTP mode (defaults to $PORT or 8888)
        #[arg(long, short)]
        port: Option<u16>,
    },

    /// Search arXiv and print the results as JSON
    #[command(alias = "s")]
    Search(SearchArgs),

    /// List category tags from the embedded taxonomy
    #[command(alias = "cats")]
    Categories {
        /// Only show fields whose title contains this text
        #[arg(long)]
        field: Option<String>,
    },

    /// Download the arXiv category page and regenerate the taxonomy JSON
    ScrapeTaxonomy {
        /// Output file
        #[arg(default_value = "arxiv-taxonomy.json")]
        output: PathBuf,
    },
}

#[derive(clap::Args, Debug, Default)]
struct SearchArgs {
    /// Title text
    #[arg(long)]
    title: Option<String>,

    /// Author name
    #[arg(long, short)]
    author: Option<String>,

    /// Abstract text
    #[arg(long = "abstract")]
    abstract_text: Option<String>,

    /// Subject category tag (e.g. cs.AI)
    #[arg(long, short)]
    category: Option<String>,

    /// Submitted on or after this date (YYYY-MM-DD)
    #[arg(long)]
    since: Option<String>,

    /// Submitted before this date (YYYY-MM-DD)
    #[arg(long)]
    before: Option<String>,

    /// Submitted within this window ending now (e.g. "7 days", "3 months")
    #[arg(long)]
    relative: Option<String>,

    /// Text matched against all fields
    #[arg(long)]
    all: Option<String>,

    /// arXiv identifiers to fetch (comma-separated or repeated)
    #[arg(long = "id", value_delimiter = ',')]
    ids: Vec<String>,

    /// Maximum number of results
    #[arg(long, short)]
    max: Option<u32>,

    /// Fields to return (comma-separated); all when omitted
    #[arg(long, value_delimiter = ',')]
    fields: Vec<String>,
}

impl SearchArgs {
    fn into_criteria(self) -> SearchCriteria {
        let mut criteria = SearchCriteria::new()
            .title(self.title.unwrap_or_default())
            .author(self.author.unwrap_or_default())
            .abstract_text(self.abstract_text.unwrap_or_default())
            .subject_category(self.category.unwrap_or_default())
            .submitted_since(self.since.unwrap_or_default())
            .submitted_before(self.before.unwrap_or_default())
            .submitted_relative(self.relative.unwrap_or_default())
            .all(self.all.unwrap_or_default())
            .id_list(self.ids)
            .return_fields(self.fields);
        if let Some(max) = self.max {
            criteria = criteria.max_results(max);
        }
        criteria
    }
}

fn init_logging(cli: &Cli, config: &Config) {
    let level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => config.logging.level.as_str(),
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("arxiv_mcp={}", level)));

    // stdout carries the stdio transport, so logs always go to stderr
    let (plain, json) = if config.logging.is_json() {
        (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            ),
        )
    } else {
        (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let path = cli.config.clone().or_else(find_config_file);
    let config = load_config(path.as_deref()).with_context(|| match &path {
        Some(path) => format!("loading {}", path.display()),
        None => "loading configuration".to_string(),
    })?;
    Ok(config)
}

async fn serve(config: &Config, stdio: bool, host: Option<String>, port: Option<u16>) -> Result<()> {
    let source: Arc<dyn ArxivApi> = Arc::new(ArxivClient::from_config(&config.arxiv)?);
    let server = McpServer::new(source)?;

    if stdio {
        server.run().await?;
        return Ok(());
    }

    let host = host.unwrap_or_else(|| config.server.host.clone());
    let addr = listen_addr(&host, port.unwrap_or(config.server.port))?;
    let (bound_addr, handle) = server.run_http(addr).await?;
    tracing::info!("MCP server listening on http://{}", bound_addr);

    tokio::select! {
        joined = handle => {
            joined.map_err(|e| anyhow::anyhow!("Server task failed: {}", e))?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;
    init_logging(&cli, &config);

    match cli.command {
        Some(Commands::Serve { stdio, host, port }) => {
            serve(&config, stdio, host, port).await?;
        }

        None => {
            serve(&config, false, None, None).await?;
        }

        Some(Commands::Search(args)) => {
            let criteria = args.into_criteria();
            let client = ArxivClient::from_config(&config.arxiv)?;
            let results = arxiv_mcp::search(&client, &criteria).await?;
            println!("{}", serde_json::to_string_pretty(&results)?);
        }

        Some(Commands::Categories { field }) => {
            let needle = field.map(|f| f.to_lowercase());
            for entry in taxonomy()? {
                if let Some(needle) = &needle {
                    if !entry.title.to_lowercase().contains(needle.as_str()) {
                        continue;
                    }
                }
                println!("{}", entry.title);
                for category in &entry.categories {
                    println!("  {:<20} {}", category.tag, category.label);
                }
            }
        }

        Some(Commands::ScrapeTaxonomy { output }) => {
            let client = HttpClient::with_options(
                &config.arxiv.user_agent,
                Duration::from_secs(config.arxiv.timeout_secs),
            )?;
            let fields = scrape_taxonomy(&client, &output).await?;
            let count: usize = fields.iter().map(|f| f.categories.len()).sum();
            println!(
                "Wrote {} categories in {} fields to {}",
                count,
                fields.len(),
                output.display()
            );
        }
    }

    Ok(())
}
