use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use mdsite::Config;

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Build a static HTML site from a tree of Markdown files")]
#[command(version)]
struct Cli {
    /// Prefix for root-relative links (e.g. "/my-repo/")
    base_path: Option<String>,

    /// Config file
    #[arg(short, long, default_value = "mdsite.toml")]
    config: PathBuf,

    /// Markdown source directory
    #[arg(long)]
    content: Option<PathBuf>,

    /// Static asset directory
    #[arg(long = "static")]
    static_dir: Option<PathBuf>,

    /// Output directory (replaced on every build)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// HTML template file
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(self, mut config: Config) -> Config {
        if let Some(base_path) = self.base_path {
            config.base_path = base_path;
        }
        if let Some(content) = self.content {
            config.content_dir = content;
        }
        if let Some(static_dir) = self.static_dir {
            config.static_dir = static_dir;
        }
        if let Some(output) = self.output {
            config.output_dir = output;
        }
        if let Some(template) = self.template {
            config.template = template;
        }
        if self.verbose {
            config.log_level = "debug".to_string();
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    let config = cli.apply(config);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_target(false)
        .init();

    let report = mdsite::build_site(&config).context("site build failed")?;

    info!(
        output = %config.output_dir.display(),
        pages = report.generated,
        "done"
    );
    if report.failed > 0 {
        warn!(failed = report.failed, "some pages were skipped");
    }
    Ok(())
}
