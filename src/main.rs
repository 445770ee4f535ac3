use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use inkphy_scraper::{InkphyScraper, ScraperConfig};

const USAGE: &str = "usage: inkphy-scraper <account> <count> [--root DIR] [--delay SECS] [--headed]";

struct Args {
    account: String,
    count: usize,
    config: ScraperConfig,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut positional = Vec::new();
    let mut config = ScraperConfig::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--headed" => config.headless = false,
            "--root" => {
                let dir = iter.next().context("--root needs a directory")?;
                config.output_root = PathBuf::from(dir);
            }
            "--delay" => {
                let secs = iter.next().context("--delay needs a number of seconds")?;
                let secs: f64 = secs
                    .parse()
                    .with_context(|| format!("invalid --delay value {:?}", secs))?;
                config.page_delay = Duration::try_from_secs_f64(secs)
                    .with_context(|| format!("invalid --delay value {}", secs))?;
            }
            flag if flag.starts_with("--") => bail!("unknown option {}", flag),
            _ => positional.push(arg.clone()),
        }
    }

    let [account, count] = positional.as_slice() else {
        bail!("expected <account> and <count>");
    };
    let count = count
        .parse()
        .with_context(|| format!("invalid post count {:?}", count))?;

    Ok(Args {
        account: account.clone(),
        count,
        config,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{:#}\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    if !args.config.headless {
        info!("Running in headed mode (browser visible)");
    }

    info!("Starting inkphy scraper for {}", args.account);
    let scraper = InkphyScraper::new(args.config)?;
    let report = scraper.scrape(&args.account, args.count).await?;

    info!(
        "Done: {} posts from {} page(s), {} images saved, {} failed. Data saved to {}",
        report.posts,
        report.pages_loaded,
        report.images_saved,
        report.images_failed,
        report.csv_path.display()
    );

    Ok(())
}
