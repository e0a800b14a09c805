//! `ghostfeed`: post one persona-voiced reaction to a trending topic.
//!
//! Meant to be invoked periodically by an external scheduler. Each invocation
//! fetches trends, writes exactly one post and prepends it to the JSON feed.
//!
//! # Usage
//!
//! ```
//! GEMINI_API_KEY=... ghostfeed
//! ghostfeed --config ghostfeed.toml --feed docs/data.json
//! ghostfeed --dry-run
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use ghostfeed_cli::{Pipeline, RunReport, Settings};
use ghostfeed_core::{PostFactory, persona, random::RngSource};
use ghostfeed_gen::PersonaWriter;
use ghostfeed_store_json::JsonFeedStore;
use ghostfeed_trends::RssTrendSource;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Generate one synthetic post and prepend it to the feed")]
struct Cli {
  /// Path to the TOML configuration file. Optional.
  #[arg(short, long, default_value = "ghostfeed.toml")]
  config: PathBuf,

  /// Feed file to update; overrides `feed_path` from the configuration.
  #[arg(long, value_name = "FILE")]
  feed: Option<PathBuf>,

  /// Build and print a post without loading or saving the feed.
  #[arg(long)]
  dry_run: bool,

  /// List the persona catalog and exit.
  #[arg(long)]
  personas: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  if cli.personas {
    for p in persona::all() {
      println!(
        "{:<16} {:<15} {:<14} {}",
        p.identity, p.display_name, p.color_tag, p.trait_description
      );
    }
    return Ok(());
  }

  // Load configuration.
  let mut settings = Settings::load(&cli.config).context("failed to read configuration")?;
  if let Some(feed) = cli.feed {
    settings.feed_path = feed;
  }

  let trends = RssTrendSource::new(settings.trends.clone())
    .context("failed to build trend feed client")?;
  let writer = PersonaWriter::gemini(&settings.generation)
    .context("failed to build generation client")?;
  let factory = PostFactory::new(writer).with_reply_probability(settings.reply_probability);
  let store = JsonFeedStore::new(&settings.feed_path);

  let pipeline = Pipeline::new(trends, factory, store);
  let mut rng = RngSource::os();

  let report = if cli.dry_run {
    pipeline.draft(&mut rng).await?
  } else {
    pipeline.run(&mut rng).await?
  };

  print_preview(&report);
  Ok(())
}

fn print_preview(report: &RunReport) {
  let rule = "=".repeat(50);
  println!();
  println!("{rule}");
  match report.feed_len {
    Some(n) => println!("Generation complete ({n} posts in feed)"),
    None => println!("Dry run, feed not modified"),
  }
  println!("{rule}");
  println!();
  println!("New post preview:");
  println!("@{}: {}", report.post.persona_display_name(), report.post.text());
  if report.topics_fallback || report.text_fallback {
    println!("(fallback used: topics={}, text={})", report.topics_fallback, report.text_fallback);
  }
  println!();
}
