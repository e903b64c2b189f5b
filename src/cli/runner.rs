//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::PagerConfig;
use crate::error::Result;
use crate::http::HttpFetcher;
use crate::listing::ListingItem;
use crate::pagination::{Fetch, ListingGenerator};
use crate::types::{JsonValue, RequestParams};
use std::io::{self, Write};
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Fetch {
                path,
                limit,
                all,
                params,
                format,
            } => self.fetch(path, *limit, *all, params, *format),
        }
    }

    /// Load the config file, then apply command-line overrides
    fn load_config(&self) -> Result<PagerConfig> {
        let mut config = match &self.cli.config {
            Some(path) => PagerConfig::load(path)?,
            None => PagerConfig::default(),
        };

        if let Some(base_url) = &self.cli.base_url {
            config.base_url.clone_from(base_url);
            config.validate()?;
        }

        Ok(config)
    }

    fn fetch(
        &self,
        path: &str,
        limit: Option<usize>,
        all: bool,
        params: &[String],
        format: OutputFormat,
    ) -> Result<()> {
        let config = self.load_config()?;
        let params = parse_params(params)?;

        let fetcher = HttpFetcher::new(config.http_config())?;
        let mut generator = build_generator(&config, fetcher, path, params, limit, all);

        info!(
            "Paging {} (limit: {:?}, page size: {:?})",
            path,
            generator.limit(),
            generator.params().limit()
        );

        let stdout = io::stdout();
        let mut out = stdout.lock();
        for item in &mut generator {
            writeln!(out, "{}", render_item(&item?, format)?)?;
        }
        out.flush()?;

        info!(
            "Fetched {} items in {} pages",
            generator.yielded(),
            generator.pages_fetched()
        );
        Ok(())
    }
}

/// Assemble the generator for one `fetch` invocation
fn build_generator<F: Fetch>(
    config: &PagerConfig,
    fetcher: F,
    path: &str,
    params: RequestParams,
    limit: Option<usize>,
    all: bool,
) -> ListingGenerator<F> {
    // Replacing the params drops `limit`; the generator re-derives it
    let generator = config.generator(fetcher, path).with_params(params);
    if all {
        generator.with_limit(None)
    } else if limit.is_some() {
        generator.with_limit(limit)
    } else {
        generator
    }
}

/// Build request parameters from `key=value` arguments
fn parse_params(pairs: &[String]) -> Result<RequestParams> {
    pairs
        .iter()
        .map(|pair| RequestParams::parse_pair(pair))
        .collect::<Result<Vec<_>>>()
        .map(|pairs| pairs.into_iter().collect())
}

/// Render one item for output
fn render_item(item: &ListingItem, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(item)?),
        OutputFormat::Pretty => Ok(match item {
            ListingItem::Thing(thing) => {
                let summary = ["title", "body", "display_name"]
                    .iter()
                    .find_map(|key| thing.data.get(*key).and_then(JsonValue::as_str))
                    .unwrap_or_default();
                format!(
                    "{} {}",
                    thing.fullname().unwrap_or(thing.kind.as_str()),
                    summary.lines().next().unwrap_or_default()
                )
            }
            ListingItem::Flair(entry) => format!(
                "{}: {}",
                entry.user,
                entry.flair_text.as_deref().unwrap_or("-")
            ),
        }),
    }
}
