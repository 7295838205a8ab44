// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_docview::cache::PageCache;
use notion_docview::formatting::databases::render_markdown;
use notion_docview::{
    AppError, ChainResolver, Clock, CommandLineInput, DocumentRenderer, HierarchyCache,
    HierarchyNode, HierarchyProvider, NotionHttpClient, NotionId, NotionRepository,
    RenderedDocument, SystemClock, ViewerCommand, ViewerConfig,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}";

/// Sets up logging: everything to the log file, warnings (or everything when
/// verbose) to stderr.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let console_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion-docview.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let console_pattern = if verbose { LOG_PATTERN } else { "{m}{n}" };
    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(console_pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(console_level)))
                .build("stderr", Box::new(stderr_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Shared handles for one CLI invocation.
struct Viewer {
    config: ViewerConfig,
    repository: Arc<dyn NotionRepository>,
    clock: Arc<dyn Clock>,
}

impl Viewer {
    fn new(config: ViewerConfig) -> Result<Self, AppError> {
        let client = NotionHttpClient::new(config.api_key.as_ref())?;
        if !client.is_configured() {
            log::warn!("NOTION_API_KEY is not set; only cached content is available");
        }
        Ok(Self {
            config,
            repository: Arc::new(client),
            clock: Arc::new(SystemClock),
        })
    }

    async fn run(&self) -> anyhow::Result<()> {
        match &self.config.command {
            ViewerCommand::Render {
                id,
                output,
                json,
                refresh,
            } => self.render(id, output.as_deref(), *json, *refresh).await,
            ViewerCommand::Tree { id, depth } => self.tree(id.as_ref(), *depth).await,
            ViewerCommand::Locate { id } => self.locate(id).await,
            ViewerCommand::ClearCache => self.clear_cache().await,
        }
    }

    async fn render(
        &self,
        id: &NotionId,
        output: Option<&Path>,
        json: bool,
        refresh: bool,
    ) -> anyhow::Result<()> {
        let mut renderer = DocumentRenderer::new(self.repository.clone());
        if self.config.use_cache {
            let cache = PageCache::open(
                self.config.pages_dir(),
                self.config.cache_ttl_days,
                self.clock.clone(),
            )
            .await?;
            renderer = renderer.with_cache(Arc::new(cache));
        }

        let document = if refresh {
            renderer.render_fresh(id).await?
        } else {
            renderer.render(id).await?
        };

        let text = if json {
            serde_json::to_string_pretty(&document)?
        } else {
            document_markdown(&document)
        };

        match output {
            Some(path) => {
                fs::write(path, &text)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                println!("✓ Saved '{}' to {}", document.title, path.display());
            }
            None => print!("{}", text),
        }
        Ok(())
    }

    async fn tree(&self, id: Option<&NotionId>, depth: usize) -> anyhow::Result<()> {
        let provider = self.provider().await?;
        let start = match id {
            Some(id) => provider
                .node(id)
                .await?
                .ok_or_else(|| AppError::KindMismatch { id: id.to_string() })?,
            None => provider.root_node().await?,
        };

        // Depth-first, children pushed in reverse to keep their order.
        let mut stack = vec![(start, 0usize)];
        while let Some((node, level)) = stack.pop() {
            println!("{}{}", "  ".repeat(level), node);
            if level < depth {
                let children = provider.get_children(Some(&node)).await?;
                stack.extend(children.into_iter().rev().map(|child| (child, level + 1)));
            }
        }
        Ok(())
    }

    async fn locate(&self, id: &NotionId) -> anyhow::Result<()> {
        let provider = self.provider().await?;
        match provider.locate(id).await? {
            Some(chain) => print_chain(&chain),
            None => eprintln!(
                "{} is not reachable from root {}",
                id,
                provider.root_id()
            ),
        }
        Ok(())
    }

    async fn clear_cache(&self) -> anyhow::Result<()> {
        let hierarchy = self.hierarchy_cache().await?;
        hierarchy.clear_all().await;

        let pages = PageCache::open(
            self.config.pages_dir(),
            self.config.cache_ttl_days,
            self.clock.clone(),
        )
        .await?;
        pages.clear().await;

        println!("✓ Cleared caches under {}", self.config.cache_root.display());
        Ok(())
    }

    async fn hierarchy_cache(&self) -> Result<HierarchyCache, AppError> {
        if self.config.use_cache {
            HierarchyCache::open(
                self.repository.clone(),
                self.config.hierarchy_dir(),
                self.config.cache_ttl_days,
                self.clock.clone(),
            )
            .await
        } else {
            Ok(HierarchyCache::in_memory(self.repository.clone()))
        }
    }

    async fn provider(&self) -> Result<HierarchyProvider, AppError> {
        let root = self.config.require_root()?.clone();
        let cache = Arc::new(self.hierarchy_cache().await?);
        let resolver = Arc::new(ChainResolver::new(self.repository.clone()));
        Ok(HierarchyProvider::new(cache, resolver, root))
    }
}

/// A rendered document as a standalone Markdown file.
fn document_markdown(document: &RenderedDocument) -> String {
    let mut out = format!("# {}\n\n", document.title);
    match &document.table_data {
        Some(table) => {
            if !document.markdown.is_empty() {
                out.push_str(&document.markdown);
                out.push_str("\n\n");
            }
            out.push_str(&render_markdown(table));
            out.push('\n');
        }
        None => out.push_str(&document.markdown),
    }
    out
}

fn print_chain(chain: &[HierarchyNode]) {
    for (level, node) in chain.iter().enumerate() {
        let marker = if level == 0 { "" } else { "└─ " };
        println!("{}{}{}", "   ".repeat(level.saturating_sub(1)), marker, node);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = ViewerConfig::resolve(cli)?;
    let viewer = Viewer::new(config)?;

    if let Err(e) = viewer.run().await {
        if let Some(AppError::NotConfigured(reason)) = e.downcast_ref::<AppError>() {
            eprintln!("Notion is not configured: {}", reason);
            eprintln!("Set NOTION_API_KEY to an integration token and try again.");
            std::process::exit(2);
        }
        return Err(e);
    }

    Ok(())
}
