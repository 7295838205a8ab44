// src/config.rs
use crate::cache::default_cache_dir;
use crate::constants::DEFAULT_CACHE_TTL_DAYS;
use crate::error::AppError;
use crate::types::{ApiKey, NotionId, ValidationError};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

const API_KEY_VAR: &str = "NOTION_API_KEY";
const ROOT_ID_VAR: &str = "NOTION_ROOT_ID";
const CACHE_TTL_VAR: &str = "NOTION_DOCVIEW_CACHE_TTL_DAYS";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Page or database the tree starts from (URL or ID; falls back to NOTION_ROOT_ID)
    #[arg(long, global = true)]
    pub root: Option<String>,

    /// Days a cached entry stays fresh after its last read (0 = never expires)
    #[arg(long, global = true)]
    pub cache_ttl_days: Option<u64>,

    /// Cache root directory (defaults to $XDG_CACHE_HOME/notion-docview)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Disable the disk caches (always fetch fresh data)
    #[arg(long, global = true, default_value_t = false)]
    pub no_cache: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a page or database to Markdown
    Render {
        /// Notion page/database URL or ID
        id: String,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit the full render result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Ignore the cached render and rewrite it
        #[arg(long, default_value_t = false)]
        refresh: bool,
    },
    /// Print the hierarchy below a node (default: the root)
    Tree {
        id: Option<String>,

        /// Levels to expand
        #[arg(long, default_value_t = 2)]
        depth: usize,
    },
    /// Print the path from the root down to a node
    Locate { id: String },
    /// Manage the disk caches
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheAction {
    /// Remove every cached hierarchy list and rendered document
    Clear,
}

/// What to do, with ids already validated.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    Render {
        id: NotionId,
        output: Option<PathBuf>,
        json: bool,
        refresh: bool,
    },
    Tree {
        id: Option<NotionId>,
        depth: usize,
    },
    Locate {
        id: NotionId,
    },
    ClearCache,
}

/// Resolved viewer configuration.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// `None` leaves the client unconfigured; origin calls then fail.
    pub api_key: Option<ApiKey>,
    pub root: Option<NotionId>,
    pub cache_ttl_days: u64,
    pub cache_root: PathBuf,
    pub use_cache: bool,
    pub verbose: bool,
    pub command: ViewerCommand,
}

impl ViewerConfig {
    /// Resolves configuration from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Like [`resolve`](Self::resolve), reading variables through `env`.
    pub fn resolve_with(
        cli: CommandLineInput,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        let env = |name: &str| env(name).filter(|value| !value.trim().is_empty());

        let api_key = env(API_KEY_VAR).map(ApiKey::new).transpose()?;

        let root = match cli.root.or_else(|| env(ROOT_ID_VAR)) {
            Some(raw) => Some(NotionId::parse(&raw)?),
            None => None,
        };

        let cache_ttl_days = match cli.cache_ttl_days {
            Some(days) => days,
            None => match env(CACHE_TTL_VAR) {
                Some(raw) => raw.trim().parse::<u64>().map_err(|_| ValidationError::InvalidSetting {
                    name: CACHE_TTL_VAR,
                    value: raw.clone(),
                })?,
                None => DEFAULT_CACHE_TTL_DAYS,
            },
        };

        let command = match cli.command {
            Command::Render {
                id,
                output,
                json,
                refresh,
            } => ViewerCommand::Render {
                id: NotionId::parse(&id)?,
                output,
                json,
                refresh,
            },
            Command::Tree { id, depth } => ViewerCommand::Tree {
                id: id.as_deref().map(NotionId::parse).transpose()?,
                depth,
            },
            Command::Locate { id } => ViewerCommand::Locate {
                id: NotionId::parse(&id)?,
            },
            Command::Cache {
                action: CacheAction::Clear,
            } => ViewerCommand::ClearCache,
        };

        Ok(Self {
            api_key,
            root,
            cache_ttl_days,
            cache_root: cli.cache_dir.unwrap_or_else(default_cache_dir),
            use_cache: !cli.no_cache,
            verbose: cli.verbose,
            command,
        })
    }

    /// The configured root, required by the hierarchy commands.
    pub fn require_root(&self) -> Result<&NotionId, AppError> {
        self.root
            .as_ref()
            .ok_or(AppError::Validation(ValidationError::EmptyField(
                "root id (--root or NOTION_ROOT_ID)",
            )))
    }

    pub fn hierarchy_dir(&self) -> PathBuf {
        self.cache_root.join("hierarchy")
    }

    pub fn pages_dir(&self) -> PathBuf {
        self.cache_root.join("pages")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const ROOT: &str = "0123456789abcdef0123456789abcdef";

    fn resolve(args: &[&str], vars: &[(&str, &str)]) -> Result<ViewerConfig, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let cli = CommandLineInput::try_parse_from(
            std::iter::once("notion-docview").chain(args.iter().copied()),
        )
        .unwrap();
        ViewerConfig::resolve_with(cli, |name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = resolve(&["render", ROOT], &[]).unwrap();
        assert!(config.api_key.is_none());
        assert!(config.root.is_none());
        assert_eq!(config.cache_ttl_days, DEFAULT_CACHE_TTL_DAYS);
        assert!(config.use_cache);
        assert!(config.require_root().is_err());
        assert!(matches!(config.command, ViewerCommand::Render { json: false, .. }));
    }

    #[test]
    fn test_environment_fills_gaps_and_flags_win() {
        let config = resolve(
            &["--cache-ttl-days", "0", "--cache-dir", "/tmp/docview", "tree"],
            &[
                (API_KEY_VAR, "secret_abcdefghijklmnopqrstuvwxyz"),
                (ROOT_ID_VAR, ROOT),
                (CACHE_TTL_VAR, "30"),
            ],
        )
        .unwrap();

        assert!(config.api_key.is_some());
        assert_eq!(config.require_root().unwrap().as_str(), ROOT);
        assert_eq!(config.cache_ttl_days, 0);
        assert_eq!(config.pages_dir(), PathBuf::from("/tmp/docview/pages"));
        assert_eq!(config.command, ViewerCommand::Tree { id: None, depth: 2 });
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        assert!(resolve(&["locate", "not-an-id"], &[]).is_err());
        assert!(resolve(&["cache", "clear"], &[(CACHE_TTL_VAR, "soon")]).is_err());
        assert!(resolve(&["cache", "clear"], &[(API_KEY_VAR, "bogus")]).is_err());
    }
}
