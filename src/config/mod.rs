//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroU32, path::PathBuf, str::FromStr, time::Duration};

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

use crate::domain::types::{CommentStatus, PublishState, ResourceKind};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "quillboard";
const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 200;

/// Command-line arguments for the quillboard binary.
#[derive(Debug, Parser)]
#[command(name = "quillboard", version, about = "Headless admin console for the publishing platform")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "QUILLBOARD_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Base URL of the platform API.
    #[arg(long = "site", env = "QUILLBOARD_SITE_URL", value_name = "URL")]
    pub site: Option<String>,

    /// Path to a file holding the API key.
    #[arg(long = "key-file", env = "QUILLBOARD_API_KEY_FILE", value_name = "PATH")]
    pub key_file: Option<PathBuf>,

    /// API key value; prefer --key-file outside of scripts.
    #[arg(long = "api-key", env = "QUILLBOARD_API_KEY", value_name = "KEY", hide = true)]
    pub api_key: Option<String>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the per-request timeout.
    #[arg(long = "api-timeout-seconds", value_name = "SECONDS")]
    pub api_timeout_seconds: Option<u64>,

    /// Override the listing page size.
    #[arg(long = "page-size", value_name = "COUNT")]
    pub page_size: Option<u32>,

    /// Override the search debounce window.
    #[arg(long = "search-debounce-ms", value_name = "MS")]
    pub search_debounce_ms: Option<u64>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Browse a resource interactively.
    Browse(BrowseArgs),
    /// Probe the API and report round-trip latency.
    Health,
    /// Show recent posts, content totals, and API health in one report.
    Dashboard,
    /// Post administration.
    Posts(PostsArgs),
    /// Category administration.
    Categories(CategoriesArgs),
    /// Tag administration.
    Tags(TagsArgs),
    /// Comment moderation.
    Comments(CommentsArgs),
    /// Contact message inbox.
    Messages(MessagesArgs),
    /// Project administration.
    Projects(ProjectsArgs),
    /// Quote administration.
    Quotes(QuotesArgs),
    /// Blog settings.
    Settings(SettingsArgs),
}

/// Shared listing flags: one-shot `list` subcommands take a fixed query
/// instead of the interactive controls `browse` offers.
#[derive(Debug, Args, Default, Clone)]
pub struct ListArgs {
    /// Page to fetch (1-based).
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Search text forwarded to the server.
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct BrowseArgs {
    /// Resource to browse.
    #[arg(value_enum)]
    pub resource: ResourceKind,
}

#[derive(Debug, Args, Clone)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub command: PostsCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum PostsCommand {
    /// List posts.
    List {
        #[command(flatten)]
        query: ListArgs,
        /// Filter by publish state.
        #[arg(long, value_enum, default_value_t = PublishState::All)]
        state: PublishState,
    },
    /// Show one post.
    Get { id: String },
    /// Create a post.
    Create {
        #[arg(long)]
        title: String,
        /// Markdown body; reads stdin when omitted.
        #[arg(long)]
        body: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue)]
        publish: bool,
    },
    /// Update a post.
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        body: Option<String>,
        #[arg(long, value_parser = BoolishValueParser::new())]
        published: Option<bool>,
    },
    /// Delete a post.
    Delete { id: String },
}

#[derive(Debug, Args, Clone)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: CategoriesCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum CategoriesCommand {
    /// List categories.
    List {
        #[command(flatten)]
        query: ListArgs,
    },
    /// Create a category.
    Create { name: String },
    /// Rename a category.
    Rename { id: String, name: String },
    /// Delete a category.
    Delete { id: String },
}

#[derive(Debug, Args, Clone)]
pub struct TagsArgs {
    #[command(subcommand)]
    pub command: TagsCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum TagsCommand {
    /// List tags.
    List {
        #[command(flatten)]
        query: ListArgs,
    },
    /// Create a tag.
    Create { name: String },
    /// Rename a tag.
    Rename { id: String, name: String },
    /// Delete a tag.
    Delete { id: String },
}

#[derive(Debug, Args, Clone)]
pub struct CommentsArgs {
    #[command(subcommand)]
    pub command: CommentsCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum CommentsCommand {
    /// List comments.
    List {
        #[command(flatten)]
        query: ListArgs,
        /// Filter by moderation status.
        #[arg(long, value_enum, default_value_t = CommentStatus::All)]
        status: CommentStatus,
    },
    /// Approve a comment.
    Approve { id: String },
    /// Revoke approval of a comment.
    Reject { id: String },
    /// Delete a comment.
    Delete { id: String },
}

#[derive(Debug, Args, Clone)]
pub struct MessagesArgs {
    #[command(subcommand)]
    pub command: MessagesCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum MessagesCommand {
    /// List contact messages.
    List {
        #[command(flatten)]
        query: ListArgs,
    },
    /// Mark a message as read.
    Read { id: String },
    /// Mark a message as unread.
    Unread { id: String },
    /// Show the unread message count.
    #[command(name = "unread-count")]
    UnreadCount,
    /// Delete a message.
    Delete { id: String },
}

#[derive(Debug, Args, Clone)]
pub struct ProjectsArgs {
    #[command(subcommand)]
    pub command: ProjectsCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum ProjectsCommand {
    /// List projects.
    List {
        #[command(flatten)]
        query: ListArgs,
    },
    /// Show one project.
    Get { id: String },
    /// Create a project.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue)]
        publish: bool,
    },
    /// Delete a project.
    Delete { id: String },
}

#[derive(Debug, Args, Clone)]
pub struct QuotesArgs {
    #[command(subcommand)]
    pub command: QuotesCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum QuotesCommand {
    /// List quotes.
    List {
        #[command(flatten)]
        query: ListArgs,
    },
    /// Create a quote.
    Create {
        content: String,
        #[arg(long)]
        author: Option<String>,
    },
    /// Delete a quote.
    Delete { id: String },
}

#[derive(Debug, Args, Clone)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub command: SettingsCommand,
}

#[derive(Debug, Subcommand, Clone)]
pub enum SettingsCommand {
    /// Show the current blog settings.
    Get,
    /// Update blog settings; only the given fields change.
    Update {
        /// Blog name.
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        tagline: Option<String>,
        #[arg(long = "logo-url", value_name = "URL")]
        logo_url: Option<String>,
        #[arg(long)]
        theme: Option<String>,
        #[arg(long = "posts-per-page", value_name = "COUNT")]
        posts_per_page: Option<u32>,
        #[arg(long = "seo-title")]
        seo_title: Option<String>,
        #[arg(long = "seo-description")]
        seo_description: Option<String>,
    },
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub list: ListSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: Url,
    pub key: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct ListSettings {
    pub page_size: NonZeroU32,
    pub search_debounce: Duration,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
    #[error("failed to read API key file `{path}`: {source}")]
    KeyFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("QUILLBOARD").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides)?;

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    logging: RawLoggingSettings,
    list: RawListSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    url: Option<String>,
    key: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawListSettings {
    page_size: Option<u32>,
    search_debounce_ms: Option<u64>,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &GlobalOverrides) -> Result<(), LoadError> {
        if let Some(site) = overrides.site.as_ref() {
            self.api.url = Some(site.clone());
        }
        if let Some(path) = overrides.key_file.as_ref() {
            let contents = std::fs::read_to_string(path).map_err(|source| LoadError::KeyFile {
                path: path.clone(),
                source,
            })?;
            self.api.key = Some(contents.trim().to_string());
        }
        if let Some(key) = overrides.api_key.as_ref() {
            self.api.key = Some(key.clone());
        }
        if let Some(seconds) = overrides.api_timeout_seconds {
            self.api.timeout_seconds = Some(seconds);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(size) = overrides.page_size {
            self.list.page_size = Some(size);
        }
        if let Some(ms) = overrides.search_debounce_ms {
            self.list.search_debounce_ms = Some(ms);
        }
        Ok(())
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings { api, logging, list } = raw;

        Ok(Self {
            api: build_api_settings(api)?,
            logging: build_logging_settings(logging)?,
            list: build_list_settings(list)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let url = api.url.ok_or_else(|| {
        LoadError::invalid(
            "api.url",
            "must be set (use --site or QUILLBOARD_SITE_URL)",
        )
    })?;
    let base_url = Url::parse(&url)
        .map_err(|err| LoadError::invalid("api.url", format!("failed to parse: {err}")))?;

    let key = api.key.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });

    let timeout_seconds = api.timeout_seconds.unwrap_or(DEFAULT_API_TIMEOUT_SECS);
    if timeout_seconds == 0 {
        return Err(LoadError::invalid(
            "api.timeout_seconds",
            "must be greater than zero",
        ));
    }

    Ok(ApiSettings {
        base_url,
        key,
        timeout: Duration::from_secs(timeout_seconds),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_list_settings(list: RawListSettings) -> Result<ListSettings, LoadError> {
    let page_size = list.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    let page_size = NonZeroU32::new(page_size)
        .ok_or_else(|| LoadError::invalid("list.page_size", "must be greater than zero"))?;

    let debounce_ms = list
        .search_debounce_ms
        .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS);

    Ok(ListSettings {
        page_size,
        search_debounce: Duration::from_millis(debounce_ms),
    })
}
