// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Base URL of the public Notion API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// API version sent in the `Notion-Version` header.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Attempts made for a request that fails with a retryable error code.
pub const NOTION_API_MAX_ATTEMPTS: u32 = 3;

/// First backoff delay after a retryable failure, doubled on each attempt.
pub const NOTION_API_INITIAL_BACKOFF_MS: u64 = 500;

/// Upper bound on a single backoff delay.
pub const NOTION_API_MAX_BACKOFF_MS: u64 = 8_000;

/// Public web address of a workspace object, used for links in rendered output.
pub const NOTION_WEB_BASE_URL: &str = "https://www.notion.so";

// ---------------------------------------------------------------------------
// Rendering boundaries
// ---------------------------------------------------------------------------

/// Maximum nesting depth when recursively assembling child blocks.
///
/// Synced blocks and deeply nested toggles can in principle recurse without
/// bound. Content below this depth is dropped with a warning.
pub const BLOCK_MAX_RENDER_DEPTH: usize = 64;

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 128;

/// Marker that opens a deferred inline-table token in assembled markdown.
pub const PLACEHOLDER_PREFIX: &str = "__PLACEHOLDER__";

/// Padding-bottom percentage of embedded frames (16:9).
pub const EMBED_ASPECT_RATIO_PERCENT: &str = "56.25%";

/// Zoom level used for map embeds when the source URL carries none.
pub const MAP_DEFAULT_ZOOM: u8 = 15;

/// Code fence language used when a code block declares none.
pub const CODE_DEFAULT_LANGUAGE: &str = "text";

// ---------------------------------------------------------------------------
// Hierarchy boundaries
// ---------------------------------------------------------------------------

/// Maximum parent hops when climbing from a node towards the root.
///
/// Real workspaces are rarely deeper than a dozen levels; the cap turns
/// malformed parent data into a negative result instead of an endless climb.
pub const MAX_ANCESTOR_HOPS: usize = 32;

/// Default time-to-live of hierarchy and page cache entries, in days.
pub const DEFAULT_CACHE_TTL_DAYS: u64 = 7;

/// Directory name under the user cache root.
pub const CACHE_DIR_NAME: &str = "notion-docview";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
