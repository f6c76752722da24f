//! AssetPathResolver - maps a photo filename to the URL the page should load.
//!
//! Three branches:
//! 1. Local file context: `<local_dir>/<filename>`, extension preserved.
//! 2. Production host: `https://<host>/<widget_path>/<remote_dir>/<name>.jpeg`.
//! 3. Anything else: `<remote_dir>/<name>.jpeg` (relative fallback).
//!
//! Only the `.jpg` suffix is remapped (to `.jpeg`); every other extension
//! passes through untouched.

use serde::{Deserialize, Serialize};

const JPG_SUFFIX: &str = ".jpg";
const JPEG_SUFFIX: &str = ".jpeg";

/// Runtime signals sourced from the host page's location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeEnvironment {
    /// True when the page was loaded from the local filesystem.
    pub is_local_file: bool,
    /// Hostname of the serving page; empty when unknown.
    #[serde(default)]
    pub hostname: String,
}

impl RuntimeEnvironment {
    /// Page opened from disk.
    pub fn local_file() -> Self {
        Self {
            is_local_file: true,
            hostname: String::new(),
        }
    }

    /// Page served from `hostname`.
    pub fn hosted(hostname: impl Into<String>) -> Self {
        Self {
            is_local_file: false,
            hostname: hostname.into(),
        }
    }
}

/// Directory and host layout used to build asset URLs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssetPaths {
    /// Production domain that serves the widget.
    #[serde(default = "default_production_host")]
    pub production_host: String,

    /// Path segment the widget is deployed under on the production host.
    #[serde(default = "default_widget_path")]
    pub widget_path: String,

    /// Image directory used when the page is opened from disk.
    #[serde(default = "default_local_dir")]
    pub local_dir: String,

    /// Image directory on deployed hosts.
    #[serde(default = "default_remote_dir")]
    pub remote_dir: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            production_host: default_production_host(),
            widget_path: default_widget_path(),
            local_dir: default_local_dir(),
            remote_dir: default_remote_dir(),
        }
    }
}

fn default_production_host() -> String {
    "unisonmentalhealth.com".to_string()
}

fn default_widget_path() -> String {
    "therapair-widget".to_string()
}

fn default_local_dir() -> String {
    "images/resized".to_string()
}

fn default_remote_dir() -> String {
    "images".to_string()
}

/// Pure resolver for therapist photo URLs.
#[derive(Debug, Clone, Default)]
pub struct AssetPathResolver {
    paths: AssetPaths,
}

impl AssetPathResolver {
    /// Creates a resolver over the given layout.
    pub fn new(paths: AssetPaths) -> Self {
        Self { paths }
    }

    /// Returns the configured layout.
    pub fn paths(&self) -> &AssetPaths {
        &self.paths
    }

    /// Resolves `filename` for the given environment.
    ///
    /// Never fails: an empty filename or unknown hostname falls through to
    /// the relative branch.
    pub fn resolve(&self, filename: &str, env: &RuntimeEnvironment) -> String {
        let filename = filename.trim();

        if env.is_local_file {
            return join(&self.paths.local_dir, filename);
        }

        let remapped = remap_extension(filename);
        if self.is_production_host(&env.hostname) {
            format!(
                "https://{}/{}",
                self.paths.production_host,
                join(
                    &join(&self.paths.widget_path, &self.paths.remote_dir),
                    &remapped
                )
            )
        } else {
            join(&self.paths.remote_dir, &remapped)
        }
    }

    /// Returns the extension the resolved asset will carry, without the dot.
    pub fn resolved_extension(&self, filename: &str, env: &RuntimeEnvironment) -> Option<String> {
        let resolved = self.resolve(filename, env);
        let name = resolved.rsplit('/').next().unwrap_or_default();
        name.rsplit_once('.')
            .map(|(_, ext)| ext.to_string())
            .filter(|ext| !ext.is_empty())
    }

    /// Exact match on the production host, tolerating case, a `www.` prefix and a trailing dot.
    fn is_production_host(&self, hostname: &str) -> bool {
        let host = hostname.trim().trim_end_matches('.').to_ascii_lowercase();
        if host.is_empty() {
            return false;
        }
        let production = self.paths.production_host.to_ascii_lowercase();
        host == production || host.strip_prefix("www.") == Some(production.as_str())
    }
}

/// Swaps a trailing `.jpg` for `.jpeg`.
fn remap_extension(filename: &str) -> String {
    match filename.strip_suffix(JPG_SUFFIX) {
        Some(stem) => format!("{}{}", stem, JPEG_SUFFIX),
        None => filename.to_string(),
    }
}

fn join(dir: &str, name: &str) -> String {
    let dir = dir.trim_matches('/');
    let name = name.trim_start_matches('/');
    match (dir.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (false, true) => format!("{}/", dir),
        (false, false) => format!("{}/{}", dir, name),
    }
}
