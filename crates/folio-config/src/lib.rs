//! Configuration management for Folio.
//!
//! Parses `folio.toml` with serde and discovers it in the current directory
//! or its parents. A portal has one `[site]` section and one `[[docs]]`
//! section per documentation product:
//!
//! ```toml
//! [site]
//! title = "Asset Tokenization Studio"
//! url = "https://hashgraph.github.io"
//! base_url = "/asset-tokenization-studio/"
//! on_broken_links = "throw"
//!
//! [[docs]]
//! id = "ats"
//! path = "../../docs/ats"
//! route_base_path = "ats"
//! sidebar_path = "sidebars-ats.yaml"
//! edit_url = "https://github.com/hashgraph/asset-tokenization-studio/tree/main/"
//! ```
//!
//! Relative paths are resolved against the config file's directory.
//!
//! ## Environment Variable Expansion
//!
//! `${VAR}` and `${VAR:-default}` are expanded in:
//! - `site.url`
//! - `site.base_url`
//! - `docs.edit_url`

mod expand;

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use folio_content::DEFAULT_EXCLUDE;
use folio_nav::{BrokenLinkPolicy, DocumentId};
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override `site.on_broken_links`.
    pub broken_links: Option<BrokenLinkPolicy>,
    /// Keep only the docs instance with this id.
    pub docs: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.url`").
        field: String,
        /// Error message (e.g., "${`SITE_URL`} not set").
        message: String,
    },
}

/// Raw configuration as parsed from TOML.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigRaw {
    site: SiteConfigRaw,
    #[serde(default)]
    docs: Vec<DocsConfigRaw>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct SiteConfigRaw {
    title: String,
    url: String,
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default)]
    on_broken_links: BrokenLinkPolicy,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DocsConfigRaw {
    id: String,
    path: String,
    route_base_path: Option<String>,
    sidebar_path: Option<String>,
    edit_url: Option<String>,
    exclude: Option<Vec<String>>,
}

fn default_base_url() -> String {
    "/".to_owned()
}

/// Site-wide settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Portal title.
    pub title: String,
    /// Origin the portal is served from.
    pub url: String,
    /// Path prefix the portal is served under, with leading and trailing `/`.
    pub base_url: String,
    /// Treatment of sidebar entries without a content page.
    pub on_broken_links: BrokenLinkPolicy,
}

/// One documentation product, with paths resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocsInstance {
    /// Instance id.
    pub id: String,
    /// Content directory.
    pub path: PathBuf,
    /// Sidebar declaration file.
    pub sidebar_path: PathBuf,
    /// Route segment under `base_url` (may be empty).
    pub route_base_path: String,
    /// Base URL for "edit this page" links.
    pub edit_url: Option<String>,
    /// Glob patterns excluded from the content scan.
    pub exclude: Vec<String>,
    /// URL path prefix for this instance's pages (`/base/route/`).
    route: String,
    /// Repository path of the content directory, used for edit links.
    edit_path: String,
}

impl DocsInstance {
    /// URL path of a document.
    ///
    /// A trailing `index` segment maps to its directory:
    /// `intro` -> `/base/route/intro/`, `guides/index` -> `/base/route/guides/`.
    #[must_use]
    pub fn permalink(&self, id: &DocumentId) -> String {
        let id = id.as_str();
        let slug = if id == "index" {
            ""
        } else {
            id.strip_suffix("/index").unwrap_or(id)
        };
        if slug.is_empty() {
            self.route.clone()
        } else {
            format!("{}{slug}/", self.route)
        }
    }

    /// "Edit this page" URL for a source file relative to the content directory.
    #[must_use]
    pub fn edit_link(&self, source: &Path) -> Option<String> {
        let edit_url = self.edit_url.as_deref()?;
        let source = to_url_path(source);
        let mut link = edit_url.trim_end_matches('/').to_owned();
        for part in [self.edit_path.as_str(), source.as_str()] {
            if !part.is_empty() {
                link.push('/');
                link.push_str(part);
            }
        }
        Some(link)
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Site settings.
    pub site: SiteConfig,
    /// Docs instances in declaration order.
    pub docs: Vec<DocsInstance>,
    /// Path to the config file (unset for defaults).
    pub config_path: Option<PathBuf>,
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise, searches
    /// for `folio.toml` in the current directory and parents, falling back to
    /// a single `docs` instance in the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if the explicit `config_path` doesn't exist, parsing or
    /// validation fails, or `cli_settings.docs` names an unknown instance.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings)?;
        }

        Ok(config)
    }

    /// Parse configuration from TOML, resolving paths against `config_dir`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml_str(content: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let raw: ConfigRaw = toml::from_str(content)?;
        let config = Self::resolve(raw, config_dir)?;
        config.validate()?;
        Ok(config)
    }

    /// Docs instance by id.
    #[must_use]
    pub fn instance(&self, id: &str) -> Option<&DocsInstance> {
        self.docs.iter().find(|docs| docs.id == id)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` on the first invalid value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_docs()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        require_http_url(&self.site.url, "site.url")?;
        if !self.site.base_url.starts_with('/') || !self.site.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must start and end with /".to_owned(),
            ));
        }
        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        if self.docs.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[docs]] section is required".to_owned(),
            ));
        }

        let mut seen = HashSet::new();
        for docs in &self.docs {
            require_non_empty(&docs.id, "docs.id")?;
            if !seen.insert(docs.id.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate docs id '{}'",
                    docs.id
                )));
            }
            if let Some(edit_url) = &docs.edit_url {
                require_http_url(edit_url, &format!("docs.{}.edit_url", docs.id))?;
            }
            for pattern in &docs.exclude {
                glob::Pattern::new(pattern).map_err(|e| {
                    ConfigError::Validation(format!(
                        "docs.{}.exclude: invalid pattern '{pattern}': {e}",
                        docs.id
                    ))
                })?;
            }
        }
        Ok(())
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) -> Result<(), ConfigError> {
        if let Some(policy) = settings.broken_links {
            self.site.on_broken_links = policy;
        }
        if let Some(id) = &settings.docs {
            if self.instance(id).is_none() {
                return Err(ConfigError::Validation(format!(
                    "unknown docs instance '{id}'"
                )));
            }
            self.docs.retain(|docs| &docs.id == id);
        }
        Ok(())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Single `docs` instance reading `<base>/docs` and `<base>/sidebars.yaml`.
    fn default_with_base(base: &Path) -> Self {
        let site = SiteConfig {
            title: "Documentation".to_owned(),
            url: "http://localhost".to_owned(),
            base_url: default_base_url(),
            on_broken_links: BrokenLinkPolicy::default(),
        };
        let docs = DocsInstance {
            id: "default".to_owned(),
            path: base.join("docs"),
            sidebar_path: base.join("sidebars.yaml"),
            route_base_path: "docs".to_owned(),
            edit_url: None,
            exclude: default_exclude(),
            route: route(&site.base_url, "docs"),
            edit_path: "docs".to_owned(),
        };
        Self {
            site,
            docs: vec![docs],
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    fn resolve(raw: ConfigRaw, config_dir: &Path) -> Result<Self, ConfigError> {
        let site = SiteConfig {
            title: raw.site.title,
            url: expand::expand_env(&raw.site.url, "site.url")?,
            base_url: expand::expand_env(&raw.site.base_url, "site.base_url")?,
            on_broken_links: raw.site.on_broken_links,
        };

        let docs = raw
            .docs
            .into_iter()
            .map(|docs| -> Result<DocsInstance, ConfigError> {
                let route_base_path = docs
                    .route_base_path
                    .unwrap_or_else(|| "docs".to_owned())
                    .trim_matches('/')
                    .to_owned();
                let sidebar_path = docs.sidebar_path.as_deref().unwrap_or("sidebars.yaml");
                let edit_url = expand::expand_opt(
                    docs.edit_url.as_deref(),
                    &format!("docs.{}.edit_url", docs.id),
                )?;
                Ok(DocsInstance {
                    route: route(&site.base_url, &route_base_path),
                    edit_path: edit_path(&docs.path),
                    path: config_dir.join(&docs.path),
                    sidebar_path: config_dir.join(sidebar_path),
                    exclude: docs.exclude.unwrap_or_else(default_exclude),
                    id: docs.id,
                    route_base_path,
                    edit_url,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            site,
            docs,
            config_path: None,
        })
    }
}

fn default_exclude() -> Vec<String> {
    DEFAULT_EXCLUDE.iter().map(|&p| p.to_owned()).collect()
}

fn route(base_url: &str, route_base_path: &str) -> String {
    if route_base_path.is_empty() {
        base_url.to_owned()
    } else {
        format!("{base_url}{route_base_path}/")
    }
}

/// Content path as seen from the repository root: `./` and `../` dropped.
fn edit_path(path: &str) -> String {
    to_url_path(Path::new(path))
}

/// `/`-joined normal components of `path`.
fn to_url_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
