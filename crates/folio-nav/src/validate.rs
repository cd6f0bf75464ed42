//! Sidebar validation.
//!
//! Validation walks each sidebar once in pre-order and checks:
//!
//! - every leaf document id is unique within its sidebar,
//! - every referenced document (leaves and landing slots) exists,
//! - categories have something to link to.
//!
//! Duplicate and missing documents are fatal and stop the walk at the first
//! occurrence. Empty categories and unresolved landings are warnings, collected
//! over the whole registry and returned together in a [`ValidationReport`].
//!
//! # Broken links
//!
//! [`BrokenLinkPolicy`] controls how missing documents are treated:
//! `throw` (fatal, default), `warn` (reported as [`ValidationWarning::BrokenLink`])
//! or `ignore`.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::Deserialize;

use crate::content::ContentIndex;
use crate::landing::resolve_landing;
use crate::node::{DocumentId, NavigationNode, NodePath};
use crate::sidebar::{Sidebar, SidebarRegistry};

/// How to treat references to documents missing from the content index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinkPolicy {
    /// Fail validation.
    #[default]
    Throw,
    /// Report a warning and continue.
    Warn,
    /// Skip silently.
    Ignore,
}

impl fmt::Display for BrokenLinkPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Throw => "throw",
            Self::Warn => "warn",
            Self::Ignore => "ignore",
        })
    }
}

impl FromStr for BrokenLinkPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "throw" => Ok(Self::Throw),
            "warn" => Ok(Self::Warn),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!(
                "unknown broken link policy '{other}' (expected throw, warn or ignore)"
            )),
        }
    }
}

/// Fatal validation error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A document is listed by two leaves of the same sidebar.
    #[error(
        "Sidebar '{sidebar}': document '{document}' is listed twice (at {first} and at {second})"
    )]
    DuplicateDocument {
        /// Sidebar id.
        sidebar: String,
        /// Duplicated document.
        document: DocumentId,
        /// Path of the first listing.
        first: NodePath,
        /// Path of the second listing.
        second: NodePath,
    },
    /// A referenced document does not exist in the content index.
    #[error("Sidebar '{sidebar}': document '{document}' referenced at {path} does not exist")]
    MissingDocument {
        /// Sidebar id.
        sidebar: String,
        /// Missing document.
        document: DocumentId,
        /// Path of the referencing node.
        path: NodePath,
    },
}

impl ValidationError {
    /// Id of the sidebar that failed.
    #[must_use]
    pub fn sidebar(&self) -> &str {
        match self {
            Self::DuplicateDocument { sidebar, .. } | Self::MissingDocument { sidebar, .. } => {
                sidebar
            }
        }
    }
}

/// Non-fatal validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationWarning {
    /// Category without children and without landing page.
    EmptyCategory {
        /// Sidebar id.
        sidebar: String,
        /// Category path.
        path: NodePath,
    },
    /// Category with children but no leaf to link to.
    UnresolvedLanding {
        /// Sidebar id.
        sidebar: String,
        /// Category path.
        path: NodePath,
    },
    /// Missing document tolerated by [`BrokenLinkPolicy::Warn`].
    BrokenLink {
        /// Sidebar id.
        sidebar: String,
        /// Missing document.
        document: DocumentId,
        /// Path of the referencing node.
        path: NodePath,
    },
}

impl ValidationWarning {
    /// Id of the sidebar the warning belongs to.
    #[must_use]
    pub fn sidebar(&self) -> &str {
        match self {
            Self::EmptyCategory { sidebar, .. }
            | Self::UnresolvedLanding { sidebar, .. }
            | Self::BrokenLink { sidebar, .. } => sidebar,
        }
    }
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCategory { sidebar, path } => {
                write!(f, "Sidebar '{sidebar}': category {path} is empty")
            }
            Self::UnresolvedLanding { sidebar, path } => write!(
                f,
                "Sidebar '{sidebar}': category {path} has no page to link to"
            ),
            Self::BrokenLink {
                sidebar,
                document,
                path,
            } => write!(
                f,
                "Sidebar '{sidebar}': document '{document}' referenced at {path} does not exist"
            ),
        }
    }
}

/// Warnings collected by a successful validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// All warnings in traversal order.
    #[must_use]
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    /// True if there are no warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Append the warnings of another report.
    pub fn merge(&mut self, other: Self) {
        self.warnings.extend(other.warnings);
    }

    fn push(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// Sidebar validator.
#[derive(Clone, Copy, Debug, Default)]
pub struct Validator {
    broken_links: BrokenLinkPolicy,
}

impl Validator {
    /// Validator with the default `throw` policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the broken-link policy.
    #[must_use]
    pub fn with_broken_links(mut self, policy: BrokenLinkPolicy) -> Self {
        self.broken_links = policy;
        self
    }

    /// Validate a single sidebar.
    ///
    /// # Errors
    ///
    /// Returns the first duplicate or (under `throw`) missing document.
    pub fn validate_sidebar<I>(
        &self,
        sidebar: &Sidebar,
        index: &I,
    ) -> Result<ValidationReport, ValidationError>
    where
        I: ContentIndex + ?Sized,
    {
        let mut seen: HashMap<&DocumentId, NodePath> = HashMap::new();
        let mut report = ValidationReport::default();

        for entry in sidebar.flatten() {
            match entry.node {
                NavigationNode::Leaf(leaf) => {
                    if let Some(first) = seen.get(&leaf.id) {
                        return Err(ValidationError::DuplicateDocument {
                            sidebar: sidebar.id().to_owned(),
                            document: leaf.id.clone(),
                            first: first.clone(),
                            second: entry.path,
                        });
                    }
                    self.check_exists(sidebar, &leaf.id, &entry.path, index, &mut report)?;
                    seen.insert(&leaf.id, entry.path);
                }
                NavigationNode::Category(category) => {
                    if let Some(landing) = &category.landing {
                        self.check_exists(sidebar, landing, &entry.path, index, &mut report)?;
                    }
                    if category.is_empty() {
                        tracing::warn!(
                            sidebar = sidebar.id(),
                            path = %entry.path,
                            "Category is empty"
                        );
                        report.push(ValidationWarning::EmptyCategory {
                            sidebar: sidebar.id().to_owned(),
                            path: entry.path,
                        });
                    } else if resolve_landing(category).is_none() {
                        tracing::warn!(
                            sidebar = sidebar.id(),
                            path = %entry.path,
                            "Category has no landing page and no leaf descendants"
                        );
                        report.push(ValidationWarning::UnresolvedLanding {
                            sidebar: sidebar.id().to_owned(),
                            path: entry.path,
                        });
                    }
                }
            }
        }

        tracing::debug!(
            sidebar = sidebar.id(),
            documents = seen.len(),
            warnings = report.warnings.len(),
            "Validated sidebar"
        );
        Ok(report)
    }

    /// Validate every sidebar of a registry in id order.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error encountered.
    pub fn validate<I>(
        &self,
        registry: &SidebarRegistry,
        index: &I,
    ) -> Result<ValidationReport, ValidationError>
    where
        I: ContentIndex + ?Sized,
    {
        let mut report = ValidationReport::default();
        for sidebar in registry.iter() {
            report.merge(self.validate_sidebar(sidebar, index)?);
        }
        Ok(report)
    }

    /// Validate sidebars in parallel.
    ///
    /// Produces the same result as [`validate`](Self::validate): if several
    /// sidebars fail, the error of the one with the lowest id is returned.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error in sidebar id order.
    pub fn validate_par<I>(
        &self,
        registry: &SidebarRegistry,
        index: &I,
    ) -> Result<ValidationReport, ValidationError>
    where
        I: ContentIndex + Sync + ?Sized,
    {
        let sidebars: Vec<&Sidebar> = registry.iter().collect();
        let results: Vec<Result<ValidationReport, ValidationError>> = sidebars
            .par_iter()
            .map(|sidebar| self.validate_sidebar(sidebar, index))
            .collect();

        let mut report = ValidationReport::default();
        for result in results {
            report.merge(result?);
        }
        Ok(report)
    }

    fn check_exists<I>(
        &self,
        sidebar: &Sidebar,
        document: &DocumentId,
        path: &NodePath,
        index: &I,
        report: &mut ValidationReport,
    ) -> Result<(), ValidationError>
    where
        I: ContentIndex + ?Sized,
    {
        if index.exists(document) {
            return Ok(());
        }
        match self.broken_links {
            BrokenLinkPolicy::Throw => Err(ValidationError::MissingDocument {
                sidebar: sidebar.id().to_owned(),
                document: document.clone(),
                path: path.clone(),
            }),
            BrokenLinkPolicy::Warn => {
                tracing::warn!(
                    sidebar = sidebar.id(),
                    document = %document,
                    path = %path,
                    "Referenced document does not exist"
                );
                report.push(ValidationWarning::BrokenLink {
                    sidebar: sidebar.id().to_owned(),
                    document: document.clone(),
                    path: path.clone(),
                });
                Ok(())
            }
            BrokenLinkPolicy::Ignore => Ok(()),
        }
    }
}

/// Validate a registry with the default policy.
///
/// # Errors
///
/// Returns the first duplicate or missing document.
pub fn validate<I>(
    registry: &SidebarRegistry,
    index: &I,
) -> Result<ValidationReport, ValidationError>
where
    I: ContentIndex + ?Sized,
{
    Validator::default().validate(registry, index)
}

/// Validate a registry in parallel with the default policy.
///
/// # Errors
///
/// Returns the first duplicate or missing document in sidebar id order.
pub fn validate_par<I>(
    registry: &SidebarRegistry,
    index: &I,
) -> Result<ValidationReport, ValidationError>
where
    I: ContentIndex + Sync + ?Sized,
{
    Validator::default().validate_par(registry, index)
}
