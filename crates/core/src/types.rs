use crate::nav::Navigation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Complete site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub config: SiteConfig,
    pub navigation: Navigation,
    pub about: AboutPage,
    pub projects: Vec<Project>,
}

/// Site-wide metadata consumed by every page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Prefix for all links, "/" when the site is served from the domain root
    pub path_prefix: String,
    pub site_title: String,
    /// Alternative title for SEO
    pub site_title_alt: String,
    /// `short_name` in the web manifest
    pub site_title_short: String,
    /// Canonical domain, no trailing slash
    pub site_url: String,
    pub site_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_logo: Option<PathBuf>,
    pub site_description: String,
    pub author: String,
    pub organization: String,
    /// Platform name -> profile URL
    pub social_links: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_handle: Option<String>,
    pub og_site_name: String,
    pub og_language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_analytics_id: Option<String>,
    pub theme_color: String,
    pub background_color: String,
    /// Derived from skills x templates, see [`crate::keywords`]
    pub keywords: Vec<String>,
}

impl SiteConfig {
    /// Prefix a route path, e.g. `/about` -> `/blog/about` for prefix `blog`
    pub fn href(&self, path: &str) -> String {
        let prefix = self.path_prefix.trim_matches('/');
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        if prefix.is_empty() {
            path
        } else {
            format!("/{}{}", prefix, path)
        }
    }

    /// Canonical absolute URL for a route path
    pub fn absolute_url(&self, path: &str) -> String {
        format!("{}{}", self.site_url, self.href(path))
    }

    /// Absolute URL of the logo, used for Open Graph images
    pub fn logo_url(&self) -> Option<String> {
        self.site_logo
            .as_ref()
            .map(|logo| self.absolute_url(&logo.to_string_lossy()))
    }
}

/// About page content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AboutPage {
    pub greeting: String,
    /// Markdown file, relative to the site directory
    pub biography: PathBuf,
    pub skills: Vec<SkillGroup>,
}

impl Default for AboutPage {
    fn default() -> Self {
        Self {
            greeting: "Hi there".to_string(),
            biography: PathBuf::from("content/about.md"),
            skills: Vec::new(),
        }
    }
}

/// One line of the skills list, e.g. "Languages: Python, TypeScript"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

impl SkillGroup {
    pub fn joined(&self) -> String {
        self.items.join(", ")
    }
}

/// Entry on the projects page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
