use crate::error::{Error, Result};
use crate::keywords::{DEFAULT_TEMPLATES, check_templates, derive_keywords};
use crate::nav::{Navigation, Route};
use crate::types::*;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw TOML configuration structure
/// This matches the site.toml file structure exactly
#[derive(Debug, Deserialize)]
struct RawConfig {
    site: RawSite,
    theme: RawTheme,
    #[serde(default)]
    social: BTreeMap<String, String>,
    keywords: RawKeywords,
    #[serde(default)]
    about: Option<RawAbout>,
    #[serde(default)]
    project: Vec<Project>,
    #[serde(default)]
    nav: Vec<Route>,
}

#[derive(Debug, Deserialize)]
struct RawSite {
    #[serde(default = "default_path_prefix")]
    path_prefix: String,
    title: String,
    title_alt: String,
    title_short: String,
    url: String,
    #[serde(default = "default_language")]
    language: String,
    logo: Option<String>, // Convert to PathBuf
    description: String,
    author: String,
    #[serde(default)]
    organization: String,
    twitter_handle: Option<String>,
    og_site_name: Option<String>,
    #[serde(default = "default_og_language")]
    og_language: String,
    google_analytics_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawTheme {
    theme_color: String,
    background_color: String,
}

#[derive(Debug, Deserialize)]
struct RawKeywords {
    skills: Vec<String>,
    #[serde(default = "default_templates")]
    templates: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawAbout {
    greeting: Option<String>,
    biography: Option<String>, // Convert to PathBuf
    #[serde(default)]
    skills: Vec<SkillGroup>,
}

fn default_path_prefix() -> String {
    "/".to_string()
}

fn default_language() -> String {
    "en".to_string()
}

fn default_og_language() -> String {
    "en_US".to_string()
}

fn default_templates() -> Vec<String> {
    DEFAULT_TEMPLATES.iter().map(|t| t.to_string()).collect()
}

/// Parse site.toml from a file path
pub fn parse_site_toml<P: AsRef<Path>>(path: P) -> Result<Site> {
    let content = fs::read_to_string(path)?;
    parse_site_toml_str(&content)
}

/// Parse site.toml from a string (useful for testing)
pub fn parse_site_toml_str(content: &str) -> Result<Site> {
    let raw: RawConfig = toml::from_str(content)?;
    let site = raw.site;

    require(&site.title, "site.title")?;
    require(&site.title_alt, "site.title_alt")?;
    require(&site.title_short, "site.title_short")?;
    require(&site.url, "site.url")?;
    require(&site.description, "site.description")?;
    require(&site.author, "site.author")?;
    require(&raw.theme.theme_color, "theme.theme_color")?;
    require(&raw.theme.background_color, "theme.background_color")?;

    check_templates(&raw.keywords.templates)?;
    let keywords = derive_keywords(&raw.keywords.skills, &raw.keywords.templates);

    let site_logo = match site.logo {
        Some(logo) => Some(validate_path(&logo, "site.logo")?),
        None => None,
    };

    let config = SiteConfig {
        path_prefix: site.path_prefix,
        og_site_name: site.og_site_name.unwrap_or_else(|| site.title.clone()),
        site_title: site.title,
        site_title_alt: site.title_alt,
        site_title_short: site.title_short,
        site_url: site.url,
        site_language: site.language,
        site_logo,
        site_description: site.description,
        author: site.author,
        organization: site.organization,
        social_links: raw.social,
        twitter_handle: site.twitter_handle,
        og_language: site.og_language,
        google_analytics_id: site.google_analytics_id,
        theme_color: raw.theme.theme_color,
        background_color: raw.theme.background_color,
        keywords,
    };

    let about = match raw.about {
        Some(about) => {
            let defaults = AboutPage::default();
            let biography = match about.biography {
                Some(path) => validate_path(&path, "about.biography")?,
                None => defaults.biography,
            };
            AboutPage {
                greeting: about.greeting.unwrap_or(defaults.greeting),
                biography,
                skills: about.skills,
            }
        }
        None => AboutPage::default(),
    };

    for project in &raw.project {
        require(&project.name, "project.name")?;
    }

    let navigation = if raw.nav.is_empty() {
        Navigation::default()
    } else {
        Navigation::new(raw.nav)
    };

    Ok(Site {
        config,
        navigation,
        about,
        projects: raw.project,
    })
}

/// A required field that parsed but holds only whitespace still fails the build.
fn require(value: &str, field_name: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::MissingField(field_name));
    }
    Ok(())
}

/// Validate and convert a path string to PathBuf.
///
/// Rejects absolute paths and parent directory references (`..`) so a
/// site.toml can only point at files inside the site directory.
///
/// ```text
/// validate_path("images/logo.png", "site.logo")   → Ok(PathBuf)
/// validate_path("/etc/passwd", "site.logo")       → Err("Absolute paths not allowed...")
/// validate_path("../secret.md", "about.biography") → Err("Parent directory references...")
/// ```
fn validate_path(path_str: &str, field_name: &str) -> Result<PathBuf> {
    let path = Path::new(path_str);

    if path.is_absolute() {
        return Err(Error::ConfigParse(format!(
            "Absolute paths not allowed in '{}': '{}'. Use relative paths only.",
            field_name, path_str
        )));
    }

    for component in path.components() {
        if component == std::path::Component::ParentDir {
            return Err(Error::ConfigParse(format!(
                "Parent directory references (..) not allowed in '{}': '{}'",
                field_name, path_str
            )));
        }
    }

    if path_str.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    Ok(path.to_path_buf())
}
