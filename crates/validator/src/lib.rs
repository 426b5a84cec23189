// Build-time validation of a parsed site
//
// Parsing already rejects missing fields; this catches values that parse but
// would produce a broken or poorly indexed site.

use folio_core::Site;
use folio_core::nav::normalize_path;
use std::collections::HashSet;
use std::path::Path;

/// Meta descriptions longer than this are truncated by search engines.
const MAX_DESCRIPTION_LEN: usize = 160;

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate a site against its directory on disk.
pub fn validate_site(site: &Site, root: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_urls(site, &mut report);
    check_colors(site, &mut report);
    check_keywords(site, &mut report);
    check_navigation(site, &mut report);
    check_files(site, root, &mut report);

    report
}

fn check_urls(site: &Site, report: &mut ValidationReport) {
    let config = &site.config;

    if !is_http_url(&config.site_url) {
        report.errors.push(format!(
            "site.url must start with http:// or https://: '{}'",
            config.site_url
        ));
    }
    if config.site_url.ends_with('/') {
        report.errors.push(format!(
            "site.url must not end with a trailing slash: '{}'",
            config.site_url
        ));
    }
    if config.path_prefix.contains("://") || config.path_prefix.contains(char::is_whitespace) {
        report.errors.push(format!(
            "site.path_prefix must be a plain path segment: '{}'",
            config.path_prefix
        ));
    }

    for (platform, url) in &config.social_links {
        if !is_http_url(url) {
            report
                .warnings
                .push(format!("social.{} is not an http(s) URL: '{}'", platform, url));
        }
    }

    if let Some(handle) = &config.twitter_handle
        && !handle.starts_with('@')
    {
        report.warnings.push(format!(
            "site.twitter_handle should start with '@': '{}'",
            handle
        ));
    }

    if config.site_description.chars().count() > MAX_DESCRIPTION_LEN {
        report.warnings.push(format!(
            "site.description is longer than {} characters and may be truncated in search results",
            MAX_DESCRIPTION_LEN
        ));
    }

    for project in &site.projects {
        if let Some(url) = &project.url
            && !is_http_url(url)
        {
            report.warnings.push(format!(
                "project '{}' url is not an http(s) URL: '{}'",
                project.name, url
            ));
        }
    }
}

fn check_colors(site: &Site, report: &mut ValidationReport) {
    for (field, value) in [
        ("theme.theme_color", &site.config.theme_color),
        ("theme.background_color", &site.config.background_color),
    ] {
        if !is_hex_color(value) {
            report
                .errors
                .push(format!("{} is not a hex color code: '{}'", field, value));
        }
    }
}

fn check_keywords(site: &Site, report: &mut ValidationReport) {
    let keywords = &site.config.keywords;
    if keywords.is_empty() {
        report
            .warnings
            .push("No SEO keywords derived (keywords.skills is empty)".to_string());
        return;
    }

    let mut seen = HashSet::new();
    for keyword in keywords {
        if !seen.insert(keyword) {
            report
                .warnings
                .push(format!("Duplicate keyword '{}' (repeated skill?)", keyword));
        }
    }

    report
        .info
        .push(format!("{} SEO keywords derived", keywords.len()));
}

fn check_navigation(site: &Site, report: &mut ValidationReport) {
    let routes = site.navigation.routes();
    let mut seen = HashSet::new();

    for route in routes {
        if !route.path.starts_with('/') {
            report.errors.push(format!(
                "nav path must start with '/': '{}'",
                route.path
            ));
        }
        // `/about` and `/about/` would both be active on the same page
        if !seen.insert(normalize_path(&route.path)) {
            report
                .errors
                .push(format!("Duplicate nav path '{}'", route.path));
        }
        if route.label.trim().is_empty() {
            report
                .errors
                .push(format!("nav entry '{}' has an empty label", route.path));
        }
    }

    if !routes.iter().any(|route| route.is_home()) {
        report
            .errors
            .push("Navigation must include the home route '/'".to_string());
    }
}

fn check_files(site: &Site, root: &Path, report: &mut ValidationReport) {
    let biography = root.join(&site.about.biography);
    if !biography.is_file() {
        report.warnings.push(format!(
            "About biography not found: {} (about page will have no biography)",
            site.about.biography.display()
        ));
    }

    let Some(logo) = &site.config.site_logo else {
        report
            .warnings
            .push("site.logo not set (no Open Graph image or manifest icon)".to_string());
        return;
    };

    let logo_path = root.join("static").join(logo);
    if !logo_path.is_file() {
        report
            .warnings
            .push(format!("Logo not found: static/{}", logo.display()));
        return;
    }

    match image::image_dimensions(&logo_path) {
        Ok((width, height)) => {
            report
                .info
                .push(format!("Logo: {}x{}", width, height));
            if width != height {
                report.warnings.push(format!(
                    "Logo is not square ({}x{}); manifest icons should be square",
                    width, height
                ));
            }
        }
        Err(e) => report
            .warnings
            .push(format!("Could not read logo dimensions: {}", e)),
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

/// `#RGB` or `#RRGGBB`
fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}
