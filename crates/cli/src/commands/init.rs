use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::SITE_TOML;

/// Escape a string for safe inclusion in a TOML basic string.
///
/// The template is written by hand so its comments survive; the toml crate's
/// serializer would drop them.
///
/// See: https://toml.io/en/v1.0.0#string
fn toml_escape_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\x08', "\\b")
        .replace('\x0C', "\\f")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Initialize a new site directory.
///
/// Creates `site.toml`, `content/about.md` and an empty `static/` directory.
/// Refuses to overwrite an existing `site.toml`.
pub async fn run(
    path: PathBuf,
    title: Option<String>,
    author: Option<String>,
    url: Option<String>,
) -> Result<()> {
    println!("Initializing site directory: {}", path.display());

    let site_toml_path = path.join(SITE_TOML);
    if site_toml_path.exists() {
        anyhow::bail!(
            "{} already exists at {}\nHint: Delete it first or use a different directory",
            SITE_TOML,
            site_toml_path.display()
        );
    }

    create_directory_structure(&path)?;
    generate_site_toml(&path, title.as_deref(), author.as_deref(), url.as_deref())?;
    generate_about_template(&path)?;

    println!("\n✓ Initialization complete!");
    println!("\nGenerated structure:");
    println!("  {}/", path.display());
    println!("  ├── site.toml            ← Edit this to set title, social links, etc.");
    println!("  ├── content/");
    println!("  │   └── about.md         ← Your biography");
    println!("  └── static/              ← Logo and other files copied as-is");

    println!("\nNext steps:");
    println!("  1. Edit site.toml (title, description, skills)");
    println!("  2. Write your biography in content/about.md");
    println!("  3. Preview: folio preview {}", path.display());

    Ok(())
}

fn create_directory_structure(base: &Path) -> Result<()> {
    fs::create_dir_all(base.join("content")).context("Failed to create content directory")?;
    fs::create_dir_all(base.join("static").join("images"))
        .context("Failed to create static directory")?;
    Ok(())
}

fn generate_site_toml(
    base: &Path,
    title: Option<&str>,
    author: Option<&str>,
    url: Option<&str>,
) -> Result<()> {
    if let Some(u) = url
        && u.ends_with('/')
    {
        anyhow::bail!("Site URL must not end with a trailing slash: '{}'", u);
    }

    let site_title = toml_escape_string(title.unwrap_or("My Site"));
    let author_name = toml_escape_string(author.unwrap_or("Your Name"));
    let site_url = toml_escape_string(url.unwrap_or("https://example.com"));

    let title_comment = if title.is_some() {
        ""
    } else {
        "  # TODO: Set site title"
    };
    let author_comment = if author.is_some() {
        ""
    } else {
        "  # TODO: Set author"
    };
    let url_comment = if url.is_some() {
        ""
    } else {
        "  # TODO: Set domain, no trailing slash"
    };

    let toml = format!(
        r##"# Generated by folio init
# Edit this file to customize your site

[site]
path_prefix = "/"  # Set to "blog" when deploying to example.com/blog
title = "{site_title}"{title_comment}
title_alt = "Personal website of {author_name}"
title_short = "my-site"  # short_name in the web manifest
url = "{site_url}"{url_comment}
language = "en"
logo = "images/logo.png"  # Relative to static/
description = "Personal website and blog"  # TODO: Add description
author = "{author_name}"{author_comment}
organization = ""
# twitter_handle = "@handle"
# google_analytics_id = "UA-XXXXXXXX-X"

[theme]
theme_color = "#5348FF"
background_color = "#2b2e3c"

[social]
# twitter = "https://twitter.com/handle/"
# github = "https://github.com/handle/"
# linkedin = "https://www.linkedin.com/in/handle/"

[keywords]
# Every template is expanded for every skill
skills = ["Rust"]  # TODO: List your skills
templates = ["{{skill}} Developer", "{{skill}} Programmer", "{{skill}} Articles"]

[about]
greeting = "Hi, I'm {author_name}"
biography = "content/about.md"

# [[about.skills]]
# category = "Languages"
# items = ["Rust", "Python"]

# [[project]]
# name = "My Project"
# url = "https://github.com/handle/project"
# description = "What it does"
"##
    );

    // Validate the generated TOML can be parsed
    toml::from_str::<toml::Value>(&toml)
        .context("Generated TOML is invalid - this is a bug in the template generator")?;

    fs::write(base.join(SITE_TOML), toml)?;

    Ok(())
}

fn generate_about_template(base: &Path) -> Result<()> {
    let path = base.join("content").join("about.md");
    if path.exists() {
        return Ok(());
    }

    let template = r##"Write about yourself here. This is markdown, so you can use:

- **Bold** and *italic* text
- Lists and links

### Little Back Story

How did you start programming?
"##;

    fs::write(path, template)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::config::parse_site_toml_str;
    use tempfile::TempDir;

    #[test]
    fn test_create_directory_structure_idempotent() {
        let dir = TempDir::new().unwrap();

        create_directory_structure(dir.path()).unwrap();
        create_directory_structure(dir.path()).unwrap();

        assert!(dir.path().join("content").is_dir());
        assert!(dir.path().join("static/images").is_dir());
    }

    #[test]
    fn test_generated_site_toml_parses_as_site() {
        let dir = TempDir::new().unwrap();
        generate_site_toml(dir.path(), None, None, None).unwrap();

        let content = fs::read_to_string(dir.path().join(SITE_TOML)).unwrap();
        assert!(content.contains("TODO: Set site title"));

        let site = parse_site_toml_str(&content).unwrap();
        assert_eq!(site.config.site_title, "My Site");
        assert_eq!(
            site.config.keywords,
            vec!["Rust Developer", "Rust Programmer", "Rust Articles"]
        );
    }

    #[test]
    fn test_generate_site_toml_with_values() {
        let dir = TempDir::new().unwrap();
        generate_site_toml(
            dir.path(),
            Some("Shakib Hossain | shakib609"),
            Some("Shakib Hossain"),
            Some("https://www.shakib609.gq"),
        )
        .unwrap();

        let content = fs::read_to_string(dir.path().join(SITE_TOML)).unwrap();
        assert!(!content.contains("TODO: Set site title"));
        assert!(!content.contains("TODO: Set author"));
        assert!(!content.contains("TODO: Set domain"));

        let site = parse_site_toml_str(&content).unwrap();
        assert_eq!(site.config.site_url, "https://www.shakib609.gq");
        assert_eq!(site.about.greeting, "Hi, I'm Shakib Hossain");
    }

    #[test]
    fn test_generate_site_toml_with_special_characters() {
        let dir = TempDir::new().unwrap();
        generate_site_toml(
            dir.path(),
            Some(r#"The "Quoted" Site"#),
            Some(r"Back\Slash"),
            None,
        )
        .unwrap();

        let content = fs::read_to_string(dir.path().join(SITE_TOML)).unwrap();
        let site = parse_site_toml_str(&content).unwrap();
        assert_eq!(site.config.site_title, r#"The "Quoted" Site"#);
        assert_eq!(site.config.author, r"Back\Slash");
    }

    #[test]
    fn test_generate_site_toml_rejects_trailing_slash() {
        let dir = TempDir::new().unwrap();
        let result = generate_site_toml(dir.path(), None, None, Some("https://example.com/"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("trailing slash"));
    }

    #[test]
    fn test_generate_about_template_keeps_existing() {
        let dir = TempDir::new().unwrap();
        create_directory_structure(dir.path()).unwrap();
        fs::write(dir.path().join("content/about.md"), "mine").unwrap();

        generate_about_template(dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("content/about.md")).unwrap(),
            "mine"
        );
    }

    #[test]
    fn test_toml_escape_string() {
        assert_eq!(toml_escape_string(r#"Test "Quote""#), r#"Test \"Quote\""#);
        assert_eq!(toml_escape_string(r"Test\Back"), r"Test\\Back");
        assert_eq!(toml_escape_string("Test\nNewline"), r"Test\nNewline");
        assert_eq!(toml_escape_string("Normal String"), "Normal String");
    }

    #[tokio::test]
    async fn test_run_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        run(dir.path().to_path_buf(), None, None, None).await.unwrap();
        assert!(dir.path().join("content/about.md").is_file());

        let result = run(dir.path().to_path_buf(), None, None, None).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("already exists"));
    }
}
