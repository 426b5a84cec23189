use anyhow::{Context, Result};
use folio_generator::{GeneratedSite, RenderOptions, generate_site};
use folio_validator::validate_site;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::load_site;
use super::validate::print_report;

/// Build static site for deployment
pub async fn run(path: PathBuf, output: PathBuf) -> Result<()> {
    println!("🔨 Building static site...");
    println!("   Source: {}", path.display());
    println!("   Output: {}", output.display());
    println!();

    let site = load_site(&path)?;

    println!("✓ Loaded: {}", site.config.site_title);
    println!("  Author: {}", site.config.author);
    println!("  URL: {}", site.config.site_url);
    println!();

    // A site that fails validation never reaches the output directory
    let report = validate_site(&site, &path);
    print_report(&report);
    if !report.is_valid() {
        anyhow::bail!(
            "Build aborted: {} validation error(s)",
            report.errors.len()
        );
    }

    println!("📄 Rendering pages...");
    let generated = generate_site(&site, &path, &RenderOptions::default())?;
    let written = write_site(&generated, &output)?;
    println!("   ✓ Wrote {} files", written);

    println!("🎨 Copying static files...");
    let copied = copy_static(&path.join("static"), &output)?;
    println!("   ✓ Copied {} static files", copied);

    println!();
    println!("✅ Build complete!");
    println!("   Output: {}", output.display());
    println!();
    println!("To test locally:");
    println!("   folio preview {}", path.display());
    println!();

    Ok(())
}

/// Write generated pages and assets, creating directories as needed.
fn write_site(generated: &GeneratedSite, output: &Path) -> Result<usize> {
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let files = generated
        .pages
        .iter()
        .map(|(path, html)| (path, html.as_bytes()))
        .chain(
            generated
                .assets
                .iter()
                .map(|(path, data)| (path, data.as_slice())),
        );

    let mut written = 0;
    for (relative, data) in files {
        let dst = output.join(relative);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&dst, data).with_context(|| format!("Failed to write {}", dst.display()))?;
        tracing::debug!("wrote {}", dst.display());
        written += 1;
    }

    Ok(written)
}

/// Copy `static/` into the output root, preserving structure.
fn copy_static(static_dir: &Path, output: &Path) -> Result<usize> {
    if !static_dir.exists() {
        return Ok(0);
    }

    let mut copied = 0;
    for entry in WalkDir::new(static_dir).follow_links(false) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(static_dir)
            .context("Static file outside static directory")?;
        let dst = output.join(relative);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(entry.path(), &dst)
            .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
        copied += 1;
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_site_creates_nested_pages() {
        let dir = TempDir::new().unwrap();
        let generated = GeneratedSite {
            pages: vec![
                ("index.html".to_string(), "<p>home</p>".to_string()),
                ("about/index.html".to_string(), "<p>about</p>".to_string()),
            ],
            assets: vec![("manifest.webmanifest".to_string(), b"{}".to_vec())],
        };

        let written = write_site(&generated, dir.path()).unwrap();
        assert_eq!(written, 3);
        assert_eq!(
            fs::read_to_string(dir.path().join("about/index.html")).unwrap(),
            "<p>about</p>"
        );
        assert!(dir.path().join("manifest.webmanifest").is_file());
    }

    #[test]
    fn test_copy_static_preserves_structure() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        fs::create_dir_all(src.path().join("images")).unwrap();
        fs::write(src.path().join("images/logo.png"), b"png").unwrap();
        fs::write(src.path().join("robots.txt"), b"User-agent: *").unwrap();

        let copied = copy_static(src.path(), out.path()).unwrap();
        assert_eq!(copied, 2);
        assert!(out.path().join("images/logo.png").is_file());
        assert!(out.path().join("robots.txt").is_file());
    }

    #[test]
    fn test_copy_static_missing_dir() {
        let out = TempDir::new().unwrap();
        let copied = copy_static(&out.path().join("static"), out.path()).unwrap();
        assert_eq!(copied, 0);
    }
}
