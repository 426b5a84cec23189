use super::load_site;
use folio_validator::{ValidationReport, validate_site};
use std::path::PathBuf;

pub async fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating site at: {}", path.display());

    let site = load_site(&path)?;

    println!("✓ site.toml valid");
    println!("  Site: {} by {}", site.config.site_title, site.config.author);
    println!("  URL: {}", site.config.site_url);
    println!("  Keywords: {}", site.config.keywords.len());

    let report = validate_site(&site, &path);
    print_report(&report);

    if !report.is_valid() {
        anyhow::bail!("Validation failed with {} error(s)", report.errors.len());
    }

    Ok(())
}

pub fn print_report(report: &ValidationReport) {
    for info in &report.info {
        println!("  ℹ {}", info);
    }
    for warning in &report.warnings {
        println!("  ⚠ {}", warning);
    }
    for error in &report.errors {
        eprintln!("  ✗ {}", error);
    }
}
