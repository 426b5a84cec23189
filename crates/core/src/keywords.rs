//! SEO keyword derivation.
//!
//! Keywords are never hand-authored. They are the cross product of a skills
//! list and a list of phrase templates, templates in the outer loop:
//!
//! ```text
//! skills    = ["Rust", "Go"]
//! templates = ["{skill} Developer", "{skill} Articles"]
//! keywords  = ["Rust Developer", "Go Developer", "Rust Articles", "Go Articles"]
//! ```

use crate::error::{Error, Result};

/// Placeholder substituted with each skill name.
pub const SKILL_PLACEHOLDER: &str = "{skill}";

/// Templates used when `[keywords].templates` is omitted.
pub const DEFAULT_TEMPLATES: &[&str] = &["{skill} Developer", "{skill} Programmer", "{skill} Articles"];

/// Expand every template against every skill.
///
/// The result always has `templates.len() * skills.len()` entries.
pub fn derive_keywords<S: AsRef<str>, T: AsRef<str>>(skills: &[S], templates: &[T]) -> Vec<String> {
    templates
        .iter()
        .flat_map(|template| {
            skills
                .iter()
                .map(move |skill| template.as_ref().replace(SKILL_PLACEHOLDER, skill.as_ref()))
        })
        .collect()
}

/// Reject templates that would expand to the same phrase for every skill.
pub fn check_templates<T: AsRef<str>>(templates: &[T]) -> Result<()> {
    for template in templates {
        let template = template.as_ref();
        if !template.contains(SKILL_PLACEHOLDER) {
            return Err(Error::ConfigParse(format!(
                "Keyword template '{}' must contain {}",
                template, SKILL_PLACEHOLDER
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const SKILLS: &[&str] = &["Python", "Django", "JavaScript", "React", "Flutter"];

    #[test]
    fn test_derive_keywords_length_is_product() {
        let keywords = derive_keywords(SKILLS, DEFAULT_TEMPLATES);
        assert_eq!(keywords.len(), SKILLS.len() * DEFAULT_TEMPLATES.len());
    }

    #[test]
    fn test_derive_keywords_each_pair_exactly_once() {
        let keywords = derive_keywords(SKILLS, DEFAULT_TEMPLATES);
        for template in DEFAULT_TEMPLATES {
            for skill in SKILLS {
                let expected = template.replace(SKILL_PLACEHOLDER, skill);
                let count = keywords.iter().filter(|k| **k == expected).count();
                assert_eq!(count, 1, "'{}' should appear exactly once", expected);
            }
        }
        let unique: HashSet<_> = keywords.iter().collect();
        assert_eq!(unique.len(), keywords.len());
    }

    #[test]
    fn test_derive_keywords_templates_outer_loop() {
        let keywords = derive_keywords(&["Rust", "Go"], &["{skill} Developer", "{skill} Articles"]);
        assert_eq!(
            keywords,
            vec!["Rust Developer", "Go Developer", "Rust Articles", "Go Articles"]
        );
    }

    #[test]
    fn test_derive_keywords_empty_inputs() {
        let none: &[&str] = &[];
        assert!(derive_keywords(none, DEFAULT_TEMPLATES).is_empty());
        assert!(derive_keywords(SKILLS, none).is_empty());
    }

    #[test]
    fn test_derive_keywords_is_deterministic() {
        assert_eq!(
            derive_keywords(SKILLS, DEFAULT_TEMPLATES),
            derive_keywords(SKILLS, DEFAULT_TEMPLATES)
        );
    }

    #[test]
    fn test_check_templates() {
        assert!(check_templates(DEFAULT_TEMPLATES).is_ok());

        let result = check_templates(&["{skill} Developer", "Software Developer"]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Software Developer"));
    }
}
