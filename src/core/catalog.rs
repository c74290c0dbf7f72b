// MainStreet - core/catalog.rs
//
// Catalog loading and listing validation.
// Core layer: accepts TOML strings, never touches the filesystem.
// I/O is handled by app::catalog_mgr which feeds content here.

use crate::core::model::Business;
use crate::util::constants;
use crate::util::error::CatalogError;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

// =============================================================================
// TOML deserialization structures (raw input)
// =============================================================================

/// Raw TOML catalog as deserialized from a .toml file.
/// One catalog file holds any number of `[[listing]]` tables; each listing
/// is validated and compiled into a `Business` for runtime use.
#[derive(Debug, Deserialize)]
pub struct CatalogDefinition {
    #[serde(default)]
    pub listing: Vec<ListingDef>,
}

/// One raw `[[listing]]` table.
#[derive(Debug, Deserialize)]
pub struct ListingDef {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Comma-delimited tag identifiers, e.g. "bakery, family-owned, women".
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    pub website: Option<String>,
}

// =============================================================================
// Parsing and validation
// =============================================================================

/// Parse a TOML string into a `CatalogDefinition`.
///
/// `source_path` is used for error messages only (not for I/O).
pub fn parse_catalog_toml(
    toml_content: &str,
    source_path: &Path,
) -> Result<CatalogDefinition, CatalogError> {
    toml::from_str(toml_content).map_err(|e| CatalogError::TomlParse {
        path: source_path.to_path_buf(),
        source: e,
    })
}

/// Split a comma-delimited tag attribute into a normalised tag set.
///
/// Tags are trimmed and lowercased; empties are dropped and duplicates
/// collapse through set semantics.
pub fn parse_tag_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Validate one raw listing and compile it into a runtime `Business`.
///
/// Validates:
/// - id, name, and category are present and non-empty
/// - the tag set stays within the per-listing cap
///
/// Over-long descriptions are truncated rather than rejected so one verbose
/// catalog entry cannot fail the listing.
pub fn validate_and_build(
    def: ListingDef,
    _source_path: &Path,
    is_builtin: bool,
) -> Result<Business, CatalogError> {
    let id = def.id.trim();
    if id.is_empty() {
        return Err(CatalogError::MissingField {
            listing_id: "(empty)".to_string(),
            field: "id",
        });
    }
    if def.name.trim().is_empty() {
        return Err(CatalogError::MissingField {
            listing_id: id.to_string(),
            field: "name",
        });
    }
    if def.category.trim().is_empty() {
        return Err(CatalogError::MissingField {
            listing_id: id.to_string(),
            field: "category",
        });
    }

    let tags = parse_tag_list(&def.tags);
    if tags.len() > constants::MAX_TAGS_PER_LISTING {
        return Err(CatalogError::TooManyTags {
            listing_id: id.to_string(),
            count: tags.len(),
            max: constants::MAX_TAGS_PER_LISTING,
        });
    }

    let mut description = def.description.trim().to_string();
    if description.chars().count() > constants::MAX_DESCRIPTION_CHARS {
        description = description
            .chars()
            .take(constants::MAX_DESCRIPTION_CHARS)
            .collect::<String>()
            + "\u{2026}";
    }

    let name = def.name.trim().to_string();
    let category = def.category.trim().to_lowercase();
    let address = def.address.trim().to_string();
    let phone = def.phone.trim().to_string();
    let website = def
        .website
        .as_deref()
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string);

    let haystack =
        Business::build_haystack(&name, &category, &tags, &description, &address, &phone);

    Ok(Business {
        id: id.to_string(),
        name,
        category,
        tags,
        description,
        address,
        phone,
        website,
        is_builtin,
        haystack,
    })
}

/// Compile every listing in a parsed catalog file.
///
/// Invalid listings are collected as errors and skipped (non-fatal); a
/// duplicate id within the same file is an error for the later occurrence.
/// Returns the listings that validated plus the per-listing errors.
pub fn build_catalog(
    def: CatalogDefinition,
    source_path: &Path,
    is_builtin: bool,
) -> (Vec<Business>, Vec<CatalogError>) {
    let mut listings: Vec<Business> = Vec::new();
    let mut errors = Vec::new();

    for listing_def in def.listing {
        match validate_and_build(listing_def, source_path, is_builtin) {
            Ok(listing) => {
                if listings.iter().any(|l| l.id == listing.id) {
                    errors.push(CatalogError::DuplicateId {
                        id: listing.id.clone(),
                        path1: source_path.to_path_buf(),
                        path2: source_path.to_path_buf(),
                    });
                    continue;
                }
                listings.push(listing);
            }
            Err(e) => errors.push(e),
        }
    }

    (listings, errors)
}

// =============================================================================
// Built-in catalogs (embedded at compile time)
// =============================================================================

/// Embedded TOML content for the built-in catalogs.
/// Each tuple is (filename, TOML content).
pub fn builtin_catalog_sources() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "eat_drink.toml",
            include_str!("../../listings/eat_drink.toml"),
        ),
        (
            "home_services.toml",
            include_str!("../../listings/home_services.toml"),
        ),
        (
            "retail_health.toml",
            include_str!("../../listings/retail_health.toml"),
        ),
    ]
}

/// Load and validate all built-in catalogs.
///
/// Invalid listings are logged as warnings and skipped (non-fatal).
/// Returns the successfully compiled listings.
pub fn load_builtin_catalogs() -> Vec<Business> {
    let mut listings = Vec::new();
    let mut error_count = 0usize;

    for (filename, content) in builtin_catalog_sources() {
        let path = PathBuf::from(format!("<builtin>/{filename}"));
        match parse_catalog_toml(content, &path) {
            Ok(def) => {
                let (mut built, errors) = build_catalog(def, &path, true);
                for e in &errors {
                    // Built-in catalog failures are bugs, but we still degrade
                    // gracefully rather than refusing to start.
                    tracing::error!(file = filename, error = %e, "Invalid built-in listing");
                }
                error_count += errors.len();
                listings.append(&mut built);
            }
            Err(e) => {
                tracing::error!(file = filename, error = %e, "Failed to parse built-in catalog");
                error_count += 1;
            }
        }
    }

    if error_count > 0 {
        tracing::warn!(count = error_count, "Some built-in listings failed to load");
    }

    listings
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_CATALOG_TOML: &str = r#"
[[listing]]
id = "test-bakery"
name = "Test Bakery"
category = "Restaurants"
tags = "Bakery, family-owned , bakery,"
description = "Fresh bread daily."
address = "1 Main St"
phone = "(865) 555-0101"
website = "https://example.com/bakery"

[[listing]]
id = "test-garage"
name = "Test Garage"
category = "auto"
"#;

    #[test]
    fn parses_valid_catalog() {
        let path = PathBuf::from("test.toml");
        let def = parse_catalog_toml(VALID_CATALOG_TOML, &path).unwrap();
        assert_eq!(def.listing.len(), 2);
        assert_eq!(def.listing[0].id, "test-bakery");
        assert_eq!(def.listing[1].tags, "");
    }

    #[test]
    fn tag_list_is_trimmed_lowercased_and_deduplicated() {
        let tags = parse_tag_list("Bakery, family-owned , bakery,,  ");
        assert_eq!(tags.len(), 2);
        assert!(tags.contains("bakery"));
        assert!(tags.contains("family-owned"));
    }

    #[test]
    fn builds_normalised_listing() {
        let path = PathBuf::from("test.toml");
        let def = parse_catalog_toml(VALID_CATALOG_TOML, &path).unwrap();
        let (listings, errors) = build_catalog(def, &path, false);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(listings.len(), 2);

        let bakery = &listings[0];
        assert_eq!(bakery.category, "restaurants"); // lowercased
        assert_eq!(bakery.tags.len(), 2);
        assert!(!bakery.is_builtin);
        assert!(bakery.haystack.contains("fresh bread"));
        assert_eq!(bakery.website.as_deref(), Some("https://example.com/bakery"));

        let garage = &listings[1];
        assert!(garage.tags.is_empty());
        assert!(garage.website.is_none());
    }

    #[test]
    fn missing_required_field_is_reported() {
        let toml = r#"
[[listing]]
id = "no-name"
name = "   "
category = "retail"
"#;
        let path = PathBuf::from("bad.toml");
        let def = parse_catalog_toml(toml, &path).unwrap();
        let (listings, errors) = build_catalog(def, &path, false);
        assert!(listings.is_empty());
        match &errors[0] {
            CatalogError::MissingField { field, .. } => assert_eq!(*field, "name"),
            other => panic!("Expected MissingField, got: {other:?}"),
        }
    }

    #[test]
    fn duplicate_id_within_file_is_rejected() {
        let toml = r#"
[[listing]]
id = "twice"
name = "First"
category = "retail"

[[listing]]
id = "twice"
name = "Second"
category = "retail"
"#;
        let path = PathBuf::from("dup.toml");
        let def = parse_catalog_toml(toml, &path).unwrap();
        let (listings, errors) = build_catalog(def, &path, false);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].name, "First");
        assert!(matches!(errors[0], CatalogError::DuplicateId { .. }));
    }

    #[test]
    fn too_many_tags_is_rejected() {
        let tags = (0..constants::MAX_TAGS_PER_LISTING + 1)
            .map(|i| format!("tag-{i}"))
            .collect::<Vec<_>>()
            .join(",");
        let toml = format!(
            r#"
[[listing]]
id = "taggy"
name = "Taggy"
category = "retail"
tags = "{tags}"
"#
        );
        let path = PathBuf::from("tags.toml");
        let def = parse_catalog_toml(&toml, &path).unwrap();
        let (listings, errors) = build_catalog(def, &path, false);
        assert!(listings.is_empty());
        assert!(matches!(errors[0], CatalogError::TooManyTags { .. }));
    }

    #[test]
    fn long_descriptions_are_truncated_not_rejected() {
        let long = "x".repeat(constants::MAX_DESCRIPTION_CHARS * 2);
        let toml = format!(
            r#"
[[listing]]
id = "wordy"
name = "Wordy"
category = "retail"
description = "{long}"
"#
        );
        let path = PathBuf::from("wordy.toml");
        let def = parse_catalog_toml(&toml, &path).unwrap();
        let (listings, errors) = build_catalog(def, &path, false);
        assert!(errors.is_empty());
        assert_eq!(
            listings[0].description.chars().count(),
            constants::MAX_DESCRIPTION_CHARS + 1 // ellipsis
        );
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let path = PathBuf::from("broken.toml");
        let result = parse_catalog_toml("[[listing", &path);
        assert!(matches!(result, Err(CatalogError::TomlParse { .. })));
    }

    #[test]
    fn builtin_catalogs_load_cleanly() {
        let listings = load_builtin_catalogs();
        assert!(!listings.is_empty(), "No built-in listings loaded");
        assert!(listings.iter().all(|l| l.is_builtin));

        // The directory the app ships with. Spot-check the fixtures the
        // UI flows lean on.
        assert!(
            listings.iter().any(|l| l.name == "Smoky Mountain Bakehouse"),
            "bakehouse listing missing"
        );
        assert!(
            listings.iter().any(|l| l.name == "Valley HVAC Solutions"),
            "HVAC listing missing"
        );

        // Ids are unique across all built-in files.
        let mut ids: Vec<&str> = listings.iter().map(|l| l.id.as_str()).collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(before, ids.len(), "duplicate ids across built-in catalogs");
    }
}
