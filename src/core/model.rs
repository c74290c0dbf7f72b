// MainStreet - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies (Core depends on std only).
//
// These types are the shared vocabulary across all layers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// =============================================================================
// Business listing (normalised output of catalog loading)
// =============================================================================

/// A single business listing, normalised from its catalog definition.
///
/// This is the core data unit that flows through filtering, display,
/// and export. Listings are read-only after loading: the filter engine
/// only reads them and annotates visibility via index vectors.
#[derive(Debug, Clone, Serialize)]
pub struct Business {
    /// Stable listing identifier (kebab-case, unique within a load).
    pub id: String,

    /// Display name (e.g. "Smoky Mountain Bakehouse").
    pub name: String,

    /// Category identifier (e.g. "restaurants"). Exactly one per listing.
    pub category: String,

    /// Tag identifiers, parsed from the catalog's comma-delimited string.
    /// Ordered set so card badges and exports render deterministically.
    pub tags: BTreeSet<String>,

    /// Short description shown on the card.
    pub description: String,

    /// Street address.
    pub address: String,

    /// Phone number, formatted as given in the catalog.
    pub phone: String,

    /// Website URL, if the business has one.
    pub website: Option<String>,

    /// Whether this listing came from a built-in catalog (true) or a
    /// user-supplied catalog file (false).
    #[serde(skip)]
    pub is_builtin: bool,

    /// Precomputed lowercase search text: name, category label, tags,
    /// description, address, and phone joined. Built once at load so the
    /// per-keystroke filter pass never re-lowercases card content.
    #[serde(skip)]
    pub haystack: String,
}

impl Business {
    /// True if the listing carries the given tag identifier.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Build the lowercase search haystack for a listing's fields.
    ///
    /// Matches what a visitor can see on the card: the category label and
    /// tag labels are included alongside their raw identifiers so a query
    /// for either form hits.
    pub fn build_haystack(
        name: &str,
        category: &str,
        tags: &BTreeSet<String>,
        description: &str,
        address: &str,
        phone: &str,
    ) -> String {
        let mut parts: Vec<String> = vec![
            name.to_string(),
            category.to_string(),
            category_label(category),
            description.to_string(),
            address.to_string(),
            phone.to_string(),
        ];
        for tag in tags {
            parts.push(tag.clone());
            parts.push(tag_label(tag));
        }
        parts.join(" ").to_lowercase()
    }
}

// =============================================================================
// Ownership flags
// =============================================================================

/// Ownership attributes a visitor can filter by, combined with OR semantics.
///
/// Each flag corresponds to a plain tag in the listing's tag set; the
/// filter sidebar surfaces these three with fixed labels while all other
/// tags go through the AND-combined tag filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OwnershipFlag {
    WomenOwned,
    VeteranOwned,
    NewBusiness,
}

impl OwnershipFlag {
    /// Returns all variants in display order.
    pub fn all() -> &'static [OwnershipFlag] {
        &[
            OwnershipFlag::WomenOwned,
            OwnershipFlag::VeteranOwned,
            OwnershipFlag::NewBusiness,
        ]
    }

    /// The tag identifier this flag matches in a listing's tag set.
    pub fn tag(&self) -> &'static str {
        match self {
            OwnershipFlag::WomenOwned => "women",
            OwnershipFlag::VeteranOwned => "veteran",
            OwnershipFlag::NewBusiness => "new",
        }
    }

    /// Fixed human-readable label for chips and checkboxes.
    pub fn label(&self) -> &'static str {
        match self {
            OwnershipFlag::WomenOwned => "Women-owned",
            OwnershipFlag::VeteranOwned => "Veteran-owned",
            OwnershipFlag::NewBusiness => "New business",
        }
    }

    /// Reverse lookup from a tag identifier.
    pub fn from_tag(tag: &str) -> Option<OwnershipFlag> {
        OwnershipFlag::all().iter().copied().find(|f| f.tag() == tag)
    }
}

impl std::fmt::Display for OwnershipFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Display labels
// =============================================================================

/// Human-readable label for a category identifier.
///
/// Known categories get their curated label; anything else (user catalogs
/// can introduce categories freely) falls back to prettified kebab-case.
pub fn category_label(id: &str) -> String {
    match id {
        "restaurants" => "Restaurants & Cafés".to_string(),
        "home-services" => "Home Services".to_string(),
        "retail" => "Retail & Shops".to_string(),
        "health" => "Health & Wellness".to_string(),
        "auto" => "Auto Services".to_string(),
        "outdoors" => "Outdoors & Recreation".to_string(),
        other => prettify(other),
    }
}

/// Human-readable label for a tag identifier.
pub fn tag_label(id: &str) -> String {
    match id {
        "24hour" => "Open 24 Hours".to_string(),
        "family-owned" => "Family-owned".to_string(),
        "takeout" => "Takeout".to_string(),
        "emergency" => "Emergency Service".to_string(),
        "pet-friendly" => "Pet-friendly".to_string(),
        "women" => OwnershipFlag::WomenOwned.label().to_string(),
        "veteran" => OwnershipFlag::VeteranOwned.label().to_string(),
        "new" => OwnershipFlag::NewBusiness.label().to_string(),
        other => prettify(other),
    }
}

/// Title-case a kebab-case identifier: "wood-fired" -> "Wood Fired".
fn prettify(id: &str) -> String {
    id.split('-')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// =============================================================================
// Catalog summary
// =============================================================================

/// Summary statistics for a completed catalog load.
#[derive(Debug, Clone, Default)]
pub struct CatalogSummary {
    /// Total listings loaded (after merging and caps).
    pub total_listings: usize,

    /// Listings that came from built-in catalogs.
    pub builtin_listings: usize,

    /// Listings that came from user catalog files.
    pub user_listings: usize,

    /// Built-in listings replaced by a user listing with the same id.
    pub overridden: usize,

    /// Distinct categories across the loaded set.
    pub categories: usize,

    /// User catalog files that produced at least one load error.
    pub files_with_errors: usize,
}
