// MainStreet - core/filter.rs
//
// Composable filter engine for business listings.
// All active criteria are AND-combined across groups; the ownership group
// is OR-combined internally and the tag group is AND-combined internally.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{category_label, tag_label, Business, OwnershipFlag};
use std::collections::HashSet;

/// Complete filter state. Groups are applied in a fixed order with
/// short-circuit evaluation: search, then category, then ownership,
/// then tags.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    /// Free-text query. Lowercased and split on whitespace before matching;
    /// every term must appear in the listing's haystack. Empty = no filter.
    pub search: String,

    /// Category identifier. None = no filter. At most one category can be
    /// active at a time (single value, not a set).
    pub category: Option<String>,

    /// Tag identifiers, AND-combined: a listing must carry all of them.
    pub tags: HashSet<String>,

    /// Ownership flags, OR-combined: a listing must carry at least one.
    pub ownership: HashSet<OwnershipFlag>,
}

impl FilterState {
    /// Returns true if no filters are active.
    pub fn is_empty(&self) -> bool {
        self.search.trim().is_empty()
            && self.category.is_none()
            && self.tags.is_empty()
            && self.ownership.is_empty()
    }

    /// Reset every field to its default ("clear all").
    pub fn clear(&mut self) {
        *self = FilterState::default();
    }

    /// Normalised search terms: lowercased, whitespace-split, empty-safe.
    pub fn search_terms(&self) -> Vec<String> {
        self.search
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }
}

/// Apply filters to a slice of listings, returning indices of visible ones.
///
/// Returns a Vec of indices into the original slice. This avoids copying
/// listings and lets the card panel render straight off the filtered view.
/// Every mutation triggers a full O(n) re-scan; the dataset is small and
/// static so no per-combination caching is kept.
pub fn apply_filters(listings: &[Business], filter: &FilterState) -> Vec<usize> {
    if filter.is_empty() {
        return (0..listings.len()).collect();
    }

    let terms = filter.search_terms();

    listings
        .iter()
        .enumerate()
        .filter(|(_, listing)| matches_terms(listing, filter, &terms))
        .map(|(idx, _)| idx)
        .collect()
}

/// Visibility decision for a single listing against the current filters.
///
/// Pure function of (filter, listing); exposed so card visibility can be
/// unit-tested without a rendering surface.
pub fn matches_listing(listing: &Business, filter: &FilterState) -> bool {
    matches_terms(listing, filter, &filter.search_terms())
}

/// Check a single listing with pre-split search terms.
/// Criteria are evaluated in fixed order; the first miss wins.
fn matches_terms(listing: &Business, filter: &FilterState, terms: &[String]) -> bool {
    // 1. Search: every term must be a substring of the haystack (AND of
    // terms, not phrase match).
    if !terms.is_empty() && !terms.iter().all(|t| listing.haystack.contains(t.as_str())) {
        return false;
    }

    // 2. Category: exact identifier equality.
    if let Some(ref category) = filter.category {
        if listing.category != *category {
            return false;
        }
    }

    // 3. Ownership: at least one flag's tag present (OR).
    if !filter.ownership.is_empty()
        && !filter.ownership.iter().any(|f| listing.has_tag(f.tag()))
    {
        return false;
    }

    // 4. Tags: all selected tags present (AND).
    if !filter.tags.is_empty() && !filter.tags.iter().all(|t| listing.has_tag(t)) {
        return false;
    }

    true
}

// =============================================================================
// Active-filter summary (chips)
// =============================================================================

/// Identifies which filter field a chip removes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChipKind {
    /// The free-text query.
    Search,
    /// The single active category.
    Category,
    /// One ownership flag.
    Ownership(OwnershipFlag),
    /// One selected tag.
    Tag(String),
}

/// One removable entry in the active-filters summary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub kind: ChipKind,
    pub label: String,
}

/// Build the active-filter chips for the current state.
///
/// Order is fixed: search, category, ownership flags (display order),
/// then tags (sorted). Empty when no filter is active, which is also the
/// signal to hide the clear-all action.
pub fn active_chips(filter: &FilterState) -> Vec<FilterChip> {
    let mut chips = Vec::new();

    let query = filter.search.trim();
    if !query.is_empty() {
        chips.push(FilterChip {
            kind: ChipKind::Search,
            label: format!("Search: \"{query}\""),
        });
    }

    if let Some(ref category) = filter.category {
        chips.push(FilterChip {
            kind: ChipKind::Category,
            label: category_label(category),
        });
    }

    for flag in OwnershipFlag::all() {
        if filter.ownership.contains(flag) {
            chips.push(FilterChip {
                kind: ChipKind::Ownership(*flag),
                label: flag.label().to_string(),
            });
        }
    }

    let mut tags: Vec<&String> = filter.tags.iter().collect();
    tags.sort();
    for tag in tags {
        chips.push(FilterChip {
            kind: ChipKind::Tag(tag.clone()),
            label: tag_label(tag),
        });
    }

    chips
}

/// Remove the single filter field a chip stands for.
///
/// Mutates exactly one field; the caller re-runs `apply_filters` afterwards.
pub fn remove_chip(filter: &mut FilterState, kind: &ChipKind) {
    match kind {
        ChipKind::Search => filter.search.clear(),
        ChipKind::Category => filter.category = None,
        ChipKind::Ownership(flag) => {
            filter.ownership.remove(flag);
        }
        ChipKind::Tag(tag) => {
            filter.tags.remove(tag);
        }
    }
}
