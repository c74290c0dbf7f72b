// MainStreet - app/state.rs
//
// Application state management. Holds the loaded catalog, filter state,
// the active modal, and the debounce timers that gate search recompute.
// Owned by the eframe::App implementation; every mutation funnels
// through here so the panels stay declarative.

use crate::app::announce::Announcer;
use crate::app::catalog_mgr::LoadedCatalog;
use crate::app::debounce::Debouncer;
use crate::app::leads::LeadSink;
use crate::core::claim::{ClaimWizard, SelectOutcome};
use crate::core::contact::ContactForm;
use crate::core::export::{self, ExportFormat};
use crate::core::filter::{self, ChipKind, FilterState};
use crate::core::model::{category_label, tag_label, Business, CatalogSummary, OwnershipFlag};
use crate::util::error::ExportError;
use chrono::Utc;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// The one modal that may be open. Holding modal state inside the
/// variant makes a second simultaneous modal unrepresentable, and a
/// fresh variant is built on every open so no stale wizard or draft
/// leaks between runs.
#[derive(Debug)]
pub enum ActiveModal {
    None,
    Contact(ContactForm),
    Claim(ClaimWizard),
}

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// All loaded listings, built-in and user, in load order.
    pub listings: Vec<Business>,

    /// Indices of listings matching the current filter (into `listings`).
    pub filtered_indices: Vec<usize>,

    /// Current filter configuration.
    pub filter_state: FilterState,

    /// Live contents of the main search box. Committed into
    /// `filter_state.search` only when the debounce window closes.
    pub search_input: String,

    /// Debounce slot for the main search box.
    pub search_debounce: Debouncer,

    /// Debounce slot for the claim wizard's search box.
    pub claim_debounce: Debouncer,

    /// Debounce window in milliseconds, adjustable from Options.
    pub search_debounce_ms: u64,

    /// The currently open modal, if any.
    pub active_modal: ActiveModal,

    /// Assistive announcements (status bar + log).
    pub announcer: Announcer,

    /// Distinct category ids, sorted by display label.
    pub categories: Vec<String>,

    /// Distinct filterable tag ids, sorted by display label. Ownership
    /// tags are excluded; those get their own checkbox group.
    pub tag_vocabulary: Vec<String>,

    /// Summary of the catalog load, shown in the About dialog.
    pub catalog_summary: CatalogSummary,

    /// Display strings for non-fatal catalog load errors.
    pub load_warnings: Vec<String>,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// Whether to show the Options dialog.
    pub show_options: bool,

    /// Dark colour scheme (light when false).
    pub dark_mode: bool,

    /// Base UI font size in points.
    pub ui_font_size: f32,

    /// Directory scanned for user catalog files, resolved at startup.
    pub user_listings_dir: Option<PathBuf>,

    /// Listing cap applied on (re)load.
    pub max_listings: usize,

    /// URL a directory card asked to open externally; consumed by the
    /// frame loop, which owns platform access.
    pub pending_website: Option<String>,

    /// Folder the Options panel asked to reveal; consumed by the frame loop.
    pub pending_open_dir: Option<PathBuf>,

    /// Set when Options requests a catalog reload; consumed by the frame loop.
    pub request_reload_catalogs: bool,
}

/// Distinct category ids in a listing set, sorted by display label.
fn distinct_categories(listings: &[Business]) -> Vec<String> {
    let distinct: BTreeSet<&str> = listings.iter().map(|l| l.category.as_str()).collect();
    let mut ids: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    ids.sort_by_key(|id| category_label(id));
    ids
}

/// Distinct filterable tag ids, sorted by display label. Ownership tags
/// are excluded; those get their own checkbox group.
fn distinct_tags(listings: &[Business]) -> Vec<String> {
    let distinct: BTreeSet<&str> = listings
        .iter()
        .flat_map(|l| l.tags.iter())
        .map(String::as_str)
        .filter(|t| OwnershipFlag::from_tag(t).is_none())
        .collect();
    let mut ids: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    ids.sort_by_key(|id| tag_label(id));
    ids
}

impl AppState {
    /// Create initial state from a loaded catalog. Filters start empty
    /// and every listing is visible.
    pub fn new(catalog: LoadedCatalog, debounce: Duration) -> Self {
        let LoadedCatalog {
            listings,
            summary,
            errors,
        } = catalog;

        let categories = distinct_categories(&listings);
        let tag_vocabulary = distinct_tags(&listings);
        let filtered_indices = (0..listings.len()).collect();
        let load_warnings = errors.iter().map(|e| e.to_string()).collect();

        Self {
            listings,
            filtered_indices,
            filter_state: FilterState::default(),
            search_input: String::new(),
            search_debounce: Debouncer::new(debounce),
            claim_debounce: Debouncer::new(debounce),
            search_debounce_ms: debounce.as_millis() as u64,
            active_modal: ActiveModal::None,
            announcer: Announcer::new(),
            categories,
            tag_vocabulary,
            catalog_summary: summary,
            load_warnings,
            show_about: false,
            show_options: false,
            dark_mode: true,
            ui_font_size: crate::util::constants::DEFAULT_FONT_SIZE,
            user_listings_dir: None,
            max_listings: crate::util::constants::MAX_LISTINGS,
            pending_website: None,
            pending_open_dir: None,
            request_reload_catalogs: false,
        }
    }

    /// Swap in a freshly loaded catalog (the Options "Reload" action).
    /// Stale filter selections pointing at ids that no longer exist are
    /// dropped, then the current filters are re-applied.
    pub fn replace_catalog(&mut self, catalog: LoadedCatalog) {
        let LoadedCatalog {
            listings,
            summary,
            errors,
        } = catalog;

        self.listings = listings;
        self.categories = distinct_categories(&self.listings);
        self.tag_vocabulary = distinct_tags(&self.listings);
        self.catalog_summary = summary;
        self.load_warnings = errors.iter().map(|e| e.to_string()).collect();

        if let Some(cat) = &self.filter_state.category {
            if !self.categories.contains(cat) {
                self.filter_state.category = None;
            }
        }
        self.filter_state
            .tags
            .retain(|t| self.tag_vocabulary.contains(t));

        self.filtered_indices = filter::apply_filters(&self.listings, &self.filter_state);
        self.announcer.announce(format!(
            "Catalog reloaded. {} businesses available.",
            self.total_count()
        ));
    }

    pub fn total_count(&self) -> usize {
        self.listings.len()
    }

    pub fn visible_count(&self) -> usize {
        self.filtered_indices.len()
    }

    /// Page scroll is locked exactly while a modal is open. Derived, so
    /// it cannot drift out of step with the modal itself.
    pub fn scroll_locked(&self) -> bool {
        !matches!(self.active_modal, ActiveModal::None)
    }

    // -------------------------------------------------------------------------
    // Filtering
    // -------------------------------------------------------------------------

    /// Recompute visible listings and announce the result count.
    pub fn refresh_filters(&mut self) {
        self.filtered_indices = filter::apply_filters(&self.listings, &self.filter_state);
        let message = self.count_message();
        self.announcer.announce(message);
    }

    fn count_message(&self) -> String {
        let total = self.total_count();
        let shown = self.visible_count();
        if self.filter_state.is_empty() {
            format!("Showing all {total} businesses.")
        } else if shown == 0 {
            "No businesses match your filters.".to_string()
        } else {
            format!("{shown} of {total} businesses shown.")
        }
    }

    /// The main search box changed; (re)start its debounce window.
    pub fn search_edited(&mut self, now: Instant) {
        self.search_debounce.schedule(now);
    }

    /// Apply the search box contents immediately, discarding any pending
    /// debounce. Used on debounce fire and on explicit Enter.
    pub fn commit_search(&mut self) {
        self.search_debounce.cancel();
        self.filter_state.search = self.search_input.clone();
        self.refresh_filters();
    }

    /// Select a category by id. Unknown ids are refused so a typo on the
    /// command line cannot silently filter everything out.
    pub fn set_category(&mut self, id: &str) -> bool {
        if !self.categories.iter().any(|c| c == id) {
            return false;
        }
        self.filter_state.category = Some(id.to_string());
        self.refresh_filters();
        true
    }

    /// Reset every filter ("clear all").
    pub fn clear_filters(&mut self) {
        self.filter_state.clear();
        self.search_input.clear();
        self.search_debounce.cancel();
        self.filtered_indices = filter::apply_filters(&self.listings, &self.filter_state);
        self.announcer.announce(format!(
            "All filters cleared. Showing all {} businesses.",
            self.total_count()
        ));
    }

    /// Remove one active-filter chip. The search chip also clears the
    /// live input so the box does not re-apply the old query.
    pub fn remove_chip(&mut self, kind: &ChipKind) {
        if *kind == ChipKind::Search {
            self.search_input.clear();
            self.search_debounce.cancel();
        }
        filter::remove_chip(&mut self.filter_state, kind);
        self.refresh_filters();
    }

    // -------------------------------------------------------------------------
    // Debounce pump
    // -------------------------------------------------------------------------

    /// Advance both debounce slots. Returns true if anything fired and
    /// state changed, so the frame loop knows to repaint.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if self.search_debounce.fire(now) {
            self.filter_state.search = self.search_input.clone();
            self.refresh_filters();
            changed = true;
        }

        if self.claim_debounce.fire(now) {
            if let ActiveModal::Claim(wizard) = &mut self.active_modal {
                wizard.commit_query();
                changed = true;
            }
        }

        changed
    }

    /// Earliest pending debounce deadline, as a wait duration. None when
    /// both slots are idle.
    pub fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        match (
            self.search_debounce.time_remaining(now),
            self.claim_debounce.time_remaining(now),
        ) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (Some(a), None) => Some(a),
            (None, Some(b)) => Some(b),
            (None, None) => None,
        }
    }

    /// Change the debounce window for both search boxes.
    pub fn set_debounce_ms(&mut self, ms: u64) {
        self.search_debounce_ms = ms;
        let delay = Duration::from_millis(ms);
        self.search_debounce.set_delay(delay);
        self.claim_debounce.set_delay(delay);
    }

    // -------------------------------------------------------------------------
    // Modals
    // -------------------------------------------------------------------------

    /// Open the contact modal for one business. Replaces any modal that
    /// is already open.
    pub fn open_contact(&mut self, business: &str) {
        self.claim_debounce.cancel();
        self.active_modal = ActiveModal::Contact(ContactForm::open(business));
    }

    /// Open the claim wizard at step 1 with nothing selected.
    pub fn open_claim(&mut self) {
        self.claim_debounce.cancel();
        self.active_modal = ActiveModal::Claim(ClaimWizard::new());
    }

    /// Dismiss whichever modal is open and restore page scroll.
    pub fn close_modal(&mut self) {
        self.claim_debounce.cancel();
        self.active_modal = ActiveModal::None;
    }

    /// The claim wizard's search box changed; (re)start its window.
    pub fn claim_query_edited(&mut self, now: Instant) {
        self.claim_debounce.schedule(now);
    }

    /// Try to select a claim-search result. Claimed listings are refused
    /// and the refusal is announced; nothing else changes.
    pub fn select_claim_result(&mut self, name: &str) {
        if let ActiveModal::Claim(wizard) = &mut self.active_modal {
            match wizard.select(name) {
                SelectOutcome::Selected => {
                    self.announcer
                        .announce(format!("{name} selected. Choose Next to continue."));
                }
                SelectOutcome::Rejected => {
                    self.announcer
                        .announce(format!("{name} has already been claimed."));
                }
            }
        }
    }

    /// Submit the contact form through the given sink. On success the
    /// modal flips to its confirmation view and stays open; on failure
    /// the form keeps the draft and shows the reason.
    pub fn submit_contact(&mut self, sink: &mut dyn LeadSink) {
        if let ActiveModal::Contact(form) = &mut self.active_modal {
            let Some(lead) = form.build_lead(Utc::now()) else {
                return;
            };
            match sink.deliver(&lead) {
                Ok(()) => {
                    form.mark_submitted();
                    self.announcer
                        .announce(format!("Message sent to {}.", lead.business));
                }
                Err(e) => {
                    tracing::warn!(error = %e, business = %lead.business, "Lead delivery failed");
                    form.mark_failed(e.to_string());
                    self.announcer
                        .announce(format!("Message to {} could not be sent.", lead.business));
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Export the currently visible listings to a file.
    pub fn export_visible(
        &mut self,
        path: &Path,
        format: ExportFormat,
    ) -> Result<usize, ExportError> {
        let visible: Vec<Business> = self
            .filtered_indices
            .iter()
            .map(|&idx| self.listings[idx].clone())
            .collect();

        let file = File::create(path).map_err(|e| ExportError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let writer = BufWriter::new(file);

        let count = match format {
            ExportFormat::Csv => export::export_csv(&visible, writer, path)?,
            ExportFormat::Json => export::export_json(&visible, writer, path)?,
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.announcer
            .announce(format!("Exported {count} listings to {name}."));

        Ok(count)
    }
}
