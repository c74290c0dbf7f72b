// MainStreet - tests/e2e_directory.rs
//
// End-to-end tests for the directory: catalog loading, debounced search,
// filtering, the claim wizard, modal exclusivity, contact submission,
// and export.
//
// These tests drive the real AppState with real catalog files on disk
// and explicit clocks for the debounce windows. No egui context is
// involved; the panels are declarative over this state, so everything
// user-visible is decided here.

use mainstreet::app::catalog_mgr::load_all_listings;
use mainstreet::app::leads::LeadSink;
use mainstreet::app::state::{ActiveModal, AppState};
use mainstreet::core::claim::VerificationMethod;
use mainstreet::core::contact::{ContactView, Lead};
use mainstreet::core::export::ExportFormat;
use mainstreet::core::filter::{active_chips, ChipKind};
use mainstreet::core::model::OwnershipFlag;
use mainstreet::util::constants;
use mainstreet::util::error::{CatalogError, LeadError};
use std::fs;
use std::time::{Duration, Instant};

// =============================================================================
// Helpers
// =============================================================================

/// The stock debounce window used throughout these tests.
const WINDOW: Duration = Duration::from_millis(300);

/// State over the built-in catalog only, with the stock debounce window.
fn builtin_state() -> AppState {
    let loaded = load_all_listings(None, constants::MAX_LISTINGS);
    AppState::new(loaded, WINDOW)
}

/// Names of the currently visible listings, in display order.
fn visible_names(state: &AppState) -> Vec<String> {
    state
        .filtered_indices
        .iter()
        .map(|&idx| state.listings[idx].name.clone())
        .collect()
}

/// Lead sink that records every delivered lead.
#[derive(Default)]
struct RecordingSink {
    delivered: Vec<Lead>,
}

impl LeadSink for RecordingSink {
    fn deliver(&mut self, lead: &Lead) -> Result<(), LeadError> {
        self.delivered.push(lead.clone());
        Ok(())
    }
}

/// Lead sink that refuses every delivery.
struct RejectingSink;

impl LeadSink for RejectingSink {
    fn deliver(&mut self, _lead: &Lead) -> Result<(), LeadError> {
        Err(LeadError::Rejected {
            reason: "lead relay offline".to_string(),
        })
    }
}

// =============================================================================
// Catalog E2E
// =============================================================================

/// The built-in catalog loads cleanly: thirteen listings, no errors, and
/// a summary that agrees with the listing set.
#[test]
fn e2e_builtin_catalog_loads_cleanly() {
    let loaded = load_all_listings(None, constants::MAX_LISTINGS);

    assert!(
        loaded.errors.is_empty(),
        "built-in catalogs should load without errors: {:?}",
        loaded.errors
    );
    assert_eq!(loaded.listings.len(), 13, "expected the 13 built-in listings");

    let names: Vec<&str> = loaded.listings.iter().map(|l| l.name.as_str()).collect();
    assert!(names.contains(&"Smoky Mountain Bakehouse"), "missing bakehouse in {names:?}");
    assert!(names.contains(&"Valley HVAC Solutions"), "missing HVAC in {names:?}");
    assert!(
        names.contains(&"Oak Ridge Hardware & Rental"),
        "missing hardware store in {names:?}"
    );

    assert_eq!(loaded.summary.total_listings, 13);
    assert_eq!(loaded.summary.builtin_listings, 13);
    assert_eq!(loaded.summary.user_listings, 0);
    assert_eq!(loaded.summary.overridden, 0);
    assert_eq!(loaded.summary.categories, 6, "six built-in categories");
    assert_eq!(loaded.summary.files_with_errors, 0);

    // Every built-in listing is flagged as such.
    assert!(loaded.listings.iter().all(|l| l.is_builtin));
}

/// User catalog files merge with the built-ins; a matching id replaces
/// the built-in listing instead of duplicating it.
#[test]
fn e2e_user_catalog_merges_and_overrides_by_id() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = r#"
[[listing]]
id = "smoky-mountain-bakehouse"
name = "Smoky Mountain Bakehouse"
category = "restaurants"
tags = "bakery, women, takeout"
description = "Under new management. Sourdough subscriptions now available."
address = "114 River Rd, Townsend, TN 37882"
phone = "(865) 555-0999"

[[listing]]
id = "walland-general-store"
name = "Walland General Store"
category = "retail"
tags = "family-owned"
description = "Groceries, bait, and biscuit sandwiches at the Walland bend."
address = "730 Walland Hwy, Walland, TN 37886"
phone = "(865) 555-0201"
"#;
    fs::write(dir.path().join("my_listings.toml"), catalog).unwrap();

    let loaded = load_all_listings(Some(dir.path()), constants::MAX_LISTINGS);

    assert!(loaded.errors.is_empty(), "unexpected errors: {:?}", loaded.errors);
    assert_eq!(loaded.listings.len(), 14, "13 built-ins, 1 override, 1 new");
    assert_eq!(loaded.summary.overridden, 1);
    assert_eq!(loaded.summary.user_listings, 2);
    assert_eq!(loaded.summary.builtin_listings, 12);

    let bakehouse = loaded
        .listings
        .iter()
        .find(|l| l.id == "smoky-mountain-bakehouse")
        .unwrap();
    assert_eq!(bakehouse.phone, "(865) 555-0999", "override should replace the built-in");
    assert!(!bakehouse.is_builtin);

    assert!(loaded.listings.iter().any(|l| l.id == "walland-general-store"));
}

/// A broken catalog file is reported and skipped; valid files in the
/// same directory still load.
#[test]
fn e2e_broken_catalog_file_is_skipped_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("broken.toml"), "[[listing]\nid = ").unwrap();
    fs::write(
        dir.path().join("good.toml"),
        r#"
[[listing]]
id = "walland-general-store"
name = "Walland General Store"
category = "retail"
tags = "family-owned"
description = "Groceries, bait, and biscuit sandwiches at the Walland bend."
address = "730 Walland Hwy, Walland, TN 37886"
phone = "(865) 555-0201"
"#,
    )
    .unwrap();

    let loaded = load_all_listings(Some(dir.path()), constants::MAX_LISTINGS);

    assert_eq!(loaded.listings.len(), 14, "the good file should still load");
    assert!(
        loaded
            .errors
            .iter()
            .any(|e| matches!(e, CatalogError::TomlParse { .. })),
        "expected a parse error, got {:?}",
        loaded.errors
    );
    assert_eq!(loaded.summary.files_with_errors, 1);
}

/// The listing cap truncates the merged set and reports the overflow.
#[test]
fn e2e_listing_cap_truncates_and_reports() {
    let loaded = load_all_listings(None, 5);

    assert_eq!(loaded.listings.len(), 5);
    assert_eq!(loaded.summary.total_listings, 5);
    assert!(
        loaded
            .errors
            .iter()
            .any(|e| matches!(e, CatalogError::TooManyListings { count: 13, max: 5 })),
        "expected TooManyListings, got {:?}",
        loaded.errors
    );
}

// =============================================================================
// Search debounce E2E
// =============================================================================

/// Typing starts a debounce window; results change only once the window
/// closes, and the result count is announced.
#[test]
fn e2e_search_commits_on_the_trailing_edge() {
    let mut state = builtin_state();
    let total = state.total_count();
    let t0 = Instant::now();

    state.search_input = "bakehouse".to_string();
    state.search_edited(t0);

    // Inside the window nothing has been applied yet.
    assert!(!state.tick(t0 + Duration::from_millis(299)));
    assert_eq!(state.visible_count(), total, "results must not change mid-window");

    // The trailing edge commits the query.
    assert!(state.tick(t0 + WINDOW));
    assert_eq!(visible_names(&state), vec!["Smoky Mountain Bakehouse"]);

    let live = state.announcer.live().unwrap();
    assert!(live.contains("1 of 13"), "unexpected announcement: {live}");
}

/// Every keystroke restarts the window; only the final pause commits.
#[test]
fn e2e_retyping_restarts_the_debounce_window() {
    let mut state = builtin_state();
    let t0 = Instant::now();

    state.search_input = "bake".to_string();
    state.search_edited(t0);

    // A second edit 200ms in pushes the deadline to t0+500ms.
    state.search_input = "bakehouse".to_string();
    state.search_edited(t0 + Duration::from_millis(200));

    assert!(
        !state.tick(t0 + Duration::from_millis(300)),
        "the original deadline was replaced and must not fire"
    );
    assert!(state.tick(t0 + Duration::from_millis(500)));
    assert_eq!(visible_names(&state), vec!["Smoky Mountain Bakehouse"]);
}

/// Enter applies the query immediately and cancels the pending window,
/// so the debounce cannot fire a second time afterwards.
#[test]
fn e2e_enter_commits_immediately_and_cancels_the_window() {
    let mut state = builtin_state();
    let t0 = Instant::now();

    state.search_input = "valley hvac".to_string();
    state.search_edited(t0);
    state.commit_search();

    assert_eq!(visible_names(&state), vec!["Valley HVAC Solutions"]);
    assert!(state.next_wakeup(t0).is_none(), "no pending deadline after commit");
    assert!(!state.tick(t0 + Duration::from_secs(5)), "nothing left to fire");
}

// =============================================================================
// Filtering E2E
// =============================================================================

/// Search terms are AND-combined and order-independent; an unmatched
/// query shows the empty state and announces it.
#[test]
fn e2e_search_terms_match_in_any_order() {
    let mut state = builtin_state();

    state.search_input = "oak ridge".to_string();
    state.commit_search();
    assert_eq!(visible_names(&state), vec!["Oak Ridge Hardware & Rental"]);

    state.search_input = "ridge oak".to_string();
    state.commit_search();
    assert_eq!(
        visible_names(&state),
        vec!["Oak Ridge Hardware & Rental"],
        "term order must not matter"
    );

    state.search_input = "zzz".to_string();
    state.commit_search();
    assert!(visible_names(&state).is_empty());
    assert_eq!(
        state.announcer.live(),
        Some("No businesses match your filters.")
    );
}

/// Category narrows to one id; ownership flags then OR among themselves
/// and AND against the rest. An unknown category id is refused.
#[test]
fn e2e_category_and_ownership_filters_combine() {
    let mut state = builtin_state();

    assert!(state.set_category("retail"));
    assert_eq!(
        visible_names(&state),
        vec!["Oak Ridge Hardware & Rental", "Main Street Books"]
    );

    state.filter_state.ownership.insert(OwnershipFlag::WomenOwned);
    state.refresh_filters();
    assert_eq!(visible_names(&state), vec!["Main Street Books"]);

    // Adding a second flag widens the ownership group (OR within it).
    state.filter_state.ownership.insert(OwnershipFlag::NewBusiness);
    state.refresh_filters();
    assert_eq!(visible_names(&state), vec!["Main Street Books"]);

    let before = visible_names(&state);
    assert!(!state.set_category("boats"), "unknown category id must be refused");
    assert_eq!(visible_names(&state), before, "refused id must change nothing");
}

/// Chips mirror the active filters in a fixed order; removing one chip
/// drops exactly that filter, and clear-all restores the full directory.
#[test]
fn e2e_chips_mirror_filters_and_remove_singly() {
    let mut state = builtin_state();

    state.search_input = "family".to_string();
    state.commit_search();
    state.set_category("restaurants");
    state.filter_state.ownership.insert(OwnershipFlag::VeteranOwned);
    state.filter_state.tags.insert("takeout".to_string());
    state.refresh_filters();

    let labels: Vec<String> = active_chips(&state.filter_state)
        .into_iter()
        .map(|chip| chip.label)
        .collect();
    assert_eq!(
        labels,
        vec![
            "Search: \"family\"",
            "Restaurants & Cafés",
            "Veteran-owned",
            "Takeout",
        ]
    );

    // Removing the search chip also clears the live input, so the box
    // cannot re-apply the old query on the next debounce.
    state.remove_chip(&ChipKind::Search);
    assert!(state.search_input.is_empty());
    assert!(state.filter_state.search.is_empty());
    assert_eq!(active_chips(&state.filter_state).len(), 3);

    state.clear_filters();
    assert!(active_chips(&state.filter_state).is_empty());
    assert_eq!(state.visible_count(), state.total_count());
    let live = state.announcer.live().unwrap();
    assert!(live.contains("All filters cleared"), "unexpected announcement: {live}");
}

// =============================================================================
// Claim wizard E2E
// =============================================================================

/// The wizard's search box shares the debounce discipline: results stay
/// put until the window closes, then "bakehouse" matches exactly one
/// available entry.
#[test]
fn e2e_claim_search_is_debounced() {
    let mut state = builtin_state();
    let t0 = Instant::now();

    state.open_claim();
    {
        let ActiveModal::Claim(wizard) = &mut state.active_modal else {
            panic!("claim wizard should be open");
        };
        wizard.set_query("bakehouse");
    }
    state.claim_query_edited(t0);

    {
        let ActiveModal::Claim(wizard) = &state.active_modal else {
            panic!("claim wizard should be open");
        };
        assert!(wizard.results().is_empty(), "no results before the window closes");
        assert!(!wizard.has_committed_query());
    }

    assert!(state.tick(t0 + WINDOW));

    let ActiveModal::Claim(wizard) = &state.active_modal else {
        panic!("claim wizard should be open");
    };
    let results = wizard.results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Smoky Mountain Bakehouse");
    assert!(!results[0].claimed);
}

/// Selecting a claimed entry is announced and changes nothing, including
/// an earlier valid selection.
#[test]
fn e2e_claimed_listing_rejected_with_announcement() {
    let mut state = builtin_state();
    state.open_claim();

    state.select_claim_result("Parkway Diner");
    {
        let ActiveModal::Claim(wizard) = &state.active_modal else {
            panic!("claim wizard should be open");
        };
        assert!(wizard.selected.is_none());
        assert_eq!(wizard.step, 1);
        assert!(!wizard.can_advance());
    }
    let live = state.announcer.live().unwrap();
    assert!(
        live.contains("Parkway Diner has already been claimed"),
        "unexpected announcement: {live}"
    );

    state.select_claim_result("Smoky Mountain Bakehouse");
    let live = state.announcer.live().unwrap();
    assert!(live.contains("selected"), "unexpected announcement: {live}");

    // A later rejection must not clobber the valid selection.
    state.select_claim_result("Cades Cove Outfitters");
    let ActiveModal::Claim(wizard) = &state.active_modal else {
        panic!("claim wizard should be open");
    };
    assert_eq!(wizard.selected.as_deref(), Some("Smoky Mountain Bakehouse"));
}

/// A full walkthrough reaches the confirmation step; closing and
/// reopening starts over with a fresh wizard.
#[test]
fn e2e_wizard_walkthrough_and_reset_on_reopen() {
    let mut state = builtin_state();
    state.open_claim();

    {
        let ActiveModal::Claim(wizard) = &mut state.active_modal else {
            panic!("claim wizard should be open");
        };
        wizard.set_query("foothills");
        wizard.commit_query();
        assert_eq!(wizard.results().len(), 1);
    }
    state.select_claim_result("Foothills Auto Care");

    {
        let ActiveModal::Claim(wizard) = &mut state.active_modal else {
            panic!("claim wizard should be open");
        };
        wizard.advance();
        assert_eq!(wizard.step, 2);
        assert!(wizard.back_visible());

        wizard.choose_method(VerificationMethod::PhoneCall);
        wizard.advance();
        assert!(wizard.is_terminal());
        assert_eq!(wizard.primary_label(), "Done");
    }

    state.close_modal();
    assert!(matches!(state.active_modal, ActiveModal::None));

    state.open_claim();
    let ActiveModal::Claim(wizard) = &state.active_modal else {
        panic!("claim wizard should be open");
    };
    assert_eq!(wizard.step, 1, "reopen must start over");
    assert!(wizard.query.is_empty());
    assert!(wizard.selected.is_none());
    assert!(wizard.method.is_none());
}

// =============================================================================
// Modal exclusivity E2E
// =============================================================================

/// Opening a modal replaces whichever one is already open, and page
/// scroll is locked exactly while one is showing.
#[test]
fn e2e_one_modal_at_a_time() {
    let mut state = builtin_state();
    assert!(!state.scroll_locked());

    state.open_contact("Parkway Diner");
    assert!(matches!(state.active_modal, ActiveModal::Contact(_)));
    assert!(state.scroll_locked());

    state.open_claim();
    assert!(matches!(state.active_modal, ActiveModal::Claim(_)));
    assert!(state.scroll_locked());

    state.open_contact("Main Street Books");
    {
        let ActiveModal::Contact(form) = &state.active_modal else {
            panic!("contact modal should be open");
        };
        assert_eq!(form.business, "Main Street Books");
    }

    state.close_modal();
    assert!(matches!(state.active_modal, ActiveModal::None));
    assert!(!state.scroll_locked());
}

/// Switching away from the claim wizard drops its pending debounce, so
/// a stale deadline cannot fire into the replacement modal.
#[test]
fn e2e_modal_switch_cancels_pending_claim_debounce() {
    let mut state = builtin_state();
    let t0 = Instant::now();

    state.open_claim();
    state.claim_query_edited(t0);
    assert!(state.next_wakeup(t0).is_some());

    state.open_contact("Parkway Diner");
    assert!(state.next_wakeup(t0).is_none());
    assert!(!state.tick(t0 + Duration::from_secs(5)));
}

// =============================================================================
// Contact modal E2E
// =============================================================================

/// A complete submission reaches the sink once, flips the modal to its
/// confirmation view, and leaves it open.
#[test]
fn e2e_contact_submission_confirms_without_closing() {
    let mut state = builtin_state();
    state.open_contact("Valley HVAC Solutions");

    {
        let ActiveModal::Contact(form) = &mut state.active_modal else {
            panic!("contact modal should be open");
        };
        form.name = "Dana Whitt".to_string();
        form.email = "dana@example.com".to_string();
        form.message = "Upstairs unit is short-cycling.".to_string();
    }

    let mut sink = RecordingSink::default();
    state.submit_contact(&mut sink);

    assert_eq!(sink.delivered.len(), 1);
    assert_eq!(sink.delivered[0].business, "Valley HVAC Solutions");

    let ActiveModal::Contact(form) = &state.active_modal else {
        panic!("modal must stay open after submission");
    };
    assert_eq!(form.view, ContactView::Submitted);
    assert_eq!(
        state.announcer.live(),
        Some("Message sent to Valley HVAC Solutions.")
    );
}

/// Required fields gate submission; an incomplete form never reaches
/// the sink.
#[test]
fn e2e_incomplete_contact_form_never_reaches_the_sink() {
    let mut state = builtin_state();
    state.open_contact("Parkway Diner");

    {
        let ActiveModal::Contact(form) = &mut state.active_modal else {
            panic!("contact modal should be open");
        };
        form.name = "Dana Whitt".to_string();
        // Email and message still blank.
    }

    let mut sink = RecordingSink::default();
    state.submit_contact(&mut sink);

    assert!(sink.delivered.is_empty());
    let ActiveModal::Contact(form) = &state.active_modal else {
        panic!("contact modal should be open");
    };
    assert_eq!(form.view, ContactView::Form);
}

/// A failed delivery keeps the draft and the form view with the reason
/// inline; a retry through a working sink then succeeds.
#[test]
fn e2e_failed_delivery_keeps_the_draft_for_retry() {
    let mut state = builtin_state();
    state.open_contact("Valley HVAC Solutions");

    {
        let ActiveModal::Contact(form) = &mut state.active_modal else {
            panic!("contact modal should be open");
        };
        form.name = "Dana Whitt".to_string();
        form.email = "dana@example.com".to_string();
        form.message = "Upstairs unit is short-cycling.".to_string();
    }

    state.submit_contact(&mut RejectingSink);
    {
        let ActiveModal::Contact(form) = &state.active_modal else {
            panic!("contact modal should be open");
        };
        assert_eq!(form.view, ContactView::Form);
        assert_eq!(
            form.delivery_error.as_deref(),
            Some("Lead delivery rejected: lead relay offline")
        );
        assert_eq!(form.message, "Upstairs unit is short-cycling.", "draft must survive");
    }
    let live = state.announcer.live().unwrap();
    assert!(live.contains("could not be sent"), "unexpected announcement: {live}");

    let mut sink = RecordingSink::default();
    state.submit_contact(&mut sink);
    assert_eq!(sink.delivered.len(), 1);
    let ActiveModal::Contact(form) = &state.active_modal else {
        panic!("contact modal should be open");
    };
    assert_eq!(form.view, ContactView::Submitted);
    assert!(form.delivery_error.is_none());
}

// =============================================================================
// Export E2E
// =============================================================================

/// Exporting writes exactly the visible listings, in both formats, and
/// announces the count.
#[test]
fn e2e_export_visible_listings_csv_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = builtin_state();

    state.search_input = "bakehouse".to_string();
    state.commit_search();
    assert_eq!(state.visible_count(), 1);

    let csv_path = dir.path().join("visible.csv");
    let count = state.export_visible(&csv_path, ExportFormat::Csv).unwrap();
    assert_eq!(count, 1);

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert!(
        csv.starts_with("name,category,tags,address,phone,website,description"),
        "unexpected CSV header: {}",
        csv.lines().next().unwrap_or("")
    );
    assert!(csv.contains("Smoky Mountain Bakehouse"));
    assert!(!csv.contains("Parkway Diner"), "hidden listings must not be exported");

    let json_path = dir.path().join("visible.json");
    let count = state.export_visible(&json_path, ExportFormat::Json).unwrap();
    assert_eq!(count, 1);

    let json = fs::read_to_string(&json_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let array = parsed.as_array().unwrap();
    assert_eq!(array.len(), 1);
    assert_eq!(array[0]["name"], "Smoky Mountain Bakehouse");
    assert!(array[0].get("haystack").is_none(), "internal match text must not leak");

    let live = state.announcer.live().unwrap();
    assert!(live.contains("Exported 1 listings"), "unexpected announcement: {live}");
}
