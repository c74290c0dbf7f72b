// MainStreet - core/claim.rs
//
// Three-step "claim this listing" wizard: search & select, verification
// method, confirmation. Pure state machine; the claim registry here is a
// fixed in-memory mock with the same shape a real lookup service would
// return. Core layer: no I/O or UI dependencies.

use std::fmt;

/// One entry in the claim registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRecord {
    pub name: String,
    pub address: String,
    /// Already claimed by another owner; cannot be selected.
    pub claimed: bool,
}

/// How ownership gets verified after a claim is filed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationMethod {
    /// Automated call to the phone number on the listing.
    PhoneCall,
    /// Confirmation mail to an address on the listing's website domain.
    EmailDomain,
    /// Letter with a code, posted to the listing address.
    Postcard,
}

impl VerificationMethod {
    /// All methods in display order.
    pub fn all() -> &'static [VerificationMethod] {
        &[
            VerificationMethod::PhoneCall,
            VerificationMethod::EmailDomain,
            VerificationMethod::Postcard,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            VerificationMethod::PhoneCall => "Phone call",
            VerificationMethod::EmailDomain => "Business email",
            VerificationMethod::Postcard => "Postcard",
        }
    }

    /// One-line explanation shown under the option.
    pub fn detail(&self) -> &'static str {
        match self {
            VerificationMethod::PhoneCall => {
                "We call the number on the listing with a verification code."
            }
            VerificationMethod::EmailDomain => {
                "We email a code to an address at the business's website domain."
            }
            VerificationMethod::Postcard => {
                "We post a code to the listing address. Allow 5-7 days."
            }
        }
    }
}

impl fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of trying to select a registry entry in step 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Recorded as the pending selection; advancing is now possible.
    Selected,
    /// Entry is already claimed (or unknown); selection unchanged.
    Rejected,
}

/// The wizard itself. Steps run 1..=3; transitions happen only through
/// `advance` and `back`. The app constructs a fresh wizard every time the
/// modal opens, so a run always starts at step 1 with nothing selected.
#[derive(Debug, Clone)]
pub struct ClaimWizard {
    /// Current step, 1..=3.
    pub step: u8,

    /// Live contents of the step-1 search box. Not applied until the
    /// debounce window closes and `commit_query` runs.
    pub query: String,

    /// The query actually used for matching.
    pub committed_query: String,

    /// Pending selection from step 1, by registry name.
    pub selected: Option<String>,

    /// Chosen verification method; required before leaving step 2.
    pub method: Option<VerificationMethod>,

    registry: Vec<ClaimRecord>,
}

impl ClaimWizard {
    pub fn new() -> Self {
        Self::with_registry(default_registry())
    }

    /// Build against a caller-supplied registry. Production code uses
    /// `new`; this seam exists so tests can pin their own entries.
    pub fn with_registry(registry: Vec<ClaimRecord>) -> Self {
        Self {
            step: 1,
            query: String::new(),
            committed_query: String::new(),
            selected: None,
            method: None,
            registry,
        }
    }

    /// Record live search-box input. Matching waits for `commit_query`.
    pub fn set_query(&mut self, text: &str) {
        self.query = text.to_string();
    }

    /// Apply the live query, normally after the debounce window closes.
    pub fn commit_query(&mut self) {
        self.committed_query = self.query.clone();
    }

    /// True once a non-blank query has been committed. Distinguishes the
    /// initial "type to search" prompt from a genuine zero-result state.
    pub fn has_committed_query(&self) -> bool {
        !self.committed_query.trim().is_empty()
    }

    /// Registry entries matching the committed query, case-insensitive
    /// substring on the name. A blank query matches nothing rather than
    /// everything; step 1 starts with an empty result list.
    pub fn results(&self) -> Vec<&ClaimRecord> {
        let query = self.committed_query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.registry
            .iter()
            .filter(|record| record.name.to_lowercase().contains(&query))
            .collect()
    }

    /// Try to select a result by name. Claimed entries are rejected with
    /// no state change; the caller announces the rejection.
    pub fn select(&mut self, name: &str) -> SelectOutcome {
        match self.registry.iter().find(|record| record.name == name) {
            Some(record) if !record.claimed => {
                self.selected = Some(record.name.clone());
                SelectOutcome::Selected
            }
            _ => SelectOutcome::Rejected,
        }
    }

    /// The record for the pending selection, if any.
    pub fn selected_record(&self) -> Option<&ClaimRecord> {
        let name = self.selected.as_deref()?;
        self.registry.iter().find(|record| record.name == name)
    }

    /// Choose the verification method. Single slot, so picking one
    /// deselects any other.
    pub fn choose_method(&mut self, method: VerificationMethod) {
        self.method = Some(method);
    }

    /// Whether the primary action is enabled on the current step.
    pub fn can_advance(&self) -> bool {
        match self.step {
            1 => self.selected.is_some(),
            2 => self.method.is_some(),
            _ => true,
        }
    }

    /// Move forward one step. Guarded no-op if the current step's
    /// requirement is not met or the wizard is already terminal.
    pub fn advance(&mut self) {
        if self.step < 3 && self.can_advance() {
            self.step += 1;
        }
    }

    /// Return from step 2 to step 1, keeping the pending selection. The
    /// back action exists nowhere else: step 1 has nothing behind it and
    /// step 3 is terminal.
    pub fn back(&mut self) {
        if self.step == 2 {
            self.step = 1;
        }
    }

    pub fn back_visible(&self) -> bool {
        self.step == 2
    }

    /// Confirmation reached; the primary action now dismisses the wizard.
    pub fn is_terminal(&self) -> bool {
        self.step == 3
    }

    pub fn primary_label(&self) -> &'static str {
        if self.is_terminal() {
            "Done"
        } else {
            "Next"
        }
    }

    /// Step-indicator state: a step shows as completed once passed.
    pub fn step_completed(&self, step: u8) -> bool {
        step < self.step
    }
}

impl Default for ClaimWizard {
    fn default() -> Self {
        Self::new()
    }
}

/// The mock claim registry. Shape matches what a real lookup collaborator
/// would return: name, address, and whether the listing is already taken.
pub fn default_registry() -> Vec<ClaimRecord> {
    fn record(name: &str, address: &str, claimed: bool) -> ClaimRecord {
        ClaimRecord {
            name: name.to_string(),
            address: address.to_string(),
            claimed,
        }
    }

    vec![
        record(
            "Smoky Mountain Bakehouse",
            "114 River Rd, Townsend, TN 37882",
            false,
        ),
        record("Parkway Diner", "7420 E Lamar Alexander Pkwy, Townsend, TN 37882", true),
        record(
            "Valley HVAC Solutions",
            "2280 Old Mill Ln, Maryville, TN 37803",
            true,
        ),
        record(
            "Foothills Auto Care",
            "2711 US-411, Maryville, TN 37801",
            false,
        ),
        record(
            "Cades Cove Outfitters",
            "8570 State Rte 73, Townsend, TN 37882",
            true,
        ),
        record(
            "Little River Dental",
            "1917 W Lamar Alexander Pkwy, Maryville, TN 37801",
            false,
        ),
        record("Main Street Books", "122 W Broadway Ave, Maryville, TN 37801", true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wizard() -> ClaimWizard {
        ClaimWizard::new()
    }

    fn search(wizard: &mut ClaimWizard, query: &str) {
        wizard.set_query(query);
        wizard.commit_query();
    }

    #[test]
    fn fresh_wizard_starts_at_step_one_with_nothing_selected() {
        let w = wizard();
        assert_eq!(w.step, 1);
        assert!(w.selected.is_none());
        assert!(w.method.is_none());
        assert!(w.query.is_empty());
        assert!(!w.has_committed_query());
        assert!(!w.can_advance());
        assert!(!w.back_visible());
        assert_eq!(w.primary_label(), "Next");
    }

    #[test]
    fn bakehouse_query_matches_exactly_one_available_listing() {
        let mut w = wizard();
        search(&mut w, "bakehouse");

        let results = w.results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Smoky Mountain Bakehouse");
        assert!(!results[0].claimed);
    }

    #[test]
    fn unmatched_query_returns_no_results() {
        let mut w = wizard();
        search(&mut w, "zzz");
        assert!(w.results().is_empty());
        assert!(w.has_committed_query());
    }

    #[test]
    fn blank_query_matches_nothing() {
        let mut w = wizard();
        assert!(w.results().is_empty());
        assert!(!w.has_committed_query());

        search(&mut w, "   ");
        assert!(w.results().is_empty());
        assert!(!w.has_committed_query());
    }

    #[test]
    fn query_matching_is_case_insensitive_substring() {
        let mut w = wizard();
        search(&mut w, "VALLEY hvac");
        // "VALLEY hvac" is one substring, not two terms.
        assert_eq!(w.results().len(), 1);
        assert_eq!(w.results()[0].name, "Valley HVAC Solutions");

        search(&mut w, "valley solutions");
        assert!(w.results().is_empty());
    }

    #[test]
    fn typing_without_commit_does_not_change_results() {
        let mut w = wizard();
        search(&mut w, "diner");
        assert_eq!(w.results().len(), 1);

        // Keystrokes inside the debounce window leave matching untouched.
        w.set_query("dental");
        assert_eq!(w.results()[0].name, "Parkway Diner");

        w.commit_query();
        assert_eq!(w.results()[0].name, "Little River Dental");
    }

    #[test]
    fn selecting_a_claimed_listing_is_rejected() {
        let mut w = wizard();
        search(&mut w, "parkway");
        assert_eq!(w.select("Parkway Diner"), SelectOutcome::Rejected);
        assert!(w.selected.is_none());
        assert!(!w.can_advance());

        // A rejected selection never overwrites an earlier valid one.
        assert_eq!(w.select("Smoky Mountain Bakehouse"), SelectOutcome::Selected);
        assert_eq!(w.select("Main Street Books"), SelectOutcome::Rejected);
        assert_eq!(w.selected.as_deref(), Some("Smoky Mountain Bakehouse"));
    }

    #[test]
    fn advance_requires_selection_then_method() {
        let mut w = wizard();
        assert!(!w.can_advance());
        w.advance();
        assert_eq!(w.step, 1);

        search(&mut w, "foothills");
        assert_eq!(w.select("Foothills Auto Care"), SelectOutcome::Selected);
        assert!(w.can_advance());
        w.advance();
        assert_eq!(w.step, 2);
        assert!(w.step_completed(1));
        assert!(w.back_visible());

        // Step 2 blocks until a method is chosen.
        assert!(!w.can_advance());
        w.advance();
        assert_eq!(w.step, 2);

        w.choose_method(VerificationMethod::EmailDomain);
        w.choose_method(VerificationMethod::Postcard);
        assert_eq!(w.method, Some(VerificationMethod::Postcard));
        w.advance();
        assert_eq!(w.step, 3);
        assert!(w.step_completed(2));
        assert!(w.is_terminal());
        assert_eq!(w.primary_label(), "Done");
        assert!(!w.back_visible());

        // Terminal: advancing further is a no-op.
        w.advance();
        assert_eq!(w.step, 3);
    }

    #[test]
    fn back_returns_to_step_one_keeping_selection() {
        let mut w = wizard();
        search(&mut w, "little river");
        w.select("Little River Dental");
        w.advance();
        assert_eq!(w.step, 2);

        w.back();
        assert_eq!(w.step, 1);
        assert_eq!(w.selected.as_deref(), Some("Little River Dental"));
        // Selection survives the round trip, so Next is still enabled.
        assert!(w.can_advance());

        // Back is a no-op everywhere except step 2.
        w.back();
        assert_eq!(w.step, 1);
    }

    #[test]
    fn selected_record_resolves_address() {
        let mut w = wizard();
        search(&mut w, "bakehouse");
        w.select("Smoky Mountain Bakehouse");
        let record = w.selected_record().unwrap();
        assert_eq!(record.address, "114 River Rd, Townsend, TN 37882");
    }
}
