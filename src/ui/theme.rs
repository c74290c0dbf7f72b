// MainStreet - ui/theme.rs
//
// Colour scheme, category colour mapping, and layout constants.
// No dependencies on app state or business logic.

use egui::Color32;

/// Accent colour for a category id. Unknown categories share a neutral
/// grey so a user catalog with its own categories still renders sanely.
pub fn category_colour(category: &str) -> Color32 {
    match category {
        "restaurants" => Color32::from_rgb(217, 119, 6), // Amber 600
        "retail" => Color32::from_rgb(124, 58, 237),     // Violet 600
        "home-services" => Color32::from_rgb(2, 132, 199), // Sky 600
        "health" => Color32::from_rgb(5, 150, 105),      // Emerald 600
        "auto" => Color32::from_rgb(100, 116, 139),      // Slate 500
        "outdoors" => Color32::from_rgb(22, 163, 74),    // Green 600
        _ => Color32::from_rgb(107, 114, 128),           // Gray 500
    }
}

/// Claim-registry badge colours.
pub const AVAILABLE_BADGE: Color32 = Color32::from_rgb(34, 197, 94); // Green 500
pub const CLAIMED_BADGE: Color32 = Color32::from_rgb(248, 113, 113); // Red 400

/// Inline error text (delivery failures, load warnings).
pub const ERROR_TEXT: Color32 = Color32::from_rgb(248, 113, 113); // Red 400

/// Confirmation text (message sent, claim filed).
pub const SUCCESS_TEXT: Color32 = Color32::from_rgb(34, 197, 94); // Green 500

/// Layout constants.
pub const SIDEBAR_WIDTH: f32 = 260.0;
pub const CARD_SPACING: f32 = 8.0;
pub const MODAL_MIN_WIDTH: f32 = 400.0;
