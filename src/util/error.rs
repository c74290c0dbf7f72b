// MainStreet - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; all errors preserve the causal chain
// for diagnostic logging.
//
// Note that "no results" and "already claimed" are informational UI states,
// not errors; nothing in the filter or wizard layer produces a variant here.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all MainStreet operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum MainStreetError {
    /// Catalog loading or validation failed.
    Catalog(CatalogError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// Lead delivery failed.
    Lead(LeadError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for MainStreetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(e) => write!(f, "Catalog error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Lead(e) => write!(f, "Lead delivery error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for MainStreetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Catalog(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Lead(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog errors
// ---------------------------------------------------------------------------

/// Errors related to catalog file loading and listing validation.
#[derive(Debug)]
pub enum CatalogError {
    /// TOML file could not be parsed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Catalog file exceeds the maximum allowed size.
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// A required field is missing or empty in a listing definition.
    MissingField {
        listing_id: String,
        field: &'static str,
    },

    /// Two listings in the same load share an id.
    DuplicateId {
        id: String,
        path1: PathBuf,
        path2: PathBuf,
    },

    /// A listing declares more tags than the per-listing cap.
    TooManyTags {
        listing_id: String,
        count: usize,
        max: usize,
    },

    /// Total listing count exceeded the cap; the excess was dropped.
    TooManyListings { count: usize, max: usize },

    /// I/O error reading a catalog file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Failed to parse TOML '{}': {source}", path.display())
            }
            Self::FileTooLarge {
                path,
                size,
                max_size,
            } => write!(
                f,
                "Catalog '{}' is {size} bytes, exceeds maximum of {max_size} bytes",
                path.display()
            ),
            Self::MissingField { listing_id, field } => {
                write!(
                    f,
                    "Listing '{listing_id}': missing required field '{field}'"
                )
            }
            Self::DuplicateId { id, path1, path2 } => write!(
                f,
                "Duplicate listing id '{id}' in '{}' and '{}'",
                path1.display(),
                path2.display()
            ),
            Self::TooManyTags {
                listing_id,
                count,
                max,
            } => write!(
                f,
                "Listing '{listing_id}' declares {count} tags, maximum is {max}"
            ),
            Self::TooManyListings { count, max } => {
                write!(f, "Too many listings loaded ({count}), maximum is {max}")
            }
            Self::Io { path, source } => {
                write!(
                    f,
                    "I/O error reading catalog '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<CatalogError> for MainStreetError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Export would exceed the maximum listing count.
    TooManyListings { count: usize, max: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::TooManyListings { count, max } => write!(
                f,
                "Export of {count} listings exceeds maximum of {max}. \
                 Narrow the filters to reduce the visible set."
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for MainStreetError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for MainStreetError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Lead errors
// ---------------------------------------------------------------------------

/// Errors from a lead delivery collaborator.
///
/// The bundled logging sink never fails; a real delivery sink (mail relay,
/// CRM webhook) reports its failures through this type so the contact modal
/// can display them without closing.
#[derive(Debug)]
pub enum LeadError {
    /// The payload could not be serialised for delivery.
    Serialize { source: serde_json::Error },

    /// The delivery collaborator rejected the payload.
    Rejected { reason: String },
}

impl fmt::Display for LeadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serialize { source } => {
                write!(f, "Could not serialise lead payload: {source}")
            }
            Self::Rejected { reason } => write!(f, "Lead delivery rejected: {reason}"),
        }
    }
}

impl std::error::Error for LeadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Serialize { source } => Some(source),
            Self::Rejected { .. } => None,
        }
    }
}

impl From<LeadError> for MainStreetError {
    fn from(e: LeadError) -> Self {
        Self::Lead(e)
    }
}

/// Convenience type alias for MainStreet results.
pub type Result<T> = std::result::Result<T, MainStreetError>;
