// MainStreet - core/export.rs
//
// CSV and JSON export of the currently visible listings.
// Core layer: writes to any Write trait object.

use crate::core::model::Business;
use crate::util::constants::MAX_EXPORT_LISTINGS;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "CSV",
            ExportFormat::Json => "JSON",
        }
    }
}

fn check_count(listings: &[Business]) -> Result<(), ExportError> {
    if listings.len() > MAX_EXPORT_LISTINGS {
        return Err(ExportError::TooManyListings {
            count: listings.len(),
            max: MAX_EXPORT_LISTINGS,
        });
    }
    Ok(())
}

/// Export listings to CSV.
///
/// Writes: name, category, tags, address, phone, website, description.
/// Tags are joined with "; " so the column stays a single cell.
pub fn export_csv<W: Write>(
    listings: &[Business],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_count(listings)?;

    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "name",
            "category",
            "tags",
            "address",
            "phone",
            "website",
            "description",
        ])
        .map_err(|e| ExportError::Csv {
            path: export_path.to_path_buf(),
            source: e,
        })?;

    let mut count = 0;
    for listing in listings {
        let tags = listing
            .tags
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("; ");

        csv_writer
            .write_record([
                &listing.name,
                &listing.category,
                &tags,
                &listing.address,
                &listing.phone,
                listing.website.as_deref().unwrap_or(""),
                &listing.description,
            ])
            .map_err(|e| ExportError::Csv {
                path: export_path.to_path_buf(),
                source: e,
            })?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    Ok(count)
}

/// Export listings to JSON (array of objects).
pub fn export_json<W: Write>(
    listings: &[Business],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    check_count(listings)?;

    serde_json::to_writer_pretty(writer, listings).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    Ok(listings.len())
}
