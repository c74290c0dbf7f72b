// MainStreet - app/catalog_mgr.rs
//
// Manages loading of business listings from both built-in catalogs
// (embedded in the binary) and user-defined TOML files on disk.
// User listings override built-in listings with the same id.

use crate::core::catalog;
use crate::core::model::{Business, CatalogSummary};
use crate::util::constants;
use crate::util::error::CatalogError;
use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

/// Everything the catalog load produced: the merged listing set, a
/// summary for the status/about surfaces, and the non-fatal errors.
#[derive(Debug)]
pub struct LoadedCatalog {
    pub listings: Vec<Business>,
    pub summary: CatalogSummary,
    pub errors: Vec<CatalogError>,
}

/// Load all listings: built-in first, then user-defined overrides.
///
/// User listings with the same id as a built-in listing replace the
/// built-in. Invalid listings and unreadable files are logged and
/// skipped (non-fatal). The merged set is capped at `max_listings`.
pub fn load_all_listings(user_listings_dir: Option<&Path>, max_listings: usize) -> LoadedCatalog {
    let mut listings = catalog::load_builtin_catalogs();
    let mut errors = Vec::new();
    let mut overridden = 0usize;
    let mut files_with_errors = 0usize;

    tracing::info!(builtin_count = listings.len(), "Loaded built-in listings");

    if let Some(dir) = user_listings_dir {
        if dir.is_dir() {
            let user = load_user_listings(dir);
            errors.extend(user.errors);
            files_with_errors = user.files_with_errors;

            for listing in user.listings {
                if let Some(pos) = listings.iter().position(|l| l.id == listing.id) {
                    tracing::info!(
                        listing_id = %listing.id,
                        "User listing overrides built-in"
                    );
                    listings[pos] = listing;
                    overridden += 1;
                } else {
                    tracing::info!(listing_id = %listing.id, "Loaded user listing");
                    listings.push(listing);
                }
            }
        } else {
            tracing::debug!(
                dir = %dir.display(),
                "User listings directory does not exist (skipping)"
            );
        }
    }

    if listings.len() > max_listings {
        tracing::warn!(
            count = listings.len(),
            max = max_listings,
            "Too many listings loaded, truncating"
        );
        errors.push(CatalogError::TooManyListings {
            count: listings.len(),
            max: max_listings,
        });
        listings.truncate(max_listings);
    }

    let categories: BTreeSet<&str> = listings.iter().map(|l| l.category.as_str()).collect();
    let builtin_listings = listings.iter().filter(|l| l.is_builtin).count();
    let summary = CatalogSummary {
        total_listings: listings.len(),
        builtin_listings,
        user_listings: listings.len() - builtin_listings,
        overridden,
        categories: categories.len(),
        files_with_errors,
    };

    tracing::info!(
        total = summary.total_listings,
        user = summary.user_listings,
        overridden = summary.overridden,
        "Catalog loading complete"
    );

    LoadedCatalog {
        listings,
        summary,
        errors,
    }
}

struct UserListings {
    listings: Vec<Business>,
    errors: Vec<CatalogError>,
    files_with_errors: usize,
}

/// Load user-defined listings from a directory of .toml catalog files.
fn load_user_listings(dir: &Path) -> UserListings {
    let mut listings: Vec<Business> = Vec::new();
    let mut errors = Vec::new();
    let mut files_with_errors = 0usize;
    // First file to define each id; later definitions are duplicates.
    let mut seen: HashMap<String, PathBuf> = HashMap::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            errors.push(CatalogError::Io {
                path: dir.to_path_buf(),
                source: e,
            });
            return UserListings {
                listings,
                errors,
                files_with_errors: 1,
            };
        }
    };

    for entry_result in entries {
        let entry = match entry_result {
            Ok(e) => e,
            Err(e) => {
                errors.push(CatalogError::Io {
                    path: dir.to_path_buf(),
                    source: e,
                });
                files_with_errors += 1;
                continue;
            }
        };

        let path = entry.path();

        if path.extension().and_then(|e| e.to_str()) != Some("toml") {
            continue;
        }

        let error_count_before = errors.len();

        match load_catalog_file(&path) {
            Ok((file_listings, file_errors)) => {
                errors.extend(file_errors);
                for listing in file_listings {
                    match seen.get(&listing.id) {
                        Some(first_path) => {
                            errors.push(CatalogError::DuplicateId {
                                id: listing.id.clone(),
                                path1: first_path.clone(),
                                path2: path.clone(),
                            });
                        }
                        None => {
                            seen.insert(listing.id.clone(), path.clone());
                            listings.push(listing);
                        }
                    }
                }
            }
            Err(e) => errors.push(e),
        }

        if errors.len() > error_count_before {
            files_with_errors += 1;
        }
    }

    UserListings {
        listings,
        errors,
        files_with_errors,
    }
}

/// Read, parse, and compile one catalog file.
///
/// The outer Result is fatal for the file (unreadable, oversized, or
/// unparseable); the inner error list holds per-listing failures.
fn load_catalog_file(path: &Path) -> Result<(Vec<Business>, Vec<CatalogError>), CatalogError> {
    let metadata = std::fs::metadata(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    if metadata.len() > constants::MAX_CATALOG_FILE_SIZE {
        return Err(CatalogError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size: constants::MAX_CATALOG_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let def = catalog::parse_catalog_toml(&content, path)?;
    Ok(catalog::build_catalog(def, path, false))
}
