use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use rayon::prelude::*;
use tracing::{info, warn};

use super::ListingStore;
use super::discovery::discover_page_files;
use crate::models::ListingPage;
use crate::parsers::parse_listing_page;

/// Build the listing store from page files and directories of page files
///
/// Directories are expanded with [`discover_page_files`]. Pages are parsed in parallel and
/// concatenated in input order; a property id seen twice keeps its first occurrence. The
/// pagination of the last page that carries one is kept.
///
/// # Errors
///
/// Returns an error if no page files are found, or if more than 50% of the page files fail to
/// parse. Individual failed pages are logged and skipped.
pub fn build_store(inputs: &[PathBuf]) -> Result<ListingStore> {
    let files = expand_inputs(inputs)?;
    if files.is_empty() {
        bail!("No listing page files found");
    }

    let parsed: Vec<(&Path, Result<ListingPage>)> =
        files.par_iter().map(|path| (path.as_path(), parse_listing_page(path))).collect();

    let mut store = ListingStore::default();
    let mut seen_ids = HashSet::new();

    for (path, result) in parsed {
        match result {
            Ok(page) => {
                store.pages_loaded += 1;
                if page.pagination.is_some() {
                    store.pagination = page.pagination;
                }
                for property in page.properties {
                    if seen_ids.insert(property.id.clone()) {
                        store.properties.push(property);
                    } else {
                        store.duplicates_dropped += 1;
                    }
                }
            }
            Err(e) => {
                warn!(file = %path.display(), error = %e, "failed to load page");
                store.pages_failed += 1;
            }
        }
    }

    // Check error rate and fail if >50% of pages failed
    let total_pages = store.pages_loaded + store.pages_failed;
    let failure_rate = store.pages_failed as f64 / total_pages as f64;
    if failure_rate > 0.5 {
        bail!(
            "Loading listings failed: {}/{} page files failed to parse ({}% failure rate)",
            store.pages_failed,
            total_pages,
            (failure_rate * 100.0) as u32
        );
    }

    info!(
        listings = store.properties.len(),
        pages = store.pages_loaded,
        failed = store.pages_failed,
        duplicates = store.duplicates_dropped,
        "listing store built"
    );

    Ok(store)
}

fn expand_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_dir() {
            files.extend(discover_page_files(input)?);
        } else {
            files.push(input.clone());
        }
    }
    Ok(files)
}
