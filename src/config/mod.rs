//! Explorer configuration.
//!
//! Settings come from a TOML file; every key is optional and unknown keys are rejected.
//!
//! ```toml
//! debounce_ms = 300
//! page_limit = 12
//! default_sort = "newest"
//!
//! [fallback_price_range]
//! min = 500
//! max = 50000
//! ```

pub mod loader;

use std::time::Duration;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::filters::{PriceRange, SortKey};
use crate::models::DEFAULT_PAGE_LIMIT;

pub use loader::{CONFIG_ENV_VAR, default_config_path, load_config, parse_config};

/// Quiet period before a price-range change is applied
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Price range used when the store has no positive prices to derive bounds from
pub const DEFAULT_FALLBACK_PRICE_RANGE: PriceRange = PriceRange { min: 500, max: 50_000 };

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    pub debounce_ms: u64,
    pub page_limit: u32,
    pub default_sort: SortKey,
    pub fallback_price_range: PriceRange,
}

impl ExplorerConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.page_limit == 0 {
            bail!("page_limit must be greater than 0");
        }
        let range = self.fallback_price_range;
        if range.min > range.max {
            bail!(
                "fallback_price_range.min ({}) must not exceed fallback_price_range.max ({})",
                range.min,
                range.max
            );
        }
        Ok(())
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            page_limit: DEFAULT_PAGE_LIMIT,
            default_sort: SortKey::Newest,
            fallback_price_range: DEFAULT_FALLBACK_PRICE_RANGE,
        }
    }
}
