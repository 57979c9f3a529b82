//! Reference-vocabulary resolution: local cache first, then four parallel
//! network fetches, then the built-in fallback set.

use shared::domain::{ReferenceData, ReferenceOption};
use storage::CacheStore;
use tracing::{debug, info, warn};

use crate::{ApiError, SquadApi};

/// Fixed cache key for the reference-data snapshot. Entries never expire and
/// are only discarded when they fail to parse.
pub const REFERENCE_CACHE_KEY: &str = "reference_data";

const FALLBACK_RACES: [&str; 4] = ["Human", "Elf", "Dwarf", "Orc"];
const FALLBACK_CLASSES: [&str; 4] = ["Basic", "Archer", "Knight", "Mage"];
const FALLBACK_ARMORS: [&str; 4] = ["Cloth", "Leather", "Chainmail", "Plate"];
const FALLBACK_WEAPONS: [&str; 4] = ["Sword", "Axe", "Bow", "Spear"];

/// The vocabularies used when the server cannot be reached. Replaces the
/// whole set at once; there is no per-vocabulary fallback.
pub fn fallback_reference_data() -> ReferenceData {
    fn options(names: &[&str]) -> Vec<ReferenceOption> {
        names.iter().map(|name| ReferenceOption::new(*name)).collect()
    }

    ReferenceData {
        races: options(&FALLBACK_RACES),
        classes: options(&FALLBACK_CLASSES),
        armors: options(&FALLBACK_ARMORS),
        weapons: options(&FALLBACK_WEAPONS),
    }
}

/// Resolves the reference vocabularies. Never fails: a corrupt cache entry is
/// a miss, and any fetch failure falls back to the built-in set. A fresh
/// fetch is persisted to the cache; persistence failures are logged only.
pub async fn resolve_reference_data(cache: &CacheStore, api: &dyn SquadApi) -> ReferenceData {
    match cache.load::<ReferenceData>(REFERENCE_CACHE_KEY) {
        Ok(Some(data)) => {
            debug!("reference data served from local cache");
            return data;
        }
        Ok(None) => {}
        Err(err) => warn!("reference cache unreadable, treating as miss: {err:#}"),
    }

    match fetch_reference_data(api).await {
        Ok(data) => {
            if let Err(err) = cache.store(REFERENCE_CACHE_KEY, &data) {
                warn!("failed to persist reference data to cache: {err:#}");
            }
            info!(
                races = data.races.len(),
                classes = data.classes.len(),
                armors = data.armors.len(),
                weapons = data.weapons.len(),
                "reference data fetched from server"
            );
            data
        }
        Err(err) => {
            warn!("reference data fetch failed, using built-in fallback: {err}");
            fallback_reference_data()
        }
    }
}

async fn fetch_reference_data(api: &dyn SquadApi) -> Result<ReferenceData, ApiError> {
    let (races, classes, armors, weapons) = tokio::try_join!(
        api.list_races(),
        api.list_classes(),
        api.list_armors(),
        api.list_weapons(),
    )?;

    Ok(ReferenceData {
        races,
        classes,
        armors,
        weapons,
    })
}
