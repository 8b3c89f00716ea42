use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::{
    models::SiteSettings,
    repository::{RepoError, RepositoryState},
};

#[derive(Default)]
struct Slot {
    value: Option<SiteSettings>,
    // Bumped by every clear; a refill started under an older generation is not stored.
    generation: u64,
}

struct Inner {
    repo: RepositoryState,
    slot: RwLock<Slot>,
    refill: Mutex<()>,
}

/// SettingsCache
///
/// Process-wide, read-mostly cache of the site settings singleton. There is no TTL:
/// the value lives until `clear` is called.
///
/// Misses are single-flight. Concurrent callers that find the slot empty queue on the
/// refill lock, and only the first one goes to the repository. A `clear` that lands
/// while a refill is in flight invalidates that refill, so nothing older than the last
/// clear is ever served from memory.
#[derive(Clone)]
pub struct SettingsCache {
    inner: Arc<Inner>,
}

impl SettingsCache {
    pub fn new(repo: RepositoryState) -> Self {
        Self {
            inner: Arc::new(Inner {
                repo,
                slot: RwLock::new(Slot::default()),
                refill: Mutex::new(()),
            }),
        }
    }

    /// get_site_settings
    ///
    /// Returns the cached settings, loading them from the repository on a miss.
    /// A failed load leaves the cache empty.
    pub async fn get_site_settings(&self) -> Result<SiteSettings, RepoError> {
        if let Some(settings) = self.inner.slot.read().await.value.clone() {
            tracing::debug!("settings cache hit");
            return Ok(settings);
        }

        let _refill = self.inner.refill.lock().await;

        // Another caller may have filled the slot while we waited for the lock.
        let generation = {
            let slot = self.inner.slot.read().await;
            if let Some(settings) = slot.value.clone() {
                return Ok(settings);
            }
            slot.generation
        };

        tracing::debug!("settings cache miss, loading from repository");
        let fresh = self.inner.repo.site_settings().await?;

        let mut slot = self.inner.slot.write().await;
        if slot.generation == generation {
            slot.value = Some(fresh.clone());
        } else {
            tracing::debug!("settings cache cleared during refill, result not stored");
        }
        Ok(fresh)
    }

    /// clear_settings_cache
    ///
    /// Drops the cached value unconditionally. The next read goes to the repository.
    pub async fn clear_settings_cache(&self) {
        let mut slot = self.inner.slot.write().await;
        slot.value = None;
        slot.generation = slot.generation.wrapping_add(1);
        tracing::info!("settings cache cleared");
    }

    pub async fn is_populated(&self) -> bool {
        self.inner.slot.read().await.value.is_some()
    }
}
