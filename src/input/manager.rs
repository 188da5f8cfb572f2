//! Dataset manager: loads, normalizes, and caches job tables

use crate::error::{CareerGapError, Result};
use crate::input::csv_reader::{read_raw_records, read_raw_records_from_path};
use crate::processing::normalizer::RecordNormalizer;
use crate::processing::record::JobTable;
use log::info;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct CachedTable {
    loaded_at: Instant,
    table: Arc<JobTable>,
}

/// Owns the loaded datasets. A table is published only after it has been
/// fully read and normalized, so readers never see a partial load.
pub struct DatasetManager {
    cache: HashMap<String, CachedTable>,
    ttl: Duration,
    enable_cache: bool,
}

impl DatasetManager {
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            ttl: Duration::from_secs(3600),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn load(&mut self, path: &Path) -> Result<Arc<JobTable>> {
        let key = path.to_string_lossy().to_string();

        if let Some(table) = self.cached(&key) {
            info!("Using cached dataset for: {}", path.display());
            return Ok(table);
        }

        if !path.exists() {
            return Err(CareerGapError::InvalidInput(format!(
                "Dataset does not exist: {}",
                path.display()
            )));
        }

        info!("Loading dataset: {}", path.display());
        let raws = read_raw_records_from_path(path)?;
        Ok(self.publish(key, RecordNormalizer::normalize_all(&raws)))
    }

    /// Load from any reader, caching under `source_id`
    pub fn load_from_reader<R: Read>(&mut self, source_id: &str, source: R) -> Result<Arc<JobTable>> {
        if let Some(table) = self.cached(source_id) {
            info!("Using cached dataset for: {}", source_id);
            return Ok(table);
        }

        let raws = read_raw_records(source)?;
        Ok(self.publish(source_id.to_string(), RecordNormalizer::normalize_all(&raws)))
    }

    fn cached(&self, key: &str) -> Option<Arc<JobTable>> {
        if !self.enable_cache {
            return None;
        }
        self.cache
            .get(key)
            .filter(|entry| entry.loaded_at.elapsed() < self.ttl)
            .map(|entry| Arc::clone(&entry.table))
    }

    fn publish(&mut self, key: String, table: JobTable) -> Arc<JobTable> {
        info!("Normalized {} job records", table.len());
        let table = Arc::new(table);
        if self.enable_cache {
            self.cache.insert(
                key,
                CachedTable {
                    loaded_at: Instant::now(),
                    table: Arc::clone(&table),
                },
            );
        }
        table
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for DatasetManager {
    fn default() -> Self {
        Self::new()
    }
}
