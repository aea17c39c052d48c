//! The parse cache front door.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use poulint_ast::ParseOutcome;
use poulint_parser::SourceParser;

use crate::{CacheEntry, CacheError, CacheKey, SourceFile};

/// Incremental parse cache.
///
/// One instance covers one lint run. Lookups go memo → persisted store →
/// parser; the memo guarantees at most one parser invocation per distinct
/// [`CacheKey`] within the run, and the persisted store carries outcomes
/// across runs.
///
/// The store keeps one JSON file per key digest under the cache directory.
/// Writers for distinct keys touch distinct files; writers for the same key
/// go through a temp-file rename, so a concurrent reader never observes a
/// partial entry and the last writer wins.
pub struct ParseCache {
    /// Directory holding persisted entries.
    cache_dir: PathBuf,
    /// Whether the persisted store is consulted at all.
    enabled: bool,
    /// In-run memo, keyed by cache-key digest.
    memo: Mutex<HashMap<String, Arc<ParseOutcome>>>,
}

impl ParseCache {
    /// Creates a cache rooted at `cache_dir`.
    ///
    /// With `enabled` false the persisted store is never touched and every
    /// file is parsed directly (still memoized within the run); results are
    /// identical to the cached mode, only slower.
    pub fn new(cache_dir: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            enabled,
            memo: Mutex::new(HashMap::new()),
        }
    }

    /// Returns whether the persisted store is in use.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns the cached outcome for `file`, parsing it if necessary.
    ///
    /// The second element of the pair is true when the outcome was served
    /// without invoking the parser. Storage failures are logged and
    /// degraded, never propagated: this method always produces an outcome.
    pub fn get_or_parse(
        &self,
        file: &SourceFile,
        parser: &dyn SourceParser,
    ) -> (Arc<ParseOutcome>, bool) {
        let key = CacheKey::for_file(file, parser.version());
        let digest = key.digest();

        if let Some(outcome) = self.memo.lock().get(&digest) {
            return (Arc::clone(outcome), true);
        }

        if self.enabled {
            match self.load_entry(&digest, &key) {
                Ok(Some(entry)) => {
                    debug!("cache hit for {}", key.path);
                    let outcome = Arc::new(entry.outcome);
                    self.memo.lock().insert(digest, Arc::clone(&outcome));
                    return (outcome, true);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("cache read failed for {}: {}", key.path, e);
                }
            }
        }

        debug!("parsing {}", key.path);
        let outcome = Arc::new(ParseOutcome::from(parser.parse(file.content())));

        if self.enabled {
            let entry = CacheEntry::new(key.clone(), (*outcome).clone());
            if let Err(e) = self.store_entry(&digest, &entry) {
                warn!("cache write failed for {}: {}", key.path, e);
            }
        }

        self.memo.lock().insert(digest, Arc::clone(&outcome));
        (outcome, false)
    }

    fn entry_path(&self, digest: &str) -> PathBuf {
        self.cache_dir.join(format!("{digest}.json"))
    }

    fn load_entry(&self, digest: &str, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError> {
        let path = self.entry_path(digest);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CacheError::read(e.to_string())),
        };

        let entry: CacheEntry =
            serde_json::from_str(&content).map_err(|e| CacheError::corrupted(e.to_string()))?;

        // The digest file name is not trusted; only an exact key match is a
        // hit.
        if entry.is_valid_for(key) {
            Ok(Some(entry))
        } else {
            debug!("stale entry under digest {digest}");
            Ok(None)
        }
    }

    fn store_entry(&self, digest: &str, entry: &CacheEntry) -> Result<(), CacheError> {
        fs::create_dir_all(&self.cache_dir)?;

        let json = serde_json::to_string(entry).map_err(|e| CacheError::write(e.to_string()))?;
        let tmp = self
            .cache_dir
            .join(format!("{digest}.json.tmp.{}", std::process::id()));

        fs::write(&tmp, json)?;
        fs::rename(&tmp, self.entry_path(digest))?;
        Ok(())
    }
}
