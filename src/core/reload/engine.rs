//=========================================================================
// Reload Engine
//
// Detects a changed module binary and swaps in the new version.
//
// Per call to `reload_module()`:
// ```text
//   module missing? ──yes──> Failed(ModuleNotFound)
//        │no
//   ┌─> lock-file present? ──yes──> sleep(interval) ──┐
//   │        │no                                      │
//   │   record mtime                                  │
//   │   copy → shadow path (tight retry) ──fail──> sleep(interval)
//   │        │ok                                      │
//   │   open shadow + resolve 5 symbols ──fail──> Failed(err)
//   │        │ok                                      │
//   │   install (old library released) ──> Reloaded   │
//   └──────────────── attempts < budget ──────────────┘
//                      budget spent ──> Deferred
// ```
//
// A failed or deferred call leaves the installed interface and library
// untouched. A deferred call also keeps the timestamp, so the next frame
// retries; a binary that was copied but failed to load is remembered, so
// a broken build is tried once per change rather than every frame.
//
// Shadow indices wrap at 256; the index of the live library's shadow is
// skipped so a mapped file is never overwritten.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::SystemTime;

//=== External Crates =====================================================

use log::{debug, error, info, trace, warn};

//=== Internal Imports ====================================================

use super::error::ReloadError;
use super::loader::LibraryLoader;
use super::policy::ReloadPolicy;
use super::shadow::shadow_path;
use crate::core::module::ModuleRecord;

//=== ReloadOutcome =======================================================

/// Result of one `reload_module()` call.
#[derive(Debug)]
pub enum ReloadOutcome {
    /// A new version is installed. `attempts` counts lock-file polls,
    /// starting at 1.
    Reloaded { attempts: u32, shadow: PathBuf },

    /// The lock-file never cleared (or the copy never succeeded) within
    /// the retry budget. Nothing changed.
    Deferred,

    /// The new version could not be loaded. The live version stays; the
    /// shadow index advances and, once the copy succeeded, the failed
    /// binary's timestamp is recorded.
    Failed(ReloadError),
}

impl ReloadOutcome {
    pub fn is_reloaded(&self) -> bool {
        matches!(self, ReloadOutcome::Reloaded { .. })
    }
}

//=== ReloadEngine ========================================================

/// Copy-then-load hot-reload engine over a [`LibraryLoader`].
pub struct ReloadEngine<L: LibraryLoader> {
    loader: L,
    policy: ReloadPolicy,
}

impl<L: LibraryLoader> ReloadEngine<L> {
    pub fn new(loader: L, policy: ReloadPolicy) -> Self {
        Self { loader, policy }
    }

    pub fn policy(&self) -> &ReloadPolicy {
        &self.policy
    }

    pub fn set_policy(&mut self, policy: ReloadPolicy) {
        self.policy = policy;
    }

    //--- Load / Release ---------------------------------------------------

    /// Creates a record for `path` and performs the first load.
    ///
    /// If the first load fails the record is returned unloaded, carrying
    /// the stub interface; check [`ModuleRecord::is_live`].
    pub fn load(&mut self, path: &Path, lockfile: Option<&Path>) -> ModuleRecord {
        let mut record = ModuleRecord::new(path, lockfile.map(Path::to_path_buf));

        info!(
            target: "reload",
            "Loading module {} (lock-file: {})",
            path.display(),
            lockfile.map_or_else(|| "none".to_owned(), |l| l.display().to_string())
        );

        match self.reload_module(&mut record) {
            ReloadOutcome::Reloaded { .. } => {}
            ReloadOutcome::Deferred => {
                warn!(target: "reload", "First load of {} deferred by lock-file", path.display());
            }
            ReloadOutcome::Failed(_) => {
                error!(target: "reload", "First load of {} failed", path.display());
            }
        }

        record
    }

    /// Releases the record's library.
    pub fn release(&mut self, mut record: ModuleRecord) {
        info!(target: "reload", "Releasing module {}", record.path().display());
        record.release();
    }

    //--- Change Detection -------------------------------------------------

    /// Returns `true` when the binary's modification time differs from the
    /// one recorded at the last successful load.
    ///
    /// Any difference counts, not only a newer time. A binary that cannot
    /// be stat'ed is never due.
    pub fn reload_required(&self, record: &ModuleRecord) -> bool {
        match modified_time(record.path()) {
            Ok(live) => record.timestamp() != Some(live),
            Err(e) => {
                trace!(target: "reload", "Cannot stat {}: {}", record.path().display(), e);
                false
            }
        }
    }

    //--- Reload -----------------------------------------------------------

    /// Loads the current binary into `record` (see module docs).
    pub fn reload_module(&mut self, record: &mut ModuleRecord) -> ReloadOutcome {
        if !record.path().exists() {
            let err = ReloadError::ModuleNotFound(record.path().to_path_buf());
            warn!(target: "reload", "{}", err);
            return ReloadOutcome::Failed(err);
        }

        let budget = self.policy.lock_poll_attempts();

        for attempt in 1..=budget {
            if let Some(lockfile) = record.lockfile().filter(|l| l.exists()) {
                trace!(
                    target: "reload",
                    "Lock-file {} present (attempt {}/{})",
                    lockfile.display(),
                    attempt,
                    budget
                );
                self.back_off(attempt);
                continue;
            }

            let timestamp = match modified_time(record.path()) {
                Ok(timestamp) => timestamp,
                Err(_) => {
                    let err = ReloadError::ModuleNotFound(record.path().to_path_buf());
                    warn!(target: "reload", "{}", err);
                    return ReloadOutcome::Failed(err);
                }
            };

            let shadow = match Self::next_shadow(record) {
                Ok(shadow) => shadow,
                Err(err) => {
                    error!(target: "reload", "{}", err);
                    return ReloadOutcome::Failed(err);
                }
            };

            if let Err(err) = self.copy_with_retry(record.path(), &shadow) {
                warn!(target: "reload", "{} (attempt {}/{})", err, attempt, budget);
                self.back_off(attempt);
                continue;
            }

            info!(target: "reload", "Load attempt {} from {}", attempt, shadow.display());

            return match self.install(record, &shadow, timestamp) {
                Ok(()) => {
                    info!(target: "reload", "Module {} is live", shadow.display());
                    ReloadOutcome::Reloaded { attempts: attempt, shadow }
                }
                Err(err) => {
                    error!(target: "reload", "{}", err);
                    record.mark_attempted(timestamp);
                    ReloadOutcome::Failed(err)
                }
            };
        }

        debug!(
            target: "reload",
            "Reload of {} deferred after {} attempts",
            record.path().display(),
            budget
        );
        ReloadOutcome::Deferred
    }

    //--- Internal Helpers -------------------------------------------------

    fn install(
        &mut self,
        record: &mut ModuleRecord,
        shadow: &Path,
        timestamp: SystemTime,
    ) -> Result<(), ReloadError> {
        let library = self.loader.open(shadow)?;
        let interface = library.interface()?;
        record.install(library, interface, timestamp);
        Ok(())
    }

    /// Consumes the next shadow index, skipping the one the live library
    /// was loaded from (reachable after 256 consumed indices).
    fn next_shadow(record: &mut ModuleRecord) -> Result<PathBuf, ReloadError> {
        let index = record.take_load_index();
        let shadow = shadow_path(record.path(), index)?;
        if record.loaded_from() != Some(shadow.as_path()) {
            return Ok(shadow);
        }

        trace!(target: "reload", "Skipping live shadow {}", shadow.display());
        let index = record.take_load_index();
        shadow_path(record.path(), index)
    }

    fn copy_with_retry(&self, source: &Path, shadow: &Path) -> Result<(), ReloadError> {
        let mut last_error = None;

        for _ in 0..self.policy.copy_attempts() {
            match fs::copy(source, shadow) {
                Ok(_) => return Ok(()),
                Err(e) => last_error = Some(e),
            }
        }

        Err(ReloadError::Copy {
            shadow: shadow.to_path_buf(),
            source: last_error.unwrap_or_else(|| io::Error::other("copy never attempted")),
        })
    }

    /// Sleeps between attempts; skipped after the final one.
    fn back_off(&self, attempt: u32) {
        if attempt < self.policy.lock_poll_attempts() {
            thread::sleep(self.policy.lock_poll_interval());
        }
    }
}

//=== Filesystem Helpers ==================================================

fn modified_time(path: &Path) -> io::Result<SystemTime> {
    fs::metadata(path)?.modified()
}

//=========================================================================
// Unit Tests
//=========================================================================
