//=========================================================================
// Shadow Paths
//
// Every load goes through a fresh copy of the module binary:
//
// ```text
//   engine.so  ──copy──>  engine.s_0, engine.s_1, ... engine.s_255, engine.s_0
// ```
//
// A never-before-loaded filename defeats loaders that cache by path, and
// loading the copy leaves the original free for the build tool to rewrite.
// Old shadow files are left on disk.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::{Path, PathBuf};

//=== Internal Imports ====================================================

use super::error::ReloadError;

//=== shadow_path() =======================================================

/// Derives the shadow path for `index`: the final character of `path` is
/// replaced with `_` and `index` is appended in decimal.
pub fn shadow_path(path: &Path, index: u8) -> Result<PathBuf, ReloadError> {
    let mut shadow = path
        .to_str()
        .ok_or_else(|| ReloadError::InvalidPath(path.to_path_buf()))?
        .to_owned();

    if shadow.pop().is_none() {
        return Err(ReloadError::InvalidPath(path.to_path_buf()));
    }

    shadow.push('_');
    shadow.push_str(&index.to_string());
    Ok(PathBuf::from(shadow))
}

//=========================================================================
// Unit Tests
//=========================================================================
