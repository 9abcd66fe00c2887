//=========================================================================
// Reload Errors
//=========================================================================

//=== Standard Library Imports ============================================

use std::io;
use std::path::PathBuf;

//=== ReloadError =========================================================

/// Why one load attempt of a module version failed.
///
/// None of these are fatal to the harness: the previously installed
/// interface stays live and the next frame's reload check tries again.
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    /// The module binary does not exist (or vanished mid-build).
    #[error("module not found: {}", .0.display())]
    ModuleNotFound(PathBuf),

    /// The module path cannot carry a shadow suffix (empty or not UTF-8).
    #[error("cannot derive a shadow path from {}", .0.display())]
    InvalidPath(PathBuf),

    /// Every copy attempt to the shadow path failed.
    #[error("failed to copy module to {}: {source}", .shadow.display())]
    Copy {
        shadow: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The OS dynamic loader rejected the shadow file.
    #[error("failed to load {}: {reason}", .path.display())]
    Library { path: PathBuf, reason: String },

    /// The library loaded but does not export one of the five entry points.
    #[error("{} does not export {symbol}", .path.display())]
    MissingSymbol { path: PathBuf, symbol: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_path() {
        let err = ReloadError::ModuleNotFound(PathBuf::from("engine.so"));
        assert_eq!(err.to_string(), "module not found: engine.so");

        let err = ReloadError::MissingSymbol {
            path: PathBuf::from("engine.s_3"),
            symbol: "ModuleInterface_Reload".into(),
        };
        assert_eq!(err.to_string(), "engine.s_3 does not export ModuleInterface_Reload");
    }

    #[test]
    fn copy_error_keeps_io_source() {
        use std::error::Error;

        let err = ReloadError::Copy {
            shadow: PathBuf::from("engine.s_0"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "locked"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("locked"));
    }
}
