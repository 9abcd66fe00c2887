//=========================================================================
// Module Lifecycle Interface
//
// The fixed C ABI every hot-loadable module exports.
//
// ```text
//   ModuleInterface_Create(const OsWindow*)                -> ctx*
//   ModuleInterface_Shutdown(ctx*)
//   ModuleInterface_Reload(ctx*)
//   ModuleInterface_LogicUpdate(ctx*, const InputSnapshot*) -> bool
//   ModuleInterface_DrawFrame(ctx*, const OsWindow*)
// ```
//
// Call order enforced by the harness:
//   Create (once) → { Reload? → LogicUpdate → DrawFrame }* → Shutdown (once)
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::ffi::c_void;
use std::fmt;
use std::ptr;

//=== Internal Imports ====================================================

use crate::core::input::InputSnapshot;
use crate::core::window::OsWindow;

//=== Function Signatures =================================================

/// Opaque, module-owned state. The host never looks inside.
pub type ModuleContext = c_void;

pub type CreateFn = unsafe extern "C" fn(*const OsWindow) -> *mut ModuleContext;
pub type ShutdownFn = unsafe extern "C" fn(*mut ModuleContext);
pub type ReloadFn = unsafe extern "C" fn(*mut ModuleContext);
pub type LogicUpdateFn = unsafe extern "C" fn(*mut ModuleContext, *const InputSnapshot) -> bool;
pub type DrawFrameFn = unsafe extern "C" fn(*mut ModuleContext, *const OsWindow);

//=== Exported Symbol Names ===============================================

/// Nul-terminated export names, resolved by exact match.
pub mod symbols {
    pub const CREATE: &[u8] = b"ModuleInterface_Create\0";
    pub const SHUTDOWN: &[u8] = b"ModuleInterface_Shutdown\0";
    pub const RELOAD: &[u8] = b"ModuleInterface_Reload\0";
    pub const LOGIC_UPDATE: &[u8] = b"ModuleInterface_LogicUpdate\0";
    pub const DRAW_FRAME: &[u8] = b"ModuleInterface_DrawFrame\0";

    /// All five, in declaration order.
    pub const ALL: [&[u8]; 5] = [CREATE, SHUTDOWN, RELOAD, LOGIC_UPDATE, DRAW_FRAME];

    /// Human-readable form of a symbol name (without the nul).
    pub fn display(symbol: &[u8]) -> String {
        String::from_utf8_lossy(symbol.strip_suffix(b"\0").unwrap_or(symbol)).into_owned()
    }
}

//=== ModuleInterface =====================================================

/// Resolved entry points of one loaded module version.
///
/// The pointers are only valid while the library they came from stays
/// loaded. [`ModuleRecord`](super::ModuleRecord) owns both and replaces
/// them together.
#[derive(Clone, Copy)]
pub struct ModuleInterface {
    pub create: CreateFn,
    pub shutdown: ShutdownFn,
    pub reload: ReloadFn,
    pub logic_update: LogicUpdateFn,
    pub draw_frame: DrawFrameFn,
}

impl ModuleInterface {
    /// No-op entry points used before the first successful load and by
    /// the stub backend.
    pub const fn stub() -> Self {
        Self {
            create: stub::create,
            shutdown: stub::shutdown,
            reload: stub::reload,
            logic_update: stub::logic_update,
            draw_frame: stub::draw_frame,
        }
    }

    /// Returns `true` if every entry point is the same address in both.
    pub fn same_entry_points(&self, other: &Self) -> bool {
        self.addresses() == other.addresses()
    }

    /// Returns `true` if no entry point is shared between the two.
    pub fn disjoint_from(&self, other: &Self) -> bool {
        let ours = self.addresses();
        other.addresses().iter().all(|addr| !ours.contains(addr))
    }

    fn addresses(&self) -> [usize; 5] {
        [
            self.create as usize,
            self.shutdown as usize,
            self.reload as usize,
            self.logic_update as usize,
            self.draw_frame as usize,
        ]
    }
}

impl Default for ModuleInterface {
    fn default() -> Self {
        Self::stub()
    }
}

impl fmt::Debug for ModuleInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [create, shutdown, reload, logic_update, draw_frame] = self.addresses();
        f.debug_struct("ModuleInterface")
            .field("create", &format_args!("{:#x}", create))
            .field("shutdown", &format_args!("{:#x}", shutdown))
            .field("reload", &format_args!("{:#x}", reload))
            .field("logic_update", &format_args!("{:#x}", logic_update))
            .field("draw_frame", &format_args!("{:#x}", draw_frame))
            .finish()
    }
}

//=== Stub Entry Points ===================================================

mod stub {
    use super::*;

    pub(super) unsafe extern "C" fn create(_: *const OsWindow) -> *mut ModuleContext {
        ptr::null_mut()
    }

    pub(super) unsafe extern "C" fn shutdown(_: *mut ModuleContext) {}

    pub(super) unsafe extern "C" fn reload(_: *mut ModuleContext) {}

    pub(super) unsafe extern "C" fn logic_update(
        _: *mut ModuleContext,
        _: *const InputSnapshot,
    ) -> bool {
        true
    }

    pub(super) unsafe extern "C" fn draw_frame(_: *mut ModuleContext, _: *const OsWindow) {}
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_names_are_nul_terminated() {
        for symbol in symbols::ALL {
            assert_eq!(symbol.last(), Some(&0));
            assert!(symbols::display(symbol).starts_with("ModuleInterface_"));
        }
    }

    #[test]
    fn symbol_display_strips_nul() {
        assert_eq!(symbols::display(symbols::DRAW_FRAME), "ModuleInterface_DrawFrame");
    }

    #[test]
    fn stub_keeps_running_and_creates_nothing() {
        let stub = ModuleInterface::stub();
        let window = OsWindow::null();
        let input = InputSnapshot::new();
        unsafe {
            let ctx = (stub.create)(&window);
            assert!(ctx.is_null());
            assert!((stub.logic_update)(ctx, &input));
            (stub.draw_frame)(ctx, &window);
            (stub.reload)(ctx);
            (stub.shutdown)(ctx);
        }
    }

    #[test]
    fn stub_compares_equal_to_itself() {
        assert!(ModuleInterface::stub().same_entry_points(&ModuleInterface::default()));
    }
}
