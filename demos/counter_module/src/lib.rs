//=========================================================================
// Counter Module
//
// Minimal module for the hotload harness. Counts frames and elapsed time,
// tracks the window size, and stops when Escape is pressed. Rebuild it
// while the harness runs to see the reload; the counters survive because
// they live in the context, not in the library.
//
//   cargo build -p counter_module
//   hotload target/debug/libcounter_module.so
//
//=========================================================================

#![allow(non_snake_case)]

use std::ffi::c_void;

use log::info;

use hotload::core::input::{InputSnapshot, Key};
use hotload::core::window::OsWindow;

/// Frames between progress lines.
const REPORT_EVERY: u64 = 600;

/// Lives across reloads; only code is swapped.
#[derive(Debug, Default)]
struct Counter {
    frames: u64,
    elapsed: f32,
    size: [u32; 2],
    reloads: u32,
}

/// # Safety
///
/// `window` must point to a valid `OsWindow` for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn ModuleInterface_Create(window: *const OsWindow) -> *mut c_void {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).try_init();

    let size = window.as_ref().map_or([0, 0], |w| w.size);
    info!(target: "counter", "Created for a {}x{} window", size[0], size[1]);

    Box::into_raw(Box::new(Counter { size, ..Counter::default() })) as *mut c_void
}

/// # Safety
///
/// `context` must come from `ModuleInterface_Create` and not be used again.
#[no_mangle]
pub unsafe extern "C" fn ModuleInterface_Shutdown(context: *mut c_void) {
    if context.is_null() {
        return;
    }
    let counter = Box::from_raw(context as *mut Counter);
    info!(
        target: "counter",
        "Shutdown after {} frames, {:.1}s, {} reloads",
        counter.frames,
        counter.elapsed,
        counter.reloads
    );
}

/// # Safety
///
/// `context` must come from `ModuleInterface_Create`.
#[no_mangle]
pub unsafe extern "C" fn ModuleInterface_Reload(context: *mut c_void) {
    if let Some(counter) = (context as *mut Counter).as_mut() {
        counter.reloads += 1;
        info!(target: "counter", "Reloaded (#{}) at frame {}", counter.reloads, counter.frames);
    }
}

/// # Safety
///
/// `context` must come from `ModuleInterface_Create`; `input` must be valid.
#[no_mangle]
pub unsafe extern "C" fn ModuleInterface_LogicUpdate(context: *mut c_void, input: *const InputSnapshot) -> bool {
    let (Some(counter), Some(input)) = ((context as *mut Counter).as_mut(), input.as_ref()) else {
        return true;
    };

    counter.frames += 1;
    counter.elapsed += input.time_delta;
    if counter.frames % REPORT_EVERY == 0 {
        info!(
            target: "counter",
            "{} frames, {:.1}s, cursor {:?}",
            counter.frames,
            counter.elapsed,
            input.cursor
        );
    }

    !input.is_down(Key::Escape.slot())
}

/// # Safety
///
/// `context` must come from `ModuleInterface_Create`; `window` must be valid.
#[no_mangle]
pub unsafe extern "C" fn ModuleInterface_DrawFrame(context: *mut c_void, window: *const OsWindow) {
    let (Some(counter), Some(window)) = ((context as *mut Counter).as_mut(), window.as_ref()) else {
        return;
    };

    if counter.size != window.size {
        info!(target: "counter", "Resized to {}x{}", window.width(), window.height());
        counter.size = window.size;
    }
}
