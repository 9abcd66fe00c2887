//=========================================================================
// Hotload Harness
//
// Driver loop: owns the window and the loaded module, pumps the OS,
// swaps in new module binaries, and calls the module once per frame.
//
// Architecture:
// ```text
//     HarnessBuilder  ──build()──>  Harness  ──run(&mut dyn OsContext)──>  ExitReason
//         │                                    │
//         ├─ with_lockfile()                   ├─ create window, load module, Create
//         ├─ with_reload_policy()              ├─ per frame: pump → time → reload? →
//         └─ with_input_discipline()           │             LogicUpdate → DrawFrame
//                                              └─ Shutdown once, release record
// ```
//
// Notes:
// Everything runs on the calling thread. A reload blocks the loop for at
// most the policy's worst case (lock-file polling).
//
//=========================================================================

//=== Standard Library ====================================================

use std::path::{Path, PathBuf};
use std::time::Instant;

//=== External Dependencies ===============================================

use log::{debug, error, info, trace, warn};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputDiscipline, InputSnapshot};
use crate::core::platform_bridge::OsContext;
use crate::core::reload::{ReloadOutcome, ReloadPolicy};

//=== ExitReason ==========================================================

/// How a run ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// `pump_events` reported a close or destroy.
    WindowClosed,
    /// `LogicUpdate` returned `false`.
    ModuleRequestedStop,
}

//=== HarnessError ========================================================

/// Startup failures. Nothing after the first `Create` is an error.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("Window creation failed")]
    WindowCreation,

    #[error("Module {} could not be loaded", .0.display())]
    ModuleUnavailable(PathBuf),
}

//=== HarnessBuilder ======================================================

/// Builder for configuring and constructing a [`Harness`].
///
/// # Default Values
///
/// - **Lock-file**: none
/// - **Reload policy**: [`ReloadPolicy::default`] (128 × 100 ms polls)
/// - **Input discipline**: [`InputDiscipline::Persistent`]
///
/// # Examples
///
/// ```no_run
/// use hotload::HarnessBuilder;
/// use hotload::platform::create_context;
///
/// let mut harness = HarnessBuilder::new("target/debug/libcounter_module.so")
///     .with_lockfile("build.lock")
///     .build();
///
/// let mut os = create_context(*harness.reload_policy());
/// harness.run(os.as_mut())?;
/// # Ok::<(), hotload::HarnessError>(())
/// ```
#[derive(Debug, Clone)]
pub struct HarnessBuilder {
    module_path: PathBuf,
    lockfile: Option<PathBuf>,
    reload_policy: ReloadPolicy,
    input_discipline: InputDiscipline,
}

impl HarnessBuilder {
    /// Creates a builder for the module at `module_path`.
    ///
    /// # Panics
    ///
    /// Panics if `module_path` is empty.
    pub fn new(module_path: impl Into<PathBuf>) -> Self {
        let module_path = module_path.into();
        assert!(!module_path.as_os_str().is_empty(), "Module path must not be empty");

        Self {
            module_path,
            lockfile: None,
            reload_policy: ReloadPolicy::default(),
            input_discipline: InputDiscipline::default(),
        }
    }

    /// Sets the file whose presence means "build in progress".
    pub fn with_lockfile(mut self, lockfile: impl Into<PathBuf>) -> Self {
        self.lockfile = Some(lockfile.into());
        self
    }

    /// Sets the retry budget. [`Harness::run`] installs it on the OS
    /// context before the first load.
    ///
    /// Default: [`ReloadPolicy::default`]
    pub fn with_reload_policy(mut self, policy: ReloadPolicy) -> Self {
        self.reload_policy = policy;
        self
    }

    /// Sets how the input snapshot is reset between frames.
    ///
    /// Default: [`InputDiscipline::Persistent`]
    pub fn with_input_discipline(mut self, discipline: InputDiscipline) -> Self {
        self.input_discipline = discipline;
        self
    }

    pub fn build(self) -> Harness {
        info!(
            target: "harness",
            "Building harness (module: {}, discipline: {:?})",
            self.module_path.display(),
            self.input_discipline
        );

        Harness {
            module_path: self.module_path,
            lockfile: self.lockfile,
            reload_policy: self.reload_policy,
            input_discipline: self.input_discipline,
        }
    }
}

//=== Harness =============================================================

/// The hot-reload driver loop. Create via [`HarnessBuilder`].
#[derive(Debug, Clone)]
pub struct Harness {
    module_path: PathBuf,
    lockfile: Option<PathBuf>,
    reload_policy: ReloadPolicy,
    input_discipline: InputDiscipline,
}

impl Harness {
    //--- Accessors --------------------------------------------------------

    pub fn module_path(&self) -> &Path {
        &self.module_path
    }

    pub fn lockfile(&self) -> Option<&Path> {
        self.lockfile.as_deref()
    }

    pub fn reload_policy(&self) -> &ReloadPolicy {
        &self.reload_policy
    }

    pub fn input_discipline(&self) -> InputDiscipline {
        self.input_discipline
    }

    //--- Execution --------------------------------------------------------

    /// Runs until the window closes or the module asks to stop.
    ///
    /// # Lifecycle
    ///
    /// 0. Installs the reload policy on `os`
    /// 1. Creates the window (null sentinel → [`HarnessError::WindowCreation`])
    /// 2. Loads the module (not live → [`HarnessError::ModuleUnavailable`])
    /// 3. Calls `Create` once; the context it returns, null included, is
    ///    handed to every later call
    /// 4. Loops: pump, time delta, reload if due (then `Reload` on the
    ///    same context), `LogicUpdate`, `DrawFrame`
    /// 5. Calls `Shutdown` once and releases the module
    pub fn run(&mut self, os: &mut dyn OsContext) -> Result<ExitReason, HarnessError> {
        info!(target: "harness", "Starting harness");

        os.set_reload_policy(self.reload_policy);

        //--- 1. Window ----------------------------------------------------
        let mut window = os.create_window();
        if window.is_null() {
            error!(target: "harness", "Window creation failed");
            return Err(HarnessError::WindowCreation);
        }

        //--- 2. First load ------------------------------------------------
        let mut record = os.engine_load(&self.module_path, self.lockfile.as_deref());
        if !record.is_live() {
            error!(target: "harness", "Module {} unavailable", self.module_path.display());
            os.engine_release(record);
            return Err(HarnessError::ModuleUnavailable(self.module_path.clone()));
        }

        //--- 3. Create ----------------------------------------------------
        let context = record.create(&window);
        if context.is_null() {
            warn!(target: "harness", "Module returned a null context");
        }
        info!(target: "harness", "Module created, entering frame loop");

        //--- 4. Frame loop ------------------------------------------------
        let mut input = InputSnapshot::new();
        let mut last_frame = Instant::now();
        let mut frames: u64 = 0;

        let reason = loop {
            input.begin_frame(self.input_discipline);
            if !os.pump_events(&mut window, &mut input) {
                break ExitReason::WindowClosed;
            }

            let now = Instant::now();
            input.time_delta = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;

            if os.engine_reload_required(&record) {
                match os.engine_reload_module(&mut record) {
                    ReloadOutcome::Reloaded { attempts, shadow } => {
                        info!(
                            target: "harness",
                            "Module reloaded from {} after {} attempt(s)",
                            shadow.display(),
                            attempts
                        );
                        record.reload(context);
                    }
                    ReloadOutcome::Deferred => {
                        trace!(target: "harness", "Reload deferred to next frame");
                    }
                    ReloadOutcome::Failed(e) => {
                        trace!(target: "harness", "Reload failed ({}), keeping current module", e);
                    }
                }
            }

            if !record.logic_update(context, &input) {
                break ExitReason::ModuleRequestedStop;
            }
            record.draw_frame(context, &window);
            frames += 1;
        };

        //--- 5. Shutdown --------------------------------------------------
        info!(target: "harness", "Frame loop exited ({:?}) after {} frames", reason, frames);
        record.shutdown(context);
        os.engine_release(record);
        debug!(target: "harness", "Harness shutdown complete");

        Ok(reason)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{Key, OsEvent};
    use crate::core::module::ModuleRecord;
    use crate::core::reload::testing::{journal, FakeLoader, LoaderProbe};
    use crate::core::window::OsWindow;
    use crate::platform::{HeadlessContext, StubOs};
    use crossbeam_channel::Sender;
    use std::fs::{self, File};
    use std::time::{Duration, SystemTime};

    //--- Fixtures ---------------------------------------------------------

    fn fast_policy() -> ReloadPolicy {
        ReloadPolicy::new()
            .with_lock_poll_attempts(4)
            .with_lock_poll_interval(Duration::from_millis(10))
    }

    fn builder(module: &Path) -> HarnessBuilder {
        HarnessBuilder::new(module).with_reload_policy(fast_policy())
    }

    fn set_mtime(path: &Path, secs: u64) {
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
            .unwrap();
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        module: PathBuf,
        os: HeadlessContext<FakeLoader>,
        events: Sender<Vec<OsEvent>>,
        probe: LoaderProbe,
    }

    fn fixture() -> Fixture {
        journal::reset();
        let dir = tempfile::tempdir().unwrap();
        let module = dir.path().join("engine.so");
        fs::write(&module, b"module bytes").unwrap();
        set_mtime(&module, 1_000);

        let (loader, probe) = FakeLoader::new();
        let (os, events) = HeadlessContext::new(loader, fast_policy());
        Fixture { _dir: dir, module, os, events, probe }
    }

    /// Headless context that rewrites the module's mtime before given pumps.
    struct Rebuilding {
        inner: HeadlessContext<FakeLoader>,
        module: PathBuf,
        pumps: usize,
        rebuild_at: Vec<usize>,
        break_symbols: Option<LoaderProbe>,
    }

    impl OsContext for Rebuilding {
        fn create_window(&mut self) -> OsWindow {
            self.inner.create_window()
        }

        fn pump_events(&mut self, window: &mut OsWindow, input: &mut InputSnapshot) -> bool {
            self.pumps += 1;
            if self.rebuild_at.contains(&self.pumps) {
                if let Some(probe) = &self.break_symbols {
                    fs::write(&self.module, b"BROKEN build").unwrap();
                    probe.set_missing_symbol(true);
                }
                set_mtime(&self.module, 1_000 + self.pumps as u64);
            }
            self.inner.pump_events(window, input)
        }

        fn set_reload_policy(&mut self, policy: ReloadPolicy) {
            self.inner.set_reload_policy(policy)
        }

        fn engine_load(&mut self, path: &Path, lockfile: Option<&Path>) -> ModuleRecord {
            self.inner.engine_load(path, lockfile)
        }

        fn engine_release(&mut self, record: ModuleRecord) {
            self.inner.engine_release(record)
        }

        fn engine_reload_required(&self, record: &ModuleRecord) -> bool {
            self.inner.engine_reload_required(record)
        }

        fn engine_reload_module(&mut self, record: &mut ModuleRecord) -> ReloadOutcome {
            self.inner.engine_reload_module(record)
        }
    }

    //=====================================================================
    // HarnessBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = HarnessBuilder::new("engine.so");
        assert_eq!(builder.module_path, PathBuf::from("engine.so"));
        assert_eq!(builder.lockfile, None);
        assert_eq!(builder.reload_policy, ReloadPolicy::default());
        assert_eq!(builder.input_discipline, InputDiscipline::Persistent);
    }

    #[test]
    #[should_panic(expected = "Module path must not be empty")]
    fn builder_panics_on_empty_path() {
        HarnessBuilder::new("");
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let harness = HarnessBuilder::new("engine.so")
            .with_lockfile("build.lock")
            .with_reload_policy(fast_policy())
            .with_input_discipline(InputDiscipline::ClearEachFrame)
            .build();

        assert_eq!(harness.module_path(), Path::new("engine.so"));
        assert_eq!(harness.lockfile(), Some(Path::new("build.lock")));
        assert_eq!(*harness.reload_policy(), fast_policy());
        assert_eq!(harness.input_discipline(), InputDiscipline::ClearEachFrame);
    }

    //=====================================================================
    // Startup Errors
    //=====================================================================

    #[test]
    fn null_window_is_a_startup_error() {
        let mut harness = HarnessBuilder::new("engine.so").build();
        let result = harness.run(&mut StubOs);
        assert!(matches!(result, Err(HarnessError::WindowCreation)));
    }

    #[test]
    fn missing_module_is_a_startup_error() {
        let mut fx = fixture();
        fs::remove_file(&fx.module).unwrap();
        let mut harness = builder(&fx.module).build();

        let result = harness.run(&mut fx.os);

        assert!(matches!(result, Err(HarnessError::ModuleUnavailable(p)) if p == fx.module));
        assert_eq!(journal::count(".Create"), 0);
        assert_eq!(journal::count(".Shutdown"), 0);
    }

    #[test]
    fn run_installs_the_reload_policy_on_the_context() {
        let mut fx = fixture();
        fx.events.send(vec![OsEvent::CloseRequested]).unwrap();
        let policy = ReloadPolicy::new()
            .with_lock_poll_attempts(2)
            .with_copy_attempts(3);
        let mut harness = HarnessBuilder::new(&fx.module).with_reload_policy(policy).build();

        harness.run(&mut fx.os).unwrap();

        assert_eq!(*fx.os.reload_policy(), policy);
    }

    //=====================================================================
    // Frame Loop
    //=====================================================================

    #[test]
    fn resize_reaches_draw_and_close_shuts_down_once() {
        let mut fx = fixture();
        fx.events.send(vec![OsEvent::Resized { width: 800, height: 600 }]).unwrap();
        fx.events.send(vec![OsEvent::CloseRequested]).unwrap();
        let mut harness = builder(&fx.module).build();

        let reason = harness.run(&mut fx.os).unwrap();

        assert_eq!(reason, ExitReason::WindowClosed);
        assert_eq!(journal::count(".Create"), 1);
        assert_eq!(journal::count(".Shutdown"), 1);
        assert_eq!(journal::drawn_sizes(), vec![[800, 600]]);
        assert_eq!(journal::calls().last(), Some(&"v1.Shutdown"));
        assert_eq!(fx.probe.released().len(), 1);
    }

    #[test]
    fn disconnected_event_source_closes_before_first_frame() {
        let mut fx = fixture();
        drop(fx.events);
        let mut harness = builder(&fx.module).build();

        let reason = harness.run(&mut fx.os).unwrap();

        assert_eq!(reason, ExitReason::WindowClosed);
        assert_eq!(journal::count(".LogicUpdate"), 0);
        assert_eq!(journal::count(".Shutdown"), 1);
    }

    #[test]
    fn module_requested_stop_skips_draw_and_shuts_down() {
        let mut fx = fixture();
        journal::stop_after_updates(3);
        let mut harness = builder(&fx.module).build();

        let reason = harness.run(&mut fx.os).unwrap();

        assert_eq!(reason, ExitReason::ModuleRequestedStop);
        assert_eq!(journal::count(".LogicUpdate"), 3);
        assert_eq!(journal::count(".DrawFrame"), 2);
        assert_eq!(journal::count(".Shutdown"), 1);
    }

    #[test]
    fn every_call_sees_the_created_context() {
        let mut fx = fixture();
        journal::stop_after_updates(2);
        let mut harness = builder(&fx.module).build();

        harness.run(&mut fx.os).unwrap();

        let contexts = journal::contexts();
        assert_ne!(contexts[0], 0);
        assert!(contexts.iter().all(|&c| c == contexts[0]));
    }

    //=====================================================================
    // Input Discipline
    //=====================================================================

    #[test]
    fn persistent_input_holds_keys_across_frames() {
        let mut fx = fixture();
        journal::stop_after_updates(2);
        fx.events.send(vec![OsEvent::Key { code: 'w' as u32, pressed: true }]).unwrap();
        let mut harness = builder(&fx.module).build();

        harness.run(&mut fx.os).unwrap();

        let inputs = journal::inputs();
        assert!(inputs[0].is_char_down('w'));
        assert!(inputs[1].is_char_down('w'));
    }

    #[test]
    fn clear_each_frame_drops_held_keys() {
        let mut fx = fixture();
        journal::stop_after_updates(2);
        fx.events.send(vec![OsEvent::Key { code: 0xff1b, pressed: true }]).unwrap();
        let mut harness = builder(&fx.module)
            .with_input_discipline(InputDiscipline::ClearEachFrame)
            .build();

        harness.run(&mut fx.os).unwrap();

        let inputs = journal::inputs();
        assert!(inputs[0].is_down(Key::Escape.slot()));
        assert!(!inputs[1].is_down(Key::Escape.slot()));
    }

    #[test]
    fn time_delta_is_non_negative() {
        let mut fx = fixture();
        journal::stop_after_updates(3);
        let mut harness = builder(&fx.module).build();

        harness.run(&mut fx.os).unwrap();

        assert!(journal::inputs().iter().all(|i| i.time_delta >= 0.0));
    }

    //=====================================================================
    // Hot Reload
    //=====================================================================

    #[test]
    fn rebuilt_module_is_reloaded_with_the_same_context() {
        let fx = fixture();
        journal::stop_after_updates(4);
        let mut os = Rebuilding {
            inner: fx.os,
            module: fx.module.clone(),
            pumps: 0,
            rebuild_at: vec![2],
            break_symbols: None,
        };
        let mut harness = builder(&fx.module).build();

        harness.run(&mut os).unwrap();

        let calls = journal::calls();
        let reload = calls.iter().position(|c| *c == "v2.Reload").unwrap();
        assert_eq!(calls[reload + 1], "v2.LogicUpdate");
        assert_eq!(journal::count(".Create"), 1);
        assert_eq!(calls.last(), Some(&"v2.Shutdown"));

        let contexts = journal::contexts();
        assert!(contexts.iter().all(|&c| c == contexts[0]));
    }

    #[test]
    fn two_rebuilds_release_the_first_shadow() {
        let fx = fixture();
        journal::stop_after_updates(5);
        let mut os = Rebuilding {
            inner: fx.os,
            module: fx.module.clone(),
            pumps: 0,
            rebuild_at: vec![2, 4],
            break_symbols: None,
        };
        let mut harness = builder(&fx.module).build();

        harness.run(&mut os).unwrap();

        let dir = fx.module.parent().unwrap();
        let opened = fx.probe.opened();
        assert_eq!(
            opened,
            vec![dir.join("engine.s_0"), dir.join("engine.s_1"), dir.join("engine.s_2")]
        );
        assert_eq!(journal::count(".Reload"), 2);

        let released = fx.probe.released();
        assert_eq!(released, opened);
    }

    #[test]
    fn failed_reload_keeps_running_previous_module() {
        let fx = fixture();
        journal::stop_after_updates(4);
        let mut os = Rebuilding {
            inner: fx.os,
            module: fx.module.clone(),
            pumps: 0,
            rebuild_at: vec![2],
            break_symbols: Some(fx.probe.clone()),
        };
        let mut harness = builder(&fx.module).build();

        let reason = harness.run(&mut os).unwrap();

        assert_eq!(reason, ExitReason::ModuleRequestedStop);
        assert_eq!(journal::count(".Reload"), 0);
        assert!(journal::calls().iter().all(|c| c.starts_with("v1.")));
        assert_eq!(journal::count(".Shutdown"), 1);
    }

    #[test]
    fn long_broken_build_never_touches_the_live_shadow() {
        let fx = fixture();
        journal::stop_after_updates(320);
        let mut os = Rebuilding {
            inner: fx.os,
            module: fx.module.clone(),
            pumps: 0,
            rebuild_at: (2..=310).collect(),
            break_symbols: Some(fx.probe.clone()),
        };
        let mut harness = builder(&fx.module).build();

        let reason = harness.run(&mut os).unwrap();

        let live = fx.module.parent().unwrap().join("engine.s_0");
        assert_eq!(reason, ExitReason::ModuleRequestedStop);
        assert_eq!(fs::read(&live).unwrap(), b"module bytes");
        assert_eq!(fx.probe.opened().iter().filter(|p| **p == live).count(), 1);
        assert_eq!(fx.probe.opened().len(), 310);
        assert_eq!(journal::count(".Reload"), 0);
        assert!(journal::calls().iter().all(|c| c.starts_with("v1.")));
        assert_eq!(journal::count(".Shutdown"), 1);
    }
}
