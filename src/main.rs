//=========================================================================
// hotload: command-line entry point
//
//   hotload <module-path> [lockfile-path]
//
// Exit code 0 when the window closes or the module asks to stop, 1 when
// startup fails (no window, module not loadable).
//=========================================================================

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use hotload::core::input::InputDiscipline;
use hotload::core::reload::ReloadPolicy;
use hotload::platform::create_context;
use hotload::HarnessBuilder;

/// Hosts a native rendering module and reloads it whenever it is rebuilt.
#[derive(Debug, Parser)]
#[command(name = "hotload", version, about)]
struct Cli {
    /// Module binary to load and watch
    module_path: PathBuf,

    /// File whose presence means a build is still writing the module
    #[arg(default_value = "build.lock")]
    lockfile_path: PathBuf,

    /// Lock-file polls per reload before deferring to the next frame
    #[arg(long, default_value_t = 128, value_parser = clap::value_parser!(u32).range(1..))]
    lock_poll_attempts: u32,

    /// Milliseconds between lock-file polls
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    lock_poll_interval_ms: u64,

    /// Zero the whole input snapshot before every frame
    #[arg(long)]
    clear_input: bool,
}

impl Cli {
    fn reload_policy(&self) -> ReloadPolicy {
        ReloadPolicy::new()
            .with_lock_poll_attempts(self.lock_poll_attempts)
            .with_lock_poll_interval(Duration::from_millis(self.lock_poll_interval_ms))
    }

    fn input_discipline(&self) -> InputDiscipline {
        if self.clear_input {
            InputDiscipline::ClearEachFrame
        } else {
            InputDiscipline::Persistent
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut harness = HarnessBuilder::new(&cli.module_path)
        .with_lockfile(&cli.lockfile_path)
        .with_reload_policy(cli.reload_policy())
        .with_input_discipline(cli.input_discipline())
        .build();

    let mut os = create_context(*harness.reload_policy());

    match harness.run(os.as_mut()) {
        Ok(reason) => {
            info!(target: "harness", "Exited: {:?}", reason);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(target: "harness", "{}", e);
            ExitCode::FAILURE
        }
    }
}
