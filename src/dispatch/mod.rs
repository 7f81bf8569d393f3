//! Dispatcher: pick a target, run it with inherited stdio, pass its status through.

mod error;

pub use error::DispatchError;

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use crate::args::{classify, validation_flags, Route, ValidationFlag};
use crate::config::{Config, Targets};
use crate::signals::SignalForwarder;

/// Exit code when ffroute itself fails (spawn, wait or config).
pub const FAILURE_EXIT_CODE: i32 = 1;

/// What would be executed for a given argument vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
    pub route: Route,
    pub program: &'a Path,
    pub args: &'a [OsString],
}

/// Routes invocations between the local and remote binaries.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    targets: Targets,
    registry: &'static [ValidationFlag],
}

impl Dispatcher {
    pub fn new(targets: Targets) -> Self {
        Self {
            targets,
            registry: validation_flags(),
        }
    }

    pub fn targets(&self) -> &Targets {
        &self.targets
    }

    /// Resolve the invocation for `args` without side effects.
    pub fn plan<'a>(&'a self, args: &'a [OsString]) -> Invocation<'a> {
        let route = classify(args, self.registry);
        let program = match route {
            Route::Local => self.targets.local.as_path(),
            Route::Remote => self.targets.remote.as_path(),
        };
        Invocation {
            route,
            program,
            args,
        }
    }

    /// Run the selected target once and return its exit code.
    ///
    /// Arguments are passed unchanged, stdio is inherited, and a failure
    /// to launch is returned as-is: there is no retry and no fallback to
    /// the other target.
    pub fn dispatch(&self, args: &[OsString]) -> Result<i32, DispatchError> {
        let Invocation {
            route,
            program,
            args,
        } = self.plan(args);

        tracing::info!(
            route = %route,
            program = %program.display(),
            argc = args.len(),
            "dispatching"
        );

        let forwarder = match SignalForwarder::arm() {
            Ok(forwarder) => Some(forwarder),
            Err(e) => {
                tracing::warn!(error = %e, "signal forwarding unavailable");
                None
            }
        };

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| DispatchError::Spawn {
                route,
                program: program.to_path_buf(),
                source,
            })?;

        if let Some(guard) = forwarder.map(|f| f.forward_to(child.id())) {
            // Relaying ends while the child is still unreaped.
            guard.wait_exited();
            guard.stop();
        }

        let status = child.wait().map_err(|source| DispatchError::Wait {
            route,
            program: program.to_path_buf(),
            source,
        })?;

        let code = exit_code(status);
        tracing::info!(route = %route, code, "child exited");
        Ok(code)
    }
}

/// Dispatch `args` and turn the outcome into the process exit code.
///
/// Launch failures are reported on stderr, naming the binary, and map
/// to [`FAILURE_EXIT_CODE`].
pub fn run(targets: Targets, args: &[OsString]) -> i32 {
    match Dispatcher::new(targets).dispatch(args) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, route = %err.route(), "dispatch failed");
            eprintln!("{}", err);
            FAILURE_EXIT_CODE
        }
    }
}

/// Load the config at `config_path`, then [`run`].
///
/// A config that cannot be read, parsed or validated means the target
/// binary cannot be resolved; it is reported like a launch failure of
/// the route `args` selects.
pub fn run_with_config(config_path: &Path, args: &[OsString]) -> i32 {
    match Config::load_from(config_path) {
        Ok(config) => run(config.into_targets(), args),
        Err(source) => {
            let err = DispatchError::Config {
                route: classify(args, validation_flags()),
                source,
            };
            tracing::error!(error = %err, route = %err.route(), "dispatch failed");
            eprintln!("{}", err);
            FAILURE_EXIT_CODE
        }
    }
}

/// Map a child's status to ffroute's own exit code.
///
/// Normal exit passes the code through; death by signal `N` becomes
/// `128 + N`.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    FAILURE_EXIT_CODE
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Targets::new("/opt/local/ffmpeg", "/opt/remote/rffmpeg"))
    }

    fn os_args(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_plan_empty_args_targets_local() {
        let d = dispatcher();
        let args = os_args(&[]);
        let plan = d.plan(&args);
        assert_eq!(plan.route, Route::Local);
        assert_eq!(plan.program, Path::new("/opt/local/ffmpeg"));
        assert!(plan.args.is_empty());
    }

    #[test]
    fn test_plan_transcode_targets_remote_with_args_untouched() {
        let d = dispatcher();
        let args = os_args(&["-i", "input.mp4", "-c:v", "h264", "output.mp4"]);
        let plan = d.plan(&args);
        assert_eq!(plan.route, Route::Remote);
        assert_eq!(plan.program, Path::new("/opt/remote/rffmpeg"));
        assert_eq!(plan.args, args.as_slice());
    }

    #[test]
    fn test_plan_mixed_args_targets_local_with_full_vector() {
        let d = dispatcher();
        let args = os_args(&["-formats", "-i", "x.mp4"]);
        let plan = d.plan(&args);
        assert_eq!(plan.route, Route::Local);
        assert_eq!(plan.args.len(), 3);
    }

    #[test]
    fn test_missing_binary_is_a_spawn_error_for_that_route() {
        let dir = tempfile::TempDir::new().unwrap();
        let d = Dispatcher::new(Targets::new(
            dir.path().join("no-ffmpeg"),
            dir.path().join("no-rffmpeg"),
        ));
        let err = d.dispatch(&os_args(&["-i", "a.mkv", "b.mp4"])).unwrap_err();
        assert!(matches!(err, DispatchError::Spawn { route: Route::Remote, .. }));
        assert!(err.to_string().contains("no-rffmpeg"));
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_passes_codes_through() {
        use std::os::unix::process::ExitStatusExt;

        for code in [0, 1, 127, 255] {
            assert_eq!(exit_code(ExitStatus::from_raw(code << 8)), code);
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_maps_signals_shell_style() {
        use std::os::unix::process::ExitStatusExt;

        assert_eq!(exit_code(ExitStatus::from_raw(libc::SIGKILL)), 137);
        assert_eq!(exit_code(ExitStatus::from_raw(libc::SIGTERM)), 143);
    }
}
