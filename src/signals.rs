//! Forwarding of termination signals to the running child.
//!
//! The media server stops a transcode by signalling the process it
//! spawned, which is ffroute. Handlers are armed *before* the child is
//! spawned so an early signal is queued instead of killing ffroute and
//! orphaning the child.
//!
//! Signals that were ignored when ffroute started (`nohup`, background
//! jobs) are left alone: the ignore is inherited by the child across exec
//! and nothing is relayed for them.

#[cfg(unix)]
use std::thread;

use anyhow::Result;

#[cfg(unix)]
use anyhow::Context;
#[cfg(unix)]
use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Signals relayed to the child, unless ignored at startup.
#[cfg(unix)]
pub const FORWARDED_SIGNALS: [i32; 4] = [SIGTERM, SIGINT, SIGHUP, SIGQUIT];

/// Handlers installed, no child attached yet.
pub struct SignalForwarder {
    #[cfg(unix)]
    signals: Signals,
    #[cfg(unix)]
    armed: Vec<i32>,
}

/// Running relay thread for one child.
pub struct ForwardingGuard {
    #[cfg(unix)]
    pid: u32,
    #[cfg(unix)]
    handle: signal_hook::iterator::Handle,
    #[cfg(unix)]
    thread: thread::JoinHandle<()>,
}

/// Whether `signal` is currently set to `SIG_IGN`.
#[cfg(unix)]
pub fn is_ignored(signal: i32) -> bool {
    // SAFETY: a null `act` only queries the disposition into `old`.
    unsafe {
        let mut old: libc::sigaction = std::mem::zeroed();
        libc::sigaction(signal, std::ptr::null(), &mut old) == 0
            && old.sa_sigaction == libc::SIG_IGN
    }
}

impl SignalForwarder {
    /// Install handlers for every [`FORWARDED_SIGNALS`] entry not already ignored.
    pub fn arm() -> Result<Self> {
        #[cfg(unix)]
        {
            let armed: Vec<i32> = FORWARDED_SIGNALS
                .into_iter()
                .filter(|&signal| !is_ignored(signal))
                .collect();
            let signals =
                Signals::new(&armed).context("failed to install signal handlers")?;
            return Ok(Self { signals, armed });
        }

        #[cfg(not(unix))]
        {
            Ok(Self {})
        }
    }

    /// Signals this forwarder holds handlers for.
    #[cfg(unix)]
    pub fn armed(&self) -> &[i32] {
        &self.armed
    }

    /// Start relaying queued and future signals to `pid`.
    pub fn forward_to(self, pid: u32) -> ForwardingGuard {
        #[cfg(unix)]
        {
            let mut signals = self.signals;
            let handle = signals.handle();
            let thread = thread::spawn(move || {
                for signal in signals.forever() {
                    tracing::info!(signal, pid, "forwarding signal to child");
                    // SAFETY: kill(2) has no memory-safety preconditions.
                    let rc = unsafe { libc::kill(pid as libc::pid_t, signal) };
                    if rc != 0 {
                        tracing::warn!(
                            signal,
                            pid,
                            error = %std::io::Error::last_os_error(),
                            "failed to forward signal"
                        );
                    }
                }
            });
            return ForwardingGuard {
                pid,
                handle,
                thread,
            };
        }

        #[cfg(not(unix))]
        {
            let _ = pid;
            ForwardingGuard {}
        }
    }
}

impl ForwardingGuard {
    /// Block until the child has exited, without reaping it.
    ///
    /// The child stays a zombie until the caller reaps it, so its pid
    /// cannot be handed to another process while relaying is still on.
    pub fn wait_exited(&self) {
        #[cfg(unix)]
        {
            loop {
                // SAFETY: `info` is a valid out-pointer for the duration of the call.
                let rc = unsafe {
                    let mut info: libc::siginfo_t = std::mem::zeroed();
                    libc::waitid(
                        libc::P_PID,
                        self.pid as libc::id_t,
                        &mut info,
                        libc::WEXITED | libc::WNOWAIT,
                    )
                };
                if rc == 0 {
                    return;
                }
                let err = std::io::Error::last_os_error();
                if err.kind() != std::io::ErrorKind::Interrupted {
                    tracing::warn!(pid = self.pid, error = %err, "waitid failed");
                    return;
                }
            }
        }
    }

    /// Stop relaying. Call after [`wait_exited`](Self::wait_exited) and
    /// before reaping the child.
    pub fn stop(self) {
        #[cfg(unix)]
        {
            self.handle.close();
            let _ = self.thread.join();
        }
    }
}
