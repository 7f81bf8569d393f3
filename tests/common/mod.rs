//! Shared test utilities: stub ffmpeg/rffmpeg binaries that record their argv.

#![allow(dead_code)]

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use ffroute::config::Targets;
use tempfile::TempDir;

/// An executable shell script that logs each call and exits with a fixed code.
pub struct StubBinary {
    pub path: PathBuf,
    log: PathBuf,
}

impl StubBinary {
    pub fn create(dir: &Path, name: &str, exit_code: i32) -> Self {
        let path = dir.join(name);
        let log = dir.join(format!("{}.calls", name));
        let script = format!(
            "#!/bin/sh\n\
             printf 'call\\n' >> '{log}'\n\
             for arg in \"$@\"; do\n\
             \tprintf 'arg:%s\\n' \"$arg\" >> '{log}'\n\
             done\n\
             exit {code}\n",
            log = log.display(),
            code = exit_code,
        );
        write_executable(dir, name, &script);
        Self { path, log }
    }

    /// Argument vectors of every recorded call, in order.
    pub fn calls(&self) -> Vec<Vec<String>> {
        let Ok(content) = std::fs::read_to_string(&self.log) else {
            return Vec::new();
        };
        let mut calls: Vec<Vec<String>> = Vec::new();
        for line in content.lines() {
            if line == "call" {
                calls.push(Vec::new());
            } else if let Some(arg) = line.strip_prefix("arg:") {
                calls
                    .last_mut()
                    .expect("arg line before call line")
                    .push(arg.to_string());
            }
        }
        calls
    }
}

/// A local + remote stub pair in one temp directory.
pub struct StubPair {
    pub dir: TempDir,
    pub local: StubBinary,
    pub remote: StubBinary,
}

impl StubPair {
    pub fn new(local_exit: i32, remote_exit: i32) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let local = StubBinary::create(dir.path(), "ffmpeg", local_exit);
        let remote = StubBinary::create(dir.path(), "rffmpeg", remote_exit);
        Self { dir, local, remote }
    }

    pub fn targets(&self) -> Targets {
        Targets::new(&self.local.path, &self.remote.path)
    }
}

/// Write a script and make it executable.
///
/// The final file is produced by `install(1)` in a child process, so no
/// writable fd to it is ever open in the (multi-threaded) test process.
/// Otherwise a concurrent fork elsewhere could make exec fail with ETXTBSY.
pub fn write_executable(dir: &Path, name: &str, content: &str) {
    let source = dir.join(format!("{}.src", name));
    std::fs::write(&source, content).expect("failed to write stub script");
    let status = Command::new("install")
        .arg("-m")
        .arg("0755")
        .arg(&source)
        .arg(dir.join(name))
        .status()
        .expect("failed to run install");
    assert!(status.success(), "install failed for {}", name);
}

pub fn os_args(args: &[&str]) -> Vec<OsString> {
    args.iter().map(OsString::from).collect()
}

pub fn strings(args: &[&str]) -> Vec<String> {
    args.iter().map(|s| s.to_string()).collect()
}
