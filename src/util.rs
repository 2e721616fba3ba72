//! Tracing setup and retrying file operations used by the record source and sink.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::thread::sleep;
use std::time::Duration;

static INIT_ONCE: std::sync::Once = std::sync::Once::new();
pub fn init_tracing_once() {
    INIT_ONCE.call_once(|| {
        let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

const TRIES: usize = 16;
const DELAY_MS: u64 = 50;

/// Return true for transient/retriable I/O errors often seen on Windows when
/// filter drivers (AV/backup), USB/NAS volumes, or sharing violations occur.
fn is_retriable_io_error(e: &io::Error) -> bool {
    // 5 access denied, 21 device not ready, 32 sharing violation, 33 lock violation,
    // 225 AV blocked, 1006 volume altered, 1117 device error, 1224 user-mapped section
    matches!(e.raw_os_error(), Some(5 | 21 | 32 | 33 | 225 | 433 | 1006 | 1117 | 1224))
}

/// Run `op` until it succeeds, fails with a non-retriable error, or runs out of tries.
/// Back-off grows linearly with the attempt number.
fn with_backoff<T>(tries: usize, delay_ms: u64, mut op: impl FnMut() -> io::Result<T>) -> io::Result<T> {
    let mut attempt = 0usize;
    loop {
        match op() {
            Ok(v) => return Ok(v),
            Err(e) if is_retriable_io_error(&e) && attempt + 1 < tries.max(1) => {
                attempt += 1;
                sleep(Duration::from_millis(delay_ms.saturating_mul(attempt as u64)));
            }
            Err(e) => return Err(e),
        }
    }
}

pub fn open_with_backoff(path: &Path) -> io::Result<File> {
    with_backoff(TRIES, DELAY_MS, || File::open(path))
}

pub fn create_with_backoff(path: &Path) -> io::Result<File> {
    with_backoff(TRIES, DELAY_MS, || File::create(path))
}

/// Remove a file; a missing file counts as success.
pub fn remove_with_backoff(path: &Path) -> Result<()> {
    with_backoff(TRIES, DELAY_MS, || match fs::remove_file(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    })
    .with_context(|| format!("remove {}", path.display()))
}

/// Hidden sibling used while an output file is being written.
pub fn tmp_sibling(path: &Path) -> PathBuf {
    let name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

/// Atomically replace `dest` with `tmp` (Windows-friendly).
/// If rename fails (e.g., due to sharing), fall back to copy+remove.
pub fn replace_file_atomic_backoff(tmp: &Path, dest: &Path) -> Result<()> {
    if dest.exists() {
        remove_with_backoff(dest)?;
    }
    if with_backoff(TRIES, DELAY_MS, || fs::rename(tmp, dest)).is_ok() {
        return Ok(());
    }
    with_backoff(TRIES, DELAY_MS, || fs::copy(tmp, dest))
        .with_context(|| format!("copy {} -> {}", tmp.display(), dest.display()))?;
    remove_with_backoff(tmp)
}
