//! Record source and sink: zstd-compressed JSON Lines containers.
//!
//! Input lines are `{"id": "...", "cif": "..."}` (or `["id", "cif"]`).
//! Output lines are bare JSON strings holding the augmented CIF text.
//! Identifiers are read but never written back out.

use crate::util::{create_with_backoff, open_with_backoff, replace_file_atomic_backoff, tmp_sibling};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use zstd::stream::read::Decoder;
use zstd::stream::write::Encoder;

/// One input entry. `id` is carried for diagnostics only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: String,
    pub cif: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordLine {
    Object(RawRecord),
    Pair(String, String),
}

impl From<RecordLine> for RawRecord {
    fn from(line: RecordLine) -> Self {
        match line {
            RecordLine::Object(r) => r,
            RecordLine::Pair(id, cif) => RawRecord { id, cif },
        }
    }
}

/// Stream a zstd file line by line; `on_line` receives the 1-based line number.
/// Any decode or callback error aborts the read.
fn for_each_line(
    path: &Path,
    read_buf_bytes: usize,
    mut on_line: impl FnMut(usize, &str) -> Result<()>,
) -> Result<()> {
    let file = open_with_backoff(path).with_context(|| format!("open {}", path.display()))?;
    let mut decoder = Decoder::new(file)?;
    // large frames otherwise fail with "Frame requires too much memory"
    decoder.window_log_max(31)?;
    let mut reader = BufReader::with_capacity(read_buf_bytes.max(8 * 1024), decoder);

    let mut buf = String::with_capacity(16 * 1024);
    let mut lineno = 0usize;
    loop {
        buf.clear();
        let n = reader
            .read_line(&mut buf)
            .with_context(|| format!("decode {} after line {}", path.display(), lineno))?;
        if n == 0 {
            break;
        }
        lineno += 1;
        let line = buf.trim_end_matches(['\n', '\r']);
        if line.trim().is_empty() {
            continue;
        }
        on_line(lineno, line)?;
    }
    Ok(())
}

fn read_jsonl_zst<T: DeserializeOwned>(path: &Path, read_buf_bytes: usize) -> Result<Vec<T>> {
    let mut out = Vec::new();
    for_each_line(path, read_buf_bytes, |lineno, line| {
        let v: T = serde_json::from_str(line)
            .with_context(|| format!("parse {} line {}", path.display(), lineno))?;
        out.push(v);
        Ok(())
    })?;
    Ok(out)
}

/// Load the whole input container. Any failure here is fatal for the batch.
pub fn read_records(path: &Path, read_buf_bytes: usize) -> Result<Vec<RawRecord>> {
    let lines: Vec<RecordLine> = read_jsonl_zst(path, read_buf_bytes)?;
    let records: Vec<RawRecord> = lines.into_iter().map(RawRecord::from).collect();
    tracing::info!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Read an output container back into CIF texts.
pub fn read_augmented(path: &Path, read_buf_bytes: usize) -> Result<Vec<String>> {
    read_jsonl_zst(path, read_buf_bytes)
}

/// Encode `items` as zstd JSONL into a temp sibling, then promote it to `path`.
fn write_jsonl_zst<T: Serialize>(path: &Path, items: &[T], level: i32, write_buf_bytes: usize) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    let tmp = tmp_sibling(path);
    let file = create_with_backoff(&tmp).with_context(|| format!("create {}", tmp.display()))?;
    let w = BufWriter::with_capacity(write_buf_bytes.max(8 * 1024), file);
    let mut enc = Encoder::new(w, level)?;
    for item in items {
        serde_json::to_writer(&mut enc, item)?;
        enc.write_all(b"\n")?;
    }
    let mut w = enc.finish().with_context(|| format!("finish zstd {}", tmp.display()))?;
    w.flush().with_context(|| format!("flush {}", tmp.display()))?;
    drop(w);
    replace_file_atomic_backoff(&tmp, path)
}

/// Write the surviving CIF texts (no identifiers).
pub fn write_records(path: &Path, records: &[String], level: i32, write_buf_bytes: usize) -> Result<()> {
    write_jsonl_zst(path, records, level, write_buf_bytes)?;
    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Write an input container; handy for building fixtures and re-packing corpora.
pub fn write_raw_records(path: &Path, records: &[RawRecord], level: i32, write_buf_bytes: usize) -> Result<()> {
    write_jsonl_zst(path, records, level, write_buf_bytes)
}
