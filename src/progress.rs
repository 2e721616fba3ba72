//! Progress reporting: indicatif count bars and the tick aggregator that
//! watches a run reach its expected record total.

use crossbeam_channel::Receiver;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const COUNT_TEMPLATE: &str = "{msg:>16} {wide_bar:.cyan/blue} {pos}/{len} CIFs ({per_sec}, eta {eta})";

/// Count-style bar on stderr, so stdout stays free for the final record count.
pub fn make_count_progress(total: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::with_template(COUNT_TEMPLATE) {
        pb.set_style(style.progress_chars("=> "));
    }
    pb.set_message(label.to_string());
    pb.enable_steady_tick(Duration::from_millis(200));
    pb
}

/// Thin wrapper so callers can tick and finish without touching indicatif directly.
pub struct ProgressScope {
    pb: ProgressBar,
}

impl ProgressScope {
    pub fn count<T: Into<String>>(label: T, total: u64) -> Self {
        Self { pb: make_count_progress(total, &label.into()) }
    }
    #[inline] pub fn inc_items(&self, delta: u64) { self.pb.inc(delta); }
    pub fn position(&self) -> u64 { self.pb.position() }
    pub fn finish<T: Into<String>>(&self, msg: T) { self.pb.finish_with_message(msg.into()); }
}

/// Sum progress ticks until `total` is reached.
///
/// Returns the number of ticks observed. Also returns early if every sender is
/// gone, so a worker that died mid-run cannot leave the listener blocked.
pub fn progress_listener(ticks: Receiver<u64>, total: u64, bar: Option<&ProgressScope>) -> u64 {
    let mut seen = 0u64;
    while seen < total {
        match ticks.recv() {
            Ok(n) => {
                seen += n;
                if let Some(b) = bar { b.inc_items(n); }
            }
            Err(_) => {
                tracing::warn!("progress channel closed after {}/{} records", seen, total);
                break;
            }
        }
    }
    if let Some(b) = bar { b.finish("done"); }
    seen
}
