use crate::config::AugmentOptions;
use crate::error::DropCounts;
use crate::progress::{progress_listener, ProgressScope};
use crate::queue::TaskQueue;
use crate::records::{read_records, write_records};
use crate::transforms::TransformChain;
use crate::util::init_tracing_once;
use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::path::Path;
use std::thread;

/// Batch augmentation entry point. Configure with the builder methods, then
/// call `run` on in-memory texts or `augment_file` on containers.
#[derive(Clone, Default)]
pub struct CifAugmenter {
    pub(crate) opts: AugmentOptions,
}

/// Outcome of one run.
#[derive(Clone, Debug, Default)]
pub struct AugmentReport {
    /// Surviving transformed records, in worker publish order.
    pub records: Vec<String>,
    /// Input record count.
    pub total: u64,
    /// Progress ticks the aggregator observed; equals `total` on a clean run.
    pub ticks: u64,
    /// Why the other records were dropped.
    pub dropped: DropCounts,
}

impl AugmentReport {
    pub fn kept(&self) -> usize {
        self.records.len()
    }
    pub fn dropped_total(&self) -> u64 {
        self.dropped.total()
    }
}

/// What a worker hands to the collector when the queue runs dry.
struct WorkerOutput {
    worker: usize,
    records: Vec<String>,
    dropped: DropCounts,
}

impl CifAugmenter {
    pub fn new() -> Self {
        Self { opts: AugmentOptions::default() }
    }

    pub fn with_options(opts: AugmentOptions) -> Self {
        Self { opts }
    }

    // -------- Builder methods --------
    pub fn oxidation(mut self, yes: bool) -> Self { self.opts = self.opts.with_oxidation(yes); self }
    pub fn decimal_places(mut self, places: usize) -> Self { self.opts = self.opts.with_decimal_places(places); self }
    pub fn workers(mut self, n: usize) -> Self { self.opts = self.opts.with_workers(n); self }
    pub fn progress(mut self, yes: bool) -> Self { self.opts = self.opts.with_progress(yes); self }
    pub fn progress_label(mut self, label: impl Into<String>) -> Self { self.opts = self.opts.with_progress_label(label); self }
    pub fn io_read_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_read_buffer(bytes); self }
    pub fn io_write_buffer(mut self, bytes: usize) -> Self { self.opts = self.opts.with_io_write_buffer(bytes); self }
    pub fn io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self { self.opts = self.opts.with_io_buffers(read_bytes, write_bytes); self }
    pub fn zstd_level(mut self, level: i32) -> Self { self.opts = self.opts.with_zstd_level(level); self }

    pub fn options(&self) -> &AugmentOptions {
        &self.opts
    }

    pub fn chain(&self) -> TransformChain {
        TransformChain::new(self.opts.oxidation, self.opts.decimal_places)
    }

    /// Read `input`, augment every record, write survivors to `output`.
    pub fn augment_file(&self, input: &Path, output: &Path) -> Result<AugmentReport> {
        init_tracing_once();
        let records = read_records(input, self.opts.read_buffer_bytes)
            .with_context(|| format!("reading input {}", input.display()))?;
        let cifs: Vec<String> = records.into_iter().map(|r| r.cif).collect();

        let report = self.run(cifs)?;

        write_records(output, &report.records, self.opts.zstd_level, self.opts.write_buffer_bytes)
            .with_context(|| format!("writing output {}", output.display()))?;
        Ok(report)
    }

    /// Augment a fixed batch of CIF texts.
    ///
    /// `workers` threads drain a shared queue; each record gets exactly one pass
    /// through the chain and one progress tick. A separate listener thread sums
    /// the ticks until the batch total is reached. Worker buffers are merged
    /// only after every worker and the listener have finished.
    pub fn run(&self, cifs: Vec<String>) -> Result<AugmentReport> {
        init_tracing_once();
        let total = cifs.len() as u64;
        let workers = self.opts.workers.max(1);
        let chain = self.chain();
        tracing::info!(
            "Augmenting {} records with {} workers (decimal_places={}, oxidation={})",
            total, workers, chain.decimal_places, chain.oxidation
        );

        let queue = TaskQueue::new(cifs);
        let (tick_tx, tick_rx) = unbounded::<u64>();
        let (result_tx, result_rx) = unbounded::<WorkerOutput>();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("cifprep-worker-{i}"))
            .build()
            .context("building worker pool")?;

        let label = self.opts.progress_label.clone().unwrap_or_else(|| "Augmenting CIFs".to_string());
        let bar = if self.opts.progress { Some(ProgressScope::count(label, total)) } else { None };
        let bar_ref = bar.as_ref();

        let ticks = thread::scope(|s| -> Result<u64> {
            let listener = thread::Builder::new()
                .name("cifprep-progress".into())
                .spawn_scoped(s, move || progress_listener(tick_rx, total, bar_ref))
                .context("spawning progress listener")?;

            // broadcast runs the closure once on every pool thread: one worker per thread
            pool.broadcast(|ctx| augment_worker(ctx.index(), &queue, &chain, &tick_tx, &result_tx));
            drop(tick_tx);
            drop(result_tx);

            listener.join().map_err(|_| anyhow!("progress listener panicked"))
        })?;

        let report = collect_results(result_rx, total, ticks);
        tracing::info!(
            "Kept {} of {} records ({} filtered, {} malformed)",
            report.kept(), report.total, report.dropped.filtered(), report.dropped.malformed()
        );
        for (reason, n) in report.dropped.iter() {
            tracing::info!("  dropped {:>8}  {}", n, reason);
        }
        Ok(report)
    }
}

/// Pull records until the queue is empty. Failures are tallied, never propagated.
fn augment_worker(
    id: usize,
    queue: &TaskQueue<String>,
    chain: &TransformChain,
    ticks: &Sender<u64>,
    results: &Sender<WorkerOutput>,
) {
    let mut records = Vec::new();
    let mut dropped = DropCounts::default();

    while let Some(cif) = queue.try_pop() {
        match chain.apply(&cif) {
            Ok(out) => records.push(out),
            Err(e) => {
                tracing::debug!(worker = id, "dropping record: {}", e);
                dropped.record(e.reason());
            }
        }
        // the listener may already be gone if it saw a closed channel; nothing to do then
        let _ = ticks.send(1);
    }

    tracing::debug!(worker = id, kept = records.len(), dropped = dropped.total(), "worker finished");
    let _ = results.send(WorkerOutput { worker: id, records, dropped });
}

/// Drain every published worker buffer into one report.
fn collect_results(results: Receiver<WorkerOutput>, total: u64, ticks: u64) -> AugmentReport {
    let mut report = AugmentReport { total, ticks, ..Default::default() };
    for out in results.try_iter() {
        tracing::trace!(worker = out.worker, kept = out.records.len(), "collecting worker buffer");
        report.records.extend(out.records);
        report.dropped.merge(out.dropped);
    }
    if ticks != total {
        tracing::warn!("progress saw {} ticks for {} records", ticks, total);
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cif(formula: &str, z: u32) -> String {
        format!(
            "data_X\n_symmetry_space_group_name_H-M   'P1'\n_chemical_formula_sum   '{formula}'\n\
             _cell_formula_units_Z   {z}\n"
        )
    }

    #[test]
    fn every_record_ticks_once() {
        let batch = vec![cif("Fe2 O3", 1), cif("Fe2 O3", 0), "garbage".to_string(), cif("Na1 Cl1", 2)];
        for w in [1, 3, 8] {
            let report = CifAugmenter::new().progress(false).workers(w).run(batch.clone()).unwrap();
            assert_eq!(report.ticks, 4);
            assert_eq!(report.total, 4);
            assert_eq!(report.kept(), 2);
            assert_eq!(report.dropped.filtered(), 1);
            assert_eq!(report.dropped.malformed(), 1);
        }
    }

    #[test]
    fn empty_batch() {
        let report = CifAugmenter::new().progress(false).run(Vec::new()).unwrap();
        assert_eq!(report.ticks, 0);
        assert!(report.records.is_empty());
    }
}
