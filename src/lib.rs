mod config;
mod error;
mod util;
mod progress;
mod queue;
mod records;
mod pipeline;

pub mod cif;
pub mod composition;
pub mod elements;
pub mod atomic_props;
pub mod transforms;

pub use crate::config::AugmentOptions;
pub use crate::error::{AugmentError, DropCounts, DropReason};
pub use crate::pipeline::{AugmentReport, CifAugmenter};
pub use crate::queue::TaskQueue;

// Progress bar and tick aggregation.
pub use crate::progress::{make_count_progress, progress_listener, ProgressScope};

// Record source/sink over zstd JSONL containers.
pub use crate::records::{read_augmented, read_records, write_raw_records, write_records, RawRecord};

// Individual chain stages, for callers that want to run them piecemeal.
pub use crate::atomic_props::{add_atomic_props_block, remove_atomic_props_block};
pub use crate::composition::Composition;
pub use crate::transforms::{
    check_formula_units, replace_data_formula_with_nonreduced_formula, round_numbers, semisymmetrize,
    TransformChain,
};

pub use crate::util::init_tracing_once;
