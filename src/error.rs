//! Record-local failure kinds raised by the transform chain.
//!
//! None of these ever escape a worker: the record is dropped and the kind is
//! tallied in `DropCounts` so a run can tell filtered input from malformed input.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AugmentError {
    /// `_cell_formula_units_Z` parsed as 0; the record is erroneous by definition.
    #[error("formula units (Z) is zero")]
    ZeroFormulaUnits,

    #[error("field `{field}` not found")]
    FieldNotFound { field: &'static str },

    #[error("field `{field}` has malformed value `{value}`")]
    MalformedField { field: &'static str, value: String },

    #[error("invalid chemical formula `{formula}`: {reason}")]
    InvalidFormula { formula: String, reason: String },

    #[error("no {property} available for element `{symbol}`")]
    UnresolvedElementProperty { symbol: String, property: &'static str },
}

impl AugmentError {
    pub fn reason(&self) -> DropReason {
        match self {
            AugmentError::ZeroFormulaUnits => DropReason::ZeroFormulaUnits,
            AugmentError::FieldNotFound { .. } => DropReason::FieldNotFound,
            AugmentError::MalformedField { .. } => DropReason::MalformedField,
            AugmentError::InvalidFormula { .. } => DropReason::InvalidFormula,
            AugmentError::UnresolvedElementProperty { .. } => DropReason::UnresolvedElementProperty,
        }
    }
}

/// Payload-free counterpart of `AugmentError`, used as a tally key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DropReason {
    ZeroFormulaUnits,
    FieldNotFound,
    MalformedField,
    InvalidFormula,
    UnresolvedElementProperty,
}

impl DropReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            DropReason::ZeroFormulaUnits => "zero_formula_units",
            DropReason::FieldNotFound => "field_not_found",
            DropReason::MalformedField => "malformed_field",
            DropReason::InvalidFormula => "invalid_formula",
            DropReason::UnresolvedElementProperty => "unresolved_element_property",
        }
    }

    /// Z = 0 is an intentional filter; every other reason means the input was malformed.
    pub fn is_filter(&self) -> bool {
        matches!(self, DropReason::ZeroFormulaUnits)
    }
}

impl fmt::Display for DropReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-reason drop tally. Workers keep one each; the collector merges them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DropCounts {
    counts: BTreeMap<DropReason, u64>,
}

impl DropCounts {
    pub fn record(&mut self, reason: DropReason) {
        *self.counts.entry(reason).or_insert(0) += 1;
    }

    pub fn merge(&mut self, other: DropCounts) {
        for (k, v) in other.counts {
            *self.counts.entry(k).or_insert(0) += v;
        }
    }

    pub fn get(&self, reason: DropReason) -> u64 {
        self.counts.get(&reason).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Drops caused by intentional filtering (Z = 0).
    pub fn filtered(&self) -> u64 {
        self.counts.iter().filter(|(r, _)| r.is_filter()).map(|(_, n)| n).sum()
    }

    /// Drops caused by malformed or unresolvable input.
    pub fn malformed(&self) -> u64 {
        self.total() - self.filtered()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DropReason, u64)> + '_ {
        self.counts.iter().map(|(r, n)| (*r, *n))
    }
}
