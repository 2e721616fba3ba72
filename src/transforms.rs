//! The per-record transform chain: Z filter, formula normalization,
//! semisymmetrization, property-block injection and numeric rounding.
//!
//! Every stage is text -> text. A stage error aborts the whole record.

use crate::atomic_props::add_atomic_props_block;
use crate::cif::{extract_formula_units, DATA_LINE, TAG_FORMULA_SUM, TAG_SYMOP_XYZ};
use crate::error::AugmentError;
use regex::{Captures, Regex};
use std::sync::OnceLock;

/// Canonical single symmetry-operator row.
pub const IDENTITY_SYMOP_ROW: &str = "  1  'x, y, z'";

/// Stage 1: fetch Z and reject Z = 0.
pub fn check_formula_units(text: &str) -> Result<u32, AugmentError> {
    match extract_formula_units(text)? {
        0 => Err(AugmentError::ZeroFormulaUnits),
        z => Ok(z),
    }
}

/// `_miller_` tag from absolute index values: `[1, -1, 0]` -> `_miller_110`.
pub fn miller_suffix(miller: [i32; 3]) -> String {
    let digits: String = miller.iter().map(|i| i.unsigned_abs().to_string()).collect();
    format!("_miller_{digits}")
}

/// Stage 2: rewrite the `data_` line to carry the unreduced formula sum,
/// optionally tagged with Miller indices.
pub fn replace_data_formula_with_nonreduced_formula(
    text: &str,
    miller: Option<[i32; 3]>,
) -> Result<String, AugmentError> {
    static FORMULA: OnceLock<Regex> = OnceLock::new();
    static DATA: OnceLock<Regex> = OnceLock::new();
    let formula_re = FORMULA.get_or_init(|| Regex::new(r"_chemical_formula_sum\s+(.+)\n").unwrap());
    let data_re = DATA.get_or_init(|| Regex::new(r"(?m)^data_[^\n]*").unwrap());

    let raw = formula_re
        .captures(text)
        .and_then(|c| c.get(1))
        .ok_or(AugmentError::FieldNotFound { field: TAG_FORMULA_SUM })?;
    let formula: String = raw.as_str().chars().filter(|c| *c != '\'' && !c.is_whitespace()).collect();
    if formula.is_empty() {
        return Err(AugmentError::MalformedField { field: TAG_FORMULA_SUM, value: raw.as_str().to_string() });
    }

    let line = data_re.find(text).ok_or(AugmentError::FieldNotFound { field: DATA_LINE })?;
    let suffix = miller.map(miller_suffix).unwrap_or_default();

    let mut out = String::with_capacity(text.len() + formula.len() + suffix.len());
    out.push_str(&text[..line.start()]);
    out.push_str(DATA_LINE);
    out.push_str(&formula);
    out.push_str(&suffix);
    out.push_str(&text[line.end()..]);
    Ok(out)
}

/// Length of the operator rows following the `_symmetry_equiv_pos_as_xyz` header.
/// The rows end before the first line that starts in column 0 or 1 with a
/// non-blank character; with no such line they run to the end of the text.
fn symop_body_len(body: &str) -> usize {
    let bytes = body.as_bytes();
    for (i, _) in body.match_indices('\n') {
        let next = bytes.get(i + 1).copied();
        let after = bytes.get(i + 2).copied();
        let ends = match next {
            Some(b' ') => after.is_some_and(|c| !c.is_ascii_whitespace()),
            Some(c) => !c.is_ascii_whitespace(),
            None => false,
        };
        if ends {
            return i;
        }
    }
    body.trim_end_matches('\n').len()
}

/// Stage 3: collapse the symmetry-operator table to the identity row.
/// Text without an operator table comes back unchanged.
pub fn semisymmetrize(text: &str) -> String {
    let header = format!("{TAG_SYMOP_XYZ}\n");
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(i) = rest.find(&header) {
        let body_start = i + header.len();
        let len = symop_body_len(&rest[body_start..]);
        out.push_str(&rest[..body_start]);
        out.push_str(IDENTITY_SYMOP_ROW);
        rest = &rest[body_start + len..];
    }
    out.push_str(rest);
    out
}

fn number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-+]?\d*\.\d+([eE][-+]?\d+)?").unwrap())
}

/// Stage 5: round every float token with more than `decimal_places` characters
/// after its decimal point. Shorter tokens are left exactly as written.
pub fn round_numbers(text: &str, decimal_places: usize) -> String {
    number_re()
        .replace_all(text, |caps: &Captures| {
            let tok = &caps[0];
            let frac = tok.rsplit('.').next().unwrap_or("");
            if frac.len() <= decimal_places {
                return tok.to_string();
            }
            match tok.parse::<f64>() {
                Ok(v) => format!("{v:.decimal_places$}"),
                Err(_) => tok.to_string(),
            }
        })
        .into_owned()
}

/// The fixed five-stage chain, parameterised by the run's options.
#[derive(Clone, Copy, Debug)]
pub struct TransformChain {
    pub oxidation: bool,
    pub decimal_places: usize,
}

impl TransformChain {
    pub fn new(oxidation: bool, decimal_places: usize) -> Self {
        Self { oxidation, decimal_places }
    }

    /// Run all stages in order; the first failure aborts the record.
    pub fn apply(&self, cif: &str) -> Result<String, AugmentError> {
        check_formula_units(cif)?;
        let cif = replace_data_formula_with_nonreduced_formula(cif, None)?;
        let cif = semisymmetrize(&cif);
        let cif = add_atomic_props_block(&cif, self.oxidation)?;
        Ok(round_numbers(&cif, self.decimal_places))
    }
}
