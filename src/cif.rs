//! Field extraction over raw CIF text: scalar tags, the `data_` identifier,
//! `loop_` sections and a little cell geometry.
//!
//! Everything here works on the text as-is; nothing builds a full CIF model.

use crate::error::AugmentError;
use regex::Regex;
use std::sync::OnceLock;

pub const TAG_FORMULA_UNITS: &str = "_cell_formula_units_Z";
pub const TAG_FORMULA_SUM: &str = "_chemical_formula_sum";
pub const TAG_SPACE_GROUP: &str = "_symmetry_space_group_name_H-M";
pub const TAG_CELL_VOLUME: &str = "_cell_volume";
pub const TAG_SYMOP_XYZ: &str = "_symmetry_equiv_pos_as_xyz";
pub const DATA_LINE: &str = "data_";

fn formula_units_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| numeric_tag_re(TAG_FORMULA_UNITS))
}

fn formula_sum_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| quoted_or_bare_re(TAG_FORMULA_SUM))
}

fn space_group_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| quoted_or_bare_re(TAG_SPACE_GROUP))
}

fn numeric_tag_re(tag: &str) -> Regex {
    Regex::new(&format!(r"{}\s+([.0-9]+)", regex::escape(tag))).unwrap()
}

fn quoted_or_bare_re(tag: &str) -> Regex {
    Regex::new(&format!(r"{}\s+(?:'([^']+)'|(\S+))", regex::escape(tag))).unwrap()
}

fn capture_quoted_or_bare(re: &Regex, text: &str, field: &'static str) -> Result<String, AugmentError> {
    let caps = re.captures(text).ok_or(AugmentError::FieldNotFound { field })?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_string())
        .ok_or(AugmentError::FieldNotFound { field })
}

/// Raw digits-and-dots token following `tag`, e.g. `"2"` or `"301.52"`.
fn numeric_token<'a>(re: &Regex, text: &'a str, field: &'static str) -> Result<&'a str, AugmentError> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .ok_or(AugmentError::FieldNotFound { field })
}

/// Float value of a numeric scalar field.
pub fn extract_numeric_property(text: &str, tag: &'static str) -> Result<f64, AugmentError> {
    let re = numeric_tag_re(tag);
    let tok = numeric_token(&re, text, tag)?;
    tok.parse::<f64>()
        .map_err(|_| AugmentError::MalformedField { field: tag, value: tok.to_string() })
}

/// Integer `_cell_formula_units_Z`. A value such as `2.0` is malformed, not 2.
pub fn extract_formula_units(text: &str) -> Result<u32, AugmentError> {
    let tok = numeric_token(formula_units_re(), text, TAG_FORMULA_UNITS)?;
    tok.parse::<u32>()
        .map_err(|_| AugmentError::MalformedField { field: TAG_FORMULA_UNITS, value: tok.to_string() })
}

pub fn extract_volume(text: &str) -> Result<f64, AugmentError> {
    extract_numeric_property(text, TAG_CELL_VOLUME)
}

/// `_chemical_formula_sum` without its quotes, inner spacing preserved (`Fe2 O3`).
pub fn extract_formula_nonreduced(text: &str) -> Result<String, AugmentError> {
    capture_quoted_or_bare(formula_sum_re(), text, TAG_FORMULA_SUM)
}

pub fn extract_space_group_symbol(text: &str) -> Result<String, AugmentError> {
    capture_quoted_or_bare(space_group_re(), text, TAG_SPACE_GROUP)
}

/// Formula token on the `data_` line. Accepts both plain (`data_Fe2O3`) and
/// Miller-tagged (`data_Fe2O3_miller_110`) identifiers.
pub fn extract_data_formula(text: &str) -> Result<String, AugmentError> {
    static PLAIN: OnceLock<Regex> = OnceLock::new();
    static MILLER: OnceLock<Regex> = OnceLock::new();
    let plain = PLAIN.get_or_init(|| Regex::new(r"data_([A-Za-z0-9]+)\n").unwrap());
    let miller = MILLER.get_or_init(|| Regex::new(r"data_([A-Za-z0-9<>-]+_miller_[0-9]+)").unwrap());

    plain
        .captures(text)
        .or_else(|| miller.captures(text))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(AugmentError::FieldNotFound { field: DATA_LINE })
}

/// A parsed `loop_` section: ordered tags and the rows under them.
#[derive(Clone, Debug, PartialEq)]
pub struct Loop {
    pub tags: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Loop {
    pub fn column(&self, tag: &str) -> Option<usize> {
        self.tags.iter().position(|t| t == tag)
    }

    /// Iterate the values of one column, in row order.
    pub fn values<'a>(&'a self, tag: &str) -> impl Iterator<Item = &'a str> + 'a {
        let idx = self.column(tag);
        self.rows
            .iter()
            .filter_map(move |row| idx.and_then(|i| row.get(i)).map(String::as_str))
    }
}

/// Split a CIF data line into tokens, honouring single and double quotes.
pub fn tokenize_cif_line(line: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut chars = line.trim().chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '\'' || c == '"' {
            chars.next();
            let mut tok = String::new();
            while let Some(ch) = chars.next() {
                // a closing quote only counts when followed by whitespace or end of line
                if ch == c && chars.peek().map_or(true, |n| n.is_whitespace()) {
                    break;
                }
                tok.push(ch);
            }
            out.push(tok);
        } else {
            let mut tok = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() { break; }
                tok.push(ch);
                chars.next();
            }
            out.push(tok);
        }
    }
    out
}

/// Find the first `loop_` section that declares `tag` and return its tags and rows.
pub fn find_loop(text: &str, tag: &str) -> Option<Loop> {
    let lines: Vec<&str> = text.lines().collect();
    let mut i = 0;
    while i < lines.len() {
        if lines[i].trim() != "loop_" {
            i += 1;
            continue;
        }
        i += 1;
        let mut tags = Vec::new();
        while i < lines.len() && lines[i].trim_start().starts_with('_') {
            tags.push(lines[i].trim().to_string());
            i += 1;
        }
        let mut tokens = Vec::new();
        while i < lines.len() {
            let t = lines[i].trim();
            if t.is_empty() || t.starts_with('_') || t == "loop_" || t.starts_with(DATA_LINE) {
                break;
            }
            tokens.extend(tokenize_cif_line(t));
            i += 1;
        }
        if tags.iter().any(|t| t == tag) {
            let rows = tokens.chunks(tags.len()).map(|c| c.to_vec()).collect();
            return Some(Loop { tags, rows });
        }
    }
    None
}

/// Volume of a general (triclinic) cell; angles in degrees.
pub fn unit_cell_volume(a: f64, b: f64, c: f64, alpha_deg: f64, beta_deg: f64, gamma_deg: f64) -> f64 {
    let (ca, cb, cg) = (
        alpha_deg.to_radians().cos(),
        beta_deg.to_radians().cos(),
        gamma_deg.to_radians().cos(),
    );
    a * b * c * (1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg).sqrt()
}
