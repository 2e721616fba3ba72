//! The `_atom_type_*` block: per-element properties derived from the formula,
//! rendered as a CIF loop and injected ahead of the space-group field.

use crate::cif::{extract_formula_nonreduced, find_loop, TAG_SPACE_GROUP};
use crate::composition::Composition;
use crate::elements::{allen_electronegativity, element, ionic_radius, noble_vdw_radius};
use crate::error::AugmentError;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub const TAG_TYPE_SYMBOL: &str = "_atom_type_symbol";
pub const TAG_TYPE_ELECTRONEGATIVITY: &str = "_atom_type_electronegativity";
pub const TAG_TYPE_RADIUS: &str = "_atom_type_radius";
pub const TAG_TYPE_IONIC_RADIUS: &str = "_atom_type_ionic_radius";
pub const TAG_TYPE_OXIDATION: &str = "_atom_type_oxidation_number";

/// One row of the property table.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementProps {
    pub symbol: String,
    pub electronegativity: f64,
    pub atomic_radius: f64,
    /// Average ionic radius, or the oxidation-specific one when `oxidation` is set.
    pub ionic_radius: f64,
    pub oxidation: Option<f64>,
}

fn unresolved(symbol: &str, property: &'static str) -> AugmentError {
    AugmentError::UnresolvedElementProperty { symbol: symbol.to_string(), property }
}

/// Leading element symbol of a species label: `Fe3+` -> `Fe`, `O2-` -> `O`.
fn species_element(label: &str) -> Option<&str> {
    let mut chars = label.char_indices();
    let (_, first) = chars.next()?;
    if !first.is_ascii_uppercase() {
        return None;
    }
    match chars.next() {
        Some((i, c)) if c.is_ascii_lowercase() => Some(&label[..i + c.len_utf8()]),
        Some((i, _)) => Some(&label[..i]),
        None => Some(label),
    }
}

/// Oxidation numbers declared in the record's own `_atom_type_*` loop.
/// When an element appears with several valences the first declared one wins.
pub fn oxidation_states(text: &str) -> Result<BTreeMap<String, f64>, AugmentError> {
    let mut out = BTreeMap::new();
    let Some(lp) = find_loop(text, TAG_TYPE_OXIDATION) else {
        return Ok(out);
    };
    for (label, value) in lp.values(TAG_TYPE_SYMBOL).zip(lp.values(TAG_TYPE_OXIDATION)) {
        let Some(sym) = species_element(label) else { continue };
        let oxi = value
            .parse::<f64>()
            .map_err(|_| AugmentError::MalformedField { field: TAG_TYPE_OXIDATION, value: value.to_string() })?;
        out.entry(sym.to_string()).or_insert(oxi);
    }
    Ok(out)
}

/// Property rows for every element of `comp`, in symbol order.
/// `oxidation` switches the ionic radius to the oxidation-specific value.
pub fn element_props(
    comp: &Composition,
    oxidation: Option<&BTreeMap<String, f64>>,
) -> Result<Vec<ElementProps>, AugmentError> {
    comp.elements()
        .map(|sym| {
            let data = element(sym).ok_or_else(|| unresolved(sym, "element data"))?;
            let electronegativity = data
                .electronegativity
                .or_else(|| allen_electronegativity(sym))
                .ok_or_else(|| unresolved(sym, "electronegativity"))?;
            let atomic_radius = data
                .atomic_radius
                .or_else(|| noble_vdw_radius(sym))
                .ok_or_else(|| unresolved(sym, "atomic radius"))?;

            let (ionic, oxi) = match oxidation {
                None => (data.average_ionic_radius, None),
                Some(states) => {
                    let oxi = *states.get(sym).ok_or_else(|| unresolved(sym, "oxidation state"))?;
                    let r = ionic_radius(sym, oxi).ok_or_else(|| unresolved(sym, "ionic radius"))?;
                    (r, Some(oxi))
                }
            };

            Ok(ElementProps {
                symbol: sym.to_string(),
                electronegativity,
                atomic_radius,
                ionic_radius: ionic,
                oxidation: oxi,
            })
        })
        .collect()
}

/// Signed fixed-point with a blank sign slot for non-negative values: ` 1.8300`, `-0.0400`.
fn format_prop(v: f64) -> String {
    if v.is_sign_negative() {
        format!("{v:.4}")
    } else {
        format!(" {v:.4}")
    }
}

/// Render rows as a CIF loop (no trailing newline).
pub fn render_block(props: &[ElementProps], oxi: bool) -> String {
    let mut tags = vec![TAG_TYPE_SYMBOL, TAG_TYPE_ELECTRONEGATIVITY, TAG_TYPE_RADIUS, TAG_TYPE_IONIC_RADIUS];
    if oxi {
        tags.push(TAG_TYPE_OXIDATION);
    }

    let mut lines = Vec::with_capacity(1 + tags.len() + props.len());
    lines.push("loop_".to_string());
    lines.extend(tags.iter().map(|t| format!(" {t}")));
    for p in props {
        let mut cols = vec![
            p.symbol.clone(),
            format_prop(p.electronegativity),
            format_prop(p.atomic_radius),
            format_prop(p.ionic_radius),
        ];
        if oxi {
            cols.push(format!("{:?}", p.oxidation.unwrap_or(0.0)));
        }
        lines.push(format!("  {}", cols.join("  ")));
    }
    lines.join("\n")
}

/// Property block for a bare formula string.
pub fn atomic_props_block_for_formula(
    formula: &str,
    oxidation: Option<&BTreeMap<String, f64>>,
) -> Result<String, AugmentError> {
    let comp = Composition::parse(formula)?;
    let props = element_props(&comp, oxidation)?;
    Ok(render_block(&props, oxidation.is_some()))
}

/// Insert the property block right before `_symmetry_space_group_name_H-M`.
pub fn add_atomic_props_block(text: &str, oxi: bool) -> Result<String, AugmentError> {
    let formula = extract_formula_nonreduced(text)?;
    let states = if oxi { Some(oxidation_states(text)?) } else { None };
    let block = atomic_props_block_for_formula(&formula, states.as_ref())?;

    let at = text
        .find(TAG_SPACE_GROUP)
        .ok_or(AugmentError::FieldNotFound { field: TAG_SPACE_GROUP })?;

    let mut out = String::with_capacity(text.len() + block.len() + 1);
    out.push_str(&text[..at]);
    out.push_str(&block);
    out.push('\n');
    out.push_str(&text[at..]);
    Ok(out)
}

/// Drop a property block sitting between the `data_` line and the space-group field.
pub fn remove_atomic_props_block(text: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r"(data_[^\n]*\n)loop_[\s\S]*?(_symmetry_space_group_name_H-M)").unwrap()
    });
    re.replace_all(text, "${1}${2}").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FE2O3: &str = "data_Fe2O3\n\
_symmetry_space_group_name_H-M   'R-3c'\n\
_chemical_formula_sum   'Fe4 O6'\n";

    #[test]
    fn block_layout() {
        let block = atomic_props_block_for_formula("Fe2O3", None).unwrap();
        let expected = "loop_\n \
_atom_type_symbol\n \
_atom_type_electronegativity\n \
_atom_type_radius\n \
_atom_type_ionic_radius\n  \
Fe   1.8300   1.4000   0.8525\n  \
O   3.4400   0.6000   1.2600";
        assert_eq!(block, expected);
    }

    #[test]
    fn inserted_before_space_group() {
        let out = add_atomic_props_block(FE2O3, false).unwrap();
        assert!(out.starts_with("data_Fe2O3\nloop_\n _atom_type_symbol\n"));
        let block_end = out.find("  O   3.4400").unwrap();
        let sg = out.find(TAG_SPACE_GROUP).unwrap();
        assert!(block_end < sg);
        assert_eq!(remove_atomic_props_block(&out), FE2O3);
    }

    #[test]
    fn missing_space_group_is_an_error() {
        let text = "data_Fe2O3\n_chemical_formula_sum   'Fe4 O6'\n";
        assert_eq!(
            add_atomic_props_block(text, false),
            Err(AugmentError::FieldNotFound { field: TAG_SPACE_GROUP })
        );
    }

    #[test]
    fn noble_gas_fallbacks_and_unknown_elements() {
        let props = element_props(&Composition::parse("XeF2").unwrap(), None).unwrap();
        assert_eq!(props[1].symbol, "Xe");
        assert_eq!(props[1].atomic_radius, 2.16);
        let props = element_props(&Composition::parse("Ne").unwrap(), None).unwrap();
        assert_eq!(props[0].electronegativity, 4.79);

        let err = element_props(&Composition::parse("Xx2O").unwrap(), None).unwrap_err();
        assert_eq!(err.reason(), crate::error::DropReason::UnresolvedElementProperty);
        // At: electronegativity tabulated, but no atomic radius and no fallback
        let err = element_props(&Composition::parse("At").unwrap(), None).unwrap_err();
        assert_eq!(err, unresolved("At", "atomic radius"));
    }

    #[test]
    fn oxidation_mode_reads_record_states() {
        let text = format!(
            "{FE2O3}loop_\n _atom_type_symbol\n _atom_type_oxidation_number\n  Fe3+  3.0\n  O2-  -2.0\n"
        );
        let out = add_atomic_props_block(&text, true).unwrap();
        assert!(out.contains(" _atom_type_oxidation_number\n  Fe   1.8300   1.4000   0.7850  3.0\n"));
        assert!(out.contains("  O   3.4400   0.6000   1.2600  -2.0\n_symmetry"));

        let err = add_atomic_props_block(FE2O3, true).unwrap_err();
        assert_eq!(err, unresolved("Fe", "oxidation state"));
    }

    #[test]
    fn species_labels() {
        assert_eq!(species_element("Fe3+"), Some("Fe"));
        assert_eq!(species_element("O2-"), Some("O"));
        assert_eq!(species_element("Na"), Some("Na"));
        assert_eq!(species_element("x"), None);
    }
}
