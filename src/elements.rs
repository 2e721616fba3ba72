//! Tabulated per-element data used for the `_atom_type_*` block.
//!
//! Electronegativities are Pauling values, atomic radii are empirical (Slater),
//! average ionic radii are the mean Shannon radius over the element's common oxidation
//! states (0.0 when none exist).
//! Noble gases lack some of these, so fixed fallback tables cover them.

use ahash::AHashMap;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementData {
    pub symbol: &'static str,
    pub electronegativity: Option<f64>,
    pub atomic_radius: Option<f64>,
    pub average_ionic_radius: f64,
}

const fn el(symbol: &'static str, x: Option<f64>, r: Option<f64>, ionic: f64) -> ElementData {
    ElementData { symbol, electronegativity: x, atomic_radius: r, average_ionic_radius: ionic }
}

const N: Option<f64> = None;

#[rustfmt::skip]
static ELEMENTS: &[ElementData] = &[
    el("H",  Some(2.20), Some(0.25), -0.04),
    el("He", N,       N,       0.0),
    el("Li", Some(0.98), Some(1.45), 0.90),
    el("Be", Some(1.57), Some(1.05), 0.59),
    el("B",  Some(2.04), Some(0.85), 0.41),
    el("C",  Some(2.55), Some(0.70), 0.30),
    el("N",  Some(3.04), Some(0.65), 0.63),
    el("O",  Some(3.44), Some(0.60), 1.26),
    el("F",  Some(3.98), Some(0.50), 1.19),
    el("Ne", N,       N,       0.0),
    el("Na", Some(0.93), Some(1.80), 1.16),
    el("Mg", Some(1.31), Some(1.50), 0.86),
    el("Al", Some(1.61), Some(1.25), 0.675),
    el("Si", Some(1.90), Some(1.10), 0.54),
    el("P",  Some(2.19), Some(1.00), 0.52),
    el("S",  Some(2.58), Some(1.00), 0.80),
    el("Cl", Some(3.16), Some(1.00), 1.67),
    el("Ar", N,       N,       0.0),
    el("K",  Some(0.82), Some(2.20), 1.52),
    el("Ca", Some(1.00), Some(1.80), 1.14),
    el("Sc", Some(1.36), Some(1.60), 0.885),
    el("Ti", Some(1.54), Some(1.40), 0.8483),
    el("V",  Some(1.63), Some(1.35), 0.7775),
    el("Cr", Some(1.66), Some(1.40), 0.7583),
    el("Mn", Some(1.55), Some(1.40), 0.7625),
    el("Fe", Some(1.83), Some(1.40), 0.8525),
    el("Co", Some(1.88), Some(1.35), 0.8175),
    el("Ni", Some(1.91), Some(1.35), 0.785),
    el("Cu", Some(1.90), Some(1.35), 0.89),
    el("Zn", Some(1.65), Some(1.35), 0.88),
    el("Ga", Some(1.81), Some(1.30), 0.76),
    el("Ge", Some(2.01), Some(1.25), 0.87),
    el("As", Some(2.18), Some(1.15), 0.645),
    el("Se", Some(2.55), Some(1.15), 0.84),
    el("Br", Some(2.96), Some(1.15), 1.0067),
    el("Kr", Some(3.00), N,       0.0),
    el("Rb", Some(0.82), Some(2.35), 1.66),
    el("Sr", Some(0.95), Some(2.00), 1.32),
    el("Y",  Some(1.22), Some(1.80), 1.04),
    el("Zr", Some(1.33), Some(1.55), 0.86),
    el("Nb", Some(1.60), Some(1.45), 0.7567),
    el("Mo", Some(2.16), Some(1.45), 0.7325),
    el("Tc", Some(1.90), Some(1.35), 0.7233),
    el("Ru", Some(2.20), Some(1.30), 0.7133),
    el("Rh", Some(2.28), Some(1.35), 0.7433),
    el("Pd", Some(2.20), Some(1.40), 0.8733),
    el("Ag", Some(1.93), Some(1.60), 1.1033),
    el("Cd", Some(1.69), Some(1.55), 1.09),
    el("In", Some(1.78), Some(1.55), 0.94),
    el("Sn", Some(1.96), Some(1.45), 0.83),
    el("Sb", Some(2.05), Some(1.45), 0.82),
    el("Te", Some(2.10), Some(1.40), 1.2367),
    el("I",  Some(2.66), Some(1.40), 1.1467),
    el("Xe", Some(2.60), N,       0.62),
    el("Cs", Some(0.79), Some(2.60), 1.81),
    el("Ba", Some(0.89), Some(2.15), 1.49),
    el("La", Some(1.10), Some(1.95), 1.172),
    el("Ce", Some(1.12), Some(1.85), 1.08),
    el("Pr", Some(1.13), Some(1.85), 1.0859),
    el("Nd", Some(1.14), Some(1.85), 1.2093),
    el("Pm", Some(1.13), Some(1.85), 1.11),
    el("Sm", Some(1.17), Some(1.85), 1.2087),
    el("Eu", Some(1.20), Some(1.85), 1.2085),
    el("Gd", Some(1.20), Some(1.80), 1.078),
    el("Tb", Some(1.10), Some(1.75), 1.0093),
    el("Dy", Some(1.22), Some(1.75), 1.1827),
    el("Ho", Some(1.23), Some(1.75), 1.041),
    el("Er", Some(1.24), Some(1.75), 1.03),
    el("Tm", Some(1.25), Some(1.75), 1.1133),
    el("Yb", Some(1.10), Some(1.75), 1.1137),
    el("Lu", Some(1.27), Some(1.75), 1.001),
    el("Hf", Some(1.30), Some(1.55), 0.85),
    el("Ta", Some(1.50), Some(1.45), 0.74),
    el("W",  Some(2.36), Some(1.35), 0.7717),
    el("Re", Some(1.90), Some(1.35), 0.6913),
    el("Os", Some(2.20), Some(1.30), 0.7095),
    el("Ir", Some(2.20), Some(1.35), 0.765),
    el("Pt", Some(2.28), Some(1.35), 0.8533),
    el("Au", Some(2.54), Some(1.35), 1.07),
    el("Hg", Some(2.00), Some(1.50), 1.19),
    el("Tl", Some(1.62), Some(1.90), 1.3325),
    el("Pb", Some(2.33), Some(1.80), 1.1225),
    el("Bi", Some(2.02), Some(1.60), 1.04),
    el("Po", Some(2.00), Some(1.90), 1.16),
    el("At", Some(2.20), N,       0.76),
    el("Rn", Some(2.20), N,       0.0),
    el("Fr", Some(0.70), N,       1.94),
    el("Ra", Some(0.90), Some(2.15), 1.62),
    el("Ac", Some(1.10), Some(1.95), 1.26),
    el("Th", Some(1.30), Some(1.80), 1.08),
    el("Pa", Some(1.50), Some(1.80), 1.0),
    el("U",  Some(1.38), Some(1.75), 0.96),
    el("Np", Some(1.36), Some(1.75), 0.95),
    el("Pu", Some(1.28), Some(1.75), 0.94),
];

/// Van der Waals radii used when no atomic radius is tabulated.
const NOBLE_VDW_RADII: &[(&str, f64)] = &[
    ("He", 1.40),
    ("Ne", 1.54),
    ("Ar", 1.88),
    ("Kr", 2.02),
    ("Xe", 2.16),
    ("Rn", 2.20),
];

/// Allen-scale electronegativities for gases with no Pauling value.
const ALLEN_ELECTRONEGATIVITY: &[(&str, f64)] = &[
    ("He", 4.16),
    ("Ne", 4.79),
    ("Ar", 3.24),
];

/// Shannon radii (Å, six-fold coordination where available) keyed by oxidation state.
#[rustfmt::skip]
const OXIDATION_IONIC_RADII: &[(&str, i32, f64)] = &[
    ("H", 1, -0.04),
    ("Li", 1, 0.90), ("Na", 1, 1.16), ("K", 1, 1.52), ("Rb", 1, 1.66), ("Cs", 1, 1.81), ("Fr", 1, 1.94),
    ("Be", 2, 0.59), ("Mg", 2, 0.86), ("Ca", 2, 1.14), ("Sr", 2, 1.32), ("Ba", 2, 1.49), ("Ra", 2, 1.62),
    ("B", 3, 0.41), ("C", 4, 0.30),
    ("N", -3, 1.32), ("N", 3, 0.30), ("N", 5, 0.27),
    ("O", -2, 1.26),
    ("F", -1, 1.19), ("F", 7, 0.22),
    ("Al", 3, 0.675), ("Si", 4, 0.54),
    ("P", 3, 0.58), ("P", 5, 0.52),
    ("S", -2, 1.70), ("S", 4, 0.51), ("S", 6, 0.43),
    ("Cl", -1, 1.67), ("Cl", 5, 0.26), ("Cl", 7, 0.41),
    ("Sc", 3, 0.885),
    ("Ti", 2, 1.00), ("Ti", 3, 0.81), ("Ti", 4, 0.745),
    ("V", 2, 0.93), ("V", 3, 0.78), ("V", 4, 0.72), ("V", 5, 0.68),
    ("Cr", 2, 0.94), ("Cr", 3, 0.755), ("Cr", 4, 0.69), ("Cr", 5, 0.63), ("Cr", 6, 0.58),
    ("Mn", 2, 0.97), ("Mn", 3, 0.785), ("Mn", 4, 0.67), ("Mn", 5, 0.47), ("Mn", 6, 0.395), ("Mn", 7, 0.60),
    ("Fe", 2, 0.92), ("Fe", 3, 0.785), ("Fe", 4, 0.725), ("Fe", 6, 0.39),
    ("Co", 2, 0.885), ("Co", 3, 0.75), ("Co", 4, 0.67),
    ("Ni", 2, 0.83), ("Ni", 3, 0.74), ("Ni", 4, 0.62),
    ("Cu", 1, 0.91), ("Cu", 2, 0.87), ("Cu", 3, 0.68),
    ("Zn", 2, 0.88), ("Ga", 3, 0.76),
    ("Ge", 2, 0.87), ("Ge", 4, 0.67),
    ("As", 3, 0.72), ("As", 5, 0.60),
    ("Se", -2, 1.84), ("Se", 4, 0.64), ("Se", 6, 0.56),
    ("Br", -1, 1.82), ("Br", 3, 0.73), ("Br", 5, 0.45), ("Br", 7, 0.53),
    ("Y", 3, 1.04), ("Zr", 4, 0.86),
    ("Nb", 3, 0.86), ("Nb", 4, 0.82), ("Nb", 5, 0.78),
    ("Mo", 3, 0.83), ("Mo", 4, 0.79), ("Mo", 5, 0.75), ("Mo", 6, 0.73),
    ("Tc", 4, 0.785), ("Tc", 5, 0.74), ("Tc", 7, 0.70),
    ("Ru", 3, 0.82), ("Ru", 4, 0.76), ("Ru", 5, 0.705), ("Ru", 7, 0.52), ("Ru", 8, 0.50),
    ("Rh", 3, 0.805), ("Rh", 4, 0.74), ("Rh", 5, 0.69),
    ("Pd", 1, 0.73), ("Pd", 2, 1.00), ("Pd", 3, 0.90), ("Pd", 4, 0.755),
    ("Ag", 1, 1.29), ("Ag", 2, 1.08), ("Ag", 3, 0.89),
    ("Cd", 2, 1.09), ("In", 3, 0.94),
    ("Sn", 2, 1.36), ("Sn", 4, 0.83),
    ("Sb", 3, 0.90), ("Sb", 5, 0.74),
    ("Te", -2, 2.07), ("Te", 4, 1.11), ("Te", 6, 0.70),
    ("I", -1, 2.06), ("I", 5, 1.09), ("I", 7, 0.67),
    ("Xe", 8, 0.62),
    ("La", 3, 1.172), ("Ce", 3, 1.15), ("Ce", 4, 1.01), ("Pr", 3, 1.13), ("Pr", 4, 0.99),
    ("Nd", 2, 1.43), ("Nd", 3, 1.123), ("Pm", 3, 1.11), ("Sm", 2, 1.36), ("Sm", 3, 1.098),
    ("Eu", 2, 1.31), ("Eu", 3, 1.087), ("Gd", 3, 1.078), ("Tb", 3, 1.063), ("Tb", 4, 0.90),
    ("Dy", 2, 1.21), ("Dy", 3, 1.052), ("Ho", 3, 1.041), ("Er", 3, 1.03),
    ("Tm", 2, 1.17), ("Tm", 3, 1.02), ("Yb", 2, 1.16), ("Yb", 3, 1.008), ("Lu", 3, 1.001),
    ("Hf", 4, 0.85),
    ("Ta", 3, 0.86), ("Ta", 4, 0.82), ("Ta", 5, 0.78),
    ("W", 4, 0.80), ("W", 5, 0.76), ("W", 6, 0.74),
    ("Re", 4, 0.77), ("Re", 5, 0.72), ("Re", 6, 0.69), ("Re", 7, 0.67),
    ("Os", 4, 0.77), ("Os", 5, 0.715), ("Os", 6, 0.685), ("Os", 7, 0.665), ("Os", 8, 0.53),
    ("Ir", 3, 0.82), ("Ir", 4, 0.765), ("Ir", 5, 0.71),
    ("Pt", 2, 0.94), ("Pt", 4, 0.765), ("Pt", 5, 0.71),
    ("Au", 1, 1.51), ("Au", 3, 0.99), ("Au", 5, 0.71),
    ("Hg", 1, 1.33), ("Hg", 2, 1.16),
    ("Tl", 1, 1.64), ("Tl", 3, 1.025),
    ("Pb", 2, 1.33), ("Pb", 4, 0.915),
    ("Bi", 3, 1.17), ("Bi", 5, 0.90),
    ("Po", 4, 1.08), ("Po", 6, 0.81), ("At", 7, 0.76),
    ("Ac", 3, 1.26), ("Th", 4, 1.08),
    ("Pa", 3, 1.18), ("Pa", 4, 1.04), ("Pa", 5, 0.92),
    ("U", 3, 1.165), ("U", 4, 1.03), ("U", 5, 0.90), ("U", 6, 0.87),
    ("Np", 2, 1.24), ("Np", 3, 1.15), ("Np", 4, 1.01), ("Np", 5, 0.89), ("Np", 6, 0.86), ("Np", 7, 0.85),
    ("Pu", 3, 1.14), ("Pu", 4, 1.00), ("Pu", 5, 0.88), ("Pu", 6, 0.85),
];

fn index() -> &'static AHashMap<&'static str, ElementData> {
    static INDEX: OnceLock<AHashMap<&'static str, ElementData>> = OnceLock::new();
    INDEX.get_or_init(|| ELEMENTS.iter().map(|e| (e.symbol, *e)).collect())
}

fn lookup(table: &[(&str, f64)], symbol: &str) -> Option<f64> {
    table.iter().find(|(s, _)| *s == symbol).map(|(_, v)| *v)
}

pub fn element(symbol: &str) -> Option<&'static ElementData> {
    index().get(symbol)
}

pub fn noble_vdw_radius(symbol: &str) -> Option<f64> {
    lookup(NOBLE_VDW_RADII, symbol)
}

pub fn allen_electronegativity(symbol: &str) -> Option<f64> {
    lookup(ALLEN_ELECTRONEGATIVITY, symbol)
}

/// Shannon radius of `symbol` at an integral oxidation state.
pub fn ionic_radius(symbol: &str, oxidation: f64) -> Option<f64> {
    if oxidation.fract() != 0.0 {
        return None;
    }
    let oxi = oxidation as i32;
    OXIDATION_IONIC_RADII
        .iter()
        .find(|(s, o, _)| *s == symbol && *o == oxi)
        .map(|(_, _, r)| *r)
}
