#![allow(dead_code)]

use cifprep::{write_raw_records, RawRecord};
use std::path::{Path, PathBuf};

/// Hematite in the layout pymatgen writes: three symmetry operators, long floats,
/// formula sum `Fe2 O3`, Z = 2.
pub const FE2O3: &str = "# generated using pymatgen
data_Fe2O3
_symmetry_space_group_name_H-M   'R-3c'
_cell_length_a   5.03558700
_cell_length_b   5.03558700
_cell_length_c   13.74714100
_cell_angle_alpha   90.00000000
_cell_angle_beta   90.00000000
_cell_angle_gamma   120.00000000
_symmetry_Int_Tables_number   167
_chemical_formula_structural   Fe2O3
_chemical_formula_sum   'Fe2 O3'
_cell_volume   301.88471230
_cell_formula_units_Z   2
loop_
 _symmetry_equiv_pos_site_id
 _symmetry_equiv_pos_as_xyz
  1  'x, y, z'
  2  '-x, -y, -z'
  3  '-y, x-y, z'
loop_
 _atom_site_type_symbol
 _atom_site_label
 _atom_site_symmetry_multiplicity
 _atom_site_fract_x
 _atom_site_fract_y
 _atom_site_fract_z
 _atom_site_occupancy
  Fe  Fe0  12  0.00000000  0.00000000  0.35530122  1
  O  O1  18  0.30624300  0.00000000  0.25000000  1
";

/// What the full chain must turn `FE2O3` into at 4 decimal places.
pub const FE2O3_AUGMENTED: &str = "# generated using pymatgen
data_Fe2O3
loop_
 _atom_type_symbol
 _atom_type_electronegativity
 _atom_type_radius
 _atom_type_ionic_radius
  Fe   1.8300   1.4000   0.8525
  O   3.4400   0.6000   1.2600
_symmetry_space_group_name_H-M   'R-3c'
_cell_length_a   5.0356
_cell_length_b   5.0356
_cell_length_c   13.7471
_cell_angle_alpha   90.0000
_cell_angle_beta   90.0000
_cell_angle_gamma   120.0000
_symmetry_Int_Tables_number   167
_chemical_formula_structural   Fe2O3
_chemical_formula_sum   'Fe2 O3'
_cell_volume   301.8847
_cell_formula_units_Z   2
loop_
 _symmetry_equiv_pos_site_id
 _symmetry_equiv_pos_as_xyz
  1  'x, y, z'
loop_
 _atom_site_type_symbol
 _atom_site_label
 _atom_site_symmetry_multiplicity
 _atom_site_fract_x
 _atom_site_fract_y
 _atom_site_fract_z
 _atom_site_occupancy
  Fe  Fe0  12  0.0000  0.0000  0.3553  1
  O  O1  18  0.3062  0.0000  0.2500  1
";

/// A small synthetic record. `space_group == false` omits the insertion anchor.
pub fn make_cif(formula_sum: &str, z: u32, a: f64, space_group: bool) -> String {
    let mut s = String::from("data_X\n");
    if space_group {
        s.push_str("_symmetry_space_group_name_H-M   'Pm-3m'\n");
    }
    s.push_str(&format!("_cell_length_a   {a:.8}\n"));
    s.push_str(&format!("_chemical_formula_sum   '{formula_sum}'\n"));
    s.push_str(&format!("_cell_formula_units_Z   {z}\n"));
    s.push_str("loop_\n _symmetry_equiv_pos_site_id\n _symmetry_equiv_pos_as_xyz\n");
    s.push_str("  1  'x, y, z'\n  2  '-x, -y, -z'\n");
    s.push_str("loop_\n _atom_site_type_symbol\n _atom_site_fract_x\n");
    s.push_str(&format!("  {}  {:.8}\n", formula_sum.split_whitespace().next().unwrap_or("X"), a / 10.0));
    s
}

/// A mixed batch: mostly good records, every 7th with Z = 0, every 11th without
/// a space-group field, every 13th with an unknown element.
pub fn mixed_batch(n: usize) -> Vec<String> {
    let formulas = ["Fe2 O3", "Na1 Cl1", "Ca3 P2 O8", "Li1 Co1 O2", "Xe1 F2", "Mg1 Al2 O4"];
    (0..n)
        .map(|i| {
            let a = 3.0 + i as f64 * 0.012345678;
            if i % 13 == 12 {
                make_cif("Qq2 O1", 1, a, true)
            } else {
                let z = if i % 7 == 6 { 0 } else { 1 + (i % 4) as u32 };
                make_cif(formulas[i % formulas.len()], z, a, i % 11 != 10)
            }
        })
        .collect()
}

/// Write records as an input container inside `dir`.
pub fn write_input(dir: &Path, cifs: &[String]) -> PathBuf {
    let path = dir.join("cifs.jsonl.zst");
    let recs: Vec<RawRecord> = cifs
        .iter()
        .enumerate()
        .map(|(i, c)| RawRecord { id: format!("rec-{i}"), cif: c.clone() })
        .collect();
    write_raw_records(&path, &recs, 3, 64 * 1024).unwrap();
    path
}

pub fn sorted(mut v: Vec<String>) -> Vec<String> {
    v.sort();
    v
}
