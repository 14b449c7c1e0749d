use nalgebra::Point3;

/// Represents a single atom record of a lipid structure.
///
/// Atoms are treated as values: the reorientation engine never mutates an atom
/// in place, it produces new records carrying updated positions. Every field
/// maps one-to-one onto a column range of the fixed-column structure format so
/// that a read/write cycle reproduces the original record.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom serial number (columns 7-11). Assumed unique within a structure.
    pub serial: usize,
    /// The atom name (e.g., "P", "N", "C218").
    pub name: String,
    /// The residue or fragment name (e.g., "POPC").
    pub res_name: String,
    /// The residue/fragment identifier used to group atoms into rigid bodies.
    pub fragment_id: isize,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// Occupancy, carried through unchanged.
    pub occupancy: f64,
    /// Temperature factor, carried through unchanged.
    pub temp_factor: f64,
    /// The chain or segment label (columns 73-76).
    pub chain_label: String,
}

impl Default for Atom {
    /// The zero-valued sentinel returned when a root atom is requested from an
    /// empty fragment.
    fn default() -> Self {
        Self {
            serial: 0,
            name: String::new(),
            res_name: String::new(),
            fragment_id: 0,
            position: Point3::origin(),
            occupancy: 0.0,
            temp_factor: 0.0,
            chain_label: String::new(),
        }
    }
}

impl Atom {
    /// Creates a new `Atom` with zero occupancy, temperature factor and an empty
    /// chain label.
    ///
    /// # Arguments
    ///
    /// * `serial` - The atom serial number.
    /// * `name` - The name of the atom.
    /// * `res_name` - The name of the residue the atom belongs to.
    /// * `fragment_id` - The fragment identifier of the owning residue.
    /// * `position` - The 3D coordinates of the atom.
    pub fn new(
        serial: usize,
        name: &str,
        res_name: &str,
        fragment_id: isize,
        position: Point3<f64>,
    ) -> Self {
        Self {
            serial,
            name: name.to_string(),
            res_name: res_name.to_string(),
            fragment_id,
            position,
            ..Default::default()
        }
    }

    /// Returns a copy of this atom placed at `position`; every other field is
    /// carried over unchanged.
    pub fn with_position(&self, position: Point3<f64>) -> Self {
        Self {
            position,
            ..self.clone()
        }
    }

    pub fn has_finite_position(&self) -> bool {
        self.position.iter().all(|c| c.is_finite())
    }
}
