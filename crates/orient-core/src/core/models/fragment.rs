use super::atom::Atom;
use std::collections::HashMap;

/// A set of atoms sharing one fragment identifier, treated as a single rigid body.
///
/// Atoms keep the order in which they appeared in the source structure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FragmentGroup {
    pub fragment_id: isize,
    pub atoms: Vec<Atom>,
}

impl FragmentGroup {
    pub fn new(fragment_id: isize) -> Self {
        Self {
            fragment_id,
            atoms: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// The residue name of the first atom, or an empty string for an empty group.
    pub fn res_name(&self) -> &str {
        self.atoms.first().map_or("", |a| a.res_name.as_str())
    }
}

/// Groups atoms by fragment identifier.
///
/// Groups are returned in first-seen order of their identifiers, and atoms within
/// a group keep their input order. Atoms of one fragment need not be contiguous.
pub fn group_by_fragment(atoms: &[Atom]) -> Vec<FragmentGroup> {
    let mut groups: Vec<FragmentGroup> = Vec::new();
    let mut index_of: HashMap<isize, usize> = HashMap::new();

    for atom in atoms {
        let idx = *index_of.entry(atom.fragment_id).or_insert_with(|| {
            groups.push(FragmentGroup::new(atom.fragment_id));
            groups.len() - 1
        });
        groups[idx].atoms.push(atom.clone());
    }

    groups
}

/// Treats the whole structure as one rigid body keyed by the first atom's fragment id.
pub fn single_group(atoms: &[Atom]) -> Vec<FragmentGroup> {
    match atoms.first() {
        Some(first) => vec![FragmentGroup {
            fragment_id: first.fragment_id,
            atoms: atoms.to_vec(),
        }],
        None => Vec::new(),
    }
}
