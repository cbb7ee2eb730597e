//! Mesh face connectivity shared by every matrix built on the same mesh.

use crate::error::LduError;

/// Owner/neighbour addressing for the internal faces of one mesh partition.
///
/// `owner[f]` and `neighbour[f]` are the two cells coupled by face `f`, with
/// `owner[f] < neighbour[f]` (upper-triangular convention) and faces sorted
/// by owner. Derived orderings are built once at construction:
/// `owner_start` is a CSR-style index over the owner-sorted faces, and
/// `losort`/`losort_start` give the faces of each cell's neighbour side.
/// The addressing is externally owned (typically behind an `Arc`) and never
/// mutated by matrices referencing it.
#[derive(Debug)]
pub struct LduAddressing {
    n_cells: usize,
    owner: Vec<usize>,
    neighbour: Vec<usize>,
    owner_start: Vec<usize>,
    losort: Vec<usize>,
    losort_start: Vec<usize>,
}

impl LduAddressing {
    /// Validate the connectivity and build the derived face orderings.
    pub fn new(
        n_cells: usize,
        owner: Vec<usize>,
        neighbour: Vec<usize>,
    ) -> Result<Self, LduError> {
        if owner.len() != neighbour.len() {
            return Err(LduError::Addressing(format!(
                "owner and neighbour lengths differ: {} vs {}",
                owner.len(),
                neighbour.len()
            )));
        }
        for f in 0..owner.len() {
            if owner[f] >= neighbour[f] {
                return Err(LduError::Addressing(format!(
                    "face {}: owner {} not below neighbour {}",
                    f, owner[f], neighbour[f]
                )));
            }
            if neighbour[f] >= n_cells {
                return Err(LduError::Addressing(format!(
                    "face {}: neighbour {} out of range for {} cells",
                    f, neighbour[f], n_cells
                )));
            }
            if f > 0 && owner[f] < owner[f - 1] {
                return Err(LduError::Addressing(format!(
                    "faces not sorted by owner at face {}",
                    f
                )));
            }
        }

        let mut owner_start = vec![0usize; n_cells + 1];
        for &o in &owner {
            owner_start[o + 1] += 1;
        }
        for c in 0..n_cells {
            owner_start[c + 1] += owner_start[c];
        }

        // Faces ordered by neighbour cell (counting sort keeps it stable)
        let mut losort_start = vec![0usize; n_cells + 1];
        for &n in &neighbour {
            losort_start[n + 1] += 1;
        }
        for c in 0..n_cells {
            losort_start[c + 1] += losort_start[c];
        }
        let mut losort = vec![0usize; neighbour.len()];
        let mut fill = losort_start.clone();
        for (f, &n) in neighbour.iter().enumerate() {
            losort[fill[n]] = f;
            fill[n] += 1;
        }

        Ok(Self {
            n_cells,
            owner,
            neighbour,
            owner_start,
            losort,
            losort_start,
        })
    }

    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    pub fn n_faces(&self) -> usize {
        self.owner.len()
    }

    pub fn owner(&self) -> &[usize] {
        &self.owner
    }

    pub fn neighbour(&self) -> &[usize] {
        &self.neighbour
    }

    /// Faces whose owner is `cell`, as a range into the face arrays.
    pub fn owner_faces(&self, cell: usize) -> std::ops::Range<usize> {
        self.owner_start[cell]..self.owner_start[cell + 1]
    }

    /// Face indices whose neighbour is `cell`.
    pub fn neighbour_faces(&self, cell: usize) -> &[usize] {
        &self.losort[self.losort_start[cell]..self.losort_start[cell + 1]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1-D chain of 4 cells: faces (0,1), (1,2), (2,3)
    fn chain4() -> LduAddressing {
        LduAddressing::new(4, vec![0, 1, 2], vec![1, 2, 3]).unwrap()
    }

    #[test]
    fn derived_orderings() {
        let addr = chain4();
        assert_eq!(addr.n_faces(), 3);
        assert_eq!(addr.owner_faces(0), 0..1);
        assert_eq!(addr.owner_faces(3), 3..3);
        assert_eq!(addr.neighbour_faces(0), &[] as &[usize]);
        assert_eq!(addr.neighbour_faces(2), &[1]);
        assert_eq!(addr.neighbour_faces(3), &[2]);
    }

    #[test]
    fn rejects_lower_triangular_faces() {
        let err = LduAddressing::new(3, vec![1], vec![0]).unwrap_err();
        assert!(matches!(err, LduError::Addressing(_)));
    }

    #[test]
    fn rejects_unsorted_owners() {
        let err = LduAddressing::new(4, vec![2, 0], vec![3, 1]).unwrap_err();
        assert!(matches!(err, LduError::Addressing(_)));
    }

    #[test]
    fn rejects_out_of_range_cells() {
        let err = LduAddressing::new(2, vec![0], vec![2]).unwrap_err();
        assert!(matches!(err, LduError::Addressing(_)));
    }
}
