//! Mesh-level stiffness assembly and boundary-condition reduction.
//!
//! Assembly fans the element stiffness kernel out over the mesh: each
//! element writes its [`crate::element::plate::STIFFNESS_NNZ`] triplets
//! into its own region of the pre-allocated buffers. The regions are
//! disjoint, so the parallel path needs no locking and produces buffers
//! bit-identical to the sequential path.
//!
//! Dirichlet boundary conditions are applied by row/column elimination:
//! [`DofPartition`] renumbers the free DOFs densely and filters the
//! triplets down to the free-free block before the sparse solve.

use crate::element::plate::PlateElement;
use crate::error::Result;
use crate::quadrature::GaussRule2d;
use crate::sparse::{CsrMatrix, StiffnessTriplets};
use rayon::prelude::*;

/// Assemble the global stiffness triplets for a set of plate elements.
///
/// Allocates buffers for `elements.len()` regions over a `n_dofs`-wide
/// system and runs the element kernels in parallel. Element order in
/// the buffers matches slice order regardless of scheduling, so the
/// result is deterministic.
pub fn assemble_stiffness(
    elements: &[PlateElement],
    rule: &GaussRule2d,
    n_dofs: usize,
) -> StiffnessTriplets {
    let mut triplets = StiffnessTriplets::with_elements(n_dofs, elements.len());
    triplets
        .par_element_views_mut()
        .zip(elements.par_iter())
        .for_each(|(mut view, element)| element.write_stiffness(rule, &mut view));
    triplets
}

/// Sequential assembly, identical output to [`assemble_stiffness`].
pub fn assemble_stiffness_serial(
    elements: &[PlateElement],
    rule: &GaussRule2d,
    n_dofs: usize,
) -> StiffnessTriplets {
    let mut triplets = StiffnessTriplets::with_elements(n_dofs, elements.len());
    for (mut view, element) in triplets.element_views_mut().zip(elements) {
        element.write_stiffness(rule, &mut view);
    }
    triplets
}

/// Free/prescribed split of the global DOFs.
///
/// Prescribed DOFs are eliminated: the reduced system keeps only the
/// free rows and columns, renumbered densely in ascending global
/// order. Prescribed displacements are homogeneous (zero), which is
/// the supported boundary-condition form.
#[derive(Debug, Clone)]
pub struct DofPartition {
    /// Dense renumbering: `map[dof]` is the reduced index of a free
    /// DOF, `None` for a prescribed one.
    map: Vec<Option<usize>>,
    /// Free DOFs in ascending global order.
    free: Vec<usize>,
}

impl DofPartition {
    /// Build a partition from a prescribed-DOF mask.
    ///
    /// `prescribed[dof]` is true for DOFs fixed to zero.
    pub fn from_prescribed(prescribed: &[bool]) -> Self {
        let mut map = vec![None; prescribed.len()];
        let mut free = Vec::with_capacity(prescribed.len());
        for (dof, &fixed) in prescribed.iter().enumerate() {
            if !fixed {
                map[dof] = Some(free.len());
                free.push(dof);
            }
        }
        Self { map, free }
    }

    /// Total number of DOFs in the full system.
    pub fn n_dofs(&self) -> usize {
        self.map.len()
    }

    /// Number of free (unknown) DOFs.
    pub fn n_free(&self) -> usize {
        self.free.len()
    }

    /// Reduced index of a global DOF, if free.
    pub fn reduced_index(&self, dof: usize) -> Option<usize> {
        self.map[dof]
    }

    /// Reduce assembled triplets to the free-free block in CSR form.
    ///
    /// Triplets touching a prescribed row or column are dropped; the
    /// remainder are renumbered and duplicates summed during the COO to
    /// CSR conversion.
    pub fn reduce(&self, triplets: &StiffnessTriplets) -> Result<CsrMatrix> {
        let mut rows = Vec::with_capacity(triplets.len());
        let mut cols = Vec::with_capacity(triplets.len());
        let mut values = Vec::with_capacity(triplets.len());
        for ((&r, &c), &v) in triplets
            .rows()
            .iter()
            .zip(triplets.cols())
            .zip(triplets.values())
        {
            if let (Some(rr), Some(rc)) = (self.map[r], self.map[c]) {
                rows.push(rr);
                cols.push(rc);
                values.push(v);
            }
        }
        let coo = nalgebra_sparse::coo::CooMatrix::try_from_triplets(
            self.n_free(),
            self.n_free(),
            rows,
            cols,
            values,
        )
        .map_err(|e| crate::error::Error::Assembly(format!("invalid triplet data: {}", e)))?;
        Ok(CsrMatrix::from(&coo))
    }

    /// Restrict a full-length vector to the free DOFs.
    pub fn reduce_rhs(&self, full: &[f64]) -> Vec<f64> {
        self.free.iter().map(|&dof| full[dof]).collect()
    }

    /// Expand a reduced solution back to full length, with zeros at the
    /// prescribed DOFs.
    pub fn expand(&self, reduced: &[f64]) -> Vec<f64> {
        let mut full = vec![0.0; self.map.len()];
        for (&dof, &value) in self.free.iter().zip(reduced) {
            full[dof] = value;
        }
        full
    }
}
