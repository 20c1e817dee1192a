//! Sparse triplet buffers and CSR conversion.
//!
//! The global stiffness matrix is accumulated in coordinate (triplet)
//! form: three equal-length sequences of row indices, column indices
//! and values. Each element owns a fixed-size, non-overlapping region
//! of the buffers — [`STIFFNESS_NNZ`] slots — handed out as a
//! [`TripletView`]. Disjointness is enforced by slice ownership rather
//! than by a documented offset convention, which is what makes
//! lock-free parallel assembly sound.
//!
//! Conversion to CSR goes through `nalgebra_sparse`'s COO type, which
//! sums duplicate (row, col) entries — the contributions of elements
//! sharing a node.

use crate::element::plate::STIFFNESS_NNZ;
use crate::error::{Error, Result};
use nalgebra_sparse::coo::CooMatrix;
use nalgebra_sparse::csr::CsrMatrix as NalgebraCsr;
use rayon::iter::IndexedParallelIterator;
use rayon::prelude::*;

/// Compressed Sparse Row matrix.
pub type CsrMatrix = NalgebraCsr<f64>;

/// One element's reserved region of the global triplet buffers.
///
/// Exactly [`STIFFNESS_NNZ`] slots of each of rows/cols/values: the
/// only write capability an element kernel receives during assembly.
#[derive(Debug)]
pub struct TripletView<'a> {
    /// Global row indices.
    pub rows: &'a mut [usize],
    /// Global column indices.
    pub cols: &'a mut [usize],
    /// Stiffness values.
    pub values: &'a mut [f64],
}

/// Pre-allocated global triplet buffers for an element-wise assembly.
///
/// Sized at construction to `STIFFNESS_NNZ * n_elements` and never
/// reallocated; elements write through disjoint [`TripletView`]s in
/// element order.
#[derive(Debug, Clone, PartialEq)]
pub struct StiffnessTriplets {
    n_dofs: usize,
    rows: Vec<usize>,
    cols: Vec<usize>,
    values: Vec<f64>,
}

impl StiffnessTriplets {
    /// Allocate buffers for `n_elements` elements over a `n_dofs`-wide
    /// global system.
    pub fn with_elements(n_dofs: usize, n_elements: usize) -> Self {
        let len = STIFFNESS_NNZ * n_elements;
        Self {
            n_dofs,
            rows: vec![0; len],
            cols: vec![0; len],
            values: vec![0.0; len],
        }
    }

    /// Global matrix dimension.
    pub fn n_dofs(&self) -> usize {
        self.n_dofs
    }

    /// Number of element regions in the buffers.
    pub fn n_elements(&self) -> usize {
        self.values.len() / STIFFNESS_NNZ
    }

    /// Total number of triplet slots.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when sized for zero elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Row index buffer.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Column index buffer.
    pub fn cols(&self) -> &[usize] {
        &self.cols
    }

    /// Value buffer.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Partition the buffers into per-element views, in element order.
    pub fn element_views_mut(&mut self) -> impl Iterator<Item = TripletView<'_>> {
        let Self {
            rows, cols, values, ..
        } = self;
        rows.chunks_exact_mut(STIFFNESS_NNZ)
            .zip(cols.chunks_exact_mut(STIFFNESS_NNZ))
            .zip(values.chunks_exact_mut(STIFFNESS_NNZ))
            .map(|((rows, cols), values)| TripletView { rows, cols, values })
    }

    /// Parallel variant of [`Self::element_views_mut`]; the views are
    /// the same disjoint regions, so no synchronization is needed.
    pub fn par_element_views_mut(
        &mut self,
    ) -> impl IndexedParallelIterator<Item = TripletView<'_>> {
        let Self {
            rows, cols, values, ..
        } = self;
        rows.par_chunks_exact_mut(STIFFNESS_NNZ)
            .zip(cols.par_chunks_exact_mut(STIFFNESS_NNZ))
            .zip(values.par_chunks_exact_mut(STIFFNESS_NNZ))
            .map(|((rows, cols), values)| TripletView { rows, cols, values })
    }

    /// Convert to CSR, summing duplicate entries.
    pub fn to_csr(&self) -> Result<CsrMatrix> {
        let coo = CooMatrix::try_from_triplets(
            self.n_dofs,
            self.n_dofs,
            self.rows.clone(),
            self.cols.clone(),
            self.values.clone(),
        )
        .map_err(|e| Error::Assembly(format!("invalid triplet data: {}", e)))?;
        Ok(CsrMatrix::from(&coo))
    }
}
