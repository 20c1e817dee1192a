//! Linear solvers for the reduced system K·u = f.
//!
//! The stiffness matrix after boundary-condition elimination is
//! symmetric positive definite, so the production path is a sparse
//! LLᵀ (Cholesky) factorization via faer. A dense LU fallback exists
//! for small systems and tests.

use crate::error::{Error, Result};
use crate::sparse::CsrMatrix;
use faer::linalg::cholesky::llt::factor::LltError;
use faer::prelude::*;
use faer::sparse::linalg::solvers::{Llt, SymbolicLlt};
use faer::sparse::linalg::LltError as SparseLltError;
use faer::sparse::{SparseColMat, SymbolicSparseColMat};

/// Linear solver interface.
pub trait Solver: Send + Sync {
    /// Solve K·u = f for u.
    fn solve(&self, matrix: &CsrMatrix, rhs: &[f64]) -> Result<Vec<f64>>;

    /// Solver name for diagnostics.
    fn name(&self) -> &str;
}

/// Solver selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SolverType {
    /// Sparse Cholesky factorization.
    #[default]
    Cholesky,
    /// Dense LU (small systems only).
    DenseLu,
}

/// Solver configuration.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Backend to use.
    pub solver_type: SolverType,
}

/// Pick a solver backend for the given configuration.
pub fn select_solver(config: &SolverConfig) -> Box<dyn Solver> {
    match config.solver_type {
        SolverType::Cholesky => Box::new(CholeskySolver::new()),
        SolverType::DenseLu => Box::new(DenseLuSolver::new()),
    }
}

fn check_system(matrix: &CsrMatrix, rhs: &[f64]) -> Result<usize> {
    let n = matrix.nrows();
    if n != matrix.ncols() {
        return Err(Error::Solver(format!(
            "matrix must be square, got {}x{}",
            n,
            matrix.ncols()
        )));
    }
    if n != rhs.len() {
        return Err(Error::Solver(format!(
            "rhs length {} does not match system size {}",
            rhs.len(),
            n
        )));
    }
    Ok(n)
}

/// Reinterpret a symmetric CSR matrix as faer CSC storage.
///
/// faer wants compressed sparse column data. For a symmetric K,
/// CSC(K) = CSR(Kᵀ) = CSR(K), so an explicit index transpose of the
/// CSR data yields valid CSC storage of the same matrix.
fn symmetric_csr_to_csc(csr: &CsrMatrix) -> SparseColMat<usize, f64> {
    let (nrows, ncols) = (csr.nrows(), csr.ncols());
    let (row_offsets, col_indices, values) = (csr.row_offsets(), csr.col_indices(), csr.values());
    let nnz = values.len();

    // Column pointer array from per-column counts.
    let mut col_ptrs = vec![0usize; ncols + 1];
    for &col in col_indices {
        col_ptrs[col + 1] += 1;
    }
    for c in 0..ncols {
        col_ptrs[c + 1] += col_ptrs[c];
    }

    // Scatter each CSR row into its destination columns.
    let mut csc_rows = vec![0usize; nnz];
    let mut csc_values = vec![0.0f64; nnz];
    let mut cursor = col_ptrs[..ncols].to_vec();
    for row in 0..nrows {
        for idx in row_offsets[row]..row_offsets[row + 1] {
            let dst = cursor[col_indices[idx]];
            csc_rows[dst] = row;
            csc_values[dst] = values[idx];
            cursor[col_indices[idx]] += 1;
        }
    }

    // SAFETY: col_ptrs is monotone with col_ptrs[ncols] == nnz, and
    // each column's row indices come from valid CSR data.
    unsafe {
        SparseColMat::new(
            SymbolicSparseColMat::new_unchecked(nrows, ncols, col_ptrs, None, csc_rows),
            csc_values,
        )
    }
}

/// Sparse Cholesky (LLᵀ) solver backed by faer.
///
/// The production direct solver: stiffness matrices reduced by
/// boundary-condition elimination are symmetric positive definite,
/// which LLᵀ exploits. A non-positive pivot surfaces as
/// [`Error::SingularMatrix`] — the mesh is under-constrained or the
/// element input was invalid.
#[derive(Debug, Default)]
pub struct CholeskySolver;

impl CholeskySolver {
    /// Create a new sparse Cholesky solver.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for CholeskySolver {
    fn solve(&self, matrix: &CsrMatrix, rhs: &[f64]) -> Result<Vec<f64>> {
        let n = check_system(matrix, rhs)?;
        if n == 0 {
            return Ok(vec![]);
        }

        let csc = symmetric_csr_to_csc(matrix);
        let csc_ref = csc.as_ref();

        let symbolic = SymbolicLlt::try_new(csc_ref.symbolic(), faer::Side::Lower)
            .map_err(|_| Error::Solver("symbolic Cholesky analysis failed".into()))?;
        let llt =
            Llt::try_new_with_symbolic(symbolic, csc_ref, faer::Side::Lower).map_err(
                |e| match e {
                    SparseLltError::Generic(err) => {
                        Error::Solver(format!("sparse Cholesky error: {:?}", err))
                    }
                    SparseLltError::Numeric(LltError::NonPositivePivot { index }) => {
                        Error::SingularMatrix(format!(
                            "matrix is not positive definite at pivot {}",
                            index
                        ))
                    }
                },
            )?;

        let mut x = faer::Mat::from_fn(n, 1, |i, _| rhs[i]);
        llt.solve_in_place(x.as_mut());
        Ok((0..n).map(|i| x[(i, 0)]).collect())
    }

    fn name(&self) -> &str {
        "sparse Cholesky (LLT)"
    }
}

/// Dense LU solver using nalgebra, for small systems and tests.
#[derive(Debug, Default)]
pub struct DenseLuSolver;

impl DenseLuSolver {
    /// Create a new dense LU solver.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for DenseLuSolver {
    fn solve(&self, matrix: &CsrMatrix, rhs: &[f64]) -> Result<Vec<f64>> {
        use nalgebra::{DMatrix, DVector};

        let n = check_system(matrix, rhs)?;
        if n == 0 {
            return Ok(vec![]);
        }

        let dense = DMatrix::from(matrix);
        let b = DVector::from_column_slice(rhs);
        let solution = dense
            .lu()
            .solve(&b)
            .ok_or_else(|| Error::SingularMatrix("LU factorization failed".into()))?;
        Ok(solution.as_slice().to_vec())
    }

    fn name(&self) -> &str {
        "dense LU"
    }
}
