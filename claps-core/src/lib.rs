//! CLAPS Core - Composite LAminated Plate Solver
//!
//! Finite element core for static analysis of composite laminated
//! plates:
//! - Four-node Bogner-Fox-Schmit plate element (classical lamination
//!   theory, 6 DOFs per node)
//! - Tabulated Gauss-Legendre quadrature, orders 2 through 10
//! - Lock-free parallel assembly into sparse triplet buffers
//! - Boundary-condition elimination and sparse Cholesky solve
//!
//! # Architecture
//!
//! The crate is a computational library with no I/O or configuration
//! surface. Mesh generation, laminate (ABD) computation and
//! post-processing are external collaborators: node coordinates,
//! connectivity and the 6×6 constitutive matrix come in, sparse
//! triplets and displacement solutions go out.
//!
//! - [`quadrature`]: immutable Gauss-Legendre tables
//! - [`element`]: the plate element stiffness/strain kernel
//! - [`sparse`]: triplet buffers with per-element write views
//! - [`assembly`]: parallel mesh assembly and DOF partitioning
//! - [`solver`]: direct linear solvers for the reduced system

pub mod assembly;
pub mod element;
pub mod error;
pub mod quadrature;
pub mod solver;
pub mod sparse;
pub mod types;

pub use assembly::{assemble_stiffness, DofPartition};
pub use element::{PlateElement, DOF_PER_NODE, PLATE_DOFS, PLATE_NODES, STIFFNESS_NNZ};
pub use error::{Error, Result};
pub use quadrature::{GaussRule1d, GaussRule2d};
pub use solver::{CholeskySolver, DenseLuSolver, Solver};
pub use sparse::{CsrMatrix, StiffnessTriplets, TripletView};
pub use types::{AbdMatrix, MidplaneField, StressResultants};
