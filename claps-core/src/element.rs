//! Element library.
//!
//! One element type is provided: the four-node Bogner-Fox-Schmit
//! laminated plate, in [`plate`]. The element kernel is pure
//! computation; mesh-level orchestration lives in
//! [`crate::assembly`].

pub mod plate;

pub use plate::{PlateElement, DOF_PER_NODE, PLATE_DOFS, PLATE_NODES, STIFFNESS_NNZ};
