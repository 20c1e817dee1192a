//! Core data types for laminated plate analysis.
//!
//! This module defines the types shared across CLAPS:
//! - The laminate constitutive (ABD) matrix
//! - Mid-plane strain/curvature fields in Voigt notation
//! - Stress resultants (membrane forces and bending moments)

use nalgebra::{Matrix6, Vector3, Vector6};

/// Laminate constitutive matrix in classical lamination theory.
///
/// Relates mid-plane strains and curvatures to stress resultants:
///
/// ```text
/// [N]   [A B] [ε0]
/// [M] = [B D] [κ ]
/// ```
///
/// where A is the membrane block, D the bending block and B the
/// membrane-bending coupling block (zero for symmetric laminates).
/// The matrix is computed by an external laminate module and consumed
/// here fully formed.
pub type AbdMatrix = Matrix6<f64>;

/// Mid-plane strain state in Voigt notation.
///
/// Components are ordered as: [ε_xx, ε_yy, γ_xy, κ_xx, κ_yy, κ_xy]
/// with κ = (-w,xx, -w,yy, -2 w,xy) under Kirchhoff kinematics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MidplaneField(pub Vector6<f64>);

impl MidplaneField {
    /// Create a new mid-plane field from Voigt components.
    pub fn new(components: [f64; 6]) -> Self {
        Self(Vector6::from_row_slice(&components))
    }

    /// Zero strain state.
    pub fn zero() -> Self {
        Self(Vector6::zeros())
    }

    /// Membrane strains [ε_xx, ε_yy, γ_xy].
    pub fn membrane(&self) -> Vector3<f64> {
        self.0.fixed_rows::<3>(0).into_owned()
    }

    /// Curvatures [κ_xx, κ_yy, κ_xy].
    pub fn curvature(&self) -> Vector3<f64> {
        self.0.fixed_rows::<3>(3).into_owned()
    }
}

/// Stress resultants per unit width in Voigt notation.
///
/// Components are ordered as: [N_xx, N_yy, N_xy, M_xx, M_yy, M_xy]
/// where N are membrane forces and M bending/twisting moments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StressResultants(pub Vector6<f64>);

impl StressResultants {
    /// Create new stress resultants from Voigt components.
    pub fn new(components: [f64; 6]) -> Self {
        Self(Vector6::from_row_slice(&components))
    }

    /// Zero resultant state.
    pub fn zero() -> Self {
        Self(Vector6::zeros())
    }

    /// Membrane forces [N_xx, N_yy, N_xy].
    pub fn forces(&self) -> Vector3<f64> {
        self.0.fixed_rows::<3>(0).into_owned()
    }

    /// Bending and twisting moments [M_xx, M_yy, M_xy].
    pub fn moments(&self) -> Vector3<f64> {
        self.0.fixed_rows::<3>(3).into_owned()
    }
}
