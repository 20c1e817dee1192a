//! Four-node Bogner-Fox-Schmit laminated plate element.
//!
//! A rectangular Kirchhoff plate element for composite laminates under
//! classical lamination theory:
//! - 4 corner nodes, 6 DOFs per node (u, v, w, w,x, w,y, w,xy)
//! - 24 total DOFs
//! - Membrane displacements u, v interpolated bilinearly
//! - Transverse displacement w interpolated by bicubic Hermite
//!   (Bogner-Fox-Schmit) functions, C¹-conforming across edges
//! - Constitutive behavior given by an opaque 6×6 ABD laminate matrix
//!
//! # Node Numbering
//!
//! ```text
//!  4---------3
//!  |         |        η
//!  |         |        ↑
//!  |         |        +--→ ξ
//!  1---------2
//! ```
//!
//! Corner nodes wind counter-clockwise; node 1 sits at (ξ, η) = (-1, -1).
//! The mapping to physical space is the axis-aligned rectangle with edge
//! lengths `lex` along ξ and `ley` along η, so the Jacobian is constant
//! over the element: det J = (lex/2)(ley/2).
//!
//! # Strains
//!
//! The strain-displacement matrix B (6×24) maps nodal DOFs to
//! [ε_xx, ε_yy, γ_xy, κ_xx, κ_yy, κ_xy] with the curvatures
//! κ = (-w,xx, -w,yy, -2 w,xy). The stiffness integrand is
//! Bᵀ·ABD·B·w_ξ·w_η·det J over the tensor-product Gauss points.

use crate::error::{Error, Result};
use crate::quadrature::GaussRule2d;
use crate::sparse::TripletView;
use crate::types::{AbdMatrix, MidplaneField, StressResultants};
use nalgebra::{SMatrix, SVector};

/// Degrees of freedom per node: u, v, w, w,x, w,y, w,xy.
pub const DOF_PER_NODE: usize = 6;

/// Corner nodes per element.
pub const PLATE_NODES: usize = 4;

/// Total DOFs per element.
pub const PLATE_DOFS: usize = PLATE_NODES * DOF_PER_NODE;

/// Triplets written per element stiffness scatter.
///
/// Every entry of the local matrix is emitted, including both symmetric
/// halves, so downstream sparse construction needs no symmetrization
/// pass. Callers size the global triplet buffers as
/// `STIFFNESS_NNZ * n_elements` and hand each element a disjoint
/// [`TripletView`].
pub const STIFFNESS_NNZ: usize = PLATE_DOFS * PLATE_DOFS;

/// Local element stiffness matrix.
pub type PlateStiffness = SMatrix<f64, PLATE_DOFS, PLATE_DOFS>;

/// Element displacement vector, gathered from the global solution.
pub type PlateDisplacements = SVector<f64, PLATE_DOFS>;

/// Strain-displacement matrix at one integration point.
pub type StrainDisplacement = SMatrix<f64, 6, PLATE_DOFS>;

/// Node positions in natural coordinates, in winding order.
const NODE_COORDS: [(f64, f64); PLATE_NODES] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

/// Interpolant selection for the w-family DOFs (w, w,x, w,y, w,xy):
/// index 0 picks the value interpolant, 1 the slope interpolant, per axis.
const W_INTERP: [(usize, usize); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];

// 1-D cubic Hermite interpolants on [-1, 1] with the node at si = ±1.
// `value` multiplies the nodal function value; `slope` multiplies the
// physical derivative and therefore carries the element edge length l,
// so that (2/l) d(slope)/ds = 1 at the owning node.

#[inline]
fn hermite_value(s: f64, si: f64) -> f64 {
    0.25 * (2.0 + 3.0 * si * s - si * s * s * s)
}

#[inline]
fn hermite_value_d1(s: f64, si: f64) -> f64 {
    0.75 * si * (1.0 - s * s)
}

#[inline]
fn hermite_value_d2(s: f64, si: f64) -> f64 {
    -1.5 * si * s
}

#[inline]
fn hermite_slope(s: f64, si: f64, l: f64) -> f64 {
    0.125 * l * (s * s * s + si * s * s - s - si)
}

#[inline]
fn hermite_slope_d1(s: f64, si: f64, l: f64) -> f64 {
    0.125 * l * (3.0 * s * s + 2.0 * si * s - 1.0)
}

#[inline]
fn hermite_slope_d2(s: f64, si: f64, l: f64) -> f64 {
    0.25 * l * (3.0 * s + si)
}

/// One rectangular laminated plate element.
///
/// An immutable value: all fields are supplied and validated at
/// construction, then only read during assembly. The element never
/// mutates global state itself; stiffness scatter goes through the
/// [`TripletView`] capability handed to [`Self::write_stiffness`].
///
/// DOF base offsets are the global index of the first DOF owned by each
/// node (consecutive DOFs at a node are contiguous). Their validity —
/// alignment with the caller's node ordering and non-overlap between
/// elements — is a caller contract and is not re-checked in the
/// assembly hot path.
#[derive(Debug, Clone, PartialEq)]
pub struct PlateElement {
    nodes: [usize; PLATE_NODES],
    dofs: [usize; PLATE_NODES],
    lex: f64,
    ley: f64,
    abd: AbdMatrix,
}

impl PlateElement {
    /// Create a plate element.
    ///
    /// # Arguments
    ///
    /// * `nodes` - Caller-assigned node identifiers, in winding order
    /// * `dofs` - Global DOF base offset of each node
    /// * `lex`, `ley` - Physical edge lengths along ξ and η
    /// * `abd` - Laminate constitutive matrix
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateElement`] if either edge length is
    /// not strictly positive and finite (a degenerate Jacobian).
    pub fn new(
        nodes: [usize; PLATE_NODES],
        dofs: [usize; PLATE_NODES],
        lex: f64,
        ley: f64,
        abd: AbdMatrix,
    ) -> Result<Self> {
        if !(lex.is_finite() && ley.is_finite() && lex > 0.0 && ley > 0.0) {
            return Err(Error::DegenerateElement { lex, ley });
        }
        Ok(Self {
            nodes,
            dofs,
            lex,
            ley,
            abd,
        })
    }

    /// Node identifiers in winding order.
    pub fn nodes(&self) -> &[usize; PLATE_NODES] {
        &self.nodes
    }

    /// Global DOF base offset of each node.
    pub fn dof_offsets(&self) -> &[usize; PLATE_NODES] {
        &self.dofs
    }

    /// Edge length along ξ.
    pub fn lex(&self) -> f64 {
        self.lex
    }

    /// Edge length along η.
    pub fn ley(&self) -> f64 {
        self.ley
    }

    /// Laminate constitutive matrix.
    pub fn abd(&self) -> &AbdMatrix {
        &self.abd
    }

    /// Global DOF index for a local DOF in 0..24.
    #[inline]
    pub fn global_dof(&self, local: usize) -> usize {
        self.dofs[local / DOF_PER_NODE] + local % DOF_PER_NODE
    }

    /// Strain-displacement matrix B at natural coordinates (ξ, η).
    pub fn strain_displacement(&self, xi: f64, eta: f64) -> StrainDisplacement {
        // Physical derivative scale per natural axis.
        let ax = 2.0 / self.lex;
        let ay = 2.0 / self.ley;
        let mut b = StrainDisplacement::zeros();

        for (node, &(xn, yn)) in NODE_COORDS.iter().enumerate() {
            let col = DOF_PER_NODE * node;

            // Membrane block: bilinear Lagrange derivatives.
            let dn_dx = ax * 0.25 * xn * (1.0 + yn * eta);
            let dn_dy = ay * 0.25 * yn * (1.0 + xn * xi);
            b[(0, col)] = dn_dx; // ε_xx = u,x
            b[(1, col + 1)] = dn_dy; // ε_yy = v,y
            b[(2, col)] = dn_dy; // γ_xy = u,y + v,x
            b[(2, col + 1)] = dn_dx;

            // Bending block: products of 1-D Hermite interpolants.
            let fx = [hermite_value(xi, xn), hermite_slope(xi, xn, self.lex)];
            let fx1 = [
                hermite_value_d1(xi, xn),
                hermite_slope_d1(xi, xn, self.lex),
            ];
            let fx2 = [
                hermite_value_d2(xi, xn),
                hermite_slope_d2(xi, xn, self.lex),
            ];
            let fy = [hermite_value(eta, yn), hermite_slope(eta, yn, self.ley)];
            let fy1 = [
                hermite_value_d1(eta, yn),
                hermite_slope_d1(eta, yn, self.ley),
            ];
            let fy2 = [
                hermite_value_d2(eta, yn),
                hermite_slope_d2(eta, yn, self.ley),
            ];

            for (k, &(p, q)) in W_INTERP.iter().enumerate() {
                let c = col + 2 + k;
                b[(3, c)] = -(ax * ax) * fx2[p] * fy[q]; // κ_xx = -w,xx
                b[(4, c)] = -(ay * ay) * fx[p] * fy2[q]; // κ_yy = -w,yy
                b[(5, c)] = -2.0 * ax * ay * fx1[p] * fy1[q]; // κ_xy = -2 w,xy
            }
        }

        b
    }

    /// Compute the local element stiffness matrix.
    ///
    /// Pure function of the element fields and the quadrature rule;
    /// identical inputs produce bit-identical output, independent of
    /// what other elements are being assembled.
    pub fn stiffness(&self, rule: &GaussRule2d) -> PlateStiffness {
        let det_j = 0.25 * self.lex * self.ley;
        let mut k = PlateStiffness::zeros();
        for (xi, eta, weight) in rule.iter() {
            let b = self.strain_displacement(xi, eta);
            k += b.transpose() * self.abd * b * (weight * det_j);
        }
        k
    }

    /// Compute the local stiffness matrix and scatter it into the
    /// element's reserved triplet region.
    ///
    /// Writes exactly [`STIFFNESS_NNZ`] (row, col, value) triplets —
    /// every entry of the local matrix, both symmetric halves — into
    /// the view, in row-major local order. Global indices are built
    /// from the per-node DOF base offsets. Nothing outside the view is
    /// touched and nothing is allocated.
    pub fn write_stiffness(&self, rule: &GaussRule2d, view: &mut TripletView<'_>) {
        let k = self.stiffness(rule);
        let mut slot = 0;
        for i in 0..PLATE_DOFS {
            let row = self.global_dof(i);
            for j in 0..PLATE_DOFS {
                view.rows[slot] = row;
                view.cols[slot] = self.global_dof(j);
                view.values[slot] = k[(i, j)];
                slot += 1;
            }
        }
    }

    /// Extract this element's 24 nodal displacements from the global
    /// solution vector.
    pub fn gather_displacements(&self, u: &[f64]) -> PlateDisplacements {
        PlateDisplacements::from_fn(|i, _| u[self.global_dof(i)])
    }

    /// Mid-plane strains and curvatures at natural coordinates (ξ, η)
    /// for the given element displacements.
    pub fn midplane_field(&self, ue: &PlateDisplacements, xi: f64, eta: f64) -> MidplaneField {
        MidplaneField(self.strain_displacement(xi, eta) * ue)
    }

    /// Recover stress resultants at each integration point of the rule.
    ///
    /// N = A·ε0 + B·κ and M = B·ε0 + D·κ, evaluated in rule iteration
    /// order.
    pub fn stress_resultants(
        &self,
        ue: &PlateDisplacements,
        rule: &GaussRule2d,
    ) -> Vec<StressResultants> {
        rule.iter()
            .map(|(xi, eta, _)| {
                let field = self.strain_displacement(xi, eta) * ue;
                StressResultants(self.abd * field)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector6;

    /// ABD matrix of a single isotropic ply: A = Q·t, B = 0, D = Q·t³/12.
    fn single_ply_abd(e: f64, nu: f64, t: f64) -> AbdMatrix {
        let q11 = e / (1.0 - nu * nu);
        let q12 = nu * q11;
        let q66 = 0.5 * e / (1.0 + nu);
        let mut abd = AbdMatrix::zeros();
        let membrane = t;
        let bending = t * t * t / 12.0;
        for (block, scale) in [(0, membrane), (3, bending)] {
            abd[(block, block)] = scale * q11;
            abd[(block + 1, block + 1)] = scale * q11;
            abd[(block, block + 1)] = scale * q12;
            abd[(block + 1, block)] = scale * q12;
            abd[(block + 2, block + 2)] = scale * q66;
        }
        abd
    }

    fn test_element() -> PlateElement {
        let abd = single_ply_abd(0.7e11, 0.3, 0.001);
        PlateElement::new([0, 1, 2, 3], [0, 6, 12, 18], 0.1, 0.125, abd).unwrap()
    }

    #[test]
    fn test_degenerate_geometry_rejected() {
        let abd = single_ply_abd(1e9, 0.3, 0.01);
        for (lex, ley) in [(0.0, 0.1), (0.1, 0.0), (-0.1, 0.1), (0.1, f64::NAN)] {
            match PlateElement::new([0, 1, 2, 3], [0, 6, 12, 18], lex, ley, abd) {
                Err(Error::DegenerateElement { .. }) => {}
                other => panic!("expected DegenerateElement, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_hermite_cardinal_properties() {
        let l = 0.3;
        for si in [-1.0, 1.0] {
            // Value interpolant: 1 at its node, 0 at the other, zero slope
            // at both.
            assert_relative_eq!(hermite_value(si, si), 1.0);
            assert_relative_eq!(hermite_value(-si, si), 0.0);
            assert_relative_eq!(hermite_value_d1(si, si), 0.0);
            assert_relative_eq!(hermite_value_d1(-si, si), 0.0);
            // Slope interpolant: zero value at both nodes, unit physical
            // derivative (2/l · d/ds) at its node, zero at the other.
            assert_relative_eq!(hermite_slope(si, si, l), 0.0);
            assert_relative_eq!(hermite_slope(-si, si, l), 0.0);
            assert_relative_eq!(2.0 / l * hermite_slope_d1(si, si, l), 1.0);
            assert_relative_eq!(hermite_slope_d1(-si, si, l), 0.0);
        }
    }

    #[test]
    fn test_stiffness_symmetric() {
        let elem = test_element();
        let rule = GaussRule2d::tensor(4).unwrap();
        let k = elem.stiffness(&rule);
        let k_max = k.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
        for i in 0..PLATE_DOFS {
            for j in 0..PLATE_DOFS {
                assert!(
                    (k[(i, j)] - k[(j, i)]).abs() <= 1e-12 * k_max,
                    "K[{},{}] = {} != K[{},{}] = {}",
                    i,
                    j,
                    k[(i, j)],
                    j,
                    i,
                    k[(j, i)]
                );
            }
        }
    }

    #[test]
    fn test_stiffness_positive_semi_definite() {
        // A thick ply keeps the membrane/bending stiffness scales close
        // enough that one relative threshold separates rigid modes from
        // elastic ones.
        let abd = single_ply_abd(1e9, 0.3, 0.01);
        let elem = PlateElement::new([0, 1, 2, 3], [0, 6, 12, 18], 0.1, 0.1, abd).unwrap();
        let rule = GaussRule2d::tensor(4).unwrap();
        let k = elem.stiffness(&rule);
        let eigs = k.symmetric_eigen().eigenvalues;
        let max_eig = eigs.iter().fold(0.0_f64, |m, v| m.max(*v));
        let mut near_zero = 0;
        for lambda in eigs.iter() {
            assert!(
                *lambda >= -1e-10 * max_eig,
                "negative eigenvalue {} (max {})",
                lambda,
                max_eig
            );
            if lambda.abs() < 1e-10 * max_eig {
                near_zero += 1;
            }
        }
        // Three rigid translations, one in-plane rotation, two tilts.
        assert_eq!(near_zero, 6, "expected exactly 6 rigid-body modes");
    }

    #[test]
    fn test_rigid_body_modes_produce_no_force() {
        let elem = test_element();
        let rule = GaussRule2d::tensor(4).unwrap();
        let k = elem.stiffness(&rule);
        let k_norm = k.norm();

        let (hx, hy) = (elem.lex() / 2.0, elem.ley() / 2.0);
        // Physical corner coordinates measured from the element center.
        let corners = [(-hx, -hy), (hx, -hy), (hx, hy), (-hx, hy)];

        let mut modes: Vec<PlateDisplacements> = Vec::new();
        // Translations in u, v, w.
        for d in 0..3 {
            let mut m = PlateDisplacements::zeros();
            for n in 0..PLATE_NODES {
                m[DOF_PER_NODE * n + d] = 1.0;
            }
            modes.push(m);
        }
        // In-plane rotation: u = -y, v = x.
        let mut rot = PlateDisplacements::zeros();
        for (n, &(x, y)) in corners.iter().enumerate() {
            rot[DOF_PER_NODE * n] = -y;
            rot[DOF_PER_NODE * n + 1] = x;
        }
        modes.push(rot);
        // Tilts: w = x (with w,x = 1) and w = y (with w,y = 1).
        let mut tilt_x = PlateDisplacements::zeros();
        let mut tilt_y = PlateDisplacements::zeros();
        for (n, &(x, y)) in corners.iter().enumerate() {
            tilt_x[DOF_PER_NODE * n + 2] = x;
            tilt_x[DOF_PER_NODE * n + 3] = 1.0;
            tilt_y[DOF_PER_NODE * n + 2] = y;
            tilt_y[DOF_PER_NODE * n + 4] = 1.0;
        }
        modes.push(tilt_x);
        modes.push(tilt_y);

        for mode in &modes {
            let f = k * mode;
            assert!(
                f.norm() <= 1e-10 * k_norm * mode.norm(),
                "rigid mode produced force norm {}",
                f.norm()
            );
        }
    }

    #[test]
    fn test_constant_membrane_strain_patch() {
        let elem = test_element();
        let rule = GaussRule2d::tensor(3).unwrap();
        let (hx, hy) = (elem.lex() / 2.0, elem.ley() / 2.0);
        let corners = [(-hx, -hy), (hx, -hy), (hx, hy), (-hx, hy)];

        // u = a·x, v = b·y gives ε_xx = a, ε_yy = b, γ_xy = 0.
        let (a, b) = (3e-4, -2e-4);
        let mut ue = PlateDisplacements::zeros();
        for (n, &(x, y)) in corners.iter().enumerate() {
            ue[DOF_PER_NODE * n] = a * x;
            ue[DOF_PER_NODE * n + 1] = b * y;
        }

        for (xi, eta, _) in rule.iter() {
            let field = elem.midplane_field(&ue, xi, eta);
            let expected = Vector6::new(a, b, 0.0, 0.0, 0.0, 0.0);
            assert_relative_eq!(field.0, expected, epsilon = 1e-12 * a.abs());
        }
    }

    #[test]
    fn test_constant_curvature_patch() {
        let elem = test_element();
        let rule = GaussRule2d::tensor(4).unwrap();
        let (hx, hy) = (elem.lex() / 2.0, elem.ley() / 2.0);
        let corners = [(-hx, -hy), (hx, -hy), (hx, hy), (-hx, hy)];

        // w = c·x²/2: w,x = c·x, w,xx = c, so κ_xx = -c everywhere.
        let c = 0.05;
        let mut ue = PlateDisplacements::zeros();
        for (n, &(x, _)) in corners.iter().enumerate() {
            ue[DOF_PER_NODE * n + 2] = 0.5 * c * x * x;
            ue[DOF_PER_NODE * n + 3] = c * x;
        }

        for (xi, eta, _) in rule.iter() {
            let field = elem.midplane_field(&ue, xi, eta);
            let expected = Vector6::new(0.0, 0.0, 0.0, -c, 0.0, 0.0);
            assert_relative_eq!(field.0, expected, epsilon = 1e-12 * c);
        }

        // Resultants follow the constitutive relation at every point.
        let expected_m = elem.abd() * Vector6::new(0.0, 0.0, 0.0, -c, 0.0, 0.0);
        for sr in elem.stress_resultants(&ue, &rule) {
            assert_relative_eq!(sr.0, expected_m, epsilon = 1e-10 * expected_m.norm());
        }
    }

    #[test]
    fn test_stiffness_deterministic() {
        let elem = test_element();
        let rule = GaussRule2d::tensor(4).unwrap();
        let k1 = elem.stiffness(&rule);
        let k2 = elem.stiffness(&rule);
        // Bit-identical, not merely close.
        assert_eq!(k1, k2);
    }

    #[test]
    fn test_global_dof_mapping() {
        let abd = single_ply_abd(1e9, 0.3, 0.01);
        let elem = PlateElement::new([7, 8, 13, 12], [42, 48, 78, 72], 0.1, 0.1, abd).unwrap();
        assert_eq!(elem.global_dof(0), 42);
        assert_eq!(elem.global_dof(5), 47);
        assert_eq!(elem.global_dof(6), 48);
        assert_eq!(elem.global_dof(23), 77);
    }

    #[test]
    fn test_gather_displacements() {
        let abd = single_ply_abd(1e9, 0.3, 0.01);
        let elem = PlateElement::new([0, 1, 3, 2], [0, 6, 18, 12], 0.1, 0.1, abd).unwrap();
        let u: Vec<f64> = (0..24).map(|i| i as f64).collect();
        let ue = elem.gather_displacements(&u);
        assert_relative_eq!(ue[0], 0.0);
        assert_relative_eq!(ue[11], 11.0);
        // Third element node owns global DOFs 18..24.
        assert_relative_eq!(ue[12], 18.0);
        assert_relative_eq!(ue[23], 17.0);
    }
}
