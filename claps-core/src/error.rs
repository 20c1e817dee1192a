//! Error types for CLAPS operations.

use thiserror::Error;

/// Result type alias using CLAPS Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during CLAPS operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Gauss-Legendre rule requested for an untabulated order.
    #[error("unsupported quadrature order: {0} (supported: 2..=10)")]
    UnsupportedQuadratureOrder(usize),

    /// Element geometry with a zero or negative edge length.
    #[error("degenerate element geometry: lex = {lex}, ley = {ley}")]
    DegenerateElement { lex: f64, ley: f64 },

    /// Assembly errors.
    #[error("assembly error: {0}")]
    Assembly(String),

    /// Solver errors.
    #[error("solver error: {0}")]
    Solver(String),

    /// Matrix singularity or conditioning issues.
    #[error("singular matrix: {0}")]
    SingularMatrix(String),
}
