use crate::{
    backend::{EvaluationError, SurfaceError},
    basis::BasisError,
    descriptor::DescriptorError,
    molden::MoldenError,
    periodic_table::ElementError,
    wavefunction::WavefunctionError,
};

/// Any failure on the way from a calculation log to a descriptor.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to parse Molden data: {0}")]
    Molden(#[from] MoldenError),

    #[error("failed to build basis: {0}")]
    Basis(#[from] BasisError),

    #[error("unsupported wavefunction: {0}")]
    Wavefunction(#[from] WavefunctionError),

    #[error("element lookup failed: {0}")]
    Element(#[from] ElementError),

    #[error("surface sampling failed: {0}")]
    Surface(#[from] SurfaceError),

    #[error("orbital evaluation failed: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("invalid descriptor input: {0}")]
    Descriptor(#[from] DescriptorError),
}
