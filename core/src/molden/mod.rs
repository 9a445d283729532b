//! Reader for the Molden block that Q-Chem embeds in its output.
//!
//! Parsing is two phase: [`MoldenFile::parse`] runs the line state machine
//! and freezes the append-only records, after which [`MoldenFile::basis`]
//! and [`MoldenFile::orbital_set`] derive the immutable structures used for
//! evaluation.

mod parser;
mod section;

use std::io::{self, BufRead};

pub use section::{
    decompressed, molden_section, raw_lines, MoldenSection, RawLines, MOLDEN_END, MOLDEN_START,
};

use crate::{
    atom::Atom,
    basis::{Basis, BasisError, Shell},
    molecule::Molecule,
    wavefunction::{MolecularOrbital, OrbitalSet, WavefunctionError},
};

#[derive(Debug, thiserror::Error)]
pub enum MoldenError {
    #[error("failed to read Molden data: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    #[error("unknown shell type '{token}' (at line ~{line})")]
    UnknownShellType { line: usize, token: String },

    #[error("unknown molecular orbital field '{key}' (at line ~{line})")]
    UnknownOrbitalField { line: usize, key: String },

    #[error("molecular orbital ended without a '{field}' field (at line ~{line})")]
    MissingOrbitalField { line: usize, field: &'static str },

    #[error("invalid spin '{value}', expected Alpha or Beta (at line ~{line})")]
    InvalidSpin { line: usize, value: String },

    #[error("invalid number '{token}' (at line ~{line})")]
    InvalidNumber { line: usize, token: String },

    #[error("malformed Molden data: {details} (at line ~{line})")]
    Malformed { line: usize, details: String },
}

impl MoldenError {
    pub(crate) fn malformed(line: usize, details: impl Into<String>) -> Self {
        Self::Malformed {
            line,
            details: details.into(),
        }
    }
}

/// Atoms, shells and orbitals read from one Molden block. Frozen once
/// parsing finished.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoldenFile {
    pub(crate) atoms: Vec<Atom>,
    pub(crate) shells: Vec<Shell>,
    pub(crate) alpha: Vec<MolecularOrbital>,
    pub(crate) beta: Vec<MolecularOrbital>,
}

impl MoldenFile {
    /// Parses bare Molden lines.
    pub fn parse<I>(lines: I) -> Result<Self, MoldenError>
    where
        I: IntoIterator<Item = io::Result<String>>,
    {
        parser::MoldenParser::new(lines.into_iter()).run()
    }

    /// Parses the Molden block embedded in a calculation log, plain or
    /// gzip compressed.
    pub fn from_log<R: BufRead>(reader: R) -> Result<Self, MoldenError> {
        Self::parse(molden_section(decompressed(reader)?))
    }

    /// Parses a bare Molden file, plain or gzip compressed.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, MoldenError> {
        Self::parse(raw_lines(decompressed(reader)?))
    }

    pub fn parse_str(text: &str) -> Result<Self, MoldenError> {
        Self::parse(text.lines().map(|line| Ok(line.to_owned())))
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn shells(&self) -> &[Shell] {
        &self.shells
    }

    pub fn alpha_orbitals(&self) -> &[MolecularOrbital] {
        &self.alpha
    }

    pub fn beta_orbitals(&self) -> &[MolecularOrbital] {
        &self.beta
    }

    pub fn molecule(&self) -> Molecule {
        Molecule::new(self.atoms.clone())
    }

    pub fn basis(&self) -> Result<Basis, BasisError> {
        Basis::from_shells(&self.atoms, &self.shells)
    }

    pub fn orbital_set(&self) -> Result<OrbitalSet, WavefunctionError> {
        OrbitalSet::from_orbitals(&self.alpha, &self.beta)
    }
}
