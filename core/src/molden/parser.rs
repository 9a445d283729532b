use std::{io, str::FromStr};

use nalgebra::Vector3;

use crate::{
    atom::{Atom, BOHR_TO_ANGSTROM},
    basis::{Shell, ShellType},
    wavefunction::{MolecularOrbital, Spin},
};

use super::{MoldenError, MoldenFile};

/// Section of the Molden block the parser is currently in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Section {
    Idle,
    Atoms,
    Gto,
    Mo,
}

impl Section {
    /// Section selected by a lower-cased line, or `None` if the line is not a
    /// section tag. Unknown tags select [`Section::Idle`].
    fn from_tag(lkey: &str) -> Option<Self> {
        if lkey.contains("[atoms]") {
            Some(Self::Atoms)
        } else if lkey.contains("[gto]") {
            Some(Self::Gto)
        } else if lkey.contains("[mo]") {
            Some(Self::Mo)
        } else if is_section_tag(lkey) {
            Some(Self::Idle)
        } else {
            None
        }
    }
}

fn is_section_tag(line: &str) -> bool {
    line.contains('[')
}

pub(super) struct MoldenParser<I> {
    lines: I,
    /// one line of lookahead handed back by a block handler
    pending: Option<String>,
    line_number: usize,
    section: Section,
    /// factor taking positions in the `[Atoms]` unit to Bohr
    unit_scale: f64,
    records: MoldenFile,
}

impl<I> MoldenParser<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub(super) fn new(lines: I) -> Self {
        Self {
            lines,
            pending: None,
            line_number: 0,
            section: Section::Idle,
            unit_scale: 1.0,
            records: MoldenFile::default(),
        }
    }

    pub(super) fn run(mut self) -> Result<MoldenFile, MoldenError> {
        while let Some(line) = self.next_line()? {
            self.process_line(&line)?;
        }

        let records = self.records;
        log::info!(
            "parsed {} atoms, {} shells, {} alpha and {} beta orbitals",
            records.atoms.len(),
            records.shells.len(),
            records.alpha.len(),
            records.beta.len()
        );
        if records.atoms.is_empty() {
            log::warn!("Molden block contained no atoms");
        }

        Ok(records)
    }

    fn next_line(&mut self) -> Result<Option<String>, MoldenError> {
        if let Some(line) = self.pending.take() {
            self.line_number += 1;
            return Ok(Some(line));
        }

        match self.lines.next().transpose()? {
            Some(line) => {
                self.line_number += 1;
                Ok(Some(line))
            }
            None => Ok(None),
        }
    }

    fn push_back(&mut self, line: String) {
        debug_assert!(self.pending.is_none(), "only one line of lookahead");
        self.line_number -= 1;
        self.pending = Some(line);
    }

    fn process_line(&mut self, line: &str) -> Result<(), MoldenError> {
        let key = line.trim();
        if key.is_empty() {
            return Ok(());
        }

        let lkey = key.to_lowercase();
        if let Some(section) = Section::from_tag(&lkey) {
            self.enter(section, &lkey);
            return Ok(());
        }

        log::trace!("{:?} line {}: {key}", self.section, self.line_number);
        match self.section {
            Section::Idle => Ok(()),
            Section::Atoms => self.atom_line(key),
            Section::Gto => self.gto_block(key),
            Section::Mo => self.orbital(key.to_owned()),
        }
    }

    fn enter(&mut self, section: Section, lkey: &str) {
        if section == Section::Atoms {
            self.unit_scale = if lkey.contains("angs") {
                1.0 / BOHR_TO_ANGSTROM
            } else {
                1.0
            };
        }

        log::debug!("line {}: entering {section:?} section", self.line_number);
        self.section = section;
    }

    fn atom_line(&mut self, key: &str) -> Result<(), MoldenError> {
        let fields = key.split_whitespace().collect::<Vec<_>>();
        let &[_label, _index, atomic_number, x, y, z, ..] = fields.as_slice() else {
            log::warn!(
                "line {}: skipping atom line with {} fields",
                self.line_number,
                fields.len()
            );
            return Ok(());
        };

        let atomic_number = self.parse_integer::<u32>(atomic_number)?;
        let position = Vector3::new(
            self.parse_float(x)?,
            self.parse_float(y)?,
            self.parse_float(z)?,
        ) * self.unit_scale;

        self.records
            .atoms
            .push(Atom::new(atomic_number, position));
        Ok(())
    }

    /// Consumes one atom block of a `[GTO]` section: the atom header `key`,
    /// then shells until a blank line.
    fn gto_block(&mut self, key: &str) -> Result<(), MoldenError> {
        let atom = key
            .split_whitespace()
            .next()
            .map(|token| self.parse_integer::<usize>(token))
            .transpose()?
            .unwrap_or_default();

        while let Some(line) = self.next_line()? {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            if is_section_tag(trimmed) {
                self.push_back(line);
                break;
            }

            let fields = trimmed.split_whitespace().collect::<Vec<_>>();
            let token = fields[0];
            let shell_type =
                ShellType::classify(token).ok_or_else(|| MoldenError::UnknownShellType {
                    line: self.line_number,
                    token: token.to_owned(),
                })?;
            let n_primitives = match fields.get(1) {
                Some(count) => self.parse_integer::<usize>(count)?,
                None => {
                    return Err(MoldenError::malformed(
                        self.line_number,
                        "shell line without a primitive count",
                    ))
                }
            };

            let (mut first, mut second) = match shell_type {
                ShellType::Sp => (
                    Shell::new(ShellType::S, atom),
                    Some(Shell::new(ShellType::P, atom)),
                ),
                other => (Shell::new(other, atom), None),
            };

            for _ in 0..n_primitives {
                let Some(line) = self.next_line()? else {
                    return Err(MoldenError::malformed(
                        self.line_number,
                        format!("{shell_type} shell ended before its {n_primitives} primitives"),
                    ));
                };

                let fields = line.split_whitespace().collect::<Vec<_>>();
                let (exponent, coefficient) = match fields.as_slice() {
                    [exponent, coefficient, ..] => {
                        (self.parse_float(exponent)?, self.parse_float(coefficient)?)
                    }
                    _ => {
                        return Err(MoldenError::malformed(
                            self.line_number,
                            "primitive line needs an exponent and a coefficient",
                        ))
                    }
                };

                first.push(exponent, coefficient);
                if let (Some(shell), Some(coefficient)) = (second.as_mut(), fields.get(2)) {
                    shell.push(exponent, self.parse_float(coefficient)?);
                }
            }

            self.records.shells.push(first);
            self.records.shells.extend(second);
        }

        Ok(())
    }

    /// Consumes one molecular orbital: its `key=value` header starting at
    /// `line`, then its coefficient block.
    fn orbital(&mut self, mut line: String) -> Result<(), MoldenError> {
        let mut energy = None;
        let mut spin = None;
        let mut occupation = None;

        let mut current = loop {
            let header = line
                .trim()
                .split_once('=')
                .map(|(key, value)| (key.trim().to_lowercase(), value.trim().to_owned()));
            let Some((key, value)) = header else {
                break Some(line);
            };

            match key.as_str() {
                "ene" => energy = Some(self.parse_float(&value)?),
                "spin" => {
                    spin = Some(Spin::parse(&value).ok_or_else(|| MoldenError::InvalidSpin {
                        line: self.line_number,
                        value: value.clone(),
                    })?)
                }
                "sym" => {}
                "occup" => occupation = Some(self.parse_float(&value)?),
                _ => {
                    return Err(MoldenError::UnknownOrbitalField {
                        line: self.line_number,
                        key,
                    })
                }
            }

            match self.next_line()? {
                Some(next) => line = next,
                None => break None,
            }
        };

        let mut coefficients = Vec::new();
        while let Some(line) = current.take() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                break;
            }
            if trimmed.contains('=') || is_section_tag(trimmed) {
                self.push_back(line);
                break;
            }

            match trimmed.split_whitespace().nth(1) {
                Some(value) => coefficients.push(self.parse_float(value)?),
                None => {
                    return Err(MoldenError::malformed(
                        self.line_number,
                        "coefficient line needs an index and a value",
                    ))
                }
            }

            current = self.next_line()?;
        }

        let missing = |field| MoldenError::MissingOrbitalField {
            line: self.line_number,
            field,
        };
        let energy = energy.ok_or_else(|| missing("Ene"))?;
        let spin = spin.ok_or_else(|| missing("Spin"))?;
        let occupation = occupation.ok_or_else(|| missing("Occup"))?;

        let orbital = MolecularOrbital {
            spin,
            energy,
            occupation,
            coefficients,
        };
        match spin {
            Spin::Alpha => self.records.alpha.push(orbital),
            Spin::Beta => self.records.beta.push(orbital),
        }

        Ok(())
    }

    fn parse_integer<T: FromStr>(&self, token: &str) -> Result<T, MoldenError> {
        token.parse().map_err(|_| MoldenError::InvalidNumber {
            line: self.line_number,
            token: token.to_owned(),
        })
    }

    /// Parses a real number, accepting Fortran `D` exponents.
    fn parse_float(&self, token: &str) -> Result<f64, MoldenError> {
        token
            .replace(['D', 'd'], "E")
            .parse()
            .map_err(|_| MoldenError::InvalidNumber {
                line: self.line_number,
                token: token.to_owned(),
            })
    }
}
