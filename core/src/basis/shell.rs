use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Angular type of a shell as named in a `[GTO]` block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShellType {
    S,
    P,
    D,
    F,
    /// Combined s and p shell sharing exponents. The parser splits these into
    /// separate [`ShellType::S`] and [`ShellType::P`] records.
    Sp,
}

impl ShellType {
    /// Classifies a shell token by substring, checking `sp` before the lone
    /// letters so that `"sp"` never reads as an s shell.
    pub fn classify(token: &str) -> Option<Self> {
        let token = token.to_lowercase();

        [
            ("sp", Self::Sp),
            ("s", Self::S),
            ("p", Self::P),
            ("d", Self::D),
            ("f", Self::F),
        ]
        .into_iter()
        .find_map(|(tag, shell_type)| token.contains(tag).then_some(shell_type))
    }

    /// Angular momentum code used by basis evaluation. Combined shells are
    /// coded negative.
    pub const fn angular_code(&self) -> i32 {
        match self {
            Self::S => 0,
            Self::P => 1,
            Self::D => 2,
            Self::F => 3,
            Self::Sp => -1,
        }
    }

    /// Number of Cartesian basis functions this shell expands into.
    pub const fn n_functions(&self) -> usize {
        match self {
            Self::S => 1,
            Self::P => 3,
            Self::D => 6,
            Self::F => 10,
            Self::Sp => 4,
        }
    }

    /// Cartesian (i, j, k) exponents of every function in the shell, in the
    /// order Molden lists their coefficients.
    pub fn cartesian_components(&self) -> &'static [(i32, i32, i32)] {
        match self {
            Self::S => &[(0, 0, 0)],
            Self::P => &[(1, 0, 0), (0, 1, 0), (0, 0, 1)],
            Self::D => &[
                (2, 0, 0),
                (0, 2, 0),
                (0, 0, 2),
                (1, 1, 0),
                (1, 0, 1),
                (0, 1, 1),
            ],
            Self::F => &[
                (3, 0, 0),
                (0, 3, 0),
                (0, 0, 3),
                (1, 2, 0),
                (2, 1, 0),
                (2, 0, 1),
                (1, 0, 2),
                (0, 1, 2),
                (0, 2, 1),
                (1, 1, 1),
            ],
            Self::Sp => &[(0, 0, 0), (1, 0, 0), (0, 1, 0), (0, 0, 1)],
        }
    }
}

impl std::fmt::Display for ShellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::S => "S",
            Self::P => "P",
            Self::D => "D",
            Self::F => "F",
            Self::Sp => "SP",
        };
        f.write_str(name)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub exponent: f64,
    pub coefficient: f64,
}

/// One shell record from a `[GTO]` block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shell {
    pub(crate) shell_type: ShellType,
    /// 1-based index of the owning atom, as written in the source
    pub(crate) atom: usize,
    pub(crate) primitives: SmallVec<[Primitive; 6]>,
}

impl Shell {
    pub fn new(shell_type: ShellType, atom: usize) -> Self {
        Self {
            shell_type,
            atom,
            primitives: SmallVec::new(),
        }
    }

    pub fn with_primitives(
        shell_type: ShellType,
        atom: usize,
        primitives: impl IntoIterator<Item = Primitive>,
    ) -> Self {
        Self {
            shell_type,
            atom,
            primitives: primitives.into_iter().collect(),
        }
    }

    pub fn shell_type(&self) -> ShellType {
        self.shell_type
    }

    pub fn atom(&self) -> usize {
        self.atom
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn n_primitives(&self) -> usize {
        self.primitives.len()
    }

    pub(crate) fn push(&mut self, exponent: f64, coefficient: f64) {
        self.primitives.push(Primitive {
            exponent,
            coefficient,
        });
    }
}
