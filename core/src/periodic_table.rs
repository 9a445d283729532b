use serde::{Deserialize, Serialize};

/// Lookup failures against the periodic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ElementError {
    #[error("no periodic table entry for atomic number {0}")]
    UnknownAtomicNumber(u32),
}

macro_rules! elements {
    ($($symbol:ident = $number:literal),* $(,)?) => {
        /// A chemical element, discriminated by its atomic number.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(u32)]
        pub enum ElementType {
            $($symbol = $number),*
        }

        impl ElementType {
            /// The element symbol as printed in structure files, e.g. `"Cl"`.
            pub const fn symbol(&self) -> &'static str {
                match self {
                    $(Self::$symbol => stringify!($symbol)),*
                }
            }

            pub const fn atomic_number(&self) -> u32 {
                *self as u32
            }
        }

        impl TryFrom<u32> for ElementType {
            type Error = ElementError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                match value {
                    $($number => Ok(Self::$symbol),)*
                    other => Err(ElementError::UnknownAtomicNumber(other)),
                }
            }
        }
    };
}

elements! {
    H = 1, He = 2, Li = 3, Be = 4, B = 5, C = 6, N = 7, O = 8, F = 9, Ne = 10,
    Na = 11, Mg = 12, Al = 13, Si = 14, P = 15, S = 16, Cl = 17, Ar = 18, K = 19,
    Ca = 20, Sc = 21, Ti = 22, V = 23, Cr = 24, Mn = 25, Fe = 26, Co = 27, Ni = 28,
    Cu = 29, Zn = 30, Ga = 31, Ge = 32, As = 33, Se = 34, Br = 35, Kr = 36, Rb = 37,
    Sr = 38, Y = 39, Zr = 40, Nb = 41, Mo = 42, Tc = 43, Ru = 44, Rh = 45, Pd = 46,
    Ag = 47, Cd = 48, In = 49, Sn = 50, Sb = 51, Te = 52, I = 53, Xe = 54, Cs = 55,
    Ba = 56, La = 57, Ce = 58, Pr = 59, Nd = 60, Pm = 61, Sm = 62, Eu = 63, Gd = 64,
    Tb = 65, Dy = 66, Ho = 67, Er = 68, Tm = 69, Yb = 70, Lu = 71, Hf = 72, Ta = 73,
    W = 74, Re = 75, Os = 76, Ir = 77, Pt = 78, Au = 79, Hg = 80, Tl = 81, Pb = 82,
    Bi = 83, Po = 84, At = 85, Rn = 86, Fr = 87, Ra = 88, Ac = 89, Th = 90, Pa = 91,
    U = 92, Np = 93, Pu = 94, Am = 95, Cm = 96, Bk = 97, Cf = 98, Es = 99, Fm = 100,
    Md = 101, No = 102, Lr = 103, Rf = 104, Db = 105, Sg = 106, Bh = 107, Hs = 108,
    Mt = 109, Ds = 110, Rg = 111, Cn = 112, Nh = 113, Fl = 114, Mc = 115, Lv = 116,
    Ts = 117, Og = 118,
}

impl ElementType {
    /// Van der Waals radius in Ångström (Bondi, with Mantina et al. for the
    /// main-group gaps). `None` for elements without a tabulated value.
    pub fn vdw_radius(&self) -> Option<f64> {
        use ElementType::*;

        let radius = match self {
            H => 1.20,
            He => 1.40,
            Li => 1.82,
            Be => 1.53,
            B => 1.92,
            C => 1.70,
            N => 1.55,
            O => 1.52,
            F => 1.47,
            Ne => 1.54,
            Na => 2.27,
            Mg => 1.73,
            Al => 1.84,
            Si => 2.10,
            P => 1.80,
            S => 1.80,
            Cl => 1.75,
            Ar => 1.88,
            K => 2.75,
            Ca => 2.31,
            Ni => 1.63,
            Cu => 1.40,
            Zn => 1.39,
            Ga => 1.87,
            Ge => 2.11,
            As => 1.85,
            Se => 1.90,
            Br => 1.85,
            Kr => 2.02,
            Rb => 3.03,
            Sr => 2.49,
            Pd => 1.63,
            Ag => 1.72,
            Cd => 1.58,
            In => 1.93,
            Sn => 2.17,
            Sb => 2.06,
            Te => 2.06,
            I => 1.98,
            Xe => 2.16,
            Cs => 3.43,
            Ba => 2.68,
            Pt => 1.75,
            Au => 1.66,
            Hg => 1.55,
            Tl => 1.96,
            Pb => 2.02,
            Bi => 2.07,
            Po => 1.97,
            At => 2.02,
            Rn => 2.20,
            Fr => 3.48,
            Ra => 2.83,
            U => 1.86,
            _ => return None,
        };

        Some(radius)
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::{ElementError, ElementType};

    #[test]
    fn lookup_by_atomic_number() {
        assert_eq!(ElementType::try_from(1), Ok(ElementType::H));
        assert_eq!(ElementType::try_from(17).map(|e| e.symbol()), Ok("Cl"));
        assert_eq!(ElementType::try_from(118), Ok(ElementType::Og));
        assert_eq!(ElementType::Fe.atomic_number(), 26);
    }

    #[test]
    fn unknown_atomic_numbers_fail() {
        assert_eq!(
            ElementType::try_from(0),
            Err(ElementError::UnknownAtomicNumber(0))
        );
        assert_eq!(
            ElementType::try_from(119),
            Err(ElementError::UnknownAtomicNumber(119))
        );
    }

    #[test]
    fn common_organic_elements_have_radii() {
        for element in [
            ElementType::H,
            ElementType::C,
            ElementType::N,
            ElementType::O,
            ElementType::S,
            ElementType::Cl,
        ] {
            assert!(element.vdw_radius().is_some(), "{element} has no radius");
        }
        assert_eq!(ElementType::Og.vdw_radius(), None);
    }
}
