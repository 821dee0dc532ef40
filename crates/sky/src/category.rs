//! Size and Thickness categories and the fixed tables they map through.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::SkyError;

/// Discriminant values index `SIZE_TABLE` — do not reorder.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Deserialize)]
#[serde(from = "String")]
pub enum Size {
    Xs = 0,
    Sm = 1,
    #[default]
    Md = 2,
    Lg = 3,
    Xl = 4,
}

/// Pixel extent (clouds are square) and blur radius for one size row.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct SizeSpec {
    pub extent_px: f64,
    pub blur_px: f64,
}

const SIZE_TABLE: [SizeSpec; 5] = [
    SizeSpec { extent_px: 120.0, blur_px: 50.0 },
    SizeSpec { extent_px: 170.0, blur_px: 70.0 },
    SizeSpec { extent_px: 220.0, blur_px: 85.0 },
    SizeSpec { extent_px: 280.0, blur_px: 100.0 },
    SizeSpec { extent_px: 340.0, blur_px: 120.0 },
];

impl Size {
    pub const ALL: [Size; 5] = [Self::Xs, Self::Sm, Self::Md, Self::Lg, Self::Xl];

    #[must_use]
    pub fn spec(self) -> SizeSpec {
        SIZE_TABLE[self as usize]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Xs => "xs",
            Self::Sm => "sm",
            Self::Md => "md",
            Self::Lg => "lg",
            Self::Xl => "xl",
        }
    }

    /// Lenient lookup: anything unrecognised becomes `Md`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|err| {
            log::warn!("{err}, using {}", Self::default());
            Self::default()
        })
    }
}

impl FromStr for Size {
    type Err = SkyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xs" => Ok(Self::Xs),
            "sm" | "small" => Ok(Self::Sm),
            "md" | "medium" => Ok(Self::Md),
            "lg" | "large" => Ok(Self::Lg),
            "xl" => Ok(Self::Xl),
            _ => Err(SkyError::UnknownCategory {
                kind: "size",
                name: s.to_owned(),
            }),
        }
    }
}

impl From<String> for Size {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How dense a cloud looks. Discriminants index `OPACITY_TABLE`.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Deserialize)]
#[serde(from = "String")]
pub enum Thickness {
    Thinnest = 0,
    Thinner = 1,
    Thin = 2,
    #[default]
    Thick = 3,
    Thicker = 4,
    Thickest = 5,
}

const OPACITY_TABLE: [f64; 6] = [0.35, 0.46, 0.57, 0.68, 0.79, 0.95];

impl Thickness {
    pub const ALL: [Thickness; 6] = [
        Self::Thinnest,
        Self::Thinner,
        Self::Thin,
        Self::Thick,
        Self::Thicker,
        Self::Thickest,
    ];

    #[must_use]
    pub fn opacity(self) -> f64 {
        OPACITY_TABLE[self as usize]
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Thinnest => "thinnest",
            Self::Thinner => "thinner",
            Self::Thin => "thin",
            Self::Thick => "thick",
            Self::Thicker => "thicker",
            Self::Thickest => "thickest",
        }
    }

    /// Lenient lookup: anything unrecognised becomes `Thick`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|err| {
            log::warn!("{err}, using {}", Self::default());
            Self::default()
        })
    }
}

impl FromStr for Thickness {
    type Err = SkyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.name() == lowered)
            .ok_or_else(|| SkyError::UnknownCategory {
                kind: "thickness",
                name: s.to_owned(),
            })
    }
}

impl From<String> for Thickness {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for Thickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn size_table_rows() {
        assert_eq!(Size::Xs.spec(), SizeSpec { extent_px: 120.0, blur_px: 50.0 });
        assert_eq!(Size::Sm.spec(), SizeSpec { extent_px: 170.0, blur_px: 70.0 });
        assert_eq!(Size::Md.spec(), SizeSpec { extent_px: 220.0, blur_px: 85.0 });
        assert_eq!(Size::Lg.spec(), SizeSpec { extent_px: 280.0, blur_px: 100.0 });
        assert_eq!(Size::Xl.spec(), SizeSpec { extent_px: 340.0, blur_px: 120.0 });
    }

    #[test]
    fn opacity_table_rows() {
        let expected = [0.35, 0.46, 0.57, 0.68, 0.79, 0.95];
        for (thickness, opacity) in Thickness::ALL.into_iter().zip(expected) {
            assert!((thickness.opacity() - opacity).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn defaults_are_md_and_thick() {
        assert_eq!(Size::default(), Size::Md);
        assert_eq!(Thickness::default(), Thickness::Thick);
    }

    #[test]
    fn names_parse_case_insensitively() {
        assert_eq!("XL".parse::<Size>().unwrap(), Size::Xl);
        assert_eq!(" medium ".parse::<Size>().unwrap(), Size::Md);
        assert_eq!("Thickest".parse::<Thickness>().unwrap(), Thickness::Thickest);
    }

    #[test]
    fn strict_parse_reports_unknown_category() {
        let err = "huge".parse::<Size>().unwrap_err();
        assert!(matches!(err, SkyError::UnknownCategory { kind: "size", .. }));
        assert_eq!(err.to_string(), "unknown size category: \"huge\"");

        let err = "foggy".parse::<Thickness>().unwrap_err();
        assert!(matches!(err, SkyError::UnknownCategory { kind: "thickness", .. }));
    }

    #[test]
    fn display_round_trips_through_name() {
        for size in Size::ALL {
            assert_eq!(Size::from_name(&size.to_string()), size);
        }
        for thickness in Thickness::ALL {
            assert_eq!(Thickness::from_name(&thickness.to_string()), thickness);
        }
    }

    proptest! {
        #[test]
        fn prop_unknown_size_falls_back_to_md(name in "[a-z]{3,12}") {
            prop_assume!(name.parse::<Size>().is_err());
            prop_assert_eq!(Size::from_name(&name).spec(), Size::Md.spec());
        }

        #[test]
        fn prop_unknown_thickness_falls_back_to_thick(name in "[a-z]{1,12}") {
            prop_assume!(name.parse::<Thickness>().is_err());
            prop_assert_eq!(Thickness::from_name(&name), Thickness::Thick);
        }
    }
}
