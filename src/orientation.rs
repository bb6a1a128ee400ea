//! Keuze van de onafhankelijke as en de bijbehorende asverwisseling.
//!
//! Alle bouwers rekenen in canonieke coördinaten `(u, v, w)`: `u` is de
//! onafhankelijke waarde, `v` de functiewaarde en `w` de diepte. Pas aan de
//! rand wordt met [`Orientation::to_world`] naar wereldcoördinaten vertaald.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geom::{Point3, Vec3};

/// Welke as voor beide formules als onafhankelijke variabele dient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// `y = f(x)`
    #[default]
    X,
    /// `x = f(y)`
    Y,
}

impl Orientation {
    /// De letter die in een formule de invoerwaarde voorstelt.
    #[must_use]
    pub const fn variable(self) -> char {
        match self {
            Self::X => 'x',
            Self::Y => 'y',
        }
    }

    /// De andere oriëntatie.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::X => Self::Y,
            Self::Y => Self::X,
        }
    }

    /// Eenheidsvector langs de onafhankelijke as in wereldcoördinaten.
    #[must_use]
    pub const fn independent_axis(self) -> Vec3 {
        match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
        }
    }

    /// Vertaalt canonieke `(u, v, w)` naar wereld `(x, y, z)`.
    ///
    /// De afbeelding is zijn eigen inverse.
    #[must_use]
    pub const fn to_world(self, u: f64, v: f64, w: f64) -> Point3 {
        match self {
            Self::X => Point3::new(u, v, w),
            Self::Y => Point3::new(v, u, w),
        }
    }

    /// Zelfde asverwisseling als [`Self::to_world`], maar voor verschilvectoren.
    #[must_use]
    pub const fn offset_to_world(self, u: f64, v: f64, w: f64) -> Vec3 {
        let p = self.to_world(u, v, w);
        Vec3::new(p.x, p.y, p.z)
    }

    /// Haalt de canonieke `(u, v)` uit een 2D-wereldpunt.
    #[must_use]
    pub const fn to_canonical_2d(self, point: [f64; 2]) -> (f64, f64) {
        match self {
            Self::X => (point[0], point[1]),
            Self::Y => (point[1], point[0]),
        }
    }

    /// De coördinaat langs de onafhankelijke as van een wereldpunt.
    #[must_use]
    pub const fn independent_of(self, point: Point3) -> f64 {
        match self {
            Self::X => point.x,
            Self::Y => point.y,
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.variable())
    }
}

/// Fout bij het inlezen van een oriëntatie uit tekst.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("onbekende oriëntatie `{0}` (verwacht `x` of `y`)")]
pub struct ParseOrientationError(pub String);

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        match source.trim() {
            "x" | "X" => Ok(Self::X),
            "y" | "Y" => Ok(Self::Y),
            other => Err(ParseOrientationError(other.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_is_its_own_inverse() {
        for orientation in [Orientation::X, Orientation::Y] {
            let world = orientation.to_world(1.0, 2.0, 3.0);
            let back = orientation.to_world(world.x, world.y, world.z);
            assert_eq!(back, Point3::new(1.0, 2.0, 3.0));
        }
    }

    #[test]
    fn y_orientation_swaps_first_two_axes() {
        assert_eq!(Orientation::Y.to_world(1.0, 2.0, 3.0), Point3::new(2.0, 1.0, 3.0));
        assert_eq!(Orientation::Y.independent_axis(), Vec3::Y);
        assert_eq!(Orientation::Y.independent_of(Point3::new(7.0, 8.0, 9.0)), 8.0);
    }

    #[test]
    fn parses_letters_and_rejects_others() {
        assert_eq!("x".parse::<Orientation>(), Ok(Orientation::X));
        assert_eq!(" Y ".parse::<Orientation>(), Ok(Orientation::Y));
        assert!("z".parse::<Orientation>().is_err());
        assert_eq!(Orientation::X.toggled(), Orientation::Y);
        assert_eq!(Orientation::Y.to_string(), "y");
    }
}
