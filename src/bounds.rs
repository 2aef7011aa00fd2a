use serde::Deserialize;

use std::str::FromStr;

use crate::errors::*;

/// Inclusive numeric range `[low, high]` used by the threshold filters.
///
/// `low <= high` is not enforced. An inverted range simply matches nothing.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "(f64, f64)")]
pub struct Bounds {
    pub low: f64,
    pub high: f64,
}

impl Bounds {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, x: f64) -> bool {
        self.low <= x && x <= self.high
    }
}

impl From<(f64, f64)> for Bounds {
    fn from((low, high): (f64, f64)) -> Self {
        Self { low, high }
    }
}

/// Bounds as supplied by a caller: either a full range or a single upper bound.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BoundsSpec {
    Range(Bounds),
    Upper(f64),
}

impl BoundsSpec {
    /// A scalar `x` becomes `[0, x]`. A range is returned as is.
    pub fn normalize(self) -> Bounds {
        match self {
            BoundsSpec::Range(b) => b,
            BoundsSpec::Upper(high) => Bounds { low: 0.0, high },
        }
    }
}

impl From<f64> for BoundsSpec {
    fn from(high: f64) -> Self {
        BoundsSpec::Upper(high)
    }
}

impl From<(f64, f64)> for BoundsSpec {
    fn from(b: (f64, f64)) -> Self {
        BoundsSpec::Range(b.into())
    }
}

impl From<Bounds> for BoundsSpec {
    fn from(b: Bounds) -> Self {
        BoundsSpec::Range(b)
    }
}

/// Parses `"x"` as an upper bound and `"low,high"` as a range.
impl FromStr for BoundsSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let num = |part: &str| {
            part.trim().parse::<f64>().map_err(|_| Error::InvalidBounds {
                string: s.to_owned(),
                reason: "bounds must be numbers",
            })
        };

        let parts = s.split(',').collect::<Vec<_>>();

        match parts[..] {
            [high] => Ok(BoundsSpec::Upper(num(high)?)),
            [low, high] => Ok(BoundsSpec::Range(Bounds::new(num(low)?, num(high)?))),
            _ => Err(Error::InvalidBounds {
                string: s.to_owned(),
                reason: "expected one number or two comma-separated numbers",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_becomes_upper_bound() {
        for x in [0.0, 1.5, 60.0, -3.0] {
            assert_eq!(BoundsSpec::from(x).normalize(), Bounds::new(0.0, x));
        }
    }

    #[test]
    fn range_is_identity() {
        let b = Bounds::new(40.0, 70.0);
        assert_eq!(BoundsSpec::from(b).normalize(), b);
        // inverted ranges pass through untouched
        let b = Bounds::new(10.0, 5.0);
        assert_eq!(BoundsSpec::from(b).normalize(), b);
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let b = Bounds::new(10.0, 5.0);
        assert!(!b.contains(5.0));
        assert!(!b.contains(7.0));
        assert!(!b.contains(10.0));
    }

    #[test]
    fn contains_is_inclusive() {
        let b = Bounds::new(1.0, 2.0);
        assert!(b.contains(1.0));
        assert!(b.contains(2.0));
        assert!(!b.contains(2.001));
    }

    #[test]
    fn parse_from_str() {
        assert_eq!("60".parse::<BoundsSpec>().unwrap(), BoundsSpec::Upper(60.0));
        assert_eq!(
            "40, 70".parse::<BoundsSpec>().unwrap(),
            BoundsSpec::Range(Bounds::new(40.0, 70.0))
        );
        assert!(matches!(
            "low,high".parse::<BoundsSpec>(),
            Err(Error::InvalidBounds { .. })
        ));
        assert!(matches!(
            "1,2,3".parse::<BoundsSpec>(),
            Err(Error::InvalidBounds { .. })
        ));
        assert!("short".parse::<BoundsSpec>().is_err());
    }

    #[test]
    fn deserialize_scalar_or_pair() {
        let b: BoundsSpec = serde_yaml::from_str("60").unwrap();
        assert_eq!(b.normalize(), Bounds::new(0.0, 60.0));

        let b: BoundsSpec = serde_yaml::from_str("[40, 70]").unwrap();
        assert_eq!(b.normalize(), Bounds::new(40.0, 70.0));

        assert!(serde_yaml::from_str::<BoundsSpec>("[low, high]").is_err());
        assert!(serde_yaml::from_str::<BoundsSpec>("high").is_err());
    }
}
