use serde::Deserialize;

use crate::bounds::*;
use crate::errors::*;

/// Parameters of the fastq filter.
///
/// In YAML, each bound is either a single upper bound or a `[low, high]` pair:
/// ```yaml
/// gc_bounds: [40, 70]
/// length_bounds: 150
/// quality_threshold: 20
/// ```
/// Missing keys keep their defaults, which let every record through.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub gc_bounds: BoundsSpec,
    pub length_bounds: BoundsSpec,
    pub quality_threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            gc_bounds: BoundsSpec::Range(Bounds::new(0.0, 100.0)),
            length_bounds: BoundsSpec::Range(Bounds::new(0.0, 2f64.powi(32))),
            quality_threshold: 0.0,
        }
    }
}

impl FilterConfig {
    pub fn from_yaml(yaml: &[u8]) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_slice(yaml)
    }

    pub fn from_file(file: impl AsRef<str>) -> Result<Self> {
        let file = file.as_ref();
        let bytes = std::fs::read(file).map_err(|e| Error::FileIo {
            file: file.to_owned(),
            source: Box::new(e),
        })?;

        Self::from_yaml(&bytes).map_err(|e| Error::Config {
            file: file.to_owned(),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_for_missing_keys() {
        let c = FilterConfig::from_yaml(b"quality_threshold: 20").unwrap();
        assert_eq!(c.quality_threshold, 20.0);
        assert_eq!(c.gc_bounds.normalize(), Bounds::new(0.0, 100.0));
        assert_eq!(c.length_bounds.normalize(), Bounds::new(0.0, 4294967296.0));

        assert_eq!(FilterConfig::from_yaml(b"{}").unwrap(), FilterConfig::default());
    }

    #[test]
    fn scalar_and_pair_bounds() {
        let c = FilterConfig::from_yaml(b"gc_bounds: [40, 70.5]\nlength_bounds: 150\n").unwrap();
        assert_eq!(c.gc_bounds.normalize(), Bounds::new(40.0, 70.5));
        assert_eq!(c.length_bounds.normalize(), Bounds::new(0.0, 150.0));
    }

    #[test]
    fn rejects_non_numeric_values() {
        assert!(FilterConfig::from_yaml(b"gc_bounds: [low, high]").is_err());
        assert!(FilterConfig::from_yaml(b"length_bounds: short").is_err());
        assert!(FilterConfig::from_yaml(b"quality_threshold: high").is_err());
        assert!(FilterConfig::from_yaml(b"gc_bound: 50").is_err());
    }
}
