//! SDK version parsing and ordering.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::ScoutError;

/// A dotted numeric SDK version such as `10.12` or `11.3.1`.
///
/// The raw text is preserved so a selected version can be re-used verbatim
/// as part of an SDK identifier (listings identify SDKs by the exact string
/// they print). Comparison is purely numeric, with missing trailing
/// components treated as zero, so `10.12` equals `10.12.0`.
#[derive(Debug, Clone)]
pub struct SdkVersion {
    components: Vec<u32>,
    raw: String,
}

impl SdkVersion {
    /// The numeric components, most significant first.
    pub fn components(&self) -> &[u32] {
        &self.components
    }

    /// The version exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for SdkVersion {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ScoutError::InvalidVersion { input: s.into() });
        }
        let components = trimmed
            .split('.')
            .map(|part| {
                part.parse::<u32>()
                    .map_err(|_| ScoutError::InvalidVersion { input: s.into() })
            })
            .collect::<Result<Vec<u32>, ScoutError>>()?;
        Ok(Self {
            components,
            raw: trimmed.to_string(),
        })
    }
}

impl fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Ord for SdkVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for SdkVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SdkVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SdkVersion {}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> SdkVersion {
        s.parse().unwrap()
    }

    #[test]
    fn parses_dotted_numeric_versions() {
        assert_eq!(v("10.12").components(), &[10, 12]);
        assert_eq!(v("11.3.1").components(), &[11, 3, 1]);
        assert_eq!(v("7").components(), &[7]);
    }

    #[test]
    fn display_preserves_raw_form() {
        assert_eq!(v("10.12.0").to_string(), "10.12.0");
        assert_eq!(v("10.12").to_string(), "10.12");
    }

    #[test]
    fn rejects_empty_and_non_numeric_input() {
        assert!("".parse::<SdkVersion>().is_err());
        assert!("abc".parse::<SdkVersion>().is_err());
        assert!("10.".parse::<SdkVersion>().is_err());
        assert!("10.x.1".parse::<SdkVersion>().is_err());
        assert!("10.-1".parse::<SdkVersion>().is_err());
    }

    #[test]
    fn invalid_input_error_carries_the_input() {
        let err = "10.beta".parse::<SdkVersion>().unwrap_err();
        assert!(err.to_string().contains("10.beta"));
    }

    #[test]
    fn ordering_is_numeric_not_lexicographic() {
        assert!(v("10.9") < v("10.12"));
        assert!(v("2.0") < v("10.0"));
        assert!(v("10.12.1") > v("10.12"));
    }

    #[test]
    fn missing_components_compare_as_zero() {
        assert_eq!(v("10.12"), v("10.12.0"));
        assert_eq!(v("10.12"), v("10.12.0.0"));
        assert!(v("10.12") < v("10.12.1"));
    }

    #[test]
    fn equal_versions_with_different_raw_forms() {
        // Equality ignores the preserved text.
        assert_eq!(v("1.0"), v("1.0.0"));
        assert_ne!(v("1.0").as_str(), v("1.0.0").as_str());
    }

    #[test]
    fn min_of_candidates_is_the_smallest() {
        let best = [v("10.14"), v("10.12"), v("10.13")].into_iter().min();
        assert_eq!(best, Some(v("10.12")));
    }
}
