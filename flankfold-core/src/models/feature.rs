use std::fmt::{self, Display};
use std::str::FromStr;

use crate::errors::FlankFoldError;

/// Separator between the feature name and its window coordinates in an identifier.
pub const FEATURE_ID_SEPARATOR: &str = "__";

///
/// A genomic feature together with its flanks, identified as
/// `NAME__CHROM:START-END` where `START` and `END` are the window margins.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct FeatureWindow {
    pub name: String,
    pub chr: String,
    pub start: u64,
    pub end: u64,
}

impl FeatureWindow {
    ///
    /// Parse a feature identifier of the form `NAME__CHROM:START-END`.
    ///
    pub fn parse(id: &str) -> Result<Self, FlankFoldError> {
        let invalid = || FlankFoldError::InvalidFeatureId(id.to_string());

        let (name, coords) = id.rsplit_once(FEATURE_ID_SEPARATOR).ok_or_else(invalid)?;
        let (chr, range) = coords.rsplit_once(':').ok_or_else(invalid)?;
        let (start, end) = range.split_once('-').ok_or_else(invalid)?;

        let start = start.parse::<u64>().map_err(|_| invalid())?;
        let end = end.parse::<u64>().map_err(|_| invalid())?;
        if end < start || chr.is_empty() {
            return Err(invalid());
        }

        Ok(FeatureWindow {
            name: name.to_string(),
            chr: chr.to_string(),
            start,
            end,
        })
    }

    ///
    /// Position of a mutation relative to the window start, if it falls in the window.
    ///
    pub fn relative_position(&self, pos: u64) -> Option<usize> {
        if pos < self.start || pos > self.end {
            return None;
        }
        Some((pos - self.start) as usize)
    }

    pub fn id(&self) -> String {
        format!(
            "{}{}{}:{}-{}",
            self.name, FEATURE_ID_SEPARATOR, self.chr, self.start, self.end
        )
    }
}

impl FromStr for FeatureWindow {
    type Err = FlankFoldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureWindow::parse(s)
    }
}

impl Display for FeatureWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_parse_feature_id() {
        let feature = FeatureWindow::parse("CTCF_12__chr1:10025-12025").unwrap();
        assert_eq!(feature.name, "CTCF_12");
        assert_eq!(feature.chr, "chr1");
        assert_eq!(feature.start, 10025);
        assert_eq!(feature.end, 12025);
        assert_eq!(feature.id(), "CTCF_12__chr1:10025-12025");
    }

    #[rstest]
    fn test_name_may_contain_separator() {
        let feature: FeatureWindow = "site__a__chrX:5-10".parse().unwrap();
        assert_eq!(feature.name, "site__a");
        assert_eq!(feature.chr, "chrX");
    }

    #[rstest]
    fn test_relative_position() {
        let feature = FeatureWindow::parse("f__chr2:100-199").unwrap();
        assert_eq!(feature.relative_position(100), Some(0));
        assert_eq!(feature.relative_position(150), Some(50));
        assert_eq!(feature.relative_position(99), None);
        assert_eq!(feature.relative_position(200), None);
    }

    #[rstest]
    #[case("no_coordinates")]
    #[case("f__chr1:100")]
    #[case("f__chr1:abc-200")]
    #[case("f__chr1:300-200")]
    #[case("f__:1-2")]
    fn test_invalid_ids(#[case] id: &str) {
        assert!(FeatureWindow::parse(id).is_err());
    }
}
