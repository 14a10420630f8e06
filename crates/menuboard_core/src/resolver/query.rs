//! Minimal URL query-string reader for display overrides.
//!
//! # Invariants
//! - Parsing never fails; undecodable escapes are kept literally.
//! - The first occurrence of a key wins.

use url::form_urlencoded;

/// Query parameter carrying a daypart override.
pub const DAYPART_PARAM: &str = "daypart";
/// Query parameter carrying a day-of-week override.
pub const DAY_PARAM: &str = "day";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses `?a=1&b=2` (leading `?` optional).
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(candidate, _)| candidate == key)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QueryParams;

    #[test]
    fn parse_reads_first_occurrence() {
        let query = QueryParams::parse("?daypart=breakfast&day=Friday&daypart=regular");
        assert_eq!(query.get("daypart"), Some("breakfast"));
        assert_eq!(query.get("day"), Some("Friday"));
        assert_eq!(query.get("missing"), None);
    }

    #[test]
    fn parse_decodes_plus_and_percent_escapes() {
        let query = QueryParams::parse("note=hot+food%21&bad=%zz&tail=%4");
        assert_eq!(query.get("note"), Some("hot food!"));
        assert_eq!(query.get("bad"), Some("%zz"));
        assert_eq!(query.get("tail"), Some("%4"));
    }

    #[test]
    fn parse_decodes_multibyte_escapes() {
        let query = QueryParams::parse("?day=vendredi&note=caf%C3%A9");
        assert_eq!(query.get("note"), Some("café"));
    }

    #[test]
    fn parse_handles_empty_and_valueless_segments() {
        assert!(QueryParams::parse("").is_empty());
        assert!(QueryParams::parse("?").is_empty());
        let query = QueryParams::parse("flag&&day=monday");
        assert_eq!(query.get("flag"), Some(""));
        assert_eq!(query.get("day"), Some("monday"));
    }
}
