//! Small argument-handling helpers.

/// Flattens repeated and comma-separated option values into one list.
///
/// `--cve a,b --cve c` yields `["a", "b", "c"]`. Empty segments are
/// dropped.
#[must_use]
pub fn parse_commalist(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commalist_mixed() {
        let input = vec!["CVE-1,CVE-2".to_string(), "CVE-3".to_string()];
        assert_eq!(parse_commalist(&input), vec!["CVE-1", "CVE-2", "CVE-3"]);
    }

    #[test]
    fn test_parse_commalist_drops_empty_segments() {
        let input = vec!["a,,b, ".to_string()];
        assert_eq!(parse_commalist(&input), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_commalist_empty() {
        assert!(parse_commalist(&[]).is_empty());
    }
}
