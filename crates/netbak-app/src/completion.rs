//! Keyword completion for the input line

/// Complete `input` against `keywords`.
///
/// Matching is a case-insensitive prefix test on the whole input. Only a
/// single unambiguous match completes; zero or several return `None`.
pub fn complete<'a>(input: &str, keywords: &'a [String]) -> Option<&'a str> {
    let needle = input.to_lowercase();
    let mut matches = keywords
        .iter()
        .filter(|k| k.to_lowercase().starts_with(&needle));

    let first = matches.next()?;
    if matches.next().is_some() {
        return None;
    }
    Some(first.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_single_match_completes() {
        let kw = words(&["display", "show", "ping"]);
        assert_eq!(complete("di", &kw), Some("display"));
    }

    #[test]
    fn test_case_insensitive() {
        let kw = words(&["display", "show"]);
        assert_eq!(complete("SH", &kw), Some("show"));
    }

    #[test]
    fn test_ambiguous_is_none() {
        let kw = words(&["save", "ssh", "show"]);
        assert_eq!(complete("s", &kw), None);
    }

    #[test]
    fn test_no_match_is_none() {
        let kw = words(&["display"]);
        assert_eq!(complete("xyz", &kw), None);
        assert_eq!(complete("display version", &kw), None);
    }
}
