//! Search input for task listings.

use chrono::{Datelike, NaiveDate};

use crate::date::Date;

/// What a caller typed into the search box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// `DD.MM.YYYY`: tasks on exactly that day.
    Date(Date),
    /// Case-insensitive substring of the title or comment.
    Text(String),
}

impl SearchQuery {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match NaiveDate::parse_from_str(input, "%d.%m.%Y") {
            Ok(date) if input.len() == 10 && date.year() <= 9999 => SearchQuery::Date(Date::from(date)),
            _ => SearchQuery::Text(input.to_string()),
        }
    }

    /// `LIKE` pattern for a text query, with the wildcard characters escaped.
    pub(crate) fn like_pattern(text: &str) -> String {
        format!("%{}%", escape_like(text))
    }
}

/// Escapes `LIKE` wildcards with `\`, for use with `ESCAPE '\'`.
pub(crate) fn escape_like(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            SearchQuery::parse("08.02.2024"),
            SearchQuery::Date("20240208".parse().unwrap())
        );
        assert_eq!(
            SearchQuery::parse(" 29.02.2024 "),
            SearchQuery::Date("20240229".parse().unwrap())
        );
    }

    #[rstest]
    #[case("gym")]
    #[case("8.2.2024")]
    #[case("31.02.2024")]
    #[case("2024.02.08")]
    #[case("08.02.2024 gym")]
    fn test_parse_text(#[case] input: &str) {
        assert_eq!(SearchQuery::parse(input), SearchQuery::Text(input.to_string()));
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(SearchQuery::like_pattern("gym"), "%gym%");
        assert_eq!(SearchQuery::like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
