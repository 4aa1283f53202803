use std::fmt::Display;

/// Tokens this short or shorter are dropped.
const MIN_TOKEN_CHARS: usize = 3;

/// Normalizes text into index terms.
///
/// Lower-cases, turns every character that is not a word character (Unicode
/// letter, digit or `_`) or whitespace into a space, splits on whitespace and
/// keeps tokens of at least three characters. Anything `Display` is tokenized
/// through its string form.
pub fn tokenize(text: impl Display) -> Vec<String> {
    let cleaned: String = text
        .to_string()
        .to_lowercase()
        .chars()
        .map(|c| if is_word_char(c) || c.is_whitespace() { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

fn is_word_char(c: char) -> bool { c.is_alphanumeric() || c == '_' }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_folds_case() {
        assert_eq!(tokenize("Data, Cleaning!! 2024"), vec!["data", "cleaning", "2024"]);
    }

    #[test]
    fn drops_tokens_of_two_chars_or_less() {
        assert_eq!(tokenize("What is the KPI to track"), vec!["what", "the", "kpi", "track"]);
        assert!(tokenize("a to is ok").is_empty());
    }

    #[test]
    fn punctuation_splits_words() {
        assert_eq!(tokenize("year-over-year growth"), vec!["year", "over", "year", "growth"]);
        assert_eq!(tokenize("what's"), vec!["what"]);
    }

    #[test]
    fn underscore_is_part_of_a_word() {
        assert_eq!(tokenize("df.groupby(customer_id)"), vec!["groupby", "customer_id"]);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert_eq!(tokenize("été ok"), vec!["été"]);
    }

    #[test]
    fn non_string_input_uses_its_display_form() {
        assert_eq!(tokenize(20_240), vec!["20240"]);
        assert!(tokenize(1.5).is_empty());
    }
}
