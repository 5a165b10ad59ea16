//! Slug generation

/// Characters replaced with a hyphen.
const HYPHENATED: &[char] = &[' ', '_', '.', '/', '\\', ':', ';', '!', '?', ','];

/// Characters removed outright.
const STRIPPED: &[char] = &[
    '"', '\'', '(', ')', '[', ']', '{', '}', '@', '#', '$', '%', '^', '&', '*', '+', '=', '|',
    '`', '~', '<', '>',
];

/// Derive a URL-safe slug from a display name.
///
/// Lowercases the input, turns separators into single hyphens, and
/// strips bracketing and symbol characters. Consecutive hyphens are not
/// collapsed and leading or trailing hyphens are kept; uniqueness is the
/// store's concern, not this function's.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter_map(|c| {
            if HYPHENATED.contains(&c) {
                Some('-')
            } else if STRIPPED.contains(&c) {
                None
            } else {
                Some(c)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates_spaces() {
        assert_eq!(slugify("The Last of Us Part II"), "the-last-of-us-part-ii");
        assert_eq!(slugify("F1 24"), "f1-24");
    }

    #[test]
    fn does_not_collapse_consecutive_hyphens() {
        assert_eq!(slugify("A  B"), "a--b");
    }

    #[test]
    fn replaces_separator_characters() {
        assert_eq!(slugify("a_b.c/d:e"), "a-b-c-d-e");
        assert_eq!(slugify("what?!"), "what--");
    }

    #[test]
    fn strips_symbol_characters() {
        assert_eq!(slugify("Tony Hawk's"), "tony-hawks");
        assert_eq!(slugify("Rock & Roll"), "rock--roll");
        assert_eq!(slugify("(parens)"), "parens");
        assert_eq!(slugify("100% [Gold]"), "100-gold");
    }

    #[test]
    fn is_deterministic() {
        let name = "Grand Theft Auto: Vice City";
        assert_eq!(slugify(name), slugify(name));
        assert_eq!(slugify(name), "grand-theft-auto--vice-city");
    }
}
