//! Month name to calendar index mapping.

/// Known month spellings after title-casing.
const MONTHS: [(&str, u32); 24] = [
    ("January", 1),
    ("Jan", 1),
    ("February", 2),
    ("Feb", 2),
    ("Feburary", 2),
    ("March", 3),
    ("Mar", 3),
    ("April", 4),
    ("Apr", 4),
    ("May", 5),
    ("June", 6),
    ("Jun", 6),
    ("July", 7),
    ("Jul", 7),
    ("August", 8),
    ("Aug", 8),
    ("September", 9),
    ("Sep", 9),
    ("October", 10),
    ("Oct", 10),
    ("November", 11),
    ("Nov", 11),
    ("December", 12),
    ("Dec", 12),
];

/// Uppercase the first letter of each word and lowercase the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

/// Calendar index (1-12) of a month name, if it is a known spelling.
pub fn month_index(name: &str) -> Option<u32> {
    let name = title_case(name.trim());
    MONTHS
        .iter()
        .find(|(spelling, _)| *spelling == name)
        .map(|&(_, index)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_and_short_names() {
        assert_eq!(month_index("January"), Some(1));
        assert_eq!(month_index("Sep"), Some(9));
        assert_eq!(month_index("December"), Some(12));
        assert_eq!(month_index("May"), Some(5));
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(month_index("MARCH"), Some(3));
        assert_eq!(month_index("march"), Some(3));
        assert_eq!(month_index("oCT"), Some(10));
    }

    #[test]
    fn test_known_misspelling() {
        assert_eq!(month_index("FEBURARY"), Some(2));
    }

    #[test]
    fn test_unknown_names() {
        assert_eq!(month_index("Sept"), None);
        assert_eq!(month_index(""), None);
        assert_eq!(month_index("Marchh"), None);
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("hELLO wORLD"), "Hello World");
        assert_eq!(title_case("DECEMBER"), "December");
    }
}
