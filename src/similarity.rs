use strsim::normalized_levenshtein;

/// Two links whose similarity ratio lands in `[FLOOR, ROOF)` are treated as
/// the same logical item with a corrected address. Identical strings are
/// handled by a plain equality check before this module is ever consulted.
pub const SIMILARITY_FLOOR: f64 = 0.98;
pub const SIMILARITY_ROOF: f64 = 1.0;

pub fn similar(a: &str, b: &str) -> bool {
    if a == b {
        return false;
    }

    let ratio = normalized_levenshtein(a, b);

    ratio >= SIMILARITY_FLOOR && ratio < SIMILARITY_ROOF
}

/// First known link similar to `candidate`. Ties are not disambiguated;
/// the caller only needs a plausible prior link, not the best one.
pub fn find_similar<'a>(candidate: &str, known: &'a [String]) -> Option<&'a String> {
    known.iter().find(|logged| similar(candidate, logged))
}

#[cfg(test)]
mod tests {
    use super::{find_similar, similar};

    fn long_link(tail: &str) -> String {
        format!("https://example.com/articles/{}{}", "a".repeat(80), tail)
    }

    #[test]
    fn one_character_correction_in_a_long_link_is_similar() {
        let logged = long_link("/typo");
        let corrected = long_link("/typi");

        assert!(similar(&logged, &corrected));
    }

    #[test]
    fn identical_links_are_not_similar() {
        let link = long_link("/same");

        assert!(!similar(&link, &link));
    }

    #[test]
    fn unrelated_links_are_not_similar() {
        assert!(!similar(
            "https://example.com/articles/one",
            "https://other.org/videos/two"
        ));
    }

    #[test]
    fn ratio_exactly_at_the_floor_is_similar() {
        // 50 characters, one substitution: ratio is exactly 0.98
        let a = format!("https://ex.com/{}", "a".repeat(35));
        let b = format!("https://ex.com/{}b", "a".repeat(34));

        assert_eq!(a.len(), 50);
        assert_eq!(b.len(), 50);
        assert!(similar(&a, &b));
    }

    #[test]
    fn ratio_just_below_the_floor_is_not_similar() {
        // 40 characters, one substitution: ratio is 0.975
        let a = format!("https://ex.com/{}", "a".repeat(25));
        let b = format!("https://ex.com/{}b", "a".repeat(24));

        assert_eq!(a.len(), 40);
        assert!(!similar(&a, &b));
    }

    #[test]
    fn find_similar_returns_first_match() {
        let candidate = long_link("/typi");
        let known = vec![
            "https://other.org/unrelated".to_string(),
            long_link("/typo"),
            long_link("/typa"),
        ];

        assert_eq!(find_similar(&candidate, &known), Some(&known[1]));
    }

    #[test]
    fn find_similar_ignores_exact_matches() {
        let candidate = long_link("/same");
        let known = vec![long_link("/same")];

        assert_eq!(find_similar(&candidate, &known), None);
    }

    #[test]
    fn find_similar_with_no_knowns_finds_nothing() {
        assert_eq!(find_similar("https://example.com/a", &[]), None);
    }
}
