//! Synonym selection for a single word.

use rand::Rng;
use synonymizer_core::thesaurus::ThesaurusEntry;
use synonymizer_core::token::Category;

/// Pick a replacement for `word`.
///
/// Candidates come from every sense whose functional label equals
/// `category`, minus anything equal to `word` ignoring case. With no
/// candidates the original word is returned unchanged. A capitalized
/// original yields a capitalized replacement.
pub fn select<R: Rng + ?Sized>(
    word: &str,
    category: Category,
    entry: Option<&ThesaurusEntry>,
    rng: &mut R,
) -> String {
    let Some(entry) = entry else {
        return word.to_string();
    };

    let original = word.to_lowercase();
    let candidates: Vec<&str> = entry
        .senses_for(category)
        .flat_map(|sense| sense.synonym_groups.iter().flatten())
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && s.to_lowercase() != original)
        .collect();

    if candidates.is_empty() {
        return word.to_string();
    }

    let chosen = candidates[rng.random_range(0..candidates.len())];

    if word.chars().next().is_some_and(char::is_uppercase) {
        capitalize_first(chosen)
    } else {
        chosen.to_string()
    }
}

/// Uppercase the first character, leaving the rest as-is.
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use synonymizer_core::thesaurus::SenseRecord;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn entry(label: &str, groups: &[&[&str]]) -> ThesaurusEntry {
        ThesaurusEntry::new(vec![SenseRecord::new(
            label,
            groups
                .iter()
                .map(|g| g.iter().map(|s| s.to_string()).collect())
                .collect(),
        )])
    }

    #[test]
    fn no_entry_keeps_word() {
        assert_eq!(select("fox", Category::Noun, None, &mut rng()), "fox");
    }

    #[test]
    fn category_mismatch_keeps_word() {
        let e = entry("adjective", &[&["fast", "swift"]]);
        assert_eq!(select("quick", Category::Noun, Some(&e), &mut rng()), "quick");
    }

    #[test]
    fn label_match_is_exact() {
        let e = entry("Adjective", &[&["fast"]]);
        assert_eq!(select("quick", Category::Adjective, Some(&e), &mut rng()), "quick");
    }

    #[test]
    fn picks_from_all_matching_groups() {
        let e = ThesaurusEntry::new(vec![
            SenseRecord::new("adjective", vec![vec!["fast".into()]]),
            SenseRecord::new("verb", vec![vec!["hasten".into()]]),
            SenseRecord::new("adjective", vec![vec!["swift".into()], vec!["speedy".into()]]),
        ]);
        let mut rng = rng();
        for _ in 0..50 {
            let out = select("quick", Category::Adjective, Some(&e), &mut rng);
            assert!(["fast", "swift", "speedy"].contains(&out.as_str()), "{out}");
        }
    }

    #[test]
    fn original_is_never_chosen() {
        let e = entry("noun", &[&["Fox", "fox", "FOX"]]);
        assert_eq!(select("fox", Category::Noun, Some(&e), &mut rng()), "fox");

        let e = entry("noun", &[&["FOX", "vixen"]]);
        let mut rng = rng();
        for _ in 0..20 {
            assert_eq!(select("fox", Category::Noun, Some(&e), &mut rng), "vixen");
        }
    }

    #[test]
    fn capitalization_follows_original() {
        let e = entry("adjective", &[&["fast lane"]]);
        assert_eq!(
            select("Quick", Category::Adjective, Some(&e), &mut rng()),
            "Fast lane"
        );
        assert_eq!(select("quick", Category::Adjective, Some(&e), &mut rng()), "fast lane");
    }

    #[test]
    fn capitalization_leaves_the_rest_alone() {
        let e = entry("noun", &[&["iPhone"]]);
        assert_eq!(select("Phone", Category::Noun, Some(&e), &mut rng()), "IPhone");
    }

    #[test]
    fn blank_candidates_are_ignored() {
        let e = entry("noun", &[&["  ", ""]]);
        assert_eq!(select("fox", Category::Noun, Some(&e), &mut rng()), "fox");
    }

    #[test]
    fn same_seed_same_choice() {
        let e = entry("noun", &[&["a1", "a2", "a3", "a4", "a5"]]);
        let first = select("x", Category::Noun, Some(&e), &mut rng());
        let second = select("x", Category::Noun, Some(&e), &mut rng());
        assert_eq!(first, second);
    }
}
