//! URL slug derivation for events, blog posts, and categories.
//!
//! Slugs are derived deterministically from titles and are NOT unique:
//! two records with identical titles share a slug. Uniqueness is not
//! enforced anywhere in the schema, so lookups by slug must tolerate
//! multiple matches.

/// Maximum slug length in characters.
const MAX_SLUG_LEN: usize = 100;

/// Derive a URL-safe slug from a title.
///
/// Lowercases the input, collapses every run of non-alphanumeric characters
/// into a single hyphen, strips leading/trailing hyphens, and truncates to
/// 100 characters.
///
/// # Examples
///
/// ```
/// use eventhubble_core::slug::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("  Jazz & Blues Night  "), "jazz-blues-night");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut last_was_hyphen = true; // suppresses a leading hyphen

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    if slug.ends_with('-') {
        slug.pop();
    }

    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        if slug.ends_with('-') {
            slug.pop();
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Summer Music Festival 2026"), "summer-music-festival-2026");
    }

    #[test]
    fn collapses_non_alphanumeric_runs() {
        assert_eq!(slugify("Rock -- & -- Roll!!!"), "rock-roll");
        assert_eq!(slugify("a   b\t\tc"), "a-b-c");
    }

    #[test]
    fn strips_leading_and_trailing_hyphens() {
        assert_eq!(slugify("  --Hello--  "), "hello");
        assert_eq!(slugify("!leading"), "leading");
        assert_eq!(slugify("trailing?"), "trailing");
    }

    #[test]
    fn truncates_to_one_hundred_chars() {
        let long = "word ".repeat(50);
        let slug = slugify(&long);
        assert!(slug.len() <= 100);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn identical_titles_share_a_slug() {
        // Documented behavior: no uniqueness, duplicate titles collide.
        assert_eq!(slugify("Open Mic Night"), slugify("Open Mic Night"));
    }

    #[test]
    fn empty_and_symbol_only_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }
}
