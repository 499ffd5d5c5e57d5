//! Stable public ids derived from slider labels

use std::collections::HashSet;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::constants::group::FALLBACK_SLUG;

/// Lowercase, ASCII-folded, hyphen-separated form of `text`
///
/// Returns an empty string when nothing word-like survives.
pub fn slugify(text: &str) -> String {
    let folded: String = text
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut pending_separator = false;
    for c in folded.chars() {
        if c == '_' || c == '-' || c.is_whitespace() {
            pending_separator = true;
            continue;
        }
        if pending_separator && !slug.is_empty() {
            slug.push('-');
        }
        pending_separator = false;
        slug.push(c);
    }
    slug
}

/// Hands out unique slugs for one reconcile pass
#[derive(Debug, Default)]
pub struct SlugAllocator {
    used: HashSet<String>,
}

impl SlugAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugify `text` and suffix `-2`, `-3`, ... until unused
    pub fn allocate(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = FALLBACK_SLUG.to_string();
        }

        let mut candidate = base.clone();
        let mut suffix = 2;
        while self.used.contains(&candidate) {
            candidate = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Radius"), "radius");
        assert_eq!(slugify("  Outer   Radius  "), "outer-radius");
        assert_eq!(slugify("twist_angle--deg"), "twist-angle-deg");
        assert_eq!(slugify("Size (mm)!"), "size-mm");
    }

    #[test]
    fn test_slugify_folds_accents() {
        assert_eq!(slugify("Décalage Été"), "decalage-ete");
        assert_eq!(slugify("ﬁne"), "fine");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify(""), "");
    }

    #[test]
    fn test_allocator_suffixes_collisions() {
        let mut slugs = SlugAllocator::new();
        assert_eq!(slugs.allocate("Slider"), "slider");
        assert_eq!(slugs.allocate("slider"), "slider-2");
        assert_eq!(slugs.allocate("!!!"), "slider-3");
        assert_eq!(slugs.allocate("Other"), "other");
    }
}
