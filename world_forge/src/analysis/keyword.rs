//! Ordered keyword tables: the first tier with a matching keyword wins.

/// One row of a keyword table.
#[derive(Debug, Clone, Copy)]
pub struct KeywordTier<T: 'static> {
    pub keywords: &'static [&'static str],
    pub result: T,
}

/// A priority-ordered list of keyword tiers with a fallback result.
///
/// Matching is a case-insensitive substring test, so `"King"` matches the
/// `king` keyword and so does `"kingdom"`.
#[derive(Debug, Clone, Copy)]
pub struct KeywordTable<T: 'static> {
    tiers: &'static [KeywordTier<T>],
    fallback: T,
}

impl<T> KeywordTable<T> {
    pub const fn new(tiers: &'static [KeywordTier<T>], fallback: T) -> Self {
        Self { tiers, fallback }
    }

    pub fn tiers(&self) -> &'static [KeywordTier<T>] {
        self.tiers
    }
}

impl<T: Copy> KeywordTable<T> {
    /// Result of the first matching tier, if any.
    pub fn first_match(&self, text: &str) -> Option<T> {
        let text = text.to_lowercase();
        self.tiers
            .iter()
            .find(|tier| contains_any(&text, tier.keywords))
            .map(|tier| tier.result)
    }

    /// Result of the first matching tier, or the fallback.
    pub fn classify(&self, text: &str) -> T {
        self.first_match(text).unwrap_or(self.fallback)
    }

    pub fn fallback(&self) -> T {
        self.fallback
    }
}

/// Check if lowercased `text` contains any of the keywords.
pub fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}
