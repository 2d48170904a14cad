//! Localized content resolution.
//!
//! A logical entity (a product, an article) is often stored as a collection of
//! per-language variants. Resolution picks the variant for one language:
//! a linear scan where the first variant carrying that language wins.
//!
//! Resolution never fails. A missing collection, an empty one, or one without
//! the language all resolve to `None`; callers decide how to present absence.

/// A record that belongs to exactly one language.
pub trait Localized {
    type Language: PartialEq;

    fn language(&self) -> &Self::Language;
}

/// Find the variant for `language`.
///
/// Variants are scanned in order and the first match is returned, so
/// duplicate languages are tolerated and the earliest one wins.
pub fn resolve<'a, T: Localized>(variants: Option<&'a [T]>, language: &T::Language) -> Option<&'a T> {
    variants?.iter().find(|variant| variant.language() == language)
}

/// Same lookup as [`resolve`], returning an owned empty record on a miss.
///
/// For callers that need a value in every case rather than an `Option`.
pub fn resolve_or_default<T>(variants: Option<&[T]>, language: &T::Language) -> T
where
    T: Localized + Clone + Default,
{
    resolve(variants, language).cloned().unwrap_or_default()
}

/// Try each language in `preferences` in order and return the first variant found.
///
/// With a single preference this is exactly [`resolve`].
pub fn resolve_preferred<'a, T: Localized>(
    variants: Option<&'a [T]>,
    preferences: &[T::Language],
) -> Option<&'a T> {
    preferences
        .iter()
        .find_map(|language| resolve(variants, language))
}
