//! Email-domain slugs derived from organization names.
//!
//! # Rules
//!
//! - Lowercased
//! - Corporate suffix words (`inc`, `llc`, `ltd`, `gmbh`, `s.a.`, `corp`,
//!   `co`, `company`, `plc`) are dropped unless they are the first word
//! - Only ASCII letters and digits are kept
//! - An empty result falls back to `org`

/// Suffix words removed from organization names, compared without trailing
/// dots.
const CORPORATE_SUFFIXES: &[&str] = &[
    "inc", "llc", "ltd", "gmbh", "s.a", "corp", "co", "company", "plc",
];

/// Slug used when a name has no usable characters.
const FALLBACK_SLUG: &str = "org";

/// Derives the email-domain label for an organization name.
///
/// # Examples
///
/// ```
/// use mock_data::domain_slug;
///
/// assert_eq!(domain_slug("Acme Inc"), "acme");
/// assert_eq!(domain_slug("Stark Industries"), "starkindustries");
/// assert_eq!(domain_slug("Gekko & Co"), "gekko");
/// ```
#[must_use]
pub fn domain_slug(name: &str) -> String {
    let lowered = name.to_lowercase();
    let slug: String = lowered
        .split_whitespace()
        .enumerate()
        .filter(|(index, word)| *index == 0 || !is_corporate_suffix(word))
        .flat_map(|(_, word)| word.chars())
        .filter(char::is_ascii_alphanumeric)
        .collect();

    if slug.is_empty() {
        FALLBACK_SLUG.to_owned()
    } else {
        slug
    }
}

fn is_corporate_suffix(word: &str) -> bool {
    let trimmed = word.trim_end_matches([',', '.']);
    CORPORATE_SUFFIXES.contains(&trimmed)
}
