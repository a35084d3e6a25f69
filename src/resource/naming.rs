//! Resource name normalization
//!
//! Turns human-readable labels coming back from the API into identifiers that
//! are valid resource names in the generated configuration.

use rand::Rng;

/// Name used when nothing survives normalization
pub const FALLBACK_NAME: &str = "unnamed";

/// Length of the random uniqueness suffix
const SUFFIX_LEN: usize = 4;

const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Characters rewritten to an underscore
const SEPARATORS: &[char] = &[
    '-', '@', '<', '>', '(', ')', '*', '#', '{', '}', '[', ']', '|', ' ', '.', '%', '\'', '"',
    ',', '&', '/', ':', '\\',
];

/// Punctuation kept as-is
const PASS_THROUGH: &[char] = &['!'];

/// Normalize a label without a random suffix.
pub fn normalize_resource_name(label: &str) -> String {
    normalize_resource_name_with_random(label, false)
}

/// Normalize a label into a lowercase identifier.
///
/// Separators collapse into single underscores, a leading run of digits is
/// dropped and anything outside `[a-z0-9_!]` is discarded. An empty result
/// becomes [`FALLBACK_NAME`]. With `randomize` set, `_xxxx` is appended where
/// `xxxx` matches `[a-z0-9]{4}`.
///
/// Distinct labels may normalize to the same name; callers that need unique
/// names pass `randomize = true`.
pub fn normalize_resource_name_with_random(label: &str, randomize: bool) -> String {
    let mut name = String::with_capacity(label.len());

    for c in label.chars().flat_map(char::to_lowercase) {
        let mapped = if SEPARATORS.contains(&c) || c.is_whitespace() {
            '_'
        } else if c.is_ascii_alphanumeric() || c == '_' || PASS_THROUGH.contains(&c) {
            c
        } else {
            continue;
        };

        if mapped == '_' && name.ends_with('_') {
            continue;
        }
        name.push(mapped);
    }

    let name = name.trim_start_matches(|c: char| c.is_ascii_digit());
    let mut name = if name.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        name.to_string()
    };

    if randomize {
        name.push('_');
        name.push_str(&random_suffix());
    }

    name
}

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN)
        .map(|_| SUFFIX_CHARSET[rng.gen_range(0..SUFFIX_CHARSET.len())] as char)
        .collect()
}
