//! Name formatting shared by the builder and the emitter.

/// Name of the default style after formatting.
pub const DEFAULT_STYLE_NAME: &str = "default";

/// Format a declared style name into the lowerCamel name used in generated
/// method names.
///
/// Constant-style names and a trailing `Style` suffix are normalized, so
/// `RED_STYLE`, `redStyle` and `Red` all format to `red`.
pub fn format_style_name(name: &str) -> String {
    let words = split_words(name);
    let mut words: Vec<String> = words.into_iter().map(|w| w.to_lowercase()).collect();
    if words.len() > 1 && words.last().is_some_and(|w| w == "style") {
        words.pop();
    }

    let mut out = String::with_capacity(name.len());
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(word);
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Uppercase the first character.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lowercase the first character.
pub fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split on underscores and lower-to-upper case boundaries.
fn split_words(name: &str) -> Vec<&str> {
    let mut words = Vec::new();
    for part in name.split('_').filter(|p| !p.is_empty()) {
        let all_upper = part.chars().all(|c| !c.is_lowercase());
        if all_upper {
            words.push(part);
            continue;
        }
        let mut start = 0;
        let mut prev_lower = false;
        for (i, c) in part.char_indices() {
            if c.is_uppercase() && prev_lower {
                words.push(&part[start..i]);
                start = i;
            }
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
        words.push(&part[start..]);
    }
    words
}
