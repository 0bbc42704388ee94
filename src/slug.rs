//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! Slug generation

/// Generate a normalized slug from any display string.
///
/// Lowercases the input, splits camelCase boundaries, collapses runs of
/// non-alphanumeric characters into single separators, and trims leading
/// and trailing separators. `"IsAdmin"`, `"is_admin"` and `"is-Admin"`
/// all normalize to the same slug.
pub fn slugify(input: &str, separator: char) -> String {
    let mut out = String::with_capacity(input.len());
    // whether the previous emitted character was lowercase or a digit
    let mut prev_lower = false;

    for ch in input.chars() {
        if ch.is_alphanumeric() {
            if ch.is_uppercase() && prev_lower {
                out.push(separator);
            }
            out.extend(ch.to_lowercase());
            prev_lower = ch.is_lowercase() || ch.is_numeric();
        } else {
            if !out.is_empty() && !out.ends_with(separator) {
                out.push(separator);
            }
            prev_lower = false;
        }
    }

    while out.ends_with(separator) {
        out.pop();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_canonicalizes_variants() {
        assert_eq!(slugify("IsAdmin", '-'), "is-admin");
        assert_eq!(slugify("is_admin", '-'), "is-admin");
        assert_eq!(slugify("is-Admin", '-'), "is-admin");
    }

    #[test]
    fn test_slugify_camel_case_boundaries() {
        assert_eq!(slugify("SuperAdmin", '-'), "super-admin");
        assert_eq!(slugify("contentEditor", '-'), "content-editor");
    }

    #[test]
    fn test_slugify_whitespace_and_punctuation() {
        assert_eq!(slugify("Forum Moderator", '-'), "forum-moderator");
        assert_eq!(slugify("  admin!!  ", '-'), "admin");
        assert_eq!(slugify("a  --  b", '-'), "a-b");
    }

    #[test]
    fn test_slugify_custom_separator() {
        assert_eq!(slugify("Forum Moderator", '_'), "forum_moderator");
        assert_eq!(slugify("IsAdmin", '.'), "is.admin");
    }

    #[test]
    fn test_slugify_empty_and_symbol_only() {
        assert_eq!(slugify("", '-'), "");
        assert_eq!(slugify("!!!", '-'), "");
    }

    #[test]
    fn test_slugify_digits() {
        assert_eq!(slugify("Level2Admin", '-'), "level2-admin");
    }
}
