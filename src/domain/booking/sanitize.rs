//! Input cleaning for booking form values.

use once_cell::sync::Lazy;
use regex::Regex;

/// Markup tags, including one left unterminated at the end of the input.
static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[A-Za-z/!?][^>]*(?:>|$)").expect("valid tag regex"));

/// Local part and dotted domain, each label at most 63 characters.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("valid email regex")
});

const MAX_EMAIL_LEN: usize = 254;

/// Trims, strips markup tags, then HTML-escapes.
pub fn sanitize(raw: &str) -> String {
    let stripped = TAG_PATTERN.replace_all(raw.trim(), "");
    escape_html(stripped.trim())
}

/// Escapes the five HTML-significant characters.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}

/// Standard address-format check.
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_EMAIL_LEN || !EMAIL_PATTERN.is_match(email) {
        return false;
    }
    let local = email.split('@').next().unwrap_or_default();
    !local.starts_with('.') && !local.ends_with('.') && !local.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_trims_and_strips_tags() {
        assert_eq!(sanitize("  <b>Jane</b> Doe "), "Jane Doe");
        assert_eq!(sanitize("<script>alert(1)</script>"), "alert(1)");
    }

    #[test]
    fn sanitize_escapes_remaining_markup_characters() {
        assert_eq!(sanitize("Tom & Jerry's \"clinic\""), "Tom &amp; Jerry&#039;s &quot;clinic&quot;");
        assert_eq!(sanitize("a < b"), "a &lt; b");
    }

    #[test]
    fn sanitize_drops_unterminated_tag() {
        assert_eq!(sanitize("Jane <img src=x"), "Jane");
    }

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("jane.doe+therapy@mail.example.com.au"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "jane", "jane@", "@example.com", "jane@example", "jane..doe@example.com", ".jane@example.com", "jane@-example.com"] {
            assert!(!is_valid_email(bad), "{} should be rejected", bad);
        }
    }
}
