//! Text helpers for prompt and log excerpts.

/// Longest prefix of `s` that fits in `max_bytes` and ends on a char boundary.
pub fn clip_bytes(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let end = (0..=max_bytes)
        .rev()
        .find(|&i| s.is_char_boundary(i))
        .unwrap_or(0);
    &s[..end]
}

/// Like [`clip_bytes`], marking the cut with `...` when anything was dropped.
pub fn ellipsize(s: &str, max_bytes: usize) -> String {
    let clipped = clip_bytes(s, max_bytes);
    if clipped.len() < s.len() {
        format!("{}...", clipped)
    } else {
        clipped.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_short_input_untouched() {
        assert_eq!(clip_bytes("Gravity", 100), "Gravity");
        assert_eq!(clip_bytes("", 3), "");
    }

    #[test]
    fn test_clip_backs_off_to_char_boundary() {
        // each char is 2 bytes
        let s = "αβγ";
        assert_eq!(clip_bytes(s, 3), "α");
        assert_eq!(clip_bytes(s, 4), "αβ");
        assert_eq!(clip_bytes(s, 1), "");
    }

    #[test]
    fn test_ellipsize_marks_only_real_cuts() {
        assert_eq!(ellipsize("Social Contract", 6), "Social...");
        assert_eq!(ellipsize("Ethics", 6), "Ethics");
    }
}
