/// Truncate model input to at most `max_bytes` bytes, backing up to the
/// nearest character boundary. Truncation, not summarization.
pub fn truncate_to_char_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Strip a markdown code fence from a model response. Models in JSON mode
/// still occasionally wrap the object in ```json fences.
pub fn strip_code_blocks(response: &str) -> &str {
    response
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_respects_char_boundary() {
        let text = "prix fixe café";
        let truncated = truncate_to_char_boundary(text, 13);
        assert!(truncated.len() <= 13);
        assert!(text.starts_with(truncated));
    }

    #[test]
    fn test_truncate_is_noop_within_bounds() {
        assert_eq!(truncate_to_char_boundary("short", 100), "short");
    }

    #[test]
    fn test_strip_code_blocks() {
        assert_eq!(strip_code_blocks("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_blocks("```\n{}\n```"), "{}");
        assert_eq!(strip_code_blocks("  {} "), "{}");
    }
}
