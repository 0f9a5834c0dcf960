pub mod card_list;
pub mod help;
pub mod lyrics;
pub mod now_playing;
pub mod root;
pub mod sidebar;

/// Cut `s` to `max_len` characters, ending in "..." when shortened.
pub(crate) fn truncate_str(s: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_str;

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_str("Sigur Rós", 20), "Sigur Rós");
        assert_eq!(truncate_str("Sigur Rós", 8), "Sigur...");
        assert_eq!(truncate_str("ñandú", 2), "ña");
        assert_eq!(truncate_str("abc", 0), "");
    }
}
