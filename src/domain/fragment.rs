//! URL fragment codec for the active page (`#!/<n>`).

use super::types::PageNumber;

const FRAGMENT_PREFIX: &str = "!/";

/// Value assigned to `location.hash` for `page` (the browser adds the `#`).
pub fn encode(page: PageNumber) -> String {
    format!("{FRAGMENT_PREFIX}{page}")
}

/// Decode a fragment of shape `#!/<n>` or `!/<n>`.
///
/// Anything else, including `0`, signs, whitespace and trailing text, yields `None`.
pub fn decode(fragment: &str) -> Option<PageNumber> {
    let body = fragment.strip_prefix('#').unwrap_or(fragment);
    let digits = body.strip_prefix(FRAGMENT_PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().and_then(PageNumber::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_decode_yields_the_page() {
        let page = PageNumber::new(12).expect("page");
        assert_eq!(encode(page), "!/12");
        assert_eq!(decode(&format!("#{}", encode(page))), Some(page));
    }

    #[test]
    fn leading_hash_is_optional() {
        assert_eq!(decode("!/2"), PageNumber::new(2));
        assert_eq!(decode("#!/2"), PageNumber::new(2));
    }

    #[test]
    fn malformed_fragments_are_ignored() {
        for fragment in ["", "#", "#!/", "#!/0", "#!/-1", "#!/+2", "#!/2x", "#/2", "#!2", "#!/ 2", "#!/99999999999"] {
            assert_eq!(decode(fragment), None, "fragment {fragment:?}");
        }
    }
}
