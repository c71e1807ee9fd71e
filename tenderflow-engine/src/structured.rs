//! Cleanup helpers for JSON returned by completion providers.
//!
//! Providers are asked for bare JSON but routinely wrap it in markdown code
//! fences or surround it with prose anyway; these helpers recover the object.

/// Remove markdown code-fence markers around a JSON payload.
pub fn strip_code_fences(text: &str) -> String {
    text.trim()
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Slice the text from the first `{` to the last `}`, inclusive.
///
/// Tolerates prose before and after the object; returns `None` when no
/// balanced-looking object boundary exists.
pub fn slice_outer_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_fenced_json() {
        let fenced = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"a\": 1}");
    }

    #[test]
    fn leaves_bare_json_untouched() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn slices_object_out_of_prose() {
        let text = "Voici les suggestions :\n{\"inclusions\": []}\nBonne chance.";
        assert_eq!(slice_outer_object(text), Some("{\"inclusions\": []}"));
    }

    #[test]
    fn slice_returns_none_without_object() {
        assert_eq!(slice_outer_object("aucune suggestion"), None);
    }
}
