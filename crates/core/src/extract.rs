//! Extraction of a single JSON object embedded in free-form model output.
//!
//! Text-generation responses are asked to contain exactly one JSON object,
//! but in practice arrive wrapped in prose or markdown fences. A regex over
//! the raw text breaks as soon as a generated description contains literal
//! braces, so extraction here is a bracket-balanced scan that is aware of
//! string literals and escape sequences: braces inside JSON strings do not
//! count toward nesting. Anything other than exactly one balanced object is
//! rejected — ambiguous responses fail loudly instead of silently picking
//! the wrong span.

/// Ways a response can fail to yield exactly one embedded object.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    /// The text contains no `{` at all.
    #[error("response contains no JSON object")]
    NoObject,

    /// An object opened but never closed before the text ended.
    #[error("response contains an unterminated JSON object")]
    Unterminated,

    /// More than one top-level `{...}` candidate — no way to know which
    /// span the model meant.
    #[error("response contains more than one JSON object candidate")]
    Ambiguous,
}

/// Extract the single top-level `{...}` span from `text`.
///
/// Returns the exact byte span of the first balanced object. Any further
/// `{` in the trailing text is treated as a second candidate and rejected
/// as [`ExtractError::Ambiguous`].
pub fn extract_json_object(text: &str) -> Result<&str, ExtractError> {
    let bytes = text.as_bytes();
    let start = text.find('{').ok_or(ExtractError::NoObject)?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut end = None;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    end = Some(start + offset + 1);
                    break;
                }
            }
            _ => {}
        }
    }

    let end = end.ok_or(ExtractError::Unterminated)?;

    if text[end..].contains('{') {
        return Err(ExtractError::Ambiguous);
    }

    Ok(&text[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_bare_object() {
        assert_eq!(extract_json_object(r#"{"a": 1}"#), Ok(r#"{"a": 1}"#));
    }

    #[test]
    fn extracts_object_from_markdown_fence() {
        let text = "Here you go:\n```json\n{\"title_ja\": \"説教おじさん\"}\n```";
        assert_eq!(
            extract_json_object(text),
            Ok(r#"{"title_ja": "説教おじさん"}"#)
        );
    }

    #[test]
    fn braces_inside_string_values_do_not_close_the_object() {
        let text = r#"{"description_en": "says {quote} a lot", "danger_level": 2}"#;
        assert_eq!(extract_json_object(text), Ok(text));
    }

    #[test]
    fn escaped_quotes_inside_strings_are_handled() {
        let text = r#"{"ability_en": "the \"classic\" move"}"#;
        assert_eq!(extract_json_object(text), Ok(text));
    }

    #[test]
    fn nested_objects_balance() {
        let text = r#"prefix {"a": {"b": 2}} suffix"#;
        assert_eq!(extract_json_object(text), Ok(r#"{"a": {"b": 2}}"#));
    }

    #[test]
    fn no_braces_is_no_object() {
        assert_eq!(
            extract_json_object("I cannot produce that."),
            Err(ExtractError::NoObject)
        );
    }

    #[test]
    fn unclosed_object_is_unterminated() {
        assert_eq!(
            extract_json_object(r#"{"a": 1"#),
            Err(ExtractError::Unterminated)
        );
    }

    #[test]
    fn second_candidate_is_ambiguous() {
        assert_eq!(
            extract_json_object(r#"{"a": 1} and also {"b": 2}"#),
            Err(ExtractError::Ambiguous)
        );
    }

    #[test]
    fn unterminated_string_is_unterminated() {
        assert_eq!(
            extract_json_object(r#"{"a": "oops"#),
            Err(ExtractError::Unterminated)
        );
    }
}
