//! Exact-token detector for the one hard-coded trigger.

use unicode_general_category::{GeneralCategory, get_general_category};

use crate::base::types::{ResponsePayload, STICKER_ID};

/// Tokens that fire the special case, compared case-sensitively.
const SPECIAL_TOKENS: [&str; 2] = ["ЕБ", "ЁБ"];

/// Text sent after the sticker when the special case fires alone.
pub const SPECIAL_COMPANION_TEXT: &str = "Еген борисыч ла-ла-ла-ла-ла-ла";

/// Returns `true` if any token of `text` is exactly one of the special tokens.
///
/// A token is a maximal run of letters, digits, or `-`.
pub fn detect(text: &str) -> bool {
    text.split(|c: char| !is_token_char(c)).any(|token| SPECIAL_TOKENS.contains(&token))
}

/// Letters (`L*`), decimal digits (`Nd`) and the hyphen.
///
/// Other numerics such as `²` (`No`) or `Ⅻ` (`Nl`) separate tokens.
fn is_token_char(c: char) -> bool {
    c == '-'
        || matches!(
            get_general_category(c),
            GeneralCategory::UppercaseLetter
                | GeneralCategory::LowercaseLetter
                | GeneralCategory::TitlecaseLetter
                | GeneralCategory::ModifierLetter
                | GeneralCategory::OtherLetter
                | GeneralCategory::DecimalNumber
        )
}

/// The payload produced by the special case.
pub fn special_payload() -> ResponsePayload {
    ResponsePayload::StickerPlusText {
        sticker_id: STICKER_ID.to_string(),
        text: SPECIAL_COMPANION_TEXT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_standalone_tokens() {
        assert!(detect("ЕБ"));
        assert!(detect("ЁБ"));
        assert!(detect("ну ЕБ, привет"));
        assert!(detect("(ЁБ)!"));
    }

    #[test]
    fn test_non_decimal_numerics_separate_tokens() {
        assert!(detect("ЕБ²"));
        assert!(detect("½ЕБ"));
        assert!(detect("ЕБⅫ"));
        assert!(!detect("ЕБ٣"));
    }

    #[test]
    fn test_ignores_substrings_of_longer_words() {
        assert!(!detect("ебать"));
        assert!(!detect("ЕБАТЬ"));
        assert!(!detect("ЕБ-шка"));
        assert!(!detect("ЕБ2"));
    }

    #[test]
    fn test_is_case_sensitive() {
        assert!(!detect("еб"));
        assert!(!detect("Еб"));
        assert!(!detect("ёб"));
    }

    #[test]
    fn test_empty_text() {
        assert!(!detect(""));
        assert!(!detect("  ,.!  "));
    }
}
