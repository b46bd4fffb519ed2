//! Search keyword extraction.
//!
//! Search intents carry their query inline ("yuri weather kurashiki"). The query
//! is whatever is left once the trigger word and the activation word are removed.

use super::intent::ACTIVATION_WORD;

/// Trigger words of the search intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Video,
    Weather,
    Advice,
}

impl SearchKind {
    pub fn trigger(&self) -> &'static str {
        match self {
            SearchKind::Video => "youtube",
            SearchKind::Weather => "weather",
            SearchKind::Advice => "advice",
        }
    }
}

/// Removes every occurrence of the trigger and of the activation word from
/// `normalized`, collapses inner whitespace, and returns the rest.
///
/// Returns `None` when nothing but whitespace remains.
pub fn extract_keyword(normalized: &str, kind: SearchKind) -> Option<String> {
    let stripped = normalized
        .replace(kind.trigger(), "")
        .replace(ACTIVATION_WORD, "");
    let keyword = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if keyword.is_empty() {
        None
    } else {
        Some(keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_city() {
        assert_eq!(
            extract_keyword("yuri weather kurashiki", SearchKind::Weather),
            Some("kurashiki".to_string())
        );
        assert_eq!(
            extract_keyword("yuri weather  new   york", SearchKind::Weather),
            Some("new york".to_string())
        );
    }

    #[test]
    fn test_extracts_video_query() {
        assert_eq!(
            extract_keyword("yuri youtube kurt cobain", SearchKind::Video),
            Some("kurt cobain".to_string())
        );
    }

    #[test]
    fn test_empty_residual_is_none() {
        assert_eq!(extract_keyword("yuri weather", SearchKind::Weather), None);
        assert_eq!(extract_keyword("yuri weather ", SearchKind::Weather), None);
        assert_eq!(extract_keyword("yuri youtube yuri", SearchKind::Video), None);
        assert_eq!(extract_keyword("yuri advice", SearchKind::Advice), None);
    }

    #[test]
    fn test_strips_words_inside_other_words() {
        // Plain substring removal, like rule matching.
        assert_eq!(
            extract_keyword("yuri advice yurika", SearchKind::Advice),
            Some("ka".to_string())
        );
    }
}
