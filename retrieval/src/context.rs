//! Assembly of the context string handed to the answer model.

use faq_vector_store::ScoredDocument;

/// Separator placed between labeled document blocks
pub const DOCUMENT_SEPARATOR: &str = "\n---\n";

/// Join documents as `[Document i]` blocks, 1-indexed, in the given order
pub fn format_context(documents: &[ScoredDocument]) -> String {
    documents
        .iter()
        .enumerate()
        .map(|(i, result)| format!("[Document {}]\n{}", i + 1, result.document.content))
        .collect::<Vec<_>>()
        .join(DOCUMENT_SEPARATOR)
}

/// Cut `text` to at most `max_chars` characters.
///
/// A hard cutoff on a char boundary: words may be split, multi-byte
/// characters never are. Returns whether anything was removed.
pub fn truncate_chars(text: &mut String, max_chars: usize) -> bool {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            text.truncate(byte_idx);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faq_vector_store::SearchableDocument;
    use pretty_assertions::assert_eq;

    fn doc(question: &str, answer: &str) -> ScoredDocument {
        ScoredDocument {
            document: SearchableDocument::from_question_answer(question, answer),
            score: 1.0,
        }
    }

    #[test]
    fn test_format_labels_and_separators() {
        let context = format_context(&[doc("q1", "a1"), doc("q2", "a2")]);
        assert_eq!(
            context,
            "[Document 1]\nQuestion: q1\nAnswer: a1\n---\n[Document 2]\nQuestion: q2\nAnswer: a2"
        );
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_context(&[]), "");
    }

    #[test]
    fn test_truncate_exact_length() {
        let mut text = "abcdefghij".to_string();
        assert!(truncate_chars(&mut text, 4));
        assert_eq!(text, "abcd");
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        let mut text = "çağdaş öğrenci".to_string();
        assert!(truncate_chars(&mut text, 5));
        assert_eq!(text, "çağda");
        assert_eq!(text.chars().count(), 5);
    }

    #[test]
    fn test_truncate_short_text_untouched() {
        let mut text = "kısa".to_string();
        assert!(!truncate_chars(&mut text, 4));
        assert!(!truncate_chars(&mut text, 100));
        assert_eq!(text, "kısa");
    }
}
