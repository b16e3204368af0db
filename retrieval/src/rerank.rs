use crate::keywords::KeywordAugmenter;
use faq_vector_store::ScoredDocument;
use log::debug;

/// How many keyword-matching documents are promoted to the front
pub const KEYWORD_PRIORITY_SLOTS: usize = 3;

/// Promote documents that mention a keyword expansion term.
///
/// When the question triggers a keyword rule, up to
/// [`KEYWORD_PRIORITY_SLOTS`] results mentioning any expansion term come
/// first, followed by non-mentioning results, until `k` slots are filled.
/// Relative order inside each group is the similarity order. Otherwise the
/// top `k` results are returned unchanged.
///
/// Cost is one substring scan per (result, rule) pair, fine for small `k`.
pub fn keyword_rerank(
    question: &str,
    results: Vec<ScoredDocument>,
    k: usize,
    augmenter: &KeywordAugmenter,
) -> Vec<ScoredDocument> {
    if !augmenter.matches_any(question) {
        return results.into_iter().take(k).collect();
    }

    let (matching, rest): (Vec<_>, Vec<_>) = results
        .into_iter()
        .take(k)
        .partition(|r| augmenter.mentions_expansion(&r.document.content));

    debug!(
        "Keyword reranking: {} matching, {} other results",
        matching.len(),
        rest.len()
    );

    let mut ranked: Vec<ScoredDocument> = matching
        .into_iter()
        .take(KEYWORD_PRIORITY_SLOTS.min(k))
        .collect();
    let remaining = k.saturating_sub(ranked.len());
    ranked.extend(rest.into_iter().take(remaining));
    ranked
}
