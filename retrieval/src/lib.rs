/*!
# FAQ Retrieval

Retrieval half of the FAQ assistant: turns a free-form question into a
bounded context string built from the most relevant corpus entries.

## Pipeline

```text
Question
  ├─> Query Expander (HyDE draft answer, one model call, fallback on failure)
  ├─> Keyword Augmenter (abbreviation table -> descriptive terms)
  └─> Vector search (top-k by cosine similarity)
        └─> Keyword reranking (up to 3 term-matching documents first)
              └─> "[Document i]" blocks joined by "\n---\n"
                    └─> Hard cutoff at the character budget
```

## Example

```rust,no_run
use faq_retrieval::{ExpansionConfig, KeywordAugmenter, QueryExpander, RetrievalConfig, Retriever};
# async fn demo(
#     model: std::sync::Arc<dyn faq_model_client::GenerativeModel>,
#     index: std::sync::Arc<dyn faq_vector_store::VectorIndex>,
# ) -> faq_retrieval::Result<()> {
let expander = QueryExpander::new(model, ExpansionConfig::default());
let retriever = Retriever::new(
    RetrievalConfig::default(),
    expander,
    KeywordAugmenter::default(),
    index,
)?;

let context = retriever.retrieve("ÇAP başvurusu nasıl yapılır?", 5, 5000).await;
println!("{context}");
# Ok(())
# }
```

A failed vector search is logged and yields an empty context; callers decide
what an empty context means for the user.
*/

mod config;
mod context;
mod error;
mod expander;
mod keywords;
mod rerank;
mod result;
mod retrieval;

pub use config::{ExpansionConfig, RetrievalConfig};
pub use context::{DOCUMENT_SEPARATOR, format_context, truncate_chars};
pub use error::{Result, RetrievalError};
pub use expander::{Expansion, QueryExpander};
pub use keywords::{DEFAULT_KEYWORD_RULES, KeywordAugmenter, KeywordRule};
pub use rerank::{KEYWORD_PRIORITY_SLOTS, keyword_rerank};
pub use result::{RetrievalStats, RetrievedContext};
pub use retrieval::Retriever;
