//! Question answering over a single document
//!
//! The [`Answerer`] ties the pipeline together:
//! 1. Get the document's extraction from the cache (extracting on first use)
//! 2. Build a prompt from the question and document text
//! 3. Ask the language model, bounded by the configured timeout
//! 4. Split the reply into answer text and page citations
//!
//! Model failures do not fail the request. The caller receives a normal
//! [`AnswerResult`] whose response apologizes and names the failure, so a
//! model outage degrades the chat instead of breaking it.

use crate::cache::ExtractionCache;
use crate::citations;
use crate::config::QaConfig;
use crate::error::QaError;
use crate::prompt::PromptBuilder;
use crate::types::AnswerRequest;
use pagecite_domain::traits::{DocumentResolver, LlmProvider, TextExtractor};
use pagecite_domain::{AnswerResult, DocumentId, ExtractedDocument};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Substituted when the model answers with nothing
pub const EMPTY_REPLY_FALLBACK: &str = "Sorry, I could not generate a response.";

/// Answers questions about stored documents
pub struct Answerer<R, X, L> {
    resolver: Arc<R>,
    extractor: Arc<X>,
    llm: Arc<L>,
    cache: ExtractionCache,
    config: QaConfig,
}

impl<R, X, L> Answerer<R, X, L>
where
    R: DocumentResolver,
    X: TextExtractor,
    L: LlmProvider,
{
    /// Create a new answerer with an empty cache
    pub fn new(resolver: R, extractor: X, llm: L, config: QaConfig) -> Self {
        Self::from_parts(
            Arc::new(resolver),
            Arc::new(extractor),
            Arc::new(llm),
            ExtractionCache::new(),
            config,
        )
    }

    /// Create an answerer from shared collaborators and an existing cache
    pub fn from_parts(
        resolver: Arc<R>,
        extractor: Arc<X>,
        llm: Arc<L>,
        cache: ExtractionCache,
        config: QaConfig,
    ) -> Self {
        Self {
            resolver,
            extractor,
            llm,
            cache,
            config,
        }
    }

    /// The extraction cache this answerer reads through
    pub fn cache(&self) -> &ExtractionCache {
        &self.cache
    }

    /// Active configuration
    pub fn config(&self) -> &QaConfig {
        &self.config
    }

    /// Extract a document into the cache without asking anything
    pub async fn extract(
        &self,
        document_id: &DocumentId,
    ) -> Result<Arc<ExtractedDocument>, QaError> {
        if document_id.is_blank() {
            return Err(QaError::InvalidRequest("Document id is required".to_string()));
        }
        self.cache
            .get_or_extract(document_id, &self.resolver, &self.extractor)
            .await
    }

    /// Answer a question about one document
    ///
    /// # Errors
    ///
    /// Returns [`QaError::InvalidRequest`] for a blank question or document
    /// id, and any extraction error from the cache. Model failures are never
    /// returned; they produce a degraded answer instead.
    pub async fn answer(&self, request: AnswerRequest) -> Result<AnswerResult, QaError> {
        if request.question.trim().is_empty() {
            return Err(QaError::InvalidRequest("Question is required".to_string()));
        }

        info!(
            "Answering question about '{}' ({} chars)",
            request.document_id,
            request.question.len()
        );

        // Step 1: Extraction
        let document = self.extract(&request.document_id).await?;

        // Step 2: Prompt
        let prompt = PromptBuilder::new(
            &request.question,
            request.label(),
            document.page_count,
            &document.full_text,
        )
        .with_max_content_chars(self.config.max_prompt_content_chars)
        .build();
        debug!("Prompt length: {} chars", prompt.len());

        // Step 3: Model
        let reply = match self.call_llm(&prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Model call for '{}' failed: {}", request.document_id, e);
                return Ok(degraded_answer(request.question, &e, document.page_count));
            }
        };
        let reply = if reply.trim().is_empty() {
            EMPTY_REPLY_FALLBACK.to_string()
        } else {
            reply
        };

        // Step 4: Citations
        let parsed = citations::parse(&reply, document.page_count);
        info!(
            "Answered question about '{}' with {} citations",
            request.document_id,
            parsed.citations.len()
        );

        Ok(AnswerResult {
            question: request.question,
            response: parsed.response,
            citations: parsed.citations,
            page_count: document.page_count,
        })
    }

    async fn call_llm(&self, prompt: &str) -> Result<String, QaError> {
        let timeout = self.config.model_timeout();
        match tokio::time::timeout(timeout, self.llm.generate(prompt)).await {
            Ok(Ok(reply)) => Ok(reply),
            Ok(Err(e)) => Err(QaError::ModelUnavailable(e.to_string())),
            Err(_) => Err(QaError::ModelUnavailable(format!(
                "Request timed out after {}s",
                timeout.as_secs()
            ))),
        }
    }
}

fn degraded_answer(question: String, error: &QaError, page_count: usize) -> AnswerResult {
    let reason = match error {
        QaError::ModelUnavailable(reason) => reason.clone(),
        other => other.to_string(),
    };
    AnswerResult {
        question,
        response: format!(
            "Sorry, I encountered an error while processing your question ({}). Please try again.",
            reason
        ),
        citations: Vec::new(),
        page_count,
    }
}
