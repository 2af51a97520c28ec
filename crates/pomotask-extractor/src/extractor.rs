//! Core Extractor implementation

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::fallback::quote_or_fallback;
use crate::merge::category_response;
use crate::normalizer::normalize;
use crate::prompt::PromptBuilder;
use crate::types::{CategorizeResult, ClarifyResult, Extraction};
use crate::validator::parse_metadata;
use pomotask_domain::traits::LlmProvider;
use pomotask_domain::{ExtractionKind, RawCompletion};
use std::sync::Arc;
use tracing::{debug, info};

/// The Extractor turns a task title into a validated record
pub struct Extractor<L>
where
    L: LlmProvider,
{
    llm_provider: Arc<L>,
    config: ExtractorConfig,
}

impl<L> Clone for Extractor<L>
where
    L: LlmProvider,
{
    fn clone(&self) -> Self {
        Self {
            llm_provider: Arc::clone(&self.llm_provider),
            config: self.config.clone(),
        }
    }
}

impl<L> Extractor<L>
where
    L: LlmProvider,
{
    /// Create a new Extractor
    pub fn new(llm_provider: L, config: ExtractorConfig) -> Self {
        Self {
            llm_provider: Arc::new(llm_provider),
            config,
        }
    }

    /// Create a new Extractor after validating `config`
    pub fn try_new(llm_provider: L, config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self::new(llm_provider, config))
    }

    /// Active configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// The underlying provider
    pub fn provider(&self) -> &L {
        &self.llm_provider
    }

    /// Produce scheduling metadata for a task.
    ///
    /// A malformed or incomplete completion yields the fallback record.
    pub async fn clarify(&self, title: &str) -> Result<ClarifyResult, ExtractorError> {
        let raw = self.dispatch(ExtractionKind::Metadata, title).await?;

        let normalized = normalize(&raw);
        debug!("Cleaned metadata completion: {}", normalized);

        let task_context = parse_metadata(normalized.as_str()).or_fallback();

        info!("Clarified '{}' with {} fields", title.trim(), task_context.len());

        Ok(ClarifyResult {
            original_task: title.to_string(),
            task_context,
        })
    }

    /// Classify a task.
    ///
    /// Returns the transport shape. Merge it with
    /// [`CategorizeResult::record`] to get a category record.
    pub async fn categorize(&self, title: &str) -> Result<CategorizeResult, ExtractorError> {
        let raw = self.dispatch(ExtractionKind::Category, title).await?;
        let response = category_response(&raw);

        info!(
            "Categorized '{}' as {}",
            title.trim(),
            response.category.as_deref().unwrap_or("<none>")
        );

        Ok(CategorizeResult {
            original_task: title.to_string(),
            response,
        })
    }

    /// Fetch a motivational quote, optionally tailored to a task.
    ///
    /// A blank or absent title asks for a generic quote.
    pub async fn motivate(&self, title: Option<&str>) -> Result<String, ExtractorError> {
        let mut builder = PromptBuilder::new(ExtractionKind::Quote);
        if let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) {
            self.check_title(title)?;
            builder = builder.with_title(title);
        }

        let raw = self.call_llm(ExtractionKind::Quote, builder).await?;
        Ok(quote_or_fallback(&raw))
    }

    /// Run the extraction selected by `kind`
    pub async fn extract(
        &self,
        kind: ExtractionKind,
        title: &str,
    ) -> Result<Extraction, ExtractorError> {
        match kind {
            ExtractionKind::Metadata => self.clarify(title).await.map(Extraction::Metadata),
            ExtractionKind::Category => self.categorize(title).await.map(Extraction::Category),
            ExtractionKind::Quote => self.motivate(Some(title)).await.map(Extraction::Quote),
        }
    }

    /// Validate the title, build the prompt and call the model
    async fn dispatch(
        &self,
        kind: ExtractionKind,
        title: &str,
    ) -> Result<RawCompletion, ExtractorError> {
        let title = self.check_title(title)?;
        let builder = PromptBuilder::new(kind).with_title(title);
        self.call_llm(kind, builder).await
    }

    fn check_title<'a>(&self, title: &'a str) -> Result<&'a str, ExtractorError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ExtractorError::EmptyTitle);
        }
        let len = title.chars().count();
        if len > self.config.max_title_length {
            return Err(ExtractorError::TitleTooLong(len, self.config.max_title_length));
        }
        Ok(title)
    }

    /// Call the LLM provider
    async fn call_llm(
        &self,
        kind: ExtractionKind,
        builder: PromptBuilder,
    ) -> Result<RawCompletion, ExtractorError> {
        let messages = builder.build();
        let options = self.config.settings(kind).options();

        debug!("Requesting {} completion ({} messages)", kind, messages.len());

        let raw = self
            .llm_provider
            .complete(&messages, &options)
            .await
            .map_err(|e| ExtractorError::Llm(e.to_string()))?;

        match &raw {
            RawCompletion::Text(text) => debug!("Raw {} completion: {} chars", kind, text.len()),
            RawCompletion::Missing => debug!("Raw {} completion missing", kind),
        }

        Ok(raw)
    }
}
