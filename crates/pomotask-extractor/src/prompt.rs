//! Role-structured prompts for each extraction kind

use pomotask_domain::category::CATEGORY_CHOICES;
use pomotask_domain::{ChatMessage, ExtractionKind};

/// Builds the system and user messages sent to the model
pub struct PromptBuilder {
    kind: ExtractionKind,
    title: Option<String>,
}

impl PromptBuilder {
    /// Create a new prompt builder
    pub fn new(kind: ExtractionKind) -> Self {
        Self { kind, title: None }
    }

    /// Set the task title the prompt is about
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Messages for `kind` about `title`
    pub fn for_kind(kind: ExtractionKind, title: &str) -> Vec<ChatMessage> {
        Self::new(kind).with_title(title).build()
    }

    /// Build the messages
    pub fn build(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(self.system_instructions()),
            ChatMessage::user(self.user_message()),
        ]
    }

    fn system_instructions(&self) -> String {
        match self.kind {
            ExtractionKind::Metadata => METADATA_INSTRUCTIONS.to_string(),
            ExtractionKind::Category => format!(
                "{} Choose \"category\" from: {}.",
                CATEGORY_INSTRUCTIONS,
                CATEGORY_CHOICES.join(", ")
            ),
            ExtractionKind::Quote => QUOTE_INSTRUCTIONS.to_string(),
        }
    }

    fn user_message(&self) -> String {
        let title = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty());

        match (self.kind, title) {
            (ExtractionKind::Metadata, Some(title)) => {
                format!("Generate metadata JSON for: \"{}\"", title)
            }
            (ExtractionKind::Metadata, None) => "Generate metadata JSON for: \"\"".to_string(),
            (ExtractionKind::Category, Some(title)) => format!("Categorize this task: \"{}\"", title),
            (ExtractionKind::Category, None) => "Categorize this task: \"\"".to_string(),
            (ExtractionKind::Quote, Some(title)) => {
                format!("Give me a motivational quote for working on: \"{}\"", title)
            }
            (ExtractionKind::Quote, None) => "Give me a motivational quote.".to_string(),
        }
    }
}

const METADATA_INSTRUCTIONS: &str = "Return ONLY a JSON object with 2-4 relevant fields for scheduling/executing this task. ALLOWED KEYS ONLY: 'tm' (time needed), 'bt' (best time), 'pre' (prerequisites), 'nrg' (energy level), 'rem' (reminder), 'loc' (location), 'tl' (tools). Values must be concise strings. Example: {\"tm\":\"30 minutes\",\"bt\":\"Morning\",\"nrg\":\"High\"}. NO other keys allowed. NO explanation text. ONLY the JSON object.";

const CATEGORY_INSTRUCTIONS: &str = "Classify the user's task. Return ONLY a JSON object with the keys \"category\", \"confidence\" (low, medium or high), \"rationale\" (one short sentence) and \"alternatives\" (an array of other fitting categories). NO explanation text outside the JSON object.";

const QUOTE_INSTRUCTIONS: &str = "Reply with one short motivational quote (under 20 words) for someone about to start a focused work session. Return ONLY the quote text, without quotation marks or attribution.";

#[cfg(test)]
mod tests {
    use super::*;
    use pomotask_domain::Role;

    #[test]
    fn test_metadata_prompt() {
        let messages = PromptBuilder::for_kind(ExtractionKind::Metadata, "Go to the gym");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.starts_with("Return ONLY a JSON object with 2-4 relevant fields"));
        assert!(messages[0].content.contains("'tl' (tools)"));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "Generate metadata JSON for: \"Go to the gym\"");
    }

    #[test]
    fn test_category_prompt_lists_choices() {
        let messages = PromptBuilder::for_kind(ExtractionKind::Category, "File taxes");

        for choice in CATEGORY_CHOICES {
            assert!(messages[0].content.contains(choice));
        }
        assert!(messages[0].content.contains("\"alternatives\""));
        assert_eq!(messages[1].content, "Categorize this task: \"File taxes\"");
    }

    #[test]
    fn test_quote_prompt_with_and_without_title() {
        let tailored = PromptBuilder::for_kind(ExtractionKind::Quote, "Write thesis");
        assert!(tailored[1].content.contains("\"Write thesis\""));

        let generic = PromptBuilder::new(ExtractionKind::Quote).build();
        assert_eq!(generic[1].content, "Give me a motivational quote.");

        let blank = PromptBuilder::for_kind(ExtractionKind::Quote, "   ");
        assert_eq!(blank[1].content, "Give me a motivational quote.");
    }

    #[test]
    fn test_title_is_trimmed() {
        let messages = PromptBuilder::for_kind(ExtractionKind::Metadata, "  Read book \n");
        assert_eq!(messages[1].content, "Generate metadata JSON for: \"Read book\"");
    }
}
