//! End-to-end tests for the extraction pipeline

#[cfg(test)]
mod tests {
    use crate::{
        extract_embedded_fragment, merge_category, normalize, validate_metadata, Extractor,
        ExtractorConfig, ExtractorError, FALLBACK_QUOTE,
    };
    use pomotask_domain::{
        CategoryRecord, CategoryResponse, MetadataKey, MetadataRecord, RawCompletion, Role,
    };
    use pomotask_llm::MockProvider;
    use serde_json::json;

    fn extractor_with(response: &str) -> Extractor<MockProvider> {
        Extractor::new(MockProvider::new(response), ExtractorConfig::default())
    }

    #[test]
    fn test_missing_completion_normalizes_to_fallback_text() {
        assert_eq!(
            normalize(&RawCompletion::Missing).as_str(),
            "{\"tm\":\"30 minutes\",\"rem\":\"Check task details\"}"
        );
    }

    #[test]
    fn test_pipeline_on_fenced_completion() {
        let raw = RawCompletion::from("```json\n{\"tm\":\"1 hour\",\"bt\":\"Morning\",\"foo\":\"x\"}\n```");
        let record = validate_metadata(normalize(&raw).as_str());

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"tm": "1 hour", "bt": "Morning"})
        );
    }

    #[test]
    fn test_recovery_examples() {
        assert!(extract_embedded_fragment(None).is_none());
        assert!(extract_embedded_fragment(Some("definitely not json")).is_none());

        let fragment = extract_embedded_fragment(Some(
            "```json\n{\"category\":\"Study\",\"alternatives\":[\"Education\"]}\n```",
        ))
        .unwrap();
        assert_eq!(fragment["category"], "Study");
    }

    #[test]
    fn test_category_merge_examples() {
        let primary_only = CategoryResponse {
            category: Some("Work".to_string()),
            ..Default::default()
        };
        assert_eq!(
            merge_category(&primary_only),
            CategoryRecord {
                category: "Work".to_string(),
                confidence: None,
                rationale: None,
                alternatives: vec![],
            }
        );

        let fragment_only = CategoryResponse {
            description: Some(
                "```json\n{\"category\":\"Study\",\"alternatives\":[\"Education\"]}\n```".to_string(),
            ),
            ..Default::default()
        };
        let record = merge_category(&fragment_only);
        assert_eq!(record.category, "Study");
        assert_eq!(record.alternatives, vec!["Education".to_string()]);
    }

    #[tokio::test]
    async fn test_full_clarify_flow() {
        let extractor = extractor_with(
            "```json\n{\"tm\":\"45 minutes\",\"loc\":\"Gym\",\"nrg\":\"High\",\"mood\":\"great\"}\n```",
        );

        let result = extractor.clarify("Go to the gym").await.unwrap();

        assert_eq!(result.original_task, "Go to the gym");
        let labeled: Vec<_> = result.task_context.labeled().collect();
        assert_eq!(
            labeled,
            vec![
                ("Time needed", "45 minutes"),
                ("Location", "Gym"),
                ("Energy level", "High"),
            ]
        );

        let messages = extractor.provider().last_messages().unwrap();
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].content, "Generate metadata JSON for: \"Go to the gym\"");
    }

    #[tokio::test]
    async fn test_clarify_with_prose_completion_falls_back() {
        let extractor = extractor_with("Sure! You should spend about an hour on this.");
        let result = extractor.clarify("Write report").await.unwrap();
        assert_eq!(result.task_context, MetadataRecord::fallback());
    }

    #[tokio::test]
    async fn test_clarify_with_one_useful_key_falls_back() {
        let extractor = extractor_with("{\"tm\":\"2 hours\",\"notes\":\"long\"}");
        let result = extractor.clarify("Write report").await.unwrap();
        assert_eq!(result.task_context.get(MetadataKey::Tm), Some("30 minutes"));
        assert_eq!(result.task_context.get(MetadataKey::Rem), Some("Check task details"));
    }

    #[tokio::test]
    async fn test_full_categorize_flow() {
        let extractor = extractor_with(
            "I would say:\n```json\n{\"category\":\"Finance\",\"confidence\":0.9,\"rationale\":\"Money\",\"alternatives\":[\"Personal\"]}\n```",
        );

        let result = extractor.categorize("Pay rent").await.unwrap();

        // The prose prefix keeps the completion from parsing as a whole.
        assert!(result.response.category.is_none());

        let record = result.record();
        assert_eq!(record.category, "Finance");
        assert_eq!(record.confidence.as_deref(), Some("0.9"));
        assert_eq!(record.rationale.as_deref(), Some("Money"));
        assert_eq!(record.alternatives, vec!["Personal".to_string()]);
    }

    #[tokio::test]
    async fn test_full_motivate_flow() {
        let extractor = extractor_with("  \"Small steps every day.\"  ");
        let quote = extractor.motivate(Some("Study")).await.unwrap();
        assert_eq!(quote, "\"Small steps every day.\"");

        let extractor = extractor_with("");
        assert_eq!(extractor.motivate(None).await.unwrap(), FALLBACK_QUOTE);
    }

    #[tokio::test]
    async fn test_only_transport_failures_escape() {
        let mut llm = MockProvider::new("garbage");
        llm.add_error("Categorize this task: \"Offline\"");
        let extractor = Extractor::new(llm, ExtractorConfig::default());

        assert!(extractor.clarify("Online").await.is_ok());
        assert!(extractor.categorize("Online").await.is_ok());
        assert!(matches!(
            extractor.categorize("Offline").await,
            Err(ExtractorError::Llm(_))
        ));
    }
}
