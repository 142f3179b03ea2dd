//! Lesson topic summarization flow
//!
//! Takes a topic name plus the lesson body and asks the provider for a
//! concise summary. The provider reply only has to carry `summary`; the
//! `progress` note is overwritten with a fixed phrase after validation, so
//! whatever the model put there never reaches the caller.

use crate::flows::{Flow, FlowError};
use crate::prompts::{self, PromptTemplate};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::Validate;

/// Progress note stamped onto every successful summarization
pub const SUMMARY_PROGRESS_NOTE: &str = "Generated a concise summary of the lesson topic.";

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeLessonTopicInput {
    /// The topic of the lesson to summarize
    #[validate(length(
        min = 3,
        max = 100,
        message = "Topic name must be between 3 and 100 characters."
    ))]
    pub topic: String,

    /// The content of the lesson
    #[validate(length(
        min = 50,
        max = 10000,
        message = "Lesson content must be between 50 and 10,000 characters."
    ))]
    pub lesson_content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizeLessonTopicOutput {
    /// A concise summary of the lesson topic
    pub summary: String,

    /// Fixed progress note, set by the flow rather than the provider
    #[serde(default)]
    pub progress: String,
}

/// Flow descriptor for lesson summarization
pub struct SummarizeLessonTopic;

impl Flow for SummarizeLessonTopic {
    type Input = SummarizeLessonTopicInput;
    type Output = SummarizeLessonTopicOutput;

    fn name(&self) -> &'static str {
        "summarize_lesson_topic"
    }

    fn template(&self) -> &'static PromptTemplate {
        &prompts::SUMMARIZE_LESSON_TOPIC
    }

    fn bindings(&self, input: &Self::Input) -> Vec<(&'static str, String)> {
        vec![
            ("topic", input.topic.clone()),
            ("lesson_content", input.lesson_content.clone()),
        ]
    }

    fn output_schema(&self) -> Value {
        json!({
            "title": "lesson_summary",
            "type": "object",
            "properties": {
                "summary": {
                    "type": "string",
                    "description": "A concise summary of the lesson topic."
                },
                "progress": {
                    "type": "string",
                    "description": "Progress summary of the summary."
                }
            },
            "required": ["summary"]
        })
    }

    fn validate_output(&self, output: &Self::Output) -> Result<(), FlowError> {
        if output.summary.trim().is_empty() {
            return Err(FlowError::InvalidOutput(
                "summary must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn post_process(&self, mut output: Self::Output) -> Self::Output {
        output.progress = SUMMARY_PROGRESS_NOTE.to_string();
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> SummarizeLessonTopicInput {
        SummarizeLessonTopicInput {
            topic: "Photosynthesis".to_string(),
            lesson_content: "Photosynthesis converts light energy into chemical energy stored in \
                             glucose, releasing oxygen as a byproduct."
                .to_string(),
        }
    }

    #[test]
    fn accepts_input_within_bounds() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn rejects_short_topic_with_form_message() {
        let mut input = valid_input();
        input.topic = "Ab".to_string();
        let errors = input.validate().unwrap_err();
        let field_errors = errors.field_errors();
        assert_eq!(
            field_errors["topic"][0].message.as_deref(),
            Some("Topic name must be between 3 and 100 characters.")
        );
    }

    #[test]
    fn rejects_short_lesson_content() {
        let mut input = valid_input();
        input.lesson_content = "too short".to_string();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("lesson_content"));
    }

    #[test]
    fn rejects_oversized_lesson_content() {
        let mut input = valid_input();
        input.lesson_content = "x".repeat(10_001);
        assert!(input.validate().is_err());
    }

    #[test]
    fn input_deserializes_from_camel_case() {
        let input: SummarizeLessonTopicInput = serde_json::from_value(json!({
            "topic": "Cell Division",
            "lessonContent": "Mitosis splits one cell into two identical daughter cells over \
                              several well-defined phases."
        }))
        .unwrap();
        assert_eq!(input.topic, "Cell Division");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn post_process_overwrites_provider_progress() {
        let output = SummarizeLessonTopic.post_process(SummarizeLessonTopicOutput {
            summary: "Plants make sugar from light.".to_string(),
            progress: "model-invented note".to_string(),
        });
        assert_eq!(output.progress, SUMMARY_PROGRESS_NOTE);
        assert_eq!(output.summary, "Plants make sugar from light.");
    }

    #[test]
    fn reply_without_progress_deserializes() {
        let output: SummarizeLessonTopicOutput =
            serde_json::from_value(json!({"summary": "Short and clear."})).unwrap();
        assert_eq!(output.progress, "");
    }

    #[test]
    fn empty_summary_fails_output_validation() {
        let output = SummarizeLessonTopicOutput {
            summary: "   ".to_string(),
            progress: String::new(),
        };
        assert!(matches!(
            SummarizeLessonTopic.validate_output(&output),
            Err(FlowError::InvalidOutput(_))
        ));
    }

    #[test]
    fn schema_requires_only_the_summary() {
        let schema = SummarizeLessonTopic.output_schema();
        assert_eq!(schema["title"], "lesson_summary");
        assert_eq!(schema["required"], json!(["summary"]));
    }
}
