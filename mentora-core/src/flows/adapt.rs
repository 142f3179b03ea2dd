//! Adaptive learning path flow
//!
//! Feeds one student's recent performance to the provider and gets back a
//! difficulty adjustment plus the reasoning behind it. The flow passes the
//! provider's verdict through unchanged.

use crate::flows::{Difficulty, Flow};
use crate::prompts::{self, PromptTemplate};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::Validate;

/// Performance counters gathered while the student worked through a lesson
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPerformanceData {
    pub exercises_completed: u32,
    pub correct_answers: u32,
    /// Time spent on the lesson in minutes
    pub time_spent: u32,
    pub hint_used: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AdaptLearningPathInput {
    #[validate(length(min = 1, message = "Student ID is required."))]
    pub student_id: String,

    #[validate(length(min = 3, message = "Topic is required."))]
    pub topic: String,

    pub performance_data: StudentPerformanceData,

    pub current_difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptLearningPathOutput {
    /// The new difficulty level of the lesson
    pub new_difficulty: Difficulty,
    /// The reasoning behind the difficulty adjustment
    pub reasoning: String,
}

/// Flow descriptor for learning path adaptation
pub struct AdaptLearningPath;

impl Flow for AdaptLearningPath {
    type Input = AdaptLearningPathInput;
    type Output = AdaptLearningPathOutput;

    fn name(&self) -> &'static str {
        "adapt_learning_path"
    }

    fn template(&self) -> &'static PromptTemplate {
        &prompts::ADAPT_LEARNING_PATH
    }

    fn bindings(&self, input: &Self::Input) -> Vec<(&'static str, String)> {
        let data = &input.performance_data;
        vec![
            ("student_id", input.student_id.clone()),
            ("topic", input.topic.clone()),
            ("exercises_completed", data.exercises_completed.to_string()),
            ("correct_answers", data.correct_answers.to_string()),
            ("time_spent", data.time_spent.to_string()),
            ("hint_used", data.hint_used.to_string()),
            (
                "current_difficulty",
                input.current_difficulty.as_str().to_string(),
            ),
        ]
    }

    fn output_schema(&self) -> Value {
        json!({
            "title": "learning_path_adjustment",
            "type": "object",
            "properties": {
                "newDifficulty": {
                    "type": "string",
                    "enum": ["easy", "medium", "hard"],
                    "description": "The new difficulty level of the lesson."
                },
                "reasoning": {
                    "type": "string",
                    "description": "The reasoning behind the difficulty adjustment."
                }
            },
            "required": ["newDifficulty", "reasoning"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> AdaptLearningPathInput {
        AdaptLearningPathInput {
            student_id: "student_001".to_string(),
            topic: "Introduction to Fractions".to_string(),
            performance_data: StudentPerformanceData {
                exercises_completed: 5,
                correct_answers: 3,
                time_spent: 30,
                hint_used: false,
            },
            current_difficulty: Difficulty::Medium,
        }
    }

    #[test]
    fn accepts_complete_input() {
        assert!(valid_input().validate().is_ok());
    }

    #[test]
    fn rejects_blank_student_id() {
        let mut input = valid_input();
        input.student_id = String::new();
        let errors = input.validate().unwrap_err();
        assert_eq!(
            errors.field_errors()["student_id"][0].message.as_deref(),
            Some("Student ID is required.")
        );
    }

    #[test]
    fn rejects_short_topic() {
        let mut input = valid_input();
        input.topic = "ab".to_string();
        assert!(input.validate().is_err());
    }

    #[test]
    fn hint_flag_renders_as_a_boolean_word() {
        let mut input = valid_input();
        input.performance_data.hint_used = true;
        let prompt = AdaptLearningPath
            .template()
            .render(&AdaptLearningPath.bindings(&input))
            .unwrap();
        assert!(prompt.contains("Hint Used: true"));
        assert!(prompt.contains("Time Spent: 30 minutes"));
        assert!(prompt.contains("Student ID: student_001"));
    }

    #[test]
    fn input_requires_every_performance_counter() {
        let result = serde_json::from_value::<AdaptLearningPathInput>(json!({
            "studentId": "student_001",
            "topic": "Fractions",
            "performanceData": {
                "exercisesCompleted": 5,
                "correctAnswers": 3,
                "hintUsed": false
            },
            "currentDifficulty": "medium"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn output_uses_camel_case_on_the_wire() {
        let output: AdaptLearningPathOutput = serde_json::from_value(json!({
            "newDifficulty": "easy",
            "reasoning": "Low accuracy and a hint suggest easing off."
        }))
        .unwrap();
        assert_eq!(output.new_difficulty, Difficulty::Easy);

        let serialized = serde_json::to_value(&output).unwrap();
        assert_eq!(serialized["newDifficulty"], "easy");
    }

    #[test]
    fn output_difficulty_outside_the_enum_is_rejected() {
        let result = serde_json::from_value::<AdaptLearningPathOutput>(json!({
            "newDifficulty": "brutal",
            "reasoning": "n/a"
        }));
        assert!(result.is_err());
    }
}
