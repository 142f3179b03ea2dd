//! Quiz question generation flow
//!
//! Produces a bounded batch of question/answer pairs from lesson content.
//! The requested count steers the prompt; the reply is accepted as long as
//! it carries between one and [`limits::MAX_QUIZ_QUESTIONS`] well-formed
//! questions, even when the provider ignores the exact count.

use crate::config::constants::limits;
use crate::flows::{Difficulty, Flow, FlowError};
use crate::prompts::{self, PromptTemplate};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizQuestionsInput {
    /// The content of the lesson module to generate questions for
    #[validate(length(
        min = 50,
        max = 5000,
        message = "Lesson content must be between 50 and 5000 characters."
    ))]
    pub lesson_content: String,

    /// The number of quiz questions to generate
    #[serde(default = "default_question_count")]
    #[validate(range(
        min = 1,
        max = 10,
        message = "Number of questions must be between 1 and 10."
    ))]
    pub number_of_questions: u8,

    /// The difficulty level of the quiz questions
    #[serde(default)]
    pub difficulty: Difficulty,
}

fn default_question_count() -> u8 {
    limits::DEFAULT_QUIZ_QUESTIONS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub answer: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateQuizQuestionsOutput {
    pub questions: Vec<QuizQuestion>,
}

/// Flow descriptor for quiz generation
pub struct GenerateQuizQuestions;

impl Flow for GenerateQuizQuestions {
    type Input = GenerateQuizQuestionsInput;
    type Output = GenerateQuizQuestionsOutput;

    fn name(&self) -> &'static str {
        "generate_quiz_questions"
    }

    fn template(&self) -> &'static PromptTemplate {
        &prompts::GENERATE_QUIZ_QUESTIONS
    }

    fn bindings(&self, input: &Self::Input) -> Vec<(&'static str, String)> {
        vec![
            (
                "number_of_questions",
                input.number_of_questions.to_string(),
            ),
            ("difficulty", input.difficulty.as_str().to_string()),
            ("lesson_content", input.lesson_content.clone()),
        ]
    }

    fn output_schema(&self) -> Value {
        json!({
            "title": "quiz_questions",
            "type": "object",
            "properties": {
                "questions": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "question": {
                                "type": "string",
                                "description": "The quiz question."
                            },
                            "answer": {
                                "type": "string",
                                "description": "The correct answer to the question."
                            },
                            "difficulty": {
                                "type": "string",
                                "enum": ["easy", "medium", "hard"],
                                "description": "The difficulty level of the question."
                            }
                        },
                        "required": ["question", "answer", "difficulty"]
                    }
                }
            },
            "required": ["questions"]
        })
    }

    fn validate_output(&self, output: &Self::Output) -> Result<(), FlowError> {
        if output.questions.is_empty() {
            return Err(FlowError::InvalidOutput(
                "provider returned no questions".to_string(),
            ));
        }
        if output.questions.len() > limits::MAX_QUIZ_QUESTIONS {
            return Err(FlowError::InvalidOutput(format!(
                "provider returned {} questions, more than the {} allowed",
                output.questions.len(),
                limits::MAX_QUIZ_QUESTIONS
            )));
        }
        Ok(())
    }
}
