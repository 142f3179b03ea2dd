//! Prompt templates as plain data
//!
//! Each generation feature owns one fixed natural-language template. A template
//! carries its substitution keys explicitly so rendering can be exercised
//! without touching a provider.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("no value bound for placeholder `{0}`")]
    MissingValue(String),
    #[error("template `{0}` has an unterminated placeholder")]
    UnterminatedPlaceholder(String),
    #[error("value bound for `{0}`, which is not a placeholder of this template")]
    UnknownKey(String),
}

/// A fixed prompt template with named `{key}` placeholders
#[derive(Debug, Clone, Copy)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub text: &'static str,
    pub keys: &'static [&'static str],
}

impl PromptTemplate {
    /// Substitute every placeholder with its bound value.
    ///
    /// Single pass over the template text: bound values are copied verbatim
    /// and never re-scanned for placeholders.
    pub fn render(&self, bindings: &[(&str, String)]) -> Result<String, TemplateError> {
        for (key, _) in bindings {
            if !self.keys.iter().any(|k| k == key) {
                return Err(TemplateError::UnknownKey((*key).to_string()));
            }
        }

        let mut rendered = String::with_capacity(self.text.len());
        let mut rest = self.text;
        while let Some(start) = rest.find('{') {
            rendered.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after
                .find('}')
                .ok_or_else(|| TemplateError::UnterminatedPlaceholder(self.name.to_string()))?;
            let key = &after[..end];
            let value = bindings
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
                .ok_or_else(|| TemplateError::MissingValue(key.to_string()))?;
            rendered.push_str(value);
            rest = &after[end + 1..];
        }
        rendered.push_str(rest);
        Ok(rendered)
    }
}

pub static SUMMARIZE_LESSON_TOPIC: PromptTemplate = PromptTemplate {
    name: "summarize_lesson_topic",
    text: "You are an expert educator. Please provide a concise summary of the following lesson topic, focusing on the key concepts:\n\nTopic: {topic}\nContent: {lesson_content}\n\nSummary:",
    keys: &["topic", "lesson_content"],
};

pub static GENERATE_QUIZ_QUESTIONS: PromptTemplate = PromptTemplate {
    name: "generate_quiz_questions",
    text: "You are an expert teacher generating quiz questions for a lesson module.\n\nGenerate {number_of_questions} quiz questions of {difficulty} difficulty based on the following lesson content:\n\n{lesson_content}\n\nThe questions should assess the student's understanding of the material. Each question object should have the 'question', 'answer', and 'difficulty' fields.\nOutput a JSON array of question objects. Do not include any surrounding explanatory text.\nEnsure that the difficulty for each question is correctly set based on the user's requested difficulty level.",
    keys: &["number_of_questions", "difficulty", "lesson_content"],
};

pub static ADAPT_LEARNING_PATH: PromptTemplate = PromptTemplate {
    name: "adapt_learning_path",
    text: "You are an AI learning path adapter that adjusts the difficulty of the lesson based on student performance.\n\nStudent ID: {student_id}\nTopic: {topic}\nPerformance Data:\n  - Exercises Completed: {exercises_completed}\n  - Correct Answers: {correct_answers}\n  - Time Spent: {time_spent} minutes\n  - Hint Used: {hint_used}\nCurrent Difficulty: {current_difficulty}\n\nBased on the student's performance, determine whether the difficulty should be increased, decreased, or remain the same.\n\nConsider the following factors:\n  - A high number of correct answers and a short amount of time spent may indicate that the difficulty should be increased.\n  - A low number of correct answers and a long amount of time spent may indicate that the difficulty should be decreased.\n  - Using a hint may indicate that the difficulty should be decreased.\n\nReturn the new difficulty level and the reasoning behind the adjustment.",
    keys: &[
        "student_id",
        "topic",
        "exercises_completed",
        "correct_answers",
        "time_spent",
        "hint_used",
        "current_difficulty",
    ],
};
