//! Learning module records and storage
//!
//! Modules are teacher-authored lessons with attached exercises. The store
//! contract is async so HTTP handlers can share one instance; the shipped
//! implementation keeps everything in memory behind a `tokio::sync::RwLock`
//! and offers a seeded variant with three demo modules.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

/// Exercise kinds supported by the module editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExerciseKind {
    #[default]
    Text,
    MultipleChoice,
}

/// One exercise attached to a module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ExerciseKind,
}

/// A stored learning module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub exercises: Vec<Exercise>,
    pub is_public: bool,
    pub teacher_id: String,
    pub created_at: DateTime<Utc>,
}

/// Exercise payload inside a draft; the store assigns an id when omitted
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExerciseDraft {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Exercise description is required."))]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: ExerciseKind,
}

/// Create/update payload for a module
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ModuleDraft {
    #[validate(length(
        min = 3,
        max = 200,
        message = "Title must be between 3 and 200 characters."
    ))]
    pub title: String,

    #[validate(length(min = 10, message = "Content must be at least 10 characters."))]
    pub content: String,

    #[serde(default)]
    #[validate(length(max = 10, message = "Maximum 10 exercises allowed."), nested)]
    pub exercises: Vec<ExerciseDraft>,

    #[serde(default)]
    pub is_public: bool,

    #[serde(default = "default_teacher_id")]
    pub teacher_id: String,
}

fn default_teacher_id() -> String {
    "teacher1".to_string()
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("module {0} not found")]
    NotFound(Uuid),
}

/// Storage contract for learning modules
#[async_trait]
pub trait ModuleStore: Send + Sync {
    /// All modules, newest first
    async fn list(&self) -> Vec<Module>;

    async fn get(&self, id: Uuid) -> Result<Module, StoreError>;

    /// Persist a draft under a fresh id and the current timestamp
    async fn create(&self, draft: ModuleDraft) -> Module;

    /// Replace a stored module's draft-carried fields. The id and creation
    /// timestamp of the stored module are preserved.
    async fn update(&self, id: Uuid, draft: ModuleDraft) -> Result<Module, StoreError>;

    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

/// In-memory module store; nothing survives a restart
#[derive(Default)]
pub struct InMemoryModuleStore {
    modules: RwLock<HashMap<Uuid, Module>>,
}

impl InMemoryModuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with the three demo modules
    pub fn with_samples() -> Self {
        let modules = sample_modules()
            .into_iter()
            .map(|module| (module.id, module))
            .collect();
        Self {
            modules: RwLock::new(modules),
        }
    }
}

fn materialize(draft: ModuleDraft, id: Uuid, created_at: DateTime<Utc>) -> Module {
    let exercises = draft
        .exercises
        .into_iter()
        .map(|exercise| Exercise {
            id: exercise
                .id
                .unwrap_or_else(|| format!("ex-{}", Uuid::new_v4())),
            description: exercise.description,
            kind: exercise.kind,
        })
        .collect();
    Module {
        id,
        title: draft.title,
        content: draft.content,
        exercises,
        is_public: draft.is_public,
        teacher_id: draft.teacher_id,
        created_at,
    }
}

#[async_trait]
impl ModuleStore for InMemoryModuleStore {
    async fn list(&self) -> Vec<Module> {
        let modules = self.modules.read().await;
        let mut all: Vec<Module> = modules.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        all
    }

    async fn get(&self, id: Uuid) -> Result<Module, StoreError> {
        self.modules
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create(&self, draft: ModuleDraft) -> Module {
        let module = materialize(draft, Uuid::new_v4(), Utc::now());
        self.modules
            .write()
            .await
            .insert(module.id, module.clone());
        module
    }

    async fn update(&self, id: Uuid, draft: ModuleDraft) -> Result<Module, StoreError> {
        let mut modules = self.modules.write().await;
        let existing = modules.get(&id).ok_or(StoreError::NotFound(id))?;
        let updated = materialize(draft, id, existing.created_at);
        modules.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.modules
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}

/// The three demo modules seeded at server startup
pub fn sample_modules() -> Vec<Module> {
    let now = Utc::now();
    vec![
        Module {
            id: Uuid::new_v4(),
            title: "Introduction to Algebra".to_string(),
            content: "This module covers the basics of algebraic expressions and equations."
                .to_string(),
            exercises: vec![Exercise {
                id: "ex1".to_string(),
                description: "Solve for x: 2x + 5 = 15".to_string(),
                kind: ExerciseKind::Text,
            }],
            is_public: true,
            teacher_id: "teacher1".to_string(),
            created_at: now - Duration::days(2),
        },
        Module {
            id: Uuid::new_v4(),
            title: "Calculus Fundamentals".to_string(),
            content: "An overview of limits, derivatives, and integrals.".to_string(),
            exercises: vec![
                Exercise {
                    id: "ex2".to_string(),
                    description: "Find the derivative of f(x) = x^2".to_string(),
                    kind: ExerciseKind::Text,
                },
                Exercise {
                    id: "ex3".to_string(),
                    description: "What is a limit?".to_string(),
                    kind: ExerciseKind::Text,
                },
            ],
            is_public: false,
            teacher_id: "teacher1".to_string(),
            created_at: now - Duration::days(5),
        },
        Module {
            id: Uuid::new_v4(),
            title: "World History: Ancient Civilizations".to_string(),
            content: "Explore the rise and fall of ancient civilizations.".to_string(),
            exercises: vec![Exercise {
                id: "ex4".to_string(),
                description: "List three major achievements of Ancient Egypt.".to_string(),
                kind: ExerciseKind::Text,
            }],
            is_public: true,
            teacher_id: "teacher2".to_string(),
            created_at: now - Duration::days(10),
        },
    ]
}
