//! Shared application state handed to every HTTP handler

use std::sync::Arc;

use mentora_core::flows::FlowEngine;
use mentora_core::modules::ModuleStore;

pub struct AppState {
    pub engine: FlowEngine,
    pub modules: Arc<dyn ModuleStore>,
}

impl AppState {
    pub fn new(engine: FlowEngine, modules: Arc<dyn ModuleStore>) -> Self {
        Self { engine, modules }
    }
}
