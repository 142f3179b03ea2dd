//! HTTP route configuration, one scope per service area

pub mod flows;
pub mod health;
pub mod modules;
