//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into read-or-create and save use-cases.
//! - Keep CLI and editor hosts decoupled from storage details.

pub mod menu_service;
