//! Tarushiru AI - the annotation gateway, using rig-core.
//!
//! The core crate never talks to the network. This crate turns slices of the
//! document into requests, sends them to the provider and parses the answers.
//!
//! # Architecture
//!
//! - `tasks`: task catalogue and request construction
//! - `prompt`: instruction text per task
//! - `gateway`: provider trait, Gemini implementation and a fake for tests
//! - `response`: parsing of structured and free-text answers
//! - `service`: typed entry points used by the applications
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tarushiru_ai::{AnnotationService, GeminiGateway, DEFAULT_GEMINI_MODEL};
//!
//! let gateway = GeminiGateway::new(Some(api_key), DEFAULT_GEMINI_MODEL);
//! let service = AnnotationService::new(Arc::new(gateway));
//! let analyzed = service.analyze_entry("Went hiking with friends").await?;
//! ```

pub mod error;
pub mod gateway;
pub mod prompt;
pub mod response;
pub mod service;
pub mod tasks;

pub use error::AiError;
pub use gateway::{AnnotationGatewayTrait, FakeGateway, GeminiGateway, DEFAULT_GEMINI_MODEL};
pub use prompt::render_prompt;
pub use response::{clean_text_response, parse_entry_analysis, AnalyzedEntry};
pub use service::{AnnotationService, COACHING_FALLBACK};
pub use tasks::{AnnotationRequest, AnnotationTask, ResponseKind};
