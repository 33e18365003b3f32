use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use tarushiru_ai::{AnnotationService, GeminiGateway};
use tarushiru_core::errors::AuthError;
use tarushiru_core::store::AppStore;
use tarushiru_core::ViewController;
use tarushiru_storage_file::FileDocumentStorage;

use crate::config::Config;

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Loads the document from `path` into a fresh, logged-out controller.
pub fn open_controller(path: &Path) -> ViewController {
    let storage = Arc::new(FileDocumentStorage::new(path));
    let store = AppStore::load(storage);
    tracing::debug!(
        "Document loaded from {} ({:?})",
        path.display(),
        store.load_source()
    );
    ViewController::new(store)
}

/// Passes the soft password gate with the stored profile.
pub fn authenticate(vc: &mut ViewController, password: Option<&str>) -> anyhow::Result<()> {
    let email = match &vc.data().user {
        Some(user) => user.email.clone(),
        None => return Err(AuthError::NoProfile.into()),
    };
    vc.login(&email, password.unwrap_or_default())?;
    Ok(())
}

pub fn annotation_service(config: &Config) -> AnnotationService<GeminiGateway> {
    let gateway = GeminiGateway::new(config.gemini_api_key.clone(), config.ai_model.clone());
    AnnotationService::new(Arc::new(gateway))
}
