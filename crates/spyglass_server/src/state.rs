//! Shared application state.

use spyglass_error::{ServerError, ServerErrorKind, SpyglassResult};
use spyglass_interface::{AdLibrary, ModelDiscovery, SpeechSynthesizer, Streaming};
use spyglass_studio::{Session, Studio};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory session table. Sessions live for the process lifetime only.
pub type SessionStore = Arc<RwLock<HashMap<Uuid, Session>>>;

/// Everything the HTTP handlers need, shared behind an `Arc`.
pub struct AppState {
    /// Content-generation operations over the configured backend.
    pub studio: Studio<Arc<dyn Streaming>>,
    /// Live model listing for the diagnostics endpoint.
    pub catalog: Arc<dyn ModelDiscovery>,
    /// Ad-library scraper, absent when no scraper token is configured.
    pub ad_library: Option<Arc<dyn AdLibrary>>,
    /// Text-to-speech backend.
    pub speech: Arc<dyn SpeechSynthesizer>,
    /// Fallback models the generator will try after its primary, in order.
    pub fallback_models: Vec<String>,
    /// Session table.
    pub sessions: SessionStore,
}

impl AppState {
    /// Assemble state from wired backends.
    pub fn new(
        generator: Arc<dyn Streaming>,
        catalog: Arc<dyn ModelDiscovery>,
        ad_library: Option<Arc<dyn AdLibrary>>,
        speech: Arc<dyn SpeechSynthesizer>,
        fallback_models: Vec<String>,
    ) -> Self {
        Self {
            studio: Studio::new(generator),
            catalog,
            ad_library,
            speech,
            fallback_models,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a session and return a copy of it.
    pub fn create_session(&self) -> Session {
        let session = Session::new();
        self.sessions
            .write()
            .unwrap()
            .insert(session.id, session.clone());
        session
    }

    /// Copy a session out of the table.
    pub fn session(&self, id: &Uuid) -> SpyglassResult<Session> {
        self.sessions
            .read()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| session_not_found(id))
    }

    /// Mutate a session in place under the write lock.
    ///
    /// The closure must not block: generation runs against a copied session
    /// first, and only the finished result is written back here.
    pub fn update_session<T>(
        &self,
        id: &Uuid,
        update: impl FnOnce(&mut Session) -> T,
    ) -> SpyglassResult<T> {
        let mut sessions = self.sessions.write().unwrap();
        let session = sessions.get_mut(id).ok_or_else(|| session_not_found(id))?;
        Ok(update(session))
    }
}

fn session_not_found(id: &Uuid) -> spyglass_error::SpyglassError {
    ServerError::new(ServerErrorKind::SessionNotFound(id.to_string())).into()
}
