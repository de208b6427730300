//! Scene selection and per-request outcome slots.
//!
//! A [`Session`] owns the user's inputs (provider, key, brand, model) and the
//! result of the most recent scene selection. Selecting a scene dispatches the
//! settings and example-image requests as two independent tokio tasks; each
//! task writes only its own slot, and only if no newer selection has started
//! in the meantime.

use crate::catalog::Scene;
use crate::credential::{CameraModelInput, CredentialForm};
use crate::outcome::{FailureReason, RequestOutcome};
use crate::provider::{
    HttpProviderFactory, PhotoProvider, PhotoProviderExt, ProviderConfig, ProviderFactory,
};
use crate::types::{Brand, CameraQuery, CameraSettings, ImageSequence, ProviderKind};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

#[derive(Debug, Default)]
struct SessionState {
    credential: CredentialForm,
    brand: Brand,
    model: CameraModelInput,
    selected_scene: Option<Scene>,
    panel_open: bool,
    explanations_open: bool,
    generation: u64,
    settings: Option<RequestOutcome<CameraSettings>>,
    images: Option<RequestOutcome<ImageSequence>>,
    timeout: Option<Duration>,
}

/// Point-in-time copy of everything a front end renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Selected provider.
    pub provider: ProviderKind,
    /// Message for the API key field, if the key is malformed.
    pub credential_error: Option<&'static str>,
    /// Whether the key has been saved since the last edit.
    pub credential_saved: bool,
    /// Selected camera brand.
    pub brand: Brand,
    /// Raw camera model input.
    pub model: String,
    /// Message for the model field, if the model is malformed.
    pub model_error: Option<&'static str>,
    /// Most recently selected scene.
    pub selected_scene: Option<Scene>,
    /// Whether the results panel is shown.
    pub panel_open: bool,
    /// Whether setting explanations are expanded.
    pub explanations_open: bool,
    /// Id of the most recent selection.
    pub generation: u64,
    /// Settings slot. `None` before the first selection.
    pub settings: Option<RequestOutcome<CameraSettings>>,
    /// Example-image slot. `None` before the first selection.
    pub images: Option<RequestOutcome<ImageSequence>>,
}

/// Handle to the two requests started by one selection.
#[derive(Debug)]
pub struct PendingSelection {
    generation: u64,
    settings: JoinHandle<()>,
    images: JoinHandle<()>,
}

impl PendingSelection {
    /// Id of the selection these requests belong to.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Waits until both requests have completed and written (or discarded)
    /// their results.
    pub async fn settled(self) {
        let (settings, images) = tokio::join!(self.settings, self.images);
        for result in [settings, images] {
            if let Err(e) = result {
                tracing::error!(generation = self.generation, "request task failed: {e}");
            }
        }
    }
}

/// User inputs plus the outcome of the latest scene selection.
///
/// Cloning a `Session` yields another handle to the same state.
#[derive(Clone)]
pub struct Session {
    factory: Arc<dyn ProviderFactory>,
    state: Arc<Mutex<SessionState>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Arc::new(HttpProviderFactory::new()))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("generation", &self.lock().generation)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Creates a session that reaches providers through `factory`.
    pub fn new(factory: Arc<dyn ProviderFactory>) -> Self {
        Self {
            factory,
            state: Arc::new(Mutex::new(SessionState::default())),
        }
    }

    /// Sets a per-request timeout for subsequent selections.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.lock().timeout = Some(timeout);
        self
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        lock_state(&self.state)
    }

    /// Switches provider, clearing the key and its status.
    pub fn select_provider(&self, provider: ProviderKind) {
        self.lock().credential.select_provider(provider);
    }

    /// Updates the API key field.
    pub fn set_credential_input(&self, raw: &str) {
        self.lock().credential.set_input(raw);
    }

    /// Saves the key if it is valid. Returns the saved flag.
    pub fn save_credential(&self) -> bool {
        self.lock().credential.save()
    }

    /// Sets the camera brand used in prompts.
    pub fn set_brand(&self, brand: Brand) {
        self.lock().brand = brand;
    }

    /// Updates the camera model field.
    pub fn set_model_input(&self, raw: &str) {
        self.lock().model.set_input(raw);
    }

    /// Hides the results panel. Outcome slots are kept.
    pub fn close_panel(&self) {
        self.lock().panel_open = false;
    }

    /// Expands or collapses the setting explanations.
    pub fn toggle_explanations(&self) {
        let mut state = self.lock();
        state.explanations_open = !state.explanations_open;
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            provider: state.credential.provider(),
            credential_error: state.credential.error(),
            credential_saved: state.credential.is_saved(),
            brand: state.brand,
            model: state.model.value().to_string(),
            model_error: state.model.error(),
            selected_scene: state.selected_scene,
            panel_open: state.panel_open,
            explanations_open: state.explanations_open,
            generation: state.generation,
            settings: state.settings.clone(),
            images: state.images.clone(),
        }
    }

    /// Starts the settings and example-image requests for `scene`.
    ///
    /// Returns `None` without doing anything while both requests of the
    /// previous selection are still pending. Must be called from within a
    /// tokio runtime.
    pub fn select_scene(&self, scene: &Scene) -> Option<PendingSelection> {
        let (generation, config, query) = {
            let mut state = self.lock();
            let both_pending = matches!(
                (&state.settings, &state.images),
                (Some(s), Some(i)) if s.is_pending() && i.is_pending()
            );
            if both_pending {
                tracing::debug!(scene = scene.name, "selection ignored, requests in flight");
                return None;
            }

            state.explanations_open = false;
            state.panel_open = true;
            state.selected_scene = Some(*scene);
            state.generation += 1;
            state.settings = Some(RequestOutcome::Pending);
            state.images = Some(RequestOutcome::Pending);

            let config = ProviderConfig {
                kind: state.credential.provider(),
                credential: state.credential.credential(),
                timeout: state.timeout,
            };
            let mut query = CameraQuery::new(scene.name).with_brand(state.brand);
            query.model = state.model.model();
            (state.generation, config, query)
        };

        tracing::debug!(
            generation,
            provider = %config.kind,
            scene = scene.name,
            "dispatching scene requests"
        );

        let settings = tokio::spawn({
            let factory = Arc::clone(&self.factory);
            let state = Arc::clone(&self.state);
            let config = config.clone();
            async move {
                let result = match factory.connect(&config) {
                    Ok(provider) => provider.generate_settings(&query).await,
                    Err(e) => Err(e),
                };
                let outcome = match result {
                    Ok(settings) => RequestOutcome::Success(settings),
                    Err(e) => {
                        tracing::error!(
                            generation,
                            provider = %config.kind,
                            scene = %query.scene_name,
                            "camera settings request failed: {e}"
                        );
                        RequestOutcome::Failure(FailureReason::settings(&e))
                    }
                };
                apply(&state, generation, "settings", |s| s.settings = Some(outcome));
            }
        });

        let images = tokio::spawn({
            let factory = Arc::clone(&self.factory);
            let state = Arc::clone(&self.state);
            let scene_name = scene.name;
            async move {
                let images = match factory.connect(&config) {
                    Ok(provider) => provider.generate_images(scene_name).await,
                    Err(e) => {
                        tracing::warn!(
                            generation,
                            provider = %config.kind,
                            scene = scene_name,
                            "example images skipped: {e}"
                        );
                        Vec::new()
                    }
                };
                apply(&state, generation, "images", |s| {
                    s.images = Some(RequestOutcome::Success(images))
                });
            }
        });

        Some(PendingSelection {
            generation,
            settings,
            images,
        })
    }
}

fn lock_state(state: &Mutex<SessionState>) -> MutexGuard<'_, SessionState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Writes a completion unless a newer selection has started.
fn apply(
    state: &Mutex<SessionState>,
    generation: u64,
    slot: &'static str,
    update: impl FnOnce(&mut SessionState),
) {
    let mut state = lock_state(state);
    if state.generation == generation {
        update(&mut state);
    } else {
        tracing::warn!(
            slot,
            generation,
            current = state.generation,
            "dropping stale completion"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_scene;
    use crate::error::{FailureKind, LensCoachError, Result};
    use crate::outcome::SETTINGS_FAILURE_MESSAGE;
    use crate::schema::{parse_settings, tests::sample_json};
    use crate::types::{ExampleImage, ImageFormat};
    use async_trait::async_trait;
    use tokio::sync::Notify;

    const GOOGLE_KEY: &str = "AIzaSyA1234567890abcdefghijklmnopqrs";
    const GATED: &str = "Night Sky";

    /// Provider that answers from memory. Requests for the gated scene wait
    /// on the matching `Notify` before answering.
    #[derive(Default)]
    struct FakeProvider {
        settings_gate: Option<Arc<Notify>>,
        images_gate: Option<Arc<Notify>>,
        fail_settings: bool,
        queries: Mutex<Vec<CameraQuery>>,
    }

    #[async_trait]
    impl PhotoProvider for FakeProvider {
        async fn generate_settings(&self, query: &CameraQuery) -> Result<CameraSettings> {
            self.queries.lock().unwrap().push(query.clone());
            if let (Some(gate), GATED) = (&self.settings_gate, query.scene_name.as_str()) {
                gate.notified().await;
            }
            if self.fail_settings {
                return Err(LensCoachError::InvalidResponseShape {
                    missing: vec!["iso"],
                });
            }
            let mut settings = parse_settings(&sample_json().to_string())?;
            settings.general_tip = query.scene_name.clone();
            Ok(settings)
        }

        async fn request_images(&self, scene_name: &str) -> Result<ImageSequence> {
            if let (Some(gate), GATED) = (&self.images_gate, scene_name) {
                gate.notified().await;
            }
            (0..4)
                .map(|_| ExampleImage::from_base64("AQID", ImageFormat::Png, ProviderKind::Google))
                .collect()
        }

        fn kind(&self) -> ProviderKind {
            ProviderKind::Google
        }

        async fn health_check(&self) -> Result<()> {
            Ok(())
        }
    }

    struct FakeFactory(Arc<FakeProvider>);

    impl ProviderFactory for FakeFactory {
        fn connect(&self, _config: &ProviderConfig) -> Result<Arc<dyn PhotoProvider>> {
            Ok(self.0.clone())
        }
    }

    fn session_with(provider: FakeProvider) -> (Session, Arc<FakeProvider>) {
        let provider = Arc::new(provider);
        let session = Session::new(Arc::new(FakeFactory(provider.clone())));
        (session, provider)
    }

    fn scene(key: &str) -> &'static Scene {
        find_scene(key).unwrap()
    }

    async fn wait_until(session: &Session, done: impl Fn(&SessionSnapshot) -> bool) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while !done(&session.snapshot()) {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("condition not reached");
    }

    #[test]
    fn test_initial_snapshot() {
        let snap = Session::default().snapshot();
        assert_eq!(snap.provider, ProviderKind::Google);
        assert_eq!(snap.brand, Brand::Any);
        assert!(!snap.panel_open);
        assert_eq!(snap.generation, 0);
        assert!(snap.settings.is_none());
        assert!(snap.images.is_none());
    }

    #[test]
    fn test_input_operations() {
        let session = Session::default();
        session.set_credential_input("not-a-key");
        assert!(session.snapshot().credential_error.is_some());
        assert!(!session.save_credential());

        session.set_credential_input(GOOGLE_KEY);
        assert!(session.save_credential());
        assert!(session.snapshot().credential_saved);

        session.select_provider(ProviderKind::OpenAi);
        let snap = session.snapshot();
        assert_eq!(snap.provider, ProviderKind::OpenAi);
        assert!(!snap.credential_saved);
        assert_eq!(snap.credential_error, None);

        session.set_model_input("abc");
        assert!(session.snapshot().model_error.is_some());
        session.set_brand(Brand::Fujifilm);
        assert_eq!(session.snapshot().brand, Brand::Fujifilm);
    }

    #[tokio::test]
    async fn test_night_sky_selection_resolves_both_slots() {
        let (session, provider) = session_with(FakeProvider::default());
        session.set_brand(Brand::Canon);
        session.set_model_input("R5");
        session.toggle_explanations();

        let pending = session.select_scene(scene("night_sky_astrophotography")).unwrap();
        let snap = session.snapshot();
        assert!(snap.panel_open);
        assert!(!snap.explanations_open);
        assert_eq!(snap.selected_scene.map(|s| s.name), Some("Night Sky"));
        assert!(snap.settings.as_ref().is_some_and(RequestOutcome::is_pending));

        pending.settled().await;
        let snap = session.snapshot();
        let settings = snap.settings.as_ref().and_then(RequestOutcome::success).unwrap();
        assert!(!settings.aperture.is_empty());
        assert!(!settings.lens_recommendation.is_empty());
        let images = snap.images.as_ref().and_then(RequestOutcome::success).unwrap();
        assert_eq!(images.len(), 4);

        let queries = provider.queries.lock().unwrap();
        assert_eq!(queries[0].brand, Brand::Canon);
        assert_eq!(queries[0].model.as_deref(), Some("R5"));
    }

    #[tokio::test]
    async fn test_invalid_model_is_not_sent() {
        let (session, provider) = session_with(FakeProvider::default());
        session.set_model_input("12");
        session.select_scene(scene("Fireworks")).unwrap().settled().await;
        assert_eq!(provider.queries.lock().unwrap()[0].model, None);
    }

    #[tokio::test]
    async fn test_settings_failure_is_recorded() {
        let (session, _) = session_with(FakeProvider {
            fail_settings: true,
            ..FakeProvider::default()
        });
        session.select_scene(scene("Fireworks")).unwrap().settled().await;

        let snap = session.snapshot();
        let reason = snap.settings.as_ref().and_then(RequestOutcome::failure).unwrap();
        assert_eq!(reason.kind, FailureKind::InvalidResponseShape);
        assert_eq!(reason.message, SETTINGS_FAILURE_MESSAGE);
        assert_eq!(
            snap.images.as_ref().and_then(RequestOutcome::success).map(Vec::len),
            Some(4)
        );
    }

    #[tokio::test]
    async fn test_missing_credential_fails_settings_and_empties_images() {
        let session = Session::default();
        session.select_scene(scene("night_sky_astrophotography")).unwrap().settled().await;

        let snap = session.snapshot();
        let reason = snap.settings.as_ref().and_then(RequestOutcome::failure).unwrap();
        assert_eq!(reason.kind, FailureKind::ProviderCommunication);
        assert_eq!(
            snap.images.as_ref().and_then(RequestOutcome::success).map(Vec::len),
            Some(0)
        );
    }

    #[tokio::test]
    async fn test_reselection_blocked_while_both_pending() {
        let settings_gate = Arc::new(Notify::new());
        let images_gate = Arc::new(Notify::new());
        let (session, _) = session_with(FakeProvider {
            settings_gate: Some(settings_gate.clone()),
            images_gate: Some(images_gate.clone()),
            ..FakeProvider::default()
        });

        let first = session.select_scene(scene(GATED)).unwrap();
        assert!(session.select_scene(scene("Fireworks")).is_none());
        assert_eq!(session.snapshot().generation, 1);

        images_gate.notify_one();
        wait_until(&session, |s| {
            s.images.as_ref().is_some_and(|i| !i.is_pending())
        })
        .await;

        let second = session.select_scene(scene("Fireworks")).unwrap();
        assert_eq!(second.generation(), 2);
        second.settled().await;

        settings_gate.notify_one();
        first.settled().await;
    }

    #[tokio::test]
    async fn test_stale_completion_is_dropped() {
        let settings_gate = Arc::new(Notify::new());
        let (session, _) = session_with(FakeProvider {
            settings_gate: Some(settings_gate.clone()),
            ..FakeProvider::default()
        });

        let first = session.select_scene(scene(GATED)).unwrap();
        wait_until(&session, |s| {
            s.images.as_ref().is_some_and(|i| !i.is_pending())
        })
        .await;

        let second = session.select_scene(scene("Fireworks")).unwrap();
        second.settled().await;
        assert_eq!(
            session
                .snapshot()
                .settings
                .as_ref()
                .and_then(RequestOutcome::success)
                .map(|s| s.general_tip.clone()),
            Some("Fireworks".to_string())
        );

        settings_gate.notify_one();
        first.settled().await;

        let snap = session.snapshot();
        assert_eq!(snap.generation, 2);
        assert_eq!(snap.selected_scene.map(|s| s.name), Some("Fireworks"));
        assert_eq!(
            snap.settings
                .as_ref()
                .and_then(RequestOutcome::success)
                .map(|s| s.general_tip.as_str()),
            Some("Fireworks")
        );
    }

    #[tokio::test]
    async fn test_close_panel_keeps_results() {
        let (session, _) = session_with(FakeProvider::default());
        session.select_scene(scene("Fireworks")).unwrap().settled().await;
        session.close_panel();
        let snap = session.snapshot();
        assert!(!snap.panel_open);
        assert!(snap.settings.is_some());
    }
}
