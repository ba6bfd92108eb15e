use async_trait::async_trait;
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use visage_app::{
    BridgeConfig, BridgeError, CaptureSurface, SurfaceConfig, SurfaceRegistry, VisageBridge,
    SURFACE_CLOSED_MESSAGE,
};
use visage_core::error::{EARLY_EXIT_MESSAGE, TOKEN_ACQUISITION_MESSAGE};
use visage_core::session::SUCCESS_MESSAGE;
use visage_core::{RawSessionResult, SessionState, SessionStatus};
use visage_platform::{
    CaptureEngine, Credentials, EngineOutcome, InitializationRequest, PlatformError,
    SessionTokenProvider, TokenRequest,
};
use visage_theme::{NativeTheme, VocalGuidanceMode};

// ========== Fakes ==========

/// Engine whose session ends with a scripted outcome, or never
#[derive(Default)]
struct ScriptedEngine {
    init_error: Option<String>,
    outcome: Option<EngineOutcome>,
    initialized: Mutex<Vec<InitializationRequest>>,
    sessions: Mutex<Vec<(String, NativeTheme)>>,
}

impl ScriptedEngine {
    fn finishing_with(outcome: EngineOutcome) -> Self {
        Self {
            outcome: Some(outcome),
            ..Self::default()
        }
    }

    fn sessions(&self) -> Vec<(String, NativeTheme)> {
        self.sessions.lock().unwrap().clone()
    }
}

#[async_trait]
impl CaptureEngine for ScriptedEngine {
    async fn initialize(&self, request: &InitializationRequest) -> visage_platform::Result<()> {
        self.initialized.lock().unwrap().push(request.clone());
        match &self.init_error {
            Some(detail) => Err(PlatformError::InitFailed(detail.clone())),
            None => Ok(()),
        }
    }

    fn user_agent(&self, session_id: &str) -> String {
        format!("scripted-engine/1.0 ({session_id})")
    }

    async fn run_session(&self, session_token: &str, theme: &NativeTheme) -> EngineOutcome {
        self.sessions
            .lock()
            .unwrap()
            .push((session_token.to_string(), theme.clone()));
        match &self.outcome {
            Some(outcome) => outcome.clone(),
            None => std::future::pending().await,
        }
    }
}

enum TokenScript {
    Issue(&'static str),
    Refuse,
    Hang,
}

struct ScriptedTokens {
    script: TokenScript,
    calls: AtomicUsize,
    requests: Mutex<Vec<TokenRequest>>,
}

impl ScriptedTokens {
    fn new(script: TokenScript) -> Self {
        Self {
            script,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionTokenProvider for ScriptedTokens {
    async fn fetch_token(&self, request: &TokenRequest) -> visage_platform::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match self.script {
            TokenScript::Issue(token) => Ok(token.to_string()),
            TokenScript::Refuse => Err(PlatformError::TokenRequest("server answered 503".into())),
            TokenScript::Hang => std::future::pending().await,
        }
    }
}

// ========== Helpers ==========

fn complete_result() -> RawSessionResult {
    RawSessionResult {
        face_scan_base64: Some("c2Nhbg==".into()),
        session_id: Some("session-7".into()),
        audit_images_base64: Some(vec!["YXVkaXQ=".into()]),
        low_quality_audit_images_base64: Some(vec!["bG93".into()]),
        user_agent: Some("scripted-engine/1.0 (session-7)".into()),
        external_database_ref_id: None,
    }
}

fn surface_with(
    engine: &Arc<ScriptedEngine>,
    tokens: &Arc<ScriptedTokens>,
    config: SurfaceConfig,
) -> (CaptureSurface, mpsc::Receiver<SessionState>) {
    let bridge = VisageBridge::with_token_provider(
        BridgeConfig::default(),
        engine.clone(),
        tokens.clone(),
    );
    bridge.create_surface(config)
}

async fn next_state(rx: &mut mpsc::Receiver<SessionState>) -> Option<SessionState> {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("state delivery timed out")
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition never held");
}

// ========== Tests ==========

#[tokio::test]
async fn successful_session_reports_ready_then_load() {
    let engine = Arc::new(ScriptedEngine::finishing_with(EngineOutcome::Completed(
        complete_result(),
    )));
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Issue("tok-1")));
    let (mut surface, mut rx) =
        surface_with(&engine, &tokens, SurfaceConfig::new(Credentials::new("dk-1")));

    surface.set_visible(true).unwrap();

    assert_eq!(next_state(&mut rx).await.unwrap(), SessionState::ready());
    let done = next_state(&mut rx).await.unwrap();
    assert_eq!(done.status, SessionStatus::Succeeded);
    assert_eq!(done.message.as_deref(), Some(SUCCESS_MESSAGE));
    let load = done.load.unwrap();
    assert_eq!(load.session_id, "session-7");
    assert_eq!(load.low_quality_audit_images, vec!["bG93".to_string()]);

    let requests = tokens.requests.lock().unwrap().clone();
    assert_eq!(
        requests,
        vec![TokenRequest {
            device_key_identifier: "dk-1".into(),
            user_agent: "scripted-engine/1.0 ()".into(),
        }]
    );
    assert_eq!(engine.sessions()[0].0, "tok-1");
}

#[tokio::test]
async fn non_success_completion_is_cancelled() {
    let engine = Arc::new(ScriptedEngine::finishing_with(EngineOutcome::NotCompleted {
        reason: None,
    }));
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Issue("tok")));
    let (mut surface, mut rx) =
        surface_with(&engine, &tokens, SurfaceConfig::new(Credentials::new("dk")));

    surface.set_visible(true).unwrap();
    assert_eq!(next_state(&mut rx).await.unwrap().status, SessionStatus::Ready);

    let state = next_state(&mut rx).await.unwrap();
    assert_eq!(state.status, SessionStatus::Cancelled);
    assert_eq!(state.message.as_deref(), Some(EARLY_EXIT_MESSAGE));
    assert!(state.load.is_none());
}

#[tokio::test]
async fn missing_low_quality_images_fail_the_session() {
    let mut raw = complete_result();
    raw.low_quality_audit_images_base64 = None;
    let engine = Arc::new(ScriptedEngine::finishing_with(EngineOutcome::Completed(raw)));
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Issue("tok")));
    let (mut surface, mut rx) =
        surface_with(&engine, &tokens, SurfaceConfig::new(Credentials::new("dk")));

    surface.set_visible(true).unwrap();
    next_state(&mut rx).await.unwrap();

    let state = next_state(&mut rx).await.unwrap();
    assert_eq!(state.status, SessionStatus::Failed);
    assert!(state
        .message
        .unwrap()
        .contains("lowQualityAuditTrailImagesBase64"));
    assert!(state.load.is_none());
}

#[tokio::test]
async fn token_failure_is_reported_without_ready() {
    let engine = Arc::new(ScriptedEngine::finishing_with(EngineOutcome::cancelled("x")));
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Refuse));
    let (mut surface, mut rx) =
        surface_with(&engine, &tokens, SurfaceConfig::new(Credentials::new("dk")));

    surface.set_visible(true).unwrap();

    let state = next_state(&mut rx).await.unwrap();
    assert_eq!(state.status, SessionStatus::Failed);
    assert_eq!(state.message.as_deref(), Some(TOKEN_ACQUISITION_MESSAGE));
    assert!(engine.sessions().is_empty());

    drop(surface);
    assert_eq!(next_state(&mut rx).await, None);
}

#[tokio::test]
async fn blank_device_key_fails_initialization() {
    let engine = Arc::new(ScriptedEngine::finishing_with(EngineOutcome::cancelled("x")));
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Issue("tok")));
    let (mut surface, mut rx) =
        surface_with(&engine, &tokens, SurfaceConfig::new(Credentials::new("   ")));

    surface.set_visible(true).unwrap();

    let state = next_state(&mut rx).await.unwrap();
    assert_eq!(state.status, SessionStatus::Failed);
    assert!(state
        .message
        .unwrap()
        .starts_with("Initialization failed, check your configuration properties"));
    assert!(engine.initialized.lock().unwrap().is_empty());
    assert_eq!(tokens.calls(), 0);
}

#[tokio::test]
async fn engine_initialization_error_fails_the_session() {
    let engine = Arc::new(ScriptedEngine {
        init_error: Some("license rejected".into()),
        ..ScriptedEngine::default()
    });
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Issue("tok")));
    let (mut surface, mut rx) =
        surface_with(&engine, &tokens, SurfaceConfig::new(Credentials::new("dk")));

    surface.set_visible(true).unwrap();

    let state = next_state(&mut rx).await.unwrap();
    assert_eq!(state.status, SessionStatus::Failed);
    assert_eq!(
        state.message.as_deref(),
        Some("Initialization failed, check your configuration properties: license rejected")
    );
    assert_eq!(tokens.calls(), 0);
}

#[tokio::test]
async fn provided_token_skips_the_provider() {
    let engine = Arc::new(ScriptedEngine::finishing_with(EngineOutcome::Completed(
        complete_result(),
    )));
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Refuse));
    let credentials = Credentials::new("dk").with_session_token("caller-token");
    let (mut surface, mut rx) = surface_with(&engine, &tokens, SurfaceConfig::new(credentials));

    surface.set_visible(true).unwrap();
    assert_eq!(next_state(&mut rx).await.unwrap().status, SessionStatus::Ready);
    assert_eq!(next_state(&mut rx).await.unwrap().status, SessionStatus::Succeeded);

    assert_eq!(tokens.calls(), 0);
    assert_eq!(engine.sessions()[0].0, "caller-token");
}

#[tokio::test]
async fn production_key_selects_production_mode() {
    let engine = Arc::new(ScriptedEngine::finishing_with(EngineOutcome::cancelled("x")));
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Issue("tok")));
    let credentials = Credentials::new("dk").with_production_key("appId = demo");
    let (mut surface, mut rx) = surface_with(&engine, &tokens, SurfaceConfig::new(credentials));

    surface.set_visible(true).unwrap();
    next_state(&mut rx).await.unwrap();

    let requests = engine.initialized.lock().unwrap().clone();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].mode, visage_platform::InitializationMode::Production);
    assert_eq!(requests[0].production_key_text.as_deref(), Some("appId = demo"));
}

#[tokio::test]
async fn frozen_theme_reaches_the_engine() {
    let engine = Arc::new(ScriptedEngine::finishing_with(EngineOutcome::cancelled("x")));
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Issue("tok")));
    let config = SurfaceConfig::new(Credentials::new("dk"))
        .with_customization_json(r##"{"faceTecFrameCustomization":{"borderWidth":4,"borderColor":"#FF0000"}}"##)
        .with_vocal_guidance(VocalGuidanceMode::Full);
    let (mut surface, mut rx) = surface_with(&engine, &tokens, config);

    assert_eq!(surface.theme().frame.border_width, 4);
    surface.set_visible(true).unwrap();
    next_state(&mut rx).await.unwrap();
    next_state(&mut rx).await.unwrap();

    let (_, theme) = engine.sessions().remove(0);
    assert_eq!(theme, *surface.theme());
    assert_eq!(theme.frame.border_width, 4);
    assert_eq!(theme.vocal_guidance, VocalGuidanceMode::Full);
}

#[tokio::test]
async fn invalid_customization_json_mounts_with_defaults() {
    let engine = Arc::new(ScriptedEngine::finishing_with(EngineOutcome::cancelled("x")));
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Issue("tok")));
    let config = SurfaceConfig::new(Credentials::new("dk")).with_customization_json("{not json");
    let (surface, _rx) = surface_with(&engine, &tokens, config);

    assert_eq!(*surface.theme(), NativeTheme::default());
}

#[tokio::test]
async fn showing_a_mounted_surface_is_a_no_op() {
    let engine = Arc::new(ScriptedEngine::default());
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Issue("tok")));
    let (mut surface, mut rx) =
        surface_with(&engine, &tokens, SurfaceConfig::new(Credentials::new("dk")));

    surface.set_visible(true).unwrap();
    assert_eq!(next_state(&mut rx).await.unwrap().status, SessionStatus::Ready);
    surface.set_visible(true).unwrap();
    surface.set_visible(true).unwrap();

    assert!(surface.is_mounted());
    assert_eq!(surface.attempts(), 1);
    assert_eq!(tokens.calls(), 1);
}

#[tokio::test]
async fn hiding_mid_session_cancels() {
    let engine = Arc::new(ScriptedEngine::default());
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Issue("tok")));
    let (mut surface, mut rx) =
        surface_with(&engine, &tokens, SurfaceConfig::new(Credentials::new("dk")));

    surface.set_visible(true).unwrap();
    assert_eq!(next_state(&mut rx).await.unwrap().status, SessionStatus::Ready);

    surface.set_visible(false).unwrap();
    assert!(!surface.is_mounted());

    let state = next_state(&mut rx).await.unwrap();
    assert_eq!(state.status, SessionStatus::Cancelled);
    assert_eq!(state.message.as_deref(), Some(SURFACE_CLOSED_MESSAGE));

    drop(surface);
    assert_eq!(next_state(&mut rx).await, None);
}

#[tokio::test]
async fn unmount_during_token_fetch_emits_nothing() {
    let engine = Arc::new(ScriptedEngine::default());
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Hang));
    let (mut surface, mut rx) =
        surface_with(&engine, &tokens, SurfaceConfig::new(Credentials::new("dk")));

    surface.set_visible(true).unwrap();
    wait_until(|| tokens.calls() == 1).await;

    surface.set_visible(false).unwrap();
    drop(surface);

    // The channel closes without any state for the abandoned attempt
    assert_eq!(next_state(&mut rx).await, None);
    assert!(engine.sessions().is_empty());
}

#[tokio::test]
async fn remounting_starts_a_fresh_attempt() {
    let engine = Arc::new(ScriptedEngine::default());
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Issue("tok")));
    let (mut surface, mut rx) =
        surface_with(&engine, &tokens, SurfaceConfig::new(Credentials::new("dk")));

    surface.set_visible(true).unwrap();
    assert_eq!(next_state(&mut rx).await.unwrap().status, SessionStatus::Ready);
    surface.set_visible(false).unwrap();
    assert_eq!(next_state(&mut rx).await.unwrap().status, SessionStatus::Cancelled);

    surface.set_visible(true).unwrap();
    assert_eq!(next_state(&mut rx).await.unwrap(), SessionState::ready());
    assert_eq!(surface.attempts(), 2);
    assert_eq!(tokens.calls(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn quick_hide_and_show_keeps_attempts_in_order() {
    let engine = Arc::new(ScriptedEngine::default());
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Issue("tok")));
    let (mut surface, mut rx) =
        surface_with(&engine, &tokens, SurfaceConfig::new(Credentials::new("dk")));

    surface.set_visible(true).unwrap();
    assert_eq!(next_state(&mut rx).await.unwrap().status, SessionStatus::Ready);

    for round in 0..200 {
        surface.set_visible(false).unwrap();
        surface.set_visible(true).unwrap();

        let previous = next_state(&mut rx).await.unwrap();
        let current = next_state(&mut rx).await.unwrap();
        assert_eq!(
            (previous.status, current.status),
            (SessionStatus::Cancelled, SessionStatus::Ready),
            "round {round}"
        );
    }
    assert_eq!(surface.attempts(), 201);
}

#[tokio::test]
async fn unmount_is_idempotent() {
    let engine = Arc::new(ScriptedEngine::default());
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Issue("tok")));
    let (mut surface, mut rx) =
        surface_with(&engine, &tokens, SurfaceConfig::new(Credentials::new("dk")));

    surface.unmount();
    surface.set_visible(true).unwrap();
    assert_eq!(next_state(&mut rx).await.unwrap().status, SessionStatus::Ready);

    surface.unmount();
    surface.unmount();
    assert!(!surface.is_mounted());
    assert_eq!(next_state(&mut rx).await.unwrap().status, SessionStatus::Cancelled);

    drop(surface);
    assert_eq!(next_state(&mut rx).await, None);
}

#[test]
fn mounting_needs_a_runtime() {
    let engine = Arc::new(ScriptedEngine::default());
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Issue("tok")));
    let (mut surface, _rx) =
        surface_with(&engine, &tokens, SurfaceConfig::new(Credentials::new("dk")));

    assert!(matches!(
        surface.set_visible(true),
        Err(BridgeError::NoRuntime(_))
    ));
    assert!(!surface.is_mounted());
    assert_eq!(surface.attempts(), 0);
}

#[tokio::test]
async fn registry_addresses_surfaces_by_id() {
    let engine = Arc::new(ScriptedEngine::default());
    let tokens = Arc::new(ScriptedTokens::new(TokenScript::Issue("tok")));
    let (first, mut first_rx) =
        surface_with(&engine, &tokens, SurfaceConfig::new(Credentials::new("dk-a")));
    let (second, _second_rx) =
        surface_with(&engine, &tokens, SurfaceConfig::new(Credentials::new("dk-b")));

    let mut registry = SurfaceRegistry::new();
    let a = registry.insert(first);
    let b = registry.insert(second);
    assert_eq!(registry.len(), 2);

    registry.set_visible(a, true).unwrap();
    assert_eq!(next_state(&mut first_rx).await.unwrap().status, SessionStatus::Ready);
    assert!(registry.get(a).unwrap().is_mounted());
    assert!(!registry.get(b).unwrap().is_mounted());

    registry.unmount_all();
    assert_eq!(
        next_state(&mut first_rx).await.unwrap().status,
        SessionStatus::Cancelled
    );

    assert!(registry.remove(b).is_some());
    assert!(matches!(
        registry.set_visible(b, true),
        Err(BridgeError::UnknownSurface)
    ));
    assert_eq!(registry.len(), 1);
}
