use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};
use tictac::assistant::{
    AssistantClient, AssistantConfig, AssistantError, CompletionApi, CompletionRequest,
};
use tictac::event::AppEvent;
use tictac::session::{AssistantSession, NotificationKind, Role, SessionState, NOTIFICATION_TTL};

struct ScriptedApi {
    calls: AtomicUsize,
    reply: Result<String, AssistantError>,
}

#[async_trait]
impl CompletionApi for ScriptedApi {
    async fn complete(
        &self,
        _api_key: &str,
        _request: &CompletionRequest,
    ) -> Result<String, AssistantError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone()
    }
}

struct Harness {
    _runtime: tokio::runtime::Runtime,
    client: AssistantClient,
    rx: mpsc::Receiver<AppEvent>,
    api: Arc<ScriptedApi>,
    session: AssistantSession,
}

impl Harness {
    fn new(key_var: &str, reply: Result<String, AssistantError>) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("runtime should build");
        let (tx, rx) = mpsc::channel();
        let api = Arc::new(ScriptedApi {
            calls: AtomicUsize::new(0),
            reply,
        });
        let config = AssistantConfig {
            api_key_var: key_var.to_string(),
            ..AssistantConfig::default()
        };
        let client = AssistantClient::with_api(config, api.clone(), tx, runtime.handle().clone());
        Self {
            _runtime: runtime,
            client,
            rx,
            api,
            session: AssistantSession::new(),
        }
    }

    fn submit(&mut self, text: &str) -> bool {
        match self.session.submit(text) {
            Some(conversation) => {
                self.client.send(conversation);
                true
            }
            None => false,
        }
    }

    fn settle(&mut self, now: Instant) {
        let event = self
            .rx
            .recv_timeout(Duration::from_secs(5))
            .expect("request should resolve");
        match event {
            AppEvent::ReplyReceived(reply) => self.session.resolve(Ok(reply), now),
            AppEvent::RequestFailed(err) => self.session.resolve(Err(err), now),
        }
    }
}

#[test]
fn successful_reply_lands_in_history() {
    std::env::set_var("TICTAC_FLOW_KEY_OK", "sk-flow");
    let mut harness = Harness::new("TICTAC_FLOW_KEY_OK", Ok("Center is strong.".to_string()));

    assert!(harness.submit("Best opening?"));
    assert_eq!(harness.session.state(), SessionState::Sending);
    harness.settle(Instant::now());

    let history = harness.session.history();
    assert_eq!(history.len(), 3);
    assert_eq!(history[2].role, Role::Assistant);
    assert_eq!(history[2].content, "Center is strong.");
    assert_eq!(harness.session.state(), SessionState::Idle);
    assert_eq!(harness.api.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn second_submit_while_sending_issues_no_request() {
    std::env::set_var("TICTAC_FLOW_KEY_BUSY", "sk-flow");
    let mut harness = Harness::new("TICTAC_FLOW_KEY_BUSY", Ok("ok".to_string()));

    assert!(harness.submit("first"));
    assert!(!harness.submit("second"));
    assert_eq!(harness.session.history().len(), 2);

    harness.settle(Instant::now());
    assert!(harness.rx.recv_timeout(Duration::from_millis(200)).is_err());
    assert_eq!(harness.api.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn unauthorized_response_produces_one_error_notification() {
    std::env::set_var("TICTAC_FLOW_KEY_401", "sk-flow");
    let mut harness = Harness::new(
        "TICTAC_FLOW_KEY_401",
        Err(AssistantError::Status {
            status: 401,
            body: "invalid api key".to_string(),
        }),
    );

    let now = Instant::now();
    assert!(harness.submit("hello"));
    harness.settle(now);

    assert_eq!(harness.session.history().len(), 2);
    assert_eq!(harness.session.state(), SessionState::Idle);
    let notification = harness.session.notification(now).expect("error notification");
    assert_eq!(notification.kind, NotificationKind::Error);
    assert!(harness.session.notification(now + NOTIFICATION_TTL).is_none());
}

#[test]
fn missing_credential_keeps_user_message_and_never_calls_the_api() {
    let mut harness = Harness::new("TICTAC_FLOW_KEY_NEVER_SET", Ok("unused".to_string()));

    let now = Instant::now();
    assert!(harness.submit("hello"));
    harness.settle(now);

    let history = harness.session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].role, Role::User);
    assert_eq!(history[1].content, "hello");

    let notification = harness.session.notification(now).expect("configuration notification");
    assert_eq!(notification.kind, NotificationKind::Error);
    assert!(notification.text.contains("TICTAC_FLOW_KEY_NEVER_SET"));
    assert_eq!(harness.api.calls.load(Ordering::SeqCst), 0);
    assert_eq!(harness.session.state(), SessionState::Idle);
}

#[test]
fn blank_submit_never_reaches_the_api() {
    std::env::set_var("TICTAC_FLOW_KEY_BLANK", "sk-flow");
    let mut harness = Harness::new("TICTAC_FLOW_KEY_BLANK", Ok("unused".to_string()));

    assert!(!harness.submit("   "));
    assert!(harness.rx.recv_timeout(Duration::from_millis(200)).is_err());
    assert_eq!(harness.api.calls.load(Ordering::SeqCst), 0);
    assert_eq!(harness.session.history().len(), 1);
}
