//! Shared setup for router tests: a config with nothing enabled and
//! in-memory notifiers whose calls are recorded.

#![allow(dead_code)]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use portfolio::{
    AppState,
    config::{Config, ContactConfig, ObservabilityConfig, ServerConfig},
};
use portfolio_notification::{Dispatcher, Notifier, NotifyError, OutboundMessage, ProviderKind};
use tower::ServiceExt;

pub type Calls = Arc<Mutex<Vec<(ProviderKind, OutboundMessage)>>>;

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        contact: ContactConfig::default(),
        dispatch: Default::default(),
        resend: Default::default(),
        sendgrid: Default::default(),
        smtp: Default::default(),
        formsubmit: Default::default(),
        observability: ObservabilityConfig::default(),
    }
}

pub struct RecordingNotifier {
    kind: ProviderKind,
    accept: bool,
    calls: Calls,
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn send(&self, message: &OutboundMessage) -> Result<(), NotifyError> {
        self.calls.lock().unwrap().push((self.kind, message.clone()));

        if self.accept {
            Ok(())
        } else {
            Err(NotifyError::Status {
                status: 500,
                body: "internal".to_owned(),
            })
        }
    }
}

/// Builds the app with one recording notifier per `(kind, accepts)` pair.
pub fn app(providers: &[(ProviderKind, bool)], fallback_number: Option<&str>) -> (Router, Calls) {
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let notifiers = providers
        .iter()
        .map(|(kind, accept)| {
            Arc::new(RecordingNotifier {
                kind: *kind,
                accept: *accept,
                calls: calls.clone(),
            }) as Arc<dyn Notifier>
        })
        .collect();

    let config = test_config();
    let dispatcher = Dispatcher::new(config.contact.recipient.to_owned(), notifiers)
        .fallback_number(fallback_number.map(str::to_owned));

    let state = AppState {
        dispatcher: Arc::new(dispatcher),
    };

    (portfolio::router(state), calls)
}

pub async fn post_json(app: Router, body: &str) -> anyhow::Result<(StatusCode, serde_json::Value)> {
    let request = Request::builder()
        .method("POST")
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))?;

    let response = app.oneshot(request).await?;
    let status = response.status();
    let bytes = response.into_body().collect().await?.to_bytes();

    Ok((status, serde_json::from_slice(&bytes)?))
}

/// Local provider API answering every request with `status`. Returns its base url and hit counter.
pub async fn mock_provider(status: StatusCode) -> anyhow::Result<(String, Arc<AtomicUsize>)> {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();

    let app = Router::new().fallback(move || {
        let counter = counter.clone();
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            (status, "{\"id\":\"mock\"}")
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok((format!("http://{addr}"), hits))
}
