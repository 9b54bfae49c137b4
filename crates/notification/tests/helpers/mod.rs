#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
};
use portfolio_contact::ContactSubmission;
use portfolio_notification::{Notifier, NotifyError, OutboundMessage, ProviderKind, SmtpConfig};
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream, tcp::OwnedWriteHalf},
};

pub fn jane() -> ContactSubmission {
    ContactSubmission::new("Jane Doe", "jane@example.com", None, "Hello")
}

#[derive(Clone, Copy)]
pub enum Behavior {
    Accept,
    Status(u16),
    Transport,
    Hang,
}

/// In-memory notifier recording every call into a shared log.
pub struct FakeNotifier {
    kind: ProviderKind,
    behavior: Behavior,
    log: Arc<Mutex<Vec<ProviderKind>>>,
}

impl FakeNotifier {
    pub fn new(
        kind: ProviderKind,
        behavior: Behavior,
        log: &Arc<Mutex<Vec<ProviderKind>>>,
    ) -> Arc<dyn Notifier> {
        Arc::new(Self {
            kind,
            behavior,
            log: log.clone(),
        })
    }
}

#[async_trait::async_trait]
impl Notifier for FakeNotifier {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn send(&self, _message: &OutboundMessage) -> Result<(), NotifyError> {
        self.log.lock().unwrap().push(self.kind);

        match self.behavior {
            Behavior::Accept => Ok(()),
            Behavior::Status(status) => Err(NotifyError::Status {
                status,
                body: "nope".to_owned(),
            }),
            Behavior::Transport => Err(NotifyError::Transport("connection reset".to_owned())),
            Behavior::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Captured {
    pub path: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    delay: Duration,
    captured: Arc<Mutex<Vec<Captured>>>,
}

/// Local stand-in for a provider API answering every POST with `status`.
pub struct MockProvider {
    pub addr: SocketAddr,
    pub captured: Arc<Mutex<Vec<Captured>>>,
}

impl MockProvider {
    pub async fn start(status: u16) -> anyhow::Result<Self> {
        Self::start_with_delay(status, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: u16, delay: Duration) -> anyhow::Result<Self> {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status: StatusCode::from_u16(status)?,
            delay,
            captured: captured.clone(),
        };

        let app = Router::new().fallback(capture).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, captured })
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.captured.lock().unwrap().clone()
    }
}

async fn capture(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    };

    state.captured.lock().unwrap().push(Captured {
        path: uri.path().to_owned(),
        authorization: header("authorization"),
        content_type: header("content-type"),
        body: String::from_utf8_lossy(&body).into_owned(),
    });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (state.status, "{\"message\":\"mock\"}")
}

pub const SMTP_ACCEPT: &str = "250 2.1.5 recipient ok";

/// Minimal SMTP server answering every command after `delay`.
///
/// `rcpt_reply` is sent back for `RCPT TO`, a message only counts as
/// delivered once the terminating `.` line of DATA was received.
pub struct SmtpStub {
    pub addr: SocketAddr,
    delivered: Arc<Mutex<Vec<String>>>,
}

impl SmtpStub {
    pub async fn start(rcpt_reply: &'static str, delay: Duration) -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let store = delivered.clone();

        tokio::spawn(async move {
            while let Ok((socket, _)) = listener.accept().await {
                let store = store.clone();
                tokio::spawn(async move {
                    let _ = smtp_session(socket, rcpt_reply, delay, store).await;
                });
            }
        });

        Ok(Self { addr, delivered })
    }

    pub fn config(&self) -> SmtpConfig {
        SmtpConfig {
            host: self.addr.ip().to_string(),
            port: self.addr.port(),
            ..Default::default()
        }
    }

    pub fn delivered(&self) -> Vec<String> {
        self.delivered.lock().unwrap().clone()
    }
}

async fn smtp_session(
    socket: TcpStream,
    rcpt_reply: &str,
    delay: Duration,
    delivered: Arc<Mutex<Vec<String>>>,
) -> std::io::Result<()> {
    let (read, mut write) = socket.into_split();
    let mut lines = BufReader::new(read).lines();
    let mut data: Option<String> = None;

    smtp_reply(&mut write, delay, "220 stub ESMTP").await?;

    while let Some(line) = lines.next_line().await? {
        if let Some(body) = data.as_mut() {
            if line == "." {
                delivered.lock().unwrap().push(std::mem::take(body));
                data = None;
                smtp_reply(&mut write, delay, "250 2.0.0 queued").await?;
            } else {
                body.push_str(&line);
                body.push('\n');
            }
            continue;
        }

        let verb = line
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_ascii_uppercase();

        match verb.as_str() {
            "EHLO" | "HELO" => smtp_reply(&mut write, delay, "250 stub").await?,
            "RCPT" => smtp_reply(&mut write, delay, rcpt_reply).await?,
            "DATA" => {
                data = Some(String::new());
                smtp_reply(&mut write, delay, "354 end data with <CR><LF>.<CR><LF>").await?;
            }
            "QUIT" => {
                smtp_reply(&mut write, delay, "221 bye").await?;
                break;
            }
            _ => smtp_reply(&mut write, delay, "250 OK").await?,
        }
    }

    Ok(())
}

async fn smtp_reply(write: &mut OwnedWriteHalf, delay: Duration, line: &str) -> std::io::Result<()> {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    write.write_all(format!("{line}\r\n").as_bytes()).await
}
