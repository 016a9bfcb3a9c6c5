use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use tokio::sync::mpsc as tokio_mpsc;
use tracing::{error, info, warn};

use crate::model::{Credentials, HttpMethod, RequestSpec};
use crate::update::{self, UpdateStatus};

/// Upper bound for a whole request, connect to last body byte.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
/// The update check is best effort and gives up sooner.
pub const UPDATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Command sent from the UI thread to the executor thread.
#[derive(Debug)]
pub enum ExecutorCmd {
    Send(RequestSpec),
    CheckUpdate { current_version: String, url: String },
}

/// A completed exchange, ready for the response and status views.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: String,
    pub elapsed_ms: u128,
    pub size_bytes: usize,
    pub headers: Vec<(String, String)>,
    /// Headers as actually sent, auth included.
    pub request_headers: Vec<(String, String)>,
    pub body: String,
    pub received_at: DateTime<Local>,
}

impl HttpResponse {
    /// e.g. `200 OK`
    pub fn status_line(&self) -> String {
        format!("{} {}", self.status_code, self.status_text)
            .trim_end()
            .to_string()
    }

    /// Multi-line summary for the status view.
    pub fn summary(&self) -> String {
        format!(
            "{}\nTime: {} ms   Size: {} B\nReceived: {}",
            self.status_line(),
            self.elapsed_ms,
            self.size_bytes,
            self.received_at.format("%H:%M:%S"),
        )
    }

    /// Request and response headers, one `name: value` per line.
    pub fn headers_dump(&self) -> String {
        let mut out = String::from("Request Headers\n");
        for (k, v) in &self.request_headers {
            out.push_str(&format!("  {k}: {v}\n"));
        }
        out.push_str("\nResponse Headers\n");
        for (k, v) in &self.headers {
            out.push_str(&format!("  {k}: {v}\n"));
        }
        out
    }

    /// Body for display: JSON is pretty-printed, everything else verbatim.
    pub fn display_body(&self) -> String {
        let is_json = self.headers.iter().any(|(k, v)| {
            k.eq_ignore_ascii_case("content-type") && v.contains("json")
        });
        if is_json {
            crate::model::prepare_body(Some("application/json"), &self.body)
        } else {
            self.body.clone()
        }
    }
}

/// Error from a failed request or update check.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct HttpRequestError {
    pub message: String,
}

impl From<reqwest::Error> for HttpRequestError {
    fn from(e: reqwest::Error) -> Self {
        Self {
            message: format!("{e}"),
        }
    }
}

pub type ExecutorResult = Result<HttpResponse, HttpRequestError>;

/// Messages received from the executor thread.
#[derive(Debug)]
pub enum ExecutorEvent {
    Response(ExecutorResult),
    Update(Result<UpdateStatus, HttpRequestError>),
}

/// Sender/Receiver pair for communicating with the executor.
pub struct HttpExecutor {
    pub sender: tokio_mpsc::UnboundedSender<ExecutorCmd>,
    pub receiver: mpsc::Receiver<ExecutorEvent>,
}

impl HttpExecutor {
    /// Spawn the background executor thread with a tokio runtime.
    ///
    /// Every command runs as its own task, so a slow update check never
    /// holds up a request.
    pub fn spawn() -> Self {
        let (cmd_tx, mut cmd_rx) = tokio_mpsc::unbounded_channel::<ExecutorCmd>();
        let (event_tx, event_rx) = mpsc::channel::<ExecutorEvent>();

        thread::spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    error!(error = %e, "failed to create tokio runtime");
                    return;
                }
            };

            rt.block_on(async move {
                let client = match reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build() {
                    Ok(client) => client,
                    Err(e) => {
                        error!(error = %e, "failed to build http client");
                        return;
                    }
                };
                while let Some(cmd) = cmd_rx.recv().await {
                    let client = client.clone();
                    let event_tx = event_tx.clone();
                    tokio::spawn(async move {
                        let event = match cmd {
                            ExecutorCmd::Send(spec) => {
                                ExecutorEvent::Response(execute_request(&client, spec).await)
                            }
                            ExecutorCmd::CheckUpdate {
                                current_version,
                                url,
                            } => ExecutorEvent::Update(
                                check_update(&client, &current_version, &url).await,
                            ),
                        };
                        // The UI thread may already be gone.
                        let _ = event_tx.send(event);
                    });
                }
            });
        });

        Self {
            sender: cmd_tx,
            receiver: event_rx,
        }
    }

    /// Queue a command (non-blocking).
    pub fn send(&self, cmd: ExecutorCmd) -> Result<(), tokio_mpsc::error::SendError<ExecutorCmd>> {
        self.sender.send(cmd)
    }

    /// Try to receive a finished event (non-blocking).
    pub fn try_recv(&self) -> Option<ExecutorEvent> {
        self.receiver.try_recv().ok()
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Head => reqwest::Method::HEAD,
    }
}

/// Execute one request using reqwest.
async fn execute_request(client: &reqwest::Client, spec: RequestSpec) -> ExecutorResult {
    if spec.url.is_empty() {
        return Err(HttpRequestError {
            message: "URL is empty".to_string(),
        });
    }

    let mut builder = client.request(to_reqwest_method(spec.method), &spec.url);

    if let Some(content_type) = &spec.content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    for (key, value) in spec.headers.iter().filter(|(k, _)| !k.is_empty()) {
        builder = builder.header(key, value);
    }
    builder = match spec.credentials {
        Credentials::None => builder,
        Credentials::Basic { username, password } => builder.basic_auth(username, Some(password)),
        Credentials::Bearer { token } => builder.bearer_auth(token),
    };
    if !spec.body.is_empty() {
        builder = builder.body(spec.body);
    }

    let request = builder.build()?;
    let request_headers = header_pairs(request.headers());
    info!(method = spec.method.as_str(), url = %request.url(), "sending request");

    let start = Instant::now();
    let response = match client.execute(request).await {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "request failed");
            return Err(e.into());
        }
    };
    let elapsed_ms = start.elapsed().as_millis();

    let status_code = response.status().as_u16();
    let status_text = response
        .status()
        .canonical_reason()
        .unwrap_or("")
        .to_string();
    let headers = header_pairs(response.headers());

    let bytes = response.bytes().await.map_err(|e| HttpRequestError {
        message: format!("Failed to read response body: {e}"),
    })?;
    info!(status_code, elapsed_ms = elapsed_ms as u64, size = bytes.len(), "response received");

    Ok(HttpResponse {
        status_code,
        status_text,
        elapsed_ms,
        size_bytes: bytes.len(),
        headers,
        request_headers,
        body: String::from_utf8_lossy(&bytes).to_string(),
        received_at: Local::now(),
    })
}

async fn check_update(
    client: &reqwest::Client,
    current_version: &str,
    url: &str,
) -> Result<UpdateStatus, HttpRequestError> {
    let doc: serde_json::Value = client
        .get(url)
        .timeout(UPDATE_TIMEOUT)
        .header(USER_AGENT, concat!("resto/", env!("CARGO_PKG_VERSION")))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let latest = update::parse_latest_tag(&doc).ok_or_else(|| HttpRequestError {
        message: "Release document has no tag_name".to_string(),
    })?;
    let status = UpdateStatus::compare(current_version, &latest);
    info!(?status, "update check finished");
    Ok(status)
}

fn header_pairs(headers: &reqwest::header::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect()
}
