use resto_core::compose::{PASSWORD_LABEL, TOKEN_LABEL, USERNAME_LABEL};
use resto_core::{AuthMode, FormState, PanelId};

/// HTTP methods offered by the request form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
        }
    }

    pub fn from_label(s: &str) -> Option<Self> {
        match s {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "PATCH" => Some(HttpMethod::Patch),
            "DELETE" => Some(HttpMethod::Delete),
            "HEAD" => Some(HttpMethod::Head),
            _ => None,
        }
    }

    /// Whether the request body is sent with this method.
    pub fn sends_body(&self) -> bool {
        matches!(
            self,
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch | HttpMethod::Delete
        )
    }
}

/// Credentials attached to a request, taken from the auth panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    None,
    Basic { username: String, password: String },
    Bearer { token: String },
}

/// Everything the executor needs to dispatch one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub url: String,
    /// `None` when the form's content type is "none".
    pub content_type: Option<String>,
    pub body: String,
    pub credentials: Credentials,
    pub headers: Vec<(String, String)>,
}

impl RequestSpec {
    /// Snapshot the form into a request. `raw_body` is the body file's content.
    pub fn from_form(form: &FormState, raw_body: &str) -> Self {
        let method = HttpMethod::from_label(form.method()).unwrap_or(HttpMethod::Get);
        let content_type = match form.content_type() {
            "" | "none" => None,
            ct => Some(ct.to_string()),
        };

        let body = if method.sends_body() {
            prepare_body(content_type.as_deref(), raw_body)
        } else {
            String::new()
        };

        let auth = |label: &str| form.field_value(PanelId::Auth, label).to_string();
        let credentials = match form.auth_mode() {
            AuthMode::None => Credentials::None,
            AuthMode::Basic => Credentials::Basic {
                username: auth(USERNAME_LABEL),
                password: auth(PASSWORD_LABEL),
            },
            AuthMode::BearerToken => Credentials::Bearer {
                token: auth(TOKEN_LABEL),
            },
        };

        Self {
            method,
            url: form.url().trim().to_string(),
            content_type,
            body,
            credentials,
            headers: form.header_pairs(),
        }
    }
}

/// Pretty-print JSON bodies; anything else is sent as typed.
pub fn prepare_body(content_type: Option<&str>, raw: &str) -> String {
    if content_type != Some("application/json") {
        return raw.to_string();
    }
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}
