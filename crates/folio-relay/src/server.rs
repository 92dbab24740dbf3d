use std::fs::File;
use std::io::Read;
use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use folio_core::config::Config;
use tiny_http::Header;
use tiny_http::Method;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;

use crate::contracts::ApiResponse;
use crate::contracts::ContactSubmission;
use crate::contracts::MSG_API_RUNNING;
use crate::contracts::MSG_INVALID_BODY;
use crate::contracts::MSG_RESUME_MISSING;
use crate::contracts::MSG_SEND_FAILED;
use crate::contracts::MSG_SENT;
use crate::error::RelayError;
use crate::mailer::compose_contact_email;
use crate::mailer::MailTransport;
use crate::validation::validate_submission;

pub const MAX_BODY_BYTES: u64 = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayOptions {
    pub bind: String,
    pub allowed_origin: String,
    pub resume_path: PathBuf,
    pub resume_download_name: String,
    pub sender: String,
    pub recipient: String,
}

impl RelayOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            bind: config.server.bind.clone(),
            allowed_origin: config.server.allowed_origin.clone(),
            resume_path: config.server.resume_path.clone(),
            resume_download_name: config.server.resume_download_name.clone(),
            sender: config.mail.sender.clone(),
            recipient: config.mail.recipient().to_string(),
        }
    }
}

#[derive(Debug)]
pub enum RelayBody {
    Text(String),
    File(File),
}

#[derive(Debug)]
pub struct RelayResponse {
    pub status: u16,
    pub headers: Vec<(&'static str, String)>,
    pub body: RelayBody,
}

impl RelayResponse {
    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type", "text/plain; charset=utf-8".to_string())],
            body: RelayBody::Text(body.into()),
        }
    }

    fn json(status: u16, payload: &ApiResponse) -> Self {
        let body = serde_json::to_string(payload).unwrap_or_else(|_| {
            format!(r#"{{"success":{},"message":""}}"#, payload.success)
        });
        Self {
            status,
            headers: vec![("Content-Type", "application/json".to_string())],
            body: RelayBody::Text(body),
        }
    }

    fn empty(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: RelayBody::Text(String::new()),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Body as text. File bodies are read in full.
    pub fn into_text(self) -> std::io::Result<String> {
        match self.body {
            RelayBody::Text(text) => Ok(text),
            RelayBody::File(mut file) => {
                let mut text = String::new();
                file.read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}

/// Contact-form relay and resume download over a blocking accept loop.
pub struct RelayServer<T> {
    server: Arc<Server>,
    options: RelayOptions,
    transport: T,
}

/// Stops a running [`RelayServer::serve`] loop from another thread.
#[derive(Clone)]
pub struct ShutdownHandle {
    server: Arc<Server>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.server.unblock();
    }
}

impl<T: MailTransport> RelayServer<T> {
    pub fn bind(options: RelayOptions, transport: T) -> Result<Self, RelayError> {
        let server = Server::http(options.bind.as_str()).map_err(|err| RelayError::Bind {
            addr: options.bind.clone(),
            reason: err.to_string(),
        })?;
        Ok(Self {
            server: Arc::new(server),
            options,
            transport,
        })
    }

    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            server: Arc::clone(&self.server),
        }
    }

    pub fn options(&self) -> &RelayOptions {
        &self.options
    }

    /// Serves requests one at a time until [`ShutdownHandle::shutdown`].
    pub fn serve(&self) {
        if let Some(addr) = self.local_addr() {
            tracing::info!(%addr, origin = %self.options.allowed_origin, "relay listening");
        }
        for mut request in self.server.incoming_requests() {
            let method = request.method().clone();
            let path = request.url().to_string();
            let response = match read_body(&mut request) {
                Ok(body) => self.route(&method, &path, &body),
                Err(err) => {
                    tracing::warn!(error = %err, "failed to read request body");
                    RelayResponse::json(400, &ApiResponse::failure(MSG_INVALID_BODY))
                }
            };
            tracing::info!(%method, path = %path, status = response.status, "relay request");
            if let Err(err) = respond(request, response) {
                tracing::warn!(error = %err, "failed to write response");
            }
        }
        tracing::info!("relay stopped");
    }

    /// Maps one request to its response. Every response carries the CORS
    /// headers for the configured origin.
    pub fn route(&self, method: &Method, url: &str, body: &[u8]) -> RelayResponse {
        let path = url.split_once('?').map_or(url, |(path, _)| path);
        let mut response = match (method, path) {
            (Method::Options, _) => RelayResponse::empty(204),
            (Method::Get, "/") => RelayResponse::text(200, MSG_API_RUNNING),
            (Method::Post, "/api/contact") => self.handle_contact(body),
            (Method::Get, "/api/resume") => self.handle_resume(),
            _ => RelayResponse::text(404, "Not Found"),
        };
        response.headers.extend(self.cors_headers(method));
        response
    }

    fn cors_headers(&self, method: &Method) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            (
                "Access-Control-Allow-Origin",
                self.options.allowed_origin.clone(),
            ),
            ("Access-Control-Allow-Credentials", "true".to_string()),
        ];
        if *method == Method::Options {
            headers.push(("Access-Control-Allow-Methods", "GET, POST, OPTIONS".to_string()));
            headers.push(("Access-Control-Allow-Headers", "Content-Type".to_string()));
        }
        headers
    }

    fn handle_contact(&self, body: &[u8]) -> RelayResponse {
        let submission: ContactSubmission = match serde_json::from_slice(body) {
            Ok(submission) => submission,
            Err(err) => {
                tracing::debug!(error = %err, "rejecting malformed contact body");
                return RelayResponse::json(400, &ApiResponse::failure(MSG_INVALID_BODY));
            }
        };
        if let Err(rejection) = validate_submission(&submission) {
            return RelayResponse::json(400, &ApiResponse::failure(rejection.message()));
        }

        let mail = compose_contact_email(
            &submission,
            &self.options.sender,
            &self.options.recipient,
            Utc::now(),
        );
        match self.transport.deliver(&mail) {
            Ok(receipt) => {
                tracing::info!(receipt = %receipt.id, "contact message delivered");
                RelayResponse::json(200, &ApiResponse::ok(MSG_SENT))
            }
            Err(err) => {
                tracing::error!(error = %err, "contact delivery failed");
                RelayResponse::json(500, &ApiResponse::failure(MSG_SEND_FAILED))
            }
        }
    }

    fn handle_resume(&self) -> RelayResponse {
        let path = &self.options.resume_path;
        match File::open(path) {
            Ok(file) => RelayResponse {
                status: 200,
                headers: vec![
                    ("Content-Type", content_type_for(path).to_string()),
                    (
                        "Content-Disposition",
                        format!(
                            "attachment; filename=\"{}\"",
                            self.options.resume_download_name.replace(['"', '\\'], "")
                        ),
                    ),
                ],
                body: RelayBody::File(file),
            },
            Err(err) => {
                tracing::error!(path = %path.display(), error = %err, "resume download failed");
                RelayResponse::text(500, MSG_RESUME_MISSING)
            }
        }
    }
}

fn content_type_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

fn read_body(request: &mut Request) -> std::io::Result<Vec<u8>> {
    let mut body = Vec::new();
    request
        .as_reader()
        .take(MAX_BODY_BYTES + 1)
        .read_to_end(&mut body)?;
    if body.len() as u64 > MAX_BODY_BYTES {
        return Err(std::io::Error::other("request body too large"));
    }
    Ok(body)
}

fn respond(request: Request, response: RelayResponse) -> std::io::Result<()> {
    let headers: Vec<Header> = response
        .headers
        .iter()
        .filter_map(|(name, value)| {
            let header = Header::from_bytes(name.as_bytes(), value.as_bytes()).ok();
            if header.is_none() {
                tracing::warn!(header = %name, "dropping invalid response header");
            }
            header
        })
        .collect();
    match response.body {
        RelayBody::Text(text) => {
            let mut reply = Response::from_string(text).with_status_code(response.status);
            for header in headers {
                reply.add_header(header);
            }
            request.respond(reply)
        }
        RelayBody::File(file) => {
            let mut reply = Response::from_file(file).with_status_code(response.status);
            for header in headers {
                reply.add_header(header);
            }
            request.respond(reply)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mailer::MemoryMailTransport;

    fn options(resume_path: PathBuf) -> RelayOptions {
        RelayOptions {
            bind: "127.0.0.1:0".to_string(),
            allowed_origin: "http://localhost:5173".to_string(),
            resume_path,
            resume_download_name: "Jane_Doe_Resume.pdf".to_string(),
            sender: "site@example.com".to_string(),
            recipient: "me@example.com".to_string(),
        }
    }

    fn relay(transport: MemoryMailTransport) -> RelayServer<MemoryMailTransport> {
        RelayServer::bind(options(PathBuf::from("does/not/exist.pdf")), transport).unwrap()
    }

    fn body_json(response: RelayResponse) -> ApiResponse {
        serde_json::from_str(&response.into_text().unwrap()).unwrap()
    }

    #[test]
    fn root_reports_running() {
        let server = relay(MemoryMailTransport::new());
        let response = server.route(&Method::Get, "/", b"");
        assert_eq!(response.status, 200);
        assert_eq!(
            response.header("access-control-allow-origin"),
            Some("http://localhost:5173")
        );
        assert_eq!(response.header("Access-Control-Allow-Credentials"), Some("true"));
        assert_eq!(response.into_text().unwrap(), "API is running...");
    }

    #[test]
    fn contact_success_delivers_one_mail() {
        let transport = MemoryMailTransport::new();
        let server = relay(transport.clone());
        let response = server.route(
            &Method::Post,
            "/api/contact",
            br#"{"name":"Ann","email":"ann@example.com","message":"Hello"}"#,
        );
        assert_eq!(response.status, 200);
        assert_eq!(body_json(response), ApiResponse::ok("Message sent successfully!"));

        let sent = transport.messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].reply_to, "ann@example.com");
        assert_eq!(sent[0].to, "me@example.com");
    }

    #[test]
    fn contact_missing_field_is_rejected() {
        let transport = MemoryMailTransport::new();
        let server = relay(transport.clone());
        let response = server.route(&Method::Post, "/api/contact", br#"{"name":"Ann","email":"ann@example.com"}"#);
        assert_eq!(response.status, 400);
        assert_eq!(body_json(response), ApiResponse::failure("All fields are required"));
        assert!(transport.messages().is_empty());
    }

    #[test]
    fn contact_null_field_is_treated_as_missing() {
        let server = relay(MemoryMailTransport::new());
        let response = server.route(
            &Method::Post,
            "/api/contact",
            br#"{"name":null,"email":"ann@example.com","message":"Hello"}"#,
        );
        assert_eq!(response.status, 400);
        assert_eq!(body_json(response), ApiResponse::failure("All fields are required"));
    }

    #[test]
    fn contact_invalid_email_and_body() {
        let server = relay(MemoryMailTransport::new());
        let response = server.route(
            &Method::Post,
            "/api/contact",
            br#"{"name":"Ann","email":"ann","message":"Hello"}"#,
        );
        assert_eq!(response.status, 400);
        assert_eq!(
            body_json(response).message,
            "Please enter a valid e-mail address"
        );

        let response = server.route(&Method::Post, "/api/contact", b"{not json");
        assert_eq!(response.status, 400);
        assert_eq!(body_json(response).message, "Invalid request body");
    }

    #[test]
    fn contact_delivery_failure_is_500() {
        let server = relay(MemoryMailTransport::rejecting("smtp down"));
        let response = server.route(
            &Method::Post,
            "/api/contact",
            br#"{"name":"Ann","email":"ann@example.com","message":"Hello","subject":"Hi"}"#,
        );
        assert_eq!(response.status, 500);
        assert_eq!(
            body_json(response),
            ApiResponse::failure("Failed to send message. Please try again later.")
        );
    }

    #[test]
    fn resume_streams_with_download_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Resume.pdf");
        std::fs::write(&path, "%PDF-1.4 fake").unwrap();
        let server = RelayServer::bind(options(path), MemoryMailTransport::new()).unwrap();

        let response = server.route(&Method::Get, "/api/resume?dl=1", b"");
        assert_eq!(response.status, 200);
        assert_eq!(response.header("Content-Type"), Some("application/pdf"));
        assert_eq!(
            response.header("Content-Disposition"),
            Some("attachment; filename=\"Jane_Doe_Resume.pdf\"")
        );
        assert_eq!(response.into_text().unwrap(), "%PDF-1.4 fake");
    }

    #[test]
    fn missing_resume_is_500() {
        let server = relay(MemoryMailTransport::new());
        let response = server.route(&Method::Get, "/api/resume", b"");
        assert_eq!(response.status, 500);
        assert_eq!(response.into_text().unwrap(), "Could not find resume file.");
    }

    #[test]
    fn preflight_and_unknown_routes() {
        let server = relay(MemoryMailTransport::new());
        let preflight = server.route(&Method::Options, "/api/contact", b"");
        assert_eq!(preflight.status, 204);
        assert_eq!(
            preflight.header("Access-Control-Allow-Methods"),
            Some("GET, POST, OPTIONS")
        );

        let missing = server.route(&Method::Get, "/api/unknown", b"");
        assert_eq!(missing.status, 404);
        assert_eq!(missing.header("Access-Control-Allow-Origin"), Some("http://localhost:5173"));
        assert_eq!(server.route(&Method::Post, "/", b"").status, 404);
    }

    #[test]
    fn options_come_from_config() {
        let mut config = Config::default();
        config.mail.recipient = None;
        config.mail.sender = "bot@example.com".to_string();
        let options = RelayOptions::from_config(&config);
        assert_eq!(options.recipient, "bot@example.com");
        assert_eq!(options.bind, "127.0.0.1:5000");
    }
}
