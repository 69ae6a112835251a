//! Shared test harness
//!
//! An in-process axum server plays the part of a printer: `GET /api/<path>` is answered
//! with `tests/fixtures/<family>/<path>.json`. Paths without a fixture get a 404 with an
//! HTML body, the way PrusaLink answers unknown routes.

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use prusa_exporter::config::PrinterConfig;
use secrecy::SecretString;
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const API_KEY: &str = "fixture-api-key";
pub const DIGEST_USER: &str = "maker";
pub const DIGEST_PASSWORD: &str = "s3cret";
pub const DIGEST_CHALLENGE: &str =
    r#"Digest realm="Printer API", nonce="dcd98b7102dd2f0e8b11d0f600bfb0c093", qop="auth""#;

/// How the fake printer behaves
#[derive(Clone, Default)]
pub struct FixtureOptions {
    /// Fixture directory under `tests/fixtures`
    pub family: &'static str,
    /// API paths answered with 404 even if a fixture exists
    pub missing: Vec<&'static str>,
    /// API paths answered with a fixed body; an empty body is sent as 204
    pub overrides: HashMap<&'static str, String>,
    /// API paths answered with a bare status and no body
    pub statuses: HashMap<&'static str, StatusCode>,
    /// Hold every response back this long
    pub delay: Option<Duration>,
    /// Require digest authentication instead of the API key
    pub digest: bool,
}

impl FixtureOptions {
    pub fn family(family: &'static str) -> Self {
        Self {
            family,
            ..Default::default()
        }
    }

    pub fn without(mut self, path: &'static str) -> Self {
        self.missing.push(path);
        self
    }

    pub fn with_body(mut self, path: &'static str, body: impl Into<String>) -> Self {
        self.overrides.insert(path, body.into());
        self
    }

    pub fn with_status(mut self, path: &'static str, status: StatusCode) -> Self {
        self.statuses.insert(path, status);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_digest(mut self) -> Self {
        self.digest = true;
        self
    }
}

struct Fixture {
    options: FixtureOptions,
    overrides: Mutex<HashMap<String, String>>,
    requests: Mutex<Vec<String>>,
    authorizations: Mutex<Vec<String>>,
}

/// A running fake printer
pub struct FixtureServer {
    pub address: String,
    fixture: Arc<Fixture>,
}

impl FixtureServer {
    /// API paths requested so far, in order, without the `/api/` prefix
    pub fn requests(&self) -> Vec<String> {
        self.fixture.requests.lock().unwrap().clone()
    }

    /// `Authorization` headers received so far
    pub fn authorizations(&self) -> Vec<String> {
        self.fixture.authorizations.lock().unwrap().clone()
    }

    /// Replace the body served for `path` from now on
    pub fn set_body(&self, path: &str, body: impl Into<String>) {
        self.fixture
            .overrides
            .lock()
            .unwrap()
            .insert(path.to_string(), body.into());
    }

    /// Config for this printer, authenticating the way the server expects
    pub fn printer(&self, printer_type: &str, name: &str) -> PrinterConfig {
        if self.fixture.options.digest {
            PrinterConfig {
                address: self.address.clone(),
                name: name.to_string(),
                printer_type: printer_type.to_string(),
                api_key: None,
                username: Some(DIGEST_USER.to_string()),
                password: Some(SecretString::from(DIGEST_PASSWORD)),
            }
        } else {
            printer_config(&self.address, printer_type, name)
        }
    }
}

pub fn printer_config(address: &str, printer_type: &str, name: &str) -> PrinterConfig {
    PrinterConfig {
        address: address.to_string(),
        name: name.to_string(),
        printer_type: printer_type.to_string(),
        api_key: Some(SecretString::from(API_KEY)),
        username: None,
        password: None,
    }
}

pub async fn spawn_printer(options: FixtureOptions) -> FixtureServer {
    let overrides = options
        .overrides
        .iter()
        .map(|(path, body)| (path.to_string(), body.clone()))
        .collect();
    let fixture = Arc::new(Fixture {
        options,
        overrides: Mutex::new(overrides),
        requests: Mutex::new(Vec::new()),
        authorizations: Mutex::new(Vec::new()),
    });

    let app = Router::new()
        .fallback(serve_fixture)
        .with_state(fixture.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FixtureServer { address, fixture }
}

/// An address nothing listens on
pub async fn closed_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    drop(listener);
    address
}

async fn serve_fixture(
    State(fixture): State<Arc<Fixture>>,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let Some(path) = uri.path().strip_prefix("/api/") else {
        return not_found();
    };
    let path = path.to_string();
    fixture.requests.lock().unwrap().push(path.clone());

    let request_uri = uri
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_else(|| uri.path());
    if let Err(response) = authorize(&fixture, request_uri, &headers) {
        return response;
    }

    let options = &fixture.options;
    if let Some(delay) = options.delay {
        tokio::time::sleep(delay).await;
    }
    if options.missing.contains(&path.as_str()) {
        return not_found();
    }
    if let Some(status) = options.statuses.get(path.as_str()) {
        return (*status).into_response();
    }
    let body = fixture.overrides.lock().unwrap().get(&path).cloned();
    if let Some(body) = body {
        if body.is_empty() {
            return StatusCode::NO_CONTENT.into_response();
        }
        return json(body);
    }

    let file: PathBuf = [
        env!("CARGO_MANIFEST_DIR"),
        "tests",
        "fixtures",
        options.family,
        &format!("{}.json", path),
    ]
    .iter()
    .collect();

    match std::fs::read_to_string(file) {
        Ok(body) => json(body),
        Err(_) => not_found(),
    }
}

fn authorize(fixture: &Fixture, request_uri: &str, headers: &HeaderMap) -> Result<(), Response> {
    if fixture.options.digest {
        let Some(authorization) = headers.get(header::AUTHORIZATION) else {
            return Err((
                StatusCode::UNAUTHORIZED,
                [(header::WWW_AUTHENTICATE, DIGEST_CHALLENGE)],
                "Unauthorized",
            )
                .into_response());
        };
        let authorization = authorization.to_str().unwrap_or_default().to_string();
        fixture
            .authorizations
            .lock()
            .unwrap()
            .push(authorization.clone());

        let expected_uri = format!(r#"uri="{}""#, request_uri);
        let valid = authorization.starts_with("Digest ")
            && authorization.contains(&format!(r#"username="{}""#, DIGEST_USER))
            && authorization.contains(&expected_uri)
            && authorization.contains(r#"nonce="dcd98b7102dd2f0e8b11d0f600bfb0c093""#)
            && authorization.contains("response=");
        if !valid {
            return Err(StatusCode::UNAUTHORIZED.into_response());
        }
        return Ok(());
    }

    match headers.get("X-Api-Key") {
        Some(key) if key == API_KEY => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED.into_response()),
    }
}

fn json(body: String) -> Response {
    Response::builder()
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/html")],
        "<html><body><h1>404 Not Found</h1></body></html>",
    )
        .into_response()
}

/// One sample line of the text exposition format
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub value: f64,
}

impl Sample {
    pub fn label(&self, name: &str) -> &str {
        self.labels.get(name).map(String::as_str).unwrap_or_default()
    }
}

/// Parse rendered metrics into samples; comments are skipped.
pub fn parse_exposition(text: &str) -> Vec<Sample> {
    text.lines()
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(parse_sample)
        .collect()
}

fn parse_sample(line: &str) -> Sample {
    let (series, value) = line.rsplit_once(' ').unwrap();
    let value = match value {
        "NaN" => f64::NAN,
        "+Inf" => f64::INFINITY,
        "-Inf" => f64::NEG_INFINITY,
        v => v.parse().unwrap(),
    };

    let Some((name, rest)) = series.split_once('{') else {
        return Sample {
            name: series.to_string(),
            labels: BTreeMap::new(),
            value,
        };
    };

    let body = rest.strip_suffix('}').unwrap();
    let mut labels = BTreeMap::new();
    let mut chars = body.chars().peekable();
    loop {
        let key: String = chars.by_ref().take_while(|c| *c != '=').collect();
        if key.is_empty() {
            break;
        }
        assert_eq!(chars.next(), Some('"'));
        let mut value = String::new();
        while let Some(c) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some('n') => value.push('\n'),
                    Some(other) => value.push(other),
                    None => break,
                },
                '"' => break,
                c => value.push(c),
            }
        }
        labels.insert(key.trim_start_matches(',').to_string(), value);
        if chars.peek() == Some(&',') {
            chars.next();
        }
    }

    Sample {
        name: name.to_string(),
        labels,
        value,
    }
}

/// All samples of one metric
pub fn series<'a>(samples: &'a [Sample], name: &str) -> Vec<&'a Sample> {
    samples.iter().filter(|s| s.name == name).collect()
}

/// Value of the only sample of `name` whose labels include `labels`
pub fn value(samples: &[Sample], name: &str, labels: &[(&str, &str)]) -> Option<f64> {
    let matching: Vec<_> = samples
        .iter()
        .filter(|s| s.name == name)
        .filter(|s| labels.iter().all(|(k, v)| s.label(k) == *v))
        .collect();
    assert!(
        matching.len() <= 1,
        "{} matches {} samples for {:?}",
        name,
        matching.len(),
        labels
    );
    matching.first().map(|s| s.value)
}

/// Names of all metrics present, deduplicated and sorted
pub fn metric_names(samples: &[Sample]) -> Vec<String> {
    let mut names: Vec<_> = samples.iter().map(|s| s.name.clone()).collect();
    names.sort();
    names.dedup();
    names
}
