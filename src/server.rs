use crate::log::{LogLevel, Logger};
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::{self, Next},
    response::Response,
    Router,
};
use std::{
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
    time::{Instant, SystemTime, UNIX_EPOCH},
};
use tower_http::{
    services::{ServeDir, ServeFile},
    set_header::SetResponseHeaderLayer,
};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DIST_DIR: &str = "dist";
const DEFAULT_STATIC_CACHE_MAX_AGE_SECONDS: u64 = 300;

const PORT_BOUNDS: (u16, u16) = (1, u16::MAX);
const STATIC_CACHE_MAX_AGE_SECONDS_BOUNDS: (u64, u64) = (0, 365 * 24 * 60 * 60);
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed binding {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server stopped: {0}")]
    Serve(#[source] std::io::Error),
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub port: u16,
    pub dist_dir: PathBuf,
    pub static_cache_max_age_seconds: u64,
    pub logger: Logger,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = parse_with_bounds(lookup("PORT"), DEFAULT_PORT, PORT_BOUNDS);
        let dist_dir = non_empty(lookup("DIST_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIST_DIR));
        let static_cache_max_age_seconds = parse_with_bounds(
            lookup("STATIC_CACHE_MAX_AGE_SECONDS"),
            DEFAULT_STATIC_CACHE_MAX_AGE_SECONDS,
            STATIC_CACHE_MAX_AGE_SECONDS_BOUNDS,
        );
        let logger = Logger::from_setting(lookup("LOG_LEVEL").as_deref());

        Self {
            port,
            dist_dir,
            static_cache_max_age_seconds,
            logger,
        }
    }

    fn cache_control(&self) -> HeaderValue {
        HeaderValue::from_str(&format!(
            "public, max-age={}",
            self.static_cache_max_age_seconds
        ))
        .unwrap_or_else(|_| HeaderValue::from_static("no-store"))
    }
}

pub fn router(config: &ServerConfig) -> Router {
    let index = config.dist_dir.join("index.html");
    let static_service = ServeDir::new(&config.dist_dir).not_found_service(ServeFile::new(index));

    Router::new()
        .fallback_service(static_service)
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            config.cache_control(),
        ))
        .layer(middleware::from_fn_with_state(config.logger, log_requests))
}

pub async fn run() -> Result<(), ServerError> {
    let config = ServerConfig::from_env();
    let address = format!("0.0.0.0:{}", config.port);
    let app = router(&config);

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|source| ServerError::Bind {
            address: address.clone(),
            source,
        })?;

    config.logger.log_event(
        LogLevel::Info,
        "server_listening",
        serde_json::json!({
            "url": format!("http://127.0.0.1:{}", config.port),
            "dist_dir": config.dist_dir.display().to_string(),
        }),
    );

    axum::serve(listener, app).await.map_err(ServerError::Serve)
}

async fn log_requests(State(logger): State<Logger>, request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let request_id = resolve_request_id(request.headers());
    let method = request.method().as_str().to_string();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    logger.log_event(
        LogLevel::Info,
        "http_request_complete",
        serde_json::json!({
            "request_id": request_id,
            "method": method,
            "path": path,
            "status": response.status().as_u16(),
            "duration_ms": started_at.elapsed().as_millis(),
        }),
    );

    response
}

fn parse_with_bounds<T>(raw: Option<String>, default: T, bounds: (T, T)) -> T
where
    T: std::str::FromStr + PartialOrd,
{
    raw.and_then(|value| value.trim().parse::<T>().ok())
        .filter(|value| *value >= bounds.0 && *value <= bounds.1)
        .unwrap_or(default)
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
        .unwrap_or_else(generate_request_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = config_from(&[]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
        assert_eq!(config.static_cache_max_age_seconds, 300);
        assert_eq!(config.logger.min_level(), LogLevel::Info);
    }

    #[test]
    fn out_of_range_or_malformed_values_fall_back() {
        let config = config_from(&[
            ("PORT", "0"),
            ("STATIC_CACHE_MAX_AGE_SECONDS", "forever"),
            ("DIST_DIR", "   "),
        ]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.static_cache_max_age_seconds, 300);
        assert_eq!(config.dist_dir, PathBuf::from("dist"));
    }

    #[test]
    fn explicit_values_are_trimmed_and_used() {
        let config = config_from(&[
            ("PORT", " 3000 "),
            ("DIST_DIR", "public"),
            ("STATIC_CACHE_MAX_AGE_SECONDS", "0"),
            ("LOG_LEVEL", "debug"),
        ]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.dist_dir, PathBuf::from("public"));
        assert_eq!(config.cache_control(), "public, max-age=0");
        assert_eq!(config.logger.min_level(), LogLevel::Debug);
    }

    #[test]
    fn incoming_request_id_is_preserved() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static(" abc-123 "));
        assert_eq!(resolve_request_id(&headers), "abc-123");
    }

    #[test]
    fn missing_request_id_is_generated_uniquely() {
        let headers = HeaderMap::new();
        let first = resolve_request_id(&headers);
        let second = resolve_request_id(&headers);

        assert!(first.starts_with("req-"));
        assert_ne!(first, second);
    }

    #[test]
    fn bind_error_names_the_address() {
        let error = ServerError::Bind {
            address: "0.0.0.0:8080".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::AddrInUse),
        };
        assert!(error.to_string().starts_with("failed binding 0.0.0.0:8080"));
    }

    #[tokio::test]
    async fn responses_carry_request_id_and_cache_headers() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let config = config_from(&[("DIST_DIR", "/nonexistent/dist")]);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral port");
        let address = listener.local_addr().expect("bound address");
        let server = tokio::spawn(async move { axum::serve(listener, router(&config)).await });

        let mut stream = tokio::net::TcpStream::connect(address)
            .await
            .expect("server accepts connections");
        stream
            .write_all(
                b"GET /about HTTP/1.1\r\nHost: localhost\r\nx-request-id: probe-1\r\nConnection: close\r\n\r\n",
            )
            .await
            .expect("request written");
        let mut raw = String::new();
        stream
            .read_to_string(&mut raw)
            .await
            .expect("response read");
        server.abort();

        let raw = raw.to_ascii_lowercase();
        assert!(raw.contains("x-request-id: probe-1"), "{raw}");
        assert!(raw.contains("cache-control: public, max-age=300"), "{raw}");
    }
}
