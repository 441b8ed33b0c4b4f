use serde_json::{Map, Number, Value};

pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Logger {
    min_level: LogLevel,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_LEVEL)
    }
}

impl Logger {
    pub const fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn from_setting(raw: Option<&str>) -> Self {
        Self::new(raw.and_then(LogLevel::parse).unwrap_or(DEFAULT_LOG_LEVEL))
    }

    /// Browser builds read `PORTFOLIO_LOG_LEVEL` at compile time.
    pub fn from_build_env() -> Self {
        Self::from_setting(option_env!("PORTFOLIO_LOG_LEVEL"))
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    pub fn log_event(&self, level: LogLevel, event: &str, fields: Value) {
        if !self.enabled(level) {
            return;
        }

        emit(level, &format_event(now_unix_millis(), level, event, fields));
    }
}

pub fn format_event(ts: u64, level: LogLevel, event: &str, fields: Value) -> Value {
    let mut payload = Map::new();
    payload.insert("ts".to_string(), Value::Number(Number::from(ts)));
    payload.insert("level".to_string(), Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), Value::String(event.to_string()));

    if let Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Value::Object(payload)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: &Value) {
    let line = wasm_bindgen::JsValue::from_str(&line.to_string());
    match level {
        LogLevel::Warn => web_sys::console::warn_1(&line),
        LogLevel::Debug | LogLevel::Info => web_sys::console::log_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, line: &Value) {
    println!("{line}");
}

#[cfg(target_arch = "wasm32")]
fn now_unix_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn now_unix_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|value| value.as_millis() as u64)
        .unwrap_or(0)
}
