//! Structured logging with sensitive-data redaction
//!
//! Key material never reaches the log stream: private keys, seeds,
//! mnemonics, and passphrases are fully redacted by key name; addresses
//! and transaction hashes are shortened to prefix...suffix.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable debug logging (wired to the --debug flag)
pub fn enable_debug() {
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}

pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// One structured log line: level, module, message, key=value fields
#[derive(Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    pub module: &'static str,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, module: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            module,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Attach a field, redacting by key name
    pub fn field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        let rendered = redact_if_sensitive(key, &value.to_string());
        self.fields.push((key, rendered));
        self
    }

    pub fn log(self) {
        if self.level == LogLevel::Debug && !is_debug_enabled() {
            return;
        }

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");
        if self.fields.is_empty() {
            eprintln!("[{}] {} [{}] {}", timestamp, self.level, self.module, self.message);
        } else {
            let fields = self
                .fields
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(" ");
            eprintln!(
                "[{}] {} [{}] {} | {}",
                timestamp, self.level, self.module, self.message, fields
            );
        }
    }
}

/// Redaction policy, keyed by field name
fn redact_if_sensitive(key: &str, value: &str) -> String {
    let key_lower = key.to_lowercase();

    let secret_keys = ["private", "secret", "seed", "mnemonic", "passphrase", "phrase"];
    if secret_keys.iter().any(|k| key_lower.contains(k)) {
        return redact_value(value);
    }

    let address_keys = ["address", "recipient", "sender", "signer"];
    if address_keys.iter().any(|k| key_lower.contains(k)) {
        return shorten(value, 8, 4);
    }

    if key_lower.contains("hash") {
        return shorten(value, 12, 6);
    }

    value.to_string()
}

/// Fully redact, keeping only the length as a debugging aid
fn redact_value(value: &str) -> String {
    if value.is_empty() {
        "[EMPTY]".to_string()
    } else {
        format!("[REDACTED:{}chars]", value.len())
    }
}

/// Shorten to prefix...suffix when long enough to stay unambiguous
fn shorten(value: &str, prefix: usize, suffix: usize) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return "[EMPTY]".to_string();
    }
    if trimmed.len() <= prefix + suffix + 3 {
        return trimmed.to_string();
    }
    format!(
        "{}...{}",
        &trimmed[..prefix],
        &trimmed[trimmed.len() - suffix..]
    )
}

#[macro_export]
macro_rules! log_debug {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Debug,
            $module,
            $msg,
        )
        .log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Debug,
            $module,
            $msg,
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

#[macro_export]
macro_rules! log_info {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Info,
            $module,
            $msg,
        )
        .log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Info,
            $module,
            $msg,
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

#[macro_export]
macro_rules! log_warn {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Warn,
            $module,
            $msg,
        )
        .log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Warn,
            $module,
            $msg,
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

#[macro_export]
macro_rules! log_error {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Error,
            $module,
            $msg,
        )
        .log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Error,
            $module,
            $msg,
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_fields_fully_redacted() {
        let redacted = redact_if_sensitive(
            "private_key",
            "79fde2303c03824bdbbeb05703847bd34d602f67246a4d8e6831efd07d3a06b5",
        );
        assert_eq!(redacted, "[REDACTED:64chars]");
        assert!(redact_if_sensitive("mnemonic", "abandon ability able").starts_with("[REDACTED"));
        assert_eq!(redact_if_sensitive("passphrase", ""), "[EMPTY]");
    }

    #[test]
    fn test_addresses_shortened() {
        let redacted =
            redact_if_sensitive("recipient", "0xad00d8fd55d733c2bc35cb50cca0c9a131d8bfb7");
        assert!(redacted.starts_with("0xad00d8"));
        assert!(redacted.ends_with("bfb7"));
        assert!(redacted.contains("..."));
    }

    #[test]
    fn test_hashes_shortened() {
        let hash = format!("0x{}", "ab".repeat(32));
        let redacted = redact_if_sensitive("tx_hash", &hash);
        assert!(redacted.starts_with("0xabababab"));
        assert!(redacted.ends_with("ababab"));
    }

    #[test]
    fn test_plain_fields_untouched() {
        assert_eq!(redact_if_sensitive("amount", "500"), "500");
        assert_eq!(redact_if_sensitive("nonce", "0"), "0");
    }

    #[test]
    fn test_entry_applies_policy_per_field() {
        let entry = LogEntry::new(LogLevel::Info, "test", "message")
            .field("amount", "500")
            .field("private_key", "deadbeef");

        let secret = entry.fields.iter().find(|(k, _)| *k == "private_key").unwrap();
        assert!(secret.1.contains("REDACTED"));
        let amount = entry.fields.iter().find(|(k, _)| *k == "amount").unwrap();
        assert_eq!(amount.1, "500");
    }
}
