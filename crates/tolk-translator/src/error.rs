use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Nothing left to translate after trimming, or a language code is empty
    EmptyInput,
    /// Input longer than the configured character limit
    TooLong,
    /// Connection or name resolution failure
    Network,
    /// Request exceeded the configured deadline
    Timeout,
    /// Endpoint answered with a non-success status
    Http,
    /// Response received but not in the expected shape
    ParseFailure,
    /// The background execution itself faulted
    Internal,
}

impl ErrorKind {
    pub fn label(self) -> &'static str {
        match self {
            ErrorKind::EmptyInput => "empty input",
            ErrorKind::TooLong => "text too long",
            ErrorKind::Network => "network error",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Http => "HTTP error",
            ErrorKind::ParseFailure => "unexpected response",
            ErrorKind::Internal => "internal error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {detail}")]
pub struct TranslationError {
    pub kind: ErrorKind,
    pub detail: String,
}

impl TranslationError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn empty_input(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::EmptyInput, detail)
    }

    pub fn parse_failure(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseFailure, detail)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, detail)
    }

    /// Worth retrying with backoff
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind, ErrorKind::Network | ErrorKind::Timeout)
    }

    /// Suggestion shown next to the error
    pub fn hint(&self) -> &'static str {
        match self.kind {
            ErrorKind::EmptyInput => "Enter some text first",
            ErrorKind::TooLong => "Shorten the text and try again",
            ErrorKind::Network => "Check your internet connection",
            ErrorKind::Timeout => "The service is slow, try again",
            ErrorKind::Http => "The translation service refused the request",
            ErrorKind::ParseFailure => "The translation service sent an unexpected answer",
            ErrorKind::Internal => "Something went wrong, try again",
        }
    }
}

impl From<reqwest::Error> for TranslationError {
    fn from(e: reqwest::Error) -> Self {
        let kind = if e.is_timeout() {
            ErrorKind::Timeout
        } else if e.is_decode() {
            ErrorKind::ParseFailure
        } else if e.is_builder() {
            ErrorKind::Internal
        } else if let Some(status) = e.status() {
            return Self::new(ErrorKind::Http, format!("HTTP {status}"));
        } else {
            ErrorKind::Network
        };

        Self::new(kind, e.to_string())
    }
}
