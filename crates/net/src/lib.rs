use std::fmt;
use std::time::{Duration, Instant};

const USER_AGENT: &str = "headorder/0.1 (+https://github.com/headorder)";
const TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct FetchResult {
    pub url: String,           // final URL after redirects
    pub requested_url: String, // what we asked for
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
    pub duration_ms: u128,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetError {
    Client(String),
    Request { url: String, message: String },
    Status { url: String, status: u16 },
    Body { url: String, message: String },
}

impl fmt::Display for NetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetError::Client(message) => write!(f, "client build error: {message}"),
            NetError::Request { url, message } => write!(f, "request to {url} failed: {message}"),
            NetError::Status { url, status } => write!(f, "{url} responded with HTTP {status}"),
            NetError::Body { url, message } => write!(f, "reading body of {url} failed: {message}"),
        }
    }
}

impl std::error::Error for NetError {}

/// Non-2xx responses are errors: an error page is not a usable document snapshot.
pub fn check_status(url: &str, status: u16) -> Result<(), NetError> {
    if (200..300).contains(&status) {
        Ok(())
    } else {
        Err(NetError::Status {
            url: url.to_string(),
            status,
        })
    }
}

/// Fetches `url` and returns the decoded body text. Blocks the calling thread.
pub fn fetch_text(url: &str) -> Result<FetchResult, NetError> {
    let start = Instant::now();
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| NetError::Client(e.to_string()))?;

    log::debug!(target: "headorder.net", "GET {url}");
    let resp = client.get(url).send().map_err(|e| NetError::Request {
        url: url.to_string(),
        message: e.to_string(),
    })?;

    let status = resp.status().as_u16();
    let final_url = resp.url().to_string();
    check_status(&final_url, status)?;
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    let body = resp.text().map_err(|e| NetError::Body {
        url: final_url.clone(),
        message: e.to_string(),
    })?;

    let duration_ms = start.elapsed().as_millis();
    log::debug!(
        target: "headorder.net",
        "GET {url} -> {status} ({} bytes, {duration_ms} ms)",
        body.len()
    );

    Ok(FetchResult {
        url: final_url,
        requested_url: url.to_string(),
        status,
        content_type,
        body,
        duration_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses_pass() {
        assert_eq!(check_status("https://a.test/", 200), Ok(()));
        assert_eq!(check_status("https://a.test/", 204), Ok(()));
    }

    #[test]
    fn other_statuses_are_errors() {
        for status in [301, 404, 500] {
            assert_eq!(
                check_status("https://a.test/", status),
                Err(NetError::Status {
                    url: "https://a.test/".to_string(),
                    status
                })
            );
        }
    }

    #[test]
    fn errors_render_readably() {
        let err = NetError::Status {
            url: "https://a.test/".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "https://a.test/ responded with HTTP 503");
    }

    #[test]
    fn unreachable_scheme_is_a_request_error() {
        let err = fetch_text("notascheme://nowhere").unwrap_err();
        assert!(
            matches!(err, NetError::Request { .. } | NetError::Client(_)),
            "got: {err:?}"
        );
    }
}
