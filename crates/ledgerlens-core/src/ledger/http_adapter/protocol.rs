use reqwest::StatusCode;

use crate::error::{UpstreamError, UpstreamErrorKind};

/// `rippled` numeric code for `actNotFound`.
const ACT_NOT_FOUND_CODE: i64 = 19;
const ACT_NOT_FOUND_TOKEN: &str = "actNotFound";

/// Request body: `{"method": ..., "params": [ {...} ]}`.
#[derive(serde::Serialize)]
pub(super) struct RpcRequest<'a> {
    pub(super) method: &'a str,
    pub(super) params: [serde_json::Value; 1],
}

#[derive(serde::Deserialize)]
pub(super) struct RpcResponse {
    pub(super) result: Option<serde_json::Value>,
}

/// Validate a raw HTTP response and return its `result` object.
///
/// A call succeeds only when the HTTP status is 2xx, the body carries a
/// `result` object, and `result.status == "success"`.
pub(super) fn unwrap_envelope(
    method: &str,
    status: StatusCode,
    body: &str,
) -> Result<serde_json::Value, UpstreamError> {
    let decoded = serde_json::from_str::<RpcResponse>(body);

    if !status.is_success() {
        // Some proxies return an envelope alongside the error status.
        let detail = decoded
            .ok()
            .and_then(|r| r.result)
            .and_then(|result| envelope_message(&result));
        let message = match detail {
            Some(detail) => format!("HTTP {status}: {detail}"),
            None => format!("HTTP {status}"),
        };
        return Err(UpstreamError::new(UpstreamErrorKind::Status, method, message));
    }

    let decoded = decoded.map_err(|e| {
        UpstreamError::malformed(method, format!("decode {method} response: {e}"))
    })?;

    let result = match decoded.result {
        Some(result @ serde_json::Value::Object(_)) => result,
        _ => {
            return Err(UpstreamError::malformed(
                method,
                format!("{method} response is missing a result object"),
            ))
        }
    };

    if result.get("status").and_then(serde_json::Value::as_str) == Some("success") {
        return Ok(result);
    }

    Err(parse_business_error(method, &result))
}

/// Classify a `result` whose status is not `success`.
pub(super) fn parse_business_error(method: &str, result: &serde_json::Value) -> UpstreamError {
    let token = result.get("error").and_then(serde_json::Value::as_str);
    let numeric = result.get("error_code").and_then(serde_json::Value::as_i64);
    let message = envelope_message(result);

    if is_account_not_found(token, numeric, message.as_deref()) {
        let err = UpstreamError::account_not_found(method);
        return match token {
            Some(token) => err.with_code(token),
            None => err,
        };
    }

    let err = UpstreamError::new(
        UpstreamErrorKind::Business,
        method,
        message.unwrap_or_else(|| format!("{method} request was not successful")),
    );
    match token {
        Some(token) => err.with_code(token),
        None => err,
    }
}

/// Prefer `error_message`, then the `error` token.
fn envelope_message(result: &serde_json::Value) -> Option<String> {
    ["error_message", "error"]
        .iter()
        .filter_map(|field| result.get(*field).and_then(serde_json::Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Structured codes win; message text is only inspected when the envelope
/// carries no code at all.
fn is_account_not_found(token: Option<&str>, numeric: Option<i64>, message: Option<&str>) -> bool {
    if token.is_some() || numeric.is_some() {
        return token == Some(ACT_NOT_FOUND_TOKEN) || numeric == Some(ACT_NOT_FOUND_CODE);
    }

    message.is_some_and(|m| m.contains("Account not found") || m.contains(ACT_NOT_FOUND_TOKEN))
}
