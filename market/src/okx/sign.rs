use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Request signature: `base64(HMAC-SHA256(secret, ts + method + path + body))`.
///
/// `path_with_query` must include the query string; GET requests sign an
/// empty body.
pub fn sign_request(
    secret: &str,
    timestamp: &str,
    method: &str,
    path_with_query: &str,
    body: &str,
) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("hmac accepts any key length");
    mac.update(timestamp.as_bytes());
    mac.update(method.as_bytes());
    mac.update(path_with_query.as_bytes());
    mac.update(body.as_bytes());

    BASE64.encode(mac.finalize().into_bytes())
}

/// ISO-8601 timestamp with millisecond precision, e.g.
/// `2024-05-01T12:00:00.123Z` — the format the signature scheme expects.
pub fn iso_timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}
