// Per-browser user identity — HMAC-SHA256 signed user-id cookies.
//
// Cookie value format: {user_id}.{hmac_hex}
//
// The HMAC covers the user id, signed with GAZETTE_SESSION_SECRET. A valid
// signature means "this id was issued by us", so users can't read each
// other's history by editing the cookie. New visitors get a fresh random
// id on their first request.

use axum::http::{header, HeaderMap};
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Identity cookie name.
pub const COOKIE_NAME: &str = "gazette_uid";

/// Cookie lifetime: one year. Identity should persist, not expire with a
/// browsing session.
pub const COOKIE_MAX_AGE_SECS: u64 = 31_536_000;

/// Generate a fresh random user id.
pub fn new_user_id() -> String {
    let mut bytes = [0u8; 8];
    rand::rng().fill_bytes(&mut bytes);
    format!("user_{}", hex::encode(bytes))
}

/// Build the signed cookie value for a user id.
pub fn sign(secret: &str, user_id: &str) -> String {
    format!("{user_id}.{}", hmac_sign(secret, user_id))
}

/// Verify a signed cookie value, returning the user id if the signature
/// checks out.
pub fn verify(secret: &str, value: &str) -> Option<String> {
    let (user_id, provided_sig) = value.split_once('.')?;
    let expected_sig = hmac_sign(secret, user_id);
    if constant_time_eq(provided_sig, &expected_sig) {
        Some(user_id.to_string())
    } else {
        None
    }
}

/// Extract the verified user id from a request's Cookie header.
pub fn user_from_headers(headers: &HeaderMap, secret: &str) -> Option<String> {
    let cookie_header = headers.get(header::COOKIE)?.to_str().ok()?;

    for pair in cookie_header.split(';') {
        let pair = pair.trim();
        if let Some((name, value)) = pair.split_once('=') {
            if name.trim() == COOKIE_NAME {
                return verify(secret, value.trim());
            }
        }
    }
    None
}

/// Build the `Set-Cookie` header value for a newly issued identity.
pub fn set_cookie_header(signed_value: &str) -> String {
    format!(
        "{COOKIE_NAME}={signed_value}; HttpOnly; SameSite=Lax; Path=/; Max-Age={COOKIE_MAX_AGE_SECS}"
    )
}

// --- Private helpers ---

fn hmac_sign(secret: &str, payload: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| HmacSha256::new_from_slice(b"fallback").unwrap());
    mac.update(payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
