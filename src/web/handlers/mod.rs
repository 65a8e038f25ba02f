// API handlers — feed ranking, interaction reporting, user profile.

pub mod feed;
pub mod interactions;
pub mod profile;

use axum::http::HeaderMap;

use super::session;
use super::AppState;

/// Resolve the requesting user's identity from the session cookie, issuing
/// a fresh one if absent or invalid.
///
/// Returns the user id plus the `Set-Cookie` value to attach when a new
/// identity was issued.
pub(crate) fn session_user(state: &AppState, headers: &HeaderMap) -> (String, Option<String>) {
    let secret = &state.config.session_secret;

    match session::user_from_headers(headers, secret) {
        Some(user_id) => (user_id, None),
        None => {
            let user_id = session::new_user_id();
            let cookie = session::set_cookie_header(&session::sign(secret, &user_id));
            (user_id, Some(cookie))
        }
    }
}
