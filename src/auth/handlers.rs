use tracing::{info, instrument, warn};

use crate::auth::dto::{LoginRequest, RegisterRequest};
use crate::auth::services::{is_valid_email, normalize_email};
use crate::notify::Notice;
use crate::state::AppState;

#[instrument(skip(state, password))]
pub async fn register(state: &mut AppState, name: &str, email: &str, password: &str) -> Notice {
    let email = normalize_email(email);
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Notice::failure("invalid email address");
    }

    let payload = RegisterRequest {
        name: name.to_string(),
        email,
        password: password.to_string(),
    };
    match state.api().register(&payload).await {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, "registered");
            let name = user.name.clone();
            state.set_session(user);
            Notice::success(format!("registered and logged in as {name}"))
        }
        Err(e) => Notice::api_failure("registration failed", &e),
    }
}

#[instrument(skip(state, password))]
pub async fn login(state: &mut AppState, email: &str, password: &str) -> Notice {
    let email = normalize_email(email);
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Notice::failure("invalid email address");
    }

    let payload = LoginRequest {
        email,
        password: password.to_string(),
    };
    match state.api().login(&payload).await {
        Ok(user) => {
            info!(user_id = %user.id, email = %user.email, "logged in");
            let name = user.name.clone();
            state.set_session(user);
            Notice::success(format!("logged in as {name}"))
        }
        Err(e) => Notice::api_failure("login failed", &e),
    }
}

/// Logout is purely local: the session reference and the cached catalog are
/// dropped, no request is issued.
pub fn logout(state: &mut AppState) -> Notice {
    state.clear_session();
    Notice::success("logged out")
}
