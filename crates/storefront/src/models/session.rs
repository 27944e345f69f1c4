//! Session-related types.
//!
//! Types stored in the session for authentication, cart, and checkout
//! state. All of it is ephemeral by design: the session store is
//! in-memory and nothing survives a restart.

use serde::{Deserialize, Serialize};

use eventhub_core::{Email, UserId};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's remote API ID.
    pub user_id: UserId,
    /// User's email address.
    pub email: Email,
    /// Display name, when the remote API provided one.
    pub name: Option<String>,
}

/// Session keys for per-user state.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the shopping cart.
    pub const CART: &str = "cart";

    /// Key for the in-flight checkout state machine.
    pub const CHECKOUT: &str = "checkout";

    /// Key for a pending login awaiting OTP verification.
    pub const PENDING_LOGIN: &str = "pending_login";

    /// Key for the most recently completed order (confirmation page).
    pub const LAST_ORDER: &str = "last_order";
}

/// A login that has passed password verification but not yet OTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingLogin {
    pub user_id: UserId,
    pub email: Email,
}
