//! Persistent login session.
//!
//! The session is the logged-in [`User`] plus, when the login service issued
//! one, a bearer token for protected calls. Both are persisted so the
//! session survives restarts; absence of the user means logged-out.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{info, warn};

use gymtastic_core::{Role, User};

use crate::storage::{Storage, keys};

/// Why a role-gated action was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("Debes iniciar sesión para continuar.")]
    NotAuthenticated,
    #[error("No tienes permisos para acceder a esta sección.")]
    Forbidden,
}

/// Session container backed by a [`Storage`].
pub struct SessionStore<S: Storage> {
    storage: S,
    user: Option<User>,
    token: Option<SecretString>,
}

impl<S: Storage> std::fmt::Debug for SessionStore<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("user", &self.user)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl<S: Storage> SessionStore<S> {
    /// Open the session, restoring the persisted user and token.
    ///
    /// A corrupted user snapshot is deleted and the session starts
    /// logged-out.
    pub fn open(storage: S) -> Self {
        let user = restore_user(&storage);
        let token = match storage.get_item(keys::TOKEN) {
            Ok(token) => token.filter(|t| !t.is_empty()).map(SecretString::from),
            Err(e) => {
                warn!(error = %e, "Failed to read stored token");
                None
            }
        };
        Self {
            storage,
            user,
            token,
        }
    }

    /// Replace the current session with `user`. A token held for the
    /// previous session is dropped.
    pub fn login(&mut self, user: User) {
        self.drop_token();
        self.set_user(user);
    }

    /// Replace the current session and keep the bearer token the login
    /// service issued.
    pub fn login_with_token(&mut self, user: User, token: SecretString) {
        self.set_user(user);
        if let Err(e) = self.storage.set_item(keys::TOKEN, token.expose_secret()) {
            warn!(error = %e, "Failed to persist token");
        }
        self.token = Some(token);
    }

    fn set_user(&mut self, user: User) {
        info!(email = %user.email, role = %user.role, "Logged in");
        match serde_json::to_string(&user) {
            Ok(json) => {
                if let Err(e) = self.storage.set_item(keys::USER, &json) {
                    warn!(error = %e, "Failed to persist session");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize session"),
        }
        self.user = Some(user);
    }

    fn drop_token(&mut self) {
        self.token = None;
        if let Err(e) = self.storage.remove_item(keys::TOKEN) {
            warn!(error = %e, "Failed to remove stored token");
        }
    }

    /// Clear the session and its persisted snapshot.
    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            info!(email = %user.email, "Logged out");
        }
        self.token = None;
        for key in [keys::USER, keys::TOKEN] {
            if let Err(e) = self.storage.remove_item(key) {
                warn!(error = %e, key, "Failed to remove session data");
            }
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn token(&self) -> Option<&SecretString> {
        self.token.as_ref()
    }

    /// The current user, provided they hold `role`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotAuthenticated`] when logged out and
    /// [`AccessError::Forbidden`] when the role differs.
    pub fn require_role(&self, role: Role) -> Result<&User, AccessError> {
        let user = self.user.as_ref().ok_or(AccessError::NotAuthenticated)?;
        if user.role != role {
            return Err(AccessError::Forbidden);
        }
        Ok(user)
    }
}

fn restore_user(storage: &impl Storage) -> Option<User> {
    let raw = match storage.get_item(keys::USER) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!(error = %e, "Failed to read stored session");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            warn!(error = %e, "Stored session is corrupted, discarding it");
            if let Err(e) = storage.remove_item(keys::USER) {
                warn!(error = %e, "Failed to remove corrupted session");
            }
            None
        }
    }
}
