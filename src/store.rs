//! Shared session state: the current bearer token and its correlation identifier.

// self
use crate::{
	_prelude::*,
	auth::{Secret, SessionId},
};

/// Bearer token paired with the correlation identifier minted alongside it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
	/// Bearer token sent in the `Authorization` header; empty before authentication.
	pub access_token: Secret,
	/// Correlation identifier for log entries of this authentication epoch.
	pub session_id: SessionId,
}
impl Session {
	/// Returns `true` once an authentication has populated the session.
	pub fn is_established(&self) -> bool {
		!self.access_token.is_empty()
	}
}

/// Thread-safe holder of the current [`Session`].
///
/// Writes replace the token and identifier together under one exclusive lock, so readers only
/// ever observe pairs written by the same [`TokenStore::set`] call. Nothing here refreshes the
/// token on its own; authentication is always triggered explicitly.
#[derive(Debug, Default)]
pub struct TokenStore(RwLock<Arc<Session>>);
impl TokenStore {
	/// Replaces the current session.
	pub fn set(&self, access_token: Secret, session_id: SessionId) {
		let session = Arc::new(Session { access_token, session_id });

		*self.0.write() = session;
	}

	/// Returns a snapshot of the current session.
	pub fn current(&self) -> Arc<Session> {
		self.0.read().clone()
	}

	/// Returns the current correlation identifier.
	pub fn session_id(&self) -> SessionId {
		self.0.read().session_id.clone()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn empty_until_first_set() {
		let store = TokenStore::default();

		assert!(!store.current().is_established());
		assert!(store.session_id().is_empty());

		store.set(Secret::new("token-1"), SessionId::new("session-1"));

		let current = store.current();

		assert!(current.is_established());
		assert_eq!(current.access_token.expose(), "token-1");
		assert_eq!(current.session_id.as_str(), "session-1");
	}

	#[test]
	fn set_replaces_both_fields() {
		let store = TokenStore::default();

		store.set(Secret::new("token-1"), SessionId::new("session-1"));

		let before = store.current();

		store.set(Secret::new("token-2"), SessionId::new("session-2"));

		assert_eq!(before.access_token.expose(), "token-1");
		assert_eq!(store.current().access_token.expose(), "token-2");
		assert_eq!(store.session_id().as_str(), "session-2");
	}
}
