// self
use crate::{_prelude::*, auth::Secret, dto::ProviderError};

/// Token endpoint response.
///
/// The OAuth2 fields use snake_case on the wire while the embedded error block keeps the
/// provider's PascalCase names.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AuthToken {
	/// Bearer token to present on business calls.
	pub access_token: Secret,
	/// Token type, normally `Bearer`.
	pub token_type: String,
	/// Lifetime in seconds.
	pub expires_in: i64,
	/// Granted scope.
	pub scope: String,
	/// Embedded provider error.
	#[serde(flatten)]
	pub error: ProviderError,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn decodes_token_response() {
		let token: AuthToken = serde_json::from_str(
			r#"{"access_token":"abc","token_type":"Bearer","expires_in":3600,"scope":"resource.WRITE resource.READ"}"#,
		)
		.expect("Token response should decode.");

		assert_eq!(token.access_token.expose(), "abc");
		assert_eq!(token.expires_in, 3600);
		assert!(token.error.is_empty());
	}

	#[test]
	fn decodes_error_only_body() {
		let token: AuthToken = serde_json::from_str(
			r#"{"ErrorCode":"ESB-14-001","ErrorMessage":{"Indonesian":"x","English":"Unauthorized"}}"#,
		)
		.expect("Error body should decode.");

		assert!(token.access_token.is_empty());
		assert_eq!(token.error.error_code, "ESB-14-001");
	}
}
