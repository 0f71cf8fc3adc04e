// self
use crate::_prelude::*;

/// Error block embedded in provider responses.
///
/// An empty [`ProviderError::error_code`] means the call succeeded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ProviderError {
	/// Provider error code, e.g. `ESB-14-009`.
	#[serde(default)]
	pub error_code: String,
	/// Bilingual human-readable message.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub error_message: Option<ErrorMessage>,
}
impl ProviderError {
	/// Returns `true` when no error code is present.
	pub fn is_empty(&self) -> bool {
		self.error_code.is_empty()
	}
}
impl Display for ProviderError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match &self.error_message {
			Some(message) if !message.english.is_empty() =>
				write!(f, "{}: {}", self.error_code, message.english),
			_ => f.write_str(&self.error_code),
		}
	}
}

/// Provider message in both supported languages.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ErrorMessage {
	/// Indonesian text.
	pub indonesian: String,
	/// English text.
	pub english: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn decodes_bilingual_error() {
		let error: ProviderError = serde_json::from_str(
			r#"{"ErrorCode":"ESB-14-009","ErrorMessage":{"Indonesian":"Token tidak valid","English":"Invalid token"}}"#,
		)
		.expect("Error block should decode.");

		assert!(!error.is_empty());
		assert_eq!(error.to_string(), "ESB-14-009: Invalid token");
	}

	#[test]
	fn missing_fields_mean_success() {
		let error: ProviderError = serde_json::from_str("{}").expect("Empty block should decode.");

		assert!(error.is_empty());
		assert_eq!(error.error_message, None);
	}
}
