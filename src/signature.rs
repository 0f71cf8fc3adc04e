//! Canonical string-to-sign construction and HMAC-SHA256 request signatures.
//!
//! The provider signs `METHOD:canonicalPath:accessToken:bodyDigest:timestamp`, where the body
//! digest is the lower-case hex SHA-256 of the request body with every whitespace character
//! removed, and the canonical path carries its query parameters sorted by key. Everything here is
//! a pure function of its inputs; the timestamp is produced by the caller at send time.

// crates.io
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use time::macros::format_description;
// self
use crate::{_prelude::*, error::ConfigError};

type HmacSha256 = Hmac<Sha256>;

/// Signature header value plus the exact string that was signed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestSignature {
	/// Lower-case hex HMAC-SHA256 of [`RequestSignature::string_to_sign`].
	pub signature: String,
	/// Colon-joined canonical representation of the request.
	pub string_to_sign: String,
}

/// Computes the request signature for one outbound call.
///
/// `path` may carry a query string; its parameters are reordered by key before signing.
pub fn sign(
	api_secret: &str,
	method: &str,
	path: &str,
	access_token: &str,
	body: &str,
	timestamp: &str,
) -> Result<RequestSignature, ConfigError> {
	let string_to_sign = string_to_sign(method, path, access_token, body, timestamp);
	let mut mac =
		HmacSha256::new_from_slice(api_secret.as_bytes()).map_err(|_| ConfigError::SigningKey)?;

	mac.update(string_to_sign.as_bytes());

	Ok(RequestSignature { signature: hex::encode(mac.finalize().into_bytes()), string_to_sign })
}

/// Builds the colon-joined string-to-sign.
pub fn string_to_sign(
	method: &str,
	path: &str,
	access_token: &str,
	body: &str,
	timestamp: &str,
) -> String {
	format!(
		"{method}:{path}:{access_token}:{digest}:{timestamp}",
		path = canonical_path(path),
		digest = body_digest(body),
	)
}

/// Removes every whitespace character from `body`, wherever it appears.
pub fn canonicalize_body(body: &str) -> String {
	body.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Lower-case hex SHA-256 of the canonicalized body.
pub fn body_digest(body: &str) -> String {
	hex::encode(Sha256::digest(canonicalize_body(body).as_bytes()))
}

/// Returns `path` with its query parameters sorted by key.
///
/// Values and the relative order of repeated keys are preserved. An absent or empty query
/// yields the bare path without a trailing `?`.
pub fn canonical_path(path: &str) -> String {
	match path.split_once('?') {
		Some((base, query)) => {
			let sorted = sort_query(query);

			if sorted.is_empty() { base.to_owned() } else { format!("{base}?{sorted}") }
		},
		None => path.to_owned(),
	}
}

/// Sorts `key=value` pairs of a raw query string by key.
pub fn sort_query(query: &str) -> String {
	let mut pairs = query.split('&').filter(|pair| !pair.is_empty()).collect::<Vec<_>>();

	pairs.sort_by(|a, b| query_key(a).cmp(query_key(b)));

	pairs.join("&")
}

/// Renders `instant` in the provider's timestamp profile, e.g. `2016-02-03T10:00:00.000+07:00`.
pub fn format_timestamp(instant: OffsetDateTime) -> Result<String, ConfigError> {
	let format = format_description!(
		"[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3][offset_hour sign:mandatory]:[offset_minute]"
	);

	Ok(instant.format(format)?)
}

fn query_key(pair: &str) -> &str {
	pair.split_once('=').map_or(pair, |(key, _)| key)
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	#[test]
	fn canonicalization_matches_provider_example() {
		let body = "{\n\t\t\t\t\"Test1\" : \"str Val\",\n\t\t\t\t\"Test2\" : 1\n\t\t\t }";

		assert_eq!(canonicalize_body(body), "{\"Test1\":\"strVal\",\"Test2\":1}");
	}

	#[test]
	fn empty_body_digest_is_digest_of_empty_string() {
		assert_eq!(
			body_digest(""),
			"e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
		);
		assert_eq!(body_digest(" \n\t"), body_digest(""));
	}

	#[test]
	fn query_is_sorted_without_touching_values() {
		assert_eq!(
			canonical_path("/s?StartDate=2016-09-01&EndDate=2016-09-01"),
			"/s?EndDate=2016-09-01&StartDate=2016-09-01"
		);
		assert_eq!(canonical_path("/s?b=2&a=x%20y&b=1"), "/s?a=x%20y&b=2&b=1");
		assert_eq!(canonical_path("/s?flag&a=1"), "/s?a=1&flag");
	}

	#[test]
	fn empty_query_leaves_no_delimiter() {
		assert_eq!(canonical_path("/banking/corporates/transfers"), "/banking/corporates/transfers");
		assert_eq!(canonical_path("/banking/corporates/transfers?"), "/banking/corporates/transfers");
		assert_eq!(canonical_path("/x?&&"), "/x");
	}

	#[test]
	fn timestamp_uses_millis_and_numeric_offset() {
		assert_eq!(
			format_timestamp(datetime!(2016-02-03 10:00:00 +7)).expect("Timestamp should format."),
			"2016-02-03T10:00:00.000+07:00"
		);
		assert_eq!(
			format_timestamp(datetime!(2024-12-31 23:59:59.123456 UTC))
				.expect("Timestamp should format."),
			"2024-12-31T23:59:59.123+00:00"
		);
	}
}
