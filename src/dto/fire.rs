//! FIRE remittance shapes.

// self
use crate::{_prelude::*, dto::ProviderError};

/// Beneficiary account inquiry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InquiryAccountRequest {
	/// Remittance partner credentials.
	pub authentication: FireAuthentication,
	/// Account to look up.
	pub beneficiary_details: InquiryAccountBeneficiary,
}

/// Remittance partner credentials embedded in FIRE requests.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FireAuthentication {
	/// Partner corporate identifier.
	#[serde(rename = "CorporateID")]
	pub corporate_id: String,
	/// Partner access code.
	pub access_code: String,
	/// Partner branch code.
	pub branch_code: String,
	/// Partner user identifier.
	#[serde(rename = "UserID")]
	pub user_id: String,
	/// Partner local identifier.
	#[serde(rename = "LocalID")]
	pub local_id: String,
}

/// Account looked up by an inquiry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InquiryAccountBeneficiary {
	/// `BIC` or another bank code scheme.
	pub bank_code_type: String,
	/// Bank code in that scheme.
	pub bank_code_value: String,
	/// Account number.
	pub account_number: String,
}

/// Beneficiary account inquiry response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct InquiryAccountResponse {
	/// Resolved beneficiary.
	pub beneficiary_details: InquiryAccountResult,
	/// Transaction status.
	pub status_transaction: String,
	/// Status message.
	pub status_message: String,
	/// Embedded provider error.
	#[serde(flatten)]
	pub error: ProviderError,
}

/// Beneficiary resolved by an inquiry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct InquiryAccountResult {
	/// Account holder name as known by the beneficiary bank.
	pub server_bene_account_name: String,
	/// Bank code scheme.
	pub bank_code_type: String,
	/// Bank code in that scheme.
	pub bank_code_value: String,
	/// Account number.
	pub account_number: String,
}
