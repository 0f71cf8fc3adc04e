//! Balance, statement, and transfer shapes.

// crates.io
use rust_decimal::Decimal;
// self
use crate::{_prelude::*, dto::ProviderError};

/// Balance inquiry for up to twenty accounts, joined with `,` into the request path.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BalanceInformationRequest {
	/// Account numbers to query.
	pub account_numbers: Vec<String>,
}
impl BalanceInformationRequest {
	/// Creates a request for the given accounts.
	pub fn new<I, S>(account_numbers: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { account_numbers: account_numbers.into_iter().map(Into::into).collect() }
	}
}

/// Balance inquiry response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BalanceInformationResponse {
	/// Accounts whose balance was returned.
	pub account_detail_data_success: Vec<AccountBalance>,
	/// Accounts that could not be queried, with the reason.
	pub account_detail_data_failed: Vec<AccountBalance>,
	/// Embedded provider error.
	#[serde(flatten)]
	pub error: ProviderError,
}

/// One account entry of a balance inquiry.
///
/// Failed entries only carry the account number and the bilingual reason.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AccountBalance {
	/// Account number.
	pub account_number: String,
	/// ISO currency code.
	pub currency: Option<String>,
	/// Ledger balance.
	#[serde(with = "rust_decimal::serde::str_option")]
	pub balance: Option<Decimal>,
	/// Balance available for withdrawal.
	#[serde(with = "rust_decimal::serde::str_option")]
	pub available_balance: Option<Decimal>,
	/// Float amount.
	#[serde(with = "rust_decimal::serde::str_option")]
	pub float_amount: Option<Decimal>,
	/// Hold amount.
	#[serde(with = "rust_decimal::serde::str_option")]
	pub hold_amount: Option<Decimal>,
	/// Overdraft limit.
	#[serde(with = "rust_decimal::serde::str_option")]
	pub plafon: Option<Decimal>,
	/// Failure reason in Indonesian.
	pub indonesian: Option<String>,
	/// Failure reason in English.
	pub english: Option<String>,
}

/// Statement inquiry for one account over a date range (inclusive, `yyyy-MM-dd`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountStatementRequest {
	/// Account number.
	pub account_number: String,
	/// First day of the range.
	pub start_date: String,
	/// Last day of the range.
	pub end_date: String,
}

/// Statement inquiry response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AccountStatementResponse {
	/// First day of the range.
	pub start_date: String,
	/// Last day of the range.
	pub end_date: String,
	/// ISO currency code.
	pub currency: String,
	/// Balance at the start of the range.
	#[serde(with = "rust_decimal::serde::str_option")]
	pub start_balance: Option<Decimal>,
	/// Statement lines.
	pub data: Vec<AccountStatementEntry>,
	/// Embedded provider error.
	#[serde(flatten)]
	pub error: ProviderError,
}

/// One statement line.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct AccountStatementEntry {
	/// Posting date, or `PEND` for pending entries.
	pub transaction_date: String,
	/// Branch code.
	pub branch_code: String,
	/// `D` for debit, `C` for credit.
	pub transaction_type: String,
	/// Transaction amount.
	#[serde(with = "rust_decimal::serde::str")]
	pub transaction_amount: Decimal,
	/// Transaction description.
	pub transaction_name: String,
	/// Free-form trailer.
	pub trailer: String,
}

/// Transfer between two accounts of the same bank.
///
/// [`FundTransferRequest::corporate_id`] is overwritten with the configured corporate identifier.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct FundTransferRequest {
	/// Corporate identifier.
	#[serde(rename = "CorporateID")]
	pub corporate_id: String,
	/// Debited account.
	pub source_account_number: String,
	/// Caller-assigned transaction identifier.
	#[serde(rename = "TransactionID")]
	pub transaction_id: String,
	/// Transaction date, `yyyy-MM-dd`.
	pub transaction_date: String,
	/// Caller reference.
	#[serde(rename = "ReferenceID")]
	pub reference_id: String,
	/// ISO currency code.
	pub currency_code: String,
	/// Amount to transfer.
	#[serde(with = "rust_decimal::serde::str")]
	pub amount: Decimal,
	/// Credited account.
	pub beneficiary_account_number: String,
	/// First remark line.
	pub remark1: String,
	/// Second remark line.
	pub remark2: String,
}

/// Same-bank transfer response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FundTransferResponse {
	/// Echoed transaction identifier.
	#[serde(rename = "TransactionID")]
	pub transaction_id: String,
	/// Echoed transaction date.
	pub transaction_date: String,
	/// Echoed caller reference.
	#[serde(rename = "ReferenceID")]
	pub reference_id: String,
	/// Transfer status.
	pub status: String,
	/// Embedded provider error.
	#[serde(flatten)]
	pub error: ProviderError,
}

/// Transfer to an account held at another domestic bank.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DomesticFundTransferRequest {
	/// Caller-assigned transaction identifier.
	#[serde(rename = "TransactionID")]
	pub transaction_id: String,
	/// Transaction date, `yyyy-MM-dd`.
	pub transaction_date: String,
	/// Caller reference.
	#[serde(rename = "ReferenceID")]
	pub reference_id: String,
	/// Debited account.
	pub source_account_number: String,
	/// Credited account.
	pub beneficiary_account_number: String,
	/// Beneficiary bank code.
	pub beneficiary_bank_code: String,
	/// Beneficiary name.
	pub beneficiary_name: String,
	/// Amount to transfer.
	#[serde(with = "rust_decimal::serde::str")]
	pub amount: Decimal,
	/// `LLG`, `RTG`, or `BIF`.
	pub transfer_type: String,
	/// Beneficiary customer type.
	pub beneficiary_cust_type: String,
	/// Beneficiary residence.
	pub beneficiary_cust_residence: String,
	/// ISO currency code.
	pub currency_code: String,
	/// First remark line.
	pub remark1: String,
	/// Second remark line.
	pub remark2: String,
}

/// Domestic transfer response.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct DomesticFundTransferResponse {
	/// Echoed transaction identifier.
	#[serde(rename = "TransactionID")]
	pub transaction_id: String,
	/// Echoed transaction date.
	pub transaction_date: String,
	/// Echoed caller reference.
	#[serde(rename = "ReferenceID")]
	pub reference_id: String,
	/// Clearing reference assigned by the provider.
	#[serde(rename = "PPUNumber")]
	pub ppu_number: String,
	/// Transfer status.
	pub status: String,
	/// Embedded provider error.
	#[serde(flatten)]
	pub error: ProviderError,
}
