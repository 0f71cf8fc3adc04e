// self
use crate::{
	_prelude::*,
	client::{ApiRequest, BcaClient, HEADER_CHANNEL_ID, HEADER_CREDENTIAL_ID},
	context::CallContext,
	dto::{
		AccountStatementRequest, AccountStatementResponse, BalanceInformationRequest,
		BalanceInformationResponse, DomesticFundTransferRequest, DomesticFundTransferResponse,
		FundTransferRequest, FundTransferResponse,
	},
	error::ConfigError,
	http::{BankHttpClient, TransportErrorMapper},
	obs::Operation,
};

impl<C, M> BcaClient<C, M>
where
	C: ?Sized + BankHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Fetches balances for the requested accounts of the configured corporate.
	pub async fn balance_information(
		&self,
		ctx: &CallContext,
		request: &BalanceInformationRequest,
	) -> Result<BalanceInformationResponse> {
		let accounts = request.account_numbers.join(",");
		let request = ApiRequest::get([
			"banking",
			"v3",
			"corporates",
			self.config.corporate_id.as_str(),
			"accounts",
			accounts.as_str(),
		]);

		self.execute(ctx, Operation::BalanceInformation, request).await
	}

	/// Fetches the statement of one account over a date range.
	pub async fn account_statement(
		&self,
		ctx: &CallContext,
		request: &AccountStatementRequest,
	) -> Result<AccountStatementResponse> {
		let request = ApiRequest::get([
			"banking",
			"v3",
			"corporates",
			self.config.corporate_id.as_str(),
			"accounts",
			request.account_number.as_str(),
			"statements",
		])
		.with_query("StartDate", request.start_date.as_str())
		.with_query("EndDate", request.end_date.as_str());

		self.execute(ctx, Operation::AccountStatement, request).await
	}

	/// Transfers funds between two accounts of the same bank.
	///
	/// The request's corporate identifier is replaced by the configured one.
	pub async fn fund_transfer(
		&self,
		ctx: &CallContext,
		mut request: FundTransferRequest,
	) -> Result<FundTransferResponse> {
		const OPERATION: Operation = Operation::FundTransfer;

		request.corporate_id.clone_from(&self.config.corporate_id);

		let request =
			ApiRequest::post_json(OPERATION, ["banking", "corporates", "transfers"], &request)?;

		self.execute(ctx, OPERATION, request).await
	}

	/// Transfers funds to an account at another domestic bank.
	///
	/// Requires both `channel_id` and `credential_id` in the configuration.
	pub async fn domestic_fund_transfer(
		&self,
		ctx: &CallContext,
		request: &DomesticFundTransferRequest,
	) -> Result<DomesticFundTransferResponse> {
		const OPERATION: Operation = Operation::DomesticFundTransfer;

		let channel_id = self
			.config
			.channel_id
			.as_deref()
			.ok_or(ConfigError::MissingEndpointField { operation: OPERATION, field: "channel_id" })?;
		let credential_id = self.config.credential_id.as_deref().ok_or(
			ConfigError::MissingEndpointField { operation: OPERATION, field: "credential_id" },
		)?;
		let request = ApiRequest::post_json(
			OPERATION,
			["banking", "corporates", "transfers", "domestic"],
			request,
		)?
		.with_header(HEADER_CHANNEL_ID, channel_id)
		.with_header(HEADER_CREDENTIAL_ID, credential_id);

		self.execute(ctx, OPERATION, request).await
	}
}
