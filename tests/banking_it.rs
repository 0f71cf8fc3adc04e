mod common;

// std
use std::str::FromStr;
// crates.io
use httpmock::prelude::*;
// self
use bca_api::{
	Decimal,
	auth::{Secret, SessionId},
	context::CallContext,
	dto::{
		AccountStatementRequest, BalanceInformationRequest, DomesticFundTransferRequest,
		FireAuthentication, FundTransferRequest, HasProviderError, InquiryAccountBeneficiary,
		InquiryAccountRequest,
	},
};
use common::*;

fn amount(raw: &str) -> Decimal {
	Decimal::from_str(raw).expect("Amount should parse.")
}

fn authenticated(server: &MockServer) -> bca_api::client::ReqwestBcaClient {
	let client = reqwest_client(server);

	client.store().set(Secret::new("live-token"), SessionId::new("session-1"));

	client
}

#[tokio::test]
async fn balance_information_sends_signed_headers() {
	let server = MockServer::start_async().await;
	let client = authenticated(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/banking/v3/corporates/BCAAPI2016/accounts/0201245680,0063001004")
				.header("authorization", "Bearer live-token")
				.header("origin", ORIGIN_HOST)
				.header("x-bca-key", API_KEY)
				.header_exists("x-bca-timestamp")
				.header_exists("x-bca-signature");
			then.status(200).header("content-type", "application/json").body(
				r#"{
					"AccountDetailDataSuccess": [{
						"AccountNumber": "0201245680",
						"Currency": "IDR",
						"Balance": "90000.00",
						"AvailableBalance": "90000.00",
						"FloatAmount": "10000.00",
						"HoldAmount": "0.00",
						"Plafon": "0.00"
					}],
					"AccountDetailDataFailed": [{
						"English": "Invalid Account Number",
						"Indonesian": "Nomor Rekening Tidak Valid",
						"AccountNumber": "0063001004"
					}]
				}"#,
			);
		})
		.await;
	let response = client
		.balance_information(
			&CallContext::new(),
			&BalanceInformationRequest::new(["0201245680", "0063001004"]),
		)
		.await
		.expect("Balance inquiry should succeed.");

	assert_eq!(response.account_detail_data_success[0].available_balance, Some(amount("90000.00")));
	assert_eq!(response.account_detail_data_failed[0].account_number, "0063001004");

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn account_statement_sends_date_range_query() {
	let server = MockServer::start_async().await;
	let client = authenticated(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/banking/v3/corporates/BCAAPI2016/accounts/0201245680/statements")
				.query_param("StartDate", "2016-08-29")
				.query_param("EndDate", "2016-09-01");
			then.status(200).header("content-type", "application/json").body(
				r#"{
					"StartDate": "2016-08-29",
					"EndDate": "2016-09-01",
					"Currency": "IDR",
					"StartBalance": "100000.00",
					"Data": [{
						"TransactionDate": "29/08",
						"BranchCode": "0000",
						"TransactionType": "D",
						"TransactionAmount": "15000000.00",
						"TransactionName": "TARIKAN ATM 29/08",
						"Trailer": "20/08 ATM 1"
					}]
				}"#,
			);
		})
		.await;
	let response = client
		.account_statement(&CallContext::new(), &AccountStatementRequest {
			account_number: "0201245680".into(),
			start_date: "2016-08-29".into(),
			end_date: "2016-09-01".into(),
		})
		.await
		.expect("Statement inquiry should succeed.");

	assert_eq!(response.start_balance, Some(amount("100000.00")));
	assert_eq!(response.data.len(), 1);
	assert_eq!(response.data[0].transaction_amount, amount("15000000.00"));

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn fund_transfer_posts_json_with_configured_corporate() {
	let server = MockServer::start_async().await;
	let client = authenticated(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/banking/corporates/transfers")
				.header("content-type", "application/json")
				.json_body(serde_json::json!({
					"CorporateID": "BCAAPI2016",
					"SourceAccountNumber": "0201245680",
					"TransactionID": "00000001",
					"TransactionDate": "2016-01-30",
					"ReferenceID": "12345/PO/2016",
					"CurrencyCode": "IDR",
					"Amount": "100000.00",
					"BeneficiaryAccountNumber": "0201245681",
					"Remark1": "Transfer Test",
					"Remark2": "Online Transfer"
				}));
			then.status(200).header("content-type", "application/json").body(
				r#"{"TransactionID":"00000001","TransactionDate":"2016-01-30","ReferenceID":"12345/PO/2016","Status":"Success"}"#,
			);
		})
		.await;
	let response = client
		.fund_transfer(&CallContext::new(), FundTransferRequest {
			corporate_id: "IGNORED".into(),
			source_account_number: "0201245680".into(),
			transaction_id: "00000001".into(),
			transaction_date: "2016-01-30".into(),
			reference_id: "12345/PO/2016".into(),
			currency_code: "IDR".into(),
			amount: amount("100000.00"),
			beneficiary_account_number: "0201245681".into(),
			remark1: "Transfer Test".into(),
			remark2: "Online Transfer".into(),
		})
		.await
		.expect("Transfer should succeed.");

	assert_eq!(response.status, "Success");
	assert!(!response.has_provider_error());

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn domestic_transfer_sends_channel_headers() {
	let server = MockServer::start_async().await;
	let client = authenticated(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/banking/corporates/transfers/domestic")
				.header("channelid", CHANNEL_ID)
				.header("credentialid", CREDENTIAL_ID);
			then.status(200).header("content-type", "application/json").body(
				r#"{"TransactionID":"00000001","TransactionDate":"2018-05-17","ReferenceID":"12345/PO/2017","PPUNumber":"2002","Status":"Success"}"#,
			);
		})
		.await;
	let response = client
		.domestic_fund_transfer(&CallContext::new(), &DomesticFundTransferRequest {
			transaction_id: "00000001".into(),
			transaction_date: "2018-05-17".into(),
			reference_id: "12345/PO/2017".into(),
			source_account_number: "0201245680".into(),
			beneficiary_account_number: "0201245501".into(),
			beneficiary_bank_code: "BRONINJA".into(),
			beneficiary_name: "Tester".into(),
			amount: amount("100000.00"),
			transfer_type: "LLG".into(),
			beneficiary_cust_type: "1".into(),
			beneficiary_cust_residence: "1".into(),
			currency_code: "IDR".into(),
			remark1: "Transfer Test".into(),
			remark2: "Online Transfer".into(),
		})
		.await
		.expect("Domestic transfer should succeed.");

	assert_eq!(response.ppu_number, "2002");

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn inquiry_account_returns_beneficiary_name() {
	let server = MockServer::start_async().await;
	let client = authenticated(&server);
	let mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/fire/accounts").json_body(serde_json::json!({
				"Authentication": {
					"CorporateID": "DUMMYI",
					"AccessCode": "Kw5oTuF12dseSH44Y8ww",
					"BranchCode": "BCA001",
					"UserID": "BCAUSERID",
					"LocalID": "40115"
				},
				"BeneficiaryDetails": {
					"BankCodeType": "BIC",
					"BankCodeValue": "CENAIDJAXXX",
					"AccountNumber": "0106666011"
				}
			}));
			then.status(200).header("content-type", "application/json").body(
				r#"{"BeneficiaryDetails":{"ServerBeneAccountName":"STEVEN","BankCodeType":"BIC","BankCodeValue":"CENAIDJAXXX","AccountNumber":"0106666011"},"StatusTransaction":"0000","StatusMessage":"Success"}"#,
			);
		})
		.await;
	let response = client
		.inquiry_account(&CallContext::new(), &InquiryAccountRequest {
			authentication: FireAuthentication {
				corporate_id: "DUMMYI".into(),
				access_code: "Kw5oTuF12dseSH44Y8ww".into(),
				branch_code: "BCA001".into(),
				user_id: "BCAUSERID".into(),
				local_id: "40115".into(),
			},
			beneficiary_details: InquiryAccountBeneficiary {
				bank_code_type: "BIC".into(),
				bank_code_value: "CENAIDJAXXX".into(),
				account_number: "0106666011".into(),
			},
		})
		.await
		.expect("Inquiry should succeed.");

	assert_eq!(response.beneficiary_details.server_bene_account_name, "STEVEN");
	assert_eq!(response.status_message, "Success");

	mock.assert_calls_async(1).await;
}
