#![allow(dead_code)]

// crates.io
use httpmock::prelude::*;
// self
use bca_api::{
	client::ReqwestBcaClient,
	config::{Config, ConfigBuilder, DEFAULT_TOKEN_PATH},
	http::{ReqwestHttpClient, ReqwestTransportErrorMapper},
};

pub const CLIENT_ID: &str = "client-id";
pub const CLIENT_SECRET: &str = "client-secret";
pub const API_KEY: &str = "api-key";
pub const API_SECRET: &str = "22a2d25e-765d-41e1-8d29-da68dcb5698b";
pub const ORIGIN_HOST: &str = "yourdomain.com";
pub const CORPORATE_ID: &str = "BCAAPI2016";
pub const CHANNEL_ID: &str = "95051";
pub const CREDENTIAL_ID: &str = "BCAAPI2016";
pub const TOKEN_INVALID_BODY: &str = r#"{"ErrorCode":"ESB-14-009","ErrorMessage":{"Indonesian":"Token tidak valid","English":"Invalid token"}}"#;

/// `base64("client-id:client-secret")`.
pub const BASIC_CREDENTIALS: &str = "Basic Y2xpZW50LWlkOmNsaWVudC1zZWNyZXQ=";

pub fn config_builder(base_url: &str) -> ConfigBuilder {
	Config::builder()
		.client_id(CLIENT_ID)
		.client_secret(CLIENT_SECRET)
		.api_key(API_KEY)
		.api_secret(API_SECRET)
		.base_url(base_url)
		.origin_host(ORIGIN_HOST)
		.corporate_id(CORPORATE_ID)
		.channel_id(CHANNEL_ID)
		.credential_id(CREDENTIAL_ID)
}

pub fn config(base_url: &str) -> Config {
	config_builder(base_url).build().expect("Fixture configuration should build.")
}

pub fn reqwest_client(server: &MockServer) -> ReqwestBcaClient {
	ReqwestBcaClient::with_http_client(
		config(&server.base_url()),
		ReqwestHttpClient::new().expect("Reqwest transport should build."),
		ReqwestTransportErrorMapper,
	)
}

pub async fn mock_token<'a>(server: &'a MockServer, access_token: &str) -> httpmock::Mock<'a> {
	let body = format!(
		"{{\"access_token\":\"{access_token}\",\"token_type\":\"Bearer\",\"expires_in\":3600,\"scope\":\"resource.WRITE resource.READ\"}}"
	);

	server
		.mock_async(|when, then| {
			when.method(POST)
				.path(DEFAULT_TOKEN_PATH)
				.header("authorization", BASIC_CREDENTIALS)
				.body("grant_type=client_credentials");
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}
