//! Wire shapes for the provider's JSON contract.
//!
//! Field names follow the provider's PascalCase convention and monetary amounts travel as JSON
//! strings decoded into [`Decimal`](rust_decimal::Decimal). Every response shape embeds a
//! [`ProviderError`] at its top level and exposes it through [`HasProviderError`], which is all
//! the retry loop needs to inspect.

/// Token endpoint response.
pub mod auth;
pub mod banking;
/// Error block embedded in every response.
pub mod error;
pub mod fire;

pub use auth::*;
pub use banking::*;
pub use error::*;
pub use fire::*;

/// Response shapes that carry an embedded [`ProviderError`].
pub trait HasProviderError {
	/// Returns the embedded provider error; its code is empty on success.
	fn provider_error(&self) -> &ProviderError;

	/// Returns `true` when the provider reported any error code.
	fn has_provider_error(&self) -> bool {
		!self.provider_error().is_empty()
	}
}

macro_rules! impl_has_provider_error {
	($($ty:ty),+ $(,)?) => {
		$(
			impl HasProviderError for $ty {
				fn provider_error(&self) -> &ProviderError {
					&self.error
				}
			}
		)+
	};
}

impl_has_provider_error!(
	AuthToken,
	BalanceInformationResponse,
	AccountStatementResponse,
	FundTransferResponse,
	DomesticFundTransferResponse,
	InquiryAccountResponse,
);
impl HasProviderError for ProviderError {
	fn provider_error(&self) -> &ProviderError {
		self
	}
}
