// self
use crate::{
	_prelude::*,
	client::{ApiRequest, BcaClient},
	context::CallContext,
	dto::{InquiryAccountRequest, InquiryAccountResponse},
	http::{BankHttpClient, TransportErrorMapper},
	obs::Operation,
};

impl<C, M> BcaClient<C, M>
where
	C: ?Sized + BankHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Looks up the holder name of a beneficiary account through the FIRE remittance service.
	pub async fn inquiry_account(
		&self,
		ctx: &CallContext,
		request: &InquiryAccountRequest,
	) -> Result<InquiryAccountResponse> {
		const OPERATION: Operation = Operation::InquiryAccount;

		let request = ApiRequest::post_json(OPERATION, ["fire", "accounts"], request)?;

		self.execute(ctx, OPERATION, request).await
	}
}
