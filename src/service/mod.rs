//! Backend service facade.
//!
//! [`BackendService`] exposes one method per remote operation and
//! normalizes every outcome into an [`ApiResponse`] or a [`ServiceError`].
//! [`HttpBackend`] is the network implementation; tests supply their own.

mod error;
mod http;
mod operation;
mod types;

use std::future::Future;

pub use error::ServiceError;
pub use http::{HttpBackend, ENCODE_PATH, HELLO_PATH};
pub use operation::{EncodeBase64, GetHello, Operation, OperationId};
pub use types::{ApiResponse, EncodeRequest, EncodedText, ErrorBody, HelloMessage};

pub type ServiceResult<T> = Result<ApiResponse<T>, ServiceError>;

/// Typed wrapper over the backend transport.
pub trait BackendService: Send + Sync + 'static {
    /// `GET /api/hello`.
    fn get_hello(&self) -> impl Future<Output = ServiceResult<HelloMessage>> + Send;

    /// `POST /api/base64/encode`.
    fn encode_base64(
        &self,
        request: EncodeRequest,
    ) -> impl Future<Output = ServiceResult<EncodedText>> + Send;
}
