//! Typed operations over a [`BackendService`].
//!
//! Each remote call is a unit struct implementing [`Operation`], which fixes
//! its payload and output types at compile time. [`OperationId`] names them
//! for logging.

use std::fmt;
use std::future::Future;

use crate::service::types::{EncodeRequest, EncodedText, HelloMessage};
use crate::service::{BackendService, ServiceResult};

/// Identifier of a backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationId {
    GetHello,
    EncodeBase64,
}

impl OperationId {
    pub fn name(&self) -> &'static str {
        match self {
            OperationId::GetHello => "getHello",
            OperationId::EncodeBase64 => "encodeBase64",
        }
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A remote call that an executor can run against a service `S`.
pub trait Operation<S: BackendService>: Copy + Send + Sync + 'static {
    /// Request payload. `Default` stands in when an action supplies none.
    type Payload: Clone + Default + Send + Sync + 'static;
    /// Successful response data.
    type Output: Send + 'static;

    fn id(&self) -> OperationId;

    fn invoke(
        self,
        service: &S,
        payload: Self::Payload,
    ) -> impl Future<Output = ServiceResult<Self::Output>> + Send;
}

/// `getHello`: fetch the greeting.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetHello;

impl<S: BackendService> Operation<S> for GetHello {
    type Payload = ();
    type Output = HelloMessage;

    fn id(&self) -> OperationId {
        OperationId::GetHello
    }

    fn invoke(
        self,
        service: &S,
        _payload: (),
    ) -> impl Future<Output = ServiceResult<HelloMessage>> + Send {
        service.get_hello()
    }
}

/// `encodeBase64`: encode a text payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodeBase64;

impl<S: BackendService> Operation<S> for EncodeBase64 {
    type Payload = EncodeRequest;
    type Output = EncodedText;

    fn id(&self) -> OperationId {
        OperationId::EncodeBase64
    }

    fn invoke(
        self,
        service: &S,
        payload: EncodeRequest,
    ) -> impl Future<Output = ServiceResult<EncodedText>> + Send {
        service.encode_base64(payload)
    }
}
