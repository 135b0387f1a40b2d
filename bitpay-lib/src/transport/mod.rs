//! Transport layer: request signing and HTTP execution.

mod http;
mod signer;
mod traits;

pub use http::{HttpTransport, PreparedRequest, API_VERSION, PLUGIN_INFO};
pub use signer::{RequestSigner, SigningHeaders, IDENTITY_HEADER, SIGNATURE_HEADER};
pub use traits::{ApiRequest, HttpMethod, RawResponse, ResourcePath, Transport, TransportError};
