//! SigV4 signing of outbound object-storage requests.
//!
//! The body is never read here. It is declared `UNSIGNED-PAYLOAD` unless the
//! caller already supplied `x-amz-content-sha256`, in which case that hash is
//! signed as-is. Either way the stream is forwarded untouched.

use std::time::SystemTime;

use aws_credential_types::Credentials;
use aws_sigv4::http_request::{
    sign, PayloadChecksumKind, PercentEncodingMode, SignableBody, SignableRequest,
    SigningParams, SigningSettings, UriPathNormalizationMode,
};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use axum::http::header::HOST;
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method};
use tracing::debug;

use crate::config::UpstreamConfig;
use crate::routing::Target;

/// Header carrying the payload hash.
pub const CONTENT_SHA256: &str = "x-amz-content-sha256";

const PROVIDER_NAME: &str = "s3-signing-proxy";

/// Error type for signing.
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    #[error("missing signing credential `{0}`")]
    MissingCredential(&'static str),

    #[error("header `{0}` has a value that cannot be signed")]
    InvalidHeaderValue(String),

    #[error("invalid signing parameters: {0}")]
    Params(String),

    #[error("signing failed: {0}")]
    Sign(#[from] aws_sigv4::http_request::SigningError),

    #[error("signer produced an invalid header: {0}")]
    Output(String),
}

/// Signs requests with a fixed set of credentials and scope.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    identity: Identity,
    region: String,
    service: String,
}

impl RequestSigner {
    /// Build a signer, refusing blank credentials.
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        session_token: Option<String>,
        region: impl Into<String>,
        service: impl Into<String>,
    ) -> Result<Self, SigningError> {
        let access_key_id = access_key_id.into();
        let secret_access_key = secret_access_key.into();
        let region = region.into();
        let service = service.into();

        for (name, value) in [
            ("access_key_id", &access_key_id),
            ("secret_access_key", &secret_access_key),
            ("region", &region),
            ("service", &service),
        ] {
            if value.trim().is_empty() {
                return Err(SigningError::MissingCredential(name));
            }
        }

        let credentials = Credentials::new(
            access_key_id,
            secret_access_key,
            session_token,
            None,
            PROVIDER_NAME,
        );

        Ok(Self {
            identity: Identity::from(credentials),
            region,
            service,
        })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, SigningError> {
        Self::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            config.session_token.clone(),
            config.region.clone(),
            config.service.clone(),
        )
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// Sign `headers` for a request of `method` to `target` at `time`.
    ///
    /// Returns a fresh header set: the input headers, the signing headers,
    /// and `host` forced to the target host.
    pub fn sign(
        &self,
        method: &Method,
        target: &Target,
        headers: &HeaderMap,
        time: SystemTime,
    ) -> Result<HeaderMap, SigningError> {
        let url = target.to_string();

        let mut pairs = Vec::with_capacity(headers.len());
        for (name, value) in headers {
            let value = value
                .to_str()
                .map_err(|_| SigningError::InvalidHeaderValue(name.to_string()))?;
            pairs.push((name.as_str(), value));
        }

        let body = match headers.get(CONTENT_SHA256) {
            Some(hash) => SignableBody::Precomputed(
                hash.to_str()
                    .map_err(|_| SigningError::InvalidHeaderValue(CONTENT_SHA256.to_string()))?
                    .to_string(),
            ),
            None => SignableBody::UnsignedPayload,
        };

        let mut settings = SigningSettings::default();
        settings.percent_encoding_mode = PercentEncodingMode::Single;
        settings.payload_checksum_kind = PayloadChecksumKind::XAmzSha256;
        settings.uri_path_normalization_mode = UriPathNormalizationMode::Disabled;

        let params: SigningParams<'_> = v4::SigningParams::builder()
            .identity(&self.identity)
            .region(&self.region)
            .name(&self.service)
            .time(time)
            .settings(settings)
            .build()
            .map_err(|e| SigningError::Params(e.to_string()))?
            .into();

        let signable = SignableRequest::new(method.as_str(), url.as_str(), pairs.into_iter(), body)?;
        let (instructions, _signature) = sign(signable, &params)?.into_parts();
        let (signing_headers, _query) = instructions.into_parts();

        let mut signed = headers.clone();
        for header in signing_headers {
            let name = HeaderName::from_bytes(header.name().as_bytes())
                .map_err(|e| SigningError::Output(e.to_string()))?;
            let mut value = HeaderValue::from_str(header.value())
                .map_err(|e| SigningError::Output(e.to_string()))?;
            value.set_sensitive(header.sensitive());
            signed.insert(name, value);
        }

        let host = HeaderValue::from_str(target.host())
            .map_err(|e| SigningError::Output(e.to_string()))?;
        signed.insert(HOST, host);

        debug!(
            url = %url,
            headers = ?signed.keys().map(HeaderName::as_str).collect::<Vec<_>>(),
            "Signed outbound request"
        );

        Ok(signed)
    }
}
