//! Authentication service for HTTP Basic credentials.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Service checking Basic auth credentials against the configured pair.
///
/// Credentials are never compared directly. Both the configured and the
/// presented pair are MAC'd with HMAC-SHA256 under a key drawn at startup,
/// and the tags are compared in constant time.
pub struct AuthService {
    key: [u8; 32],
    expected_tag: Vec<u8>,
    span: tracing::Span,
}

impl AuthService {
    /// Creates a new authentication service.
    ///
    /// # Errors
    ///
    /// Returns an error if the system random number generator fails.
    pub fn new(user: &str, password: &str) -> anyhow::Result<Self> {
        let mut key = [0u8; 32];
        getrandom::fill(&mut key)
            .map_err(|e| anyhow::anyhow!("Failed to generate auth key: {e}"))?;

        let expected_tag = Self::mac(&key, user, password)
            .finalize()
            .into_bytes()
            .to_vec();

        Ok(Self {
            key,
            expected_tag,
            span: tracing::info_span!("auth_service"),
        })
    }

    fn mac(key: &[u8], user: &str, password: &str) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
        mac.update(user.as_bytes());
        mac.update(&[0]);
        mac.update(password.as_bytes());
        mac
    }

    /// Authenticates a user/password pair.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the credentials do not match.
    pub fn authenticate(&self, user: &str, password: Option<&str>) -> Result<(), AppError> {
        let _guard = self.span.enter();

        let presented = Self::mac(&self.key, user, password.unwrap_or_default());

        presented.verify_slice(&self.expected_tag).map_err(|_| {
            tracing::warn!(user, "rejected credentials");
            AppError::unauthorized("unauthorized")
        })
    }
}
