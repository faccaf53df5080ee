//! Static admin secret verification
//!
//! Compares a candidate against the configured secret in constant time.
//! The comparison always runs over two equal-length buffers: when the
//! candidate length differs from the secret, the candidate is compared
//! against a zero buffer of its own length and the result is discarded.

use std::{borrow::Cow, hint::black_box};

use secrecy::{ExposeSecret, SecretString};
use subtle::{Choice, ConstantTimeEq};

/// Verifier for the `x-admin-key` secret
///
/// `Debug` output never contains the secret.
#[derive(Debug, Clone)]
pub struct SecretVerifier {
    secret: SecretString,
}

impl SecretVerifier {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Whether a usable (non-empty) secret is configured
    pub fn is_configured(&self) -> bool {
        !self.secret.expose_secret().is_empty()
    }

    /// `true` only for a byte-exact match of the configured secret.
    ///
    /// An absent candidate returns `false` without comparing. An empty
    /// configured secret never matches.
    pub fn verify(&self, candidate: Option<&str>) -> bool {
        let Some(candidate) = candidate else {
            return false;
        };
        self.is_configured()
            && constant_time_matches(self.secret.expose_secret().as_bytes(), candidate.as_bytes())
    }
}

/// Constant-time equality that does not short-circuit on length.
pub(crate) fn constant_time_matches(expected: &[u8], candidate: &[u8]) -> bool {
    let same_length = Choice::from(u8::from(expected.len() == candidate.len()));
    let operand = comparison_operand(expected, candidate.len());
    let bytes_equal = black_box(operand.as_ref().ct_eq(candidate));
    (same_length & bytes_equal).into()
}

/// Buffer the candidate is compared against: the secret itself when the
/// lengths agree, otherwise zeros of the candidate's length.
fn comparison_operand(expected: &[u8], candidate_len: usize) -> Cow<'_, [u8]> {
    if expected.len() == candidate_len {
        Cow::Borrowed(expected)
    } else {
        Cow::Owned(vec![0; candidate_len])
    }
}
