/*
[INPUT]:  PEM public key text, base64 signature header, raw webhook body
[OUTPUT]: Verification result (true/false) or InvalidKey errors
[POS]:    Webhook layer - inbound payload signature verification
[UPDATE]: When changing key formats or the signature algorithm
*/

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha2::{Digest, Sha256};

use super::events::IncomingEvent;
use crate::http::{FreshchatError, Result};

const BEGIN_MARKER: &str = "-----BEGIN ";
const END_MARKER: &str = "-----END ";
const MARKER_TAIL: &str = "-----";
const KEY_LABELS: [&str; 2] = ["RSA PUBLIC KEY", "PUBLIC KEY"];

/// Verifies webhook payloads signed with SHA256withRSA (PKCS#1 v1.5)
///
/// Only the key text is stored; the key is parsed again on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookVerifier {
    public_key: String,
}

impl WebhookVerifier {
    pub fn new(public_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
        }
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    /// Base64 payload of the stored key's PEM envelope
    pub fn parse_public_key(&self) -> Result<String> {
        parse_public_key(&self.public_key)
    }

    /// Decode the stored key into an RSA public key
    pub fn load_key(&self) -> Result<RsaPublicKey> {
        load_key(&self.public_key)
    }

    /// Check `signature` (base64) over `data`.
    ///
    /// A well formed signature that does not match yields `Ok(false)`; only a
    /// bad key or a signature that is not base64 is an error.
    pub fn verify(&self, signature: &str, data: &[u8]) -> Result<bool> {
        let key = self.load_key()?;
        let signature = BASE64.decode(signature.trim())?;
        let digest = Sha256::digest(data);

        let verified = key
            .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, &signature)
            .is_ok();
        if !verified {
            tracing::debug!(data_len = data.len(), "webhook signature rejected");
        }
        Ok(verified)
    }

    /// Verify `raw_body` and parse it into an event
    pub fn verify_event(&self, signature: &str, raw_body: &[u8]) -> Result<IncomingEvent> {
        if !self.verify(signature, raw_body)? {
            return Err(FreshchatError::SignatureMismatch);
        }
        IncomingEvent::from_slice(raw_body)
    }
}

/// Strip the PEM envelope (`PUBLIC KEY` or `RSA PUBLIC KEY`) and return the base64 body
pub fn parse_public_key(pem: &str) -> Result<String> {
    let text = pem.trim();

    let rest = text
        .strip_prefix(BEGIN_MARKER)
        .ok_or_else(|| invalid_key("missing BEGIN marker"))?;
    let rest = KEY_LABELS
        .iter()
        .find_map(|label| rest.strip_prefix(label)?.strip_prefix(MARKER_TAIL))
        .ok_or_else(|| invalid_key("unsupported BEGIN label"))?;

    let end = rest
        .rfind(END_MARKER)
        .ok_or_else(|| invalid_key("missing END marker"))?;
    let (payload, footer) = rest.split_at(end);

    let footer_label = footer
        .strip_prefix(END_MARKER)
        .and_then(|footer| footer.strip_suffix(MARKER_TAIL))
        .ok_or_else(|| invalid_key("malformed END marker"))?;
    if !KEY_LABELS.contains(&footer_label) {
        return Err(invalid_key("unsupported END label"));
    }

    if payload.contains(MARKER_TAIL) {
        return Err(invalid_key("unexpected marker inside key body"));
    }
    let payload: String = payload.split_whitespace().collect();
    if payload.is_empty() {
        return Err(invalid_key("empty key body"));
    }
    Ok(payload)
}

/// Parse the PEM text and decode either PKCS#1 or SubjectPublicKeyInfo DER
pub fn load_key(pem: &str) -> Result<RsaPublicKey> {
    let payload = parse_public_key(pem)?;
    let der = BASE64
        .decode(payload)
        .map_err(|e| invalid_key(format!("key body is not base64: {e}")))?;

    RsaPublicKey::from_pkcs1_der(&der)
        .or_else(|_| RsaPublicKey::from_public_key_der(&der))
        .map_err(|e| invalid_key(format!("key bytes are not an RSA public key: {e}")))
}

fn invalid_key(reason: impl Into<String>) -> FreshchatError {
    FreshchatError::InvalidKey(reason.into())
}
