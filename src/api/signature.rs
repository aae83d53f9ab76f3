use base64::{Engine as _, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::error;

type HmacSha256 = Hmac<Sha256>;

/// Verifies the `X-Line-Signature` header: base64 of HMAC-SHA256 over the raw body,
/// keyed with the channel secret. The comparison is constant-time.
pub fn verify_line_signature(request_body: &str, signature: &str, channel_secret: &str) -> bool {
    let signature = signature.trim();
    if signature.is_empty() {
        error!("Empty X-Line-Signature header");
        return false;
    }

    let Ok(expected) = STANDARD.decode(signature) else {
        error!("X-Line-Signature is not valid base64");
        return false;
    };

    let mut mac = match HmacSha256::new_from_slice(channel_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return false;
        }
    };
    mac.update(request_body.as_bytes());

    if mac.verify_slice(&expected).is_ok() {
        true
    } else {
        error!("Signature verification failed for {} byte body", request_body.len());
        false
    }
}

pub fn compute_signature(request_body: &str, channel_secret: &str) -> String {
    let mut mac = match HmacSha256::new_from_slice(channel_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return String::new();
        }
    };
    mac.update(request_body.as_bytes());
    STANDARD.encode(mac.finalize().into_bytes())
}
