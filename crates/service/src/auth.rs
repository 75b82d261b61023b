//! Owner-signature verification for mutating pipeline endpoints (§6
//! "Mutating endpoint auth"). The spec names the signed message format
//! but leaves the curve open; this crate resolves it to ECDSA
//! secp256k1 recoverable signatures verified against an EVM address,
//! the same scheme an onchain-facing caller would already be signing
//! with (see DESIGN.md for the Open Question record).

use forge_core::{Clock, ErrorCode, ForgeError};
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use sha3::{Digest, Keccak256};

/// §6: signatures more than 5 minutes away from "now" are rejected,
/// in either direction.
const TIMESTAMP_WINDOW_MS: i64 = 5 * 60 * 1000;
/// EIP-191 personal-sign prefix, applied before hashing, matching how
/// an EVM wallet actually produces the signature a caller would hold.
const PERSONAL_SIGN_PREFIX: &str = "\x19Ethereum Signed Message:\n";

#[derive(Debug, Clone)]
pub struct OwnerAuthHeaders<'a> {
    pub owner_address: &'a str,
    pub signature: &'a str,
    pub timestamp_ms: i64,
}

fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

fn personal_sign_hash(message: &str) -> [u8; 32] {
    let framed = format!("{PERSONAL_SIGN_PREFIX}{}{message}", message.len());
    keccak256(framed.as_bytes())
}

/// Derive the lowercase `0x`-prefixed EVM address a public key recovers
/// to: keccak256 of the 64-byte uncompressed point (X||Y, no `0x04`
/// prefix byte), last 20 bytes.
fn address_from_verifying_key(key: &VerifyingKey) -> String {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    crate::hex::encode(&hash[12..])
}

fn recover_address(message: &str, signature_hex: &str) -> Result<String, ForgeError> {
    let bytes = crate::hex::decode(signature_hex)
        .ok_or_else(|| ForgeError::new(ErrorCode::Unauthorized, "malformed signature encoding"))?;
    if bytes.len() != 65 {
        return Err(ForgeError::new(ErrorCode::Unauthorized, "signature must be 65 bytes (r||s||v)"));
    }
    let (rs, v) = bytes.split_at(64);
    let recovery_byte = match v[0] {
        0 | 1 => v[0],
        27 | 28 => v[0] - 27,
        other => {
            return Err(ForgeError::new(
                ErrorCode::Unauthorized,
                format!("unsupported recovery id: {other}"),
            ))
        }
    };
    let recovery_id = RecoveryId::from_byte(recovery_byte)
        .ok_or_else(|| ForgeError::new(ErrorCode::Unauthorized, "invalid recovery id"))?;
    let signature = Signature::from_slice(rs)
        .map_err(|e| ForgeError::new(ErrorCode::Unauthorized, format!("malformed signature: {e}")))?;

    let hash = personal_sign_hash(message);
    let key = VerifyingKey::recover_from_prehash(&hash, &signature, recovery_id)
        .map_err(|e| ForgeError::new(ErrorCode::Unauthorized, format!("signature does not recover: {e}")))?;
    Ok(address_from_verifying_key(&key))
}

/// Verify that `headers` authorizes a mutation against `resource_id`
/// (§6: message `"{resourceId}:{timestamp}"`). Returns `Unauthorized`
/// for a missing/malformed/stale signature, `PipelineDeactivated`
/// never applies here; a recovered address that doesn't match
/// `headers.owner_address` is `Unauthorized` too — distinguishing "not
/// this owner" (403) from a bad signature is the caller's job, done by
/// comparing the recovered address against the resource's actual
/// owner separately (see `forge-service::service`).
pub fn verify_owner_signature<C: Clock>(
    clock: &C,
    resource_id: &str,
    headers: &OwnerAuthHeaders<'_>,
) -> Result<(), ForgeError> {
    let now = clock.now_ms();
    if (now - headers.timestamp_ms).abs() > TIMESTAMP_WINDOW_MS {
        return Err(ForgeError::new(ErrorCode::Unauthorized, "signature timestamp outside the allowed window"));
    }

    let message = format!("{resource_id}:{}", headers.timestamp_ms);
    let recovered = recover_address(&message, headers.signature)?;
    if !recovered.eq_ignore_ascii_case(headers.owner_address) {
        return Err(ForgeError::new(ErrorCode::Unauthorized, "signature does not match the claimed owner address"));
    }
    Ok(())
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
