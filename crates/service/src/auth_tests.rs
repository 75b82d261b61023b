use super::*;
use forge_core::FakeClock;
use k256::ecdsa::SigningKey;

const PRIVATE_KEY: [u8; 32] = [7u8; 32];

fn sign(resource_id: &str, timestamp_ms: i64) -> (String, String) {
    let signing_key = SigningKey::from_bytes((&PRIVATE_KEY).into()).unwrap();
    let message = format!("{resource_id}:{timestamp_ms}");
    let hash = personal_sign_hash(&message);
    let (signature, recovery_id): (Signature, RecoveryId) =
        signing_key.sign_prehash_recoverable(&hash).unwrap();
    let mut bytes = signature.to_bytes().to_vec();
    bytes.push(recovery_id.to_byte());
    let address = address_from_verifying_key(signing_key.verifying_key());
    (address, crate::hex::encode(&bytes))
}

#[test]
fn valid_signature_within_window_is_accepted() {
    let clock = FakeClock::new(10_000_000);
    let (address, signature) = sign("pipe-1", clock.now_ms());
    let headers = OwnerAuthHeaders {
        owner_address: &address,
        signature: &signature,
        timestamp_ms: clock.now_ms(),
    };
    assert!(verify_owner_signature(&clock, "pipe-1", &headers).is_ok());
}

#[test]
fn signature_for_a_different_resource_is_rejected() {
    let clock = FakeClock::new(10_000_000);
    let (address, signature) = sign("pipe-1", clock.now_ms());
    let headers = OwnerAuthHeaders {
        owner_address: &address,
        signature: &signature,
        timestamp_ms: clock.now_ms(),
    };
    let err = verify_owner_signature(&clock, "pipe-2", &headers).unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);
}

#[test]
fn claimed_owner_mismatch_is_rejected() {
    let clock = FakeClock::new(10_000_000);
    let (_address, signature) = sign("pipe-1", clock.now_ms());
    let headers = OwnerAuthHeaders {
        owner_address: "0x0000000000000000000000000000000000dead",
        signature: &signature,
        timestamp_ms: clock.now_ms(),
    };
    let err = verify_owner_signature(&clock, "pipe-1", &headers).unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);
}

#[test]
fn stale_timestamp_outside_window_is_rejected() {
    let clock = FakeClock::new(10_000_000);
    let (address, signature) = sign("pipe-1", clock.now_ms() - 10 * 60 * 1000);
    let headers = OwnerAuthHeaders {
        owner_address: &address,
        signature: &signature,
        timestamp_ms: clock.now_ms() - 10 * 60 * 1000,
    };
    let err = verify_owner_signature(&clock, "pipe-1", &headers).unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);
}

#[test]
fn malformed_signature_is_rejected_without_panicking() {
    let clock = FakeClock::new(10_000_000);
    let headers = OwnerAuthHeaders {
        owner_address: "0x0000000000000000000000000000000000dead",
        signature: "not-hex",
        timestamp_ms: clock.now_ms(),
    };
    let err = verify_owner_signature(&clock, "pipe-1", &headers).unwrap_err();
    assert_eq!(err.code, ErrorCode::Unauthorized);
}
