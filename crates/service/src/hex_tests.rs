use super::*;

#[test]
fn decode_rejects_odd_length() {
    assert_eq!(decode("0xabc"), None);
}

#[test]
fn decode_strips_0x_prefix() {
    assert_eq!(decode("0x00ff"), Some(vec![0x00, 0xff]));
    assert_eq!(decode("00ff"), Some(vec![0x00, 0xff]));
}

#[test]
fn decode_rejects_non_hex() {
    assert_eq!(decode("zz"), None);
}

#[test]
fn encode_round_trips_through_decode() {
    let bytes = vec![0xde, 0xad, 0xbe, 0xef];
    let encoded = encode(&bytes);
    assert_eq!(encoded, "0xdeadbeef");
    assert_eq!(decode(&encoded).unwrap(), bytes);
}
