//! Application value encoder.

use byteorder::{BigEndian, ByteOrder};

use crate::error::{CodecError, CodecResult};
use crate::tag::{encode_tag, ApplicationTag};
use crate::value::ApplicationValue;
use crate::CHARACTER_UTF8;

/// Encodes one application-tagged value into `buf`.
///
/// Returns the number of octets written. If the encoding does not fit,
/// nothing is written and [`CodecError::BufferTooSmall`] is returned.
pub fn encode_application_value(buf: &mut [u8], value: &ApplicationValue) -> CodecResult<usize> {
    let encoded = encode_to_vec(value);
    if encoded.len() > buf.len() {
        return Err(CodecError::BufferTooSmall {
            needed: encoded.len(),
            available: buf.len(),
        });
    }
    buf[..encoded.len()].copy_from_slice(&encoded);
    Ok(encoded.len())
}

/// Encodes one application-tagged value into a new vector.
pub fn encode_to_vec(value: &ApplicationValue) -> Vec<u8> {
    let mut out = Vec::with_capacity(8);
    append_value(&mut out, value);
    out
}

fn append_value(out: &mut Vec<u8>, value: &ApplicationValue) {
    match value {
        ApplicationValue::Null => encode_tag(out, ApplicationTag::Null, 0),
        ApplicationValue::Boolean(v) => encode_tag(out, ApplicationTag::Boolean, u32::from(*v)),
        ApplicationValue::Unsigned(v) => {
            let len = unsigned_len(*v);
            let mut content = [0u8; 8];
            BigEndian::write_uint(&mut content, *v, len);
            append_content(out, ApplicationTag::UnsignedInt, &content[..len]);
        }
        ApplicationValue::Signed(v) => {
            let len = signed_len(*v);
            let mut content = [0u8; 8];
            BigEndian::write_int(&mut content, *v, len);
            append_content(out, ApplicationTag::SignedInt, &content[..len]);
        }
        ApplicationValue::Real(v) => {
            let mut content = [0u8; 4];
            BigEndian::write_f32(&mut content, *v);
            append_content(out, ApplicationTag::Real, &content);
        }
        ApplicationValue::Double(v) => {
            let mut content = [0u8; 8];
            BigEndian::write_f64(&mut content, *v);
            append_content(out, ApplicationTag::Double, &content);
        }
        ApplicationValue::OctetString(bytes) => {
            append_content(out, ApplicationTag::OctetString, bytes);
        }
        ApplicationValue::CharacterString(s) => {
            encode_tag(out, ApplicationTag::CharacterString, (s.len() + 1) as u32);
            out.push(CHARACTER_UTF8);
            out.extend_from_slice(s.as_bytes());
        }
        ApplicationValue::BitString(bits) => {
            encode_tag(
                out,
                ApplicationTag::BitString,
                (bits.as_bytes().len() + 1) as u32,
            );
            out.push(bits.unused_bits());
            out.extend_from_slice(bits.as_bytes());
        }
        ApplicationValue::Enumerated(v) => {
            let len = unsigned_len(u64::from(*v));
            let mut content = [0u8; 8];
            BigEndian::write_uint(&mut content, u64::from(*v), len);
            append_content(out, ApplicationTag::Enumerated, &content[..len]);
        }
        ApplicationValue::ObjectIdentifier(oid) => {
            let mut content = [0u8; 4];
            BigEndian::write_u32(&mut content, oid.to_packed());
            append_content(out, ApplicationTag::ObjectIdentifier, &content);
        }
    }
}

fn append_content(out: &mut Vec<u8>, tag: ApplicationTag, content: &[u8]) {
    encode_tag(out, tag, content.len() as u32);
    out.extend_from_slice(content);
}

/// Minimal number of octets for an unsigned value (at least one).
fn unsigned_len(value: u64) -> usize {
    let significant_bits = 64 - value.leading_zeros() as usize;
    significant_bits.div_ceil(8).max(1)
}

/// Minimal number of octets for a two's-complement value (at least one).
fn signed_len(value: i64) -> usize {
    (1..8)
        .find(|&len| {
            let bits = len * 8 - 1;
            let min = -(1i64 << bits);
            let max = (1i64 << bits) - 1;
            value >= min && value <= max
        })
        .unwrap_or(8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bacnet_types::{ObjectIdentifier, ObjectType};
    use pretty_assertions::assert_eq;

    use crate::value::BitString;

    #[test]
    fn test_encode_null_and_boolean() {
        assert_eq!(encode_to_vec(&ApplicationValue::Null), vec![0x00]);
        assert_eq!(encode_to_vec(&ApplicationValue::Boolean(false)), vec![0x10]);
        assert_eq!(encode_to_vec(&ApplicationValue::Boolean(true)), vec![0x11]);
    }

    #[test]
    fn test_encode_unsigned_minimal() {
        assert_eq!(encode_to_vec(&ApplicationValue::Unsigned(0)), vec![0x21, 0x00]);
        assert_eq!(encode_to_vec(&ApplicationValue::Unsigned(255)), vec![0x21, 0xFF]);
        assert_eq!(
            encode_to_vec(&ApplicationValue::Unsigned(1476)),
            vec![0x22, 0x05, 0xC4]
        );
        assert_eq!(
            encode_to_vec(&ApplicationValue::Unsigned(0x0001_0000)),
            vec![0x23, 0x01, 0x00, 0x00]
        );
    }

    #[test]
    fn test_encode_signed_minimal() {
        assert_eq!(encode_to_vec(&ApplicationValue::Signed(-1)), vec![0x31, 0xFF]);
        assert_eq!(encode_to_vec(&ApplicationValue::Signed(127)), vec![0x31, 0x7F]);
        assert_eq!(
            encode_to_vec(&ApplicationValue::Signed(128)),
            vec![0x32, 0x00, 0x80]
        );
        assert_eq!(
            encode_to_vec(&ApplicationValue::Signed(-129)),
            vec![0x32, 0xFF, 0x7F]
        );
    }

    #[test]
    fn test_encode_character_string() {
        assert_eq!(
            encode_to_vec(&ApplicationValue::CharacterString(String::new())),
            vec![0x71, 0x00]
        );
        assert_eq!(
            encode_to_vec(&ApplicationValue::CharacterString("NP-1".into())),
            vec![0x75, 0x05, 0x00, b'N', b'P', b'-', b'1']
        );
    }

    #[test]
    fn test_encode_bit_string() {
        let flags = BitString::from_bits(&[false, true, false, false]);
        assert_eq!(
            encode_to_vec(&ApplicationValue::BitString(flags)),
            vec![0x82, 0x04, 0x40]
        );
    }

    #[test]
    fn test_encode_object_identifier() {
        let oid = ObjectIdentifier::new(ObjectType::NETWORK_PORT, 1).unwrap();
        assert_eq!(
            encode_to_vec(&ApplicationValue::ObjectIdentifier(oid)),
            vec![0xC4, 0x0E, 0x00, 0x00, 0x01]
        );
    }

    #[test]
    fn test_encode_into_small_buffer_is_rejected() {
        let mut buf = [0xAAu8; 3];
        let err = encode_application_value(
            &mut buf,
            &ApplicationValue::CharacterString("long".into()),
        )
        .unwrap_err();
        assert_eq!(
            err,
            CodecError::BufferTooSmall {
                needed: 7,
                available: 3
            }
        );
        assert_eq!(buf, [0xAA; 3]);
    }

    #[test]
    fn test_encode_into_exact_buffer() {
        let mut buf = [0u8; 2];
        let len = encode_application_value(&mut buf, &ApplicationValue::Enumerated(5)).unwrap();
        assert_eq!(len, 2);
        assert_eq!(buf, [0x91, 0x05]);
    }
}
