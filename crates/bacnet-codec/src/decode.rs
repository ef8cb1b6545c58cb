//! Application value decoder.

use bacnet_types::ObjectIdentifier;
use byteorder::{BigEndian, ByteOrder};

use crate::error::{CodecError, CodecResult};
use crate::tag::{decode_tag, ApplicationTag};
use crate::value::{ApplicationValue, BitString};
use crate::CHARACTER_UTF8;

/// Decodes one application-tagged value from the front of `buf`.
///
/// Returns the value and the total number of octets consumed (header plus
/// content), so callers can walk a sequence of values such as an array read
/// with no index.
pub fn decode_application_data(buf: &[u8]) -> CodecResult<(ApplicationValue, usize)> {
    let header = decode_tag(buf)?;

    // booleans carry their value in the LVT field and have no content
    let len = match header.tag {
        ApplicationTag::Boolean => 0,
        _ => header.lvt as usize,
    };
    let end = header.header_len + len;
    let content = buf.get(header.header_len..end).ok_or(CodecError::Truncated {
        needed: end,
        available: buf.len(),
    })?;

    let value = match header.tag {
        ApplicationTag::Boolean => {
            expect_len(header.tag, header.lvt as usize, |l| l <= 1)?;
            ApplicationValue::Boolean(header.lvt == 1)
        }
        ApplicationTag::Null => {
            expect_len(header.tag, len, |l| l == 0)?;
            ApplicationValue::Null
        }
        ApplicationTag::UnsignedInt => {
            expect_len(header.tag, len, |l| (1..=8).contains(&l))?;
            ApplicationValue::Unsigned(BigEndian::read_uint(content, len))
        }
        ApplicationTag::SignedInt => {
            expect_len(header.tag, len, |l| (1..=8).contains(&l))?;
            ApplicationValue::Signed(BigEndian::read_int(content, len))
        }
        ApplicationTag::Real => {
            expect_len(header.tag, len, |l| l == 4)?;
            ApplicationValue::Real(BigEndian::read_f32(content))
        }
        ApplicationTag::Double => {
            expect_len(header.tag, len, |l| l == 8)?;
            ApplicationValue::Double(BigEndian::read_f64(content))
        }
        ApplicationTag::OctetString => ApplicationValue::OctetString(content.to_vec()),
        ApplicationTag::CharacterString => {
            expect_len(header.tag, len, |l| l >= 1)?;
            if content[0] != CHARACTER_UTF8 {
                return Err(CodecError::UnsupportedCharacterSet(content[0]));
            }
            let text = std::str::from_utf8(&content[1..]).map_err(|_| CodecError::InvalidUtf8)?;
            ApplicationValue::CharacterString(text.to_string())
        }
        ApplicationTag::BitString => {
            expect_len(header.tag, len, |l| l >= 1)?;
            let unused = content[0];
            let octets = &content[1..];
            if unused > 7 || (octets.is_empty() && unused != 0) {
                return Err(CodecError::InvalidBitString(unused));
            }
            let bit_len = octets.len() * 8 - usize::from(unused);
            ApplicationValue::BitString(BitString::from_raw(octets.to_vec(), bit_len))
        }
        ApplicationTag::Enumerated => {
            expect_len(header.tag, len, |l| (1..=4).contains(&l))?;
            ApplicationValue::Enumerated(BigEndian::read_uint(content, len) as u32)
        }
        ApplicationTag::ObjectIdentifier => {
            expect_len(header.tag, len, |l| l == 4)?;
            ApplicationValue::ObjectIdentifier(ObjectIdentifier::from_packed(
                BigEndian::read_u32(content),
            ))
        }
        ApplicationTag::Date | ApplicationTag::Time => {
            return Err(CodecError::UnsupportedTag(header.tag));
        }
    };

    Ok((value, end))
}

fn expect_len(tag: ApplicationTag, length: usize, valid: impl Fn(usize) -> bool) -> CodecResult<()> {
    if valid(length) {
        Ok(())
    } else {
        Err(CodecError::InvalidLength { tag, length })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_to_vec;
    use bacnet_types::ObjectType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_reports_consumed_length() {
        let mut buf = encode_to_vec(&ApplicationValue::Unsigned(1476));
        buf.extend(encode_to_vec(&ApplicationValue::Boolean(true)));

        let (first, used) = decode_application_data(&buf).unwrap();
        assert_eq!(first, ApplicationValue::Unsigned(1476));
        assert_eq!(used, 3);

        let (second, used) = decode_application_data(&buf[3..]).unwrap();
        assert_eq!(second, ApplicationValue::Boolean(true));
        assert_eq!(used, 1);
    }

    #[test]
    fn test_decode_signed_sign_extends() {
        let (value, _) = decode_application_data(&[0x32, 0xFF, 0x7F]).unwrap();
        assert_eq!(value, ApplicationValue::Signed(-129));
    }

    #[test]
    fn test_decode_long_character_string() {
        let text = "x".repeat(300);
        let buf = encode_to_vec(&ApplicationValue::CharacterString(text.clone()));
        assert_eq!(&buf[..2], &[0x75, 254]);
        let (value, used) = decode_application_data(&buf).unwrap();
        assert_eq!(value.as_str(), Some(text.as_str()));
        assert_eq!(used, buf.len());
    }

    #[test]
    fn test_decode_bit_string_length() {
        let (value, _) = decode_application_data(&[0x82, 0x04, 0x40]).unwrap();
        match value {
            ApplicationValue::BitString(bits) => {
                assert_eq!(bits.len(), 4);
                assert_eq!(bits.bit(1), Some(true));
            }
            other => panic!("unexpected value {:?}", other),
        }
    }

    #[test]
    fn test_decode_object_identifier() {
        let (value, _) = decode_application_data(&[0xC4, 0x0E, 0x00, 0x04, 0xD2]).unwrap();
        let expected = ObjectIdentifier::new(ObjectType::NETWORK_PORT, 1234).unwrap();
        assert_eq!(value, ApplicationValue::ObjectIdentifier(expected));
    }

    #[test]
    fn test_decode_truncated_content() {
        assert_eq!(
            decode_application_data(&[0x22, 0x05]),
            Err(CodecError::Truncated {
                needed: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_decode_rejects_bad_lengths() {
        assert!(matches!(
            decode_application_data(&[0x20]),
            Err(CodecError::InvalidLength { .. })
        ));
        assert!(matches!(
            decode_application_data(&[0x43, 0x00, 0x00, 0x00]),
            Err(CodecError::InvalidLength { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_foreign_charset() {
        assert_eq!(
            decode_application_data(&[0x72, 0x04, b'a']),
            Err(CodecError::UnsupportedCharacterSet(4))
        );
    }

    #[test]
    fn test_decode_date_unsupported() {
        assert_eq!(
            decode_application_data(&[0xA4, 0x7B, 0x01, 0x01, 0x01]),
            Err(CodecError::UnsupportedTag(ApplicationTag::Date))
        );
    }
}
