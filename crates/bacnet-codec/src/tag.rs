//! Application tag numbers and tag header framing.

use byteorder::{BigEndian, ByteOrder};
use std::fmt;

use crate::error::{CodecError, CodecResult};

/// Application tag numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationTag {
    Null,
    Boolean,
    UnsignedInt,
    SignedInt,
    Real,
    Double,
    OctetString,
    CharacterString,
    BitString,
    Enumerated,
    Date,
    Time,
    ObjectIdentifier,
}

impl ApplicationTag {
    /// Returns the tag number.
    pub const fn number(&self) -> u8 {
        match self {
            ApplicationTag::Null => 0,
            ApplicationTag::Boolean => 1,
            ApplicationTag::UnsignedInt => 2,
            ApplicationTag::SignedInt => 3,
            ApplicationTag::Real => 4,
            ApplicationTag::Double => 5,
            ApplicationTag::OctetString => 6,
            ApplicationTag::CharacterString => 7,
            ApplicationTag::BitString => 8,
            ApplicationTag::Enumerated => 9,
            ApplicationTag::Date => 10,
            ApplicationTag::Time => 11,
            ApplicationTag::ObjectIdentifier => 12,
        }
    }

    /// Maps a tag number to a tag.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::ReservedTag`] for tag numbers 13-15.
    pub fn from_number(number: u8) -> CodecResult<Self> {
        let tag = match number {
            0 => ApplicationTag::Null,
            1 => ApplicationTag::Boolean,
            2 => ApplicationTag::UnsignedInt,
            3 => ApplicationTag::SignedInt,
            4 => ApplicationTag::Real,
            5 => ApplicationTag::Double,
            6 => ApplicationTag::OctetString,
            7 => ApplicationTag::CharacterString,
            8 => ApplicationTag::BitString,
            9 => ApplicationTag::Enumerated,
            10 => ApplicationTag::Date,
            11 => ApplicationTag::Time,
            12 => ApplicationTag::ObjectIdentifier,
            other => return Err(CodecError::ReservedTag(other)),
        };
        Ok(tag)
    }
}

impl fmt::Display for ApplicationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApplicationTag::Null => "Null",
            ApplicationTag::Boolean => "Boolean",
            ApplicationTag::UnsignedInt => "Unsigned",
            ApplicationTag::SignedInt => "Signed",
            ApplicationTag::Real => "Real",
            ApplicationTag::Double => "Double",
            ApplicationTag::OctetString => "OctetString",
            ApplicationTag::CharacterString => "CharacterString",
            ApplicationTag::BitString => "BitString",
            ApplicationTag::Enumerated => "Enumerated",
            ApplicationTag::Date => "Date",
            ApplicationTag::Time => "Time",
            ApplicationTag::ObjectIdentifier => "ObjectIdentifier",
        };
        write!(f, "{}", s)
    }
}

const CONTEXT_CLASS: u8 = 0x08;
const LVT_EXTENDED: u8 = 5;

/// Appends a tag header with the given length/value/type.
pub(crate) fn encode_tag(out: &mut Vec<u8>, tag: ApplicationTag, lvt: u32) {
    let number = tag.number() << 4;
    if lvt < u32::from(LVT_EXTENDED) {
        out.push(number | lvt as u8);
        return;
    }
    out.push(number | LVT_EXTENDED);
    if lvt <= 253 {
        out.push(lvt as u8);
    } else if lvt <= u32::from(u16::MAX) {
        let mut len = [0u8; 2];
        BigEndian::write_u16(&mut len, lvt as u16);
        out.push(254);
        out.extend_from_slice(&len);
    } else {
        let mut len = [0u8; 4];
        BigEndian::write_u32(&mut len, lvt);
        out.push(255);
        out.extend_from_slice(&len);
    }
}

/// A decoded tag header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TagHeader {
    pub tag: ApplicationTag,
    /// Content length, or the boolean value for Boolean tags.
    pub lvt: u32,
    /// Octets occupied by the header itself.
    pub header_len: usize,
}

pub(crate) fn decode_tag(buf: &[u8]) -> CodecResult<TagHeader> {
    let first = *buf.first().ok_or(CodecError::Truncated {
        needed: 1,
        available: 0,
    })?;
    let number = first >> 4;
    if first & CONTEXT_CLASS != 0 {
        return Err(CodecError::ContextTag(number));
    }
    let tag = ApplicationTag::from_number(number)?;
    let lvt = first & 0x07;

    if tag == ApplicationTag::Boolean || lvt < LVT_EXTENDED {
        return Ok(TagHeader {
            tag,
            lvt: u32::from(lvt),
            header_len: 1,
        });
    }
    if lvt > LVT_EXTENDED {
        // opening/closing tags only exist in the context class
        return Err(CodecError::InvalidLength {
            tag,
            length: usize::from(lvt),
        });
    }

    let ext = *buf.get(1).ok_or(CodecError::Truncated {
        needed: 2,
        available: buf.len(),
    })?;
    match ext {
        254 => {
            let bytes = buf.get(2..4).ok_or(CodecError::Truncated {
                needed: 4,
                available: buf.len(),
            })?;
            Ok(TagHeader {
                tag,
                lvt: u32::from(BigEndian::read_u16(bytes)),
                header_len: 4,
            })
        }
        255 => {
            let bytes = buf.get(2..6).ok_or(CodecError::Truncated {
                needed: 6,
                available: buf.len(),
            })?;
            Ok(TagHeader {
                tag,
                lvt: BigEndian::read_u32(bytes),
                header_len: 6,
            })
        }
        len => Ok(TagHeader {
            tag,
            lvt: u32::from(len),
            header_len: 2,
        }),
    }
}
