//! Primitive application values.

use bacnet_types::ObjectIdentifier;
use std::fmt;

use crate::tag::ApplicationTag;

/// A fixed-length sequence of bits.
///
/// Bit 0 is the most significant bit of the first octet, matching the
/// order in which BACnet lists named bits (e.g. status flags).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct BitString {
    bytes: Vec<u8>,
    len: usize,
}

impl BitString {
    /// Creates a bit string of `len` cleared bits.
    pub fn new(len: usize) -> Self {
        Self {
            bytes: vec![0; len.div_ceil(8)],
            len,
        }
    }

    /// Creates a bit string from a slice of bits.
    pub fn from_bits(bits: &[bool]) -> Self {
        let mut bit_string = Self::new(bits.len());
        for (index, bit) in bits.iter().enumerate() {
            bit_string.set(index, *bit);
        }
        bit_string
    }

    pub(crate) fn from_raw(bytes: Vec<u8>, len: usize) -> Self {
        Self { bytes, len }
    }

    /// Returns the number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the bit string holds no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the bit at `index`, or `None` past the end.
    pub fn bit(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            return None;
        }
        Some(self.bytes[index / 8] & (0x80 >> (index % 8)) != 0)
    }

    /// Sets the bit at `index`. Indices past the end are ignored.
    pub fn set(&mut self, index: usize, value: bool) {
        if index >= self.len {
            return;
        }
        let mask = 0x80 >> (index % 8);
        if value {
            self.bytes[index / 8] |= mask;
        } else {
            self.bytes[index / 8] &= !mask;
        }
    }

    /// Returns the packed octets.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the number of unused bits in the final octet.
    pub fn unused_bits(&self) -> u8 {
        ((8 - self.len % 8) % 8) as u8
    }
}

impl fmt::Display for BitString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for index in 0..self.len {
            if index > 0 {
                write!(f, ",")?;
            }
            let set = self.bit(index).unwrap_or(false);
            write!(f, "{}", if set { "T" } else { "F" })?;
        }
        write!(f, "}}")
    }
}

/// A primitive application-tagged value.
#[derive(Debug, Clone, PartialEq)]
pub enum ApplicationValue {
    Null,
    Boolean(bool),
    Unsigned(u64),
    Signed(i64),
    Real(f32),
    Double(f64),
    OctetString(Vec<u8>),
    CharacterString(String),
    BitString(BitString),
    Enumerated(u32),
    ObjectIdentifier(ObjectIdentifier),
}

impl ApplicationValue {
    /// Returns the application tag this value is encoded with.
    pub fn tag(&self) -> ApplicationTag {
        match self {
            ApplicationValue::Null => ApplicationTag::Null,
            ApplicationValue::Boolean(_) => ApplicationTag::Boolean,
            ApplicationValue::Unsigned(_) => ApplicationTag::UnsignedInt,
            ApplicationValue::Signed(_) => ApplicationTag::SignedInt,
            ApplicationValue::Real(_) => ApplicationTag::Real,
            ApplicationValue::Double(_) => ApplicationTag::Double,
            ApplicationValue::OctetString(_) => ApplicationTag::OctetString,
            ApplicationValue::CharacterString(_) => ApplicationTag::CharacterString,
            ApplicationValue::BitString(_) => ApplicationTag::BitString,
            ApplicationValue::Enumerated(_) => ApplicationTag::Enumerated,
            ApplicationValue::ObjectIdentifier(_) => ApplicationTag::ObjectIdentifier,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ApplicationValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_unsigned(&self) -> Option<u64> {
        match self {
            ApplicationValue::Unsigned(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_enumerated(&self) -> Option<u32> {
        match self {
            ApplicationValue::Enumerated(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f32> {
        match self {
            ApplicationValue::Real(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ApplicationValue::CharacterString(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_octets(&self) -> Option<&[u8]> {
        match self {
            ApplicationValue::OctetString(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl fmt::Display for ApplicationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationValue::Null => write!(f, "Null"),
            ApplicationValue::Boolean(v) => write!(f, "{}", if *v { "TRUE" } else { "FALSE" }),
            ApplicationValue::Unsigned(v) => write!(f, "{}", v),
            ApplicationValue::Signed(v) => write!(f, "{}", v),
            ApplicationValue::Real(v) => write!(f, "{:.6}", v),
            ApplicationValue::Double(v) => write!(f, "{:.6}", v),
            ApplicationValue::OctetString(bytes) => {
                for byte in bytes {
                    write!(f, "{:02X}", byte)?;
                }
                Ok(())
            }
            ApplicationValue::CharacterString(s) => write!(f, "\"{}\"", s),
            ApplicationValue::BitString(bits) => write!(f, "{}", bits),
            ApplicationValue::Enumerated(v) => write!(f, "{}", v),
            ApplicationValue::ObjectIdentifier(oid) => write!(f, "({})", oid),
        }
    }
}
