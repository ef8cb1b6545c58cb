//! BACnet application-tagged value codec.
//!
//! Object implementations hand [`ApplicationValue`]s to
//! [`encode_application_value`] to produce the property data of a
//! ReadProperty acknowledgement, and clients (or tests) run the bytes back
//! through [`decode_application_data`].
//!
//! # Wire format
//!
//! ```text
//!  7   6   5   4   3   2   1   0
//! +---+---+---+---+---+---+---+---+
//! |  tag number   | 0 |    LVT    |   LVT 0-4: content length
//! +---+---+---+---+---+---+---+---+   LVT 5:   extended length follows
//! [ extended length: 1, 1+2 or 1+4 octets ]
//! [ content octets ]
//! ```
//!
//! Booleans carry their value in the LVT field and have no content.

mod decode;
mod encode;
mod error;
mod tag;
mod value;

pub use decode::decode_application_data;
pub use encode::{encode_application_value, encode_to_vec};
pub use error::{CodecError, CodecResult};
pub use tag::ApplicationTag;
pub use value::{ApplicationValue, BitString};

/// Character-set octet for UTF-8 character strings.
pub const CHARACTER_UTF8: u8 = 0;
