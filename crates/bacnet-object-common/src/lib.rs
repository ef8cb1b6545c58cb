//! Common BACnet object abstractions.
//!
//! This crate provides the pieces every object-type implementation shares:
//!
//! - [`ObjectHandler`]: Trait a device uses to route property services
//! - [`PropertyLists`]: Required/optional/proprietary classification
//! - [`ReadPropertyRequest`], [`WritePropertyRequest`]: Service request data
//! - [`SyncMap`]: Instance table that never auto-creates entries
//! - [`ObjectError`]: Error type with BACnet error class/code mapping
//!
//! # Example
//!
//! ```ignore
//! use bacnet_object_common::{ObjectHandler, ReadPropertyRequest};
//!
//! let request = ReadPropertyRequest::new(handler.object_type(), 1, property);
//! let mut apdu = [0u8; 1476];
//! match handler.read_property(&request, &mut apdu) {
//!     Ok(len) => send_ack(&apdu[..len]),
//!     Err(e) if e.is_abort() => send_abort(),
//!     Err(e) => send_error(e.error_class(), e.error_code()),
//! }
//! ```

mod error;
mod handler;
mod property_list;
mod request;
mod sync_map;

pub use error::{ErrorClass, ErrorCode, ObjectError, ObjectResult};
pub use handler::ObjectHandler;
pub use property_list::{PropertyClass, PropertyLists};
pub use request::{ArrayIndex, ReadPropertyRequest, WritePropertyRequest};
pub use sync_map::{SyncMap, SyncMapError};
