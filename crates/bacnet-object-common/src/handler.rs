//! Object handler trait.

use bacnet_types::{ObjectIdentifier, ObjectType, PropertyIdentifier};

use crate::error::ObjectResult;
use crate::property_list::PropertyLists;
use crate::request::{ReadPropertyRequest, WritePropertyRequest};

/// Services one object type on behalf of a device.
///
/// The device's object directory holds one handler per object type and
/// routes ReadProperty/WriteProperty requests to it by the request's
/// object type.
///
/// # Lifecycle
///
/// 1. Construction: the handler is built from configuration, populated
/// 2. Requests: `read_property()` and `write_property()` are called by the
///    request-processing loop, one at a time
/// 3. Reinitialization: `activate_changes()` commits pending edits
///
/// Handlers are not internally synchronized. Callers serialize access.
pub trait ObjectHandler {
    /// Returns the object type this handler serves.
    fn object_type(&self) -> ObjectType;

    /// Returns the property lists for objects served by this handler.
    fn property_lists(&self) -> PropertyLists;

    /// Returns the number of objects.
    fn count(&self) -> usize;

    /// Returns true if an object with this instance exists.
    fn valid_instance(&self, instance: u32) -> bool;

    /// Returns the instance at `index` in ascending instance order.
    fn index_to_instance(&self, index: usize) -> Option<u32>;

    /// Encodes the requested property into `buf`.
    ///
    /// Returns the number of octets written. Zero is a valid length (an
    /// empty array read as a whole).
    fn read_property(&self, request: &ReadPropertyRequest, buf: &mut [u8]) -> ObjectResult<usize>;

    /// Applies a property write.
    fn write_property(&mut self, request: &WritePropertyRequest) -> ObjectResult<()>;

    /// Returns the object name of `instance`, if it exists.
    fn object_name(&self, instance: u32) -> Option<String>;

    /// Commits every pending edit held by the handler.
    ///
    /// Called when the device is reinitialized with activate-changes.
    fn activate_changes(&mut self) -> ObjectResult<()> {
        Ok(())
    }

    /// Returns true if `property` is listed for this object type.
    fn has_property(&self, property: PropertyIdentifier) -> bool {
        self.property_lists().contains(property)
    }

    /// Returns the identifiers of every object, in ascending instance order.
    fn object_identifiers(&self) -> Vec<ObjectIdentifier> {
        (0..self.count())
            .filter_map(|index| self.index_to_instance(index))
            .filter_map(|instance| ObjectIdentifier::new(self.object_type(), instance).ok())
            .collect()
    }
}
