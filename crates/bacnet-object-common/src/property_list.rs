//! Required/optional/proprietary property classification.

use bacnet_types::PropertyIdentifier;
use std::fmt;

/// The tier a property belongs to for one object type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyClass {
    Required,
    Optional,
    Proprietary,
}

impl fmt::Display for PropertyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PropertyClass::Required => "required",
            PropertyClass::Optional => "optional",
            PropertyClass::Proprietary => "proprietary",
        };
        write!(f, "{}", s)
    }
}

/// The three property lists of an object type.
///
/// Each list is a finite ordered slice. Order only matters for
/// deterministic iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyLists {
    required: &'static [PropertyIdentifier],
    optional: &'static [PropertyIdentifier],
    proprietary: &'static [PropertyIdentifier],
}

impl PropertyLists {
    pub const fn new(
        required: &'static [PropertyIdentifier],
        optional: &'static [PropertyIdentifier],
        proprietary: &'static [PropertyIdentifier],
    ) -> Self {
        Self {
            required,
            optional,
            proprietary,
        }
    }

    pub fn required(&self) -> &'static [PropertyIdentifier] {
        self.required
    }

    pub fn optional(&self) -> &'static [PropertyIdentifier] {
        self.optional
    }

    pub fn proprietary(&self) -> &'static [PropertyIdentifier] {
        self.proprietary
    }

    /// Returns the tier `property` is listed in, if any.
    pub fn classify(&self, property: PropertyIdentifier) -> Option<PropertyClass> {
        if self.required.contains(&property) {
            Some(PropertyClass::Required)
        } else if self.optional.contains(&property) {
            Some(PropertyClass::Optional)
        } else if self.proprietary.contains(&property) {
            Some(PropertyClass::Proprietary)
        } else {
            None
        }
    }

    pub fn contains(&self, property: PropertyIdentifier) -> bool {
        self.classify(property).is_some()
    }

    /// Iterates every listed property with its tier: required first, then
    /// optional, then proprietary.
    pub fn iter(&self) -> impl Iterator<Item = (PropertyClass, PropertyIdentifier)> + '_ {
        let required = self.required.iter().map(|p| (PropertyClass::Required, *p));
        let optional = self.optional.iter().map(|p| (PropertyClass::Optional, *p));
        let proprietary = self
            .proprietary
            .iter()
            .map(|p| (PropertyClass::Proprietary, *p));
        required.chain(optional).chain(proprietary)
    }

    /// Total number of listed properties.
    pub fn len(&self) -> usize {
        self.required.len() + self.optional.len() + self.proprietary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if no property appears twice, within or across lists.
    pub fn is_disjoint(&self) -> bool {
        let all: Vec<PropertyIdentifier> = self.iter().map(|(_, p)| p).collect();
        all.iter()
            .enumerate()
            .all(|(i, p)| !all[i + 1..].contains(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const REQUIRED: &[PropertyIdentifier] = &[
        PropertyIdentifier::OBJECT_IDENTIFIER,
        PropertyIdentifier::OBJECT_NAME,
    ];
    const OPTIONAL: &[PropertyIdentifier] = &[PropertyIdentifier::DESCRIPTION];

    #[test]
    fn test_classify() {
        let lists = PropertyLists::new(REQUIRED, OPTIONAL, &[]);
        assert_eq!(
            lists.classify(PropertyIdentifier::OBJECT_NAME),
            Some(PropertyClass::Required)
        );
        assert_eq!(
            lists.classify(PropertyIdentifier::DESCRIPTION),
            Some(PropertyClass::Optional)
        );
        assert_eq!(lists.classify(PropertyIdentifier::PRESENT_VALUE), None);
        assert_eq!(lists.len(), 3);
    }

    #[test]
    fn test_iter_order() {
        let lists = PropertyLists::new(REQUIRED, OPTIONAL, &[]);
        let order: Vec<_> = lists.iter().collect();
        assert_eq!(
            order,
            vec![
                (PropertyClass::Required, PropertyIdentifier::OBJECT_IDENTIFIER),
                (PropertyClass::Required, PropertyIdentifier::OBJECT_NAME),
                (PropertyClass::Optional, PropertyIdentifier::DESCRIPTION),
            ]
        );
    }

    #[test]
    fn test_is_disjoint() {
        assert!(PropertyLists::new(REQUIRED, OPTIONAL, &[]).is_disjoint());
        assert!(!PropertyLists::new(REQUIRED, REQUIRED, &[]).is_disjoint());
    }
}
