//! Version filtering
//!
//! Picks at most one descriptor per name for the active compatibility tag.

use garnet_core::CompatTag;
use rustc_hash::FxHashMap;

use crate::descriptor::MethodDescriptor;
use crate::error::DescriptorError;

/// A name selected for binding, and the index of its descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<'d> {
    /// Name to install
    pub name: &'d str,
    /// Index into the descriptor slice
    pub index: usize,
}

/// Select one descriptor per name under `active`.
///
/// Names are returned in order of first declaration. A name with no
/// applicable descriptor is left out. Two descriptors for the same name and
/// the same tag (both untagged included) are an error whatever the active
/// tag; an untagged and an active-tagged descriptor for one name are
/// ambiguous.
pub fn select<'d>(
    descriptors: &'d [MethodDescriptor],
    active: &CompatTag,
) -> Result<Vec<Selection<'d>>, DescriptorError> {
    let mut order: Vec<&'d str> = Vec::new();
    let mut by_name: FxHashMap<&'d str, Vec<usize>> = FxHashMap::default();
    for (index, descriptor) in descriptors.iter().enumerate() {
        for name in descriptor.names() {
            let candidates = by_name.entry(name).or_insert_with(|| {
                order.push(name);
                Vec::new()
            });
            if candidates.iter().any(|&i| descriptors[i].compat() == descriptor.compat()) {
                return Err(DescriptorError::DuplicateName {
                    name: name.to_string(),
                    compat: descriptor.compat().cloned(),
                });
            }
            candidates.push(index);
        }
    }

    let mut selected = Vec::with_capacity(order.len());
    for name in order {
        let applicable: Vec<usize> = by_name[name]
            .iter()
            .copied()
            .filter(|&i| descriptors[i].compat().map_or(true, |tag| tag == active))
            .collect();
        match applicable.as_slice() {
            [] => tracing::trace!(name, compat = %active, "no descriptor for active compat"),
            [index] => selected.push(Selection { name, index: *index }),
            _ => {
                return Err(DescriptorError::AmbiguousName {
                    name: name.to_string(),
                    compat: active.clone(),
                })
            }
        }
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::HostFunction;
    use garnet_core::{HostResult, Value};

    fn recv_only(recv: &Value) -> HostResult {
        Ok(Some(recv.clone()))
    }

    fn desc(name: &str, compat: Option<&str>) -> MethodDescriptor {
        let builder = MethodDescriptor::builder(name).host(HostFunction::Receiver(recv_only));
        match compat {
            Some(tag) => builder.compat(tag).build().unwrap(),
            None => builder.build().unwrap(),
        }
    }

    #[test]
    fn test_untagged_selected() {
        let descriptors = vec![desc("a", None), desc("b", None)];
        let selected = select(&descriptors, &CompatTag::new("1.9")).unwrap();
        assert_eq!(
            selected,
            vec![Selection { name: "a", index: 0 }, Selection { name: "b", index: 1 }]
        );
    }

    #[test]
    fn test_tagged_selection() {
        let descriptors = vec![desc("method", Some("1.8")), desc("method", Some("1.9"))];

        let selected = select(&descriptors, &CompatTag::new("1.8")).unwrap();
        assert_eq!(selected, vec![Selection { name: "method", index: 0 }]);

        let selected = select(&descriptors, &CompatTag::new("1.9")).unwrap();
        assert_eq!(selected, vec![Selection { name: "method", index: 1 }]);

        let selected = select(&descriptors, &CompatTag::new("3.0")).unwrap();
        assert!(selected.is_empty());
    }

    #[test]
    fn test_duplicate_same_tag() {
        let descriptors = vec![desc("m", Some("1.9")), desc("m", Some("1.9"))];
        // Rejected even when the tag is not active
        let err = select(&descriptors, &CompatTag::new("1.8")).unwrap_err();
        assert_eq!(
            err,
            DescriptorError::DuplicateName { name: "m".to_string(), compat: Some(CompatTag::new("1.9")) }
        );

        let descriptors = vec![desc("m", None), desc("m", None)];
        let err = select(&descriptors, &CompatTag::new("1.8")).unwrap_err();
        assert_eq!(err, DescriptorError::DuplicateName { name: "m".to_string(), compat: None });
    }

    #[test]
    fn test_untagged_and_active_tag_are_ambiguous() {
        let descriptors = vec![desc("m", None), desc("m", Some("1.9"))];

        let err = select(&descriptors, &CompatTag::new("1.9")).unwrap_err();
        assert!(matches!(err, DescriptorError::AmbiguousName { .. }));

        // Under another tag only the untagged one applies
        let selected = select(&descriptors, &CompatTag::new("1.8")).unwrap();
        assert_eq!(selected, vec![Selection { name: "m", index: 0 }]);
    }

    #[test]
    fn test_alias_collides_with_name() {
        let aliased = MethodDescriptor::builder("size")
            .alias("length")
            .host(HostFunction::Receiver(recv_only))
            .build()
            .unwrap();
        let descriptors = vec![aliased, desc("length", None)];
        let err = select(&descriptors, &CompatTag::new("2.0")).unwrap_err();
        assert_eq!(err, DescriptorError::DuplicateName { name: "length".to_string(), compat: None });
    }
}
