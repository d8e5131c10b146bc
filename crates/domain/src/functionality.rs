//! Functionality aggregation — devices grouped by what they can do.
//!
//! A [`FunctionalityMap`] borrows the devices it lists, so it is a read-only
//! view that cannot outlive or race with mutation of the hierarchy it was
//! computed from. It is rebuilt from scratch on every call.

use crate::device::Device;
use crate::type_id::FunctionalityTag;

/// Devices grouped by functionality tag, tags in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct FunctionalityMap<'a> {
    buckets: Vec<(FunctionalityTag, Vec<&'a Device>)>,
}

/// Group `devices` by the distinct functionality tags of their components.
///
/// A device appears at most once per bucket; buckets list devices in the
/// order they were visited.
pub fn aggregate<'a, I>(devices: I) -> FunctionalityMap<'a>
where
    I: IntoIterator<Item = &'a Device>,
{
    let mut map = FunctionalityMap::default();
    for device in devices {
        for tag in device.functionalities() {
            map.bucket_mut(tag).push(device);
        }
    }
    map
}

impl<'a> FunctionalityMap<'a> {
    /// Append every bucket of `other` onto the matching bucket of `self`.
    ///
    /// Lists are concatenated, not deduplicated.
    pub fn merge(&mut self, other: FunctionalityMap<'a>) {
        for (tag, devices) in other.buckets {
            self.bucket_mut(&tag).extend(devices);
        }
    }

    /// Devices exposing `tag`, compared ignoring case.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&[&'a Device]> {
        self.buckets
            .iter()
            .find(|(existing, _)| existing.matches(tag))
            .map(|(_, devices)| devices.as_slice())
    }

    pub fn tags(&self) -> impl Iterator<Item = &FunctionalityTag> {
        self.buckets.iter().map(|(tag, _)| tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FunctionalityTag, &[&'a Device])> {
        self.buckets
            .iter()
            .map(|(tag, devices)| (tag, devices.as_slice()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn bucket_mut(&mut self, tag: &FunctionalityTag) -> &mut Vec<&'a Device> {
        let idx = match self.buckets.iter().position(|(existing, _)| existing == tag) {
            Some(idx) => idx,
            None => {
                self.buckets.push((tag.clone(), Vec::new()));
                self.buckets.len() - 1
            }
        };
        &mut self.buckets[idx].1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::ComponentSpec;
    use crate::testing;

    fn names(devices: &[&Device]) -> Vec<String> {
        devices.iter().map(|d| d.name().to_string()).collect()
    }

    fn device_with(name: &str, tags: &[&str]) -> Device {
        let factory = testing::tagged_factory(&["A", "B", "C"]);
        let mut device = Device::builder().name(name).build().unwrap();
        for (i, tag) in tags.iter().enumerate() {
            device
                .add_component(&factory, ComponentSpec::new(*tag, format!("{tag}-{i}")))
                .unwrap();
        }
        device
    }

    #[test]
    fn should_group_devices_by_tag() {
        let d1 = device_with("D1", &["A", "B"]);
        let d2 = device_with("D2", &["B", "C"]);

        let map = aggregate([&d1, &d2]);

        assert_eq!(names(map.get("A").unwrap()), ["D1"]);
        assert_eq!(names(map.get("B").unwrap()), ["D1", "D2"]);
        assert_eq!(names(map.get("C").unwrap()), ["D2"]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn should_list_device_once_per_bucket_with_repeated_tag() {
        let d1 = device_with("D1", &["A", "A", "A"]);
        let map = aggregate([&d1]);
        assert_eq!(map.get("a").unwrap().len(), 1);
    }

    #[test]
    fn should_skip_devices_without_components() {
        let empty = device_with("Empty", &[]);
        assert!(aggregate([&empty]).is_empty());
    }

    #[test]
    fn should_reference_the_same_device_from_every_bucket() {
        let d1 = device_with("D1", &["A", "B"]);
        let map = aggregate([&d1]);
        let from_a = map.get("A").unwrap()[0];
        let from_b = map.get("B").unwrap()[0];
        assert!(std::ptr::eq(from_a, from_b));
        assert!(std::ptr::eq(from_a, &d1));
    }

    #[test]
    fn should_concatenate_buckets_when_merging() {
        let d1 = device_with("D1", &["A"]);
        let d2 = device_with("D2", &["A", "C"]);

        let mut map = aggregate([&d1]);
        map.merge(aggregate([&d2]));
        map.merge(aggregate([&d1]));

        assert_eq!(names(map.get("A").unwrap()), ["D1", "D2", "D1"]);
        let tags: Vec<_> = map.tags().map(FunctionalityTag::as_str).collect();
        assert_eq!(tags, ["A", "C"]);
    }
}
