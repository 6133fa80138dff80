#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use crate::{Producer, ProducerExt};

/// Drives `producer` to exhaustion, adding every item to `dst`.
///
/// Works for any container that implements [`Extend`]: vectors, strings, sets, and maps (from a producer
/// of key-value pairs).
///
/// ```
/// use std::collections::HashMap;
/// use lazyseq::prelude::*;
/// use lazyseq::consumer::collect_into;
///
/// let mut ages = HashMap::new();
/// collect_into(from_iter([("ada", 36), ("alan", 41)]), &mut ages);
/// assert_eq!(ages["alan"], 41);
/// ```
pub fn collect_into<P, E>(producer: P, dst: &mut E)
where
    P: Producer,
    E: Extend<P::Item>,
{
    producer.for_each(|item| dst.extend(Some(item)));
}

/// Drives `producer` to exhaustion, collecting its items into a new vector.
#[cfg(feature = "alloc")]
pub fn collect_vec<P: Producer>(producer: P) -> Vec<P::Item> {
    let mut items = Vec::new();
    collect_into(producer, &mut items);
    items
}

/// Drives `producer` to exhaustion, adding every item to `dst` as the key of an entry with a clone of
/// `value`. With a map of unit values, this builds a set.
///
/// ```
/// use std::collections::BTreeMap;
/// use lazyseq::prelude::*;
/// use lazyseq::consumer::collect_keys;
///
/// let mut seen = BTreeMap::new();
/// collect_keys(from_iter("hello".chars()), &mut seen, true);
/// assert_eq!(seen.keys().collect::<String>(), "ehlo");
/// ```
pub fn collect_keys<P, V, E>(producer: P, dst: &mut E, value: V)
where
    P: Producer,
    V: Clone,
    E: Extend<(P::Item, V)>,
{
    producer.for_each(|key| dst.extend(Some((key, value.clone()))));
}

/// Drives `producer` to exhaustion, discarding its items. Useful for running a producer for its side
/// effects alone.
pub fn drain<P: Producer>(producer: P) {
    producer.for_each(|_| {});
}

/// Returns the greatest item of `producer`, or `None` if it is empty. Of several greatest items, the first
/// one is returned. Items that are incomparable to the current maximum (such as a NaN) are skipped.
pub fn max<P>(producer: P) -> Option<P::Item>
where
    P: Producer,
    P::Item: PartialOrd,
{
    let mut best: Option<P::Item> = None;
    producer.for_each(|item| {
        let replace = match &best {
            Some(current) => item > *current,
            None => true,
        };
        if replace {
            best = Some(item);
        }
    });
    best
}

/// Returns the least item of `producer`, or `None` if it is empty. Of several least items, the first one
/// is returned. Items that are incomparable to the current minimum (such as a NaN) are skipped.
pub fn min<P>(producer: P) -> Option<P::Item>
where
    P: Producer,
    P::Item: PartialOrd,
{
    let mut best: Option<P::Item> = None;
    producer.for_each(|item| {
        let replace = match &best {
            Some(current) => item < *current,
            None => true,
        };
        if replace {
            best = Some(item);
        }
    });
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::prelude::*;
    use crate::producer::TestProducer;

    #[test]
    fn extremes() {
        assert_eq!(max(from_iter([3, 9, 2, 9])), Some(9));
        assert_eq!(min(from_iter([3, 9, 2, 9])), Some(2));
        assert_eq!(max(once(4)), Some(4));
        assert_eq!(min(empty::<u8>()), None);
        assert_eq!(max(from_iter([1.0, f64::NAN, 3.0])), Some(3.0));
    }

    #[test]
    fn first_of_equal_extremes_wins() {
        let people = [("ann", 30), ("bob", 30), ("cid", 20)];
        let by_age = max(from_iter(people.map(|(name, age)| Aged(age, name))));
        assert_eq!(by_age.map(|aged| aged.1), Some("ann"));

        let people = [("ann", 30), ("bob", 20), ("cid", 20)];
        let youngest = min(from_iter(people.map(|(name, age)| Aged(age, name))));
        assert_eq!(youngest.map(|aged| aged.1), Some("bob"));
    }

    #[derive(Debug)]
    struct Aged(u32, &'static str);

    impl PartialEq for Aged {
        fn eq(&self, other: &Self) -> bool {
            self.0 == other.0
        }
    }

    impl PartialOrd for Aged {
        fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
            self.0.partial_cmp(&other.0)
        }
    }

    #[test]
    fn drain_runs_everything() {
        let producer = TestProducer::new(vec![1, 2, 3]);
        let tally = producer.tally();
        drain(producer);
        assert_eq!(tally.produced(), 3);
        assert_eq!(tally.releases(), 1);
    }

    #[test]
    fn collect_keys_builds_sets() {
        let mut set = std::collections::HashMap::new();
        collect_keys(from_iter([2, 1, 2]), &mut set, ());
        assert_eq!(set.len(), 2);
        assert!(set.contains_key(&1));
    }
}
