#![no_main]

use libfuzzer_sys::fuzz_target;
use lazyseq::prelude::*;
use lazyseq::producer::TestProducer;

// Groups by `item / divisor`, reading only a fuzzer-chosen prefix of every group.
fuzz_target!(|data: (TestProducer<u8>, u8, Vec<u8>)| {
    let (producer, divisor, reads) = data;
    let divisor = divisor.max(1);
    let items = producer.peek_items().to_vec();
    let tally = producer.tally();

    let mut expected: Vec<(u8, Vec<u8>)> = Vec::new();
    for item in items.iter().copied() {
        match expected.last_mut() {
            Some((key, group)) if *key == item / divisor => group.push(item),
            _ => expected.push((item / divisor, vec![item])),
        }
    }
    for (i, (_, group)) in expected.iter_mut().enumerate() {
        let read = reads.get(i).copied().map_or(usize::MAX, usize::from);
        group.truncate(read);
    }

    let mut actual = Vec::new();
    let mut groups = producer.group_by(|item: &u8| *item / divisor);
    while let Some((key, group)) = groups.next_group() {
        let read = reads.get(actual.len()).copied().map_or(usize::MAX, usize::from);
        actual.push((key, group.take(read).collect_vec()));
    }

    assert_eq!(actual, expected);
    assert_eq!(tally.produced(), items.len());
    assert_eq!(tally.releases(), 1);
});
