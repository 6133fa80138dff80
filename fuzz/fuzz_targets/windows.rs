#![no_main]

use libfuzzer_sys::fuzz_target;
use lazyseq::prelude::*;
use lazyseq::producer::TestProducer;

// Compares the linear combinators with their std counterparts.
fuzz_target!(|data: (TestProducer<u8>, u8, u8, Option<u8>)| {
    let (producer, skip, take, pad) = data;
    let (skip, take) = (usize::from(skip), usize::from(take));
    let items = producer.peek_items().to_vec();
    let tally = producer.tally();

    let mut window: Vec<u8> = items.iter().copied().skip(skip).take(take).collect();
    window.dedup();

    let mut expected: Vec<(u8, u8)> = window.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect();
    if let (Some(pad), [.., last]) = (pad, window.as_slice()) {
        if window.len() % 2 == 1 {
            expected.push((*last, pad));
        }
    }

    let adapted = producer.skip(skip).take(take).compact();
    let actual = match pad {
        Some(pad) => adapted.pairs_padded(pad).collect_vec(),
        None => adapted.pairs().collect_vec(),
    };

    assert_eq!(actual, expected);
    assert_eq!(tally.releases(), usize::from(tally.started()));
});
