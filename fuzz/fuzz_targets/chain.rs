#![no_main]

use libfuzzer_sys::fuzz_target;
use lazyseq::prelude::*;
use lazyseq::producer::TestProducer;

// Chains several producers, stopping after a fuzzer-chosen number of items.
fuzz_target!(|data: (Vec<TestProducer<u8>>, u8)| {
    let (producers, limit) = data;
    let limit = usize::from(limit);
    let tallies: Vec<_> = producers.iter().map(|p| p.tally()).collect();
    let all: Vec<u8> = producers.iter().flat_map(|p| p.peek_items().to_vec()).collect();

    let actual: Vec<u8> = chain(producers).take(limit).into_cursor().iter().collect();
    assert_eq!(actual, all.iter().copied().take(limit).collect::<Vec<_>>());

    for tally in tallies {
        // Untouched producers were never started, every started one was released exactly once.
        assert_eq!(tally.releases(), usize::from(tally.started()));
    }
});
