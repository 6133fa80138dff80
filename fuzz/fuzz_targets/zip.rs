#![no_main]

use libfuzzer_sys::fuzz_target;
use lazyseq::prelude::*;
use lazyseq::producer::TestProducer;

fuzz_target!(|data: (TestProducer<u16>, TestProducer<u16>, bool)| {
    let (a, b, longest) = data;
    let (xs, ys) = (a.peek_items().to_vec(), b.peek_items().to_vec());
    let (pa, pb) = (a.tally(), b.tally());

    if longest {
        let expected: Vec<_> = (0..xs.len().max(ys.len()))
            .map(|i| (xs.get(i).copied().unwrap_or_default(), ys.get(i).copied().unwrap_or_default()))
            .collect();
        assert_eq!(a.zip_longest(b).collect_vec(), expected);
    } else {
        let expected: Vec<_> = xs.iter().copied().zip(ys.iter().copied()).collect();
        assert_eq!(a.zip(b).collect_vec(), expected);

        // Every step advances both sides, so the longer side hands out one extra item.
        let steps = (xs.len().min(ys.len()) + 1).min(xs.len().max(ys.len()));
        assert_eq!(pa.produced().max(pb.produced()), steps);
    }

    assert_eq!(pa.releases(), 1);
    assert_eq!(pb.releases(), 1);
});
