//! Single-byte vs bulk transfer throughput

use bringup_ringbuf::RingBuffer;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

const RX_SIZE: usize = 256;
const BURST: usize = 64;

fn single_byte(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_byte");
    group.throughput(Throughput::Bytes(BURST as u64));

    group.bench_function("push_pop_burst", |b| {
        let mut ring: RingBuffer<RX_SIZE> = RingBuffer::new();
        b.iter(|| {
            for i in 0..BURST {
                ring.push(black_box(i as u8)).unwrap();
            }
            for _ in 0..BURST {
                black_box(ring.pop().unwrap());
            }
        });
    });

    group.finish();
}

fn bulk(c: &mut Criterion) {
    let mut group = c.benchmark_group("bulk");
    group.throughput(Throughput::Bytes(BURST as u64));

    group.bench_function("stream_push_pop_burst", |b| {
        let mut ring: RingBuffer<RX_SIZE> = RingBuffer::new();
        let data = [0x5Au8; BURST];
        let mut out = [0u8; BURST];
        b.iter(|| {
            ring.stream_push(black_box(&data)).unwrap();
            ring.stream_pop(&mut out).unwrap();
            black_box(&out);
        });
    });

    group.bench_function("flush", |b| {
        let mut ring: RingBuffer<RX_SIZE> = RingBuffer::new();
        b.iter(|| ring.flush());
    });

    group.finish();
}

criterion_group!(benches, single_byte, bulk);
criterion_main!(benches);
