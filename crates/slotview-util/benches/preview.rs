use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use slotview_heap::Heap;
use slotview_sdk::{IterationKind, ObjectHandle, Value};
use slotview_util::{get_own_non_index_properties, preview_entries_bounded, ONLY_ENUMERABLE};

fn map_iterator(size: usize) -> (Heap, ObjectHandle) {
    let mut heap = Heap::new();
    let map = heap.alloc_map();
    for i in 0..size {
        heap.map_set(map, format!("key{}", i).as_str(), i as f64).unwrap();
    }
    let it = heap.alloc_map_iterator(map, IterationKind::Entries).unwrap();
    (heap, it)
}

fn bench_preview(c: &mut Criterion) {
    let mut group = c.benchmark_group("preview");

    for size in [10usize, 1_000, 100_000] {
        let (heap, it) = map_iterator(size);
        let value = Value::from(it);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("unbounded", size), &value, |b, value| {
            b.iter(|| preview_entries_bounded(&heap, black_box(value), true, None).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("limit_100", size), &value, |b, value| {
            b.iter(|| preview_entries_bounded(&heap, black_box(value), true, Some(100)).unwrap());
        });
    }

    group.finish();
}

fn bench_properties(c: &mut Criterion) {
    let mut heap = Heap::new();
    let elements = (0..1_000).map(|i| Value::from(i as f64)).collect();
    let array = heap.alloc_array(elements);
    for i in 0..100 {
        heap.set_property(array, format!("prop{}", i).as_str(), i).unwrap();
    }
    let value = Value::from(array);

    c.bench_function("own_non_index_properties", |b| {
        b.iter(|| get_own_non_index_properties(&heap, black_box(&value), ONLY_ENUMERABLE).unwrap());
    });
}

criterion_group!(benches, bench_preview, bench_properties);
criterion_main!(benches);
