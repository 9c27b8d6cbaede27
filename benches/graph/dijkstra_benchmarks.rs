use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use reliefnet::collections::IndexedMinHeap;
use reliefnet::graph::{dijkstra, prim, Graph, RoadGraph};

fn random_graph(n: usize, degree: usize, seed: u64) -> Graph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = Graph::with_vertices(n);
    for src in 0..n {
        for _ in 0..degree {
            let dest = rng.gen_range(0..n);
            if dest != src {
                let weight = rng.gen_range(1..100);
                graph.add_directed_edge(src, dest, weight).unwrap();
            }
        }
    }
    graph
}

fn bench_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexed_heap");
    for &n in &[1_000, 10_000] {
        let keys: Vec<u64> = {
            let mut rng = StdRng::seed_from_u64(7);
            (0..n).map(|_| rng.gen_range(0..1_000_000)).collect()
        };
        group.bench_with_input(BenchmarkId::new("insert_extract", n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = IndexedMinHeap::new(keys.len());
                for (v, &key) in keys.iter().enumerate() {
                    heap.insert(v, key).unwrap();
                }
                while let Ok(node) = heap.extract_min() {
                    black_box(node);
                }
            })
        });
    }
    group.finish();
}

fn bench_traversals(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversals");
    for &n in &[100, 1_000, 5_000] {
        let graph = random_graph(n, 8, 42);
        group.bench_with_input(BenchmarkId::new("dijkstra", n), &graph, |b, graph| {
            b.iter(|| dijkstra::shortest_paths(black_box(graph), 0).unwrap())
        });

        let mut roads = RoadGraph::from_graph(&graph);
        for v in (0..n).step_by(10) {
            if let Some(road) = roads.roads(v).first() {
                let to = road.to;
                roads.block_road(v, to).unwrap();
            }
        }
        group.bench_with_input(BenchmarkId::new("open_roads", n), &roads, |b, roads| {
            b.iter(|| roads.evacuation_routes(black_box(0)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("prim", n), &graph, |b, graph| {
            b.iter(|| prim::minimum_spanning_tree(black_box(graph), 0).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_heap, bench_traversals);
criterion_main!(benches);
