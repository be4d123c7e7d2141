//! Performance benchmarks for DynLimits
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use dynlimits::cluster::{MemoryCluster, NodeState};
use dynlimits::config::PolicyStore;
use dynlimits::engine::{decide, sample_idle_ratio};
use chrono::Utc;

/// Build a one-partition cluster with `nodes` nodes, one third idle
fn build_cluster(nodes: u32) -> MemoryCluster {
    let mut cluster = MemoryCluster::new();
    let mut members = Vec::with_capacity(nodes as usize);

    for i in 0..nodes {
        let node = match i % 3 {
            0 => cluster.add_node(NodeState::Idle, 64, 0),
            1 => cluster.add_node(NodeState::Busy, 64, 48),
            _ => cluster.add_node(NodeState::Busy, 64, 64),
        };
        members.push(node);
    }

    cluster.add_partition("compute", members);
    cluster
}

fn bench_sample_idle_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_idle_ratio");

    for nodes in [100u32, 1_000, 10_000] {
        let cluster = build_cluster(nodes);
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &cluster, |b, cluster| {
            b.iter(|| black_box(sample_idle_ratio(cluster, "compute").unwrap()));
        });
    }

    group.finish();
}

fn bench_sample_and_decide(c: &mut Criterion) {
    let cluster = build_cluster(1_000);
    let store = PolicyStore::load("compute:95:10:15");
    let policy = store.resolve("compute").unwrap();

    c.bench_function("sample_and_decide_1k_nodes", |b| {
        b.iter(|| {
            let idle = sample_idle_ratio(&cluster, "compute").unwrap();
            black_box(decide(idle, policy, Utc::now()))
        });
    });
}

fn bench_policy_load(c: &mut Criterion) {
    let config = (0..64)
        .map(|i| format!("partition{i}:90:5:60"))
        .collect::<Vec<_>>()
        .join(",");

    c.bench_function("policy_load_64_entries", |b| {
        b.iter(|| black_box(PolicyStore::load(&config)));
    });
}

criterion_group!(
    benches,
    bench_sample_idle_ratio,
    bench_sample_and_decide,
    bench_policy_load
);
criterion_main!(benches);
