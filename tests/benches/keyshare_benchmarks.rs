//! # Keyshare Benchmarks
//!
//! | Hook | Workload |
//! |------|----------|
//! | `execute_block` | N validators, all live (scan only) |
//! | `execute_block` | N validators, all idle (slash every one) |
//! | `end_block` | N aggregated requests dispatched |

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use qc_18_keyshare::adapters::{MockChannelTransport, MockStakingView, RecordingPeerRegistry};
use qc_18_keyshare::{
    BondStatus, ConsensusAddress, InMemoryKvStore, Keeper, KeyShareRequest, KeyshareConfig,
    KeyshareModule, KeyshareService, ValidatorRecord,
};
use shared_types::{BlockContext, ChannelEndpoint};
use std::sync::Arc;
use std::time::Duration;

type BenchService = KeyshareService<MockStakingView, RecordingPeerRegistry, MockChannelTransport>;

fn setup(validators: usize, last_submitted: u64) -> (BenchService, InMemoryKvStore) {
    let staking = Arc::new(MockStakingView::new());
    let mut store = InMemoryKvStore::new();
    {
        let mut keeper = Keeper::new(&mut store);
        for i in 0..validators {
            let name = format!("qcvaloper{:06}", i);
            let mut addr = [0u8; 20];
            addr[..8].copy_from_slice(&(i as u64).to_be_bytes());
            staking.set_status(&name, BondStatus::Bonded);
            keeper
                .set_validator(&ValidatorRecord::new(name.clone(), ConsensusAddress::new(addr)))
                .unwrap();
            keeper.set_last_submitted_height(&name, last_submitted).unwrap();
        }
    }
    let service = KeyshareService::new(
        KeyshareConfig::default(),
        staking,
        Arc::new(RecordingPeerRegistry::new()),
        Arc::new(MockChannelTransport::new()),
    );
    (service, store)
}

fn bench_execute_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-execute-block");
    group.measurement_time(Duration::from_secs(5));

    for size in [10usize, 100, 1_000] {
        group.throughput(Throughput::Elements(size as u64));

        let (service, store) = setup(size, 100);
        group.bench_with_input(BenchmarkId::new("all_live", size), &size, |b, _| {
            b.iter_batched(
                || store.clone(),
                |mut store| {
                    black_box(
                        service
                            .execute_block(&mut store, &BlockContext::new(101, 0))
                            .unwrap(),
                    )
                },
                BatchSize::SmallInput,
            )
        });

        let (service, store) = setup(size, 0);
        group.bench_with_input(BenchmarkId::new("all_idle", size), &size, |b, _| {
            b.iter_batched(
                || store.clone(),
                |mut store| {
                    black_box(
                        service
                            .execute_block(&mut store, &BlockContext::new(100, 0))
                            .unwrap(),
                    )
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("qc-18-dispatch");

    for size in [10usize, 100, 1_000] {
        let (service, mut store) = setup(0, 0);
        {
            let mut keeper = Keeper::new(&mut store);
            for i in 0..size {
                let mut request = KeyShareRequest::new(
                    format!("identity-{:06}", i),
                    "pk",
                    ChannelEndpoint::new("keyshare", "channel-0"),
                    i.to_string(),
                );
                request.aggr_keyshare = "aggr".repeat(24);
                keeper.set_key_share_request(&request).unwrap();
            }
        }

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("aggregated", size), &size, |b, _| {
            b.iter_batched(
                || store.clone(),
                |mut store| {
                    black_box(
                        service
                            .end_block(&mut store, &BlockContext::new(5, 0))
                            .unwrap(),
                    )
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_execute_block, bench_dispatch);
criterion_main!(benches);
