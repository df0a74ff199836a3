use std::sync::Arc;

use criterion::{BatchSize, Criterion, criterion_group};
use rand::seq::SliceRandom;
use rand::thread_rng;

use correlate::client::client_manager::ClientManager;
use correlate::client::client_manager_config::ClientManagerConfig;
use correlate::correlation::correlation_id::CorrelationId;
use correlate::handler::response_handler::{result_handler, updates_handler};
use correlate::native::loopback_native_source::LoopbackNativeSource;
use correlate::native::payload::Payload;

const BATCH_SIZE: usize = 1024;

fn dispatch(criterion: &mut Criterion) {
    let client_manager = ClientManager::new(
        Arc::new(LoopbackNativeSource::silent()),
        ClientManagerConfig::new(BATCH_SIZE, 1, 1),
    );
    let client = match client_manager.create_client_with_updates_handler(updates_handler(|_| Ok(())), None, None) {
        Ok(client) => client,
        Err(err) => panic!("error creating a client for the benchmark, {:?}", err),
    };

    let mut group = criterion.benchmark_group("event dispatch");
    group.bench_function("shuffled responses", |bencher| {
        bencher.iter_batched(
            || {
                let mut correlation_ids: Vec<CorrelationId> = (0..BATCH_SIZE)
                    .filter_map(|_| client.send(Box::new(()), Some(result_handler(|_| Ok(()))), None).ok())
                    .collect();
                correlation_ids.shuffle(&mut thread_rng());
                let payloads = correlation_ids.iter().map(|correlation_id| Payload::object(*correlation_id)).collect::<Vec<_>>();
                return (correlation_ids, payloads);
            },
            |(correlation_ids, payloads)| client.handle_events(false, correlation_ids, payloads),
            BatchSize::SmallInput,
        );
    });
    group.bench_function("updates", |bencher| {
        bencher.iter_batched(
            || {
                let correlation_ids: Vec<CorrelationId> = vec![0; BATCH_SIZE];
                let payloads = (0..BATCH_SIZE).map(|index| Payload::object(index)).collect::<Vec<_>>();
                return (correlation_ids, payloads);
            },
            |(correlation_ids, payloads)| client.handle_events(false, correlation_ids, payloads),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, dispatch);
