use criterion::{BatchSize, Criterion, criterion_group};

use correlate::correlation::correlation_id::CorrelationId;
use correlate::correlation::pending_requests::PendingRequests;
use correlate::handler::handler::Handler;
use correlate::handler::response_handler::result_handler;

const SIZE: usize = 64 * 1024;

fn add_and_take(criterion: &mut Criterion) {
    let handler = Handler::new(result_handler(|_| Ok(())), None);
    let mut group = criterion.benchmark_group("pending requests");

    group.bench_function("add without capacity", |bencher| {
        bencher.iter_batched(
            || (PendingRequests::new(), (1..=SIZE).map(|index| index as CorrelationId).collect::<Vec<_>>()),
            |(pending_requests, correlation_ids)| {
                for correlation_id in correlation_ids {
                    pending_requests.add(correlation_id, handler.clone());
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("add with capacity", |bencher| {
        bencher.iter_batched(
            || (PendingRequests::new_with_capacity(SIZE), (1..=SIZE).map(|index| index as CorrelationId).collect::<Vec<_>>()),
            |(pending_requests, correlation_ids)| {
                for correlation_id in correlation_ids {
                    pending_requests.add(correlation_id, handler.clone());
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("take", |bencher| {
        bencher.iter_batched(
            || {
                let pending_requests = PendingRequests::new_with_capacity(SIZE);
                for correlation_id in 1..=SIZE {
                    pending_requests.add(correlation_id as CorrelationId, handler.clone());
                }
                return pending_requests;
            },
            |pending_requests| {
                for correlation_id in 1..=SIZE {
                    let _ = pending_requests.take(correlation_id as CorrelationId);
                }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(benches, add_and_take);
