use catalog::{fold, MemoryStore, Product, ProductStore, RatingAggregator, RatingObservation, RatingStats};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion

fn bench_deserialize(c: &mut Criterion) {
  let mut group = c.benchmark_group("ProductCodec");
  let payload = json!({
    "name": "shirt",
    "description": "Relaxed Fit",
    "category": "men's clothing",
    "price": 42.5,
    "available": true,
    "rating": 3.5,
    "cumulative_ratings": 7.0,
    "no_of_users_rated": 2,
  });

  group.bench_function("deserialize", |b| {
    b.iter(|| criterion::black_box(Product::deserialize(criterion::black_box(&payload)).unwrap()))
  });

  let product = Product::deserialize(&payload).unwrap();
  group.bench_function("serialize", |b| b.iter(|| criterion::black_box(product.serialize())));
  group.finish();
}

fn bench_fold(c: &mut Criterion) {
  let mut group = c.benchmark_group("RatingFold");
  for observations in [1u64, 100, 10_000].iter() {
    group.throughput(Throughput::Elements(*observations));
    group.bench_with_input(BenchmarkId::from_parameter(observations), observations, |b, &n| {
      let observation = RatingObservation::new(4.0).unwrap();
      b.iter(|| {
        let mut stats = RatingStats::default();
        let mut rating = 0.0;
        for _ in 0..n {
          (stats, rating) = fold(stats, observation).unwrap();
        }
        criterion::black_box((stats, rating))
      })
    });
  }
  group.finish();
}

fn bench_submit(c: &mut Criterion) {
  let mut group = c.benchmark_group("RatingAggregator");
  let rt = Runtime::new().unwrap();
  let store = Arc::new(MemoryStore::new());
  let product = rt
    .block_on(store.create(&Product::new("shirt", "Slim Fit", "men's clothing", 30.0, true).unwrap()))
    .unwrap();
  let id = product.id.unwrap();
  let aggregator = RatingAggregator::new(store);
  let observation = RatingObservation::new(3.0).unwrap();

  group.bench_function("submit_uncontended", |b| {
    b.to_async(&rt).iter(|| {
      let aggregator = aggregator.clone();
      async move { aggregator.submit(id, observation).await.unwrap() }
    })
  });
  group.finish();
}

criterion_group!(benches, bench_deserialize, bench_fold, bench_submit);
criterion_main!(benches);
