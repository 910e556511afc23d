use criterion::{black_box, criterion_group, criterion_main, Criterion};
use greeting_endpoint::feature::greeting::{
    greeting_repository::GreetingRepository, greeting_service::PrefixGreetingService,
};

fn greet_benchmark(c: &mut Criterion) {
    let service = PrefixGreetingService::default();
    c.bench_function("greet", |b| b.iter(|| service.greet(black_box(Some("World")))));
}

fn list_benchmark(c: &mut Criterion) {
    let repository = GreetingRepository::with_seed(["Apple", "Pineapple"]);
    c.bench_function("list", |b| b.iter(|| black_box(repository.list())));
}

criterion_group!(benches, greet_benchmark, list_benchmark);
criterion_main!(benches);
