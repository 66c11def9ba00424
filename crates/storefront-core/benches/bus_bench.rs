use criterion::{black_box, criterion_group, criterion_main, Criterion};
use storefront_core::{names, AppState, EventBus, EventPayload, InitialState, OrderField, SubscriptionKey};

fn bench_emit(c: &mut Criterion) {
    let bus = EventBus::new();
    for _ in 0..16 {
        bus.on(names::BASKET_OPEN, |payload| {
            black_box(payload);
        });
    }
    bus.on(
        SubscriptionKey::pattern(names::FIELD_CHANGE_PATTERN).expect("valid pattern"),
        |payload| {
            black_box(payload);
        },
    );

    c.bench_function("emit_exact_16_subscribers", |b| {
        b.iter(|| bus.emit(black_box(names::BASKET_OPEN), &EventPayload::Empty))
    });

    c.bench_function("emit_pattern_match", |b| {
        b.iter(|| bus.emit(black_box("order.address:change"), &EventPayload::Empty))
    });
}

fn bench_set_order_field(c: &mut Criterion) {
    let bus = EventBus::new();
    let state = AppState::new(InitialState::default(), bus);

    c.bench_function("set_order_field_validates_both_forms", |b| {
        b.iter(|| state.set_order_field(OrderField::Address, black_box("1 Main St")))
    });
}

criterion_group!(benches, bench_emit, bench_set_order_field);
criterion_main!(benches);
