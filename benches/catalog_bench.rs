use criterion::{black_box, criterion_group, criterion_main, Criterion};
use serde_json::json;

use diplo_variants::board::{IssuedOrder, Order};
use diplo_variants::render::ResolveRequest;
use diplo_variants::variants::{self, classical};

fn bench_list_variants(c: &mut Criterion) {
    let catalog = variants::catalog(None).unwrap();
    c.bench_function("list_variants_all", |b| {
        b.iter(|| catalog.list_variants(black_box(u32::MAX)).unwrap())
    });
    c.bench_function("list_variants_serialize", |b| {
        let listing = catalog.list_variants(u32::MAX).unwrap();
        b.iter(|| serde_json::to_vec(black_box(&listing)).unwrap())
    });
}

fn bench_resolve_holds(c: &mut Criterion) {
    let variant = classical::variant().unwrap();
    let state = variant.start().unwrap();
    // All 22 units hold
    let orders: Vec<IssuedOrder> = state
        .units
        .iter()
        .map(|(province, unit)| IssuedOrder {
            nation: unit.nation.clone(),
            province: province.clone(),
            order: Order::Hold,
        })
        .collect();

    c.bench_function("resolve_22_holds", |b| {
        b.iter(|| variant.resolve(black_box(state.clone()), black_box(&orders)).unwrap())
    });
}

fn bench_resolve_request(c: &mut Criterion) {
    let catalog = variants::catalog(None).unwrap();
    let start = catalog.start_variant(classical::NAME).unwrap();
    let mut body = serde_json::to_value(&start.start).unwrap();
    body["Orders"] = json!({
        "England": {"lon": ["Move", "nth"], "edi": ["Move", "nrg"], "lvp": ["Move", "yor"]},
        "France": {"par": ["Move", "bur"], "mar": ["Move", "spa"], "bre": ["Move", "mao"]},
        "Germany": {"mun": ["Move", "bur"], "ber": ["Move", "kie"], "kie": ["Move", "den"]},
        "Russia": {"stp/sc": ["Move", "bot"], "war": ["Move", "gal"], "mos": ["Move", "ukr"]},
        "Austria": {"vie": ["Move", "gal"], "bud": ["Move", "ser"], "tri": ["Move", "alb"]}
    });
    let request: ResolveRequest = serde_json::from_value(body).unwrap();

    c.bench_function("resolve_request_opening", |b| {
        b.iter(|| {
            catalog
                .resolve_variant(classical::NAME, black_box(request.clone()))
                .unwrap()
        })
    });
}

criterion_group!(benches, bench_list_variants, bench_resolve_holds, bench_resolve_request);
criterion_main!(benches);
