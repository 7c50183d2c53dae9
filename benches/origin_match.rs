use std::hint::black_box;

use brrtcors::{
    match_origin, CorsOptionsBuilder, CorsService, HeaderVec, HttpRequest, HttpResponse, Origin,
};
use criterion::{criterion_group, criterion_main, Criterion};
use http::Method;

fn allow_list() -> Vec<&'static str> {
    vec![
        "https://app.example.com",
        "https://admin.example.com",
        "http://localhost:3000",
        "https://*.partners.example.net",
        "*.cdn.example.org",
    ]
}

fn bench_match_origin(c: &mut Criterion) {
    let options = CorsOptionsBuilder::new()
        .allowed_origins(&allow_list())
        .build()
        .unwrap();
    let hit = Origin::parse("https://eu.partners.example.net").unwrap();
    let miss = Origin::parse("https://unknown.example.io").unwrap();

    c.bench_function("match_origin_wildcard_hit", |b| {
        b.iter(|| match_origin(black_box(&hit), black_box(&options.allowed_origins)))
    });
    c.bench_function("match_origin_miss", |b| {
        b.iter(|| match_origin(black_box(&miss), black_box(&options.allowed_origins)))
    });
}

fn bench_populate(c: &mut Criterion) {
    let cors = CorsService::new(
        CorsOptionsBuilder::new()
            .allowed_origins(&allow_list())
            .expose_headers(&["X-Total-Count"])
            .build()
            .unwrap(),
    );
    let req = HttpRequest::new(Method::GET, HeaderVec::new())
        .with_header("Host", "api.example.com")
        .with_header("Origin", "https://admin.example.com");

    c.bench_function("populate_cors_response", |b| {
        b.iter(|| {
            let mut resp = HttpResponse::default();
            cors.populate_cors_response(black_box(&req), &mut resp).unwrap();
            resp
        })
    });
}

criterion_group!(benches, bench_match_origin, bench_populate);
criterion_main!(benches);
