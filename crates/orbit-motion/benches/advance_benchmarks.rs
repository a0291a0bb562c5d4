use criterion::{Criterion, black_box, criterion_group, criterion_main};
use orbit_config::{DirectionMode, OrbitConfig, SpinnerConfig};
use orbit_motion::*;

fn bench_orbit_advance(c: &mut Criterion) {
    let mut controller = OrbitMotionController::new(OrbitConfig::default()).unwrap();
    let mut t = 0.0;
    c.bench_function("orbit_advance", |bencher| {
        bencher.iter(|| {
            t += 1.0 / 60.0;
            black_box(controller.advance(black_box(t)))
        })
    });
}

fn bench_orbit_advance_accumulate(c: &mut Criterion) {
    let config = OrbitConfig {
        direction_mode: DirectionMode::Accumulate,
        ..OrbitConfig::default()
    };
    let mut controller = OrbitMotionController::new(config).unwrap();
    let mut t = 0.0;
    c.bench_function("orbit_advance_accumulate", |bencher| {
        bencher.iter(|| {
            t += 1.0 / 60.0;
            black_box(controller.advance(black_box(t)))
        })
    });
}

fn bench_pure_step(c: &mut Criterion) {
    let config = OrbitConfig::default();
    let state = OrbitState::initial(&config);
    c.bench_function("orbit_state_advanced", |bencher| {
        bencher.iter(|| black_box(state.advanced(&config, black_box(0.5))))
    });
}

fn bench_geo_to_cartesian(c: &mut Criterion) {
    c.bench_function("geo_to_cartesian", |bencher| {
        bencher.iter(|| black_box(geo::geo_to_cartesian(black_box(42.0), black_box(17.0), 8.0)))
    });
}

fn bench_spinner_advance(c: &mut Criterion) {
    let mut spinner = SpinnerController::new(SpinnerConfig::default()).unwrap();
    c.bench_function("spinner_advance", |bencher| {
        bencher.iter(|| black_box(spinner.advance(black_box(3.0), false)))
    });
}

criterion_group!(
    benches,
    bench_orbit_advance,
    bench_orbit_advance_accumulate,
    bench_pure_step,
    bench_geo_to_cartesian,
    bench_spinner_advance
);
criterion_main!(benches);
