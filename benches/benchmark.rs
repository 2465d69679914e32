use criterion::{Criterion, black_box, criterion_group, criterion_main};
use glam::{Quat, Vec3};
use trigrip::config::ControllerConfig;
use trigrip::controller::HandRotationController;
use trigrip::filter::OneEuroFilter;
use trigrip::triangle::{self, TriangleThresholds};
use trigrip::types::{FrameInput, HandFrame};

fn bench_triangle_estimate(c: &mut Criterion) {
    let thumb = Vec3::new(0.00, -0.01, 0.08);
    let index = Vec3::new(0.03, 0.01, 0.09);
    let middle = Vec3::new(0.01, 0.03, 0.09);
    let thresholds = TriangleThresholds::default();

    c.bench_function("triangle_estimate", |b| {
        b.iter(|| {
            triangle::estimate(
                black_box(thumb),
                black_box(index),
                black_box(middle),
                &thresholds,
            )
        })
    });
}

fn bench_one_euro_filter(c: &mut Criterion) {
    c.bench_function("one_euro_filter", |b| {
        let mut f = OneEuroFilter::new(1.0, 0.15, 1.0);
        let mut x = 0.0f32;
        b.iter(|| {
            x += 0.001;
            f.filter(black_box(x.sin()), 1.0 / 60.0)
        })
    });
}

fn bench_controller_update(c: &mut Criterion) {
    let mut controller = HandRotationController::new(ControllerConfig::default()).unwrap();
    let tips = [
        Vec3::new(0.00, -0.01, 0.08),
        Vec3::new(0.03, 0.01, 0.09),
        Vec3::new(0.01, 0.03, 0.09),
    ];
    let mut i = 0u32;

    c.bench_function("controller_update", |b| {
        b.iter(|| {
            i += 1;
            let rot = Quat::from_axis_angle(Vec3::Z, (i % 360) as f32 * 0.002);
            let input = FrameInput {
                dt: 1.0 / 60.0,
                hand: HandFrame::IDENTITY,
                thumb: rot * tips[0],
                index: rot * tips[1],
                middle: rot * tips[2],
                grab_held: true,
                bends: None,
            };
            controller.update(black_box(&input))
        })
    });
}

criterion_group!(
    benches,
    bench_triangle_estimate,
    bench_one_euro_filter,
    bench_controller_update
);
criterion_main!(benches);
