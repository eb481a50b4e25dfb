use beach_sand::sand::model::Coordinate;
use beach_sand::sand::{PixelCanvas, PointerEvent, SandPaint, SurfaceElement};
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_drag(c: &mut Criterion) {
    c.bench_function("sand_drag_200_moves", |b| {
        b.iter(|| {
            let mut widget: SandPaint<PixelCanvas> = SandPaint::default();
            widget.mount(SurfaceElement::new(
                PixelCanvas::new(1280, 288),
                Coordinate::new(0.0, 432.0),
            ));
            widget.dispatch(&mut PointerEvent::down(10.0, 500.0));
            for i in 0..200 {
                let x = 10.0 + i as f32 * 6.0;
                let y = 500.0 + (i as f32 * 0.3).sin() * 40.0;
                widget.dispatch(&mut PointerEvent::moved(x, y));
            }
            widget.dispatch(&mut PointerEvent::up(1210.0, 500.0));
        })
    });
}

criterion_group!(benches, bench_drag);
criterion_main!(benches);
