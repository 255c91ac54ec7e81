use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_blocks::core::{Engine, EngineConfig, Field};

fn started_engine() -> Engine {
    let mut engine = Engine::with_seed(EngineConfig::default(), 12345);
    engine.start();
    engine
}

fn bench_tick(c: &mut Criterion) {
    let mut engine = started_engine();

    c.bench_function("engine_tick_16ms", |b| {
        b.iter(|| {
            if !engine.is_running() {
                engine.restart();
            }
            engine.tick(black_box(16));
            engine.drain_events();
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut field = Field::new(10, 20);
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..10 {
                    field.set_cell(x, y, 1);
                }
            }
            field.remove_all_complete_lines()
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    let mut engine = started_engine();

    c.bench_function("hard_drop_and_spawn", |b| {
        b.iter(|| {
            if !engine.is_running() {
                engine.restart();
            }
            engine.hard_drop();
            engine.drain_events();
        })
    });
}

fn bench_move(c: &mut Criterion) {
    let mut engine = started_engine();

    c.bench_function("move_right_left", |b| {
        b.iter(|| {
            engine.move_right();
            engine.move_left();
            engine.drain_events();
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut engine = started_engine();

    c.bench_function("rotate_cw", |b| {
        b.iter(|| {
            engine.rotate_cw();
            engine.drain_events();
        })
    });
}

fn bench_ghost(c: &mut Criterion) {
    let engine = started_engine();

    c.bench_function("ghost_piece", |b| b.iter(|| black_box(engine.ghost_piece())));
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_move,
    bench_rotate,
    bench_ghost
);
criterion_main!(benches);
