//! Comparison benchmark: Tessera vs Ratatui
//!
//! Fair comparison of equivalent operations between the two libraries.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// Tessera imports
use tessera::{
    Buffer as TesseraBuffer, Cell as TesseraCell, Color as TesseraColor,
    Constraint as TesseraConstraint, Layout as TesseraLayout, Rect as TesseraRect, Rgb,
    Style as TesseraStyle,
};

// Ratatui imports
use ratatui::buffer::Buffer as RatatuiBuffer;
use ratatui::layout::{Constraint as RatatuiConstraint, Layout as RatatuiLayout, Rect as RatatuiRect};
use ratatui::style::{Color as RatatuiColor, Style as RatatuiStyle};

/// Benchmark: Buffer creation
fn bench_buffer_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_creation");

    for (width, height) in [(80, 24), (200, 50)] {
        group.bench_with_input(
            BenchmarkId::new("tessera", format!("{width}x{height}")),
            &(width, height),
            |b, &(w, h)| {
                b.iter(|| TesseraBuffer::empty(TesseraRect::new(0, 0, black_box(w), black_box(h))))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("ratatui", format!("{width}x{height}")),
            &(width, height),
            |b, &(w, h)| {
                b.iter(|| RatatuiBuffer::empty(RatatuiRect::new(0, 0, black_box(w), black_box(h))))
            },
        );
    }

    group.finish();
}

/// Benchmark: Fill entire buffer
fn bench_buffer_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_fill");

    for (width, height) in [(80, 24), (200, 50)] {
        let mut tessera_buffer = TesseraBuffer::empty(TesseraRect::new(0, 0, width, height));
        let tessera_cell =
            TesseraCell::styled("█", TesseraStyle::new().fg(TesseraColor::Rgb(Rgb::new(0, 255, 0))));
        let area = tessera_buffer.area();

        group.bench_with_input(
            BenchmarkId::new("tessera", format!("{width}x{height}")),
            &(width, height),
            |b, _| b.iter(|| tessera_buffer.fill(area, black_box(&tessera_cell))),
        );

        let mut rt_buffer = RatatuiBuffer::empty(RatatuiRect::new(0, 0, width, height));
        let rt_style = RatatuiStyle::default().fg(RatatuiColor::Rgb(0, 255, 0));

        group.bench_with_input(
            BenchmarkId::new("ratatui", format!("{width}x{height}")),
            &(width, height),
            |b, &(w, h)| {
                b.iter(|| {
                    for y in 0..h {
                        for x in 0..w {
                            let cell = &mut rt_buffer[(x, y)];
                            cell.set_char('█');
                            cell.set_style(rt_style);
                        }
                    }
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: Buffer diff (comparing two buffers)
fn bench_buffer_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_diff");

    for (width, height) in [(80u16, 24u16), (200, 50)] {
        let mut tessera_a = TesseraBuffer::empty(TesseraRect::new(0, 0, width, height));
        let mut tessera_b = tessera_a.clone();
        let mut rt_a = RatatuiBuffer::empty(RatatuiRect::new(0, 0, width, height));
        let mut rt_b = rt_a.clone();

        // Fill with different content
        let mut symbol = [0u8; 4];
        for y in 0..height {
            for x in 0..width {
                let c = char::from(((x + y) % 26 + 65) as u8);
                let c2 = char::from(((x + y + 1) % 26 + 65) as u8);
                tessera_a.set(x, y, TesseraCell::new(c.encode_utf8(&mut symbol)));
                tessera_b.set(x, y, TesseraCell::new(c2.encode_utf8(&mut symbol)));
                rt_a[(x, y)].set_char(c);
                rt_b[(x, y)].set_char(c2);
            }
        }

        group.bench_with_input(
            BenchmarkId::new("tessera", format!("{width}x{height}")),
            &(width, height),
            |b, _| b.iter(|| black_box(&tessera_a).diff(black_box(&tessera_b))),
        );

        group.bench_with_input(
            BenchmarkId::new("ratatui", format!("{width}x{height}")),
            &(width, height),
            |b, _| b.iter(|| black_box(&rt_a).diff(black_box(&rt_b))),
        );
    }

    group.finish();
}

/// Benchmark: Text rendering through the grapheme-aware string writer
fn bench_text_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_render");

    let text = "Hello, World! 日本語 and e\u{301} in a benchmark test string.";

    let mut tessera_buffer = TesseraBuffer::empty(TesseraRect::new(0, 0, 200, 50));
    let tessera_style = TesseraStyle::new()
        .fg(TesseraColor::Rgb(Rgb::new(255, 255, 255)))
        .bg(TesseraColor::Rgb(Rgb::new(0, 0, 0)));
    group.bench_function("tessera", |b| {
        b.iter(|| tessera_buffer.set_string(0, 0, black_box(text), tessera_style))
    });

    let mut rt_buffer = RatatuiBuffer::empty(RatatuiRect::new(0, 0, 200, 50));
    let rt_style = RatatuiStyle::default()
        .fg(RatatuiColor::Rgb(255, 255, 255))
        .bg(RatatuiColor::Rgb(0, 0, 0));
    group.bench_function("ratatui", |b| {
        b.iter(|| rt_buffer.set_string(0, 0, black_box(text), rt_style))
    });

    group.finish();
}

/// Benchmark: Splitting an area with mixed constraints
fn bench_layout_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout_split");

    let tessera_layout = TesseraLayout::horizontal().constraints([
        TesseraConstraint::Length(20),
        TesseraConstraint::Percentage(30),
        TesseraConstraint::Min(10),
        TesseraConstraint::Fill(1),
    ]);
    let tessera_area = TesseraRect::new(0, 0, 200, 50);
    group.bench_function("tessera", |b| {
        b.iter(|| black_box(&tessera_layout).split(black_box(tessera_area)))
    });

    let rt_layout = RatatuiLayout::horizontal([
        RatatuiConstraint::Length(20),
        RatatuiConstraint::Percentage(30),
        RatatuiConstraint::Min(10),
        RatatuiConstraint::Fill(1),
    ]);
    let rt_area = RatatuiRect::new(0, 0, 200, 50);
    // ratatui caches splits internally; vary the area so every call solves
    let mut height = 0u16;
    group.bench_function("ratatui", |b| {
        b.iter(|| {
            height = height.wrapping_add(1) % 1000;
            black_box(&rt_layout).split(black_box(RatatuiRect { height, ..rt_area }))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_buffer_creation,
    bench_buffer_fill,
    bench_buffer_diff,
    bench_text_render,
    bench_layout_split,
);
criterion_main!(benches);
