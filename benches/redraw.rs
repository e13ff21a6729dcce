//! Benchmarks for pane rendering and the redraw path.
//!
//! Run with: cargo bench
//!
//! Results are saved to `target/criterion/` with HTML reports.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use splitgrid::dom::MemoryDom;
use splitgrid::{
    ColumnSpec, DomBackend, EngineCapabilities, GeometryConfig, Grid, GridOptions, PaneRoots,
    RowData,
};

fn columns(count: usize) -> Vec<ColumnSpec> {
    (0..count)
        .map(|i| ColumnSpec::new(format!("c{i}"), 80))
        .collect()
}

fn rows(count: usize, columns: usize) -> Vec<RowData> {
    (0..count)
        .map(|r| {
            (0..columns).fold(RowData::new(format!("r{r}")), |row, c| {
                row.with(format!("c{c}"), format!("{r}:{c}"))
            })
        })
        .collect()
}

fn grid(options: GridOptions, columns_count: usize, row_count: usize) -> Grid<MemoryDom> {
    let mut dom = MemoryDom::new();
    let left = dom.create_element("div").expect("left root");
    let right = dom.create_element("div").expect("right root");
    let mut grid = Grid::new(
        dom,
        PaneRoots { left, right },
        options,
        GeometryConfig::new(columns(columns_count), 2),
    );
    grid.render().expect("render");
    grid.reset_rows(rows(row_count, columns_count))
        .expect("load rows");
    grid
}

/// Re-render the visible window for growing window sizes
fn bench_window_redraw(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_redraw");
    for window in [20usize, 100, 500] {
        group.throughput(Throughput::Elements(window as u64));
        group.bench_with_input(BenchmarkId::from_parameter(window), &window, |b, &window| {
            let mut grid = grid(GridOptions::default(), 12, window * 2);
            let mut start = 0;
            b.iter(|| {
                start = (start + 1) % window;
                grid.show_rows(black_box(start..start + window))
                    .expect("redraw");
            });
        });
    }
    group.finish();
}

/// Whole-table regeneration against in-place section replacement
fn bench_redraw_strategy(c: &mut Criterion) {
    let mut group = c.benchmark_group("redraw_strategy");
    for (name, in_place) in [("regenerate", false), ("in_place", true)] {
        let options = GridOptions {
            engine: EngineCapabilities {
                box_sizing_quirk: false,
                in_place_table_mutation: in_place,
            },
            ..GridOptions::default()
        };
        group.bench_function(name, |b| {
            let mut grid = grid(options, 12, 200);
            b.iter(|| grid.show_rows(black_box(0..200)).expect("redraw"));
        });
    }
    group.finish();
}

/// Column resize touching only the col markers
fn bench_column_resize(c: &mut Criterion) {
    let mut grid = grid(GridOptions::default(), 30, 200);
    let mut width = 80;
    c.bench_function("column_resize", |b| {
        b.iter(|| {
            width = if width == 80 { 120 } else { 80 };
            grid.set_column_width(black_box("c5"), width)
                .expect("resize")
        });
    });
}

/// Scroll sync round trip from native input to both panes
fn bench_scroll_sync(c: &mut Criterion) {
    let mut grid = grid(GridOptions::default(), 12, 1000);
    let root = *grid.pane(splitgrid::Side::Right).root();
    let mut top = 0.0;
    c.bench_function("scroll_sync", |b| {
        b.iter(|| {
            top = if top > 10_000.0 { 0.0 } else { top + 27.0 };
            grid.dom_mut().set_scroll_top(&root, top);
            grid.handle_native_scroll(splitgrid::Side::Right)
                .expect("scroll")
        });
    });
}

criterion_group!(
    benches,
    bench_window_redraw,
    bench_redraw_strategy,
    bench_column_resize,
    bench_scroll_sync
);
criterion_main!(benches);
