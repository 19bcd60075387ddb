use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use sheetbind::{table_record, Grid, TableMapper};

table_record! {
    #[derive(Debug, Default, Clone)]
    pub struct Sale {
        #[label = "ID"]
        pub id: u64,
        #[label = "Name"]
        pub name: String,
        #[label = "Value"]
        pub value: f64,
        #[label = "Date"]
        pub date: NaiveDate,
        #[label = "Active"]
        pub active: bool,
    }
}

fn build_grid(size: usize) -> Grid {
    let mut grid = Grid::default();
    grid.push_row(["ID", "Name", "Value", "Date", "Active"]);
    for i in 0..size {
        grid.push_row([
            i.to_string(),
            format!("Name_{}", i),
            (i as f64 * 1.25).to_string(),
            "2024-06-30".to_string(),
            if i % 2 == 0 { "TRUE" } else { "FALSE" }.to_string(),
        ]);
    }
    grid
}

fn benchmark_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    group.sample_size(10); // Reduce samples for large benchmarks

    let mapper = TableMapper::<Sale>::new().unwrap();
    for size in [100, 1000, 10000].iter() {
        let grid = build_grid(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let sales = mapper.decode(black_box(&grid)).unwrap();
                black_box(sales);
            });
        });
    }

    group.finish();
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    group.sample_size(10);

    let mapper = TableMapper::<Sale>::new().unwrap();
    for size in [100, 1000, 10000].iter() {
        let sales = mapper.decode(&build_grid(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let grid = mapper.encode(black_box(&sales)).unwrap();
                black_box(grid);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_decode, benchmark_encode);
criterion_main!(benches);
