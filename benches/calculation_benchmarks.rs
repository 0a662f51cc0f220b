//! Performance benchmarks for the Section 2 engine.
//!
//! This benchmark suite covers:
//! - Single shift calculation with no history
//! - Single shift against a week of history
//! - Relief leave averaging over a year of history
//! - Batches of 100 and 1000 shifts
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use section2_engine::calculation::Section2Calculator;
use section2_engine::models::{Section2Request, ShiftType};

/// Creates a calculator with loaded configuration.
fn create_calculator() -> Section2Calculator {
    Section2Calculator::from_config("./config/section2").expect("Failed to load config")
}

/// Creates `count` history records, one per day ending the day before 2025-10-02.
fn create_history(count: usize) -> Vec<serde_json::Value> {
    let end = chrono::NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();

    (0..count)
        .map(|i| {
            let date = end - chrono::Duration::days(i as i64);
            serde_json::json!({
                "id": i,
                "date": date.format("%Y-%m-%d").to_string(),
                "from": format!("{} 14:00", date),
                "planned_to": format!("{} 22:00", date),
                "actual_to": format!("{} 22:30", date),
                "type": if i % 4 == 0 { "OT" } else { "Normal" },
                "actual_hours": 30_600_000,
                "overrun_hours": 1_800_000,
                "lower_rate": 7_200_000,
                "higher_rate": if i % 7 == 0 { 3_600_000 } else { 0 }
            })
        })
        .rev()
        .collect()
}

/// Creates a request of the given type with `history` prior shifts.
fn create_request(shift_type: &str, history: usize) -> Section2Request {
    let request_json = serde_json::json!({
        "id": "bench",
        "from": "2025-10-02 14:00",
        "planned_to": "2025-10-02 22:00",
        "actual_to": "2025-10-02 23:00",
        "type": shift_type,
        "shifts": create_history(history)
    });

    serde_json::from_value(request_json).expect("Failed to create request")
}

/// Benchmark: Single shift calculation.
fn bench_single_shift(c: &mut Criterion) {
    let calculator = create_calculator();
    let request = create_request("Normal", 0);

    c.bench_function("single_shift", |b| {
        b.iter(|| black_box(calculator.calculate(black_box(&request))))
    });
}

/// Benchmark: Overtime shift against a week of history.
fn bench_overtime_with_week_history(c: &mut Criterion) {
    let calculator = create_calculator();
    let request = create_request("OT", 7);

    c.bench_function("overtime_week_history", |b| {
        b.iter(|| black_box(calculator.calculate(black_box(&request))))
    });
}

/// Benchmark: Relief leave averaged over a year of history.
fn bench_relief_average(c: &mut Criterion) {
    let calculator = create_calculator();
    let request = create_request("AL (relief)", 365);

    c.bench_function("relief_average_year", |b| {
        b.iter(|| black_box(calculator.calculate(black_box(&request))))
    });
}

/// Benchmark: Batches of independent shifts.
fn bench_batch(c: &mut Criterion) {
    let calculator = create_calculator();
    let types = [ShiftType::Normal, ShiftType::Ot, ShiftType::Toil, ShiftType::Bank];

    let mut group = c.benchmark_group("batch_processing");

    for size in [100usize, 1000] {
        let requests: Vec<Section2Request> = (0..size)
            .map(|i| create_request(types[i % types.len()].label(), i % 14))
            .collect();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("shifts", size), &requests, |b, requests| {
            b.iter(|| black_box(calculator.calculate_batch(requests)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_shift,
    bench_overtime_with_week_history,
    bench_relief_average,
    bench_batch,
);
criterion_main!(benches);
