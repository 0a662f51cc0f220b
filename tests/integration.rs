//! Integration tests for the Section 2 engine.
//!
//! This test suite covers the public entry points end to end:
//! - Unsocial hours on ordinary shifts
//! - Overtime against the weekly threshold
//! - Bank holidays and Bank shifts
//! - Relief leave
//! - Input normalization and rejected input
//! - Configuration-driven calculators

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use section2_engine::calculation::{Section2Calculator, calculate_section2};
use section2_engine::calendar::{BankHolidayCalendar, TimestampInput};
use section2_engine::models::{
    LeaveReliefMethod, PayBreakdown, Section2Options, Section2Request, ShiftType,
};

const HOUR: i64 = 3_600_000;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_calculator() -> Section2Calculator {
    Section2Calculator::from_config("./config/section2").expect("Failed to load config")
}

fn request_from_json(body: Value) -> Section2Request {
    serde_json::from_value(body).expect("Invalid request JSON")
}

fn make_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn history_shift(date: &str, from: &str, to: &str, shift_type: &str) -> Value {
    json!({
        "date": date,
        "from": format!("{} {}", date, from),
        "planned_to": format!("{} {}", date, to),
        "actual_to": format!("{} {}", date, to),
        "type": shift_type
    })
}

fn assert_zero(breakdown: &PayBreakdown) {
    assert!(breakdown.is_zero(), "Expected all-zero breakdown, got {:?}", breakdown);
}

// =============================================================================
// SECTION 1: Unsocial hours
// =============================================================================

#[test]
fn test_thursday_evening_lower_rate() {
    let request = request_from_json(json!({
        "from": "2025-10-02 12:00",
        "planned_to": "2025-10-02 22:00",
        "type": "Normal"
    }));

    let breakdown = create_calculator().calculate(&request);

    assert_eq!(breakdown.lower_rate, 7_200_000);
    assert_eq!(
        breakdown,
        PayBreakdown {
            lower_rate: 7_200_000,
            ..PayBreakdown::default()
        }
    );
}

#[test]
fn test_saturday_night_into_sunday() {
    let request = Section2Request::new("2025-10-04 20:00", "2025-10-05 08:00");

    let breakdown = create_calculator().calculate(&request);

    assert_eq!(breakdown.lower_rate, 4 * HOUR);
    assert_eq!(breakdown.higher_rate, 7 * HOUR + HOUR / 2);
    assert_eq!(breakdown.flat + breakdown.time_and_half + breakdown.double, 0);
}

#[test]
fn test_break_from_lower_option() {
    let request = Section2Request::new("2025-10-04 20:00", "2025-10-05 08:00");
    let options = Section2Options {
        break_from_higher: false,
        ..Section2Options::default()
    };

    let breakdown = create_calculator().calculate_with(&request, &options);

    assert_eq!(breakdown.lower_rate, 3 * HOUR + HOUR / 2);
    assert_eq!(breakdown.higher_rate, 8 * HOUR);
}

// =============================================================================
// SECTION 2: Weekly threshold
// =============================================================================

#[test]
fn test_threshold_boundary() {
    let options = Section2Options {
        weekly_hours: 108_000_000,
        ..Section2Options::default()
    };
    let calculator = create_calculator();

    let at_threshold = Section2Request::new("2025-10-02 09:00", "2025-10-02 17:00")
        .with_type(ShiftType::Ot);
    let breakdown = calculator.calculate_with(&at_threshold, &options);
    assert_eq!(breakdown.flat, 27_000_000);
    assert_eq!(breakdown.time_and_half, 0);
    assert_eq!(breakdown.double, 0);

    let one_over = at_threshold.with_actual_to(TimestampInput::from(
        make_datetime("2025-10-02 17:00:00") + chrono::Duration::milliseconds(1),
    ));
    let breakdown = calculator.calculate_with(&one_over, &options);
    assert_eq!(breakdown.flat, 27_000_000);
    assert_eq!(breakdown.time_and_half, 1);
}

#[test]
fn test_history_reduces_flat_rate() {
    let request = request_from_json(json!({
        "from": "2025-10-02 09:00",
        "planned_to": "2025-10-02 13:00",
        "type": "OT",
        "shifts": [
            history_shift("2025-09-29", "09:00", "13:00", "OT"),
            history_shift("2025-09-22", "09:00", "17:00", "OT")
        ]
    }));
    let options = Section2Options {
        weekly_hours: 108_000_000,
        ..Section2Options::default()
    };

    let breakdown = create_calculator().calculate_with(&request, &options);

    assert_eq!(breakdown.flat, 3 * HOUR + HOUR / 2);
    assert_eq!(breakdown.time_and_half, HOUR / 2);
}

// =============================================================================
// SECTION 3: Bank holidays and Bank shifts
// =============================================================================

#[test]
fn test_bank_shift_uplift() {
    let request = request_from_json(json!({
        "from": "2024-03-18 09:15",
        "planned_to": "2024-03-18 17:15",
        "type": "Bank"
    }));
    let options = Section2Options {
        weekly_hours: 0,
        ..Section2Options::default()
    };

    let breakdown = create_calculator().calculate_with(&request, &options);

    assert_eq!(breakdown.flat, 30_241_296);
    assert_eq!(breakdown.time_and_half, 0);
}

#[test]
fn test_overtime_into_christmas_day() {
    let request = Section2Request::new("2025-12-24 20:00", "2025-12-25 08:00")
        .with_type(ShiftType::Ot);

    let breakdown = create_calculator().calculate(&request);
    let hours = breakdown.to_hours();

    assert_eq!(hours.double, decimal("7.5"));
    assert_eq!(hours.time_and_half, decimal("4"));
    assert_eq!(hours.lower_rate, Decimal::ZERO);
    assert_eq!(hours.higher_rate, Decimal::ZERO);
}

#[test]
fn test_normal_christmas_day_earns_toil_and_higher_rate() {
    let request = Section2Request::new("2025-12-25 08:00", "2025-12-25 16:00")
        .with_actual_to("2025-12-25 18:00");

    let breakdown = create_calculator().calculate(&request);

    assert_eq!(breakdown.toil, 7 * HOUR + HOUR / 2);
    assert_eq!(breakdown.double, 2 * HOUR);
    assert_eq!(breakdown.higher_rate, 7 * HOUR + HOUR / 2);
}

#[test]
fn test_custom_calendar_without_holidays() {
    let calculator = Section2Calculator::new(
        Arc::new(BankHolidayCalendar::empty()),
        Section2Options::default(),
    );
    let request = Section2Request::new("2025-12-25 08:00", "2025-12-25 16:00");

    let breakdown = calculator.calculate(&request);

    // Christmas Day 2025 is a Thursday
    assert_zero(&breakdown);
}

// =============================================================================
// SECTION 4: Relief leave
// =============================================================================

#[test]
fn test_relief_leave_flat_method() {
    let options = Section2Options {
        leave_relief_ush_type: LeaveReliefMethod::Flat,
        ..Section2Options::default()
    };
    let calculator = create_calculator();

    let wednesday = request_from_json(json!({
        "from": "2025-10-01 09:00",
        "planned_to": "2025-10-01 17:00",
        "type": "AL (relief)"
    }));
    let breakdown = calculator.calculate_with(&wednesday, &options);
    assert_eq!(breakdown.lower_rate, 7_200_000);
    assert_eq!(breakdown.higher_rate, 0);

    let sunday = request_from_json(json!({
        "from": "2025-10-05 09:00",
        "planned_to": "2025-10-05 17:00",
        "type": "AL (relief)"
    }));
    let breakdown = calculator.calculate_with(&sunday, &options);
    assert_eq!(breakdown.lower_rate, 0);
    assert_eq!(breakdown.higher_rate, 7_200_000);
}

#[test]
fn test_relief_leave_average_from_history() {
    let request = request_from_json(json!({
        "from": "2025-10-01 09:00",
        "planned_to": "2025-10-01 17:00",
        "type": "Absent (TOIL relief)",
        "employment_id": 3,
        "shifts": [{
            "employment_id": 3,
            "date": "2025-09-20",
            "from": "2025-09-20 09:00",
            "planned_to": "2025-09-20 17:00",
            "actual_to": "2025-09-20 17:00",
            "type": "Normal",
            "actual_hours": 10 * HOUR,
            "lower_rate": 2 * HOUR,
            "higher_rate": HOUR
        }]
    }));

    let breakdown = create_calculator().calculate(&request);

    // 7.5h paid at the historical 20% lower and 10% higher proportions
    assert_eq!(breakdown.lower_rate, 5_400_000);
    assert_eq!(breakdown.higher_rate, 2_700_000);
    assert_eq!(breakdown.absent_hours, 7 * HOUR + HOUR / 2);
}

// =============================================================================
// SECTION 5: Input normalization and rejected input
// =============================================================================

#[test]
fn test_actual_to_fallback() {
    let calculator = create_calculator();
    let expected =
        calculator.calculate(&Section2Request::new("2025-10-02 12:00", "2025-10-02 22:00"));

    for actual_to in [Value::Null, json!("")] {
        let request = request_from_json(json!({
            "from": "2025-10-02 12:00",
            "planned_to": "2025-10-02 22:00",
            "actual_to": actual_to
        }));
        assert_eq!(calculator.calculate(&request), expected);
    }
}

#[test]
fn test_timestamp_formats_agree() {
    let calculator = create_calculator();
    let expected =
        calculator.calculate(&Section2Request::new("2025-10-02 12:00", "2025-10-02 22:00"));

    let iso = Section2Request::new("2025-10-02T12:00:00", "2025-10-02T22:00:00.000Z");
    let epoch = Section2Request::new(1_759_406_400_000i64, 1_759_442_400_000i64);
    let native = Section2Request::new(
        make_datetime("2025-10-02 12:00:00"),
        make_datetime("2025-10-02 22:00:00"),
    );

    assert_eq!(calculator.calculate(&iso), expected);
    assert_eq!(calculator.calculate(&epoch), expected);
    assert_eq!(calculator.calculate(&native), expected);
}

#[test]
fn test_invalid_timestamps_give_zero() {
    let calculator = create_calculator();

    for (from, planned_to) in [
        ("2025-13-02 12:00", "2025-10-02 22:00"),
        ("yesterday", "2025-10-02 22:00"),
        ("2025-10-02 12:00", ""),
    ] {
        let request = Section2Request::new(from, planned_to).with_type(ShiftType::Ot);
        assert_zero(&calculator.calculate(&request));
    }
}

#[test]
fn test_out_of_order_timestamps_give_zero() {
    let calculator = create_calculator();

    let reversed = Section2Request::new("2025-10-02 22:00", "2025-10-02 12:00")
        .with_type(ShiftType::Ot);
    assert_zero(&calculator.calculate(&reversed));

    let early_finish = Section2Request::new("2025-10-02 12:00", "2025-10-02 22:00")
        .with_actual_to("2025-10-02 20:00");
    assert_zero(&calculator.calculate(&early_finish));
}

#[test]
fn test_unrecognized_shift_types_are_accepted() {
    let calculator = create_calculator();

    let training = request_from_json(json!({
        "from": "2025-12-25 09:00",
        "planned_to": "2025-12-25 17:00",
        "actual_to": "2025-12-25 19:00",
        "type": "Training"
    }));
    assert_eq!(training.shift_type, ShiftType::Unrecognized);
    assert_zero(&calculator.calculate(&training));
}

#[test]
fn test_unrecognized_history_has_no_effect() {
    let options = Section2Options {
        weekly_hours: 108_000_000,
        ..Section2Options::default()
    };
    let calculator = create_calculator();
    let training = json!({
        "date": "2025-09-29",
        "from": "2025-09-29 09:00",
        "planned_to": "2025-09-29 17:00",
        "actual_to": "2025-09-29 19:00",
        "type": "Training",
        "overrun_type": "OT",
        "actual_hours": 10 * HOUR,
        "lower_rate": 5 * HOUR,
        "higher_rate": 5 * HOUR
    });

    let overtime = |shifts: Vec<Value>| {
        request_from_json(json!({
            "from": "2025-10-02 09:00",
            "planned_to": "2025-10-02 13:00",
            "type": "OT",
            "shifts": shifts
        }))
    };
    let breakdown = calculator.calculate_with(&overtime(vec![training.clone()]), &options);
    assert_eq!(breakdown, calculator.calculate_with(&overtime(vec![]), &options));
    assert_eq!(breakdown.flat, 4 * HOUR);
    assert_eq!(breakdown.time_and_half, 0);

    let relief = |shifts: Vec<Value>| {
        request_from_json(json!({
            "from": "2025-10-01 09:00",
            "planned_to": "2025-10-01 17:00",
            "type": "AL (relief)",
            "shifts": shifts
        }))
    };
    let worked = history_shift("2025-09-22", "09:00", "17:00", "Normal");
    assert_eq!(
        calculator.calculate(&relief(vec![worked.clone(), training])),
        calculator.calculate(&relief(vec![worked]))
    );
}

// =============================================================================
// SECTION 6: Entry points and configuration
// =============================================================================

#[test]
fn test_free_function_matches_calculator() {
    let request = Section2Request::new("2025-10-04 20:00", "2025-10-05 08:00")
        .with_type(ShiftType::Ot);
    let calculator = create_calculator();

    let direct = calculate_section2(
        &request,
        calculator.options(),
        &BankHolidayCalendar::england_and_wales(),
    );

    assert_eq!(direct, calculator.calculate(&request));
    assert_eq!(direct, calculator.calculate(&request), "calculation is not idempotent");
}

#[test]
fn test_missing_config_directory() {
    assert!(Section2Calculator::from_config("./config/missing").is_err());
}

#[test]
fn test_breakdown_serializes_all_fields() {
    let breakdown = create_calculator().calculate(&Section2Request::new(
        "2025-10-02 12:00",
        "2025-10-02 22:00",
    ));

    let value = serde_json::to_value(breakdown).unwrap();
    for field in [
        "flat",
        "time_and_half",
        "double",
        "toil",
        "absent_hours",
        "lower_rate",
        "higher_rate",
    ] {
        assert!(value.get(field).is_some(), "missing field {}", field);
    }
    assert_eq!(value["lower_rate"], json!(7_200_000));
}

#[test]
fn test_calculator_shared_across_threads() {
    let calculator = create_calculator();
    let request = Section2Request::new("2025-10-02 12:00", "2025-10-02 22:00");
    let expected = calculator.calculate(&request);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let calculator = calculator.clone();
                let request = request.clone();
                scope.spawn(move || calculator.calculate(&request))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
