// ABOUTME: Criterion benchmarks for meal-plan generation, redistribution and persistence
// ABOUTME: Measures per-call latency over the default slot tables and the in-memory store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Macro Ledger contributors

//! Criterion benchmarks for the planning engine.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use chrono::{Days, NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use macro_ledger::config::MealPlanConfig;
use macro_ledger::intelligence::{redistribute, MealPlanGenerator};
use macro_ledger::storage::schema::{load_planned_days, save_planned_days};
use macro_ledger::storage::InMemoryStore;
use macro_ledger_core::models::{DayType, MacroSet, PlannedDay};

fn bench_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()
}

fn bench_generation(c: &mut Criterion) {
    let config = MealPlanConfig::default();
    let generator = MealPlanGenerator::new(&config);
    let now = bench_date().and_hms_opt(7, 0, 0).unwrap().and_utc();
    let training_time = NaiveTime::from_hms_opt(18, 30, 0);

    let mut group = c.benchmark_group("meal_plan_generation");
    for day_type in DayType::ALL {
        let day = PlannedDay::new(bench_date(), day_type, training_time);
        let budget = MacroSet::new(2500, 180, 250, 80);
        group.bench_with_input(BenchmarkId::from_parameter(day_type), &day, |b, day| {
            b.iter(|| generator.generate(black_box(day), black_box(&budget), now));
        });
    }
    group.finish();
}

fn bench_redistribution(c: &mut Criterion) {
    let config = MealPlanConfig::default();
    let now = bench_date().and_hms_opt(7, 0, 0).unwrap().and_utc();
    let day = PlannedDay::new(bench_date(), DayType::Training, NaiveTime::from_hms_opt(18, 30, 0));
    let budget = MacroSet::new(2500, 180, 250, 80);
    let mut meals = MealPlanGenerator::new(&config)
        .generate(&day, &budget, now)
        .into_meals();
    meals[0].consumed = Some(MacroSet::new(620, 40, 70, 18));

    c.bench_function("redistribute_training_day", |b| {
        b.iter(|| redistribute(black_box(&meals), black_box(&budget)));
    });
}

fn bench_persistence(c: &mut Criterion) {
    let mut group = c.benchmark_group("planned_days_persistence");
    for count in [7_u64, 90, 365] {
        let days: Vec<PlannedDay> = (0..count)
            .map(|offset| {
                let date = bench_date().checked_add_days(Days::new(offset)).unwrap();
                PlannedDay::new(date, DayType::Rest, None)
            })
            .collect();
        let store = InMemoryStore::new();

        group.throughput(Throughput::Elements(count));
        group.bench_with_input(BenchmarkId::new("save_load", count), &days, |b, days| {
            b.iter(|| {
                save_planned_days(&store, days.clone()).unwrap();
                black_box(load_planned_days(&store).unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generation, bench_redistribution, bench_persistence);
criterion_main!(benches);
