use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tally_core::{aggregate, budget_usage};
use tally_domain::{Category, Expense};

fn build_categories(n: i64) -> Vec<Category> {
    (1..=n)
        .map(|id| Category::new(id, format!("Category {id}")).with_budget(500.0))
        .collect()
}

fn build_expenses(categories: &[Category], n: i64) -> Vec<Expense> {
    let day = NaiveDate::from_ymd_opt(2024, 5, 1).expect("date");
    (0..n)
        .map(|i| {
            let expense = Expense::new(i, format!("expense {i}"), (i % 97) as f64 + 0.5, day);
            // every seventh expense has lost its category
            if i % 7 == 0 {
                expense
            } else {
                expense.with_category(categories[(i as usize) % categories.len()].clone())
            }
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let categories = build_categories(40);
    let expenses = build_expenses(&categories, 10_000);

    c.bench_function("aggregate_10k_expenses", |b| {
        b.iter(|| aggregate(black_box(&expenses)))
    });

    let summary = aggregate(&expenses);
    c.bench_function("budget_usage_40_categories", |b| {
        b.iter(|| budget_usage(black_box(&categories), black_box(&summary)))
    });
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
