use colored::Colorize;
use tally_core::{aggregate, budget_usage, ExpenseScope, SummaryService};

use crate::cli::core::{parse_period, CommandResult};
use crate::cli::io;
use crate::cli::output::{preferences, section as output_section, swatch};
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Column, Table};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "summary",
            "Spending per category for a month (default: current)",
            "summary [YYYY-MM]",
            cmd_summary,
        ),
        CommandEntry::new(
            "budgets",
            "Compare monthly budgets with spending",
            "budgets [YYYY-MM]",
            cmd_budgets,
        ),
    ]
}

fn cmd_summary(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let period = parse_period(args.first().copied())?;
    context.require_session()?;
    let api = context.api();
    let summary = context.block_on(SummaryService::for_month(api.as_ref(), period))?;

    output_section(format!("Summary for {period}"));
    if summary.is_empty() {
        io::print_info(format!("No expenses recorded for {period}."));
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::left("Category").max_width(32),
        Column::right("Amount"),
        Column::right("Share"),
    ]);
    for entry in summary.sorted_by_amount() {
        table.push(vec![
            format!("{} {}", swatch("■", &entry.color), entry.name),
            context.money(entry.amount),
            format!("{:.1}%", entry.share_of(summary.total)),
        ]);
    }
    io::print_info(table.render());
    io::print_info(format!("Total spent: {}", context.money(summary.total)));
    Ok(())
}

fn cmd_budgets(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let period = parse_period(args.first().copied())?;
    let categories = context.category_store()?;
    let expenses = context.expense_store(ExpenseScope::Month(period))?;
    let (listed, spent) =
        context.block_on(async { tokio::join!(categories.refresh(), expenses.refresh()) });
    listed?;
    spent?;

    let summary = expenses.with_items(aggregate);
    let usage = categories.with_items(|items| budget_usage(items, &summary));

    output_section(format!("Budgets for {period}"));
    if usage.is_empty() {
        io::print_info("No category has a monthly budget.");
        io::print_hint("Set one with `category-edit <id> <name> --budget <amount>`.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::left("Category").max_width(32),
        Column::right("Budget"),
        Column::right("Spent"),
        Column::right("Remaining"),
        Column::right("Used"),
    ]);
    let color = preferences().color;
    for line in &usage {
        let used = format!("{:.0}%", line.percent_used());
        let used = match (line.over_budget, color) {
            (true, true) => format!("{used} OVER").bright_red().to_string(),
            (true, false) => format!("{used} OVER"),
            (false, _) => used,
        };
        table.push(vec![
            line.name.clone(),
            context.money(line.budget),
            context.money(line.spent),
            context.money(line.remaining),
            used,
        ]);
    }
    io::print_info(table.render());
    let over = usage.iter().filter(|line| line.over_budget).count();
    if over > 0 {
        let noun = if over == 1 { "category" } else { "categories" };
        io::print_warning(format!("{over} {noun} over budget."));
    }
    Ok(())
}
