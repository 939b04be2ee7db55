use tally_core::{Completion, ExpenseScope};
use tally_domain::{Amounted, Expense, ExpenseDraft, YearMonth};

use crate::cli::core::{
    parse_amount, parse_date, parse_id, split_flags, CommandError, CommandResult,
};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Column, Table};

const ADD_USAGE: &str = "expense-add <category-id> <amount> <YYYY-MM-DD> <description...>";
const EDIT_USAGE: &str =
    "expense-edit <id> <category-id> <amount> <YYYY-MM-DD> <description...>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "expenses",
            "List expenses, optionally for one month",
            "expenses [YYYY-MM]",
            cmd_expenses,
        ),
        CommandEntry::new("expense-add", "Record an expense", ADD_USAGE, cmd_expense_add),
        CommandEntry::new(
            "expense-edit",
            "Change an expense or move it to another category",
            EDIT_USAGE,
            cmd_expense_edit,
        ),
        CommandEntry::new(
            "expense-delete",
            "Delete an expense",
            "expense-delete <id> [--yes]",
            cmd_expense_delete,
        ),
    ]
}

fn cmd_expenses(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let scope = match args.first() {
        Some(raw) => ExpenseScope::Month(raw.parse::<YearMonth>().map_err(|err| {
            CommandError::InvalidArguments(format!("{err} (use YYYY-MM)"))
        })?),
        None => ExpenseScope::All,
    };
    let store = context.expense_store(scope)?;
    context.block_on(store.refresh())?;

    let mut expenses = store.items();
    if expenses.is_empty() {
        match scope {
            ExpenseScope::Month(period) => {
                io::print_info(format!("No expenses recorded for {period}."))
            }
            ExpenseScope::All => io::print_info("No expenses recorded yet."),
        }
        return Ok(());
    }
    expenses.sort_by(|a, b| {
        b.expense_date
            .cmp(&a.expense_date)
            .then_with(|| b.id.cmp(&a.id))
    });

    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Date"),
        Column::left("Description").max_width(40),
        Column::left("Category").max_width(24),
        Column::right("Cat ID"),
        Column::right("Amount"),
    ]);
    for expense in &expenses {
        table.push(vec![
            expense.id.to_string(),
            expense.expense_date.format("%Y-%m-%d").to_string(),
            expense.description.clone(),
            expense.category_name().unwrap_or("-").to_string(),
            expense
                .category_id()
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".into()),
            context.money(expense.amount),
        ]);
    }
    io::print_info(table.render());
    let total: f64 = expenses.iter().map(Amounted::amount).sum();
    io::print_info(format!(
        "{} expense(s), total {}",
        expenses.len(),
        context.money(total)
    ));
    Ok(())
}

/// Parses `<category-id> <amount> <date> <description...>`.
fn parse_draft(args: &[&str], usage: &str) -> Result<ExpenseDraft, CommandError> {
    let [category_id, amount, date, description @ ..] = args else {
        return Err(CommandError::InvalidArguments(format!("usage: {usage}")));
    };
    if description.is_empty() {
        return Err(CommandError::InvalidArguments(format!("usage: {usage}")));
    }
    Ok(ExpenseDraft::new(
        parse_id(category_id, "category")?,
        description.join(" "),
        parse_amount(amount)?,
        parse_date(date)?,
    ))
}

fn cmd_expense_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let draft = parse_draft(args, ADD_USAGE)?;
    let store = context.expense_store(ExpenseScope::All)?;
    let completion = context.block_on(store.create(&draft))?;
    report_saved(context, &completion, "recorded");
    Ok(())
}

fn cmd_expense_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((id, rest)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(format!("usage: {EDIT_USAGE}")));
    };
    let id = parse_id(id, "expense")?;
    let draft = parse_draft(rest, EDIT_USAGE)?;
    let store = context.expense_store(ExpenseScope::All)?;
    let completion = context.block_on(store.update(id, &draft))?;
    report_saved(context, &completion, "updated");
    Ok(())
}

fn cmd_expense_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, flags) = split_flags(args)?;
    let [id] = positional.as_slice() else {
        return Err(CommandError::InvalidArguments(
            "usage: expense-delete <id> [--yes]".into(),
        ));
    };
    let id = parse_id(id, "expense")?;

    let confirmation = context.confirm_delete(&format!("expense #{id}"), flags.yes)?;
    let store = context.expense_store(ExpenseScope::All)?;
    let completion = context.block_on(store.remove(id, confirmation))?;
    io::print_success(format!("Expense #{} deleted.", completion.value));
    if !completion.resynced {
        io::print_warning("Saved, but the expense list could not be refreshed.");
    }
    Ok(())
}

fn report_saved(context: &ShellContext, completion: &Completion<Expense>, verb: &str) {
    let expense = &completion.value;
    io::print_success(format!(
        "Expense #{} {verb}: {} on {} ({}) in {}.",
        expense.id,
        context.money(expense.amount),
        expense.expense_date,
        expense.description,
        expense.category_name().unwrap_or("no category"),
    ));
    if !completion.resynced {
        io::print_warning("Saved, but the expense list could not be refreshed.");
    }
}
