use tally_core::{Completion, CoreError};
use tally_domain::{Category, CategoryDraft, NamedEntity};

use crate::cli::core::{parse_id, split_flags, CommandError, CommandResult};
use crate::cli::io;
use crate::cli::output::swatch;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::cli::table::{Column, Table};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "categories",
            "List categories with budgets",
            "categories",
            cmd_categories,
        ),
        CommandEntry::new(
            "category-add",
            "Create a category",
            "category-add <name> [--budget <amount>] [--color rrggbb]",
            cmd_category_add,
        ),
        CommandEntry::new(
            "category-edit",
            "Rename a category or change its budget or color",
            "category-edit <id> <name> [--budget <amount>|none] [--color rrggbb]",
            cmd_category_edit,
        ),
        CommandEntry::new(
            "category-delete",
            "Delete a category",
            "category-delete <id> [--yes]",
            cmd_category_delete,
        ),
    ]
}

fn cmd_categories(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let store = context.category_store()?;
    context.block_on(store.refresh())?;

    let mut categories = store.items();
    if categories.is_empty() {
        io::print_info("No categories yet. Add one with `category-add <name>`.");
        return Ok(());
    }
    categories.sort_by_key(|category| category.name().to_lowercase());

    let mut table = Table::new(vec![
        Column::right("ID"),
        Column::left("Name").max_width(32),
        Column::right("Budget"),
        Column::left("Color"),
    ]);
    for category in &categories {
        table.push(category_row(context, category));
    }
    io::print_info(table.render());
    Ok(())
}

fn category_row(context: &ShellContext, category: &Category) -> Vec<String> {
    let color = category.display_color();
    vec![
        category.id.to_string(),
        category.name.clone(),
        category
            .monthly_budget
            .map(|budget| context.money(budget))
            .unwrap_or_else(|| "-".into()),
        format!("{} {color}", swatch("■", color)),
    ]
}

fn cmd_category_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, flags) = split_flags(args)?;
    if positional.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: category-add <name> [--budget <amount>] [--color rrggbb]".into(),
        ));
    }
    let mut draft = CategoryDraft::new(positional.join(" ")).with_budget(flags.budget);
    if let Some(color) = flags.color {
        draft = draft.with_color(color);
    }

    let store = context.category_store()?;
    let completion = context.block_on(store.create(&draft))?;
    report_saved(&completion, "created", store.len());
    Ok(())
}

fn cmd_category_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, flags) = split_flags(args)?;
    let [id, name @ ..] = positional.as_slice() else {
        return Err(CommandError::InvalidArguments(
            "usage: category-edit <id> <name> [--budget <amount>|none] [--color rrggbb]".into(),
        ));
    };
    let id = parse_id(id, "category")?;

    let store = context.category_store()?;
    context.block_on(store.refresh())?;
    let mut draft = store
        .get(id)
        .map(|existing| existing.to_draft())
        .ok_or_else(|| CoreError::NotFound(format!("category {id}")))?;
    if !name.is_empty() {
        draft.name = name.join(" ");
    }
    if flags.clear_budget {
        draft.monthly_budget = None;
    } else if flags.budget.is_some() {
        draft.monthly_budget = flags.budget;
    }
    if let Some(color) = flags.color {
        draft.color = color;
    }

    let completion = context.block_on(store.update(id, &draft))?;
    report_saved(&completion, "updated", store.len());
    Ok(())
}

fn cmd_category_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (positional, flags) = split_flags(args)?;
    let [id] = positional.as_slice() else {
        return Err(CommandError::InvalidArguments(
            "usage: category-delete <id> [--yes]".into(),
        ));
    };
    let id = parse_id(id, "category")?;

    let confirmation = context.confirm_delete(&format!("category #{id}"), flags.yes)?;
    let store = context.category_store()?;
    let completion = context.block_on(store.remove(id, confirmation))?;
    io::print_success(format!("Category #{} deleted.", completion.value));
    if !completion.resynced {
        io::print_warning("Saved, but the category list could not be refreshed.");
    }
    Ok(())
}

fn report_saved(completion: &Completion<Category>, verb: &str, total: usize) {
    let category = &completion.value;
    io::print_success(format!(
        "Category #{} `{}` {verb}.",
        category.id, category.name
    ));
    if completion.resynced {
        io::print_info(format!("{total} categories on the server."));
    } else {
        io::print_warning("Saved, but the category list could not be refreshed.");
    }
}
