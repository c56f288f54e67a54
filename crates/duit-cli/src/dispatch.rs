//! Maps parsed commands onto the core services and prints the results.

use chrono::{Datelike, Local, NaiveDate};
use colored::Colorize;
use serde::Serialize;

use duit_core::{
    storage::BookStorage, BudgetService, CategoryService, StatsService, SummaryService,
    TransactionService,
};
use duit_domain::{
    sample::sample_book, BudgetDraft, CategoryDraft, Displayable, FilterCriteria, RecordId,
    TransactionDraft,
};

use crate::cli::{
    criteria_from_flags, BookCommand, BudgetCommand, CategoryCommand, Cli, Commands, StatsCommand,
    TxCommand,
};
use crate::context::AppContext;
use crate::error::{CliError, CliResult};
use crate::output::{self, Column};

pub fn run(cli: Cli) -> CliResult<()> {
    let mut ctx = AppContext::bootstrap(cli.data_dir, cli.book)?;
    let json = cli.json;
    match cli.command {
        Commands::Budget { command } => run_budget(&mut ctx, command, json),
        Commands::Tx { command } => run_tx(&mut ctx, command, json),
        Commands::Category { command } => run_category(&mut ctx, command, json),
        Commands::Summary { reconcile } => run_summary(&ctx, reconcile, json),
        Commands::Stats { command } => run_stats(&ctx, command, json),
        Commands::Book { command } => run_book(&mut ctx, command, json),
        Commands::Demo => run_demo(&mut ctx, json),
    }
}

fn run_budget(ctx: &mut AppContext, command: BudgetCommand, json: bool) -> CliResult<()> {
    match command {
        BudgetCommand::Add { category, amount } => {
            let mut book = ctx.load_or_new()?;
            let budget = BudgetService::create(&mut book, BudgetDraft::new(category, amount))?;
            ctx.save(&book)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&budget)?);
            } else {
                println!(
                    "Created budget {} for {} ({})",
                    budget.id,
                    budget.category,
                    output::format_amount(budget.amount, &ctx.config.currency)
                );
            }
            Ok(())
        }
        BudgetCommand::List => {
            let book = ctx.load_or_new()?;
            let budgets = BudgetService::list(&book);
            if json {
                println!("{}", serde_json::to_string_pretty(budgets)?);
                return Ok(());
            }
            if budgets.is_empty() {
                println!("No budgets yet.");
                return Ok(());
            }
            let columns = [
                Column::right("ID"),
                Column::left("Category"),
                Column::right("Allocated"),
                Column::right("Spent"),
                Column::right("Remaining"),
                Column::right("Usage"),
            ];
            let currency = ctx.config.currency.as_str();
            let rows: Vec<Vec<String>> = budgets
                .iter()
                .map(|budget| {
                    vec![
                        budget.id.to_string(),
                        budget.category.clone(),
                        output::format_amount(budget.amount, currency),
                        output::format_amount(budget.spent, currency),
                        output::format_amount(budget.remaining(), currency),
                        output::format_usage(budget.percent_spent(), budget.usage_level()),
                    ]
                })
                .collect();
            output::print_lines(&output::render_table(&columns, &rows));
            Ok(())
        }
        BudgetCommand::Edit {
            id,
            category,
            amount,
        } => {
            let mut book = ctx.load_or_new()?;
            let budget = BudgetService::update(
                &mut book,
                RecordId(id),
                BudgetDraft::new(category, amount),
            )?;
            ctx.save(&book)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&budget)?);
            } else {
                println!("Updated budget {}", budget.id);
            }
            Ok(())
        }
        BudgetCommand::Spend { id, amount } => {
            let mut book = ctx.load_or_new()?;
            let budget = BudgetService::record_spend(&mut book, RecordId(id), amount)?;
            ctx.save(&book)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&budget)?);
            } else {
                println!(
                    "Budget {} ({}) now at {}",
                    budget.id,
                    budget.category,
                    output::format_usage(budget.percent_spent(), budget.usage_level())
                );
            }
            Ok(())
        }
        BudgetCommand::Delete { id } => {
            let mut book = ctx.load_or_new()?;
            BudgetService::delete(&mut book, RecordId(id))?;
            ctx.save(&book)?;
            if !json {
                println!("Deleted budget {}", RecordId(id));
            }
            Ok(())
        }
    }
}

fn run_tx(ctx: &mut AppContext, command: TxCommand, json: bool) -> CliResult<()> {
    match command {
        TxCommand::Add {
            kind,
            amount,
            category,
            date,
            description,
        } => {
            let mut book = ctx.load_or_new()?;
            let date = date.unwrap_or_else(today);
            let draft = TransactionDraft::new(kind.into(), amount, category, date, description);
            let transaction = TransactionService::create(&mut book, draft)?;
            ctx.save(&book)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&transaction)?);
            } else {
                println!(
                    "Recorded {} {} of {} on {}",
                    transaction.kind,
                    transaction.id,
                    output::format_amount(transaction.amount, &ctx.config.currency),
                    transaction.date
                );
            }
            Ok(())
        }
        TxCommand::List {
            kind,
            category,
            from,
            to,
        } => {
            let book = ctx.load_or_new()?;
            let criteria = criteria_from_flags(kind, category.as_deref(), from, to);
            let transactions =
                TransactionService::filter(TransactionService::list(&book), &criteria);
            if json {
                println!("{}", serde_json::to_string_pretty(&transactions)?);
                return Ok(());
            }
            if transactions.is_empty() {
                println!("No matching transactions.");
                return Ok(());
            }
            print_transactions(&transactions, &ctx.config.currency);
            Ok(())
        }
        TxCommand::Edit {
            id,
            kind,
            amount,
            category,
            date,
            description,
        } => {
            let mut book = ctx.load_or_new()?;
            let date = date.unwrap_or_else(today);
            let draft = TransactionDraft::new(kind.into(), amount, category, date, description);
            let transaction = TransactionService::update(&mut book, RecordId(id), draft)?;
            ctx.save(&book)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&transaction)?);
            } else {
                println!("Updated transaction {}", transaction.id);
            }
            Ok(())
        }
        TxCommand::Delete { id } => {
            let mut book = ctx.load_or_new()?;
            TransactionService::delete(&mut book, RecordId(id))?;
            ctx.save(&book)?;
            if !json {
                println!("Deleted transaction {}", RecordId(id));
            }
            Ok(())
        }
    }
}

fn run_category(ctx: &mut AppContext, command: CategoryCommand, json: bool) -> CliResult<()> {
    match command {
        CategoryCommand::List => {
            let book = ctx.load_or_new()?;
            let categories = CategoryService::list(&book);
            if json {
                println!("{}", serde_json::to_string_pretty(categories)?);
                return Ok(());
            }
            if categories.is_empty() {
                println!("No categories yet.");
                return Ok(());
            }
            let columns = [Column::right("ID"), Column::left("Name"), Column::left("Kind")];
            let rows: Vec<Vec<String>> = categories
                .iter()
                .map(|category| {
                    vec![
                        category.id.to_string(),
                        category.name.clone(),
                        category.kind.to_string(),
                    ]
                })
                .collect();
            output::print_lines(&output::render_table(&columns, &rows));
            Ok(())
        }
        CategoryCommand::Add { name, kind } => {
            let mut book = ctx.load_or_new()?;
            let category = CategoryService::create(&mut book, CategoryDraft::new(name, kind.into()))?;
            ctx.save(&book)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&category)?);
            } else {
                println!("Created category {}", category.display_label());
            }
            Ok(())
        }
    }
}

fn run_summary(ctx: &AppContext, reconcile: bool, json: bool) -> CliResult<()> {
    let book = ctx.load_or_new()?;
    let dashboard = SummaryService::dashboard(&book, ctx.config.recent_transaction_limit);

    if json {
        #[derive(Serialize)]
        struct SummaryView {
            #[serde(flatten)]
            dashboard: duit_core::DashboardSummary,
            #[serde(skip_serializing_if = "Option::is_none")]
            reconciliation: Option<Vec<duit_core::CategorySpend>>,
        }
        let view = SummaryView {
            dashboard,
            reconciliation: reconcile.then(|| SummaryService::category_spend(&book)),
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let currency = ctx.config.currency.as_str();
    println!("{}", book.name.bold());
    println!(
        "Allocated {}  Spent {}  Remaining {}",
        output::format_amount(dashboard.totals.allocated, currency),
        output::format_amount(dashboard.totals.spent, currency),
        output::format_amount(dashboard.totals.remaining, currency),
    );
    println!(
        "Income {}  Expense {}  Net {}",
        output::format_amount(dashboard.total_income, currency),
        output::format_amount(dashboard.total_expense, currency),
        output::format_amount(dashboard.net, currency),
    );

    if !dashboard.warnings.is_empty() {
        println!();
        println!("{}", "Budget alerts".bold());
        let columns = [
            Column::left("Category"),
            Column::right("Spent"),
            Column::right("Allocated"),
            Column::right("Usage"),
        ];
        let rows: Vec<Vec<String>> = dashboard
            .warnings
            .iter()
            .map(|alert| {
                vec![
                    alert.category.clone(),
                    output::format_amount(alert.spent, currency),
                    output::format_amount(alert.allocated, currency),
                    output::format_usage(alert.percent_spent, alert.level),
                ]
            })
            .collect();
        output::print_lines(&output::render_table(&columns, &rows));
    }

    if !dashboard.recent_transactions.is_empty() {
        println!();
        println!("{}", "Recent transactions".bold());
        print_transactions(&dashboard.recent_transactions, currency);
    }

    if reconcile {
        println!();
        println!("{}", "Tracked vs derived spend".bold());
        let columns = [
            Column::left("Category"),
            Column::right("Tracked"),
            Column::right("From transactions"),
        ];
        let rows: Vec<Vec<String>> = SummaryService::category_spend(&book)
            .iter()
            .map(|row| {
                let tracked = match row.tracked_spent {
                    Some(value) => output::format_amount(value, currency),
                    None => "-".to_string(),
                };
                vec![
                    row.category.clone(),
                    tracked,
                    output::format_amount(row.transaction_spent, currency),
                ]
            })
            .collect();
        output::print_lines(&output::render_table(&columns, &rows));
    }

    Ok(())
}

fn run_stats(ctx: &AppContext, command: StatsCommand, json: bool) -> CliResult<()> {
    let book = ctx.load_or_new()?;
    let currency = ctx.config.currency.as_str();
    match command {
        StatsCommand::Monthly { year } => {
            let year = year.unwrap_or_else(|| today().year());
            let months = StatsService::monthly(&book, year);
            if json {
                println!("{}", serde_json::to_string_pretty(&months)?);
                return Ok(());
            }
            let columns = [
                Column::left("Month"),
                Column::right("Income"),
                Column::right("Expense"),
                Column::right("Net"),
            ];
            let rows: Vec<Vec<String>> = months
                .iter()
                .map(|stat| {
                    vec![
                        format!("{}-{:02}", stat.year, stat.month),
                        output::format_amount(stat.income, currency),
                        output::format_amount(stat.expense, currency),
                        output::format_amount(stat.net(), currency),
                    ]
                })
                .collect();
            output::print_lines(&output::render_table(&columns, &rows));
            Ok(())
        }
        StatsCommand::Categories { from, to } => {
            let mut criteria = FilterCriteria::default();
            if let Some(from) = from {
                criteria = criteria.from_date(from);
            }
            if let Some(to) = to {
                criteria = criteria.until_date(to);
            }
            let stats = StatsService::by_category(&book, &criteria);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            if stats.is_empty() {
                println!("No expenses in the selected range.");
                return Ok(());
            }
            let columns = [Column::left("Category"), Column::right("Total")];
            let rows: Vec<Vec<String>> = stats
                .iter()
                .map(|stat| {
                    vec![
                        stat.category.clone(),
                        output::format_amount(stat.total, currency),
                    ]
                })
                .collect();
            output::print_lines(&output::render_table(&columns, &rows));
            Ok(())
        }
    }
}

fn run_book(ctx: &mut AppContext, command: BookCommand, json: bool) -> CliResult<()> {
    match command {
        BookCommand::List => {
            let entries = ctx.storage.list_book_metadata()?;
            if json {
                #[derive(Serialize)]
                struct BookRow {
                    slug: String,
                    name: String,
                    budgets: usize,
                    transactions: usize,
                    categories: usize,
                    total_allocated: f64,
                    total_remaining: f64,
                    updated_at: String,
                }
                let rows: Vec<BookRow> = entries
                    .into_iter()
                    .map(|meta| BookRow {
                        slug: meta.slug,
                        name: meta.name,
                        budgets: meta.budget_count,
                        transactions: meta.transaction_count,
                        categories: meta.category_count,
                        total_allocated: meta.total_allocated,
                        total_remaining: meta.total_remaining,
                        updated_at: meta.updated_at.to_rfc3339(),
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&rows)?);
                return Ok(());
            }
            if entries.is_empty() {
                println!("No books stored yet.");
                return Ok(());
            }
            let currency = ctx.config.currency.as_str();
            let columns = [
                Column::left("Book"),
                Column::right("Budgets"),
                Column::right("Transactions"),
                Column::right("Allocated"),
                Column::right("Remaining"),
                Column::left("Updated"),
            ];
            let rows: Vec<Vec<String>> = entries
                .iter()
                .map(|meta| {
                    vec![
                        meta.name.clone(),
                        meta.budget_count.to_string(),
                        meta.transaction_count.to_string(),
                        output::format_amount(meta.total_allocated, currency),
                        output::format_amount(meta.total_remaining, currency),
                        meta.updated_at.format("%Y-%m-%d %H:%M").to_string(),
                    ]
                })
                .collect();
            output::print_lines(&output::render_table(&columns, &rows));
            Ok(())
        }
        BookCommand::Use { name } => {
            ctx.set_default_book(&name)?;
            if !json {
                println!("Now using book `{name}`");
            }
            Ok(())
        }
        BookCommand::Backup { note } => {
            let book = ctx.storage.load_book(&ctx.book_name)?;
            let info = ctx
                .storage
                .backup_book(&ctx.book_name, &book, note.as_deref())?;
            if json {
                #[derive(Serialize)]
                struct BackupRow {
                    book: String,
                    file_name: String,
                    note: Option<String>,
                }
                println!(
                    "{}",
                    serde_json::to_string_pretty(&BackupRow {
                        book: info.book,
                        file_name: info.file_name,
                        note: info.note,
                    })?
                );
            } else {
                println!("Backed up `{}` as {}", info.book, info.file_name);
            }
            Ok(())
        }
        BookCommand::Backups => {
            let backups = ctx.storage.list_backups(&ctx.book_name)?;
            if json {
                let names: Vec<&str> = backups
                    .iter()
                    .map(|info| info.file_name.as_str())
                    .collect();
                println!("{}", serde_json::to_string_pretty(&names)?);
                return Ok(());
            }
            if backups.is_empty() {
                println!("No backups for `{}` yet.", ctx.book_name);
                return Ok(());
            }
            let columns = [Column::left("Backup"), Column::left("Created"), Column::left("Note")];
            let rows: Vec<Vec<String>> = backups
                .iter()
                .map(|info| {
                    vec![
                        info.file_name.clone(),
                        info.created_at
                            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_default(),
                        info.note.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            output::print_lines(&output::render_table(&columns, &rows));
            Ok(())
        }
    }
}

fn run_demo(ctx: &mut AppContext, json: bool) -> CliResult<()> {
    if ctx.storage.load_book(&ctx.book_name).is_ok() {
        return Err(CliError::Usage(format!(
            "book `{}` already exists; pick another with --book",
            ctx.book_name
        )));
    }

    let mut book = sample_book();
    book.name = ctx.book_name.clone();
    ctx.save(&book)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&SummaryService::dashboard(
                &book,
                ctx.config.recent_transaction_limit
            ))?
        );
    } else {
        println!(
            "Seeded `{}` with {} categories, {} budgets and {} transactions.",
            book.name,
            book.categories.len(),
            book.budgets.len(),
            book.transaction_count()
        );
    }
    Ok(())
}

fn print_transactions(transactions: &[duit_domain::Transaction], currency: &str) {
    let columns = [
        Column::right("ID"),
        Column::left("Date"),
        Column::left("Kind"),
        Column::left("Category"),
        Column::right("Amount"),
        Column::left("Description"),
    ];
    let rows: Vec<Vec<String>> = transactions
        .iter()
        .map(|txn| {
            vec![
                txn.id.to_string(),
                txn.date.to_string(),
                txn.kind.to_string(),
                txn.category.clone(),
                output::format_amount(txn.amount, currency),
                txn.description.clone(),
            ]
        })
        .collect();
    output::print_lines(&output::render_table(&columns, &rows));
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
