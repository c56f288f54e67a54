//! Command-line surface of the `duit` binary.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

use duit_domain::{CategoryKind, FilterCriteria, TransactionKind};

pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| "date must use YYYY-MM-DD format".to_string())
}

#[derive(Debug, Parser)]
#[command(
    name = "duit",
    version,
    about = "Personal finance tracking: budgets, transactions and statistics"
)]
pub struct Cli {
    /// Root directory for books, backups and configuration.
    #[arg(long, global = true, value_name = "PATH")]
    pub data_dir: Option<PathBuf>,

    /// Book to operate on. Defaults to the last opened book.
    #[arg(long, global = true, value_name = "NAME")]
    pub book: Option<String>,

    /// Print machine-readable JSON instead of tables.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage budget allocations.
    Budget {
        #[command(subcommand)]
        command: BudgetCommand,
    },
    /// Manage income and expense entries.
    Tx {
        #[command(subcommand)]
        command: TxCommand,
    },
    /// Manage category reference data.
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },
    /// Show budget totals, recent activity and budget alerts.
    Summary {
        /// Also compare tracked budget spend against transaction sums.
        #[arg(long)]
        reconcile: bool,
    },
    /// Show statistics over the book's transactions.
    Stats {
        #[command(subcommand)]
        command: StatsCommand,
    },
    /// Manage stored books.
    Book {
        #[command(subcommand)]
        command: BookCommand,
    },
    /// Seed the active book with bundled sample data.
    Demo,
}

#[derive(Debug, Subcommand)]
pub enum BudgetCommand {
    /// Create a budget for a category. New budgets start with nothing spent.
    Add { category: String, amount: f64 },
    /// List budgets in insertion order.
    List,
    /// Replace a budget's category and allocation, keeping its spend.
    Edit {
        id: u64,
        category: String,
        amount: f64,
    },
    /// Record consumption against a budget.
    Spend { id: u64, amount: f64 },
    /// Delete a budget by id.
    Delete { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum TxCommand {
    /// Record a transaction. The date defaults to today.
    Add {
        kind: KindArg,
        amount: f64,
        category: String,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List transactions newest-first, optionally filtered.
    List {
        #[arg(long)]
        kind: Option<KindArg>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
    /// Replace every field of a transaction.
    Edit {
        id: u64,
        kind: KindArg,
        amount: f64,
        category: String,
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a transaction by id.
    Delete { id: u64 },
}

#[derive(Debug, Subcommand)]
pub enum CategoryCommand {
    /// List categories in insertion order.
    List,
    /// Create a category.
    Add {
        name: String,
        #[arg(value_enum, default_value_t = CategoryKindArg::Expense)]
        kind: CategoryKindArg,
    },
}

#[derive(Debug, Subcommand)]
pub enum StatsCommand {
    /// Income vs expense per calendar month.
    Monthly {
        /// Year to report on. Defaults to the current year.
        #[arg(long)]
        year: Option<i32>,
    },
    /// Expense totals grouped by category.
    Categories {
        #[arg(long, value_parser = parse_date)]
        from: Option<NaiveDate>,
        #[arg(long, value_parser = parse_date)]
        to: Option<NaiveDate>,
    },
}

#[derive(Debug, Subcommand)]
pub enum BookCommand {
    /// List stored books with summary figures.
    List,
    /// Make a book the default for subsequent commands.
    Use { name: String },
    /// Snapshot the active book into the backup directory.
    Backup {
        #[arg(long)]
        note: Option<String>,
    },
    /// List backups of the active book, newest first.
    Backups,
}

/// Transaction kind as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

/// Category kind as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryKindArg {
    Income,
    Expense,
    Both,
}

impl From<CategoryKindArg> for CategoryKind {
    fn from(value: CategoryKindArg) -> Self {
        match value {
            CategoryKindArg::Income => CategoryKind::Income,
            CategoryKindArg::Expense => CategoryKind::Expense,
            CategoryKindArg::Both => CategoryKind::Both,
        }
    }
}

/// Assembles filter criteria from the optional `tx list` flags.
pub fn criteria_from_flags(
    kind: Option<KindArg>,
    category: Option<&str>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> FilterCriteria {
    let mut criteria = FilterCriteria::default();
    if let Some(kind) = kind {
        criteria = criteria.with_kind(kind.into());
    }
    if let Some(category) = category {
        criteria = criteria.with_category(category);
    }
    if let Some(from) = from {
        criteria = criteria.from_date(from);
    }
    if let Some(to) = to {
        criteria = criteria.until_date(to);
    }
    criteria
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse_from<I, T>(args: I) -> Result<Cli, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Cli::try_parse_from(args)
    }

    #[test]
    fn parses_tx_add_with_date_and_description() {
        let cli = parse_from([
            "duit",
            "tx",
            "add",
            "expense",
            "150000",
            "Food",
            "--date",
            "2023-04-01",
            "--description",
            "Lunch",
        ])
        .unwrap();
        match cli.command {
            Commands::Tx {
                command:
                    TxCommand::Add {
                        kind,
                        amount,
                        category,
                        date,
                        description,
                    },
            } => {
                assert_eq!(kind, KindArg::Expense);
                assert_eq!(amount, 150_000.0);
                assert_eq!(category, "Food");
                assert_eq!(date, Some(parse_date("2023-04-01").unwrap()));
                assert_eq!(description, "Lunch");
            }
            other => panic!("unexpected parse: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        let err = parse_from(["duit", "tx", "list", "--from", "01/04/2023"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }

    #[test]
    fn criteria_flags_map_onto_domain_filters() {
        let criteria = criteria_from_flags(
            Some(KindArg::Income),
            Some("Salary"),
            Some(parse_date("2023-01-01").unwrap()),
            None,
        );
        assert!(!criteria.is_unbounded());
        assert_eq!(criteria.end_date, None);
    }

    #[test]
    fn no_flags_mean_unbounded_criteria() {
        let criteria = criteria_from_flags(None, None, None, None);
        assert!(criteria.is_unbounded());
    }

    #[test]
    fn global_flags_are_accepted_after_the_subcommand() {
        let cli = parse_from(["duit", "budget", "list", "--json", "--book", "household"]).unwrap();
        assert!(cli.json);
        assert_eq!(cli.book.as_deref(), Some("household"));
    }
}
