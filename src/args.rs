//! These structs provide the CLI interface for the duit CLI.

use crate::calendar::YearMonth;
use crate::model::{Amount, TransactionType};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// duit: A command-line tool for tracking personal finances.
///
/// The purpose of this program is to record your income and expense
/// transactions in a finance backend and to render the views of that data:
/// monthly recaps, per-category statistics, month-over-month trends and the
/// daily transaction grid.
///
/// Amounts are masked by default. Pass --show-balance to print them.
///
/// Run `duit init --api-url <URL>` once to point the CLI at your backend.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the duit home directory and initialize the configuration file.
    ///
    /// This is the first command you should run when setting up the duit CLI.
    ///
    /// - Decide what directory you want to store configuration in and pass
    ///   this as --duit-home. By default, it will be $HOME/duit.
    ///
    /// - Get the base URL of your finance backend and pass it as --api-url.
    Init(InitArgs),
    /// Record a new transaction or create a category.
    Add(AddArgs),
    /// Replace the fields of an existing transaction.
    Update(UpdateArgs),
    /// Delete an existing transaction.
    Delete(DeleteArgs),
    /// List transactions or categories.
    List(ListArgs),
    /// Show the monthly recap: totals, counts and the balance.
    Recap(RecapArgs),
    /// Show per-category totals and shares for a month.
    Stats(StatsArgs),
    /// Show the day-by-day grid of a month, missing days included.
    Daily(DailyArgs),
    /// Show everything recorded on a single day.
    Report(ReportArgs),
    /// Show income and expense totals across recent months.
    Trends(TrendsArgs),
    /// Render all views at once, optionally re-rendering as data changes.
    Dashboard(DashboardArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where duit configuration is held. Defaults to ~/duit
    #[arg(long, env = "DUIT_HOME", default_value_t = default_duit_home())]
    duit_home: DisplayPath,

    /// Print actual amounts. Without this flag balances are masked.
    #[arg(long, global = true)]
    show_balance: bool,
}

impl Common {
    pub fn new(log_level: LevelFilter, duit_home: PathBuf, show_balance: bool) -> Self {
        Self {
            log_level,
            duit_home: duit_home.into(),
            show_balance,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn duit_home(&self) -> &DisplayPath {
        &self.duit_home
    }

    pub fn show_balance(&self) -> bool {
        self.show_balance
    }
}

/// Args for the `duit init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The base URL of the finance backend. It looks like this:
    /// http://localhost:3001
    #[arg(long)]
    api_url: String,
}

impl InitArgs {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

/// Args for the `duit add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    #[command(subcommand)]
    entity: AddSubcommand,
}

impl AddArgs {
    pub fn entity(&self) -> &AddSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum AddSubcommand {
    /// Record a new income or expense transaction.
    Transaction(AddTransactionArgs),
    /// Create a new category.
    Category(AddCategoryArgs),
}

/// Args for the `duit add transaction` command.
#[derive(Debug, Parser, Clone)]
pub struct AddTransactionArgs {
    /// The transaction type.
    #[arg(long = "type", value_enum, default_value_t = TransactionType::Expense)]
    transaction_type: TransactionType,

    /// The amount, e.g. 50000 or "Rp 50.000".
    #[arg(long)]
    amount: Amount,

    /// The category name the transaction belongs to.
    #[arg(long)]
    category: String,

    /// A short description of the transaction.
    #[arg(long, default_value = "")]
    description: String,

    /// The transaction date (yyyy-MM-dd). Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,
}

impl AddTransactionArgs {
    pub fn new(
        transaction_type: TransactionType,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            transaction_type,
            amount,
            category: category.into(),
            description: description.into(),
            date,
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }
}

/// Args for the `duit add category` command.
#[derive(Debug, Parser, Clone)]
pub struct AddCategoryArgs {
    /// The category name.
    #[arg(long)]
    name: String,

    /// The transaction type the category applies to.
    #[arg(long = "type", value_enum, default_value_t = TransactionType::Expense)]
    transaction_type: TransactionType,

    /// The display color as a hex code, e.g. "#10b981".
    #[arg(long, default_value = "#6b7280")]
    color: String,
}

impl AddCategoryArgs {
    pub fn new(
        name: impl Into<String>,
        transaction_type: TransactionType,
        color: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            transaction_type,
            color: color.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// Args for the `duit update` command.
#[derive(Debug, Parser, Clone)]
pub struct UpdateArgs {
    #[command(subcommand)]
    entity: UpdateSubcommand,
}

impl UpdateArgs {
    pub fn entity(&self) -> &UpdateSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum UpdateSubcommand {
    /// Replace the fields of an existing transaction.
    Transaction(UpdateTransactionArgs),
}

/// Args for the `duit update transaction` command.
#[derive(Debug, Parser, Clone)]
pub struct UpdateTransactionArgs {
    /// The id of the transaction to update.
    id: u64,

    /// The transaction type.
    #[arg(long = "type", value_enum)]
    transaction_type: TransactionType,

    /// The amount, e.g. 50000 or "Rp 50.000".
    #[arg(long)]
    amount: Amount,

    /// The category name the transaction belongs to.
    #[arg(long)]
    category: String,

    /// A short description of the transaction.
    #[arg(long, default_value = "")]
    description: String,

    /// The transaction date (yyyy-MM-dd).
    #[arg(long)]
    date: NaiveDate,
}

impl UpdateTransactionArgs {
    pub fn new(
        id: u64,
        transaction_type: TransactionType,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            transaction_type,
            amount,
            category: category.into(),
            description: description.into(),
            date,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Args for the `duit delete` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteArgs {
    #[command(subcommand)]
    entity: DeleteSubcommand,
}

impl DeleteArgs {
    pub fn entity(&self) -> &DeleteSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum DeleteSubcommand {
    /// Delete an existing transaction.
    Transaction(DeleteTransactionArgs),
}

/// Args for the `duit delete transaction` command.
#[derive(Debug, Parser, Clone)]
pub struct DeleteTransactionArgs {
    /// The id of the transaction to delete.
    id: u64,
}

impl DeleteTransactionArgs {
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Args for the `duit list` command.
#[derive(Debug, Parser, Clone)]
pub struct ListArgs {
    #[command(subcommand)]
    entity: ListSubcommand,
}

impl ListArgs {
    pub fn entity(&self) -> &ListSubcommand {
        &self.entity
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum ListSubcommand {
    /// List transactions, optionally filtered.
    Transactions(ListTransactionsArgs),
    /// List categories, optionally filtered by type.
    Categories(ListCategoriesArgs),
}

/// Args for the `duit list transactions` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ListTransactionsArgs {
    /// Only transactions in this month (yyyy-MM).
    #[arg(long)]
    month: Option<YearMonth>,

    /// Only transactions in this category.
    #[arg(long)]
    category: Option<String>,

    /// Only transactions of this type.
    #[arg(long = "type", value_enum)]
    transaction_type: Option<TransactionType>,
}

impl ListTransactionsArgs {
    pub fn new(
        month: Option<YearMonth>,
        category: Option<String>,
        transaction_type: Option<TransactionType>,
    ) -> Self {
        Self {
            month,
            category,
            transaction_type,
        }
    }

    pub fn month(&self) -> Option<YearMonth> {
        self.month
    }

    pub fn category(&self) -> Option<&String> {
        self.category.as_ref()
    }

    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.transaction_type
    }
}

/// Args for the `duit list categories` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ListCategoriesArgs {
    /// Only categories of this type.
    #[arg(long = "type", value_enum)]
    transaction_type: Option<TransactionType>,
}

impl ListCategoriesArgs {
    pub fn new(transaction_type: Option<TransactionType>) -> Self {
        Self { transaction_type }
    }

    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.transaction_type
    }
}

/// Args for the `duit recap` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct RecapArgs {
    /// The month to recap (yyyy-MM). Defaults to the current month.
    #[arg(long)]
    month: Option<YearMonth>,
}

impl RecapArgs {
    pub fn new(month: Option<YearMonth>) -> Self {
        Self { month }
    }

    pub fn month(&self) -> Option<YearMonth> {
        self.month
    }
}

/// Args for the `duit stats` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct StatsArgs {
    /// The month to aggregate (yyyy-MM). Defaults to the current month.
    #[arg(long)]
    month: Option<YearMonth>,
}

impl StatsArgs {
    pub fn new(month: Option<YearMonth>) -> Self {
        Self { month }
    }

    pub fn month(&self) -> Option<YearMonth> {
        self.month
    }
}

/// Args for the `duit daily` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct DailyArgs {
    /// The month to show (yyyy-MM). Defaults to the current month.
    #[arg(long)]
    month: Option<YearMonth>,
}

impl DailyArgs {
    pub fn new(month: Option<YearMonth>) -> Self {
        Self { month }
    }

    pub fn month(&self) -> Option<YearMonth> {
        self.month
    }
}

/// Args for the `duit report` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct ReportArgs {
    /// The day to report on (yyyy-MM-dd). Defaults to today.
    date: Option<NaiveDate>,

    /// Narrow the report to a single transaction type.
    #[arg(long = "type", value_enum)]
    transaction_type: Option<TransactionType>,
}

impl ReportArgs {
    pub fn new(date: Option<NaiveDate>, transaction_type: Option<TransactionType>) -> Self {
        Self {
            date,
            transaction_type,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn transaction_type(&self) -> Option<TransactionType> {
        self.transaction_type
    }
}

/// Args for the `duit trends` command.
#[derive(Debug, Parser, Clone, Default)]
pub struct TrendsArgs {
    /// How many months back to include. All recorded months when omitted.
    #[arg(long)]
    months: Option<u32>,
}

impl TrendsArgs {
    pub fn new(months: Option<u32>) -> Self {
        Self { months }
    }

    pub fn months(&self) -> Option<u32> {
        self.months
    }
}

/// Args for the `duit dashboard` command.
#[derive(Debug, Parser, Clone)]
pub struct DashboardArgs {
    /// Keep running and re-render whenever the data-change signal fires.
    #[arg(long)]
    watch: bool,

    /// Seconds between refreshes in watch mode.
    #[arg(long, default_value_t = 600)]
    interval: u64,
}

impl DashboardArgs {
    pub fn new(watch: bool, interval: u64) -> Self {
        Self { watch, interval }
    }

    pub fn watch(&self) -> bool {
        self.watch
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }
}

fn default_duit_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("duit"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --duit-home or DUIT_HOME instead of relying on the default \
                duit home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("duit")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
