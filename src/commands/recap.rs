//! Handlers for the monthly recap and the per-category stats views.

use crate::api::{self, Mode};
use crate::args::{RecapArgs, StatsArgs};
use crate::calendar::YearMonth;
use crate::clock::Clock;
use crate::commands::{render_table, Out};
use crate::model::{CategoryStats, MonthlyRecap, TransactionType};
use crate::{Config, Result};
use rust_decimal::prelude::ToPrimitive;

/// Shows the totals, counts and balance for one month.
pub async fn recap(
    config: Config,
    mode: Mode,
    args: RecapArgs,
    clock: &dyn Clock,
    show_balance: bool,
) -> Result<Out<MonthlyRecap>> {
    let backend = api::backend(&config, mode)?;
    let month = args
        .month()
        .unwrap_or_else(|| YearMonth::containing(clock.today()));
    let recap = backend.monthly_recap(month).await?;
    Ok(Out::new(render_recap(&recap, month, show_balance), recap))
}

pub(crate) fn render_recap(recap: &MonthlyRecap, month: YearMonth, show_balance: bool) -> String {
    let status = if recap.balance().is_negative() {
        "Defisit"
    } else {
        "Surplus"
    };
    format!(
        "Rekap Bulanan {}\n  Pemasukan   : {} ({} transaksi)\n  Pengeluaran : {} ({} transaksi)\n  Saldo       : {} ({status})",
        month.display_name(),
        recap.total_income().display_or_masked(show_balance),
        recap.income_count(),
        recap.total_expense().display_or_masked(show_balance),
        recap.expense_count(),
        recap.balance().display_or_masked(show_balance),
    )
}

/// Shows per-category totals for one month, split into income and expense
/// sections, with each category's share of its section.
pub async fn stats(
    config: Config,
    mode: Mode,
    args: StatsArgs,
    clock: &dyn Clock,
    show_balance: bool,
) -> Result<Out<Vec<CategoryStats>>> {
    let backend = api::backend(&config, mode)?;
    let month = args
        .month()
        .unwrap_or_else(|| YearMonth::containing(clock.today()));
    let stats = backend.category_stats(Some(month)).await?;

    let mut lines = vec![format!("Statistik Kategori {}", month.display_name())];
    for transaction_type in [TransactionType::Income, TransactionType::Expense] {
        let section: Vec<&CategoryStats> = stats
            .iter()
            .filter(|s| s.transaction_type() == transaction_type)
            .collect();
        if section.is_empty() {
            continue;
        }
        let section_total: f64 = section
            .iter()
            .map(|s| s.total().value().to_f64().unwrap_or_default())
            .sum();
        let rows: Vec<Vec<String>> = section
            .iter()
            .map(|s| {
                let share = if section_total > 0.0 {
                    s.total().value().to_f64().unwrap_or_default() / section_total * 100.0
                } else {
                    0.0
                };
                vec![
                    s.category().to_string(),
                    s.total().display_or_masked(show_balance),
                    s.count().to_string(),
                    format!("{share:.1}%"),
                ]
            })
            .collect();
        lines.push(String::new());
        lines.push(format!("{}:", transaction_type.label()));
        lines.push(render_table(
            &["Kategori", "Total", "Transaksi", "Bagian"],
            &rows,
        ));
    }
    if stats.is_empty() {
        lines.push("Tidak ada transaksi".to_string());
    }

    Ok(Out::new(lines.join("\n"), stats))
}
