//! Handler for the `duit trends` command.

use crate::api::{self, Mode};
use crate::args::TrendsArgs;
use crate::commands::{render_table, Out};
use crate::model::{Amount, MonthlyTrend, MASKED};
use crate::{Config, Result};

/// Shows income and expense totals per month, plus a summed totals line
/// across the whole window.
pub async fn trends(
    config: Config,
    mode: Mode,
    args: TrendsArgs,
    show_balance: bool,
) -> Result<Out<Vec<MonthlyTrend>>> {
    let backend = api::backend(&config, mode)?;
    let trends = backend.monthly_trends(args.months()).await?;

    if trends.is_empty() {
        return Ok(Out::new("Belum ada data transaksi", trends));
    }

    Ok(Out::new(render_trends(&trends, show_balance), trends))
}

pub(crate) fn render_trends(trends: &[MonthlyTrend], show_balance: bool) -> String {
    let rows: Vec<Vec<String>> = trends
        .iter()
        .map(|t| {
            vec![
                t.month().to_string(),
                t.total_income().display_or_masked(show_balance),
                t.total_expense().display_or_masked(show_balance),
                t.balance().display_or_masked(show_balance),
            ]
        })
        .collect();
    let table = render_table(&["Bulan", "Pemasukan", "Pengeluaran", "Saldo"], &rows);

    let mut total_income = Amount::ZERO;
    let mut total_expense = Amount::ZERO;
    let mut total_balance = Amount::ZERO;
    for trend in trends {
        total_income += trend.total_income();
        total_expense += trend.total_expense();
        total_balance += trend.balance();
    }
    format!(
        "Tren Bulanan\n{table}\nTotal: pemasukan {}, pengeluaran {}, saldo {}",
        compact_or_masked(total_income, show_balance),
        compact_or_masked(total_expense, show_balance),
        compact_or_masked(total_balance, show_balance),
    )
}

fn compact_or_masked(amount: Amount, show_balance: bool) -> String {
    if show_balance {
        amount.compact()
    } else {
        MASKED.to_string()
    }
}
