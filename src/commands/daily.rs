//! Handlers for the daily trend grid and the single-day report.

use crate::api::{self, Mode};
use crate::args::{DailyArgs, ReportArgs};
use crate::calendar::{self, DailyCell, YearMonth};
use crate::clock::Clock;
use crate::commands::{render_table, Out};
use crate::model::{CategoryTag, DailyReport, TransactionType};
use crate::{Config, Result};

/// Shows one row per calendar day of the month. Days without transactions
/// appear as zero rows, so the grid always covers the whole month.
pub async fn daily(
    config: Config,
    mode: Mode,
    args: DailyArgs,
    clock: &dyn Clock,
    show_balance: bool,
) -> Result<Out<Vec<DailyCell>>> {
    let backend = api::backend(&config, mode)?;
    let month = args
        .month()
        .unwrap_or_else(|| YearMonth::containing(clock.today()));
    let aggregates = backend.daily_stats(Some(month)).await?;
    let cells = calendar::reconcile(month, &aggregates);
    Ok(Out::new(render_daily(month, &cells, show_balance), cells))
}

pub(crate) fn render_daily(month: YearMonth, cells: &[DailyCell], show_balance: bool) -> String {
    let rows: Vec<Vec<String>> = cells
        .iter()
        .map(|cell| {
            vec![
                cell.date().to_string(),
                cell.income().display_or_masked(show_balance),
                cell.expense().display_or_masked(show_balance),
                format!("{}/{}", cell.income_count(), cell.expense_count()),
                category_summary(cell),
            ]
        })
        .collect();
    let table = render_table(
        &["Tanggal", "Pemasukan", "Pengeluaran", "Transaksi", "Kategori"],
        &rows,
    );
    format!("Transaksi Harian {}\n{table}", month.display_name())
}

/// Up to three suffix-stripped category labels, income first, with an
/// ellipsis when more exist.
fn category_summary(cell: &DailyCell) -> String {
    let labels: Vec<String> = cell
        .income_categories()
        .iter()
        .chain(cell.expense_categories().iter())
        .map(|raw| CategoryTag::parse(raw).label().to_string())
        .collect();
    let mut summary = labels
        .iter()
        .take(3)
        .cloned()
        .collect::<Vec<String>>()
        .join(", ");
    if labels.len() > 3 {
        summary.push_str(", ...");
    }
    summary
}

/// Shows everything recorded on one day, optionally narrowed to a single
/// transaction type.
pub async fn report(
    config: Config,
    mode: Mode,
    args: ReportArgs,
    clock: &dyn Clock,
    show_balance: bool,
) -> Result<Out<DailyReport>> {
    let backend = api::backend(&config, mode)?;
    let date = args.date().unwrap_or_else(|| clock.today());
    let report = backend.daily_report(date).await?.filtered(args.transaction_type());

    let title = match args.transaction_type() {
        Some(TransactionType::Income) => "Detail Pemasukan",
        Some(TransactionType::Expense) => "Detail Pengeluaran",
        None => "Laporan Harian",
    };

    if report.transactions().is_empty() {
        return Ok(Out::new(
            format!("{title} {date}\nTidak ada transaksi"),
            report,
        ));
    }

    let rows: Vec<Vec<String>> = report
        .transactions()
        .iter()
        .map(|t| {
            vec![
                t.transaction_type().label().to_string(),
                t.category().to_string(),
                t.amount().display_or_masked(show_balance),
                t.description().to_string(),
            ]
        })
        .collect();
    let table = render_table(&["Tipe", "Kategori", "Jumlah", "Deskripsi"], &rows);

    let summary = report.summary();
    let message = format!(
        "{title} {date}\n{table}\nPemasukan {}, pengeluaran {}, saldo {} ({} transaksi)",
        summary.total_income().display_or_masked(show_balance),
        summary.total_expense().display_or_masked(show_balance),
        summary.balance().display_or_masked(show_balance),
        summary.transaction_count(),
    );
    Ok(Out::new(message, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::model::MASKED;
    use crate::test::TestEnv;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2025, 7, 15).unwrap())
    }

    #[tokio::test]
    async fn test_daily_covers_the_whole_month() {
        let env = TestEnv::new().await;
        let out = daily(
            env.config(),
            Mode::Test,
            DailyArgs::default(),
            &clock(),
            true,
        )
        .await
        .unwrap();
        let cells = out.structure().unwrap();
        assert_eq!(cells.len(), 31);
        assert_eq!(
            cells[0].date(),
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()
        );
        assert_eq!(
            cells[30].date(),
            NaiveDate::from_ymd_opt(2025, 7, 31).unwrap()
        );
        // The seeded July 7th has two expense transactions.
        assert_eq!(cells[6].expense_count(), 2);
        assert!(out.message().contains("Transaksi Harian Juli 2025"));
    }

    #[tokio::test]
    async fn test_daily_strips_amount_suffixes_from_labels() {
        let env = TestEnv::new().await;
        let out = daily(
            env.config(),
            Mode::Test,
            DailyArgs::default(),
            &clock(),
            true,
        )
        .await
        .unwrap();
        // The packed form is "Makanan:127000"; only the label may appear.
        assert!(out.message().contains("Makanan"));
        assert!(!out.message().contains("Makanan:"));
    }

    #[tokio::test]
    async fn test_daily_of_an_empty_month_is_all_zero_rows() {
        let env = TestEnv::new().await;
        let out = daily(
            env.config(),
            Mode::Test,
            DailyArgs::new(Some(YearMonth::new(2024, 2).unwrap())),
            &clock(),
            true,
        )
        .await
        .unwrap();
        let cells = out.structure().unwrap();
        assert_eq!(cells.len(), 29);
        assert!(cells.iter().all(|c| !c.has_activity()));
    }

    #[tokio::test]
    async fn test_report_defaults_to_today() {
        let env = TestEnv::new().await;
        let out = report(
            env.config(),
            Mode::Test,
            ReportArgs::default(),
            &FixedClock(NaiveDate::from_ymd_opt(2025, 7, 7).unwrap()),
            true,
        )
        .await
        .unwrap();
        assert!(out.message().contains("Laporan Harian 2025-07-07"));
        assert!(out.message().contains("2 transaksi"));
    }

    #[tokio::test]
    async fn test_report_type_filter_negates_expense_balance() {
        let env = TestEnv::new().await;
        let out = report(
            env.config(),
            Mode::Test,
            ReportArgs::new(
                Some(NaiveDate::from_ymd_opt(2025, 7, 7).unwrap()),
                Some(TransactionType::Expense),
            ),
            &clock(),
            true,
        )
        .await
        .unwrap();
        assert!(out.message().contains("Detail Pengeluaran"));
        assert!(out.message().contains("-Rp 127.000"));
    }

    #[tokio::test]
    async fn test_report_empty_day() {
        let env = TestEnv::new().await;
        let out = report(
            env.config(),
            Mode::Test,
            ReportArgs::new(Some(NaiveDate::from_ymd_opt(2025, 7, 2).unwrap()), None),
            &clock(),
            false,
        )
        .await
        .unwrap();
        assert!(out.message().contains("Tidak ada transaksi"));
    }

    #[tokio::test]
    async fn test_report_masks_amounts() {
        let env = TestEnv::new().await;
        let out = report(
            env.config(),
            Mode::Test,
            ReportArgs::new(Some(NaiveDate::from_ymd_opt(2025, 7, 7).unwrap()), None),
            &clock(),
            false,
        )
        .await
        .unwrap();
        assert!(out.message().contains(MASKED));
    }
}
