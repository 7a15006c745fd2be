//! Handler for the `duit dashboard` command.
//!
//! Renders every view at once: quick stats for today, the monthly recap, the
//! trends table and the reconciled daily grid. In watch mode a periodic
//! ticker drives the change signal and every notification re-renders the
//! dashboard with fresh data.

use crate::api::{self, Backend, Mode};
use crate::args::DashboardArgs;
use crate::calendar::{self, YearMonth};
use crate::clock::Clock;
use crate::commands::{daily, recap, trends, Out};
use crate::model::TransactionType;
use crate::refresh::ChangeSignal;
use crate::{Config, Result};
use std::time::Duration;
use tracing::info;

/// How many months of trends the dashboard shows.
const TREND_MONTHS: u32 = 6;

pub async fn dashboard(
    config: Config,
    mode: Mode,
    args: DashboardArgs,
    clock: &dyn Clock,
    show_balance: bool,
) -> Result<Out<String>> {
    let backend = api::backend(&config, mode)?;
    let first = render(backend.as_ref(), clock, show_balance).await?;
    if !args.watch() {
        return Ok(Out::new_message(first));
    }

    info!("{first}");
    let signal = ChangeSignal::new();
    let mut listener = signal.subscribe();
    let period = Duration::from_secs(args.interval().max(1));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately; skip it so the ticker only
        // signals subsequent periods.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            signal.notify();
        }
    });

    loop {
        listener.changed().await?;
        let rendered = render(backend.as_ref(), clock, show_balance).await?;
        info!("{rendered}");
    }
}

pub(crate) async fn render(
    backend: &dyn Backend,
    clock: &dyn Clock,
    show_balance: bool,
) -> Result<String> {
    let today = clock.today();
    let month = YearMonth::containing(today);

    let today_report = backend.daily_report(today).await?;
    let income_today = today_report
        .transactions()
        .iter()
        .filter(|t| t.transaction_type() == TransactionType::Income)
        .count();
    let expense_today = today_report.transactions().len() - income_today;

    let monthly = backend.monthly_recap(month).await?;
    let trend_data = backend.monthly_trends(Some(TREND_MONTHS)).await?;
    let aggregates = backend.daily_stats(Some(month)).await?;
    let cells = calendar::reconcile(month, &aggregates);

    let mut sections = vec![
        format!("Monitor Keuangan - {}", month.display_name()),
        format!("Hari ini ({today}): {income_today} pemasukan, {expense_today} pengeluaran"),
        String::new(),
        recap::render_recap(&monthly, month, show_balance),
    ];
    if !trend_data.is_empty() {
        sections.push(String::new());
        sections.push(trends::render_trends(&trend_data, show_balance));
    }
    sections.push(String::new());
    sections.push(daily::render_daily(month, &cells, show_balance));
    Ok(sections.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TestBackend;
    use crate::clock::FixedClock;
    use crate::test::TestEnv;
    use chrono::NaiveDate;

    fn clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2025, 7, 7).unwrap())
    }

    #[tokio::test]
    async fn test_dashboard_renders_every_section() {
        let env = TestEnv::new().await;
        let out = dashboard(
            env.config(),
            Mode::Test,
            DashboardArgs::new(false, 600),
            &clock(),
            true,
        )
        .await
        .unwrap();
        let message = out.message();
        assert!(message.contains("Monitor Keuangan - Juli 2025"));
        assert!(message.contains("2 pengeluaran"));
        assert!(message.contains("Rekap Bulanan Juli 2025"));
        assert!(message.contains("Tren Bulanan"));
        assert!(message.contains("Transaksi Harian Juli 2025"));
    }

    #[tokio::test]
    async fn test_render_counts_todays_transactions_by_type() {
        let backend = TestBackend::default();
        let rendered = render(
            &backend,
            &FixedClock(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap()),
            false,
        )
        .await
        .unwrap();
        assert!(rendered.contains("1 pemasukan, 0 pengeluaran"));
    }

    #[tokio::test]
    async fn test_render_on_a_quiet_day() {
        let backend = TestBackend::empty();
        let rendered = render(&backend, &clock(), true).await.unwrap();
        assert!(rendered.contains("0 pemasukan, 0 pengeluaran"));
        // The daily grid still covers the whole month.
        assert!(rendered.contains("2025-07-31"));
    }
}
