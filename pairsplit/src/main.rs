mod bootstrap;

use bootstrap::AppConfig;
use pairsplit_application::{
    ExpenseQuery, ExpenseStore, SettlementFeed, SettlementProcessor, StatusFilter, YearMonth,
};
use pairsplit_infrastructure::{InMemoryPairStore, load_snapshot};
use pairsplit_presentation::{ExpenseListPresenter, SettlementPresenter, SettlementScreen};
use std::{borrow::Cow, env, process};

type CliResult<T> = Result<T, Cow<'static, str>>;

const USAGE: &str =
    "Usage: pairsplit <snapshot.json> [--expenses [--status all|settled|unsettled] [--month YYYY-MM]]";

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    path: String,
    /// Set when the expense list was requested instead of the settlement.
    expense_query: Option<ExpenseQuery>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    bootstrap::init_logging();

    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    let args = parse_args(env::args().skip(1))?;
    tracing::debug!(?config, path = %args.path, "Configuration loaded");

    let snapshot = load_snapshot(&args.path).map_err(|err| err.to_string())?;
    let pair_id = snapshot.pair_id.clone();
    let store = InMemoryPairStore::new();
    store.import(snapshot).map_err(|err| err.to_string())?;
    let roster = store.roster(&pair_id).await.map_err(|err| err.to_string())?;

    if let Some(query) = args.expense_query {
        let records = store
            .expenses(&pair_id, &query)
            .await
            .map_err(|err| err.to_string())?;
        print!("{}", ExpenseListPresenter::render(&records, &roster).render_text());
        return Ok(());
    }

    let (feed, _updates) = SettlementFeed::new(SettlementProcessor::new(config.options));
    let snapshots = store.subscribe(&pair_id).map_err(|err| err.to_string())?;
    feed.offer(&snapshots.borrow());

    let latest = feed.current();
    let screen = SettlementPresenter::screen(latest.as_ref(), &roster, config.viewer.as_ref());
    match screen {
        SettlementScreen::Failed(message) => Err(message.into()),
        screen => {
            print!("{}", screen.render_text());
            Ok(())
        }
    }
}

fn parse_args(args: impl IntoIterator<Item = String>) -> CliResult<CliArgs> {
    let mut args = args.into_iter();
    let Some(path) = args.next() else {
        return Err(USAGE.into());
    };

    let mut list_requested = false;
    let mut query = ExpenseQuery::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--expenses" => list_requested = true,
            "--status" => {
                let value = args.next().ok_or(USAGE)?;
                query.status = match value.as_str() {
                    "all" => StatusFilter::All,
                    "settled" => StatusFilter::Settled,
                    "unsettled" => StatusFilter::Unsettled,
                    other => return Err(format!("Unknown status '{other}'").into()),
                };
            }
            "--month" => {
                let value = args.next().ok_or(USAGE)?;
                let month = value
                    .parse::<YearMonth>()
                    .map_err(|err| err.to_string())?;
                query.month = Some(month);
            }
            other => return Err(format!("Unexpected argument '{other}'\n{USAGE}").into()),
        }
    }

    if !list_requested && query != ExpenseQuery::default() {
        return Err("--status and --month only apply together with --expenses".into());
    }

    Ok(CliArgs {
        path,
        expense_query: list_requested.then_some(query),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn path_alone_requests_settlement() {
        let parsed = parse_args(args(&["snap.json"])).expect("valid args");
        assert_eq!(
            parsed,
            CliArgs {
                path: "snap.json".to_string(),
                expense_query: None,
            }
        );
    }

    #[test]
    fn expense_list_with_filters() {
        let parsed = parse_args(args(&[
            "snap.json",
            "--expenses",
            "--status",
            "unsettled",
            "--month",
            "2025-05",
        ]))
        .expect("valid args");

        assert_eq!(
            parsed.expense_query,
            Some(ExpenseQuery {
                status: StatusFilter::Unsettled,
                month: Some(YearMonth::try_new(2025, 5).expect("valid month")),
            })
        );
    }

    #[rstest]
    #[case::missing_path(&[])]
    #[case::unknown_flag(&["snap.json", "--verbose"])]
    #[case::missing_status_value(&["snap.json", "--expenses", "--status"])]
    #[case::bad_status(&["snap.json", "--expenses", "--status", "paid"])]
    #[case::bad_month(&["snap.json", "--expenses", "--month", "2025-13"])]
    #[case::filter_without_list(&["snap.json", "--month", "2025-05"])]
    fn invalid_args_are_rejected(#[case] raw: &[&str]) {
        assert!(parse_args(args(raw)).is_err());
    }
}
