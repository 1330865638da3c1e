mod bootstrap;

use bootstrap::{AppConfig, init_logging};
use splitter_application::{LedgerSource, SettlementEngine};
use splitter_domain::SpendingSummary;
use splitter_infrastructure::{InMemoryLedgerStore, LedgerSnapshot};
use splitter_presentation::{BalancePresenter, GroupPresenter, MoneyFormatter, messages};
use std::{borrow::Cow, env, process};

type CliResult<T> = Result<T, Cow<'static, str>>;

const USAGE: &str = "Usage: splitter <snapshot.json> [group-id [member]]";

fn main() {
    init_logging();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> CliResult<()> {
    let mut args = env::args().skip(1);
    let Some(path) = args.next() else {
        return Err(USAGE.into());
    };
    let group_id = args.next();
    let member = args.next();

    let config = AppConfig::from_env().map_err(|err| err.to_string())?;
    let store = LedgerSnapshot::from_path(&path)
        .map_err(|err| err.to_string())?
        .into_store(config.engine.split_default);
    let formatter = MoneyFormatter::new(&config.engine.currency_symbol);

    tracing::info!(
        path = %path,
        group_count = store.groups().len(),
        expense_count = store.expenses().len(),
        "Loaded ledger"
    );

    match group_id.as_deref() {
        Some(group_id) => print_group(&store, group_id, member.as_deref(), formatter),
        None => print_all_groups(&store, formatter),
    }
}

fn print_group(
    store: &InMemoryLedgerStore,
    group_id: &str,
    member: Option<&str>,
    formatter: MoneyFormatter<'_>,
) -> CliResult<()> {
    let engine = SettlementEngine::new();
    let Some(overview) = engine.overview(store, group_id) else {
        return Err(messages::group_not_found(group_id).into());
    };

    println!("{}", GroupPresenter::render(&overview, formatter));
    if let Some(member) = member {
        println!();
        println!(
            "{member}: {}",
            BalancePresenter::position_message(&overview.settlement.balances, member, formatter)
        );
    }
    Ok(())
}

fn print_all_groups(store: &InMemoryLedgerStore, formatter: MoneyFormatter<'_>) -> CliResult<()> {
    for (idx, group) in store.groups().iter().enumerate() {
        if idx > 0 {
            println!();
        }
        print_group(store, &group.id, None, formatter)?;
    }

    if !store.groups().is_empty() {
        println!();
    }
    println!(
        "{}",
        messages::total_expenses(formatter.amount(SpendingSummary::total(store.expenses())))
    );
    Ok(())
}
