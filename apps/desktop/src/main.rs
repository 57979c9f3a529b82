use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{
    controller::{view, view::PanelView, Controller, UiAction, UiEvent},
    report::{format_battle_report, ReportLineKind},
    HttpSquadApi, SquadApi,
};
use shared::domain::SquadId;
use storage::CacheStore;

mod config;

#[derive(Parser, Debug)]
#[command(about = "Terminal front-end for the wargame squad manager")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the squad overview.
    List,
    /// Show one squad and its units.
    Show { squad_id: i64 },
    /// Create a squad, optionally with up to 4 units.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        commander: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Unit spec "Name[:race[:class[:armor[:weapon]]]]", repeatable.
        #[arg(long = "unit")]
        units: Vec<String>,
    },
    /// Print the latest battle report.
    Report,
}

#[derive(Debug, PartialEq)]
struct UnitSpec {
    name: String,
    race: Option<String>,
    class: Option<String>,
    armor: Option<String>,
    weapon: Option<String>,
}

fn parse_unit_spec(raw: &str) -> Result<UnitSpec> {
    let mut parts = raw.splitn(5, ':').map(str::trim);
    let name = match parts.next() {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => bail!("unit spec '{raw}' is missing a name"),
    };
    let mut field = || {
        parts
            .next()
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };
    Ok(UnitSpec {
        name,
        race: field(),
        class: field(),
        armor: field(),
        weapon: field(),
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("desktop=info,client_core=info")),
        )
        .init();
    let args = Args::parse();
    let settings = config::load_settings();
    tracing::info!(
        api_url = %settings.api_url,
        cache_dir = %settings.cache_dir,
        "configuration loaded"
    );

    let api: Arc<dyn SquadApi> = Arc::new(HttpSquadApi::new(settings.api_url));
    let cache = CacheStore::new(&settings.cache_dir);
    let mut controller = Controller::new(api.clone(), cache);

    match args.command {
        Command::List => {
            controller.init().await;
            print_overview(&controller);
        }
        Command::Show { squad_id } => {
            controller.init().await;
            report_events(controller.dispatch(UiAction::SelectSquad(SquadId(squad_id))).await);
            print_detail(&controller);
        }
        Command::Create {
            name,
            commander,
            description,
            units,
        } => {
            let specs = units
                .iter()
                .map(|raw| parse_unit_spec(raw))
                .collect::<Result<Vec<_>>>()?;
            controller.init().await;
            create_squad(&mut controller, name, commander, description, specs).await;
            print_overview(&controller);
        }
        Command::Report => {
            let response = api.latest_battle_report().await?;
            print_report(&response);
        }
    }

    Ok(())
}

async fn create_squad(
    controller: &mut Controller,
    name: String,
    commander: String,
    description: String,
    specs: Vec<UnitSpec>,
) {
    report_events(controller.dispatch(UiAction::ShowCreateForm).await);
    controller.dispatch(UiAction::SetSquadName(name)).await;
    controller.dispatch(UiAction::SetCommander(commander)).await;
    controller
        .dispatch(UiAction::SetDescription(description))
        .await;

    for spec in specs {
        let events = controller.dispatch(UiAction::AddUnitForm).await;
        if events.iter().any(|event| matches!(event, UiEvent::Alert(_))) {
            report_events(events);
            break;
        }
        let index = controller.state.unit_forms.len() - 1;
        controller
            .dispatch(UiAction::SetUnitName {
                index,
                value: spec.name,
            })
            .await;
        controller.dispatch(UiAction::CommitUnitName { index }).await;
        controller
            .dispatch(UiAction::SetUnitRace {
                index,
                value: spec.race,
            })
            .await;
        controller
            .dispatch(UiAction::SetUnitClass {
                index,
                value: spec.class,
            })
            .await;
        controller
            .dispatch(UiAction::SetUnitArmor {
                index,
                value: spec.armor,
            })
            .await;
        controller
            .dispatch(UiAction::SetUnitWeapon {
                index,
                value: spec.weapon,
            })
            .await;
    }

    report_events(controller.dispatch(UiAction::SubmitSquad).await);
}

fn report_events(events: Vec<UiEvent>) {
    for event in events {
        match event {
            UiEvent::Alert(message) => eprintln!("! {message}"),
            UiEvent::SquadCreated(id) => println!("Created squad #{}", id.0),
            UiEvent::Focus(_) => {}
        }
    }
}

fn print_overview(controller: &Controller) {
    let model = view(&controller.state);
    for row in &model.squad_rows {
        let marker = if row.selected { "*" } else { "-" };
        println!("{marker} {}", row.name);
        println!("    {}", row.commander_label);
        println!("    {}", row.description_label);
    }
    if let Some(placeholder) = &model.squads_placeholder {
        println!("{placeholder}");
    }
    println!("{}", model.total_label);
}

fn print_detail(controller: &Controller) {
    let model = view(&controller.state);
    let PanelView::SquadDetail(detail) = model.panel else {
        eprintln!("! No squad selected");
        return;
    };
    println!("== {} ==", detail.title);
    for unit in &detail.unit_boxes {
        match &unit.hp_label {
            Some(hp) => println!("{} ({}) [{hp}]", unit.name, unit.descriptor),
            None => println!("{} ({})", unit.name, unit.descriptor),
        }
    }
    if let Some(placeholder) = &detail.placeholder {
        println!("{placeholder}");
    }
}

fn print_report(response: &shared::protocol::BattleReportResponse) {
    let report = format_battle_report(response);
    if let Some(timestamp) = &report.timestamp_label {
        println!("Battle fought {timestamp}");
    }
    if let (Some(winner), Some(loser)) = (&report.winner, &report.loser) {
        println!("{winner} defeated {loser}");
    }
    println!();
    for line in &report.lines {
        let prefix = match line.kind {
            ReportLineKind::BattleStart | ReportLineKind::BattleEnd => "==",
            ReportLineKind::Defeat => "xx",
            ReportLineKind::Attack => ">>",
            ReportLineKind::Roll => "..",
            ReportLineKind::Narration => "  ",
        };
        println!("{prefix} {}", line.text);
    }
}
