use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

use super::*;
use shared::domain::UnitId;

#[derive(Clone, Default)]
struct ServerState {
    posted_squads: Arc<Mutex<Vec<Value>>>,
    posted_units: Arc<Mutex<Vec<Value>>>,
    squad_limit_reached: Arc<Mutex<bool>>,
}

async fn list_squads_handler() -> Json<Value> {
    Json(json!([
        {
            "id": 1,
            "name": "Iron Knights",
            "commander": "Charlie",
            "description": "Veterans of the north",
            "level": 3
        },
        { "id": 2, "name": "Storm Legion" }
    ]))
}

async fn create_squad_handler(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if *state.squad_limit_reached.lock().await {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Maximum number of squads reached" })),
        );
    }
    state.posted_squads.lock().await.push(body.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 42,
            "name": body["name"],
            "commander": body["commander"],
            "description": body["description"]
        })),
    )
}

async fn list_units_handler(Path(squad_id): Path<i64>) -> Json<Value> {
    Json(json!([
        {
            "id": squad_id * 10,
            "name": "Liam",
            "race": "Human",
            "class": "Knight",
            "armor": "Plate",
            "weapon": "Sword",
            "hp": 24
        }
    ]))
}

async fn create_unit_handler(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.posted_units.lock().await.push(body.clone());
    (
        StatusCode::CREATED,
        Json(json!({
            "id": 7,
            "name": body["name"],
            "race": body["race"],
            "class": body["class"]
        })),
    )
}

async fn list_races_handler() -> Json<Value> {
    Json(json!([{ "name": "Human" }, { "name": "Troll" }]))
}

async fn battle_report_handler() -> Json<Value> {
    Json(json!({
        "content": "Both armies take the field and begin to fight!",
        "timestamp": "20250301_142233",
        "filename": "battle_20250301_142233.txt",
        "winner": "Iron Knights",
        "loser": "Storm Legion"
    }))
}

async fn bare_error_handler() -> StatusCode {
    StatusCode::SERVICE_UNAVAILABLE
}

async fn spawn_api_server() -> anyhow::Result<(String, ServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ServerState::default();
    let app = Router::new()
        .route("/squads", get(list_squads_handler).post(create_squad_handler))
        .route("/squads/:squad_id/units", get(list_units_handler))
        .route("/units", post(create_unit_handler))
        .route("/races", get(list_races_handler))
        .route("/classes", get(bare_error_handler))
        .route("/battle-report", get(battle_report_handler))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

#[tokio::test]
async fn list_squads_parses_full_and_sparse_rows() -> anyhow::Result<()> {
    let (base_url, _state) = spawn_api_server().await?;
    let api = HttpSquadApi::new(base_url);

    let squads = api.list_squads().await?;

    assert_eq!(squads.len(), 2);
    assert_eq!(squads[0].id, SquadId(1));
    assert_eq!(squads[0].name, "Iron Knights");
    assert_eq!(squads[0].commander.as_deref(), Some("Charlie"));
    assert_eq!(squads[0].level, Some(3));
    // Optional columns the server omitted decode as absent, not as errors.
    assert_eq!(squads[1].commander, None);
    assert_eq!(squads[1].description, None);
    Ok(())
}

#[tokio::test]
async fn create_squad_sends_the_form_fields_and_returns_the_created_row() -> anyhow::Result<()> {
    let (base_url, state) = spawn_api_server().await?;
    let api = HttpSquadApi::new(base_url);

    let created = api
        .create_squad(&CreateSquadRequest {
            name: "Iron Knights".to_string(),
            commander: "Charlie".to_string(),
            description: "Veterans".to_string(),
        })
        .await?;

    assert_eq!(created.id, SquadId(42));
    assert_eq!(created.name, "Iron Knights");

    let posted = state.posted_squads.lock().await;
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0]["name"], "Iron Knights");
    assert_eq!(posted[0]["commander"], "Charlie");
    assert_eq!(posted[0]["description"], "Veterans");
    Ok(())
}

#[tokio::test]
async fn rejected_squad_creation_carries_the_server_message() -> anyhow::Result<()> {
    let (base_url, state) = spawn_api_server().await?;
    *state.squad_limit_reached.lock().await = true;
    let api = HttpSquadApi::new(base_url);

    let err = api
        .create_squad(&CreateSquadRequest {
            name: "One Too Many".to_string(),
            commander: String::new(),
            description: String::new(),
        })
        .await
        .expect_err("creation should be rejected");

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Maximum number of squads reached");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn error_without_a_json_body_falls_back_to_the_status_reason() -> anyhow::Result<()> {
    let (base_url, _state) = spawn_api_server().await?;
    let api = HttpSquadApi::new(base_url);

    let err = api.list_classes().await.expect_err("endpoint returns 503");

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("expected a status error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn list_units_targets_the_squad_scoped_path() -> anyhow::Result<()> {
    let (base_url, _state) = spawn_api_server().await?;
    let api = HttpSquadApi::new(base_url);

    let units = api.list_units(SquadId(3)).await?;

    assert_eq!(units.len(), 1);
    assert_eq!(units[0].id, UnitId(30));
    assert_eq!(units[0].unit_class.as_deref(), Some("Knight"));
    assert_eq!(units[0].hp, Some(24));
    Ok(())
}

#[tokio::test]
async fn create_unit_serializes_the_class_field_under_its_wire_name() -> anyhow::Result<()> {
    let (base_url, state) = spawn_api_server().await?;
    let api = HttpSquadApi::new(base_url);

    api.create_unit(&CreateUnitRequest {
        squad_id: SquadId(42),
        name: "Liam".to_string(),
        race: Some("Human".to_string()),
        unit_class: "Knight".to_string(),
        level: 1,
        armor: None,
        weapon: Some("Sword".to_string()),
    })
    .await?;

    let posted = state.posted_units.lock().await;
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0]["squad_id"], 42);
    assert_eq!(posted[0]["class"], "Knight");
    assert_eq!(posted[0].get("unit_class"), None);
    assert_eq!(posted[0]["level"], 1);
    Ok(())
}

#[tokio::test]
async fn reference_endpoints_decode_into_named_options() -> anyhow::Result<()> {
    let (base_url, _state) = spawn_api_server().await?;
    let api = HttpSquadApi::new(base_url);

    let races = api.list_races().await?;

    assert_eq!(
        races,
        vec![ReferenceOption::new("Human"), ReferenceOption::new("Troll")]
    );
    Ok(())
}

#[tokio::test]
async fn battle_report_decodes_metadata_alongside_the_content() -> anyhow::Result<()> {
    let (base_url, _state) = spawn_api_server().await?;
    let api = HttpSquadApi::new(base_url);

    let report = api.latest_battle_report().await?;

    assert!(report.content.contains("begin to fight!"));
    assert_eq!(report.timestamp.as_deref(), Some("20250301_142233"));
    assert_eq!(report.winner.as_deref(), Some("Iron Knights"));
    Ok(())
}

#[tokio::test]
async fn unreachable_server_maps_to_a_transport_error() {
    // Port 1 is reserved and unbound; the connection is refused immediately.
    let api = HttpSquadApi::new("http://127.0.0.1:1");

    let err = api.list_squads().await.expect_err("nothing is listening");

    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}
