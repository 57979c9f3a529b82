use serde::{Deserialize, Serialize};

use crate::domain::SquadId;

/// Body of `POST /squads`. The server only requires `name`; the optional
/// fields are sent as empty strings when the user leaves them blank, which is
/// what the server expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSquadRequest {
    pub name: String,
    pub commander: String,
    pub description: String,
}

/// Body of `POST /units`. `class` is required server-side, so the client
/// substitutes the default class before submitting; `level` likewise always
/// carries the default for newly recruited units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateUnitRequest {
    pub squad_id: SquadId,
    pub name: String,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(rename = "class")]
    pub unit_class: String,
    pub level: i64,
    #[serde(default)]
    pub armor: Option<String>,
    #[serde(default)]
    pub weapon: Option<String>,
}

/// Response of `GET /battle-report`. The client consumes `content` and
/// `timestamp`; the remaining fields are displayed verbatim when present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BattleReportResponse {
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub loser: Option<String>,
}
