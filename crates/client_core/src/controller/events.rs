//! UI actions and events: the controller is driven exclusively through
//! `UiAction` and reports back through `UiEvent`.

use shared::domain::SquadId;

use crate::ApiError;

/// Everything the host surface can ask the controller to do, keyed per UI
/// action instead of ad-hoc callbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    ShowCreateForm,
    HideCreateForm,
    SetSquadName(String),
    SetCommander(String),
    SetDescription(String),
    AddUnitForm,
    RemoveUnitForm(usize),
    /// Typing into a unit sub-form's name field while it is editable.
    SetUnitName { index: usize, value: String },
    /// Blur/Enter on the name field: store the typed value as a label.
    CommitUnitName { index: usize },
    /// Click on the label: back to an editable input.
    EditUnitName { index: usize },
    SetUnitRace { index: usize, value: Option<String> },
    SetUnitClass { index: usize, value: Option<String> },
    SetUnitArmor { index: usize, value: Option<String> },
    SetUnitWeapon { index: usize, value: Option<String> },
    SelectSquad(SquadId),
    SubmitSquad,
    ReloadSquads,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    SquadName,
    UnitName(usize),
}

/// What the controller asks the host surface to show. Passive-load failures
/// never appear here; they degrade to fallback data and a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Blocking user-visible message for validation and mutation failures.
    Alert(String),
    Focus(FocusTarget),
    SquadCreated(SquadId),
}

/// Alert text for a failed squad creation: server rejections carry the
/// server's own message, transport-level failures a generic retry prompt.
pub fn create_squad_alert(err: &ApiError) -> String {
    if err.is_server_rejection() {
        format!("Failed to create squad: {}", err.user_message())
    } else {
        "Error creating squad. Please try again.".to_string()
    }
}
