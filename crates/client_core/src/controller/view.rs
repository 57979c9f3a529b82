//! Pure projection of `AppState` into a render-ready view model. No network
//! calls, no mutation; anything the host surface draws comes from here.

use shared::domain::{Squad, Unit};

use crate::SQUAD_LIST_DISPLAY_LIMIT;

use super::{AppState, Panel, UnitForm};

pub const NO_SQUADS_PLACEHOLDER: &str = "No squads yet.\nCreate the first one!";
pub const NO_UNITS_PLACEHOLDER: &str = "No units in this squad.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    /// At most `SQUAD_LIST_DISPLAY_LIMIT` rows, in server order.
    pub squad_rows: Vec<SquadRow>,
    pub squads_placeholder: Option<String>,
    /// Counts every squad the server returned, not just the rendered rows.
    pub total_label: String,
    pub panel: PanelView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquadRow {
    pub name: String,
    pub commander_label: String,
    pub description_label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    CreatePrompt,
    CreateForm(FormView),
    SquadDetail(DetailView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub squad_name: String,
    pub commander: String,
    pub description: String,
    pub unit_forms: Vec<UnitFormView>,
    pub can_add_unit: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFormView {
    pub name: NameFieldView,
    pub race: Option<String>,
    pub unit_class: Option<String>,
    pub armor: Option<String>,
    pub weapon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameFieldView {
    Input(String),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub title: String,
    pub unit_boxes: Vec<UnitBox>,
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitBox {
    pub name: String,
    pub descriptor: String,
    pub hp_label: Option<String>,
}

pub fn view(state: &AppState) -> ViewModel {
    let squad_rows = state
        .squads
        .iter()
        .take(SQUAD_LIST_DISPLAY_LIMIT)
        .map(|squad| squad_row(squad, state))
        .collect();

    ViewModel {
        squad_rows,
        squads_placeholder: state
            .squads
            .is_empty()
            .then(|| NO_SQUADS_PLACEHOLDER.to_string()),
        total_label: format!("Total Squads: {}", state.total_squads),
        panel: panel_view(state),
    }
}

fn squad_row(squad: &Squad, state: &AppState) -> SquadRow {
    let commander_label = match squad.commander.as_deref() {
        Some(commander) if !commander.is_empty() => format!("Commander: {commander}"),
        _ => "No commander assigned".to_string(),
    };
    let description_label = match squad.description.as_deref() {
        Some(description) if !description.is_empty() => description.to_string(),
        _ => "No description".to_string(),
    };

    SquadRow {
        name: squad.name.clone(),
        commander_label,
        description_label,
        selected: state.selected_squad == Some(squad.id),
    }
}

fn panel_view(state: &AppState) -> PanelView {
    match state.panel {
        Panel::CreatePrompt => PanelView::CreatePrompt,
        Panel::CreateForm => PanelView::CreateForm(FormView {
            squad_name: state.squad_name.clone(),
            commander: state.commander.clone(),
            description: state.description.clone(),
            unit_forms: state.unit_forms.iter().map(unit_form_view).collect(),
            can_add_unit: state.unit_forms.len() < crate::MAX_UNITS_PER_SQUAD,
        }),
        Panel::SquadDetail => {
            let title = state
                .selected_squad
                .and_then(|id| state.squads.iter().find(|squad| squad.id == id))
                .map(|squad| squad.name.clone())
                .unwrap_or_else(|| "Squad".to_string());

            PanelView::SquadDetail(DetailView {
                title,
                unit_boxes: state.selected_units.iter().map(unit_box).collect(),
                placeholder: state
                    .selected_units
                    .is_empty()
                    .then(|| NO_UNITS_PLACEHOLDER.to_string()),
            })
        }
    }
}

fn unit_form_view(form: &UnitForm) -> UnitFormView {
    UnitFormView {
        name: match &form.name {
            super::NameField::Editing(value) => NameFieldView::Input(value.clone()),
            super::NameField::Committed(value) => NameFieldView::Label(value.clone()),
        },
        race: form.race.clone(),
        unit_class: form.unit_class.clone(),
        armor: form.armor.clone(),
        weapon: form.weapon.clone(),
    }
}

fn unit_box(unit: &Unit) -> UnitBox {
    let race = unit.race.as_deref().unwrap_or("Unknown");
    let class = unit.unit_class.as_deref().unwrap_or(crate::DEFAULT_UNIT_CLASS);
    let mut descriptor = format!("{race} {class}");
    if let Some(armor) = unit.armor.as_deref() {
        descriptor.push_str(&format!(" wearing {armor}"));
    }
    if let Some(weapon) = unit.weapon.as_deref() {
        descriptor.push_str(&format!(" wielding {weapon}"));
    }

    UnitBox {
        name: unit.name.clone(),
        descriptor,
        hp_label: unit.hp.map(|hp| format!("{hp} HP")),
    }
}
