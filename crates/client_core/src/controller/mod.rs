//! Client controller: owns application state, dispatches UI actions, and
//! keeps the view model in sync with API responses.

use std::sync::Arc;

use shared::{
    domain::{ReferenceData, Squad, SquadId, Unit},
    protocol::{CreateSquadRequest, CreateUnitRequest},
};
use storage::CacheStore;
use tracing::{info, warn};

use crate::{
    reference, SquadApi, DEFAULT_UNIT_CLASS, DEFAULT_UNIT_LEVEL, MAX_UNITS_PER_SQUAD,
};

pub mod events;
pub mod view;

pub use events::{FocusTarget, UiAction, UiEvent};
pub use view::{view, ViewModel};

/// Which panel the right-hand side of the page shows. The creation form is
/// hidden behind the prompt until explicitly opened, and selecting a squad
/// replaces it with the unit listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    #[default]
    CreatePrompt,
    CreateForm,
    SquadDetail,
}

/// A unit sub-form name field: an editable input while typing, a committed
/// label after blur/Enter, editable again on click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameField {
    Editing(String),
    Committed(String),
}

impl NameField {
    pub fn value(&self) -> &str {
        match self {
            NameField::Editing(value) | NameField::Committed(value) => value,
        }
    }
}

/// One in-progress unit sub-form. Selector values name entries of the
/// resolved reference vocabularies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitForm {
    pub name: NameField,
    pub race: Option<String>,
    pub unit_class: Option<String>,
    pub armor: Option<String>,
    pub weapon: Option<String>,
}

impl UnitForm {
    fn new() -> Self {
        Self {
            name: NameField::Editing(String::new()),
            race: None,
            unit_class: None,
            armor: None,
            weapon: None,
        }
    }

    fn staged_name(&self) -> Option<String> {
        let name = self.name.value().trim();
        (!name.is_empty()).then(|| name.to_string())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub panel: Panel,
    pub reference: ReferenceData,
    /// Full squad list from the server; the view renders only a prefix.
    pub squads: Vec<Squad>,
    pub total_squads: usize,
    pub selected_squad: Option<SquadId>,
    pub selected_units: Vec<Unit>,
    pub squad_name: String,
    pub commander: String,
    pub description: String,
    pub unit_forms: Vec<UnitForm>,
}

/// The client controller. Explicitly constructed with its API and cache
/// dependencies; the host surface drives it through `dispatch` and renders
/// `view(&controller.state)` afterwards.
pub struct Controller {
    api: Arc<dyn SquadApi>,
    cache: CacheStore,
    pub state: AppState,
}

impl Controller {
    pub fn new(api: Arc<dyn SquadApi>, cache: CacheStore) -> Self {
        // Selectors stay usable before init resolves the real vocabularies.
        let state = AppState {
            reference: reference::fallback_reference_data(),
            ..AppState::default()
        };
        Self { api, cache, state }
    }

    /// Startup load: reference data and the squad list are resolved
    /// concurrently, and a failure on either path never aborts the other.
    pub async fn init(&mut self) {
        let (reference, squads) = tokio::join!(
            reference::resolve_reference_data(&self.cache, self.api.as_ref()),
            self.api.list_squads(),
        );

        self.state.reference = reference;
        self.apply_squad_list(squads);
    }

    pub async fn dispatch(&mut self, action: UiAction) -> Vec<UiEvent> {
        match action {
            UiAction::ShowCreateForm => {
                self.state.panel = Panel::CreateForm;
                vec![UiEvent::Focus(FocusTarget::SquadName)]
            }
            UiAction::HideCreateForm => {
                self.clear_form();
                self.state.panel = Panel::CreatePrompt;
                Vec::new()
            }
            UiAction::SetSquadName(value) => {
                self.state.squad_name = value;
                Vec::new()
            }
            UiAction::SetCommander(value) => {
                self.state.commander = value;
                Vec::new()
            }
            UiAction::SetDescription(value) => {
                self.state.description = value;
                Vec::new()
            }
            UiAction::AddUnitForm => self.add_unit_form(),
            UiAction::RemoveUnitForm(index) => {
                if index < self.state.unit_forms.len() {
                    self.state.unit_forms.remove(index);
                } else {
                    warn!(index, "remove requested for a unit form that does not exist");
                }
                Vec::new()
            }
            UiAction::SetUnitName { index, value } => {
                if let Some(form) = self.state.unit_forms.get_mut(index) {
                    if matches!(form.name, NameField::Editing(_)) {
                        form.name = NameField::Editing(value);
                    }
                }
                Vec::new()
            }
            UiAction::CommitUnitName { index } => {
                if let Some(form) = self.state.unit_forms.get_mut(index) {
                    if let NameField::Editing(value) = &form.name {
                        form.name = NameField::Committed(value.clone());
                    }
                }
                Vec::new()
            }
            UiAction::EditUnitName { index } => {
                if let Some(form) = self.state.unit_forms.get_mut(index) {
                    if let NameField::Committed(value) = &form.name {
                        form.name = NameField::Editing(value.clone());
                    }
                }
                Vec::new()
            }
            UiAction::SetUnitRace { index, value } => {
                self.set_selector(index, |form| form.race = value);
                Vec::new()
            }
            UiAction::SetUnitClass { index, value } => {
                self.set_selector(index, |form| form.unit_class = value);
                Vec::new()
            }
            UiAction::SetUnitArmor { index, value } => {
                self.set_selector(index, |form| form.armor = value);
                Vec::new()
            }
            UiAction::SetUnitWeapon { index, value } => {
                self.set_selector(index, |form| form.weapon = value);
                Vec::new()
            }
            UiAction::SelectSquad(squad_id) => self.select_squad(squad_id).await,
            UiAction::SubmitSquad => self.submit_squad().await,
            UiAction::ReloadSquads => {
                let squads = self.api.list_squads().await;
                self.apply_squad_list(squads);
                Vec::new()
            }
        }
    }

    fn set_selector(&mut self, index: usize, update: impl FnOnce(&mut UnitForm)) {
        match self.state.unit_forms.get_mut(index) {
            Some(form) => update(form),
            None => warn!(index, "selector change for a unit form that does not exist"),
        }
    }

    fn add_unit_form(&mut self) -> Vec<UiEvent> {
        if self.state.unit_forms.len() >= MAX_UNITS_PER_SQUAD {
            return vec![UiEvent::Alert(format!(
                "A squad can have at most {MAX_UNITS_PER_SQUAD} units!"
            ))];
        }
        self.state.unit_forms.push(UnitForm::new());
        let index = self.state.unit_forms.len() - 1;
        vec![UiEvent::Focus(FocusTarget::UnitName(index))]
    }

    fn clear_form(&mut self) {
        self.state.squad_name.clear();
        self.state.commander.clear();
        self.state.description.clear();
        self.state.unit_forms.clear();
    }

    fn apply_squad_list(&mut self, squads: Result<Vec<Squad>, crate::ApiError>) {
        match squads {
            Ok(squads) => {
                self.state.total_squads = squads.len();
                self.state.squads = squads;
                info!(total = self.state.total_squads, "squad list loaded");
            }
            Err(err) => {
                warn!("failed to load squads: {err}");
                self.state.squads.clear();
                self.state.total_squads = 0;
            }
        }
    }

    /// Marks the squad selected and switches to the unit listing. An unknown
    /// id is logged, not fatal; a unit-fetch failure degrades to an empty
    /// listing.
    async fn select_squad(&mut self, squad_id: SquadId) -> Vec<UiEvent> {
        if !self.state.squads.iter().any(|squad| squad.id == squad_id) {
            warn!(
                squad_id = squad_id.0,
                "selected squad is not in the loaded list"
            );
        }

        self.state.selected_squad = Some(squad_id);
        self.state.panel = Panel::SquadDetail;

        match self.api.list_units(squad_id).await {
            Ok(units) => self.state.selected_units = units,
            Err(err) => {
                warn!(squad_id = squad_id.0, "failed to load squad units: {err}");
                self.state.selected_units = Vec::new();
            }
        }
        Vec::new()
    }

    /// The compound creation workflow: validate, create the squad, then
    /// create each staged unit sequentially in form order. Per-unit failures
    /// are logged and do not halt the remaining submissions; there is no
    /// rollback of the squad.
    async fn submit_squad(&mut self) -> Vec<UiEvent> {
        let name = self.state.squad_name.trim().to_string();
        if name.is_empty() {
            return vec![
                UiEvent::Alert("Squad name is required!".to_string()),
                UiEvent::Focus(FocusTarget::SquadName),
            ];
        }

        let staged: Vec<(String, UnitForm)> = self
            .state
            .unit_forms
            .iter()
            .filter_map(|form| form.staged_name().map(|name| (name, form.clone())))
            .collect();
        if staged.len() > MAX_UNITS_PER_SQUAD {
            return vec![UiEvent::Alert(format!(
                "A squad can have at most {MAX_UNITS_PER_SQUAD} units!"
            ))];
        }

        let request = CreateSquadRequest {
            name,
            commander: self.state.commander.trim().to_string(),
            description: self.state.description.trim().to_string(),
        };

        let squad = match self.api.create_squad(&request).await {
            Ok(squad) => squad,
            Err(err) => {
                warn!("squad creation failed: {err}");
                return vec![UiEvent::Alert(events::create_squad_alert(&err))];
            }
        };
        info!(squad_id = squad.id.0, name = %squad.name, "squad created");

        for (unit_name, form) in staged {
            let unit_request = CreateUnitRequest {
                squad_id: squad.id,
                name: unit_name.clone(),
                race: form.race.clone(),
                unit_class: form
                    .unit_class
                    .clone()
                    .unwrap_or_else(|| DEFAULT_UNIT_CLASS.to_string()),
                level: DEFAULT_UNIT_LEVEL,
                armor: form.armor.clone(),
                weapon: form.weapon.clone(),
            };

            match self.api.create_unit(&unit_request).await {
                Ok(unit) => info!(
                    squad_id = squad.id.0,
                    unit_id = unit.id.0,
                    name = %unit.name,
                    "unit created"
                ),
                Err(err) => warn!(
                    squad_id = squad.id.0,
                    name = %unit_name,
                    "unit creation failed: {err}"
                ),
            }
        }

        let created = squad.id;
        self.clear_form();
        self.state.panel = Panel::CreatePrompt;
        let squads = self.api.list_squads().await;
        self.apply_squad_list(squads);

        vec![UiEvent::SquadCreated(created)]
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
