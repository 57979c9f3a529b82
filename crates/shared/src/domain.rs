use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(SquadId);
id_newtype!(UnitId);

/// A squad as the server reports it. Created once via the API and read-only
/// from the client's perspective afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    pub id: SquadId,
    pub name: String,
    #[serde(default)]
    pub commander: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub level: Option<i64>,
}

/// A squad member. `hp` is server-computed from the unit's race and may be
/// absent on creation responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default, rename = "class")]
    pub unit_class: Option<String>,
    #[serde(default)]
    pub armor: Option<String>,
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub hp: Option<i64>,
}

/// One entry of a reference vocabulary (race, class, armor or weapon). The
/// server returns richer rows; only the name is consumed here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceOption {
    pub name: String,
}

impl ReferenceOption {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// The four fixed vocabularies used to populate unit selectors. Fetched once,
/// cached locally, replaced wholesale by the fallback set on fetch failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub races: Vec<ReferenceOption>,
    pub classes: Vec<ReferenceOption>,
    pub armors: Vec<ReferenceOption>,
    pub weapons: Vec<ReferenceOption>,
}
