use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{
    domain::{ReferenceOption, Squad, SquadId, Unit},
    error::ErrorBody,
    protocol::{BattleReportResponse, CreateSquadRequest, CreateUnitRequest},
};

pub mod controller;
pub mod error;
pub mod reference;
pub mod report;

pub use error::ApiError;

/// Deadline for each of the four reference-vocabulary fetches.
pub const REFERENCE_FETCH_TIMEOUT: Duration = Duration::from_secs(5);
/// Deadline for the squad-list fetch.
pub const SQUAD_LIST_TIMEOUT: Duration = Duration::from_secs(8);
/// How many squads the overview renders; the full list is still counted.
pub const SQUAD_LIST_DISPLAY_LIMIT: usize = 5;
/// Hard cap on units staged in one squad-creation session.
pub const MAX_UNITS_PER_SQUAD: usize = 4;
/// Class submitted when a unit sub-form leaves the class selector blank.
pub const DEFAULT_UNIT_CLASS: &str = "Basic";
/// Level submitted for every newly recruited unit.
pub const DEFAULT_UNIT_LEVEL: i64 = 1;

/// The squad-management API surface the controller depends on. `HttpSquadApi`
/// is the production implementation; tests substitute recording doubles.
#[async_trait]
pub trait SquadApi: Send + Sync {
    async fn list_squads(&self) -> Result<Vec<Squad>, ApiError>;
    async fn create_squad(&self, request: &CreateSquadRequest) -> Result<Squad, ApiError>;
    async fn list_units(&self, squad_id: SquadId) -> Result<Vec<Unit>, ApiError>;
    async fn create_unit(&self, request: &CreateUnitRequest) -> Result<Unit, ApiError>;
    async fn list_races(&self) -> Result<Vec<ReferenceOption>, ApiError>;
    async fn list_classes(&self) -> Result<Vec<ReferenceOption>, ApiError>;
    async fn list_armors(&self) -> Result<Vec<ReferenceOption>, ApiError>;
    async fn list_weapons(&self) -> Result<Vec<ReferenceOption>, ApiError>;
    async fn latest_battle_report(&self) -> Result<BattleReportResponse, ApiError>;
}

/// HTTP client for the wargame API. Carries the per-call deadlines from the
/// module constants; mutations run without an explicit deadline.
pub struct HttpSquadApi {
    http: Client,
    api_url: String,
}

impl HttpSquadApi {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        deadline: Option<Duration>,
    ) -> Result<T, ApiError> {
        let mut request = self.http.get(format!("{}{path}", self.api_url));
        if let Some(deadline) = deadline {
            request = request.timeout(deadline);
        }
        let response = request.send().await.map_err(ApiError::from_reqwest)?;
        decode_response(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .post(format!("{}{path}", self.api_url))
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        decode_response(response).await
    }
}

async fn decode_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        return Err(ApiError::Status {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::InvalidBody(err.to_string()))
}

#[async_trait]
impl SquadApi for HttpSquadApi {
    async fn list_squads(&self) -> Result<Vec<Squad>, ApiError> {
        self.get_json("/squads", Some(SQUAD_LIST_TIMEOUT)).await
    }

    async fn create_squad(&self, request: &CreateSquadRequest) -> Result<Squad, ApiError> {
        self.post_json("/squads", request).await
    }

    async fn list_units(&self, squad_id: SquadId) -> Result<Vec<Unit>, ApiError> {
        self.get_json(&format!("/squads/{}/units", squad_id.0), None)
            .await
    }

    async fn create_unit(&self, request: &CreateUnitRequest) -> Result<Unit, ApiError> {
        self.post_json("/units", request).await
    }

    async fn list_races(&self) -> Result<Vec<ReferenceOption>, ApiError> {
        self.get_json("/races", Some(REFERENCE_FETCH_TIMEOUT)).await
    }

    async fn list_classes(&self) -> Result<Vec<ReferenceOption>, ApiError> {
        self.get_json("/classes", Some(REFERENCE_FETCH_TIMEOUT))
            .await
    }

    async fn list_armors(&self) -> Result<Vec<ReferenceOption>, ApiError> {
        self.get_json("/armors", Some(REFERENCE_FETCH_TIMEOUT))
            .await
    }

    async fn list_weapons(&self) -> Result<Vec<ReferenceOption>, ApiError> {
        self.get_json("/weapons", Some(REFERENCE_FETCH_TIMEOUT))
            .await
    }

    async fn latest_battle_report(&self) -> Result<BattleReportResponse, ApiError> {
        self.get_json("/battle-report", None).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
