//! Blocking HTTP implementation of the workout service.

use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use strength_core::config::ServiceConfig;
use strength_core::{
    CreatedWorkout, Error, Result, WorkoutDocument, WorkoutService, WorkoutSummary,
};

const USER_AGENT: &str = "GCM-iOS-5.7.2.1";
const WORKOUT_ENDPOINT: &str = "/workout-service/workout";
const WORKOUTS_ENDPOINT: &str = "/workout-service/workouts";

/// The parts of the stored OAuth2 token we use
#[derive(Debug, Deserialize)]
struct StoredToken {
    access_token: String,
    #[serde(default)]
    expires_at: Option<u64>,
}

/// Read the bearer token from the token file
fn load_access_token(path: &Path) -> Result<String> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read token file {:?}: {}", path, e))
    })?;
    let token: StoredToken = serde_json::from_str(&contents)?;

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    if token.expires_at.is_some_and(|at| now >= at) {
        tracing::warn!("Access token in {:?} has expired; requests will likely fail", path);
    }

    Ok(token.access_token)
}

/// Read a create response; the workout exists whatever the body says
fn parse_created(body: &str) -> CreatedWorkout {
    if body.trim().is_empty() {
        return CreatedWorkout::default();
    }
    serde_json::from_str(body).unwrap_or_else(|e| {
        tracing::warn!("Workout created but response was unreadable: {}", e);
        CreatedWorkout::default()
    })
}

/// Workout service client for the Connect API
pub struct ConnectClient {
    http: Client,
    base_url: String,
    token: String,
}

impl ConnectClient {
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let token = load_access_token(&config.token_path)?;
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Send an authorized request; non-2xx answers become `Error::Rejected`
    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .bearer_auth(&self.token)
            .header("DI-Backend", "connectapi.garmin.com")
            .send()
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(Error::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

impl WorkoutService for ConnectClient {
    fn create_workout(&self, document: &WorkoutDocument) -> Result<CreatedWorkout> {
        let response = self.send(self.http.post(self.url(WORKOUT_ENDPOINT)).json(document))?;
        let body = response
            .text()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(parse_created(&body))
    }

    fn list_workouts(&self) -> Result<Vec<WorkoutSummary>> {
        let response = self.send(self.http.get(self.url(WORKOUTS_ENDPOINT)))?;
        let body = response
            .text()
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }

    fn delete_workout(&self, workout_id: i64) -> Result<()> {
        let endpoint = format!("{}/{}", WORKOUT_ENDPOINT, workout_id);
        self.send(self.http.delete(self.url(&endpoint)))?;
        Ok(())
    }
}
