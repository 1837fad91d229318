//src/gateway.rs
use crate::model::{ExerciseName, WorkoutCandidate, WorkoutId, WorkoutRecord};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

/// Failure of any remote call. Callers treat every variant the same way;
/// the variants only exist so the log says what went wrong.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Server returned {status} for {url}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("Cannot build a request URL from {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[async_trait]
pub trait WorkoutGateway: Send + Sync {
    async fn list_exercises(&self) -> Result<Vec<ExerciseName>, FetchError>;
    async fn list_workouts(&self) -> Result<Vec<WorkoutRecord>, FetchError>;
    async fn create_workout(&self, candidate: &WorkoutCandidate) -> Result<(), FetchError>;
    async fn delete_workout(&self, id: &WorkoutId) -> Result<(), FetchError>;
}

/// Monotonic tag attached to every remote request so late responses can be
/// matched against the newest request of their kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub(crate) u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    ListExercises { id: RequestId },
    ListWorkouts { id: RequestId },
    CreateWorkout { id: RequestId, candidate: WorkoutCandidate },
    DeleteWorkout { id: RequestId, workout_id: WorkoutId },
}

impl Request {
    pub fn id(&self) -> RequestId {
        match self {
            Request::ListExercises { id }
            | Request::ListWorkouts { id }
            | Request::CreateWorkout { id, .. }
            | Request::DeleteWorkout { id, .. } => *id,
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    ExercisesListed {
        id: RequestId,
        result: Result<Vec<ExerciseName>, FetchError>,
    },
    WorkoutsListed {
        id: RequestId,
        result: Result<Vec<WorkoutRecord>, FetchError>,
    },
    WorkoutCreated {
        id: RequestId,
        result: Result<(), FetchError>,
    },
    WorkoutDeleted {
        id: RequestId,
        workout_id: WorkoutId,
        result: Result<(), FetchError>,
    },
}

/// Performs one request against the gateway and wraps the result.
pub async fn execute(gateway: &dyn WorkoutGateway, request: Request) -> Outcome {
    debug!("Executing request {}", request.id());
    match request {
        Request::ListExercises { id } => Outcome::ExercisesListed {
            id,
            result: gateway.list_exercises().await,
        },
        Request::ListWorkouts { id } => Outcome::WorkoutsListed {
            id,
            result: gateway.list_workouts().await,
        },
        Request::CreateWorkout { id, candidate } => Outcome::WorkoutCreated {
            id,
            result: gateway.create_workout(&candidate).await,
        },
        Request::DeleteWorkout { id, workout_id } => {
            let result = gateway.delete_workout(&workout_id).await;
            Outcome::WorkoutDeleted {
                id,
                workout_id,
                result,
            }
        }
    }
}

/// JSON-over-HTTP implementation of [`WorkoutGateway`].
pub struct HttpGateway {
    http_client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http_client: Client::new(),
            base_url: trim_base_url(base_url.into()),
        }
    }

    /// Builds a gateway whose requests give up after `timeout`.
    ///
    /// # Errors
    /// Returns `reqwest::Error` if the TLS backend cannot be initialised.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: trim_base_url(base_url.into()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// `{base}/workouts/{id}`, with the id percent-encoded as one segment.
    fn workout_url(&self, id: &WorkoutId) -> Result<Url, FetchError> {
        let collection = self.url("workouts");
        let invalid = |reason: String| FetchError::InvalidUrl {
            url: collection.clone(),
            reason,
        };
        let mut url = Url::parse(&collection).map_err(|e| invalid(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("URL cannot have path segments".to_string()))?
            .push(id.as_str());
        Ok(url)
    }

    async fn ensure_success(url: &str, response: Response) -> Result<Response, FetchError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error body".to_string());
        error!("{} returned status {}. Body: {}", url, status, body);
        Err(FetchError::Status {
            url: url.to_string(),
            status,
            body,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        info!("Sending GET to {}", url);
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;
        let response = Self::ensure_success(&url, response).await?;
        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;
        serde_json::from_str(&body).map_err(|source| FetchError::Decode { url, source })
    }
}

fn trim_base_url(base_url: String) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[async_trait]
impl WorkoutGateway for HttpGateway {
    async fn list_exercises(&self) -> Result<Vec<ExerciseName>, FetchError> {
        let exercises: Vec<ExerciseName> = self.get_json(self.url("exercises")).await?;
        info!("Received {} catalog exercises", exercises.len());
        Ok(exercises)
    }

    async fn list_workouts(&self) -> Result<Vec<WorkoutRecord>, FetchError> {
        let workouts: Vec<WorkoutRecord> = self.get_json(self.url("workouts")).await?;
        info!("Received {} workouts", workouts.len());
        Ok(workouts)
    }

    async fn create_workout(&self, candidate: &WorkoutCandidate) -> Result<(), FetchError> {
        let url = self.url("workouts");
        info!("Sending POST to {} for '{}'", url, candidate.exercise);
        debug!("Posting payload: {:?}", candidate);

        let response = self
            .http_client
            .post(&url)
            .json(candidate)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.clone(),
                source,
            })?;
        Self::ensure_success(&url, response).await?;
        Ok(())
    }

    async fn delete_workout(&self, id: &WorkoutId) -> Result<(), FetchError> {
        let url = self.workout_url(id)?;
        info!("Sending DELETE to {}", url);

        let response = self
            .http_client
            .delete(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;
        Self::ensure_success(url.as_str(), response).await?;
        Ok(())
    }
}
