use crate::error::ApiError;
use crate::model::IncentivesResponse;

/// Anything that can answer "which incentives apply in this state".
#[allow(async_fn_in_trait)]
pub trait IncentiveSource {
    async fn incentives_for_state(&self, state: &str) -> Result<IncentivesResponse, ApiError>;
}

/// Fixed responses keyed by state abbreviation; unknown states fail.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    responses: Vec<(String, IncentivesResponse)>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(mut self, state: &str, response: IncentivesResponse) -> Self {
        self.responses.push((state.to_string(), response));
        self
    }
}

impl IncentiveSource for StaticSource {
    async fn incentives_for_state(&self, state: &str) -> Result<IncentivesResponse, ApiError> {
        self.responses
            .iter()
            .find(|(s, _)| s == state)
            .map(|(_, r)| r.clone())
            .ok_or_else(|| ApiError::Status {
                state: state.to_string(),
                status: 404,
            })
    }
}
