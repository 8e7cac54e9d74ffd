use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateParticipationRequest {
    pub job_id: i64,
    pub volunteer_id: i64,
    #[serde(default)]
    pub openings: i32,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub activity: String,
}
