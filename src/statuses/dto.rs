use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateStatusRequest {
    pub job_id: i64,
    pub volunteer_id: i64,
    #[serde(default)]
    pub openings: i32,
    #[serde(default)]
    pub duration: String,
    pub status: String,
}
