use serde::Deserialize;
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct CreateBoardEntryRequest {
    pub job_name: String,
    pub organization: String,
    #[serde(default)]
    pub total_volunteers: i32,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub closed_at: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBoardEntryRequest {
    pub job_name: Option<String>,
    pub organization: Option<String>,
    pub total_volunteers: Option<i32>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub closed_at: Option<OffsetDateTime>,
}
