use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpdateVolunteerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    /// New secret; when absent the stored hash is left untouched.
    pub password: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

const MAX_LIMIT: i64 = 100;

impl Pagination {
    /// Sanitized (limit, offset). Query-string values are client input;
    /// negatives or oversized limits must not reach the database.
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.clamp(0, MAX_LIMIT), self.offset.max(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_negative_paging() {
        let p = Pagination {
            limit: -1,
            offset: -5,
        };
        assert_eq!(p.clamped(), (0, 0));
    }

    #[test]
    fn caps_oversized_limit() {
        let p = Pagination {
            limit: 1000,
            offset: 3,
        };
        assert_eq!(p.clamped(), (100, 3));
    }

    #[test]
    fn passes_through_sane_values() {
        let p = Pagination {
            limit: 20,
            offset: 40,
        };
        assert_eq!(p.clamped(), (20, 40));
    }
}
