use std::time::{SystemTime, UNIX_EPOCH};

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct Request {
    pub floor: u8,
    /// Milliseconds since the UNIX epoch. Informational only.
    pub created_at: u64,
}

impl Request {
    pub fn new(floor: u8) -> Self {
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0);
        Request { floor, created_at }
    }
}
