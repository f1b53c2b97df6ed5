//! serde defaults shared by the agent and server config files

pub fn _default_report_path() -> String {
    "/api/asset/report".to_string()
}

pub fn _default_request_timeout() -> u64 {
    30
}
