use super::{DriverError, Endpoint, OnStart};

#[derive(Debug, Clone, Default)]
pub struct DiscoverStartInfo {
    pub address: String,
    pub database: String,
}

#[derive(Debug, Clone, Default)]
pub struct DiscoverDoneInfo {
    pub endpoints: Vec<Endpoint>,
    pub error: Option<DriverError>,
}

/// Hook set of the discovery client.
#[derive(Default)]
pub struct Discovery {
    pub on_discover: Option<OnStart<DiscoverStartInfo, DiscoverDoneInfo>>,
}
