//! Transport, connection, balancer and credentials hooks.

use super::{ConnState, DriverError, Endpoint, OnStart, OnStartStream};

#[derive(Debug, Clone, Default)]
pub struct NetReadStartInfo {
    pub address: String,
}

#[derive(Debug, Clone, Default)]
pub struct NetReadDoneInfo {
    pub received: usize,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct NetWriteStartInfo {
    pub address: String,
}

#[derive(Debug, Clone, Default)]
pub struct NetWriteDoneInfo {
    pub sent: usize,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct NetDialStartInfo {
    pub address: String,
}

#[derive(Debug, Clone, Default)]
pub struct NetDialDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct NetCloseStartInfo {
    pub address: String,
}

#[derive(Debug, Clone, Default)]
pub struct NetCloseDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct ConnTakeStartInfo {
    pub endpoint: Endpoint,
}

#[derive(Debug, Clone, Default)]
pub struct ConnTakeDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct ConnReleaseStartInfo {
    pub endpoint: Endpoint,
}

#[derive(Debug, Clone, Default)]
pub struct ConnReleaseDoneInfo {
    /// Remaining usages of the connection after release.
    pub locks: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ConnStateChangeStartInfo {
    pub endpoint: Endpoint,
    pub state: ConnState,
}

#[derive(Debug, Clone, Default)]
pub struct ConnStateChangeDoneInfo {
    pub state: ConnState,
}

#[derive(Debug, Clone, Default)]
pub struct ConnInvokeStartInfo {
    pub endpoint: Endpoint,
    pub method: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConnInvokeDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct ConnNewStreamStartInfo {
    pub endpoint: Endpoint,
    pub method: String,
}

#[derive(Debug, Clone, Default)]
pub struct ConnNewStreamRecvInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct ConnNewStreamDoneInfo {
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct DiscoveryStartInfo {
    pub address: String,
}

#[derive(Debug, Clone, Default)]
pub struct DiscoveryDoneInfo {
    pub endpoints: Vec<String>,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct BalancerGetStartInfo {}

#[derive(Debug, Clone, Default)]
pub struct BalancerGetDoneInfo {
    pub endpoint: Option<Endpoint>,
    pub error: Option<DriverError>,
}

/// Start payload shared by balancer insert/remove/update.
#[derive(Debug, Clone, Default)]
pub struct BalancerChangeStartInfo {
    pub endpoint: Endpoint,
}

#[derive(Debug, Clone, Default)]
pub struct BalancerChangeDoneInfo {
    pub state: ConnState,
}

#[derive(Debug, Clone, Default)]
pub struct PessimizeNodeStartInfo {
    pub endpoint: Endpoint,
    pub state: ConnState,
    pub cause: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct PessimizeNodeDoneInfo {
    pub state: ConnState,
    pub error: Option<DriverError>,
}

#[derive(Debug, Clone, Default)]
pub struct GetCredentialsStartInfo {}

#[derive(Debug, Clone, Default)]
pub struct GetCredentialsDoneInfo {
    pub token_ok: bool,
    pub error: Option<DriverError>,
}

/// Hook set of the driver core.
#[derive(Default)]
pub struct Driver {
    pub on_net_read: Option<OnStart<NetReadStartInfo, NetReadDoneInfo>>,
    pub on_net_write: Option<OnStart<NetWriteStartInfo, NetWriteDoneInfo>>,
    pub on_net_dial: Option<OnStart<NetDialStartInfo, NetDialDoneInfo>>,
    pub on_net_close: Option<OnStart<NetCloseStartInfo, NetCloseDoneInfo>>,

    pub on_conn_take: Option<OnStart<ConnTakeStartInfo, ConnTakeDoneInfo>>,
    pub on_conn_release: Option<OnStart<ConnReleaseStartInfo, ConnReleaseDoneInfo>>,
    pub on_conn_state_change: Option<OnStart<ConnStateChangeStartInfo, ConnStateChangeDoneInfo>>,
    pub on_conn_invoke: Option<OnStart<ConnInvokeStartInfo, ConnInvokeDoneInfo>>,
    pub on_conn_new_stream:
        Option<OnStartStream<ConnNewStreamStartInfo, ConnNewStreamRecvInfo, ConnNewStreamDoneInfo>>,

    pub on_discovery: Option<OnStart<DiscoveryStartInfo, DiscoveryDoneInfo>>,

    pub on_balancer_get: Option<OnStart<BalancerGetStartInfo, BalancerGetDoneInfo>>,
    pub on_balancer_insert: Option<OnStart<BalancerChangeStartInfo, BalancerChangeDoneInfo>>,
    pub on_balancer_remove: Option<OnStart<BalancerChangeStartInfo, BalancerChangeDoneInfo>>,
    pub on_balancer_update: Option<OnStart<BalancerChangeStartInfo, BalancerChangeDoneInfo>>,
    pub on_pessimize_node: Option<OnStart<PessimizeNodeStartInfo, PessimizeNodeDoneInfo>>,

    pub on_get_credentials: Option<OnStart<GetCredentialsStartInfo, GetCredentialsDoneInfo>>,
}

