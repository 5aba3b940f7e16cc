use std::time::Instant;

use crate::field::{latency, version, Field};
use crate::level::log_debug_warn;
use crate::logger::Logger;
use crate::trace::driver::*;
use crate::trace::error::as_dyn;
use crate::trace::{Detailer, Details, Driver, DriverError, Endpoint, OnDone, OnIntermediate, OnStart};

/// Driver-core hooks, logged under `driver`.
///
/// Each category bit enables one sub-scope: `driver.net`, `driver.conn`,
/// `driver.discovery`, `driver.balancer` and `driver.credentials`.
pub fn driver(log: &Logger, d: impl Detailer) -> Driver {
    let details = d.details();
    let log = log.named("driver");
    let mut t = Driver::default();
    if details.contains(Details::DRIVER_NET) {
        net(&log.named("net"), &mut t);
    }
    if details.contains(Details::DRIVER_CONN) {
        conn(&log.named("conn"), &mut t);
    }
    if details.contains(Details::DRIVER_DISCOVERY) {
        let log = log.named("discovery");
        t.on_discovery = Some(Box::new(move |info: DiscoveryStartInfo| -> OnDone<DiscoveryDoneInfo> {
            log.debug("try to discover", vec![Field::string("address", info.address.as_str())]);
            let (log, start) = (log.clone(), Instant::now());
            Box::new(move |done: DiscoveryDoneInfo| {
                complete(
                    &log,
                    &done.error,
                    "discover finished",
                    vec![
                        Field::string("address", info.address),
                        latency(start),
                        Field::strings("endpoints", done.endpoints),
                    ],
                )
            })
        }));
    }
    if details.contains(Details::DRIVER_BALANCER) {
        balancer(&log.named("balancer"), &mut t);
    }
    if details.contains(Details::DRIVER_CREDENTIALS) {
        let log = log.named("credentials");
        t.on_get_credentials = Some(Box::new(
            move |_: GetCredentialsStartInfo| -> OnDone<GetCredentialsDoneInfo> {
                log.debug("getting", vec![]);
                let (log, start) = (log.clone(), Instant::now());
                Box::new(move |done: GetCredentialsDoneInfo| {
                    complete(
                        &log,
                        &done.error,
                        "got",
                        vec![latency(start), Field::bool("token ok", done.token_ok)],
                    )
                })
            },
        ));
    }
    t
}

/// Debug on success; warn with `version` and `error` on failure.
fn complete(log: &Logger, err: &Option<DriverError>, msg: &str, mut fields: Vec<Field>) {
    if err.is_some() {
        fields.insert(0, version());
    }
    log_debug_warn(log, as_dyn(err), msg, fields)
}

fn balancer_fields(endpoint: &Endpoint) -> Vec<Field> {
    vec![
        Field::string("address", endpoint.address.as_str()),
        Field::bool("local", endpoint.local_dc),
    ]
}

fn endpoint_fields(endpoint: &Endpoint) -> Vec<Field> {
    vec![
        Field::string("address", endpoint.address.as_str()),
        Field::bool("dataCenter", endpoint.local_dc),
    ]
}

fn net(log: &Logger, t: &mut Driver) {
    let l = log.clone();
    t.on_net_read = Some(Box::new(move |info: NetReadStartInfo| -> OnDone<NetReadDoneInfo> {
        l.debug("try to read", vec![Field::string("address", info.address.as_str())]);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: NetReadDoneInfo| {
            complete(
                &log,
                &done.error,
                "read",
                vec![
                    Field::string("address", info.address),
                    latency(start),
                    Field::uint("received", done.received as u64),
                ],
            )
        })
    }));
    let l = log.clone();
    t.on_net_write = Some(Box::new(move |info: NetWriteStartInfo| -> OnDone<NetWriteDoneInfo> {
        l.debug("try to write", vec![Field::string("address", info.address.as_str())]);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: NetWriteDoneInfo| {
            complete(
                &log,
                &done.error,
                "wrote",
                vec![
                    Field::string("address", info.address),
                    latency(start),
                    Field::uint("sent", done.sent as u64),
                ],
            )
        })
    }));
    let l = log.clone();
    t.on_net_dial = Some(Box::new(move |info: NetDialStartInfo| -> OnDone<NetDialDoneInfo> {
        l.debug("try to dial", vec![Field::string("address", info.address.as_str())]);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: NetDialDoneInfo| {
            complete(
                &log,
                &done.error,
                "dialed",
                vec![Field::string("address", info.address), latency(start)],
            )
        })
    }));
    let l = log.clone();
    t.on_net_close = Some(Box::new(move |info: NetCloseStartInfo| -> OnDone<NetCloseDoneInfo> {
        l.debug("try to close", vec![Field::string("address", info.address.as_str())]);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: NetCloseDoneInfo| {
            complete(
                &log,
                &done.error,
                "closed",
                vec![Field::string("address", info.address), latency(start)],
            )
        })
    }));
}

fn conn(log: &Logger, t: &mut Driver) {
    let l = log.clone();
    t.on_conn_take = Some(Box::new(move |info: ConnTakeStartInfo| -> OnDone<ConnTakeDoneInfo> {
        l.debug("try to take conn", endpoint_fields(&info.endpoint));
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: ConnTakeDoneInfo| {
            let mut fields = endpoint_fields(&info.endpoint);
            fields.push(latency(start));
            complete(&log, &done.error, "conn took", fields)
        })
    }));
    let l = log.clone();
    t.on_conn_release = Some(Box::new(move |info: ConnReleaseStartInfo| -> OnDone<ConnReleaseDoneInfo> {
        l.debug("try to release conn", endpoint_fields(&info.endpoint));
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: ConnReleaseDoneInfo| {
            let mut fields = endpoint_fields(&info.endpoint);
            fields.extend([latency(start), Field::int("locks", done.locks)]);
            log.debug("conn released", fields)
        })
    }));
    let l = log.clone();
    t.on_conn_state_change = Some(Box::new(
        move |info: ConnStateChangeStartInfo| -> OnDone<ConnStateChangeDoneInfo> {
            let mut fields = endpoint_fields(&info.endpoint);
            fields.push(Field::stringer("state before", &info.state));
            l.debug("conn state change", fields);
            let (log, start) = (l.clone(), Instant::now());
            Box::new(move |done: ConnStateChangeDoneInfo| {
                let mut fields = endpoint_fields(&info.endpoint);
                fields.extend([
                    latency(start),
                    Field::stringer("state before", &info.state),
                    Field::stringer("state after", &done.state),
                ]);
                log.debug("conn state changed", fields)
            })
        },
    ));
    let l = log.clone();
    t.on_conn_invoke = Some(Box::new(move |info: ConnInvokeStartInfo| -> OnDone<ConnInvokeDoneInfo> {
        let mut fields = endpoint_fields(&info.endpoint);
        fields.push(Field::string("method", info.method.as_str()));
        l.debug("try to invoke", fields);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: ConnInvokeDoneInfo| {
            let mut fields = endpoint_fields(&info.endpoint);
            fields.extend([Field::string("method", info.method), latency(start)]);
            complete(&log, &done.error, "invoked", fields)
        })
    }));
    let l = log.clone();
    t.on_conn_new_stream = Some(Box::new(
        move |info: ConnNewStreamStartInfo| -> OnIntermediate<ConnNewStreamRecvInfo, ConnNewStreamDoneInfo> {
            let mut fields = endpoint_fields(&info.endpoint);
            fields.push(Field::string("method", info.method.as_str()));
            l.debug("try to streaming", fields.clone());
            let (log, start) = (l.clone(), Instant::now());
            Box::new(move |recv: ConnNewStreamRecvInfo| -> OnDone<ConnNewStreamDoneInfo> {
                let mut intermediate = fields.clone();
                intermediate.push(latency(start));
                complete(&log, &recv.error, "streaming intermediate receive", intermediate);
                let (log, mut fields) = (log.clone(), fields.clone());
                Box::new(move |done: ConnNewStreamDoneInfo| {
                    fields.push(latency(start));
                    complete(&log, &done.error, "streaming finished", fields)
                })
            })
        },
    ));
}

/// Insert, remove and update share one shape and always log at debug.
fn balancer_change(
    log: &Logger,
    start_msg: &'static str,
    done_msg: &'static str,
) -> OnStart<BalancerChangeStartInfo, BalancerChangeDoneInfo> {
    let l = log.clone();
    Box::new(move |info: BalancerChangeStartInfo| -> OnDone<BalancerChangeDoneInfo> {
        l.debug(start_msg, balancer_fields(&info.endpoint));
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: BalancerChangeDoneInfo| {
            let mut fields = balancer_fields(&info.endpoint);
            fields.extend([latency(start), Field::stringer("state", &done.state)]);
            log.debug(done_msg, fields)
        })
    })
}

fn balancer(log: &Logger, t: &mut Driver) {
    let l = log.clone();
    t.on_balancer_get = Some(Box::new(move |_: BalancerGetStartInfo| -> OnDone<BalancerGetDoneInfo> {
        l.debug("try to get conn", vec![]);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: BalancerGetDoneInfo| {
            let mut fields = vec![latency(start)];
            if let Some(endpoint) = &done.endpoint {
                fields.extend([
                    Field::string("address", endpoint.address.as_str()),
                    Field::bool("local", endpoint.local_dc),
                ]);
            }
            complete(&log, &done.error, "conn got", fields)
        })
    }));
    t.on_balancer_insert = Some(balancer_change(log, "inserting", "inserted"));
    t.on_balancer_remove = Some(balancer_change(log, "removing", "removed"));
    t.on_balancer_update = Some(balancer_change(log, "updating", "updated"));
    let l = log.clone();
    t.on_pessimize_node = Some(Box::new(move |info: PessimizeNodeStartInfo| -> OnDone<PessimizeNodeDoneInfo> {
        let mut fields = balancer_fields(&info.endpoint);
        fields.push(Field::stringer("state", &info.state));
        if let Some(cause) = &info.cause {
            fields.push(Field::named_error("cause", cause));
        }
        l.debug("pessimizing", fields);
        let (log, start) = (l.clone(), Instant::now());
        Box::new(move |done: PessimizeNodeDoneInfo| {
            let mut fields = balancer_fields(&info.endpoint);
            fields.extend([latency(start), Field::stringer("state", &done.state)]);
            complete(&log, &done.error, "pessimized", fields)
        })
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::field::Value;
    use crate::level::Level;
    use crate::trace::{self, ConnState, DriverError, RetryMode};
    use std::sync::Arc;

    fn node() -> Endpoint {
        Endpoint { node_id: 3, address: "n3:2135".into(), location: "sas".into(), local_dc: true }
    }

    #[test]
    fn only_enabled_scopes_are_wired() {
        let log = Logger::new(Arc::new(MemoryBackend::new()));
        let t = driver(&log, Details::DRIVER_NET);
        assert!(t.on_net_read.is_some());
        assert!(t.on_net_close.is_some());
        assert!(t.on_conn_take.is_none());
        assert!(t.on_balancer_get.is_none());
        assert!(t.on_get_credentials.is_none());
    }

    #[test]
    fn failed_dial_is_warn() {
        let backend = Arc::new(MemoryBackend::new());
        let t = driver(&Logger::new(backend.clone()), Details::DRIVER);

        let done = trace::start(&t.on_net_dial, NetDialStartInfo { address: "n1:2135".into() });
        done(NetDialDoneInfo {
            error: Some(DriverError::Transport {
                code: 14,
                message: "unavailable".into(),
                retry: RetryMode::Always,
                delete_session: false,
            }),
        });

        let records = backend.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].logger, "driver.net");
        assert_eq!(records[1].message, "dialed");
        assert_eq!(records[1].level, Level::Warn);
        assert!(records[1].field("error").is_some());
        assert!(records[1].field("version").is_some());
        assert!(records[0].field("version").is_none());
    }

    #[test]
    fn failed_discovery_carries_version() {
        let backend = Arc::new(MemoryBackend::new());
        let t = driver(&Logger::new(backend.clone()), Details::DRIVER_DISCOVERY);

        trace::start(&t.on_discovery, DiscoveryStartInfo { address: "n1:2135".into() })(DiscoveryDoneInfo {
            endpoints: vec![],
            error: Some(DriverError::Transport {
                code: 4,
                message: "deadline exceeded".into(),
                retry: RetryMode::Always,
                delete_session: false,
            }),
        });
        trace::start(&t.on_discovery, DiscoveryStartInfo { address: "n1:2135".into() })(DiscoveryDoneInfo {
            endpoints: vec!["n2:2135".into()],
            error: None,
        });

        let records = backend.records();
        assert_eq!(records[1].logger, "driver.discovery");
        assert_eq!(records[1].message, "discover finished");
        assert_eq!(records[1].level, Level::Warn);
        assert!(records[1].field("version").is_some());
        assert_eq!(records[3].level, Level::Debug);
        assert!(records[3].field("version").is_none());
    }

    #[test]
    fn state_change_reports_both_states() {
        let backend = Arc::new(MemoryBackend::new());
        let t = driver(&Logger::new(backend.clone()), Details::DRIVER_CONN);

        let done = trace::start(
            &t.on_conn_state_change,
            ConnStateChangeStartInfo { endpoint: node(), state: ConnState::Online },
        );
        done(ConnStateChangeDoneInfo { state: ConnState::Banned });

        let last = backend.records().pop().unwrap();
        assert_eq!(last.message, "conn state changed");
        assert_eq!(last.field("state before"), Some(&Value::Str("online".into())));
        assert_eq!(last.field("state after"), Some(&Value::Str("banned".into())));
        assert_eq!(last.field("dataCenter"), Some(&Value::Bool(true)));
    }

    #[test]
    fn balancer_updates_are_always_debug() {
        let backend = Arc::new(MemoryBackend::new());
        let t = driver(&Logger::new(backend.clone()), Details::DRIVER_BALANCER);

        trace::start(&t.on_balancer_insert, BalancerChangeStartInfo { endpoint: node() })(
            BalancerChangeDoneInfo { state: ConnState::Online },
        );
        trace::start(&t.on_balancer_remove, BalancerChangeStartInfo { endpoint: node() })(
            BalancerChangeDoneInfo { state: ConnState::Offline },
        );

        let records = backend.records();
        let messages: Vec<_> = records.iter().map(|r| r.message.as_str()).collect();
        assert_eq!(messages, ["inserting", "inserted", "removing", "removed"]);
        assert!(records.iter().all(|r| r.level == Level::Debug && r.logger == "driver.balancer"));
        assert!(records.iter().all(|r| r.field("local") == Some(&Value::Bool(true))));
        assert!(records.iter().all(|r| r.field("dataCenter").is_none()));
        assert_eq!(records[1].field("address"), Some(&Value::Str("n3:2135".into())));
    }

    #[test]
    fn pessimize_reports_local_and_cause() {
        let backend = Arc::new(MemoryBackend::new());
        let t = driver(&Logger::new(backend.clone()), Details::DRIVER_BALANCER);

        let done = trace::start(
            &t.on_pessimize_node,
            PessimizeNodeStartInfo {
                endpoint: node(),
                state: ConnState::Online,
                cause: Some(DriverError::Transport {
                    code: 14,
                    message: "unavailable".into(),
                    retry: RetryMode::Always,
                    delete_session: false,
                }),
            },
        );
        done(PessimizeNodeDoneInfo { state: ConnState::Banned, error: None });

        let records = backend.records();
        assert!(records[0].field("cause").is_some());
        assert_eq!(records[0].field("local"), Some(&Value::Bool(true)));
        assert_eq!(records[1].message, "pessimized");
        assert_eq!(records[1].field("local"), Some(&Value::Bool(true)));
        assert_eq!(records[1].field("state"), Some(&Value::Str("banned".into())));
        assert!(records[1].field("dataCenter").is_none());
    }

    #[test]
    fn new_stream_logs_three_stages() {
        let backend = Arc::new(MemoryBackend::new());
        let t = driver(&Logger::new(backend.clone()), Details::DRIVER_CONN);

        let mut recv = trace::start_stream(
            &t.on_conn_new_stream,
            ConnNewStreamStartInfo { endpoint: node(), method: "/Table.StreamRead".into() },
        );
        let _ = recv(ConnNewStreamRecvInfo { error: None });
        recv(ConnNewStreamRecvInfo { error: None })(ConnNewStreamDoneInfo { error: None });

        let messages: Vec<_> = backend.records().into_iter().map(|r| r.message).collect();
        assert_eq!(
            messages,
            [
                "try to streaming",
                "streaming intermediate receive",
                "streaming intermediate receive",
                "streaming finished"
            ]
        );
    }
}
