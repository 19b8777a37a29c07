//! Lookup Worker Thread
//!
//! Runs address API calls on a background thread so the UI never blocks.
//! Requests arrive on an unbounded tokio channel; responses go back on a
//! std channel that the controller drains from the UI thread.
//!
//! Searches are debounced here. Each API call is spawned as its own task
//! with a timeout, so responses may come back in any order. The controller
//! sorts that out with request tokens.

use std::future::Future;
use std::io;
use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::{Instant, sleep_until, timeout};

use crate::address::{AddressRecord, KeyStatus, Suggestion};
use crate::api::{AddressApi, AutocompleteQuery, ClientOptions, DEFAULT_TIMEOUT, LookupError};
use crate::debouncer::{DEFAULT_DEBOUNCE, Debouncer};
use crate::sequencer::RequestToken;

/// Work for the lookup thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerRequest {
    /// Debounced autocomplete search
    Search {
        query: AutocompleteQuery,
        token: RequestToken,
    },
    ResolveUdprn {
        id: i64,
        options: ClientOptions,
    },
    ResolveUmprn {
        id: i64,
        options: ClientOptions,
    },
    CheckKey {
        options: ClientOptions,
    },
}

/// Result of one API call
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerResponse {
    Suggestions {
        token: Option<RequestToken>,
        /// The search this answers
        query: AutocompleteQuery,
        result: Result<Vec<Suggestion>, LookupError>,
    },
    Address {
        result: Result<Option<AddressRecord>, LookupError>,
    },
    KeyCheck {
        result: Result<KeyStatus, LookupError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSettings {
    /// Quiet period before a search is sent
    pub debounce: Duration,
    /// Per-call limit, after which the call fails with a timeout
    pub timeout: Duration,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Spawn the lookup worker thread
///
/// The thread owns a single-threaded tokio runtime and exits once every
/// request sender has been dropped.
pub fn spawn_worker<A>(
    api: A,
    settings: WorkerSettings,
    request_rx: UnboundedReceiver<WorkerRequest>,
    response_tx: Sender<WorkerResponse>,
) -> io::Result<JoinHandle<()>>
where
    A: AddressApi + 'static,
{
    std::thread::Builder::new()
        .name("idpc-lookup".to_string())
        .spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    log::error!("Failed to start lookup runtime: {}", e);
                    return;
                }
            };
            runtime.block_on(worker_loop(Arc::new(api), settings, request_rx, response_tx));
        })
}

/// Main worker loop - processes requests until the channel is closed
async fn worker_loop<A>(
    api: Arc<A>,
    settings: WorkerSettings,
    mut request_rx: UnboundedReceiver<WorkerRequest>,
    response_tx: Sender<WorkerResponse>,
) where
    A: AddressApi + 'static,
{
    let mut debouncer = Debouncer::new(settings.debounce);
    let mut pending: Option<(AutocompleteQuery, RequestToken)> = None;

    loop {
        let deadline = debouncer
            .deadline()
            .map(Instant::from_std)
            .unwrap_or_else(Instant::now);

        tokio::select! {
            request = request_rx.recv() => {
                let Some(request) = request else {
                    break;
                };
                match request {
                    WorkerRequest::Search { query, token } => {
                        if let Some((_, superseded)) = &pending {
                            log::debug!("Search {} superseded by {}", superseded, token);
                        }
                        debouncer.trigger(Instant::now().into_std());
                        pending = Some((query, token));
                    }
                    other => dispatch(&api, settings.timeout, other, &response_tx),
                }
            }
            _ = sleep_until(deadline), if debouncer.is_pending() => {
                if debouncer.fire(Instant::now().into_std())
                    && let Some((query, token)) = pending.take()
                {
                    dispatch(
                        &api,
                        settings.timeout,
                        WorkerRequest::Search { query, token },
                        &response_tx,
                    );
                }
            }
        }
    }

    log::debug!("Lookup worker thread shutting down");
}

/// Spawn the API call for a request on its own task
fn dispatch<A>(
    api: &Arc<A>,
    limit: Duration,
    request: WorkerRequest,
    response_tx: &Sender<WorkerResponse>,
) where
    A: AddressApi + 'static,
{
    let api = Arc::clone(api);
    let response_tx = response_tx.clone();

    tokio::spawn(async move {
        let response = match request {
            WorkerRequest::Search { query, token } => {
                log::debug!("Sending search {} for {:?}", token, query.query);
                let result = with_timeout(limit, api.autocomplete(&query)).await;
                WorkerResponse::Suggestions {
                    token: Some(token),
                    query,
                    result,
                }
            }
            WorkerRequest::ResolveUdprn { id, options } => WorkerResponse::Address {
                result: with_timeout(limit, api.resolve_udprn(id, &options)).await,
            },
            WorkerRequest::ResolveUmprn { id, options } => WorkerResponse::Address {
                result: with_timeout(limit, api.resolve_umprn(id, &options)).await,
            },
            WorkerRequest::CheckKey { options } => WorkerResponse::KeyCheck {
                result: with_timeout(limit, api.check_key(&options)).await,
            },
        };

        if response_tx.send(response).is_err() {
            log::debug!("Controller gone, dropping lookup response");
        }
    });
}

async fn with_timeout<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, LookupError>>,
) -> Result<T, LookupError> {
    timeout(limit, call)
        .await
        .unwrap_or_else(|_| Err(LookupError::Timeout))
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
