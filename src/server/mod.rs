// src/server/mod.rs
// Webhook endpoint: one request per connection, submissions serialized through the store lock.

pub mod form;
pub mod http;

use std::future::Future;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn};

use crate::sheets::error::{StoreError, StoreResult};
use crate::sheets::pipeline::{submit, SubmissionOutcome, SubmitOptions};
use crate::sheets::record::{stamp_submission_time, Record};
use crate::sheets::store::SheetStore;
use form::{body_kind, record_from_request};
use http::{read_request, write_response, HttpError, HttpRequest, HttpResponse};

pub const GET_MESSAGE: &str = "Use POST method to send data to this URL.";

pub type SharedStore = Arc<Mutex<Box<dyn SheetStore + Send>>>;

pub struct ServerState {
    pub store: SharedStore,
    pub options: SubmitOptions,
    /// Field stamped with the server clock on every submission.
    pub timestamp_field: String,
    pub max_body_bytes: usize,
}

impl ServerState {
    pub fn new(store: Box<dyn SheetStore + Send>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            options: SubmitOptions::default(),
            timestamp_field: "date".to_string(),
            max_body_bytes: 1024 * 1024,
        }
    }

    /// Run one submission while holding the store lock.
    pub fn submit(&self, record: &Record) -> StoreResult<SubmissionOutcome> {
        let mut store = self
            .store
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".into()))?;
        submit(&mut **store, record, &self.options)
    }
}

/// Accept connections on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: Arc<ServerState>,
    shutdown: impl Future<Output = ()>,
) {
    if let Ok(addr) = listener.local_addr() {
        info!("Webhook listening on http://{}", addr);
    }
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                match result {
                    Ok((stream, peer)) => {
                        let state = state.clone();
                        tokio::spawn(async move {
                            if let Err(e) = handle_connection(stream, state).await {
                                debug!("Connection from {} ended with error: {}", peer, e);
                            }
                        });
                    }
                    Err(e) => {
                        warn!("Accept error: {}", e);
                    }
                }
            }
            _ = &mut shutdown => {
                info!("Webhook shutting down");
                break;
            }
        }
    }
}

async fn handle_connection(mut stream: TcpStream, state: Arc<ServerState>) -> std::io::Result<()> {
    let response = match read_request(&mut stream, state.max_body_bytes).await {
        Ok(Some(request)) => route(request, &state).await,
        Ok(None) => return Ok(()),
        Err(HttpError::TooLarge(len)) => {
            warn!("Rejected request body of {} bytes", len);
            HttpResponse::text("413 Payload Too Large", "Request body too large.")
        }
        Err(HttpError::Malformed(reason)) => {
            debug!("Malformed request: {}", reason);
            HttpResponse::text("400 Bad Request", "Malformed request.")
        }
        Err(HttpError::Io(e)) => return Err(e),
    };
    write_response(&mut stream, &response).await
}

async fn route(request: HttpRequest, state: &Arc<ServerState>) -> HttpResponse {
    debug!("{} {}", request.method, request.path);
    match request.method.as_str() {
        "GET" => HttpResponse::html("200 OK", GET_MESSAGE),
        "POST" => handle_post(request, state).await,
        other => {
            debug!("Method {} not allowed", other);
            HttpResponse::text("405 Method Not Allowed", "Method not allowed.")
        }
    }
}

async fn handle_post(request: HttpRequest, state: &Arc<ServerState>) -> HttpResponse {
    let Some(kind) = body_kind(&request) else {
        return HttpResponse::text("415 Unsupported Media Type", "Unsupported content type.");
    };

    let mut record = match record_from_request(&request, kind) {
        Ok(record) => record,
        Err(e) if e.is_client_error() => {
            debug!("Rejected payload: {}", e);
            return HttpResponse::text("400 Bad Request", e.to_string());
        }
        Err(e) => {
            error!("Could not read submission: {}", e);
            return HttpResponse::text("500 Internal Server Error", e.to_string());
        }
    };
    stamp_submission_time(&mut record, &state.timestamp_field, Utc::now());

    let worker_state = state.clone();
    let result = tokio::task::spawn_blocking(move || worker_state.submit(&record)).await;
    match result {
        Ok(Ok(outcome)) => {
            debug!("Submission stored in '{}' at {:?}", outcome.sheet, outcome.data_row);
            HttpResponse::text("200 OK", "")
        }
        Ok(Err(e)) => {
            error!("Submission failed: {}", e);
            HttpResponse::text("500 Internal Server Error", e.to_string())
        }
        Err(e) => {
            error!("Submission task failed: {}", e);
            HttpResponse::text("500 Internal Server Error", "Could not store submission.")
        }
    }
}
