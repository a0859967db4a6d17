//! In-memory transports shared by the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use sfdc_cli::api::{HttpRequest, HttpResponse, SessionContext, Transport};

pub const INSTANCE_URL: &str = "https://example.my.salesforce.com";
pub const TOKEN: &str = "00Dxx0000000001!token";
pub const API_VERSION: &str = "59.0";

pub fn session() -> SessionContext {
    SessionContext::new(TOKEN, INSTANCE_URL, API_VERSION).expect("valid session")
}

/// Replays canned responses in order and records every request
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new(responses: Vec<HttpResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> anyhow::Result<HttpResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("connection refused"))
    }
}

/// A tiny record store speaking the sObject REST conventions.
///
/// Accounts require a `Name`; every request must carry the session's bearer token.
#[derive(Default)]
pub struct FakeOrg {
    records: Mutex<HashMap<String, (String, Value)>>,
    next_id: Mutex<u32>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl FakeOrg {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    fn handle(&self, request: &HttpRequest) -> HttpResponse {
        let expected = format!("Bearer {}", TOKEN);
        if request.header_value("Authorization") != Some(expected.as_str()) {
            return error(401, "INVALID_SESSION_ID", "Session expired or invalid");
        }

        let prefix = format!("{}/services/data/v{}/sobjects/", INSTANCE_URL, API_VERSION);
        let Some(path) = request.url.strip_prefix(&prefix) else {
            return error(404, "NOT_FOUND", "The requested resource does not exist");
        };
        let mut segments = path.split('/');
        let record_type = segments.next().unwrap_or_default().to_string();
        let id = segments.next().map(str::to_string);

        let mut records = self.records.lock().unwrap();
        match (request.method.clone(), id) {
            (Method::POST, None) => {
                let fields: Value = match request.body.as_deref().map(serde_json::from_str::<Value>) {
                    Some(Ok(fields)) => fields,
                    _ => return error(400, "JSON_PARSER_ERROR", "Invalid body"),
                };
                if record_type == "Account" && fields.get("Name").is_none() {
                    return error(400, "REQUIRED_FIELD_MISSING", "Required fields are missing: [Name]");
                }
                let mut next_id = self.next_id.lock().unwrap();
                *next_id += 1;
                let id = format!("001xx{:010}", *next_id);
                records.insert(id.clone(), (record_type, fields));
                HttpResponse::new(201, json!({"id": id, "success": true, "errors": []}).to_string())
            }
            (Method::GET, None) => HttpResponse::new(
                200,
                json!({"objectDescribe": {"name": record_type}, "recentItems": []}).to_string(),
            ),
            (Method::GET, Some(id)) => match records.get(&id) {
                Some((stored_type, fields)) if *stored_type == record_type => {
                    let mut body = fields.clone();
                    body["Id"] = json!(id);
                    HttpResponse::new(200, body.to_string())
                }
                _ => not_found(),
            },
            (Method::PATCH, Some(id)) => match records.get_mut(&id) {
                Some((stored_type, fields)) if *stored_type == record_type => {
                    let changes: Value = match request.body.as_deref().map(serde_json::from_str::<Value>) {
                        Some(Ok(changes)) => changes,
                        _ => return error(400, "JSON_PARSER_ERROR", "Invalid body"),
                    };
                    if let (Some(target), Some(changes)) = (fields.as_object_mut(), changes.as_object()) {
                        for (key, value) in changes {
                            target.insert(key.clone(), value.clone());
                        }
                    }
                    HttpResponse::new(204, "")
                }
                _ => not_found(),
            },
            (Method::DELETE, Some(id)) => {
                let exists = records.get(&id).is_some_and(|(stored_type, _)| *stored_type == record_type);
                if exists {
                    records.remove(&id);
                    HttpResponse::new(204, "")
                } else {
                    not_found()
                }
            }
            _ => error(405, "METHOD_NOT_ALLOWED", "HTTP Method not allowed"),
        }
    }
}

#[async_trait]
impl Transport for FakeOrg {
    async fn send(&self, request: HttpRequest) -> anyhow::Result<HttpResponse> {
        let response = self.handle(&request);
        self.requests.lock().unwrap().push(request);
        Ok(response)
    }
}

fn error(status: u16, code: &str, message: &str) -> HttpResponse {
    HttpResponse::new(status, json!([{"errorCode": code, "message": message}]).to_string())
}

fn not_found() -> HttpResponse {
    error(404, "NOT_FOUND", "The requested resource does not exist")
}
