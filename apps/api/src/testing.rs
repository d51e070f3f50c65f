//! Test doubles for the gateway and store seams, plus a router driver.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::llm_client::{LlmError, LlmGateway, PromptSpec, Provider};
use crate::profile::store::{
    AuthUser, Inserted, NewProfile, ProfileStore, ProfileUpdate, SkillTable, StoreError,
    TripleRow,
};
use crate::routes::build_router;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Gateway
// ────────────────────────────────────────────────────────────────────────────

enum Reply {
    Echo,
    Fixed(String),
    Fail,
}

/// Records every prompt it receives.
pub struct MockGateway {
    provider: Provider,
    reply: Reply,
    prompts: Mutex<Vec<PromptSpec>>,
}

impl MockGateway {
    fn new(provider: Provider, reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            provider,
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Replies with the prompt text it was given.
    pub fn echo() -> Arc<Self> {
        Self::new(Provider::Groq, Reply::Echo)
    }

    pub fn fixed(text: &str) -> Arc<Self> {
        Self::new(Provider::Groq, Reply::Fixed(text.to_string()))
    }

    pub fn failing(provider: Provider) -> Arc<Self> {
        Self::new(provider, Reply::Fail)
    }

    pub fn legacy(text: &str) -> Arc<Self> {
        Self::new(Provider::OpenAi, Reply::Fixed(text.to_string()))
    }

    pub fn prompts(&self) -> Vec<PromptSpec> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmGateway for MockGateway {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn complete(&self, prompt: &PromptSpec) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.clone());
        match &self.reply {
            Reply::Echo => Ok(prompt.content().to_string()),
            Reply::Fixed(text) => Ok(text.clone()),
            Reply::Fail => Err(LlmError::EmptyContent),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Store
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Tables {
    rows: HashMap<SkillTable, Vec<Value>>,
    profiles: HashMap<String, Value>,
    user_info: HashMap<String, Value>,
    users: HashMap<String, AuthUser>,
    ops: Vec<String>,
}

/// In-memory store that logs each operation as `"<op> <table>"`.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail: bool,
}

impl MemoryStore {
    /// Every operation is logged, then fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn with_user_info(self, user_id: &str, info: Value) -> Self {
        self.tables
            .lock()
            .unwrap()
            .user_info
            .insert(user_id.to_string(), info);
        self
    }

    pub fn with_auth_user(self, token: &str, user: AuthUser) -> Self {
        self.tables
            .lock()
            .unwrap()
            .users
            .insert(token.to_string(), user);
        self
    }

    pub fn rows(&self, table: SkillTable) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .rows
            .get(&table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn profile(&self, user_id: &str) -> Option<Value> {
        self.tables.lock().unwrap().profiles.get(user_id).cloned()
    }

    pub fn ops(&self) -> Vec<String> {
        self.tables.lock().unwrap().ops.clone()
    }

    /// Number of insert/update operations attempted.
    pub fn writes(&self) -> usize {
        self.ops()
            .iter()
            .filter(|op| op.starts_with("insert") || op.starts_with("update"))
            .count()
    }

    fn record(&self, op: &str, table: &str) -> Result<(), StoreError> {
        self.tables.lock().unwrap().ops.push(format!("{op} {table}"));
        if self.fail {
            return Err(StoreError::Api {
                status: 503,
                message: "store unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn insert_profile(&self, profile: &NewProfile) -> Result<Inserted, StoreError> {
        self.record("insert", "profiles")?;
        let row = profile.to_json();
        self.tables
            .lock()
            .unwrap()
            .profiles
            .insert(profile.id.clone(), row.clone());
        Ok(Inserted {
            data: json!([row]),
            count: Some(1),
        })
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<Value, StoreError> {
        self.record("update", "profiles")?;
        let mut tables = self.tables.lock().unwrap();
        let row = tables
            .profiles
            .entry(user_id.to_string())
            .or_insert_with(|| json!({ "id": user_id }));
        if let (Some(row), Value::Object(changes)) = (row.as_object_mut(), update.to_json()) {
            row.extend(changes);
        }
        Ok(json!([row.clone()]))
    }

    async fn count_rows(&self, table: SkillTable, user_id: &str) -> Result<u64, StoreError> {
        self.record("count", table.name())?;
        let tables = self.tables.lock().unwrap();
        let count = tables
            .rows
            .get(&table)
            .map(|rows| rows.iter().filter(|r| r["userId"] == user_id).count())
            .unwrap_or(0);
        Ok(count as u64)
    }

    async fn insert_row(&self, table: SkillTable, row: &TripleRow) -> Result<Value, StoreError> {
        self.record("insert", table.name())?;
        let value = row.to_json(table);
        self.tables
            .lock()
            .unwrap()
            .rows
            .entry(table)
            .or_default()
            .push(value.clone());
        Ok(json!([value]))
    }

    async fn update_row(&self, table: SkillTable, row: &TripleRow) -> Result<Value, StoreError> {
        self.record("update", table.name())?;
        let value = row.to_json(table);
        let mut tables = self.tables.lock().unwrap();
        let rows = tables.rows.entry(table).or_default();
        for existing in rows.iter_mut().filter(|r| r["userId"] == row.user_id.as_str()) {
            *existing = value.clone();
        }
        Ok(json!([value]))
    }

    async fn fetch_user_info(&self, user_id: &str) -> Result<Value, StoreError> {
        self.record("select", "profiles")?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .user_info
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| json!([])))
    }

    async fn get_auth_user(&self, access_token: &str) -> Result<AuthUser, StoreError> {
        self.record("auth", "user")?;
        self.tables
            .lock()
            .unwrap()
            .users
            .get(access_token)
            .cloned()
            .ok_or_else(|| StoreError::Api {
                status: 401,
                message: "invalid JWT".to_string(),
            })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Router driver
// ────────────────────────────────────────────────────────────────────────────

pub fn app(llm: Arc<dyn LlmGateway>, store: Arc<dyn ProfileStore>) -> Router {
    build_router(AppState {
        llm,
        legacy_llm: MockGateway::legacy("legacy recommendation"),
        store,
    })
}

/// Sends one request through the router and decodes the JSON reply.
pub async fn send(app: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
