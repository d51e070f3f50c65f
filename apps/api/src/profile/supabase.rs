//! `ProfileStore` over the Supabase REST (PostgREST) and Auth HTTP APIs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_RANGE, Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::profile::store::{
    AuthUser, Inserted, NewProfile, ProfileStore, ProfileUpdate, SkillTable, StoreError,
    TripleRow,
};

const REQUEST_TIMEOUT_SECS: u64 = 30;
const USER_INFO_SELECT: &str = "*, careers(*), softskills(*), technicalSkills(*)";

#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
}

#[derive(Clone)]
pub struct SupabaseStore {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseStore {
    pub fn new(base_url: &str, anon_key: String) -> Result<Self, StoreError> {
        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key,
        })
    }

    fn table(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/rest/v1/{table}", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    async fn rows(response: Response) -> Result<Value, StoreError> {
        let response = check(response).await?;
        Ok(response.json().await?)
    }
}

/// Turns a non-success response into `StoreError::Api`, keeping PostgREST's message.
async fn check(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<PostgrestError>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    Err(StoreError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Total from a `Content-Range` header such as `0-0/3` or `*/0`.
fn parse_content_range_total(header: &str) -> Option<u64> {
    header.rsplit_once('/')?.1.trim().parse().ok()
}

fn eq(value: &str) -> String {
    format!("eq.{value}")
}

#[async_trait]
impl ProfileStore for SupabaseStore {
    async fn insert_profile(&self, profile: &NewProfile) -> Result<Inserted, StoreError> {
        let response = self
            .table(Method::POST, "profiles")
            .header("Prefer", "return=representation,count=exact")
            .json(&profile.to_json())
            .send()
            .await?;
        let response = check(response).await?;
        let count = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total);
        let data = response.json().await?;
        Ok(Inserted { data, count })
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> Result<Value, StoreError> {
        let response = self
            .table(Method::PATCH, "profiles")
            .query(&[("id", eq(user_id))])
            .header("Prefer", "return=representation")
            .json(&update.to_json())
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn count_rows(&self, table: SkillTable, user_id: &str) -> Result<u64, StoreError> {
        let response = self
            .table(Method::HEAD, table.name())
            .query(&[("select", "userId".to_string()), ("userId", eq(user_id))])
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = check(response).await?;
        let header = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| StoreError::Decode("missing Content-Range header".to_string()))?;
        let count = parse_content_range_total(header)
            .ok_or_else(|| StoreError::Decode(format!("bad Content-Range '{header}'")))?;
        debug!("{} rows for user {user_id} in {}", count, table.name());
        Ok(count)
    }

    /// Sent as an `on_conflict=userId` upsert, so a unique index on `userId`
    /// absorbs concurrent first writes instead of duplicating the row.
    async fn insert_row(&self, table: SkillTable, row: &TripleRow) -> Result<Value, StoreError> {
        let response = self
            .table(Method::POST, table.name())
            .query(&[("on_conflict", "userId")])
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&row.to_json(table))
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn update_row(&self, table: SkillTable, row: &TripleRow) -> Result<Value, StoreError> {
        let response = self
            .table(Method::PATCH, table.name())
            .query(&[("userId", eq(&row.user_id))])
            .header("Prefer", "return=representation")
            .json(&row.to_json(table))
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn fetch_user_info(&self, user_id: &str) -> Result<Value, StoreError> {
        let response = self
            .table(Method::GET, "profiles")
            .query(&[("select", USER_INFO_SELECT.to_string()), ("id", eq(user_id))])
            .send()
            .await?;
        Self::rows(response).await
    }

    async fn get_auth_user(&self, access_token: &str) -> Result<AuthUser, StoreError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::{HeaderMap, StatusCode},
        routing::{get, head},
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn test_parse_content_range_total() {
        assert_eq!(parse_content_range_total("0-0/3"), Some(3));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-24/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }

    #[tokio::test]
    async fn test_count_rows_reads_content_range() {
        let app = Router::new().route(
            "/rest/v1/softskills",
            head(|Query(q): Query<HashMap<String, String>>, headers: HeaderMap| async move {
                assert_eq!(q.get("userId").map(String::as_str), Some("eq.U1"));
                assert_eq!(headers.get("apikey").unwrap(), "anon");
                (StatusCode::OK, [("content-range", "*/1")])
            }),
        );
        let store = SupabaseStore::new(&serve(app).await, "anon".to_string()).unwrap();
        let count = store.count_rows(SkillTable::SoftSkills, "U1").await.unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_postgrest_error_message_surfaced() {
        let app = Router::new().route(
            "/rest/v1/profiles",
            get(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"message": "column profiles.nope does not exist"})),
                )
            }),
        );
        let store = SupabaseStore::new(&serve(app).await, "anon".to_string()).unwrap();
        match store.fetch_user_info("U1").await.unwrap_err() {
            StoreError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "column profiles.nope does not exist");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_auth_user_sends_access_token() {
        let app = Router::new().route(
            "/auth/v1/user",
            get(|headers: HeaderMap| async move {
                assert_eq!(headers.get("authorization").unwrap(), "Bearer jwt-123");
                Json(json!({
                    "id": "U1",
                    "user_metadata": {
                        "avatar_url": "https://img/a.png",
                        "email": "ada@example.com",
                        "full_name": "Ada Obi"
                    }
                }))
            }),
        );
        let store = SupabaseStore::new(&serve(app).await, "anon".to_string()).unwrap();
        let user = store.get_auth_user("jwt-123").await.unwrap();
        assert_eq!(user.id, "U1");
        assert_eq!(user.user_metadata.full_name.as_deref(), Some("Ada Obi"));
    }
}
