//! HTTP client for the forum REST API.
//!
//! The server authenticates with an httponly `jwt` cookie. The client keeps it
//! in a cookie jar and never inspects it; [`ShibespaceClient::credential_cookie`]
//! and [`ShibespaceClient::restore_credential_cookie`] let a caller carry it
//! between processes.

pub mod retry;

use crate::api_client::retry::{RetryPolicy, with_retry};
use crate::config::ApiConfig;
use crate::error::api_client::ApiClientError;
use crate::listing::ThreadListQuery;
use crate::validation::{validate_content, validate_credentials, validate_page};

use common::HttpStatusCode;
use models::{Comment, Credentials, Page, Thread, ThreadDraft, User, UserInfo};

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info};
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use url::Url;
use uuid::Uuid;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);
const TOTAL_COUNT_HEADER_KEY: &str = "x-total-count";
const CREDENTIAL_COOKIE_NAME: &str = "jwt";

const HEALTH_ENDPOINT: &str = "health";
const USERS_ENDPOINT: &str = "users";
const USERS_AUTH_ENDPOINT: &str = "users/auth";
const USERS_UNAUTH_ENDPOINT: &str = "users/unauth";
const THREADS_ENDPOINT: &str = "threads";
const COMMENTS_ENDPOINT: &str = "comments";

#[derive(Clone)]
pub struct ShibespaceClient {
    base_url: Url,
    client: Client,
    cookies: Arc<Jar>,
    retry: RetryPolicy,
    usernames: Arc<RwLock<HashMap<Uuid, String>>>,
}

impl ShibespaceClient {
    pub fn new(base_url_str: &str) -> Result<Self, ApiClientError> {
        Self::with_options(base_url_str, DEFAULT_TIMEOUT_DURATION, RetryPolicy::default())
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiClientError> {
        Self::with_options(&config.base_url, config.timeout(), RetryPolicy::from(config))
    }

    pub fn with_options(
        base_url_str: &str,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self, ApiClientError> {
        let mut base_url = Url::parse(base_url_str)?;
        // Url::join replaces the last path segment unless the base ends in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let cookies = Arc::new(Jar::default());
        let client = Client::builder()
            .timeout(timeout)
            .cookie_provider(Arc::clone(&cookies))
            .build()?;

        Ok(Self {
            base_url,
            client,
            cookies,
            retry,
            usernames: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `Cookie` header value the client would send to the API, if any.
    pub fn credential_cookie(&self) -> Option<String> {
        self.cookies
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    /// Load cookies previously returned by [`credential_cookie`](Self::credential_cookie).
    pub fn restore_credential_cookie(&self, header: &str) {
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.cookies.add_cookie_str(pair, &self.base_url);
        }
    }

    fn forget_credential_cookie(&self) {
        self.cookies.add_cookie_str(
            &format!("{CREDENTIAL_COOKIE_NAME}=; Max-Age=0; Path=/"),
            &self.base_url,
        );
    }

    pub async fn health(&self) -> Result<bool, ApiClientError> {
        let url = self.base_url.join(HEALTH_ENDPOINT)?;
        let response = self.get_with_retry(url, "health check").await?;

        Ok(response.status().is_success())
    }

    /// Sign up. The new account is not logged in.
    pub async fn create_user(&self, credentials: &Credentials) -> Result<UserInfo, ApiClientError> {
        validate_credentials(credentials)?;
        let url = self.base_url.join(USERS_ENDPOINT)?;

        let response = match send_checked(
            self.client.post(url).json(&credentials_body(credentials)),
        )
        .await
        {
            Err(e) if e.status_code() == Some(HttpStatusCode::CONFLICT.0) => {
                return Err(ApiClientError::username_taken(&credentials.username));
            }
            result => result?,
        };

        let user: UserInfo = response.json().await?;
        info!("Created user '{}'", user.username);
        Ok(user)
    }

    /// Log in. On success the server sets the credential cookie in the jar.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<User, ApiClientError> {
        validate_credentials(credentials)?;
        let url = self.base_url.join(USERS_AUTH_ENDPOINT)?;

        let response = match send_checked(
            self.client.post(url).json(&credentials_body(credentials)),
        )
        .await
        {
            Err(e) if e.status_code() == Some(HttpStatusCode::UNAUTHORIZED.0) => {
                return Err(ApiClientError::invalid_credentials());
            }
            result => result?,
        };

        let user: User = response.json().await?;
        info!("Authenticated as '{}'", user.username);
        Ok(user)
    }

    /// Ask the server to clear the credential cookie and drop it locally as well.
    pub async fn logout(&self) -> Result<(), ApiClientError> {
        let url = self.base_url.join(USERS_UNAUTH_ENDPOINT)?;
        let result = send_checked(self.client.get(url)).await;
        self.forget_credential_cookie();

        result.map(|_| ())
    }

    pub async fn get_user_info(&self, user_id: Uuid) -> Result<UserInfo, ApiClientError> {
        let url = self.base_url.join(&format!("{USERS_ENDPOINT}/{user_id}"))?;
        let response = self.get_with_retry(url, "user lookup").await?;
        let user: UserInfo = response.json().await?;

        self.usernames
            .write()
            .await
            .insert(user.id, user.username.clone());
        Ok(user)
    }

    /// Username for `user_id`, fetched once and cached for the client's lifetime.
    pub async fn resolve_username(&self, user_id: Uuid) -> Result<String, ApiClientError> {
        if let Some(username) = self.usernames.read().await.get(&user_id) {
            return Ok(username.clone());
        }

        Ok(self.get_user_info(user_id).await?.username)
    }

    pub async fn create_thread(&self, draft: &ThreadDraft) -> Result<Thread, ApiClientError> {
        let url = self.base_url.join(THREADS_ENDPOINT)?;
        let response = send_checked(self.client.post(url).json(draft)).await?;
        let thread: Thread = response.json().await?;

        info!("Created thread {}", thread.id);
        Ok(thread)
    }

    pub async fn list_threads(
        &self,
        query: &ThreadListQuery,
    ) -> Result<Page<Thread>, ApiClientError> {
        validate_page(query.page())?;
        let mut url = self.base_url.join(THREADS_ENDPOINT)?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(tags) = query.tags_query() {
                pairs.append_pair("tags", &tags);
            }
            pairs
                .append_pair("page", &query.page().to_string())
                .append_pair("limit", &query.page_size().to_string());
        }

        let response = self.get_with_retry(url, "thread listing").await?;
        read_page(response, query.page(), query.page_size()).await
    }

    pub async fn get_thread(&self, thread_id: i32) -> Result<Thread, ApiClientError> {
        let url = self.base_url.join(&format!("{THREADS_ENDPOINT}/{thread_id}"))?;
        let response = self.get_with_retry(url, "thread lookup").await?;

        Ok(response.json().await?)
    }

    pub async fn update_thread_content(
        &self,
        thread_id: i32,
        content: &str,
    ) -> Result<Thread, ApiClientError> {
        validate_content(content)?;
        let url = self
            .base_url
            .join(&format!("{THREADS_ENDPOINT}/{thread_id}/content"))?;

        let body = serde_json::json!({ "content": content });
        let response = send_checked(self.client.patch(url).json(&body)).await?;

        Ok(response.json().await?)
    }

    pub async fn delete_thread(&self, thread_id: i32) -> Result<(), ApiClientError> {
        let url = self.base_url.join(&format!("{THREADS_ENDPOINT}/{thread_id}"))?;
        send_checked(self.client.delete(url)).await?;

        info!("Deleted thread {thread_id}");
        Ok(())
    }

    pub async fn create_comment(
        &self,
        thread_id: i32,
        content: &str,
    ) -> Result<Comment, ApiClientError> {
        validate_content(content)?;
        let url = self.base_url.join(COMMENTS_ENDPOINT)?;

        let body = serde_json::json!({ "content": content, "thread_id": thread_id });
        let response = send_checked(self.client.post(url).json(&body)).await?;
        let comment: Comment = response.json().await?;

        info!("Created comment {} on thread {thread_id}", comment.id);
        Ok(comment)
    }

    pub async fn list_comments(
        &self,
        thread_id: i32,
        page: u32,
        page_size: u32,
    ) -> Result<Page<Comment>, ApiClientError> {
        validate_page(page)?;
        let mut url = self.base_url.join(COMMENTS_ENDPOINT)?;
        url.query_pairs_mut()
            .append_pair("thread_id", &thread_id.to_string())
            .append_pair("page", &page.to_string())
            .append_pair("limit", &page_size.to_string());

        let response = self.get_with_retry(url, "comment listing").await?;
        read_page(response, page, page_size).await
    }

    pub async fn update_comment_content(
        &self,
        comment_id: i32,
        content: &str,
    ) -> Result<Comment, ApiClientError> {
        validate_content(content)?;
        let url = self
            .base_url
            .join(&format!("{COMMENTS_ENDPOINT}/{comment_id}/content"))?;

        let body = serde_json::json!({ "content": content });
        let response = send_checked(self.client.patch(url).json(&body)).await?;

        Ok(response.json().await?)
    }

    pub async fn delete_comment(&self, comment_id: i32) -> Result<(), ApiClientError> {
        let url = self
            .base_url
            .join(&format!("{COMMENTS_ENDPOINT}/{comment_id}"))?;
        send_checked(self.client.delete(url)).await?;

        info!("Deleted comment {comment_id}");
        Ok(())
    }

    async fn get_with_retry(&self, url: Url, what: &str) -> Result<Response, ApiClientError> {
        debug!("GET {url}");
        with_retry(self.retry, what, || send_checked(self.client.get(url.clone()))).await
    }
}

fn credentials_body(credentials: &Credentials) -> serde_json::Value {
    serde_json::json!({
        "username": credentials.username,
        "password": credentials.password.as_str(),
    })
}

/// Send `request` and turn any non-2xx response into an [`ApiClientError`].
async fn send_checked(request: RequestBuilder) -> Result<Response, ApiClientError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!("Request failed with HTTP {}: {body}", status.as_u16());
    Err(ApiClientError::from_http_response(status.as_u16(), &body))
}

async fn read_page<T: DeserializeOwned>(
    response: Response,
    page: u32,
    page_size: u32,
) -> Result<Page<T>, ApiClientError> {
    let total_count = response
        .headers()
        .get(TOTAL_COUNT_HEADER_KEY)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());

    if response.status().as_u16() == HttpStatusCode::NO_CONTENT.0 {
        return Ok(Page::empty(page, page_size, total_count.unwrap_or(0)));
    }

    let items: Vec<T> = response.json().await?;
    let total_count = total_count.unwrap_or(items.len() as u64);

    Ok(Page {
        items,
        total_count,
        page,
        page_size,
    })
}
