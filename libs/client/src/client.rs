use chrono::NaiveDate;
use domain_events::{CreateEvent, Event, StatusFilter, filter_events};
use domain_users::{
    LoginRequest, LoginResponse, MessageResponse, RoleAction, SetRoleRequest, SignupRequest,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Session-holding client for the Circular API.
///
/// `login` keeps the returned token and every admin call sends it as a
/// bearer token until `logout`.
#[derive(Debug, Clone)]
pub struct CircularClient {
    http: Client,
    api_url: String,
    token: Option<String>,
}

impl CircularClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            api_url: format!("{}/api", config.base_url.trim_end_matches('/')),
            token: None,
        })
    }

    /// Resume a session saved from an earlier login.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), "API returned an error");
        Err(ClientError::from_body(status.as_u16(), &body))
    }

    /// Create an account; returns the server's confirmation message.
    #[instrument(skip(self, password))]
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<String> {
        let body = SignupRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };

        let response = self
            .http
            .post(self.url("/auth/signup"))
            .json(&body)
            .send()
            .await?;
        let message: MessageResponse = Self::parse(response).await?;
        Ok(message.message)
    }

    /// Log in and remember the session token.
    #[instrument(skip(self, password))]
    pub async fn login(&mut self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = LoginRequest {
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        };

        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&body)
            .send()
            .await?;
        let login: LoginResponse = Self::parse(response).await?;

        self.token = Some(login.token.clone());
        info!(role = %login.role, "Logged in");
        Ok(login)
    }

    /// Forget the session token.
    pub fn logout(&mut self) {
        self.token = None;
    }

    /// All events, newest first.
    #[instrument(skip(self))]
    pub async fn fetch_events(&self) -> Result<Vec<Event>> {
        let response = self.http.get(self.url("/events")).send().await?;
        Self::parse(response).await
    }

    /// Publish an event; needs an admin session.
    #[instrument(skip(self, event))]
    pub async fn create_event(&self, event: &CreateEvent) -> Result<Event> {
        let request = self.http.post(self.url("/events")).json(event);
        let response = self.authorized(request).send().await?;
        Self::parse(response).await
    }

    /// Grant or revoke admin rights for `email`; needs an admin session.
    #[instrument(skip(self))]
    pub async fn manage_admin(&self, email: &str, action: RoleAction) -> Result<String> {
        let body = SetRoleRequest {
            email: Some(email.to_string()),
            action: Some(action.to_string()),
        };

        let request = self.http.post(self.url("/admin/role")).json(&body);
        let response = self.authorized(request).send().await?;
        let message: MessageResponse = Self::parse(response).await?;
        Ok(message.message)
    }

    /// Fetch events and keep those in `status` matching `query` as of `today`.
    pub async fn browse(
        &self,
        status: StatusFilter,
        query: &str,
        today: NaiveDate,
    ) -> Result<Vec<Event>> {
        let events = self.fetch_events().await?;
        Ok(filter_events(&events, status, query, today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_ignores_trailing_slash() {
        let client = CircularClient::new(&ClientConfig::new("http://10.0.0.5:5000/")).unwrap();
        assert_eq!(client.url("/events"), "http://10.0.0.5:5000/api/events");
    }

    #[test]
    fn test_session_lifecycle() {
        let mut client = CircularClient::new(&ClientConfig::default())
            .unwrap()
            .with_token("abc");
        assert!(client.is_logged_in());
        assert_eq!(client.token(), Some("abc"));

        client.logout();
        assert!(!client.is_logged_in());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        // Port 9 (discard) is closed on test machines
        let client = CircularClient::new(&ClientConfig::new("http://127.0.0.1:9")).unwrap();
        let err = client.fetch_events().await.unwrap_err();
        assert!(matches!(err, ClientError::Http(_)));
    }
}
