// ABOUTME: Reqwest-backed client implementing the remote API traits.
// ABOUTME: Attaches auth to every request and classifies non-2xx responses into faults.

use super::traits::{ContainerOps, ProjectOps};
use super::{ApiError, fault};
use crate::config::Global;
use crate::containers::{Container, Containers, Register};
use crate::projects::{Project, ProjectAuth};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

#[derive(Debug, Clone)]
enum Credentials {
    Token(String),
    Basic { username: String, password: String },
}

/// Authenticated HTTP client for the remote deployment platform.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    endpoint: String,
    credentials: Credentials,
}

impl Client {
    pub fn new(config: &Global) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;

        let credentials = match &config.token {
            Some(token) => Credentials::Token(token.clone()),
            None => Credentials::Basic {
                username: config.username.clone().unwrap_or_default(),
                password: config.password.clone().unwrap_or_default(),
            },
        };

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.endpoint, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));

        match &self.credentials {
            Credentials::Token(token) => builder.bearer_auth(token),
            Credentials::Basic { username, password } => {
                builder.basic_auth(username, Some(password))
            }
        }
    }

    /// Send a request, classifying any non-2xx response into a structured
    /// fault carrying the method and final URL.
    async fn send(&self, method: Method, builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let url = response.url().to_string();
        let status = response.status();

        debug!(%method, %url, status = status.as_u16(), "remote API response");

        if status.is_success() {
            return Ok(response);
        }

        let content_type = header_str(&response, CONTENT_TYPE.as_str());
        let body = response.text().await?;

        Err(ApiError::Fault(fault::classify(
            method.as_str(),
            &url,
            status,
            &content_type,
            &body,
        )))
    }

    async fn decode_json<T: DeserializeOwned>(
        &self,
        method: Method,
        response: Response,
    ) -> Result<T, ApiError> {
        let content_type = header_str(&response, CONTENT_TYPE.as_str());
        check_json(&method, response.url().as_str(), &content_type)?;

        Ok(response.json().await?)
    }
}

/// A successful response that must carry JSON has to say so.
fn check_json(method: &Method, url: &str, content_type: &str) -> Result<(), ApiError> {
    if content_type.contains("application/json") {
        return Ok(());
    }

    Err(ApiError::UnexpectedContentType {
        method: method.to_string(),
        url: url.to_string(),
        content_type: content_type.to_string(),
    })
}

fn header_str(response: &Response, name: &str) -> String {
    response
        .headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}


#[async_trait]
impl ProjectOps for Client {
    async fn validate_project_id(&self, id: &str) -> Result<(), ApiError> {
        let builder = self
            .request(Method::GET, "/validators/project/id")
            .query(&[("value", id)]);

        self.send(Method::GET, builder).await.map(drop)
    }

    async fn create_project(&self, project: &Project) -> Result<(), ApiError> {
        let builder = self.request(Method::POST, "/projects").json(project);

        self.send(Method::POST, builder).await.map(drop)
    }

    async fn apply_project_auth(
        &self,
        project_id: &str,
        auth: &ProjectAuth,
    ) -> Result<(), ApiError> {
        let path = format!("/projects/{project_id}/auth");
        let builder = self.request(Method::PUT, &path).json(auth);

        self.send(Method::PUT, builder).await.map(drop)
    }

    async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        let response = self
            .send(Method::GET, self.request(Method::GET, "/projects"))
            .await?;

        self.decode_json(Method::GET, response).await
    }

    async fn project_state(&self, project_id: &str) -> Result<String, ApiError> {
        let path = format!("/projects/{project_id}/state");
        let response = self
            .send(Method::GET, self.request(Method::GET, &path))
            .await?;

        self.decode_json(Method::GET, response).await
    }

    async fn restart_project(&self, project_id: &str) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/restart/project")
            .query(&[("projectId", project_id)]);

        self.send(Method::POST, builder).await.map(drop)
    }

    async fn drop_project(&self, project_id: &str) -> Result<(), ApiError> {
        let path = format!("/deploy/{project_id}");

        self.send(Method::DELETE, self.request(Method::DELETE, &path))
            .await
            .map(drop)
    }
}

#[async_trait]
impl ContainerOps for Client {
    async fn deploy_container(
        &self,
        project_id: &str,
        source: &str,
        container: &Container,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(Method::PUT, "/deploy")
            .query(&[("projectId", project_id), ("source", source)])
            .json(container);

        self.send(Method::PUT, builder).await.map(drop)
    }

    async fn validate_container_id(
        &self,
        project_id: &str,
        container_id: &str,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(Method::GET, "/validators/containers/id")
            .query(&[("projectId", project_id), ("value", container_id)]);

        self.send(Method::GET, builder).await.map(drop)
    }

    async fn list_containers(&self, project_id: &str) -> Result<Containers, ApiError> {
        let path = format!("/projects/{project_id}/containers");
        let response = self
            .send(Method::GET, self.request(Method::GET, &path))
            .await?;

        self.decode_json(Method::GET, response).await
    }

    async fn container_state(
        &self,
        project_id: &str,
        container_id: &str,
    ) -> Result<String, ApiError> {
        let path = format!("/projects/{project_id}/containers/{container_id}/state");
        let response = self
            .send(Method::GET, self.request(Method::GET, &path))
            .await?;

        self.decode_json(Method::GET, response).await
    }

    async fn restart_container(
        &self,
        project_id: &str,
        container_id: &str,
    ) -> Result<(), ApiError> {
        let builder = self
            .request(Method::POST, "/restart/container")
            .query(&[("projectId", project_id), ("containerId", container_id)]);

        self.send(Method::POST, builder).await.map(drop)
    }

    async fn drop_container(&self, project_id: &str, container_id: &str) -> Result<(), ApiError> {
        let path = format!("/deploy/{project_id}/{container_id}");

        self.send(Method::DELETE, self.request(Method::DELETE, &path))
            .await
            .map(drop)
    }

    async fn container_registry(&self) -> Result<Vec<Register>, ApiError> {
        let response = self
            .send(Method::GET, self.request(Method::GET, "/registry"))
            .await?;

        self.decode_json(Method::GET, response).await
    }
}
