use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use time::Date;
use uuid::Uuid;

use crate::auth::dto::{LoginRequest, RegisterRequest, User};
use crate::entries::dto::{CreateEntryRequest, Entry};
use crate::foods::dto::{CreateFoodRequest, Food};
use crate::nutrition::dto::{DailySummary, Goals};
use crate::nutrition::services::format_date;

/// The two failure kinds an operation can surface: the request never
/// completed, or the server refused it with a plain-text reason.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { status: u16, message: String },
}

/// Everything the backend does for us, one method per endpoint.
///
/// The session lives server-side; no token travels with these calls.
#[async_trait]
pub trait ApiClient: Send + Sync {
    async fn register(&self, req: &RegisterRequest) -> Result<User, ApiError>;
    async fn login(&self, req: &LoginRequest) -> Result<User, ApiError>;

    async fn list_foods(&self) -> Result<Vec<Food>, ApiError>;
    async fn create_food(&self, req: &CreateFoodRequest) -> Result<Food, ApiError>;
    async fn delete_food(&self, id: Uuid) -> Result<(), ApiError>;

    async fn list_entries(&self) -> Result<Vec<Entry>, ApiError>;
    async fn create_entry(&self, req: &CreateEntryRequest) -> Result<Entry, ApiError>;
    async fn delete_entry(&self, id: Uuid) -> Result<(), ApiError>;

    async fn daily_summary(&self, date: Date) -> Result<DailySummary, ApiError>;
    async fn goals(&self) -> Result<Goals, ApiError>;
    async fn update_goals(&self, goals: &Goals) -> Result<(), ApiError>;
}

pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pass a 2xx response through; otherwise read the plain-text error body
    /// and turn it into a rejection.
    async fn accept(res: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let message = res
            .text()
            .await
            .unwrap_or_else(|_| "failed to read error body".to_string());
        Err(ApiError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ApiClient for HttpApi {
    async fn register(&self, req: &RegisterRequest) -> Result<User, ApiError> {
        let res = self
            .client
            .post(self.url("/auth/register"))
            .json(req)
            .send()
            .await?;
        Ok(Self::accept(res).await?.json().await?)
    }

    async fn login(&self, req: &LoginRequest) -> Result<User, ApiError> {
        let res = self
            .client
            .post(self.url("/auth/login"))
            .json(req)
            .send()
            .await?;
        Ok(Self::accept(res).await?.json().await?)
    }

    async fn list_foods(&self) -> Result<Vec<Food>, ApiError> {
        let res = self.client.get(self.url("/foods")).send().await?;
        // The server marshals an empty catalog as null.
        let foods: Option<Vec<Food>> = Self::accept(res).await?.json().await?;
        Ok(foods.unwrap_or_default())
    }

    async fn create_food(&self, req: &CreateFoodRequest) -> Result<Food, ApiError> {
        let res = self
            .client
            .post(self.url("/foods"))
            .json(req)
            .send()
            .await?;
        Ok(Self::accept(res).await?.json().await?)
    }

    async fn delete_food(&self, id: Uuid) -> Result<(), ApiError> {
        let res = self
            .client
            .delete(self.url(&format!("/foods/{id}")))
            .send()
            .await?;
        Self::accept(res).await?;
        Ok(())
    }

    async fn list_entries(&self) -> Result<Vec<Entry>, ApiError> {
        let res = self.client.get(self.url("/entries")).send().await?;
        let entries: Option<Vec<Entry>> = Self::accept(res).await?.json().await?;
        Ok(entries.unwrap_or_default())
    }

    async fn create_entry(&self, req: &CreateEntryRequest) -> Result<Entry, ApiError> {
        let res = self
            .client
            .post(self.url("/entries"))
            .json(req)
            .send()
            .await?;
        Ok(Self::accept(res).await?.json().await?)
    }

    async fn delete_entry(&self, id: Uuid) -> Result<(), ApiError> {
        let res = self
            .client
            .delete(self.url(&format!("/entries/{id}")))
            .send()
            .await?;
        Self::accept(res).await?;
        Ok(())
    }

    async fn daily_summary(&self, date: Date) -> Result<DailySummary, ApiError> {
        let res = self
            .client
            .get(self.url(&format!("/nutrition/daily/{}", format_date(date))))
            .send()
            .await?;
        Ok(Self::accept(res).await?.json().await?)
    }

    async fn goals(&self) -> Result<Goals, ApiError> {
        let res = self.client.get(self.url("/nutrition/goals")).send().await?;
        Ok(Self::accept(res).await?.json().await?)
    }

    async fn update_goals(&self, goals: &Goals) -> Result<(), ApiError> {
        let res = self
            .client
            .put(self.url("/nutrition/goals"))
            .json(goals)
            .send()
            .await?;
        Self::accept(res).await?;
        Ok(())
    }
}
