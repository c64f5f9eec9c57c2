//! Tickets resource
//!
//! Typed access to the backend `tickets` collection. Every call goes through
//! [`ApiClient::api_fetch`] or [`ApiClient::send`], so headers, credentials
//! and error handling are exactly those of the dispatch helper.

use std::fmt;
use std::str::FromStr;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::options::RequestOptions;
use crate::response::Response;

/// Collection endpoint
pub const TICKETS_ENDPOINT: &str = "/tickets/";

/// Ticket priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Low
    #[default]
    Low,
    /// Medium
    Medium,
    /// High
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        f.write_str(s)
    }
}

impl FromStr for Priority {
    type Err = ApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ApiError::InvalidValue(format!("Unknown priority: {}", value))),
        }
    }
}

/// Ticket status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Open
    #[default]
    Open,
    /// In progress
    #[serde(rename = "In Progress")]
    InProgress,
    /// Closed
    Closed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Open => "Open",
            Status::InProgress => "In Progress",
            Status::Closed => "Closed",
        };
        f.write_str(s)
    }
}

impl FromStr for Status {
    type Err = ApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "open" => Ok(Self::Open),
            "in progress" | "inprogress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            _ => Err(ApiError::InvalidValue(format!("Unknown status: {}", value))),
        }
    }
}

/// Sort order accepted by the collection endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TicketOrdering {
    /// Oldest first
    #[serde(rename = "date_created")]
    DateCreated,
    /// Newest first
    #[serde(rename = "-date_created")]
    DateCreatedDesc,
    /// By priority, ascending
    #[serde(rename = "priority")]
    Priority,
    /// By priority, descending
    #[serde(rename = "-priority")]
    PriorityDesc,
}

impl fmt::Display for TicketOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TicketOrdering::DateCreated => "date_created",
            TicketOrdering::DateCreatedDesc => "-date_created",
            TicketOrdering::Priority => "priority",
            TicketOrdering::PriorityDesc => "-priority",
        };
        f.write_str(s)
    }
}

impl FromStr for TicketOrdering {
    type Err = ApiError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "date_created" => Ok(Self::DateCreated),
            "-date_created" => Ok(Self::DateCreatedDesc),
            "priority" => Ok(Self::Priority),
            "-priority" => Ok(Self::PriorityDesc),
            _ => Err(ApiError::InvalidValue(format!("Unknown ordering: {}", value))),
        }
    }
}

/// Ticket as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Ticket id
    pub id: u64,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Priority
    #[serde(default)]
    pub priority: Priority,
    /// Status
    #[serde(default)]
    pub status: Status,
    /// Id of the assigned user
    #[serde(default)]
    pub assigned_to: Option<u64>,
    /// Username of the assigned user, read only
    #[serde(default)]
    pub assigned_to_username: Option<String>,
    /// Creation time, read only
    pub date_created: String,
    /// Last update time, read only
    pub date_updated: String,
}

/// Payload for creating or replacing a ticket
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewTicket {
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Priority
    pub priority: Priority,
    /// Status
    pub status: Status,
    /// Id of the assigned user
    pub assigned_to: Option<u64>,
}

impl NewTicket {
    /// New open, low priority, unassigned ticket
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            ..Default::default()
        }
    }
}

/// Partial update, unset fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketPatch {
    /// Title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// `Some(None)` unassigns the ticket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Option<u64>>,
}

impl TicketPatch {
    /// `true` when no field is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Filters for listing tickets
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketQuery {
    /// Exact priority
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Exact status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    /// Assigned user id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<u64>,
    /// Free text search over title and description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Sort order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<TicketOrdering>,
}

impl TicketQuery {
    /// Endpoint for this query, relative to the base address
    pub fn endpoint(&self) -> Result<String, ApiError> {
        let query = serde_urlencoded::to_string(self)
            .map_err(|e| ApiError::InvalidValue(e.to_string()))?;
        if query.is_empty() {
            Ok(TICKETS_ENDPOINT.to_string())
        } else {
            Ok(format!("{}?{}", TICKETS_ENDPOINT, query))
        }
    }
}

fn ticket_endpoint(id: u64) -> String {
    format!("{}{}/", TICKETS_ENDPOINT, id)
}

/// Tickets resource bound to a client
#[derive(Debug, Clone, Copy)]
pub struct TicketsApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    /// Access the tickets resource
    pub fn tickets(&self) -> TicketsApi<'_> {
        TicketsApi { client: self }
    }
}

impl TicketsApi<'_> {
    /// List tickets matching `query`
    pub async fn list(&self, query: &TicketQuery) -> Response<Vec<Ticket>> {
        self.client.api_fetch(&query.endpoint()?, None).await
    }

    /// Get one ticket
    pub async fn get(&self, id: u64) -> Response<Ticket> {
        self.client.api_fetch(&ticket_endpoint(id), None).await
    }

    /// Create a ticket
    pub async fn create(&self, ticket: &NewTicket) -> Response<Ticket> {
        let options = RequestOptions::new().method(Method::POST).json(ticket)?;
        self.client.api_fetch(TICKETS_ENDPOINT, Some(options)).await
    }

    /// Replace every writable field of a ticket
    pub async fn replace(&self, id: u64, ticket: &NewTicket) -> Response<Ticket> {
        let options = RequestOptions::new().method(Method::PUT).json(ticket)?;
        self.client.api_fetch(&ticket_endpoint(id), Some(options)).await
    }

    /// Update the fields set in `patch`
    pub async fn update(&self, id: u64, patch: &TicketPatch) -> Response<Ticket> {
        let options = RequestOptions::new().method(Method::PATCH).json(patch)?;
        self.client.api_fetch(&ticket_endpoint(id), Some(options)).await
    }

    /// Delete a ticket
    pub async fn delete(&self, id: u64) -> Response<()> {
        let options = RequestOptions::new().method(Method::DELETE);
        self.client.send(&ticket_endpoint(id), Some(options)).await?;
        Ok(())
    }
}
