//! Blocking REST client for the hosted platform.
//!
//! The platform exposes auto-generated row-level endpoints under
//! `/rest/v1/` and stored procedures under `/rest/v1/rpc/`. Every request
//! carries the project API key and the user's bearer token; row filters
//! ride in the query string. Aggregations (stats, leaderboard) are
//! performed by the platform and consumed here as opaque procedures.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::config::Config;
use crate::core::{today_local, SessionSink};
use crate::error::PlankrError;

use super::types::{
    Challenge, ChallengeMembership, CurrentUser, LeaderboardEntry, NewMembership, NewPlank,
    PlankRecord, Profile, UserStats,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the hosted platform's REST interface.
///
/// Identity is resolved once at construction; all row filters and insert
/// payloads are scoped to that user.
#[derive(Debug)]
pub struct PlatformClient {
    http: Client,
    base_url: String,
    api_key: String,
    access_token: String,
    user: CurrentUser,
}

impl PlatformClient {
    /// Create a client from explicit connection parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        access_token: impl Into<String>,
        user: CurrentUser,
    ) -> Result<Self, PlankrError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
            access_token: access_token.into(),
            user,
        })
    }

    /// Create a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns a config error naming the first missing connection field.
    pub fn from_config(config: &Config) -> Result<Self, PlankrError> {
        let platform = &config.platform;

        let url = require(platform.url.as_deref(), "platform.url")?;
        let api_key = require(platform.api_key.as_deref(), "platform.api_key")?;
        let token = require(platform.access_token.as_deref(), "platform.access_token")?;
        let user_id = require(platform.user_id.as_deref(), "platform.user_id")?;

        let user = CurrentUser {
            id: user_id.to_string(),
            display_name: platform
                .display_name
                .clone()
                .unwrap_or_else(|| "Anonymous".to_string()),
        };

        Self::new(url, api_key, token, user)
    }

    /// The identity this client acts as.
    #[must_use]
    pub const fn user(&self) -> &CurrentUser {
        &self.user
    }

    /// Record one plank for the given date.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert is rejected or the network fails.
    pub fn record_plank(&self, duration_seconds: u32, date: NaiveDate) -> Result<(), PlankrError> {
        let payload = NewPlank {
            user_id: self.user.id.clone(),
            plank_date: date,
            duration_s: i64::from(duration_seconds),
        };

        let response = self
            .http
            .post(self.rest_url("planks"))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
            .header("Prefer", "return=minimal")
            .json(&payload)
            .send()?;

        Self::check(response).map(|_| ())
    }

    /// Fetch the user's most recent planks, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn recent_planks(&self, limit: u32) -> Result<Vec<PlankRecord>, PlankrError> {
        let query = format!(
            "planks?user_id=eq.{}&select=id,user_id,plank_date,duration_s,inserted_at\
             &order=plank_date.desc,inserted_at.desc&limit={limit}",
            self.user.id
        );
        self.get_rows(&query)
    }

    /// Fetch the platform-computed aggregates for this user.
    ///
    /// # Errors
    ///
    /// Returns an error if the procedure call fails.
    pub fn user_stats(&self) -> Result<UserStats, PlankrError> {
        self.call_rpc("user_stats", &json!({ "uid": self.user.id }))
    }

    /// Fetch the monthly leaderboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the procedure call fails.
    pub fn monthly_leaderboard(&self, limit: u32) -> Result<Vec<LeaderboardEntry>, PlankrError> {
        self.call_rpc("monthly_leaderboard", &json!({ "entry_limit": limit }))
    }

    /// Fetch challenges, optionally restricted to active ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn challenges(&self, only_active: bool) -> Result<Vec<Challenge>, PlankrError> {
        let query = if only_active {
            "challenges?is_active=eq.true&order=start_date.asc"
        } else {
            "challenges?order=start_date.asc"
        };
        self.get_rows(query)
    }

    /// Ids of the challenges this user has joined.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn joined_challenge_ids(&self) -> Result<Vec<i64>, PlankrError> {
        let query = format!(
            "challenge_participants?user_id=eq.{}&select=challenge_id",
            self.user.id
        );
        let rows: Vec<ChallengeMembership> = self.get_rows(&query)?;
        Ok(rows.into_iter().map(|row| row.challenge_id).collect())
    }

    /// Join a challenge.
    ///
    /// # Errors
    ///
    /// Returns a validation error if already joined, or a platform error
    /// for anything else the insert rejects.
    pub fn join_challenge(&self, challenge_id: i64) -> Result<(), PlankrError> {
        let payload = NewMembership {
            user_id: self.user.id.clone(),
            challenge_id,
        };

        let response = self
            .http
            .post(self.rest_url("challenge_participants"))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
            .header("Prefer", "return=minimal")
            .json(&payload)
            .send()?;

        if response.status() == StatusCode::CONFLICT {
            return Err(PlankrError::validation("already joined this challenge"));
        }

        Self::check(response).map(|_| ())
    }

    /// Leave a challenge.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete is rejected or the network fails.
    pub fn leave_challenge(&self, challenge_id: i64) -> Result<(), PlankrError> {
        let query = format!(
            "challenge_participants?user_id=eq.{}&challenge_id=eq.{challenge_id}",
            self.user.id
        );
        let response = self
            .http
            .delete(self.rest_url(&query))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
            .send()?;

        Self::check(response).map(|_| ())
    }

    /// Fetch this user's profile row, if one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn profile(&self) -> Result<Option<Profile>, PlankrError> {
        let query = format!("profiles?id=eq.{}&limit=1", self.user.id);
        let mut rows: Vec<Profile> = self.get_rows(&query)?;
        Ok(rows.pop())
    }

    /// GET a filtered row set.
    fn get_rows<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<Vec<T>, PlankrError> {
        let response = self
            .http
            .get(self.rest_url(path_and_query))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
            .send()?;

        Ok(Self::check(response)?.json()?)
    }

    /// POST a stored procedure call and decode its result.
    fn call_rpc<T: DeserializeOwned>(
        &self,
        name: &str,
        args: &serde_json::Value,
    ) -> Result<T, PlankrError> {
        let url = format!("{}/rest/v1/rpc/{name}", self.base_url);
        let response = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
            .json(args)
            .send()?;

        Ok(Self::check(response)?.json()?)
    }

    fn rest_url(&self, path_and_query: &str) -> String {
        format!("{}/rest/v1/{path_and_query}", self.base_url)
    }

    /// Turn a non-success response into a descriptive error.
    fn check(response: Response) -> Result<Response, PlankrError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(PlankrError::Config(format!(
                "platform rejected credentials ({status}); check platform.api_key and platform.access_token"
            )));
        }

        let body = response.text().unwrap_or_default();
        let snippet: String = body.chars().take(200).collect();
        Err(PlankrError::Platform(format!("{status}: {snippet}")))
    }
}

impl SessionSink for PlatformClient {
    fn record_session(&self, duration_seconds: u32) -> Result<(), PlankrError> {
        self.record_plank(duration_seconds, today_local())
    }
}

fn require<'a>(value: Option<&'a str>, field: &str) -> Result<&'a str, PlankrError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(PlankrError::Config(format!(
            "{field} is not set; run `plankr config init` or export the matching PLANKR_* variable"
        ))),
    }
}
