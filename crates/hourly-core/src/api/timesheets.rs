use chrono::NaiveDate;
use tracing::info;

use crate::client::AuthenticatedRequestClient;
use crate::constants::{MY_PROJECTS_PATH, MY_TIMESHEETS_PATH, SUBMIT_WEEK_PATH, TIMESHEETS_PATH};
use crate::error::ClientError;
use crate::models::{
    Activity, Listing, Project, SubmitWeekRequest, SubmitWeekResponse, TimesheetEntry,
    TimesheetEntryRequest,
};
use crate::request::{append_params, build_params, opt_param, RequestOptions};
use crate::response::{ensure_success, error_message_from_body, read_json};

#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    Submitted(SubmitWeekResponse),
    /// The backend found problems with the week and will only accept it with
    /// `force_submit = true`.
    NeedsConfirmation(SubmitWeekResponse),
}

impl SubmitOutcome {
    pub fn warnings(&self) -> Vec<String> {
        let response = match self {
            Self::Submitted(response) | Self::NeedsConfirmation(response) => response,
        };
        response
            .week_warnings
            .iter()
            .map(|warning| match warning {
                serde_json::Value::String(text) => text.clone(),
                other => other.to_string(),
            })
            .collect()
    }
}

impl AuthenticatedRequestClient {
    pub async fn my_projects(&self) -> Result<Vec<Project>, ClientError> {
        let response = self.request(MY_PROJECTS_PATH, RequestOptions::get()).await?;
        Ok(read_json::<Listing<Project>>(response).await?.into_vec())
    }

    pub async fn my_timesheets(
        &self,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Vec<TimesheetEntry>, ClientError> {
        let mut url = MY_TIMESHEETS_PATH.to_string();
        let params = build_params([
            opt_param("date_from", date_from.map(|date| date.to_string())),
            opt_param("date_to", date_to.map(|date| date.to_string())),
        ]);
        append_params(&mut url, params);
        let response = self.request(&url, RequestOptions::get()).await?;
        Ok(read_json::<Listing<TimesheetEntry>>(response)
            .await?
            .into_vec())
    }

    pub async fn project_activities(&self, project_id: i64) -> Result<Vec<Activity>, ClientError> {
        let url = format!("/timesheets/project/{project_id}/activities/");
        let response = self.request(&url, RequestOptions::get()).await?;
        Ok(read_json::<Listing<Activity>>(response).await?.into_vec())
    }

    pub async fn create_entry(
        &self,
        payload: &TimesheetEntryRequest,
    ) -> Result<TimesheetEntry, ClientError> {
        let response = self
            .request(TIMESHEETS_PATH, RequestOptions::post(payload)?)
            .await?;
        read_json(response).await
    }

    pub async fn update_entry(
        &self,
        id: i64,
        payload: &TimesheetEntryRequest,
    ) -> Result<TimesheetEntry, ClientError> {
        let url = format!("{TIMESHEETS_PATH}{id}/");
        let response = self.request(&url, RequestOptions::put(payload)?).await?;
        read_json(response).await
    }

    pub async fn delete_entry(&self, id: i64) -> Result<(), ClientError> {
        let url = format!("{TIMESHEETS_PATH}{id}/");
        let response = self.request(&url, RequestOptions::delete()).await?;
        ensure_success(response).await
    }

    /// Submits the week starting at `week_start`.
    ///
    /// A response carrying `can_force_submit` is reported as
    /// [`SubmitOutcome::NeedsConfirmation`] whatever its status code; the
    /// caller confirms with the user and calls again with `force = true`.
    pub async fn submit_week(
        &self,
        week_start: NaiveDate,
        force: bool,
    ) -> Result<SubmitOutcome, ClientError> {
        let payload = SubmitWeekRequest {
            week_start_date: week_start,
            force_submit: force,
        };
        let response = self
            .request(SUBMIT_WEEK_PATH, RequestOptions::post(&payload)?)
            .await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let parsed = serde_json::from_slice::<SubmitWeekResponse>(&bytes).ok();

        if let Some(body) = parsed.as_ref().filter(|body| body.can_force_submit && !force) {
            info!(
                week = %week_start,
                warnings = body.week_warnings.len(),
                "week submission needs confirmation"
            );
            return Ok(SubmitOutcome::NeedsConfirmation(body.clone()));
        }
        if !status.is_success() {
            let message = error_message_from_body(&String::from_utf8_lossy(&bytes));
            return Err(ClientError::Http { status, message });
        }
        info!(week = %week_start, force, "week submitted");
        Ok(SubmitOutcome::Submitted(parsed.unwrap_or_default()))
    }
}

