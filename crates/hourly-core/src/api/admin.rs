use crate::client::AuthenticatedRequestClient;
use crate::constants::{PROJECTS_PATH, USERS_PATH};
use crate::error::ClientError;
use crate::models::{
    AssignUsersRequest, CreateUserRequest, Listing, Project, ProjectAssignment, ProjectRequest,
    UpdateUserRequest, User,
};
use crate::request::RequestOptions;
use crate::response::{ensure_success, read_json};

impl AuthenticatedRequestClient {
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        let response = self.request(USERS_PATH, RequestOptions::get()).await?;
        Ok(read_json::<Listing<User>>(response).await?.into_vec())
    }

    pub async fn create_user(&self, payload: &CreateUserRequest) -> Result<User, ClientError> {
        let response = self
            .request(USERS_PATH, RequestOptions::post(payload)?)
            .await?;
        read_json(response).await
    }

    pub async fn update_user(
        &self,
        id: i64,
        payload: &UpdateUserRequest,
    ) -> Result<User, ClientError> {
        let url = format!("{USERS_PATH}{id}/update/");
        let response = self.request(&url, RequestOptions::put(payload)?).await?;
        read_json(response).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ClientError> {
        let url = format!("{USERS_PATH}{id}/delete/");
        let response = self.request(&url, RequestOptions::delete()).await?;
        ensure_success(response).await
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, ClientError> {
        let response = self.request(PROJECTS_PATH, RequestOptions::get()).await?;
        Ok(read_json::<Listing<Project>>(response).await?.into_vec())
    }

    pub async fn get_project(&self, id: i64) -> Result<Project, ClientError> {
        let url = format!("{PROJECTS_PATH}{id}/");
        let response = self.request(&url, RequestOptions::get()).await?;
        read_json(response).await
    }

    pub async fn create_project(&self, payload: &ProjectRequest) -> Result<Project, ClientError> {
        let response = self
            .request(PROJECTS_PATH, RequestOptions::post(payload)?)
            .await?;
        read_json(response).await
    }

    pub async fn update_project(
        &self,
        id: i64,
        payload: &ProjectRequest,
    ) -> Result<Project, ClientError> {
        let url = format!("{PROJECTS_PATH}{id}/");
        let response = self.request(&url, RequestOptions::put(payload)?).await?;
        read_json(response).await
    }

    pub async fn delete_project(&self, id: i64) -> Result<(), ClientError> {
        let url = format!("{PROJECTS_PATH}{id}/");
        let response = self.request(&url, RequestOptions::delete()).await?;
        ensure_success(response).await
    }

    pub async fn project_assignments(
        &self,
        project_id: i64,
    ) -> Result<Vec<ProjectAssignment>, ClientError> {
        let url = format!("{PROJECTS_PATH}{project_id}/assignments/");
        let response = self.request(&url, RequestOptions::get()).await?;
        Ok(read_json::<Listing<ProjectAssignment>>(response)
            .await?
            .into_vec())
    }

    pub async fn assign_users(&self, project_id: i64, user_ids: Vec<i64>) -> Result<(), ClientError> {
        let url = format!("{PROJECTS_PATH}{project_id}/assign-users/");
        let payload = AssignUsersRequest { user_ids };
        let response = self.request(&url, RequestOptions::post(&payload)?).await?;
        ensure_success(response).await
    }
}
