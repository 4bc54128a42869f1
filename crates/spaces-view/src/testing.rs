//! In-memory doubles for controller tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Notify;

use spaces_core::error::{AppError, UpstreamReply};
use spaces_core::result::AppResult;
use spaces_entity::{
    Activity, FileId, Member, MemberRole, NewMember, NewSpace, RoleChange, Space, SpaceFile,
    SpaceId, SpaceUpdate,
};

use crate::api::{Download, FileUpload, SpacesApi};
use crate::notifier::Notifier;

pub fn space(id: &str) -> Space {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "name": format!("Space {id}"),
        "description": "",
        "adminEmail": "owner@example.com",
        "members": [],
    }))
    .unwrap()
}

pub fn member(email: &str, role: MemberRole) -> Member {
    serde_json::from_value(serde_json::json!({ "email": email, "role": role.as_str() })).unwrap()
}

fn file(id: usize, name: &str) -> SpaceFile {
    serde_json::from_value(serde_json::json!({
        "id": format!("f{id}"),
        "originalFilename": name,
        "size": 10,
        "uploaderEmail": "owner@example.com",
        "uploadedAt": "2025-03-01T09:30:00",
    }))
    .unwrap()
}

/// Records every call as `METHOD /path [detail]` and answers from canned data.
#[derive(Debug, Default)]
pub struct MockApi {
    calls: Mutex<Vec<String>>,
    spaces: Mutex<Vec<Space>>,
    details: Mutex<HashMap<String, Space>>,
    files: Mutex<HashMap<String, Vec<SpaceFile>>>,
    failures: Mutex<HashMap<&'static str, Option<(u16, String)>>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl MockApi {
    pub fn with_spaces(self, spaces: Vec<Space>) -> Self {
        *self.spaces.lock().unwrap() = spaces;
        self
    }

    pub fn set_space_detail(&self, space: Space) {
        self.details
            .lock()
            .unwrap()
            .insert(space.id.as_str().to_string(), space);
    }

    pub fn set_files(&self, space_id: &str, names: &[&str]) {
        let files = names.iter().enumerate().map(|(i, n)| file(i, n)).collect();
        self.files.lock().unwrap().insert(space_id.to_string(), files);
    }

    /// Fail `op` with a transport error.
    pub fn fail(&self, op: &'static str) {
        self.failures.lock().unwrap().insert(op, None);
    }

    /// Fail `op` with a gateway reply.
    pub fn fail_with(&self, op: &'static str, status: u16, body: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, Some((status, body.to_string())));
    }

    /// Hold `list_files` for `space_id` until the returned gate is notified.
    pub fn hold_files(&self, space_id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(space_id.to_string(), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, op: &'static str, call: String) -> AppResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(op) {
            None => Ok(()),
            Some(None) => Err(AppError::external("connection refused")),
            Some(Some((status, body))) => Err(AppError::upstream(UpstreamReply {
                status: *status,
                content_type: Some("application/json".into()),
                body: body.as_bytes().to_vec(),
            })),
        }
    }
}

#[async_trait]
impl SpacesApi for MockApi {
    async fn list_spaces(&self) -> AppResult<Vec<Space>> {
        self.record("list_spaces", "GET /spaces".into())?;
        Ok(self.spaces.lock().unwrap().clone())
    }

    async fn get_space(&self, space_id: &SpaceId) -> AppResult<Space> {
        self.record("get_space", format!("GET /spaces/{space_id}"))?;
        if let Some(space) = self.details.lock().unwrap().get(space_id.as_str()) {
            return Ok(space.clone());
        }
        Ok(space(space_id.as_str()))
    }

    async fn create_space(&self, new: &NewSpace) -> AppResult<serde_json::Value> {
        self.record("create_space", format!("POST /spaces name={}", new.name))?;
        Ok(serde_json::json!({ "id": "new" }))
    }

    async fn update_space(
        &self,
        space_id: &SpaceId,
        update: &SpaceUpdate,
    ) -> AppResult<serde_json::Value> {
        let body = serde_json::to_string(update).unwrap();
        self.record("update_space", format!("PUT /spaces/{space_id} {body}"))?;
        Ok(serde_json::json!({}))
    }

    async fn delete_space(&self, space_id: &SpaceId) -> AppResult<serde_json::Value> {
        self.record("delete_space", format!("DELETE /spaces/{space_id}"))?;
        Ok(serde_json::json!({}))
    }

    async fn list_files(&self, space_id: &SpaceId) -> AppResult<Vec<SpaceFile>> {
        self.record("list_files", format!("GET /spaces/{space_id}/files"))?;
        let gate = self.gates.lock().unwrap().get(space_id.as_str()).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(self
            .files
            .lock()
            .unwrap()
            .get(space_id.as_str())
            .cloned()
            .unwrap_or_default())
    }

    async fn upload_file(
        &self,
        space_id: &SpaceId,
        upload: FileUpload,
    ) -> AppResult<serde_json::Value> {
        self.record(
            "upload_file",
            format!("POST /spaces/{space_id}/files file={}", upload.file_name),
        )?;
        Ok(serde_json::json!({ "id": "f-new" }))
    }

    async fn download_file(&self, file_id: &FileId) -> AppResult<Download> {
        self.record("download_file", format!("GET /files/{file_id}"))?;
        Ok(Download {
            content_type: "application/octet-stream".into(),
            content_disposition: String::new(),
            data: Bytes::from_static(b"data"),
        })
    }

    async fn delete_file(&self, file_id: &FileId) -> AppResult<()> {
        self.record("delete_file", format!("DELETE /files/{file_id}"))
    }

    async fn list_activity(&self, space_id: &SpaceId) -> AppResult<Vec<Activity>> {
        self.record("list_activity", format!("GET /spaces/{space_id}/activity"))?;
        Ok(Vec::new())
    }

    async fn add_member(
        &self,
        space_id: &SpaceId,
        member: &NewMember,
    ) -> AppResult<serde_json::Value> {
        self.record(
            "add_member",
            format!("POST /spaces/{space_id}/members email={}", member.email),
        )?;
        Ok(serde_json::json!({}))
    }

    async fn change_role(
        &self,
        space_id: &SpaceId,
        email: &str,
        change: &RoleChange,
    ) -> AppResult<serde_json::Value> {
        self.record(
            "change_role",
            format!("PUT /spaces/{space_id}/members/{email} role={}", change.role),
        )?;
        Ok(serde_json::json!({}))
    }

    async fn remove_member(
        &self,
        space_id: &SpaceId,
        email: &str,
    ) -> AppResult<serde_json::Value> {
        self.record(
            "remove_member",
            format!("DELETE /spaces/{space_id}/members/{email}"),
        )?;
        Ok(serde_json::json!({}))
    }
}

/// Records alerts and prompts; answers every prompt the same way.
#[derive(Debug)]
pub struct RecordingNotifier {
    answer: bool,
    alerts: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn accepting() -> Self {
        Self::answering(true)
    }

    pub fn declining() -> Self {
        Self::answering(false)
    }

    fn answering(answer: bool) -> Self {
        Self {
            answer,
            alerts: Mutex::default(),
            prompts: Mutex::default(),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.answer
    }
}
