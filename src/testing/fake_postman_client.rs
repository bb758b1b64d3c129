use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{AppError, Collection, Environment, RemoteRef};
use crate::ports::{CreateSpecRequest, GenerationRequest, PostmanApi};

/// Generated collection that becomes listable after a number of polls.
#[derive(Clone)]
struct PendingCollection {
    reference: RemoteRef,
    polls_remaining: u32,
    materialized: bool,
}

#[derive(Default)]
struct WorkspaceState {
    next_id: u32,
    specs: Vec<(RemoteRef, CreateSpecRequest)>,
    collections: Vec<(RemoteRef, Collection)>,
    generated: HashMap<String, Vec<PendingCollection>>,
    environments: Vec<(RemoteRef, Environment)>,
    calls: Vec<String>,
}

impl WorkspaceState {
    fn next(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }
}

/// In-memory Postman workspace recording every call.
#[derive(Clone, Default)]
pub struct FakePostmanClient {
    state: Arc<Mutex<WorkspaceState>>,
    /// Listing polls before a generated collection shows up. `None` means never.
    generation_polls: Option<u32>,
    /// Create responses wrap the spec under a `spec` key instead of returning it top-level.
    nested_spec_response: bool,
    /// Create responses carry no identifier.
    omit_spec_id: bool,
    /// Delete calls fail with a server error.
    fail_deletes: bool,
    /// Generated-collection listings fail with this status.
    generated_listing_status: Option<u16>,
}

impl FakePostmanClient {
    pub fn new() -> Self {
        Self { generation_polls: Some(1), ..Default::default() }
    }

    pub fn with_generation_polls(mut self, polls: Option<u32>) -> Self {
        self.generation_polls = polls;
        self
    }

    pub fn with_nested_spec_response(mut self) -> Self {
        self.nested_spec_response = true;
        self
    }

    pub fn without_spec_id(mut self) -> Self {
        self.omit_spec_id = true;
        self
    }

    pub fn with_failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub fn with_failing_generated_listing(mut self, status: u16) -> Self {
        self.generated_listing_status = Some(status);
        self
    }

    fn record(&self, call: String) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn delete_failure(&self) -> Result<(), AppError> {
        if self.fail_deletes {
            Err(AppError::api("Postman API error (500): boom", Some(500)))
        } else {
            Ok(())
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls().into_iter().filter(|call| call.starts_with(prefix)).collect()
    }

    pub fn seed_spec(&self, name: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.next("spec");
        let request =
            CreateSpecRequest { name: name.to_string(), dialect: String::new(), files: vec![] };
        state.specs.push((RemoteRef::new(&id, name), request));
        id
    }

    pub fn seed_collection(&self, collection: Value) -> String {
        let collection: Collection = serde_json::from_value(collection).unwrap();
        let mut state = self.state.lock().unwrap();
        let id = state.next("col");
        let name = collection.name().unwrap_or_default().to_string();
        state.collections.push((RemoteRef::new(&id, name), collection));
        id
    }

    pub fn seed_environment(&self, environment: Environment) -> String {
        let mut state = self.state.lock().unwrap();
        let id = state.next("env");
        state.environments.push((RemoteRef::new(&id, &environment.name), environment));
        id
    }

    pub fn specs(&self) -> Vec<RemoteRef> {
        self.state.lock().unwrap().specs.iter().map(|(r, _)| r.clone()).collect()
    }

    pub fn spec_request(&self, id: &str) -> Option<CreateSpecRequest> {
        let state = self.state.lock().unwrap();
        state.specs.iter().find(|(r, _)| r.id == id).map(|(_, req)| req.clone())
    }

    pub fn collections(&self) -> Vec<RemoteRef> {
        self.state.lock().unwrap().collections.iter().map(|(r, _)| r.clone()).collect()
    }

    pub fn collection(&self, id: &str) -> Option<Collection> {
        let state = self.state.lock().unwrap();
        state.collections.iter().find(|(r, _)| r.id == id).map(|(_, c)| c.clone())
    }

    pub fn environments(&self) -> Vec<RemoteRef> {
        self.state.lock().unwrap().environments.iter().map(|(r, _)| r.clone()).collect()
    }

    pub fn environment(&self, id: &str) -> Option<Environment> {
        let state = self.state.lock().unwrap();
        state.environments.iter().find(|(r, _)| r.id == id).map(|(_, e)| e.clone())
    }
}

fn not_found(what: &str, id: &str) -> AppError {
    AppError::api(format!("Postman API error (404): {} {} not found", what, id), Some(404))
}

impl PostmanApi for FakePostmanClient {
    fn list_specs(&self, workspace_id: &str) -> Result<Vec<RemoteRef>, AppError> {
        self.record(format!("list_specs {}", workspace_id));
        Ok(self.specs())
    }

    fn create_spec(
        &self,
        workspace_id: &str,
        request: &CreateSpecRequest,
    ) -> Result<Value, AppError> {
        self.record(format!("create_spec {} {}", workspace_id, request.name));
        let mut state = self.state.lock().unwrap();
        let id = state.next("spec");
        state.specs.push((RemoteRef::new(&id, &request.name), request.clone()));

        let spec = if self.omit_spec_id {
            json!({ "name": request.name })
        } else {
            json!({ "id": id, "name": request.name })
        };
        Ok(if self.nested_spec_response { json!({ "spec": spec }) } else { spec })
    }

    fn delete_spec(&self, spec_id: &str) -> Result<(), AppError> {
        self.record(format!("delete_spec {}", spec_id));
        self.delete_failure()?;
        self.state.lock().unwrap().specs.retain(|(r, _)| r.id != spec_id);
        Ok(())
    }

    fn generate_collection(
        &self,
        spec_id: &str,
        request: &GenerationRequest,
    ) -> Result<Value, AppError> {
        self.record(format!("generate_collection {} {}", spec_id, request.name));
        let mut state = self.state.lock().unwrap();
        if !state.specs.iter().any(|(r, _)| r.id == spec_id) {
            return Err(not_found("spec", spec_id));
        }
        let id = state.next("col");
        let task = state.next("task");
        if let Some(polls) = self.generation_polls {
            let pending = PendingCollection {
                reference: RemoteRef::new(&id, &request.name),
                polls_remaining: polls,
                materialized: false,
            };
            state.generated.entry(spec_id.to_string()).or_default().push(pending);
        }
        Ok(json!({ "taskId": task, "url": format!("/specs/{}/tasks/{}", spec_id, task) }))
    }

    fn list_generated_collections(&self, spec_id: &str) -> Result<Vec<RemoteRef>, AppError> {
        self.record(format!("list_generated_collections {}", spec_id));
        if let Some(status) = self.generated_listing_status {
            let message = format!("Postman API error ({status}): denied");
            return Err(AppError::api(message, Some(status)));
        }
        let mut state = self.state.lock().unwrap();
        let mut ready = Vec::new();
        let mut materialized = Vec::new();
        if let Some(pending) = state.generated.get_mut(spec_id) {
            for item in pending.iter_mut() {
                item.polls_remaining = item.polls_remaining.saturating_sub(1);
                if item.polls_remaining > 0 {
                    continue;
                }
                if !item.materialized {
                    item.materialized = true;
                    materialized.push(item.reference.clone());
                }
                ready.push(item.reference.clone());
            }
        }
        for reference in materialized {
            let collection: Collection = serde_json::from_value(json!({
                "info": {"_postman_id": reference.id, "name": reference.name},
                "item": [{"name": "generated", "item": []}]
            }))
            .unwrap();
            state.collections.push((reference, collection));
        }
        Ok(ready)
    }

    fn list_collections(&self, workspace_id: &str) -> Result<Vec<RemoteRef>, AppError> {
        self.record(format!("list_collections {}", workspace_id));
        Ok(self.collections())
    }

    fn get_collection(&self, collection_id: &str) -> Result<Collection, AppError> {
        self.record(format!("get_collection {}", collection_id));
        self.collection(collection_id).ok_or_else(|| not_found("collection", collection_id))
    }

    fn put_collection(
        &self,
        collection_id: &str,
        collection: &Collection,
    ) -> Result<(), AppError> {
        self.record(format!("put_collection {}", collection_id));
        let mut state = self.state.lock().unwrap();
        let slot = state
            .collections
            .iter_mut()
            .find(|(r, _)| r.id == collection_id)
            .ok_or_else(|| not_found("collection", collection_id))?;
        slot.1 = collection.clone();
        Ok(())
    }

    fn delete_collection(&self, collection_id: &str) -> Result<(), AppError> {
        self.record(format!("delete_collection {}", collection_id));
        self.delete_failure()?;
        self.state.lock().unwrap().collections.retain(|(r, _)| r.id != collection_id);
        Ok(())
    }

    fn list_environments(&self, workspace_id: &str) -> Result<Vec<RemoteRef>, AppError> {
        self.record(format!("list_environments {}", workspace_id));
        Ok(self.environments())
    }

    fn create_environment(
        &self,
        workspace_id: &str,
        environment: &Environment,
    ) -> Result<Value, AppError> {
        self.record(format!("create_environment {} {}", workspace_id, environment.name));
        let mut state = self.state.lock().unwrap();
        let id = state.next("env");
        state.environments.push((RemoteRef::new(&id, &environment.name), environment.clone()));
        Ok(json!({ "environment": { "id": id, "name": environment.name } }))
    }

    fn update_environment(
        &self,
        environment_id: &str,
        environment: &Environment,
    ) -> Result<(), AppError> {
        self.record(format!("update_environment {}", environment_id));
        let mut state = self.state.lock().unwrap();
        let slot = state
            .environments
            .iter_mut()
            .find(|(r, _)| r.id == environment_id)
            .ok_or_else(|| not_found("environment", environment_id))?;
        slot.0.name = environment.name.clone();
        slot.1 = environment.clone();
        Ok(())
    }

    fn delete_environment(&self, environment_id: &str) -> Result<(), AppError> {
        self.record(format!("delete_environment {}", environment_id));
        self.delete_failure()?;
        self.state.lock().unwrap().environments.retain(|(r, _)| r.id != environment_id);
        Ok(())
    }
}
