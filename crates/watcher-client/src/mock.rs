//! In-memory Watcher mock for tests.
//!
//! [`MockWatcherClient`] implements [`WatcherApi`] against local state:
//! scripted audit state transitions, failure injection, and a call log for
//! asserting that validation failures issue no requests.
//!
//! Available to other crates' tests through the `mock` feature.

use std::collections::VecDeque;
use std::sync::Mutex;

use watchbench_core::types::{
    Audit, AuditState, AuditTemplate, CreateTemplateRequest, Goal, Strategy, TemplateQuery,
};

use crate::api::{WatcherApi, validate_resource_id};
use crate::error::WatcherError;

#[derive(Debug, Default)]
struct MockState {
    goals: Vec<Goal>,
    strategies: Vec<Strategy>,
    templates: Vec<AuditTemplate>,
    audits: Vec<Audit>,
    /// States returned by successive `get_audit` calls; the last observed
    /// state sticks once the script is exhausted.
    audit_script: VecDeque<AuditState>,
    calls: Vec<String>,
    fail_ping: bool,
    reject_create_template: Option<String>,
    reject_create_audit: Option<String>,
    next_id: u64,
}

/// Test implementation of [`WatcherApi`] with configurable responses.
///
/// # Examples
///
/// ```ignore
/// let client = MockWatcherClient::new()
///     .with_catalog("workload_balancing", "workload_stabilization")
///     .with_audit_states([AuditState::Ongoing, AuditState::Succeeded]);
/// ```
pub struct MockWatcherClient {
    state: Mutex<MockState>,
}

impl MockWatcherClient {
    /// Creates an empty mock: no goals, no templates, everything succeeds.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(MockState::default()),
        }
    }

    /// Registers a goal/strategy pair so name resolution succeeds.
    pub fn with_catalog(self, goal_name: &str, strategy_name: &str) -> Self {
        {
            let mut state = self.state.lock().expect("mock state poisoned");
            let goal_uuid = format!("goal-{}", state.goals.len() + 1);
            state.goals.push(Goal {
                uuid: goal_uuid.clone(),
                name: goal_name.to_owned(),
                display_name: goal_name.replace('_', " "),
            });
            let strategy_uuid = format!("strategy-{}", state.strategies.len() + 1);
            state.strategies.push(Strategy {
                uuid: strategy_uuid,
                name: strategy_name.to_owned(),
                display_name: strategy_name.replace('_', " "),
                goal_uuid,
            });
        }
        self
    }

    /// Seeds pre-existing audit templates.
    pub fn with_templates(self, templates: Vec<AuditTemplate>) -> Self {
        self.state
            .lock()
            .expect("mock state poisoned")
            .templates
            .extend(templates);
        self
    }

    /// Scripts the states returned by successive `get_audit` calls.
    pub fn with_audit_states(self, states: impl IntoIterator<Item = AuditState>) -> Self {
        self.state
            .lock()
            .expect("mock state poisoned")
            .audit_script
            .extend(states);
        self
    }

    /// Makes `ping` fail with a connection error.
    pub fn with_fail_ping(self) -> Self {
        self.state.lock().expect("mock state poisoned").fail_ping = true;
        self
    }

    /// Makes `create_audit_template` fail with the given rejection reason.
    pub fn with_reject_create_template(self, reason: &str) -> Self {
        self.state
            .lock()
            .expect("mock state poisoned")
            .reject_create_template = Some(reason.to_owned());
        self
    }

    /// Makes `create_audit` fail with the given rejection reason.
    pub fn with_reject_create_audit(self, reason: &str) -> Self {
        self.state
            .lock()
            .expect("mock state poisoned")
            .reject_create_audit = Some(reason.to_owned());
        self
    }

    /// Returns the operations invoked so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().expect("mock state poisoned").calls.clone()
    }

    /// Returns how many times `operation` was invoked.
    pub fn call_count(&self, operation: &str) -> usize {
        self.state
            .lock()
            .expect("mock state poisoned")
            .calls
            .iter()
            .filter(|c| c.as_str() == operation)
            .count()
    }

    /// Current number of stored templates.
    pub fn template_count(&self) -> usize {
        self.state.lock().expect("mock state poisoned").templates.len()
    }

    /// Current number of stored audits.
    pub fn audit_count(&self) -> usize {
        self.state.lock().expect("mock state poisoned").audits.len()
    }

    /// Current number of stored audits referencing `template_uuid`.
    pub fn audit_count_for(&self, template_uuid: &str) -> usize {
        self.state
            .lock()
            .expect("mock state poisoned")
            .audits
            .iter()
            .filter(|a| a.audit_template_uuid == template_uuid)
            .count()
    }

    fn record(state: &mut MockState, operation: &str) {
        state.calls.push(operation.to_owned());
    }

    fn next_id(state: &mut MockState, prefix: &str) -> String {
        state.next_id += 1;
        format!("{prefix}-{}", state.next_id)
    }
}

impl Default for MockWatcherClient {
    fn default() -> Self {
        Self::new()
    }
}

impl WatcherApi for MockWatcherClient {
    async fn ping(&self) -> Result<(), WatcherError> {
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::record(&mut state, "ping");
        if state.fail_ping {
            Err(WatcherError::Connection("mock: service down".to_owned()))
        } else {
            Ok(())
        }
    }

    async fn list_goals(&self) -> Result<Vec<Goal>, WatcherError> {
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::record(&mut state, "list_goals");
        Ok(state.goals.clone())
    }

    async fn list_strategies(&self) -> Result<Vec<Strategy>, WatcherError> {
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::record(&mut state, "list_strategies");
        Ok(state.strategies.clone())
    }

    async fn create_audit_template(
        &self,
        request: &CreateTemplateRequest,
    ) -> Result<AuditTemplate, WatcherError> {
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::record(&mut state, "create_audit_template");

        if let Some(reason) = &state.reject_create_template {
            return Err(WatcherError::CreationRejected {
                resource: "audit_template".to_owned(),
                reason: reason.clone(),
            });
        }

        // Resolve the goal/strategy UUIDs back to names, like the service does.
        let goal_name = state
            .goals
            .iter()
            .find(|g| g.uuid == request.goal)
            .map(|g| g.name.clone())
            .ok_or_else(|| WatcherError::CreationRejected {
                resource: "audit_template".to_owned(),
                reason: format!("unknown goal uuid: {}", request.goal),
            })?;
        let strategy_name = state
            .strategies
            .iter()
            .find(|s| s.uuid == request.strategy)
            .map(|s| s.name.clone())
            .ok_or_else(|| WatcherError::CreationRejected {
                resource: "audit_template".to_owned(),
                reason: format!("unknown strategy uuid: {}", request.strategy),
            })?;

        let template = AuditTemplate {
            uuid: Self::next_id(&mut state, "tpl"),
            name: request.name.clone(),
            goal: goal_name,
            strategy: strategy_name,
            description: request.description.clone(),
        };
        state.templates.push(template.clone());
        Ok(template)
    }

    async fn delete_audit_template(&self, uuid: &str) -> Result<(), WatcherError> {
        validate_resource_id(uuid)?;
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::record(&mut state, "delete_audit_template");

        // The service refuses to delete a template that audits still reference.
        if state.audits.iter().any(|a| a.audit_template_uuid == uuid) {
            return Err(WatcherError::Api {
                operation: "delete_audit_template".to_owned(),
                status: 409,
                message: format!("template {uuid} still referenced by audits"),
            });
        }

        let before = state.templates.len();
        state.templates.retain(|t| t.uuid != uuid);
        if state.templates.len() == before {
            return Err(WatcherError::NotFound {
                resource: "audit_template".to_owned(),
                id: uuid.to_owned(),
            });
        }
        Ok(())
    }

    async fn list_audit_templates(
        &self,
        query: &TemplateQuery,
    ) -> Result<Vec<AuditTemplate>, WatcherError> {
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::record(&mut state, "list_audit_templates");

        let mut matches: Vec<AuditTemplate> = state
            .templates
            .iter()
            .filter(|t| query.name.as_deref().is_none_or(|n| t.name == n))
            .filter(|t| query.goal.as_deref().is_none_or(|g| t.goal == g))
            .filter(|t| query.strategy.as_deref().is_none_or(|s| t.strategy == s))
            .cloned()
            .collect();

        if let Some(sort_key) = query.sort_key.as_deref() {
            match sort_key {
                "name" => matches.sort_by(|a, b| a.name.cmp(&b.name)),
                "uuid" => matches.sort_by(|a, b| a.uuid.cmp(&b.uuid)),
                other => {
                    return Err(WatcherError::Api {
                        operation: "list_audit_templates".to_owned(),
                        status: 400,
                        message: format!("unsupported sort_key: {other}"),
                    });
                }
            }
            if query.sort_dir == Some(watchbench_core::types::SortDir::Desc) {
                matches.reverse();
            }
        }

        match query.limit {
            Some(0) | None => {}
            Some(n) => matches.truncate(n as usize),
        }

        if !query.detail {
            for template in &mut matches {
                template.description = None;
            }
        }

        Ok(matches)
    }

    async fn create_audit(&self, template_uuid: &str) -> Result<Audit, WatcherError> {
        validate_resource_id(template_uuid)?;
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::record(&mut state, "create_audit");

        if let Some(reason) = &state.reject_create_audit {
            return Err(WatcherError::CreationRejected {
                resource: "audit".to_owned(),
                reason: reason.clone(),
            });
        }

        let audit = Audit {
            uuid: Self::next_id(&mut state, "audit"),
            audit_template_uuid: template_uuid.to_owned(),
            state: AuditState::Pending,
            audit_type: "ONESHOT".to_owned(),
        };
        state.audits.push(audit.clone());
        Ok(audit)
    }

    async fn get_audit(&self, uuid: &str) -> Result<Audit, WatcherError> {
        validate_resource_id(uuid)?;
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::record(&mut state, "get_audit");

        let next_state = state.audit_script.pop_front();
        let audit = state
            .audits
            .iter_mut()
            .find(|a| a.uuid == uuid)
            .ok_or_else(|| WatcherError::NotFound {
                resource: "audit".to_owned(),
                id: uuid.to_owned(),
            })?;
        if let Some(next) = next_state {
            audit.state = next;
        }
        Ok(audit.clone())
    }

    async fn delete_audit(&self, uuid: &str) -> Result<(), WatcherError> {
        validate_resource_id(uuid)?;
        let mut state = self.state.lock().expect("mock state poisoned");
        Self::record(&mut state, "delete_audit");

        let before = state.audits.len();
        state.audits.retain(|a| a.uuid != uuid);
        if state.audits.len() == before {
            return Err(WatcherError::NotFound {
                resource: "audit".to_owned(),
                id: uuid.to_owned(),
            });
        }
        Ok(())
    }
}
