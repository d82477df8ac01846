//! Presentation model for batch tasks.

use chrono::{DateTime, Utc};
use nimbus_mgmt::batch::CloudTask;
use serde::{Deserialize, Serialize};

/// Task as emitted to the output stream.
///
/// Carries the account/workitem/job coordinates alongside the task fields so
/// a piped task object is a self-contained delete target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchTask {
    pub account: String,
    pub workitem: String,
    pub job: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub environment: Vec<TaskEnvironmentEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskEnvironmentEntry {
    pub name: String,
    pub value: String,
}

impl BatchTask {
    /// Pure projection from the wire task plus its addressing context.
    pub fn from_wire(task: CloudTask, account: &str, workitem: &str, job: &str) -> Self {
        Self {
            account: account.to_string(),
            workitem: workitem.to_string(),
            job: job.to_string(),
            name: task.name,
            state: task.state,
            command_line: task.command_line,
            creation_time: task.creation_time,
            environment: task
                .environment_settings
                .into_iter()
                .map(|setting| TaskEnvironmentEntry {
                    name: setting.name,
                    value: setting.value,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_mgmt::batch::EnvironmentSetting;

    #[test]
    fn mapping_copies_wire_fields_and_addressing_context() {
        let wire = CloudTask {
            name: "task1".into(),
            state: Some("active".into()),
            command_line: Some("cmd /c echo hi".into()),
            creation_time: Some("2015-06-01T12:00:00Z".parse().unwrap()),
            environment_settings: vec![EnvironmentSetting {
                name: "MODE".into(),
                value: "fast".into(),
            }],
        };

        let task = BatchTask::from_wire(wire.clone(), "acct", "wi", "job-1");

        assert_eq!(task.account, "acct");
        assert_eq!(task.workitem, "wi");
        assert_eq!(task.job, "job-1");
        assert_eq!(task.name, wire.name);
        assert_eq!(task.state, wire.state);
        assert_eq!(task.command_line, wire.command_line);
        assert_eq!(task.creation_time, wire.creation_time);
        assert_eq!(task.environment[0].name, "MODE");
        assert_eq!(task.environment[0].value, "fast");
    }

    #[test]
    fn piped_task_round_trips_through_json() {
        let task = BatchTask {
            account: "acct".into(),
            workitem: "wi".into(),
            job: "job-1".into(),
            name: "task1".into(),
            state: Some("active".into()),
            command_line: None,
            creation_time: None,
            environment: Vec::new(),
        };

        let json = serde_json::to_string(&task).unwrap();
        let parsed: BatchTask = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, task);
    }
}
