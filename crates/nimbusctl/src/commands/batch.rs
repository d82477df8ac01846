//! Batch command implementations

use nimbus_mgmt::batch::{
    EnvironmentSetting, TaskCreateRequest, TaskHandler, TaskListOptions,
};
use serde_json::json;
use tracing::debug;

use crate::cli::{BatchCommands, OutputFormat, TaskCommands};
use crate::commands::utils::{confirm_action, emit, parse_key_value, read_stdin, require_non_empty};
use crate::connection::ConnectionManager;
use crate::error::{CtlError, Result as CliResult};
use crate::models::batch::BatchTask;

pub async fn handle_batch_command(
    conn_mgr: &ConnectionManager,
    profile_name: Option<&str>,
    command: &BatchCommands,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    match command {
        BatchCommands::Task(cmd) => {
            handle_task_command(conn_mgr, profile_name, cmd, output_format, query).await
        }
    }
}

async fn handle_task_command(
    conn_mgr: &ConnectionManager,
    profile_name: Option<&str>,
    command: &TaskCommands,
    output_format: OutputFormat,
    query: Option<&str>,
) -> CliResult<()> {
    let handler = TaskHandler::new(conn_mgr.create_client(profile_name)?);

    match command {
        TaskCommands::List {
            account,
            workitem,
            job,
            filter,
            max_count,
        } => {
            require_coordinates(account, workitem, job)?;
            let options = TaskListOptions {
                filter: filter.clone(),
                max_count: *max_count,
            };
            let response = handler.list(account, workitem, job, &options).await?;

            let tasks: Vec<BatchTask> = response
                .body
                .into_iter()
                .map(|task| BatchTask::from_wire(task, account, workitem, job))
                .collect();
            emit(&tasks, output_format, query)
        }

        TaskCommands::Get {
            account,
            workitem,
            job,
            name,
        } => {
            require_coordinates(account, workitem, job)?;
            require_non_empty(name, "task name")?;
            let response = handler.get(account, workitem, job, name).await?;
            let task = BatchTask::from_wire(response.body, account, workitem, job);
            emit(&task, output_format, query)
        }

        TaskCommands::Create {
            account,
            workitem,
            job,
            name,
            command_line,
            env,
        } => {
            require_coordinates(account, workitem, job)?;
            require_non_empty(name, "task name")?;
            require_non_empty(command_line, "task command line")?;

            let environment_settings = env
                .iter()
                .map(|pair| {
                    parse_key_value(pair).map(|(name, value)| EnvironmentSetting { name, value })
                })
                .collect::<CliResult<Vec<_>>>()?;

            let request = TaskCreateRequest {
                name: name.clone(),
                command_line: command_line.clone(),
                environment_settings,
            };
            debug!("Creating task '{}' in {}/{}/{}", name, account, workitem, job);

            let response = handler.create(account, workitem, job, &request).await?;
            let task = BatchTask::from_wire(response.body, account, workitem, job);
            emit(&task, output_format, query)
        }

        TaskCommands::Delete {
            account,
            workitem,
            job,
            name,
            stdin,
            force,
        } => {
            // By-name and pipeline input address the same logical target.
            let (account, workitem, job, name) = if *stdin {
                let piped: BatchTask =
                    serde_json::from_str(&read_stdin("task object")?).map_err(|e| {
                        CtlError::InvalidInput {
                            message: format!("invalid task JSON: {e}"),
                        }
                    })?;
                (piped.account, piped.workitem, piped.job, piped.name)
            } else {
                // clap guarantees these are present when --stdin is absent.
                (
                    account.clone().unwrap_or_default(),
                    workitem.clone().unwrap_or_default(),
                    job.clone().unwrap_or_default(),
                    name.clone().unwrap_or_default(),
                )
            };
            require_coordinates(&account, &workitem, &job)?;
            require_non_empty(&name, "task name")?;

            if !force && !confirm_action(&format!("delete task '{name}'"))? {
                println!("Cancelled");
                return Ok(());
            }

            debug!("Deleting task '{}' in {}/{}/{}", name, account, workitem, job);
            let response = handler.delete(&account, &workitem, &job, &name).await?;

            emit(
                &json!({
                    "account": account,
                    "workitem": workitem,
                    "job": job,
                    "name": name,
                    "status": "deleted",
                    "statusCode": response.status,
                    "requestId": response.request_id,
                }),
                output_format,
                query,
            )
        }
    }
}

/// Every task operation addresses account/workitem/job; all three must be
/// non-empty before dispatch.
fn require_coordinates(account: &str, workitem: &str, job: &str) -> CliResult<()> {
    require_non_empty(account, "account")?;
    require_non_empty(workitem, "workitem")?;
    require_non_empty(job, "job")?;
    Ok(())
}
