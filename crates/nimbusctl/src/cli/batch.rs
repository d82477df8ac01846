//! Batch CLI command definitions

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum BatchCommands {
    /// Task operations
    #[command(subcommand)]
    Task(TaskCommands),
}

/// Batch task commands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// List tasks under a job
    #[command(after_help = "EXAMPLES:
    # All tasks
    nimbusctl batch task list --account acct --workitem wi --job job-1

    # Server-side filter, capped result count
    nimbusctl batch task list --account acct --workitem wi --job job-1 \\
      --filter \"startswith(name, 'test')\" --max-count 10
")]
    List {
        /// Batch account name
        #[arg(long)]
        account: String,
        /// Workitem name
        #[arg(long)]
        workitem: String,
        /// Job name
        #[arg(long)]
        job: String,
        /// Free-form $filter expression passed through to the service
        #[arg(long)]
        filter: Option<String>,
        /// Maximum number of tasks to return
        #[arg(long)]
        max_count: Option<u32>,
    },
    /// Get one task by name
    Get {
        /// Batch account name
        #[arg(long)]
        account: String,
        /// Workitem name
        #[arg(long)]
        workitem: String,
        /// Job name
        #[arg(long)]
        job: String,
        /// Task name
        #[arg(long)]
        name: String,
    },
    /// Create a task
    Create {
        /// Batch account name
        #[arg(long)]
        account: String,
        /// Workitem name
        #[arg(long)]
        workitem: String,
        /// Job name
        #[arg(long)]
        job: String,
        /// Task name
        #[arg(long)]
        name: String,
        /// Command line the task runs
        #[arg(long)]
        command_line: String,
        /// Environment setting in key=value form (can be specified multiple times)
        #[arg(long = "env", value_name = "KEY=VALUE")]
        env: Vec<String>,
    },
    /// Delete a task, by name or from a piped task object
    #[command(after_help = "EXAMPLES:
    # By name
    nimbusctl batch task delete --account acct --workitem wi --job job-1 --name task1 --force

    # Pipeline form: the target is taken from the piped task object
    nimbusctl batch task get --account acct --workitem wi --job job-1 --name task1 -o json \\
        | nimbusctl batch task delete --stdin --force
")]
    Delete {
        /// Batch account name
        #[arg(long, required_unless_present = "stdin")]
        account: Option<String>,
        /// Workitem name
        #[arg(long, required_unless_present = "stdin")]
        workitem: Option<String>,
        /// Job name
        #[arg(long, required_unless_present = "stdin")]
        job: Option<String>,
        /// Task name
        #[arg(long, required_unless_present = "stdin", conflicts_with = "stdin")]
        name: Option<String>,
        /// Read the task to delete from stdin instead of naming it
        #[arg(long)]
        stdin: bool,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}
