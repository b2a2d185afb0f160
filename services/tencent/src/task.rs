use aisign_core::{Error, RecognitionResult, Result, Vendor};
use std::time::Duration;

/// How an asynchronous recognition task is polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    /// Wait between two status queries.
    pub interval: Duration,
    /// Status queries allowed before giving up.
    pub max_attempts: u32,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(2),
            max_attempts: 10,
        }
    }
}

/// Status reported by `DescribeTaskStatus`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Status 0, queued.
    Waiting,
    /// Status 1, in progress.
    Running,
    /// Status 2, finished with a transcript.
    Success(String),
    /// Status 3, finished with an error message.
    Failed(String),
}

impl TaskStatus {
    /// Map the numeric vendor status.
    pub fn from_code(code: i64, result: String, error_msg: String) -> Result<Self> {
        match code {
            0 => Ok(TaskStatus::Waiting),
            1 => Ok(TaskStatus::Running),
            2 => Ok(TaskStatus::Success(result)),
            3 => Ok(TaskStatus::Failed(error_msg)),
            _ => Err(Error::vendor_error(
                Vendor::Tencent,
                format!("unknown task status {code}"),
            )),
        }
    }
}

/// Lifecycle of one asynchronous speech recognition task.
///
/// ```text
/// Submitted -> Polling -> Succeeded | Failed | TimedOut
/// ```
///
/// The machine is pure: the caller sleeps, queries the status and feeds it to
/// [`TaskState::advance`]. Dropping the driving future abandons the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    /// Task created, not queried yet.
    Submitted {
        /// Vendor task id.
        task_id: u64,
    },
    /// Task queried at least once and not finished.
    Polling {
        /// Vendor task id.
        task_id: u64,
        /// Status queries done so far.
        attempts: u32,
    },
    /// Task finished with a transcript.
    Succeeded(String),
    /// Task finished with an error.
    Failed(String),
    /// Attempt budget exhausted.
    TimedOut {
        /// Vendor task id.
        task_id: u64,
        /// Status queries done.
        attempts: u32,
    },
}

impl TaskState {
    /// Start tracking a freshly created task.
    pub fn submitted(task_id: u64) -> Self {
        TaskState::Submitted { task_id }
    }

    /// Vendor task id, if the task is still tracked.
    pub fn task_id(&self) -> Option<u64> {
        match self {
            TaskState::Submitted { task_id }
            | TaskState::Polling { task_id, .. }
            | TaskState::TimedOut { task_id, .. } => Some(*task_id),
            TaskState::Succeeded(_) | TaskState::Failed(_) => None,
        }
    }

    /// Whether no further status query is needed.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TaskState::Succeeded(_) | TaskState::Failed(_) | TaskState::TimedOut { .. }
        )
    }

    /// Apply the status returned by one query.
    ///
    /// Terminal states never change.
    pub fn advance(self, status: TaskStatus, policy: &PollPolicy) -> Self {
        let (task_id, attempts) = match self {
            TaskState::Submitted { task_id } => (task_id, 1),
            TaskState::Polling { task_id, attempts } => (task_id, attempts + 1),
            terminal => return terminal,
        };

        match status {
            TaskStatus::Success(text) => TaskState::Succeeded(text),
            TaskStatus::Failed(msg) => TaskState::Failed(msg),
            TaskStatus::Waiting | TaskStatus::Running if attempts >= policy.max_attempts => {
                TaskState::TimedOut { task_id, attempts }
            }
            TaskStatus::Waiting | TaskStatus::Running => TaskState::Polling { task_id, attempts },
        }
    }

    /// Turn a terminal state into the caller facing result.
    pub fn into_result(self) -> Result<RecognitionResult> {
        match self {
            TaskState::Succeeded(text) => Ok(RecognitionResult::from_lines(text.lines())),
            TaskState::Failed(msg) => Err(Error::vendor_error(
                Vendor::Tencent,
                if msg.is_empty() {
                    "recognition task failed".to_string()
                } else {
                    msg
                },
            )),
            TaskState::TimedOut { task_id, attempts } => Err(Error::timeout(format!(
                "task {task_id} not finished after {attempts} status queries"
            ))
            .with_vendor(Vendor::Tencent)),
            TaskState::Submitted { task_id } | TaskState::Polling { task_id, .. } => {
                Err(Error::unexpected(format!("task {task_id} is still running"))
                    .with_vendor(Vendor::Tencent))
            }
        }
    }
}
