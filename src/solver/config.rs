use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// What happens to a verdict when the whole `solve` call overran the timeout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeadlinePolicy {
    /// Any overrun is reported as a timeout, even if the search had already
    /// reached SAT or UNSAT.
    #[default]
    Strict,
    /// A verdict the search reached is kept; a timeout is reported only if
    /// some case split observed the expired deadline.
    KeepVerdict,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    pub timeout: Duration,
    pub deadline_policy: DeadlinePolicy,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            deadline_policy: DeadlinePolicy::default(),
        }
    }
}

impl SolverConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_deadline_policy(mut self, policy: DeadlinePolicy) -> Self {
        self.deadline_policy = policy;
        self
    }
}
