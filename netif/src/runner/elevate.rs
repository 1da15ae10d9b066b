use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use super::{CommandOutput, CommandRunner, Elevator};
use crate::error::NetifResult;

/// Elevates by prepending a privilege prefix (`sudo`, `doas`, a UAC helper)
/// to the command line before handing it to the wrapped runner.
#[derive(Clone)]
pub struct PrefixElevator {
    runner: Arc<dyn CommandRunner>,
    prefix: Option<String>,
}

impl PrefixElevator {
    pub fn new(runner: Arc<dyn CommandRunner>, prefix: Option<String>) -> Self {
        let prefix = prefix.filter(|p| !p.trim().is_empty());
        Self { runner, prefix }
    }

    fn elevated(&self, command: &str) -> String {
        match &self.prefix {
            Some(prefix) => format!("{} {}", prefix.trim(), command),
            None => command.to_string(),
        }
    }
}

#[async_trait]
impl Elevator for PrefixElevator {
    async fn run_elevated(&self, command: &str, timeout: Duration) -> NetifResult<CommandOutput> {
        let line = self.elevated(command);
        debug!("elevated: {}", line);
        self.runner.run(&line, timeout).await
    }
}
