use crate::config::Hooks;
use crate::domain::Template;
use crate::error::{ReleaseError, Result};
use crate::hooks::{CommandRunner, HookContext};
use tracing::{debug, info};

/// Runs the hook commands configured for a lifecycle point
pub struct HookExecutor<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    dry_run: bool,
}

impl<'a, R: CommandRunner + ?Sized> HookExecutor<'a, R> {
    pub fn new(runner: &'a R, dry_run: bool) -> Self {
        HookExecutor { runner, dry_run }
    }

    /// Execute every command registered for `context.point`, in declared order.
    ///
    /// `${version}` inside a command is replaced with the release version and
    /// the context is exported as RELEASE_* environment variables. The first
    /// command exiting non-zero stops the point and is returned as
    /// `HookFailed`; later commands are not run.
    ///
    /// # Returns
    /// * `Ok(n)` - number of commands executed (0 in dry-run mode)
    /// * `Err(HookFailed)` - a command exited non-zero
    pub fn run_point(&self, hooks: &Hooks, context: &HookContext) -> Result<usize> {
        let commands = hooks.commands_for(context.point);
        if commands.is_empty() {
            return Ok(0);
        }

        let env = context.to_env_vars();
        let mut executed = 0;

        for raw in commands {
            let command = Template::new(raw).render(&context.version);

            if self.dry_run {
                info!(point = %context.point, "[dry-run] $ {}", command);
                continue;
            }

            info!(point = %context.point, "$ {}", command);
            let output = self.runner.run(&command, &env)?;
            executed += 1;

            if !output.success() {
                return Err(ReleaseError::HookFailed {
                    command,
                    exit_code: output.exit_code,
                    stdout: output.stdout,
                    stderr: output.stderr,
                });
            }

            let stdout = output.stdout.trim_end();
            if !stdout.is_empty() {
                debug!(point = %context.point, "{}", stdout);
            }
        }

        Ok(executed)
    }
}
