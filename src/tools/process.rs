use crate::error::{ReleaseError, Result};
use crate::tools::{display_command, ToolOutput, ToolRunner};
use log::debug;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Spawns commands as child processes in a fixed directory
pub struct ProcessRunner {
    dir: PathBuf,
}

impl ProcessRunner {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ProcessRunner { dir: dir.into() }
    }

    fn command(&self, argv: &[String]) -> Result<Command> {
        let (program, args) = argv.split_first().ok_or_else(|| {
            ReleaseError::config("cannot run an empty command")
        })?;

        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(&self.dir);
        Ok(cmd)
    }
}

fn launch_error(argv: &[String], e: std::io::Error) -> ReleaseError {
    ReleaseError::ExternalTool {
        program: display_command(argv),
        code: None,
        output: format!("failed to launch: {}", e),
    }
}

impl ToolRunner for ProcessRunner {
    fn capture(&self, argv: &[String]) -> Result<ToolOutput> {
        debug!("running `{}` in {}", display_command(argv), self.dir.display());

        let output = self
            .command(argv)?
            .stdin(Stdio::null())
            .output()
            .map_err(|e| launch_error(argv, e))?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        debug!(
            "`{}` exited with {:?}, {} bytes of output",
            display_command(argv),
            output.status.code(),
            combined.len()
        );

        Ok(ToolOutput {
            code: output.status.code(),
            output: combined,
        })
    }

    fn passthrough(&self, argv: &[String]) -> Result<()> {
        debug!("running `{}` in {}", display_command(argv), self.dir.display());

        let status = self
            .command(argv)?
            .status()
            .map_err(|e| launch_error(argv, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(ReleaseError::ExternalTool {
                program: display_command(argv),
                code: status.code(),
                output: String::new(),
            })
        }
    }
}
