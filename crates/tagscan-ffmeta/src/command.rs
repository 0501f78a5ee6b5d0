//! Running ffmpeg to obtain the probe report.
//!
//! ffmpeg prints the report on stderr and, with no output file given, exits
//! non-zero after printing it. The runner accepts that as long as a report
//! was produced.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::report::{parse_report, ProbedInput};
use crate::tools::get_tool_path;
use crate::{Error, Result};

/// Executable used when no path is configured.
pub const DEFAULT_PROGRAM: &str = "ffmpeg";

/// Format flags requesting the ffmetadata report.
const REPORT_ARGS: [&str; 2] = ["-f", "ffmetadata"];

fn probe_args<P: AsRef<Path>>(paths: &[P]) -> Vec<OsString> {
    let mut args = Vec::with_capacity(paths.len() * 2 + REPORT_ARGS.len());
    for path in paths {
        args.push(OsString::from("-i"));
        args.push(path.as_ref().as_os_str().to_os_string());
    }
    args.extend(REPORT_ARGS.iter().map(OsString::from));
    args
}

/// Render the probe command line: the program, one `-i <path>` pair per
/// input, then the report format flags.
///
/// # Example
///
/// ```
/// use tagscan_ffmeta::create_probe_command;
///
/// let cmd = create_probe_command("ffmpeg", &["/music library/one.mp3"]);
/// assert_eq!(cmd, ["ffmpeg", "-i", "/music library/one.mp3", "-f", "ffmetadata"]);
/// ```
pub fn create_probe_command<P: AsRef<Path>>(program: &str, paths: &[P]) -> Vec<String> {
    std::iter::once(program.to_string())
        .chain(
            probe_args(paths)
                .into_iter()
                .map(|arg| arg.to_string_lossy().into_owned()),
        )
        .collect()
}

/// Runs the probing tool against files and parses its report.
#[derive(Debug, Clone)]
pub struct Prober {
    program: PathBuf,
}

impl Prober {
    /// Use `ffmpeg` from `PATH`.
    pub fn new() -> Result<Self> {
        Self::from_config(None)
    }

    /// Use a configured executable, falling back to `PATH`.
    pub fn from_config(configured: Option<&Path>) -> Result<Self> {
        Ok(Self {
            program: get_tool_path(DEFAULT_PROGRAM, configured)?,
        })
    }

    /// Use this exact executable.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Path of the executable this prober runs.
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Probe files and return one parsed entry per input, in report order.
    pub fn probe<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<ProbedInput>> {
        let report = self.run(paths)?;
        Ok(parse_report(&report))
    }

    /// Run the tool and return the raw report text.
    pub fn run<P: AsRef<Path>>(&self, paths: &[P]) -> Result<String> {
        if let Some(missing) = paths.iter().map(|p| p.as_ref()).find(|p: &&Path| !p.exists()) {
            return Err(Error::file_not_found(missing));
        }

        let tool = self.tool_name();
        tracing::debug!(
            "Running probe: {}",
            create_probe_command(&self.program.to_string_lossy(), paths).join(" ")
        );

        let output = Command::new(&self.program)
            .args(probe_args(paths))
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    Error::tool_not_found(&tool)
                } else {
                    Error::Io(e)
                }
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let report = if has_report(&stderr) {
            stderr
        } else {
            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            if has_report(&stdout) {
                stdout
            } else if output.status.success() {
                return Err(Error::parse_error(tool, "no input sections in output"));
            } else {
                return Err(Error::tool_failed(tool, stderr.trim()));
            }
        };

        if !output.status.success() {
            tracing::debug!("{} exited with {} after printing its report", tool, output.status);
        }

        Ok(report)
    }

    fn tool_name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string())
    }
}

fn has_report(text: &str) -> bool {
    text.lines().any(|l| l.trim_start().starts_with("Input #"))
}
