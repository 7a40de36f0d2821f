//! Executors backed by a `composer`-compatible command-line tool.
//!
//! Each [`CommandExecutor`] translates its action's [`ActionArgs`] into a
//! tool invocation, runs it in the extension directory, and appends both
//! stdout and stderr to the tool's shared [`BufferedOutput`].

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Deserialize;

use crate::action::{ActionArgs, ActionKind, ActionResult, ShowQuery, ShowTarget};
use crate::error::{ExecutorError, Result};
use crate::executor::Executor;
use crate::output::BufferedOutput;
use crate::package::{Author, InstalledPackage, PackageMetadata};

/// The tool every command executor drives.
#[derive(Debug, Clone)]
pub struct CommandTool {
    program: PathBuf,
    working_dir: PathBuf,
    output: BufferedOutput,
}

impl CommandTool {
    pub fn new(program: impl Into<PathBuf>, working_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            working_dir: working_dir.into(),
            output: BufferedOutput::new(),
        }
    }

    /// Resolve `name` on PATH (unless it is already a path) and use it.
    pub fn locate(name: &str, working_dir: impl Into<PathBuf>) -> Result<Self> {
        let program = if Path::new(name).components().count() > 1 {
            PathBuf::from(name)
        } else {
            locate_tool(name)?
        };
        Ok(Self::new(program, working_dir))
    }

    /// Share `output` with this tool instead of a private buffer.
    pub fn with_output(mut self, output: BufferedOutput) -> Self {
        self.output = output;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    pub fn output(&self) -> &BufferedOutput {
        &self.output
    }
}

/// Verify a binary is on PATH. Returns the resolved path or
/// [`ExecutorError::ToolNotFound`].
pub fn locate_tool(tool: &str) -> Result<PathBuf> {
    let path_var = std::env::var_os("PATH").unwrap_or_default();
    let extensions: Vec<String> = if cfg!(windows) {
        std::env::var("PATHEXT")
            .unwrap_or_else(|_| ".COM;.EXE;.BAT;.CMD".to_string())
            .split(';')
            .map(|s| s.to_ascii_lowercase())
            .collect()
    } else {
        vec![String::new()]
    };

    for dir in std::env::split_paths(&path_var) {
        for ext in &extensions {
            let candidate = dir.join(format!("{tool}{ext}"));
            if candidate.is_file() {
                return Ok(candidate);
            }
        }
    }

    Err(ExecutorError::ToolNotFound {
        tool: tool.to_string(),
    })
}

/// Runs one action through a [`CommandTool`].
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    kind: ActionKind,
    tool: CommandTool,
}

impl CommandExecutor {
    pub fn new(kind: ActionKind, tool: CommandTool) -> Self {
        Self { kind, tool }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    fn invalid(&self, args: &ActionArgs) -> ExecutorError {
        ExecutorError::InvalidArguments {
            action: self.kind,
            reason: format!("unsupported argument shape {args:?}"),
        }
    }

    /// Tool arguments for this action.
    pub fn arguments(&self, args: &ActionArgs) -> Result<Vec<String>> {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let arguments = match (self.kind, args) {
            (ActionKind::Check, ActionArgs::None) => {
                owned(&["update", "--dry-run", "--no-interaction"])
            }
            (ActionKind::Autoload, ActionArgs::None) => owned(&["dump-autoload"]),
            (ActionKind::Install, ActionArgs::None) => owned(&["install", "--no-interaction"]),
            (ActionKind::Depends, ActionArgs::Query { package, constraint }) => {
                let package = package.as_deref().ok_or_else(|| self.invalid(args))?;
                let mut arguments = owned(&["depends", package]);
                arguments.extend(constraint.clone());
                arguments
            }
            (ActionKind::Prohibits, ActionArgs::Query { package, constraint }) => {
                let package = package.as_deref().ok_or_else(|| self.invalid(args))?;
                owned(&["prohibits", package, constraint.as_deref().unwrap_or("*")])
            }
            (ActionKind::Remove, ActionArgs::Packages(packages)) => {
                let mut arguments = owned(&["remove", "--no-interaction"]);
                arguments.extend(packages.iter().cloned());
                arguments
            }
            (ActionKind::Require, ActionArgs::Packages(packages)) => {
                let mut arguments = owned(&["require", "--no-interaction"]);
                arguments.extend(packages.iter().cloned());
                arguments
            }
            (ActionKind::Update, ActionArgs::Packages(packages)) => {
                let mut arguments = owned(&["update", "--no-interaction"]);
                arguments.extend(packages.iter().cloned());
                arguments
            }
            (ActionKind::Search, ActionArgs::Packages(terms)) => {
                let mut arguments = owned(&["search", "--format=json"]);
                arguments.extend(terms.iter().cloned());
                arguments
            }
            (ActionKind::Show, ActionArgs::Show(query)) => show_arguments(query),
            _ => return Err(self.invalid(args)),
        };

        Ok(arguments)
    }

    fn run(&self, arguments: &[String]) -> Result<(i32, String, String)> {
        let program = self.tool.program.display().to_string();
        tracing::debug!(program = %program, args = ?arguments, "Running package tool");

        let output = Command::new(&self.tool.program)
            .args(arguments)
            .current_dir(&self.tool.working_dir)
            .output()
            .map_err(|source| ExecutorError::Spawn { program, source })?;

        self.tool.output.append(&output.stdout);
        self.tool.output.append(&output.stderr);

        let code = output.status.code().unwrap_or(-1);
        Ok((
            code,
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
        ))
    }

    fn parse_json(&self, stdout: &str) -> Result<serde_json::Value> {
        serde_json::from_str(stdout).map_err(|e| ExecutorError::InvalidOutput {
            action: self.kind,
            message: e.to_string(),
        })
    }
}

fn show_arguments(query: &ShowQuery) -> Vec<String> {
    let mut arguments = vec!["show".to_string(), "--format=json".to_string()];
    match query.target {
        ShowTarget::Installed => {}
        ShowTarget::Available => arguments.push("--available".to_string()),
        ShowTarget::Platform => arguments.push("--platform".to_string()),
        ShowTarget::Root => arguments.push("--self".to_string()),
    }
    arguments.extend(query.package.clone());
    arguments.extend(query.version.clone());
    arguments
}

/// `show --format=json` listing of installed packages.
///
/// The toolchain's listing carries name, version and description only.
/// `type`, `authors` and `keywords` are read when a listing supplies them;
/// otherwise the records report a plain library without authors or keywords.
#[derive(Debug, Deserialize)]
struct InstalledListing {
    #[serde(default)]
    installed: Vec<ListedPackage>,
}

#[derive(Debug, Deserialize)]
struct ListedPackage {
    name: String,
    version: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(rename = "type", default)]
    package_type: Option<String>,
    #[serde(default)]
    authors: Option<Vec<Author>>,
    #[serde(default)]
    keywords: Option<Vec<String>>,
}

impl From<ListedPackage> for InstalledPackage {
    fn from(listed: ListedPackage) -> Self {
        let mut package = PackageMetadata::new(listed.name, listed.version);
        package.package_type = listed.package_type;
        package.authors = listed.authors;
        package.keywords = listed.keywords;
        package.description = listed.description;
        InstalledPackage::new(package)
    }
}

/// Parse an installed-package listing into records.
pub(crate) fn parse_installed(stdout: &str) -> serde_json::Result<Vec<InstalledPackage>> {
    if stdout.trim().is_empty() {
        return Ok(Vec::new());
    }
    let listing: InstalledListing = serde_json::from_str(stdout)?;
    Ok(listing.installed.into_iter().map(Into::into).collect())
}

impl Executor for CommandExecutor {
    fn execute(&self, args: ActionArgs) -> Result<ActionResult> {
        let arguments = self.arguments(&args)?;
        let (code, stdout, stderr) = self.run(&arguments)?;

        match (self.kind, &args) {
            (ActionKind::Show | ActionKind::Search, _) if code != 0 => Err(ExecutorError::Failed {
                action: self.kind,
                exit_code: code,
                message: stderr.trim().to_string(),
            }),
            (ActionKind::Show, ActionArgs::Show(query))
                if query.target == ShowTarget::Installed && query.package.is_none() =>
            {
                parse_installed(&stdout)
                    .map(ActionResult::Installed)
                    .map_err(|e| ExecutorError::InvalidOutput {
                        action: self.kind,
                        message: e.to_string(),
                    })
            }
            (ActionKind::Show | ActionKind::Search, _) => {
                self.parse_json(&stdout).map(ActionResult::Value)
            }
            _ => Ok(ActionResult::ExitCode(code)),
        }
    }
}
