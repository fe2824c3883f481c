//! gitattributes provider - Rules declared as git attributes
//!
//! Attributes are read with `git check-attr -z --stdin --all`, which prints
//! NUL-separated `path, attribute, value` triples. Unset attributes (`-ts`)
//! are reported with the value `unset`, set ones (`ts`) with `set`.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, info_span, Instrument};

use super::RuleSource;
use crate::error::{ProviderError, SieveError};
use crate::filters::{AttributeMap, ProjectFilters};
use crate::utils::command::{execute_command, execute_command_checked};
use crate::utils::paths::{is_within, resolve};

const CHECK_ATTR_ARGS: [&str; 4] = ["check-attr", "-z", "--stdin", "--all"];
const LS_FILES_ARGS: [&str; 5] = ["ls-files", "-z", "--cached", "--others", "--exclude-standard"];

/// Rule provider backed by `.gitattributes`
#[derive(Debug, Clone)]
pub struct GitAttributesSource {
    working_dir: PathBuf,
}

impl GitAttributesSource {
    /// Create a provider that runs git from `working_dir`
    pub fn new(working_dir: PathBuf) -> Self {
        Self { working_dir }
    }

    /// Top-level directory of the work tree containing `working_dir`
    pub async fn git_root(&self) -> Result<PathBuf, SieveError> {
        let result = execute_command(
            "git",
            &["rev-parse", "--show-toplevel"],
            Some(&self.working_dir),
        )
        .await
        .map_err(|e| ProviderError::CommandFailed {
            command: "git rev-parse --show-toplevel".to_string(),
            message: e.to_string(),
        })?;

        if !result.success() {
            return Err(ProviderError::NotARepository(result.stderr).into());
        }

        Ok(PathBuf::from(result.stdout.trim()))
    }

    /// Tracked and untracked (but not ignored) files matching `patterns`,
    /// as absolute paths.
    ///
    /// Files without diagnostics only show up in the summary if they are
    /// known up front, which is what makes stale catch-all rules visible.
    pub async fn list_source_files(
        &self,
        patterns: &[String],
    ) -> Result<BTreeSet<String>, SieveError> {
        let mut args: Vec<&str> = LS_FILES_ARGS.to_vec();
        args.push("--");
        args.extend(patterns.iter().map(String::as_str));

        let stdout = execute_command_checked("git", &args, Some(&self.working_dir), None)
            .await
            .map_err(|message| ProviderError::CommandFailed {
                command: format!("git {}", LS_FILES_ARGS.join(" ")),
                message,
            })?;

        let files: BTreeSet<String> = stdout
            .split('\0')
            .filter(|path| !path.is_empty())
            .map(|path| resolve(&self.working_dir, path))
            .collect();

        debug!(count = files.len(), "Discovered source files");
        Ok(files)
    }

    async fn resolve(
        &self,
        files: &BTreeSet<String>,
        prefix: &str,
    ) -> Result<ProjectFilters, SieveError> {
        if files.is_empty() {
            return Ok(ProjectFilters::new());
        }

        let root = self.git_root().await?;
        let (inside, outside): (Vec<&String>, Vec<&String>) =
            files.iter().partition(|path| is_within(path, &root));

        for path in &outside {
            debug!(path = %path, root = %root.display(), "Outside the git work tree, skipping");
        }
        if inside.is_empty() {
            return Ok(ProjectFilters::new());
        }

        let attributes = self.check_attr(&inside).await?;
        let filters = ProjectFilters::from_attributes(&attributes, prefix)?;

        info!(
            queried = inside.len(),
            skipped = outside.len(),
            with_attributes = filters.len(),
            "Loaded rules from gitattributes"
        );
        Ok(filters)
    }

    async fn check_attr(&self, paths: &[&String]) -> Result<AttributeMap, SieveError> {
        let mut input = Vec::new();
        for path in paths {
            input.extend_from_slice(path.as_bytes());
            input.push(0);
        }

        let stdout = execute_command_checked(
            "git",
            &CHECK_ATTR_ARGS,
            Some(&self.working_dir),
            Some(input),
        )
        .await
        .map_err(|message| ProviderError::CommandFailed {
            command: format!("git {}", CHECK_ATTR_ARGS.join(" ")),
            message,
        })?;

        Ok(parse_check_attr_output(&stdout))
    }
}

#[async_trait::async_trait]
impl RuleSource for GitAttributesSource {
    fn name(&self) -> &'static str {
        "gitattributes"
    }

    async fn query(
        &self,
        files: &BTreeSet<String>,
        prefix: &str,
    ) -> Result<ProjectFilters, SieveError> {
        self.resolve(files, prefix)
            .instrument(info_span!("gitattributes", prefix))
            .await
    }
}

/// Parse `git check-attr -z` output into per-file attributes.
///
/// Records with an empty path are skipped; a trailing partial record is
/// dropped.
pub fn parse_check_attr_output(stdout: &str) -> AttributeMap {
    let mut attributes = AttributeMap::new();
    let fields: Vec<&str> = stdout.split('\0').collect();

    for record in fields.chunks(3) {
        let [path, attribute, value] = record else {
            break;
        };
        if path.is_empty() {
            continue;
        }
        attributes
            .entry(path.to_string())
            .or_default()
            .insert(attribute.to_string(), value.to_string());
    }

    attributes
}

/// Whether `git` can be run at all
pub async fn git_available(dir: &Path) -> bool {
    execute_command("git", &["--version"], Some(dir))
        .await
        .map(|r| r.success())
        .unwrap_or(false)
}
