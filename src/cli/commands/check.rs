//! Check command - Filter compiler diagnostics through gitattributes rules

use colored::Colorize;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, info, warn};

use super::CheckArgs;
use crate::cli::exit_codes;
use crate::cli::output::{JsonOutput, SummaryRenderer, TerminalOutput};
use crate::config::{Config, SummaryMode};
use crate::diagnostics::messages::load_table;
use crate::diagnostics::source::DiagnosticInput;
use crate::diagnostics::MessageCatalog;
use crate::error::SieveError;
use crate::filters::{sieve, Filterer};
use crate::providers::gitattributes::GitAttributesSource;
use crate::providers::RuleSource;

pub async fn execute(
    args: CheckArgs,
    config: &Config,
    working_dir: &Path,
) -> Result<i32, SieveError> {
    let source = GitAttributesSource::new(working_dir.to_path_buf());
    run(args, config, working_dir, &source).await
}

/// Run a check against any rule source.
pub async fn run(
    args: CheckArgs,
    config: &Config,
    working_dir: &Path,
    rules: &dyn RuleSource,
) -> Result<i32, SieveError> {
    let mode = args.summary_mode(config);
    let prefix = args.attr_prefix(config).to_string();
    let format = args.input_format.unwrap_or(config.compiler.format);

    let use_configured_compiler =
        args.input.is_none() && args.command.is_empty() && !config.compiler.command.is_empty();
    let input = if use_configured_compiler {
        DiagnosticInput::Command(config.compiler.command.clone())
    } else {
        DiagnosticInput::from_args(args.input.clone(), args.command.clone())
    };
    debug!(input = ?input, format = ?format, "Reading diagnostics");

    let diagnostics = input.read(format, working_dir).await?;
    let mut catalog = MessageCatalog::from_diagnostics(&diagnostics);
    if let Some(path) = args.messages(config) {
        catalog = catalog.with_table(load_table(&working_dir.join(path))?);
    }

    let mut known_files: BTreeSet<String> =
        diagnostics.iter().filter_map(|d| d.file.clone()).collect();
    if args.discover(config) {
        known_files.extend(discover_sources(working_dir, config).await);
    }

    let filters = rules.query(&known_files, &prefix).await?;
    info!(
        source = rules.name(),
        files = known_files.len(),
        with_rules = filters.len(),
        "Rules resolved"
    );

    let mut filterers = vec![Filterer::new(filters)];
    let kept = sieve(&mut filterers, diagnostics);
    let summary = filterers
        .pop()
        .map(Filterer::into_summary)
        .unwrap_or_default();

    let terminal = TerminalOutput::new(working_dir.to_path_buf()).with_catalog(catalog);

    if !kept.is_empty() {
        if args.diagnostic_logging(config) {
            print!("{}", terminal.format_diagnostics(&kept));
        } else {
            let notice = format!("Skipped logging {} diagnostics.", kept.len());
            if mode == SummaryMode::Json {
                eprintln!("{}", notice.red());
            } else {
                println!("{}", notice.red());
            }
        }
    }

    match mode {
        SummaryMode::None => {}
        SummaryMode::Terse => {
            println!("{}", terminal.terse().render_summary(&summary, &known_files)?)
        }
        SummaryMode::Detailed => {
            println!("{}", terminal.render_summary(&summary, &known_files)?)
        }
        SummaryMode::Json => {
            println!("{}", JsonOutput::new().render_summary(&summary, &known_files)?)
        }
    }

    if kept.is_empty() || args.exit_code_zero(config) {
        Ok(exit_codes::SUCCESS)
    } else {
        Ok(exit_codes::DIAGNOSTICS_RAISED)
    }
}

/// Project source files, or nothing when discovery fails.
async fn discover_sources(working_dir: &Path, config: &Config) -> BTreeSet<String> {
    let source = GitAttributesSource::new(working_dir.to_path_buf());
    match source.list_source_files(&config.sources.patterns).await {
        Ok(files) => files,
        Err(e) => {
            warn!(error = %e, "Source discovery failed, summarizing files with diagnostics only");
            BTreeSet::new()
        }
    }
}
