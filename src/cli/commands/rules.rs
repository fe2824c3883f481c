//! Rules command - Show the rules that apply to files

use std::collections::BTreeSet;
use std::path::Path;

use super::{RulesArgs, RulesFormat};
use crate::cli::exit_codes;
use crate::cli::output::{JsonOutput, RulesRenderer, TerminalOutput};
use crate::config::Config;
use crate::error::SieveError;
use crate::providers::gitattributes::GitAttributesSource;
use crate::providers::RuleSource;
use crate::utils::paths::resolve;

pub async fn execute(
    args: RulesArgs,
    config: &Config,
    working_dir: &Path,
) -> Result<i32, SieveError> {
    let prefix = args.attr_prefix.as_deref().unwrap_or(&config.attr_prefix);
    let files: BTreeSet<String> = args
        .files
        .iter()
        .map(|file| resolve(working_dir, file))
        .collect();

    let source = GitAttributesSource::new(working_dir.to_path_buf());
    let filters = source.query(&files, prefix).await?;

    let rendered = match args.format {
        RulesFormat::Terminal => {
            TerminalOutput::new(working_dir.to_path_buf()).render_rules(&filters, &files)?
        }
        RulesFormat::Json => JsonOutput::new().render_rules(&filters, &files)?,
    };
    print!("{}", rendered);
    if matches!(args.format, RulesFormat::Json) {
        println!();
    }

    Ok(exit_codes::SUCCESS)
}
