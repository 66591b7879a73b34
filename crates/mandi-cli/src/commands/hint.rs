//! Hint command implementation.

use crate::cli::HintArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the hint command.
pub async fn execute_hint(args: HintArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let extractor = super::extractor(config)?;
    let hint = extractor.extract_supplier_name(&args.text);

    println!("{}", formatter.format_hint(&hint)?);

    Ok(())
}
