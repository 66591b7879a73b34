//! Detect command implementation.

use crate::cli::DetectArgs;
use crate::config::Config;
use crate::error::Result;
use crate::input::category_filter;
use crate::output::Formatter;

/// Execute the detect command.
pub async fn execute_detect(args: DetectArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let extractor = super::extractor(config)?;
    let category = category_filter(args.category.as_deref())?;

    let detections = if args.all {
        extractor.candidates(&args.text, category)
    } else {
        extractor
            .detect_in(&args.text, category)
            .into_iter()
            .collect()
    };

    println!("{}", formatter.format_detections(&detections)?);

    Ok(())
}
