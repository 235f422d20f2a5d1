use crate::args::ConvertArgs;
use crate::settings::{apply_overrides, load_base_config};
use anyhow::Result;
use colored::Colorize;
use dacpack_core::SampleConverter;
use std::path::Path;

pub fn run(args: &ConvertArgs, config_path: Option<&Path>) -> Result<()> {
    let config = apply_overrides(load_base_config(config_path)?, args)?;
    let converter = SampleConverter::new(config)?;

    let report = converter.convert_file(&args.input, &args.output)?;

    println!(
        "{} {}",
        "Successfully converted and pre-formatted to".green(),
        report.output_path.display()
    );
    println!("  Output C array type: const uint16_t");
    println!("  Array name: {}", converter.config().variable_name);
    println!("  Control mask: {}", converter.config().control_mask);
    println!("  Total Samples in C array: {}", report.sample_count);
    println!("  Original Sample Rate: {} Hz", report.descriptor.sample_rate);
    if report.clamped_samples > 0 {
        println!(
            "  {} {} samples clamped to the 12-bit range",
            "Warning:".yellow(),
            report.clamped_samples
        );
    }
    Ok(())
}
