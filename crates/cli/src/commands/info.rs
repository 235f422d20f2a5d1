use crate::args::InfoArgs;
use anyhow::Result;
use colored::Colorize;
use dacpack_core::SampleConverter;

pub fn run(args: &InfoArgs) -> Result<()> {
    let desc = SampleConverter::default().inspect(&args.input)?;

    println!("{}", "WAV Info:".bold());
    println!("  Channels: {}", desc.channels);
    println!("  Sample Width: {}", desc.bit_depth);
    println!("  Frame Rate (Sample Rate): {} Hz", desc.sample_rate);
    println!("  Number of Frames: {}", desc.frame_count);
    println!("  Duration: {:.3} s", desc.duration_secs());
    println!("  Table Size: {} bytes", desc.frame_count as usize * 2);
    Ok(())
}
