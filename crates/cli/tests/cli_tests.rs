use assert_cmd::Command;
use predicates::prelude::*;
use std::path::{Path, PathBuf};

fn dacpack() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_dacpack"));
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

fn write_wav(dir: &Path, name: &str, channels: u16, bits: u16, samples: &[i32]) -> PathBuf {
    let path = dir.join(name);
    let spec = hound::WavSpec {
        channels,
        sample_rate: 48000,
        bits_per_sample: bits,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    for &sample in samples {
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();
    path
}

#[test]
fn help_lists_subcommands() {
    dacpack()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("info"));
}

#[test]
fn convert_writes_header_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_wav(dir.path(), "tone.wav", 2, 16, &[0, -2, 32767, 32767]);
    let output = dir.path().join("audio_data.h");

    dacpack()
        .arg("convert")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Total Samples in C array: 2"))
        .stdout(predicate::str::contains("Original Sample Rate: 48000 Hz"));

    let header = std::fs::read_to_string(&output).unwrap();
    assert!(header.contains("// Generated from tone.wav"));
    assert!(header.contains("    0x37FF, 0x3FFF\n};"));
}

#[test]
fn convert_honours_name_and_channel_flags() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_wav(dir.path(), "b.wav", 1, 8, &[127]);
    let output = dir.path().join("b.h");

    dacpack()
        .args(["convert", "--variable-name", "chan_b", "--channel", "b"])
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let header = std::fs::read_to_string(&output).unwrap();
    assert!(header.contains("const uint16_t chan_b[NUM_AUDIO_SAMPLES] = {\n    0xBFFF\n};"));
}

#[test]
fn convert_reads_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_wav(dir.path(), "c.wav", 1, 8, &[-128]);
    let output = dir.path().join("c.h");
    let config = dir.path().join("dacpack.toml");
    std::fs::write(&config, "variable_name = \"from_config\"\ncontrol_mask = 0xB000\n").unwrap();

    dacpack()
        .arg("--config")
        .arg(&config)
        .arg("convert")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .args(["--control-mask", "0x7000"])
        .assert()
        .success();

    let header = std::fs::read_to_string(&output).unwrap();
    assert!(header.contains("from_config[NUM_AUDIO_SAMPLES]"));
    assert!(header.contains("0x7000"));
}

#[test]
fn missing_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.h");

    dacpack()
        .arg("convert")
        .arg(dir.path().join("missing.wav"))
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not found"));

    assert!(!output.exists());
}

#[test]
fn unsupported_width_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_wav(dir.path(), "wide.wav", 1, 24, &[0]);
    let output = dir.path().join("out.h");

    dacpack()
        .arg("convert")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Only 8-bit or 16-bit"));

    assert!(!output.exists());
}

#[test]
fn bad_mask_is_a_usage_error() {
    dacpack()
        .args(["convert", "in.wav", "--control-mask", "0x3001"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn info_prints_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_wav(dir.path(), "i.wav", 2, 8, &[0; 96]);

    dacpack()
        .arg("info")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Channels: 2"))
        .stdout(predicate::str::contains("Sample Width: 8-bit"))
        .stdout(predicate::str::contains("Number of Frames: 48"))
        .stdout(predicate::str::contains("Duration: 0.001 s"));
}
