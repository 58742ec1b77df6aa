//! Info command - show version and effective configuration.

use gosnip_driver::{
    Mode, AUTO_PRINT, ENV_KEEP_FILES, ENV_SCRATCH_DIR, ENV_TIMEOUT_SECS, ENV_TOOLCHAIN,
    PROGRAM_BODY, TEMPLATE_VERSION, VERSION,
};

use crate::args::ConfigArgs;

pub(crate) fn run(args: &ConfigArgs) -> miette::Result<()> {
    let config = args.config();

    println!("gosnip - Go snippet evaluator");
    println!("=============================");
    println!();
    println!("Version: {}", VERSION);
    println!();

    println!("Configuration:");
    println!("  Toolchain:   {} run <file>", config.toolchain);
    println!("  Scratch dir: {}", config.scratch_dir().display());
    println!("  Keep files:  {}", config.retain_scratch_files);
    match config.timeout {
        Some(timeout) => println!("  Timeout:     {:?}", timeout),
        None => println!("  Timeout:     none"),
    }
    println!();

    println!("Modes:");
    for mode in Mode::ALL {
        println!("  {:<13} - {}", mode.name(), describe(mode));
    }
    println!();

    println!("Templates (version {}):", TEMPLATE_VERSION);
    for template in [AUTO_PRINT, PROGRAM_BODY] {
        println!("  {:<13} - {}", template.name, template.markers.join(" "));
    }
    println!();

    println!("Environment:");
    println!("  {:<20} - scratch folder location", ENV_SCRATCH_DIR);
    println!("  {:<20} - toolchain command", ENV_TOOLCHAIN);
    println!("  {:<20} - keep generated files (1/true)", ENV_KEEP_FILES);
    println!("  {:<20} - run deadline in seconds", ENV_TIMEOUT_SECS);

    Ok(())
}

fn describe(mode: Mode) -> &'static str {
    match mode {
        Mode::AutoPrint => "expression or statements, value printed (alias: simple)",
        Mode::ProgramBody => "functions including main (alias: normal)",
        Mode::Verbatim => "complete program, run unchanged (alias: raw)",
    }
}
