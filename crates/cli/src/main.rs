//! Tomasulo scheduler CLI.
//!
//! Loads an instruction file, runs the scheduler to completion against the
//! reference `Config`, and writes a per-cycle trace to an output file.

use std::fs::File;
use std::io::BufWriter;
use std::process;

use clap::Parser;

use tomasim_core::sim::loader;
use tomasim_core::{Config, Scheduler, SchedulerError};

#[derive(Parser, Debug)]
#[command(
    name = "tomasim",
    author,
    version,
    about = "Cycle-accurate Tomasulo instruction scheduler"
)]
struct Cli {
    /// Path to the instruction file (`op dest src1 src2` per line).
    instructions: String,

    /// Path to write the per-cycle trace to.
    trace: String,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("tomasim: {err}");
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), SchedulerError> {
    let config = Config::default();

    let source = File::open(&cli.instructions)?;
    let program = loader::load_program(source, config.arch_registers, config.register_init)?;

    let sink = File::create(&cli.trace)?;
    let mut writer = BufWriter::new(sink);

    let mut scheduler = Scheduler::new(program.instructions, program.registers, &config);
    let cycles = scheduler.run(&mut writer)?;

    println!("completed in {cycles} cycles");
    Ok(())
}
