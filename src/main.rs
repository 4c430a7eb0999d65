use clap::Parser;
use print3d_pricing::cli::{Cli, run};

fn main() -> std::process::ExitCode {
    print3d_pricing::init_tracing();
    run(Cli::parse())
}
