#![deny(clippy::all)]
#![deny(rustdoc::broken_intra_doc_links)]

use structopt::StructOpt;
use touchframe_cli::args::CliArgs;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::from_args();
    touchframe_cli::init_logging(args.log_level())?;
    if args.options.no_colour {
        colored::control::set_override(false);
    }

    let output = touchframe_cli::run(&args.input_file, &args.options)?;
    output.print();
    match output.error {
        // The rows before the mistake have been printed, but the run still failed
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
