//! Crate for loading and running touchframe's input files.  The CLI itself is a very thin wrapper
//! around this, parsing CLI args and immediately calling into [`run`].

pub mod args;
mod print;
pub mod toml_file;
pub mod utils;

use std::{
    path::Path,
    time::{Duration, Instant},
};

use log::LevelFilter;
use simple_logger::SimpleLogger;
use touchframe::Block;

use crate::{args::Options, toml_file::TomlFile};

pub fn init_logging(level: LevelFilter) -> anyhow::Result<()> {
    SimpleLogger::new()
        .without_timestamps()
        .with_colors(true)
        .with_level(level)
        .init()?;
    Ok(())
}

/// Load the input file, then ring whatever it describes.  Errors while ringing don't cause this
/// to fail, since the rows rung before the error are still worth printing.  Instead, they're
/// returned in [`Output::error`].
pub fn run(input_file: &Path, options: &Options) -> anyhow::Result<Output> {
    let start_time = Instant::now();

    let toml_file = TomlFile::from_file(input_file)?;
    log::debug!("Loaded {:?}", input_file);
    let job = toml_file.lower(options)?;
    log::debug!("Ringing {:?}", job.ringing);

    let (block, error) = job.run();
    let duration = start_time.elapsed();
    log::info!("Rang {} rows in {:.2?}", block.rows_rung(), duration);

    Ok(Output {
        title: job.method.title(),
        block,
        error,
        duration,
    })
}

/// The result of a successful [`run`]
#[derive(Debug, Clone)]
pub struct Output {
    pub title: String,
    pub block: Block,
    /// The error which stopped the ringing early, if any
    pub error: Option<touchframe::Error>,
    pub duration: Duration,
}

impl Output {
    /// Print the rows that were rung.  Any [`error`](Self::error) is left for the caller to
    /// report.
    pub fn print(&self) {
        println!("{}", self.output_string(true));
    }

    fn output_string(&self, colour: bool) -> String {
        format!("{}\n{}", self.title, print::block_string(&self.block, colour))
    }
}

#[cfg(test)]
mod tests {
    use touchframe::{Method, Stage, TouchError};

    use super::*;

    #[test]
    fn output_leaves_errors_to_caller() {
        let method = Method::new("Plain Bob", Stage::DOUBLES, "&5.1.5.1.5,125")
            .unwrap()
            .with_calls(0, "145", "123")
            .unwrap();
        let mut block = Block::new(Stage::DOUBLES);
        let error = method.ring_touch(&mut block, "PB?").unwrap_err();
        assert_eq!(
            error,
            touchframe::Error::Touch(TouchError::InvalidCallChar { index: 2, c: '?' })
        );

        let output = Output {
            title: method.title(),
            block,
            error: Some(error.clone()),
            duration: Duration::ZERO,
        };
        let s = output.output_string(false);
        assert!(s.starts_with("Plain Bob Doubles\n"));
        assert!(s.ends_with("20 rows (1 call), ended on 13542"));
        assert!(!s.contains(&error.to_string()));
    }
}
