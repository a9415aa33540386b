use std::path::PathBuf;

use log::LevelFilter;
use structopt::StructOpt;

/// A struct storing the CLI args taken by touchframe.  `StructOpt` will generate the argument
/// parsing/help code for us.
#[derive(Debug, Clone, StructOpt)]
#[structopt(
    name = "touchframe",
    about = "Ring plain courses and touches of change ringing methods"
)]
pub struct CliArgs {
    /// The file describing the method and what to ring (`*.toml`)
    #[structopt(parse(from_os_str))]
    pub input_file: PathBuf,

    #[structopt(flatten)]
    pub options: Options,

    /// Makes touchframe print more output (`-vv` will produce all output).
    #[structopt(short, long = "verbose", parse(from_occurrences))]
    pub verbosity: usize,
    /// Makes touchframe print less output (`-qq` will only produce errors).
    #[structopt(short, long = "quiet", parse(from_occurrences))]
    pub quietness: usize,
}

// Options passed directly into `touchframe_cli::run`, which override the `[config]` section of the
// input file.  This isn't a doc-comment because doc comments override
// `#[structopt(about = "...")]`.
#[derive(Default, Debug, Clone, StructOpt)]
pub struct Options {
    /// The most rows that a plain course can take before it's declared to never come round.
    /// Defaults to 1 million.
    #[structopt(long)]
    pub max_rows: Option<usize>,
    /// If set, the output won't be coloured.
    #[structopt(long = "no-colour")]
    pub no_colour: bool,
}

impl CliArgs {
    /// Parse the `-q`/`-v` args into the [`LevelFilter`] to give to the `log` library
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity as isize - self.quietness as isize {
            x if x < -2 => LevelFilter::Off, // -qqq (or more `q`s)
            -2 => LevelFilter::Error,        // -qq
            -1 => LevelFilter::Warn,         // -q
            0 => LevelFilter::Info,          // <none of -q or -v>
            1 => LevelFilter::Debug,         // -v
            _ => LevelFilter::Trace,         // -vv (or more `v`s)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::from_iter(std::iter::once("touchframe").chain(args.iter().copied()))
    }

    #[test]
    fn log_levels() {
        #[track_caller]
        fn check(args: &[&str], exp_level: LevelFilter) {
            assert_eq!(parse(args).log_level(), exp_level);
        }

        check(&["pb.toml"], LevelFilter::Info);
        check(&["pb.toml", "-v"], LevelFilter::Debug);
        check(&["pb.toml", "-vv"], LevelFilter::Trace);
        check(&["pb.toml", "-vvvv"], LevelFilter::Trace);
        check(&["pb.toml", "-q"], LevelFilter::Warn);
        check(&["pb.toml", "-qq"], LevelFilter::Error);
        check(&["pb.toml", "-qqq"], LevelFilter::Off);
        check(&["pb.toml", "-vq"], LevelFilter::Info);
    }

    #[test]
    fn options() {
        let args = parse(&["pb.toml", "--max-rows", "500", "--no-colour"]);
        assert_eq!(args.input_file, PathBuf::from("pb.toml"));
        assert_eq!(args.options.max_rows, Some(500));
        assert!(args.options.no_colour);

        let args = parse(&["pb.toml"]);
        assert_eq!(args.options.max_rows, None);
        assert!(!args.options.no_colour);
    }
}
