use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "constgov",
    version,
    about = "Constant governance checks for Go source trees"
)]
pub struct Cli {
    #[arg(short, long, default_value = ".", help = "Root directory to scan")]
    pub root: PathBuf,
    #[arg(short, long, help = "Write the full report to this file")]
    pub output: Option<PathBuf>,
    #[arg(
        short,
        long,
        help = "Validate a single file (magic numbers and naming only)"
    )]
    pub file: Option<PathBuf>,
    #[arg(short, long, help = "Print the itemized report and debug logs")]
    pub verbose: bool,
    #[arg(long, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(long, help = "Config file (default: constgov.toml in the root)")]
    pub config: Option<PathBuf>,
}

/// Long flags that Go tooling spells with a single dash.
const SINGLE_DASH_LONG_FLAGS: [&str; 4] = ["root", "output", "file", "verbose"];

/// Rewrite `-root dir` and `-root=dir` style arguments to `--root`, leaving
/// everything else untouched.
pub fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(rest) = arg.to_str().and_then(|a| a.strip_prefix('-')) else {
                return arg;
            };
            let name = rest.split_once('=').map_or(rest, |(name, _)| name);
            if SINGLE_DASH_LONG_FLAGS.contains(&name) {
                OsString::from(format!("--{rest}"))
            } else {
                arg
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(normalize_args(args.iter().map(OsString::from))).unwrap()
    }

    #[test]
    fn single_dash_long_flags_are_accepted() {
        let cli = parse(&["constgov", "-root", "src", "-output=out.txt", "-file", "a.go", "-verbose"]);
        assert_eq!(cli.root, PathBuf::from("src"));
        assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
        assert_eq!(cli.file, Some(PathBuf::from("a.go")));
        assert!(cli.verbose);
    }

    #[test]
    fn short_and_double_dash_flags_are_unchanged() {
        let args: Vec<OsString> = ["constgov", "-r", "src", "--verbose", "-v", "--json"]
            .iter()
            .map(OsString::from)
            .collect();
        assert_eq!(normalize_args(args.clone()), args);
    }
}
