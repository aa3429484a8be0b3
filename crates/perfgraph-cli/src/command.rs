//! Command line definition

use clap::{value_parser, Arg, ArgAction, Command};
use perfgraph_aggregate::{DEFAULT_MAX_MESSAGE_LEN, DEFAULT_VALUE_FIELD};
use std::path::PathBuf;

/// Build the `perfgraph` command
#[must_use]
pub fn cli() -> Command {
    Command::new("perfgraph")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Aggregate benchmark results into figure descriptors")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .long("input")
                .short('i')
                .required(true)
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("Benchmark result JSON file, repeat for several"),
        )
        .arg(
            Arg::new("settings")
                .long("settings")
                .short('s')
                .value_parser(value_parser!(PathBuf))
                .help("Per-model settings JSON file"),
        )
        .arg(
            Arg::new("value-field")
                .long("value-field")
                .default_value(DEFAULT_VALUE_FIELD)
                .help("Row field holding the throughput value"),
        )
        .arg(
            Arg::new("merge-inputs")
                .long("merge-inputs")
                .action(ArgAction::SetTrue)
                .help("Average repeated executions across all input files"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("Raise log level (-v debug, -vv trace)"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .action(ArgAction::SetTrue)
                .help("Write logs as JSON lines"),
        )
        .subcommand(
            Command::new("figures")
                .about("Emit figure descriptors as JSON")
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_parser(value_parser!(PathBuf))
                        .help("Write to a file instead of stdout"),
                )
                .arg(
                    Arg::new("file-prefix")
                        .long("file-prefix")
                        .default_value("")
                        .help("Prefix of suggested image file names"),
                )
                .arg(
                    Arg::new("file-suffix")
                        .long("file-suffix")
                        .default_value("")
                        .help("Suffix of suggested image file names"),
                ),
        )
        .subcommand(
            Command::new("counts")
                .about("Report aggregation tree counts and rejected rows")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("summary")
                .about("Print a code-fenced text summary split into chat-sized messages")
                .arg(
                    Arg::new("header")
                        .long("header")
                        .help("Text placed before the first message"),
                )
                .arg(
                    Arg::new("max-message-len")
                        .long("max-message-len")
                        .value_parser(value_parser!(usize))
                        .help(format!(
                            "Maximum length of one message [default: {DEFAULT_MAX_MESSAGE_LEN}]"
                        )),
                ),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_is_consistent() {
        cli().debug_assert();
    }

    #[test]
    fn inputs_accumulate() {
        let matches = cli()
            .try_get_matches_from([
                "perfgraph", "-i", "a.json", "-i", "b.json", "--input", "c.json", "counts",
            ])
            .unwrap();
        let inputs: Vec<&PathBuf> = matches.get_many::<PathBuf>("input").unwrap().collect();
        assert_eq!(inputs.len(), 3);
        assert_eq!(
            matches.get_one::<String>("value-field").map(String::as_str),
            Some(DEFAULT_VALUE_FIELD)
        );
    }

    #[test]
    fn input_is_required() {
        assert!(cli().try_get_matches_from(["perfgraph", "counts"]).is_err());
    }

    #[test]
    fn subcommand_is_required() {
        assert!(cli().try_get_matches_from(["perfgraph", "-i", "a.json"]).is_err());
    }
}
