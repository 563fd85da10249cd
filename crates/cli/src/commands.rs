//! Clap command definition.

use clap::{value_parser, Arg, ArgAction, Command};

/// Default number of hits printed per query.
pub const DEFAULT_TOP: usize = 10;

/// Build the `quarry` command.
pub fn build_cli() -> Command {
    Command::new("quarry")
        .about("Rank a directory of text files against free-text queries with BM25")
        .arg(
            Arg::new("corpus")
                .long("corpus")
                .short('c')
                .help("Directory of .txt/.md files to index")
                .required(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Engine config file (default: built-in BM25 constants)"),
        )
        .arg(
            Arg::new("top")
                .long("top")
                .short('n')
                .help("Hits to print per query")
                .value_parser(value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("query")
                .help("One or more queries, each ranked separately")
                .required(true)
                .num_args(1..),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_parse_full() {
        let matches = build_cli()
            .try_get_matches_from([
                "quarry", "--corpus", "docs", "--top", "3", "--json", "air pollution", "stove",
            ])
            .unwrap();

        assert_eq!(matches.get_one::<String>("corpus").unwrap(), "docs");
        assert_eq!(*matches.get_one::<usize>("top").unwrap(), 3);
        assert!(matches.get_flag("json"));
        let queries: Vec<_> = matches.get_many::<String>("query").unwrap().collect();
        assert_eq!(queries, ["air pollution", "stove"]);
    }

    #[test]
    fn test_top_default() {
        let matches = build_cli()
            .try_get_matches_from(["quarry", "--corpus", "docs", "q"])
            .unwrap();
        assert_eq!(*matches.get_one::<usize>("top").unwrap(), DEFAULT_TOP);
        assert!(!matches.get_flag("json"));
        assert!(matches.get_one::<String>("config").is_none());
    }

    #[test]
    fn test_missing_arguments_rejected() {
        assert!(build_cli().try_get_matches_from(["quarry", "q"]).is_err());
        assert!(build_cli()
            .try_get_matches_from(["quarry", "--corpus", "docs"])
            .is_err());
        assert!(build_cli()
            .try_get_matches_from(["quarry", "--corpus", "d", "--top", "x", "q"])
            .is_err());
    }
}
