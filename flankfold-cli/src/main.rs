mod fold;
mod output;
mod trinuc;

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "flankfold";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Test whether mutations are enriched in genomic features relative to their flanks, against a trinucleotide-context null model.")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log debug messages (RUST_LOG takes precedence)"),
        )
        .subcommand(fold::cli::create_fold_cli())
        .subcommand(trinuc::cli::create_trinuc_cli())
}

fn init_logging(matches: &ArgMatches) {
    let default_level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();
    init_logging(&matches);

    match matches.subcommand() {
        //
        // FOLD CHANGE TEST
        //
        Some((fold::cli::FOLD_CMD, matches)) => {
            fold::handlers::run_fold(matches)?;
        }

        //
        // TRINUCLEOTIDE PROPENSITIES
        //
        Some((trinuc::cli::TRINUC_CMD, matches)) => {
            trinuc::handlers::run_trinuc(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_is_well_formed() {
        build_parser().debug_assert();
    }

    #[test]
    fn test_fold_requires_inputs() {
        let result = build_parser().try_get_matches_from(["flankfold", "fold", "--hits", "h.tsv"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let matches = build_parser()
            .try_get_matches_from([
                "flankfold",
                "trinuc",
                "--signatures",
                "sbs96.tsv",
                "--signature",
                "SBS1",
                "--verbose",
            ])
            .unwrap();
        assert!(matches.get_flag("verbose"));
    }
}
