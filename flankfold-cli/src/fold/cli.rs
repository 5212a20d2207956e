use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const FOLD_CMD: &str = "fold";

pub fn create_fold_cli() -> Command {
    Command::new(FOLD_CMD)
        .about("Compare the mutation density of features with their flanks and compute a Monte Carlo p-value.")
        .arg(
            arg!(--hits <HITS>)
                .required(true)
                .help("TSV of mutations intersected with feature windows (ID, POS_REL_START, [POS], [SIGNATURE])"),
        )
        .arg(
            arg!(--signatures <SIGNATURES>)
                .required(true)
                .help("SBS96 signature table (Type column plus one column per signature)"),
        )
        .arg(
            arg!(--sequences <SEQUENCES>)
                .required(true)
                .help("FASTA of window sequences (window + 1 base each side), one record per feature ID"),
        )
        .arg(
            arg!(--signature <SIGNATURE>)
                .required(false)
                .help("Signature to test; hits are restricted to it (overrides the config file)"),
        )
        .arg(
            Arg::new("feature-size")
                .long("feature-size")
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Positions covered by the feature, e.g. 19 for a CTCF motif"),
        )
        .arg(
            Arg::new("window-size")
                .long("window-size")
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Feature plus both flanks [default: 2000]"),
        )
        .arg(
            arg!(--nsim <NSIM>)
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Number of simulations [default: 1000]"),
        )
        .arg(
            arg!(--seed <SEED>)
                .required(false)
                .value_parser(value_parser!(u64))
                .help("Seed for reproducible simulations"),
        )
        .arg(
            arg!(--threads <THREADS>)
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Number of worker threads"),
        )
        .arg(
            Arg::new("cv-folds")
                .long("cv-folds")
                .required(false)
                .value_parser(value_parser!(usize))
                .help("Folds used to score bandwidth candidates [default: 5]"),
        )
        .arg(
            arg!(--config <CONFIG>)
                .required(false)
                .help("TOML file with analysis parameters; flags override its values"),
        )
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .help("Output JSON path (default: stdout)"),
        )
        .arg(
            Arg::new("progress")
                .long("progress")
                .action(ArgAction::SetTrue)
                .help("Show a progress bar while simulating"),
        )
}
