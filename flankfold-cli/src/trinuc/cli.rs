use clap::{Command, arg};

pub const TRINUC_CMD: &str = "trinuc";

pub fn create_trinuc_cli() -> Command {
    Command::new(TRINUC_CMD)
        .about("Export the per-trinucleotide mutation propensities of one signature as JSON.")
        .arg(
            arg!(--signatures <SIGNATURES>)
                .required(true)
                .help("SBS96 signature table (Type column plus one column per signature)"),
        )
        .arg(
            arg!(--signature <SIGNATURE>)
                .required(true)
                .help("Signature to export"),
        )
        .arg(
            arg!(--output <OUTPUT>)
                .required(false)
                .help("Output JSON path (default: stdout)"),
        )
}
