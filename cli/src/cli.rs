use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "shacl2datalog")]
/// Translates SHACL shapes graphs into Datalog programs
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Translate a shapes graph into a Datalog program
    ///
    /// Every shape of the graph is turned into facts and rules over the predicates
    /// of the Datalog SHACL library included at the top of the program.
    /// Nothing is written if the translation fails.
    Translate {
        /// File containing the shapes graph
        ///
        /// If no file is given, stdin is read.
        /// In this case, the content format must be specified using the --format option.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// The format of the shapes graph
        ///
        /// It can be an extension like "ttl" or a MIME type like "text/turtle".
        ///
        /// By default, the format is guessed from the input file extension.
        #[arg(long, required_unless_present = "file")]
        format: Option<String>,
        /// Base IRI of the shapes graph
        #[arg(long, value_hint = ValueHint::Url)]
        base: Option<String>,
        /// File to write the Datalog program to
        ///
        /// If no file is given, stdout is used.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
        /// Path of the Datalog SHACL library written in the `.include` directive
        ///
        /// By default `shacl.dl`.
        #[arg(long, value_hint = ValueHint::FilePath)]
        include: Option<String>,
        /// Skip the constraints that have no Datalog translation instead of failing
        ///
        /// This is the case of sh:closed, sh:hasValue and sh:in.
        /// Skipped constraints are logged as warnings.
        #[arg(long)]
        permissive: bool,
    },
}
