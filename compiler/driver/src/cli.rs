use clap::{builder::ValueParser, Arg, Command};
use std::path::PathBuf;

pub(crate) struct Arguments {
    pub(crate) input: PathBuf,
    /// Reserved for the object-code backend; the front-end never writes it.
    pub(crate) output: PathBuf,
}

pub(crate) fn arguments() -> Arguments {
    let matches = Command::new("opal")
        .about("The opal compiler front-end")
        .arg(
            Arg::new(argument::INPUT)
                .short('i')
                .value_name("FILE")
                .value_parser(ValueParser::path_buf())
                .required(true)
                .help("The source file to compile"),
        )
        .arg(
            Arg::new(argument::OUTPUT)
                .short('o')
                .value_name("FILE")
                .value_parser(ValueParser::path_buf())
                .default_value("output.o")
                .help("Where to place the output"),
        )
        .get_matches();

    Arguments {
        input: matches
            .get_one::<PathBuf>(argument::INPUT)
            .expect("the input argument is required")
            .clone(),
        output: matches
            .get_one::<PathBuf>(argument::OUTPUT)
            .expect("the output argument has a default")
            .clone(),
    }
}

mod argument {
    pub(super) const INPUT: &str = "input";
    pub(super) const OUTPUT: &str = "output";
}
