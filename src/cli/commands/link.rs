use crate::pages::Flow;
use clap::{builder::ValueParser, Arg, Command};

pub const CMD_LINK: &str = "link";
pub const ARG_HOST: &str = "host";
pub const ARG_FLOW: &str = "flow";
pub const ARG_STATUS: &str = "status";

#[must_use]
pub fn command() -> Command {
    Command::new(CMD_LINK)
        .about("Print the result page URL the identity service redirects to")
        .arg(
            Arg::new(ARG_HOST)
                .long("host")
                .help("Host the identity service was reached on, e.g. id.example.com")
                .required(true),
        )
        .arg(
            Arg::new(ARG_FLOW)
                .long("flow")
                .help("Result page: confirmation or password-reset")
                .required(true)
                .value_parser(ValueParser::new(|raw: &str| raw.parse::<Flow>())),
        )
        .arg(
            Arg::new(ARG_STATUS)
                .long("status")
                .help("Status code, e.g. success, already_confirmed, failure")
                .required(true),
        )
}
