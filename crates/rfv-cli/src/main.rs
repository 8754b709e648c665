mod cli;
mod dispatch;
mod output;
mod stdout_io;

use std::process::ExitCode;

use clap::{Parser, error::ErrorKind};
use rfv_client::ClientError;
use stdout_io::write_stdout_text;
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "RFV_LOG";

const ROOT_HELP: &str = "rfv - recency/frequency/value customer segmentation

Usage:
  rfv <command>

Start here:
  rfv segment <ledger.csv>
  rfv segment --help
  rfv actions
";

const TOP_LEVEL_HELP: &str = "rfv — recency/frequency/value customer segmentation

USAGE: rfv <command>

Segment a purchase ledger:
  rfv segment <path>                                      Score every customer and chart the scores
  rfv segment <path> --output segments.csv                Also write the classified table as CSV
  cat ledger.csv | rfv segment                            Read the ledger from stdin

Inspect the model:
  rfv quartiles <path>                                    Show 25/50/75% boundaries per metric
  rfv quartiles <path> --metric value                     Show boundaries for one metric
  rfv actions                                             Show the score -> marketing action table

Ledger columns (CSV header or JSON array keys):
  customer_id, purchase_date (YYYY-MM-DD), purchase_code, amount

Configuration:
  --actions <path> or RFV_ACTIONS=<path>                  JSON object of score -> action text
  RFV_LOG=debug                                           Diagnostic logging to stderr

Add --json to any command for machine-readable output.
";

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(code) => code,
        Err(code) => code,
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<ExitCode, ExitCode> {
    let raw_args = std::env::args().collect::<Vec<String>>();
    if raw_args.len() == 1 {
        if write_stdout_text(ROOT_HELP).is_err() {
            return Err(ExitCode::from(2));
        }
        return Ok(ExitCode::SUCCESS);
    }
    let parsed = cli::Cli::try_parse();
    let cli = match parsed {
        Ok(value) => value,
        Err(err) => return Err(handle_parse_error(&err, &raw_args)),
    };
    let mode = output::mode_for_command(&cli.command);
    tracing::debug!(command = cli.command.name(), "cli.dispatch");

    let dispatched = dispatch::dispatch(&cli);
    match dispatched {
        Ok(success) => {
            let rendered = output::print_success(&success, mode, &cli.command);
            if rendered.is_err() {
                return Err(ExitCode::from(2));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            tracing::debug!(code = %error.code, "cli.command_failed");
            if output::print_failure(&error, mode).is_err() {
                return Err(ExitCode::from(2));
            }
            Err(exit_code_for_error(&error))
        }
    }
}

/// Help and version requests succeed; everything else becomes an
/// `invalid_argument` failure rendered in the requested output mode.
fn handle_parse_error(err: &clap::Error, raw_args: &[String]) -> ExitCode {
    if matches!(
        err.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    ) {
        let text = if is_top_level_help_request(raw_args) {
            TOP_LEVEL_HELP.to_string()
        } else {
            err.to_string()
        };
        if write_stdout_text(&text).is_err() {
            return ExitCode::from(2);
        }
        return ExitCode::SUCCESS;
    }

    let command_hint = if matches!(
        err.kind(),
        ErrorKind::MissingRequiredArgument
            | ErrorKind::InvalidValue
            | ErrorKind::ValueValidation
            | ErrorKind::WrongNumberOfValues
            | ErrorKind::UnknownArgument
            | ErrorKind::InvalidSubcommand
    ) {
        command_from_args(raw_args)
    } else {
        None
    };
    let clean_message = strip_clap_boilerplate(&err.to_string());
    let parse_error = ClientError::invalid_argument_for_command(&clean_message, command_hint);
    let mode = infer_requested_output_mode(raw_args);
    if output::print_failure(&parse_error, mode).is_err() {
        return ExitCode::from(2);
    }
    ExitCode::from(1)
}

fn is_top_level_help_request(raw_args: &[String]) -> bool {
    raw_args.len() == 2 && matches!(raw_args[1].as_str(), "--help" | "-h")
}

/// Drops clap's trailing usage and "For more information" lines.
fn strip_clap_boilerplate(message: &str) -> String {
    let trimmed = if let Some(pos) = message.find("\n\nUsage:") {
        &message[..pos]
    } else if let Some(pos) = message.find("\nFor more information") {
        &message[..pos]
    } else {
        message
    };
    trimmed.trim_end().to_string()
}

fn command_from_args(raw_args: &[String]) -> Option<&'static str> {
    let first = raw_args
        .iter()
        .skip(1)
        .find(|value| !value.starts_with('-'))?;
    match first.as_str() {
        "segment" => Some("segment"),
        "quartiles" => Some("quartiles"),
        "actions" => Some("actions"),
        _ => None,
    }
}

fn exit_code_for_error(error: &ClientError) -> ExitCode {
    if error.code.starts_with("internal_") {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}

fn infer_requested_output_mode(raw_args: &[String]) -> output::OutputMode {
    if raw_args.iter().skip(1).any(|value| value == "--json") {
        return output::OutputMode::Json;
    }
    output::OutputMode::Text
}

#[cfg(test)]
mod tests {
    use super::{command_from_args, strip_clap_boilerplate};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn strips_usage_and_more_information_lines() {
        let message = "error: unexpected argument '--x' found\n\nUsage: rfv segment [PATH]\n\nFor more information, try '--help'.\n";
        assert_eq!(
            strip_clap_boilerplate(message),
            "error: unexpected argument '--x' found"
        );
    }

    #[test]
    fn command_hint_uses_the_first_positional_argument() {
        assert_eq!(
            command_from_args(&args(&["rfv", "--json", "quartiles", "x.csv"])),
            Some("quartiles")
        );
        assert_eq!(command_from_args(&args(&["rfv", "nope"])), None);
    }
}
