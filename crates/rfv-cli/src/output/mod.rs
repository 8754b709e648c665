mod error_text;
mod format;
mod json;
mod mode;
mod model_text;
mod segment_text;

use std::io;

use rfv_client::{ClientError, SuccessEnvelope};

use crate::cli::Commands;
use crate::stdout_io::write_stdout_line;

pub use mode::{OutputMode, mode_for_command};

pub fn print_success(
    success: &SuccessEnvelope,
    mode: OutputMode,
    command: &Commands,
) -> io::Result<()> {
    let body = match mode {
        OutputMode::Text => render_text_success(success, command)?,
        OutputMode::Json => json::render_success_json(success)?,
    };
    write_stdout_line(&body)
}

pub fn print_failure(error: &ClientError, mode: OutputMode) -> io::Result<()> {
    let body = match mode {
        OutputMode::Json => json::render_error_json(error)?,
        OutputMode::Text => error_text::render_error(error),
    };
    write_stdout_line(&body)
}

fn render_text_success(success: &SuccessEnvelope, command: &Commands) -> io::Result<String> {
    match command {
        Commands::Segment { limit, .. } => segment_text::render_segment(&success.data, *limit),
        Commands::Quartiles { .. } => model_text::render_quartiles(&success.data),
        Commands::Actions { .. } => model_text::render_actions(&success.data),
    }
}
