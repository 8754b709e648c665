use rfv_client::commands;
use rfv_client::{ClientResult, SuccessEnvelope};

use crate::cli::{Cli, Commands};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Segment {
            path,
            actions,
            output,
            ..
        } => commands::segment::run(path.as_deref(), actions.as_deref(), output.as_deref()),
        Commands::Quartiles { path, metric, .. } => {
            commands::quartiles::run(path.as_deref(), metric.as_deref())
        }
        Commands::Actions { actions, .. } => commands::actions::run(actions.as_deref()),
    }
}
