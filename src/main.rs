use color_eyre::Result;

use therapy_chat::adapters::StdConsole;
use therapy_chat::cli::{parse_args, print_api_error, run_local_command, run_remote_command, CliContext};
use therapy_chat::config::ClientConfig;
use therapy_chat::error::ApiError;
use therapy_chat::logging::init_tracing;

fn main() -> Result<()> {
    color_eyre::install()?;

    let config = ClientConfig::from_env();
    init_tracing(&config.log_filter);

    let command = parse_args(std::env::args());
    if let Some(result) = run_local_command(&command) {
        return result;
    }

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(async {
        let ctx = CliContext::connect(&config).await?;
        run_remote_command(command, &ctx, &mut StdConsole::new()).await
    });

    if let Err(report) = &result {
        if let Some(api_error) = report.downcast_ref::<ApiError>() {
            print_api_error(api_error);
            std::process::exit(1);
        }
    }
    result
}
