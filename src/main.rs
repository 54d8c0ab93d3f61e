// src/main.rs

use sasstpl::{cli, logging, run, RunOutcome};

#[tokio::main]
async fn main() {
    match run_main().await {
        Ok(RunOutcome::Completed) => {}
        Ok(RunOutcome::RenderFailures) => std::process::exit(1),
        Err(err) => {
            eprintln!("sasstpl error: {err:?}");
            std::process::exit(1);
        }
    }
}

async fn run_main() -> anyhow::Result<RunOutcome> {
    let args = cli::parse();
    logging::init_logging(args.log_level)?;
    Ok(run(args).await?)
}
