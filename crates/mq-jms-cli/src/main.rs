use mq_jms_cli::run_cli;
use tracing::error;

#[tokio::main]
async fn main() {
    if let Err(e) = run_cli().await {
        error!("CLI error: {}", e);

        // Configuration 1, send 2, invalid argument 3, io 4, other 5
        std::process::exit(e.exit_code());
    }
}
