#[tokio::main]
async fn main() {
    if let Err(e) = auth_gateway::run_with_config().await {
        tracing::error!(error = %e, "auth gateway stopped");
        std::process::exit(1);
    }
}
