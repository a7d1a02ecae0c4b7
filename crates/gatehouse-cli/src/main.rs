//! Binary entrypoint for the `gatehouse-cli` maintenance tool.

#[tokio::main]
async fn main() {
    let exit_code = gatehouse_cli::run().await;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}
