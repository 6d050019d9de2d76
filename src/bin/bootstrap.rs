// AWS Lambda binary entry point.
//
// Build with: cargo build --release --features lambda --bin bootstrap
//
// The lambda_runtime crate provides the tokio runtime.

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    kiln::lambda::run().await
}
