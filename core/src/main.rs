use oneshot_core::{log_to_console, InvokeError, InvokerConfig, RequestInvoker, UreqTransport};

#[tokio::main]
async fn main() -> Result<(), InvokeError> {
    let config = InvokerConfig::from_env();
    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .with_writer(std::io::stderr)
        .init();

    let descriptor = config.descriptor()?;
    tracing::info!(endpoint = %descriptor.endpoint(), "fetching");

    let invoker = RequestInvoker::new(UreqTransport::new());
    // No failure continuation: a transport error leaves main as an error exit.
    invoker.dispatch(descriptor, log_to_console).await
}
