use tracing_subscriber::Registry;

use tracing_subscriber::{
   EnvFilter, fmt, layer::SubscriberExt, prelude::*, util::SubscriberInitExt,
};

/// Console logging, filtered through RUST_LOG when set.
///
/// Safe to call more than once, later calls are no-ops.
pub fn setup_tracing() {
   let console_filter =
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kratos=info"));

   let console_layer = fmt::layer()
      .with_writer(std::io::stderr)
      .with_filter(console_filter);

   let _ = Registry::default().with(console_layer).try_init();
}
