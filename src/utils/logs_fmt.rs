use once_cell::sync::Lazy;
use std::fmt;
use std::time::Instant;
use tracing::Level;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, FmtSubscriber, layer::SubscriberExt, util::SubscriberInitExt};

static START: Lazy<Instant> = Lazy::new(Instant::now);

pub struct UptimeSeconds;

impl FormatTime for UptimeSeconds {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let elapsed = START.elapsed();
        write!(w, "{:.3}s", elapsed.as_secs_f64())
    }
}

/// Compact console logging for the CLI.
pub fn init_cli_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_timer(UptimeSeconds)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// `RUST_LOG`-driven logging for the server; JSON for production.
pub fn init_server_logging(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "billdesk=info,billdesk_server=info,tower_http=warn".into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_level(true),
            )
            .init();
    }
}

/// Shorten long identifiers for table output.
pub fn abbrev(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() > 14 {
        let head: String = chars[..8].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        s.to_string()
    }
}
