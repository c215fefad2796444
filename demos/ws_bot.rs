//! Minimal bot over a WebSocket-to-IRC bridge
//!
//! Registers, joins a channel, greets it, and answers every message.
//!
//! ```text
//! cargo run --example ws_bot -- bridge.example.net 7667 testman '#room'
//! ```

use slirc_client::{ClientConfig, CommandExt, Session};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let mut args = std::env::args().skip(1);
    let server = args.next().unwrap_or_default();
    let port = args.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let nick = args.next();
    let channel = args.next().unwrap_or_else(|| "#room".to_string());

    let config = ClientConfig {
        nick,
        secure: std::env::var("BRIDGE_TLS").is_ok_and(|v| v == "true"),
        ..ClientConfig::new(server, port)
    };

    let mut session = Session::new(config)?;

    let mut sink = session.sink();
    let chan = channel.clone();
    session.handlers_mut().on_connect(move || {
        info!(channel = %chan, "registered, joining");
        if let Err(e) = sink.join(&chan) {
            tracing::warn!(error = %e, "join failed");
        }
    });

    let mut sink = session.sink();
    session.handlers_mut().on_join(move |channel, _nick| {
        let _ = sink.send_message(channel, "Hello!");
    });

    let mut sink = session.sink();
    session.handlers_mut().on_message(move |from, text| {
        info!("{}> {}", from, text);
        let _ = sink.send_message(
            &channel,
            "Turns out I am an irc bot running over a websocket!",
        );
    });

    session
        .handlers_mut()
        .on_names(|channel, names| info!(%channel, count = names.len(), "names"))
        .on_nick_in_use(|| tracing::warn!("nickname change rejected"))
        .on_close(|reason| info!(reason = reason.unwrap_or(""), "bridge closed"));

    session.run().await?;
    Ok(())
}
