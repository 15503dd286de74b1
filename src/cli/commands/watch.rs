//! Live watch command implementation.

use anyhow::{bail, Result};
use metrics_config::{validate, AppConfig};
use metrics_core::types::DisplayState;
use metrics_monitor::{print_plain, render, Dashboard};
use metrics_poller::LiveDisplay;
use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

use super::http_source;
use crate::cli::WatchArgs;

pub async fn run(args: WatchArgs, config: &AppConfig) -> Result<()> {
    validate(config)?;

    let cadence = match args.interval {
        Some(0) => bail!("--interval must be greater than zero"),
        Some(secs) => Duration::from_secs(secs),
        None => config.display.cadence(),
    };

    let source = http_source(args.url.as_deref(), config)?;
    let endpoint = source.url().to_string();
    info!("Watching {} every {}s", endpoint, cadence.as_secs());

    let mut display = LiveDisplay::new(Arc::new(source)).with_cadence(cadence);

    if args.plain {
        let interrupted = async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Interrupted");
        };
        watch_plain(&mut display, &mut io::stdout(), interrupted).await
    } else {
        let rx = display.activate();
        let res = run_dashboard(rx, config, endpoint).await;
        display.deactivate();
        res
    }
}

/// Activate `display` and print every new view to `out` until `shutdown`
/// resolves or the state channel closes. The display is deactivated on
/// every exit, including write errors.
async fn watch_plain<W, S>(display: &mut LiveDisplay, out: &mut W, shutdown: S) -> Result<()>
where
    W: Write,
    S: Future<Output = ()>,
{
    let rx = display.activate();
    let res = print_updates(rx, out, shutdown).await;
    display.deactivate();
    res
}

async fn print_updates<W, S>(
    mut rx: watch::Receiver<DisplayState>,
    out: &mut W,
    shutdown: S,
) -> Result<()>
where
    W: Write,
    S: Future<Output = ()>,
{
    tokio::pin!(shutdown);

    let view = render(&rx.borrow_and_update());
    print_plain(out, &view)?;

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = render(&rx.borrow_and_update());
                print_plain(out, &view)?;
            }
            _ = &mut shutdown => break,
        }
    }

    Ok(())
}

/// Draw the terminal dashboard on a blocking thread until the user quits.
async fn run_dashboard(
    mut rx: watch::Receiver<DisplayState>,
    config: &AppConfig,
    endpoint: String,
) -> Result<()> {
    let dashboard =
        Dashboard::new(config.display.title.clone(), config.display.tick_ms).with_source(endpoint);

    tokio::task::spawn_blocking(move || {
        dashboard.run(move || match rx.has_changed() {
            Ok(true) => Some(render(&rx.borrow_and_update())),
            _ => None,
        })
    })
    .await??;

    Ok(())
}
