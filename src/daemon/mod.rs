//! The drive loop.
//!
//! Multiplexes the grabbed mouse, the smoother's tick deadline, and the
//! shutdown signal on a single task. All smoother work happens inline;
//! the only suspension points are the waits themselves.

mod router;

pub use router::EventRouter;

use std::future;

use anyhow::{Context, Result};
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::Config;
use crate::device;
use crate::smoother::{EventTime, WheelSmoother};

/// Run the daemon until shutdown.
///
/// Opens (or detects) the source mouse, creates the virtual sink, grabs
/// the source exclusively, and then pumps events through the
/// [`EventRouter`] until Ctrl-C.
pub async fn run(config: Config) -> Result<()> {
    let (path, mut source) = match &config.device.path {
        Some(path) => (path.clone(), device::open_source(path)?),
        None => device::find_scroll_mouse()?,
    };
    device::describe(&source);

    let mut sink = device::create_virtual_mouse(&source)?;
    device::grab(&mut source, &path)?;
    info!("Grabbed {}", path.display());

    let mut router = EventRouter::new(
        WheelSmoother::new(config.smoother.clone()),
        config.device.free_spin_button,
    );

    let mut stream = source
        .into_event_stream()
        .context("failed to create event stream")?;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    info!("Smooth scrolling active");
    loop {
        let deadline = router.timeout(EventTime::now());
        let tick_due = async {
            match deadline {
                Some(delay) => sleep(delay).await,
                None => future::pending().await,
            }
        };

        tokio::select! {
            _ = &mut shutdown => {
                info!("Received shutdown signal");
                break;
            }

            result = stream.next_event() => {
                let event = result.context("failed to read input event")?;
                let timestamp = EventTime::from(event.timestamp());

                if let Some(batch) = router.route(event) {
                    if !batch.is_empty() {
                        sink.emit(&batch).context("failed to write output events")?;
                    }

                    // The report may already be past the tick deadline;
                    // catch up before going back to sleep.
                    if let Some(next) = router.next_tick_time() {
                        if timestamp > next {
                            if let Some(tick) = router.tick() {
                                sink.emit(&[tick]).context("failed to write output events")?;
                            }
                        }
                    }
                }
            }

            _ = tick_due => {
                if let Some(tick) = router.tick() {
                    sink.emit(&[tick]).context("failed to write output events")?;
                }
            }
        }
    }

    if let Err(error) = stream.device_mut().ungrab() {
        warn!("Failed to ungrab input device: {}", error);
    }
    Ok(())
}
