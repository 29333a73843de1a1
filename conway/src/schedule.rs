// schedule.rs - Fixed-cadence tasks driving the simulation and the redraws
//
// Both tasks live for the whole process. Each waits one full period before
// its first tick, and a late tick pushes the following ones back instead of
// firing a burst to catch up.

use std::future::Future;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{Instrument, Span, info_span, warn};

use crate::simulation::Simulation;

async fn every<F, Fut>(period: Duration, mut tick: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = ()>,
{
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        interval.tick().await;
        tick().await;
    }
}

// Saturates instead of truncating for absurdly long periods.
fn period_ms(period: Duration) -> u64 {
    u64::try_from(period.as_millis()).unwrap_or(u64::MAX)
}

fn task_span(name: &'static str, period: Duration) -> Span {
    info_span!("periodic", task = name, period_ms = period_ms(period))
}

/// Calls `tick` every `period` on `handle`'s runtime.
pub fn spawn_periodic<F>(handle: &Handle, name: &'static str, period: Duration, mut tick: F) -> JoinHandle<()>
where
    F: FnMut() + Send + 'static,
{
    handle.spawn(
        every(period, move || {
            tick();
            std::future::ready(())
        })
        .instrument(task_span(name, period)),
    )
}

/// Advances `sim` by one generation per period while it is running. Paused
/// ticks do nothing but still wait out the period.
pub fn spawn_simulation_task(handle: &Handle, sim: Simulation, period: Duration) -> JoinHandle<()> {
    handle.spawn(
        every(period, move || {
            let sim = sim.clone();
            async move {
                if let Err(err) = sim.tick_rows().await {
                    warn!(%err, "generation step failed");
                }
            }
        })
        .instrument(task_span("simulation", period)),
    )
}

/// Requests a redraw every period. Never touches the simulation lock; the
/// redraw itself reads through [`Simulation::view`].
pub fn spawn_render_task<F>(handle: &Handle, period: Duration, repaint: F) -> JoinHandle<()>
where
    F: Fn() + Send + 'static,
{
    spawn_periodic(handle, "render", period, repaint)
}
