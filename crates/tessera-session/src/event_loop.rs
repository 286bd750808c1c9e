use crate::handoff::Handoff;
use crate::session::Session;
use anyhow::{anyhow, Result};
use calloop::signals::{Signal, Signals};
use calloop::{EventLoop, LoopSignal};
use std::time::Duration;
use tracing::{error, info, warn};

/// State driven by the event loop
pub struct SessionLoop {
    pub session: Session,
    pub handoff: Handoff,
    stop: LoopSignal,
}

impl SessionLoop {
    /// What to do for a delivered signal
    fn on_signal(&mut self, signal: Signal) {
        match signal {
            Signal::SIGHUP => {
                if !self.session.reload() {
                    return;
                }
                if let Some(config) = self.session.current() {
                    if let Err(e) = self.handoff.write(config) {
                        error!("Failed to hand off reloaded config: {:#}", e);
                    }
                }
            }
            Signal::SIGINT | Signal::SIGTERM => {
                info!("Received {:?}, stopping session", signal);
                self.stop.stop();
            }
            other => warn!("Ignoring unexpected signal {:?}", other),
        }
    }
}

/// Event loop with the session signals already routed to it. Until the loop
/// runs, they stay pending instead of taking their default action.
fn signal_loop() -> Result<EventLoop<'static, SessionLoop>> {
    let event_loop: EventLoop<SessionLoop> = EventLoop::try_new()?;

    let signals = Signals::new(&[Signal::SIGHUP, Signal::SIGINT, Signal::SIGTERM])?;
    event_loop
        .handle()
        .insert_source(signals, |event, _, state| state.on_signal(event.signal()))
        .map_err(|e| anyhow!("Failed to register signal source: {}", e.error))?;

    Ok(event_loop)
}

/// Start the session, then wait for signals: SIGHUP reloads,
/// SIGINT and SIGTERM exit.
pub fn run(mut session: Session, handoff: Handoff) -> Result<()> {
    // Registered before autostart so a SIGHUP sent meanwhile is not fatal
    let mut event_loop = signal_loop()?;

    let config = session.start()?;
    handoff.write(config)?;

    let mut state = SessionLoop {
        session,
        handoff,
        stop: event_loop.get_signal(),
    };

    info!("Session running, send SIGHUP to reload");
    event_loop.run(None::<Duration>, &mut state, |_| {})?;

    info!("Session stopped after {} loads", state.session.generation());
    Ok(())
}
