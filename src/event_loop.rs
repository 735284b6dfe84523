use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};

pub enum ControlFlow {
    Continue,
    Quit,
}

/// The centralized event loop driving the single UI thread.
///
/// Every designer mutation happens synchronously inside the handler before
/// the next event is read, so there is exactly one logical actor and no
/// reentrancy. The handler is called with `Some(event)` for input and with
/// `None` when the poll interval elapses (the redraw tick).
pub struct EventLoop {
    poll_interval: Duration,
}

impl EventLoop {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(None)? {
                break;
            }
            if event::poll(self.poll_interval)? {
                // Drain the queue so bursts (mouse drags) don't lag behind
                // one event per tick.
                loop {
                    let ev = event::read()?;
                    if let ControlFlow::Quit = handler(Some(ev))? {
                        return Ok(());
                    }
                    if !event::poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
