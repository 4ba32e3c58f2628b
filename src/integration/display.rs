//! Interactive display surfaces.

use std::io::BufRead;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::info;

use crate::Frame;
use crate::metrics::Metrics;

/// What the operator asked for after a frame was shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEvent {
    Continue,
    Quit,
}

/// Presents annotated frames to an operator.
pub trait DisplaySurface {
    fn show(&mut self, frame_idx: u64, frame: &Frame, metrics: &Metrics) -> DisplayEvent;

    /// Release the surface. Called once when the run ends.
    fn close(&mut self) {}
}

/// Terminal status display.
///
/// Logs one status line per frame. Entering `q` on stdin requests a quit,
/// which is picked up at the next frame boundary.
pub struct ConsoleDisplay {
    quit_rx: Receiver<()>,
}

impl ConsoleDisplay {
    pub fn new() -> Self {
        let (quit_tx, quit_rx) = mpsc::channel();
        // Detached: a blocked stdin read must not hold up shutdown.
        thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if line.trim().eq_ignore_ascii_case("q") {
                    let _ = quit_tx.send(());
                    break;
                }
            }
        });
        info!("Display enabled, enter 'q' to stop");
        Self { quit_rx }
    }

    #[cfg(test)]
    fn with_receiver(quit_rx: Receiver<()>) -> Self {
        Self { quit_rx }
    }
}

impl Default for ConsoleDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySurface for ConsoleDisplay {
    fn show(&mut self, frame_idx: u64, frame: &Frame, metrics: &Metrics) -> DisplayEvent {
        let (width, height) = frame.dimensions();
        info!("frame {frame_idx} ({width}x{height}) {metrics}");
        match self.quit_rx.try_recv() {
            Ok(()) => DisplayEvent::Quit,
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => DisplayEvent::Continue,
        }
    }
}
