use std::sync::{mpsc, Arc};
use std::time::Duration;
use log::info;

use super::lifelog::LifeLog;
use super::logsource::LogSource;
use super::poller::Poller;
use super::recorder::Recorder;
use super::screen::{Phase, ScreenId};
use super::store::StatusStore;

/// Called by pollers to wake the UI after queueing a refresh signal.
pub type Waker = Arc<dyn Fn() + Send + Sync>;

/// One screen currently on the back stack, with its recorder, its poller
/// and the display strings the UI renders.
pub struct LiveScreen {
    pub id: ScreenId,
    recorder: Recorder,
    poller: Poller,
    ticks: mpsc::Receiver<()>,
    pub status_text: String,
    pub log_text: String,
}

impl LiveScreen {
    fn record(&self, phase: Phase) {
        self.recorder.record(phase);
    }

    /// Re-read the store snapshot and the log source. Pure function of
    /// shared state: repeated calls without intervening changes leave the
    /// rendered text untouched.
    fn refresh(&mut self, store: &dyn StatusStore, source: &dyn LogSource) {
        self.status_text = store
            .snapshot()
            .into_iter()
            .map(|(_, value)| value)
            .collect::<Vec<_>>()
            .join("\n");
        self.log_text = source.get_log();
    }

    fn destroy(&mut self) {
        self.record(Phase::Destroyed);
        self.poller.cancel();
    }
}

/// Owns the back stack and drives platform-accurate callback sequences
/// for navigation, finishing and the modal dialog.
pub struct Session {
    store: Arc<dyn StatusStore>,
    log: Arc<LifeLog>,
    source: Arc<dyn LogSource>,
    interval: Duration,
    waker: Waker,
    stack: Vec<LiveScreen>,
    dialog_open: bool,
}

impl Session {
    pub fn new(
        store: Arc<dyn StatusStore>,
        log: Arc<LifeLog>,
        source: Arc<dyn LogSource>,
        interval: Duration,
        waker: Waker,
    ) -> Self {
        Self {
            store,
            log,
            source,
            interval,
            waker,
            stack: Vec::new(),
            dialog_open: false,
        }
    }

    pub fn active(&self) -> Option<&LiveScreen> {
        self.stack.last()
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// Launch `id` with no caller tag, as the platform launcher would.
    /// Resets every store entry to the unset sentinel before the first
    /// callback runs.
    pub fn launch_root(&mut self, id: ScreenId) {
        info!("launching {id} from the platform");
        let screen = self.create_screen(id, None);
        self.stack.push(screen);
    }

    /// Navigate from the active screen to `to`, tagging the transition
    /// with the caller's id so the destination never resets the store.
    pub fn navigate(&mut self, to: ScreenId) {
        let Some(active) = self.stack.last() else { return };
        let caller = active.id;
        info!("navigating {caller} -> {to}");
        active.record(Phase::Paused);
        let screen = self.create_screen(to, Some(caller));
        if let Some(previous) = self.stack.last() {
            previous.record(Phase::Stopped);
        }
        self.stack.push(screen);
    }

    /// Finish the active screen, resuming the one underneath. Returns
    /// false once the last screen is gone and the app should close.
    pub fn finish(&mut self) -> bool {
        let Some(mut finished) = self.stack.pop() else { return false };
        info!("finishing {}", finished.id);
        finished.record(Phase::Paused);
        if let Some(below) = self.stack.last_mut() {
            below.record(Phase::Started);
            below.record(Phase::Resumed);
        }
        finished.record(Phase::Stopped);
        finished.destroy();
        if let Some(below) = self.stack.last_mut() {
            below.refresh(self.store.as_ref(), self.source.as_ref());
        }
        !self.stack.is_empty()
    }

    /// The dialog only pauses the screen underneath; it is never stopped.
    pub fn open_dialog(&mut self) {
        if self.dialog_open {
            return;
        }
        if let Some(active) = self.stack.last() {
            self.dialog_open = true;
            active.record(Phase::Paused);
        }
    }

    pub fn close_dialog(&mut self) {
        if !self.dialog_open {
            return;
        }
        self.dialog_open = false;
        if let Some(active) = self.stack.last() {
            active.record(Phase::Resumed);
        }
    }

    /// Drain the active screen's refresh signals; when at least one
    /// arrived, re-render its display strings. Called once per UI frame.
    pub fn pump(&mut self) {
        let Some(active) = self.stack.last_mut() else { return };
        let mut ticked = false;
        while active.ticks.try_recv().is_ok() {
            ticked = true;
        }
        if ticked {
            active.refresh(self.store.as_ref(), self.source.as_ref());
        }
    }

    fn create_screen(&self, id: ScreenId, caller: Option<ScreenId>) -> LiveScreen {
        // A missing caller tag means the platform launched us directly:
        // treat it as a fresh session and clear every entry.
        if caller.is_none() {
            self.store.reset_all();
        }
        let (tx, ticks) = mpsc::channel();
        let waker = self.waker.clone();
        let poller = Poller::start(self.interval, move || {
            if tx.send(()).is_ok() {
                waker();
            }
        });
        let mut screen = LiveScreen {
            id,
            recorder: Recorder::new(id, self.store.clone(), self.log.clone()),
            poller,
            ticks,
            status_text: String::new(),
            log_text: String::new(),
        };
        screen.record(Phase::Created);
        screen.record(Phase::Started);
        screen.record(Phase::Resumed);
        screen.refresh(self.store.as_ref(), self.source.as_ref());
        screen
    }
}
