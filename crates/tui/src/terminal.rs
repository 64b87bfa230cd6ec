use std::{
    io::{self, Stdout},
    sync::Arc,
    thread::{self, JoinHandle},
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use drawnumber_core::{DrawNumberObserver, DrawNumberView, DrawResult, ObserverHandle};
use parking_lot::Mutex;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error};

use crate::prompt::{render, KeyAction, PromptState, Tone};

const TICK_RATE: Duration = Duration::from_millis(250);

type Backend = CrosstermBackend<Stdout>;

struct Screen {
    terminal: Option<Terminal<Backend>>,
    state: PromptState,
}

impl Screen {
    fn redraw(&mut self) {
        let Screen { terminal, state } = self;
        if let Some(terminal) = terminal.as_mut() {
            if let Err(err) = terminal.draw(|frame| render(frame, state)) {
                error!(?err, "Failed to draw terminal view");
            }
        }
    }

    fn show(&mut self, tone: Tone, text: impl Into<String>) {
        self.state.push(tone, text);
        self.redraw();
    }
}

/// Full-screen interactive view.
///
/// Keyboard input is read on a dedicated thread and forwarded to the
/// controller through the registered [`ObserverHandle`]. That thread exits
/// once the controller signals shutdown.
pub struct TerminalView {
    screen: Arc<Mutex<Screen>>,
    observer: Option<ObserverHandle>,
    input: Option<JoinHandle<()>>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen {
                terminal: None,
                state: PromptState::default(),
            })),
            observer: None,
            input: None,
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawNumberView for TerminalView {
    fn set_observer(&mut self, observer: ObserverHandle) {
        self.observer = Some(observer);
    }

    fn start(&mut self) -> Result<()> {
        let observer = self
            .observer
            .clone()
            .context("terminal view started without an observer")?;

        enable_raw_mode().context("failed to enter raw mode")?;
        let terminal = rollback_on_error(open_terminal(), leave_raw_mode)?;

        {
            let mut screen = self.screen.lock();
            screen.terminal = Some(terminal);
            screen.show(Tone::Info, "Guess the number!");
        }
        self.input = Some(spawn_input_thread(Arc::clone(&self.screen), observer));
        Ok(())
    }

    fn result(&mut self, result: DrawResult) {
        let tone = match result {
            DrawResult::YouWon => Tone::Success,
            DrawResult::YouLost => Tone::Error,
            DrawResult::TooLow | DrawResult::TooHigh => Tone::Info,
        };
        {
            let mut screen = self.screen.lock();
            screen.state.push(tone, result.description());
            if result.is_terminal() {
                screen.state.push(Tone::Info, "New game started");
            }
            screen.redraw();
        }
        if result.is_terminal() {
            if let Some(observer) = &self.observer {
                observer.reset_game();
            }
        }
    }

    fn number_incorrect(&mut self) {
        self.screen
            .lock()
            .show(Tone::Warning, "Incorrect number, try again");
    }

    fn display_error(&mut self, message: &str) {
        self.screen.lock().show(Tone::Error, message);
    }

    fn stop(&mut self) {
        // The input thread sees the shutdown flag within one tick; only reap it if already done.
        if let Some(handle) = self.input.take() {
            if !handle.is_finished() {
                debug!("Leaving terminal input thread to exit on its next tick");
            } else if handle.join().is_err() {
                error!("Terminal input thread panicked");
            }
        }
        if let Some(mut terminal) = self.screen.lock().terminal.take() {
            if let Err(err) = restore_terminal(&mut terminal) {
                error!(?err, "Failed to restore terminal");
            }
        }
        debug!("Terminal view stopped");
    }
}

impl Drop for TerminalView {
    fn drop(&mut self) {
        if let Some(mut terminal) = self.screen.lock().terminal.take() {
            let _ = restore_terminal(&mut terminal);
        }
    }
}

fn open_terminal() -> Result<Terminal<Backend>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout)).context("failed to create terminal")?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn leave_raw_mode() {
    if let Err(err) = disable_raw_mode() {
        error!(?err, "Failed to disable raw mode");
    }
    if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen) {
        error!(?err, "Failed to leave alternate screen");
    }
}

fn rollback_on_error<T>(result: Result<T>, rollback: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        rollback();
    }
    result
}

fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(screen: Arc<Mutex<Screen>>, observer: ObserverHandle) -> JoinHandle<()> {
    thread::spawn(move || {
        while !observer.is_shutdown() {
            let event = match event::poll(TICK_RATE) {
                Ok(true) => event::read(),
                Ok(false) => continue,
                Err(err) => Err(err),
            };
            match event {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    let action = {
                        let mut screen = screen.lock();
                        let action = screen.state.handle_key(key);
                        match action {
                            KeyAction::Reset => screen.show(Tone::Info, "New game started"),
                            KeyAction::Redraw => screen.redraw(),
                            _ => {}
                        }
                        action
                    };
                    match action {
                        KeyAction::Submit(n) => observer.new_attempt(n),
                        KeyAction::Reset => observer.reset_game(),
                        KeyAction::Quit => {
                            observer.quit();
                            break;
                        }
                        KeyAction::Redraw | KeyAction::Ignore => {}
                    }
                }
                Ok(Event::Resize(..)) => screen.lock().redraw(),
                Ok(_) => {}
                Err(err) => {
                    error!(?err, "Failed to read terminal input");
                    observer.quit();
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use anyhow::anyhow;
    use drawnumber_core::ViewEvent;
    use tokio::sync::{
        mpsc::{self, error::TryRecvError},
        watch,
    };

    use super::*;

    struct Harness {
        view: TerminalView,
        events: mpsc::UnboundedReceiver<ViewEvent>,
        shutdown: watch::Sender<bool>,
    }

    fn harness() -> Harness {
        let (events_tx, events) = mpsc::unbounded_channel();
        let (shutdown, shutdown_rx) = watch::channel(false);
        let mut view = TerminalView::new();
        view.set_observer(ObserverHandle::new(events_tx, shutdown_rx));
        Harness {
            view,
            events,
            shutdown,
        }
    }

    fn messages(view: &TerminalView) -> Vec<(String, Tone)> {
        view.screen
            .lock()
            .state
            .messages()
            .map(|(text, tone)| (text.to_string(), tone))
            .collect()
    }

    #[test]
    fn game_end_announces_new_game_and_requests_reset() {
        for (result, tone) in [
            (DrawResult::YouWon, Tone::Success),
            (DrawResult::YouLost, Tone::Error),
        ] {
            let mut harness = harness();
            harness.view.result(result);

            assert_eq!(harness.events.try_recv(), Ok(ViewEvent::ResetGame));
            assert_eq!(harness.events.try_recv(), Err(TryRecvError::Empty));
            assert_eq!(
                messages(&harness.view),
                vec![
                    (result.description().to_string(), tone),
                    ("New game started".to_string(), Tone::Info),
                ]
            );
        }
    }

    #[test]
    fn hints_do_not_reset_the_game() {
        let mut harness = harness();
        harness.view.result(DrawResult::TooHigh);
        harness.view.result(DrawResult::TooLow);

        assert_eq!(harness.events.try_recv(), Err(TryRecvError::Empty));
        assert_eq!(
            messages(&harness.view),
            vec![
                ("Your number is too big".to_string(), Tone::Info),
                ("Your number is too small".to_string(), Tone::Info),
            ]
        );
    }

    #[test]
    fn notices_land_in_the_message_log() {
        let mut harness = harness();
        harness.view.number_incorrect();
        harness.view.display_error("config unreadable");

        assert_eq!(
            messages(&harness.view),
            vec![
                ("Incorrect number, try again".to_string(), Tone::Warning),
                ("config unreadable".to_string(), Tone::Error),
            ]
        );
    }

    #[test]
    fn input_thread_exits_once_shutdown_is_signalled() {
        let harness = harness();
        let mut events = harness.events;
        harness.shutdown.send_replace(true);
        let observer = harness
            .view
            .observer
            .clone()
            .expect("observer registered");

        let handle = spawn_input_thread(Arc::clone(&harness.view.screen), observer);
        assert!(handle.join().is_ok());
        assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
    }

    #[test]
    fn stop_does_not_wait_for_a_running_input_thread() {
        let mut harness = harness();
        harness.view.input = Some(thread::spawn(|| thread::sleep(Duration::from_secs(5))));

        let started = Instant::now();
        harness.view.stop();

        assert!(started.elapsed() < Duration::from_secs(1));
        assert!(harness.view.input.is_none());
    }

    #[test]
    fn failed_terminal_setup_rolls_back_raw_mode() {
        let mut rolled_back = false;
        let result: Result<()> =
            rollback_on_error(Err(anyhow!("no alternate screen")), || rolled_back = true);
        assert!(result.is_err());
        assert!(rolled_back);

        let mut rolled_back = false;
        let result = rollback_on_error(Ok(7), || rolled_back = true);
        assert_eq!(result.ok(), Some(7));
        assert!(!rolled_back);
    }
}
