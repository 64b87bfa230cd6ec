//! Screen state and rendering for the terminal view.

use std::collections::VecDeque;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

const MAX_MESSAGES: usize = 200;
const MAX_INPUT_LEN: usize = 11;

/// What the input thread should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    Submit(i32),
    Reset,
    Quit,
    Redraw,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Info => Color::White,
            Tone::Success => Color::Green,
            Tone::Warning => Color::Yellow,
            Tone::Error => Color::Red,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Message {
    at: DateTime<Local>,
    text: String,
    tone: Tone,
}

/// Guess being typed plus the history shown to the user.
#[derive(Debug, Default)]
pub(crate) struct PromptState {
    input: String,
    messages: VecDeque<Message>,
}

impl PromptState {
    #[cfg(test)]
    pub(crate) fn input(&self) -> &str {
        &self.input
    }

    #[cfg(test)]
    pub(crate) fn messages(&self) -> impl Iterator<Item = (&str, Tone)> + '_ {
        self.messages
            .iter()
            .map(|message| (message.text.as_str(), message.tone))
    }

    pub(crate) fn push(&mut self, tone: Tone, text: impl Into<String>) {
        if self.messages.len() == MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back(Message {
            at: Local::now(),
            text: text.into(),
            tone,
        });
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => KeyAction::Quit,
                _ => KeyAction::Ignore,
            };
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => KeyAction::Quit,
            KeyCode::Char('r') => {
                self.input.clear();
                KeyAction::Reset
            }
            KeyCode::Char(ch) if ch.is_ascii_digit() => {
                if self.input.len() < MAX_INPUT_LEN {
                    self.input.push(ch);
                }
                KeyAction::Redraw
            }
            KeyCode::Char('-') if self.input.is_empty() => {
                self.input.push('-');
                KeyAction::Redraw
            }
            KeyCode::Backspace => {
                self.input.pop();
                KeyAction::Redraw
            }
            KeyCode::Enter if !self.input.is_empty() => {
                let parsed = self.input.parse::<i32>();
                self.input.clear();
                match parsed {
                    Ok(n) => KeyAction::Submit(n),
                    Err(_) => {
                        self.push(Tone::Error, "A number is required");
                        KeyAction::Redraw
                    }
                }
            }
            _ => KeyAction::Ignore,
        }
    }
}

pub(crate) fn render(frame: &mut Frame, state: &PromptState) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    let prompt = Paragraph::new(Line::from(vec![
        Span::styled(
            "Your guess: ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(state.input.as_str()),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Draw Number"));
    frame.render_widget(prompt, layout[0]);

    let visible = layout[1].height.saturating_sub(2) as usize;
    let skip = state.messages.len().saturating_sub(visible);
    let items: Vec<ListItem> = state
        .messages
        .iter()
        .skip(skip)
        .map(|message| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{} ", message.at.format("%H:%M:%S")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    message.text.clone(),
                    Style::default().fg(message.tone.color()),
                ),
            ]))
        })
        .collect();
    let history = List::new(items).block(Block::default().borders(Borders::ALL).title("Messages"));
    frame.render_widget(history, layout[1]);

    let help = Paragraph::new("Enter: guess • r: new game • Esc/q: quit")
        .block(Block::default().borders(Borders::ALL).title("Keys"))
        .wrap(Wrap { trim: true });
    frame.render_widget(help, layout[2]);
}
