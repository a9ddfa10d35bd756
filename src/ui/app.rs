use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;
use rusqlite::Connection;

use crate::balance::{balance, BalanceError};
use crate::db::{list_elements, list_ions, normalized_symbol, resolve_element, resolve_ion};
use crate::models::{display_or_null, CatalogEntry, Polarity, ResolutionResult};

use super::helpers::{catalog_line, text_lines};
use super::screens::{build_report, CompoundScreen, CompoundStage, LookupOutcome, LookupScreen};

/// Footer space reserved for status messages and key hints.
const FOOTER_HEIGHT: u16 = 3;

/// The three actions of the main menu. Digits 1-3 select directly; any other
/// character is an invalid choice.
const MENU_ITEMS: &[&str] = &[
    "1. Look up element information",
    "2. Calculate ionic compound molar mass",
    "3. Exit",
];

/// High-level navigation states. Keeping this explicit makes it easy to
/// reason about which rendering path runs and what keys should do.
enum Screen {
    Menu,
    Lookup(LookupScreen),
    Compound(CompoundScreen),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

/// Top-level state container: the one store connection for the whole
/// session, the active screen, and the footer status. The connection is
/// owned here and passed down to each operation explicitly; nothing else in
/// the crate holds ambient store state.
pub struct App {
    conn: Connection,
    screen: Screen,
    menu_selected: usize,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            screen: Screen::Menu,
            menu_selected: 0,
            status: None,
        }
    }

    fn set_info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Info,
        });
    }

    fn set_error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Error,
        });
    }

    /// Handle one key press. Returns true when the session should end.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match self.screen {
            Screen::Menu => self.handle_menu_key(code),
            Screen::Lookup(_) => {
                self.handle_lookup_key(code);
                false
            }
            Screen::Compound(_) => {
                self.handle_compound_key(code);
                false
            }
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Up => {
                self.menu_selected = self.menu_selected.saturating_sub(1);
            }
            KeyCode::Down => {
                self.menu_selected = (self.menu_selected + 1).min(MENU_ITEMS.len() - 1);
            }
            KeyCode::Enter => return self.activate_menu_item(self.menu_selected),
            KeyCode::Char('1') => return self.activate_menu_item(0),
            KeyCode::Char('2') => return self.activate_menu_item(1),
            KeyCode::Char('3') | KeyCode::Char('q') | KeyCode::Esc => {
                return self.activate_menu_item(2)
            }
            KeyCode::Char(_) => {
                // Invalid menu input is reported and the menu re-prompts.
                self.set_error("Invalid choice. Please enter a number between 1 and 3.");
            }
            _ => {}
        }
        false
    }

    fn activate_menu_item(&mut self, index: usize) -> bool {
        self.status = None;
        match index {
            0 => self.open_lookup(),
            1 => self.open_compound(),
            _ => return true,
        }
        false
    }

    /// Enter the element-lookup screen, loading the pick-list up front. A
    /// failed listing aborts the operation and keeps the menu running.
    fn open_lookup(&mut self) {
        match list_elements(&self.conn) {
            Ok(catalog) => self.screen = Screen::Lookup(LookupScreen::new(catalog)),
            Err(err) => self.set_error(format!("Failed to list elements.\n{}", err.diagnostics)),
        }
    }

    /// Enter the compound calculator, starting at the cation stage.
    fn open_compound(&mut self) {
        match list_ions(&self.conn, Polarity::Cation) {
            Ok(catalog) => self.screen = Screen::Compound(CompoundScreen::new(catalog)),
            Err(err) => self.set_error(format!("Failed to list cations.\n{}", err.diagnostics)),
        }
    }

    fn handle_lookup_key(&mut self, code: KeyCode) {
        let Screen::Lookup(state) = &mut self.screen else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.screen = Screen::Menu;
            }
            KeyCode::Backspace => {
                state.input.pop();
            }
            KeyCode::Enter => {
                if state.input.trim().is_empty() {
                    return;
                }
                state.outcome = Some(match resolve_element(&self.conn, &state.input) {
                    ResolutionResult::Found(record) => LookupOutcome::Found(record),
                    ResolutionResult::NotFound => {
                        LookupOutcome::NotFound(normalized_symbol(&state.input))
                    }
                    ResolutionResult::QueryFailed(diagnostics) => {
                        LookupOutcome::Failed(diagnostics)
                    }
                });
                state.input.clear();
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                state.input.push(ch);
            }
            _ => {}
        }
    }

    fn handle_compound_key(&mut self, code: KeyCode) {
        let Screen::Compound(state) = &mut self.screen else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.screen = Screen::Menu;
            }
            KeyCode::Backspace => {
                state.input.pop();
            }
            KeyCode::Enter => {
                if state.input.trim().is_empty() || state.report.is_some() {
                    return;
                }
                self.submit_compound_symbol();
            }
            KeyCode::Char(ch) if !ch.is_control() => {
                if state.report.is_none() {
                    state.input.push(ch);
                }
            }
            _ => {}
        }
    }

    /// Resolve the symbol typed for the current stage and advance the
    /// calculation. A missing ion, failed query, or charge-sign violation
    /// aborts back to the menu with a message; the session keeps running.
    fn submit_compound_symbol(&mut self) {
        let Screen::Compound(state) = &mut self.screen else {
            return;
        };
        let polarity = match state.stage {
            CompoundStage::Cation => Polarity::Cation,
            CompoundStage::Anion => Polarity::Anion,
        };

        let ion = match resolve_ion(&self.conn, &state.input, polarity) {
            ResolutionResult::Found(ion) => ion,
            ResolutionResult::NotFound => {
                let message = format!(
                    "{} with symbol '{}' not found. Could not calculate molar mass due to \
                     missing {} information.",
                    polarity.label(),
                    normalized_symbol(&state.input),
                    polarity.label().to_lowercase()
                );
                self.screen = Screen::Menu;
                self.set_error(message);
                return;
            }
            ResolutionResult::QueryFailed(diagnostics) => {
                self.screen = Screen::Menu;
                self.set_error(format!("Failed to execute query.\n{diagnostics}"));
                return;
            }
        };

        match state.stage {
            CompoundStage::Cation => {
                // Reject a wrong-sign cation before prompting for the anion,
                // with the same error the balancer would raise.
                if ion.charge <= 0 {
                    let err = BalanceError::CationChargeNotPositive {
                        symbol: ion.symbol,
                        charge: ion.charge,
                    };
                    self.screen = Screen::Menu;
                    self.set_error(err.to_string());
                    return;
                }
                state.cation = Some(ion);
                state.stage = CompoundStage::Anion;
                state.input.clear();
                match list_ions(&self.conn, Polarity::Anion) {
                    Ok(catalog) => state.catalog = catalog,
                    Err(err) => {
                        let diagnostics = err.diagnostics;
                        self.screen = Screen::Menu;
                        self.set_error(format!("Failed to list anions.\n{diagnostics}"));
                    }
                }
            }
            CompoundStage::Anion => {
                let Some(cation) = state.cation.clone() else {
                    self.screen = Screen::Menu;
                    return;
                };
                match balance(&cation, &ion) {
                    Ok(compound) => {
                        state.report = Some(build_report(&compound));
                        state.input.clear();
                        self.set_info(format!(
                            "Balanced {}: {:.4} g/mol. Esc returns to the menu.",
                            compound.formula(),
                            compound.molar_mass
                        ));
                    }
                    Err(err) => {
                        self.screen = Screen::Menu;
                        self.set_error(err.to_string());
                    }
                }
            }
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(frame.area());

        let title = Paragraph::new("Chemical Database Explorer")
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(title, chunks[0]);

        match &self.screen {
            Screen::Menu => self.draw_menu(frame, chunks[1]),
            Screen::Lookup(state) => draw_lookup(frame, chunks[1], state),
            Screen::Compound(state) => draw_compound(frame, chunks[1], state),
        }

        self.draw_footer(frame, chunks[2]);
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(index, label)| {
                let style = if index == self.menu_selected {
                    Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan)
                } else {
                    Style::default()
                };
                ListItem::new(Line::styled(*label, style))
            })
            .collect();

        let menu = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Main Menu (1-3, or Up/Down + Enter)"),
        );
        frame.render_widget(menu, area);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let (text, style) = match &self.status {
            Some(status) => {
                let style = match status.kind {
                    StatusKind::Info => Style::default().fg(Color::Green),
                    StatusKind::Error => Style::default().fg(Color::Red),
                };
                (status.text.clone(), style)
            }
            None => {
                let hint = match &self.screen {
                    Screen::Menu => "Choose an action. Ctrl+C quits.",
                    Screen::Lookup(_) => "Type a symbol, Enter to look up, Esc for the menu.",
                    Screen::Compound(_) => "Type a symbol, Enter to continue, Esc for the menu.",
                };
                (hint.to_string(), Style::default().fg(Color::DarkGray))
            }
        };

        let footer = Paragraph::new(text)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
    }
}

/// Split a body area into the pick-list column and the input/result column.
fn split_body(area: Rect) -> (Rect, Rect, Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);
    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(columns[1]);
    (columns[0], right[0], right[1])
}

fn draw_catalog(frame: &mut Frame, area: Rect, title: &str, catalog: &[CatalogEntry]) {
    let items: Vec<ListItem> = catalog
        .iter()
        .map(|entry| ListItem::new(catalog_line(entry)))
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(list, area);
}

fn draw_input(frame: &mut Frame, area: Rect, title: &str, input: &str) {
    let paragraph = Paragraph::new(format!("{input}_"))
        .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    frame.render_widget(paragraph, area);
}

fn draw_lookup(frame: &mut Frame, area: Rect, state: &LookupScreen) {
    let (catalog_area, input_area, result_area) = split_body(area);
    draw_catalog(frame, catalog_area, "Available Elements", &state.catalog);
    draw_input(frame, input_area, "Element symbol (e.g., H, He, Li)", &state.input);

    let lines = match &state.outcome {
        None => Vec::new(),
        Some(LookupOutcome::Found(record)) => vec![
            Line::from("--- Element Information ---"),
            Line::from(format!("Symbol:        {}", record.display_symbol())),
            Line::from(format!(
                "Name:          {}",
                display_or_null(record.name.as_deref())
            )),
            Line::from(format!(
                "Atomic Number: {}",
                display_or_null(record.atomic_number.as_deref())
            )),
            Line::from(format!(
                "Atomic Weight: {} g/mol",
                display_or_null(record.atomic_weight.as_deref())
            )),
            Line::from(format!(
                "Charge:        {}",
                display_or_null(record.charge.as_deref())
            )),
        ],
        Some(LookupOutcome::NotFound(symbol)) => vec![Line::from(format!(
            "Element with symbol '{symbol}' not found."
        ))],
        Some(LookupOutcome::Failed(diagnostics)) => {
            let mut lines = vec![Line::from("Failed to execute query.")];
            lines.extend(diagnostics.lines().map(|line| Line::from(line.to_string())));
            lines
        }
    };

    let result = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Result"));
    frame.render_widget(result, result_area);
}

fn draw_compound(frame: &mut Frame, area: Rect, state: &CompoundScreen) {
    let (catalog_area, input_area, result_area) = split_body(area);
    let (catalog_title, input_title) = match state.stage {
        CompoundStage::Cation => ("Available Cations", "Cation symbol"),
        CompoundStage::Anion => ("Available Anions", "Anion symbol"),
    };
    draw_catalog(frame, catalog_area, catalog_title, &state.catalog);
    draw_input(frame, input_area, input_title, &state.input);

    let lines = match &state.report {
        Some(report) => text_lines(report),
        None => match &state.cation {
            Some(cation) => vec![
                Line::from(format!("Cation:        {}", cation.symbol)),
                Line::from(format!("Charge:        {:+}", cation.charge)),
                Line::from(format!("Atomic Weight: {:.4} g/mol", cation.atomic_mass)),
                Line::from(""),
                Line::from("Now enter the anion symbol."),
            ],
            None => vec![Line::from("=== Ionic Compound Molar Mass Calculator ===")],
        },
    };

    let result = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Calculation"));
    frame.render_widget(result, result_area);
}
