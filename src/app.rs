// src/app.rs
use std::cell::Cell;
use std::io;
use std::rc::Rc;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::Backend, widgets::ListState, Terminal};
use tracing::{debug, info};

use crate::config::Config;
use crate::drop_target::{self, decode_dropped_text};
use crate::editor::LineBuffer;
use crate::error::Result;
use crate::filesystem::DirectoryModel;
use crate::picker::DirectoryPicker;
use crate::ui;

const PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Path,
    List,
}

pub struct App {
    pub model: DirectoryModel,
    pub input: LineBuffer,
    pub focus: Focus,
    pub list_state: ListState,
    pub picker: Option<DirectoryPicker>,
    pub status: Option<String>,
    pub config: Config,
    pub should_quit: bool,
    pub needs_redraw: bool,
    listing_changed: Rc<Cell<bool>>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let mut model = DirectoryModel::new();
        let listing_changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&listing_changed);
        model.subscribe(move |_| flag.set(true));

        App {
            model,
            input: LineBuffer::new(),
            focus: Focus::List,
            list_state: ListState::default(),
            picker: None,
            status: None,
            config,
            should_quit: false,
            needs_redraw: true,
            listing_changed,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn change_directory(&mut self, candidate: &str) {
        let result = self.model.try_change_directory(candidate);
        self.settle(result);
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        while !self.should_quit {
            if self.needs_redraw {
                terminal.draw(|f| ui::draw(f, self))?;
                self.needs_redraw = false;
            }
            let event = event::read()?;
            self.handle_event(event);
        }
        info!("quit");
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Paste(text) => self.handle_paste(&text),
            Event::Resize(_, _) => {}
            _ => return,
        }
        self.needs_redraw = true;
    }

    fn handle_paste(&mut self, text: &str) {
        let is_drop = self.picker.is_none()
            && decode_dropped_text(text).is_some_and(|p| p.exists());
        if is_drop {
            match drop_target::on_file_dropped(&mut self.model, text) {
                Ok(()) => {
                    self.settle(Ok(()));
                    return;
                }
                Err(err) => debug!(error = %err, "paste is not a usable drop"),
            }
        }
        if self.focus == Focus::Path && self.picker.is_none() {
            self.input.insert_str(text);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        if self.picker.is_some() {
            self.handle_picker_key(key);
            return;
        }
        if ctrl && key.code == KeyCode::Char('o') {
            self.picker = Some(DirectoryPicker::open(self.input.text()));
            return;
        }
        if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
            self.focus = match self.focus {
                Focus::Path => Focus::List,
                Focus::List => Focus::Path,
            };
            return;
        }

        match self.focus {
            Focus::Path => self.handle_path_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_path_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                let candidate = self.input.text().to_string();
                self.change_directory(&candidate);
            }
            KeyCode::Esc => {
                let current = self.model.path().to_string();
                self.input.set_text(&current);
                self.focus = Focus::List;
            }
            KeyCode::Down => self.focus = Focus::List,
            KeyCode::Backspace => self.input.delete_char(),
            KeyCode::Delete => self.input.delete_forward(),
            KeyCode::Left => self.input.move_cursor(-1),
            KeyCode::Right => self.input.move_cursor(1),
            KeyCode::Home => self.input.move_home(),
            KeyCode::End => self.input.move_end(),
            KeyCode::Char(ch) => self.input.insert_char(ch),
            _ => {}
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-(PAGE as isize)),
            KeyCode::PageDown => self.move_selection(PAGE as isize),
            KeyCode::Home | KeyCode::Char('g') => self.select_index(0),
            KeyCode::End | KeyCode::Char('G') => {
                self.select_index(self.model.entries().len().saturating_sub(1))
            }
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
                if let Some(index) = self.selected() {
                    if self.model.entries().get(index).is_some_and(|e| e.is_dir) {
                        let result = self.model.enter(index);
                        self.settle(result);
                    }
                }
            }
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => {
                let result = self.model.navigate_up();
                self.settle(result);
            }
            KeyCode::Char('/') => self.focus = Focus::Path,
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) {
        let Some(picker) = self.picker.as_mut() else { return };
        let moved = match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                picker.select_previous();
                Ok(())
            }
            KeyCode::Down | KeyCode::Char('j') => {
                picker.select_next();
                Ok(())
            }
            KeyCode::Right | KeyCode::Char('l') => picker.descend(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Backspace => picker.ascend(),
            KeyCode::Enter => {
                let chosen = picker.confirm();
                self.finish_picker(chosen);
                return;
            }
            KeyCode::Char(' ') => {
                let chosen = picker.confirm_current();
                self.finish_picker(chosen);
                return;
            }
            KeyCode::Esc => {
                self.finish_picker(None);
                return;
            }
            _ => Ok(()),
        };
        if let Err(err) = moved {
            debug!(error = %err, "picker navigation failed");
        }
    }

    fn finish_picker(&mut self, chosen: Option<String>) {
        self.picker = None;
        if let Some(path) = chosen {
            self.change_directory(&path);
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let current = self.selected().unwrap_or(0) as isize;
        self.select_index((current + delta).max(0) as usize);
    }

    fn select_index(&mut self, index: usize) {
        let len = self.model.entries().len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            self.list_state.select(Some(index.min(len - 1)));
        }
    }

    /// Applies the outcome of a directory change to the view.
    fn settle(&mut self, result: Result<()>) {
        match result {
            Ok(()) => {}
            Err(err) if self.config.report_invalid_paths => self.status = Some(err.to_string()),
            Err(err) => debug!(error = %err, "directory change ignored"),
        }

        if self.listing_changed.replace(false) {
            let path = self.model.path().to_string();
            self.input.set_text(&path);
            self.list_state = ListState::default();
            self.select_index(0);
            self.status = None;
            info!(path = %path, entries = self.model.entries().len(), "directory changed");
        }
    }
}
