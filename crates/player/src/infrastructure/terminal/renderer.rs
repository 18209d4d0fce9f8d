//! Line-oriented terminal renderer.
//!
//! Everything is printed as whole lines so screen readers announce it in
//! order. The input line (login form or text prompt) is redrawn after each
//! message so typing is never interleaved with server output.

use std::io::{self, Stdout, Write};
use std::sync::Mutex;

use crossterm::{
    cursor::MoveTo,
    queue,
    style::Print,
    terminal::{Clear, ClearType, SetTitle},
};

use crate::ports::outbound::RendererPort;

struct Screen<W> {
    out: W,
    menu: Vec<String>,
    input_line: Option<String>,
}

impl<W: Write> Screen<W> {
    fn line(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text), Print("\r\n"))
    }

    fn clear_input_line(&mut self) -> io::Result<()> {
        if self.input_line.is_some() {
            queue!(self.out, Print("\r"), Clear(ClearType::CurrentLine))?;
        }
        Ok(())
    }

    fn redraw_input_line(&mut self) -> io::Result<()> {
        if let Some(line) = &self.input_line {
            queue!(self.out, Print(line))?;
        }
        Ok(())
    }
}

fn render<W, F>(screen: &mut Screen<W>, draw: F) -> io::Result<()>
where
    W: Write,
    F: FnOnce(&mut Screen<W>) -> io::Result<()>,
{
    screen.clear_input_line()?;
    draw(screen)?;
    screen.redraw_input_line()?;
    screen.out.flush()
}

pub struct TerminalRenderer<W: Write + Send = Stdout> {
    screen: Mutex<Screen<W>>,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            screen: Mutex::new(Screen {
                out,
                menu: Vec::new(),
                input_line: None,
            }),
        }
    }

    /// Run `draw` with the input line lifted out of the way.
    fn draw<F>(&self, draw: F)
    where
        F: FnOnce(&mut Screen<W>) -> io::Result<()>,
    {
        let Ok(mut screen) = self.screen.lock() else {
            tracing::error!("Renderer lock poisoned");
            return;
        };
        if let Err(e) = render(&mut *screen, draw) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }

    /// Show the line being edited. `None` removes it.
    pub fn set_input_line(&self, line: Option<String>) {
        self.draw(|screen| {
            screen.input_line = line;
            Ok(())
        });
    }

    pub fn into_inner(self) -> Option<W> {
        self.screen.into_inner().ok().map(|screen| screen.out)
    }
}

impl<W: Write + Send> RendererPort for TerminalRenderer<W> {
    fn set_title(&self, title: &str) {
        self.draw(|screen| queue!(screen.out, SetTitle(title)));
    }

    fn write_message(&self, text: &str) {
        self.draw(|screen| screen.line(text));
    }

    fn clear_messages(&self) {
        self.draw(|screen| queue!(screen.out, Clear(ClearType::All), MoveTo(0, 0)));
    }

    fn show_menu(&self, title: &str, dismissable: bool, entries: &[String]) {
        self.draw(|screen| {
            screen.menu = entries.to_vec();
            screen.line(&format!("== {title} =="))?;
            for (index, entry) in entries.iter().enumerate() {
                screen.line(&format!("  {}. {}", index + 1, entry))?;
            }
            if dismissable {
                screen.line("(Escape to close)")?;
            }
            Ok(())
        });
    }

    fn focus_menu_entry(&self, index: usize) {
        self.draw(|screen| match screen.menu.get(index).cloned() {
            Some(entry) => screen.line(&format!("> {entry}")),
            None => Ok(()),
        });
    }

    fn hide_menu(&self) {
        self.draw(|screen| {
            screen.menu.clear();
            Ok(())
        });
    }

    // The input line itself belongs to the shell, which sets it through
    // `set_input_line` on its next refresh.
    fn show_text_prompt(&self, label: &str, _value: &str) {
        self.draw(|screen| screen.line(label));
    }

    fn hide_text_prompt(&self) {}

    fn show_main_input(&self) {
        self.draw(|screen| screen.line("Logged in. Use your hotkeys; Ctrl+Q quits."));
    }
}
