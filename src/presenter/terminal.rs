//! Terminal presenter
//!
//! Renders the instruction text, the countdown and a bar that grows while
//! breathing in, stays full while holding and shrinks while breathing out.
//! Completion is celebrated with a burst of confetti.

use std::io::Write;

use rand::Rng;

use crate::error::PresentError;
use crate::locale::Locale;
use crate::phase::{Phase, Pulse, indicator};

use super::Presenter;

/// Narrowest bar, in cells.
const BAR_MIN: usize = 4;

/// Widest bar, in cells.
const BAR_MAX: usize = 24;

/// Number of confetti particles per burst.
pub const CONFETTI_COUNT: usize = 50;

/// Rows the confetti is spread over.
const CONFETTI_ROWS: usize = 4;

/// Columns the confetti is spread over.
const CONFETTI_WIDTH: usize = 48;

/// Confetti palette.
const CONFETTI_COLORS: [(u8, u8, u8); 5] = [
    (0x8E, 0x80, 0xFF),
    (0xBA, 0xB2, 0xFF),
    (0xFF, 0x5E, 0x1F),
    (0xFF, 0x88, 0x59),
    (0xFF, 0xD1, 0xBE),
];

const CONFETTI_GLYPHS: [char; 5] = ['*', '+', '=', '.', '~'];

/// The phase being displayed.
#[derive(Debug, Clone, Copy)]
struct Showing {
    pulse: Pulse,
    color: (u8, u8, u8),
    duration: u32,
}

/// Human-readable renderer writing to any byte sink.
pub struct TerminalPresenter {
    out: Box<dyn Write + Send>,
    locale: Locale,
    color: bool,
    showing: Option<Showing>,
}

impl TerminalPresenter {
    /// Creates a presenter writing to `out`.
    #[must_use]
    pub fn new(out: Box<dyn Write + Send>, locale: Locale, color: bool) -> Self {
        Self {
            out,
            locale,
            color,
            showing: None,
        }
    }

    /// Creates a presenter writing to stdout.
    #[must_use]
    pub fn stdout(locale: Locale, color: bool) -> Self {
        Self::new(Box::new(std::io::stdout()), locale, color)
    }

    fn paint(&self, text: &str, (r, g, b): (u8, u8, u8)) -> String {
        if self.color {
            format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }

    fn countdown(&mut self, time_left: u32) -> Result<(), PresentError> {
        let Some(showing) = self.showing else {
            return Ok(());
        };
        let elapsed = showing.duration.saturating_sub(time_left);
        let width = showing.pulse.width(elapsed, showing.duration, BAR_MIN, BAR_MAX);
        let bar = self.paint(&"#".repeat(width), showing.color);
        writeln!(self.out, "  {time_left:>2}  {bar}")?;
        self.out.flush()?;
        Ok(())
    }
}

impl Presenter for TerminalPresenter {
    fn on_phase_changed(&mut self, phase: &Phase, time_left: u32) -> Result<(), PresentError> {
        let look = indicator(phase.visual_tag());
        self.showing = Some(Showing {
            pulse: look.pulse,
            color: look.color,
            duration: phase.duration_secs(),
        });

        writeln!(self.out)?;
        for line in phase.label().lines() {
            let painted = self.paint(line, look.color);
            writeln!(self.out, "  {painted}")?;
        }
        self.countdown(time_left)
    }

    fn on_tick(&mut self, time_left: u32) -> Result<(), PresentError> {
        self.countdown(time_left)
    }

    fn on_stopped(&mut self, completed: bool) -> Result<(), PresentError> {
        self.showing = None;
        let prompts = self.locale.prompts();
        writeln!(self.out)?;
        if completed {
            writeln!(self.out, "  {}", prompts.completed)?;
            let rows = confetti(&mut rand::rng(), self.color);
            for row in rows {
                writeln!(self.out, "{}", row.trim_end())?;
            }
        } else {
            writeln!(self.out, "  {}", prompts.click_start)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn on_idle(&mut self) -> Result<(), PresentError> {
        writeln!(self.out, "  {}", self.locale.prompts().click_start)?;
        self.out.flush()?;
        Ok(())
    }

    fn on_farewell(&mut self) -> Result<(), PresentError> {
        writeln!(self.out, "  {}", self.locale.prompts().thank_you)?;
        self.out.flush()?;
        Ok(())
    }

    fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }
}

impl std::fmt::Debug for TerminalPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalPresenter")
            .field("locale", &self.locale)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

/// Scatters [`CONFETTI_COUNT`] particles over a small grid.
///
/// Returns one string per row. Particles landing on the same cell overlap.
pub fn confetti<R: Rng>(rng: &mut R, color: bool) -> Vec<String> {
    let mut grid = vec![vec![None; CONFETTI_WIDTH]; CONFETTI_ROWS];
    for _ in 0..CONFETTI_COUNT {
        let row = rng.random_range(0..CONFETTI_ROWS);
        let col = rng.random_range(0..CONFETTI_WIDTH);
        let glyph = CONFETTI_GLYPHS[rng.random_range(0..CONFETTI_GLYPHS.len())];
        let rgb = CONFETTI_COLORS[rng.random_range(0..CONFETTI_COLORS.len())];
        grid[row][col] = Some((glyph, rgb));
    }

    grid.into_iter()
        .map(|cells| {
            cells
                .into_iter()
                .map(|cell| match cell {
                    Some((glyph, (r, g, b))) if color => {
                        format!("\x1b[38;2;{r};{g};{b}m{glyph}\x1b[0m")
                    }
                    Some((glyph, _)) => glyph.to_string(),
                    None => " ".to_string(),
                })
                .collect()
        })
        .collect()
}
