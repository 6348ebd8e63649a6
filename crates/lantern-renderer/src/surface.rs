//! Redraw primitives.
//!
//! A [`Surface`] repaints a multi-line region in place. [`TermSurface`] does
//! it on a real terminal; [`MemorySurface`] records every call for tests.

use console::{Term, measure_text_width};
use core::mem;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// In-place multi-line redraw target
pub trait Surface: Send + 'static {
    /// Hides the cursor
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be written.
    fn hide_cursor(&mut self) -> io::Result<()>;

    /// Shows the cursor
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be written.
    fn show_cursor(&mut self) -> io::Result<()>;

    /// Replaces the previously drawn region with `lines`
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be written.
    fn draw(&mut self, lines: &[String]) -> io::Result<()>;

    /// Erases the previously drawn region
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be written.
    fn clear(&mut self) -> io::Result<()>;

    /// Leaves the drawn region in place; the next draw starts below it
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be written.
    fn done(&mut self) -> io::Result<()>;

    /// Width in columns used to clip lines, `None` when unknown
    fn width(&self) -> Option<usize>;
}

/// Physical rows occupied by the last drawn frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrawnRegion {
    rows: usize,
}

impl DrawnRegion {
    /// Records a frame drawn as `text`, soft-wrapped at `width`
    pub fn drawn(&mut self, text: &str, width: Option<usize>) {
        self.rows = physical_rows(text, width);
    }

    /// Rows to erase before the next draw; the region is empty afterwards
    pub fn take(&mut self) -> usize {
        mem::take(&mut self.rows)
    }

    /// Leaves the frame on screen so the next draw starts below it
    pub fn release(&mut self) {
        self.rows = 0;
    }
}

/// Log-update style redraw on stdout.
///
/// When the target is not a terminal, frames are held back and only the
/// last one is written by [`Surface::done`].
#[derive(Debug)]
pub struct TermSurface {
    term: Term,
    region: DrawnRegion,
    held: Option<Vec<String>>,
}

impl TermSurface {
    /// Draws on stdout
    pub fn stdout() -> Self {
        Self::new(Term::buffered_stdout())
    }

    /// Draws on the given terminal handle
    pub fn new(term: Term) -> Self {
        Self {
            term,
            region: DrawnRegion::default(),
            held: None,
        }
    }

    /// Whether frames are redrawn in place rather than held until `done`
    pub fn is_interactive(&self) -> bool {
        self.term.is_term()
    }

    fn erase(&mut self) -> io::Result<()> {
        let rows = self.region.take();
        if rows > 0 {
            self.term.clear_last_lines(rows)?;
        }
        Ok(())
    }

    fn write_lines(&self, lines: &[String]) -> io::Result<String> {
        let text = lines.join("\n");
        for line in text.split('\n') {
            self.term.write_line(line)?;
        }
        Ok(text)
    }
}

impl Surface for TermSurface {
    fn hide_cursor(&mut self) -> io::Result<()> {
        if self.is_interactive() {
            self.term.hide_cursor()?;
        }
        self.term.flush()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        if self.is_interactive() {
            self.term.show_cursor()?;
        }
        self.term.flush()
    }

    fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        if !self.is_interactive() {
            self.held = Some(lines.to_vec());
            return Ok(());
        }
        self.erase()?;
        if !lines.is_empty() {
            let width = self.width();
            let text = self.write_lines(lines)?;
            self.region.drawn(&text, width);
        }
        self.term.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        self.held = None;
        self.erase()?;
        self.term.flush()
    }

    fn done(&mut self) -> io::Result<()> {
        self.region.release();
        if let Some(lines) = self.held.take()
            && !lines.is_empty()
        {
            self.write_lines(&lines)?;
        }
        self.term.flush()
    }

    fn width(&self) -> Option<usize> {
        self.term
            .size_checked()
            .map(|(_rows, columns)| usize::from(columns))
    }
}

/// Number of terminal rows `text` occupies once soft-wrapped at `width`
pub fn physical_rows(text: &str, width: Option<usize>) -> usize {
    text.split('\n')
        .map(|line| match width {
            Some(columns) if columns > 0 => measure_text_width(line).div_ceil(columns).max(1),
            _ => 1,
        })
        .sum()
}

/// Everything a [`MemorySurface`] has been asked to do
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SurfaceRecord {
    /// Every drawn frame, in order
    pub frames: Vec<Vec<String>>,
    /// Calls to `hide_cursor`
    pub hidden: usize,
    /// Calls to `show_cursor`
    pub shown: usize,
    /// Calls to `clear`
    pub cleared: usize,
    /// Calls to `done`
    pub finalized: usize,
}

/// Surface recording calls in memory; clones share the record
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    record: Arc<Mutex<SurfaceRecord>>,
    width: Option<usize>,
    fail_draws: bool,
}

impl MemorySurface {
    /// Creates an unbounded surface
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a surface reporting `width` columns
    pub fn with_width(width: usize) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    /// Creates a surface whose draws fail, as on a closed terminal
    pub fn failing() -> Self {
        Self {
            fail_draws: true,
            ..Self::default()
        }
    }

    /// Copy of everything recorded so far
    pub fn record(&self) -> SurfaceRecord {
        self.lock().clone()
    }

    /// Most recently drawn frame
    pub fn last_frame(&self) -> Option<Vec<String>> {
        self.lock().frames.last().cloned()
    }

    /// Number of drawn frames
    pub fn draw_count(&self) -> usize {
        self.lock().frames.len()
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceRecord> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Surface for MemorySurface {
    fn hide_cursor(&mut self) -> io::Result<()> {
        self.lock().hidden += 1;
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.lock().shown += 1;
        Ok(())
    }

    fn draw(&mut self, lines: &[String]) -> io::Result<()> {
        if self.fail_draws {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "surface closed"));
        }
        self.lock().frames.push(lines.to_vec());
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.lock().cleared += 1;
        Ok(())
    }

    fn done(&mut self) -> io::Result<()> {
        self.lock().finalized += 1;
        Ok(())
    }

    fn width(&self) -> Option<usize> {
        self.width
    }
}
