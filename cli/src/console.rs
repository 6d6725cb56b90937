//! Terminal I/O for the narrative modes
//!
//! Generic over any `BufRead` input and `Write` output so sessions can be
//! scripted in tests. Every pause, including the per-character typing delay,
//! goes through the shared clock.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use elevator_sim_core_rs::SharedClock;

/// Typing speed for titles
pub const TITLE_DELAY: Duration = Duration::from_millis(50);
/// Typing speed for story text
pub const STORY_DELAY: Duration = Duration::from_millis(30);
/// Typing speed for status and travel lines
pub const TRAVEL_DELAY: Duration = Duration::from_millis(20);

const RULE_WIDTH: usize = 60;

pub struct Console<R, W> {
    input: R,
    output: W,
    clock: SharedClock,
    typing: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, clock: SharedClock) -> Self {
        Self {
            input,
            output,
            clock,
            typing: true,
        }
    }

    /// Print whole lines at once instead of character by character
    pub fn without_typing(mut self) -> Self {
        self.typing = false;
        self
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `text` one character at a time, then a newline
    pub fn print_slow(&mut self, text: &str, delay: Duration) -> io::Result<()> {
        if !self.typing {
            return self.line(text);
        }
        for ch in text.chars() {
            write!(self.output, "{}", ch)?;
            self.output.flush()?;
            self.clock.sleep(delay);
        }
        writeln!(self.output)
    }

    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{}", text)?;
        self.output.flush()
    }

    /// Horizontal separator
    pub fn rule(&mut self) -> io::Result<()> {
        self.line(&"=".repeat(RULE_WIDTH))
    }

    /// Title framed by separators
    pub fn banner(&mut self, title: &str) -> io::Result<()> {
        self.line("")?;
        self.rule()?;
        self.print_slow(title, TITLE_DELAY)?;
        self.rule()
    }

    pub fn pause(&self, duration: Duration) {
        self.clock.sleep(duration);
    }

    /// Prompt and read one trimmed line; `None` at end of input
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim().to_string()))
    }

    /// Wait for Enter; `false` at end of input
    pub fn wait_for_enter(&mut self, prompt: &str) -> io::Result<bool> {
        Ok(self.read_line(prompt)?.is_some())
    }

    /// Numbered menu; returns the 1-based choice, re-prompting until valid
    pub fn choose(&mut self, prompt: &str, options: &[&str]) -> io::Result<Option<usize>> {
        loop {
            self.line("")?;
            self.line(prompt)?;
            for (i, option) in options.iter().enumerate() {
                self.line(&format!("{}. {}", i + 1, option))?;
            }

            let prompt = format!("\nEnter your choice (1-{}): ", options.len());
            let Some(answer) = self.read_line(&prompt)? else {
                return Ok(None);
            };
            match answer.parse::<usize>() {
                Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(Some(choice)),
                Ok(_) => self.line("Invalid choice. Please try again.")?,
                Err(_) => self.line("Please enter a number.")?,
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::{scripted, transcript};
    use super::*;
    use elevator_sim_core_rs::{Clock, SimulatedClock};

    #[test]
    fn test_print_slow_waits_per_character() {
        let clock = SimulatedClock::new();
        let mut console = scripted("", &clock);

        console.print_slow("ding", TRAVEL_DELAY).unwrap();

        assert_eq!(clock.elapsed_ms(), 80);
        assert_eq!(transcript(console), "ding\n");
    }

    #[test]
    fn test_without_typing_does_not_sleep() {
        let clock = SimulatedClock::new();
        let mut console = scripted("", &clock).without_typing();

        console.print_slow("ding", TRAVEL_DELAY).unwrap();

        assert_eq!(clock.sleep_count(), 0);
    }

    #[test]
    fn test_read_line_trims_and_reports_eof() {
        let clock = SimulatedClock::new();
        let mut console = scripted("  7 \n", &clock);

        assert_eq!(console.read_line("> ").unwrap().as_deref(), Some("7"));
        assert_eq!(console.read_line("> ").unwrap(), None);
    }

    #[test]
    fn test_choose_reprompts_until_valid() {
        let clock = SimulatedClock::new();
        let mut console = scripted("abc\n9\n2\n", &clock).without_typing();

        let choice = console.choose("Pick", &["one", "two"]).unwrap();

        assert_eq!(choice, Some(2));
        let out = transcript(console);
        assert!(out.contains("Please enter a number."));
        assert!(out.contains("Invalid choice. Please try again."));
        assert!(out.contains("2. two"));
    }

    #[test]
    fn test_choose_eof_is_none() {
        let clock = SimulatedClock::new();
        let mut console = scripted("x\n", &clock).without_typing();
        assert_eq!(console.choose("Pick", &["one"]).unwrap(), None);
    }
}
