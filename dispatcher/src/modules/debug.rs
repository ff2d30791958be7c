use std::collections::VecDeque;
use std::io::{self, stdout, Stdout, Write};

use crossterm::{cursor, terminal, ExecutableCommand};

use dispatcher::Dispatcher;
use shared_resources::event::Event;

const LOG_SIZE: usize = 8;

pub struct Debug {
    stdout: Stdout,
    log: VecDeque<String>,
    printed_lines: u16,
    echoed_lines: u16,
}

impl Debug {
    pub fn new() -> Self {
        Debug {
            stdout: stdout(),
            log: VecDeque::with_capacity(LOG_SIZE),
            printed_lines: 0,
            echoed_lines: 0,
        }
    }

    /// The terminal echoes what the operator typed below the prompt.
    pub fn input_echoed(&mut self) {
        self.echoed_lines += 1;
    }

    pub fn log(&mut self, line: String) {
        if self.log.len() == LOG_SIZE {
            self.log.pop_front();
        }
        self.log.push_back(line);
    }

    /// Everything published before a reset arrives ahead of `Event::Reset`,
    /// so clearing here leaves only post-reset lines.
    pub fn record(&mut self, event: Event) {
        if event == Event::Reset {
            self.log.clear();
        }
        self.log(event.as_string());
    }

    pub fn printstatus(&mut self, dispatcher: &Dispatcher) -> io::Result<()> {
        let height = self.printed_lines + self.echoed_lines;
        if height > 0 {
            self.stdout.execute(cursor::MoveUp(height))?;
        }
        self.stdout.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;

        let statuses = dispatcher.statuses();
        let mut lines: Vec<String> = Vec::new();
        lines.push(String::from("+--------------------------------------+"));
        lines.push(String::from("| ELEVATORS                            |"));
        lines.push(String::from("+------------+------------+------------+"));
        lines.push(format!("| {0:<10} | {1:<10} | {2:<10} |", "ELEVATOR", "FLOOR", "LOAD"));
        for status in &statuses {
            lines.push(String::from("+------------+------------+------------+"));
            lines.push(format!(
                "| {0:<10} | {1:<10} | {2:<10} |",
                status.id,
                status.floor,
                format!("{}/{}", status.load, status.capacity),
            ));
        }
        lines.push(String::from("+------------+------------+------------+"));
        lines.push(format!(
            "| PENDING: {0:<4} DISPATCHED: {1:<4} MOVE: {2:<3}|",
            dispatcher.pending_len(),
            dispatcher.dispatched_count(),
            if dispatcher.has_pending() { "on" } else { "off" },
        ));
        lines.push(String::from("+--------------------------------------+"));
        lines.extend(self.log.iter().cloned());
        lines.push(format!(
            "floor (0-{}), move, reset or quit:",
            dispatcher.num_floors().saturating_sub(1)
        ));

        for line in &lines {
            writeln!(self.stdout, "{}", line)?;
        }
        self.stdout.flush()?;
        self.printed_lines = lines.len() as u16;
        self.echoed_lines = 0;
        Ok(())
    }
}
