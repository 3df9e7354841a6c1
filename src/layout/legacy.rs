//! A line-based, non-interactive layout. The "original".
//!
//! One row per host inside the alternate screen buffer, redrawn at half the
//! probing interval: padded label, five fixed-width statistics columns, then a
//! color-coded glyph strip of recent results. Rows beyond the screen height
//! collapse into a `+N more` trailer until the final summary, which always
//! shows every host.

use crate::error::Result;
use crate::host::Host;
use crate::layout::color::glyph_strip;
use crate::layout::Layout;
use crate::terminal::{
    SystemTerminal, Terminal, TerminalSize, CLEAR_TO_LINE_END, CLEAR_TO_SCREEN_END, CURSOR_HOME,
    ENTER_ALTERNATE_SCREEN, EXIT_ALTERNATE_SCREEN,
};
use async_trait::async_trait;
use std::future::{poll_fn, Future};
use std::io::{self, Stdout, Write};
use std::pin::Pin;
use std::sync::Arc;
use std::task::Poll;
use std::time::Duration;
use tokio::signal;
use tokio::time;

// Columns reserved for the statistics fields: min, avg, max, stdev, pktloss,
// 8 characters each including the separator. Must change in lockstep with the
// fields rendered in `format_host`.
const STATS_WIDTH: usize = 8 * 5;

/// The line-based layout, generic over its terminal and output sink so tests
/// can substitute fakes for both.
pub struct LegacyLayout<T = SystemTerminal, W = Stdout> {
    terminal: T,
    out: W,
}

impl LegacyLayout {
    /// Layout driving the process's controlling terminal through stdout.
    pub fn new() -> Self {
        Self {
            terminal: SystemTerminal,
            out: io::stdout(),
        }
    }
}

impl Default for LegacyLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Terminal, W: Write + Send> LegacyLayout<T, W> {
    /// Layout over an explicit terminal and output sink.
    pub fn with_parts(terminal: T, out: W) -> Self {
        Self { terminal, out }
    }

    /// Run the display session, ending early when `interrupt` completes.
    ///
    /// The interrupt future is polled once before the alternate screen buffer
    /// is entered. For a signal listener that first poll installs the OS
    /// handler, so no interrupt window exists while the buffer is active; an
    /// interrupt that already fired skips straight to the final summary.
    pub async fn run_with_interrupt<F>(
        &mut self,
        hosts: &[Arc<dyn Host>],
        interval: Duration,
        interrupt: F,
    ) -> Result<()>
    where
        F: Future + Send,
    {
        tokio::pin!(interrupt);

        let mut interrupted = false;
        poll_fn(|cx| {
            interrupted = interrupt.as_mut().poll(cx).is_ready();
            Poll::Ready(())
        })
        .await;

        self.out.write_all(ENTER_ALTERNATE_SCREEN.as_bytes())?;

        let outcome = if interrupted {
            Ok(())
        } else {
            self.redraw_loop(hosts, interval, &mut interrupt).await
        };

        // The alternate buffer must be released on every exit path. A loop
        // failure takes precedence over any cleanup failure; cleanup errors
        // surface only on a clean loop exit.
        let cleanup = self.exit_and_summarize(hosts);
        outcome.and(cleanup)
    }

    async fn redraw_loop<F>(
        &mut self,
        hosts: &[Arc<dyn Host>],
        interval: Duration,
        interrupt: &mut Pin<&mut F>,
    ) -> Result<()>
    where
        F: Future + Send,
    {
        // Redraw at twice the probing rate so fresh results never wait a full
        // interval to appear
        let delay = interval / 2;

        while hosts.iter().any(|host| host.is_running()) {
            // Size is queried fresh each cycle; the terminal may have been resized
            let size = self.terminal.size()?;
            self.out.write_all(CURSOR_HOME.as_bytes())?;
            self.out
                .write_all(build_table(hosts, size, false).as_bytes())?;
            self.out.flush()?;

            tokio::select! {
                _ = interrupt.as_mut() => {
                    log::debug!("interrupt received, leaving redraw loop");
                    break;
                }
                _ = time::sleep(delay) => {}
            }
        }

        Ok(())
    }

    /// Leave the alternate screen buffer and print the last summary, including
    /// any hosts that overflowed the live view.
    fn exit_and_summarize(&mut self, hosts: &[Arc<dyn Host>]) -> Result<()> {
        self.out.write_all(EXIT_ALTERNATE_SCREEN.as_bytes())?;
        let size = self.terminal.size()?;
        self.out
            .write_all(build_table(hosts, size, true).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}

#[async_trait]
impl<T: Terminal, W: Write + Send> Layout for LegacyLayout<T, W> {
    async fn run(&mut self, hosts: &[Arc<dyn Host>], interval: Duration) -> Result<()> {
        // One Ctrl-C listener for the whole session, registered before the
        // alternate buffer is entered; a press between redraws is not lost.
        // Should the listener itself fail, the session just runs until every
        // host stops.
        self.run_with_interrupt(hosts, interval, async {
            if let Err(err) = signal::ctrl_c().await {
                log::warn!("interrupt listener unavailable: {err}");
                std::future::pending::<()>().await;
            }
        })
        .await
    }
}

/// Build a table (string) of the hosts' results.
///
/// With `show_all` false the table is bounded by the terminal height, and
/// overflowing hosts collapse into a `+N more` trailer. Each row ends with a
/// clear-to-end-of-line code, and the table ends with a single
/// clear-to-end-of-screen code so stale output from a previous (taller) frame
/// never survives.
pub fn build_table(hosts: &[Arc<dyn Host>], size: TerminalSize, show_all: bool) -> String {
    let mut table = String::new();

    let padding = hosts
        .iter()
        .map(|host| host.rendered_label().chars().count())
        .max()
        .map(|longest| longest + 1)
        .unwrap_or(0);

    let line_limit = (size.lines as usize).saturating_sub(1);

    for (index, host) in hosts.iter().enumerate() {
        // Not printing all hosts and lines limit reached
        if !show_all && index >= line_limit {
            break;
        }

        table.push_str(&format_host(host.as_ref(), padding, size.columns));
        table.push_str(CLEAR_TO_LINE_END);
        table.push('\n');
    }

    table.push_str(CLEAR_TO_SCREEN_END);

    // Not printing all hosts and some hosts overflowed
    if !show_all && hosts.len() > line_limit {
        let overflow = hosts.len() - line_limit;
        table.push_str(&format!("+{} more", overflow));
    }

    table
}

/// Render one host's summary line.
fn format_host(host: &dyn Host, padding: usize, line_width: u16) -> String {
    // Whatever is left after the label and statistics columns is the glyph
    // budget; the host trims its history to fit
    let strip_budget = (line_width as usize).saturating_sub(padding + STATS_WIDTH);
    host.set_results_length(strip_budget);

    let mut line = format!("{:<padding$}", host.rendered_label());

    if let Some(status) = host.status() {
        line.push_str("   ");
        line.push_str(&status);
        return line;
    }

    let summary = host.results_summary();
    for stat in [summary.min, summary.avg, summary.max, summary.stdev] {
        match stat {
            Some(value) => line.push_str(&format!(" {:>7.2}", value)),
            None => line.push_str("     -  "),
        }
    }

    match summary.pktloss {
        Some(pktloss) => {
            let percent = format!("{:.0}%", pktloss * 100.0);
            line.push_str(&format!(" {:>5}  ", percent));
        }
        None => line.push_str("    -   "),
    }

    line.push_str(&glyph_strip(&host.results()));
    line
}
