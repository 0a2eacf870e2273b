use std::io::{IsTerminal, Write};
use std::time::Duration;

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use tokio::time::Instant;

use crate::stress::CancellationSignal;

const PROGRESS_BAR_WIDTH: usize = 30;
const PROGRESS_TICK: Duration = Duration::from_millis(250);

/// Renders an elapsed/target bar on stderr until `signal` is set.
///
/// Does nothing when stderr is not a terminal.
pub(crate) fn setup_progress_indicator(
    target: Duration,
    no_color: bool,
    signal: CancellationSignal,
) -> tokio::task::JoinHandle<()> {
    let run_start = Instant::now();
    let goal_secs = target.as_secs().max(1);
    let style = ProgressStyle::new(PROGRESS_BAR_WIDTH);

    tokio::spawn(async move {
        if !std::io::stderr().is_terminal() {
            return;
        }

        let mut ticker = tokio::time::interval(PROGRESS_TICK);

        loop {
            tokio::select! {
                _ = signal.cancelled() => {
                    let elapsed_ms = run_start.elapsed().as_millis();
                    if render_progress_line(&style, goal_secs, elapsed_ms, no_color).is_err() {
                        break;
                    }
                    drop(finish_progress_line());
                    break;
                }
                _ = ticker.tick() => {
                    let elapsed_ms = run_start.elapsed().as_millis();
                    if render_progress_line(&style, goal_secs, elapsed_ms, no_color).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

fn render_progress_line(
    style: &ProgressStyle,
    goal_secs: u64,
    elapsed_ms: u128,
    no_color: bool,
) -> Result<(), std::io::Error> {
    let line = build_progress_line(style, goal_secs, elapsed_ms, no_color);

    let mut out = std::io::stderr();
    queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    for segment in line {
        match segment.color {
            Some(color) if !no_color => queue!(
                out,
                SetForegroundColor(color),
                Print(&segment.text),
                ResetColor
            )?,
            Some(_) | None => queue!(out, Print(&segment.text))?,
        }
    }
    out.flush()?;
    Ok(())
}

fn finish_progress_line() -> Result<(), std::io::Error> {
    let mut out = std::io::stderr();
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

fn build_progress_line(
    style: &ProgressStyle,
    goal_secs: u64,
    elapsed_ms: u128,
    no_color: bool,
) -> Vec<ProgressSegment> {
    let size = style.size.max(1);
    let goal_ms = u128::from(goal_secs.max(1)).saturating_mul(1000);
    let elapsed_ms = elapsed_ms.min(goal_ms);
    let size_u128 = u128::from(u64::try_from(size).unwrap_or(u64::MAX));

    let scaled = elapsed_ms
        .saturating_mul(size_u128)
        .checked_div(goal_ms)
        .unwrap_or(0);
    let complete_size = usize::try_from(scaled).unwrap_or(size).min(size);
    let incomplete_size = size.saturating_sub(complete_size);

    let percent = elapsed_ms
        .saturating_mul(100)
        .checked_div(goal_ms)
        .unwrap_or(0);
    let percent_text = format!(" {:>3}%", percent);

    let elapsed_tenths = elapsed_ms.checked_div(100).unwrap_or(0);
    let secs = elapsed_tenths.checked_div(10).unwrap_or(0);
    let tenths = elapsed_tenths.checked_rem(10).unwrap_or(0);
    let time_text = format!(" | {}.{}s / {}s", secs, tenths, goal_secs);

    let progress_bar = format!(
        "Running {}{}{}{}",
        style.begin,
        style.fill.repeat(complete_size),
        style.empty.repeat(incomplete_size),
        style.end
    );

    if no_color {
        vec![
            ProgressSegment::plain(progress_bar),
            ProgressSegment::plain(percent_text),
            ProgressSegment::plain(time_text),
        ]
    } else {
        vec![
            ProgressSegment::plain(progress_bar),
            ProgressSegment::colored(percent_text, Color::Cyan),
            ProgressSegment::colored(time_text, Color::Yellow),
        ]
    }
}

struct ProgressStyle {
    size: usize,
    begin: &'static str,
    end: &'static str,
    fill: &'static str,
    empty: &'static str,
}

impl ProgressStyle {
    const fn new(size: usize) -> Self {
        Self {
            size,
            begin: "[",
            end: "]",
            fill: "#",
            empty: "-",
        }
    }
}

struct ProgressSegment {
    text: String,
    color: Option<Color>,
}

impl ProgressSegment {
    const fn plain(text: String) -> Self {
        Self { text, color: None }
    }

    const fn colored(text: String, color: Color) -> Self {
        Self {
            text,
            color: Some(color),
        }
    }
}
