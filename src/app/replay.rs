//! Headless replay: run a small input script against the simulated page
//! and produce one trace line per command.
//!
//! ```text
//! # scroll to the hero, scrub through it, let the exit settle
//! scroll 64
//! wheel 40 26
//! wait 700
//! click fees
//! wait 1500
//! ```
//!
//! After every command the clock moves one frame so the page can deliver
//! its scroll event; `wait` keeps stepping frames for the given time.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use super::controller::Page;
use super::state::AppState;
use crate::config::AppConfig;
use crate::core::tabs::TabId;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: `{command}` needs an argument")]
    MissingArgument { line: usize, command: &'static str },
    #[error("line {line}: `{value}` is not a valid number")]
    InvalidNumber { line: usize, value: String },
    #[error("line {line}: unknown tab `{name}`")]
    UnknownTab { line: usize, name: String },
    #[error("cannot read script {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One scripted input.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `count` wheel events of `delta_y` each, one per frame.
    Wheel { delta_y: f64, count: u32 },
    /// Jump the viewport, as a scrollbar drag would.
    Scroll(f64),
    Click(TabId),
    Discover,
    Wait(Duration),
    Resize(f64),
    Dispose,
}

impl Command {
    fn label(&self) -> String {
        match self {
            Command::Wheel { delta_y, count: 1 } => format!("wheel {delta_y}"),
            Command::Wheel { delta_y, count } => format!("wheel {delta_y} x{count}"),
            Command::Scroll(y) => format!("scroll {y}"),
            Command::Click(tab) => format!("click {}", tab.key()),
            Command::Discover => "discover".into(),
            Command::Wait(d) => format!("wait {}", d.as_millis()),
            Command::Resize(px) => format!("resize {px}"),
            Command::Dispose => "dispose".into(),
        }
    }
}

/// Parse a script.  Blank lines and `#` comments are skipped; line numbers
/// in errors are 1-based.
pub fn parse_script(source: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let line = idx + 1;
        let text = raw.split('#').next().unwrap_or("").trim();
        if text.is_empty() {
            continue;
        }
        let mut words = text.split_whitespace();
        let Some(name) = words.next() else {
            continue;
        };
        let args: Vec<&str> = words.collect();
        let arg = |i: usize, command: &'static str| {
            args.get(i)
                .copied()
                .ok_or(ScriptError::MissingArgument { line, command })
        };

        let command = match name.to_ascii_lowercase().as_str() {
            "wheel" => {
                let delta_y = number(arg(0, "wheel")?, line)?;
                let count = match args.get(1) {
                    Some(n) => {
                        let n = n.trim_start_matches(|c| c == 'x' || c == '*');
                        n.parse::<u32>().map_err(|_| ScriptError::InvalidNumber {
                            line,
                            value: n.to_string(),
                        })?
                    }
                    None => 1,
                };
                Command::Wheel { delta_y, count }
            }
            "scroll" => Command::Scroll(number(arg(0, "scroll")?, line)?),
            "click" => {
                let name = arg(0, "click")?;
                let tab = TabId::from_key(name).ok_or_else(|| ScriptError::UnknownTab {
                    line,
                    name: name.to_string(),
                })?;
                Command::Click(tab)
            }
            "discover" => Command::Discover,
            "wait" => {
                let ms = number(arg(0, "wait")?, line)?;
                if ms < 0.0 {
                    return Err(ScriptError::InvalidNumber {
                        line,
                        value: ms.to_string(),
                    });
                }
                Command::Wait(Duration::from_micros((ms * 1000.0).round() as u64))
            }
            "resize" => Command::Resize(number(arg(0, "resize")?, line)?),
            "dispose" => Command::Dispose,
            other => {
                return Err(ScriptError::UnknownCommand {
                    line,
                    command: other.to_string(),
                })
            }
        };
        commands.push(command);
    }
    Ok(commands)
}

fn number(word: &str, line: usize) -> Result<f64, ScriptError> {
    word.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScriptError::InvalidNumber {
            line,
            value: word.to_string(),
        })
}

pub fn load_script(path: &Path) -> Result<Vec<Command>, ScriptError> {
    let source = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_script(&source)
}

// ───────────────────────────────────────── runner ────────────

/// Drives an [`AppState`] through scripted commands on a simulated clock.
pub struct Replay {
    pub state: AppState,
    frame: Duration,
}

impl Replay {
    pub fn new(viewport_height: f64, config: AppConfig) -> Self {
        let frame = Duration::from_millis(config.frame_ms);
        Self {
            state: AppState::new(viewport_height, config),
            frame,
        }
    }

    /// Execute every command and return the trace, headed by the state
    /// right after mount.
    pub fn run(&mut self, commands: &[Command]) -> Vec<String> {
        let mut trace = vec![self.trace_line("mount")];
        for command in commands {
            self.execute(command);
            trace.push(self.trace_line(&command.label()));
        }
        trace
    }

    pub fn execute(&mut self, command: &Command) {
        debug!(command = %command.label(), "replay");
        match *command {
            Command::Wheel { delta_y, count } => {
                for _ in 0..count {
                    self.state.wheel(delta_y);
                    self.step_frame();
                }
                return;
            }
            Command::Scroll(y) => self.state.jump_to(y),
            Command::Click(tab) => self.state.click_tab(tab),
            Command::Discover => self.state.discover(),
            Command::Resize(px) => self.state.resize_viewport(px),
            Command::Dispose => self.state.dispose(),
            Command::Wait(d) => {
                let until = self.state.now + d;
                while self.state.now < until {
                    self.step_frame();
                }
                return;
            }
        }
        self.step_frame();
    }

    fn step_frame(&mut self) {
        let now = self.state.now + self.frame;
        self.state.tick(now);
    }

    fn trace_line(&self, label: &str) -> String {
        let snap = self.state.controller.snapshot();
        format!(
            "{:>6}ms {:<18} y={:<7.1} {:<18} p={:.1} acc={:+.0}{} tab={} {} pending={}",
            self.state.now.as_millis(),
            label,
            self.state.page.scroll_y(),
            snap.hero_state,
            snap.progress.value(),
            snap.accumulator,
            if snap.locked { " locked" } else { "" },
            snap.current_tab.map_or("-", |t| t.key()),
            if snap.docked { "docked" } else { "inline" },
            snap.pending_reveals,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_every_command() {
        let script = "\
            # comment\n\
            wheel 40\n\
            wheel -40 x3\n\
            scroll 64   # trailing comment\n\
            click FEES\n\
            discover\n\
            wait 600\n\
            resize 900\n\
            \n\
            dispose\n";
        let commands = parse_script(script).unwrap();
        assert_eq!(
            commands,
            vec![
                Command::Wheel { delta_y: 40.0, count: 1 },
                Command::Wheel { delta_y: -40.0, count: 3 },
                Command::Scroll(64.0),
                Command::Click(TabId::Fees),
                Command::Discover,
                Command::Wait(Duration::from_millis(600)),
                Command::Resize(900.0),
                Command::Dispose,
            ]
        );
    }

    #[rstest]
    #[case("jump 3", 1, "unknown command")]
    #[case("wheel 40\nwheel", 2, "needs an argument")]
    #[case("\n\nscroll abc", 3, "not a valid number")]
    #[case("click pricing", 1, "unknown tab")]
    #[case("wait -5", 1, "not a valid number")]
    #[case("wheel 40 xx", 1, "not a valid number")]
    fn errors_carry_line_numbers(#[case] script: &str, #[case] line: usize, #[case] msg: &str) {
        let err = parse_script(script).unwrap_err().to_string();
        assert!(err.starts_with(&format!("line {line}:")), "{err}");
        assert!(err.contains(msg), "{err}");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_script(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, ScriptError::Io { .. }));
    }

    #[test]
    fn trace_has_one_line_per_command_plus_mount() {
        let mut replay = Replay::new(800.0, AppConfig::default());
        let trace = replay.run(&parse_script("scroll 64\nwheel 40 x3\nwait 100").unwrap());
        assert_eq!(trace.len(), 4);
        assert!(trace[0].contains("above-hero"));
        assert!(trace[2].contains("in-hero-forward"));
        assert!(trace[2].contains("p=0.3"));
    }

    #[test]
    fn wait_advances_the_clock_in_frames() {
        let mut replay = Replay::new(800.0, AppConfig::default());
        replay.execute(&Command::Wait(Duration::from_millis(100)));
        assert_eq!(replay.state.now, Duration::from_millis(112));
    }
}
