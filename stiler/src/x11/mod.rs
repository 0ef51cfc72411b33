mod parse;

use std::env;
use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{Context, Result};
use stiler_layout::{Rect, WindowFrame};

use crate::core::{ScreenSnapshot, WindowEnumeration, WindowId};
use crate::error::StilerError;
use crate::system::WindowSystem;

use parse::*;

const REQUIRED_PROGRAMS: [&str; 3] = ["wmctrl", "xprop", "xwininfo"];

/// Talks to the window manager through `wmctrl`, `xprop` and `xwininfo`.
#[derive(Debug, Default)]
pub struct X11;

impl X11 {
    pub fn new() -> Result<Self> {
        check_required_programs()?;
        Ok(Self)
    }

    fn wmctrl(&self, window_id: WindowId, args: &[&str]) -> Result<()> {
        let id = window_id.to_string();
        let mut full_args = vec!["-i", "-r", id.as_str()];
        full_args.extend_from_slice(args);
        run("wmctrl", &full_args)?;
        Ok(())
    }
}

impl WindowSystem for X11 {
    fn screen(&self) -> Result<ScreenSnapshot> {
        parse_desktops(&run("wmctrl", &["-d"])?)
    }

    fn windows(&self) -> Result<WindowEnumeration> {
        parse_window_list(&run("wmctrl", &["-lG"])?)
    }

    fn active_window(&self) -> Result<Option<WindowId>> {
        let active = parse_active_window(&run("xprop", &["-root", "_NET_ACTIVE_WINDOW"])?);
        tracing::debug!("Obtained active window: {:?}", active);
        Ok(active)
    }

    fn is_valid_window(&self, window_id: WindowId) -> Result<bool> {
        let id = window_id.to_string();
        let window_type = parse_window_type(&run("xprop", &["-id", &id, "_NET_WM_WINDOW_TYPE"])?);
        let window_state = parse_window_state(&run("xprop", &["-id", &id, "WM_STATE"])?);
        tracing::debug!(
            "{} is type {:?}, state {:?}",
            window_id,
            window_type,
            window_state
        );
        Ok(is_tileable(window_type.as_deref(), window_state.as_deref()))
    }

    fn frame(&self, window_id: WindowId) -> Result<WindowFrame> {
        parse_frame(&run("xwininfo", &["-id", &window_id.to_string()])?)
    }

    fn move_resize(&mut self, window_id: WindowId, rect: Rect) -> Result<()> {
        tracing::debug!("Moving window {} to {:?}", window_id, rect);

        // Some window managers ignore a combined move and resize, so they
        // are issued separately.
        let size = format!("0,-1,-1,{},{}", rect.width, rect.height);
        let position = format!("0,{},{},-1,-1", rect.x.max(0), rect.y.max(0));

        self.wmctrl(window_id, &["-b", "remove,maximized_vert,maximized_horz"])?;
        self.wmctrl(window_id, &["-e", &size])?;
        self.wmctrl(window_id, &["-e", &position])?;
        self.wmctrl(window_id, &["-b", "remove,hidden,shaded"])?;
        Ok(())
    }

    fn raise(&mut self, window_id: WindowId) -> Result<()> {
        run("wmctrl", &["-i", "-a", &window_id.to_string()])?;
        Ok(())
    }
}

fn run(program: &str, args: &[&str]) -> Result<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .with_context(|| format!("Failed to run {} {}", program, args.join(" ")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(StilerError::external(
            program,
            format!("{} ({})", stderr.trim(), output.status),
        )
        .into());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

fn find_program(program: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| is_executable(&dir.join(program))))
        .unwrap_or(false)
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

pub fn check_required_programs() -> Result<()> {
    let missing: Vec<String> = REQUIRED_PROGRAMS
        .iter()
        .filter(|program| {
            tracing::debug!("Checking for {}", program);
            !find_program(program)
        })
        .map(|program| format!("{} is required but was not found in PATH", program))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(StilerError::Config(missing).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_reports_failure_as_external_query() {
        let err = run("sh", &["-c", "echo broken >&2; exit 3"]).unwrap_err();
        match err.downcast_ref::<StilerError>() {
            Some(StilerError::ExternalQuery { program, message }) => {
                assert_eq!(program, "sh");
                assert!(message.contains("broken"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_run_returns_stdout() {
        assert_eq!(run("sh", &["-c", "printf hello"]).unwrap(), "hello");
    }

    #[test]
    fn test_find_program() {
        assert!(find_program("sh"));
        assert!(!find_program("stiler-definitely-not-installed"));
    }
}
