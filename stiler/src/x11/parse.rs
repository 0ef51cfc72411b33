//! Parsers for the text printed by `wmctrl`, `xprop` and `xwininfo`.

use anyhow::Result;
use stiler_layout::WindowFrame;

use crate::core::{DesktopId, ScreenSnapshot, WindowEnumeration, WindowId};
use crate::error::StilerError;

const WINDOW_TYPE_PREFIX: &str = "_NET_WM_WINDOW_TYPE_";

fn malformed(program: &str, what: &str, output: &str) -> anyhow::Error {
    StilerError::external(
        program,
        format!("unexpected {} output: {:?}", what, output.trim()),
    )
    .into()
}

fn field<'a>(output: &'a str, key: &str) -> Option<&'a str> {
    output
        .lines()
        .find_map(|line| line.trim().strip_prefix(key))
        .map(str::trim)
}

fn parse_pair<T: std::str::FromStr>(s: &str, separator: char) -> Option<(T, T)> {
    let (a, b) = s.split_once(separator)?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

/// Parses `wmctrl -d`, returning the desktop marked active.
///
/// ```text
/// 0  * DG: 3840x1080  VP: 0,0  WA: 0,27 3840x1053  Workspace 1
/// ```
pub fn parse_desktops(output: &str) -> Result<ScreenSnapshot> {
    let line = output
        .lines()
        .find(|line| line.split_whitespace().nth(1) == Some("*"))
        .ok_or_else(|| malformed("wmctrl", "desktop", output))?;

    let fields: Vec<&str> = line.split_whitespace().collect();
    let active_desktop: DesktopId = fields[0]
        .parse()
        .map_err(|_| malformed("wmctrl", "desktop", line))?;
    let (origin_x, origin_y) = fields
        .get(7)
        .and_then(|f| parse_pair(f, ','))
        .ok_or_else(|| malformed("wmctrl", "work area origin", line))?;
    let (width, height) = fields
        .get(8)
        .and_then(|f| parse_pair(f, 'x'))
        .ok_or_else(|| malformed("wmctrl", "work area size", line))?;

    Ok(ScreenSnapshot {
        active_desktop,
        origin_x,
        origin_y,
        width,
        height,
    })
}

/// Parses `wmctrl -lG` into windows per desktop, keeping listing order.
///
/// ```text
/// 0x03a00003  0 1234 27   800  600  host Terminal
/// ```
pub fn parse_window_list(output: &str) -> Result<WindowEnumeration> {
    let mut windows = WindowEnumeration::new();
    for line in output.lines().filter(|line| !line.trim().is_empty()) {
        let mut fields = line.split_whitespace();
        let id: WindowId = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or_else(|| malformed("wmctrl", "window list", line))?;
        let desktop: DesktopId = fields
            .next()
            .and_then(|f| f.parse().ok())
            .ok_or_else(|| malformed("wmctrl", "window list", line))?;
        windows.entry(desktop).or_default().push(id);
    }
    Ok(windows)
}

/// Parses `xprop -root _NET_ACTIVE_WINDOW`. `None` when nothing has focus.
///
/// Some window managers append a second id (`# 0x3a00003, 0x0`); only the
/// first one is the active window.
pub fn parse_active_window(output: &str) -> Option<WindowId> {
    let (_, ids) = output.split_once('#')?;
    let first = ids.split(',').next()?.trim();
    let id: WindowId = first.parse().ok()?;
    (id.raw() != 0).then_some(id)
}

/// Window type suffix from `xprop -id <w> _NET_WM_WINDOW_TYPE`, e.g. `NORMAL`.
pub fn parse_window_type(output: &str) -> Option<String> {
    let (_, atoms) = output.split_once('=')?;
    let first = atoms.split(',').next()?.trim();
    let kind = first.strip_prefix(WINDOW_TYPE_PREFIX).unwrap_or(first);
    (!kind.is_empty()).then(|| kind.to_string())
}

/// Window state from `xprop -id <w> WM_STATE`, e.g. `Normal` or `Iconic`.
pub fn parse_window_state(output: &str) -> Option<String> {
    field(output, "window state:").map(str::to_string)
}

pub fn is_tileable(window_type: Option<&str>, window_state: Option<&str>) -> bool {
    let bad_type = matches!(window_type, Some("UTILITY" | "DESKTOP" | "DOCK"));
    let iconic = window_state == Some("Iconic");
    !bad_type && !iconic
}

/// Parses `xwininfo -id <w>` into the window's frame.
pub fn parse_frame(output: &str) -> Result<WindowFrame> {
    let width: Option<u32> = field(output, "Width:").and_then(|v| v.parse().ok());
    let height: Option<u32> = field(output, "Height:").and_then(|v| v.parse().ok());
    // First corner is the upper left one, printed as +x+y
    let corner = field(output, "Corners:")
        .and_then(|v| v.split_whitespace().next())
        .and_then(|c| c.strip_prefix('+'))
        .and_then(|c| parse_pair::<i32>(c, '+'));

    match (width, height, corner) {
        (Some(width), Some(height), Some((x, y))) => Ok(WindowFrame {
            x,
            y,
            width,
            height,
        }),
        _ => Err(malformed("xwininfo", "window info", output)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DESKTOPS: &str = "\
0  - DG: 3840x1080  VP: N/A  WA: 0,27 3840x1053  Mail
1  * DG: 3840x1080  VP: 0,0  WA: 0,27 3840x1053  Code
2  - DG: 3840x1080  VP: N/A  WA: 0,27 3840x1053  Web
";

    #[test]
    fn test_parse_desktops_active() {
        let screen = parse_desktops(DESKTOPS).unwrap();
        assert_eq!(
            screen,
            ScreenSnapshot {
                active_desktop: 1,
                origin_x: 0,
                origin_y: 27,
                width: 3840,
                height: 1053,
            }
        );
    }

    #[test]
    fn test_parse_desktops_without_active() {
        let err = parse_desktops("0  - DG: 800x600  VP: 0,0  WA: 0,0 800x600  One").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StilerError>(),
            Some(StilerError::ExternalQuery { .. })
        ));
    }

    #[test]
    fn test_parse_window_list() {
        let output = "\
0x03a00003  1 10   37   800  600  host Terminal
0x04200007  0 0    27   1920 1053 host Mail
0x03c0000a  1 900  37   800  600  host Editor with spaces
0x01e00004 -1 0    0    3840 27   host panel
";
        let windows = parse_window_list(output).unwrap();
        assert_eq!(
            windows.get(&1),
            Some(&vec![WindowId::new(0x3a00003), WindowId::new(0x3c0000a)])
        );
        assert_eq!(windows.get(&0), Some(&vec![WindowId::new(0x4200007)]));
        assert_eq!(windows.get(&-1), Some(&vec![WindowId::new(0x1e00004)]));
    }

    #[test]
    fn test_parse_window_list_malformed() {
        assert!(parse_window_list("garbage line").is_err());
        assert!(parse_window_list("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_active_window() {
        assert_eq!(
            parse_active_window("_NET_ACTIVE_WINDOW(WINDOW): window id # 0x3a00003\n"),
            Some(WindowId::new(0x3a00003))
        );
        assert_eq!(
            parse_active_window("_NET_ACTIVE_WINDOW(WINDOW): window id # 0x0"),
            None
        );
        assert_eq!(parse_active_window("_NET_ACTIVE_WINDOW:  not found."), None);
    }

    #[test]
    fn test_parse_active_window_with_trailing_id() {
        assert_eq!(
            parse_active_window("_NET_ACTIVE_WINDOW(WINDOW): window id # 0x3a00003, 0x0\n"),
            Some(WindowId::new(0x3a00003))
        );
        assert_eq!(
            parse_active_window("_NET_ACTIVE_WINDOW(WINDOW): window id # 0x0, 0x0\n"),
            None
        );
    }

    #[test]
    fn test_parse_window_type() {
        assert_eq!(
            parse_window_type("_NET_WM_WINDOW_TYPE(ATOM) = _NET_WM_WINDOW_TYPE_NORMAL\n").as_deref(),
            Some("NORMAL")
        );
        assert_eq!(
            parse_window_type(
                "_NET_WM_WINDOW_TYPE(ATOM) = _NET_WM_WINDOW_TYPE_DOCK, _NET_WM_WINDOW_TYPE_NORMAL"
            )
            .as_deref(),
            Some("DOCK")
        );
        assert_eq!(parse_window_type("_NET_WM_WINDOW_TYPE:  not found."), None);
    }

    #[test]
    fn test_parse_window_state() {
        let output = "WM_STATE(WM_STATE):\n\t\twindow state: Iconic\n\t\ticon window: 0x0\n";
        assert_eq!(parse_window_state(output).as_deref(), Some("Iconic"));
        assert_eq!(parse_window_state("WM_STATE:  not found."), None);
    }

    #[test]
    fn test_is_tileable() {
        assert!(is_tileable(Some("NORMAL"), Some("Normal")));
        assert!(is_tileable(None, None));
        assert!(is_tileable(Some("DIALOG"), None));
        assert!(!is_tileable(Some("DOCK"), Some("Normal")));
        assert!(!is_tileable(Some("UTILITY"), None));
        assert!(!is_tileable(Some("DESKTOP"), None));
        assert!(!is_tileable(Some("NORMAL"), Some("Iconic")));
    }

    #[test]
    fn test_parse_frame() {
        let output = "
xwininfo: Window id: 0x3a00003 \"Terminal\"

  Absolute upper-left X:  1234
  Absolute upper-left Y:  37
  Relative upper-left X:  0
  Relative upper-left Y:  0
  Width: 800
  Height: 600
  Depth: 32
  Border width: 0
  Map State: IsViewable
  Corners:  +1234+37  -1806+37  -1806-443  +1234-443
  -geometry 800x600+1234+10
";
        assert_eq!(
            parse_frame(output).unwrap(),
            WindowFrame {
                x: 1234,
                y: 37,
                width: 800,
                height: 600,
            }
        );
    }

    #[test]
    fn test_parse_frame_offscreen_corner() {
        let output = "  Width: 300\n  Height: 200\n  Corners:  +-20+5  -1500+5\n";
        let frame = parse_frame(output).unwrap();
        assert_eq!((frame.x, frame.y), (-20, 5));
    }

    #[test]
    fn test_parse_frame_missing_fields() {
        assert!(parse_frame("xwininfo: error: BadWindow").is_err());
    }
}
