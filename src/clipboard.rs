use std::io::Write;
use std::process::{Command, Stdio};

/// Copy text to the system clipboard by piping it through the platform
/// clipboard tool.
pub fn copy_text(text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (cmd, args) = clipboard_tool();

    let mut child = Command::new(cmd)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| format!("Failed to spawn {cmd}: {e}"))?;

    if let Some(ref mut stdin) = child.stdin {
        stdin.write_all(text.as_bytes())?;
    }

    let status = child.wait()?;
    if !status.success() {
        return Err(format!("{cmd} exited with status {status}").into());
    }

    Ok(())
}

#[cfg(target_os = "macos")]
fn clipboard_tool() -> (&'static str, &'static [&'static str]) {
    ("pbcopy", &[])
}

/// wl-copy on Wayland sessions, xclip everywhere else.
#[cfg(target_os = "linux")]
fn clipboard_tool() -> (&'static str, &'static [&'static str]) {
    if std::env::var("XDG_SESSION_TYPE").as_deref() == Ok("wayland") {
        ("wl-copy", &[])
    } else {
        ("xclip", &["-selection", "clipboard"])
    }
}
