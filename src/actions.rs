use std::io::Write;
use std::process::{Command, Stdio};

// ---------------------------------------------------------------------------
// Open in browser
// ---------------------------------------------------------------------------

/// Open a URL in the default browser.
pub(crate) fn open_in_browser(url: &str) -> Result<(), String> {
    let result = if cfg!(target_os = "macos") {
        Command::new("open").arg(url).status()
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", "", url]).status()
    } else {
        Command::new("xdg-open").arg(url).status()
    };

    match result {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(format!("Browser command exited with {status}")),
        Err(e) => Err(format!("Failed to open browser: {e}")),
    }
}

// ---------------------------------------------------------------------------
// Clipboard
// ---------------------------------------------------------------------------

/// Copy text to the system clipboard.
pub(crate) fn copy_to_clipboard(text: &str) -> Result<(), String> {
    let result = if cfg!(target_os = "macos") {
        pipe_to("pbcopy", &[], text)
    } else if cfg!(target_os = "windows") {
        pipe_to("clip", &[], text)
    } else {
        // Try xclip first, fall back to xsel.
        pipe_to("xclip", &["-selection", "clipboard"], text)
            .or_else(|_| pipe_to("xsel", &["--clipboard", "--input"], text))
    };

    match result {
        Ok(status) if status.success() => Ok(()),
        Ok(status) => Err(format!("Clipboard command exited with {status}")),
        Err(e) => Err(format!("Failed to run clipboard command: {e}")),
    }
}

fn pipe_to(program: &str, args: &[&str], text: &str) -> std::io::Result<std::process::ExitStatus> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .spawn()?;
    if let Some(stdin) = child.stdin.as_mut() {
        stdin.write_all(text.as_bytes())?;
    }
    child.wait()
}
