use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

/// Operating systems with a known sound player and notification tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Linux,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// Commands able to play `path`, in order of preference.
    pub fn sound_commands(self, path: &Path) -> Vec<Command> {
        match self {
            Platform::MacOs => {
                let mut afplay = Command::new("afplay");
                afplay.arg(path);
                vec![afplay]
            },
            Platform::Linux => {
                let mut paplay = Command::new("paplay");
                paplay.arg(path);
                let mut aplay = Command::new("aplay");
                aplay.arg("-q").arg(path);
                vec![paplay, aplay]
            },
            Platform::Windows => {
                let script = format!(
                    "(New-Object Media.SoundPlayer '{}').PlaySync()",
                    powershell_quote(&path.to_string_lossy())
                );
                vec![powershell(&script)]
            },
        }
    }

    pub fn notification_command(self, title: &str, message: &str) -> Command {
        match self {
            Platform::MacOs => {
                let script = format!(
                    "display notification \"{}\" with title \"{}\"",
                    applescript_quote(message),
                    applescript_quote(title)
                );
                let mut command = Command::new("osascript");
                command.arg("-e").arg(script);
                command
            },
            Platform::Linux => {
                let mut command = Command::new("notify-send");
                command.arg("--app-name=OpenCode").arg(title).arg(message);
                command
            },
            Platform::Windows => {
                let script = format!(
                    "Add-Type -AssemblyName System.Windows.Forms; \
                     $n = New-Object System.Windows.Forms.NotifyIcon; \
                     $n.Icon = [System.Drawing.SystemIcons]::Information; \
                     $n.Visible = $true; \
                     $n.ShowBalloonTip(5000, '{}', '{}', 'Info'); \
                     Start-Sleep -Seconds 5; $n.Dispose()",
                    powershell_quote(title),
                    powershell_quote(message)
                );
                powershell(&script)
            },
        }
    }
}

fn powershell(script: &str) -> Command {
    let mut command = Command::new("powershell");
    command.args(["-NoProfile", "-NonInteractive", "-Command", script]);
    command
}

fn applescript_quote(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn powershell_quote(text: &str) -> String {
    text.replace('\'', "''")
}

/// Executes platform commands.
pub trait CommandRunner {
    fn run(&self, command: Command) -> io::Result<()>;
}

/// Runs commands for real, waiting for them to exit.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, mut command: Command) -> io::Result<()> {
        let status = command.stdin(Stdio::null()).stdout(Stdio::null()).status()?;
        if status.success() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{:?} exited with {status}", command.get_program()),
            ))
        }
    }
}
