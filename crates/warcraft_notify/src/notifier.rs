use std::path::{Path, PathBuf};

use log::{debug, warn};
use rand::Rng;

use crate::config::Faction;
use crate::platform::{CommandRunner, Platform};
use crate::sounds::SoundCatalog;

pub const NOTIFICATION_TITLE: &str = "OpenCode";
pub const DEFAULT_MESSAGE: &str = "Work complete! Your session is idle.";

/// What happened while reacting to an idle session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IdleOutcome {
    pub sound: Option<PathBuf>,
    pub played: bool,
    pub notified: bool,
}

/// Plays a faction sound and raises a desktop notification when a session
/// goes idle.
pub struct IdleNotifier<R> {
    catalog: SoundCatalog,
    faction: Faction,
    platform: Platform,
    runner: R,
}

impl<R: CommandRunner> IdleNotifier<R> {
    pub fn new(catalog: SoundCatalog, faction: Faction, platform: Platform, runner: R) -> Self {
        Self { catalog, faction, platform, runner }
    }

    pub fn on_session_idle<G: Rng + ?Sized>(
        &self,
        rng: &mut G,
        summary: Option<&str>,
    ) -> IdleOutcome {
        let mut outcome = IdleOutcome::default();

        match self.catalog.pick(self.faction, rng) {
            Some(sound) => {
                outcome.played = self.play(sound);
                outcome.sound = Some(sound.to_path_buf());
            },
            None => warn!("no {} sounds installed, skipping playback", self.faction.as_str()),
        }

        let message =
            summary.map(str::trim).filter(|text| !text.is_empty()).unwrap_or(DEFAULT_MESSAGE);
        let command = self.platform.notification_command(NOTIFICATION_TITLE, message);
        match self.runner.run(command) {
            Ok(()) => outcome.notified = true,
            Err(err) => warn!("failed to show notification: {err}"),
        }

        outcome
    }

    fn play(&self, sound: &Path) -> bool {
        for command in self.platform.sound_commands(sound) {
            let program = command.get_program().to_string_lossy().into_owned();
            match self.runner.run(command) {
                Ok(()) => {
                    debug!("played {} with {program}", sound.display());
                    return true;
                },
                Err(err) => debug!("{program} could not play {}: {err}", sound.display()),
            }
        }

        warn!("no sound player could play {}", sound.display());
        false
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::fs;
    use std::io;
    use std::process::Command;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    /// Records programs and fails the ones listed.
    #[derive(Default)]
    struct FakeRunner {
        failing: Vec<&'static str>,
        ran: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl CommandRunner for FakeRunner {
        fn run(&self, command: Command) -> io::Result<()> {
            let program = command.get_program().to_string_lossy().into_owned();
            let args = command.get_args().map(|arg| arg.to_string_lossy().into_owned()).collect();
            let fails = self.failing.iter().any(|name| *name == program);
            self.ran.borrow_mut().push((program, args));
            if fails {
                Err(io::Error::new(io::ErrorKind::NotFound, "missing"))
            } else {
                Ok(())
            }
        }
    }

    fn catalog_with(names: &[&str]) -> (tempfile::TempDir, SoundCatalog) {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"RIFF").unwrap();
        }
        let catalog = SoundCatalog::scan(dir.path());
        (dir, catalog)
    }

    #[test]
    fn plays_and_notifies() {
        let (_dir, catalog) = catalog_with(&["horde/peon_work_complete.wav"]);
        let notifier =
            IdleNotifier::new(catalog, Faction::Horde, Platform::Linux, FakeRunner::default());

        let outcome = notifier.on_session_idle(&mut StdRng::seed_from_u64(3), Some("Refactor done"));
        assert!(outcome.played);
        assert!(outcome.notified);
        assert!(outcome.sound.unwrap().ends_with("horde/peon_work_complete.wav"));

        let ran = notifier.runner.ran.borrow();
        assert_eq!(ran.len(), 2);
        assert_eq!(ran[0].0, "paplay");
        assert_eq!(ran[1].1, ["--app-name=OpenCode", "OpenCode", "Refactor done"]);
    }

    #[test]
    fn falls_back_to_next_player() {
        let (_dir, catalog) = catalog_with(&["alliance/peasant_ready.wav"]);
        let runner = FakeRunner { failing: vec!["paplay"], ..FakeRunner::default() };
        let notifier = IdleNotifier::new(catalog, Faction::Both, Platform::Linux, runner);

        let outcome = notifier.on_session_idle(&mut StdRng::seed_from_u64(1), None);
        assert!(outcome.played);
        let programs: Vec<String> =
            notifier.runner.ran.borrow().iter().map(|(program, _)| program.clone()).collect();
        assert_eq!(programs, ["paplay", "aplay", "notify-send"]);
    }

    #[test]
    fn degrades_without_sounds_or_tools() {
        let (_dir, catalog) = catalog_with(&["alliance/peasant_ready.wav"]);
        let runner = FakeRunner { failing: vec!["notify-send"], ..FakeRunner::default() };
        let notifier = IdleNotifier::new(catalog, Faction::Horde, Platform::Linux, runner);

        let outcome = notifier.on_session_idle(&mut StdRng::seed_from_u64(1), Some("   "));
        assert_eq!(outcome, IdleOutcome::default());

        let ran = notifier.runner.ran.borrow();
        assert_eq!(ran.len(), 1);
        assert_eq!(ran[0].1.last().map(String::as_str), Some(DEFAULT_MESSAGE));
    }
}
