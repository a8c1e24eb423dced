use std::path::{Path, PathBuf};

use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use walkdir::WalkDir;

use crate::config::Faction;

const SOUND_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "aiff"];

/// Sound files available on disk, split by faction folder.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SoundCatalog {
    alliance: Vec<PathBuf>,
    horde: Vec<PathBuf>,
}

impl SoundCatalog {
    /// Collect sounds from `root/alliance` and `root/horde`.
    pub fn scan(root: &Path) -> Self {
        let catalog = Self {
            alliance: scan_folder(&root.join(Faction::Alliance.as_str())),
            horde: scan_folder(&root.join(Faction::Horde.as_str())),
        };
        debug!(
            "found {} alliance and {} horde sounds in {}",
            catalog.alliance.len(),
            catalog.horde.len(),
            root.display()
        );
        catalog
    }

    pub fn is_empty(&self) -> bool {
        self.alliance.is_empty() && self.horde.is_empty()
    }

    pub fn sounds(&self, faction: Faction) -> Vec<&Path> {
        let alliance = matches!(faction, Faction::Alliance | Faction::Both);
        let horde = matches!(faction, Faction::Horde | Faction::Both);
        self.alliance
            .iter()
            .filter(|_| alliance)
            .chain(self.horde.iter().filter(|_| horde))
            .map(PathBuf::as_path)
            .collect()
    }

    /// Pick a sound uniformly among the faction's candidates.
    pub fn pick<R: Rng + ?Sized>(&self, faction: Faction, rng: &mut R) -> Option<&Path> {
        self.sounds(faction).choose(rng).copied()
    }
}

/// Whether `path` looks like a playable sound file.
pub fn is_sound_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| SOUND_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn scan_folder(folder: &Path) -> Vec<PathBuf> {
    if !folder.is_dir() {
        return Vec::new();
    }

    let mut entries: Vec<PathBuf> = WalkDir::new(folder)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_sound_file(path))
        .collect();
    entries.sort();
    entries
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "alliance/human_selected1.wav",
            "alliance/knight_acknowledge2.WAV",
            "alliance/readme.txt",
            "horde/orc_work_complete.mp3",
            "horde/extra/ogre_ready.ogg",
            "neutral/sheep_pissed.wav",
        ] {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, b"RIFF").unwrap();
        }
        dir
    }

    fn names(paths: Vec<&Path>) -> Vec<String> {
        paths
            .into_iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn scans_faction_folders_only() {
        let dir = fixture();
        let catalog = SoundCatalog::scan(dir.path());

        assert_eq!(
            names(catalog.sounds(Faction::Alliance)),
            ["human_selected1.wav", "knight_acknowledge2.WAV"]
        );
        assert_eq!(names(catalog.sounds(Faction::Horde)), ["ogre_ready.ogg", "orc_work_complete.mp3"]);
        assert_eq!(catalog.sounds(Faction::Both).len(), 4);
    }

    #[test]
    fn missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = SoundCatalog::scan(&dir.path().join("nope"));
        assert!(catalog.is_empty());
        assert_eq!(catalog.pick(Faction::Both, &mut StdRng::seed_from_u64(1)), None);
    }

    #[test]
    fn picks_within_faction() {
        let dir = fixture();
        let catalog = SoundCatalog::scan(dir.path());
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..32 {
            let sound = catalog.pick(Faction::Horde, &mut rng).unwrap();
            assert!(sound.starts_with(dir.path().join("horde")));
        }
    }

    #[test]
    fn both_eventually_reaches_every_sound() {
        let dir = fixture();
        let catalog = SoundCatalog::scan(dir.path());
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(catalog.pick(Faction::Both, &mut rng).unwrap().to_path_buf());
        }
        assert_eq!(seen.len(), 4);
    }
}
