use std::collections::HashMap;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use parking_lot::{Condvar, Mutex};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::sounds::is_sound_file;

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("invalid sound name `{0}`")]
    InvalidName(String),
    #[error("sound `{0}` is not available from this source")]
    Missing(String),
    #[error("failed to download {url}: {message}")]
    Download { url: String, message: String },
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl InstallError {
    fn io(path: &Path, source: io::Error) -> Self {
        InstallError::Io { path: path.to_path_buf(), source }
    }
}

/// Somewhere sound files can be fetched from.
pub trait SoundSource: Send + Sync {
    /// Write the sound called `name` (a relative path such as
    /// `horde/peon_ready.wav`) to `dest`.
    fn fetch(&self, name: &str, dest: &Path) -> Result<(), InstallError>;
}

/// Copies sounds out of a local directory, such as a bundled data folder.
#[derive(Clone, Debug)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Every sound below the root, as `/`-separated relative names.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file() && is_sound_file(entry.path()))
            .filter_map(|entry| {
                let relative = entry.path().strip_prefix(&self.root).ok()?;
                let parts: Option<Vec<&str>> =
                    relative.components().map(|part| part.as_os_str().to_str()).collect();
                Some(parts?.join("/"))
            })
            .collect();
        names.sort();
        names
    }
}

impl SoundSource for LocalSource {
    fn fetch(&self, name: &str, dest: &Path) -> Result<(), InstallError> {
        let source = self.root.join(name);
        if !source.is_file() {
            return Err(InstallError::Missing(name.to_owned()));
        }
        fs::copy(&source, dest).map_err(|err| InstallError::io(&source, err))?;
        Ok(())
    }
}

/// Downloads sounds from `{base_url}/{name}`.
#[derive(Clone, Debug)]
pub struct HttpSource {
    base_url: String,
    agent: ureq::Agent,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        let agent = ureq::AgentBuilder::new().timeout(DOWNLOAD_TIMEOUT).build();
        Self { base_url, agent }
    }

    pub fn url(&self, name: &str) -> String {
        format!("{}/{}", self.base_url, name.trim_start_matches('/'))
    }
}

impl SoundSource for HttpSource {
    fn fetch(&self, name: &str, dest: &Path) -> Result<(), InstallError> {
        let url = self.url(name);
        let response = self
            .agent
            .get(&url)
            .call()
            .map_err(|err| InstallError::Download { url: url.clone(), message: err.to_string() })?;

        let mut file = File::create(dest).map_err(|err| InstallError::io(dest, err))?;
        io::copy(&mut response.into_reader(), &mut file)
            .map_err(|err| InstallError::Download { url, message: format!("read body: {err}") })?;
        Ok(())
    }
}

#[derive(Default)]
struct PendingState {
    result: Option<bool>,
    waiters: usize,
}

#[derive(Default)]
struct Pending {
    state: Mutex<PendingState>,
    ready: Condvar,
}

impl Pending {
    fn wait(&self) -> bool {
        let mut state = self.state.lock();
        state.waiters += 1;
        loop {
            if let Some(result) = state.result {
                return result;
            }
            self.ready.wait(&mut state);
        }
    }

    fn complete(&self, result: bool) {
        self.state.lock().result = Some(result);
        self.ready.notify_all();
    }
}

/// Registry of installs currently running, keyed by destination path.
///
/// The first caller for a key runs the job; callers arriving while it runs
/// block and receive the same result instead of repeating the work.
#[derive(Default)]
pub struct InstallTracker {
    in_flight: Mutex<HashMap<PathBuf, Arc<Pending>>>,
}

impl InstallTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.lock().len()
    }

    pub fn run<F>(&self, key: &Path, job: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        let existing = {
            let mut in_flight = self.in_flight.lock();
            match in_flight.get(key) {
                Some(pending) => Some(Arc::clone(pending)),
                None => {
                    in_flight.insert(key.to_path_buf(), Arc::default());
                    None
                },
            }
        };

        if let Some(pending) = existing {
            debug!("waiting for in-flight install of {}", key.display());
            return pending.wait();
        }

        let completion = Completion { tracker: self, key, result: false };
        let result = job();
        completion.finish(result)
    }

    #[cfg(test)]
    fn waiters(&self, key: &Path) -> usize {
        self.in_flight.lock().get(key).map_or(0, |pending| pending.state.lock().waiters)
    }
}

/// Releases a tracker entry when the owning job ends, even by panic.
struct Completion<'a> {
    tracker: &'a InstallTracker,
    key: &'a Path,
    result: bool,
}

impl Completion<'_> {
    fn finish(mut self, result: bool) -> bool {
        self.result = result;
        result
    }
}

impl Drop for Completion<'_> {
    fn drop(&mut self) {
        let pending = self.tracker.in_flight.lock().remove(self.key);
        if let Some(pending) = pending {
            pending.complete(self.result);
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub installed: Vec<String>,
    pub failed: Vec<String>,
}

impl InstallReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct SoundInstaller<S> {
    source: S,
    tracker: Arc<InstallTracker>,
}

impl<S: SoundSource> SoundInstaller<S> {
    pub fn new(source: S) -> Self {
        Self::with_tracker(source, Arc::default())
    }

    /// Share `tracker` with other installers writing to the same directories.
    pub fn with_tracker(source: S, tracker: Arc<InstallTracker>) -> Self {
        Self { source, tracker }
    }

    pub fn tracker(&self) -> &Arc<InstallTracker> {
        &self.tracker
    }

    /// Make sure `dir/name` exists, fetching it if needed.
    ///
    /// Failures are logged and reported as `false`.
    pub fn install(&self, name: &str, dir: &Path) -> bool {
        if let Err(err) = validate_name(name) {
            warn!("{err}");
            return false;
        }

        let dest = dir.join(name);
        if dest.is_file() {
            return true;
        }

        self.tracker.run(&dest, || {
            if dest.is_file() {
                return true;
            }
            match self.fetch_into(name, &dest) {
                Ok(()) => {
                    debug!("installed {}", dest.display());
                    true
                },
                Err(err) => {
                    warn!("failed to install sound {name}: {err}");
                    false
                },
            }
        })
    }

    pub fn install_all(&self, names: &[String], dir: &Path) -> InstallReport {
        self.install_all_with(names, dir, |_, _| {})
    }

    /// Install `names` in parallel, calling `on_done` as each one settles.
    pub fn install_all_with<F>(&self, names: &[String], dir: &Path, on_done: F) -> InstallReport
    where
        F: Fn(&str, bool) + Sync,
    {
        let results: Vec<(String, bool)> = names
            .par_iter()
            .map(|name| {
                let ok = self.install(name, dir);
                on_done(name, ok);
                (name.clone(), ok)
            })
            .collect();

        let mut report = InstallReport::default();
        for (name, ok) in results {
            if ok {
                report.installed.push(name);
            } else {
                report.failed.push(name);
            }
        }
        report.installed.sort();
        report.failed.sort();
        report
    }

    fn fetch_into(&self, name: &str, dest: &Path) -> Result<(), InstallError> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|err| InstallError::io(parent, err))?;
        }

        let partial = partial_path(dest);
        let fetched = self
            .source
            .fetch(name, &partial)
            .and_then(|()| fs::rename(&partial, dest).map_err(|err| InstallError::io(dest, err)));

        if fetched.is_err() {
            let _ = fs::remove_file(&partial);
        }
        fetched
    }
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut file_name = dest.file_name().unwrap_or_default().to_os_string();
    file_name.push(".downloading");
    dest.with_file_name(file_name)
}

fn validate_name(name: &str) -> Result<(), InstallError> {
    let path = Path::new(name);
    let relative = !name.is_empty()
        && path.components().all(|component| matches!(component, Component::Normal(_)));
    if relative && is_sound_file(path) {
        Ok(())
    } else {
        Err(InstallError::InvalidName(name.to_owned()))
    }
}
