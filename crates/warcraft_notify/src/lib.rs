//! Sound and desktop notifications for idle OpenCode sessions.
//!
//! The plugin reads its entry from `plugin.json`, keeps a folder of Alliance
//! and Horde sound clips installed, and when a session goes idle plays a
//! random clip through the platform's sound player before raising a
//! notification.

pub mod config;
pub mod install;
pub mod notifier;
pub mod platform;
pub mod sounds;

pub use config::{ConfigError, Faction, Locations, PluginConfig, PACKAGE_NAME};
pub use install::{
    HttpSource, InstallError, InstallReport, InstallTracker, LocalSource, SoundInstaller,
    SoundSource,
};
pub use notifier::{IdleNotifier, IdleOutcome};
pub use platform::{CommandRunner, Platform, SystemRunner};
pub use sounds::SoundCatalog;
