//! File system watcher for development mode.
//!
//! Monitors the content root and the config file, and re-runs the full index
//! build after each burst of changes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Event Loop                              │
//! │                                                              │
//! │  ┌──────────┐    ┌──────────┐    ┌────────────────────────┐  │
//! │  │ notify   │───▶│ Debouncer│───▶│    handle_batch()      │  │
//! │  │ events   │    │ (300ms)  │    │                        │  │
//! │  └──────────┘    └──────────┘    │  config → reload       │  │
//! │       ▲                          │  always → build_index  │  │
//! │  classify()                      │  then  → sync targets  │  │
//! │                                  └────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rebuild is a full re-scan, so a batch only needs to know *whether*
//! something changed, not what.

use crate::{
    build::{build_index, rel},
    cli::Cli,
    config::IndexConfig,
    log,
    utils::path::{existing_ancestor, normalize_path},
};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher, event::ModifyKind};
use rustc_hash::FxHashMap;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::{self, RecvTimeoutError},
    time::{Duration, Instant},
};

/// Idle wait between loop iterations when nothing is pending.
const IDLE_TIMEOUT: Duration = Duration::from_secs(60);

// =============================================================================
// Classification
// =============================================================================

/// Why a changed path matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    /// Something under the content root changed
    Content,
    /// The config file changed
    Config,
}

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Map a changed path to the work it requires, if any.
///
/// The manifest itself is ignored so that writing it never schedules another
/// build, even when it lives inside the content root.
fn classify(path: &Path, config: &IndexConfig) -> Option<Trigger> {
    let path = normalize_path(path);

    if path == config.config_path {
        Some(Trigger::Config)
    } else if path == config.build.output || is_temp_file(&path) {
        None
    } else if path.starts_with(&config.build.content) {
        Some(Trigger::Content)
    } else {
        None
    }
}

const fn is_relevant(event: &Event) -> bool {
    match event.kind {
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => true,
        _ => false,
    }
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events until a quiet period has passed.
struct Debouncer {
    pending: FxHashMap<PathBuf, Trigger>,
    last_event: Option<Instant>,
    window: Duration,
}

/// Changes collected during one debounce window.
#[derive(Debug, Default, PartialEq, Eq)]
struct Batch {
    config_changed: bool,
    content: Vec<PathBuf>,
}

impl Debouncer {
    fn new(window: Duration) -> Self {
        Self {
            pending: FxHashMap::default(),
            last_event: None,
            window,
        }
    }

    fn add(&mut self, path: PathBuf, trigger: Trigger) {
        self.pending.insert(path, trigger);
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty() && self.last_event.is_some_and(|t| t.elapsed() >= self.window)
    }

    fn take(&mut self) -> Batch {
        self.last_event = None;
        let mut batch = Batch::default();
        for (path, trigger) in self.pending.drain() {
            match trigger {
                Trigger::Config => batch.config_changed = true,
                Trigger::Content => batch.content.push(path),
            }
        }
        batch.content.sort();
        batch
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            IDLE_TIMEOUT
        } else {
            self.window
        }
    }
}

// =============================================================================
// Watch Targets
// =============================================================================

/// A directory registered with the OS watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
struct WatchTarget {
    path: PathBuf,
    recursive: bool,
}

/// Directories to watch for `config`.
///
/// The content root is watched recursively; while it does not exist, its
/// nearest existing ancestor is watched instead so its creation is noticed.
/// The config file's directory is watched non-recursively (editors often
/// replace files by rename, which a watch on the file itself would miss).
fn watch_targets(config: &IndexConfig) -> Vec<WatchTarget> {
    let content = &config.build.content;
    let content_dir = if content.is_dir() {
        content.clone()
    } else {
        existing_ancestor(content).map_or_else(|| config.root.clone(), Path::to_path_buf)
    };

    let mut targets = vec![WatchTarget {
        path: content_dir.clone(),
        recursive: true,
    }];

    if let Some(dir) = config.config_path.parent()
        && !dir.starts_with(&content_dir)
    {
        targets.push(WatchTarget {
            path: dir.to_path_buf(),
            recursive: false,
        });
    }

    targets
}

/// Registered targets, kept in step with the current config and filesystem.
#[derive(Default)]
struct WatchSet {
    active: Vec<WatchTarget>,
}

impl WatchSet {
    /// Re-register targets if they differ from what is being watched.
    fn sync(&mut self, watcher: &mut impl Watcher, config: &IndexConfig) -> Result<bool> {
        let wanted = watch_targets(config);
        if wanted == self.active {
            return Ok(false);
        }

        for target in self.active.drain(..) {
            // The directory may already be gone; nothing left to unwatch
            watcher.unwatch(&target.path).ok();
        }

        for target in wanted {
            let mode = if target.recursive {
                RecursiveMode::Recursive
            } else {
                RecursiveMode::NonRecursive
            };
            watcher
                .watch(&target.path, mode)
                .with_context(|| format!("Failed to watch {}", target.path.display()))?;
            self.active.push(target);
        }

        Ok(true)
    }

    fn summary(&self, root: &Path) -> String {
        self.active
            .iter()
            .map(|t| {
                let path = rel(&t.path, root);
                let path = if path.is_empty() { ".".to_string() } else { path };
                if t.recursive { format!("{path}/") } else { path }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// =============================================================================
// Event Handler
// =============================================================================

enum WatchMsg {
    Fs(notify::Result<Event>),
    Stop,
}

/// Log a build failure with error details.
fn log_build_error(trigger: &str, err: &anyhow::Error) {
    if trigger.is_empty() {
        log!("watch"; "build failed");
    } else {
        log!("watch"; "build failed ({trigger})");
    }
    log!("error"; "{err:#}");
}

/// Reload config if needed, rebuild, and follow the content root if it moved.
fn handle_batch(
    batch: &Batch,
    cli: &Cli,
    config: &mut IndexConfig,
    watcher: &mut impl Watcher,
    watch_set: &mut WatchSet,
) {
    if batch.config_changed {
        match IndexConfig::load(cli) {
            Ok(reloaded) => {
                *config = reloaded;
                log!("watch"; "config reloaded");
            }
            Err(e) => {
                log!("watch"; "config reload failed, keeping previous config");
                log!("error"; "{e:#}");
            }
        }
    }

    let trigger = match batch.content.as_slice() {
        [] => String::new(),
        [one] => rel(one, &config.root),
        [first, rest @ ..] => format!("{} and {} more", rel(first, &config.root), rest.len()),
    };
    if !trigger.is_empty() {
        log!("watch"; "{trigger} changed, rebuilding...");
    }

    if let Err(e) = build_index(config) {
        log_build_error(&trigger, &e);
    }

    match watch_set.sync(watcher, config) {
        Ok(true) => log!("watch"; "watching {}", watch_set.summary(&config.root)),
        Ok(false) => {}
        Err(e) => log!("error"; "{e:#}"),
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Watch the content root and rebuild on change until Ctrl-C.
pub fn watch_for_changes(cli: &Cli, mut config: IndexConfig) -> Result<()> {
    let (tx, rx) = mpsc::channel();

    let fs_tx = tx.clone();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        fs_tx.send(WatchMsg::Fs(res)).ok();
    })
    .context("Failed to create file watcher")?;

    ctrlc::set_handler(move || {
        tx.send(WatchMsg::Stop).ok();
    })
    .context("Failed to install Ctrl-C handler")?;

    let mut watch_set = WatchSet::default();
    watch_set.sync(&mut watcher, &config)?;
    log!("watch"; "watching {}", watch_set.summary(&config.root));

    let mut debouncer = Debouncer::new(config.watch.debounce());

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(WatchMsg::Fs(Ok(event))) if is_relevant(&event) => {
                for path in event.paths {
                    if let Some(trigger) = classify(&path, &config) {
                        debouncer.add(path, trigger);
                    }
                }
            }
            Ok(WatchMsg::Fs(Ok(_))) => {}
            Ok(WatchMsg::Fs(Err(e))) => log!("watch"; "error: {e}"),
            Ok(WatchMsg::Stop) => {
                log!("watch"; "stopped");
                break;
            }
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                let batch = debouncer.take();
                handle_batch(&batch, cli, &mut config, &mut watcher, &mut watch_set);
                debouncer.window = config.watch.debounce();
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}
