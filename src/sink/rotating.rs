//! Size- and age-bounded rotating file sink.
//!
//! The active segment lives at the configured path. When a write would
//! push it past `max_bytes`, or the segment is older than `max_age`, it is
//! renamed to `<stem>-<timestamp>.<ext>` and a fresh segment is opened.
//! Retired segments are then pruned (count and age) and optionally
//! gzipped to `<segment>.gz`. Pruning runs after the write lock is
//! released, so other writers only wait for the rename.
//!
//! Only files whose name carries a parseable rotation timestamp count as
//! retired segments; siblings such as `app-access.log` are never touched.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use chrono::{NaiveDateTime, Utc};
use flate2::write::GzEncoder;
use flate2::Compression;
use parking_lot::Mutex;

use super::Sink;
use crate::config::LoggerConfig;

const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";
const GZ_SUFFIX: &str = ".gz";
const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Bounds applied to the active segment and its retired siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub max_age: Option<Duration>,
    pub max_backups: usize,
    pub compress: bool,
}

impl RotationPolicy {
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self {
            max_bytes: config.max_size_bytes(),
            max_age: (config.max_age > 0)
                .then(|| Duration::from_secs(config.max_age.saturating_mul(SECS_PER_DAY))),
            max_backups: config.max_backups,
            compress: config.compress_enabled(),
        }
    }
}

/// Currently open segment.
#[derive(Debug)]
struct ActiveSegment {
    file: File,
    size: u64,
    opened_at: SystemTime,
}

/// Append-only file writer with rotation.
#[derive(Debug)]
pub struct RotatingFileSink {
    path: PathBuf,
    policy: RotationPolicy,
    active: Mutex<ActiveSegment>,
    /// Serializes pruning passes.
    mill: Mutex<()>,
}

impl RotatingFileSink {
    /// Open (or create) the active segment at `path`.
    pub fn open(path: impl Into<PathBuf>, policy: RotationPolicy) -> io::Result<Self> {
        let path = path.into();
        let active = open_segment(&path)?;

        Ok(Self {
            path,
            policy,
            active: Mutex::new(active),
            mill: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Retired segments next to the active one, newest first.
    pub fn backups(&self) -> io::Result<Vec<PathBuf>> {
        let mut backups: Vec<(PathBuf, SystemTime)> = list_backups(&self.path)?
            .into_iter()
            .map(|path| {
                let modified = fs::metadata(&path)
                    .and_then(|m| m.modified())
                    .unwrap_or(SystemTime::UNIX_EPOCH);
                (path, modified)
            })
            .collect();

        backups.sort_by(|(a_path, a_time), (b_path, b_time)| {
            b_time.cmp(a_time).then_with(|| b_path.cmp(a_path))
        });
        Ok(backups.into_iter().map(|(path, _)| path).collect())
    }

    /// Force a rotation regardless of size and age.
    pub fn rotate(&self) -> io::Result<()> {
        {
            let mut active = self.active.lock();
            self.rotate_locked(&mut active)?;
        }
        self.mill();
        Ok(())
    }

    fn needs_rotation(&self, active: &ActiveSegment, incoming: u64) -> bool {
        if active.size == 0 {
            return false;
        }
        if active.size.saturating_add(incoming) > self.policy.max_bytes {
            return true;
        }
        match self.policy.max_age {
            Some(max_age) => active
                .opened_at
                .elapsed()
                .map(|age| age > max_age)
                .unwrap_or(false),
            None => false,
        }
    }

    fn rotate_locked(&self, active: &mut ActiveSegment) -> io::Result<()> {
        active.file.flush()?;

        let backup = backup_path(&self.path);
        fs::rename(&self.path, &backup)?;
        *active = open_segment(&self.path)?;
        Ok(())
    }

    /// Best-effort pruning pass; the fresh segment is already usable.
    fn mill(&self) {
        let _guard = self.mill.lock();
        let _ = self.prune();
    }

    /// Apply count, age and compression bounds to retired segments.
    /// Failures on individual segments are skipped.
    fn prune(&self) -> io::Result<()> {
        let backups = self.backups()?;
        let (keep, excess) = backups.split_at(backups.len().min(self.policy.max_backups));

        for path in excess {
            let _ = fs::remove_file(path);
        }

        for path in keep {
            if let Some(max_age) = self.policy.max_age {
                let expired = fs::metadata(path)
                    .and_then(|m| m.modified())
                    .ok()
                    .and_then(|modified| modified.elapsed().ok())
                    .map(|age| age > max_age)
                    .unwrap_or(false);
                if expired {
                    let _ = fs::remove_file(path);
                    continue;
                }
            }

            if self.policy.compress && !is_compressed(path) {
                let _ = compress_segment(path);
            }
        }

        Ok(())
    }
}

impl Sink for RotatingFileSink {
    fn name(&self) -> &'static str {
        "file"
    }

    fn write_record(&self, record: &[u8]) -> io::Result<()> {
        let rotated = {
            let mut active = self.active.lock();
            let incoming = record.len() as u64;

            let rotated = self.needs_rotation(&active, incoming);
            if rotated {
                self.rotate_locked(&mut active)?;
            }

            active.file.write_all(record)?;
            active.size += incoming;
            rotated
        };

        if rotated {
            self.mill();
        }
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        let mut active = self.active.lock();
        active.file.flush()?;
        active.file.sync_data()
    }
}

fn open_segment(path: &Path) -> io::Result<ActiveSegment> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let metadata = file.metadata()?;
    let opened_at = if metadata.len() == 0 {
        SystemTime::now()
    } else {
        metadata
            .created()
            .or_else(|_| metadata.modified())
            .unwrap_or_else(|_| SystemTime::now())
    };

    Ok(ActiveSegment {
        file,
        size: metadata.len(),
        opened_at,
    })
}

/// `<dir>/<stem>-` prefix and `.<ext>` suffix shared by every backup.
fn backup_parts(path: &Path) -> (PathBuf, String, String) {
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    (dir, format!("{}-", stem), ext)
}

fn backup_path(path: &Path) -> PathBuf {
    let (dir, prefix, ext) = backup_parts(path);
    let timestamp = Utc::now().format(BACKUP_TIME_FORMAT);

    let candidate = dir.join(format!("{}{}{}", prefix, timestamp, ext));
    if !candidate.exists() && !gz_path(&candidate).exists() {
        return candidate;
    }

    // Several rotations within one millisecond.
    let mut seq = 1u32;
    loop {
        let candidate = dir.join(format!("{}{}-{}{}", prefix, timestamp, seq, ext));
        if !candidate.exists() && !gz_path(&candidate).exists() {
            return candidate;
        }
        seq += 1;
    }
}

fn list_backups(path: &Path) -> io::Result<Vec<PathBuf>> {
    let (dir, prefix, ext) = backup_parts(path);
    let compressed_ext = format!("{}{}", ext, GZ_SUFFIX);
    let mut backups = Vec::new();

    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        let entry_path = entry.path();
        if entry_path == path || !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }
        let Some(name) = entry_path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(rest) = name.strip_prefix(prefix.as_str()) else {
            continue;
        };
        let middle = rest
            .strip_suffix(compressed_ext.as_str())
            .or_else(|| rest.strip_suffix(ext.as_str()));
        if middle.is_some_and(is_backup_stamp) {
            backups.push(entry_path);
        }
    }

    Ok(backups)
}

/// `<timestamp>` or `<timestamp>-<seq>`, as produced by [`backup_path`].
fn is_backup_stamp(middle: &str) -> bool {
    if NaiveDateTime::parse_from_str(middle, BACKUP_TIME_FORMAT).is_ok() {
        return true;
    }
    match middle.rsplit_once('-') {
        Some((stamp, seq)) => {
            !seq.is_empty()
                && seq.bytes().all(|b| b.is_ascii_digit())
                && NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT).is_ok()
        }
        None => false,
    }
}

fn is_compressed(path: &Path) -> bool {
    path.to_string_lossy().ends_with(GZ_SUFFIX)
}

fn gz_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(GZ_SUFFIX);
    PathBuf::from(name)
}

/// Gzip a retired segment next to itself and remove the original. The
/// compressed file keeps the original modification time so age pruning
/// still sees when the segment was retired.
fn compress_segment(path: &Path) -> io::Result<PathBuf> {
    let target = gz_path(path);
    let mut source = File::open(path)?;
    let modified = source.metadata()?.modified().ok();

    let file = File::create(&target)?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    io::copy(&mut source, &mut encoder)?;
    let file = encoder.finish()?;

    if let Some(modified) = modified {
        let _ = file.set_modified(modified);
    }

    fs::remove_file(path)?;
    Ok(target)
}
