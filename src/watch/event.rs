// src/watch/event.rs

//! Change events as seen by the watch engine.

use std::path::{Path, PathBuf};

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind};

/// Coarse classification of a filesystem operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// A path appeared (created, or renamed into place).
    Created,
    /// File contents were written.
    Written,
    /// Anything else: removal, metadata, access, ...
    Other,
}

impl From<&EventKind> for ChangeKind {
    fn from(kind: &EventKind) -> Self {
        match kind {
            EventKind::Create(_) => ChangeKind::Created,
            EventKind::Modify(ModifyKind::Name(RenameMode::To | RenameMode::Both)) => {
                ChangeKind::Created
            }
            EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any) => ChangeKind::Written,
            _ => ChangeKind::Other,
        }
    }
}

/// A single change on a single path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
}

impl ChangeEvent {
    pub fn new(path: impl Into<PathBuf>, kind: ChangeKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn created(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ChangeKind::Created)
    }

    pub fn written(path: impl Into<PathBuf>) -> Self {
        Self::new(path, ChangeKind::Written)
    }

    /// Split a notify event into per-path change events.
    ///
    /// A `Both` rename carries `[from, to]`; only the destination is
    /// reported, as a creation.
    pub fn from_notify(event: Event) -> Vec<ChangeEvent> {
        let kind = ChangeKind::from(&event.kind);
        let mut paths = event.paths;

        if matches!(
            event.kind,
            EventKind::Modify(ModifyKind::Name(RenameMode::Both))
        ) && paths.len() > 1
        {
            let sources = paths.len() - 1;
            paths.drain(..sources);
        }

        paths
            .into_iter()
            .map(|path| ChangeEvent { path, kind })
            .collect()
    }
}

/// Whether `path` names a tracked source file, i.e. ends with `suffix`.
///
/// Paths that are not valid UTF-8, or shorter than the suffix, are not
/// tracked.
pub fn is_tracked_source(path: &Path, suffix: &str) -> bool {
    match path.to_str() {
        Some(s) => !suffix.is_empty() && s.ends_with(suffix),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind, RemoveKind};

    #[test]
    fn classifies_notify_kinds() {
        assert_eq!(
            ChangeKind::from(&EventKind::Create(CreateKind::Folder)),
            ChangeKind::Created
        );
        assert_eq!(
            ChangeKind::from(&EventKind::Modify(ModifyKind::Data(DataChange::Content))),
            ChangeKind::Written
        );
        assert_eq!(
            ChangeKind::from(&EventKind::Modify(ModifyKind::Any)),
            ChangeKind::Written
        );
        assert_eq!(
            ChangeKind::from(&EventKind::Modify(ModifyKind::Name(RenameMode::To))),
            ChangeKind::Created
        );
        assert_eq!(
            ChangeKind::from(&EventKind::Modify(ModifyKind::Name(RenameMode::From))),
            ChangeKind::Other
        );
        assert_eq!(
            ChangeKind::from(&EventKind::Modify(ModifyKind::Metadata(MetadataKind::Permissions))),
            ChangeKind::Other
        );
        assert_eq!(
            ChangeKind::from(&EventKind::Remove(RemoveKind::File)),
            ChangeKind::Other
        );
        assert_eq!(
            ChangeKind::from(&EventKind::Access(AccessKind::Any)),
            ChangeKind::Other
        );
    }

    #[test]
    fn splits_multi_path_events() {
        let event = Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Any)))
            .add_path(PathBuf::from("/proj/a.go"))
            .add_path(PathBuf::from("/proj/b.go"));
        let changes = ChangeEvent::from_notify(event);
        assert_eq!(
            changes,
            vec![
                ChangeEvent::written("/proj/a.go"),
                ChangeEvent::written("/proj/b.go"),
            ]
        );
    }

    #[test]
    fn rename_both_reports_destination_only() {
        let event = Event::new(EventKind::Modify(ModifyKind::Name(RenameMode::Both)))
            .add_path(PathBuf::from("/proj/old"))
            .add_path(PathBuf::from("/proj/new"));
        assert_eq!(
            ChangeEvent::from_notify(event),
            vec![ChangeEvent::created("/proj/new")]
        );
    }

    #[test]
    fn suffix_check_handles_short_names() {
        assert!(is_tracked_source(Path::new("/proj/main.go"), ".go"));
        assert!(!is_tracked_source(Path::new("/proj/main.gox"), ".go"));
        assert!(!is_tracked_source(Path::new("go"), ".go"));
        assert!(!is_tracked_source(Path::new(""), ".go"));
        assert!(!is_tracked_source(Path::new("/proj/main.go"), ""));
    }
}
