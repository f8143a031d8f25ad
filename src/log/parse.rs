use crate::Result;
use crate::error::VizError;
use crate::log::key::ConfigurationKey;
use anyhow::Context;
use indexmap::IndexMap;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Separator between log segments.
pub const SEGMENT_DELIMITER: &str = ":::";

/// Marker that turns a segment into a schedule header.
const SCHEDULE_MARKER: &str = "schedule";

/// Accumulated raw event text per configuration, in order of first appearance.
pub type GroupedLog = IndexMap<ConfigurationKey, String>;

// "chunk=" up to the next ':' or the end of the segment.
static CHUNK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"chunk=([^:]*)").expect("chunk pattern is valid"));

/// One classified piece of the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Header(ConfigurationKey),
    Data(&'a str),
}

/// Fold accumulator: the key data segments currently belong to, plus the groups so far.
#[derive(Debug, Default)]
struct GroupState {
    current: Option<ConfigurationKey>,
    groups: GroupedLog,
}

/// Read the whole log into memory.
///
/// The path is checked before opening so a missing log is reported together with
/// the working directory it was resolved against.
pub fn read_log_file(path: &Path) -> Result<String> {
    if !path.exists() {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        return Err(VizError::MissingFile {
            path: path.to_path_buf(),
            cwd,
        }
        .into());
    }
    fs::read_to_string(path).with_context(|| format!("read log file {}", path.display()))
}

/// Read and group a log file.
pub fn parse_log_file(path: &Path) -> Result<GroupedLog> {
    let text = read_log_file(path)?;
    Ok(group_segments(&text)?)
}

pub fn split_segments(text: &str) -> impl Iterator<Item = &str> {
    text.split(SEGMENT_DELIMITER)
}

/// Decide whether a segment is a schedule header or data.
///
/// Header example: "Dynamic schedule, chunk=4:\n"
pub fn classify_segment(segment: &str) -> std::result::Result<Segment<'_>, VizError> {
    let Some(marker) = segment.find(SCHEDULE_MARKER) else {
        return Ok(Segment::Data(segment));
    };

    let name = segment[..marker].trim();
    let chunk = match CHUNK_RE.captures(segment) {
        Some(caps) => {
            let raw = caps[1].trim();
            let chunk = raw.parse::<u32>().map_err(|e| VizError::MalformedLog {
                segment: segment.to_string(),
                reason: format!("bad chunk size {:?}: {}", raw, e),
            })?;
            Some(chunk)
        }
        None => None,
    };

    Ok(Segment::Header(ConfigurationKey::new(name, chunk)))
}

/// Group log text into per-configuration event text.
///
/// Headers switch the current key; data segments are concatenated onto the
/// current key's text in log order. A header without data creates no entry.
pub fn group_segments(text: &str) -> std::result::Result<GroupedLog, VizError> {
    let state = split_segments(text).try_fold(GroupState::default(), |mut state, segment| {
        match classify_segment(segment)? {
            Segment::Header(key) => state.current = Some(key),
            Segment::Data(data) => match &state.current {
                Some(key) => append_events(state.groups.entry(key.clone()).or_default(), data),
                // Blank text before the first header carries no pairs.
                None if data.trim().is_empty() => {}
                None => {
                    return Err(VizError::MalformedLog {
                        segment: data.to_string(),
                        reason: "data segment before any schedule header".to_string(),
                    });
                }
            },
        }
        Ok(state)
    })?;

    Ok(state.groups)
}

/// Concatenate a data segment onto accumulated text without fusing the last
/// token of one segment with the first token of the next.
fn append_events(acc: &mut String, data: &str) {
    let needs_separator = !acc.is_empty()
        && !data.is_empty()
        && !acc.ends_with(['\n', ','])
        && !data.starts_with(['\n', ',']);
    if needs_separator {
        acc.push('\n');
    }
    acc.push_str(data);
}
