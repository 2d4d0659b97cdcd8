use std::{collections::BTreeSet, fmt};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn generate_state_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(16)
        .map(char::from)
        .collect()
}

/// Clamps a playback position into `[0, duration]`. A zero duration means
/// the track length is unknown and the position collapses to zero.
pub fn clamp_position(position_ms: u64, duration_ms: u64) -> u64 {
    position_ms.min(duration_ms)
}

/// Parses a seek target given as seconds (`"90"`), `MM:SS` or `H:MM:SS`
/// into milliseconds.
pub fn parse_position(input: &str) -> Result<u64, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("position cannot be empty".to_string());
    }

    let mut seconds: u64 = 0;
    for part in trimmed.split(':') {
        let value: u64 = part
            .parse()
            .map_err(|_| format!("invalid position '{}'", input))?;
        seconds = seconds * 60 + value;
    }

    Ok(seconds * 1000)
}

pub fn format_duration(ms: u64) -> String {
    let total_secs = ms / 1000;
    let mins = total_secs / 60;
    let secs = total_secs % 60;
    format!("{}:{:02}", mins, secs)
}

pub fn parse_toggle(input: &str) -> Result<bool, String> {
    match input.trim().to_lowercase().as_str() {
        "on" | "true" | "1" => Ok(true),
        "off" | "false" | "0" => Ok(false),
        other => Err(format!("invalid value '{}', expected on or off", other)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SearchKind {
    Track,
    Album,
    Artist,
    Playlist,
}

impl SearchKind {
    pub const ALL: [SearchKind; 4] = [
        SearchKind::Track,
        SearchKind::Album,
        SearchKind::Artist,
        SearchKind::Playlist,
    ];
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchKind::Track => "track",
            SearchKind::Album => "album",
            SearchKind::Artist => "artist",
            SearchKind::Playlist => "playlist",
        };
        write!(f, "{}", name)
    }
}

/// Set of result types to request from the search endpoint. Kept sorted so
/// the generated `type=` query parameter is stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchKinds(pub BTreeSet<SearchKind>);

impl Default for SearchKinds {
    fn default() -> Self {
        let mut set = BTreeSet::new();
        set.insert(SearchKind::Track);
        SearchKinds(set)
    }
}

impl SearchKinds {
    pub fn iter(&self) -> impl Iterator<Item = SearchKind> + '_ {
        self.0.iter().copied()
    }

    /// Comma-joined value for the search endpoint's `type` parameter.
    pub fn as_query(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SearchKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|k| k.to_string())
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{}", joined)
    }
}

pub fn parse_search_kinds(input: &str) -> Result<SearchKinds, String> {
    if input.trim().is_empty() {
        return Err("search type list cannot be empty".to_string());
    }

    let mut set = BTreeSet::new();
    for segment in input.split(',') {
        let segment = segment.trim().to_lowercase();
        if segment.is_empty() {
            return Err("search type list contains an empty segment".to_string());
        }

        if segment == "all" {
            set.extend(SearchKind::ALL);
            continue;
        }

        let kind = match segment.trim_end_matches('s') {
            "track" => SearchKind::Track,
            "album" => SearchKind::Album,
            "artist" => SearchKind::Artist,
            "playlist" => SearchKind::Playlist,
            _ => return Err(format!("invalid value '{}' for search type", segment)),
        };
        set.insert(kind);
    }

    Ok(SearchKinds(set))
}
