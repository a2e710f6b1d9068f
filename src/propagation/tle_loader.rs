use std::fs;
use std::path::{Path, PathBuf};

use crate::propagation::error::TleLoadError;
use crate::propagation::types::SatelliteTle;

/// Satellites read from a TLE file, or from every `.tle`/`.txt` file in a
/// directory. File order is kept; it is the order results are returned in.
pub struct TleLoader {
    source: PathBuf,
    satellites: Vec<SatelliteTle>,
}

impl TleLoader {
    pub fn new(source: PathBuf) -> Self {
        Self {
            source,
            satellites: Vec::new(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn source_exists(&self) -> bool {
        self.source.exists()
    }

    /// Load all TLE records from the source
    pub fn load_all(&mut self) -> Result<(), TleLoadError> {
        if !self.source.exists() {
            return Err(TleLoadError::NotFound(self.source.display().to_string()));
        }

        self.satellites.clear();

        if self.source.is_file() {
            let content = fs::read_to_string(&self.source)?;
            self.satellites = parse_multi_tle(&content);
        } else {
            let mut paths = Vec::new();
            for entry in fs::read_dir(&self.source)? {
                let path = entry?.path();
                let is_tle = path
                    .extension()
                    .is_some_and(|ext| ext == "tle" || ext == "txt");
                if path.is_file() && is_tle {
                    paths.push(path);
                }
            }
            paths.sort();

            for path in paths {
                match fs::read_to_string(&path) {
                    Ok(content) => {
                        self.satellites.extend(parse_multi_tle(&content));
                    }
                    Err(e) => {
                        log::warn!("Failed to read TLE file {}: {}", path.display(), e);
                        // Continue with other files
                    }
                }
            }
        }

        log::info!(
            "Loaded {} satellites from {}",
            self.satellites.len(),
            self.source.display()
        );
        Ok(())
    }

    /// All loaded satellites, in source order
    pub fn satellites(&self) -> &[SatelliteTle] {
        &self.satellites
    }

    /// Re-read the source, keeping the previous satellites on failure
    pub fn reload(&mut self) -> Result<usize, TleLoadError> {
        let previous = std::mem::take(&mut self.satellites);
        match self.load_all() {
            Ok(()) => Ok(self.satellites.len()),
            Err(e) => {
                self.satellites = previous;
                Err(e)
            }
        }
    }
}

/// Parse multi-satellite TLE content.
///
/// Accepts 2-line and 3-line (named) records; lines that fit neither are
/// skipped.
pub fn parse_multi_tle(content: &str) -> Vec<SatelliteTle> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            // 2-line TLE (no name)
            result.push(SatelliteTle::new("", lines[i], lines[i + 1]));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            // 3-line TLE (with name)
            result.push(SatelliteTle::new(lines[i], lines[i + 1], lines[i + 2]));
            i += 3;
        } else {
            i += 1; // Skip unknown line
        }
    }

    for (i, tle) in result.iter_mut().enumerate() {
        if tle.name.is_empty() {
            tle.name = match tle.norad_id() {
                Some(id) => format!("NORAD {}", id),
                None => format!("SAT-{}", i + 1),
            };
        }
    }
    result
}
