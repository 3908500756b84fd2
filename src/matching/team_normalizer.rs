use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Suffix the openfootball feed puts on most club names
const CANONICAL_SUFFIX: &str = " FC";

/// Separators tried in order when splitting an event title into two sides
const TITLE_SEPARATORS: [&str; 5] = [" vs. ", " vs ", " v ", " @ ", " - "];

/// Gamma short name -> openfootball canonical name
const SHORT_TO_CANONICAL: &[(&str, &str)] = &[
    ("Liverpool", "Liverpool FC"),
    ("Man City", "Manchester City FC"),
    ("Manchester City", "Manchester City FC"),
    ("Spurs", "Tottenham Hotspur FC"),
    ("Tottenham", "Tottenham Hotspur FC"),
    ("Man Utd", "Manchester United FC"),
    ("Manchester United", "Manchester United FC"),
    ("Newcastle", "Newcastle United FC"),
    ("Brighton", "Brighton & Hove Albion FC"),
    ("Wolves", "Wolverhampton Wanderers FC"),
    ("Arsenal", "Arsenal FC"),
    ("Chelsea", "Chelsea FC"),
    ("Aston Villa", "Aston Villa FC"),
    ("Fulham", "Fulham FC"),
    ("Brentford", "Brentford FC"),
    ("West Ham", "West Ham United FC"),
    ("West Ham United", "West Ham United FC"),
    ("Crystal Palace", "Crystal Palace FC"),
    ("Everton", "Everton FC"),
    ("Leicester", "Leicester City FC"),
    ("Leicester City", "Leicester City FC"),
    ("Nottingham Forest", "Nottingham Forest FC"),
    ("Nott'm Forest", "Nottingham Forest FC"),
    ("Southampton", "Southampton FC"),
    ("Bournemouth", "AFC Bournemouth"),
    ("AFC Bournemouth", "AFC Bournemouth"),
    ("Ipswich", "Ipswich Town FC"),
    ("Ipswich Town", "Ipswich Town FC"),
    ("Leeds", "Leeds United FC"),
    ("Leeds United", "Leeds United FC"),
    ("Burnley", "Burnley FC"),
    ("Sheffield United", "Sheffield United FC"),
    ("Sheffield Utd", "Sheffield United FC"),
    ("Luton", "Luton Town FC"),
    ("Luton Town", "Luton Town FC"),
];

/// openfootball canonical name -> dashboard display name
const CANONICAL_TO_DISPLAY: &[(&str, &str)] = &[
    ("Liverpool FC", "Liverpool"),
    ("Manchester City FC", "Manchester City"),
    ("Tottenham Hotspur FC", "Tottenham"),
    ("Manchester United FC", "Manchester United"),
    ("Newcastle United FC", "Newcastle"),
    ("Brighton & Hove Albion FC", "Brighton"),
    ("Wolverhampton Wanderers FC", "Wolves"),
    ("Arsenal FC", "Arsenal"),
    ("Chelsea FC", "Chelsea"),
    ("Aston Villa FC", "Aston Villa"),
    ("Fulham FC", "Fulham"),
    ("Brentford FC", "Brentford"),
    ("West Ham United FC", "West Ham"),
    ("Crystal Palace FC", "Crystal Palace"),
    ("Everton FC", "Everton"),
    ("Leicester City FC", "Leicester"),
    ("Nottingham Forest FC", "Nottingham Forest"),
    ("Southampton FC", "Southampton"),
    ("AFC Bournemouth", "Bournemouth"),
    ("Ipswich Town FC", "Ipswich"),
    ("Leeds United FC", "Leeds"),
    ("Burnley FC", "Burnley"),
    ("Sheffield United FC", "Sheffield United"),
    ("Luton Town FC", "Luton"),
];

static PREMIER_LEAGUE: LazyLock<TeamNameNormalizer> =
    LazyLock::new(TeamNameNormalizer::premier_league);

/// Read-only Premier League table, built on first use
pub fn shared() -> &'static TeamNameNormalizer {
    &PREMIER_LEAGUE
}

/// Maps team names between Gamma market titles, the openfootball feed and
/// the dashboard.
///
/// Lookups are exact (case-sensitive). Names missing from the table fall back
/// to appending or stripping the `" FC"` suffix, so every lookup succeeds.
#[derive(Debug, Clone, Default)]
pub struct TeamNameNormalizer {
    /// Map of short name -> canonical name
    canonical: HashMap<String, String>,
    /// Map of canonical name -> display name
    display: HashMap<String, String>,
    /// Canonical names in first-seen order
    teams: Vec<String>,
}

/// Team name table file format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamNameTable {
    pub teams: Vec<TeamNameEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamNameEntry {
    /// openfootball name, e.g. "Manchester City FC"
    pub canonical: String,
    /// Display name, e.g. "Manchester City"
    pub display: String,
    /// Short names used in market titles
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Home and away sides of an event, in canonical form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamPair {
    pub home: String,
    pub away: String,
}

impl TeamNameNormalizer {
    /// Create a normalizer with an empty table (fallbacks only)
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in Premier League table
    pub fn premier_league() -> Self {
        let mut normalizer = Self::new();

        for (display_canonical, display) in CANONICAL_TO_DISPLAY {
            normalizer.set_display(display_canonical, display);
        }
        for (short, canonical) in SHORT_TO_CANONICAL {
            normalizer.add_alias(short, canonical);
        }

        normalizer
    }

    /// Parse a table in the `{"teams": [...]}` format
    pub fn from_json(content: &str) -> Result<Self> {
        let table: TeamNameTable =
            serde_json::from_str(content).context("Failed to parse team names JSON")?;

        let mut normalizer = Self::new();

        for entry in table.teams {
            normalizer.set_display(&entry.canonical, &entry.display);

            // Canonical and display names resolve to themselves
            normalizer.add_alias(&entry.canonical, &entry.canonical);
            normalizer.add_alias(&entry.display, &entry.canonical);

            for alias in &entry.aliases {
                normalizer.add_alias(alias, &entry.canonical);
            }
        }

        Ok(normalizer)
    }

    /// Load a table from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).context("Failed to read team names file")?;

        let normalizer = Self::from_json(&content)?;
        info!(
            "Loaded {} team name mappings for {} teams",
            normalizer.canonical.len(),
            normalizer.teams.len()
        );

        Ok(normalizer)
    }

    /// Market short name -> canonical openfootball name
    pub fn to_canonical(&self, name: &str) -> String {
        if let Some(canonical) = self.canonical.get(name) {
            return canonical.clone();
        }

        if name.ends_with(CANONICAL_SUFFIX) {
            name.to_string()
        } else {
            format!("{}{}", name, CANONICAL_SUFFIX)
        }
    }

    /// Canonical openfootball name -> display name
    pub fn to_display(&self, canonical_name: &str) -> String {
        if let Some(display) = self.display.get(canonical_name) {
            return display.clone();
        }

        canonical_name
            .strip_suffix(CANONICAL_SUFFIX)
            .unwrap_or(canonical_name)
            .to_string()
    }

    /// Split an event title such as "Liverpool vs Manchester City" into two
    /// canonical team names.
    ///
    /// Separators are tried in the order ` vs. `, ` vs `, ` v `, ` @ `, ` - `.
    /// ` vs. ` comes first because Gamma titles read "Liverpool FC vs.
    /// Newcastle United FC"; with the plain ` vs ` list such a title yields
    /// None. The first separator that yields exactly two non-empty sides wins.
    /// Titles that cannot be split return None.
    pub fn extract_team_names(&self, event_title: &str) -> Option<TeamPair> {
        for separator in TITLE_SEPARATORS {
            let parts: Vec<&str> = event_title.split(separator).map(str::trim).collect();

            if let [home, away] = parts.as_slice() {
                if !home.is_empty() && !away.is_empty() {
                    return Some(TeamPair {
                        home: self.to_canonical(home),
                        away: self.to_canonical(away),
                    });
                }
            }
        }

        None
    }

    /// Check if two names refer to the same team
    pub fn names_match(&self, name_a: &str, name_b: &str) -> bool {
        self.to_canonical(name_a) == self.to_canonical(name_b)
    }

    /// Distinct canonical names known to the table
    pub fn all_canonical_teams(&self) -> &[String] {
        &self.teams
    }

    /// Add a short name mapping
    pub fn add_alias(&mut self, alias: &str, canonical: &str) {
        self.remember(canonical);
        self.canonical
            .insert(alias.to_string(), canonical.to_string());
    }

    /// Set the display name of a canonical team
    pub fn set_display(&mut self, canonical: &str, display: &str) {
        self.remember(canonical);
        self.display
            .insert(canonical.to_string(), display.to_string());
    }

    fn remember(&mut self, canonical: &str) {
        if !self.teams.iter().any(|t| t == canonical) {
            self.teams.push(canonical.to_string());
        }
    }
}
