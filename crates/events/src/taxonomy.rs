//! Outcome code classification.

/// Classified result of a single event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Single, double, triple or home run.
    Hit,
    /// Strikeout.
    Strikeout,
    /// Walk.
    Walk,
    /// Anything else, including non-terminal pitches.
    Other,
}

/// Which outcome codes count as hits, strikeouts and walks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomeTaxonomy {
    /// Codes counted as hits.
    pub hits: Vec<String>,
    /// Codes counted as strikeouts.
    pub strikeouts: Vec<String>,
    /// Codes counted as walks.
    pub walks: Vec<String>,
}

impl Default for OutcomeTaxonomy {
    fn default() -> Self {
        Self {
            hits: ["single", "double", "triple", "home_run"].map(String::from).to_vec(),
            strikeouts: vec!["strikeout".to_string()],
            walks: vec!["walk".to_string()],
        }
    }
}

impl OutcomeTaxonomy {
    /// Classify an outcome code. Missing codes are [`Outcome::Other`].
    #[must_use]
    pub fn classify(&self, code: Option<&str>) -> Outcome {
        let Some(code) = code.map(str::trim) else {
            return Outcome::Other;
        };

        if self.hits.iter().any(|c| c == code) {
            Outcome::Hit
        } else if self.strikeouts.iter().any(|c| c == code) {
            Outcome::Strikeout
        } else if self.walks.iter().any(|c| c == code) {
            Outcome::Walk
        } else {
            Outcome::Other
        }
    }

    /// Codes listed under more than one outcome.
    ///
    /// A valid taxonomy keeps hit, strikeout and walk mutually exclusive.
    #[must_use]
    pub fn overlapping_codes(&self) -> Vec<String> {
        let mut overlaps: Vec<String> = self
            .hits
            .iter()
            .chain(&self.strikeouts)
            .chain(&self.walks)
            .filter(|code| {
                let lists = [&self.hits, &self.strikeouts, &self.walks];
                lists.iter().filter(|list| list.contains(*code)).count() > 1
            })
            .cloned()
            .collect();
        overlaps.sort();
        overlaps.dedup();
        overlaps
    }
}
