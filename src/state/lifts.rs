//! Approved lifts entered by the coach

use super::error::FormError;

/// One approved lift
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiftEntry {
    pub name: String,
    pub rep_range: String,
    pub notes: String,
}

impl LiftEntry {
    pub fn get(&self, field: LiftField) -> &str {
        match field {
            LiftField::Name => &self.name,
            LiftField::RepRange => &self.rep_range,
            LiftField::Notes => &self.notes,
        }
    }

    fn set(&mut self, field: LiftField, value: String) {
        match field {
            LiftField::Name => self.name = value,
            LiftField::RepRange => self.rep_range = value,
            LiftField::Notes => self.notes = value,
        }
    }

    pub fn is_filled(&self) -> bool {
        !self.name.is_empty() && !self.rep_range.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiftField {
    Name,
    RepRange,
    Notes,
}

impl LiftField {
    pub const ALL: [LiftField; 3] = [LiftField::Name, LiftField::RepRange, LiftField::Notes];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Lift Name",
            Self::RepRange => "Preferred Rep Range",
            Self::Notes => "Notes",
        }
    }
}

/// Ordered list of lifts that always holds at least one entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiftList {
    entries: Vec<LiftEntry>,
}

impl Default for LiftList {
    fn default() -> Self {
        Self::new()
    }
}

impl LiftList {
    pub fn new() -> Self {
        Self {
            entries: vec![LiftEntry::default()],
        }
    }

    /// Build from existing entries; an empty input yields one blank entry
    #[cfg(test)]
    pub fn from_entries(entries: Vec<LiftEntry>) -> Self {
        if entries.is_empty() {
            Self::new()
        } else {
            Self { entries }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn as_slice(&self) -> &[LiftEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LiftEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&LiftEntry> {
        self.entries.get(index)
    }

    /// Whether the Remove action may be offered
    pub fn can_remove(&self) -> bool {
        self.entries.len() > 1
    }

    pub fn push_empty(&mut self) {
        self.entries.push(LiftEntry::default());
    }

    pub fn update(&mut self, index: usize, field: LiftField, value: String) -> Result<(), FormError> {
        let len = self.entries.len();
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(FormError::LiftIndexOutOfBounds { index, len })?;
        entry.set(field, value);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<LiftEntry, FormError> {
        let len = self.entries.len();
        if index >= len {
            return Err(FormError::LiftIndexOutOfBounds { index, len });
        }
        if !self.can_remove() {
            return Err(FormError::LastLift);
        }
        Ok(self.entries.remove(index))
    }

    pub fn all_filled(&self) -> bool {
        self.entries.iter().all(LiftEntry::is_filled)
    }
}
