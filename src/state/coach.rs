//! Coach profile data collected by the signup form

use std::collections::BTreeSet;

/// Training split the coach programs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramStyle {
    PushPullLegs,
    UpperLower,
    Other(String),
}

impl ProgramStyle {
    /// Radio options in display order (the `Other` payload starts empty)
    pub fn options() -> [ProgramStyle; 3] {
        [
            ProgramStyle::PushPullLegs,
            ProgramStyle::UpperLower,
            ProgramStyle::Other(String::new()),
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::PushPullLegs => "Push / Pull / Legs",
            Self::UpperLower => "Upper / Lower",
            Self::Other(_) => "Other",
        }
    }

    /// Whether two values are the same radio option, ignoring the `Other` text
    pub fn same_option(&self, other: &ProgramStyle) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn other_text(&self) -> Option<&str> {
        match self {
            Self::Other(text) => Some(text),
            _ => None,
        }
    }
}

/// Training days per week
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramFrequency {
    OneDay,
    TwoDays,
    ThreeDays,
    FourDays,
    FiveDays,
    SixDays,
    Other(String),
}

impl ProgramFrequency {
    /// Select options in display order
    pub fn options() -> [ProgramFrequency; 7] {
        [
            ProgramFrequency::OneDay,
            ProgramFrequency::TwoDays,
            ProgramFrequency::ThreeDays,
            ProgramFrequency::FourDays,
            ProgramFrequency::FiveDays,
            ProgramFrequency::SixDays,
            ProgramFrequency::Other(String::new()),
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::OneDay => "1 day/week",
            Self::TwoDays => "2 days/week",
            Self::ThreeDays => "3 days/week",
            Self::FourDays => "4 days/week",
            Self::FiveDays => "5 days/week",
            Self::SixDays => "6 days/week",
            Self::Other(_) => "Other",
        }
    }

    pub fn other_text(&self) -> Option<&str> {
        match self {
            Self::Other(text) => Some(text),
            _ => None,
        }
    }

    fn position(&self) -> usize {
        Self::options()
            .iter()
            .position(|option| std::mem::discriminant(option) == std::mem::discriminant(self))
            .unwrap_or(0)
    }

    /// Cycle forward through "no selection" and the seven options
    pub fn cycle_next(current: Option<&ProgramFrequency>) -> Option<ProgramFrequency> {
        let options = Self::options();
        match current {
            None => Some(options[0].clone()),
            Some(freq) => options.get(freq.position() + 1).cloned(),
        }
    }

    /// Cycle backward through "no selection" and the seven options
    pub fn cycle_prev(current: Option<&ProgramFrequency>) -> Option<ProgramFrequency> {
        let options = Self::options();
        match current {
            None => options.last().cloned(),
            Some(freq) => match freq.position() {
                0 => None,
                n => Some(options[n - 1].clone()),
            },
        }
    }
}

/// Audience the coach trains
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TargetAudience {
    Beginners,
    Intermediate,
    Competitive,
    GenPop,
    Other,
}

impl TargetAudience {
    pub const ALL: [TargetAudience; 5] = [
        TargetAudience::Beginners,
        TargetAudience::Intermediate,
        TargetAudience::Competitive,
        TargetAudience::GenPop,
        TargetAudience::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginners => "Beginners",
            Self::Intermediate => "Intermediate lifters",
            Self::Competitive => "Competitive athletes",
            Self::GenPop => "Gen pop / general fitness",
            Self::Other => "Other",
        }
    }
}

/// Free-text coach fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoachField {
    FirstName,
    LastName,
    Email,
    Phone,
    Company,
    OtherStyle,
    OtherFrequency,
    AdditionalNotes,
}

impl CoachField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Email => "Email",
            Self::Phone => "Phone Number",
            Self::Company => "Company Name (optional)",
            Self::OtherStyle => "Specify other style",
            Self::OtherFrequency => "Specify other frequency",
            Self::AdditionalNotes => "Additional Notes",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, Self::AdditionalNotes)
    }
}

/// A single replacement of one coach field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoachUpdate {
    Text(CoachField, String),
    ProgramStyle(Option<ProgramStyle>),
    ProgramFrequency(Option<ProgramFrequency>),
    PreferDiscussion(bool),
}

/// Coach profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoachInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub program_style: Option<ProgramStyle>,
    pub program_frequency: Option<ProgramFrequency>,
    pub additional_notes: String,
    pub prefer_discussion: bool,
    pub target_audience: BTreeSet<TargetAudience>,
}

impl CoachInfo {
    /// Current text of a field; `None` when the field does not exist right now
    /// (the "other" inputs without an `Other` selection)
    pub fn text(&self, field: CoachField) -> Option<&str> {
        match field {
            CoachField::FirstName => Some(&self.first_name),
            CoachField::LastName => Some(&self.last_name),
            CoachField::Email => Some(&self.email),
            CoachField::Phone => Some(&self.phone),
            CoachField::Company => Some(self.company.as_deref().unwrap_or("")),
            CoachField::OtherStyle => self.program_style.as_ref().and_then(|s| s.other_text()),
            CoachField::OtherFrequency => self
                .program_frequency
                .as_ref()
                .and_then(|f| f.other_text()),
            CoachField::AdditionalNotes => Some(&self.additional_notes),
        }
    }

    /// Replace one field. Text for a missing "other" slot is dropped.
    pub fn apply(&mut self, update: CoachUpdate) {
        match update {
            CoachUpdate::Text(field, value) => self.set_text(field, value),
            CoachUpdate::ProgramStyle(style) => self.program_style = style,
            CoachUpdate::ProgramFrequency(freq) => self.program_frequency = freq,
            CoachUpdate::PreferDiscussion(value) => self.prefer_discussion = value,
        }
    }

    fn set_text(&mut self, field: CoachField, value: String) {
        match field {
            CoachField::FirstName => self.first_name = value,
            CoachField::LastName => self.last_name = value,
            CoachField::Email => self.email = value,
            CoachField::Phone => self.phone = value,
            CoachField::Company => {
                self.company = if value.is_empty() { None } else { Some(value) };
            }
            CoachField::OtherStyle => {
                if let Some(ProgramStyle::Other(text)) = self.program_style.as_mut() {
                    *text = value;
                }
            }
            CoachField::OtherFrequency => {
                if let Some(ProgramFrequency::Other(text)) = self.program_frequency.as_mut() {
                    *text = value;
                }
            }
            CoachField::AdditionalNotes => self.additional_notes = value,
        }
    }

    /// Add the audience if absent, remove it if present
    pub fn toggle_audience(&mut self, audience: TargetAudience) {
        if !self.target_audience.remove(&audience) {
            self.target_audience.insert(audience);
        }
    }

    /// Required contact fields are all filled in
    pub fn has_contact_details(&self) -> bool {
        !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && !self.email.is_empty()
            && !self.phone.is_empty()
    }
}
