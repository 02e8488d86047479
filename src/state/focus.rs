//! Keyboard focus and tab order for the signup form

use super::coach::{CoachField, CoachInfo, ProgramStyle, TargetAudience};
use super::lifts::{LiftField, LiftList};

/// A focusable element of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Coach(CoachField),
    /// Radio option by index into `ProgramStyle::options()`
    ProgramStyle(usize),
    ProgramFrequency,
    Audience(TargetAudience),
    Lift(usize, LiftField),
    RemoveLift(usize),
    AddLift,
    FilePath,
    PreferDiscussion,
    Submit,
}

impl Default for FormFocus {
    fn default() -> Self {
        FormFocus::Coach(CoachField::FirstName)
    }
}

/// Editable text slot behind a focus target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTarget {
    Coach(CoachField),
    Lift(usize, LiftField),
    FilePath,
}

impl FormFocus {
    pub fn text_target(&self) -> Option<TextTarget> {
        match *self {
            FormFocus::Coach(field) => Some(TextTarget::Coach(field)),
            FormFocus::Lift(index, field) => Some(TextTarget::Lift(index, field)),
            FormFocus::FilePath => Some(TextTarget::FilePath),
            _ => None,
        }
    }

    /// Lift the focus belongs to, if any
    pub fn lift_index(&self) -> Option<usize> {
        match *self {
            FormFocus::Lift(index, _) | FormFocus::RemoveLift(index) => Some(index),
            _ => None,
        }
    }
}

/// Tab order for the current form contents
pub fn focus_order(coach: &CoachInfo, lifts: &LiftList) -> Vec<FormFocus> {
    let mut order = vec![
        FormFocus::Coach(CoachField::FirstName),
        FormFocus::Coach(CoachField::LastName),
        FormFocus::Coach(CoachField::Email),
        FormFocus::Coach(CoachField::Phone),
        FormFocus::Coach(CoachField::Company),
    ];

    order.extend((0..ProgramStyle::options().len()).map(FormFocus::ProgramStyle));
    if coach.text(CoachField::OtherStyle).is_some() {
        order.push(FormFocus::Coach(CoachField::OtherStyle));
    }

    order.push(FormFocus::ProgramFrequency);
    if coach.text(CoachField::OtherFrequency).is_some() {
        order.push(FormFocus::Coach(CoachField::OtherFrequency));
    }

    order.extend(TargetAudience::ALL.into_iter().map(FormFocus::Audience));

    for index in 0..lifts.len() {
        order.extend(LiftField::ALL.into_iter().map(|f| FormFocus::Lift(index, f)));
        if lifts.can_remove() {
            order.push(FormFocus::RemoveLift(index));
        }
    }

    order.extend([
        FormFocus::AddLift,
        FormFocus::FilePath,
        FormFocus::PreferDiscussion,
        FormFocus::Coach(CoachField::AdditionalNotes),
        FormFocus::Submit,
    ]);
    order
}

/// Map a focus that no longer exists onto the closest element that does
pub fn nearest_valid(focus: FormFocus, order: &[FormFocus], lift_count: usize) -> FormFocus {
    if order.contains(&focus) {
        return focus;
    }
    let last_lift = lift_count.saturating_sub(1);
    let fallback = match focus {
        FormFocus::Coach(CoachField::OtherStyle) => FormFocus::ProgramStyle(2),
        FormFocus::Coach(CoachField::OtherFrequency) => FormFocus::ProgramFrequency,
        FormFocus::Lift(index, field) => FormFocus::Lift(index.min(last_lift), field),
        FormFocus::RemoveLift(index) => FormFocus::Lift(index.min(last_lift), LiftField::Name),
        _ => FormFocus::default(),
    };
    if order.contains(&fallback) {
        fallback
    } else {
        FormFocus::default()
    }
}

/// Next element in tab order (wraps around)
pub fn next_in(order: &[FormFocus], current: FormFocus) -> FormFocus {
    match order.iter().position(|f| *f == current) {
        Some(pos) => order[(pos + 1) % order.len()],
        None => order.first().copied().unwrap_or_default(),
    }
}

/// Previous element in tab order (wraps around)
pub fn prev_in(order: &[FormFocus], current: FormFocus) -> FormFocus {
    match order.iter().position(|f| *f == current) {
        Some(0) | None => order.last().copied().unwrap_or_default(),
        Some(pos) => order[pos - 1],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::coach::{CoachUpdate, ProgramFrequency};

    #[test]
    fn test_default_order_has_no_other_inputs() {
        let order = focus_order(&CoachInfo::default(), &LiftList::new());
        assert!(!order.contains(&FormFocus::Coach(CoachField::OtherStyle)));
        assert!(!order.contains(&FormFocus::Coach(CoachField::OtherFrequency)));
        assert!(!order.contains(&FormFocus::RemoveLift(0)));
        assert_eq!(order.first(), Some(&FormFocus::Coach(CoachField::FirstName)));
        assert_eq!(order.last(), Some(&FormFocus::Submit));
    }

    #[test]
    fn test_other_inputs_follow_their_selector() {
        let mut coach = CoachInfo::default();
        coach.apply(CoachUpdate::ProgramStyle(Some(ProgramStyle::Other(String::new()))));
        coach.apply(CoachUpdate::ProgramFrequency(Some(ProgramFrequency::Other(
            String::new(),
        ))));
        let order = focus_order(&coach, &LiftList::new());

        let style_pos = order.iter().position(|f| *f == FormFocus::ProgramStyle(2)).unwrap();
        assert_eq!(order[style_pos + 1], FormFocus::Coach(CoachField::OtherStyle));
        let freq_pos = order
            .iter()
            .position(|f| *f == FormFocus::ProgramFrequency)
            .unwrap();
        assert_eq!(order[freq_pos + 1], FormFocus::Coach(CoachField::OtherFrequency));
    }

    #[test]
    fn test_remove_offered_only_with_several_lifts() {
        let mut lifts = LiftList::new();
        lifts.push_empty();
        let order = focus_order(&CoachInfo::default(), &lifts);
        assert!(order.contains(&FormFocus::RemoveLift(0)));
        assert!(order.contains(&FormFocus::RemoveLift(1)));
    }

    #[test]
    fn test_next_and_prev_wrap() {
        let order = focus_order(&CoachInfo::default(), &LiftList::new());
        assert_eq!(next_in(&order, FormFocus::Submit), FormFocus::default());
        assert_eq!(prev_in(&order, FormFocus::default()), FormFocus::Submit);
        assert_eq!(
            next_in(&order, FormFocus::default()),
            FormFocus::Coach(CoachField::LastName)
        );
    }

    #[test]
    fn test_nearest_valid_after_style_change() {
        let order = focus_order(&CoachInfo::default(), &LiftList::new());
        assert_eq!(
            nearest_valid(FormFocus::Coach(CoachField::OtherStyle), &order, 1),
            FormFocus::ProgramStyle(2)
        );
        assert_eq!(
            nearest_valid(FormFocus::Lift(4, LiftField::Notes), &order, 1),
            FormFocus::Lift(0, LiftField::Notes)
        );
        assert_eq!(
            nearest_valid(FormFocus::RemoveLift(0), &order, 1),
            FormFocus::Lift(0, LiftField::Name)
        );
    }

    #[test]
    fn test_text_target() {
        assert_eq!(
            FormFocus::Lift(1, LiftField::Notes).text_target(),
            Some(TextTarget::Lift(1, LiftField::Notes))
        );
        assert_eq!(FormFocus::AddLift.text_target(), None);
        assert_eq!(FormFocus::RemoveLift(2).lift_index(), Some(2));
    }
}
