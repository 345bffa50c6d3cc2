use crate::score::Grade;

/// Consecutive S grades in the current session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Streak(u32);

impl Streak {
    /// Icons shown before the dock switches to `+k`.
    pub const MAX_ICONS: u32 = 8;

    pub fn new(count: u32) -> Self {
        Self(count)
    }

    pub fn count(&self) -> u32 {
        self.0
    }

    /// S extends the streak, anything else resets it.
    #[must_use]
    pub fn record(self, grade: Grade) -> Self {
        match grade {
            Grade::S => Self(self.0.saturating_add(1)),
            _ => Self(0),
        }
    }

    /// Trophy row for the dock: one icon per S, capped at eight, then ` +k`.
    pub fn dock_label(&self) -> String {
        if self.0 == 0 {
            return "🏆×0".to_string();
        }
        let icons = self.0.min(Self::MAX_ICONS);
        let more = self.0 - icons;
        let mut label = "🏆".repeat(icons as usize);
        if more > 0 {
            label.push_str(&format!(" +{more}"));
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_s_then_a_resets() {
        let streak = Streak::default()
            .record(Grade::S)
            .record(Grade::S)
            .record(Grade::S);
        assert_eq!(streak.count(), 3);
        assert_eq!(streak.record(Grade::A).count(), 0);
    }

    #[test]
    fn every_non_s_grade_resets() {
        for grade in [Grade::A, Grade::B, Grade::C, Grade::F] {
            assert_eq!(Streak::new(5).record(grade), Streak::default());
        }
    }

    #[test]
    fn dock_label() {
        assert_eq!(Streak::new(0).dock_label(), "🏆×0");
        assert_eq!(Streak::new(2).dock_label(), "🏆🏆");
        assert_eq!(Streak::new(8).dock_label(), "🏆".repeat(8));
        assert_eq!(Streak::new(11).dock_label(), format!("{} +3", "🏆".repeat(8)));
    }
}
