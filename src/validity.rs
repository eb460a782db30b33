//! Validity Windows

use jiff::Timestamp;

/// Optional start and end instants bounding when a rule may apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidityWindow {
    /// First instant the rule applies. `None` is unbounded.
    pub start_at: Option<Timestamp>,

    /// Last instant the rule applies. `None` is unbounded.
    pub end_at: Option<Timestamp>,
}

/// Where an instant falls relative to a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPosition {
    /// Before `start_at`.
    NotStarted,

    /// Inside the window.
    Open,

    /// After `end_at`.
    Ended,
}

impl ValidityWindow {
    /// A window open on both sides.
    pub const fn unbounded() -> Self {
        Self {
            start_at: None,
            end_at: None,
        }
    }

    /// Create a window from optional bounds.
    pub const fn new(start_at: Option<Timestamp>, end_at: Option<Timestamp>) -> Self {
        Self { start_at, end_at }
    }

    /// Locate `now` relative to the window. Both bounds are inclusive.
    pub fn position(&self, now: Timestamp) -> WindowPosition {
        if self.start_at.is_some_and(|start| now < start) {
            return WindowPosition::NotStarted;
        }

        if self.end_at.is_some_and(|end| now > end) {
            return WindowPosition::Ended;
        }

        WindowPosition::Open
    }

    /// Whether `now` falls inside the window.
    pub fn contains(&self, now: Timestamp) -> bool {
        self.position(now) == WindowPosition::Open
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn unbounded_window_is_always_open() -> TestResult {
        let now: Timestamp = "2026-03-01T00:00:00Z".parse()?;

        assert!(ValidityWindow::unbounded().contains(now));

        Ok(())
    }

    #[test]
    fn bounds_are_inclusive() -> TestResult {
        let start: Timestamp = "2026-03-01T00:00:00Z".parse()?;
        let end: Timestamp = "2026-03-31T23:59:59Z".parse()?;
        let window = ValidityWindow::new(Some(start), Some(end));

        assert!(window.contains(start));
        assert!(window.contains(end));

        Ok(())
    }

    #[test]
    fn position_reports_which_side_was_missed() -> TestResult {
        let start: Timestamp = "2026-03-01T00:00:00Z".parse()?;
        let end: Timestamp = "2026-03-31T00:00:00Z".parse()?;
        let window = ValidityWindow::new(Some(start), Some(end));

        assert_eq!(
            window.position("2026-02-28T12:00:00Z".parse()?),
            WindowPosition::NotStarted
        );
        assert_eq!(
            window.position("2026-03-15T12:00:00Z".parse()?),
            WindowPosition::Open
        );
        assert_eq!(
            window.position("2026-04-01T00:00:00Z".parse()?),
            WindowPosition::Ended
        );

        Ok(())
    }

    #[test]
    fn open_ended_windows() -> TestResult {
        let pivot: Timestamp = "2026-03-01T00:00:00Z".parse()?;

        let from = ValidityWindow::new(Some(pivot), None);
        let until = ValidityWindow::new(None, Some(pivot));

        assert!(from.contains("2099-01-01T00:00:00Z".parse()?));
        assert!(!from.contains("2000-01-01T00:00:00Z".parse()?));
        assert!(until.contains("2000-01-01T00:00:00Z".parse()?));
        assert!(!until.contains("2099-01-01T00:00:00Z".parse()?));

        Ok(())
    }
}
