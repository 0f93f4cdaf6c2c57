//! View selection with back history

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    Calendar,
    Tasks,
    Import,
}

impl View {
    pub const ALL: [View; 4] = [View::Dashboard, View::Calendar, View::Tasks, View::Import];

    pub fn label(&self) -> &'static str {
        match self {
            View::Dashboard => "Dashboard",
            View::Calendar => "Calendar",
            View::Tasks => "Tasks",
            View::Import => "Import",
        }
    }

    /// Digit shortcut shown in the sidebar.
    pub fn shortcut(&self) -> char {
        match self {
            View::Dashboard => '1',
            View::Calendar => '2',
            View::Tasks => '3',
            View::Import => '4',
        }
    }

    pub fn from_shortcut(c: char) -> Option<Self> {
        View::ALL.iter().copied().find(|v| v.shortcut() == c)
    }

    pub fn next(&self) -> Self {
        let idx = View::ALL.iter().position(|v| v == self).unwrap_or(0);
        View::ALL[(idx + 1) % View::ALL.len()]
    }
}

#[derive(Debug, Default)]
pub struct Navigator {
    current: View,
    history: Vec<View>,
}

impl Navigator {
    pub fn current(&self) -> View {
        self.current
    }

    pub fn go(&mut self, view: View) {
        if view != self.current {
            self.history.push(self.current);
            self.current = view;
        }
    }

    /// Returns to the previous view; false when there is none.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(view) => {
                self.current = view;
                true
            }
            None => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_dashboard() {
        let nav = Navigator::default();
        assert_eq!(nav.current(), View::Dashboard);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_go_and_back() {
        let mut nav = Navigator::default();
        nav.go(View::Tasks);
        nav.go(View::Calendar);
        assert_eq!(nav.current(), View::Calendar);
        assert!(nav.back());
        assert_eq!(nav.current(), View::Tasks);
        assert!(nav.back());
        assert_eq!(nav.current(), View::Dashboard);
        assert!(!nav.back());
        assert_eq!(nav.current(), View::Dashboard);
    }

    #[test]
    fn test_go_to_same_view_does_not_push() {
        let mut nav = Navigator::default();
        nav.go(View::Dashboard);
        assert!(!nav.can_go_back());
    }

    #[test]
    fn test_shortcuts() {
        assert_eq!(View::from_shortcut('4'), Some(View::Import));
        assert_eq!(View::from_shortcut('9'), None);
        assert_eq!(View::Import.next(), View::Dashboard);
    }
}
