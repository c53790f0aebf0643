use std::fmt::{self, Display, Formatter};

use clap::ValueEnum;

/// Navigation targets
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum View {
    #[default]
    Users,
    Roles,
    Permissions,
    Settings,
}

impl Display for View {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            View::Users => write!(f, "users"),
            View::Roles => write!(f, "roles"),
            View::Permissions => write!(f, "permissions"),
            View::Settings => write!(f, "settings"),
        }
    }
}

/// Tracks the active view. Holds no entity data.
#[derive(Default)]
pub struct NavigationShell {
    active_view: View,
}

impl NavigationShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_view(&self) -> View {
        self.active_view
    }

    /// Switch active view. Returns true if the view changed.
    pub fn navigate(&mut self, view: View) -> bool {
        let changed = self.active_view != view;
        self.active_view = view;
        changed
    }

    /// Sidebar line, with the active view marked
    pub fn render_menu(&self) -> String {
        View::value_variants()
            .iter()
            .map(|view| match *view == self.active_view {
                true => format!("[{}]", view),
                false => view.to_string(),
            })
            .collect::<Vec<String>>()
            .join(" | ")
    }
}

/// Unit tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navshell_new_defaults_to_users() {
        assert_eq!(NavigationShell::new().active_view(), View::Users);
    }

    #[test]
    fn navshell_navigate() {
        let mut navigation = NavigationShell::new();

        assert!(navigation.navigate(View::Settings));
        assert_eq!(navigation.active_view(), View::Settings);
        assert!(!navigation.navigate(View::Settings));
    }

    #[test]
    fn navshell_render_menu() {
        let mut navigation = NavigationShell::new();
        navigation.navigate(View::Roles);

        assert_eq!(
            navigation.render_menu(),
            "users | [roles] | permissions | settings"
        );
    }

    #[test]
    fn view_from_str() {
        assert_eq!(View::from_str("permissions", true), Ok(View::Permissions));
        assert!(View::from_str("reports", true).is_err());
    }
}
