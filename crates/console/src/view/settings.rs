use crate::store::EntityStore;
use warden_common::error::AppError;

/// Settings screen: theme flag and collection sizes
#[derive(Default)]
pub struct SettingsView;

impl SettingsView {
    pub fn render(&self, store: &EntityStore) -> Result<String, AppError> {
        Ok([
            "Settings".to_string(),
            format!(
                "  Theme: {} (enter 'theme' to toggle)",
                if store.is_dark_theme() { "dark" } else { "light" }
            ),
            format!("  Users: {}", store.users()?.len()),
            format!("  Roles: {}", store.roles()?.len()),
            format!("  Permissions: {}", store.permissions()?.len()),
        ]
        .join("\n"))
    }
}

/// Unit tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::create_seeded_store;
    use crate::store::Action;

    #[test]
    fn settings_render() {
        let mut store = create_seeded_store();
        store.dispatch(Action::ToggleTheme).unwrap();

        let rendered = SettingsView.render(&store).unwrap();

        assert_eq!(
            rendered,
            "Settings\n  Theme: dark (enter 'theme' to toggle)\n  Users: 3\n  Roles: 3\n  Permissions: 4"
        );
    }
}
