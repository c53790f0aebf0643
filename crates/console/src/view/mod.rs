pub mod permission_list;
pub mod role_list;
pub mod settings;
pub mod user_list;

use warden_common::model::permission::Permission;
use warden_common::model::role::Role;
use warden_common::model::user::User;

/// Entity fields consulted by list view search
pub trait Searchable {
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.email, &self.role.name]
    }
}

impl Searchable for Role {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name]
    }
}

impl Searchable for Permission {
    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.description]
    }
}

/// Case-insensitive substring match against any of the entity's search fields. An empty query
/// matches everything.
pub fn matches_query<T: Searchable>(entity: &T, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    query.is_empty()
        || entity
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&query))
}

/// Keep the entities matching query (collection order retained)
pub fn filter_by_query<T: Searchable + Clone>(entities: &[T], query: &str) -> Vec<T> {
    entities
        .iter()
        .filter(|entity| matches_query(*entity, query))
        .cloned()
        .collect()
}

/// Heading line shared by the list views
pub(crate) fn render_heading(title: &str, shown: usize, total: usize, query: &str) -> String {
    match query.trim().is_empty() {
        true => format!("{} ({} total)", title, total),
        false => format!(
            "{} ({} of {} shown, search=\"{}\")",
            title,
            shown,
            total,
            query.trim()
        ),
    }
}

/// Unit tests
#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::seed;

    #[test]
    fn matches_query_is_case_insensitive() {
        let permission = Permission::new("1", "create:users", "Create users", "users");

        assert!(matches_query(&permission, "CREATE"));
        assert!(matches_query(&permission, "Users"));
        assert!(!matches_query(&permission, "roles"));
    }

    #[test]
    fn matches_query_when_empty_query() {
        let role = Role::new("1", "Admin", "Full system access", &[]);

        assert!(matches_query(&role, ""));
        assert!(matches_query(&role, "   "));
    }

    #[test]
    fn matches_query_role_ignores_description() {
        let role = Role::new("1", "Admin", "Full system access", &[]);

        assert!(!matches_query(&role, "system"));
    }

    #[test]
    fn filter_by_query_user_email_only_match() {
        let users = seed::seed_users();

        let filtered = filter_by_query(&users, "JANE@example");

        assert_eq!(filtered, vec![users[1].clone()]);
    }

    #[test]
    fn filter_by_query_user_role_name_match() {
        let users = seed::seed_users();

        let filtered = filter_by_query(&users, "viewer");

        assert_eq!(filtered, vec![users[2].clone()]);
    }

    #[test]
    fn filter_by_query_keeps_order() {
        let users = seed::seed_users();

        let filtered = filter_by_query(&users, "mi");

        let user_ids: Vec<&str> = filtered.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(user_ids, vec!["1", "2"]);
    }

    #[test]
    fn render_heading_with_and_without_query() {
        assert_eq!(render_heading("Users", 3, 3, ""), "Users (3 total)");
        assert_eq!(
            render_heading("Users", 1, 3, " jane "),
            "Users (1 of 3 shown, search=\"jane\")"
        );
    }
}
