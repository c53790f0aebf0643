use std::env;
use std::sync::{Arc, Mutex, MutexGuard};

use clap::*;

use crate::repository::in_memory_db::permission_repo::InMemPermissionRepo;
use crate::repository::in_memory_db::role_repo::InMemRoleRepo;
use crate::repository::in_memory_db::user_repo::InMemUserRepo;
use crate::repository::permission_repo::PermissionRepository;
use crate::repository::role_repo::RoleRepository;
use crate::repository::seed;
use crate::repository::user_repo::UserRepository;
use warden_common::error::AppError;

/// Datasource configuration for the RBAC entities
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum DataSource {
    /// Built-in seed records, reset on every startup
    #[default]
    SeedData,

    /// In-memory DB, loaded from JSON record files. Entity store connect strings are file paths.
    InMemoryDb,

    /// No DB configured, all collections start empty
    NoDb,
}

#[allow(clippy::type_complexity)]
/// Repository factory closures (respectively for permission, role and user repositories)
pub type RepositoryFactories = (
    Box<dyn Fn() -> Arc<Mutex<dyn PermissionRepository>>>,
    Box<dyn Fn() -> Arc<Mutex<dyn RoleRepository>>>,
    Box<dyn Fn() -> Arc<Mutex<dyn UserRepository>>>,
);

impl DataSource {
    /// Return tuple of repository factory closures (respectively for permission, role and user repositories)
    pub fn repository_factories(&self) -> RepositoryFactories {
        (
            Box::new(|| Arc::new(Mutex::new(InMemPermissionRepo::new()))),
            Box::new(|| Arc::new(Mutex::new(InMemRoleRepo::new()))),
            Box::new(|| Arc::new(Mutex::new(InMemUserRepo::new()))),
        )
    }
}

/// Interactive admin console for managing users, roles and permissions.
#[derive(Parser)]
#[command(author, version, long_about)]
pub struct AppConfigArgs {
    /// Config file (as a shell environment file), using program's environment variable naming (see below).
    /// Note - Each config file variable entry may be overriden via their respective command-line arguments
    /// Note - Must be first argument (if provided)
    #[arg(
        required = false,
        short = 'f',
        long = "config-file",
        env,
        verbatim_doc_comment
    )]
    pub config_file: Option<String>,

    /// DB datasource type
    #[arg(required = false, value_enum, long = "datasource", default_value_t = crate::config::DataSource::SeedData, env)]
    pub datasource: DataSource,

    /// Permission entity store connect specifier string
    #[arg(required = false, long = "permission-db-connect", env)]
    pub permission_db_connect: Option<String>,

    /// Role entity store connect specifier string
    #[arg(required = false, long = "role-db-connect", env)]
    pub role_db_connect: Option<String>,

    /// User entity store connect specifier string
    #[arg(required = false, long = "user-db-connect", env)]
    pub user_db_connect: Option<String>,

    /// Start with the dark theme
    #[arg(required = false, long = "dark-theme", env)]
    pub dark_theme: bool,

    /// Answer yes to every confirmation prompt (non-interactive use)
    #[arg(required = false, long = "assume-yes", env)]
    pub assume_yes: bool,

    /// Enable verbose logging
    #[arg(required = false, long = "verbose", env)]
    pub verbose: bool,
}

/// Console configuration, including the datasource repositories
pub struct AppConfig {
    pub datasource: DataSource,
    pub permission_repo: Arc<Mutex<dyn PermissionRepository>>,
    pub role_repo: Arc<Mutex<dyn RoleRepository>>,
    pub user_repo: Arc<Mutex<dyn UserRepository>>,
    pub dark_theme: bool,
    pub assume_yes: bool,
    pub verbose_logging: bool,
}

impl AppConfig {
    /// Load config
    pub fn new() -> Result<Self, AppError> {
        // Populate environment w/given config file (if provided)
        let mut config_file = env::var_os("CONFIG_FILE");
        if config_file.is_none() && (env::args_os().len() >= 3) {
            let mut args = env::args_os().skip(1);
            if args.next().is_some_and(|arg| arg.eq("-f")) {
                config_file = args.next();
            }
        }

        if let Some(config_filename) = config_file {
            dotenvy::from_filename(config_filename).ok();
        }

        // Parse process arguments
        let config_args = Self::parse_config();

        // Datasource repositories
        let repositories = Self::create_datasource_repositories(
            &config_args.datasource,
            &config_args.permission_db_connect,
            &config_args.role_db_connect,
            &config_args.user_db_connect,
            &config_args.datasource.repository_factories(),
        )?;

        Ok(AppConfig {
            datasource: config_args.datasource,
            permission_repo: repositories.0,
            role_repo: repositories.1,
            user_repo: repositories.2,
            dark_theme: config_args.dark_theme,
            assume_yes: config_args.assume_yes,
            verbose_logging: config_args.verbose,
        })
    }

    #[allow(clippy::type_complexity)]
    /// Instantiate main repositories based on datasource config. Returns tuple of permission, role and user repositories.
    fn create_datasource_repositories(
        datasource: &DataSource,
        permission_db_connect: &Option<String>,
        role_db_connect: &Option<String>,
        user_db_connect: &Option<String>,
        repo_factories: &RepositoryFactories,
    ) -> Result<
        (
            Arc<Mutex<dyn PermissionRepository>>,
            Arc<Mutex<dyn RoleRepository>>,
            Arc<Mutex<dyn UserRepository>>,
        ),
        AppError,
    > {
        let permission_repository = repo_factories.0();
        let role_repository = repo_factories.1();
        let user_repository = repo_factories.2();

        match datasource {
            DataSource::SeedData => {
                Self::lock_repository(&permission_repository)?
                    .replace_all(seed::seed_permissions())?;
                Self::lock_repository(&role_repository)?.replace_all(seed::seed_roles())?;
                Self::lock_repository(&user_repository)?.replace_all(seed::seed_users())?;
            }
            DataSource::InMemoryDb => {
                if let Some(connect_spec) = permission_db_connect {
                    Self::lock_repository(&permission_repository)?
                        .connect_to_datasource(connect_spec)?;
                }
                if let Some(connect_spec) = role_db_connect {
                    Self::lock_repository(&role_repository)?.connect_to_datasource(connect_spec)?;
                }
                if let Some(connect_spec) = user_db_connect {
                    Self::lock_repository(&user_repository)?.connect_to_datasource(connect_spec)?;
                }
            }
            DataSource::NoDb => {}
        }

        Ok((permission_repository, role_repository, user_repository))
    }

    fn lock_repository<T: ?Sized>(repository: &Mutex<T>) -> Result<MutexGuard<'_, T>, AppError> {
        repository.lock().map_err(|err| {
            AppError::General(format!("Failed to access repository lock: err={}", err))
        })
    }

    #[cfg(not(test))]
    #[inline(always)]
    fn parse_config() -> AppConfigArgs {
        AppConfigArgs::parse()
    }

    #[cfg(test)]
    #[inline(always)]
    fn parse_config() -> AppConfigArgs {
        AppConfigArgs::parse_from::<Vec<_>, String>(vec![])
    }
}
