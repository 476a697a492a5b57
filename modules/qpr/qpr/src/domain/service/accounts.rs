//! Registration, login and HOD account administration.

use std::collections::BTreeSet;
use std::sync::Arc;

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::RngCore;
use qpr_sdk::Role;
use tracing::{info, instrument, warn};

use crate::config::QprConfig;
use crate::domain::error::DomainError;
use crate::domain::model::{HodRename, Identity, NewAccountRecord, Profile};
use crate::domain::repos::ProfilesRepository;
use crate::domain::service::require_admin;

/// A self-service registration, always creating a `user`-role account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub employee_code: String,
    pub password: String,
    pub password_confirm: String,
    pub hod_group: String,
}

/// An admin-created HOD account.
#[derive(Debug, Clone)]
pub struct NewHod {
    pub employee_code: String,
    pub name: String,
    pub email: String,
}

pub struct AccountsService {
    profiles: Arc<dyn ProfilesRepository>,
    config: QprConfig,
}

impl AccountsService {
    pub fn new(profiles: Arc<dyn ProfilesRepository>, config: QprConfig) -> Self {
        Self { profiles, config }
    }

    /// Register a new user account; the profile is created in the same
    /// transaction as the credentials.
    #[instrument(skip(self, registration), fields(employee_code = %registration.employee_code))]
    pub async fn register(&self, registration: Registration) -> Result<Identity, DomainError> {
        if registration.employee_code.trim().is_empty() {
            return Err(DomainError::validation(
                "employee_code",
                "employee code is required",
            ));
        }
        if registration.hod_group.trim().is_empty() {
            return Err(DomainError::validation("hod_group", "HOD name is required"));
        }
        if registration.password != registration.password_confirm {
            return Err(DomainError::validation(
                "password",
                "passwords do not match",
            ));
        }
        self.check_password_strength(&registration.password)?;

        if self
            .profiles
            .find_by_employee_code(&registration.employee_code)
            .await?
            .is_some()
        {
            return Err(DomainError::validation(
                "employee_code",
                "employee code already registered",
            ));
        }

        let profile = self
            .profiles
            .create_account(NewAccountRecord {
                employee_code: registration.employee_code,
                password_hash: hash_password(&registration.password)?,
                role: Role::User,
                hod_group: Some(registration.hod_group),
                name: None,
                email: None,
                finalized: false,
            })
            .await?;

        info!(account_id = profile.account_id, "registered new user account");
        Ok(identity_of(&profile))
    }

    /// Authenticate by (employee code, password, claimed role). The claimed
    /// role must equal the stored role even when the password is correct.
    #[instrument(skip(self, password), fields(employee_code = %employee_code))]
    pub async fn login(
        &self,
        employee_code: &str,
        password: &str,
        claimed_role: Role,
    ) -> Result<Identity, DomainError> {
        let Some(profile) = self.profiles.find_by_employee_code(employee_code).await? else {
            return Err(DomainError::Unauthenticated);
        };
        if profile.role != claimed_role {
            warn!("login rejected: claimed role does not match profile");
            return Err(DomainError::Unauthenticated);
        }
        let Some(hash) = self.profiles.password_hash(profile.account_id).await? else {
            return Err(DomainError::Unauthenticated);
        };
        if !verify_password(password, &hash) {
            return Err(DomainError::Unauthenticated);
        }

        info!(account_id = profile.account_id, "login succeeded");
        Ok(identity_of(&profile))
    }

    #[instrument(skip_all, fields(account_id = identity.account_id))]
    pub async fn change_password(
        &self,
        identity: &Identity,
        old_password: &str,
        new_password: &str,
        new_password_confirm: &str,
    ) -> Result<(), DomainError> {
        let hash = self
            .profiles
            .password_hash(identity.account_id)
            .await?
            .ok_or(DomainError::NotFound("account"))?;
        if !verify_password(old_password, &hash) {
            return Err(DomainError::validation(
                "old_password",
                "current password is incorrect",
            ));
        }
        if new_password != new_password_confirm {
            return Err(DomainError::validation(
                "new_password",
                "new passwords do not match",
            ));
        }
        self.check_password_strength(new_password)?;

        self.profiles
            .set_password_hash(identity.account_id, &hash_password(new_password)?)
            .await?;
        info!("password changed");
        Ok(())
    }

    /// Admin-only: create a HOD account with the configured default password.
    #[instrument(skip(self, identity, new_hod), fields(employee_code = %new_hod.employee_code))]
    pub async fn create_hod(
        &self,
        identity: &Identity,
        new_hod: NewHod,
    ) -> Result<Profile, DomainError> {
        require_admin(identity)?;

        if new_hod.employee_code.trim().is_empty()
            || new_hod.name.trim().is_empty()
            || new_hod.email.trim().is_empty()
        {
            return Err(DomainError::validation(
                "employee_code",
                "employee code, name, and email are required",
            ));
        }
        if self
            .profiles
            .find_by_employee_code(&new_hod.employee_code)
            .await?
            .is_some()
        {
            return Err(DomainError::validation(
                "employee_code",
                "employee code already exists",
            ));
        }

        let profile = self
            .profiles
            .create_account(NewAccountRecord {
                employee_code: new_hod.employee_code,
                password_hash: hash_password(&self.config.default_hod_password)?,
                role: Role::Hod,
                hod_group: Some(new_hod.name.clone()),
                name: Some(new_hod.name),
                email: Some(new_hod.email),
                finalized: true,
            })
            .await?;

        info!(account_id = profile.account_id, "created HOD account");
        Ok(profile)
    }

    /// Admin-only: rename a HOD and cascade the group label to everyone
    /// under them (case-insensitive match on the old name).
    #[instrument(skip(self, identity, rename), fields(old = %rename.old_employee_code))]
    pub async fn rename_hod(
        &self,
        identity: &Identity,
        rename: HodRename,
    ) -> Result<u64, DomainError> {
        require_admin(identity)?;

        if rename.old_employee_code.trim().is_empty()
            || rename.new_employee_code.trim().is_empty()
            || rename.old_name.trim().is_empty()
            || rename.new_name.trim().is_empty()
        {
            return Err(DomainError::validation(
                "rename",
                "old and new HOD name and employee code are all required",
            ));
        }

        let hod = self
            .profiles
            .find_by_employee_code(&rename.old_employee_code)
            .await?
            .filter(|p| p.role == Role::Hod)
            .ok_or(DomainError::NotFound("HOD"))?;

        if rename.new_employee_code != rename.old_employee_code
            && self
                .profiles
                .find_by_employee_code(&rename.new_employee_code)
                .await?
                .is_some()
        {
            return Err(DomainError::validation(
                "new_employee_code",
                "employee code is already in use",
            ));
        }

        let cascaded = self.profiles.rename_hod(hod.account_id, &rename).await?;
        info!(cascaded, "renamed HOD group");
        Ok(cascaded)
    }

    /// HOD-group names offered on the registration form: every HOD group
    /// plus the display names of users who are their own group.
    pub async fn hod_group_options(&self) -> Result<Vec<String>, DomainError> {
        let mut names = BTreeSet::new();
        for hod in self.profiles.list_by_role(Role::Hod).await? {
            if let Some(group) = hod.hod_group.filter(|g| !g.is_empty()) {
                names.insert(group);
            }
        }
        for user in self.profiles.list_by_role(Role::User).await? {
            if user.hod_group.as_deref().is_none_or(str::is_empty) {
                names.insert(user.display_name().to_owned());
            }
        }
        Ok(names.into_iter().collect())
    }

    fn check_password_strength(&self, password: &str) -> Result<(), DomainError> {
        if password.len() < self.config.min_password_len {
            return Err(DomainError::validation(
                "password",
                format!(
                    "password must be at least {} characters long",
                    self.config.min_password_len
                ),
            ));
        }
        Ok(())
    }
}

pub(crate) fn identity_of(profile: &Profile) -> Identity {
    Identity {
        account_id: profile.account_id,
        employee_code: profile.employee_code.clone(),
        role: profile.role,
    }
}

fn hash_password(password: &str) -> Result<String, DomainError> {
    let mut salt_bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut salt_bytes);
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| DomainError::Internal(format!("salt encoding failed: {e}")))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| DomainError::Internal(format!("password hashing failed: {e}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .and_then(|parsed| Argon2::default().verify_password(password.as_bytes(), &parsed))
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::service::test_support::InMemoryProfiles;

    fn service() -> (Arc<InMemoryProfiles>, AccountsService) {
        let repo = Arc::new(InMemoryProfiles::default());
        let svc = AccountsService::new(repo.clone(), QprConfig::default());
        (repo, svc)
    }

    fn registration(code: &str) -> Registration {
        Registration {
            employee_code: code.to_owned(),
            password: "secret1".to_owned(),
            password_confirm: "secret1".to_owned(),
            hod_group: "gayathri".to_owned(),
        }
    }

    #[tokio::test]
    async fn register_then_login_round_trip() {
        let (_, svc) = service();
        let identity = svc.register(registration("905")).await.unwrap();
        assert_eq!(identity.role, Role::User);

        let again = svc.login("905", "secret1", Role::User).await.unwrap();
        assert_eq!(again.account_id, identity.account_id);
    }

    #[tokio::test]
    async fn duplicate_employee_code_is_rejected_and_original_kept() {
        let (repo, svc) = service();
        svc.register(registration("905")).await.unwrap();

        let err = svc.register(registration("905")).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));

        let kept = repo.find_by_employee_code("905").await.unwrap().unwrap();
        assert_eq!(kept.role, Role::User);
        assert_eq!(kept.hod_group.as_deref(), Some("gayathri"));
    }

    #[tokio::test]
    async fn login_with_wrong_claimed_role_fails() {
        let (_, svc) = service();
        svc.register(registration("905")).await.unwrap();

        let err = svc.login("905", "secret1", Role::Hod).await.unwrap_err();
        assert!(matches!(err, DomainError::Unauthenticated));
    }

    #[tokio::test]
    async fn weak_password_is_rejected() {
        let (_, svc) = service();
        let mut reg = registration("906");
        reg.password = "abc".to_owned();
        reg.password_confirm = "abc".to_owned();
        let err = svc.register(reg).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[tokio::test]
    async fn create_hod_requires_admin() {
        let (_, svc) = service();
        let user = svc.register(registration("905")).await.unwrap();
        let err = svc
            .create_hod(
                &user,
                NewHod {
                    employee_code: "910".to_owned(),
                    name: "Ram".to_owned(),
                    email: "ram@office.gov".to_owned(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::PermissionDenied(_)));
    }

    #[tokio::test]
    async fn created_hod_can_log_in_with_default_password() {
        let (repo, svc) = service();
        let admin = repo.seed(NewAccountRecord {
            employee_code: "1".to_owned(),
            password_hash: hash_password("secret1").unwrap(),
            role: Role::Admin,
            hod_group: None,
            name: Some("Manager".to_owned()),
            email: None,
            finalized: true,
        });
        let admin = identity_of(&admin);

        svc.create_hod(
            &admin,
            NewHod {
                employee_code: "910".to_owned(),
                name: "Ram".to_owned(),
                email: "ram@office.gov".to_owned(),
            },
        )
        .await
        .unwrap();

        let identity = svc.login("910", "123456", Role::Hod).await.unwrap();
        assert_eq!(identity.role, Role::Hod);
    }

    #[tokio::test]
    async fn rename_hod_cascades_case_insensitively() {
        let (repo, svc) = service();
        let admin = repo.seed(NewAccountRecord {
            employee_code: "1".to_owned(),
            password_hash: "x".to_owned(),
            role: Role::Admin,
            hod_group: None,
            name: None,
            email: None,
            finalized: true,
        });
        let admin = identity_of(&admin);
        repo.seed(NewAccountRecord {
            employee_code: "910".to_owned(),
            password_hash: "x".to_owned(),
            role: Role::Hod,
            hod_group: Some("ram".to_owned()),
            name: Some("ram".to_owned()),
            email: None,
            finalized: true,
        });
        for (code, group) in [("20", "RAM"), ("21", "Ram"), ("22", "shyam")] {
            repo.seed(NewAccountRecord {
                employee_code: code.to_owned(),
                password_hash: "x".to_owned(),
                role: Role::User,
                hod_group: Some(group.to_owned()),
                name: None,
                email: None,
                finalized: false,
            });
        }

        let cascaded = svc
            .rename_hod(
                &admin,
                HodRename {
                    old_employee_code: "910".to_owned(),
                    new_employee_code: "910".to_owned(),
                    old_name: "ram".to_owned(),
                    new_name: "Ram Kumar".to_owned(),
                },
            )
            .await
            .unwrap();
        assert_eq!(cascaded, 2);

        for code in ["20", "21"] {
            let p = repo.find_by_employee_code(code).await.unwrap().unwrap();
            assert_eq!(p.hod_group.as_deref(), Some("Ram Kumar"));
        }
        let untouched = repo.find_by_employee_code("22").await.unwrap().unwrap();
        assert_eq!(untouched.hod_group.as_deref(), Some("shyam"));
    }
}
