use serde::{Deserialize, Serialize};

/// Module configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QprConfig {
    /// Fiscal year written on records that omit one.
    #[serde(default = "default_year")]
    pub default_year: String,
    /// Minimum accepted password length.
    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
    /// Initial password assigned to admin-created HOD accounts.
    #[serde(default = "default_hod_password")]
    pub default_hod_password: String,
}

impl Default for QprConfig {
    fn default() -> Self {
        Self {
            default_year: default_year(),
            min_password_len: default_min_password_len(),
            default_hod_password: default_hod_password(),
        }
    }
}

fn default_year() -> String {
    "2025-2026".to_owned()
}

fn default_min_password_len() -> usize {
    6
}

fn default_hod_password() -> String {
    "123456".to_owned()
}
