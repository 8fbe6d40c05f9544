use std::path::PathBuf;

use crate::LookupError;

/// Categories that all share the `atmosphere` icon.
pub const ATMOSPHERIC: &[&str] = &[
    "mist", "haze", "smoke", "dust", "fog", "sand", "ash", "squall", "tornado",
];

pub const ATMOSPHERE_ICON: &str = "atmosphere";

/// Asset name for a condition category, e.g. `"Fog"` -> `"atmosphere"`, `"Clear"` -> `"clear"`.
pub fn icon_name(condition: &str) -> String {
    let condition = condition.trim().to_lowercase();
    if ATMOSPHERIC.contains(&condition.as_str()) {
        ATMOSPHERE_ICON.to_string()
    } else {
        condition
    }
}

/// Icon files under `<root>/images/<name>.png`.
#[derive(Debug, Clone)]
pub struct IconSet {
    root: PathBuf,
}

impl IconSet {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Categories are ASCII letters and digits only, so a name can't leave `images/`.
    pub fn path_for(&self, condition: &str) -> Result<PathBuf, LookupError> {
        let name = icon_name(condition);
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(LookupError::InvalidCondition { condition: condition.to_string() });
        }

        Ok(self.root.join("images").join(format!("{name}.png")))
    }

    /// Like [`IconSet::path_for`], but the file has to exist.
    pub fn resolve(&self, condition: &str) -> Result<PathBuf, LookupError> {
        let path = self.path_for(condition)?;
        if path.is_file() {
            Ok(path)
        } else {
            Err(LookupError::MissingIcon { path })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn atmospheric_categories_share_one_icon() {
        for condition in ["Fog", "SAND", "tornado", "mist", "Haze", "Squall"] {
            assert_eq!(icon_name(condition), ATMOSPHERE_ICON, "{condition}");
        }
    }

    #[test]
    fn other_categories_use_their_own_icon() {
        assert_eq!(icon_name("clear"), "clear");
        assert_eq!(icon_name("Clouds"), "clouds");
        assert_eq!(icon_name("Thunderstorm"), "thunderstorm");
    }

    #[test]
    fn path_layout() {
        let icons = IconSet::new("assets");
        assert_eq!(icons.path_for("Fog").unwrap(), PathBuf::from("assets/images/atmosphere.png"));
        assert_eq!(icons.path_for("clear").unwrap(), PathBuf::from("assets/images/clear.png"));
    }

    #[test]
    fn categories_that_could_escape_images_dir_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();
        fs::write(dir.path().join("secret.png"), b"png").unwrap();

        let icons = IconSet::new(dir.path());
        for condition in ["../secret", "..", "a/b", "/etc/passwd", "", "   ", "light rain", "C:\\x"] {
            let err = icons.resolve(condition).unwrap_err();
            assert!(
                matches!(err, LookupError::InvalidCondition { .. }),
                "{condition:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn resolve_requires_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("images")).unwrap();
        fs::write(dir.path().join("images/clouds.png"), b"png").unwrap();

        let icons = IconSet::new(dir.path());
        assert_eq!(icons.resolve("Clouds").unwrap(), dir.path().join("images/clouds.png"));

        let err = icons.resolve("snow").unwrap_err();
        assert!(matches!(err, LookupError::MissingIcon { path } if path.ends_with("images/snow.png")));
    }
}
