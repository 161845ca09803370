//! Theme toggle
//!
//! Cycles the body between the normal, dark and high-contrast themes.

use fos_dom::{Document, DomResult, NodeId};

/// Display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeMode {
    #[default]
    Normal,
    Dark,
    HighContrast,
}

impl ThemeMode {
    /// Next mode in the cycle
    pub fn next(self) -> Self {
        match self {
            Self::Normal => Self::Dark,
            Self::Dark => Self::HighContrast,
            Self::HighContrast => Self::Normal,
        }
    }

    /// Body class for this mode
    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Dark => Some("dark-mode"),
            Self::HighContrast => Some("high-contrast"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Dark => "Modo Escuro",
            Self::HighContrast => "Alto Contraste",
        }
    }
}

/// Current theme plus the button that shows it
#[derive(Debug, Default)]
pub struct ThemeCycler {
    mode: ThemeMode,
}

impl ThemeCycler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Advance to the next mode, update body classes and the button label
    pub fn toggle(&mut self, doc: &mut Document, button: Option<NodeId>) -> DomResult<ThemeMode> {
        self.mode = self.mode.next();

        let body = doc.body();
        if body.is_valid() {
            let elem = doc.tree.expect_element_mut(body)?;
            elem.remove_class(&["dark-mode", "high-contrast"]);
            if let Some(class) = self.mode.body_class() {
                elem.add_class(&[class]);
            }
        }
        if let Some(button) = button {
            doc.tree.set_text_content(button, &format!("Modo: {}", self.mode.label()))?;
        }

        tracing::debug!("Theme is now {:?}", self.mode);
        Ok(self.mode)
    }
}
