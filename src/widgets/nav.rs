//! Admin navigation bar and its mobile menu.

use super::WidgetError;
use crate::prober::resolve_location;
use url::Url;

/// Viewport width above which the mobile menu is closed.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

const LABEL_OPEN: &str = "Abrir menú de navegación";
const LABEL_CLOSE: &str = "Cerrar menú de navegación";

// Label keywords mapped to admin pages, checked in order.
const TARGET_KEYWORDS: [(&[&str], &str); 6] = [
    (&["dashboard"], "DashboardsAdmin.html"),
    (&["usuarios", "usuario"], "usuarioAdmin.html"),
    (&["emergencias"], "EmergenciasAdmin.html"),
    (&["medicamentos"], "MedicamentosAdmin.html"),
    (&["reportes", "reporte"], "ReporteAdmin.html"),
    (&["config"], "ConfiguracionAdmin.html"),
];

const LOGOUT_WORDS: [&str; 3] = ["salir", "cerrar sesión", "logout"];

/// One `.nav-btn`: visible label plus `data-target` / `data-logout`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub label: String,
    pub target: Option<String>,
    pub logout: bool,
}

impl NavButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: None,
            logout: false,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[must_use]
    pub fn with_logout(mut self) -> Self {
        self.logout = true;
        self
    }

    /// Fill a missing target from label keywords. Returns the target.
    pub fn infer_target(&mut self) -> Option<&str> {
        if self.target.is_none() {
            let label = self.label.trim().to_lowercase();
            self.target = TARGET_KEYWORDS
                .iter()
                .find(|(words, _)| words.iter().any(|w| label.contains(w)))
                .map(|(_, target)| (*target).to_string());
        }
        self.target.as_deref()
    }

    /// Logout by attribute or by a label such as "Salir".
    #[must_use]
    pub fn is_logout(&self) -> bool {
        if self.logout {
            return true;
        }
        let label = self.label.trim().to_lowercase();
        LOGOUT_WORDS.iter().any(|w| label.contains(w))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavAction {
    Navigate(String),
    Logout,
}

/// Last path segment of a URL path or relative target.
fn file_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[derive(Debug)]
pub struct NavMenu {
    page: Url,
    buttons: Vec<NavButton>,
    active: Option<usize>,
}

impl NavMenu {
    /// Wire the menu for `page`: infer missing targets and mark the button for
    /// the current file as active.
    ///
    /// # Errors
    /// `WidgetError::ElementNotFound` when there are no buttons.
    pub fn new(page: Url, mut buttons: Vec<NavButton>) -> Result<Self, WidgetError> {
        if buttons.is_empty() {
            return Err(WidgetError::ElementNotFound(".nav-menu .nav-btn"));
        }

        for button in &mut buttons {
            button.infer_target();
        }

        let current = file_name(page.path()).to_string();
        let active = if current.is_empty() {
            None
        } else {
            buttons.iter().position(|b| {
                b.target
                    .as_deref()
                    .is_some_and(|t| file_name(t) == current)
            })
        };

        Ok(Self {
            page,
            buttons,
            active,
        })
    }

    #[must_use]
    pub fn buttons(&self) -> &[NavButton] {
        &self.buttons
    }

    #[must_use]
    pub fn active(&self) -> Option<usize> {
        self.active
    }

    /// Click (or Enter/Space) on button `index`.
    pub fn activate(&mut self, index: usize) -> Option<NavAction> {
        let button = self.buttons.get(index)?;
        if button.is_logout() {
            return Some(NavAction::Logout);
        }

        let target = button.target.as_deref()?;
        let destination = resolve_location(&self.page, target);
        self.active = Some(index);

        Some(NavAction::Navigate(destination))
    }
}

/// Mobile copy of the menu behind a toggle button.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MobileMenu {
    open: bool,
}

impl MobileMenu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Clicks outside both the menu and its toggle close it.
    pub fn outside_click(&mut self) {
        self.close();
    }

    /// Activating an item closes the mobile menu.
    pub fn item_activated(&mut self) {
        self.close();
    }

    pub fn resize(&mut self, viewport_width: f64) {
        if viewport_width > MOBILE_BREAKPOINT {
            self.close();
        }
    }

    #[must_use]
    pub fn aria_expanded(&self) -> &'static str {
        if self.open {
            "true"
        } else {
            "false"
        }
    }

    #[must_use]
    pub fn aria_label(&self) -> &'static str {
        if self.open {
            LABEL_CLOSE
        } else {
            LABEL_OPEN
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(clippy::unwrap_used)]
    fn page(path: &str) -> Url {
        Url::parse("https://site.test/admin/").unwrap().join(path).unwrap()
    }

    fn admin_buttons() -> Vec<NavButton> {
        vec![
            NavButton::new("Dashboard"),
            NavButton::new("Usuarios"),
            NavButton::new("Emergencias"),
            NavButton::new("Reportes"),
            NavButton::new("Ajustes").with_target("ConfiguracionAdmin.html"),
            NavButton::new("Salir"),
        ]
    }

    #[test]
    fn targets_are_inferred_from_labels() {
        let mut button = NavButton::new("  Medicamentos ");
        assert_eq!(button.infer_target(), Some("MedicamentosAdmin.html"));

        let mut unknown = NavButton::new("Ayuda");
        assert_eq!(unknown.infer_target(), None);

        let mut explicit = NavButton::new("Dashboard").with_target("custom.html");
        assert_eq!(explicit.infer_target(), Some("custom.html"));
    }

    #[test]
    fn logout_by_attribute_or_label() {
        assert!(NavButton::new("Salir").is_logout());
        assert!(NavButton::new("Cerrar sesión").is_logout());
        assert!(NavButton::new("LOGOUT").is_logout());
        assert!(NavButton::new("Fin").with_logout().is_logout());
        assert!(!NavButton::new("Dashboard").is_logout());
    }

    #[test]
    fn empty_menu_fails_fast() {
        let result = NavMenu::new(page("DashboardsAdmin.html"), Vec::new());
        assert_eq!(
            result.err(),
            Some(WidgetError::ElementNotFound(".nav-menu .nav-btn"))
        );
    }

    #[test]
    fn current_page_button_is_active() {
        let menu = NavMenu::new(page("usuarioAdmin.html"), admin_buttons());
        assert!(matches!(menu, Ok(ref m) if m.active() == Some(1)));
    }

    #[test]
    fn activation_navigates_or_logs_out() {
        let Ok(mut menu) = NavMenu::new(page("DashboardsAdmin.html"), admin_buttons()) else {
            panic!("menu should wire");
        };
        assert_eq!(menu.active(), Some(0));

        assert_eq!(
            menu.activate(3),
            Some(NavAction::Navigate(
                "https://site.test/admin/ReporteAdmin.html".to_string()
            ))
        );
        assert_eq!(menu.active(), Some(3));

        assert_eq!(menu.activate(5), Some(NavAction::Logout));
        assert_eq!(menu.active(), Some(3));

        assert_eq!(menu.activate(42), None);
    }

    #[test]
    fn mobile_menu_toggle_and_close_rules() {
        let mut menu = MobileMenu::new();
        assert_eq!(menu.aria_expanded(), "false");
        assert_eq!(menu.aria_label(), LABEL_OPEN);

        menu.toggle();
        assert!(menu.is_open());
        assert_eq!(menu.aria_label(), LABEL_CLOSE);

        menu.resize(600.0);
        assert!(menu.is_open());
        menu.resize(1024.0);
        assert!(!menu.is_open());

        menu.toggle();
        menu.outside_click();
        assert!(!menu.is_open());

        menu.toggle();
        menu.item_activated();
        assert_eq!(menu.aria_expanded(), "false");
    }
}
