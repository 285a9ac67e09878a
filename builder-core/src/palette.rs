//! Component palette.
//!
//! Dropping a palette entry on the canvas creates a new element whose
//! styles, content and attributes depend only on its kind.

use serde::Serialize;

use crate::{Attributes, Element, ElementKind, Styles};

/// Palette section an entry is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteGroup {
    /// Primitive building blocks.
    Basic,
    /// Composite page furniture.
    Complex,
}

/// One draggable palette item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    /// Kind created on drop.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Display label.
    pub label: &'static str,
    /// Palette section.
    pub group: PaletteGroup,
}

/// All palette entries in display order.
#[must_use]
pub fn entries() -> Vec<PaletteEntry> {
    ElementKind::ALL
        .iter()
        .enumerate()
        .map(|(i, &kind)| PaletteEntry {
            kind,
            label: kind.label(),
            group: if i < 6 {
                PaletteGroup::Basic
            } else {
                PaletteGroup::Complex
            },
        })
        .collect()
}

/// Default styles for a freshly dropped element.
#[must_use]
pub fn default_styles(kind: ElementKind) -> Styles {
    let pairs: &[(&str, &str)] = match kind {
        ElementKind::Container => &[
            ("display", "flex"),
            ("flexDirection", "column"),
            ("padding", "20px"),
            ("backgroundColor", "#f9fafb"),
            ("borderRadius", "8px"),
            ("minHeight", "100px"),
        ],
        ElementKind::Section => &[
            ("display", "flex"),
            ("flexDirection", "column"),
            ("padding", "40px 20px"),
            ("backgroundColor", "#ffffff"),
            ("minHeight", "200px"),
        ],
        ElementKind::Text => &[
            ("fontSize", "16px"),
            ("color", "#000000"),
            ("lineHeight", "1.5"),
        ],
        ElementKind::Heading => &[
            ("fontSize", "32px"),
            ("fontWeight", "700"),
            ("color", "#000000"),
            ("marginBottom", "10px"),
        ],
        ElementKind::Button => &[
            ("padding", "12px 24px"),
            ("backgroundColor", "#3b82f6"),
            ("color", "#ffffff"),
            ("border", "none"),
            ("borderRadius", "6px"),
            ("fontSize", "16px"),
            ("fontWeight", "500"),
            ("cursor", "pointer"),
            ("width", "fit-content"),
        ],
        ElementKind::Image => &[
            ("width", "100%"),
            ("maxWidth", "400px"),
            ("height", "auto"),
            ("borderRadius", "8px"),
        ],
        ElementKind::Form => &[
            ("display", "flex"),
            ("flexDirection", "column"),
            ("gap", "16px"),
            ("padding", "20px"),
            ("backgroundColor", "#f9fafb"),
            ("borderRadius", "8px"),
        ],
        ElementKind::Input => &[
            ("padding", "10px 12px"),
            ("border", "1px solid #d1d5db"),
            ("borderRadius", "6px"),
            ("fontSize", "16px"),
        ],
        ElementKind::Navbar => &[
            ("display", "flex"),
            ("justifyContent", "space-between"),
            ("alignItems", "center"),
            ("padding", "16px 24px"),
            ("backgroundColor", "#1f2937"),
            ("color", "#ffffff"),
        ],
        ElementKind::Carousel => &[
            ("display", "flex"),
            ("gap", "10px"),
            ("padding", "20px"),
            ("backgroundColor", "#e5e7eb"),
            ("borderRadius", "8px"),
            ("minHeight", "200px"),
        ],
        ElementKind::Footer => &[
            ("display", "flex"),
            ("justifyContent", "center"),
            ("alignItems", "center"),
            ("padding", "24px"),
            ("backgroundColor", "#1f2937"),
            ("color", "#ffffff"),
            ("marginTop", "auto"),
        ],
    };
    Styles::from_pairs(pairs)
}

/// Default text content for a freshly dropped element.
#[must_use]
pub const fn default_content(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::Text => "Edit this text",
        ElementKind::Heading => "Heading Text",
        ElementKind::Button => "Click Me",
        ElementKind::Navbar => "Navigation",
        ElementKind::Footer => "© 2024 Your Website",
        _ => "",
    }
}

/// Default attributes: an accessible label for every kind, plus the button
/// role for buttons.
#[must_use]
pub fn default_attributes(kind: ElementKind) -> Attributes {
    Attributes {
        aria_label: Some(format!("{kind} element")),
        role: (kind == ElementKind::Button).then(|| "button".to_string()),
        ..Attributes::default()
    }
}

/// Build the element created when `kind` is dropped on the canvas.
#[must_use]
pub fn new_element(kind: ElementKind) -> Element {
    Element::new(kind)
        .with_content(default_content(kind))
        .with_styles(default_styles(kind))
        .with_attributes(default_attributes(kind))
}

impl ElementKind {
    /// The element created when this kind is dropped on the canvas.
    #[must_use]
    pub fn default_element(self) -> Element {
        new_element(self)
    }
}
