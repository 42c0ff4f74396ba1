//! Category model
//!
//! Categories are plain names shared by transactions and budgets; this type
//! adds the display color and icon for the predefined set.

use serde::{Deserialize, Serialize};

use super::icon::Icon;

/// A named spending or income category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub color: String,
    pub icon: Icon,
}

impl Category {
    /// Create a category; the icon is resolved from the name
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        let name = name.into();
        let icon = Icon::for_category(&name);
        Self {
            name,
            color: color.into(),
            icon,
        }
    }
}

/// The categories every new user starts with
pub fn predefined_categories() -> Vec<Category> {
    [
        ("Salario", "#16a34a"),
        ("Comida", "#f97316"),
        ("Transporte", "#3b82f6"),
        ("Entretenimiento", "#8b5cf6"),
        ("Servicios", "#06b6d4"),
        ("Compras", "#ec4899"),
        ("Ahorro", "#eab308"),
        ("Salud", "#f43f5e"),
        ("Educación", "#a3e635"),
        ("Hogar", "#a3e635"),
        ("Préstamo", "#a3a3a3"),
        ("Otros", "#737373"),
    ]
    .into_iter()
    .map(|(name, color)| Category::new(name, color))
    .collect()
}

/// Palette for charts; colors past the fixed ten step around the hue wheel
pub fn color_palette(count: usize) -> Vec<String> {
    const BASE: [&str; 10] = [
        "#ef4444", "#f97316", "#eab308", "#22c55e", "#06b6d4", "#3b82f6", "#8b5cf6", "#ec4899",
        "#f43f5e", "#84cc16",
    ];

    (0..count)
        .map(|i| match BASE.get(i) {
            Some(color) => color.to_string(),
            None => format!("hsl({:.3}, 70%, 50%)", (i as f64 * 137.508) % 360.0),
        })
        .collect()
}
