//! Closed set of icons the presentation layer knows how to draw
//!
//! Categories and notification kinds resolve to an `Icon` here; turning an
//! `Icon` into pixels is the front-end's job.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Money,
    Pizza,
    Car,
    GameController,
    Lightning,
    ShoppingBag,
    PiggyBank,
    Heartbeat,
    GraduationCap,
    House,
    Handshake,
    TrendUp,
    DotsThree,
    Warning,
    Target,
    CreditCard,
    Trophy,
    Lightbulb,
}

impl Icon {
    /// Icon for a category name; unknown categories get `DotsThree`
    pub fn for_category(category: &str) -> Self {
        match category {
            "Salario" => Self::Money,
            "Comida" => Self::Pizza,
            "Transporte" => Self::Car,
            "Entretenimiento" => Self::GameController,
            "Servicios" => Self::Lightning,
            "Compras" => Self::ShoppingBag,
            "Ahorro" => Self::PiggyBank,
            "Salud" => Self::Heartbeat,
            "Educación" => Self::GraduationCap,
            "Hogar" => Self::House,
            "Préstamo" => Self::Handshake,
            "Inversión" => Self::TrendUp,
            _ => Self::DotsThree,
        }
    }

    /// Emoji rendering for plain-text surfaces
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Money => "💵",
            Self::Pizza => "🍕",
            Self::Car => "🚗",
            Self::GameController => "🎮",
            Self::Lightning => "⚡",
            Self::ShoppingBag => "🛍️",
            Self::PiggyBank => "💰",
            Self::Heartbeat => "🏥",
            Self::GraduationCap => "📚",
            Self::House => "🏠",
            Self::Handshake => "🤝",
            Self::TrendUp => "📈",
            Self::DotsThree => "📋",
            Self::Warning => "⚠️",
            Self::Target => "🎯",
            Self::CreditCard => "💳",
            Self::Trophy => "🏆",
            Self::Lightbulb => "💡",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.emoji())
    }
}
