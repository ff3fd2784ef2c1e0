//! The amount step: a base amount plus an optional tip.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use splitpay_calculator::{ParsedInput, format_currency, parse_input, total_with_tip};

/// One of the quick tip buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipPreset {
    #[serde(rename = "5")]
    Five,
    #[serde(rename = "10")]
    Ten,
    #[serde(rename = "15")]
    Fifteen,
}

impl TipPreset {
    pub fn percent(self) -> Decimal {
        match self {
            TipPreset::Five => Decimal::from(5),
            TipPreset::Ten => Decimal::from(10),
            TipPreset::Fifteen => Decimal::from(15),
        }
    }
}

/// Tip selection. `Custom` carries the text of the custom percent field.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TipChoice {
    #[default]
    None,
    Preset(TipPreset),
    Custom(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountEntry {
    base_text: String,
    tip: TipChoice,
}

impl AmountEntry {
    pub fn new(base_text: impl Into<String>, tip: TipChoice) -> Self {
        Self { base_text: base_text.into(), tip }
    }

    pub fn base_text(&self) -> &str {
        &self.base_text
    }

    pub fn tip(&self) -> &TipChoice {
        &self.tip
    }

    pub fn set_base(&mut self, text: impl Into<String>) {
        self.base_text = text.into();
    }

    pub fn choose_tip(&mut self, tip: TipChoice) {
        self.tip = tip;
    }

    /// Typing into the custom field selects the custom tip.
    pub fn set_custom_tip(&mut self, text: impl Into<String>) {
        self.tip = TipChoice::Custom(text.into());
    }

    /// The base amount, when it is a positive number.
    pub fn base(&self) -> Option<Decimal> {
        match parse_input(&self.base_text) {
            ParsedInput::Number(value) if value > Decimal::ZERO => Some(value),
            _ => None,
        }
    }

    /// The tip percent. An unparsable or negative custom percent counts as zero.
    pub fn tip_percent(&self) -> Decimal {
        match &self.tip {
            TipChoice::None => Decimal::ZERO,
            TipChoice::Preset(preset) => preset.percent(),
            TipChoice::Custom(text) => match parse_input(text) {
                ParsedInput::Number(value) if value >= Decimal::ZERO => value,
                _ => Decimal::ZERO,
            },
        }
    }

    /// Base plus tip, or `None` until a positive base amount is entered. A total too
    /// large to represent is also `None`.
    pub fn total(&self) -> Option<Decimal> {
        self.base().and_then(|base| total_with_tip(base, self.tip_percent()))
    }

    pub fn formatted_total(&self) -> String {
        format_currency(self.total())
    }
}
