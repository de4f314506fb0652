//! Declared attribute value formats.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The declared value type of an attribute.
///
/// Each format maps to the `TypedArrayWrapper` getter used to read a styled
/// value and to the `Resources` getter used to read a default value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    Boolean,
    Color,
    ColorStateList,
    Dimension,
    DimensionPixelOffset,
    DimensionPixelSize,
    Drawable,
    Float,
    Font,
    Fraction,
    Int,
    LayoutDimension,
    NonResourceString,
    ResourceId,
    String,
    Text,
    TextArray,
}

impl Format {
    pub const ALL: &'static [Format] = &[
        Format::Boolean,
        Format::Color,
        Format::ColorStateList,
        Format::Dimension,
        Format::DimensionPixelOffset,
        Format::DimensionPixelSize,
        Format::Drawable,
        Format::Float,
        Format::Font,
        Format::Fraction,
        Format::Int,
        Format::LayoutDimension,
        Format::NonResourceString,
        Format::ResourceId,
        Format::String,
        Format::Text,
        Format::TextArray,
    ];

    /// Getter on `TypedArrayWrapper` reading a styled value.
    pub fn typed_array_getter(self) -> &'static str {
        match self {
            Format::Boolean => "getBoolean",
            Format::Color => "getColor",
            Format::ColorStateList => "getColorStateList",
            Format::Dimension => "getDimension",
            Format::DimensionPixelOffset => "getDimensionPixelOffset",
            Format::DimensionPixelSize => "getDimensionPixelSize",
            Format::Drawable => "getDrawable",
            Format::Float => "getFloat",
            Format::Font => "getFont",
            Format::Fraction => "getFraction",
            Format::Int => "getInt",
            Format::LayoutDimension => "getLayoutDimension",
            Format::NonResourceString => "getNonResourceString",
            Format::ResourceId => "getResourceId",
            Format::String => "getString",
            Format::Text => "getText",
            Format::TextArray => "getTextArray",
        }
    }

    /// Getter on `Resources` reading a default value resource. `None` when
    /// the default resource id is itself the value.
    pub fn resources_getter(self) -> Option<&'static str> {
        let getter = match self {
            Format::Boolean => "getBoolean",
            Format::Color => "getColor",
            Format::ColorStateList => "getColorStateList",
            Format::Dimension => "getDimension",
            Format::DimensionPixelOffset => "getDimensionPixelOffset",
            Format::DimensionPixelSize | Format::LayoutDimension => "getDimensionPixelSize",
            Format::Drawable => "getDrawable",
            Format::Float => "getFloat",
            Format::Font => "getFont",
            Format::Fraction => "getFraction",
            Format::Int => "getInteger",
            Format::NonResourceString | Format::String => "getString",
            Format::ResourceId => return None,
            Format::Text => "getText",
            Format::TextArray => "getTextArray",
        };
        Some(getter)
    }

    /// The format name as written in declarations.
    pub fn as_str(self) -> &'static str {
        match self {
            Format::Boolean => "boolean",
            Format::Color => "color",
            Format::ColorStateList => "color-state-list",
            Format::Dimension => "dimension",
            Format::DimensionPixelOffset => "dimension-pixel-offset",
            Format::DimensionPixelSize => "dimension-pixel-size",
            Format::Drawable => "drawable",
            Format::Float => "float",
            Format::Font => "font",
            Format::Fraction => "fraction",
            Format::Int => "int",
            Format::LayoutDimension => "layout-dimension",
            Format::NonResourceString => "non-resource-string",
            Format::ResourceId => "resource-id",
            Format::String => "string",
            Format::Text => "text",
            Format::TextArray => "text-array",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
