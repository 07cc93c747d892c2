//! 样式属性及其类型化的取值。
//!
//! 每个 [`StyleProperty`] 只对应一种 [`StyleValue`] 变体，
//! [`StyleMap::set`] 会拒绝类型不匹配的值。

use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{ModelError, namespaces};

/// 文档模型支持的样式属性。
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, EnumIter,
)]
pub enum StyleProperty {
    /// `tts:backgroundColor`
    BackgroundColor,
    /// `tts:color`
    Color,
    /// `tts:displayAlign`
    DisplayAlign,
    /// `tts:extent`
    Extent,
    /// `tts:fontSize`
    FontSize,
    /// `tts:fontStyle`
    FontStyle,
    /// `tts:fontWeight`
    FontWeight,
    /// `tts:lineHeight`
    LineHeight,
    /// `tts:opacity`
    Opacity,
    /// `tts:origin`
    Origin,
    /// `tts:textAlign`
    TextAlign,
    /// `tts:visibility`
    Visibility,
}

impl StyleProperty {
    /// 该属性在 XML 中所属的命名空间。
    #[must_use]
    pub const fn namespace(self) -> &'static str {
        namespaces::TTML_STYLING
    }

    /// 该属性在 XML 中的本地名。
    #[must_use]
    pub const fn local_name(self) -> &'static str {
        match self {
            Self::BackgroundColor => "backgroundColor",
            Self::Color => "color",
            Self::DisplayAlign => "displayAlign",
            Self::Extent => "extent",
            Self::FontSize => "fontSize",
            Self::FontStyle => "fontStyle",
            Self::FontWeight => "fontWeight",
            Self::LineHeight => "lineHeight",
            Self::Opacity => "opacity",
            Self::Origin => "origin",
            Self::TextAlign => "textAlign",
            Self::Visibility => "visibility",
        }
    }

    /// 判断给定的值是否是该属性唯一接受的类型。
    #[must_use]
    pub const fn accepts(self, value: &StyleValue) -> bool {
        matches!(
            (self, value),
            (Self::BackgroundColor | Self::Color, StyleValue::Color(_))
                | (Self::DisplayAlign, StyleValue::DisplayAlign(_))
                | (Self::Extent, StyleValue::Extent(_))
                | (Self::FontSize | Self::LineHeight, StyleValue::Length(_))
                | (Self::FontStyle, StyleValue::FontStyle(_))
                | (Self::FontWeight, StyleValue::FontWeight(_))
                | (Self::Opacity, StyleValue::Opacity(_))
                | (Self::Origin, StyleValue::Origin(_))
                | (Self::TextAlign, StyleValue::TextAlign(_))
                | (Self::Visibility, StyleValue::Visibility(_))
        )
    }
}

impl fmt::Display for StyleProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tts:{}", self.local_name())
    }
}

/// 长度单位。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    IntoStaticStr,
)]
pub enum LengthUnit {
    /// 像素
    #[strum(serialize = "px")]
    #[serde(rename = "px")]
    Pixel,
    /// 相对于字号
    #[strum(serialize = "em")]
    #[serde(rename = "em")]
    Em,
    /// 相对于单元格（由 `ttp:cellResolution` 决定）
    #[strum(serialize = "c")]
    #[serde(rename = "c")]
    Cell,
    /// 百分比
    #[strum(serialize = "%")]
    #[serde(rename = "%")]
    Percent,
    /// 根容器高度的百分比
    #[strum(serialize = "rh")]
    #[serde(rename = "rh")]
    RootHeight,
    /// 根容器宽度的百分比
    #[strum(serialize = "rw")]
    #[serde(rename = "rw")]
    RootWidth,
}

/// 带单位的长度值。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Length {
    /// 数值部分
    pub value: f64,
    /// 单位
    pub units: LengthUnit,
}

impl Length {
    /// 创建一个长度值。
    #[must_use]
    pub const fn new(value: f64, units: LengthUnit) -> Self {
        Self { value, units }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.units)
    }
}

/// `tts:origin` 的取值：区域左上角的坐标。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: Length,
    pub y: Length,
}

/// `tts:extent` 的取值：区域的宽和高。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub width: Length,
    pub height: Length,
}

/// sRGB 颜色，带 alpha 通道。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xFF)
    }

    /// 查找 TTML 定义的具名颜色。
    #[must_use]
    pub fn named(name: &str) -> Option<Self> {
        let color = match name {
            "transparent" => Self::rgba(0, 0, 0, 0),
            "black" => Self::rgb(0, 0, 0),
            "silver" => Self::rgb(0xC0, 0xC0, 0xC0),
            "gray" => Self::rgb(0x80, 0x80, 0x80),
            "white" => Self::rgb(0xFF, 0xFF, 0xFF),
            "maroon" => Self::rgb(0x80, 0, 0),
            "red" => Self::rgb(0xFF, 0, 0),
            "purple" => Self::rgb(0x80, 0, 0x80),
            "fuchsia" | "magenta" => Self::rgb(0xFF, 0, 0xFF),
            "green" => Self::rgb(0, 0x80, 0),
            "lime" => Self::rgb(0, 0xFF, 0),
            "olive" => Self::rgb(0x80, 0x80, 0),
            "yellow" => Self::rgb(0xFF, 0xFF, 0),
            "navy" => Self::rgb(0, 0, 0x80),
            "blue" => Self::rgb(0, 0, 0xFF),
            "teal" => Self::rgb(0, 0x80, 0x80),
            "aqua" | "cyan" => Self::rgb(0, 0xFF, 0xFF),
            _ => return None,
        };
        Some(color)
    }
}

/// `tts:textAlign`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
    Start,
    End,
    Justify,
}

/// `tts:displayAlign`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DisplayAlign {
    Before,
    Center,
    After,
}

/// `tts:fontStyle`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    Normal,
    Italic,
    Oblique,
}

/// `tts:fontWeight`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    Normal,
    Bold,
}

/// `tts:visibility`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

/// 一个类型化的样式值。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, IntoStaticStr)]
pub enum StyleValue {
    Length(Length),
    Color(Color),
    TextAlign(TextAlign),
    DisplayAlign(DisplayAlign),
    FontStyle(FontStyle),
    FontWeight(FontWeight),
    Visibility(Visibility),
    /// 取值范围 `[0, 1]`
    Opacity(f64),
    Origin(Coordinates),
    Extent(Extent),
}

/// 一个节点上已设置的样式，按属性排序存放。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleMap(BTreeMap<StyleProperty, StyleValue>);

impl StyleMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置样式值，返回被覆盖的旧值。
    ///
    /// # Errors
    ///
    /// 当值的类型不是该属性接受的类型时返回 [`ModelError::StyleTypeMismatch`]。
    pub fn set(
        &mut self,
        property: StyleProperty,
        value: StyleValue,
    ) -> Result<Option<StyleValue>, ModelError> {
        if !property.accepts(&value) {
            return Err(ModelError::StyleTypeMismatch {
                property,
                found: value.into(),
            });
        }
        Ok(self.0.insert(property, value))
    }

    #[must_use]
    pub fn get(&self, property: StyleProperty) -> Option<&StyleValue> {
        self.0.get(&property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleProperty, &StyleValue)> {
        self.0.iter().map(|(property, value)| (*property, value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// 可以携带样式的模型节点（区域和内容元素）。
pub trait Stylable {
    fn style_map(&self) -> &StyleMap;

    fn style_map_mut(&mut self) -> &mut StyleMap;

    /// 设置一个样式属性。
    ///
    /// # Errors
    ///
    /// 值的类型与属性不匹配时返回 [`ModelError::StyleTypeMismatch`]。
    fn set_style(&mut self, property: StyleProperty, value: StyleValue) -> Result<(), ModelError> {
        self.style_map_mut().set(property, value).map(|_| ())
    }

    fn get_style(&self, property: StyleProperty) -> Option<&StyleValue> {
        self.style_map().get(property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_property_lives_in_styling_namespace() {
        for property in StyleProperty::iter() {
            assert_eq!(property.namespace(), namespaces::TTML_STYLING);
            assert!(!property.local_name().is_empty());
        }
        assert_eq!(StyleProperty::LineHeight.to_string(), "tts:lineHeight");
    }

    #[test]
    fn test_style_map_rejects_mismatched_value() {
        let mut styles = StyleMap::new();
        let err = styles
            .set(StyleProperty::LineHeight, StyleValue::Opacity(0.5))
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::StyleTypeMismatch {
                property: StyleProperty::LineHeight,
                found: "Opacity",
            }
        );
        assert!(styles.is_empty());
    }

    #[test]
    fn test_style_map_overwrites_previous_value() {
        let mut styles = StyleMap::new();
        let first = StyleValue::Length(Length::new(1.0, LengthUnit::Em));
        let second = StyleValue::Length(Length::new(24.0, LengthUnit::Pixel));

        assert_eq!(styles.set(StyleProperty::FontSize, first).unwrap(), None);
        assert_eq!(
            styles.set(StyleProperty::FontSize, second).unwrap(),
            Some(first)
        );
        assert_eq!(styles.get(StyleProperty::FontSize), Some(&second));
        assert_eq!(styles.len(), 1);
    }

    #[test]
    fn test_length_unit_tokens() {
        assert_eq!("%".parse::<LengthUnit>().unwrap(), LengthUnit::Percent);
        assert_eq!("rw".parse::<LengthUnit>().unwrap(), LengthUnit::RootWidth);
        assert!("pt".parse::<LengthUnit>().is_err());
        assert_eq!(Length::new(1.5, LengthUnit::Cell).to_string(), "1.5c");
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(Color::named("cyan"), Color::named("aqua"));
        assert_eq!(Color::named("transparent"), Some(Color::rgba(0, 0, 0, 0)));
        assert_eq!(Color::named("Red"), None);
    }
}
