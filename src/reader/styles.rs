//! # 样式属性提取注册表
//!
//! 每个描述符把一个限定属性名映射到一个模型样式属性和对应的提取函数。
//! 注册表是进程级只读静态表，新增样式属性只需在 [`DESCRIPTORS`] 中添加一项。

use std::{collections::HashMap, str::FromStr};

use imsc_model::{
    Color, ConvertError, Coordinates, Diagnostic, DiagnosticKind, DisplayAlign, Extent, FontStyle,
    FontWeight, Length, LengthUnit, Severity, Stylable, StyleErrorPolicy, StyleProperty,
    StyleValue, StyleValueError, TextAlign, Visibility,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::error;

use super::state::report;
use crate::tree::{QualifiedName, XmlElement};

type Extractor = fn(&str) -> Result<StyleValue, StyleValueError>;

/// 样式属性描述符。属性的限定名由 `property` 的命名空间和本地名决定。
pub(super) struct StyleDescriptor {
    pub(super) property: StyleProperty,
    pub(super) extract: Extractor,
}

const DESCRIPTORS: &[StyleDescriptor] = &[
    StyleDescriptor {
        property: StyleProperty::BackgroundColor,
        extract: |s| parse_color(s).map(StyleValue::Color),
    },
    StyleDescriptor {
        property: StyleProperty::Color,
        extract: |s| parse_color(s).map(StyleValue::Color),
    },
    StyleDescriptor {
        property: StyleProperty::DisplayAlign,
        extract: |s| parse_keyword(s, StyleProperty::DisplayAlign).map(StyleValue::DisplayAlign),
    },
    StyleDescriptor {
        property: StyleProperty::Extent,
        extract: |s| {
            parse_length_pair(s).map(|(width, height)| StyleValue::Extent(Extent { width, height }))
        },
    },
    StyleDescriptor {
        property: StyleProperty::FontSize,
        extract: |s| parse_length(s).map(StyleValue::Length),
    },
    StyleDescriptor {
        property: StyleProperty::FontStyle,
        extract: |s| parse_keyword(s, StyleProperty::FontStyle).map(StyleValue::FontStyle),
    },
    StyleDescriptor {
        property: StyleProperty::FontWeight,
        extract: |s| parse_keyword(s, StyleProperty::FontWeight).map(StyleValue::FontWeight),
    },
    StyleDescriptor {
        property: StyleProperty::LineHeight,
        extract: |s| parse_length(s).map(StyleValue::Length),
    },
    StyleDescriptor {
        property: StyleProperty::Opacity,
        extract: |s| parse_opacity(s).map(StyleValue::Opacity),
    },
    StyleDescriptor {
        property: StyleProperty::Origin,
        extract: |s| parse_length_pair(s).map(|(x, y)| StyleValue::Origin(Coordinates { x, y })),
    },
    StyleDescriptor {
        property: StyleProperty::TextAlign,
        extract: |s| parse_keyword(s, StyleProperty::TextAlign).map(StyleValue::TextAlign),
    },
    StyleDescriptor {
        property: StyleProperty::Visibility,
        extract: |s| parse_keyword(s, StyleProperty::Visibility).map(StyleValue::Visibility),
    },
];

/// 命名空间 -> 本地名 -> 描述符
static BY_QUALIFIED_NAME: Lazy<HashMap<&'static str, HashMap<&'static str, &'static StyleDescriptor>>> =
    Lazy::new(|| {
        let mut registry: HashMap<_, HashMap<_, _>> = HashMap::new();
        for descriptor in DESCRIPTORS {
            registry
                .entry(descriptor.property.namespace())
                .or_default()
                .insert(descriptor.property.local_name(), descriptor);
        }
        registry
    });

static LENGTH_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]?\d*(?:\.\d+)?)(px|em|c|%|rh|rw)$").expect("未能编译 LENGTH_REGEX")
});

static RGB_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
        .expect("未能编译 RGB_REGEX")
});

static RGBA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^rgba\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$")
        .expect("未能编译 RGBA_REGEX")
});

/// 按限定名查找描述符。
pub(super) fn lookup(name: &QualifiedName) -> Option<&'static StyleDescriptor> {
    BY_QUALIFIED_NAME
        .get(name.namespace()?)?
        .get(name.local_name())
        .copied()
}

/// 遍历元素的全部属性，把已注册的样式属性写入 `target`。
///
/// 未注册的属性（包括未知命名空间中的属性）被静默忽略。
///
/// # Errors
///
/// 在 [`StyleErrorPolicy::Abort`] 下，任何已注册属性的取值不合语法都会返回
/// `ConvertError::MalformedStyleValue`，调用方不应捕获它。
pub(super) fn extract_styles<T: Stylable>(
    element: &XmlElement,
    target: &mut T,
    policy: StyleErrorPolicy,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), ConvertError> {
    for attribute in &element.attributes {
        let Some(descriptor) = lookup(&attribute.name) else {
            continue;
        };

        match (descriptor.extract)(&attribute.value) {
            Ok(value) => target.set_style(descriptor.property, value)?,
            Err(source) => match policy {
                StyleErrorPolicy::Abort => {
                    error!(
                        "{} 的取值 '{}' 无效: {}。转换中止",
                        descriptor.property, attribute.value, source
                    );
                    return Err(ConvertError::MalformedStyleValue {
                        property: descriptor.property,
                        value: attribute.value.clone(),
                        source,
                    });
                }
                StyleErrorPolicy::SkipProperty => report(
                    diagnostics,
                    Severity::Error,
                    DiagnosticKind::MalformedStyleValue,
                    format!(
                        "malformed {} value '{}' ignored: {source}",
                        descriptor.property, attribute.value
                    ),
                ),
            },
        }
    }
    Ok(())
}

/// `<数字><单位>`，数字可带符号，单位为 px、em、c、%、rh、rw 之一。
pub(super) fn parse_length(text: &str) -> Result<Length, StyleValueError> {
    let malformed = || StyleValueError::Length(text.to_owned());
    let caps = LENGTH_REGEX.captures(text).ok_or_else(malformed)?;
    // 只有单位而没有数字时 caps[1] 为空，这里会解析失败
    let value = caps[1].parse::<f64>().map_err(|_| malformed())?;
    let units = caps[2].parse::<LengthUnit>().map_err(|_| malformed())?;
    Ok(Length::new(value, units))
}

fn parse_length_pair(text: &str) -> Result<(Length, Length), StyleValueError> {
    let mut parts = text.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(first), Some(second), None) => Ok((parse_length(first)?, parse_length(second)?)),
        _ => Err(StyleValueError::LengthPair(text.to_owned())),
    }
}

fn parse_color(text: &str) -> Result<Color, StyleValueError> {
    let malformed = || StyleValueError::Color(text.to_owned());

    if let Some(hex) = text.strip_prefix('#') {
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| malformed());
        return match hex.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(malformed()),
        };
    }

    let channel = |s: &str| s.parse::<u8>().map_err(|_| malformed());
    if let Some(caps) = RGB_REGEX.captures(text) {
        return Ok(Color::rgb(channel(&caps[1])?, channel(&caps[2])?, channel(&caps[3])?));
    }
    if let Some(caps) = RGBA_REGEX.captures(text) {
        return Ok(Color::rgba(
            channel(&caps[1])?,
            channel(&caps[2])?,
            channel(&caps[3])?,
            channel(&caps[4])?,
        ));
    }

    Color::named(text).ok_or_else(malformed)
}

fn parse_opacity(text: &str) -> Result<f64, StyleValueError> {
    let value = text
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| StyleValueError::Number(text.to_owned()))?;
    Ok(value.clamp(0.0, 1.0))
}

fn parse_keyword<T: FromStr>(text: &str, property: StyleProperty) -> Result<T, StyleValueError> {
    text.parse::<T>().map_err(|_| StyleValueError::Keyword {
        value: text.to_owned(),
        property: property.local_name(),
    })
}
