use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Map-space position in floor-image pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A JSON value that may arrive as either a number or a string (`id`, `row`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    /// Numeric ordinal used for sorting and range filtering. Unparseable values are `0`.
    pub fn ordinal(&self) -> i64 {
        match self {
            Scalar::Number(n) if n.is_finite() => n.trunc() as i64,
            Scalar::Number(_) => 0,
            Scalar::Text(s) => parse_ordinal(s),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            Scalar::Number(_) => false,
            Scalar::Text(s) => s.trim().is_empty(),
        }
    }
}

impl std::fmt::Display for Scalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scalar::Number(n) if n.is_finite() && n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Parse the leading integer of a string: optional whitespace, optional sign, digits.
/// Trailing garbage is ignored (`"12a"` is 12). Returns `None` when no digits lead.
pub fn parse_leading_int(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    rest[..digits_end].parse::<i64>().ok().map(|n| sign * n)
}

/// Ordinal coercion: non-numeric values become `0`.
pub fn parse_ordinal(s: &str) -> i64 {
    parse_leading_int(s).unwrap_or(0)
}

/// Unique identity of a point within the loaded set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(String);

impl PointId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PointId {
    fn from(s: &str) -> Self {
        PointId(s.to_string())
    }
}

impl From<String> for PointId {
    fn from(s: String) -> Self {
        PointId(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointKind {
    Data,
    Command,
    Media,
}

impl PointKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PointKind::Data => "data",
            PointKind::Command => "command",
            PointKind::Media => "media",
        }
    }
}

impl std::fmt::Display for PointKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signal readings of a data point, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signals(Vec<(String, f64)>);

impl Signals {
    pub fn new(readings: Vec<(String, f64)>) -> Self {
        Signals(readings)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(n, v)| (n.as_str(), *v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Any MIME-ish type mentioning `video` is played as video; everything else is an image.
    pub fn from_media_type(media_type: Option<&str>) -> Self {
        match media_type {
            Some(t) if t.contains("video") => MediaKind::Video,
            _ => MediaKind::Image,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    pub kind: MediaKind,
    pub source: String,
    pub label: Option<String>,
}

/// Type-dependent payload of a point.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Data {
        plate: Option<String>,
        signals: Option<Signals>,
    },
    /// Chat-style note; its text lives in [`Point::comment`], which is required.
    Command,
    Media(Media),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPath {
    pub path: String,
    pub view_box: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentStyle {
    pub custom_path: Option<CustomPath>,
    pub bg_color: Option<String>,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
    pub text_color: Option<String>,
    pub font_size: Option<f64>,
    pub padding: Option<f64>,
}

/// Older files describe the bubble with a bare path and box size.
#[derive(Debug, Clone, PartialEq)]
pub struct LegacyShape {
    pub path: String,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub text: String,
    pub image: Option<String>,
    pub style: Option<CommentStyle>,
    pub legacy_shape: Option<LegacyShape>,
}

pub const DEFAULT_COMMENT_PATH: &str = "M10,10 L290,10 L290,190 L10,190 Z";
pub const DEFAULT_COMMENT_VIEW_BOX: &str = "0 0 300 200";
const DEFAULT_BUBBLE_FILL: &str = "#fff";
const DEFAULT_BUBBLE_STROKE: &str = "#7c3aed";
const DEFAULT_BUBBLE_STROKE_WIDTH: f64 = 3.0;
const DEFAULT_BUBBLE_TEXT: &str = "#5b21b6";
const DEFAULT_BUBBLE_FONT_SIZE: f64 = 14.0;
const DEFAULT_BUBBLE_PADDING: f64 = 25.0;
const COMMENT_IMAGE_WIDTH: f64 = 200.0;

/// Resolved speech-bubble geometry and colours for the side comment box.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentShape {
    pub path: String,
    pub view_box: String,
    pub fill: String,
    pub stroke: String,
    pub stroke_width: f64,
    pub text_color: String,
    pub font_size: f64,
    pub padding: f64,
    /// Explicit box width on desktop; `None` leaves sizing to the stylesheet.
    pub width: Option<f64>,
}

impl Comment {
    /// Resolve the bubble: a styled custom path wins, then the legacy shape, then a plain box.
    pub fn shape(&self, mobile: bool) -> CommentShape {
        let has_image = self.image.is_some();
        let mut shape = CommentShape {
            path: DEFAULT_COMMENT_PATH.to_string(),
            view_box: DEFAULT_COMMENT_VIEW_BOX.to_string(),
            fill: DEFAULT_BUBBLE_FILL.to_string(),
            stroke: DEFAULT_BUBBLE_STROKE.to_string(),
            stroke_width: DEFAULT_BUBBLE_STROKE_WIDTH,
            text_color: DEFAULT_BUBBLE_TEXT.to_string(),
            font_size: DEFAULT_BUBBLE_FONT_SIZE,
            padding: DEFAULT_BUBBLE_PADDING,
            width: (!mobile && has_image).then_some(550.0),
        };

        let styled = self
            .style
            .as_ref()
            .and_then(|s| s.custom_path.as_ref().map(|p| (s, p)));
        if let Some((style, custom)) = styled {
            shape.path = custom.path.clone();
            shape.view_box = custom.view_box.clone();
            if let Some(c) = &style.bg_color {
                shape.fill = c.clone();
            }
            if let Some(c) = &style.border_color {
                shape.stroke = c.clone();
            }
            if let Some(c) = &style.text_color {
                shape.text_color = c.clone();
            }
            shape.stroke_width = style.border_width.unwrap_or(DEFAULT_BUBBLE_STROKE_WIDTH);
            shape.font_size = style.font_size.unwrap_or(DEFAULT_BUBBLE_FONT_SIZE);
            shape.padding = style.padding.unwrap_or(DEFAULT_BUBBLE_PADDING);
            shape.width = if mobile {
                None
            } else if has_image {
                Some(550.0_f64.max(COMMENT_IMAGE_WIDTH + 350.0))
            } else {
                Some(420.0)
            };
        } else if let Some(legacy) = &self.legacy_shape {
            shape.path = legacy.path.clone();
            shape.view_box = format!("0 0 {} {}", legacy.width, legacy.height);
        }
        shape
    }
}

/// A map entity. Immutable after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub id: PointId,
    pub row: Option<Scalar>,
    pub position: Position,
    pub payload: Payload,
    pub comment: Option<Comment>,
}

impl Point {
    pub fn kind(&self) -> PointKind {
        match self.payload {
            Payload::Data { .. } => PointKind::Data,
            Payload::Command => PointKind::Command,
            Payload::Media(_) => PointKind::Media,
        }
    }

    pub fn ordinal(&self) -> i64 {
        self.row.as_ref().map(Scalar::ordinal).unwrap_or(0)
    }

    /// Category label on the chart axis and the `#row` badge in the detail sheet.
    pub fn ordinal_label(&self) -> String {
        self.row.as_ref().map(|r| r.to_string()).unwrap_or_default()
    }

    pub fn signals(&self) -> Option<&Signals> {
        match &self.payload {
            Payload::Data { signals, .. } => signals.as_ref(),
            _ => None,
        }
    }

    pub fn plate(&self) -> Option<&str> {
        match &self.payload {
            Payload::Data { plate, .. } => plate.as_deref(),
            _ => None,
        }
    }

    pub fn media(&self) -> Option<&Media> {
        match &self.payload {
            Payload::Media(m) => Some(m),
            _ => None,
        }
    }

    /// Data points carrying signal readings can be charted and box/range selected.
    pub fn is_chartable(&self) -> bool {
        self.signals().is_some()
    }
}

/// Persisted pan/zoom from the data file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportSnapshot {
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

fn default_scale() -> f64 {
    1.0
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawFloorData {
    #[serde(default)]
    points: Vec<RawPoint>,
    viewport_state: Option<ViewportSnapshot>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPoint {
    id: Option<Scalar>,
    row: Option<Scalar>,
    x: f64,
    y: f64,
    #[serde(rename = "type")]
    kind: PointKind,
    signals: Option<serde_json::Map<String, serde_json::Value>>,
    comment: Option<String>,
    comment_image: Option<String>,
    comment_style: Option<CommentStyle>,
    shape_path: Option<String>,
    shape_width: Option<f64>,
    shape_height: Option<f64>,
    media_type: Option<String>,
    media_data: Option<String>,
    label: Option<String>,
    plate: Option<String>,
}

impl RawPoint {
    fn into_point(self, index: usize) -> Result<Point, LoadError> {
        let id = match (&self.id, &self.row) {
            (Some(id), _) if !id.is_blank() => PointId(id.to_string()),
            (_, Some(row)) if !row.is_blank() => PointId(row.to_string()),
            _ => return Err(LoadError::MissingIdentity { index }),
        };

        let comment = self.comment.filter(|c| !c.is_empty()).map(|text| Comment {
            text,
            image: self.comment_image,
            style: self.comment_style,
            legacy_shape: self.shape_path.map(|path| LegacyShape {
                path,
                width: self.shape_width.unwrap_or(300.0),
                height: self.shape_height.unwrap_or(200.0),
            }),
        });

        let payload = match self.kind {
            PointKind::Data => {
                let signals = self
                    .signals
                    .map(|map| parse_signals(&id, map))
                    .transpose()?;
                Payload::Data {
                    plate: self.plate,
                    signals,
                }
            }
            PointKind::Command => {
                if comment.is_none() {
                    return Err(LoadError::MissingField {
                        id,
                        kind: "command",
                        field: "comment",
                    });
                }
                Payload::Command
            }
            PointKind::Media => {
                let Some(source) = self.media_data else {
                    return Err(LoadError::MissingField {
                        id,
                        kind: "media",
                        field: "mediaData",
                    });
                };
                Payload::Media(Media {
                    kind: MediaKind::from_media_type(self.media_type.as_deref()),
                    source,
                    label: self.label,
                })
            }
        };

        Ok(Point {
            id,
            row: self.row,
            position: Position::new(self.x, self.y),
            payload,
            comment,
        })
    }
}

fn parse_signals(
    id: &PointId,
    map: serde_json::Map<String, serde_json::Value>,
) -> Result<Signals, LoadError> {
    map.into_iter()
        .map(|(name, value)| match value.as_f64() {
            Some(v) => Ok((name, v)),
            None => Err(LoadError::InvalidSignal {
                id: id.clone(),
                signal: name,
            }),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Signals)
}

/// The parsed and validated contents of the floor data file.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorData {
    pub points: Vec<Point>,
    pub viewport_state: Option<ViewportSnapshot>,
}

impl FloorData {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let raw: RawFloorData = serde_json::from_str(json)?;
        let points = raw
            .points
            .into_iter()
            .enumerate()
            .map(|(i, p)| p.into_point(i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FloorData {
            points,
            viewport_state: raw.viewport_state,
        })
    }
}
