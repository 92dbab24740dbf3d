//! Rich-text output produced by console commands.
//!
//! A payload is a small tree: styled text, hyperlinks, line breaks and
//! styled groups whose plain children inherit the group style. The tree is
//! what a settled entry renders; [`OutputPayload::flatten`] yields the plain
//! character stream that drives the typed reveal.

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    #[default]
    Plain,
    Primary,
    Accent,
    Dim,
    Success,
    Error,
    Pink,
    Banner,
}

impl TextStyle {
    pub fn label(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Primary => "primary",
            Self::Accent => "accent",
            Self::Dim => "dim",
            Self::Success => "success",
            Self::Error => "error",
            Self::Pink => "pink",
            Self::Banner => "banner",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    Text { text: String, style: TextStyle },
    Link { href: String, label: String },
    Break,
    Group { style: TextStyle, children: Vec<Segment> },
}

/// One contiguous run of a rendered line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub style: TextStyle,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputPayload {
    segments: Vec<Segment>,
}

impl OutputPayload {
    pub fn builder() -> PayloadBuilder {
        PayloadBuilder::default()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Plain character stream; breaks become `'\n'` and links contribute
    /// their visible label.
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        flatten_into(&self.segments, &mut out);
        out
    }

    pub fn char_len(&self) -> usize {
        self.flatten().chars().count()
    }

    /// Resolves the tree into display lines of styled runs.
    pub fn lines(&self) -> Vec<Vec<StyledRun>> {
        let mut lines = vec![Vec::new()];
        collect_runs(&self.segments, TextStyle::Plain, &mut lines);
        lines
    }

    pub fn links(&self) -> Vec<(&str, &str)> {
        let mut links = Vec::new();
        collect_links(&self.segments, &mut links);
        links
    }
}

fn flatten_into(segments: &[Segment], out: &mut String) {
    for segment in segments {
        match segment {
            Segment::Text { text, .. } => out.push_str(text),
            Segment::Link { label, .. } => out.push_str(label),
            Segment::Break => out.push('\n'),
            Segment::Group { children, .. } => flatten_into(children, out),
        }
    }
}

fn collect_runs(segments: &[Segment], inherited: TextStyle, lines: &mut Vec<Vec<StyledRun>>) {
    for segment in segments {
        match segment {
            Segment::Text { text, style } => {
                let style = if *style == TextStyle::Plain {
                    inherited
                } else {
                    *style
                };
                // Text may carry embedded newlines (the welcome banner does).
                for (idx, part) in text.split('\n').enumerate() {
                    if idx > 0 {
                        lines.push(Vec::new());
                    }
                    if part.is_empty() {
                        continue;
                    }
                    if let Some(line) = lines.last_mut() {
                        line.push(StyledRun {
                            text: part.to_string(),
                            style,
                            href: None,
                        });
                    }
                }
            }
            Segment::Link { href, label } => {
                if let Some(line) = lines.last_mut() {
                    line.push(StyledRun {
                        text: label.clone(),
                        style: inherited,
                        href: Some(href.clone()),
                    });
                }
            }
            Segment::Break => lines.push(Vec::new()),
            Segment::Group { style, children } => collect_runs(children, *style, lines),
        }
    }
}

fn collect_links<'a>(segments: &'a [Segment], links: &mut Vec<(&'a str, &'a str)>) {
    for segment in segments {
        match segment {
            Segment::Link { href, label } => links.push((href.as_str(), label.as_str())),
            Segment::Group { children, .. } => collect_links(children, links),
            Segment::Text { .. } | Segment::Break => {}
        }
    }
}

#[derive(Debug, Default)]
pub struct PayloadBuilder {
    segments: Vec<Segment>,
}

impl PayloadBuilder {
    pub fn styled(mut self, style: TextStyle, text: impl Into<String>) -> Self {
        self.segments.push(Segment::Text {
            text: text.into(),
            style,
        });
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.styled(TextStyle::Plain, text)
    }

    pub fn primary(self, text: impl Into<String>) -> Self {
        self.styled(TextStyle::Primary, text)
    }

    pub fn accent(self, text: impl Into<String>) -> Self {
        self.styled(TextStyle::Accent, text)
    }

    pub fn dim(self, text: impl Into<String>) -> Self {
        self.styled(TextStyle::Dim, text)
    }

    pub fn success(self, text: impl Into<String>) -> Self {
        self.styled(TextStyle::Success, text)
    }

    pub fn link(mut self, href: impl Into<String>, label: impl Into<String>) -> Self {
        self.segments.push(Segment::Link {
            href: href.into(),
            label: label.into(),
        });
        self
    }

    pub fn br(mut self) -> Self {
        self.segments.push(Segment::Break);
        self
    }

    /// Appends a styled group built by `build`.
    pub fn group(mut self, style: TextStyle, build: impl FnOnce(Self) -> Self) -> Self {
        let children = build(Self::default()).segments;
        self.segments.push(Segment::Group { style, children });
        self
    }

    /// Applies `build` to every item, in order.
    pub fn each<T>(self, items: impl IntoIterator<Item = T>, build: impl Fn(Self, T) -> Self) -> Self {
        items.into_iter().fold(self, build)
    }

    pub fn build(self) -> OutputPayload {
        OutputPayload {
            segments: self.segments,
        }
    }
}
