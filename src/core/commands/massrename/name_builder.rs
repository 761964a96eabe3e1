use regex::Captures;

/// Widest field `${n,w}` may ask for, the usual file name length limit.
pub const MAX_FIELD_WIDTH: usize = 255;

/// Replacement expression such as `photo-${2}-${1,03}.jpg`.
///
/// `${n}` inserts capture group `n`; `${n,w}` pads it on the left to width
/// `w`, with zeros when `w` is written with a leading zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameBuilder {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Group {
        index: usize,
        width: usize,
        zero_pad: bool,
    },
}

impl NameBuilder {
    pub fn parse(expression: &str) -> Result<Self, String> {
        let mut segments = Vec::new();
        let mut rest = expression;

        while let Some(start) = rest.find("${") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let end = after
                .find('}')
                .ok_or_else(|| format!("unclosed substitution in '{}'", expression))?;
            segments.push(parse_group(&after[..end])?);
            rest = &after[end + 1..];
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }
        Ok(Self { segments })
    }

    /// Highest group index referenced, if any.
    pub fn max_group(&self) -> Option<usize> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Group { index, .. } => Some(*index),
                Segment::Literal(_) => None,
            })
            .max()
    }

    pub fn build(&self, captures: &Captures<'_>) -> String {
        let mut name = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => name.push_str(text),
                Segment::Group {
                    index,
                    width,
                    zero_pad,
                } => {
                    let value = captures.get(*index).map_or("", |m| m.as_str());
                    let fill = if *zero_pad { '0' } else { ' ' };
                    let missing = width.saturating_sub(value.chars().count());
                    name.extend(std::iter::repeat(fill).take(missing));
                    name.push_str(value);
                }
            }
        }
        name
    }
}

fn parse_group(inner: &str) -> Result<Segment, String> {
    let (index, width) = match inner.split_once(',') {
        Some((index, width)) => (index.trim(), Some(width.trim())),
        None => (inner.trim(), None),
    };

    let index = index
        .parse::<usize>()
        .map_err(|_| format!("'{}' is not a group index", index))?;

    let (width, zero_pad) = match width {
        None => (0, false),
        Some(width) => {
            let parsed = width
                .parse::<usize>()
                .map_err(|_| format!("'{}' is not a field width", width))?;
            if parsed > MAX_FIELD_WIDTH {
                return Err(format!(
                    "field width {} exceeds {}",
                    parsed, MAX_FIELD_WIDTH
                ));
            }
            (parsed, width.starts_with('0'))
        }
    };

    Ok(Segment::Group {
        index,
        width,
        zero_pad,
    })
}
